use serde::Deserialize;

use crate::error::OracleError;

/// Subset of the venue's `clearinghouseState` response we consume.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearinghouseState {
    pub margin_summary: MarginSummary,
}

/// The venue serializes numeric fields as strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginSummary {
    pub account_value: String,
}

impl ClearinghouseState {
    /// `"NaN"` and `"inf"` parse as valid f64s, so finiteness is checked
    /// explicitly to keep them out of downstream arithmetic.
    pub fn account_value(&self) -> Result<f64, OracleError> {
        let raw = &self.margin_summary.account_value;
        let value: f64 = raw
            .parse()
            .map_err(|e| OracleError::MalformedResponse(format!("accountValue: {e}")))?;

        if value.is_finite() {
            Ok(value)
        } else {
            Err(OracleError::MalformedResponse(format!(
                "accountValue is not finite: {raw}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_account_value() {
        let state: ClearinghouseState = serde_json::from_str(
            r#"{"marginSummary": {"accountValue": "1234.56", "totalNtlPos": "0.0"}}"#,
        )
        .unwrap();
        assert_eq!(state.account_value().unwrap(), 1234.56);
    }

    #[test]
    fn test_parses_negative_account_value() {
        let state: ClearinghouseState =
            serde_json::from_str(r#"{"marginSummary": {"accountValue": "-42.5"}}"#).unwrap();
        assert_eq!(state.account_value().unwrap(), -42.5);
    }

    #[test]
    fn test_rejects_non_numeric_account_value() {
        let state: ClearinghouseState =
            serde_json::from_str(r#"{"marginSummary": {"accountValue": "not-a-number"}}"#)
                .unwrap();
        assert!(state.account_value().is_err());
    }

    #[test]
    fn test_rejects_non_finite_account_value() {
        for raw in ["NaN", "inf", "-inf", "infinity"] {
            let state = ClearinghouseState {
                margin_summary: MarginSummary {
                    account_value: raw.to_string(),
                },
            };
            assert!(state.account_value().is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_missing_margin_summary_fails_deserialization() {
        let result: Result<ClearinghouseState, _> = serde_json::from_str(r#"{"time": 0}"#);
        assert!(result.is_err());
    }
}
