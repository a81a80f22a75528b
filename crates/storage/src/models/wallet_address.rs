use std::fmt;

/// EVM wallet address, lowercase-normalized: `0x` followed by exactly 40 hex
/// digits. All storage lookups and uniqueness checks go through this form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn parse(input: &str) -> Result<Self, String> {
        let normalized = input.trim().to_lowercase();

        let hex = normalized
            .strip_prefix("0x")
            .ok_or_else(|| "wallet address must start with 0x".to_string())?;

        if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err("wallet address must be 0x followed by exactly 40 hex digits".to_string());
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
