use futures::future::join_all;
use oracle::BalanceOracle;
use sqlx::PgPool;
use storage::{
    dto::leaderboard::LeaderboardEntry,
    models::Participant,
    repository::participant::ParticipantRepository,
    services::ranking::{self, BalanceSnapshot},
};

use crate::error::WebError;
use crate::state::AppState;

/// One full refresh cycle: load the eligible roster, fetch every balance
/// concurrently, rank, and write the result back in a single transaction.
///
/// Oracle failures degrade individual entries per the configured policy and
/// never abort the cycle; only storage failures surface as errors.
pub async fn refresh_leaderboard(state: &AppState) -> Result<Vec<LeaderboardEntry>, WebError> {
    // Overlapping triggers queue here instead of interleaving write-backs.
    let _refresh = state.refresh_lock.lock().await;

    let repo = ParticipantRepository::new(state.db.pool());

    let roster = repo.list_eligible().await?;
    if roster.is_empty() {
        return Ok(Vec::new());
    }

    let snapshots = fetch_balances(state.oracle.as_ref(), roster).await;
    let entries = ranking::rank_snapshots(snapshots, state.failed_fetch_policy);

    repo.persist_rankings(&entries).await?;

    tracing::info!(entries = entries.len(), "leaderboard refresh completed");

    Ok(entries)
}

/// Standings as persisted by the last completed refresh.
pub async fn list_ranked(pool: &PgPool) -> Result<Vec<Participant>, WebError> {
    let repo = ParticipantRepository::new(pool);
    Ok(repo.list_ranked().await?)
}

/// Issues one oracle query per participant, all concurrently, and waits for
/// every one of them to finish. The output has the same length and order as
/// the roster: a failed lookup becomes a snapshot without a value, it is
/// never dropped and never aborts the other lookups.
async fn fetch_balances(
    oracle: &dyn BalanceOracle,
    roster: Vec<Participant>,
) -> Vec<BalanceSnapshot> {
    let lookups = roster.into_iter().map(|participant| async move {
        match oracle.account_value(&participant.wallet_address).await {
            Ok(value) => BalanceSnapshot {
                participant,
                current_value: Some(value),
            },
            Err(error) => {
                tracing::warn!(
                    wallet = %participant.wallet_address,
                    %error,
                    "balance lookup failed"
                );
                BalanceSnapshot {
                    participant,
                    current_value: None,
                }
            }
        }
    });

    join_all(lookups).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use oracle::error::{OracleError, Result as OracleResult};
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use uuid::Uuid;

    /// Resolves known wallets to a fixed value and fails everything else.
    struct MockOracle {
        values: HashMap<String, f64>,
    }

    #[async_trait::async_trait]
    impl BalanceOracle for MockOracle {
        async fn account_value(&self, address: &str) -> OracleResult<f64> {
            self.values
                .get(address)
                .copied()
                .ok_or_else(|| OracleError::MalformedResponse("venue unavailable".to_string()))
        }
    }

    fn participant(wallet: &str) -> Participant {
        Participant {
            participant_id: Uuid::new_v4(),
            username: wallet.to_string(),
            password_hash: "hash".to_string(),
            wallet_address: wallet.to_string(),
            profile_image_url: None,
            role: "user".to_string(),
            is_approved: true,
            is_active: true,
            initial_balance: Some(Decimal::from(100)),
            current_balance: None,
            profit_rate: Decimal::ZERO,
            rank: None,
            created_at: chrono::NaiveDateTime::default(),
        }
    }

    #[tokio::test]
    async fn test_preserves_roster_order_and_length() {
        let oracle = MockOracle {
            values: HashMap::from([
                ("0xaaa".to_string(), 150.0),
                ("0xccc".to_string(), 90.0),
            ]),
        };
        let roster = vec![participant("0xaaa"), participant("0xbbb"), participant("0xccc")];

        let snapshots = fetch_balances(&oracle, roster).await;

        assert_eq!(snapshots.len(), 3);
        assert_eq!(snapshots[0].participant.wallet_address, "0xaaa");
        assert_eq!(snapshots[0].current_value, Some(150.0));
        assert_eq!(snapshots[1].participant.wallet_address, "0xbbb");
        assert_eq!(snapshots[1].current_value, None);
        assert_eq!(snapshots[2].participant.wallet_address, "0xccc");
        assert_eq!(snapshots[2].current_value, Some(90.0));
    }

    #[tokio::test]
    async fn test_completes_when_every_lookup_fails() {
        let oracle = MockOracle {
            values: HashMap::new(),
        };
        let roster = vec![participant("0xaaa"), participant("0xbbb")];

        let snapshots = fetch_balances(&oracle, roster).await;

        assert_eq!(snapshots.len(), 2);
        assert!(snapshots.iter().all(|s| s.current_value.is_none()));
    }

    #[tokio::test]
    async fn test_empty_roster_yields_empty_output() {
        let oracle = MockOracle {
            values: HashMap::new(),
        };

        let snapshots = fetch_balances(&oracle, Vec::new()).await;

        assert!(snapshots.is_empty());
    }
}
