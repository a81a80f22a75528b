use std::cmp::Ordering;

use rust_decimal::prelude::ToPrimitive;

use crate::dto::leaderboard::{DEFAULT_AVATAR_URL, LeaderboardEntry};
use crate::models::Participant;

/// How participants whose balance lookup failed take part in the ranking.
///
/// The reference behavior keeps them in with a zeroed account value, trading
/// correctness for availability; `Exclude` drops them from the cycle instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailedFetchPolicy {
    #[default]
    IncludeZeroed,
    Exclude,
}

impl FailedFetchPolicy {
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "include_zeroed" => Ok(Self::IncludeZeroed),
            "exclude" => Ok(Self::Exclude),
            other => Err(format!(
                "unknown failed-fetch policy '{other}', expected 'include_zeroed' or 'exclude'"
            )),
        }
    }
}

/// Outcome of one balance lookup; `current_value` is `None` when the venue
/// query failed.
#[derive(Debug, Clone)]
pub struct BalanceSnapshot {
    pub participant: Participant,
    pub current_value: Option<f64>,
}

/// Percentage change of `current` versus `initial`. Guarded to exactly zero
/// when the initial balance is missing, zero, or negative.
pub fn profit_rate(initial: Option<f64>, current: f64) -> f64 {
    match initial {
        Some(initial) if initial > 0.0 => (current - initial) / initial * 100.0,
        _ => 0.0,
    }
}

/// Pure ranking step of a refresh cycle: derive profit rates, order entries
/// by profit rate descending, and assign dense 1-based ranks.
///
/// The sort is stable, so entries with equal profit rates keep their input
/// (roster) order. Performs no I/O; deterministic for identical inputs.
pub fn rank_snapshots(
    snapshots: Vec<BalanceSnapshot>,
    policy: FailedFetchPolicy,
) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = snapshots
        .into_iter()
        .filter(|snapshot| {
            snapshot.current_value.is_some() || policy == FailedFetchPolicy::IncludeZeroed
        })
        .map(|snapshot| {
            let initial = snapshot.participant.initial_balance.and_then(|d| d.to_f64());
            // A failed lookup zeroes the displayed value but never counts as a
            // real position: the profit rate stays at 0, not -100%.
            let (current, rate) = match snapshot.current_value {
                Some(current) => (current, profit_rate(initial, current)),
                None => (0.0, 0.0),
            };

            LeaderboardEntry {
                address: snapshot.participant.wallet_address,
                name: snapshot.participant.username,
                avatar: snapshot
                    .participant
                    .profile_image_url
                    .unwrap_or_else(|| DEFAULT_AVATAR_URL.to_string()),
                account_value: current,
                initial_balance: initial.unwrap_or(0.0),
                profit_rate: rate,
                rank: 0,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.profit_rate
            .partial_cmp(&a.profit_rate)
            .unwrap_or(Ordering::Equal)
    });

    for (position, entry) in entries.iter_mut().enumerate() {
        entry.rank = (position + 1) as i64;
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn participant(username: &str, initial_balance: Option<f64>) -> Participant {
        Participant {
            participant_id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: "hash".to_string(),
            wallet_address: format!("0x{:040x}", username.len()),
            profile_image_url: None,
            role: "user".to_string(),
            is_approved: true,
            is_active: true,
            initial_balance: initial_balance.and_then(Decimal::from_f64_retain),
            current_balance: None,
            profit_rate: Decimal::ZERO,
            rank: None,
            created_at: chrono::NaiveDateTime::default(),
        }
    }

    fn snapshot(username: &str, initial: Option<f64>, current: Option<f64>) -> BalanceSnapshot {
        BalanceSnapshot {
            participant: participant(username, initial),
            current_value: current,
        }
    }

    #[test]
    fn test_profit_rate_formula() {
        assert_eq!(profit_rate(Some(100.0), 150.0), 50.0);
        assert_eq!(profit_rate(Some(200.0), 180.0), -10.0);
    }

    #[test]
    fn test_profit_rate_zero_guard() {
        assert_eq!(profit_rate(None, 500.0), 0.0);
        assert_eq!(profit_rate(Some(0.0), 500.0), 0.0);
        assert_eq!(profit_rate(Some(-100.0), 500.0), 0.0);
    }

    #[test]
    fn test_ranks_by_profit_rate_descending() {
        // Alice +50%, Bob -10%.
        let entries = rank_snapshots(
            vec![
                snapshot("alice", Some(100.0), Some(150.0)),
                snapshot("bob", Some(200.0), Some(180.0)),
            ],
            FailedFetchPolicy::IncludeZeroed,
        );

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "alice");
        assert_eq!(entries[0].profit_rate, 50.0);
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[1].name, "bob");
        assert_eq!(entries[1].profit_rate, -10.0);
        assert_eq!(entries[1].rank, 2);
    }

    #[test]
    fn test_zero_initial_balance_ranks_with_zero_profit() {
        let entries = rank_snapshots(
            vec![snapshot("alice", Some(0.0), Some(500.0))],
            FailedFetchPolicy::IncludeZeroed,
        );

        assert_eq!(entries[0].profit_rate, 0.0);
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[0].account_value, 500.0);
    }

    #[test]
    fn test_failed_fetch_included_with_zeroed_value() {
        // Alice breaks even, Bob's lookup failed: both end at 0% and keep
        // roster order on the tie.
        let entries = rank_snapshots(
            vec![
                snapshot("alice", Some(100.0), Some(100.0)),
                snapshot("bob", Some(50.0), None),
            ],
            FailedFetchPolicy::IncludeZeroed,
        );

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "alice");
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[1].name, "bob");
        assert_eq!(entries[1].account_value, 0.0);
        assert_eq!(entries[1].profit_rate, 0.0);
        assert_eq!(entries[1].rank, 2);
    }

    #[test]
    fn test_failed_fetch_never_counts_as_total_loss() {
        // Carol's lookup failed; despite a positive initial balance her
        // profit rate is 0, so she stays above Bob's real -10%.
        let entries = rank_snapshots(
            vec![
                snapshot("bob", Some(200.0), Some(180.0)),
                snapshot("carol", Some(50.0), None),
            ],
            FailedFetchPolicy::IncludeZeroed,
        );

        let carol = entries.iter().find(|e| e.name == "carol").unwrap();
        assert_eq!(carol.profit_rate, 0.0);
        assert_eq!(carol.account_value, 0.0);
        assert_eq!(carol.rank, 1);
        assert_eq!(entries[1].name, "bob");
    }

    #[test]
    fn test_failed_fetch_excluded_under_exclude_policy() {
        let entries = rank_snapshots(
            vec![
                snapshot("alice", Some(100.0), Some(100.0)),
                snapshot("bob", Some(50.0), None),
                snapshot("carol", Some(100.0), Some(120.0)),
            ],
            FailedFetchPolicy::Exclude,
        );

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "carol");
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[1].name, "alice");
        assert_eq!(entries[1].rank, 2);
    }

    #[test]
    fn test_empty_roster_produces_empty_leaderboard() {
        let entries = rank_snapshots(Vec::new(), FailedFetchPolicy::IncludeZeroed);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_no_participant_dropped_and_ranks_are_dense() {
        let snapshots = vec![
            snapshot("a", Some(100.0), Some(110.0)),
            snapshot("b", None, Some(300.0)),
            snapshot("c", Some(100.0), None),
            snapshot("d", Some(100.0), Some(90.0)),
            snapshot("e", Some(100.0), Some(110.0)),
        ];
        let count = snapshots.len();

        let entries = rank_snapshots(snapshots, FailedFetchPolicy::IncludeZeroed);

        assert_eq!(entries.len(), count);
        let ranks: Vec<i64> = entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, (1..=count as i64).collect::<Vec<_>>());
        for pair in entries.windows(2) {
            assert!(pair[0].profit_rate >= pair[1].profit_rate);
        }
    }

    #[test]
    fn test_ties_preserve_roster_order() {
        let entries = rank_snapshots(
            vec![
                snapshot("first", Some(100.0), Some(100.0)),
                snapshot("second", Some(200.0), Some(200.0)),
                snapshot("third", None, None),
            ],
            FailedFetchPolicy::IncludeZeroed,
        );

        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_missing_avatar_falls_back_to_placeholder() {
        let entries = rank_snapshots(
            vec![snapshot("alice", Some(100.0), Some(100.0))],
            FailedFetchPolicy::IncludeZeroed,
        );
        assert_eq!(entries[0].avatar, DEFAULT_AVATAR_URL);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            FailedFetchPolicy::parse("include_zeroed").unwrap(),
            FailedFetchPolicy::IncludeZeroed
        );
        assert_eq!(
            FailedFetchPolicy::parse("exclude").unwrap(),
            FailedFetchPolicy::Exclude
        );
        assert!(FailedFetchPolicy::parse("drop").is_err());
    }
}
