use rust_decimal::Decimal;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::leaderboard::LeaderboardEntry;
use crate::dto::participant::{ApprovalStatus, NewParticipant};
use crate::error::{Result, StorageError};
use crate::models::{Participant, ROLE_ADMIN, ROLE_USER};

const PARTICIPANT_COLUMNS: &str = "participant_id, username, password_hash, wallet_address, \
     profile_image_url, role, is_approved, is_active, initial_balance, current_balance, \
     profit_rate, rank, created_at";

pub struct ParticipantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ParticipantRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Register a new participant, pending admin approval.
    pub async fn create(&self, new: &NewParticipant) -> Result<Participant> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            r#"
            INSERT INTO participants
                (username, password_hash, wallet_address, profile_image_url, role,
                 is_approved, is_active, initial_balance, current_balance, profit_rate)
            VALUES ($1, $2, $3, $4, $5, FALSE, TRUE, $6, $6, 0)
            RETURNING {PARTICIPANT_COLUMNS}
            "#
        ))
        .bind(&new.username)
        .bind(&new.password_hash)
        .bind(&new.wallet_address)
        .bind(&new.profile_image_url)
        .bind(ROLE_USER)
        .bind(new.initial_balance)
        .fetch_one(self.pool)
        .await?;

        Ok(participant)
    }

    /// Idempotent admin bootstrap: returns the existing account when the
    /// username is already taken.
    pub async fn create_admin(
        &self,
        username: &str,
        password_hash: &str,
        wallet_address: &str,
    ) -> Result<Participant> {
        if let Some(existing) = self.find_by_username(username).await? {
            return Ok(existing);
        }

        let participant = sqlx::query_as::<_, Participant>(&format!(
            r#"
            INSERT INTO participants
                (username, password_hash, wallet_address, profile_image_url, role,
                 is_approved, is_active, initial_balance, current_balance, profit_rate)
            VALUES ($1, $2, $3, NULL, $4, TRUE, TRUE, 0, 0, 0)
            RETURNING {PARTICIPANT_COLUMNS}
            "#
        ))
        .bind(username)
        .bind(password_hash)
        .bind(wallet_address)
        .bind(ROLE_ADMIN)
        .fetch_one(self.pool)
        .await?;

        Ok(participant)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Participant> {
        sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE participant_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<Participant>> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(participant)
    }

    pub async fn find_by_wallet(&self, wallet_address: &str) -> Result<Option<Participant>> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE wallet_address = $1"
        ))
        .bind(wallet_address)
        .fetch_optional(self.pool)
        .await?;

        Ok(participant)
    }

    /// Non-admin accounts for the admin console, newest first, optionally
    /// filtered by approval state.
    pub async fn list(&self, status: ApprovalStatus) -> Result<Vec<Participant>> {
        let mut query = QueryBuilder::new(format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE role <> "
        ));
        query.push_bind(ROLE_ADMIN);

        match status {
            ApprovalStatus::Pending => {
                query.push(" AND is_approved = FALSE");
            }
            ApprovalStatus::Approved => {
                query.push(" AND is_approved = TRUE");
            }
            ApprovalStatus::All => {}
        }

        query.push(" ORDER BY created_at DESC");

        let participants = query.build_query_as().fetch_all(self.pool).await?;

        Ok(participants)
    }

    /// The refresh roster: active, approved, ordinary participants in
    /// creation order. Roster order is the tie-break order for ranking.
    pub async fn list_eligible(&self) -> Result<Vec<Participant>> {
        let participants = sqlx::query_as::<_, Participant>(&format!(
            r#"
            SELECT {PARTICIPANT_COLUMNS} FROM participants
            WHERE is_active = TRUE AND is_approved = TRUE AND role = $1
            ORDER BY created_at ASC
            "#
        ))
        .bind(ROLE_USER)
        .fetch_all(self.pool)
        .await?;

        Ok(participants)
    }

    /// Standings as persisted by the last completed refresh.
    pub async fn list_ranked(&self) -> Result<Vec<Participant>> {
        let participants = sqlx::query_as::<_, Participant>(&format!(
            r#"
            SELECT {PARTICIPANT_COLUMNS} FROM participants
            WHERE is_active = TRUE AND is_approved = TRUE AND role = $1
            ORDER BY profit_rate DESC
            "#
        ))
        .bind(ROLE_USER)
        .fetch_all(self.pool)
        .await?;

        Ok(participants)
    }

    pub async fn approve(&self, id: Uuid) -> Result<Participant> {
        sqlx::query_as::<_, Participant>(&format!(
            r#"
            UPDATE participants SET is_approved = TRUE
            WHERE participant_id = $1
            RETURNING {PARTICIPANT_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM participants WHERE participant_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Apply admin edits; callers pass already-normalized values.
    pub async fn update(
        &self,
        id: Uuid,
        existing: &Participant,
        username: Option<&str>,
        wallet_address: Option<&str>,
        profile_image_url: Option<&str>,
    ) -> Result<Participant> {
        let username = username.unwrap_or(&existing.username);
        let wallet_address = wallet_address.unwrap_or(&existing.wallet_address);
        let profile_image_url = profile_image_url.or(existing.profile_image_url.as_deref());

        sqlx::query_as::<_, Participant>(&format!(
            r#"
            UPDATE participants
            SET username = $2,
                wallet_address = $3,
                profile_image_url = $4
            WHERE participant_id = $1
            RETURNING {PARTICIPANT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(username)
        .bind(wallet_address)
        .bind(profile_image_url)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Write one refresh cycle back to storage as a single transaction:
    /// either every entry's balance/profit/rank lands, or none of them do.
    pub async fn persist_rankings(&self, entries: &[LeaderboardEntry]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for entry in entries {
            sqlx::query(
                r#"
                UPDATE participants
                SET current_balance = $1, profit_rate = $2, rank = $3
                WHERE wallet_address = $4
                "#,
            )
            .bind(Decimal::from_f64_retain(entry.account_value).unwrap_or(Decimal::ZERO))
            .bind(Decimal::from_f64_retain(entry.profit_rate).unwrap_or(Decimal::ZERO))
            .bind(entry.rank as i32)
            .bind(&entry.address)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}
