// src/forensics/store.rs
// SQLite log of every interaction: what the scammer said, what we answered

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::intel::Intelligence;

#[derive(Debug, Clone)]
pub struct NewInteraction {
    pub session_id: String,
    pub user_text: String,
    pub reply: String,
    pub risk_score: u8,
    pub persona: Option<String>,
    pub provider: Option<String>,
    pub intelligence: Intelligence,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InteractionRecord {
    pub id: i64,
    pub session_id: String,
    pub user_text: String,
    pub reply: String,
    pub risk_score: i64,
    pub persona: Option<String>,
    pub provider: Option<String>,
    pub intelligence_json: String,
    pub created_at: DateTime<Utc>,
}

impl InteractionRecord {
    pub fn intelligence(&self) -> Intelligence {
        serde_json::from_str(&self.intelligence_json).unwrap_or_default()
    }
}

#[derive(Clone)]
pub struct InteractionStore {
    pool: SqlitePool,
}

impl InteractionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn record(&self, interaction: &NewInteraction) -> Result<i64> {
        let intelligence_json = serde_json::to_string(&interaction.intelligence)?;

        let result = sqlx::query(
            r#"
            INSERT INTO interactions
                (session_id, user_text, reply, risk_score, persona, provider, intelligence_json, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&interaction.session_id)
        .bind(&interaction.user_text)
        .bind(&interaction.reply)
        .bind(i64::from(interaction.risk_score))
        .bind(&interaction.persona)
        .bind(&interaction.provider)
        .bind(&intelligence_json)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Oldest first
    pub async fn for_session(&self, session_id: &str) -> Result<Vec<InteractionRecord>> {
        let rows = sqlx::query_as::<_, InteractionRecord>(
            r#"
            SELECT id, session_id, user_text, reply, risk_score, persona, provider,
                   intelligence_json, created_at
            FROM interactions
            WHERE session_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM interactions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forensics::intel;
    use crate::server::db::{create_pool, run_migrations};
    use std::path::Path;

    async fn store() -> InteractionStore {
        let pool = create_pool("sqlite::memory:", 1).await.unwrap();
        run_migrations(&pool, &Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations"))
            .await
            .unwrap();
        InteractionStore::new(pool)
    }

    fn interaction(session: &str, text: &str) -> NewInteraction {
        NewInteraction {
            session_id: session.to_string(),
            user_text: text.to_string(),
            reply: "Umm... beta?".to_string(),
            risk_score: 98,
            persona: Some("savitri".to_string()),
            provider: Some("gemini".to_string()),
            intelligence: intel::extract(text),
        }
    }

    #[tokio::test]
    async fn test_record_and_fetch_by_session() {
        let store = store().await;
        store.record(&interaction("a", "pay to scam@ybl")).await.unwrap();
        store.record(&interaction("b", "hello")).await.unwrap();
        store.record(&interaction("a", "call 9876543210")).await.unwrap();

        let rows = store.for_session("a").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].user_text, "pay to scam@ybl");
        assert_eq!(rows[0].risk_score, 98);
        assert_eq!(rows[0].intelligence().upi_ids, vec!["scam@ybl"]);
        assert_eq!(rows[1].intelligence().phone_numbers, vec!["9876543210"]);
        assert_eq!(store.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_unknown_session_is_empty() {
        let store = store().await;
        assert!(store.for_session("missing").await.unwrap().is_empty());
    }
}
