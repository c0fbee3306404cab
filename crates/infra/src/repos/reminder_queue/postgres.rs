use super::IReminderQueueRepo;
use crate::repos::shared::timestamps::{datetime_from_millis, millis_from_datetime};
use chrono::{DateTime, Utc};
use playhub_domain::{DeliveryWindow, ReminderEntry, ReminderReason, ReminderTarget, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresReminderQueueRepo {
    pool: PgPool,
}

impl PostgresReminderQueueRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderEntryRaw {
    id: Uuid,
    user_id: Uuid,
    video_id: Option<String>,
    playlist_id: Option<String>,
    reason: String,
    scheduled_for: DateTime<Utc>,
    sent_at: Option<DateTime<Utc>>,
}

impl From<ReminderEntryRaw> for ReminderEntry {
    fn from(e: ReminderEntryRaw) -> Self {
        Self {
            id: e.id.into(),
            user_id: e.user_id.into(),
            target: ReminderTarget::from_columns(e.video_id, e.playlist_id),
            reason: ReminderReason::parse(&e.reason),
            scheduled_for: millis_from_datetime(&e.scheduled_for),
            sent_at: e.sent_at.as_ref().map(millis_from_datetime),
        }
    }
}

// Target ids are cast to text so that the queue may reference them with any key type
const SELECT_ENTRY: &str = r#"
    SELECT q.id, q.user_id, q.video_id::text AS video_id, q.playlist_id::text AS playlist_id,
        q.reason, q.scheduled_for, q.sent_at
    FROM notification_queue AS q
"#;

#[async_trait::async_trait]
impl IReminderQueueRepo for PostgresReminderQueueRepo {
    async fn insert(&self, entry: &ReminderEntry) -> anyhow::Result<()> {
        let sent_at = match entry.sent_at {
            Some(sent_at) => Some(datetime_from_millis(sent_at)?),
            None => None,
        };
        sqlx::query(
            r#"
            INSERT INTO notification_queue
            (id, user_id, video_id, playlist_id, reason, scheduled_for, sent_at)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(*entry.id.inner_ref())
        .bind(*entry.user_id.inner_ref())
        .bind(entry.target.video_id())
        .bind(entry.target.playlist_id())
        .bind(entry.reason.as_str())
        .bind(datetime_from_millis(entry.scheduled_for)?)
        .bind(sent_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert reminder entry: {:?}. DB returned error: {:?}",
                entry, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, entry_id: &ID) -> Option<ReminderEntry> {
        sqlx::query_as::<_, ReminderEntryRaw>(&format!("{} WHERE q.id = $1", SELECT_ENTRY))
            .bind(*entry_id.inner_ref())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    "Find reminder entry with id: {:?} failed. DB returned error: {:?}",
                    entry_id, e
                );
                e
            })
            .ok()?
            .map(|raw| raw.into())
    }

    async fn find_due(&self, window: &DeliveryWindow) -> anyhow::Result<Vec<ReminderEntry>> {
        let entries = sqlx::query_as::<_, ReminderEntryRaw>(&format!(
            r#"{}
            WHERE q.sent_at IS NULL
                AND q.scheduled_for >= $1
                AND q.scheduled_for <= $2
            ORDER BY q.scheduled_for ASC
            "#,
            SELECT_ENTRY
        ))
        .bind(datetime_from_millis(window.start)?)
        .bind(datetime_from_millis(window.end)?)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find due reminder entries in window: {:?} failed. DB returned error: {:?}",
                window, e
            );
            e
        })?;

        Ok(entries.into_iter().map(|e| e.into()).collect())
    }

    async fn mark_sent(&self, entry_id: &ID, sent_at: i64) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE notification_queue
            SET sent_at = $2
            WHERE id = $1 AND sent_at IS NULL
            "#,
        )
        .bind(*entry_id.inner_ref())
        .bind(datetime_from_millis(sent_at)?)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to mark reminder entry: {:?} as sent. DB returned error: {:?}",
                entry_id, e
            );
            e
        })?;
        Ok(res.rows_affected() > 0)
    }
}
