use super::IRecipientRepo;
use playhub_domain::{Recipient, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresRecipientRepo {
    pool: PgPool,
}

impl PostgresRecipientRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RecipientRaw {
    user_id: Uuid,
    email: Option<String>,
}

impl From<RecipientRaw> for Recipient {
    fn from(e: RecipientRaw) -> Self {
        Self {
            user_id: e.user_id.into(),
            email: e.email,
        }
    }
}

#[async_trait::async_trait]
impl IRecipientRepo for PostgresRecipientRepo {
    async fn find_many(&self, user_ids: &[ID]) -> anyhow::Result<Vec<Recipient>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let user_ids = user_ids.iter().map(|id| *id.inner_ref()).collect::<Vec<_>>();
        let recipients = sqlx::query_as::<_, RecipientRaw>(
            r#"
            SELECT p.user_id, p.email FROM user_profiles AS p
            WHERE p.user_id = ANY($1)
            "#,
        )
        .bind(&user_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find user profiles for {} users failed. DB returned error: {:?}",
                user_ids.len(),
                e
            );
            e
        })?;

        Ok(recipients.into_iter().map(|r| r.into()).collect())
    }
}
