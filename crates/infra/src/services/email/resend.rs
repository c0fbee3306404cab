use super::{EmailError, IEmailSender, OutgoingEmail};
use crate::Config;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// Sends emails through the Resend transactional email api
pub struct ResendEmailSender {
    client: Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl ResendEmailSender {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_url: config.resend_api_url.trim_end_matches('/').to_string(),
            api_key: config.resend_api_key.clone(),
            from: config.from_email.clone(),
        }
    }
}

#[async_trait::async_trait]
impl IEmailSender for ResendEmailSender {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        let body = SendEmailRequest {
            from: &self.from,
            to: &email.to,
            subject: &email.subject,
            html: &email.html,
        };
        let res = self
            .client
            .post(&format!("{}/emails", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| EmailError::Network(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(EmailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let accepted = res
            .json::<SendEmailResponse>()
            .await
            .map_err(|e| EmailError::MalformedResponse(e.to_string()))?;
        debug!("Email endpoint accepted email with id: {}", accepted.id);
        Ok(())
    }
}
