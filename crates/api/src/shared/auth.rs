use crate::error::HubError;
use actix_web::HttpRequest;
use playhub_infra::HubContext;
use playhub_utils::secrets_match;

pub const TRIGGER_KEY_HEADER: &str = "playhub-trigger-key";

/// Only the scheduler knowing the trigger secret may start a dispatcher run
pub fn protect_trigger_route(req: &HttpRequest, ctx: &HubContext) -> Result<(), HubError> {
    let trigger_key = match req.headers().get(TRIGGER_KEY_HEADER) {
        Some(key) => match key.to_str() {
            Ok(key) => key,
            Err(_) => {
                return Err(HubError::Unauthorized(
                    "Malformed trigger key provided".to_string(),
                ))
            }
        },
        None => {
            return Err(HubError::Unauthorized(format!(
                "Unable to find trigger key in {} header",
                TRIGGER_KEY_HEADER
            )))
        }
    };

    if secrets_match(&ctx.config.trigger_secret, trigger_key) {
        Ok(())
    } else {
        Err(HubError::Unauthorized(format!(
            "Invalid trigger key provided in {} header",
            TRIGGER_KEY_HEADER
        )))
    }
}
