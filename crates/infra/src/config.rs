use playhub_domain::DeliveryWindow;
use playhub_utils::create_random_secret;
use std::{fmt::Display, str::FromStr};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Base url of the hub, used to build the links in the emails
    pub app_base_url: String,
    /// Sender identity of the reminder emails
    pub from_email: String,
    pub resend_api_key: String,
    /// Base url of the email endpoint. Only overridden when testing.
    pub resend_api_url: String,
    /// Size of the delivery window in millis. Entries that were missed by more than
    /// this are never delivered.
    pub reminder_window_millis: i64,
    /// How many times a send is attempted within one run. With the default of 1 a
    /// failed entry waits for the next run.
    pub send_attempts: usize,
    /// Key callers of the dispatch trigger must provide
    pub trigger_secret: String,
    /// When set the dispatcher is also run by this process on the given interval
    pub dispatch_interval_secs: Option<u64>,
}

const DEFAULT_APP_BASE_URL: &str = "https://yourapp.com";
const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";
const DEFAULT_FROM_EMAIL: &str = "reminders@playhub.local";

fn parse_env<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match std::env::var(key) {
        Ok(value) => match value.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    key, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

fn string_env(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => default.to_string(),
    }
}

impl Config {
    pub fn new() -> Self {
        let trigger_secret = match std::env::var("TRIGGER_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                info!("Did not find TRIGGER_SECRET environment variable. Going to create one.");
                let secret = create_random_secret(32);
                info!(
                    "Secret for triggering the reminder dispatcher was generated and set to: {}",
                    secret
                );
                secret
            }
        };

        let resend_api_key = string_env("RESEND_API_KEY", "");
        if resend_api_key.is_empty() {
            warn!("RESEND_API_KEY is not set, reminder emails will be rejected.");
        }
        let from_email = string_env("FROM_EMAIL", DEFAULT_FROM_EMAIL);
        if std::env::var("FROM_EMAIL").is_err() {
            warn!(
                "FROM_EMAIL is not set, falling back to the default sender: {}.",
                DEFAULT_FROM_EMAIL
            );
        }

        let window_minutes = parse_env(
            "REMINDER_WINDOW_MINUTES",
            DeliveryWindow::DEFAULT_SIZE_MILLIS / (1000 * 60),
        );
        let reminder_window_millis = match window_minutes.checked_mul(1000 * 60) {
            Some(millis) if millis > 0 => millis,
            _ => {
                warn!(
                    "REMINDER_WINDOW_MINUTES must be a positive number of minutes, falling back to 60."
                );
                DeliveryWindow::DEFAULT_SIZE_MILLIS
            }
        };

        let send_attempts = parse_env::<usize>("REMINDER_SEND_ATTEMPTS", 1).max(1);

        let dispatch_interval_secs = match std::env::var("REMINDER_DISPATCH_INTERVAL_SECS") {
            Ok(secs) => match secs.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(secs),
                _ => {
                    warn!(
                        "The given REMINDER_DISPATCH_INTERVAL_SECS: {} is not valid, the dispatcher will only run when triggered.",
                        secs
                    );
                    None
                }
            },
            Err(_) => None,
        };

        Self {
            port: parse_env("PORT", 5000),
            app_base_url: string_env("APP_BASE_URL", DEFAULT_APP_BASE_URL),
            from_email,
            resend_api_key,
            resend_api_url: string_env("RESEND_API_URL", DEFAULT_RESEND_API_URL),
            reminder_window_millis,
            send_attempts,
            trigger_secret,
            dispatch_interval_secs,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
