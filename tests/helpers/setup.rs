use playhub_api::Application;
use playhub_infra::{
    Config, HubContext, InMemoryAggregationTrigger, InMemoryEmailSender, InMemoryRecipientRepo,
    InMemoryReminderQueueRepo, Repos, Services, StaticTimeSys,
};
use playhub_sdk::PlayhubSDK;
use std::sync::Arc;

pub const NOW: i64 = 1_700_000_000_000;
pub const MINUTE: i64 = 1000 * 60;

pub struct TestApp {
    pub config: Config,
    pub reminders: Arc<InMemoryReminderQueueRepo>,
    pub recipients: Arc<InMemoryRecipientRepo>,
    pub email: Arc<InMemoryEmailSender>,
    pub aggregation: Arc<InMemoryAggregationTrigger>,
}

// Launch the application with an inmemory context as a background task
pub async fn spawn_app() -> (TestApp, PlayhubSDK, String) {
    let reminders = Arc::new(InMemoryReminderQueueRepo::new());
    let recipients = Arc::new(InMemoryRecipientRepo::new());
    let email = Arc::new(InMemoryEmailSender::new());
    let aggregation = Arc::new(InMemoryAggregationTrigger::new());

    let mut ctx = HubContext::create_inmemory();
    ctx.repos = Repos {
        reminders: reminders.clone(),
        recipients: recipients.clone(),
    };
    ctx.services = Services {
        email: email.clone(),
        aggregation: aggregation.clone(),
    };
    ctx.sys = Arc::new(StaticTimeSys { timestamp: NOW });
    ctx.config.port = 0; // Random port
    ctx.config.app_base_url = "https://hub.example.com".into();
    ctx.config.dispatch_interval_secs = None;

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let sdk = PlayhubSDK::new(address.clone(), config.trigger_secret.clone());
    let app = TestApp {
        config,
        reminders,
        recipients,
        email,
        aggregation,
    };
    (app, sdk, address)
}
