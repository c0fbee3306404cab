use crate::error::HubError;
use crate::shared::auth::protect_trigger_route;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use playhub_api_structs::dispatch_reminders::APIResponse;
use playhub_domain::{
    DeliveryOutcome, DeliveryWindow, DispatchSummary, DueReminder, Notification, ID,
};
use playhub_infra::{EmailError, HubContext, OutgoingEmail};
use std::collections::{HashMap, HashSet};
use tracing::{debug, error, info, warn};

fn error_handler(e: UseCaseError) -> HubError {
    match e {
        UseCaseError::StoreUnavailable(e) => HubError::StoreUnavailable(e),
    }
}

pub async fn dispatch_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<HubContext>,
) -> Result<HttpResponse, HubError> {
    protect_trigger_route(&http_req, &ctx)?;

    let usecase = DispatchRemindersUseCase {};
    execute(usecase, &ctx)
        .await
        .map(|summary| HttpResponse::Ok().json(APIResponse::new(summary)))
        .map_err(error_handler)
}

/// Sends every due `ReminderEntry` as an email and marks the delivered ones as sent.
///
/// One run is a stateless pass over the delivery window ending now. Only a failing
/// queue read aborts the run, everything that goes wrong for a single entry is
/// logged and leaves the entry due for the next run.
#[derive(Debug)]
pub struct DispatchRemindersUseCase {}

#[derive(Debug)]
pub enum UseCaseError {
    StoreUnavailable(String),
}

/// Reads the due entries of the window and resolves the address of their owners
async fn find_due_reminders(
    window: &DeliveryWindow,
    ctx: &HubContext,
) -> Result<Vec<DueReminder>, UseCaseError> {
    let entries = ctx
        .repos
        .reminders
        .find_due(window)
        .await
        .map_err(|e| UseCaseError::StoreUnavailable(e.to_string()))?;
    if entries.is_empty() {
        return Ok(Vec::new());
    }

    let user_ids = entries
        .iter()
        .map(|e| e.user_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect::<Vec<_>>();
    let addresses = ctx
        .repos
        .recipients
        .find_many(&user_ids)
        .await
        .map_err(|e| UseCaseError::StoreUnavailable(e.to_string()))?
        .into_iter()
        .filter_map(|r| r.address().map(|address| (r.user_id, address.to_string())))
        .collect::<HashMap<ID, String>>();

    Ok(entries
        .into_iter()
        .map(|entry| DueReminder {
            recipient_email: addresses.get(&entry.user_id).cloned(),
            entry,
        })
        .collect())
}

/// A single attempt by default, more only when configured
async fn send_email(email: &OutgoingEmail, ctx: &HubContext) -> Result<(), EmailError> {
    let attempts = ctx.config.send_attempts.max(1);
    let mut attempt = 1;
    loop {
        match ctx.services.email.send(email).await {
            Ok(()) => return Ok(()),
            Err(e) if attempt < attempts => {
                warn!(
                    "Attempt {} of {} to email {} failed: {}",
                    attempt, attempts, email.to, e
                );
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

async fn dispatch_reminder(reminder: DueReminder, ctx: &HubContext) -> DeliveryOutcome {
    let DueReminder {
        entry,
        recipient_email,
    } = reminder;

    let to = match recipient_email {
        Some(to) => to,
        None => {
            debug!(
                "Skipping reminder entry: {} as user: {} has no email address",
                entry.id, entry.user_id
            );
            return DeliveryOutcome::Skipped;
        }
    };

    let notification = Notification::render(&entry, &ctx.config.app_base_url);
    let email = OutgoingEmail {
        to,
        subject: notification.subject,
        html: notification.html,
    };
    if let Err(e) = send_email(&email, ctx).await {
        error!(
            "Unable to send reminder entry: {} to user: {}. Error: {}",
            entry.id, entry.user_id, e
        );
        return DeliveryOutcome::SendFailed;
    }

    // The email is out at this point, a failing write is not rolled back
    let sent_at = ctx.sys.get_timestamp_millis();
    match ctx.repos.reminders.mark_sent(&entry.id, sent_at).await {
        Ok(true) => DeliveryOutcome::Sent,
        Ok(false) => {
            warn!(
                "Reminder entry: {} was already marked as sent by an overlapping run",
                entry.id
            );
            DeliveryOutcome::Sent
        }
        Err(e) => {
            error!(
                "Reminder entry: {} was sent but could not be marked as sent and may be sent again. Error: {:?}",
                entry.id, e
            );
            DeliveryOutcome::SentUnmarked
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DispatchRemindersUseCase {
    type Response = DispatchSummary;

    type Errors = UseCaseError;

    const NAME: &'static str = "DispatchReminders";

    async fn execute(&mut self, ctx: &HubContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.get_timestamp_millis();
        let window = DeliveryWindow::ending_at(now, ctx.config.reminder_window_millis);

        let due_reminders = find_due_reminders(&window, ctx).await?;
        let mut summary = DispatchSummary {
            due: due_reminders.len(),
            ..Default::default()
        };
        for reminder in due_reminders {
            summary.record(dispatch_reminder(reminder, ctx).await);
        }

        info!(
            "Dispatched reminders in window [{}, {}]: {:?}",
            window.start, window.end, summary
        );
        Ok(summary)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(CollectIncompletePlaylists)]
    }
}

/// Refreshes the incomplete playlist reminders once a run has gone through its batch
pub struct CollectIncompletePlaylists;

#[async_trait::async_trait(?Send)]
impl Subscriber<DispatchRemindersUseCase> for CollectIncompletePlaylists {
    async fn notify(&self, _summary: &DispatchSummary, ctx: &HubContext) {
        if let Err(e) = ctx.services.aggregation.trigger().await {
            error!("Unable to collect incomplete playlists: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playhub_domain::{Recipient, ReminderEntry, ReminderReason, ReminderTarget};
    use playhub_infra::{
        IReminderQueueRepo, InMemoryAggregationTrigger, InMemoryEmailSender,
        InMemoryRecipientRepo, InMemoryReminderQueueRepo, Repos, Services, StaticTimeSys,
    };
    use std::sync::Arc;

    const BASE_URL: &str = "https://hub.example.com";
    const NOW: i64 = 1_700_000_000_000;
    const MINUTE: i64 = 1000 * 60;

    struct TestContext {
        ctx: HubContext,
        reminders: Arc<InMemoryReminderQueueRepo>,
        recipients: Arc<InMemoryRecipientRepo>,
        email: Arc<InMemoryEmailSender>,
        aggregation: Arc<InMemoryAggregationTrigger>,
    }

    fn setup() -> TestContext {
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
        ctx.config.app_base_url = BASE_URL.into();
        ctx.config.reminder_window_millis = 60 * MINUTE;
        ctx.config.send_attempts = 1;

        TestContext {
            ctx,
            reminders,
            recipients,
            email,
            aggregation,
        }
    }

    impl TestContext {
        fn user(&self, email: Option<&str>) -> ID {
            let user_id = ID::default();
            self.recipients
                .add(Recipient::new(user_id, email.map(String::from)));
            user_id
        }

        async fn enqueue(
            &self,
            user_id: ID,
            target: ReminderTarget,
            reason: &str,
            scheduled_for: i64,
        ) -> ReminderEntry {
            let entry =
                ReminderEntry::new(user_id, target, ReminderReason::parse(reason), scheduled_for);
            self.reminders.insert(&entry).await.unwrap();
            entry
        }

        async fn sent_at(&self, entry: &ReminderEntry) -> Option<i64> {
            self.reminders.find(&entry.id).await.unwrap().sent_at
        }

        async fn dispatch(&self) -> Result<DispatchSummary, UseCaseError> {
            execute(DispatchRemindersUseCase {}, &self.ctx).await
        }
    }

    #[tokio::test]
    async fn sends_video_reminder_and_marks_it_sent() {
        let t = setup();
        let user_id = t.user(Some("viewer@example.com"));
        let entry = t
            .enqueue(
                user_id,
                ReminderTarget::Video("v1".into()),
                "user-scheduled",
                NOW - 10 * MINUTE,
            )
            .await;

        let summary = t.dispatch().await.unwrap();

        assert_eq!(summary.due, 1);
        assert_eq!(summary.sent, 1);
        let sent = t.email.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "viewer@example.com");
        assert_eq!(sent[0].subject, "Video reminder");
        assert!(sent[0].html.contains("https://hub.example.com/watch/v1"));
        assert_eq!(t.sent_at(&entry).await, Some(NOW));
    }

    #[tokio::test]
    async fn sends_incomplete_playlist_reminder() {
        let t = setup();
        let user_id = t.user(Some("viewer@example.com"));
        let entry = t
            .enqueue(
                user_id,
                ReminderTarget::Playlist("p1".into()),
                "incomplete_playlist",
                NOW - 5 * MINUTE,
            )
            .await;

        t.dispatch().await.unwrap();

        let sent = t.email.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Keep watching your playlist");
        assert!(sent[0].html.contains("https://hub.example.com/playlists/p1"));
        assert!(t.sent_at(&entry).await.is_some());
    }

    #[tokio::test]
    async fn ignores_entries_outside_the_window() {
        let t = setup();
        let user_id = t.user(Some("viewer@example.com"));
        let missed = t
            .enqueue(
                user_id,
                ReminderTarget::Video("v1".into()),
                "user_scheduled",
                NOW - 120 * MINUTE,
            )
            .await;
        let upcoming = t
            .enqueue(
                user_id,
                ReminderTarget::Video("v2".into()),
                "user_scheduled",
                NOW + MINUTE,
            )
            .await;

        let summary = t.dispatch().await.unwrap();

        assert_eq!(summary, DispatchSummary::default());
        assert!(t.email.sent().is_empty());
        assert_eq!(t.sent_at(&missed).await, None);
        assert_eq!(t.sent_at(&upcoming).await, None);
    }

    #[tokio::test]
    async fn skips_recipients_without_address() {
        let t = setup();
        let no_email = t.user(None);
        let no_profile = ID::default();
        let first = t
            .enqueue(
                no_email,
                ReminderTarget::Video("v1".into()),
                "user_scheduled",
                NOW - MINUTE,
            )
            .await;
        let second = t
            .enqueue(
                no_profile,
                ReminderTarget::Playlist("p1".into()),
                "user_scheduled",
                NOW - MINUTE,
            )
            .await;

        let summary = t.dispatch().await.unwrap();

        assert_eq!(summary.skipped, 2);
        assert_eq!(t.email.attempts(), 0);
        assert_eq!(t.sent_at(&first).await, None);
        assert_eq!(t.sent_at(&second).await, None);
    }

    #[tokio::test]
    async fn aborts_without_sending_when_queue_is_unavailable() {
        let t = setup();
        let user_id = t.user(Some("viewer@example.com"));
        let entry = t
            .enqueue(
                user_id,
                ReminderTarget::Video("v1".into()),
                "user_scheduled",
                NOW - MINUTE,
            )
            .await;
        t.reminders.set_reads_fail(true);

        let res = t.dispatch().await;

        assert!(matches!(res, Err(UseCaseError::StoreUnavailable(_))));
        assert_eq!(t.email.attempts(), 0);
        assert_eq!(t.aggregation.calls(), 0);
        t.reminders.set_reads_fail(false);
        assert_eq!(t.sent_at(&entry).await, None);
    }

    #[tokio::test]
    async fn aborts_without_sending_when_profiles_are_unavailable() {
        let t = setup();
        let user_id = t.user(Some("viewer@example.com"));
        t.enqueue(
            user_id,
            ReminderTarget::Video("v1".into()),
            "user_scheduled",
            NOW - MINUTE,
        )
        .await;
        t.recipients.set_reads_fail(true);

        assert!(t.dispatch().await.is_err());
        assert_eq!(t.email.attempts(), 0);
    }

    #[tokio::test]
    async fn send_failure_does_not_block_other_entries() {
        let t = setup();
        let failing_user = t.user(Some("bounce@example.com"));
        let user_id = t.user(Some("viewer@example.com"));
        let failing = t
            .enqueue(
                failing_user,
                ReminderTarget::Video("v1".into()),
                "user_scheduled",
                NOW - 20 * MINUTE,
            )
            .await;
        let entry = t
            .enqueue(
                user_id,
                ReminderTarget::Video("v2".into()),
                "user_scheduled",
                NOW - 10 * MINUTE,
            )
            .await;
        t.email.fail_for("bounce@example.com");

        let summary = t.dispatch().await.unwrap();

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.sent, 1);
        assert_eq!(t.email.attempts(), 2);
        assert_eq!(t.sent_at(&failing).await, None);
        assert_eq!(t.sent_at(&entry).await, Some(NOW));
        assert_eq!(t.aggregation.calls(), 1);
    }

    #[tokio::test]
    async fn retries_sends_when_configured() {
        let mut t = setup();
        t.ctx.config.send_attempts = 3;
        let user_id = t.user(Some("bounce@example.com"));
        let entry = t
            .enqueue(
                user_id,
                ReminderTarget::Video("v1".into()),
                "user_scheduled",
                NOW - MINUTE,
            )
            .await;
        t.email.fail_for("bounce@example.com");

        let summary = t.dispatch().await.unwrap();

        assert_eq!(summary.failed, 1);
        assert_eq!(t.email.attempts(), 3);
        assert_eq!(t.sent_at(&entry).await, None);
    }

    #[tokio::test]
    async fn rerun_without_new_entries_sends_nothing() {
        let t = setup();
        let user_id = t.user(Some("viewer@example.com"));
        let entry = t
            .enqueue(
                user_id,
                ReminderTarget::Video("v1".into()),
                "user_scheduled",
                NOW - MINUTE,
            )
            .await;

        assert_eq!(t.dispatch().await.unwrap().sent, 1);
        let summary = t.dispatch().await.unwrap();

        assert_eq!(summary, DispatchSummary::default());
        assert_eq!(t.email.sent().len(), 1);
        assert_eq!(t.sent_at(&entry).await, Some(NOW));
    }

    #[tokio::test]
    async fn failed_mark_is_counted_and_entry_stays_due() {
        let t = setup();
        let user_id = t.user(Some("viewer@example.com"));
        let entry = t
            .enqueue(
                user_id,
                ReminderTarget::Video("v1".into()),
                "user_scheduled",
                NOW - MINUTE,
            )
            .await;
        t.reminders.set_writes_fail(true);

        let summary = t.dispatch().await.unwrap();

        assert_eq!(summary.unmarked, 1);
        assert_eq!(t.email.sent().len(), 1);
        assert_eq!(t.sent_at(&entry).await, None);
    }

    #[tokio::test]
    async fn entry_marked_by_overlapping_run_keeps_first_sent_at() {
        let t = setup();
        let user_id = t.user(Some("viewer@example.com"));
        let entry = t
            .enqueue(
                user_id,
                ReminderTarget::Playlist("p1".into()),
                "incomplete_playlist",
                NOW - 5 * MINUTE,
            )
            .await;
        let first_sent_at = NOW - MINUTE;
        assert!(t.reminders.mark_sent(&entry.id, first_sent_at).await.unwrap());
        t.reminders.set_stale_reads(true);

        let summary = t.dispatch().await.unwrap();

        assert_eq!(summary.due, 1);
        assert_eq!(summary.sent, 1);
        assert_eq!(summary.unmarked, 0);
        assert_eq!(t.email.sent().len(), 1);
        assert_eq!(t.sent_at(&entry).await, Some(first_sent_at));
    }

    #[tokio::test]
    async fn aggregation_failure_does_not_fail_the_run() {
        let t = setup();
        t.aggregation.set_fails(true);

        let res = t.dispatch().await;

        assert!(res.is_ok());
        assert_eq!(t.aggregation.calls(), 1);
    }
}
