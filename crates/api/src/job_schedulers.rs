use crate::{reminder::dispatch_reminders::DispatchRemindersUseCase, shared::usecase::execute};
use actix_web::rt::time::sleep;
use playhub_infra::HubContext;
use std::time::Duration;
use tracing::info;

/// Seconds until the next multiple of `interval_secs` since the epoch, so that an
/// hourly dispatcher runs at the top of every hour.
pub fn get_start_delay(now_ts: i64, interval_secs: u64) -> u64 {
    let interval_secs = interval_secs.max(1);
    let now_secs = (now_ts / 1000).max(0) as u64;
    interval_secs - now_secs % interval_secs
}

/// Runs the dispatcher in this process when an interval is configured.
/// Otherwise an external scheduler is expected to call the trigger route.
pub fn start_dispatch_reminders_job(ctx: HubContext) {
    let interval_secs = match ctx.config.dispatch_interval_secs {
        Some(secs) => secs,
        None => return,
    };
    info!(
        "Dispatching reminders in process every {} seconds",
        interval_secs
    );

    actix_web::rt::spawn(async move {
        loop {
            let now = ctx.sys.get_timestamp_millis();
            sleep(Duration::from_secs(get_start_delay(now, interval_secs))).await;
            // Awaited before the next run is scheduled, so runs never overlap in this process.
            // Errors are logged by `execute`
            let _ = execute(DispatchRemindersUseCase {}, &ctx).await;
        }
    });
}
