pub mod dispatch_reminders;

use actix_web::web;
use dispatch_reminders::dispatch_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/reminders/dispatch",
        web::post().to(dispatch_reminders_controller),
    );
}
