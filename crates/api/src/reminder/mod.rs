pub mod cancel_reminders;
pub mod get_reminders;
pub mod reschedule_reminder;
pub mod schedule_reminder;
pub mod send_due_reminders;

use actix_web::web;
use cancel_reminders::cancel_reminders_controller;
use get_reminders::get_reminders_controller;
use reschedule_reminder::reschedule_reminder_controller;
use schedule_reminder::schedule_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders", web::get().to(get_reminders_controller));
    cfg.route("/reminders", web::post().to(schedule_reminder_controller));

    cfg.route(
        "/cases/{case_id}/reminders",
        web::put().to(reschedule_reminder_controller),
    );
    cfg.route(
        "/cases/{case_id}/reminders",
        web::delete().to(cancel_reminders_controller),
    );
}
