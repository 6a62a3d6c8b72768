pub mod request_notification_permission;

use actix_web::web;
use request_notification_permission::request_notification_permission_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/notifications/permission",
        web::post().to(request_notification_permission_controller),
    );
}
