mod telemetry;

use surgery_reminders_api::Application;
use surgery_reminders_domain::ScheduledReminder;
use surgery_reminders_infra::setup_context;
use telemetry::{get_subscriber, init_subscriber};
use tracing::warn;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("surgery_reminders_server".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context().await;

    let app = Application::new(context).await?;
    // In-app banner for the operators watching the server output
    app.scheduler().subscribe(|reminder: &ScheduledReminder| {
        warn!(
            case_id = reminder.case_id,
            "{}",
            reminder.notification().body
        );
    });
    app.start().await
}
