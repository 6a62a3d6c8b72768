use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use surgery_reminders_api::{Application, ReminderScheduler};
use surgery_reminders_domain::NotificationPermission;
use surgery_reminders_infra::{setup_context, InMemoryNotifier, ManualSys, Repos};
use surgery_reminders_sdk::SurgeryRemindersSDK;

pub struct TestApp {
    pub scheduler: Arc<ReminderScheduler>,
    pub sys: Arc<ManualSys>,
    pub notifier: Arc<InMemoryNotifier>,
    pub address: String,
}

/// Sun Feb 21 2021 08:00:00 UTC
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 2, 21, 8, 0, 0).unwrap()
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, SurgeryRemindersSDK) {
    let mut ctx = setup_context().await;
    ctx.config.port = 0; // Random port
    ctx.repos = Repos::create_inmemory(&ctx.config.reminders_storage_key);

    let sys = Arc::new(ManualSys::new(start_time()));
    let notifier = Arc::new(InMemoryNotifier::new(NotificationPermission::Default));
    ctx.sys = sys.clone();
    ctx.notifier = notifier.clone();

    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");
    let scheduler = application.scheduler();

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp {
        scheduler,
        sys,
        notifier,
        address: address.clone(),
    };
    let sdk = SurgeryRemindersSDK::new(address);
    (app, sdk)
}
