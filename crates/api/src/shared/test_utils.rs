use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use surgery_reminders_domain::NotificationPermission;
use surgery_reminders_infra::{InMemoryNotifier, ManualSys, ReminderContext};

pub struct TestContext {
    pub ctx: ReminderContext,
    pub sys: Arc<ManualSys>,
    pub notifier: Arc<InMemoryNotifier>,
}

/// Sun Feb 21 2021 08:00:00 UTC
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 2, 21, 8, 0, 0).unwrap()
}

pub fn setup(permission: NotificationPermission) -> TestContext {
    let sys = Arc::new(ManualSys::new(start_time()));
    let notifier = Arc::new(InMemoryNotifier::new(permission));
    let mut ctx = ReminderContext::create_inmemory();
    ctx.sys = sys.clone();
    ctx.notifier = notifier.clone();

    TestContext { ctx, sys, notifier }
}
