use crate::{
    notification::request_notification_permission::RequestNotificationPermissionUseCase,
    reminder::{
        cancel_reminders::CancelRemindersUseCase, get_reminders::GetRemindersUseCase,
        reschedule_reminder::RescheduleReminderUseCase,
        schedule_reminder::ScheduleReminderUseCase, send_due_reminders::SendDueRemindersUseCase,
    },
    shared::usecase::execute,
};
use chrono::{DateTime, Utc};
use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex, Weak,
};
use std::time::Duration;
use surgery_reminders_domain::ScheduledReminder;
use surgery_reminders_infra::ReminderContext;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

/// In-process observer of delivered reminders, e.g. a toast banner
pub trait ReminderListener: Send + Sync {
    fn on_reminder(&self, reminder: &ScheduledReminder);
}

impl<F> ReminderListener for F
where
    F: Fn(&ScheduledReminder) + Send + Sync,
{
    fn on_reminder(&self, reminder: &ScheduledReminder) {
        self(reminder)
    }
}

/// Returned by `ReminderScheduler::subscribe` and used to unsubscribe again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerToken(u64);

// Releases the scan flag when a scan completes
struct ScanGuard<'a>(&'a AtomicBool);

impl Drop for ScanGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Periodically scans the stored reminders and delivers the due ones.
///
/// Delivery raises a native notification when the host has granted
/// permission, and always broadcasts the reminder to every subscribed
/// `ReminderListener`.
///
/// The timer runs on the actix runtime, so `initialize` must be called from
/// within an actix system.
pub struct ReminderScheduler {
    ctx: ReminderContext,
    timer: Mutex<Option<JoinHandle<()>>>,
    scanning: AtomicBool,
    listeners: Mutex<Vec<(ListenerToken, Arc<dyn ReminderListener>)>>,
    next_listener_token: AtomicU64,
}

impl ReminderScheduler {
    pub fn new(ctx: ReminderContext) -> Arc<Self> {
        Arc::new(Self {
            ctx,
            timer: Mutex::new(None),
            scanning: AtomicBool::new(false),
            listeners: Mutex::new(Vec::new()),
            next_listener_token: AtomicU64::new(0),
        })
    }

    /// Starts the recurring scan and performs one scan right away.
    ///
    /// Calling this while the timer is already running does nothing.
    pub async fn initialize(self: &Arc<Self>) {
        {
            let mut timer = self.timer.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(handle) = timer.as_ref() {
                if !handle.is_finished() {
                    debug!("Reminder scheduler is already running");
                    return;
                }
            }

            let period = Duration::from_secs(self.ctx.config.tick_interval_secs.max(1));
            *timer = Some(actix_web::rt::spawn(run_timer(Arc::downgrade(self), period)));
            info!(
                "Reminder scheduler started, scanning every {} seconds",
                period.as_secs()
            );
        }

        self.tick().await;
    }

    pub fn is_running(&self) -> bool {
        self.timer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Stops future scans. A scan that is already in progress runs to completion
    pub fn shutdown(&self) {
        let handle = self.timer.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(handle) = handle {
            handle.abort();
            info!("Reminder scheduler stopped");
        }
    }

    /// Schedules a reminder for the surgery of a case.
    ///
    /// Responds with `None` when the notification time has already passed or
    /// the reminder could not be stored. Neither is surfaced as an error,
    /// both are logged.
    pub async fn schedule(
        &self,
        case_id: i64,
        patient_name: &str,
        surgery_date_time: DateTime<Utc>,
        hospital_name: &str,
    ) -> Option<ScheduledReminder> {
        let usecase = ScheduleReminderUseCase {
            case_id,
            patient_name: patient_name.into(),
            hospital_name: hospital_name.into(),
            surgery_date_time,
        };
        execute(usecase, &self.ctx).await.ok().flatten()
    }

    /// Cancels the existing reminders of a case and schedules a new one.
    /// For cases whose surgery time or details changed
    pub async fn reschedule(
        &self,
        case_id: i64,
        patient_name: &str,
        surgery_date_time: DateTime<Utc>,
        hospital_name: &str,
    ) -> Option<ScheduledReminder> {
        let usecase = RescheduleReminderUseCase {
            case_id,
            patient_name: patient_name.into(),
            hospital_name: hospital_name.into(),
            surgery_date_time,
        };
        execute(usecase, &self.ctx).await.ok().flatten()
    }

    /// Removes every reminder of a case and returns how many were removed
    pub async fn cancel(&self, case_id: i64) -> i64 {
        execute(CancelRemindersUseCase { case_id }, &self.ctx)
            .await
            .map(|res| res.deleted_count)
            .unwrap_or(0)
    }

    pub async fn reminders(&self) -> Vec<ScheduledReminder> {
        match execute(GetRemindersUseCase {}, &self.ctx).await {
            Ok(reminders) => reminders,
            Err(e) => match e {},
        }
    }

    /// Asks the host for native notification permission. Returns false when
    /// the host lacks the capability
    pub async fn request_permission(&self) -> bool {
        match execute(RequestNotificationPermissionUseCase {}, &self.ctx).await {
            Ok(permission) => permission.is_granted(),
            Err(e) => match e {},
        }
    }

    pub fn subscribe<L: ReminderListener + 'static>(&self, listener: L) -> ListenerToken {
        let token = ListenerToken(self.next_listener_token.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((token, Arc::new(listener)));
        token
    }

    /// Returns false if the listener was not subscribed
    pub fn unsubscribe(&self, token: ListenerToken) -> bool {
        let mut listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        let before = listeners.len();
        listeners.retain(|(t, _)| *t != token);
        listeners.len() != before
    }

    /// Performs one scan and delivers every reminder that became due.
    ///
    /// Scans never overlap: when a scan is still in progress this returns
    /// immediately. Returns the number of delivered reminders.
    pub async fn tick(&self) -> usize {
        if self
            .scanning
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Previous reminder scan has not completed, skipping this one");
            return 0;
        }
        let _guard = ScanGuard(&self.scanning);

        let due = match execute(SendDueRemindersUseCase {}, &self.ctx).await {
            Ok(due) => due,
            Err(_) => return 0,
        };

        for reminder in &due {
            self.deliver(reminder).await;
        }
        due.len()
    }

    async fn deliver(&self, reminder: &ScheduledReminder) {
        info!(
            "Delivering reminder {} for case {}",
            reminder.id, reminder.case_id
        );

        if self.ctx.notifier.permission().is_granted() {
            if let Err(e) = self.ctx.notifier.show(&reminder.notification()).await {
                error!(
                    "Unable to show native notification for reminder {}. Err: {:?}",
                    reminder.id, e
                );
            }
        }

        let listeners = self
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect::<Vec<_>>();
        for listener in listeners {
            listener.on_reminder(reminder);
        }
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn run_timer(scheduler: Weak<ReminderScheduler>, period: Duration) {
    // The first scan is done by `initialize` itself
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        interval.tick().await;
        match scheduler.upgrade() {
            Some(scheduler) => {
                scheduler.tick().await;
            }
            None => break,
        }
    }
}
