use crate::notification::{ReminderNotification, NOTIFICATION_TITLE};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use surgery_reminders_utils::create_random_secret;

/// How many hours before the surgery the reminder is delivered
pub const REMINDER_LEAD_TIME_HOURS: i64 = 5;
/// How many hours after the surgery a reminder is kept before it is pruned
pub const REMINDER_RETENTION_HOURS: i64 = 24;

/// A `ScheduledReminder` represents a pending "surgery starts soon" alert
/// for a surgical case.
///
/// Patient and hospital names are captured when the reminder is scheduled
/// and are not refreshed if the case is edited afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledReminder {
    pub id: String,
    /// The surgical case this reminder belongs to. Existence of the case
    /// is never validated here
    pub case_id: i64,
    pub patient_name: String,
    pub hospital_name: String,
    pub surgery_date_time: DateTime<Utc>,
    /// Always `surgery_date_time` minus the lead time
    pub notify_at: DateTime<Utc>,
    /// Set exactly once, when the reminder has been delivered
    pub sent: bool,
}

impl ScheduledReminder {
    /// Creates a new pending reminder.
    ///
    /// Returns `None` when the notification time has already passed at `now`,
    /// reminders are never fired retroactively. Surgery times too early to
    /// subtract the lead time from are treated the same way.
    pub fn new(
        case_id: i64,
        patient_name: String,
        hospital_name: String,
        surgery_date_time: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        let notify_at = Self::notify_at_for(surgery_date_time)?;
        if notify_at < now {
            return None;
        }

        Some(Self {
            id: Self::generate_id(case_id, now),
            case_id,
            patient_name,
            hospital_name,
            surgery_date_time,
            notify_at,
            sent: false,
        })
    }

    pub fn lead_time() -> Duration {
        Duration::hours(REMINDER_LEAD_TIME_HOURS)
    }

    pub fn retention() -> Duration {
        Duration::hours(REMINDER_RETENTION_HOURS)
    }

    /// `None` when the result is out of the representable range
    pub fn notify_at_for(surgery_date_time: DateTime<Utc>) -> Option<DateTime<Utc>> {
        surgery_date_time.checked_sub_signed(Self::lead_time())
    }

    // Case id + creation time, the random suffix separates reminders created
    // for the same case within the same millisecond
    fn generate_id(case_id: i64, now: DateTime<Utc>) -> String {
        format!(
            "notif-{}-{}-{}",
            case_id,
            now.timestamp_millis(),
            create_random_secret(6)
        )
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.sent && self.notify_at <= now
    }

    pub fn mark_sent(&mut self) {
        self.sent = true;
    }

    /// Whether the surgery is far enough in the past for this reminder to be
    /// pruned. Independent of `sent`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match now.checked_sub_signed(Self::retention()) {
            Some(cutoff) => self.surgery_date_time <= cutoff,
            None => false,
        }
    }

    pub fn notification(&self) -> ReminderNotification {
        ReminderNotification {
            title: NOTIFICATION_TITLE.into(),
            body: format!(
                "Surgery for {} at {} in {} hours",
                self.patient_name, self.hospital_name, REMINDER_LEAD_TIME_HOURS
            ),
            tag: self.id.clone(),
            case_id: self.case_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 2, 21, 8, 0, 0).unwrap()
    }

    fn reminder_factory(surgery_date_time: DateTime<Utc>) -> ScheduledReminder {
        ScheduledReminder::new(
            42,
            "Ana Pérez".into(),
            "Hospital Roosevelt".into(),
            surgery_date_time,
            now(),
        )
        .expect("Notify time to be in the future")
    }

    #[test]
    fn notify_at_is_lead_time_before_surgery() {
        let surgery = now() + Duration::hours(6);
        let reminder = reminder_factory(surgery);
        assert_eq!(reminder.notify_at, surgery - Duration::hours(5));
        assert_eq!(reminder.case_id, 42);
        assert!(!reminder.sent);
        assert!(reminder.id.starts_with(&format!("notif-42-{}-", now().timestamp_millis())));
    }

    #[test]
    fn rejects_reminders_with_notify_time_in_the_past() {
        for hours in &[0, 1, 4] {
            let surgery = now() + Duration::hours(*hours);
            assert!(ScheduledReminder::new(1, "a".into(), "b".into(), surgery, now()).is_none());
        }
        // Notify time exactly now is still accepted
        let surgery = now() + Duration::hours(5);
        assert!(ScheduledReminder::new(1, "a".into(), "b".into(), surgery, now()).is_some());
    }

    #[test]
    fn ids_are_unique_within_same_millisecond() {
        let surgery = now() + Duration::hours(10);
        let r1 = reminder_factory(surgery);
        let r2 = reminder_factory(surgery);
        assert_ne!(r1.id, r2.id);
    }

    #[test]
    fn due_only_once_notify_time_is_reached() {
        let mut reminder = reminder_factory(now() + Duration::hours(6));
        assert!(!reminder.is_due(now()));
        assert!(reminder.is_due(now() + Duration::hours(1)));
        assert!(reminder.is_due(now() + Duration::hours(3)));

        reminder.mark_sent();
        assert!(!reminder.is_due(now() + Duration::hours(1)));
    }

    #[test]
    fn expires_a_day_after_surgery_regardless_of_sent() {
        let surgery = now() + Duration::hours(6);
        let mut reminder = reminder_factory(surgery);
        assert!(!reminder.is_expired(surgery));
        assert!(!reminder.is_expired(surgery + Duration::hours(23)));
        assert!(reminder.is_expired(surgery + Duration::hours(25)));

        reminder.mark_sent();
        assert!(!reminder.is_expired(surgery + Duration::hours(23)));
        assert!(reminder.is_expired(surgery + Duration::hours(25)));
    }

    #[test]
    fn expires_exactly_at_the_retention_boundary() {
        let surgery = now() + Duration::hours(6);
        let reminder = reminder_factory(surgery);
        let boundary = surgery + Duration::hours(24);
        assert!(!reminder.is_expired(boundary - Duration::seconds(1)));
        assert!(reminder.is_expired(boundary));
    }

    #[test]
    fn surgery_times_at_the_edge_of_the_calendar_do_not_panic() {
        // Goes through serde the same way a request body does
        let earliest: DateTime<Utc> =
            serde_json::from_value(serde_json::to_value(DateTime::<Utc>::MIN_UTC).unwrap())
                .unwrap();
        assert!(ScheduledReminder::notify_at_for(earliest).is_none());
        assert!(ScheduledReminder::new(1, "a".into(), "b".into(), earliest, now()).is_none());
        assert!(
            ScheduledReminder::new(1, "a".into(), "b".into(), earliest, DateTime::<Utc>::MIN_UTC)
                .is_none()
        );

        let latest = DateTime::<Utc>::MAX_UTC;
        let reminder = ScheduledReminder::new(1, "a".into(), "b".into(), latest, now())
            .expect("Far future surgery to be scheduled");
        assert!(!reminder.is_due(now()));
        assert!(!reminder.is_expired(now()));
        assert!(!reminder.is_expired(DateTime::<Utc>::MIN_UTC));
    }

    #[test]
    fn notification_mentions_patient_and_hospital() {
        let reminder = reminder_factory(now() + Duration::hours(6));
        let notification = reminder.notification();
        assert_eq!(notification.title, NOTIFICATION_TITLE);
        assert_eq!(
            notification.body,
            "Surgery for Ana Pérez at Hospital Roosevelt in 5 hours"
        );
        assert_eq!(notification.tag, reminder.id);
    }

    #[test]
    fn persisted_format_uses_camel_case_and_iso_timestamps() {
        let mut reminder = reminder_factory(now() + Duration::hours(6));
        reminder.mark_sent();
        let json = serde_json::to_value(&reminder).unwrap();
        assert_eq!(json["caseId"], 42);
        assert_eq!(json["sent"], true);
        assert_eq!(json["surgeryDateTime"], "2021-02-21T14:00:00Z");
        assert_eq!(json["notifyAt"], "2021-02-21T09:00:00Z");

        let parsed: ScheduledReminder = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, reminder);
    }
}
