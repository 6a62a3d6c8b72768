use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current point in time
    fn now(&self) -> DateTime<Utc>;
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to. Used to simulate the passing of time
pub struct ManualSys {
    now: Mutex<DateTime<Utc>>,
}

impl ManualSys {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now = *now + duration;
    }
}

impl ISys for ManualSys {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn manual_sys_only_moves_when_told() {
        let start = Utc.with_ymd_and_hms(2021, 2, 21, 0, 0, 0).unwrap();
        let sys = ManualSys::new(start);
        assert_eq!(sys.now(), start);

        sys.advance(Duration::minutes(70));
        assert_eq!(sys.now(), start + Duration::minutes(70));

        sys.set(start);
        assert_eq!(sys.now(), start);
    }
}
