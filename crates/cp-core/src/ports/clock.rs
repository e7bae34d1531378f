use chrono::{DateTime, TimeZone, Utc};

pub trait ClockPort: Send + Sync {
    fn now_ms(&self) -> i64;

    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.now_ms())
            .single()
            .unwrap_or_else(Utc::now)
    }
}
