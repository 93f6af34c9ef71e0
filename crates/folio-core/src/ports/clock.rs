use chrono::{DateTime, Utc};

/// Clock trait - source of the current time for timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
