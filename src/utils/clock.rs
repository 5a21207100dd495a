use chrono::{DateTime, Utc};

/// Represents an entity responsible for providing dates across application. This allows cache
/// expiry to be driven by a controlled clock during testing.
pub trait Clock: Sync + Send + 'static {
    fn time(&self) -> DateTime<Utc>;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
