//! Wall clock implementation of the `Clock` port.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

use docket_core::ports::Clock;

/// Reads the current date in a fixed IANA time zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Parse an IANA zone name such as `Asia/Kolkata`.
    /// Unknown names fall back to UTC with a warning.
    pub fn from_name(name: &str) -> Self {
        match name.parse::<Tz>() {
            Ok(tz) => Self::new(tz),
            Err(_) => {
                tracing::warn!(timezone = name, "Unknown time zone, using UTC");
                Self::new(Tz::UTC)
            }
        }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }
}
