use crate::models::Schedule;
use chrono::{Duration, NaiveTime};

/// How long an operation is recorded as lasting.
const OPERATION_MINUTES: i64 = 75;

pub struct ScheduleCalculator;

impl ScheduleCalculator {
    /// Start and end times from an `HH:MM` input.
    ///
    /// An unparseable time is passed through with `:` swapped for `.` and
    /// no end time.
    pub fn from_start(time_start: &str) -> Schedule {
        match NaiveTime::parse_from_str(time_start.trim(), "%H:%M") {
            Ok(start) => {
                let (end, _) = start.overflowing_add_signed(Duration::minutes(OPERATION_MINUTES));
                Schedule {
                    start: start.format("%H.%M").to_string(),
                    end: end.format("%H.%M").to_string(),
                }
            }
            Err(e) => {
                log::warn!("Unparseable start time {:?}: {}", time_start, e);
                Schedule {
                    start: time_start.replace(':', "."),
                    end: String::new(),
                }
            }
        }
    }
}
