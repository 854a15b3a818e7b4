pub mod form;
pub mod schedule;

pub use form::FormValidator;
pub use schedule::ScheduleCalculator;
