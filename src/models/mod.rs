pub mod data;
pub mod teams;

pub use data::*;
pub use teams::{Team, TeamRoster};
