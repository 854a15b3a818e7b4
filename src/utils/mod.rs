pub mod error;
pub mod filename;

pub use error::{FormError, TabienError};
pub use filename::OutputNames;
