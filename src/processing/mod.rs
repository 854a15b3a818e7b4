pub mod extractors;
pub mod gender;
pub mod pdf;
pub mod photo_grid;
pub mod thai;

pub use extractors::RegisterExtractor;
pub use gender::GenderGuesser;
pub use pdf::PdfTextExtractor;
pub use photo_grid::PhotoGridBuilder;
pub use thai::ThaiFormatter;
