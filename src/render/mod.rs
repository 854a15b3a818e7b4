pub mod convert;
pub mod docx;
pub mod placeholder;

pub use convert::PdfConverter;
pub use docx::DocxTemplate;
pub use placeholder::PlaceholderEngine;
