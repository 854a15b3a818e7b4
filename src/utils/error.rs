use thiserror::Error;

#[derive(Debug, Error)]
pub enum TabienError {
    #[error("PDF extraction error: {0}")]
    PdfExtractionError(String),
    #[error("Image processing error: {0}")]
    ImageProcessingError(String),
    #[error("Template error: {0}")]
    TemplateError(String),
    #[error("Conversion error: {0}")]
    ConversionError(String),
    #[error("Roster error: {0}")]
    RosterError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Server error: {0}")]
    ServerError(String),
}

impl From<std::io::Error> for TabienError {
    fn from(e: std::io::Error) -> Self {
        TabienError::IoError(e.to_string())
    }
}

/// A rejected form submission. The message is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("กรุณาเลือกวันที่")]
    MissingDate,
    #[error("กรุณากรอกเวลาเริ่ม")]
    MissingStartTime,
    #[error("กรุณาเลือกชุดเจ้าหน้าที่")]
    UnknownTeam,
    #[error("กรุณาอัปโหลดไฟล์ทะเบียนราษฎร (PDF)")]
    MissingRegisterPdf,
    #[error("รูปแบบวันที่ไม่ถูกต้อง")]
    InvalidDate,
}
