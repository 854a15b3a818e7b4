use crate::models::TeamRoster;
use crate::render::PdfConverter;
use crate::utils::TabienError;
use clap::Parser;
use std::path::PathBuf;

/// Runtime settings for the report server.
#[derive(Debug, Clone, Parser)]
#[command(name = "tabien", version, about = "Household-registration report server")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "TABIEN_BIND", default_value = "0.0.0.0")]
    pub bind: String,

    #[arg(short, long, env = "TABIEN_PORT", default_value_t = 5000)]
    pub port: u16,

    /// DOCX template with {{ NAME }} placeholders
    #[arg(long, env = "TABIEN_TEMPLATE", default_value = "word_templates/main_template.docx")]
    pub template: PathBuf,

    /// Directory generated reports are written to and served from
    #[arg(long, env = "TABIEN_OUTPUT_DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Office suite executable used for DOCX to PDF conversion
    #[arg(long, env = "TABIEN_CONVERTER", default_value = "soffice")]
    pub converter: String,

    /// Skip PDF conversion entirely
    #[arg(long)]
    pub no_pdf: bool,

    /// JSON file replacing the built-in team roster
    #[arg(long, env = "TABIEN_TEAMS")]
    pub teams: Option<PathBuf>,

    /// Maximum request body size in megabytes
    #[arg(long, env = "TABIEN_BODY_LIMIT_MB", default_value_t = 50)]
    pub body_limit_mb: usize,
}

impl Config {
    pub fn load_roster(&self) -> Result<TeamRoster, TabienError> {
        match &self.teams {
            Some(path) => TeamRoster::from_json_file(path),
            None => Ok(TeamRoster::new()),
        }
    }

    pub fn pdf_converter(&self) -> Option<PdfConverter> {
        if self.no_pdf {
            None
        } else {
            Some(PdfConverter::new(self.converter.clone()))
        }
    }

    pub fn body_limit_bytes(&self) -> usize {
        self.body_limit_mb.saturating_mul(1024 * 1024)
    }
}
