use crate::utils::TabienError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Converts a saved DOCX to PDF with a headless office suite.
#[derive(Debug, Clone)]
pub struct PdfConverter {
    program: String,
}

impl PdfConverter {
    pub fn new(program: impl Into<String>) -> Self {
        PdfConverter {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Convert `docx_path` into a PDF with the same stem in the same directory.
    pub fn convert(&self, docx_path: &Path) -> Result<PathBuf, TabienError> {
        let out_dir = docx_path.parent().ok_or_else(|| {
            TabienError::ConversionError(format!("{} has no parent directory", docx_path.display()))
        })?;
        let stem = docx_path.file_stem().ok_or_else(|| {
            TabienError::ConversionError(format!("{} has no file name", docx_path.display()))
        })?;
        // Names like "น.ส._..." contain dots, so the stem is joined rather than re-extended.
        let pdf_path = out_dir.join(format!("{}.pdf", stem.to_string_lossy()));

        // A private profile lets conversions run while another instance holds the default one.
        let profile_dir = tempfile::tempdir()
            .map_err(|e| TabienError::ConversionError(format!("Failed to create profile dir: {}", e)))?;
        let profile_url = format!("file://{}", profile_dir.path().display());

        log::debug!("Converting {} with {}", docx_path.display(), self.program);

        let output = Command::new(&self.program)
            .arg("--headless")
            .arg(format!("-env:UserInstallation={}", profile_url))
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(out_dir)
            .arg(docx_path)
            .output()
            .map_err(|e| {
                TabienError::ConversionError(format!("Failed to run {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            return Err(TabienError::ConversionError(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        if !pdf_path.is_file() {
            return Err(TabienError::ConversionError(format!(
                "{} produced no {}",
                self.program,
                pdf_path.display()
            )));
        }

        Ok(pdf_path)
    }
}

impl Default for PdfConverter {
    fn default() -> Self {
        PdfConverter::new("soffice")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let docx = dir.path().join("report.docx");
        std::fs::write(&docx, b"docx").unwrap();

        let converter = PdfConverter::new("/nonexistent/soffice");
        assert!(matches!(
            converter.convert(&docx),
            Err(TabienError::ConversionError(_))
        ));
    }

    #[cfg(unix)]
    fn fake_converter(dir: &Path, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-soffice");
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn test_converts_next_to_docx() {
        let bin_dir = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        let script = r#"#!/bin/sh
while [ $# -gt 0 ]; do
  case "$1" in
    --outdir) shift; out="$1" ;;
  esac
  last="$1"
  shift
done
name=$(basename "$last" .docx)
printf 'pdf' > "$out/$name.pdf"
"#;
        let program = fake_converter(bin_dir.path(), script);

        let docx = out_dir.path().join("บันทึกจับกุม_น.ส._ก.docx");
        std::fs::write(&docx, b"docx").unwrap();

        let converter = PdfConverter::new(program.to_string_lossy());
        let pdf = converter.convert(&docx).unwrap();
        assert_eq!(pdf, out_dir.path().join("บันทึกจับกุม_น.ส._ก.pdf"));
        assert_eq!(std::fs::read(&pdf).unwrap(), b"pdf");
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_conversion() {
        let bin_dir = tempfile::tempdir().unwrap();
        let program = fake_converter(bin_dir.path(), "#!/bin/sh\necho broken >&2\nexit 1\n");

        let docx = bin_dir.path().join("report.docx");
        std::fs::write(&docx, b"docx").unwrap();

        let converter = PdfConverter::new(program.to_string_lossy());
        let err = converter.convert(&docx).unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[cfg(unix)]
    #[test]
    fn test_no_output_file() {
        let bin_dir = tempfile::tempdir().unwrap();
        let program = fake_converter(bin_dir.path(), "#!/bin/sh\nexit 0\n");

        let docx = bin_dir.path().join("report.docx");
        std::fs::write(&docx, b"docx").unwrap();

        let converter = PdfConverter::new(program.to_string_lossy());
        assert!(matches!(
            converter.convert(&docx),
            Err(TabienError::ConversionError(_))
        ));
    }
}
