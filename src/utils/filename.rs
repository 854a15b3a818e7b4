use std::path::{Component, Path, PathBuf};

const UNKNOWN_NAME: &str = "ไม่ทราบชื่อ";
const REPORT_PREFIX: &str = "บันทึกจับกุม_";
const UNSAFE_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// File names for one generated report, derived from the person's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNames {
    pub docx: String,
    pub pdf: String,
}

impl OutputNames {
    pub fn for_full_name(full_name: &str) -> Self {
        let stem = format!("{}{}", REPORT_PREFIX, Self::safe_name(full_name));
        OutputNames {
            docx: format!("{}.docx", stem),
            pdf: format!("{}.pdf", stem),
        }
    }

    fn safe_name(full_name: &str) -> String {
        let trimmed = full_name.trim();
        let name = if trimmed.is_empty() { UNKNOWN_NAME } else { trimmed };

        name.chars()
            .map(|c| if UNSAFE_CHARS.contains(&c) || c == ' ' { '_' } else { c })
            .collect()
    }
}

/// Resolve a requested download name inside `dir`.
///
/// Only plain relative paths are accepted; anything that could climb out
/// of the output directory returns `None`.
pub fn resolve_download(dir: &Path, requested: &str) -> Option<PathBuf> {
    let requested = Path::new(requested);
    if requested.as_os_str().is_empty() {
        return None;
    }
    if !requested
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return None;
    }

    let path = dir.join(requested);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Percent-encode a file name for use in URLs and RFC 5987 header values.
pub fn percent_encode(name: &str) -> String {
    let mut out = String::with_capacity(name.len() * 3);
    for byte in name.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_from_full_name() {
        let names = OutputNames::for_full_name(" นาย สมชาย ใจดี ");
        assert_eq!(names.docx, "บันทึกจับกุม_นาย_สมชาย_ใจดี.docx");
        assert_eq!(names.pdf, "บันทึกจับกุม_นาย_สมชาย_ใจดี.pdf");
    }

    #[test]
    fn test_unsafe_characters_replaced() {
        let names = OutputNames::for_full_name("a/b\\c:d*e?f\"g<h>i|j");
        assert_eq!(names.docx, "บันทึกจับกุม_a_b_c_d_e_f_g_h_i_j.docx");
    }

    #[test]
    fn test_empty_name_uses_placeholder() {
        let names = OutputNames::for_full_name("   ");
        assert_eq!(names.docx, "บันทึกจับกุม_ไม่ทราบชื่อ.docx");
    }

    #[test]
    fn test_resolve_download_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("report.docx"), b"x").unwrap();

        assert!(resolve_download(dir.path(), "report.docx").is_some());
        assert!(resolve_download(dir.path(), "../report.docx").is_none());
        assert!(resolve_download(dir.path(), "/etc/passwd").is_none());
        assert!(resolve_download(dir.path(), "missing.docx").is_none());
        assert!(resolve_download(dir.path(), "").is_none());
    }

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("a b.docx"), "a%20b.docx");
        assert_eq!(percent_encode("ก"), "%E0%B8%81");
    }
}
