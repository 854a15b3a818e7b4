use crate::models::{ReportForm, ReportRequest, TeamRoster};
use crate::utils::FormError;
use chrono::NaiveDate;

pub struct FormValidator;

impl FormValidator {
    /// Check a submission in a fixed order and stop at the first problem.
    pub fn validate(form: ReportForm, roster: &TeamRoster) -> Result<ReportRequest, FormError> {
        let doc_date = Self::non_empty(form.doc_date).ok_or(FormError::MissingDate)?;
        let time_start = Self::non_empty(form.time_start).ok_or(FormError::MissingStartTime)?;

        let team = Self::non_empty(form.team_id)
            .and_then(|team_id| roster.get(&team_id).cloned())
            .ok_or(FormError::UnknownTeam)?;

        let pdf = form
            .pdf_register
            .filter(|upload| upload.filename.to_lowercase().ends_with(".pdf"))
            .ok_or(FormError::MissingRegisterPdf)?;

        let doc_date = NaiveDate::parse_from_str(&doc_date, "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate)?;

        let photos = form
            .photos
            .into_iter()
            .filter(|upload| !upload.filename.is_empty())
            .map(|upload| upload.bytes)
            .collect();

        Ok(ReportRequest {
            doc_date,
            time_start,
            team,
            pdf_bytes: pdf.bytes,
            photos,
        })
    }

    /// Only an absent or empty field counts as missing; blanks are passed on.
    fn non_empty(value: Option<String>) -> Option<String> {
        value.filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UploadedFile;

    fn valid_form() -> ReportForm {
        ReportForm {
            doc_date: Some("2025-03-07".to_string()),
            time_start: Some("09:30".to_string()),
            team_id: Some("1".to_string()),
            pdf_register: Some(UploadedFile {
                filename: "register.PDF".to_string(),
                bytes: b"%PDF-1.4".to_vec(),
            }),
            photos: vec![
                UploadedFile {
                    filename: "a.jpg".to_string(),
                    bytes: vec![1, 2, 3],
                },
                UploadedFile::default(),
            ],
        }
    }

    #[test]
    fn test_valid_form() {
        let roster = TeamRoster::new();
        let request = FormValidator::validate(valid_form(), &roster).unwrap();

        assert_eq!(request.doc_date, NaiveDate::from_ymd_opt(2025, 3, 7).unwrap());
        assert_eq!(request.time_start, "09:30");
        assert_eq!(request.team.id, "1");
        assert_eq!(request.pdf_bytes, b"%PDF-1.4".to_vec());
        // Photo inputs left empty are dropped.
        assert_eq!(request.photos, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn test_missing_fields_in_order() {
        let roster = TeamRoster::new();

        let err = FormValidator::validate(ReportForm::default(), &roster).unwrap_err();
        assert_eq!(err, FormError::MissingDate);

        let mut form = valid_form();
        form.time_start = Some(String::new());
        form.team_id = None;
        assert_eq!(
            FormValidator::validate(form, &roster).unwrap_err(),
            FormError::MissingStartTime
        );

        let mut form = valid_form();
        form.team_id = Some("9".to_string());
        assert_eq!(
            FormValidator::validate(form, &roster).unwrap_err(),
            FormError::UnknownTeam
        );
    }

    #[test]
    fn test_register_must_be_pdf() {
        let roster = TeamRoster::new();

        let mut form = valid_form();
        form.pdf_register = None;
        assert_eq!(
            FormValidator::validate(form, &roster).unwrap_err(),
            FormError::MissingRegisterPdf
        );

        let mut form = valid_form();
        form.pdf_register = Some(UploadedFile {
            filename: "register.docx".to_string(),
            bytes: Vec::new(),
        });
        assert_eq!(
            FormValidator::validate(form, &roster).unwrap_err(),
            FormError::MissingRegisterPdf
        );
    }

    #[test]
    fn test_date_checked_after_uploads() {
        let roster = TeamRoster::new();

        let mut form = valid_form();
        form.doc_date = Some("07/03/2025".to_string());
        assert_eq!(
            FormValidator::validate(form, &roster).unwrap_err(),
            FormError::InvalidDate
        );

        let mut form = valid_form();
        form.doc_date = Some("07/03/2025".to_string());
        form.pdf_register = None;
        assert_eq!(
            FormValidator::validate(form, &roster).unwrap_err(),
            FormError::MissingRegisterPdf
        );
    }

    #[test]
    fn test_error_messages_are_thai() {
        assert_eq!(FormError::MissingDate.to_string(), "กรุณาเลือกวันที่");
        assert_eq!(FormError::InvalidDate.to_string(), "รูปแบบวันที่ไม่ถูกต้อง");
    }

    #[test]
    fn test_blank_fields_are_not_missing() {
        let roster = TeamRoster::new();

        let mut form = valid_form();
        form.time_start = Some("  ".to_string());
        let request = FormValidator::validate(form, &roster).unwrap();
        assert_eq!(request.time_start, "  ");

        let mut form = valid_form();
        form.doc_date = Some("  ".to_string());
        assert_eq!(
            FormValidator::validate(form, &roster).unwrap_err(),
            FormError::InvalidDate
        );
    }
}
