use crate::models::*;
use crate::processing::*;
use crate::render::{DocxTemplate, PdfConverter};
use crate::utils::{OutputNames, TabienError};
use crate::validation::ScheduleCalculator;
use std::path::{Path, PathBuf};

pub struct ReportGenerator {
    template_path: PathBuf,
    output_dir: PathBuf,
    converter: Option<PdfConverter>,
}

impl ReportGenerator {
    pub fn new(template_path: PathBuf, output_dir: PathBuf, converter: Option<PdfConverter>) -> Self {
        ReportGenerator {
            template_path,
            output_dir,
            converter,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    // Main entry point that runs one submission end to end
    pub fn generate(&self, request: &ReportRequest) -> Result<ReportOutput, TabienError> {
        // Step 1: Pull the person's fields out of the registration PDF
        let person = Self::extract_person(&request.pdf_bytes);

        // Step 2: Render and save the report
        self.render_report(request, &person)
    }

    /// Best-effort extraction: an unreadable PDF yields an empty record.
    pub fn extract_person(pdf_bytes: &[u8]) -> PersonRecord {
        let text = match PdfTextExtractor::extract_text(pdf_bytes) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Continuing without register fields: {}", e);
                String::new()
            }
        };
        RegisterExtractor::extract(&text)
    }

    pub fn render_report(
        &self,
        request: &ReportRequest,
        person: &PersonRecord,
    ) -> Result<ReportOutput, TabienError> {
        // Step 1: Derive times and compose the photo collage
        let schedule = ScheduleCalculator::from_start(&request.time_start);
        let photo_grid = PhotoGridBuilder::build(&request.photos)?;

        // Step 2: Fill the template
        let context = Self::build_context(request, person, &schedule, photo_grid);
        let mut template = DocxTemplate::open(&self.template_path)?;
        template.render(&context)?;

        // Step 3: Save the editable document
        let names = OutputNames::for_full_name(&person.full_name);
        let docx_path = self.output_dir.join(&names.docx);
        template.save(&docx_path)?;
        log::info!("Saved report {}", docx_path.display());

        // Step 4: Derive the fixed-layout rendition when a converter is configured
        let pdf_filename = self.convert(&docx_path, &names);

        Ok(ReportOutput {
            docx_filename: names.docx,
            pdf_filename,
        })
    }

    fn convert(&self, docx_path: &Path, names: &OutputNames) -> Option<String> {
        let converter = self.converter.as_ref()?;
        match converter.convert(docx_path) {
            Ok(pdf_path) => {
                log::info!("Saved fixed-layout copy {}", pdf_path.display());
                Some(names.pdf.clone())
            }
            Err(e) => {
                log::warn!("PDF conversion skipped: {}", e);
                None
            }
        }
    }

    /// Placeholder values for the template.
    pub fn build_context(
        request: &ReportRequest,
        person: &PersonRecord,
        schedule: &Schedule,
        photo_grid: Option<PhotoGrid>,
    ) -> ReportContext {
        let thai = ThaiFormatter::to_thai_digits;
        let team = &request.team;
        let gender = person.gender.thai_label();

        let mut context = ReportContext::default();
        context.insert("DOC_DATE", ThaiFormatter::format_date(request.doc_date));
        context.insert("TIME_START", thai(&schedule.start));
        context.insert("TIME_END", thai(&schedule.end));

        context.insert("FULLNAME", thai(&person.full_name));
        context.insert("CID", thai(&person.citizen_id));
        context.insert("DOB", thai(&person.date_of_birth));
        context.insert("AGE", thai(&person.age));
        context.insert("HOUSE_NO", thai(&person.house_no));
        context.insert("MOO", thai(&person.moo));
        context.insert("TAMBON", person.tambon.as_str());
        context.insert("AMPHUR", person.amphur.as_str());
        context.insert("PROVINCE", person.province.as_str());
        context.insert("MOVEIN_DATE", thai(&person.move_in_date));
        context.insert("ADDRESS_FULL", thai(&person.address_full));
        context.insert("GENDER", gender);
        context.insert("SEX", gender);

        context.insert("TEAM_NAME", team.name.as_str());
        context.insert("TEAM_LEADER", team.leader.as_str());
        context.insert("TEAM_LEADER_PHONE", thai(&team.leader_phone));
        context.insert("TEAM_MEMBER1", team.member(0));
        context.insert("TEAM_MEMBER2", team.member(1));
        context.insert("TEAM_MEMBER3", team.member(2));
        context.insert("TEAM_MEMBERS", team.members_joined());

        context.photo_grid = photo_grid;
        context
    }
}
