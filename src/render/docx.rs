use crate::models::{PhotoGrid, ReportContext};
use crate::render::PlaceholderEngine;
use crate::utils::TabienError;
use lazy_static::lazy_static;
use regex::Regex;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const DOCUMENT_PART: &str = "word/document.xml";
const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";
const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
const PHOTO_GRID_PART: &str = "word/media/photo_grid.jpeg";
const PHOTO_GRID_REL_ID: &str = "rIdTabienPhotoGrid";
const PHOTO_GRID_DOC_PR_ID: u32 = 9001;
const EMU_PER_MM: f64 = 36_000.0;

lazy_static! {
    static ref TEMPLATED_PART: Regex =
        Regex::new(r"^word/(document|header[0-9]*|footer[0-9]*)\.xml$").unwrap();
    static ref JPEG_CONTENT_TYPE: Regex = Regex::new(r#"(?i)Extension="jpe?g""#).unwrap();
}

#[derive(Debug, Clone)]
struct DocxPart {
    name: String,
    data: Vec<u8>,
}

/// An unpacked DOCX package whose XML parts carry `{{ NAME }}` placeholders.
#[derive(Debug, Clone)]
pub struct DocxTemplate {
    parts: Vec<DocxPart>,
}

impl DocxTemplate {
    pub fn open(path: &Path) -> Result<Self, TabienError> {
        let bytes = std::fs::read(path).map_err(|e| {
            TabienError::TemplateError(format!("Failed to read template {}: {}", path.display(), e))
        })?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TabienError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| TabienError::TemplateError(format!("Template is not a DOCX package: {}", e)))?;

        let mut parts = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut file = archive
                .by_index(index)
                .map_err(|e| TabienError::TemplateError(format!("Corrupt template entry: {}", e)))?;
            if file.is_dir() {
                continue;
            }
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;
            parts.push(DocxPart {
                name: file.name().to_string(),
                data,
            });
        }

        if !parts.iter().any(|part| part.name == DOCUMENT_PART) {
            return Err(TabienError::TemplateError(format!(
                "Template has no {}",
                DOCUMENT_PART
            )));
        }

        Ok(DocxTemplate { parts })
    }

    /// Substitute the context into the document body, headers and footers.
    pub fn render(&mut self, context: &ReportContext) -> Result<(), TabienError> {
        let mut photo_grid_used = false;
        // Every drawing in the document needs its own docPr id.
        let mut next_doc_pr_id = PHOTO_GRID_DOC_PR_ID;

        for part in self.parts.iter_mut() {
            if !TEMPLATED_PART.is_match(&part.name) {
                continue;
            }
            let xml = std::str::from_utf8(&part.data).map_err(|e| {
                TabienError::TemplateError(format!("{} is not UTF-8: {}", part.name, e))
            })?;
            let is_document = part.name == DOCUMENT_PART;

            let normalized = PlaceholderEngine::normalize(xml);
            let rendered = PlaceholderEngine::substitute(&normalized, |name| {
                if name == ReportContext::PHOTO_GRID_KEY {
                    return match (&context.photo_grid, is_document) {
                        (Some(grid), true) => {
                            photo_grid_used = true;
                            let drawing = Self::inline_drawing(grid, next_doc_pr_id);
                            next_doc_pr_id += 1;
                            drawing
                        }
                        _ => String::new(),
                    };
                }
                context
                    .get(name)
                    .map(PlaceholderEngine::escape_xml)
                    .unwrap_or_default()
            });
            part.data = rendered.into_bytes();
        }

        if let (true, Some(grid)) = (photo_grid_used, &context.photo_grid) {
            self.embed_photo_grid(grid)?;
        }

        Ok(())
    }

    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|part| part.name == name)
            .map(|part| part.data.as_slice())
    }

    fn set_part(&mut self, name: &str, data: Vec<u8>) {
        match self.parts.iter_mut().find(|part| part.name == name) {
            Some(part) => part.data = data,
            None => self.parts.push(DocxPart {
                name: name.to_string(),
                data,
            }),
        }
    }

    fn part_text(&self, name: &str) -> Result<String, TabienError> {
        let data = self
            .part(name)
            .ok_or_else(|| TabienError::TemplateError(format!("Template has no {}", name)))?;
        String::from_utf8(data.to_vec())
            .map_err(|e| TabienError::TemplateError(format!("{} is not UTF-8: {}", name, e)))
    }

    fn embed_photo_grid(&mut self, grid: &PhotoGrid) -> Result<(), TabienError> {
        self.set_part(PHOTO_GRID_PART, grid.jpeg.clone());

        let rels = self.part_text(DOCUMENT_RELS_PART)?;
        if !rels.contains(PHOTO_GRID_REL_ID) {
            let relationship = format!(
                r#"<Relationship Id="{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/photo_grid.jpeg"/>"#,
                PHOTO_GRID_REL_ID
            );
            let rels = Self::insert_before(&rels, "</Relationships>", &relationship)?;
            self.set_part(DOCUMENT_RELS_PART, rels.into_bytes());
        }

        let content_types = self.part_text(CONTENT_TYPES_PART)?;
        if !JPEG_CONTENT_TYPE.is_match(&content_types) {
            let jpeg_default = r#"<Default Extension="jpeg" ContentType="image/jpeg"/>"#;
            let content_types = Self::insert_before(&content_types, "</Types>", jpeg_default)?;
            self.set_part(CONTENT_TYPES_PART, content_types.into_bytes());
        }

        Ok(())
    }

    fn insert_before(xml: &str, closing_tag: &str, fragment: &str) -> Result<String, TabienError> {
        let index = xml.rfind(closing_tag).ok_or_else(|| {
            TabienError::TemplateError(format!("Missing {} in template", closing_tag))
        })?;
        let mut out = String::with_capacity(xml.len() + fragment.len());
        out.push_str(&xml[..index]);
        out.push_str(fragment);
        out.push_str(&xml[index..]);
        Ok(out)
    }

    /// Drawing markup that closes the surrounding text run, places the
    /// image in its own run and reopens a text run.
    fn inline_drawing(grid: &PhotoGrid, doc_pr_id: u32) -> String {
        let cx = (grid.width_mm as f64 * EMU_PER_MM).round() as u64;
        let cy = (grid.height_mm() * EMU_PER_MM).round() as u64;

        format!(
            concat!(
                r#"</w:t></w:r><w:r><w:drawing>"#,
                r#"<wp:inline distT="0" distB="0" distL="0" distR="0">"#,
                r#"<wp:extent cx="{cx}" cy="{cy}"/>"#,
                r#"<wp:docPr id="{doc_pr_id}" name="PhotoGrid"/>"#,
                r#"<a:graphic xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">"#,
                r#"<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
                r#"<pic:pic xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
                r#"<pic:nvPicPr><pic:cNvPr id="0" name="photo_grid.jpeg"/><pic:cNvPicPr/></pic:nvPicPr>"#,
                r#"<pic:blipFill><a:blip r:embed="{rel_id}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
                r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
                r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr>"#,
                r#"</pic:pic></a:graphicData></a:graphic></wp:inline>"#,
                r#"</w:drawing></w:r><w:r><w:t xml:space="preserve">"#,
            ),
            cx = cx,
            cy = cy,
            doc_pr_id = doc_pr_id,
            rel_id = PHOTO_GRID_REL_ID,
        )
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, TabienError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for part in &self.parts {
            let options =
                SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
            writer
                .start_file(part.name.as_str(), options)
                .map_err(|e| TabienError::TemplateError(format!("Failed to write {}: {}", part.name, e)))?;
            writer.write_all(&part.data)?;
        }

        let cursor = writer
            .finish()
            .map_err(|e| TabienError::TemplateError(format!("Failed to finish DOCX: {}", e)))?;
        Ok(cursor.into_inner())
    }

    pub fn save(&self, path: &Path) -> Result<(), TabienError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes).map_err(|e| {
            TabienError::IoError(format!("Failed to write {}: {}", path.display(), e))
        })
    }
}
