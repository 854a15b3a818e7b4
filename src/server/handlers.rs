use super::{page, AppState};
use crate::models::{ReportForm, UploadedFile};
use crate::utils::filename::{percent_encode, resolve_download};
use crate::validation::FormValidator;
use axum::body::Body;
use axum::extract::{Multipart, Path as AxumPath, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use std::sync::Arc;

const PHOTO_FIELDS: [&str; 4] = ["photo1", "photo2", "photo3", "photo4"];

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(page::render_index(&state.roster, None))
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn submit_report(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    let form = match read_form(&mut multipart).await {
        Ok(form) => form,
        Err(message) => {
            log::warn!("Malformed submission: {}", message);
            return (StatusCode::BAD_REQUEST, "Invalid form submission").into_response();
        }
    };

    let request = match FormValidator::validate(form, &state.roster) {
        Ok(request) => request,
        Err(e) => {
            log::info!("Rejected submission: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    log::info!("Generating report for {} on {}", request.team.name, request.doc_date);

    // Extraction, imaging and conversion are blocking work.
    let worker = state.clone();
    let result = tokio::task::spawn_blocking(move || worker.generator.generate(&request)).await;

    match result {
        Ok(Ok(output)) => Html(page::render_index(&state.roster, Some(&output))).into_response(),
        Ok(Err(e)) => {
            log::error!("Report generation failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Report generation failed").into_response()
        }
        Err(e) => {
            log::error!("Report worker panicked: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Report generation failed").into_response()
        }
    }
}

async fn read_form(multipart: &mut Multipart) -> Result<ReportForm, String> {
    let mut form = ReportForm::default();
    let mut photos: [Option<UploadedFile>; 4] = Default::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "doc_date" => form.doc_date = Some(field.text().await.map_err(|e| e.to_string())?),
            "time_start" => form.time_start = Some(field.text().await.map_err(|e| e.to_string())?),
            "team_id" => form.team_id = Some(field.text().await.map_err(|e| e.to_string())?),
            "pdf_register" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let bytes = field.bytes().await.map_err(|e| e.to_string())?;
                form.pdf_register = Some(UploadedFile {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            other => {
                if let Some(slot) = PHOTO_FIELDS.iter().position(|f| *f == other) {
                    let filename = field.file_name().unwrap_or("").to_string();
                    let bytes = field.bytes().await.map_err(|e| e.to_string())?;
                    photos[slot] = Some(UploadedFile {
                        filename,
                        bytes: bytes.to_vec(),
                    });
                }
            }
        }
    }

    form.photos = photos.into_iter().flatten().collect();
    Ok(form)
}

pub async fn download(
    State(state): State<Arc<AppState>>,
    AxumPath(filename): AxumPath<String>,
) -> Response {
    let Some(path) = resolve_download(&state.output_dir, &filename) else {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    };

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("Failed to read {}: {}", path.display(), e);
            return (StatusCode::NOT_FOUND, "Not found").into_response();
        }
    };

    let download_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or(filename);

    (
        [
            (header::CONTENT_TYPE, content_type_for(&download_name).to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename*=UTF-8''{}", percent_encode(&download_name)),
            ),
        ],
        Body::from(bytes),
    )
        .into_response()
}

fn content_type_for(filename: &str) -> &'static str {
    let lower = filename.to_lowercase();
    if lower.ends_with(".docx") {
        DOCX_CONTENT_TYPE
    } else if lower.ends_with(".pdf") {
        "application/pdf"
    } else {
        "application/octet-stream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("a.docx"), DOCX_CONTENT_TYPE);
        assert_eq!(content_type_for("a.PDF"), "application/pdf");
        assert_eq!(content_type_for("a.txt"), "application/octet-stream");
    }
}
