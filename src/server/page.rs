use crate::models::{ReportOutput, TeamRoster};
use crate::utils::filename::percent_encode;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="th">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>บันทึกจับกุม</title>
<style>
  body { font-family: sans-serif; max-width: 40rem; margin: 2rem auto; padding: 0 1rem; }
  label { display: block; margin-top: 1rem; font-weight: bold; }
  input, select { width: 100%; padding: 0.4rem; }
  button { margin-top: 1.5rem; padding: 0.6rem 1.2rem; }
  .result { margin-top: 2rem; padding: 1rem; border: 1px solid #8c8; background: #efe; }
</style>
</head>
<body>
<h1>สร้างบันทึกจับกุมจากทะเบียนราษฎร</h1>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// The upload form, followed by download links when a report was just generated.
pub fn render_index(roster: &TeamRoster, result: Option<&ReportOutput>) -> String {
    let mut html = String::from(PAGE_HEAD);

    if let Some(output) = result {
        html.push_str("<div class=\"result\">\n<p>สร้างเอกสารเรียบร้อย</p>\n<ul>\n");
        html.push_str(&download_link(&output.docx_filename, "ดาวน์โหลด Word"));
        if let Some(pdf) = &output.pdf_filename {
            html.push_str(&download_link(pdf, "ดาวน์โหลด PDF"));
        }
        html.push_str("</ul>\n</div>\n");
    }

    html.push_str("<form method=\"post\" enctype=\"multipart/form-data\">\n");
    html.push_str("<label for=\"doc_date\">วันที่</label>\n");
    html.push_str("<input type=\"date\" id=\"doc_date\" name=\"doc_date\">\n");
    html.push_str("<label for=\"time_start\">เวลาเริ่ม</label>\n");
    html.push_str("<input type=\"time\" id=\"time_start\" name=\"time_start\">\n");

    html.push_str("<label for=\"team_id\">ชุดเจ้าหน้าที่</label>\n");
    html.push_str("<select id=\"team_id\" name=\"team_id\">\n");
    html.push_str("<option value=\"\">-- เลือกชุด --</option>\n");
    for team in &roster.teams {
        html.push_str(&format!(
            "<option value=\"{}\">{} ({})</option>\n",
            escape_html(&team.id),
            escape_html(&team.name),
            escape_html(&team.leader)
        ));
    }
    html.push_str("</select>\n");

    html.push_str("<label for=\"pdf_register\">ไฟล์ทะเบียนราษฎร (PDF)</label>\n");
    html.push_str(
        "<input type=\"file\" id=\"pdf_register\" name=\"pdf_register\" accept=\"application/pdf,.pdf\">\n",
    );
    for i in 1..=4 {
        html.push_str(&format!(
            "<label for=\"photo{i}\">ภาพถ่าย {i}</label>\n\
             <input type=\"file\" id=\"photo{i}\" name=\"photo{i}\" accept=\"image/*\">\n"
        ));
    }

    html.push_str("<button type=\"submit\">สร้างเอกสาร</button>\n</form>\n");
    html.push_str(PAGE_TAIL);
    html
}

fn download_link(filename: &str, label: &str) -> String {
    format!(
        "<li><a href=\"/download/{}\">{}</a> {}</li>\n",
        percent_encode(filename),
        label,
        escape_html(filename)
    )
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
