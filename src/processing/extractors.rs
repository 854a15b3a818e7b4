// Label-anchored field extraction for household-registration text
use crate::models::PersonRecord;
use crate::processing::{GenderGuesser, ThaiFormatter};

const CITIZEN_ID_LABEL: &str = "เลขประจำตัวประชาชน";
const FULL_NAME_LABEL: &str = "ชื่อ-ชื่อสกุล";
const DATE_OF_BIRTH_LABEL: &str = "วันเดือนปีเกิด";
const AGE_LABEL: &str = "อายุ";
const SEX_LABEL: &str = "เพศ";
const HOUSE_NO_LABEL: &str = "บ้านเลขที่";
const MOO_LABEL: &str = "หมู่";
const MOO_NUMBER_LABEL: &str = "หมู่ที่";
const TAMBON_LABEL: &str = "ตำบล";
const AMPHUR_LABEL: &str = "อำเภอ";
const PROVINCE_LABEL: &str = "จังหวัด";
const MOVE_IN_LABEL: &str = "วันที่ย้ายเข้า";

/// Longer variants first so `หมู่ที่ 4` is not read as `หมู่` + `ที่`.
const MOO_LABELS: [&str; 2] = [MOO_NUMBER_LABEL, MOO_LABEL];

/// Labels that may follow the name on the same line, applied in order.
const FULL_NAME_CUTS: [&str; 3] = [SEX_LABEL, DATE_OF_BIRTH_LABEL, AGE_LABEL];

/// RegisterExtractor scans the text layer of a registration document line by
/// line and slices out the values that sit next to known Thai labels.
pub struct RegisterExtractor;

impl RegisterExtractor {
    pub fn extract(text: &str) -> PersonRecord {
        let lines = Self::clean_lines(text);

        let mut record = PersonRecord {
            citizen_id: Self::extract_citizen_id(&lines),
            full_name: Self::extract_full_name(&lines),
            ..PersonRecord::default()
        };

        let (date_of_birth, age) = Self::extract_birth(&lines);
        record.date_of_birth = date_of_birth;
        record.age = age;

        let (house_no, moo) = Self::extract_house(&lines);
        record.house_no = house_no;
        record.moo = moo;

        record.tambon = Self::extract_first_labelled(&lines, TAMBON_LABEL);
        record.amphur = Self::extract_first_labelled(&lines, AMPHUR_LABEL);
        record.province = Self::extract_first_labelled(&lines, PROVINCE_LABEL);
        record.move_in_date = Self::extract_move_in_date(&lines);

        record.address_full = Self::compose_address(&record);
        record.gender = GenderGuesser::guess(&record.full_name);

        log::debug!(
            "Extracted register fields: cid={:?} name={:?} address={:?}",
            record.citizen_id,
            record.full_name,
            record.address_full
        );

        record
    }

    fn clean_lines(text: &str) -> Vec<&str> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// First token with a digit in it, on the last line that carries one.
    fn extract_citizen_id(lines: &[&str]) -> String {
        let mut citizen_id = String::new();
        for line in lines.iter().filter(|line| line.contains(CITIZEN_ID_LABEL)) {
            let stripped = line.replace(CITIZEN_ID_LABEL, " ");
            if let Some(token) = stripped
                .split_whitespace()
                .find(|token| token.chars().any(ThaiFormatter::is_digit))
            {
                citizen_id = token.to_string();
            }
        }
        citizen_id
    }

    fn extract_full_name(lines: &[&str]) -> String {
        let mut full_name = String::new();
        for line in lines {
            let Some(after) = Self::text_after(line, FULL_NAME_LABEL) else {
                continue;
            };
            let mut name = after;
            for cut in FULL_NAME_CUTS {
                if let Some((before, _)) = name.split_once(cut) {
                    name = before.trim();
                }
            }
            full_name = name.to_string();
        }
        full_name
    }

    /// Date of birth and age, taken only from lines that carry both labels.
    fn extract_birth(lines: &[&str]) -> (String, String) {
        let mut date_of_birth = String::new();
        let mut age = String::new();
        for line in lines {
            let Some(after) = Self::text_after(line, DATE_OF_BIRTH_LABEL) else {
                continue;
            };
            if let Some((dob, age_part)) = after.split_once(AGE_LABEL) {
                date_of_birth = dob.trim().to_string();
                age = age_part
                    .chars()
                    .filter(|c| ThaiFormatter::is_digit(*c))
                    .collect();
            }
        }
        (date_of_birth, age)
    }

    fn extract_house(lines: &[&str]) -> (String, String) {
        let mut house_no = String::new();
        let mut moo = String::new();
        for line in lines.iter().filter(|line| line.contains(HOUSE_NO_LABEL)) {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if let Some(value) = Self::value_after_label(&tokens, &[HOUSE_NO_LABEL], true) {
                house_no = value;
            }
            if line.contains(MOO_LABEL) {
                if let Some(value) = Self::value_after_label(&tokens, &MOO_LABELS, true) {
                    moo = value;
                }
            }
        }
        (house_no, moo)
    }

    /// Value from the first line that yields one for `label`.
    fn extract_first_labelled(lines: &[&str], label: &str) -> String {
        lines
            .iter()
            .filter(|line| line.contains(label))
            .find_map(|line| {
                let tokens: Vec<&str> = line.split_whitespace().collect();
                Self::value_after_label(&tokens, &[label], false)
            })
            .unwrap_or_default()
    }

    fn extract_move_in_date(lines: &[&str]) -> String {
        lines
            .iter()
            .filter_map(|line| Self::text_after(line, MOVE_IN_LABEL))
            .last()
            .map(str::to_string)
            .unwrap_or_default()
    }

    fn text_after<'a>(line: &'a str, label: &str) -> Option<&'a str> {
        line.split_once(label).map(|(_, after)| after.trim())
    }

    /// The value attached to a token that opens with one of `labels`.
    ///
    /// A bare label takes the next token; a label glued to its value
    /// (`บ้านเลขที่99/1`) takes the remainder. With `numeric`, a glued
    /// remainder without a digit is not a value and the next token is used.
    /// The last match on the line wins.
    fn value_after_label(tokens: &[&str], labels: &[&str], numeric: bool) -> Option<String> {
        let mut value = None;
        for (i, token) in tokens.iter().enumerate() {
            let Some(rest) = labels.iter().find_map(|label| token.strip_prefix(*label)) else {
                continue;
            };
            let glued = !rest.is_empty() && (!numeric || rest.chars().any(ThaiFormatter::is_digit));
            if glued {
                value = Some(rest.to_string());
            } else if let Some(next) = tokens.get(i + 1) {
                value = Some(next.to_string());
            }
        }
        value.filter(|v| !v.is_empty())
    }

    pub fn compose_address(record: &PersonRecord) -> String {
        let mut parts = Vec::new();
        if !record.house_no.is_empty() {
            parts.push(record.house_no.clone());
        }
        if !record.moo.is_empty() {
            parts.push(format!("{} {}", MOO_LABEL, record.moo));
        }
        if !record.tambon.is_empty() {
            parts.push(format!("{} {}", TAMBON_LABEL, record.tambon));
        }
        if !record.amphur.is_empty() {
            parts.push(format!("{} {}", AMPHUR_LABEL, record.amphur));
        }
        if !record.province.is_empty() {
            parts.push(format!("{} {}", PROVINCE_LABEL, record.province));
        }
        parts.join(" ")
    }
}
