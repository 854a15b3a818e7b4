use chrono::{Datelike, NaiveDate};

const THAI_MONTHS: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

const THAI_DIGITS: [char; 10] = ['๐', '๑', '๒', '๓', '๔', '๕', '๖', '๗', '๘', '๙'];

/// Offset from the Gregorian year to the Buddhist Era year.
const BUDDHIST_ERA_OFFSET: i32 = 543;

pub struct ThaiFormatter;

impl ThaiFormatter {
    /// Replace ASCII digits with Thai digits, leaving everything else as is.
    pub fn to_thai_digits(value: &str) -> String {
        value
            .chars()
            .map(|c| match c {
                '0'..='9' => THAI_DIGITS[(c as u8 - b'0') as usize],
                _ => c,
            })
            .collect()
    }

    /// Format a date as "day month พ.ศ. year" in Thai digits and the Buddhist calendar.
    pub fn format_date(date: NaiveDate) -> String {
        let month = THAI_MONTHS[date.month0() as usize];
        let text = format!(
            "{} {} พ.ศ. {}",
            date.day(),
            month,
            date.year() + BUDDHIST_ERA_OFFSET
        );
        Self::to_thai_digits(&text)
    }

    pub fn is_digit(c: char) -> bool {
        c.is_ascii_digit() || ('๐'..='๙').contains(&c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_thai_digits() {
        assert_eq!(ThaiFormatter::to_thai_digits("062-108-4116"), "๐๖๒-๑๐๘-๔๑๑๖");
        assert_eq!(ThaiFormatter::to_thai_digits("บ้าน 9/1"), "บ้าน ๙/๑");
        assert_eq!(ThaiFormatter::to_thai_digits(""), "");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(ThaiFormatter::format_date(date), "๗ มีนาคม พ.ศ. ๒๕๖๘");

        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(ThaiFormatter::format_date(date), "๓๑ ธันวาคม พ.ศ. ๒๕๖๗");
    }

    #[test]
    fn test_is_digit() {
        assert!(ThaiFormatter::is_digit('7'));
        assert!(ThaiFormatter::is_digit('๗'));
        assert!(!ThaiFormatter::is_digit('ก'));
    }
}
