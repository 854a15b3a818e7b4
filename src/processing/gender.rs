use crate::models::Gender;

const MALE_PREFIXES: &[&str] = &["นาย", "ด.ช.", "เด็กชาย"];
const FEMALE_PREFIXES: &[&str] = &["นาง", "นางสาว", "ด.ญ.", "เด็กหญิง", "น.ส."];

// Rank abbreviations are usually glued to the given name, so these match by prefix.
const POLICE_RANK_PREFIXES: &[&str] = &[
    "ร.ต.อ.", "ร.ต.ท.", "ร.ต.ต.", "ด.ต.", "ส.ต.อ.", "ส.ต.ท.", "ส.ต.ต.", "พ.ต.อ.", "พ.ต.ท.",
    "พ.ต.ต.", "พ.ต.", "พล.ต.ต.", "พล.ต.อ.", "จ.ส.ต.",
];

pub struct GenderGuesser;

impl GenderGuesser {
    /// Guess gender from the title that opens a Thai full name.
    pub fn guess(full_name: &str) -> Gender {
        let prefix = match full_name.split_whitespace().next() {
            Some(prefix) => prefix,
            None => return Gender::Unknown,
        };

        if MALE_PREFIXES.contains(&prefix) {
            return Gender::Male;
        }
        if FEMALE_PREFIXES.contains(&prefix) {
            return Gender::Female;
        }
        if POLICE_RANK_PREFIXES.iter().any(|rank| prefix.starts_with(rank)) {
            return Gender::Male;
        }

        Gender::Unknown
    }
}
