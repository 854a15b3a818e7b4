use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    // Braces of one placeholder split across runs: `{</w:t></w:r><w:r><w:t>{`
    static ref SPLIT_OPEN: Regex = Regex::new(r"\{(?:<[^>]*>)+\{").unwrap();
    static ref SPLIT_CLOSE: Regex = Regex::new(r"\}(?:<[^>]*>)+\}").unwrap();
    static ref PLACEHOLDER_SPAN: Regex = Regex::new(r"(?s)\{\{(.*?)\}\}").unwrap();
    static ref XML_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref PLACEHOLDER_NAME: Regex =
        Regex::new(r"^\s*[A-Za-z_][A-Za-z0-9_]*\s*$").unwrap();
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").unwrap();
}

/// PlaceholderEngine rewrites `{{ NAME }}` markers inside WordprocessingML.
pub struct PlaceholderEngine;

impl PlaceholderEngine {
    /// Make every placeholder contiguous text.
    ///
    /// Word splits typed text into runs wherever formatting, spell checking
    /// or revision marks change, so `{{ FULLNAME }}` often arrives as
    /// several `<w:t>` fragments. The markup between the braces is dropped;
    /// the closing and reopening tags it consists of balance each other.
    pub fn normalize(xml: &str) -> String {
        let joined = SPLIT_OPEN.replace_all(xml, "{{");
        let joined = SPLIT_CLOSE.replace_all(&joined, "}}");

        PLACEHOLDER_SPAN
            .replace_all(&joined, |caps: &Captures| {
                let inner = XML_TAG.replace_all(&caps[1], "");
                if PLACEHOLDER_NAME.is_match(&inner) {
                    format!("{{{{{}}}}}", inner)
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned()
    }

    /// Replace each placeholder with the XML fragment `resolve` returns for its name.
    pub fn substitute<F>(xml: &str, mut resolve: F) -> String
    where
        F: FnMut(&str) -> String,
    {
        PLACEHOLDER
            .replace_all(xml, |caps: &Captures| resolve(&caps[1]))
            .into_owned()
    }

    pub fn escape_xml(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len());
        for c in value.chars() {
            match c {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&apos;"),
                _ => escaped.push(c),
            }
        }
        escaped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_split_runs() {
        let xml = "<w:r><w:t>{{ FULL</w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>NAME }}</w:t></w:r>";
        assert_eq!(
            PlaceholderEngine::normalize(xml),
            "<w:r><w:t>{{ FULLNAME }}</w:t></w:r>"
        );
    }

    #[test]
    fn test_normalize_split_braces() {
        let xml = "<w:t>{</w:t></w:r><w:r><w:t>{CID}</w:t></w:r><w:r><w:t>}</w:t>";
        assert_eq!(PlaceholderEngine::normalize(xml), "<w:t>{{CID}}</w:t>");
    }

    #[test]
    fn test_normalize_leaves_other_braces() {
        let xml = "<w:t>{{ not a name }}</w:t><w:t>{ x }</w:t>";
        assert_eq!(PlaceholderEngine::normalize(xml), xml);
    }

    #[test]
    fn test_substitute() {
        let xml = "<w:t>{{ A }} and {{B}} and {{ MISSING }}</w:t>";
        let out = PlaceholderEngine::substitute(xml, |name| match name {
            "A" => "1".to_string(),
            "B" => "2".to_string(),
            _ => String::new(),
        });
        assert_eq!(out, "<w:t>1 and 2 and </w:t>");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            PlaceholderEngine::escape_xml("a<b & \"c\" 'd'>"),
            "a&lt;b &amp; &quot;c&quot; &apos;d&apos;&gt;"
        );
        assert_eq!(PlaceholderEngine::escape_xml("นาย ก"), "นาย ก");
    }
}
