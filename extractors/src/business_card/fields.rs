use regex::Regex;
use shared_types::{CompanyAlias, ExtractionError};

const EMAIL_PATTERN: &str = r"[\w.-]+@[\w.-]+\.\w+";
const PHONE_PATTERN: &str = r"(?:\+\d{1,3}[-. ]?)?\(?\d{3}\)?[-. ]?\d{3}[-. ]?\d{4}";
const WEBSITE_PATTERN: &str = r"(?:www\.)?[\w-]+\.[\w.-]+";

/// Free-form fields read straight off the card text.
pub struct FieldPatterns {
    email: Regex,
    phone: Regex,
    website: Regex,
}

impl FieldPatterns {
    pub fn new() -> Result<Self, ExtractionError> {
        Ok(Self {
            email: compile(EMAIL_PATTERN)?,
            phone: compile(PHONE_PATTERN)?,
            website: compile(WEBSITE_PATTERN)?,
        })
    }

    pub fn email(&self, text: &str) -> String {
        first_match(&self.email, text)
    }

    pub fn phone(&self, text: &str) -> String {
        first_match(&self.phone, text)
    }

    pub fn website(&self, text: &str) -> String {
        first_match(&self.website, text)
    }
}

fn first_match(regex: &Regex, text: &str) -> String {
    regex
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Finds the first line that mentions one of a fixed set of phrases.
///
/// Phrases match case-insensitively and only as whole words, so "Partner"
/// does not fire on "Bogner & Partners".
pub struct LineMatcher {
    regex: Option<Regex>,
}

impl LineMatcher {
    pub fn new(phrases: &[String]) -> Result<Self, ExtractionError> {
        let alternatives: Vec<String> = phrases
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(whole_word)
            .collect();

        if alternatives.is_empty() {
            return Ok(Self { regex: None });
        }

        let regex = compile(&format!("(?i){}", alternatives.join("|")))?;
        Ok(Self { regex: Some(regex) })
    }

    pub fn first_line(&self, lines: &[&str]) -> String {
        let Some(regex) = &self.regex else {
            return String::new();
        };

        lines
            .iter()
            .find(|line| regex.is_match(line))
            .map(|line| line.trim().to_string())
            .unwrap_or_default()
    }
}

fn whole_word(phrase: &str) -> String {
    let starts_word = phrase.chars().next().is_some_and(is_word_char);
    let ends_word = phrase.chars().last().is_some_and(is_word_char);

    format!(
        "{}{}{}",
        if starts_word { r"\b" } else { "" },
        regex::escape(phrase),
        if ends_word { r"\b" } else { "" }
    )
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Collects address lines: a number followed later on the line by a street
/// keyword or a known city.
pub struct AddressMatcher {
    regex: Option<Regex>,
}

impl AddressMatcher {
    pub fn new(keywords: &[String], cities: &[String]) -> Result<Self, ExtractionError> {
        let alternatives: Vec<String> = keywords
            .iter()
            .chain(cities)
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(regex::escape)
            .collect();

        if alternatives.is_empty() {
            return Ok(Self { regex: None });
        }

        let regex = compile(&format!(r"(?i)\d+.*(?:{})", alternatives.join("|")))?;
        Ok(Self { regex: Some(regex) })
    }

    pub fn address(&self, lines: &[&str]) -> String {
        let Some(regex) = &self.regex else {
            return String::new();
        };

        lines
            .iter()
            .filter(|line| regex.is_match(line))
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Resolves the company by plain substring lookup, first alias wins.
pub fn resolve_company(companies: &[CompanyAlias], text: &str) -> String {
    companies
        .iter()
        .find(|alias| !alias.pattern.is_empty() && text.contains(&alias.pattern))
        .map(|alias| alias.display_name.clone())
        .unwrap_or_default()
}

fn compile(pattern: &str) -> Result<Regex, ExtractionError> {
    Regex::new(pattern).map_err(|e| ExtractionError::InvalidPattern(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrases(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_email_first_match() {
        let patterns = FieldPatterns::new().unwrap();
        let text = "Mail: eva.richter@dsa-africa.org or info@dsa-africa.org";
        assert_eq!(patterns.email(text), "eva.richter@dsa-africa.org");
        assert_eq!(patterns.email("no address here"), "");
    }

    #[test]
    fn test_phone_formats() {
        let patterns = FieldPatterns::new().unwrap();
        assert_eq!(patterns.phone("Tel +49 221 555 1234"), "+49 221 555 1234");
        assert_eq!(patterns.phone("(555) 123-4567"), "(555) 123-4567");
        assert_eq!(patterns.phone("555.123.4567 ext"), "555.123.4567");
        assert_eq!(patterns.phone("12 Hauptstr"), "");
    }

    #[test]
    fn test_website_match() {
        let patterns = FieldPatterns::new().unwrap();
        assert_eq!(
            patterns.website("Visit www.bogner-partners.de today"),
            "www.bogner-partners.de"
        );
    }

    #[test]
    fn test_line_matcher_is_case_insensitive_and_trims() {
        let matcher = LineMatcher::new(&phrases(&["Eva Lena Richter", "Andrej Mikula"])).unwrap();
        let lines = vec!["Digital Skills Accelerator", "  EVA LENA RICHTER  ", "Cologne"];
        assert_eq!(matcher.first_line(&lines), "EVA LENA RICHTER");
    }

    #[test]
    fn test_line_matcher_respects_word_boundaries() {
        let matcher = LineMatcher::new(&phrases(&["Project Management", "Partner"])).unwrap();
        let lines = vec!["Bogner & Partners", "Andrej Mikula", "Partner"];
        assert_eq!(matcher.first_line(&lines), "Partner");
    }

    #[test]
    fn test_empty_line_matcher_never_matches() {
        let matcher = LineMatcher::new(&[]).unwrap();
        assert_eq!(matcher.first_line(&["Partner"]), "");
    }

    #[test]
    fn test_address_lines_are_joined() {
        let matcher = AddressMatcher::new(
            &phrases(&["street", "str", "road"]),
            &phrases(&["Munich", "Cologne"]),
        )
        .unwrap();
        let lines = vec!["Andrej Mikula", "12 Hauptstr", "80331 Munich", "Partner"];
        assert_eq!(matcher.address(&lines), "12 Hauptstr, 80331 Munich");
    }

    #[test]
    fn test_address_requires_leading_digit() {
        let matcher = AddressMatcher::new(&phrases(&["road"]), &[]).unwrap();
        assert_eq!(matcher.address(&["Abbey Road"]), "");
    }

    #[test]
    fn test_resolve_company_uses_first_alias() {
        let companies = vec![
            CompanyAlias::new("Digital Skills Accelerator", "Digital Skills Accelerator Africa"),
            CompanyAlias::new("Bogner & Partners", "Bogner & Partners"),
        ];
        assert_eq!(
            resolve_company(&companies, "Digital Skills Accelerator\nEva"),
            "Digital Skills Accelerator Africa"
        );
        assert_eq!(resolve_company(&companies, "Acme Inc"), "");
    }
}
