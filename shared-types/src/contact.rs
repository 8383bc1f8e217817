use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One business card worth of contact details.
///
/// Records are immutable once created: they only ever leave the store by
/// explicit deletion or a clear. Fields that were not found on the card are
/// empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContactRecord {
    pub id: String,
    pub name: String,
    pub title: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub address: String,
    /// Trimmed card segment the fields were read from.
    pub extracted_text: String,
}

impl ContactRecord {
    /// A card is only worth keeping if it names someone or carries an email.
    pub fn has_identity(&self) -> bool {
        !self.name.is_empty() || !self.email.is_empty()
    }

    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Title => &self.title,
            ContactField::Company => &self.company,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::Website => &self.website,
            ContactField::Address => &self.address,
        }
    }
}

/// Selector for a single contact column, used for sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ContactField {
    #[default]
    Name,
    Title,
    Company,
    Email,
    Phone,
    Website,
    Address,
}

impl ContactField {
    pub const ALL: [ContactField; 7] = [
        ContactField::Name,
        ContactField::Title,
        ContactField::Company,
        ContactField::Email,
        ContactField::Phone,
        ContactField::Website,
        ContactField::Address,
    ];
}

impl std::str::FromStr for ContactField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(ContactField::Name),
            "title" => Ok(ContactField::Title),
            "company" => Ok(ContactField::Company),
            "email" => Ok(ContactField::Email),
            "phone" => Ok(ContactField::Phone),
            "website" => Ok(ContactField::Website),
            "address" => Ok(ContactField::Address),
            other => Err(format!("Unknown contact field: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("Unknown sort direction: {}", other)),
        }
    }
}

/// Search, sort and page selection for the contact list.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct ContactQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort_field: ContactField,
    #[serde(default)]
    pub direction: SortDirection,
    #[serde(default = "first_page")]
    pub page: usize,
}

fn first_page() -> usize {
    1
}

impl Default for ContactQuery {
    fn default() -> Self {
        Self {
            search: None,
            sort_field: ContactField::default(),
            direction: SortDirection::default(),
            page: first_page(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContactPage {
    pub contacts: Vec<ContactRecord>,
    pub total_contacts: usize,
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
}

/// Body of the delete-selected and export-selected requests.
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContactIdsRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeleteContactsResponse {
    pub removed: usize,
    pub remaining: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, email: &str) -> ContactRecord {
        ContactRecord {
            id: "1".to_string(),
            name: name.to_string(),
            title: String::new(),
            company: String::new(),
            email: email.to_string(),
            phone: String::new(),
            website: String::new(),
            address: String::new(),
            extracted_text: String::new(),
        }
    }

    #[test]
    fn test_has_identity() {
        assert!(record("Andrej Mikula", "").has_identity());
        assert!(record("", "andrej@bogner.com").has_identity());
        assert!(!record("", "").has_identity());
    }

    #[test]
    fn test_field_serialization() {
        let json = serde_json::to_string(&ContactField::Website).unwrap();
        assert_eq!(json, "\"website\"");

        let direction: SortDirection = serde_json::from_str("\"desc\"").unwrap();
        assert_eq!(direction, SortDirection::Desc);
    }

    #[test]
    fn test_query_defaults() {
        let query: ContactQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.sort_field, ContactField::Name);
        assert_eq!(query.direction, SortDirection::Asc);
        assert!(query.search.is_none());
    }

    #[test]
    fn test_parse_field_from_str() {
        assert_eq!("Company".parse::<ContactField>(), Ok(ContactField::Company));
        assert!("fax".parse::<ContactField>().is_err());
    }
}
