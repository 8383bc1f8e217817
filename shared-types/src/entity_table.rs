use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Reference table of the entities the card extractor knows about.
///
/// Every entry is matched literally. The table is loaded from the
/// `[entities]` section of the config file so new companies, people and
/// titles can be added without touching the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct EntityTable {
    /// Phrases that start a new card segment.
    pub delimiters: Vec<String>,
    /// Checked in order, the first pattern found in a segment wins.
    pub companies: Vec<CompanyAlias>,
    pub names: Vec<String>,
    pub titles: Vec<String>,
    pub address_keywords: Vec<String>,
    pub cities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompanyAlias {
    /// Substring looked for in the card text.
    pub pattern: String,
    /// Value stored in the contact's company field.
    pub display_name: String,
}

impl CompanyAlias {
    pub fn new(pattern: &str, display_name: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            display_name: display_name.to_string(),
        }
    }
}

impl Default for EntityTable {
    fn default() -> Self {
        Self {
            delimiters: to_strings(&["Bogner & Partners", "Digital Skills Accelerator"]),
            companies: vec![
                CompanyAlias::new(
                    "Digital Skills Accelerator",
                    "Digital Skills Accelerator Africa",
                ),
                CompanyAlias::new("Bogner & Partners", "Bogner & Partners"),
            ],
            names: to_strings(&["Eva Lena Richter", "Andrej Mikula"]),
            titles: to_strings(&["Project Management", "Partner"]),
            address_keywords: to_strings(&[
                "street", "str", "avenue", "ave", "road", "rd", "boulevard", "blvd", "lane", "ln",
                "drive", "dr",
            ]),
            cities: to_strings(&["Munich", "Cologne"]),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_table_falls_back_to_defaults() {
        let table: EntityTable =
            serde_json::from_str(r#"{"names": ["Jane Roe"]}"#).unwrap();

        assert_eq!(table.names, vec!["Jane Roe".to_string()]);
        assert_eq!(table.delimiters, EntityTable::default().delimiters);
        assert_eq!(table.cities.len(), 2);
    }

    #[test]
    fn test_default_company_order() {
        let table = EntityTable::default();
        assert_eq!(table.companies[0].pattern, "Digital Skills Accelerator");
        assert_eq!(
            table.companies[0].display_name,
            "Digital Skills Accelerator Africa"
        );
        assert_eq!(table.companies[1].display_name, "Bogner & Partners");
    }
}
