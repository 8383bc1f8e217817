use csv::{QuoteStyle, Terminator, WriterBuilder};
use shared_types::{ContactField, ContactRecord, ExtractionError};

pub const CSV_HEADER: [&str; 7] = [
    "Name", "Title", "Company", "Email", "Phone", "Website", "Address",
];

/// Renders contacts as CSV.
///
/// The header line is bare; every data cell is double-quoted with inner
/// quotes doubled. Lines are joined with `\n` and there is no trailing
/// newline.
pub fn export_contacts(contacts: &[ContactRecord]) -> Result<String, ExtractionError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .has_headers(false)
        .from_writer(Vec::new());

    for contact in contacts {
        writer
            .write_record(ContactField::ALL.iter().map(|field| contact.field(*field)))
            .map_err(|e| ExtractionError::ExportError(e.to_string()))?;
    }

    let rows = writer
        .into_inner()
        .map_err(|e| ExtractionError::ExportError(e.to_string()))?;
    let rows = String::from_utf8(rows).map_err(|e| ExtractionError::ExportError(e.to_string()))?;

    let mut output = CSV_HEADER.join(",");
    if let Some(rows) = rows.strip_suffix('\n') {
        output.push('\n');
        output.push_str(rows);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::ReaderBuilder;

    fn contact(name: &str, address: &str) -> ContactRecord {
        ContactRecord {
            id: format!("id-{}", name),
            name: name.to_string(),
            title: "Partner".to_string(),
            company: "Bogner & Partners".to_string(),
            email: String::new(),
            phone: String::new(),
            website: String::new(),
            address: address.to_string(),
            extracted_text: "raw card text".to_string(),
        }
    }

    #[test]
    fn test_header_only_for_empty_selection() {
        assert_eq!(
            export_contacts(&[]).unwrap(),
            "Name,Title,Company,Email,Phone,Website,Address"
        );
    }

    #[test]
    fn test_cells_are_quoted_and_rows_newline_separated() {
        let csv = export_contacts(&[contact("Andrej Mikula", ""), contact("Eva Lena Richter", "")])
            .unwrap();
        let lines: Vec<&str> = csv.split('\n').collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            r#""Andrej Mikula","Partner","Bogner & Partners","","","","""#
        );
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_quotes_and_commas_survive_reparsing() {
        let address = r#"123 Main St, "Unit 4""#;
        let csv = export_contacts(&[contact("Andrej Mikula", address)]).unwrap();

        assert!(csv.ends_with(r#","123 Main St, ""Unit 4""""#));

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(csv.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), CSV_HEADER.to_vec());

        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(record.get(6), Some(address));
        assert_eq!(record.get(0), Some("Andrej Mikula"));
    }
}
