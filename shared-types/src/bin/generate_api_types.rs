use shared_types::*;
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for API types
    let mut types = Vec::new();

    // Contact types
    types.push(clean_type(ContactRecord::export_to_string()?));
    types.push(clean_type(ContactField::export_to_string()?));
    types.push(clean_type(SortDirection::export_to_string()?));
    types.push(clean_type(ContactQuery::export_to_string()?));
    types.push(clean_type(ContactPage::export_to_string()?));
    types.push(clean_type(ContactIdsRequest::export_to_string()?));
    types.push(clean_type(DeleteContactsResponse::export_to_string()?));

    // Entity table types
    types.push(clean_type(CompanyAlias::export_to_string()?));
    types.push(clean_type(EntityTable::export_to_string()?));

    // Scan job types
    types.push(clean_type(ScanJob::export_to_string()?));
    types.push(clean_type(ScanJobStatus::export_to_string()?));
    types.push(clean_type(ScanProgress::export_to_string()?));
    types.push(clean_type(ScanJobListResponse::export_to_string()?));

    // Settings types
    types.push(clean_type(SettingsResponse::export_to_string()?));

    let output_dir = Path::new("../gui/src/api-types");
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    // Every type lands in a single file, so cross-type imports are dropped
    let filtered: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
