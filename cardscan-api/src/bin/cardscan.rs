use anyhow::{Context, Result};
use cardscan_api::config::ApiConfig;
use cardscan_api::helpers::contact_view::{filter_contacts, sort_contacts};
use cardscan_api::jobs::ScanPipeline;
use clap::{ArgGroup, Parser};
use extractors::BusinessCardExtractor;
use shared_types::{ContactField, ContactRecord, SortDirection};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "cardscan", about = "Extract contacts from scanned business cards and export them as CSV")]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["pdf", "text"]),
))]
struct Cli {
    /// Scanned PDF, one or more cards per page
    #[arg(long, value_name = "PATH", group = "input")]
    pdf: Option<PathBuf>,

    /// Text that was already recognized; pages separated by form feeds
    #[arg(long, value_name = "PATH", group = "input")]
    text: Option<PathBuf>,

    /// Write the CSV here instead of stdout
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Only export contacts containing this term
    #[arg(long)]
    search: Option<String>,

    #[arg(long, default_value = "name")]
    sort_field: ContactField,

    #[arg(long, default_value = "asc")]
    direction: SortDirection,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ApiConfig::load_from(path)
            .with_context(|| format!("Failed to load config at {:?}", path))?,
        None => ApiConfig::load().context("Failed to load cardscan config")?.0,
    };

    let contacts = match (&cli.pdf, &cli.text) {
        (Some(path), None) => {
            if !has_pdf_extension(path) {
                info!("Ignoring {:?}: not a PDF", path);
                return Ok(());
            }
            scan_pdf(&config, path).await?
        }
        (None, Some(path)) => extract_text(&config, path)?,
        _ => unreachable!("clap enforces exactly one input"),
    };

    let mut contacts = filter_contacts(&contacts, cli.search.as_deref().unwrap_or_default());
    sort_contacts(&mut contacts, cli.sort_field, cli.direction);

    let csv = extractors::export_contacts(&contacts).context("Failed to build CSV export")?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &csv).with_context(|| format!("Failed to write {:?}", path))?;
            info!("Exported {} contacts to {:?}", contacts.len(), path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", csv).context("Failed to write CSV to stdout")?;
        }
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

async fn scan_pdf(config: &ApiConfig, path: &Path) -> Result<Vec<ContactRecord>> {
    let pdf = std::fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    let pipeline = ScanPipeline::from_config(config).context("Invalid entity table in config")?;

    let mut contacts = Vec::new();
    let summary = pipeline
        .run(&pdf, |page_contacts, completed, total| {
            info!("Page {}/{}: {} contacts", completed, total, page_contacts.len());
            contacts.extend(page_contacts);
        })
        .await
        .with_context(|| format!("Failed to scan {:?}", path))?;

    info!(
        "Extracted {} contacts from {} pages",
        summary.contacts, summary.pages
    );
    Ok(contacts)
}

fn extract_text(config: &ApiConfig, path: &Path) -> Result<Vec<ContactRecord>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let extractor = BusinessCardExtractor::new(&config.entity_table())
        .context("Invalid entity table in config")?;

    Ok(text
        .split('\x0c')
        .flat_map(|page| extractor.extract_contacts(page))
        .collect())
}
