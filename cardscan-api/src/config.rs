use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use shared_types::EntityTable;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub cors: Option<CorsConfig>,
    pub server: Option<ServerConfig>,
    pub scanner: Option<ScannerConfig>,
    pub entities: Option<EntityTable>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors: Some(CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            }),
            server: Some(ServerConfig::default()),
            scanner: Some(ScannerConfig::default()),
            entities: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_upload_mb: default_max_upload_mb(),
        }
    }
}

fn default_max_upload_mb() -> usize {
    50
}

/// External tools and presentation settings used while scanning cards.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ScannerConfig {
    pub pdftoppm_path: String,
    pub tesseract_path: String,
    pub language: String,
    /// 144 dpi renders at twice the PDF's native 72 dpi.
    pub dpi: u32,
    pub page_size: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            pdftoppm_path: "pdftoppm".to_string(),
            tesseract_path: "tesseract".to_string(),
            language: "eng".to_string(),
            dpi: 144,
            page_size: 20,
        }
    }
}

const DEFAULT_CONFIG: &str = r#"
[cors]
allowed_origins = ["http://localhost:3000"]

[server]
host = "127.0.0.1"
port = 8080
max_upload_mb = 50

[scanner]
pdftoppm_path = "pdftoppm"
tesseract_path = "tesseract"
language = "eng"
dpi = 144
page_size = 20

# Known entities used to split and label business cards.
# Leave this section out to use the built-in table.
# [entities]
# delimiters = ["Bogner & Partners", "Digital Skills Accelerator"]
# names = ["Eva Lena Richter", "Andrej Mikula"]
# titles = ["Project Management", "Partner"]
# address_keywords = ["street", "str", "avenue", "ave", "road", "rd"]
# cities = ["Munich", "Cologne"]
#
# [[entities.companies]]
# pattern = "Digital Skills Accelerator"
# display_name = "Digital Skills Accelerator Africa"
"#;

impl ApiConfig {
    pub fn load() -> Result<(Self, PathBuf), ConfigError> {
        let config_path = get_config_path();
        let config = Self::load_from(&config_path)?;
        Ok((config, config_path))
    }

    /// Load the config at `config_path`, writing the default file first if it is missing.
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            std::fs::write(config_path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.to_path_buf()).format(FileFormat::Toml))
            .add_source(Environment::with_prefix("CARDSCAN").separator("__"))
            .build()?;

        builder.try_deserialize()
    }

    pub fn scanner(&self) -> ScannerConfig {
        self.scanner.clone().unwrap_or_default()
    }

    pub fn entity_table(&self) -> EntityTable {
        self.entities.clone().unwrap_or_default()
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("cardscan").join("api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_is_written_and_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("api.toml");

        let config = ApiConfig::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.server.as_ref().unwrap().port, 8080);
        assert_eq!(config.scanner().page_size, 20);
        assert_eq!(config.entity_table(), EntityTable::default());
    }

    #[test]
    fn test_entities_section_overrides_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.toml");
        std::fs::write(
            &path,
            r#"
[scanner]
language = "deu"

[entities]
delimiters = ["Acme Corp"]
names = ["Jane Roe"]

[[entities.companies]]
pattern = "Acme Corp"
display_name = "Acme Corporation"
"#,
        )
        .unwrap();

        let config = ApiConfig::load_from(&path).unwrap();
        let table = config.entity_table();

        assert_eq!(config.scanner().language, "deu");
        assert_eq!(config.scanner().dpi, 144);
        assert_eq!(table.delimiters, vec!["Acme Corp".to_string()]);
        assert_eq!(table.companies[0].display_name, "Acme Corporation");
        assert_eq!(table.cities, EntityTable::default().cities);
    }
}
