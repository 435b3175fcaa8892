pub mod cli;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_sql_identifier, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

const DEFAULT_URL: &str = "https://web.archive.org/web/20230902185326/https://en.wikipedia.org/wiki/List_of_countries_by_GDP_%28nominal%29";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "gdp-etl")]
#[command(about = "Scrape countries by nominal GDP and load them into CSV + SQLite")]
pub struct CliConfig {
    /// Archived snapshot to scrape
    #[arg(long, default_value = DEFAULT_URL)]
    pub url: String,

    /// Directory receiving the CSV, database and log files
    #[arg(long, default_value = ".")]
    pub output_path: String,

    #[arg(long, default_value = "Countries_by_GDP.csv")]
    pub csv_file: String,

    #[arg(long, default_value = "World_Economies.db")]
    pub db_file: String,

    #[arg(long, default_value = "Countries_by_GDP")]
    pub table_name: String,

    #[arg(long, default_value = "etl_project_log.txt")]
    pub log_file: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn source_url(&self) -> &str {
        &self.url
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn csv_file(&self) -> &str {
        &self.csv_file
    }

    fn db_file(&self) -> &str {
        &self.db_file
    }

    fn table_name(&self) -> &str {
        &self.table_name
    }

    fn log_file(&self) -> &str {
        &self.log_file
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("url", &self.url)?;
        validate_path("output_path", &self.output_path)?;
        validate_path("csv_file", &self.csv_file)?;
        validate_path("db_file", &self.db_file)?;
        validate_path("log_file", &self.log_file)?;
        validate_sql_identifier("table_name", &self.table_name)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CliConfig {
        CliConfig {
            url: DEFAULT_URL.to_string(),
            output_path: ".".to_string(),
            csv_file: "Countries_by_GDP.csv".to_string(),
            db_file: "World_Economies.db".to_string(),
            table_name: "Countries_by_GDP".to_string(),
            log_file: "etl_project_log.txt".to_string(),
            verbose: false,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_table_name_must_be_identifier() {
        let mut bad = config();
        bad.table_name = "Countries; DROP TABLE x".to_string();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_url_must_be_http() {
        let mut bad = config();
        bad.url = "file:///etc/passwd".to_string();
        assert!(bad.validate().is_err());
    }
}
