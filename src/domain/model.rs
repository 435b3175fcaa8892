use serde::{Deserialize, Serialize};

/// One accepted table row as scraped: country name plus the GDP figure exactly
/// as printed on the page (comma-grouped USD millions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCountryRow {
    pub country: String,
    pub gdp_usd_millions: String,
}

/// Transformed record: GDP in USD billions, rounded to 2 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryGdpRecord {
    pub country: String,
    pub gdp_usd_billions: f64,
}

/// Run summary returned by the engine for the CLI to print.
#[derive(Debug, Clone)]
pub struct EtlReport {
    pub extracted: usize,
    pub loaded: usize,
    pub matched: usize,
    pub csv_path: String,
    pub db_path: String,
}
