use crate::core::scrape;
use crate::core::{ConfigProvider, CountryGdpRecord, Pipeline, RawCountryRow, Storage};
use crate::utils::error::{EtlError, Result};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Table};
use reqwest::Client;
use rusqlite::{params, Connection};

/// Convert a comma-grouped USD-millions figure to USD billions, rounded to
/// 2 decimal places (half away from zero).
pub fn millions_to_billions(raw: &str) -> Result<f64> {
    let cleaned: String = raw.split(',').collect();
    let millions: f64 = cleaned.trim().parse().map_err(|source| EtlError::Format {
        value: raw.to_string(),
        source,
    })?;
    Ok((millions / 1000.0 * 100.0).round() / 100.0)
}

pub struct GdpPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> GdpPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    fn csv_bytes(&self, records: &[CountryGdpRecord]) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        // Leading unnamed column carries the positional row index.
        writer.write_record(["", "Country", "GDP_USD_billions"])?;
        for (index, record) in records.iter().enumerate() {
            writer.write_record([
                index.to_string(),
                record.country.clone(),
                record.gdp_usd_billions.to_string(),
            ])?;
        }
        writer
            .into_inner()
            .map_err(|e| EtlError::Io(std::io::Error::other(e.to_string())))
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for GdpPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<RawCountryRow>> {
        tracing::debug!("Fetching page: {}", self.config.source_url());
        let response = self.client.get(self.config.source_url()).send().await?;

        tracing::debug!("Response status: {}", response.status());
        let html = response.error_for_status()?.text().await?;

        scrape::parse_country_rows(&html)
    }

    fn transform(&self, rows: Vec<RawCountryRow>) -> Result<Vec<CountryGdpRecord>> {
        rows.into_iter()
            .map(|row| {
                let gdp_usd_billions = millions_to_billions(&row.gdp_usd_millions)?;
                Ok(CountryGdpRecord {
                    country: row.country,
                    gdp_usd_billions,
                })
            })
            .collect()
    }

    async fn load_to_csv(&self, records: &[CountryGdpRecord]) -> Result<String> {
        let data = self.csv_bytes(records)?;

        tracing::debug!("Writing CSV ({} bytes) to storage", data.len());
        self.storage.write_file(self.config.csv_file(), &data).await?;

        Ok(format!(
            "{}/{}",
            self.config.output_path(),
            self.config.csv_file()
        ))
    }

    fn load_to_db(&self, records: &[CountryGdpRecord], conn: &Connection) -> Result<usize> {
        let table = self.config.table_name();

        // Replace semantics: the table is rebuilt wholesale on every run.
        conn.execute_batch(&format!(
            "DROP TABLE IF EXISTS {table};\
             CREATE TABLE {table} (Country TEXT, GDP_USD_billions REAL);"
        ))?;

        let tx = conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {table} (Country, GDP_USD_billions) VALUES (?1, ?2)"
            ))?;
            for record in records {
                stmt.execute(params![record.country, record.gdp_usd_billions])?;
            }
        }
        tx.commit()?;

        Ok(records.len())
    }

    fn run_query(&self, query: &str, conn: &Connection) -> Result<Vec<CountryGdpRecord>> {
        println!("{}", query);

        let mut stmt = conn.prepare(query)?;
        let records = stmt
            .query_map([], |row| {
                Ok(CountryGdpRecord {
                    country: row.get(0)?,
                    gdp_usd_billions: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec!["Country", "GDP_USD_billions"]);
        for record in &records {
            table.add_row(vec![
                Cell::new(&record.country),
                Cell::new(format!("{:.2}", record.gdp_usd_billions)),
            ]);
        }
        println!("{table}");

        Ok(records)
    }
}
