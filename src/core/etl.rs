use crate::core::{ConfigProvider, EtlReport, Pipeline};
use crate::utils::error::Result;
use crate::utils::logger::ProgressLog;
use rusqlite::Connection;
use std::path::Path;

/// Orchestrates the four stages in order and writes one progress-log line
/// between each. The database connection is opened after the CSV write and
/// scoped to this call: every early return drops it, the happy path closes it
/// explicitly.
pub struct EtlEngine<P: Pipeline, C: ConfigProvider> {
    pipeline: P,
    config: C,
    progress: ProgressLog,
}

impl<P: Pipeline, C: ConfigProvider> EtlEngine<P, C> {
    pub fn new(pipeline: P, config: C) -> Self {
        let log_path = Path::new(config.output_path()).join(config.log_file());
        Self {
            pipeline,
            config,
            progress: ProgressLog::new(log_path),
        }
    }

    pub async fn run(&self) -> Result<EtlReport> {
        self.progress.log("Starting ETL process.")?;

        tracing::info!("Extracting data from {}", self.config.source_url());
        let raw_rows = self.pipeline.extract().await?;
        let extracted = raw_rows.len();
        tracing::info!("Extracted {} rows", extracted);
        self.progress
            .log("Data extraction complete! Starting Transform!")?;

        let records = self.pipeline.transform(raw_rows)?;
        tracing::info!("Transformed {} records", records.len());
        self.progress
            .log("Data transformation complete! Starting Load!")?;

        let csv_path = self.pipeline.load_to_csv(&records).await?;
        tracing::info!("CSV written to {}", csv_path);
        self.progress.log("Data saved to CSV file")?;

        let db_path = Path::new(self.config.output_path()).join(self.config.db_file());
        let conn = Connection::open(&db_path)?;
        self.progress.log("SQL Connection initiated.")?;

        let loaded = self.pipeline.load_to_db(&records, &conn)?;
        tracing::info!(
            "Loaded {} records into table {}",
            loaded,
            self.config.table_name()
        );
        self.progress
            .log("Data loaded to Database as table. Running the query")?;

        let query = format!(
            "SELECT * FROM {} WHERE GDP_USD_billions >= 100",
            self.config.table_name()
        );
        let matches = self.pipeline.run_query(&query, &conn)?;
        self.progress.log("Process Complete.")?;

        if let Err((_, err)) = conn.close() {
            return Err(err.into());
        }

        Ok(EtlReport {
            extracted,
            loaded,
            matched: matches.len(),
            csv_path,
            db_path: db_path.display().to_string(),
        })
    }
}
