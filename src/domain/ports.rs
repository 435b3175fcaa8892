use crate::domain::model::{CountryGdpRecord, RawCountryRow};
use crate::utils::error::Result;
use async_trait::async_trait;
use rusqlite::Connection;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn source_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn csv_file(&self) -> &str;
    fn db_file(&self) -> &str;
    fn table_name(&self) -> &str;
    fn log_file(&self) -> &str;
}

/// The four pipeline stages. Only extraction touches the network; everything
/// downstream of it is synchronous. Database stages borrow the connection the
/// orchestrator opened, they never own it.
#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawCountryRow>>;
    fn transform(&self, rows: Vec<RawCountryRow>) -> Result<Vec<CountryGdpRecord>>;
    async fn load_to_csv(&self, records: &[CountryGdpRecord]) -> Result<String>;
    fn load_to_db(&self, records: &[CountryGdpRecord], conn: &Connection) -> Result<usize>;
    fn run_query(&self, query: &str, conn: &Connection) -> Result<Vec<CountryGdpRecord>>;
}
