pub mod etl;
pub mod pipeline;
pub mod scrape;

pub use crate::domain::model::{CountryGdpRecord, EtlReport, RawCountryRow};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
