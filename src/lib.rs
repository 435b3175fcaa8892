pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, CliConfig};
pub use core::{etl::EtlEngine, pipeline::GdpPipeline};
pub use domain::model::{CountryGdpRecord, EtlReport, RawCountryRow};
pub use utils::error::{EtlError, Result};
