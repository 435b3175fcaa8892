use clap::Parser;
use gdp_etl::utils::{logger, validation::Validate};
use gdp_etl::{CliConfig, EtlEngine, GdpPipeline, LocalStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting gdp-etl");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let storage = LocalStorage::new(&config.output_path);
    let pipeline = GdpPipeline::new(storage, config.clone());
    let engine = EtlEngine::new(pipeline, config);

    match engine.run().await {
        Ok(report) => {
            tracing::info!(
                "ETL process completed: {} extracted, {} loaded, {} matched the query",
                report.extracted,
                report.loaded,
                report.matched
            );
            println!("✅ ETL process completed successfully!");
            println!("📁 CSV saved to: {}", report.csv_path);
            println!("📁 Database saved to: {}", report.db_path);
        }
        Err(e) => {
            tracing::error!("ETL process failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
