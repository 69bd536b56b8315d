use clap::Parser;
use pkg_catalog::core::ConfigProvider;
use pkg_catalog::utils::{logger, validation::Validate};
use pkg_catalog::{
    CatalogEngine, CatalogError, CatalogPipeline, CliConfig, LocalStorage, TomlConfig,
};
use std::fmt::Debug;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting pkg-catalog");

    let result = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => run(config, cli.dry_run).await,
                Err(e) => Err(e),
            }
        }
        None => run(cli.clone(), cli.dry_run).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Catalog build failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.exit_code());
    }
}

async fn run<C>(config: C, dry_run: bool) -> Result<(), CatalogError>
where
    C: ConfigProvider + Validate + Debug,
{
    config.validate()?;
    tracing::debug!("Configuration: {:?}", config);

    let storage = LocalStorage::new(config.output_path());
    let pipeline = CatalogPipeline::with_http(storage, config)?;
    let engine = CatalogEngine::new(pipeline);

    if dry_run {
        let definitions = engine.dry_run().await?;
        println!("🔍 {} definitions would be processed:", definitions.len());
        for definition in &definitions {
            println!(
                "  [{}] {} ({}) -> {}",
                definition.package_type,
                definition.name,
                definition.path.display(),
                definition.package
            );
        }
        return Ok(());
    }

    let output_path = engine.run().await?;
    tracing::info!("✅ Catalog build completed");
    println!("✅ Catalog build completed!");
    println!("📁 Output saved to: {}", output_path);

    Ok(())
}
