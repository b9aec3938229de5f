use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use dotenv::dotenv;
use nft_migrate::helpers::address::ContractAddress;
use nft_migrate::helpers::app_config::{AppConfig, DEFAULT_CONFIG_FILE};
use nft_migrate::helpers::greenfield_config::write_greenfield_config;
use nft_migrate::services::bucket::GnfdCmdStore;
use nft_migrate::services::chain::EvmChainReader;
use nft_migrate::services::fetcher::AssetFetcher;
use nft_migrate::services::migration::{MigrationManager, MigrationReport};
use nft_migrate::services::staging::StagingArea;
use tracing::{info, span, warn, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing()?;

    let main_span = span!(Level::TRACE, "main");
    let _main_guard = main_span.enter();

    let matches = cli().get_matches();
    let config = AppConfig::load_from_file(DEFAULT_CONFIG_FILE)?;
    migrate(&matches, &config).await
}

fn cli() -> Command<'static> {
    Command::new("nft-migrate")
        .about("Migrates an NFT collection's metadata and media into a Greenfield bucket")
        .arg(
            Arg::new("contract")
                .long("contract")
                .takes_value(true)
                .required(true)
                .help("Address of the ERC-721 contract to migrate"),
        )
        .arg(
            Arg::new("endpoint")
                .long("endpoint")
                .takes_value(true)
                .help("Ethereum JSON-RPC endpoint, defaults to the configured one"),
        )
}

async fn migrate(matches: &ArgMatches, config: &AppConfig) -> Result<()> {
    let endpoint = matches
        .value_of("endpoint")
        .unwrap_or(&config.endpoint)
        .to_string();
    let contract = ContractAddress::parse(matches.value_of("contract").unwrap_or_default())?;

    write_greenfield_config(
        &config.gnfd_config,
        &config.greenfield_rpc_addr,
        &config.greenfield_chain_id,
    )?;

    let chain = EvmChainReader::connect(&endpoint, contract).await?;
    info!("Migrating collection {}", contract);

    let staging = StagingArea::new(
        config.staging_dir.clone(),
        &config.media_prefix,
        &config.metadata_extension,
    )?;
    let store = GnfdCmdStore::new(
        config.gnfd_cmd.clone(),
        config.gnfd_config.clone(),
        config.password_file.clone(),
        config.sp_base_url.clone(),
    );

    let manager = MigrationManager::new(
        chain,
        store,
        AssetFetcher::new(),
        staging,
        config.max_tokens,
    );
    let report = manager.run().await?;
    log_report(&report);

    Ok(())
}

fn log_report(report: &MigrationReport) {
    info!(
        "Migrated {} of {} token(s) into {} ({} media, {} metadata file(s))",
        report.fetched(),
        report.working_count,
        report.bucket.uri(),
        report.media_uploaded,
        report.metadata_uploaded
    );
    if report.rewrite.skipped > 0 {
        warn!(
            "{} metadata document(s) kept their original image URL",
            report.rewrite.skipped
        );
    }
    for token in report.failed() {
        warn!(
            "Token ID: {} failed: {}",
            token.token_id,
            token.failure.as_deref().unwrap_or_default()
        );
    }
}

fn init_tracing() -> Result<()> {
    // Initialize the LogTracer to convert `log` records to `tracing` events
    tracing_log::LogTracer::init()?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = Registry::default().with(env_filter).with(fmt::layer());

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
