use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::PathBuf;

// DEFAULT CONFIGURATION WHEN NO CONFIG FILE OR ENV IS PROVIDED
pub const DEFAULT_CONFIG_FILE: &str = "nft-migrate.yaml";
pub const DEFAULT_ENDPOINT: &str = "https://bsc-dataseed3.binance.org/";
pub const DEFAULT_MAX_TOKENS: u64 = 5;
pub const DEFAULT_SP_BASE_URL: &str = "https://greenfield-sp.4everland.org";
pub const DEFAULT_GNFD_CMD: &str = "./gnfd-cmd";
pub const DEFAULT_GNFD_CONFIG: &str = "config.toml";
pub const DEFAULT_PASSWORD_FILE: &str = "password.txt";
pub const DEFAULT_STAGING_DIR: &str = ".";
pub const DEFAULT_MEDIA_PREFIX: &str = "image";
pub const DEFAULT_METADATA_EXTENSION: &str = "json";
pub const DEFAULT_GREENFIELD_RPC_ADDR: &str = "https://greenfield-chain.bnbchain.org:443";
pub const DEFAULT_GREENFIELD_CHAIN_ID: &str = "greenfield_1017-1";

const ENV_PREFIX: &str = "NFT_MIGRATE";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub endpoint: String,
    pub max_tokens: u64,
    pub sp_base_url: String,
    pub gnfd_cmd: PathBuf,
    pub gnfd_config: PathBuf,
    pub password_file: PathBuf,
    pub staging_dir: PathBuf,
    pub media_prefix: String,
    pub metadata_extension: String,
    pub greenfield_rpc_addr: String,
    pub greenfield_chain_id: String,
}

impl AppConfig {
    /// Loads defaults, then the optional YAML file, then `NFT_MIGRATE_*` env vars.
    pub fn load_from_file(config_path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("endpoint", DEFAULT_ENDPOINT)?
            .set_default("max_tokens", DEFAULT_MAX_TOKENS)?
            .set_default("sp_base_url", DEFAULT_SP_BASE_URL)?
            .set_default("gnfd_cmd", DEFAULT_GNFD_CMD)?
            .set_default("gnfd_config", DEFAULT_GNFD_CONFIG)?
            .set_default("password_file", DEFAULT_PASSWORD_FILE)?
            .set_default("staging_dir", DEFAULT_STAGING_DIR)?
            .set_default("media_prefix", DEFAULT_MEDIA_PREFIX)?
            .set_default("metadata_extension", DEFAULT_METADATA_EXTENSION)?
            .set_default("greenfield_rpc_addr", DEFAULT_GREENFIELD_RPC_ADDR)?
            .set_default("greenfield_chain_id", DEFAULT_GREENFIELD_CHAIN_ID)?
            .add_source(File::new(config_path, FileFormat::Yaml).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        settings.try_deserialize()
    }
}
