use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::chart::ChartGeometry;
use crate::market::SimParams;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Clone)]
pub struct Timings {
    pub price_tick: Duration,
    pub hold_refresh: Duration,
    pub wallet_connect: Duration,
    pub access_payment: Duration,
    /// Simulated block confirmation before lore generation starts.
    pub mint_confirmation: Duration,
    pub lore_timeout: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            price_tick: Duration::from_millis(2000),
            hold_refresh: Duration::from_millis(1000),
            wallet_connect: Duration::from_millis(1000),
            access_payment: Duration::from_millis(2000),
            mint_confirmation: Duration::from_millis(1200),
            lore_timeout: Duration::from_secs(20),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub seed: Option<u64>,
    pub starting_balance: f64,
    pub mint_cost: f64,
    pub min_pack_size: usize,
    pub max_pack_size: usize,
    pub owner: String,
    pub api_key: Option<String>,
    pub model: String,
    pub offline: bool,
    pub log_dir: PathBuf,
    pub timings: Timings,
    pub sim: SimParams,
    pub chart: ChartGeometry,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            starting_balance: 5.0,
            mint_cost: 0.05,
            min_pack_size: 3,
            max_pack_size: 7,
            owner: "0x71...3A9f".to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            offline: false,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            timings: Timings::default(),
            sim: SimParams::default(),
            chart: ChartGeometry::default(),
        }
    }
}

/// Command-line surface of the `thewclub` binary.
#[derive(Parser, Debug)]
#[command(name = "thewclub")]
#[command(about = "Curate, mint and trade simulated creator-coin packs in the terminal")]
pub struct Cli {
    /// Seed the market simulator for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Starting mock balance in ETH
    #[arg(long, default_value_t = 5.0, value_parser = parse_balance)]
    balance: f64,

    /// Skip the lore service and use the stock pack copy
    #[arg(long)]
    offline: bool,

    /// Gemini model used for pack lore
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Directory for rolling log files
    #[arg(long, default_value = DEFAULT_LOG_DIR)]
    log_dir: PathBuf,

    /// Credential for the lore service
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

impl Cli {
    pub fn into_config(self) -> AppConfig {
        AppConfig {
            seed: self.seed,
            starting_balance: self.balance,
            model: self.model,
            offline: self.offline,
            log_dir: self.log_dir,
            api_key: self.api_key.filter(|k| !k.trim().is_empty()),
            ..AppConfig::default()
        }
    }
}

fn parse_balance(raw: &str) -> Result<f64, String> {
    let balance: f64 = raw
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    if !balance.is_finite() || balance < 0.0 {
        return Err("balance must be a non-negative amount".to_string());
    }
    Ok(balance)
}

/// Builds the config from the process arguments and environment. Prints
/// usage and exits on `--help` or a bad flag.
pub fn from_args() -> AppConfig {
    let mut config = Cli::parse().into_config();
    if config.api_key.is_none() {
        config.api_key = std::env::var("API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
    }
    config
}

/// Parses flags (without the binary name) into a config.
pub fn parse_args<I, T>(args: I) -> Result<AppConfig, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let argv = std::iter::once(OsString::from("thewclub")).chain(args.into_iter().map(Into::into));
    Cli::try_parse_from(argv).map(Cli::into_config)
}
