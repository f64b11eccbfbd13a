use crate::config::DEFAULT_CONFIG_FILE;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cleanup_bot", version, about = "Ask whether a photographed space is clean")]
pub struct Cli {
    /// Config file; a missing file falls back to defaults
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Base URL of the storage/classification server
    #[arg(long)]
    pub api_url: Option<String>,

    /// Log filter directive (e.g. "debug", "cleanup_bot=trace")
    #[arg(long)]
    pub log: Option<String>,
}
