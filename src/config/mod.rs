pub mod endpoints;

use crate::utils::error::Result;
use crate::utils::validation::{validate_base_url, validate_positive, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "spielerplus")]
#[command(about = "Scrape spielerplus.de events and manage attendance from the terminal")]
pub struct CliConfig {
    /// Base URL of the spielerplus instance
    #[arg(long, default_value = "https://www.spielerplus.de/")]
    pub base_url: String,

    /// Login email; prompted interactively when omitted
    #[arg(long)]
    pub email: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    /// Upper bound on pagination rounds before discovery gives up
    #[arg(long, default_value = "50")]
    pub max_pagination_rounds: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_base_url("base_url", &self.base_url)?;
        validate_positive("timeout_secs", self.timeout_secs)?;
        validate_positive("max_pagination_rounds", self.max_pagination_rounds)?;
        Ok(())
    }
}
