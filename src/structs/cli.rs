use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser)]
#[clap(name = "codehack")]
#[clap(about = "Browse GitHub repositories, review detected issues and apply optimized code", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
