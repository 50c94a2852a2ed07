//! Binary crate for the `umbrella` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging setup
//! - Printing the recommendation

use clap::Parser;
use umbrella_core::config;

mod cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();

    // .env may carry RUST_LOG, so it is read before the subscriber is built
    let dotenv = config::load_dotenv();
    cmd.init_logging();
    dotenv.report();

    cmd.run().await
}
