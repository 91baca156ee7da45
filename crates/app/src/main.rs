//! Encore CLI

use std::process;

use clap::Parser;

mod cli;

#[tokio::main]
pub async fn main() {
    encore_app::config::load_dotenv();

    let cli = cli::Cli::parse();

    if let Err(error) = cli.run().await {
        eprintln!("{error}");
        process::exit(1);
    }
}
