//! ChessEarn terminal client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chessearn -- login alice
//! cargo run --bin chessearn -- create --base-time 300 --increment 0 --play
//! cargo run --bin chessearn -- open --follow
//! cargo run --bin chessearn -- watch <game-id>
//! ```

use std::path::PathBuf;

use clap::Parser;

use chessearn_client::{
    ClientConfig,
    config::{DEFAULT_API_BASE_URL, DEFAULT_POLL_SECS},
    ui::{App, Command, run},
};
use chessearn_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "chessearn")]
#[command(about = "Play and watch ChessEarn games from the terminal", long_about = None)]
struct Args {
    /// REST API base URL
    #[arg(long, env = "CHESSEARN_API_URL", default_value = DEFAULT_API_BASE_URL)]
    api_url: String,

    /// Socket.IO endpoint (derived from the API URL when omitted)
    #[arg(long, env = "CHESSEARN_WS_URL")]
    ws_url: Option<String>,

    /// Credential file (default: $HOME/.chessearn/credentials.json)
    #[arg(long, env = "CHESSEARN_CREDENTIALS")]
    credentials: Option<PathBuf>,

    /// Open-game refresh interval in seconds
    #[arg(long, env = "CHESSEARN_POLL_SECS", default_value_t = DEFAULT_POLL_SECS)]
    poll_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    let args = Args::parse();

    let config = match ClientConfig::new(args.api_url, args.ws_url, args.credentials, args.poll_secs) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let app = match App::bootstrap(config).await {
        Ok(app) => app,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&app, args.command).await {
        tracing::debug!("Command failed: {:?}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
