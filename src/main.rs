// src/main.rs

use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use scamhunter::config::{HoneypotConfig, CONFIG};
use scamhunter::pipeline::ResponsePipeline;
use scamhunter::server;

#[derive(Parser)]
#[command(name = "scamhunter", version, about = "Scam-baiting honeypot chat service")]
struct Cli {
    /// Override HONEYPOT_HOST
    #[arg(long, env = "HONEYPOT_HOST", global = true)]
    host: Option<String>,

    /// Override HONEYPOT_PORT
    #[arg(long, env = "HONEYPOT_PORT", global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service (default)
    Serve,
    /// Run one message through the reply pipeline and print the reply
    Ask {
        /// Scammer message
        text: String,
    },
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let level = level.parse::<Level>().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config: HoneypotConfig = CONFIG.clone();
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    init_tracing(&config.log_level)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            info!("Starting ScamHunters honeypot");
            server::run(&config).await
        }
        Command::Ask { text } => {
            let pipeline = ResponsePipeline::from_config(&config);
            let reply = pipeline.respond(Some(&text), &[]).await;
            println!("{}", reply);
            Ok(())
        }
    }
}
