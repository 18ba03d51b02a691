use anyhow::Result;
use clap::{Args, Parser, Subcommand};

mod commands;
use commands::{execute_serve_command, print_routes, ServeArgs, DEFAULT_LOG_FILTER};

#[derive(Parser)]
#[command(name = "itemsvc")]
#[command(about = "In-memory item service over HTTP")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeCommandArgs),
    /// Print the HTTP routes
    Routes,
}

#[derive(Args)]
pub struct ServeCommandArgs {
    /// IP address to listen on
    #[arg(long, env = "ITEMSVC_HOST", default_value = "0.0.0.0")]
    pub host: String,
    /// Port to listen on
    #[arg(short, long, env = "ITEMSVC_PORT", default_value = "8080")]
    pub port: u16,
    /// Start with three demo items
    #[arg(long, env = "ITEMSVC_SEED")]
    pub seed: bool,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = DEFAULT_LOG_FILTER)]
    pub log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            let serve_args = ServeArgs {
                host: args.host,
                port: args.port,
                seed: args.seed,
                log_level: args.log_level,
            };
            execute_serve_command(serve_args).await
        }
        Commands::Routes => {
            print_routes();
            Ok(())
        }
    }
}
