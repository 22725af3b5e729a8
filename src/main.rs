use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use questgen::{load_env_file, Commands, Container, ContainerConfig, DomainError, Router};

#[derive(Parser)]
#[command(name = "questgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Env file to load instead of ./.env
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// API token (defaults to CHATGPT_TOKEN, then OPENAI_API_KEY)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Answer from a built-in offline client instead of the API
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(cli.verbose)));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    load_env_file(cli.env_file.as_deref())?;

    let container = Container::new(ContainerConfig {
        token: cli.token,
        mock: cli.mock,
    })?;
    let router = Router::new(&container);

    match router.route(cli.command).await {
        Ok(output) => {
            println!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => match e.downcast_ref::<DomainError>() {
            Some(domain_error) => {
                // Context above the domain error is partial output worth keeping.
                let rendered = e.to_string();
                if rendered != domain_error.to_string() {
                    println!("{rendered}\n");
                }
                println!("{}", serde_json::to_string_pretty(domain_error)?);
                Ok(ExitCode::FAILURE)
            }
            None => Err(e),
        },
    }
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}
