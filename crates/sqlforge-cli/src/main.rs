use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod bootstrap;
mod commands;
mod repl;

#[derive(Parser)]
#[command(name = "sqlforge")]
#[command(about = "sqlforge - terminal client for a Text-to-SQL generation service", long_about = None)]
struct Cli {
    /// Base URL of the SQL-generation service (overrides config file)
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let context = bootstrap::bootstrap(cli.api_url).await?;
    repl::run(context).await
}
