use anyhow::Result;
use clap::Parser;
use quackhub::app::event_loop;
use quackhub::github::GithubClient;
use quackhub::github::contributions::ContributionsClient;
use quackhub::util::config::AppConfig;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "quackhub", version, about = "TUI GitHub profile dashboard")]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// GitHub username to display (overrides config)
    #[arg(short, long)]
    user: Option<String>,

    /// Enable debug logging to file
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(user) = cli.user {
        config.github.username = user;
    }

    let _guard = setup_logging(&config, cli.debug)?;

    info!("quackhub starting");

    if config.github.username.is_empty() {
        eprintln!(
            "No GitHub username configured. Pass --user or add one to your config file.\n\
             Example config (~/.config/quackhub/config.toml):\n\n\
             [github]\n\
             username = \"octocat\""
        );
        std::process::exit(1);
    }

    let client = GithubClient::new(&config.github.api_url)?;
    let contributions = ContributionsClient::new(&config.contributions.api_url)?;

    info!(user = %config.github.username, "Dashboard subject resolved");

    event_loop::run(config, client, contributions).await
}

fn setup_logging(
    config: &AppConfig,
    debug: bool,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    if !debug {
        return Ok(None);
    }

    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "quackhub.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter("quackhub=debug")
        .with_ansi(false)
        .init();

    Ok(Some(guard))
}
