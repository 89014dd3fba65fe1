use anyhow::Context;
use burgerhouse::client::{Session, BASE_URL};
use burgerhouse::config::CheckoutProfile;
use burgerhouse::workflow::Workflow;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error};

/// Reorder your latest Pizzaria Burgerhouse order and wait for pickup
#[derive(Parser)]
#[command(name = "burgerhouse")]
#[command(about = "Reorder your latest Pizzaria Burgerhouse order and wait for pickup", long_about = None)]
struct Cli {
    /// Account username (the email used on the site)
    username: String,

    /// File whose first line is the account password
    #[arg(short, long)]
    password_file: PathBuf,

    /// TOML file overriding the checkout delivery profile
    #[arg(short = 'c', long)]
    profile: Option<PathBuf>,

    /// Seconds to wait between order-acceptance polls
    #[arg(long, default_value = "3")]
    poll_interval: u64,

    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .init();

    debug!("burgerhouse started with verbosity level: {}", cli.verbose);

    if let Err(e) = run(cli).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let password = std::fs::read_to_string(&cli.password_file)
        .with_context(|| format!("reading password from {}", cli.password_file.display()))?;
    let password = password.trim_end_matches('\n');

    let profile = match &cli.profile {
        Some(path) => CheckoutProfile::load(path)
            .with_context(|| format!("loading checkout profile from {}", path.display()))?,
        None => CheckoutProfile::default(),
    };

    let session = Session::new(BASE_URL)?;
    let workflow = Workflow::new(session, profile, Duration::from_secs(cli.poll_interval));
    workflow.run(&cli.username, password).await?;
    Ok(())
}
