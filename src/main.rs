use anyhow::Result;
use clap::Parser;
use idea_validator::api::ApiClient;
use idea_validator::app::run_tui;
use idea_validator::config::Config;
use idea_validator::session::SessionStore;

#[derive(Parser, Debug)]
#[command(
    name = "idea-validator",
    about = "Pitch a startup idea to a panel of AI critics",
    version
)]
struct Args {
    /// Backend base URL (overrides VALIDATOR_API_URL and the config file)
    #[arg(long)]
    api_url: Option<String>,

    /// Probe backend health and exit (no TUI)
    #[arg(short, long)]
    check: bool,

    /// Discard any saved session and start with a blank form
    #[arg(long)]
    fresh: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load();
    let base = config.resolve_api_url(args.api_url.as_deref())?;
    let client = ApiClient::new(base.clone())?;

    // Check mode: one health probe, human-readable verdict, exit code
    // for scripts.
    if args.check {
        let healthy = client.check_health().await;
        if healthy {
            println!("ok: backend at {} is healthy", base);
            return Ok(());
        }
        println!("unreachable: backend at {} did not answer healthily", base);
        std::process::exit(1);
    }

    if args.fresh {
        if let Some(store) = SessionStore::open_default() {
            store.clear();
        }
    }

    let restore = config.restore_session && !args.fresh;
    run_tui(client, config, restore).await
}
