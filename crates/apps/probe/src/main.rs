use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use flow::{AttemptOutcome, FlowConfig, Locale, TokenClient, TransitionLog, VerificationFlow};
use reqwest::Client;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod headless;
mod http;

use headless::{ConsoleSurface, FixedGeolocator, HeadlessWindow, LogMap};
use http::ReqwestTokenClient;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Runs one geolocation-gated form verification against a live endpoint"
)]
struct Args {
    /// Latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Form service base URL (default: $GEOGATE_BASE_URL, then the public service)
    #[arg(long)]
    base_url: Option<String>,

    /// Message language: ar or en
    #[arg(long)]
    locale: Option<String>,

    /// Popup close poll interval in milliseconds
    #[arg(long)]
    poll_ms: Option<u32>,

    /// JSON flow configuration; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<FlowConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
            FlowConfig::from_json(&text).map_err(|e| format!("parse {path:?}: {e}"))?
        }
        None => FlowConfig::default(),
    };

    let base_url = args
        .base_url
        .clone()
        .or_else(|| env::var("GEOGATE_BASE_URL").ok());
    if let Some(base_url) = base_url {
        config.endpoints.base_url = base_url;
    }
    if let Some(tag) = &args.locale {
        config.locale = Locale::from_tag(tag);
    }
    if let Some(ms) = args.poll_ms {
        config.poll_interval_ms = ms;
    }
    Ok(config)
}

type ProbeFlow<T> = VerificationFlow<FixedGeolocator, T, LogMap, HeadlessWindow, ConsoleSurface<Stdout>>;

fn build_flow<T: TokenClient>(config: FlowConfig, args: &Args, tokens: T) -> ProbeFlow<T> {
    VerificationFlow::new(
        config,
        FixedGeolocator::new(args.lat, args.lon),
        tokens,
        LogMap::default(),
        HeadlessWindow::default(),
        ConsoleSurface::new(io::stdout()),
    )
}

/// Phases entered during `attempt`, joined as `a -> b -> c`.
fn phase_path(log: &TransitionLog, attempt: u64) -> String {
    log.path(attempt)
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    info!(endpoint = %config.endpoints.token_url(), "starting probe");

    let mut flow = build_flow(config, &args, ReqwestTokenClient::new(Client::new()));
    let outcome = flow.run_attempt().await;
    info!(
        path = %phase_path(flow.transition_log(), flow.attempts()),
        "attempt finished"
    );
    match outcome {
        AttemptOutcome::Navigated => {
            for url in &flow.window().opened {
                println!("form: {url}");
            }
            if let Some(dest) = &flow.window().navigated {
                println!("navigate: {dest}");
            }
            Ok(ExitCode::SUCCESS)
        }
        outcome => {
            warn!(?outcome, "verification did not complete");
            Ok(ExitCode::FAILURE)
        }
    }
}
