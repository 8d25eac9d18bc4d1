use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use wolframalpha::{config::APP_ID_ENV, Client, ClientConfig, QueryResult, Result};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Query text
    #[arg(required = true)]
    input: Vec<String>,

    /// Wolfram|Alpha app id (defaults to $WOLFRAMALPHA_APP_ID)
    #[arg(long)]
    app_id: Option<String>,

    /// Print every pod instead of only the primary results
    #[arg(short, long)]
    all: bool,

    /// Extra query parameter as key=value (repeatable)
    #[arg(short, long = "param", value_parser = parse_param)]
    params: Vec<(String, String)>,
}

fn parse_param(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run(Args::parse()).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config = match args.app_id {
        Some(app_id) => ClientConfig::from_lookup(|name| match name {
            APP_ID_ENV => Some(app_id.clone()),
            _ => std::env::var(name).ok(),
        })?,
        None => ClientConfig::from_env()?,
    };
    let client = Client::from_config(config)?;
    let input = args.input.join(" ");
    let params: Vec<(&str, &str)> = args
        .params
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();

    info!("Querying: {}", input);
    let result = client.query(&input, &params, &[]).await?;
    print_pods(&result, args.all)
}

fn print_pods(result: &QueryResult, all: bool) -> Result<()> {
    let pods = if all { result.pods() } else { result.results()? };
    if pods.is_empty() {
        info!("No results");
        return Ok(());
    }

    for pod in pods {
        let title = pod.title()?;
        for text in pod.texts()? {
            println!("{title}: {text}");
        }
    }
    Ok(())
}
