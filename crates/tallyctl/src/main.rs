//! TallyStore control tool - store values and replay the recorded calls

use anyhow::{Context, Result};
use clap::Parser;
use tallycache::{Cache, STORE};
use tallydb::{BackendConfig, Value, DEFAULT_URL};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Redis connection URL
    #[arg(short, long, env = "TALLY_URL", default_value = DEFAULT_URL)]
    url: String,

    /// Use the in-process backend instead of Redis
    #[arg(short, long)]
    memory: bool,

    /// Print the replay as JSON
    #[arg(long)]
    json: bool,

    /// Values to store (integers and floats are stored as numbers)
    #[arg(default_values_t = ["foo".to_string(), "bar".to_string(), "42".to_string()])]
    values: Vec<String>,
}

impl Args {
    fn backend_config(&self) -> BackendConfig {
        if self.memory {
            BackendConfig::memory()
        } else {
            BackendConfig::redis(&self.url)
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    info!("Starting tallyctl v{}", env!("CARGO_PKG_VERSION"));

    let config = args.backend_config();
    let backend = config
        .open()
        .with_context(|| format!("could not open backend at {}", config.url))?;
    let cache = Cache::new(backend)?;

    for raw in &args.values {
        let key = cache.store(parse_value(raw))?;
        println!("{}", key);
    }

    let replay = cache.replay(STORE)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&replay)?);
    } else {
        print!("{}", replay);
    }

    Ok(())
}

/// Interpret a command-line argument the way a caller would pass it to `store`
fn parse_value(raw: &str) -> Value {
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Int(i);
    }

    // "inf" and "nan" parse as floats but are meant as words here
    if raw.bytes().any(|b| b.is_ascii_digit()) {
        if let Ok(f) = raw.parse::<f64>() {
            return Value::Float(f);
        }
    }

    Value::Text(raw.to_string())
}
