use structopt::StructOpt;
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod client;
mod lookup;
mod report;

#[derive(Error, Debug)]
pub enum Error {
    #[error("user '{0}' not found")]
    NotFound(String),
    #[error("HTTP error {0}")]
    Http(u16),
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("cannot write '{}': {source}", .path.display())]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, StructOpt)]
#[structopt(about = "Shows public Roblox account info for a username.")]
struct Opt {
    /// Username to look up
    #[structopt(parse(try_from_str = parse_username))]
    username: String,
    /// Print the machine-readable line only
    #[structopt(short, long)]
    silent: bool,
    /// Also save the result to <username>.<format>
    #[structopt(short, long, possible_values = &["json", "csv"])]
    output: Option<report::OutputFormat>,
}

fn parse_username(raw: &str) -> std::result::Result<String, String> {
    let username = raw.trim();
    if username.is_empty() {
        return Err("username must not be empty".to_string());
    }
    Ok(username.to_string())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "rbxwho=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let opt = Opt::from_args();
    if let Err(e) = run(&opt).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn run(opt: &Opt) -> Result<()> {
    let api = client::ApiClient::new(client::ApiConfig::default())?;
    let report = lookup::AccountReport::get(&api, &opt.username).await?;

    if opt.silent {
        println!("{}", report.machine_line()?);
    } else {
        print!("{}", report);
    }

    if let Some(format) = opt.output {
        let path = report::write(&report, &opt.username, format)?;
        println!("Saved output to {}", path.display());
    }

    Ok(())
}
