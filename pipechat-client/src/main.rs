use anyhow::Result;
use clap::Parser;
use pipechat_protocol::{ProtocolConfig, DEFAULT_DELIMITER};

mod app;
mod render;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Nickname to log on with right away
    #[arg(short, long)]
    name: Option<String>,

    /// Remote server to connect to
    #[arg(short, long, default_value = "localhost:3000")]
    addr: String,

    /// Field delimiter used by the server
    #[arg(short, long, default_value_t = DEFAULT_DELIMITER)]
    delimiter: char,
}

// Logs go to stderr so they don't interleave with chat output on stdout
fn init_logging() {
    use tracing::Level;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(Level::WARN.into()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let config = ProtocolConfig::new(args.delimiter)?;
    app::run(args.addr, args.name, config).await?;
    Ok(())
}
