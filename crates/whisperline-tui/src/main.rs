//! Whisperline TUI entry point.

use clap::Parser;
use whisperline_tui::Runtime;

/// Whisperline terminal client
#[derive(Parser, Debug)]
#[command(name = "whisperline")]
#[command(about = "Terminal client for the Whisperline word game")]
#[command(version)]
struct Args {
    /// Server address to connect to
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    server: String,

    /// Log file path (stdout belongs to the TUI)
    #[arg(long, default_value = "whisperline.log")]
    log_file: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log = std::fs::File::create(&args.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log))
        .with_ansi(false)
        .init();

    let runtime = Runtime::new(args.server)?;
    Ok(runtime.run().await?)
}
