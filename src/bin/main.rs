use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "moviehub-server")]
#[command(about = "Movie discovery web app backed by TMDB and an OpenAI compatible chat API", long_about = None)]
struct Args {
    /// Optional YAML config file. API keys always come from TMDB_API_KEY and OPENAI_API_KEY.
    #[arg(short, long)]
    config: Option<String>,

    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let default_filter = if args.debug {
        "moviehub_rs=debug,tower_http=debug"
    } else {
        "moviehub_rs=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = moviehub_rs::run(args.config.as_deref(), args.debug).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
