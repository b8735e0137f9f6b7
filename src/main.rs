use clap::Parser;
use fire_age::api::App;

#[tokio::main]
async fn main() {
    // stdout carries command output; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fire_age=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let app = App::parse();
    if let Err(e) = fire_age::api::run(app).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
