//! assign_images - points car records at their images in the media directory
//!
//! Run from the project root, where `media/` and the database live.

use assign_images::app;
use assign_images::cli::CliOptions;
use assign_images::config::Config;
use assign_images::services::init_tracing;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load configuration first, so the log format is known before tracing starts
    dotenvy::dotenv().ok();

    if let Err(err) = run().await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let options = CliOptions::from_args();
    let config = Config::from_env()?.with_cli(&options);
    init_tracing(&config.logging_config());

    tracing::info!(
        database = %config.database_url,
        media_dir = %config.media_dir().display(),
        "Configuration loaded"
    );

    app::run(&config, &mut std::io::stdout()).await?;
    Ok(())
}
