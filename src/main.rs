use anyhow::Result;
use skycast::{AppConfig, Pipeline};

#[tokio::main]
async fn main() -> Result<()> {
    skycast::init_tracing();

    // A missing configuration value is reported and treated as a normal
    // exit; everything else propagates and fails the process.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("{}", e.user_message());
            return Ok(());
        }
    };

    let pipeline = Pipeline::new(&config)?;

    let location = pipeline.detect_location().await?;
    println!("IP detected... {}", location.ip);

    println!("Fetching weather data and analyzing...");
    let summary = pipeline.summarize(&location).await?;

    println!("{summary}");
    Ok(())
}
