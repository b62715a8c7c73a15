use anyhow::Result;
use skycast::{AppConfig, Pipeline};

const PORT: u16 = 3000;

#[tokio::main]
async fn main() -> Result<()> {
    skycast::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("{}", e.user_message());
            return Ok(());
        }
    };

    let pipeline = Pipeline::new(&config)?;
    skycast::web::run(pipeline, PORT).await;
    Ok(())
}
