use kozybeat::{config::Config, init, logging, run};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();

    let config = Config::new()?;
    logging::init(config.log_level)?;

    let client = init(&config).await?;
    run(client).await?;

    Ok(())
}
