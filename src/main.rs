use logoflow::{logger, LogoflowClient, ServerConfig};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    logger::init()?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let config = ServerConfig::from_env();
    logger::log_startup_info("Logoflow", env!("CARGO_PKG_VERSION"), &config);
    logger::log_config_info(&config);

    if !config.credentials.is_ready() {
        log::warn!("⚠️  /api endpoints will fail until GOOGLE_API_KEY and HF_API_TOKEN are set; the form pages take keys per session");
    }

    let client = LogoflowClient::from_config(&config.services)?;
    logoflow::server::run(config, client).await?;

    Ok(())
}
