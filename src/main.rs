use eyegen::{EyeDanceProvider, GenerationRequest, UpstreamConfig};
use std::fs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file first
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    eyegen::logger::init_with_config(
        eyegen::logger::LoggerConfig::development().with_level(eyegen::logger::LogLevel::Debug),
    )?;

    let config = UpstreamConfig::from_env();
    log::info!("⚙️  Upstream endpoint: {}", config.base_url());
    log::info!(
        "⚙️  Retry policy: {} attempts, {}s delay",
        config.max_retries(),
        config.retry_delay().as_secs()
    );

    log::info!("🔄 Creating eyedance provider...");
    let provider = EyeDanceProvider::new(config)?;

    log::info!("🖼️  Available image generation models:");
    for card in provider.list_models().data {
        log::info!("  {} (owned by {})", card.id, card.owned_by);
    }

    let request = GenerationRequest::new(
        "A serene landscape with mountains and a lake at sunset, digital art style",
    )
    .with_size("800x600")
    .with_count(2);

    log::info!("🧪 Requesting a batch of {} image(s)...", request.n);

    match provider.generate_images(request).await {
        Ok(result) => {
            log::info!("✅ Batch generation successful! {} image(s)", result.data.len());

            for (index, image) in result.data.iter().enumerate() {
                let filename = format!("generated_image_{}_{}.png", result.created, index);

                match base64::decode(&image.b64_json) {
                    Ok(image_bytes) => match fs::write(&filename, image_bytes) {
                        Ok(_) => log::info!("💾 Image saved to: {}", filename),
                        Err(e) => log::error!("❌ Failed to save image: {}", e),
                    },
                    Err(e) => log::error!("❌ Failed to decode base64 image: {}", e),
                }
            }
        }
        Err(e) => {
            log::error!("❌ Batch generation failed: {}", e);
            log::warn!("💡 The upstream service may be rate limiting or unavailable right now");
        }
    }

    log::info!("🎉 Done!");
    Ok(())
}
