use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use mib_core::{CoreConfig, HttpDoctorRepository};

/// Main entry point for the MIB doctors directory
///
/// Fetches the doctor collection once from the Doctor Repository and serves the directory over
/// REST on port 3000 (configurable via MIB_REST_ADDR). A failed initial fetch is logged and the
/// server still starts with an empty directory.
///
/// # Environment Variables
/// - `MIB_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `MIB_DOCTORS_URL`: Doctor Repository base URL (default: "http://localhost:5000")
/// - `MIB_PAGE_SIZE`: Doctors per page (default: 8)
/// - `MIB_IMAGE_BASE`: Prefix for detail-page images (default: "/images/")
/// - `MIB_PLACEHOLDER_IMAGE`: Image used when a doctor has none (default: "/images/default.jpg")
/// - `MIB_HTTP_TIMEOUT_SECS`: Repository request timeout, 0 disables it (default: 10)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration is invalid or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mib_run=info".parse()?)
                .add_directive("mib_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("MIB_REST_ADDR")
        .unwrap_or_else(|_| mib_core::constants::DEFAULT_REST_ADDR.into());

    let cfg = Arc::new(CoreConfig::from_env_values(
        std::env::var("MIB_DOCTORS_URL").ok(),
        std::env::var("MIB_PAGE_SIZE").ok(),
        std::env::var("MIB_IMAGE_BASE").ok(),
        std::env::var("MIB_PLACEHOLDER_IMAGE").ok(),
        std::env::var("MIB_HTTP_TIMEOUT_SECS").ok(),
    )?);
    let repository = Arc::new(HttpDoctorRepository::new(&cfg)?);

    tracing::info!("++ Loading doctors from {}", cfg.doctors_url());
    let state = AppState::load(cfg, repository).await;

    tracing::info!("-- Starting MIB REST API on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, api_rest::router(state)).await?;

    Ok(())
}
