use std::sync::Arc;

use tower_http::cors::CorsLayer;

use job_onboard::config::FlowConfig;
use job_onboard::flow::controller::FlowController;
use job_onboard::flow::routes::{FlowRouteState, flow_routes};
use job_onboard::host::{Navigator, SubmissionSink, TracingNavigator, TracingSink};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = FlowConfig::from_env()?;
    let port = config.port;

    eprintln!("Job Onboard v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: http://0.0.0.0:{}/api/onboarding/status", port);
    eprintln!(
        "   Cooldown: {}ms, max preferences: {}",
        config.guard_cooldown.as_millis(),
        config.max_preference_selections
    );

    let navigator: Arc<dyn Navigator> = Arc::new(TracingNavigator);
    let sink: Arc<dyn SubmissionSink> = Arc::new(TracingSink);
    let controller = Arc::new(FlowController::new(config, navigator, sink));

    let app = flow_routes(FlowRouteState { controller }).layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
