use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use docinsight::infrastructure::cloud::CloudServicesHandle;
use docinsight::infrastructure::observability::{TracingConfig, init_tracing};
use docinsight::infrastructure::persistence::InMemorySessionStore;
use docinsight::presentation::views::PageRenderer;
use docinsight::presentation::{DemoState, Environment, Settings, create_demo_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env()?;
    let settings = Settings::load(environment).context("Failed to load configuration")?;
    let port = settings.demo.port;

    init_tracing(&TracingConfig::new("docinsight-demo", environment), port);

    let max_upload_bytes = settings.demo.max_upload_bytes();
    let session_ttl = settings.demo.session_idle_timeout();
    let sessions = InMemorySessionStore::with_limits(session_ttl, settings.demo.max_sessions);
    let state = DemoState {
        cloud: Arc::new(CloudServicesHandle::new(settings.demo, settings.http)),
        sessions: Arc::new(sessions),
        renderer: Arc::new(PageRenderer::new().context("Failed to compile page template")?),
        max_upload_bytes,
        session_ttl,
    };
    let router = create_demo_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Document demo listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
