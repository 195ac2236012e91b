use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use reqwest::Client;
use tokio::net::TcpListener;

use docinsight::infrastructure::observability::{TracingConfig, init_tracing};
use docinsight::infrastructure::proxy::{AzureProxyClient, ProxyTargets};
use docinsight::presentation::{Environment, ProxyState, Settings, create_proxy_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env()?;
    let settings = Settings::load(environment).context("Failed to load configuration")?;
    let port = settings.proxy.port;

    init_tracing(&TracingConfig::new("docinsight-proxy", environment), port);

    let client = Client::builder()
        .timeout(settings.http.timeout())
        .build()
        .context("Failed to build HTTP client")?;

    let targets = ProxyTargets {
        completion_endpoint: settings.proxy.completion_endpoint,
        completion_key: settings.proxy.completion_key,
        cognitive_endpoint: settings.proxy.cognitive_endpoint,
        cognitive_key: settings.proxy.cognitive_key,
        max_tokens: settings.proxy.max_tokens,
    };

    if targets.completion_endpoint.is_empty() || targets.cognitive_endpoint.is_empty() {
        tracing::warn!("Proxy endpoints are not fully configured; affected routes will return 500");
    }

    let state = ProxyState {
        proxy: Arc::new(AzureProxyClient::new(client, targets)),
    };
    let router = create_proxy_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Proxy listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
