mod azure_proxy_client;

pub use azure_proxy_client::{AzureProxyClient, COMPLETIONS_PATH, ProxyTargets, SENTIMENT_PATH};
