pub mod config;
pub mod handlers;
pub mod router;
pub mod state;
pub mod views;

pub use config::{DemoSettings, Environment, HttpSettings, ProxySettings, Settings};
pub use router::{create_demo_router, create_proxy_router};
pub use state::{DemoState, ProxyState};
