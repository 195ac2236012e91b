mod demo_state;
mod proxy_state;

pub use demo_state::DemoState;
pub use proxy_state::ProxyState;
