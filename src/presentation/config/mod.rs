mod environment;
mod settings;

pub use environment::{Environment, UnknownEnvironment};
pub use settings::{DemoSettings, HttpSettings, ProxySettings, ServerSettings, Settings};
