pub mod collector;
pub mod config;
pub mod infer;
pub mod prompts;
pub mod relay;
pub mod service;
pub mod transport;

pub use config::Config;
pub use infer::{ChatProvider, HttpProvider};
pub use relay::{RecipeRequest, Relay};
pub use service::RecipeResponse;

/// Builds a relay that talks to the configured provider over HTTP.
pub fn relay_from_config(config: &Config) -> Relay<HttpProvider> {
    Relay::new(
        HttpProvider::new(config.provider.clone()),
        config.completion.clone(),
    )
}
