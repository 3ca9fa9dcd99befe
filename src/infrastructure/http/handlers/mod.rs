//! HTTP Handlers

mod ping;
mod stress;
mod synthesize;
mod voices;

pub use ping::ping;
pub use stress::resolve_stress;
pub use synthesize::synthesize;
pub use voices::list_voices;
