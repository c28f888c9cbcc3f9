mod config;
mod session;

pub use config::{ConfigError, ConfigResult, EditorConfig};
pub use session::EditorSession;
