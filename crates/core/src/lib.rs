pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod logging;
pub mod lookup;
pub mod scope;
pub mod watcher;

pub use config::Config;
pub use engine::{Definition, Engine};
pub use error::{DjsetError, Result};
pub use scope::{ProjectScope, ScopeId};
pub use watcher::ChangeSignal;
