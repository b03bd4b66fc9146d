pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::{AppConfig, Credentials};
pub use error::{Result, WaypointError};
pub use types::*;
