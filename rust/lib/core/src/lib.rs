pub mod config;
pub mod error;
pub mod session;

pub use config::ConsoleConfig;
pub use error::ServiceError;
pub use session::Session;
