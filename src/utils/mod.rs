pub mod error;
pub mod logger;
pub mod monitor;
pub mod summary;
pub mod validation;
