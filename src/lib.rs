pub mod charts;
pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod pipelines;
pub mod store;
pub mod ui;
pub mod version;

pub use error::{Result, UtilityError};
