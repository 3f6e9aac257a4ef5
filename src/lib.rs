//! HMO Scout: search API over generated rental investment listings.

pub mod config;
pub mod error;
pub mod models;
pub mod refresh;
pub mod scrapers;
pub mod server;
pub mod storage;

pub use config::Config;
