pub mod api_types;
pub mod checks;
pub mod client;
pub mod config;
pub mod distribution;
pub mod error;
pub mod images;
pub mod query;
pub mod sol_date;
pub mod transport;

pub use client::RoverClient;
pub use error::{RoverError, RoverResult};
pub use query::PhotoQuery;
