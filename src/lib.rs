pub mod carousel;
pub mod chart;
pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod motivation;
pub mod ring;
pub mod scorecard;
pub mod server;
pub mod session;

pub use error::{DashboardError, Result};
