pub mod assistant;
pub mod config;
pub mod endpoints;
pub mod import;
pub mod models;
pub mod seed;
pub mod store;
pub mod utils;

pub use config::Config;
pub use endpoints::server::DashboardServer;
