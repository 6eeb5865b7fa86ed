pub mod analysis;
pub mod config;
pub mod errors;
pub mod extract;
pub mod routes;
pub mod state;
