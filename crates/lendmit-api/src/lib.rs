// lendmit-api: Async Rust client for the LendMIT concept API

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod following;
pub mod models;
pub mod resources;
pub mod transport;

pub use client::ApiClient;
pub use endpoints::Endpoints;
pub use error::Error;
pub use models::CreateProfile;
pub use transport::TransportConfig;
