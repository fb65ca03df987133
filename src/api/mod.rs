pub mod auth;
pub mod error;
pub mod extract;
pub mod payloads;
pub mod server;
pub mod users;
