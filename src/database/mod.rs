pub mod connection;
pub mod lead_repository;

pub use connection::*;
pub use lead_repository::*;
