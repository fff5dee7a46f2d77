pub mod connection_repository;
pub mod state_repository;
