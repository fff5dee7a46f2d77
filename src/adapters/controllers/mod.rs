pub mod auth_controller;
pub mod connection_controller;
pub mod health_controller;
pub mod provider_controller;
pub mod transfer_controller;
