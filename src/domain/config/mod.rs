pub mod app;
pub mod spotify;
