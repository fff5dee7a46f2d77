pub mod connection;
pub mod playlist;
pub mod state_token;
