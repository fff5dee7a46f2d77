pub mod auth_dto;
pub mod connection_dto;
pub mod playlist_dto;
pub mod transfer_dto;
