pub mod provider;
pub mod transfer_service;

pub use provider::Provider;
pub use transfer_service::{TransferError, TransferService, TransferSummary};
