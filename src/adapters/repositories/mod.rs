mod memory_connection_repository;
mod memory_state_repository;

pub use memory_connection_repository::InMemoryConnectionRepository;
pub use memory_state_repository::InMemoryStateRepository;
