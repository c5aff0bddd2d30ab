pub mod credential;
pub mod item;
pub mod memory;

pub use credential::PostgresCredentialStore;
pub use item::PostgresItemRepository;
pub use memory::InMemoryCredentialStore;
pub use memory::InMemoryItemRepository;
