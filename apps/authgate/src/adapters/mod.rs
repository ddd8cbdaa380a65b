pub mod users_memory;

pub use users_memory::InMemoryUserStore;
