pub mod file;
pub mod in_memory;

pub use file::FileModelStore;
pub use in_memory::InMemoryModelStore;
