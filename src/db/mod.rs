pub mod adapter;
pub mod keyed_store;
pub mod log;
pub mod memory;
pub mod migrate;
pub mod pool;
pub mod sqlite;

pub use adapter::KeyValueStore;
pub use keyed_store::KeyedStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
