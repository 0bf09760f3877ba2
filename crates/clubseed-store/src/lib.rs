//! Document store adapters and the wipe-then-insert dataset writer.

pub mod adapter;
pub mod connect;
pub mod errors;
pub mod json_dir;
pub mod memory;
pub mod mongo;
pub mod postgres;
pub mod writer;

pub use adapter::DocumentStore;
pub use connect::{StoreTarget, open_store};
pub use errors::{StoreError, StoreResult};
pub use json_dir::JsonDirStore;
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use postgres::PostgresStore;
pub use writer::{CollectionWrite, WriteReport, to_documents, write_dataset};
