pub mod manager;
pub mod memory;
pub mod record;
pub mod repository;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryProductStore;
pub use record::{LabelEntry, NewProduct, ProductPatch, RecordError, StoredProduct};
pub use repository::ProductRepository;
pub use store::{ProductStore, UpdateOutcome};
