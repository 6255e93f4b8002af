//! Domain module - session records and the grouped catalog
//!
//! Plain data types with no I/O. Everything that touches HTML, the network
//! or the filesystem lives in `infrastructure`.

pub mod catalog;
pub mod session;

pub use catalog::{Catalog, CategoryMap, ConferenceMap, MediaTypeMap, UnlinkedBucket};
pub use session::{SessionRecord, Speaker};
