//! Domain types and collaborators for the stocktake application.
//!
//! This crate carries everything the UI treats as external: the count
//! domain model, the async [`CountStore`] provider with its in-memory
//! implementation, the async resource cells the pages poll, the scan
//! producer contract, and spreadsheet export.

pub mod export;
pub mod model;
pub mod resource;
pub mod scan;
pub mod store;
pub mod wakeup;

pub use export::{export_csv, export_json, ExportError, ExportHeader};
pub use model::{CountSession, CountStatus, CountedItem, Product, Unit, Warehouse};
pub use resource::{Resource, ResourceError, ResourceState};
pub use scan::{ScanProducer, ScriptedScanner};
pub use store::{CountStore, MemoryStore, StoreError};
pub use wakeup::{wakeup_channel, WakeupReceiver, WakeupSender};
