//! # rebal
//!
//! Item catalog rebalance library.
//!
//! This library provides functionality to:
//! - Parse a game item database dump into a typed catalog
//! - Load armor, plate, and ammunition rebalance tables from YAML
//! - Apply the rebalance pass: slot-level soft-armor patching, direct plate
//!   and ammunition overrides, and armor-material scaling
//! - Manage hash-tracked backups of the database file
//!
//! ## Example
//!
//! ```no_run
//! use rebal::{Database, RebalancePatch, SpecTables};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut db = Database::load("database.json")?;
//! let tables = SpecTables::load_dir("db")?;
//!
//! let stats = RebalancePatch::new(tables).apply(&mut db);
//! println!("patched {} ammo records", stats.ammo_patched);
//!
//! db.save("database.json")?;
//! # Ok(())
//! # }
//! ```

pub mod backup;
pub mod catalog;
pub mod patch;
pub mod tables;

// Re-export commonly used items
#[doc(inline)]
pub use backup::{hash_file, BackupError, BackupState, DbBackup};
#[doc(inline)]
pub use catalog::{ArmorMaterial, Database, DatabaseError, ItemProps, ItemRecord, Slot};
#[doc(inline)]
pub use patch::{CheckReport, PatchStats, RebalancePatch};
#[doc(inline)]
pub use tables::{AmmoSpec, ArmorSpec, PlateSpec, SpecTables, TableError, TracerSpec};
