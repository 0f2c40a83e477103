//! Check command handler

use anyhow::{bail, Context, Result};
use rebal::{Database, RebalancePatch, SpecTables};
use std::path::PathBuf;

/// Handle `rebal check`: report spec entries that would not resolve
pub fn handle(database: Option<PathBuf>, specs: Option<PathBuf>) -> Result<()> {
    let db_path = super::resolve_database(database)?;
    let specs_dir = super::resolve_specs(specs)?;

    let db = Database::load(&db_path)
        .with_context(|| format!("Failed to load database {}", db_path.display()))?;

    let tables = SpecTables::load_dir(&specs_dir)
        .with_context(|| format!("Failed to load spec tables from {}", specs_dir.display()))?;

    let patch = RebalancePatch::new(tables);
    let report = patch.check(&db);

    if report.is_clean() {
        println!(
            "All {} spec entries resolve against {}",
            patch.tables().len(),
            db_path.display()
        );
        return Ok(());
    }

    for id in &report.missing_armor {
        println!("armor: no catalog record for {}", id);
    }
    for id in &report.missing_plates {
        println!("plates: no catalog record for {}", id);
    }
    for id in &report.missing_ammo {
        println!("ammo: no catalog record for {}", id);
    }
    for (armor_id, slot_name) in &report.unresolved_slots {
        println!("armor {}: slot {} has no resolvable insert", armor_id, slot_name);
    }

    let missing =
        report.missing_armor.len() + report.missing_plates.len() + report.missing_ammo.len();
    bail!(
        "{} spec entries missing from the catalog, {} unresolved slots",
        missing,
        report.unresolved_slots.len()
    );
}
