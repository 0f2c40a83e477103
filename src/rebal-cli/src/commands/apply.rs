//! Apply command handler

use anyhow::{Context, Result};
use rebal::{Database, DbBackup, RebalancePatch, SpecTables};
use std::path::PathBuf;
use tracing::info;

/// Handle `rebal apply`: load database + tables, run pass, write output
pub fn handle(
    database: Option<PathBuf>,
    specs: Option<PathBuf>,
    output: Option<PathBuf>,
    dry_run: bool,
    backup: bool,
) -> Result<()> {
    let db_path = super::resolve_database(database)?;
    let specs_dir = super::resolve_specs(specs)?;

    let mut db = Database::load(&db_path)
        .with_context(|| format!("Failed to load database {}", db_path.display()))?;

    let tables = SpecTables::load_dir(&specs_dir)
        .with_context(|| format!("Failed to load spec tables from {}", specs_dir.display()))?;
    info!(entries = tables.len(), "loaded spec tables");

    let stats = RebalancePatch::new(tables).apply(&mut db);
    info!(
        armor = stats.armor_patched,
        soft_inserts = stats.soft_inserts_patched,
        plates = stats.plates_patched,
        ammo = stats.ammo_patched,
        materials = stats.materials_scaled,
        skipped = stats.skipped_ids,
        "rebalance pass finished"
    );

    if dry_run {
        info!("dry run, nothing written");
        return Ok(());
    }

    let out_path = output.unwrap_or_else(|| db_path.clone());

    // Backups apply only when overwriting in place.
    let guard = (backup && out_path == db_path).then(|| DbBackup::for_database(&db_path));
    if let Some(guard) = &guard {
        if guard.ensure().context("Failed to manage backup")? {
            info!(path = %guard.backup_path().display(), "database backed up");
        }
    }

    db.save(&out_path)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;

    if let Some(guard) = &guard {
        guard
            .record_patched()
            .context("Failed to update backup metadata")?;
    }

    info!("database patched successfully");
    Ok(())
}
