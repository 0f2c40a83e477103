//! Host database model.
//!
//! Typed view of a game database dump: the item catalog keyed by template
//! id, plus the global armor-material resistance table. Field names mirror
//! the dump's JSON keys; unknown keys are rejected at parse time so schema
//! drift surfaces as a load error instead of silently dropped data.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse database JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A loaded item database with query/modify access to records and globals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Database {
    /// Item records keyed by template id.
    pub items: BTreeMap<String, ItemRecord>,

    /// Global configuration tables.
    #[serde(default)]
    pub globals: Globals,
}

impl Database {
    /// Parse a database from a JSON dump.
    pub fn from_json(data: &str) -> Result<Self, DatabaseError> {
        Ok(serde_json::from_str(data)?)
    }

    /// Read and parse a database file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Serialize the database back to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, DatabaseError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the database to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), DatabaseError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Get a record by template id.
    pub fn item(&self, id: &str) -> Option<&ItemRecord> {
        self.items.get(id)
    }

    /// Get a mutable record by template id.
    pub fn item_mut(&mut self, id: &str) -> Option<&mut ItemRecord> {
        self.items.get_mut(id)
    }

    /// Iterate over all records.
    pub fn iter_items(&self) -> impl Iterator<Item = (&String, &ItemRecord)> {
        self.items.iter()
    }

    /// The global armor-material resistance table.
    pub fn armor_materials(&self) -> &BTreeMap<String, ArmorMaterial> {
        &self.globals.config.armor_materials
    }

    /// Mutable access to the global armor-material resistance table.
    pub fn armor_materials_mut(&mut self) -> &mut BTreeMap<String, ArmorMaterial> {
        &mut self.globals.config.armor_materials
    }
}

/// Global configuration wrapper, matching the dump's `globals.config` nesting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Globals {
    #[serde(default)]
    pub config: GlobalConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalConfig {
    /// Material name -> resistance parameters.
    #[serde(rename = "ArmorMaterials", default)]
    pub armor_materials: BTreeMap<String, ArmorMaterial>,
}

/// Numeric resistance parameters for one armor material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArmorMaterial {
    #[serde(rename = "Destructibility")]
    pub destructibility: f64,

    #[serde(rename = "ExplosionDestructibility")]
    pub explosion_destructibility: f64,

    #[serde(rename = "MinRepairDegradation")]
    pub min_repair_degradation: f64,

    #[serde(rename = "MaxRepairDegradation")]
    pub max_repair_degradation: f64,

    #[serde(rename = "MinRepairKitDegradation")]
    pub min_repair_kit_degradation: f64,

    #[serde(rename = "MaxRepairKitDegradation")]
    pub max_repair_kit_degradation: f64,
}

impl ArmorMaterial {
    /// Multiply every parameter by `factor`, in place.
    pub fn scale(&mut self, factor: f64) {
        self.destructibility *= factor;
        self.explosion_destructibility *= factor;
        self.min_repair_degradation *= factor;
        self.max_repair_degradation *= factor;
        self.min_repair_kit_degradation *= factor;
        self.max_repair_kit_degradation *= factor;
    }
}

/// One item record from the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemRecord {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "_name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "_props", default)]
    pub props: ItemProps,
}

/// Item properties. Every field is optional: a record only carries the
/// fields its category uses (armor fields on armor, ballistics on ammo).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemProps {
    // Armor
    #[serde(rename = "Durability", default, skip_serializing_if = "Option::is_none")]
    pub durability: Option<f64>,

    #[serde(rename = "MaxDurability", default, skip_serializing_if = "Option::is_none")]
    pub max_durability: Option<f64>,

    #[serde(rename = "armorClass", default, skip_serializing_if = "Option::is_none")]
    pub armor_class: Option<u32>,

    /// Fraction of blunt trauma passed through on a stopped hit.
    #[serde(rename = "BluntThroughput", default, skip_serializing_if = "Option::is_none")]
    pub blunt_throughput: Option<f64>,

    #[serde(rename = "ArmorMaterial", default, skip_serializing_if = "Option::is_none")]
    pub armor_material: Option<String>,

    #[serde(rename = "armorColliders", default, skip_serializing_if = "Option::is_none")]
    pub armor_colliders: Option<Vec<String>>,

    #[serde(rename = "CanSpall", default, skip_serializing_if = "Option::is_none")]
    pub can_spall: Option<bool>,

    #[serde(rename = "SpallReduction", default, skip_serializing_if = "Option::is_none")]
    pub spall_reduction: Option<f64>,

    /// Equipment slots; each may reference a plate/soft-insert record.
    #[serde(rename = "Slots", default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<Vec<Slot>>,

    // Ammunition
    #[serde(rename = "ProjectileCount", default, skip_serializing_if = "Option::is_none")]
    pub projectile_count: Option<u32>,

    #[serde(rename = "Damage", default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<u32>,

    #[serde(rename = "PenetrationPower", default, skip_serializing_if = "Option::is_none")]
    pub penetration_power: Option<u32>,

    #[serde(rename = "HeavyBleedingDelta", default, skip_serializing_if = "Option::is_none")]
    pub heavy_bleeding_delta: Option<f64>,

    #[serde(rename = "LightBleedingDelta", default, skip_serializing_if = "Option::is_none")]
    pub light_bleeding_delta: Option<f64>,

    #[serde(rename = "ammoAccr", default, skip_serializing_if = "Option::is_none")]
    pub ammo_accuracy: Option<i32>,

    #[serde(rename = "FragmentationChance", default, skip_serializing_if = "Option::is_none")]
    pub fragmentation_chance: Option<f64>,

    #[serde(rename = "DurabilityBurnModificator", default, skip_serializing_if = "Option::is_none")]
    pub durability_burn: Option<f64>,

    #[serde(rename = "HeatFactor", default, skip_serializing_if = "Option::is_none")]
    pub heat_factor: Option<f64>,

    #[serde(rename = "InitialSpeed", default, skip_serializing_if = "Option::is_none")]
    pub initial_speed: Option<f64>,

    #[serde(rename = "Tracer", default, skip_serializing_if = "Option::is_none")]
    pub tracer: Option<bool>,

    #[serde(rename = "TracerColor", default, skip_serializing_if = "Option::is_none")]
    pub tracer_color: Option<String>,
}

/// One equipment slot on an armor item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Slot {
    #[serde(rename = "_name")]
    pub name: String,

    #[serde(rename = "_props", default)]
    pub props: SlotProps,
}

impl Slot {
    /// The plate/soft-insert record id referenced by the slot's first
    /// filter, if any.
    pub fn plate_id(&self) -> Option<&str> {
        self.props.filters.first().and_then(|f| f.plate.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotProps {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<SlotFilter>,
}

/// A slot filter: the default plate occupying the slot plus the set of
/// compatible template ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotFilter {
    #[serde(rename = "Plate", default, skip_serializing_if = "Option::is_none")]
    pub plate: Option<String>,

    #[serde(rename = "Filter", default, skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<String>,
}
