//! Rebalance spec tables.
//!
//! Three lookup tables keyed by template id, read from human-editable YAML
//! files: armor (and armored rigs), plates/accessories, ammunition. The
//! on-disk keys stay terse (`bdr`, `spr`, `proj`, ...) so the data files
//! remain quick to author; the structs carry the full names.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Armor spec {id}: class list must hold 1 or 2 tiers, found {count}")]
    ClassTiers { id: String, count: usize },

    #[error("Plate spec {id}: blunt damage reduction {bdr} exceeds 100 percent")]
    BluntReduction { id: String, bdr: u32 },
}

/// Armor entry: class tiers and base durability shared by the item's
/// soft-armor inserts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArmorSpec {
    /// 1-2 tiers: primary, then an optional tier for front-facing slots.
    pub class: Vec<u32>,
    pub durability: f64,
}

impl ArmorSpec {
    /// The primary class tier.
    pub fn primary_tier(&self) -> u32 {
        self.class.first().copied().unwrap_or(0)
    }

    /// The tier for front-facing slots: the secondary tier when the spec
    /// carries one, otherwise the primary.
    pub fn front_facing_tier(&self) -> u32 {
        self.class
            .get(1)
            .or_else(|| self.class.first())
            .copied()
            .unwrap_or(0)
    }
}

/// Plate/accessory/mask entry, written directly onto the record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlateSpec {
    pub class: u32,
    pub durability: f64,

    /// Blunt damage reduction, integer percent 0-100.
    #[serde(rename = "bdr")]
    pub blunt_reduction: u32,

    #[serde(default)]
    pub material: Option<String>,

    #[serde(default)]
    pub colliders: Option<Vec<String>>,

    /// Spall reduction percent; presence also enables spalling.
    #[serde(rename = "spr", default)]
    pub spall_reduction: Option<f64>,
}

/// Ammunition entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AmmoSpec {
    #[serde(rename = "proj")]
    pub projectile_count: u32,

    #[serde(rename = "dmg")]
    pub damage: u32,

    #[serde(rename = "pen")]
    pub penetration: u32,

    /// Heavy bleeding chance, percent.
    #[serde(rename = "hvy")]
    pub heavy_bleed: f64,

    /// Light bleeding chance, percent.
    #[serde(rename = "lite")]
    pub light_bleed: f64,

    #[serde(rename = "acc")]
    pub accuracy: i32,

    /// Fragmentation chance, percent.
    #[serde(rename = "frag")]
    pub fragmentation: f64,

    /// Added to the round's existing initial speed.
    #[serde(rename = "spd", default)]
    pub speed_bonus: Option<f64>,

    /// Tracer descriptor: `[enabled, color]`.
    #[serde(rename = "tcr", default)]
    pub tracer: Option<TracerSpec>,
}

/// Two-element tracer descriptor as written in the data files.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TracerSpec(pub bool, pub String);

/// The three spec tables bundled for one patch run.
#[derive(Debug, Clone, Default)]
pub struct SpecTables {
    pub armor: BTreeMap<String, ArmorSpec>,
    pub plates: BTreeMap<String, PlateSpec>,
    pub ammo: BTreeMap<String, AmmoSpec>,
}

impl SpecTables {
    /// Parse the three tables from YAML strings.
    pub fn from_yaml(armor: &str, plates: &str, ammo: &str) -> Result<Self, TableError> {
        let tables = SpecTables {
            armor: serde_yaml::from_str(armor)?,
            plates: serde_yaml::from_str(plates)?,
            ammo: serde_yaml::from_str(ammo)?,
        };
        tables.validate()?;
        Ok(tables)
    }

    /// Load `armor.yaml`, `plates.yaml`, and `ammo.yaml` from a directory.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self, TableError> {
        let dir = dir.as_ref();
        Self::from_yaml(
            &fs::read_to_string(dir.join("armor.yaml"))?,
            &fs::read_to_string(dir.join("plates.yaml"))?,
            &fs::read_to_string(dir.join("ammo.yaml"))?,
        )
    }

    /// Total number of entries across the three tables.
    pub fn len(&self) -> usize {
        self.armor.len() + self.plates.len() + self.ammo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A half-valid table must never reach the patch pass.
    fn validate(&self) -> Result<(), TableError> {
        for (id, spec) in &self.armor {
            if spec.class.is_empty() || spec.class.len() > 2 {
                return Err(TableError::ClassTiers {
                    id: id.clone(),
                    count: spec.class.len(),
                });
            }
        }
        for (id, spec) in &self.plates {
            if spec.blunt_reduction > 100 {
                return Err(TableError::BluntReduction {
                    id: id.clone(),
                    bdr: spec.blunt_reduction,
                });
            }
        }
        Ok(())
    }
}
