//! The rebalance pass.
//!
//! Applies the three spec tables to their catalog records, then scales the
//! global armor-material table. Spec entries whose id is absent from the
//! catalog are skipped silently; the pass never creates or removes records,
//! it only rewrites fields.
//!
//! The pass is **not idempotent**: ammunition wear multipliers and the
//! material scaling compound on every run. [`RebalancePatch::apply`]
//! consumes the patch so a second run requires deliberately rebuilding it.

use serde::Serialize;

use crate::catalog::{Database, ItemProps};
use crate::tables::{AmmoSpec, ArmorSpec, PlateSpec, SpecTables};

/// Blunt throughput written onto every patched soft insert.
const SOFT_INSERT_BLUNT_THROUGHPUT: f64 = 0.05;

/// Wear multiplier for ammunition durability burn and heat.
const AMMO_WEAR_FACTOR: f64 = 3.0;

/// Scale factor applied to every armor-material parameter.
const MATERIAL_WEAR_FACTOR: f64 = 3.0;

/// Per-slot rule: which tier the insert receives and how much of the base
/// durability it keeps.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SlotRule {
    /// Front-facing slots take the secondary tier when the spec has one;
    /// every other rule row always takes the primary tier.
    front_facing: bool,
    multiplier: f64,
}

/// Look up the rule for a slot name, case-insensitively. Slots without a
/// rule are left alone.
fn slot_rule(name: &str) -> Option<SlotRule> {
    let rule = match name.to_ascii_lowercase().as_str() {
        "soft_armor_front" | "soft_armor_back" | "helmet_top" | "helmet_back" => SlotRule {
            front_facing: true,
            multiplier: 1.0,
        },
        "soft_armor_left" | "soft_armor_right" | "helmet_eyes" => SlotRule {
            front_facing: false,
            multiplier: 0.5,
        },
        "collar" => SlotRule {
            front_facing: false,
            multiplier: 0.35,
        },
        "shoulder_l" | "shoulder_r" => SlotRule {
            front_facing: false,
            multiplier: 0.6,
        },
        "groin" | "groin_back" => SlotRule {
            front_facing: false,
            multiplier: 0.4,
        },
        "helmet_jaw" | "helmet_ears" => SlotRule {
            front_facing: false,
            multiplier: 0.8,
        },
        _ => return None,
    };
    Some(rule)
}

fn set_soft_insert(insert: &mut ItemProps, class: u32, durability: f64, multiplier: f64) {
    let durability = durability * multiplier;
    insert.durability = Some(durability);
    insert.max_durability = Some(durability);
    insert.armor_class = Some(class);
    insert.blunt_throughput = Some(SOFT_INSERT_BLUNT_THROUGHPUT);
}

/// Patch the soft inserts reachable through one armor item's slots.
///
/// The parent record's own class/durability fields are never written; only
/// the sub-records resolved through slot filters change. Slots whose plate
/// reference does not resolve are skipped individually.
fn patch_armor(db: &mut Database, id: &str, spec: &ArmorSpec, stats: &mut PatchStats) {
    let Some(item) = db.item(id) else {
        stats.skipped_ids += 1;
        return;
    };

    // Tier selection happens once per armor item, before the slot loop.
    let front_tier = spec.front_facing_tier();
    let primary_tier = spec.primary_tier();

    // The parent and its inserts live in the same map; collect the slot
    // work before taking mutable borrows.
    let inserts: Vec<(String, SlotRule)> = item
        .props
        .slots
        .iter()
        .flatten()
        .filter_map(|slot| {
            let rule = slot_rule(&slot.name)?;
            let plate_id = slot.plate_id()?;
            Some((plate_id.to_string(), rule))
        })
        .collect();

    for (plate_id, rule) in inserts {
        let Some(insert) = db.item_mut(&plate_id) else {
            continue;
        };

        let class = if rule.front_facing {
            front_tier
        } else {
            primary_tier
        };
        set_soft_insert(&mut insert.props, class, spec.durability, rule.multiplier);
        stats.soft_inserts_patched += 1;
    }

    stats.armor_patched += 1;
}

/// Patch a plate, mask, or accessory record in place.
fn patch_plate(db: &mut Database, id: &str, spec: &PlateSpec, stats: &mut PatchStats) {
    let Some(item) = db.item_mut(id) else {
        stats.skipped_ids += 1;
        return;
    };
    let props = &mut item.props;

    props.armor_class = Some(spec.class);
    props.durability = Some(spec.durability);
    props.max_durability = Some(spec.durability);
    props.blunt_throughput = Some(f64::from(100 - spec.blunt_reduction) / 100.0);

    if let Some(material) = &spec.material {
        props.armor_material = Some(material.clone());
    }
    if let Some(colliders) = &spec.colliders {
        props.armor_colliders = Some(colliders.clone());
    }
    // No spr in the spec leaves the existing spall configuration alone.
    if let Some(spr) = spec.spall_reduction {
        props.can_spall = Some(true);
        props.spall_reduction = Some(spr / 100.0);
    }

    stats.plates_patched += 1;
}

/// Patch an ammunition record in place.
fn patch_ammo(db: &mut Database, id: &str, spec: &AmmoSpec, stats: &mut PatchStats) {
    let Some(item) = db.item_mut(id) else {
        stats.skipped_ids += 1;
        return;
    };
    let props = &mut item.props;

    props.projectile_count = Some(spec.projectile_count);
    props.damage = Some(spec.damage);
    props.penetration_power = Some(spec.penetration);
    props.heavy_bleeding_delta = Some(spec.heavy_bleed / 100.0);
    props.light_bleeding_delta = Some(spec.light_bleed / 100.0);
    props.ammo_accuracy = Some(spec.accuracy);
    props.fragmentation_chance = Some(spec.fragmentation / 100.0);

    // Wear factors compound on the record's current values.
    if let Some(burn) = props.durability_burn.as_mut() {
        *burn *= AMMO_WEAR_FACTOR;
    }
    if let Some(heat) = props.heat_factor.as_mut() {
        *heat *= AMMO_WEAR_FACTOR;
    }

    if let Some(bonus) = spec.speed_bonus {
        if let Some(speed) = props.initial_speed.as_mut() {
            *speed += bonus;
        }
    }
    if let Some(tracer) = &spec.tracer {
        props.tracer = Some(tracer.0);
        props.tracer_color = Some(tracer.1.clone());
    }

    stats.ammo_patched += 1;
}

/// Counters reported after a patch run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatchStats {
    pub armor_patched: usize,
    pub soft_inserts_patched: usize,
    pub plates_patched: usize,
    pub ammo_patched: usize,
    pub materials_scaled: usize,

    /// Spec entries whose id was absent from the catalog.
    pub skipped_ids: usize,
}

/// Findings from a non-mutating consistency check of the tables against a
/// database.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckReport {
    /// Spec ids with no catalog record, per table.
    pub missing_armor: Vec<String>,
    pub missing_plates: Vec<String>,
    pub missing_ammo: Vec<String>,

    /// `(armor id, slot name)` pairs whose plate reference does not resolve
    /// to a record.
    pub unresolved_slots: Vec<(String, String)>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.missing_armor.is_empty()
            && self.missing_plates.is_empty()
            && self.missing_ammo.is_empty()
            && self.unresolved_slots.is_empty()
    }
}

/// A loaded set of spec tables ready to apply to a database.
pub struct RebalancePatch {
    tables: SpecTables,
}

impl RebalancePatch {
    pub fn new(tables: SpecTables) -> Self {
        RebalancePatch { tables }
    }

    pub fn tables(&self) -> &SpecTables {
        &self.tables
    }

    /// Run the full pass: armor, plates, ammo, then the material table.
    ///
    /// Consumes the patch. Repeating the pass on the same database compounds
    /// the ammunition wear factors and the material scaling, so a host must
    /// apply a given patch exactly once per database lifetime.
    pub fn apply(self, db: &mut Database) -> PatchStats {
        let mut stats = PatchStats::default();

        for (id, spec) in &self.tables.armor {
            patch_armor(db, id, spec, &mut stats);
        }
        for (id, spec) in &self.tables.plates {
            patch_plate(db, id, spec, &mut stats);
        }
        for (id, spec) in &self.tables.ammo {
            patch_ammo(db, id, spec, &mut stats);
        }

        for material in db.armor_materials_mut().values_mut() {
            material.scale(MATERIAL_WEAR_FACTOR);
            stats.materials_scaled += 1;
        }

        stats
    }

    /// Check the tables against a database without mutating it.
    ///
    /// Reports the ids the pass would skip and the armor slots whose plate
    /// reference would not resolve.
    pub fn check(&self, db: &Database) -> CheckReport {
        let mut report = CheckReport::default();

        for id in self.tables.armor.keys() {
            let Some(item) = db.item(id) else {
                report.missing_armor.push(id.clone());
                continue;
            };
            for slot in item.props.slots.iter().flatten() {
                if slot_rule(&slot.name).is_none() {
                    continue;
                }
                let resolved = slot.plate_id().is_some_and(|pid| db.item(pid).is_some());
                if !resolved {
                    report
                        .unresolved_slots
                        .push((id.clone(), slot.name.clone()));
                }
            }
        }
        for id in self.tables.plates.keys() {
            if db.item(id).is_none() {
                report.missing_plates.push(id.clone());
            }
        }
        for id in self.tables.ammo.keys() {
            if db.item(id).is_none() {
                report.missing_ammo.push(id.clone());
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ItemRecord, Slot, SlotFilter, SlotProps};
    use crate::tables::TracerSpec;

    fn record(id: &str) -> ItemRecord {
        ItemRecord {
            id: id.to_string(),
            name: None,
            props: ItemProps::default(),
        }
    }

    fn slot(name: &str, plate: &str) -> Slot {
        Slot {
            name: name.to_string(),
            props: SlotProps {
                filters: vec![SlotFilter {
                    plate: Some(plate.to_string()),
                    filter: vec![plate.to_string()],
                }],
            },
        }
    }

    fn armor_item(id: &str, slots: Vec<Slot>) -> ItemRecord {
        let mut item = record(id);
        item.props.slots = Some(slots);
        item
    }

    fn db_with(items: Vec<ItemRecord>) -> Database {
        let mut db = Database::default();
        for item in items {
            db.items.insert(item.id.clone(), item);
        }
        db
    }

    fn armor_spec(class: &[u32], durability: f64) -> ArmorSpec {
        ArmorSpec {
            class: class.to_vec(),
            durability,
        }
    }

    fn tables_with_armor(id: &str, spec: ArmorSpec) -> SpecTables {
        let mut tables = SpecTables::default();
        tables.armor.insert(id.to_string(), spec);
        tables
    }

    // ─────────────────────────────────────────────────────────────────
    // Armor transform
    // ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_front_slot_takes_secondary_tier() {
        // Spec scenario: class [4,5], durability 40, Soft_Armor_Front.
        let mut db = db_with(vec![
            armor_item("A1", vec![slot("Soft_Armor_Front", "S1")]),
            record("S1"),
        ]);
        let stats = RebalancePatch::new(tables_with_armor("A1", armor_spec(&[4, 5], 40.0)))
            .apply(&mut db);

        let insert = &db.item("S1").unwrap().props;
        assert_eq!(insert.armor_class, Some(5));
        assert_eq!(insert.durability, Some(40.0));
        assert_eq!(insert.max_durability, Some(40.0));
        assert_eq!(insert.blunt_throughput, Some(0.05));
        assert_eq!(stats.armor_patched, 1);
        assert_eq!(stats.soft_inserts_patched, 1);
    }

    #[test]
    fn test_single_tier_spec_uses_primary_everywhere() {
        let mut db = db_with(vec![
            armor_item(
                "A1",
                vec![slot("soft_armor_front", "S1"), slot("soft_armor_left", "S2")],
            ),
            record("S1"),
            record("S2"),
        ]);
        RebalancePatch::new(tables_with_armor("A1", armor_spec(&[3], 30.0))).apply(&mut db);

        assert_eq!(db.item("S1").unwrap().props.armor_class, Some(3));
        assert_eq!(db.item("S2").unwrap().props.armor_class, Some(3));
    }

    #[test]
    fn test_slot_rule_table() {
        // Every rule row at once: class [3,4], durability 60.
        let slots = vec![
            slot("soft_armor_front", "front"),
            slot("soft_armor_back", "back"),
            slot("helmet_top", "top"),
            slot("soft_armor_left", "left"),
            slot("helmet_eyes", "eyes"),
            slot("collar", "collar_ins"),
            slot("shoulder_l", "shoulder"),
            slot("groin", "groin_ins"),
            slot("helmet_jaw", "jaw"),
        ];
        let inserts = [
            "front",
            "back",
            "top",
            "left",
            "eyes",
            "collar_ins",
            "shoulder",
            "groin_ins",
            "jaw",
        ];
        let mut items = vec![armor_item("A1", slots)];
        items.extend(inserts.iter().map(|id| record(id)));
        let mut db = db_with(items);

        let stats = RebalancePatch::new(tables_with_armor("A1", armor_spec(&[3, 4], 60.0)))
            .apply(&mut db);
        assert_eq!(stats.soft_inserts_patched, 9);

        let expect = |id: &str, class: u32, durability: f64| {
            let props = &db.item(id).unwrap().props;
            assert_eq!(props.armor_class, Some(class), "class for {id}");
            assert_eq!(props.durability, Some(durability), "durability for {id}");
            assert_eq!(props.max_durability, Some(durability));
            assert_eq!(props.blunt_throughput, Some(0.05));
        };

        // Front-facing rows take the secondary tier; all others stay primary.
        expect("front", 4, 60.0);
        expect("back", 4, 60.0);
        expect("top", 4, 60.0);
        expect("left", 3, 30.0);
        expect("eyes", 3, 30.0);
        expect("collar_ins", 3, 21.0);
        expect("shoulder", 3, 36.0);
        expect("groin_ins", 3, 24.0);
        expect("jaw", 3, 48.0);
    }

    #[test]
    fn test_slot_names_match_case_insensitively() {
        let mut db = db_with(vec![
            armor_item("A1", vec![slot("Helmet_Top", "S1"), slot("COLLAR", "S2")]),
            record("S1"),
            record("S2"),
        ]);
        RebalancePatch::new(tables_with_armor("A1", armor_spec(&[2, 3], 20.0))).apply(&mut db);

        assert_eq!(db.item("S1").unwrap().props.armor_class, Some(3));
        assert_eq!(db.item("S2").unwrap().props.durability, Some(7.0));
    }

    #[test]
    fn test_unlisted_slot_is_left_alone() {
        let mut db = db_with(vec![
            armor_item("A1", vec![slot("mod_nvg", "S1")]),
            record("S1"),
        ]);
        let stats =
            RebalancePatch::new(tables_with_armor("A1", armor_spec(&[4], 40.0))).apply(&mut db);

        assert_eq!(db.item("S1").unwrap().props, ItemProps::default());
        assert_eq!(stats.soft_inserts_patched, 0);
        assert_eq!(stats.armor_patched, 1);
    }

    #[test]
    fn test_parent_armor_record_untouched() {
        let mut parent = armor_item("A1", vec![slot("soft_armor_front", "S1")]);
        parent.props.durability = Some(80.0);
        parent.props.armor_class = Some(6);
        let mut db = db_with(vec![parent, record("S1")]);

        RebalancePatch::new(tables_with_armor("A1", armor_spec(&[4, 5], 40.0))).apply(&mut db);

        let props = &db.item("A1").unwrap().props;
        assert_eq!(props.durability, Some(80.0));
        assert_eq!(props.armor_class, Some(6));
        assert_eq!(props.blunt_throughput, None);
    }

    #[test]
    fn test_missing_armor_id_is_skipped() {
        let mut db = db_with(vec![record("unrelated")]);
        let stats = RebalancePatch::new(tables_with_armor("ghost", armor_spec(&[4], 40.0)))
            .apply(&mut db);

        assert_eq!(stats.armor_patched, 0);
        assert_eq!(stats.skipped_ids, 1);
        assert_eq!(db.item("unrelated").unwrap().props, ItemProps::default());
    }

    #[test]
    fn test_unresolvable_plate_skips_that_slot_only() {
        let mut db = db_with(vec![
            armor_item(
                "A1",
                vec![slot("soft_armor_front", "ghost"), slot("soft_armor_back", "S2")],
            ),
            record("S2"),
        ]);
        let stats =
            RebalancePatch::new(tables_with_armor("A1", armor_spec(&[4], 40.0))).apply(&mut db);

        assert_eq!(stats.soft_inserts_patched, 1);
        assert_eq!(db.item("S2").unwrap().props.durability, Some(40.0));
    }

    #[test]
    fn test_slot_without_filters_is_skipped() {
        let bare = Slot {
            name: "soft_armor_front".to_string(),
            props: SlotProps::default(),
        };
        let mut db = db_with(vec![armor_item("A1", vec![bare])]);
        let stats =
            RebalancePatch::new(tables_with_armor("A1", armor_spec(&[4], 40.0))).apply(&mut db);
        assert_eq!(stats.soft_inserts_patched, 0);
    }

    // ─────────────────────────────────────────────────────────────────
    // Plate transform
    // ─────────────────────────────────────────────────────────────────

    fn plate_spec() -> PlateSpec {
        PlateSpec {
            class: 6,
            durability: 55.0,
            blunt_reduction: 30,
            material: None,
            colliders: None,
            spall_reduction: None,
        }
    }

    fn tables_with_plate(id: &str, spec: PlateSpec) -> SpecTables {
        let mut tables = SpecTables::default();
        tables.plates.insert(id.to_string(), spec);
        tables
    }

    #[test]
    fn test_plate_transform() {
        // Spec scenario: class 6, durability 55, bdr 30, spr 20.
        let mut db = db_with(vec![record("P1")]);
        let spec = PlateSpec {
            spall_reduction: Some(20.0),
            ..plate_spec()
        };
        let stats = RebalancePatch::new(tables_with_plate("P1", spec)).apply(&mut db);

        let props = &db.item("P1").unwrap().props;
        assert_eq!(props.armor_class, Some(6));
        assert_eq!(props.durability, Some(55.0));
        assert_eq!(props.max_durability, Some(55.0));
        assert_eq!(props.blunt_throughput, Some(0.7));
        assert_eq!(props.can_spall, Some(true));
        assert_eq!(props.spall_reduction, Some(0.2));
        assert_eq!(stats.plates_patched, 1);
    }

    #[test]
    fn test_plate_blunt_throughput_from_bdr() {
        // bdr 40 => 0.6 exactly.
        let mut db = db_with(vec![record("P1")]);
        let spec = PlateSpec {
            blunt_reduction: 40,
            ..plate_spec()
        };
        RebalancePatch::new(tables_with_plate("P1", spec)).apply(&mut db);
        assert_eq!(db.item("P1").unwrap().props.blunt_throughput, Some(0.6));
    }

    #[test]
    fn test_plate_optional_fields_overwrite_only_when_present() {
        let mut item = record("P1");
        item.props.armor_material = Some("Aramid".to_string());
        item.props.armor_colliders = Some(vec!["Thorax".to_string()]);
        let mut db = db_with(vec![item]);

        let spec = PlateSpec {
            material: Some("Ceramic".to_string()),
            ..plate_spec()
        };
        RebalancePatch::new(tables_with_plate("P1", spec)).apply(&mut db);

        let props = &db.item("P1").unwrap().props;
        assert_eq!(props.armor_material.as_deref(), Some("Ceramic"));
        // No colliders in the spec: existing list kept.
        assert_eq!(props.armor_colliders, Some(vec!["Thorax".to_string()]));
    }

    #[test]
    fn test_plate_spall_config_kept_when_spr_absent() {
        let mut item = record("P1");
        item.props.can_spall = Some(true);
        item.props.spall_reduction = Some(0.4);
        let mut db = db_with(vec![item]);

        RebalancePatch::new(tables_with_plate("P1", plate_spec())).apply(&mut db);

        let props = &db.item("P1").unwrap().props;
        assert_eq!(props.can_spall, Some(true));
        assert_eq!(props.spall_reduction, Some(0.4));
    }

    #[test]
    fn test_missing_plate_id_is_skipped() {
        let mut db = db_with(vec![]);
        let stats = RebalancePatch::new(tables_with_plate("ghost", plate_spec())).apply(&mut db);
        assert_eq!(stats.plates_patched, 0);
        assert_eq!(stats.skipped_ids, 1);
    }

    // ─────────────────────────────────────────────────────────────────
    // Ammo transform
    // ─────────────────────────────────────────────────────────────────

    fn ammo_spec() -> AmmoSpec {
        AmmoSpec {
            projectile_count: 1,
            damage: 60,
            penetration: 35,
            heavy_bleed: 40.0,
            light_bleed: 70.0,
            accuracy: 5,
            fragmentation: 15.0,
            speed_bonus: None,
            tracer: None,
        }
    }

    fn ammo_item(id: &str) -> ItemRecord {
        let mut item = record(id);
        item.props.initial_speed = Some(600.0);
        item.props.durability_burn = Some(1.5);
        item.props.heat_factor = Some(1.0);
        item
    }

    fn tables_with_ammo(id: &str, spec: AmmoSpec) -> SpecTables {
        let mut tables = SpecTables::default();
        tables.ammo.insert(id.to_string(), spec);
        tables
    }

    #[test]
    fn test_ammo_transform() {
        // Spec scenario: proj 1, dmg 60, pen 35, hvy 40, lite 70, acc 5,
        // frag 15, spd 50 onto a 600 m/s round.
        let mut db = db_with(vec![ammo_item("AM1")]);
        let spec = AmmoSpec {
            speed_bonus: Some(50.0),
            ..ammo_spec()
        };
        let stats = RebalancePatch::new(tables_with_ammo("AM1", spec)).apply(&mut db);

        let props = &db.item("AM1").unwrap().props;
        assert_eq!(props.projectile_count, Some(1));
        assert_eq!(props.damage, Some(60));
        assert_eq!(props.penetration_power, Some(35));
        assert_eq!(props.heavy_bleeding_delta, Some(0.4));
        assert_eq!(props.light_bleeding_delta, Some(0.7));
        assert_eq!(props.ammo_accuracy, Some(5));
        assert_eq!(props.fragmentation_chance, Some(0.15));
        assert_eq!(props.initial_speed, Some(650.0));
        assert_eq!(stats.ammo_patched, 1);
    }

    #[test]
    fn test_ammo_wear_factors_multiply_existing_values() {
        let mut db = db_with(vec![ammo_item("AM1")]);
        RebalancePatch::new(tables_with_ammo("AM1", ammo_spec())).apply(&mut db);

        let props = &db.item("AM1").unwrap().props;
        assert_eq!(props.durability_burn, Some(4.5));
        assert_eq!(props.heat_factor, Some(3.0));
    }

    #[test]
    fn test_ammo_pass_is_not_idempotent() {
        // Two runs compound the wear factors: 3x then 9x the original.
        let mut db = db_with(vec![ammo_item("AM1")]);

        RebalancePatch::new(tables_with_ammo("AM1", ammo_spec())).apply(&mut db);
        RebalancePatch::new(tables_with_ammo("AM1", ammo_spec())).apply(&mut db);

        let props = &db.item("AM1").unwrap().props;
        assert_eq!(props.durability_burn, Some(13.5));
        assert_eq!(props.heat_factor, Some(9.0));
        // Overwritten fields converge instead.
        assert_eq!(props.damage, Some(60));
    }

    #[test]
    fn test_ammo_speed_untouched_without_bonus() {
        let mut db = db_with(vec![ammo_item("AM1")]);
        RebalancePatch::new(tables_with_ammo("AM1", ammo_spec())).apply(&mut db);
        assert_eq!(db.item("AM1").unwrap().props.initial_speed, Some(600.0));
    }

    #[test]
    fn test_ammo_tracer_fields() {
        let mut db = db_with(vec![ammo_item("AM1"), ammo_item("AM2")]);

        let mut tables = tables_with_ammo(
            "AM1",
            AmmoSpec {
                tracer: Some(TracerSpec(true, "green".to_string())),
                ..ammo_spec()
            },
        );
        tables.ammo.insert("AM2".to_string(), ammo_spec());
        RebalancePatch::new(tables).apply(&mut db);

        let with_tracer = &db.item("AM1").unwrap().props;
        assert_eq!(with_tracer.tracer, Some(true));
        assert_eq!(with_tracer.tracer_color.as_deref(), Some("green"));

        // No descriptor: tracer fields stay as they were.
        let plain = &db.item("AM2").unwrap().props;
        assert_eq!(plain.tracer, None);
        assert_eq!(plain.tracer_color, None);
    }

    #[test]
    fn test_missing_ammo_id_is_skipped() {
        let mut db = db_with(vec![]);
        let stats = RebalancePatch::new(tables_with_ammo("ghost", ammo_spec())).apply(&mut db);
        assert_eq!(stats.ammo_patched, 0);
        assert_eq!(stats.skipped_ids, 1);
    }

    // ─────────────────────────────────────────────────────────────────
    // Material table and driver
    // ─────────────────────────────────────────────────────────────────

    fn material() -> crate::catalog::ArmorMaterial {
        crate::catalog::ArmorMaterial {
            destructibility: 0.5,
            explosion_destructibility: 0.25,
            min_repair_degradation: 0.125,
            max_repair_degradation: 0.25,
            min_repair_kit_degradation: 0.0625,
            max_repair_kit_degradation: 0.125,
        }
    }

    #[test]
    fn test_material_table_scaled() {
        let mut db = Database::default();
        db.armor_materials_mut()
            .insert("Aramid".to_string(), material());
        db.armor_materials_mut()
            .insert("Ceramic".to_string(), material());

        let stats = RebalancePatch::new(SpecTables::default()).apply(&mut db);
        assert_eq!(stats.materials_scaled, 2);

        for entry in db.armor_materials().values() {
            assert_eq!(entry.destructibility, 1.5);
            assert_eq!(entry.explosion_destructibility, 0.75);
            assert_eq!(entry.min_repair_degradation, 0.375);
            assert_eq!(entry.max_repair_degradation, 0.75);
            assert_eq!(entry.min_repair_kit_degradation, 0.1875);
            assert_eq!(entry.max_repair_kit_degradation, 0.375);
        }
    }

    #[test]
    fn test_full_pass_counts() {
        let mut db = db_with(vec![
            armor_item("A1", vec![slot("soft_armor_front", "S1")]),
            record("S1"),
            record("P1"),
            ammo_item("AM1"),
        ]);
        db.armor_materials_mut()
            .insert("Aramid".to_string(), material());

        let mut tables = SpecTables::default();
        tables
            .armor
            .insert("A1".to_string(), armor_spec(&[4, 5], 40.0));
        tables.plates.insert("P1".to_string(), plate_spec());
        tables.ammo.insert("AM1".to_string(), ammo_spec());
        tables.armor.insert("ghost".to_string(), armor_spec(&[2], 10.0));

        let stats = RebalancePatch::new(tables).apply(&mut db);
        assert_eq!(
            stats,
            PatchStats {
                armor_patched: 1,
                soft_inserts_patched: 1,
                plates_patched: 1,
                ammo_patched: 1,
                materials_scaled: 1,
                skipped_ids: 1,
            }
        );
    }

    // ─────────────────────────────────────────────────────────────────
    // Check report
    // ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_check_reports_missing_ids_and_slots() {
        let mut db = db_with(vec![
            armor_item(
                "A1",
                vec![slot("soft_armor_front", "ghost_plate"), slot("collar", "S1")],
            ),
            record("S1"),
        ]);
        db.armor_materials_mut()
            .insert("Aramid".to_string(), material());

        let mut tables = SpecTables::default();
        tables.armor.insert("A1".to_string(), armor_spec(&[4], 40.0));
        tables.armor.insert("gone".to_string(), armor_spec(&[2], 10.0));
        tables.plates.insert("P_gone".to_string(), plate_spec());
        tables.ammo.insert("AM_gone".to_string(), ammo_spec());

        let patch = RebalancePatch::new(tables);
        let report = patch.check(&db);

        assert!(!report.is_clean());
        assert_eq!(report.missing_armor, vec!["gone".to_string()]);
        assert_eq!(report.missing_plates, vec!["P_gone".to_string()]);
        assert_eq!(report.missing_ammo, vec!["AM_gone".to_string()]);
        assert_eq!(
            report.unresolved_slots,
            vec![("A1".to_string(), "soft_armor_front".to_string())]
        );

        // check() must not mutate anything.
        assert_eq!(db.item("S1").unwrap().props, ItemProps::default());
        assert_eq!(db.armor_materials()["Aramid"], material());
    }

    #[test]
    fn test_check_clean() {
        let db = db_with(vec![
            armor_item("A1", vec![slot("soft_armor_front", "S1")]),
            record("S1"),
        ]);

        let report = RebalancePatch::new(tables_with_armor("A1", armor_spec(&[4], 40.0)))
            .check(&db);
        assert!(report.is_clean());
    }
}
