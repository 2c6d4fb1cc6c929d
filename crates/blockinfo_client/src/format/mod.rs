//! Text generation. One pass writes through [`Lines`] and works for both rendering modes.

mod aim;
mod blocks;
mod menu;
mod weapons;

use std::sync::OnceLock;

use blockinfo_shared::block::{
    BlockCategory, BlockDefinition, BlockDefinitionId, ModContext, Topology,
};
use blockinfo_shared::item::InventoryConstraint;
use blockinfo_shared::registry::DefinitionRegistry;
use rustc_hash::FxHashMap;
use tracing::warn;

use crate::facts::{self, Airtightness};
use crate::hardcoded;
use crate::host::{GameSession, LiveData};
use crate::lines::{FontStyle, Lines};
use crate::palette;
use crate::settings::{HeldInfoFlags, Settings};
use crate::units;

pub use aim::{aimed_text, AimContext};
pub use menu::{menu_text, MenuItem, MenuState, MenuView, MENU_ITEMS};

/// Read-only inputs of one generation pass.
#[derive(Copy, Clone)]
pub struct FormatContext<'a> {
    pub registry: &'a DefinitionRegistry,
    pub settings: &'a Settings,
    pub session: &'a GameSession,
    /// Live data sampled for this block type, if it arrived.
    pub live: Option<&'a LiveData>,
}

impl FormatContext<'_> {
    pub fn held(&self, flag: HeldInfoFlags) -> bool {
        self.settings.held_info.contains(flag)
    }
}

type Routine = fn(&FormatContext<'_>, &BlockDefinition, &mut Lines<'_>);

fn routines() -> &'static FxHashMap<BlockCategory, Routine> {
    static ROUTINES: OnceLock<FxHashMap<BlockCategory, Routine>> = OnceLock::new();
    ROUTINES.get_or_init(blocks::routine_table)
}

/// Whether `category` has a dedicated routine.
pub fn has_routine(category: BlockCategory) -> bool {
    routines().contains_key(&category)
}

/// Categories the host can draw an overlay for.
pub fn has_overlay(category: BlockCategory) -> bool {
    use BlockCategory::*;
    matches!(
        category,
        Thrust
            | Drill
            | ShipWelder
            | ShipGrinder
            | ShipConnector
            | MergeBlock
            | LandingGear
            | MotorStator
            | MotorAdvancedStator
            | MotorSuspension
            | SensorBlock
    ) || category.is_large_turret()
}

/// Category-specific lines of a held block. Categories without a routine only get the power line
/// their payload declares.
pub fn dispatch(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    match routines().get(&def.id.category) {
        Some(routine) => routine(ctx, def, out),
        None => {
            if let Some((mw, group)) = def.kind.power_input() {
                power_required(ctx, out, mw, group, false);
            }
        }
    }
}

/// Full text of a block held for placement.
pub fn held_text(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    if out.is_rich() && ctx.held(HeldInfoFlags::BLOCK_NAME) {
        name_line(ctx, def, out);
    }

    basics(ctx, def, out, false);

    if ctx.held(HeldInfoFlags::GRIND_CHANGE_WARNING) {
        for (from, to) in def.grind_changes() {
            out.add_styled(FontStyle::Red)
                .color(palette::WARNING)
                .append("When grinding: ")
                .append(from)
                .append(" turns into ")
                .append(to)
                .end_line();
        }
    }

    if ctx.held(HeldInfoFlags::MIRRORING) && (ctx.session.creative || ctx.session.copy_paste) {
        if let Some(mirror) = &def.mirroring_block {
            let mirror_id = BlockDefinitionId::new(def.id.category, mirror.clone());
            match ctx.registry.block(&mirror_id) {
                Some(mirror_def) => {
                    out.add_styled(FontStyle::Blue)
                        .color(palette::GOOD)
                        .append("Mirrors with: ")
                        .append(&mirror_def.display_name)
                        .end_line();
                }
                None => {
                    out.add_styled(FontStyle::Red)
                        .color(palette::BAD)
                        .append("Mirrors with: ")
                        .append(mirror)
                        .append(" (Error: not found)")
                        .end_line();
                }
            }
        }
    }

    if def.id.category != BlockCategory::CubeBlock {
        dispatch(ctx, def, out);
    }

    if ctx.held(HeldInfoFlags::ADDED_BY_MOD) {
        if let Some(context) = &def.context {
            out.add_styled(FontStyle::Blue)
                .color(palette::MOD)
                .append("Mod: ")
                .append(mod_name(context))
                .end_line();
        }
    }

    if ctx.held(HeldInfoFlags::OVERLAY_HINT) && has_overlay(def.id.category) {
        overlay_hint(ctx.settings, out);
    }

    out.end_line();
}

fn name_line(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    out.add_line().color(palette::BLOCKTITLE).append(&def.display_name);

    if !def.block_stages.is_empty() {
        out.append("  ")
            .color(palette::BLOCKVARIANTS)
            .append(format!("(Variant 1 of {})", def.block_stages.len() + 1));
    } else if let Some(toolbar) = ctx
        .session
        .toolbar_block
        .as_ref()
        .and_then(|id| ctx.registry.block(id))
    {
        let position = toolbar
            .block_stages
            .iter()
            .position(|subtype| *subtype == def.id.subtype);
        if let Some(index) = position {
            out.append("  ").color(palette::BLOCKVARIANTS).append(format!(
                "(Variant {} of {})",
                index + 2,
                toolbar.block_stages.len() + 1
            ));
        }
    }

    out.end_line();
}

/// "name (workshop id)", or just the name for local mods.
pub(crate) fn mod_name(context: &ModContext) -> String {
    if context.workshop_id > 0 {
        format!("{} ({})", context.name, context.workshop_id)
    } else {
        context.name.clone()
    }
}

pub(crate) fn overlay_hint(settings: &Settings, out: &mut Lines<'_>) {
    out.add_styled(FontStyle::DarkBlue)
        .color(palette::UNIMPORTANT)
        .append("(Overlay available. ")
        .append(&settings.cycle_overlays_bind)
        .append(" to cycle)")
        .end_line();
}

/// Mass, size, timings, integrity and airtightness. `part` indents the lines under a "Part:" header.
pub(crate) fn basics(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>, part: bool) {
    let weld_mul = ctx.session.multipliers.welder;
    let grind_ratio = def.effective_grind_ratio(hardcoded::DOOR_CLOSED_DISASSEMBLE_MULTIPLIER);
    let padding = match (part, out.is_rich()) {
        (false, _) => "",
        (true, true) => "        | ",
        (true, false) => "       | ",
    };

    if part {
        out.add_styled(FontStyle::Blue)
            .color(palette::PART)
            .append("Part: ")
            .append(&def.display_name)
            .end_line();
    }

    if ctx.held(HeldInfoFlags::LINE1) {
        out.add_line();
        if part {
            out.color(palette::PART).append(padding);
        }

        let build_seconds = facts::build_time(def, weld_mul, 1.0);
        out.color(palette::MASS)
            .append(units::mass(def.mass))
            .reset_color()
            .separator()
            .append(units::vector(def.size))
            .separator()
            .append(units::time(build_seconds))
            .color(palette::UNIMPORTANT)
            .append(units::multiplier(weld_mul))
            .reset_color();

        if (grind_ratio - 1.0).abs() >= 0.0001 {
            out.separator()
                .color(if grind_ratio > 1.0 { palette::BAD } else { palette::GOOD })
                .append("Deconstructs: ")
                .append(units::percent(1.0 / grind_ratio))
                .reset_color();
        }

        if !def.has_build_models {
            out.separator()
                .color(palette::WARNING)
                .append("(No construction models)")
                .reset_color();
        }

        out.end_line();
    }

    if ctx.held(HeldInfoFlags::LINE2) {
        out.add_line();
        if part {
            out.color(palette::PART).append(padding).reset_color();
        }

        out.append("Integrity: ")
            .append(units::grouped(def.max_integrity.round() as i64))
            .separator();

        let deformable = def.topology == Topology::Cube && def.uses_deformation;
        if deformable {
            out.color(palette::WARNING)
                .append("Deformable: Yes (")
                .append(units::percent(def.deformation_ratio))
                .append(")");
        } else {
            out.color(palette::NORMAL).append("Deformable: No");
        }
        out.reset_color();

        if (def.damage_multiplier - 1.0).abs() > f32::EPSILON {
            out.separator()
                .color(if def.damage_multiplier > 1.0 { palette::BAD } else { palette::GOOD })
                .append("Damage intake: ")
                .append(units::percent(def.damage_multiplier))
                .reset_color();
        }

        out.end_line();
    }

    if ctx.held(HeldInfoFlags::AIRTIGHT) {
        let airtight = facts::airtightness(def);
        let (font, color) = match airtight {
            Airtightness::Sealed => (FontStyle::Green, palette::GOOD),
            Airtightness::NotSealed => (FontStyle::Red, palette::BAD),
            Airtightness::Partial { .. } => (FontStyle::Blue, palette::WARNING),
        };

        out.add_styled(font);
        if part {
            out.color(palette::PART).append(padding);
        }
        out.color(color).append("Air-tight: ");
        match airtight {
            Airtightness::Sealed => out.append("Sealed"),
            Airtightness::NotSealed => out.append("Not sealed"),
            Airtightness::Partial { sealed, total } => {
                out.append(format!("{sealed} of {total} faces are sealed"))
            }
        };
        out.end_line();
    }
}

/// "Power required: X" with the optional resource priority.
pub(crate) fn power_required(
    ctx: &FormatContext<'_>,
    out: &mut Lines<'_>,
    mw: f32,
    group: Option<&str>,
    hardcoded: bool,
) {
    if !ctx.held(HeldInfoFlags::POWER_STATS) {
        return;
    }

    out.add_line().color(if mw <= 0.0 { palette::GOOD } else { palette::NORMAL });
    if hardcoded {
        out.label_hardcoded("Power required");
    } else {
        out.label("Power required");
    }

    if mw <= 0.0 {
        out.append("No");
    } else {
        out.append(units::power(mw));
    }

    if group.is_some() {
        out.reset_color();
    }
    resource_priority(ctx, out, group);
    out.end_line();
}

/// Appends ", Priority: group (rank/count)" to the open line when enabled and a group is set.
pub(crate) fn resource_priority(ctx: &FormatContext<'_>, out: &mut Lines<'_>, group: Option<&str>) {
    let Some(group) = group else {
        return;
    };
    if !ctx.held(HeldInfoFlags::RESOURCE_PRIORITIES) {
        return;
    }

    out.separator().label("Priority").append(group);
    if let Some((rank, count)) = ctx.registry.resource_priority(group) {
        out.append(format!(" ({rank}/{count})"));
    }
}

/// Volume with the constraint summary, "400.00 L (Ores only)".
pub(crate) fn inventory_format(volume: f32, constraint: Option<&InventoryConstraint>) -> String {
    match constraint.filter(|c| !c.is_empty() || c.description.is_some()) {
        Some(constraint) => format!("{} ({})", units::volume(volume), constraint.summary()),
        None => units::volume(volume),
    }
}

/// Inventory line from the inventory component, `alternate` volume, or the `hardcoded` fallback.
pub(crate) fn inventory_stats(
    ctx: &FormatContext<'_>,
    def: &BlockDefinition,
    out: &mut Lines<'_>,
    alternate: f32,
    hardcoded: f32,
) {
    if !ctx.held(HeldInfoFlags::INVENTORY_STATS) {
        return;
    }

    let volume = def.inventory_component.unwrap_or(alternate);
    if volume > 0.0 {
        out.add_line().label("Inventory").append(units::volume(volume)).end_line();
    } else if hardcoded > 0.0 {
        out.add_line()
            .label_hardcoded("Inventory")
            .append(units::volume(hardcoded))
            .end_line();
    }
}

/// Inline error for a definition whose data does not match its category.
pub(crate) fn data_error(def: &BlockDefinition, out: &mut Lines<'_>) {
    warn!("definition {} has data of another category", def.id);
    out.add_styled(FontStyle::Red)
        .color(palette::BAD)
        .append("Block error: unexpected definition data for ")
        .append(def.id.to_string())
        .end_line();
}

#[cfg(test)]
pub(crate) mod test_support {
    use blockinfo_shared::block::{BlockCategory, BlockDefinition, BlockDefinitionId};
    use blockinfo_shared::kinds::BlockKind;
    use blockinfo_shared::registry::DefinitionRegistry;

    use super::FormatContext;
    use crate::host::GameSession;
    use crate::lines::{plain_text, Lines, NotificationBuffer, RichTextBuffer};
    use crate::settings::Settings;

    pub fn block(category: BlockCategory, subtype: &str, kind: BlockKind) -> BlockDefinition {
        let mut def = BlockDefinition::minimal(BlockDefinitionId::new(category, subtype), subtype);
        def.kind = kind;
        def
    }

    /// Runs `write` against a rich buffer and returns the plain text.
    pub fn rich<F>(registry: &DefinitionRegistry, settings: &Settings, session: &GameSession, write: F) -> String
    where
        F: FnOnce(&FormatContext<'_>, &mut Lines<'_>),
    {
        let ctx = FormatContext {
            registry,
            settings,
            session,
            live: None,
        };
        let mut buf = RichTextBuffer::new();
        {
            let mut out = Lines::new(&mut buf);
            write(&ctx, &mut out);
            out.end_line();
        }
        plain_text(buf.runs())
    }

    /// Runs `write` against a notification buffer and returns each line's text.
    pub fn notification<F>(
        registry: &DefinitionRegistry,
        settings: &Settings,
        session: &GameSession,
        write: F,
    ) -> Vec<String>
    where
        F: FnOnce(&FormatContext<'_>, &mut Lines<'_>),
    {
        let ctx = FormatContext {
            registry,
            settings,
            session,
            live: None,
        };
        let mut buf = NotificationBuffer::new();
        {
            let mut out = Lines::new(&mut buf);
            write(&ctx, &mut out);
            out.end_line();
        }
        buf.lines().iter().map(|line| line.text.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use blockinfo_shared::block::{BlockCategory, CubeSize, ModContext};
    use blockinfo_shared::kinds::{BlockKind, GyroData, ThrustData};
    use blockinfo_shared::registry::DefinitionRegistry;
    use glam::Vec3;

    use super::test_support::{block, notification, rich};
    use super::{dispatch, has_routine, held_text, power_required};
    use crate::host::GameSession;
    use crate::lines::BULLET;
    use crate::settings::{HeldInfoFlags, Settings};

    #[test]
    fn every_payload_category_has_a_routine() {
        for category in [
            BlockCategory::Thrust,
            BlockCategory::Reactor,
            BlockCategory::LargeGatlingTurret,
            BlockCategory::MedicalRoom,
            BlockCategory::Parachute,
            BlockCategory::ShipConnector,
        ] {
            assert!(has_routine(category), "{category:?} should have a routine");
        }
        assert!(!has_routine(BlockCategory::CubeBlock));
    }

    #[test]
    fn unmatched_categories_only_show_declared_power() {
        let registry = DefinitionRegistry::new();
        let settings = Settings::default();
        let session = GameSession::default();

        let plain = block(BlockCategory::Unknown, "Statue", BlockKind::Decorative);
        let text = rich(&registry, &settings, &session, |ctx, out| dispatch(ctx, &plain, out));
        assert_eq!(text, "");

        let powered = block(
            BlockCategory::Unknown,
            "ModdedGyro",
            BlockKind::Gyro(GyroData {
                required_power_input: 0.002,
                sink_group: None,
                force: 1.0,
            }),
        );
        let text = rich(&registry, &settings, &session, |ctx, out| dispatch(ctx, &powered, out));
        assert_eq!(text, "Power required: 2.00 kW\n");
    }

    #[test]
    fn basics_of_a_large_block() {
        let registry = DefinitionRegistry::new();
        let settings = Settings::default();
        let session = GameSession::default();

        let mut def = block(BlockCategory::CubeBlock, "Armor", BlockKind::Decorative);
        def.display_name = "Heavy Armor".to_string();
        def.mass = 5000.0;
        def.size = Vec3::splat(2.5);
        def.max_integrity = 2000.0;
        def.integrity_per_second = 20.0;
        def.cube_size = CubeSize::Large;

        let text = rich(&registry, &settings, &session, |ctx, out| held_text(ctx, &def, out));
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Heavy Armor"));
        assert_eq!(lines.next(), Some("5,000 kg, 2.5x2.5x2.5, 01:40"));
        assert_eq!(lines.next(), Some("Integrity: 2,000, Deformable: No"));
        assert_eq!(lines.next(), Some("Air-tight: Not sealed"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn notification_mode_skips_name_and_prefixes_bullets() {
        let registry = DefinitionRegistry::new();
        let settings = Settings::default();
        let session = GameSession::default();

        let mut def = block(BlockCategory::CubeBlock, "Armor", BlockKind::Decorative);
        def.context = Some(ModContext {
            name: "Fancy Blocks".to_string(),
            workshop_id: 42,
        });

        let lines = notification(&registry, &settings, &session, |ctx, out| {
            held_text(ctx, &def, out)
        });
        assert!(lines.iter().all(|line| line.starts_with(BULLET)));
        assert_eq!(lines.last().map(String::as_str), Some("• Mod: Fancy Blocks (42)"));
    }

    #[test]
    fn power_line_marks_hardcoded_values_and_zero_draw() {
        let registry = DefinitionRegistry::new();
        let settings = Settings::default();
        let session = GameSession::default();

        let text = rich(&registry, &settings, &session, |ctx, out| {
            power_required(ctx, out, 0.0, None, true)
        });
        assert_eq!(text, "Power required*: No\n");

        let text = rich(&registry, &settings, &session, |ctx, out| {
            power_required(ctx, out, 0.002, None, false)
        });
        assert_eq!(text, "Power required: 2.00 kW\n");
    }

    #[test]
    fn disabled_flags_drop_lines() {
        let registry = DefinitionRegistry::new();
        let mut settings = Settings::default();
        settings.held_info = HeldInfoFlags::POWER_STATS;
        let session = GameSession::default();

        let def = block(
            BlockCategory::Thrust,
            "Ion",
            BlockKind::Thrust(ThrustData {
                max_power: 3.36,
                min_power: 0.000_002,
                ..Default::default()
            }),
        );
        let text = rich(&registry, &settings, &session, |ctx, out| held_text(ctx, &def, out));
        assert_eq!(text, "Power: 3.36 MW, Idle: 2.00 W\n");
    }
}
