//! Text for the placed block under the crosshair. Never cached: it depends on live block state.

use blockinfo_shared::block::{BlockDefinition, Topology};
use blockinfo_shared::registry::DefinitionRegistry;

use super::{has_overlay, mod_name, overlay_hint};
use crate::facts::{self, GridSplitCheck};
use crate::hardcoded;
use crate::host::{AimedBlock, EquippedTool, GameSession, GridSplitPredictor, ToolKind};
use crate::lines::{FontStyle, Lines};
use crate::palette;
use crate::settings::{AimInfoFlags, Settings};
use crate::units;

pub const NAME_MAX_LENGTH: usize = 35;
pub const PLAYER_NAME_MAX_LENGTH: usize = 24;
pub const MOD_NAME_MAX_LENGTH: usize = 30;

/// Movement below this (m/s or rad/s) counts as standing still.
const MOVING_EPSILON: f32 = 0.01;
const IMPULSE_EPSILON: f32 = 0.000_01;
/// Grinder impulses that change grid speed by this much are shown as dangerous.
const IMPULSE_BAD_SPEED: f32 = 0.5;

pub struct AimContext<'a> {
    pub registry: &'a DefinitionRegistry,
    pub settings: &'a Settings,
    pub session: &'a GameSession,
    pub tool: Option<EquippedTool>,
    pub split_predictor: &'a dyn GridSplitPredictor,
}

impl AimContext<'_> {
    fn aim(&self, flag: AimInfoFlags) -> bool {
        self.settings.aim_info.contains(flag)
    }

    fn grinding(&self) -> bool {
        self.tool.is_some_and(|tool| tool.kind.is_grinder())
    }

    /// Speed multiplier of the equipped tool. Ship tools use the fixed ship rate.
    fn tool_multiplier(&self) -> f32 {
        match self.tool {
            Some(EquippedTool {
                kind: ToolKind::HandWelder | ToolKind::HandGrinder,
                speed_multiplier,
            }) => speed_multiplier,
            Some(_) => hardcoded::SHIP_WELDER_WELD_PER_SECOND,
            None => 1.0,
        }
    }
}

/// At most `limit` characters of `text`, with "..." when cut.
fn max_length(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

pub fn aimed_text(
    ctx: &AimContext<'_>,
    def: &BlockDefinition,
    block: &AimedBlock,
    split: &mut GridSplitCheck,
    out: &mut Lines<'_>,
) {
    let integrity_ratio = if block.max_integrity > 0.0 {
        block.integrity / block.max_integrity
    } else {
        0.0
    };
    let has_computer = block.is_terminal && def.has_computer;

    if ctx.aim(AimInfoFlags::BLOCK_NAME) {
        if let Some(name) = &block.custom_name {
            let first_line = name.split('\n').next().unwrap_or_default();
            out.add_line()
                .append("\"")
                .color(palette::BLOCKTITLE)
                .append(max_length(first_line, NAME_MAX_LENGTH))
                .reset_color()
                .append("\"")
                .end_line();
        }
    }

    if ctx.aim(AimInfoFlags::MASS) {
        let mut mass = def.mass;
        let mut color = palette::MASS;
        if block.inventory_mass > 0.0 {
            mass += block.inventory_mass;
            color = palette::WARNING;
        }

        out.add_line().color(color).append(units::mass(mass));
        if let Some(grid_mass) = block.grid_mass {
            out.reset_color()
                .separator()
                .label("Grid mass")
                .append(units::mass(grid_mass));
        }
        out.end_line();
    }

    if ctx.aim(AimInfoFlags::INTEGRITY) {
        let color = if integrity_ratio < def.critical_integrity_ratio {
            palette::BAD
        } else if integrity_ratio < 1.0 {
            palette::WARNING
        } else {
            palette::GOOD
        };

        out.add_line()
            .label("Integrity")
            .color(color)
            .append(units::grouped(block.integrity.round() as i64))
            .reset_color()
            .append(" / ")
            .append(units::grouped(block.max_integrity.round() as i64));
        if def.topology == Topology::Cube && block.deformed {
            out.color(palette::BAD).append(" (deformed)");
        }
        out.end_line();
    }

    if ctx.aim(AimInfoFlags::DAMAGE_MULTIPLIER) && (def.damage_multiplier - 1.0).abs() >= 0.0001 {
        let color = if def.damage_multiplier > 1.0 {
            palette::BAD
        } else {
            palette::GOOD
        };
        out.add_line()
            .color(color)
            .label("Damage multiplier")
            .append(units::number(def.damage_multiplier))
            .end_line();
    }

    if ctx.aim(AimInfoFlags::OWNERSHIP) && has_computer {
        let (color, access) = facts::access(block.relation, block.share);
        out.add_line()
            .color(color)
            .append(access)
            .reset_color()
            .separator()
            .color(facts::owner_color(block.relation));

        match &block.owner {
            None => {
                out.append("Not owned");
            }
            Some(owner) => {
                out.label("Owner");
                if let Some(tag) = owner.faction_tag.as_deref().filter(|tag| !tag.is_empty()) {
                    out.append(tag).append(".");
                }
                out.append(max_length(&owner.name, PLAYER_NAME_MAX_LENGTH));
            }
        }
        out.end_line();
    }

    if ctx.aim(AimInfoFlags::TOOL_USE_TIME) {
        let multipliers = &ctx.session.multipliers;
        let build = facts::build_time(def, multipliers.welder, ctx.tool_multiplier());

        out.add_line();
        if !ctx.grinding() {
            out.label("Complete").append(units::time(build * (1.0 - integrity_ratio)));

            let critical = def.critical_integrity_ratio;
            if critical < 1.0 && integrity_ratio < critical {
                let functional = build * critical * (1.0 - integrity_ratio / critical);
                out.separator().label("Functional").append(units::time(functional));
            }
        } else {
            let full_grind = facts::grind_time(
                def,
                multipliers.welder,
                ctx.tool_multiplier(),
                multipliers.grinder,
            );
            let owner_identity = block.owner.as_ref().map_or(0, |owner| owner.identity);
            let hackable = has_computer
                && owner_identity != ctx.session.player_identity
                && integrity_ratio >= def.ownership_integrity_ratio;
            let estimate = facts::grind_from(
                def,
                full_grind,
                integrity_ratio,
                hackable,
                multipliers.hacking,
            );

            out.label("Dismantled").append(units::time(estimate.total));
            if let Some(hack) = estimate.hack {
                out.separator().label("Hacked").append(units::time(hack));
            }
        }
        out.end_line();
    }

    if ctx.aim(AimInfoFlags::GRIND_CHANGE_WARNING) && ctx.grinding() {
        for (from, to) in def.grind_changes() {
            out.add_styled(FontStyle::Red)
                .color(palette::WARNING)
                .append(from)
                .append(" turns into ")
                .append(to)
                .end_line();
        }
    }

    if ctx.aim(AimInfoFlags::GRID_MOVING) && block.grid_mass.is_some() {
        let moving = block.linear_speed > MOVING_EPSILON;
        let rotating = block.angular_speed > MOVING_EPSILON;

        if moving || rotating {
            out.add_line().color(palette::WARNING);
            if moving {
                out.label("Moving").append(units::speed(block.linear_speed));
            }
            if rotating {
                if moving {
                    out.separator();
                }
                out.label("Rotating")
                    .append(units::rotation_speed(block.angular_speed.to_degrees()));
            }
            out.end_line();
        }
    }

    if ctx.aim(AimInfoFlags::SHIP_GRINDER_IMPULSE)
        && ctx.tool.is_some_and(|tool| tool.kind == ToolKind::ShipGrinder)
    {
        if let (Some(impulse), Some(grid_mass)) = (block.grinder_impulse, block.grid_mass) {
            if impulse > IMPULSE_EPSILON {
                let speed = facts::impulse_speed(impulse, grid_mass);
                out.add_styled(FontStyle::Red)
                    .color(if speed >= IMPULSE_BAD_SPEED {
                        palette::BAD
                    } else {
                        palette::WARNING
                    })
                    .label("Grind impulse")
                    .append(units::rounded(speed, 5))
                    .append(" m/s (")
                    .append(units::force(impulse))
                    .append(")")
                    .end_line();
            }
        }
    }

    if ctx.aim(AimInfoFlags::GRIND_GRID_SPLIT)
        && ctx.grinding()
        && split.would_split(block, ctx.split_predictor)
    {
        out.add_styled(FontStyle::Red)
            .color(palette::BAD)
            .append("Grid will split if this block is removed!")
            .end_line();
    }

    if ctx.aim(AimInfoFlags::ADDED_BY_MOD) {
        if let Some(context) = &def.context {
            if out.is_rich() {
                out.add_line()
                    .color(palette::MOD)
                    .append("Mod: ")
                    .color(palette::MOD_TITLE)
                    .append(max_length(&context.name, MOD_NAME_MAX_LENGTH))
                    .end_line();
                if context.workshop_id > 0 {
                    out.add_line()
                        .color(palette::MOD)
                        .append("       | ")
                        .reset_color()
                        .label("Workshop ID")
                        .append(context.workshop_id.to_string())
                        .end_line();
                }
            } else {
                out.add_styled(FontStyle::Blue)
                    .append("Mod: ")
                    .append(mod_name(context))
                    .end_line();
            }
        }
    }

    if ctx.aim(AimInfoFlags::OVERLAY_HINT) && has_overlay(def.id.category) {
        overlay_hint(ctx.settings, out);
    }

    out.end_line();
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use blockinfo_shared::block::{BlockCategory, BlockDefinition, BlockDefinitionId, ModContext};
    use blockinfo_shared::registry::DefinitionRegistry;

    use super::{aimed_text, max_length, AimContext};
    use crate::facts::GridSplitCheck;
    use crate::host::{
        AimedBlock, EquippedTool, GameSession, GridSplitPredictor, OwnerInfo, Relation, ShareMode,
        ToolKind,
    };
    use crate::lines::{plain_text, Lines, NotificationBuffer, RichTextBuffer};
    use crate::settings::{AimInfoFlags, Settings};

    struct Predictor {
        splits: bool,
        calls: Cell<u32>,
    }

    impl GridSplitPredictor for Predictor {
        fn would_split(&self, _block: &AimedBlock) -> bool {
            self.calls.set(self.calls.get() + 1);
            self.splits
        }
    }

    fn terminal_def() -> BlockDefinition {
        let mut def = BlockDefinition::minimal(
            BlockDefinitionId::new(BlockCategory::BatteryBlock, "Battery"),
            "Battery",
        );
        def.mass = 740.0;
        def.max_integrity = 1000.0;
        def.integrity_per_second = 10.0;
        def.ownership_integrity_ratio = 0.5;
        def.critical_integrity_ratio = 0.5;
        def.has_computer = true;
        def
    }

    fn aimed(def: &BlockDefinition) -> AimedBlock {
        AimedBlock {
            instance: 7,
            definition: def.id.clone(),
            custom_name: Some("Battery with a rather long custom name\nsecond".to_string()),
            is_terminal: true,
            integrity: 1000.0,
            max_integrity: 1000.0,
            deformed: false,
            inventory_mass: 0.0,
            grid_mass: Some(12_000.0),
            linear_speed: 0.0,
            angular_speed: 0.0,
            owner: Some(OwnerInfo {
                identity: 99,
                name: "Sam".to_string(),
                faction_tag: Some("SPRT".to_string()),
            }),
            relation: Relation::Enemies,
            share: ShareMode::None,
            grinder_impulse: None,
        }
    }

    fn render(
        settings: &Settings,
        tool: Option<EquippedTool>,
        def: &BlockDefinition,
        block: &AimedBlock,
        predictor: &Predictor,
        split: &mut GridSplitCheck,
    ) -> String {
        let registry = DefinitionRegistry::new();
        let session = GameSession::default();
        let ctx = AimContext {
            registry: &registry,
            settings,
            session: &session,
            tool,
            split_predictor: predictor,
        };
        let mut buf = RichTextBuffer::new();
        {
            let mut out = Lines::new(&mut buf);
            aimed_text(&ctx, def, block, split, &mut out);
        }
        plain_text(buf.runs())
    }

    #[test]
    fn names_are_cut_at_newline_and_limit() {
        assert_eq!(max_length("short", 35), "short");
        assert_eq!(max_length("abcdef", 3), "abc...");
    }

    #[test]
    fn grinding_an_enemy_block_shows_hack_time() {
        let def = terminal_def();
        let block = aimed(&def);
        let predictor = Predictor {
            splits: false,
            calls: Cell::new(0),
        };
        let mut split = GridSplitCheck::default();
        let text = render(
            &Settings::default(),
            Some(EquippedTool::hand_grinder()),
            &def,
            &block,
            &predictor,
            &mut split,
        );
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "\"Battery with a rather long custom n...\"");
        assert_eq!(lines[1], "740 kg, Grid mass: 12,000 kg");
        assert_eq!(lines[2], "Integrity: 1,000 / 1,000");
        assert_eq!(lines[3], "Access: owner, Owner: SPRT.Sam");
        // 100 s to grind, 50 s without ownership plus a 50 s hack.
        assert_eq!(lines[4], "Dismantled: 01:40, Hacked: 00:50");
        assert_eq!(predictor.calls.get(), 1);
    }

    #[test]
    fn welding_shows_functional_time_below_critical() {
        let def = terminal_def();
        let mut block = aimed(&def);
        block.integrity = 250.0;
        let predictor = Predictor {
            splits: true,
            calls: Cell::new(0),
        };
        let mut split = GridSplitCheck::default();
        let mut settings = Settings::default();
        settings.aim_info = AimInfoFlags::TOOL_USE_TIME | AimInfoFlags::GRIND_GRID_SPLIT;

        let text = render(
            &settings,
            Some(EquippedTool::hand_welder()),
            &def,
            &block,
            &predictor,
            &mut split,
        );
        assert_eq!(text, "Complete: 01:15, Functional: 00:25\n");
        assert_eq!(predictor.calls.get(), 0);
    }

    #[test]
    fn split_warning_and_impulse_for_ship_grinder() {
        let def = terminal_def();
        let mut block = aimed(&def);
        block.grinder_impulse = Some(12_000.0);
        let predictor = Predictor {
            splits: true,
            calls: Cell::new(0),
        };
        let mut split = GridSplitCheck::default();
        let mut settings = Settings::default();
        settings.aim_info = AimInfoFlags::SHIP_GRINDER_IMPULSE | AimInfoFlags::GRIND_GRID_SPLIT;
        let tool = Some(EquippedTool {
            kind: ToolKind::ShipGrinder,
            speed_multiplier: 1.0,
        });

        let text = render(&settings, tool, &def, &block, &predictor, &mut split);
        assert_eq!(
            text,
            "Grind impulse: 1 m/s (12.00 kN)\nGrid will split if this block is removed!\n"
        );

        render(&settings, tool, &def, &block, &predictor, &mut split);
        assert_eq!(predictor.calls.get(), 1);
    }

    #[test]
    fn notification_mod_line_is_single() {
        let mut def = terminal_def();
        def.context = Some(ModContext {
            name: "Fancy Blocks".to_string(),
            workshop_id: 42,
        });
        let block = aimed(&def);
        let predictor = Predictor {
            splits: false,
            calls: Cell::new(0),
        };
        let mut settings = Settings::default();
        settings.aim_info = AimInfoFlags::ADDED_BY_MOD;

        let registry = DefinitionRegistry::new();
        let session = GameSession::default();
        let ctx = AimContext {
            registry: &registry,
            settings: &settings,
            session: &session,
            tool: None,
            split_predictor: &predictor,
        };
        let mut buf = NotificationBuffer::new();
        {
            let mut out = Lines::new(&mut buf);
            aimed_text(&ctx, &def, &block, &mut GridSplitCheck::default(), &mut out);
        }
        let texts: Vec<&str> = buf.lines().iter().map(|line| line.text.as_str()).collect();
        assert_eq!(texts, vec!["• Mod: Fancy Blocks (42)"]);

        let mut split = GridSplitCheck::default();
        let text = render(&settings, None, &def, &block, &predictor, &mut split);
        assert_eq!(text, "Mod: Fancy Blocks\n       | Workshop ID: 42\n");
    }
}
