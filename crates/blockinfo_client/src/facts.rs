//! Derived facts about a block: airtightness, tool timings, access classification, grid splits.

use blockinfo_shared::block::BlockDefinition;
use rustc_hash::FxHashSet;

use crate::hardcoded;
use crate::host::{AimedBlock, GridSplitPredictor, Relation, ShareMode};
use crate::palette::{self, Rgb};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Airtightness {
    Sealed,
    NotSealed,
    Partial { sealed: u32, total: u32 },
}

/// Classifies the block's outer faces. Faces that point into the block's own cells do not count.
pub fn airtightness(def: &BlockDefinition) -> Airtightness {
    if let Some(airtight) = def.airtight {
        return if airtight {
            Airtightness::Sealed
        } else {
            Airtightness::NotSealed
        };
    }

    let occupied: FxHashSet<_> = def.occupied_cells().collect();
    let mut sealed = 0;
    let mut total = 0;

    for face in &def.pressurization {
        if occupied.contains(&(face.cell + face.offset)) {
            continue;
        }
        total += 1;
        if face.pressurized {
            sealed += 1;
        }
    }

    if sealed == 0 {
        Airtightness::NotSealed
    } else if sealed == total {
        Airtightness::Sealed
    } else {
        Airtightness::Partial { sealed, total }
    }
}

/// Seconds to weld the block from nothing to full integrity.
pub fn build_time(def: &BlockDefinition, weld_mul: f32, tool_mul: f32) -> f32 {
    def.max_integrity / def.integrity_per_second / weld_mul / tool_mul
}

/// Seconds to grind a full-integrity block away, before any ownership hacking.
pub fn grind_time(def: &BlockDefinition, weld_mul: f32, tool_mul: f32, grind_mul: f32) -> f32 {
    let ratio = def.effective_grind_ratio(hardcoded::DOOR_CLOSED_DISASSEMBLE_MULTIPLIER);
    build_time(def, weld_mul, tool_mul) * ratio / grind_mul
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GrindEstimate {
    /// Seconds until the block is dismantled.
    pub total: f32,
    /// Seconds until ownership is lost, when the block is grinded as a hack.
    pub hack: Option<f32>,
}

/// Grind time starting from `integrity_ratio`. Hacking applies while integrity stays above the
/// ownership ratio of an owned computer block.
pub fn grind_from(
    def: &BlockDefinition,
    full_grind: f32,
    integrity_ratio: f32,
    hackable: bool,
    hack_mul: f32,
) -> GrindEstimate {
    if !hackable {
        return GrindEstimate {
            total: full_grind * integrity_ratio,
            hack: None,
        };
    }

    let ownership = def.ownership_integrity_ratio;
    let no_ownership = full_grind * ownership;
    let hack = full_grind * ((1.0 - ownership) - (1.0 - integrity_ratio)) / hack_mul;

    GrindEstimate {
        total: no_ownership + hack,
        hack: Some(hack),
    }
}

/// Access line color and label for a block's share setting.
pub fn access(relation: Relation, share: ShareMode) -> (Rgb, &'static str) {
    if relation == Relation::NoOwnership {
        return (palette::GOOD, "Access: all");
    }

    match share {
        ShareMode::All => match relation {
            Relation::Neutral | Relation::Enemies => (palette::GOOD, "Access: all"),
            _ => (palette::WARNING, "Access: all"),
        },
        ShareMode::Faction => match relation {
            Relation::Owner | Relation::FactionShare => (palette::GOOD, "Access: faction"),
            _ => (palette::BAD, "Access: faction"),
        },
        ShareMode::None => match relation {
            Relation::Owner => (palette::WARNING, "Access: owner"),
            _ => (palette::BAD, "Access: owner"),
        },
    }
}

pub fn owner_color(relation: Relation) -> Rgb {
    match relation {
        Relation::Enemies | Relation::Neutral => palette::BAD,
        Relation::Owner => palette::OWNER,
        Relation::FactionShare => palette::GOOD,
        Relation::NoOwnership => palette::WARNING,
    }
}

/// Speed change in m/s caused by a grinder impulse on a grid of `grid_mass` kg.
pub fn impulse_speed(impulse: f32, grid_mass: f32) -> f32 {
    if grid_mass <= 0.0 {
        return 0.0;
    }
    impulse / grid_mass
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TriState {
    #[default]
    Unknown,
    Yes,
    No,
}

/// Lazily answered "would this split the grid" for the aimed block.
#[derive(Debug, Default)]
pub struct GridSplitCheck {
    instance: Option<u64>,
    state: TriState,
}

impl GridSplitCheck {
    pub fn would_split(&mut self, block: &AimedBlock, predictor: &dyn GridSplitPredictor) -> bool {
        if self.instance != Some(block.instance) {
            self.instance = Some(block.instance);
            self.state = TriState::Unknown;
        }

        if self.state == TriState::Unknown {
            self.state = if predictor.would_split(block) {
                TriState::Yes
            } else {
                TriState::No
            };
        }

        self.state == TriState::Yes
    }

    pub fn forget(&mut self) {
        self.instance = None;
        self.state = TriState::Unknown;
    }
}
