//! Everything the engine reads from or hands back to the game.
//!
//! The engine never talks to the game directly. Session state arrives in plain structs once per
//! tick, and output leaves through the [`OverlayRenderer`] and [`NotificationHud`] traits.

use std::time::Instant;

use blockinfo_shared::block::BlockDefinitionId;
use glam::Vec2;

use crate::lines::{Line, StyledRun};
use crate::palette::Rgb;

/// How the local player relates to a block owner.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Relation {
    #[default]
    NoOwnership,
    Owner,
    FactionShare,
    Neutral,
    Enemies,
}

/// Who besides the owner may use a block.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShareMode {
    #[default]
    None,
    Faction,
    All,
}

/// Game HUD visibility, cycled by the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum HudState {
    Off,
    #[default]
    Hints,
    Basic,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ToolKind {
    HandWelder,
    HandGrinder,
    ShipWelder,
    ShipGrinder,
}

impl ToolKind {
    pub fn is_grinder(self) -> bool {
        matches!(self, ToolKind::HandGrinder | ToolKind::ShipGrinder)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EquippedTool {
    pub kind: ToolKind,
    /// Speed multiplier of a hand tool. Ship tools ignore it.
    pub speed_multiplier: f32,
}

impl EquippedTool {
    pub fn hand_welder() -> Self {
        Self {
            kind: ToolKind::HandWelder,
            speed_multiplier: 1.0,
        }
    }

    pub fn hand_grinder() -> Self {
        Self {
            kind: ToolKind::HandGrinder,
            speed_multiplier: 1.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SessionMultipliers {
    pub welder: f32,
    pub grinder: f32,
    pub hacking: f32,
    pub assembler_speed: f32,
    pub assembler_efficiency: f32,
    pub refinery_speed: f32,
}

impl Default for SessionMultipliers {
    fn default() -> Self {
        Self {
            welder: 1.0,
            grinder: 1.0,
            hacking: 1.0,
            assembler_speed: 1.0,
            assembler_efficiency: 1.0,
            refinery_speed: 1.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GameSession {
    pub multipliers: SessionMultipliers,
    pub creative: bool,
    pub copy_paste: bool,
    pub player_identity: u64,
    /// Block currently selected on the toolbar, used for the variant counter.
    pub toolbar_block: Option<BlockDefinitionId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnerInfo {
    pub identity: u64,
    pub name: String,
    pub faction_tag: Option<String>,
}

/// Placed block under the crosshair, sampled by the host each tick.
#[derive(Clone, Debug, PartialEq)]
pub struct AimedBlock {
    /// Unique per placed block; a change resets the grid-split check.
    pub instance: u64,
    pub definition: BlockDefinitionId,
    /// Custom terminal name. `None` for blocks without a terminal.
    pub custom_name: Option<String>,
    pub is_terminal: bool,
    pub integrity: f32,
    pub max_integrity: f32,
    pub deformed: bool,
    pub inventory_mass: f32,
    /// `None` when the grid has no physics.
    pub grid_mass: Option<f32>,
    pub linear_speed: f32,
    pub angular_speed: f32,
    /// `None` when nobody owns the block.
    pub owner: Option<OwnerInfo>,
    pub relation: Relation,
    pub share: ShareMode,
    /// Impulse in N·s pushed on the grid by a ship grinder, when one is grinding it.
    pub grinder_impulse: Option<f32>,
}

/// State of the overlay toggles owned by the host, shown in the menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuToggles {
    pub overlay_mode: String,
    pub placement_transparency: bool,
    pub freeze_placement: bool,
}

impl Default for MenuToggles {
    fn default() -> Self {
        Self {
            overlay_mode: "OFF".to_string(),
            placement_transparency: false,
            freeze_placement: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DisplayState {
    pub hud: HudState,
    pub hud_background_opacity: f32,
    pub aspect_ratio: f32,
    pub cursor_visible: bool,
    /// Whether the rich-text overlay library is installed.
    pub rich_text_available: bool,
    pub toggles: MenuToggles,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            hud: HudState::Hints,
            hud_background_opacity: 0.6,
            aspect_ratio: 16.0 / 9.0,
            cursor_visible: false,
            rich_text_available: true,
            toggles: MenuToggles::default(),
        }
    }
}

/// Per-type data that only exists on a spawned block.
#[derive(Clone, Debug, PartialEq)]
pub enum LiveData {
    Connector {
        connectable: bool,
        can_throw: bool,
    },
    Thrust {
        flames: u32,
        max_distance: f32,
        ship_damage: f32,
        other_damage: f32,
    },
}

/// What the player is looking at this tick.
#[derive(Clone, Copy, Debug, Default)]
pub enum Target<'a> {
    #[default]
    Nothing,
    Held(&'a BlockDefinitionId),
    Aimed(&'a AimedBlock),
}

pub struct TickInput<'a> {
    pub now: Instant,
    pub target: Target<'a>,
    pub session: &'a GameSession,
    pub display: &'a DisplayState,
    pub tool: Option<EquippedTool>,
}

/// One rich-text draw, in normalized screen coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawRequest<'a> {
    pub runs: &'a [StyledRun],
    pub scale: f32,
    pub position: Vec2,
    pub offset: Vec2,
    pub background: Option<Background>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Background {
    pub color: Rgb,
    pub opacity: f32,
    pub size: Vec2,
    pub offset: Vec2,
}

/// Rich-text overlay library.
pub trait OverlayRenderer {
    /// Size of the text block at `scale`; height is negative because text grows downward.
    fn measure(&mut self, runs: &[StyledRun], scale: f32) -> Vec2;
    fn draw(&mut self, request: &DrawRequest<'_>);
    fn hide(&mut self);
}

/// Plain notification lines of the game HUD.
pub trait NotificationHud {
    /// Shows exactly `lines`, in order, hiding every other line.
    fn show_lines(&mut self, lines: &[&Line]);
    fn hide(&mut self);
}

/// Answers whether removing a block would split its grid. Potentially expensive.
pub trait GridSplitPredictor {
    fn would_split(&self, block: &AimedBlock) -> bool;
}

/// Output side of the host.
pub struct Outputs<'a> {
    pub overlay: &'a mut dyn OverlayRenderer,
    pub hud: &'a mut dyn NotificationHud,
    pub split_predictor: &'a dyn GridSplitPredictor,
}
