use std::fmt;

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::kinds::BlockKind;

/// Object-builder type of a block definition. Dispatch keys off this, not off `BlockKind`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockCategory {
    #[default]
    CubeBlock,
    TerminalBlock,
    Conveyor,
    ConveyorConnector,
    ShipConnector,
    Collector,
    CargoContainer,
    ConveyorSorter,
    Drill,
    ShipWelder,
    ShipGrinder,
    PistonBase,
    ExtendedPistonBase,
    MotorStator,
    MotorAdvancedStator,
    MotorSuspension,
    MergeBlock,
    LandingGear,
    ShipController,
    Cockpit,
    CryoChamber,
    RemoteControl,
    Thrust,
    Gyro,
    LightingBlock,
    InteriorLight,
    ReflectorLight,
    OreDetector,
    ProjectorBase,
    Projector,
    Door,
    AirtightDoorGeneric,
    AirtightHangarDoor,
    AirtightSlideDoor,
    AdvancedDoor,
    Parachute,
    MedicalRoom,
    ProductionBlock,
    Refinery,
    Assembler,
    SurvivalKit,
    GasTank,
    OxygenTank,
    OxygenGenerator,
    OxygenFarm,
    AirVent,
    UpgradeModule,
    Reactor,
    HydrogenEngine,
    BatteryBlock,
    SolarPanel,
    WindTurbine,
    RadioAntenna,
    LaserAntenna,
    Beacon,
    TimerBlock,
    ProgrammableBlock,
    TextPanel,
    SoundBlock,
    SensorBlock,
    CameraBlock,
    ButtonPanel,
    GravityGeneratorBase,
    GravityGenerator,
    GravityGeneratorSphere,
    VirtualMass,
    SpaceBall,
    JumpDrive,
    ConveyorTurretBase,
    UserControllableGun,
    LargeGatlingTurret,
    LargeMissileTurret,
    InteriorTurret,
    SmallGatlingGun,
    SmallMissileLauncher,
    SmallMissileLauncherReload,
    Warhead,
    #[serde(other)]
    Unknown,
}

impl BlockCategory {
    /// Doors whose grind ratio is scaled by the closed-door multiplier.
    pub fn is_closable_door(self) -> bool {
        matches!(self, BlockCategory::Door | BlockCategory::AdvancedDoor)
    }

    pub fn is_ship_tool(self) -> bool {
        matches!(self, BlockCategory::ShipWelder | BlockCategory::ShipGrinder)
    }

    pub fn is_large_turret(self) -> bool {
        matches!(
            self,
            BlockCategory::ConveyorTurretBase
                | BlockCategory::LargeGatlingTurret
                | BlockCategory::LargeMissileTurret
                | BlockCategory::InteriorTurret
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlockCategory::CubeBlock => "CubeBlock",
            BlockCategory::TerminalBlock => "TerminalBlock",
            BlockCategory::Conveyor => "Conveyor",
            BlockCategory::ConveyorConnector => "ConveyorConnector",
            BlockCategory::ShipConnector => "ShipConnector",
            BlockCategory::Collector => "Collector",
            BlockCategory::CargoContainer => "CargoContainer",
            BlockCategory::ConveyorSorter => "ConveyorSorter",
            BlockCategory::Drill => "Drill",
            BlockCategory::ShipWelder => "ShipWelder",
            BlockCategory::ShipGrinder => "ShipGrinder",
            BlockCategory::PistonBase => "PistonBase",
            BlockCategory::ExtendedPistonBase => "ExtendedPistonBase",
            BlockCategory::MotorStator => "MotorStator",
            BlockCategory::MotorAdvancedStator => "MotorAdvancedStator",
            BlockCategory::MotorSuspension => "MotorSuspension",
            BlockCategory::MergeBlock => "MergeBlock",
            BlockCategory::LandingGear => "LandingGear",
            BlockCategory::ShipController => "ShipController",
            BlockCategory::Cockpit => "Cockpit",
            BlockCategory::CryoChamber => "CryoChamber",
            BlockCategory::RemoteControl => "RemoteControl",
            BlockCategory::Thrust => "Thrust",
            BlockCategory::Gyro => "Gyro",
            BlockCategory::LightingBlock => "LightingBlock",
            BlockCategory::InteriorLight => "InteriorLight",
            BlockCategory::ReflectorLight => "ReflectorLight",
            BlockCategory::OreDetector => "OreDetector",
            BlockCategory::ProjectorBase => "ProjectorBase",
            BlockCategory::Projector => "Projector",
            BlockCategory::Door => "Door",
            BlockCategory::AirtightDoorGeneric => "AirtightDoorGeneric",
            BlockCategory::AirtightHangarDoor => "AirtightHangarDoor",
            BlockCategory::AirtightSlideDoor => "AirtightSlideDoor",
            BlockCategory::AdvancedDoor => "AdvancedDoor",
            BlockCategory::Parachute => "Parachute",
            BlockCategory::MedicalRoom => "MedicalRoom",
            BlockCategory::ProductionBlock => "ProductionBlock",
            BlockCategory::Refinery => "Refinery",
            BlockCategory::Assembler => "Assembler",
            BlockCategory::SurvivalKit => "SurvivalKit",
            BlockCategory::GasTank => "GasTank",
            BlockCategory::OxygenTank => "OxygenTank",
            BlockCategory::OxygenGenerator => "OxygenGenerator",
            BlockCategory::OxygenFarm => "OxygenFarm",
            BlockCategory::AirVent => "AirVent",
            BlockCategory::UpgradeModule => "UpgradeModule",
            BlockCategory::Reactor => "Reactor",
            BlockCategory::HydrogenEngine => "HydrogenEngine",
            BlockCategory::BatteryBlock => "BatteryBlock",
            BlockCategory::SolarPanel => "SolarPanel",
            BlockCategory::WindTurbine => "WindTurbine",
            BlockCategory::RadioAntenna => "RadioAntenna",
            BlockCategory::LaserAntenna => "LaserAntenna",
            BlockCategory::Beacon => "Beacon",
            BlockCategory::TimerBlock => "TimerBlock",
            BlockCategory::ProgrammableBlock => "ProgrammableBlock",
            BlockCategory::TextPanel => "TextPanel",
            BlockCategory::SoundBlock => "SoundBlock",
            BlockCategory::SensorBlock => "SensorBlock",
            BlockCategory::CameraBlock => "CameraBlock",
            BlockCategory::ButtonPanel => "ButtonPanel",
            BlockCategory::GravityGeneratorBase => "GravityGeneratorBase",
            BlockCategory::GravityGenerator => "GravityGenerator",
            BlockCategory::GravityGeneratorSphere => "GravityGeneratorSphere",
            BlockCategory::VirtualMass => "VirtualMass",
            BlockCategory::SpaceBall => "SpaceBall",
            BlockCategory::JumpDrive => "JumpDrive",
            BlockCategory::ConveyorTurretBase => "ConveyorTurretBase",
            BlockCategory::UserControllableGun => "UserControllableGun",
            BlockCategory::LargeGatlingTurret => "LargeGatlingTurret",
            BlockCategory::LargeMissileTurret => "LargeMissileTurret",
            BlockCategory::InteriorTurret => "InteriorTurret",
            BlockCategory::SmallGatlingGun => "SmallGatlingGun",
            BlockCategory::SmallMissileLauncher => "SmallMissileLauncher",
            BlockCategory::SmallMissileLauncherReload => "SmallMissileLauncherReload",
            BlockCategory::Warhead => "Warhead",
            BlockCategory::Unknown => "Unknown",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockDefinitionId {
    pub category: BlockCategory,
    pub subtype: String,
}

impl BlockDefinitionId {
    pub fn new(category: BlockCategory, subtype: impl Into<String>) -> Self {
        Self {
            category,
            subtype: subtype.into(),
        }
    }
}

impl fmt::Display for BlockDefinitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category.as_str(), self.subtype)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CubeSize {
    #[default]
    Large,
    Small,
}

impl CubeSize {
    /// Edge length of one grid cell in meters.
    pub fn cell_meters(self) -> f32 {
        match self {
            CubeSize::Large => 2.5,
            CubeSize::Small => 0.5,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topology {
    #[default]
    Cube,
    TriangleMesh,
}

/// Where a definition came from. `None` on a definition means the base game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModContext {
    pub name: String,
    #[serde(default)]
    pub workshop_id: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentEntry {
    pub name: String,
    #[serde(default)]
    pub count: u32,
    /// Item received on grinding, when it differs from the component itself.
    #[serde(default)]
    pub deconstructs_to: Option<String>,
}

/// One recorded face of the pressurization map: `cell` seals (or not) toward `cell + offset`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacePressurization {
    pub cell: IVec3,
    pub offset: IVec3,
    pub pressurized: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockDefinition {
    pub id: BlockDefinitionId,
    pub display_name: String,
    #[serde(default)]
    pub cube_size: CubeSize,
    /// Size in cells.
    pub size: Vec3,
    pub mass: f32,
    pub max_integrity: f32,
    pub integrity_per_second: f32,
    #[serde(default = "default_critical_ratio")]
    pub critical_integrity_ratio: f32,
    #[serde(default = "default_ownership_ratio")]
    pub ownership_integrity_ratio: f32,
    #[serde(default)]
    pub topology: Topology,
    #[serde(default)]
    pub uses_deformation: bool,
    #[serde(default)]
    pub deformation_ratio: f32,
    #[serde(default = "one")]
    pub disassemble_ratio: f32,
    #[serde(default = "one")]
    pub damage_multiplier: f32,
    #[serde(default = "yes")]
    pub has_build_models: bool,
    #[serde(default)]
    pub has_computer: bool,
    #[serde(default)]
    pub components: Vec<ComponentEntry>,
    /// Subtypes of the block variants grouped under this one.
    #[serde(default)]
    pub block_stages: Vec<String>,
    #[serde(default)]
    pub mirroring_block: Option<String>,
    /// Explicit airtightness; `None` derives it from `pressurization`.
    #[serde(default)]
    pub airtight: Option<bool>,
    #[serde(default)]
    pub pressurization: Vec<FacePressurization>,
    /// Volume of the inventory component in m³, when the definition declares one.
    #[serde(default)]
    pub inventory_component: Option<f32>,
    #[serde(default)]
    pub context: Option<ModContext>,
    #[serde(default)]
    pub kind: BlockKind,
}

impl BlockDefinition {
    pub fn is_base_game(&self) -> bool {
        self.context.is_none()
    }

    pub fn occupied_cells(&self) -> impl Iterator<Item = IVec3> {
        let dims = self.size.max(Vec3::ONE).as_ivec3();
        (0..dims.x).flat_map(move |x| {
            (0..dims.y).flat_map(move |y| (0..dims.z).map(move |z| IVec3::new(x, y, z)))
        })
    }

    /// Grind ratio after category adjustments.
    pub fn effective_grind_ratio(&self, closed_door_multiplier: f32) -> f32 {
        if self.id.category.is_closable_door() {
            self.disassemble_ratio * closed_door_multiplier
        } else {
            self.disassemble_ratio
        }
    }

    /// Components that come back as a different item when ground down.
    pub fn grind_changes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.components.iter().filter_map(|comp| {
            comp.deconstructs_to
                .as_deref()
                .filter(|item| *item != comp.name)
                .map(|item| (comp.name.as_str(), item))
        })
    }

    pub fn minimal(id: BlockDefinitionId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            cube_size: CubeSize::Large,
            size: Vec3::ONE,
            mass: 0.0,
            max_integrity: 1.0,
            integrity_per_second: 1.0,
            critical_integrity_ratio: default_critical_ratio(),
            ownership_integrity_ratio: default_ownership_ratio(),
            topology: Topology::Cube,
            uses_deformation: false,
            deformation_ratio: 0.0,
            disassemble_ratio: 1.0,
            damage_multiplier: 1.0,
            has_build_models: true,
            has_computer: false,
            components: Vec::new(),
            block_stages: Vec::new(),
            mirroring_block: None,
            airtight: None,
            pressurization: Vec::new(),
            inventory_component: None,
            context: None,
            kind: BlockKind::Decorative,
        }
    }
}

fn default_critical_ratio() -> f32 {
    0.5
}

fn default_ownership_ratio() -> f32 {
    0.5
}

fn one() -> f32 {
    1.0
}

fn yes() -> bool {
    true
}
