use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::item::{InventoryConstraint, ItemId};

/// Category-specific payload of a block definition. Power values are in MW.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockKind {
    #[default]
    Decorative,
    Terminal,
    Conveyor,
    Connector,
    Cargo(CargoData),
    Sorter(SorterData),
    Drill(DrillData),
    ShipTool(ShipToolData),
    Piston(PistonData),
    Rotor(RotorData),
    MergeBlock(MergeBlockData),
    LandingGear(LandingGearData),
    ShipController(ShipControllerData),
    Thrust(ThrustData),
    Gyro(GyroData),
    Light(LightData),
    OreDetector(OreDetectorData),
    Projector(SinkPower),
    Door(DoorData),
    AirtightDoor(AirtightDoorData),
    AdvancedDoor(AdvancedDoorData),
    Parachute(ParachuteData),
    MedicalRoom(MedicalRoomData),
    Production(ProductionData),
    OxygenFarm(OxygenFarmData),
    AirVent(AirVentData),
    UpgradeModule(UpgradeModuleData),
    PowerProducer(PowerProducerData),
    RadioAntenna(BroadcastData),
    LaserAntenna(LaserAntennaData),
    Beacon(BroadcastData),
    Timer(TimerData),
    ProgrammableBlock(SinkGroup),
    TextPanel(TextPanelData),
    SoundBlock(SoundBlockData),
    Sensor(SensorData),
    Camera(CameraData),
    ButtonPanel(ButtonPanelData),
    GravityGenerator(GravityGeneratorData),
    VirtualMass(VirtualMassData),
    SpaceBall(SpaceBallData),
    JumpDrive(JumpDriveData),
    Weapon(WeaponBlockData),
    Warhead(WarheadData),
}

impl BlockKind {
    /// Peak power input declared by the payload and its sink group, if the payload has one.
    pub fn power_input(&self) -> Option<(f32, Option<&str>)> {
        let (mw, group) = match self {
            BlockKind::Cargo(data) => {
                let powered = data.powered.as_ref()?;
                (powered.required_input, &powered.sink_group)
            }
            BlockKind::Projector(data) => (data.required_input, &data.sink_group),
            BlockKind::Sorter(data) => (data.power_input, &data.sink_group),
            BlockKind::Piston(data) => (data.required_power_input, &data.sink_group),
            BlockKind::Rotor(data) => (data.required_power_input, &data.sink_group),
            BlockKind::Thrust(data) => (data.max_power, &data.sink_group),
            BlockKind::Gyro(data) => (data.required_power_input, &data.sink_group),
            BlockKind::Light(data) => (data.required_power_input, &data.sink_group),
            BlockKind::AirtightDoor(data) => (data.power_moving, &data.sink_group),
            BlockKind::AdvancedDoor(data) => (data.power_moving, &data.sink_group),
            BlockKind::Parachute(data) => (data.power_moving, &data.sink_group),
            BlockKind::Production(data) => (data.operational_power, &data.sink_group),
            BlockKind::OxygenFarm(data) => (data.operational_power, &data.sink_group),
            BlockKind::AirVent(data) => (data.operational_power, &data.sink_group),
            BlockKind::LaserAntenna(data) => (data.power_lasing, &data.sink_group),
            BlockKind::TextPanel(data) => (data.required_power_input, &data.sink_group),
            BlockKind::Camera(data) => (data.required_power_input, &data.sink_group),
            BlockKind::VirtualMass(data) => (data.required_power_input, &data.sink_group),
            BlockKind::JumpDrive(data) => (data.required_power_input, &data.sink_group),
            _ => return None,
        };
        Some((mw, group.as_deref()))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkGroup {
    pub sink_group: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkPower {
    pub required_input: f32,
    pub sink_group: Option<String>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CargoData {
    /// m³
    pub inventory_volume: f32,
    /// Present on collectors.
    pub powered: Option<SinkPower>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SorterData {
    pub power_input: f32,
    pub sink_group: Option<String>,
    pub inventory_volume: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillData {
    pub sink_group: Option<String>,
    pub sensor_radius: f32,
    pub cutout_radius: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipToolData {
    pub sensor_radius: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PistonData {
    pub required_power_input: f32,
    pub sink_group: Option<String>,
    pub max_extension: f32,
    pub max_velocity: f32,
    pub top_part: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotorData {
    pub required_power_input: f32,
    pub sink_group: Option<String>,
    /// N·m
    pub max_torque: f32,
    pub displacement_min: f32,
    pub displacement_max: f32,
    pub displacement_min_small: f32,
    pub displacement_max_small: f32,
    pub top_part: Option<String>,
    pub suspension: Option<SuspensionData>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuspensionData {
    pub propulsion_force: f32,
    pub axle_friction: f32,
    /// radians
    pub max_steer: f32,
    pub steering_speed: f32,
    pub min_height: f32,
    pub max_height: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeBlockData {
    pub strength: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingGearData {
    pub max_lock_separating_velocity: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipControllerData {
    pub ship_control: bool,
    pub builder_cockpit: bool,
    pub first_person: bool,
    pub remote_power: Option<SinkPower>,
    /// Idle draw of a cryo chamber.
    pub cryo_power: Option<SinkPower>,
    pub cockpit: Option<CockpitData>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CockpitData {
    pub pressurized: bool,
    /// liters
    pub oxygen_capacity: f32,
    pub hud: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FuelConverter {
    pub fuel: ItemId,
    pub efficiency: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrustData {
    pub force: f32,
    pub slowdown_factor: f32,
    pub max_power: f32,
    pub min_power: f32,
    pub sink_group: Option<String>,
    pub fuel: Option<FuelConverter>,
    pub effectiveness_at_min_influence: f32,
    pub effectiveness_at_max_influence: f32,
    pub min_planetary_influence: f32,
    pub max_planetary_influence: f32,
    pub consumption_factor_per_g: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GyroData {
    pub required_power_input: f32,
    pub sink_group: Option<String>,
    pub force: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightData {
    pub required_power_input: f32,
    pub sink_group: Option<String>,
    pub spotlight: bool,
    pub radius: ValueRange,
    pub reflector_radius: ValueRange,
    pub intensity: ValueRange,
    pub falloff: ValueRange,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OreDetectorData {
    pub sink_group: Option<String>,
    pub max_range: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorData {
    pub sink_group: Option<String>,
    pub opening_speed: f32,
    pub max_open: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirtightDoorData {
    pub power_moving: f32,
    pub power_idle: f32,
    pub sink_group: Option<String>,
    pub opening_speed: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedDoorData {
    pub power_moving: f32,
    pub power_idle: f32,
    pub sink_group: Option<String>,
    pub sequence: Vec<DoorStep>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorStep {
    pub max_open: f32,
    pub speed: f32,
    pub delay_ms: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParachuteData {
    pub power_moving: f32,
    pub power_idle: f32,
    pub sink_group: Option<String>,
    pub deploy_cost: u32,
    pub material: Option<ItemId>,
    pub min_atmosphere: f32,
    pub reef_atmosphere: f32,
    pub drag_coefficient: f32,
    pub radius_multiplier: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicalRoomData {
    pub sink_group: Option<String>,
    pub respawn_allowed: bool,
    pub force_suit_change: bool,
    pub respawn_suit: Option<String>,
    pub healing: bool,
    pub refuel: bool,
    pub suit_change: bool,
    pub custom_wardrobes_enabled: bool,
    pub custom_wardrobes: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionData {
    pub operational_power: f32,
    pub standby_power: f32,
    pub sink_group: Option<String>,
    pub inventory_volume: f32,
    pub inventory_max_volume: f32,
    pub input_constraint: Option<InventoryConstraint>,
    pub output_constraint: Option<InventoryConstraint>,
    /// `None` when the definition does not list blueprint classes at all.
    pub blueprint_classes: Option<Vec<String>>,
    pub specialization: ProductionKind,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProductionKind {
    #[default]
    Generic,
    Assembler {
        assembly_speed: f32,
    },
    SurvivalKit {
        assembly_speed: f32,
    },
    Refinery {
        refine_speed: f32,
        material_efficiency: f32,
    },
    GasTank {
        stored_gas: String,
        capacity: f32,
    },
    OxygenGenerator {
        ice_per_second: f32,
        #[serde(default)]
        produced_gases: Vec<ProducedGas>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProducedGas {
    pub gas: String,
    pub ice_to_gas_ratio: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OxygenFarmData {
    pub operational_power: f32,
    pub sink_group: Option<String>,
    pub source_group: Option<String>,
    pub max_gas_output: f32,
    pub produced_gas: String,
    pub two_sided: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirVentData {
    pub standby_power: f32,
    pub operational_power: f32,
    pub sink_group: Option<String>,
    pub source_group: Option<String>,
    pub capacity_per_second: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeModuleData {
    pub upgrades: Vec<Upgrade>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeKind {
    #[default]
    Additive,
    Multiplicative,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Upgrade {
    pub name: String,
    pub modifier: f32,
    #[serde(default)]
    pub kind: UpgradeKind,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerProducerData {
    pub max_output: f32,
    pub source_group: Option<String>,
    pub producer: ProducerKind,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProducerKind {
    #[default]
    Generic,
    HydrogenEngine {
        fuel: ItemId,
        fuel_capacity: f32,
        fuel_production_to_capacity: f32,
        #[serde(default)]
        sink_group: Option<String>,
    },
    Reactor {
        #[serde(default)]
        fuels: Vec<ReactorFuel>,
        #[serde(default)]
        inventory_volume: f32,
        #[serde(default)]
        inventory_max_volume: f32,
        #[serde(default)]
        constraint: Option<InventoryConstraint>,
    },
    Battery {
        required_input: f32,
        #[serde(default)]
        sink_group: Option<String>,
        #[serde(default)]
        adaptible_input: bool,
        /// MWh
        max_stored: f32,
        #[serde(default)]
        initial_ratio: f32,
    },
    Solar {
        #[serde(default)]
        two_sided: bool,
    },
    WindTurbine {
        ground_clearance: f32,
        raycaster_size: f32,
        optimal_wind_speed: f32,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReactorFuel {
    pub fuel: ItemId,
    pub per_second: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BroadcastData {
    pub sink_group: Option<String>,
    pub max_radius: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserAntennaData {
    pub power_lasing: f32,
    pub power_turning: f32,
    pub power_idle: f32,
    pub sink_group: Option<String>,
    /// Negative means unlimited.
    pub max_range: f32,
    pub line_of_sight: bool,
    pub min_elevation: f32,
    pub max_elevation: f32,
    pub min_azimuth: f32,
    pub max_azimuth: f32,
    pub rotation_rate: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerData {
    pub sink_group: Option<String>,
    pub min_delay_ms: f32,
    pub max_delay_ms: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextPanelData {
    pub required_power_input: f32,
    pub sink_group: Option<String>,
    pub texture_resolution: u32,
    pub texture_aspect_ratio: u32,
    pub min_font_size: f32,
    pub max_font_size: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundBlockData {
    pub sink_group: Option<String>,
    pub min_range: f32,
    pub max_range: f32,
    pub max_loop_period: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorData {
    pub sink_group: Option<String>,
    pub max_range: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraData {
    pub required_power_input: f32,
    pub charging_power: f32,
    pub sink_group: Option<String>,
    /// radians
    pub min_fov: f32,
    pub max_fov: f32,
    /// degrees
    pub raycast_cone_limit: f32,
    /// Negative means unlimited.
    pub raycast_distance_limit: f64,
    pub raycast_time_multiplier: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonPanelData {
    pub sink_group: Option<String>,
    pub button_count: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityGeneratorData {
    pub min_acceleration: f32,
    pub max_acceleration: f32,
    pub shape: GravityShape,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GravityShape {
    Flat {
        required_power_input: f32,
        #[serde(default)]
        sink_group: Option<String>,
        min_field_size: Vec3,
        max_field_size: Vec3,
    },
    Sphere {
        #[serde(default)]
        sink_group: Option<String>,
        min_radius: f32,
        max_radius: f32,
        base_power_input: f32,
        consumption_power: f32,
    },
}

impl Default for GravityShape {
    fn default() -> Self {
        GravityShape::Flat {
            required_power_input: 0.0,
            sink_group: None,
            min_field_size: Vec3::ZERO,
            max_field_size: Vec3::ZERO,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VirtualMassData {
    pub required_power_input: f32,
    pub sink_group: Option<String>,
    pub virtual_mass: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceBallData {
    pub max_virtual_mass: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpDriveData {
    pub required_power_input: f32,
    pub sink_group: Option<String>,
    /// MWh
    pub power_needed_for_jump: f32,
    pub jump_delay: f32,
    pub max_jump_distance: f64,
    pub max_jump_mass: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponBlockData {
    pub weapon_id: String,
    pub sink_group: Option<String>,
    pub inventory_max_volume: f32,
    pub turret: Option<TurretData>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurretData {
    pub ai_enabled: bool,
    pub idle_rotation: bool,
    pub max_range: f32,
    pub min_elevation: f32,
    pub max_elevation: f32,
    pub elevation_speed: f32,
    pub min_azimuth: f32,
    pub max_azimuth: f32,
    pub rotation_speed: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarheadData {
    pub explosion_radius: f32,
    pub explosion_damage: f32,
}
