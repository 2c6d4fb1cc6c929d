//! Game values that block definitions do not carry. Lines using them mark their label with "*".

use blockinfo_shared::block::{BlockDefinition, CubeSize};
use blockinfo_shared::item::InventoryConstraint;
use blockinfo_shared::kinds::{AdvancedDoorData, GravityShape, LaserAntennaData, ParachuteData};
use glam::Vec3;

pub const EARTH_GRAVITY: f32 = 9.81;

pub const DOOR_CLOSED_DISASSEMBLE_MULTIPLIER: f32 = 3.3;

pub const CONVEYOR_POWER: f32 = 0.000_02;
pub const CONVEYOR_POWER_GROUP: &str = "Conveyors";

pub const CONNECTOR_POWER_GROUP: &str = "Conveyors";

pub const DRILL_POWER: f32 = 0.002;

pub const SHIP_TOOL_POWER: f32 = 0.002;
pub const SHIP_TOOL_POWER_GROUP: &str = "Defense";
pub const SHIP_WELDER_WELD_PER_SECOND: f32 = 2.0;
pub const SHIP_GRINDER_GRIND_PER_SECOND: f32 = 2.0;
/// Ship tools work this much faster than an unupgraded hand tool.
pub const SHIP_TOOL_SPEED_MULTIPLIER: f32 = 2.0;

pub const ORE_DETECTOR_POWER: f32 = 0.002;
pub const DOOR_POWER: f32 = 0.000_03;
pub const MEDICAL_ROOM_POWER: f32 = 0.002;
pub const TIMER_POWER: f32 = 0.000_000_1;
pub const PROGRAMMABLE_BLOCK_POWER: f32 = 0.000_5;
pub const SOUND_BLOCK_POWER: f32 = 0.000_2;
pub const BUTTON_PANEL_POWER: f32 = 0.000_1;
pub const TURRET_POWER: f32 = 0.002;
pub const SHIP_GUN_POWER: f32 = 0.000_2;

pub const PROJECTILE_RANGE_MIN_MULTIPLIER: f32 = 0.8;
pub const PROJECTILE_RANGE_MAX_MULTIPLIER: f32 = 1.2;
pub const MISSILE_DESIRED_SPEED_MULTIPLIER: f32 = 0.7;

/// Definition rotation speeds are per tick.
pub const TURRET_ROTATION_SPEED_MULTIPLIER: f32 = 60.0;
pub const LASER_ANTENNA_ROTATION_SPEED_MULTIPLIER: f32 = 60.0;

/// m³
pub const COCKPIT_INVENTORY_VOLUME: f32 = 1.0;

pub const PARACHUTE_TARGET_DESCEND_VELOCITY: f32 = 10.0;

pub fn connector_power(def: &BlockDefinition) -> f32 {
    match def.cube_size {
        CubeSize::Large => 0.001,
        CubeSize::Small => 0.000_2,
    }
}

/// Box volume of the block scaled by `fill`, in m³.
fn block_volume(def: &BlockDefinition, fill: f32) -> f32 {
    let meters = def.size * def.cube_size.cell_meters();
    meters.x * meters.y * meters.z * fill
}

pub fn connector_inventory_volume(def: &BlockDefinition) -> f32 {
    block_volume(def, 0.8)
}

pub fn cargo_inventory_volume(def: &BlockDefinition) -> f32 {
    block_volume(def, 0.8)
}

pub fn ship_tool_inventory_volume(def: &BlockDefinition) -> f32 {
    block_volume(def, 0.5)
}

pub fn drill_inventory_volume(def: &BlockDefinition) -> f32 {
    block_volume(def, 0.5)
}

pub fn drill_inventory_constraint() -> InventoryConstraint {
    InventoryConstraint {
        description: Some("Ores only".to_string()),
        whitelist: true,
        ids: Vec::new(),
        types: vec!["Ore".to_string()],
    }
}

/// Antenna draw at full broadcast radius.
pub fn radio_antenna_power(max_radius: f32) -> f32 {
    max_radius / 500.0 * 0.002
}

pub fn beacon_power(max_radius: f32) -> f32 {
    max_radius / 100_000.0 * 0.02
}

/// Cube edge lengths of the sensor field at its maximum range.
pub fn sensor_max_field(max_range: f32) -> Vec3 {
    Vec3::splat(max_range * 2.0)
}

pub fn sensor_power(field: Vec3) -> f32 {
    0.000_3 * (field.x * field.y * field.z).cbrt()
}

/// Draw of a spherical gravity field, relative to a 100 m field at 1 g.
pub fn sphere_gravity_power(shape: &GravityShape, radius: f32, acceleration: f32) -> f32 {
    let GravityShape::Sphere {
        base_power_input,
        consumption_power,
        ..
    } = shape
    else {
        return 0.0;
    };

    let volume = radius.powi(3);
    let reference = 100.0_f32.powi(3);
    base_power_input + volume / reference * consumption_power * (acceleration.abs() / EARTH_GRAVITY)
}

/// Draw while lasing across `meters`.
pub fn laser_antenna_power(data: &LaserAntennaData, meters: f32) -> f32 {
    data.power_lasing * meters / 1000.0
}

/// Seconds for a sliding door to travel its full distance.
pub fn door_move_time(opening_speed: f32, max_open: f32) -> f32 {
    if opening_speed <= 0.0 {
        return 0.0;
    }
    max_open / opening_speed
}

pub fn airtight_door_move_time(opening_speed: f32) -> f32 {
    if opening_speed <= 0.0 {
        return 0.0;
    }
    1.0 / opening_speed
}

/// Opening and closing time in seconds; the parts move in parallel with their own delays.
pub fn advanced_door_move_time(door: &AdvancedDoorData) -> (f32, f32) {
    let mut open: f32 = 0.0;
    let mut close: f32 = 0.0;

    for step in &door.sequence {
        let travel = if step.speed > 0.0 {
            step.max_open / step.speed
        } else {
            0.0
        };
        let delay = step.delay_ms / 1000.0;
        open = open.max(delay + travel);
        close = close.max(travel);
    }

    (open, close)
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParachuteDetails {
    /// Heaviest grid that still descends at the target velocity in 1 g and 1.0 air density.
    pub max_mass: f32,
    /// Atmosphere level at which the canopy opens fully.
    pub disreef_atmosphere: f32,
}

pub fn parachute_details(
    chute: &ParachuteData,
    grid_size: f32,
    target_velocity: f32,
) -> ParachuteDetails {
    let atmosphere = 1.0_f32;
    let density = 1.225_f32;

    let disreef_atmosphere = ((-4.5_f32).exp() + 1.0) / 10.0 + chute.reef_atmosphere;
    let atmos_mod = 10.0 * (atmosphere - chute.reef_atmosphere - chute.min_atmosphere).clamp(0.0, 1.0);
    let chute_size = atmos_mod * chute.radius_multiplier * grid_size / 2.0;
    let area = std::f32::consts::PI * chute_size * chute_size;

    let max_mass =
        2.5 * density * target_velocity * target_velocity * area * chute.drag_coefficient
            / EARTH_GRAVITY;

    ParachuteDetails {
        max_mass,
        disreef_atmosphere,
    }
}

#[cfg(test)]
mod tests {
    use blockinfo_shared::block::{BlockCategory, BlockDefinition, BlockDefinitionId, CubeSize};
    use blockinfo_shared::kinds::{AdvancedDoorData, DoorStep, GravityShape, ParachuteData};
    use glam::Vec3;

    use super::*;

    #[test]
    fn inventory_volumes_follow_block_size() {
        let mut def = BlockDefinition::minimal(
            BlockDefinitionId::new(BlockCategory::ShipConnector, "Connector"),
            "Connector",
        );
        def.size = Vec3::new(1.0, 1.0, 2.0);
        def.cube_size = CubeSize::Large;

        let expected = 2.5 * 2.5 * 5.0 * 0.8;
        assert!((connector_inventory_volume(&def) - expected).abs() < 0.001);
        assert!(ship_tool_inventory_volume(&def) < connector_inventory_volume(&def));
    }

    #[test]
    fn sphere_gravity_reference_field() {
        let shape = GravityShape::Sphere {
            sink_group: None,
            min_radius: 50.0,
            max_radius: 100.0,
            base_power_input: 0.0,
            consumption_power: 1.0,
        };
        assert!((sphere_gravity_power(&shape, 100.0, EARTH_GRAVITY) - 1.0).abs() < 0.0001);
        assert!(sphere_gravity_power(&shape, 50.0, EARTH_GRAVITY) < 0.2);
        assert_eq!(sphere_gravity_power(&GravityShape::default(), 100.0, 9.81), 0.0);
    }

    #[test]
    fn advanced_door_waits_for_slowest_part() {
        let door = AdvancedDoorData {
            sequence: vec![
                DoorStep {
                    max_open: 2.0,
                    speed: 1.0,
                    delay_ms: 0.0,
                },
                DoorStep {
                    max_open: 1.0,
                    speed: 1.0,
                    delay_ms: 1500.0,
                },
            ],
            ..Default::default()
        };
        assert_eq!(advanced_door_move_time(&door), (2.5, 2.0));
    }

    #[test]
    fn parachute_load_grows_with_drag() {
        let mut chute = ParachuteData {
            drag_coefficient: 1.0,
            radius_multiplier: 8.0,
            reef_atmosphere: 0.6,
            min_atmosphere: 0.2,
            ..Default::default()
        };
        let light = parachute_details(&chute, 2.5, PARACHUTE_TARGET_DESCEND_VELOCITY);
        chute.drag_coefficient = 2.0;
        let heavy = parachute_details(&chute, 2.5, PARACHUTE_TARGET_DESCEND_VELOCITY);

        assert!(light.max_mass > 0.0);
        assert!((heavy.max_mass - light.max_mass * 2.0).abs() < 1.0);
        assert!(light.disreef_atmosphere > chute.reef_atmosphere);
    }
}
