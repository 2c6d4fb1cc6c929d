//! Per-category routines for held blocks.
//!
//! Every routine writes the same order of lines: power, primary stats, extra stats behind
//! `EXTRA_INFO`, then inventory and production detail. Lines whose flag is off are skipped.

use blockinfo_shared::block::{BlockCategory, BlockDefinition};
use blockinfo_shared::kinds::{
    BlockKind, GravityShape, ProducerKind, ProductionKind, UpgradeKind,
};
use rustc_hash::FxHashMap;

use super::{
    basics, data_error, inventory_format, inventory_stats, power_required, resource_priority,
    weapons, FormatContext, Routine,
};
use crate::hardcoded;
use crate::host::LiveData;
use crate::lines::{FontStyle, Lines};
use crate::palette;
use crate::settings::HeldInfoFlags;
use crate::units;

pub(super) fn routine_table() -> FxHashMap<BlockCategory, Routine> {
    use BlockCategory::*;

    let entries: &[(BlockCategory, Routine)] = &[
        (TerminalBlock, terminal),
        (Conveyor, conveyor),
        (ConveyorConnector, conveyor),
        (ShipConnector, connector),
        (Collector, cargo),
        (CargoContainer, cargo),
        (ConveyorSorter, sorter),
        (Drill, drill),
        (ShipWelder, ship_tool),
        (ShipGrinder, ship_tool),
        (PistonBase, piston),
        (ExtendedPistonBase, piston),
        (MotorStator, rotor),
        (MotorAdvancedStator, rotor),
        (MotorSuspension, rotor),
        (MergeBlock, merge_block),
        (LandingGear, landing_gear),
        (ShipController, ship_controller),
        (Cockpit, ship_controller),
        (CryoChamber, ship_controller),
        (RemoteControl, ship_controller),
        (Thrust, thrust),
        (Gyro, gyro),
        (LightingBlock, light),
        (InteriorLight, light),
        (ReflectorLight, light),
        (OreDetector, ore_detector),
        (ProjectorBase, projector),
        (Projector, projector),
        (Door, door),
        (AirtightDoorGeneric, airtight_door),
        (AirtightHangarDoor, airtight_door),
        (AirtightSlideDoor, airtight_door),
        (AdvancedDoor, advanced_door),
        (Parachute, parachute),
        (MedicalRoom, medical_room),
        (ProductionBlock, production),
        (Refinery, production),
        (Assembler, production),
        (SurvivalKit, production),
        (GasTank, production),
        (OxygenTank, production),
        (OxygenGenerator, production),
        (OxygenFarm, oxygen_farm),
        (AirVent, air_vent),
        (UpgradeModule, upgrade_module),
        (Reactor, power_producer),
        (HydrogenEngine, power_producer),
        (BatteryBlock, power_producer),
        (SolarPanel, power_producer),
        (WindTurbine, power_producer),
        (RadioAntenna, radio_antenna),
        (LaserAntenna, laser_antenna),
        (Beacon, beacon),
        (TimerBlock, timer),
        (ProgrammableBlock, programmable_block),
        (TextPanel, text_panel),
        (SoundBlock, sound_block),
        (SensorBlock, sensor),
        (CameraBlock, camera),
        (ButtonPanel, button_panel),
        (GravityGeneratorBase, gravity_generator),
        (GravityGenerator, gravity_generator),
        (GravityGeneratorSphere, gravity_generator),
        (VirtualMass, virtual_mass),
        (SpaceBall, space_ball),
        (JumpDrive, jump_drive),
        (ConveyorTurretBase, weapons::weapon),
        (UserControllableGun, weapons::weapon),
        (LargeGatlingTurret, weapons::weapon),
        (LargeMissileTurret, weapons::weapon),
        (InteriorTurret, weapons::weapon),
        (SmallGatlingGun, weapons::weapon),
        (SmallMissileLauncher, weapons::weapon),
        (SmallMissileLauncherReload, weapons::weapon),
        (Warhead, weapons::warhead),
    ];

    entries.iter().copied().collect()
}

fn terminal(ctx: &FormatContext<'_>, _def: &BlockDefinition, out: &mut Lines<'_>) {
    power_required(ctx, out, 0.0, None, true);
}

fn conveyor(ctx: &FormatContext<'_>, _def: &BlockDefinition, out: &mut Lines<'_>) {
    power_required(
        ctx,
        out,
        hardcoded::CONVEYOR_POWER,
        Some(hardcoded::CONVEYOR_POWER_GROUP),
        true,
    );
}

fn connector(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    power_required(
        ctx,
        out,
        hardcoded::connector_power(def),
        Some(hardcoded::CONNECTOR_POWER_GROUP),
        true,
    );

    inventory_stats(ctx, def, out, 0.0, hardcoded::connector_inventory_volume(def));

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        if let Some(LiveData::Connector {
            connectable,
            can_throw,
        }) = ctx.live
        {
            out.add_line();
            if *connectable {
                out.append("Connectable: Yes");
            } else {
                out.color(palette::WARNING).append("Connectable: No").reset_color();
            }
            out.separator()
                .label("Can throw contents")
                .append(units::yes_no(*can_throw))
                .end_line();
        }
    }
}

fn cargo(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::Cargo(cargo) = &def.kind else {
        return data_error(def, out);
    };

    if let Some(powered) = &cargo.powered {
        power_required(ctx, out, powered.required_input, powered.sink_group.as_deref(), false);
    }

    inventory_stats(
        ctx,
        def,
        out,
        cargo.inventory_volume,
        hardcoded::cargo_inventory_volume(def),
    );
}

fn sorter(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::Sorter(sorter) = &def.kind else {
        return data_error(def, out);
    };

    power_required(ctx, out, sorter.power_input, sorter.sink_group.as_deref(), false);
    inventory_stats(ctx, def, out, sorter.inventory_volume, 0.0);
}

fn drill(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::Drill(drill) = &def.kind else {
        return data_error(def, out);
    };

    power_required(ctx, out, hardcoded::DRILL_POWER, drill.sink_group.as_deref(), true);

    if ctx.held(HeldInfoFlags::INVENTORY_STATS) {
        let constraint = hardcoded::drill_inventory_constraint();
        match def.inventory_component {
            Some(_) => out.add_line().label("Inventory"),
            None => out.add_line().label_hardcoded("Inventory"),
        }
        .append(inventory_format(
            def.inventory_component
                .unwrap_or_else(|| hardcoded::drill_inventory_volume(def)),
            Some(&constraint),
        ))
        .end_line();
    }

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        out.add_line()
            .label("Mining radius")
            .append(units::distance(drill.sensor_radius))
            .end_line();
        out.add_line()
            .label("Cutout radius")
            .append(units::distance(drill.cutout_radius))
            .end_line();
    }
}

fn ship_tool(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::ShipTool(tool) = &def.kind else {
        return data_error(def, out);
    };

    power_required(
        ctx,
        out,
        hardcoded::SHIP_TOOL_POWER,
        Some(hardcoded::SHIP_TOOL_POWER_GROUP),
        true,
    );

    inventory_stats(ctx, def, out, 0.0, hardcoded::ship_tool_inventory_volume(def));

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        let multipliers = &ctx.session.multipliers;
        let (label, rate, mul, radius) = if def.id.category == BlockCategory::ShipWelder {
            (
                "Weld speed",
                hardcoded::SHIP_WELDER_WELD_PER_SECOND,
                multipliers.welder,
                "Welding radius",
            )
        } else {
            (
                "Grind speed",
                hardcoded::SHIP_GRINDER_GRIND_PER_SECOND,
                multipliers.grinder,
                "Grinding radius",
            )
        };

        out.add_line()
            .label_hardcoded(label)
            .append(units::percent(rate * mul))
            .append(" split across targets")
            .color(palette::UNIMPORTANT)
            .append(units::multiplier(mul))
            .end_line();
        out.add_line()
            .label(radius)
            .append(units::distance(tool.sensor_radius))
            .end_line();
    }
}

/// Basics of the top part that a mechanical base block spawns.
fn mechanical_part(ctx: &FormatContext<'_>, def: &BlockDefinition, top_part: Option<&str>, out: &mut Lines<'_>) {
    if !ctx.held(HeldInfoFlags::PART_STATS) {
        return;
    }

    let part = top_part
        .and_then(|name| ctx.registry.group(name))
        .and_then(|group| group.for_size(def.cube_size))
        .and_then(|id| ctx.registry.block(id));

    if let Some(part) = part {
        basics(ctx, part, out, true);
    }
}

fn piston(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::Piston(piston) = &def.kind else {
        return data_error(def, out);
    };

    power_required(
        ctx,
        out,
        piston.required_power_input,
        piston.sink_group.as_deref(),
        false,
    );

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        out.add_line()
            .label("Extended length")
            .append(units::distance(piston.max_extension))
            .separator()
            .label("Max velocity")
            .append(units::speed(piston.max_velocity))
            .end_line();
    }

    mechanical_part(ctx, def, piston.top_part.as_deref(), out);
}

fn rotor(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::Rotor(rotor) = &def.kind else {
        return data_error(def, out);
    };

    power_required(
        ctx,
        out,
        rotor.required_power_input,
        rotor.sink_group.as_deref(),
        false,
    );

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        if let Some(suspension) = &rotor.suspension {
            out.add_line()
                .label("Max torque")
                .append(units::torque(suspension.propulsion_force))
                .separator()
                .label("Axle friction")
                .append(units::torque(suspension.axle_friction))
                .end_line();
            out.add_line()
                .label("Steering - Max angle")
                .append(units::angle_rad(suspension.max_steer))
                .separator()
                .label("Speed base")
                .append(units::rotation_speed(
                    suspension.steering_speed.to_degrees() * 60.0,
                ))
                .end_line();
            out.add_line()
                .label("Ride height")
                .append(units::distance(suspension.min_height))
                .append(" to ")
                .append(units::distance(suspension.max_height))
                .end_line();
        } else {
            out.add_line()
                .label("Max torque")
                .append(units::torque(rotor.max_torque))
                .end_line();

            if rotor.displacement_min < rotor.displacement_max {
                out.add_line()
                    .label("Displacement large top")
                    .append(units::distance(rotor.displacement_min))
                    .append(" to ")
                    .append(units::distance(rotor.displacement_max))
                    .end_line();
            }

            if rotor.displacement_min_small < rotor.displacement_max_small {
                out.add_line()
                    .label("Displacement small top")
                    .append(units::distance(rotor.displacement_min_small))
                    .append(" to ")
                    .append(units::distance(rotor.displacement_max_small))
                    .end_line();
            }
        }
    }

    mechanical_part(ctx, def, rotor.top_part.as_deref(), out);
}

fn merge_block(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::MergeBlock(merge) = &def.kind else {
        return data_error(def, out);
    };

    power_required(ctx, out, 0.0, None, true);

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        out.add_line()
            .label("Pull strength")
            .append(units::rounded(merge.strength, 7))
            .end_line();
    }
}

fn landing_gear(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::LandingGear(gear) = &def.kind else {
        return data_error(def, out);
    };

    power_required(ctx, out, 0.0, None, true);

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        out.add_line()
            .label("Max differential velocity for locking")
            .append(units::speed(gear.max_lock_separating_velocity))
            .end_line();
    }
}

fn ship_controller(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::ShipController(controller) = &def.kind else {
        return data_error(def, out);
    };

    if let Some(remote) = &controller.remote_power {
        power_required(ctx, out, remote.required_input, remote.sink_group.as_deref(), false);
    }

    if let Some(cryo) = &controller.cryo_power {
        power_required(ctx, out, cryo.required_input, cryo.sink_group.as_deref(), false);
    }

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        let mut abilities = Vec::with_capacity(3);
        if controller.ship_control {
            abilities.push("Ship control");
        }
        if controller.builder_cockpit {
            abilities.push("Place blocks");
        }
        if !controller.first_person {
            abilities.push("3rd person view only");
        }

        out.add_line().append("Abilities: ");
        if abilities.is_empty() {
            out.append("None.");
        } else {
            out.append(abilities.join(", ")).append(".");
        }
        out.end_line();
    }

    let Some(cockpit) = &controller.cockpit else {
        return;
    };

    inventory_stats(ctx, def, out, 0.0, hardcoded::COCKPIT_INVENTORY_VOLUME);

    if !ctx.held(HeldInfoFlags::EXTRA_INFO) {
        return;
    }

    if cockpit.pressurized {
        out.add_styled(FontStyle::Green)
            .color(palette::GOOD)
            .label("Pressurized")
            .append("Yes, Oxygen capacity: ")
            .append(units::volume(cockpit.oxygen_capacity / 1000.0))
            .end_line();
    } else {
        out.add_styled(FontStyle::Red)
            .color(palette::WARNING)
            .label("Pressurized")
            .append("No")
            .end_line();
    }

    if let Some(hud) = &cockpit.hud {
        if ctx.registry.has_hud(hud) {
            out.add_styled(FontStyle::Green)
                .color(palette::GOOD)
                .label("Custom HUD")
                .append(hud)
                .end_line();
        } else {
            out.add_styled(FontStyle::Red)
                .color(palette::BAD)
                .label("Custom HUD")
                .append(hud)
                .append("  (Error: not found)")
                .end_line();
        }
    }
}

fn thrust(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::Thrust(thrust) = &def.kind else {
        return data_error(def, out);
    };
    let group = thrust.sink_group.as_deref();

    if let Some(fuel) = &thrust.fuel {
        if ctx.held(HeldInfoFlags::POWER_STATS) {
            out.add_line().append("Requires power to be controlled");
            resource_priority(ctx, out, group);
            out.end_line();
        }

        if ctx.held(HeldInfoFlags::ITEM_INPUTS) {
            out.add_line()
                .label("Requires fuel")
                .append(&fuel.fuel.subtype)
                .separator()
                .label("Efficiency")
                .append(units::percent(fuel.efficiency))
                .end_line();
        }
    } else if ctx.held(HeldInfoFlags::POWER_STATS) {
        out.add_line()
            .label("Power")
            .append(units::power(thrust.max_power))
            .separator()
            .label("Idle")
            .append(units::power(thrust.min_power));
        resource_priority(ctx, out, group);
        out.end_line();
    }

    if ctx.held(HeldInfoFlags::PRODUCTION) {
        out.add_line()
            .label("Force")
            .append(units::force(thrust.force))
            .separator()
            .label("Dampener factor")
            .append(units::number(thrust.slowdown_factor))
            .end_line();

        let at_max = thrust.effectiveness_at_max_influence;
        let at_min = thrust.effectiveness_at_min_influence;

        if at_min < 1.0 || at_max < 1.0 {
            let (font, color) = limit_style(at_max);
            out.add_styled(font)
                .color(color)
                .append(units::percent(at_max))
                .append(" max thrust ");
            if thrust.max_planetary_influence < 1.0 {
                out.append("in ")
                    .append(units::percent(thrust.max_planetary_influence))
                    .append(" atmosphere");
            } else {
                out.append("in atmosphere");
            }
            out.end_line();

            let (font, color) = limit_style(at_min);
            out.add_styled(font)
                .color(color)
                .append(units::percent(at_min))
                .append(" max thrust ");
            if thrust.min_planetary_influence > 0.0 {
                out.append("below ")
                    .append(units::percent(thrust.min_planetary_influence))
                    .append(" atmosphere");
            } else {
                out.append("in space");
            }
            out.end_line();
        } else {
            out.add_styled(FontStyle::Green)
                .color(palette::GOOD)
                .append("No thrust limits in space or planets")
                .end_line();
        }
    }

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        if thrust.consumption_factor_per_g > 0.0 {
            out.add_styled(FontStyle::Red)
                .append("Extra consumption: +")
                .append(units::percent(thrust.consumption_factor_per_g))
                .append(" per natural g acceleration")
                .end_line();
        }

        if let Some(LiveData::Thrust {
            flames,
            max_distance,
            ship_damage,
            other_damage,
        }) = ctx.live
        {
            out.add_line()
                .label("Flames")
                .append(flames.to_string())
                .separator()
                .label("Max distance")
                .append(units::distance(*max_distance))
                .end_line();
            out.add_line()
                .label("Ship damage")
                .append(units::number(*ship_damage))
                .append("/s")
                .separator()
                .label("Other damage")
                .append(units::number(*other_damage))
                .append("/s")
                .end_line();
        }
    }
}

fn limit_style(effectiveness: f32) -> (FontStyle, palette::Rgb) {
    if effectiveness < 1.0 {
        (FontStyle::Red, palette::BAD)
    } else {
        (FontStyle::White, palette::GOOD)
    }
}

fn gyro(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::Gyro(gyro) = &def.kind else {
        return data_error(def, out);
    };

    power_required(ctx, out, gyro.required_power_input, gyro.sink_group.as_deref(), false);

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        out.add_line().label("Force").append(units::force(gyro.force)).end_line();
    }
}

fn light(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::Light(light) = &def.kind else {
        return data_error(def, out);
    };

    let spotlight = light.spotlight || def.id.category == BlockCategory::ReflectorLight;
    let radius = if spotlight {
        light.reflector_radius
    } else {
        light.radius
    };

    power_required(ctx, out, light.required_power_input, light.sink_group.as_deref(), false);

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        out.add_line()
            .label("Radius")
            .append(units::distance(radius.min))
            .append(" to ")
            .append(units::distance(radius.max))
            .separator()
            .label("Default")
            .append(units::distance(radius.default));
        out.end_line();

        for (label, range) in [("Intensity", light.intensity), ("Falloff", light.falloff)] {
            out.add_line()
                .label(label)
                .append(units::number(range.min))
                .append(" to ")
                .append(units::number(range.max))
                .separator()
                .label("Default")
                .append(units::number(range.default))
                .end_line();
        }
    }
}

fn ore_detector(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::OreDetector(detector) = &def.kind else {
        return data_error(def, out);
    };

    power_required(
        ctx,
        out,
        hardcoded::ORE_DETECTOR_POWER,
        detector.sink_group.as_deref(),
        true,
    );

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        out.add_line()
            .label("Max range")
            .append(units::distance(detector.max_range))
            .end_line();
    }
}

fn projector(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::Projector(power) = &def.kind else {
        return data_error(def, out);
    };

    power_required(ctx, out, power.required_input, power.sink_group.as_deref(), false);
}

fn door(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::Door(door) = &def.kind else {
        return data_error(def, out);
    };

    power_required(ctx, out, hardcoded::DOOR_POWER, door.sink_group.as_deref(), true);

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        let move_time = hardcoded::door_move_time(door.opening_speed, door.max_open);
        out.add_line()
            .label_hardcoded("Move time")
            .append(units::time_precise(move_time))
            .separator()
            .label("Distance")
            .append(units::distance(door.max_open))
            .end_line();
    }
}

/// "label: moving, idle-label: idle" with the priority appended.
fn moving_idle_power(
    ctx: &FormatContext<'_>,
    out: &mut Lines<'_>,
    label: &str,
    moving: f32,
    idle_label: &str,
    idle: f32,
    group: Option<&str>,
) {
    if !ctx.held(HeldInfoFlags::POWER_STATS) {
        return;
    }

    out.add_line()
        .label(label)
        .append(units::power(moving))
        .separator()
        .label(idle_label)
        .append(units::power(idle));
    resource_priority(ctx, out, group);
    out.end_line();
}

fn airtight_door(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::AirtightDoor(door) = &def.kind else {
        return data_error(def, out);
    };

    moving_idle_power(
        ctx,
        out,
        "Power",
        door.power_moving,
        "Idle",
        door.power_idle,
        door.sink_group.as_deref(),
    );

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        out.add_line()
            .label_hardcoded("Move time")
            .append(units::time_precise(hardcoded::airtight_door_move_time(door.opening_speed)))
            .end_line();
    }
}

fn advanced_door(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::AdvancedDoor(door) = &def.kind else {
        return data_error(def, out);
    };

    moving_idle_power(
        ctx,
        out,
        "Power - Moving",
        door.power_moving,
        "Idle",
        door.power_idle,
        door.sink_group.as_deref(),
    );

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        let (open, close) = hardcoded::advanced_door_move_time(door);
        out.add_line()
            .label("Move time - Opening")
            .append(units::time_precise(open))
            .separator()
            .label("Closing")
            .append(units::time_precise(close))
            .end_line();
    }
}

fn parachute(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::Parachute(chute) = &def.kind else {
        return data_error(def, out);
    };

    moving_idle_power(
        ctx,
        out,
        "Power - Deploy",
        chute.power_moving,
        "Idle",
        chute.power_idle,
        chute.sink_group.as_deref(),
    );

    if ctx.held(HeldInfoFlags::ITEM_INPUTS) {
        out.add_line()
            .label("Required item to deploy")
            .append(format!("{}x ", chute.deploy_cost));
        match &chute.material {
            Some(material) => out.append(material.to_string()),
            None => out.color(palette::BAD).append("(Error: not set)"),
        };
        out.end_line();
    }

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        let target = hardcoded::PARACHUTE_TARGET_DESCEND_VELOCITY;
        let details = hardcoded::parachute_details(chute, def.cube_size.cell_meters(), target);

        out.add_line()
            .label("Required atmosphere - Minimum")
            .append(units::number(chute.min_atmosphere))
            .separator()
            .label("Fully open")
            .append(units::number(details.disreef_atmosphere))
            .end_line();
        out.add_line()
            .label("Drag coefficient")
            .append(units::rounded(chute.drag_coefficient, 5))
            .end_line();
        out.add_line()
            .label_hardcoded("Load estimate")
            .color(palette::INFO)
            .append(units::mass(details.max_mass))
            .reset_color()
            .append(" falling at ")
            .append(units::speed(target))
            .append(" in ")
            .append(units::acceleration(hardcoded::EARTH_GRAVITY))
            .append(" and 1.0 air density.")
            .end_line();
    }
}

fn medical_room(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::MedicalRoom(room) = &def.kind else {
        return data_error(def, out);
    };

    power_required(
        ctx,
        out,
        hardcoded::MEDICAL_ROOM_POWER,
        room.sink_group.as_deref(),
        true,
    );

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        let font = if room.force_suit_change {
            FontStyle::Blue
        } else if !room.respawn_allowed {
            FontStyle::Red
        } else {
            FontStyle::White
        };

        out.add_styled(font)
            .color(if room.force_suit_change {
                palette::WARNING
            } else {
                palette::NORMAL
            })
            .label("Respawn")
            .append(units::yes_no(room.respawn_allowed))
            .reset_color()
            .separator();

        if room.respawn_allowed && room.force_suit_change {
            out.color(palette::WARNING).label("Forced suit");
            match room.respawn_suit.as_deref().filter(|name| !name.is_empty()) {
                None => {
                    out.color(palette::BAD).append("(Error: empty)");
                }
                Some(name) => match ctx.registry.character(name) {
                    Some(character) => {
                        out.append(&character.display_name);
                    }
                    None => {
                        out.append(name).color(palette::BAD).append(" (Error: not found)");
                    }
                },
            }
        } else {
            out.append("Forced suit: No");
        }
        out.end_line();
    }

    if ctx.held(HeldInfoFlags::PRODUCTION) {
        for (label, allowed) in [
            ("Healing", room.healing),
            ("Recharge", room.refuel),
            ("Suit change", room.suit_change),
        ] {
            let (font, color) = if allowed {
                (FontStyle::White, palette::NORMAL)
            } else {
                (FontStyle::Red, palette::WARNING)
            };
            out.add_styled(font)
                .color(color)
                .label(label)
                .append(units::yes_no(allowed))
                .end_line();
        }
    }

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        if room.custom_wardrobes_enabled && !room.custom_wardrobes.is_empty() {
            out.add_styled(FontStyle::Blue)
                .color(palette::WARNING)
                .append("Suits:")
                .end_line();

            for name in &room.custom_wardrobes {
                match ctx.registry.character(name) {
                    Some(character) => {
                        out.add_line()
                            .append("    ")
                            .append(&character.display_name)
                            .end_line();
                    }
                    None => {
                        out.add_styled(FontStyle::Red)
                            .append("    ")
                            .append(name)
                            .color(palette::BAD)
                            .append(" (not found in definitions)")
                            .end_line();
                    }
                }
            }
        } else {
            out.add_line().append("Usable suits: (all)").end_line();
        }
    }
}

fn production(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::Production(production) = &def.kind else {
        return data_error(def, out);
    };
    let multipliers = &ctx.session.multipliers;
    let show_production = ctx.held(HeldInfoFlags::PRODUCTION);

    if ctx.held(HeldInfoFlags::POWER_STATS) {
        out.add_line()
            .label("Power")
            .append(units::power(production.operational_power))
            .separator()
            .label("Idle")
            .append(units::power(production.standby_power));
        resource_priority(ctx, out, production.sink_group.as_deref());
        out.end_line();
    }

    if show_production {
        match &production.specialization {
            ProductionKind::Assembler { assembly_speed }
            | ProductionKind::SurvivalKit { assembly_speed } => {
                out.add_line()
                    .label("Assembly speed")
                    .append(units::percent(assembly_speed * multipliers.assembler_speed))
                    .color(palette::UNIMPORTANT)
                    .append(units::multiplier(multipliers.assembler_speed))
                    .reset_color()
                    .separator()
                    .label("Efficiency")
                    .append(units::percent(multipliers.assembler_efficiency))
                    .append(units::multiplier(multipliers.assembler_efficiency))
                    .end_line();

                if matches!(production.specialization, ProductionKind::SurvivalKit { .. }) {
                    out.add_line().label_hardcoded("Healing").append("Yes").end_line();
                    out.add_line().label_hardcoded("Recharge").append("Yes").end_line();
                }
            }
            ProductionKind::Refinery {
                refine_speed,
                material_efficiency,
            } => {
                out.add_line()
                    .label("Refine speed")
                    .append(units::percent(refine_speed * multipliers.refinery_speed))
                    .color(palette::UNIMPORTANT)
                    .append(units::multiplier(multipliers.refinery_speed))
                    .reset_color()
                    .separator()
                    .label("Efficiency")
                    .append(units::percent(*material_efficiency))
                    .end_line();
            }
            ProductionKind::GasTank {
                stored_gas,
                capacity,
            } => {
                out.add_line()
                    .label("Stores")
                    .append(stored_gas)
                    .separator()
                    .label("Capacity")
                    .append(units::volume(*capacity))
                    .end_line();
            }
            ProductionKind::OxygenGenerator {
                ice_per_second,
                produced_gases,
            } => {
                out.add_line()
                    .label("Ice consumption")
                    .append(units::mass(*ice_per_second))
                    .append("/s")
                    .end_line();

                if produced_gases.is_empty() {
                    out.add_styled(FontStyle::Red).append("Produces: <N/A>").end_line();
                } else {
                    let gases: Vec<String> = produced_gases
                        .iter()
                        .map(|gas| {
                            format!(
                                "{} ({}/s)",
                                gas.gas,
                                units::volume(ice_per_second * gas.ice_to_gas_ratio)
                            )
                        })
                        .collect();
                    out.add_line().label("Produces").append(gases.join(", ")).end_line();
                }
            }
            ProductionKind::Generic => {}
        }
    }

    if ctx.held(HeldInfoFlags::INVENTORY_STATS) {
        let volume = if production.inventory_max_volume > 0.0 {
            production.inventory_max_volume
        } else {
            production.inventory_volume
        };
        let constraint = production.input_constraint.as_ref();

        match production.specialization {
            ProductionKind::Assembler { .. }
            | ProductionKind::SurvivalKit { .. }
            | ProductionKind::Refinery { .. } => {
                out.add_line()
                    .label("In+out inventories")
                    .append(inventory_format(volume * 2.0, constraint))
                    .end_line();
            }
            _ => {
                out.add_line()
                    .label("Inventory")
                    .append(inventory_format(volume, constraint))
                    .end_line();
            }
        }
    }

    let Some(classes) = &production.blueprint_classes else {
        return;
    };
    if !show_production {
        return;
    }

    if classes.is_empty() {
        out.add_styled(FontStyle::Red)
            .color(palette::BAD)
            .append("Has no blueprint classes.")
            .end_line();
        return;
    }

    let label = match production.specialization {
        ProductionKind::Refinery { .. } => "Refines",
        ProductionKind::GasTank { .. } => "Refills",
        ProductionKind::Assembler { .. } | ProductionKind::SurvivalKit { .. } => "Builds",
        ProductionKind::OxygenGenerator { .. } => "Generates",
        ProductionKind::Generic => "Blueprints",
    };
    let names: Vec<&str> = classes
        .iter()
        .map(|name| name.split('\n').next().unwrap_or_default().trim_end())
        .collect();

    out.add_line().label(label).append(names.join(", ")).end_line();
}

fn oxygen_farm(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::OxygenFarm(farm) = &def.kind else {
        return data_error(def, out);
    };

    power_required(ctx, out, farm.operational_power, farm.sink_group.as_deref(), false);

    if ctx.held(HeldInfoFlags::PRODUCTION) {
        out.add_line()
            .label("Produces")
            .append(units::number(farm.max_gas_output))
            .append(" ")
            .append(&farm.produced_gas)
            .append(" l/s");
        resource_priority(ctx, out, farm.source_group.as_deref());
        out.end_line();
    }

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        sidedness(farm.two_sided, out);
    }
}

fn sidedness(two_sided: bool, out: &mut Lines<'_>) {
    if two_sided {
        out.add_line().append("Two-sided").end_line();
    } else {
        out.add_styled(FontStyle::Red).append("One-sided").end_line();
    }
}

fn air_vent(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::AirVent(vent) = &def.kind else {
        return data_error(def, out);
    };

    moving_idle_power(
        ctx,
        out,
        "Power - Idle",
        vent.standby_power,
        "Operational",
        vent.operational_power,
        vent.sink_group.as_deref(),
    );

    if ctx.held(HeldInfoFlags::PRODUCTION) {
        out.add_line()
            .label("Output - Rate")
            .append(units::volume(vent.capacity_per_second))
            .append("/s");
        resource_priority(ctx, out, vent.source_group.as_deref());
        out.end_line();
    }
}

fn upgrade_module(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::UpgradeModule(module) = &def.kind else {
        return data_error(def, out);
    };

    if !ctx.held(HeldInfoFlags::EXTRA_INFO) {
        return;
    }

    if module.upgrades.is_empty() {
        out.add_styled(FontStyle::Red)
            .color(palette::BAD)
            .append("Upgrades: N/A")
            .end_line();
        return;
    }

    out.add_line().append("Upgrades per slot:").end_line();
    for upgrade in &module.upgrades {
        let modifier = match upgrade.kind {
            UpgradeKind::Additive => format!("+{}", units::number(upgrade.modifier)),
            UpgradeKind::Multiplicative => format!("x{}", units::number(upgrade.modifier)),
        };
        out.add_line()
            .append("    - ")
            .label(&upgrade.name)
            .append(modifier)
            .end_line();
    }
}

fn power_producer(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::PowerProducer(producer) = &def.kind else {
        return data_error(def, out);
    };

    if ctx.held(HeldInfoFlags::PRODUCTION) {
        out.add_line()
            .label("Power output")
            .append(units::power(producer.max_output));
        resource_priority(ctx, out, producer.source_group.as_deref());
        out.end_line();
    }

    match &producer.producer {
        ProducerKind::HydrogenEngine {
            fuel,
            fuel_capacity,
            fuel_production_to_capacity,
            sink_group,
        } => {
            if !ctx.held(HeldInfoFlags::ITEM_INPUTS) {
                return;
            }

            out.add_line().label("Needs fuel").append(fuel.to_string()).end_line();
            out.add_line().label("Consumption");
            if *fuel_production_to_capacity > 0.0 {
                out.append(units::volume(producer.max_output / fuel_production_to_capacity))
                    .append("/s");
            } else {
                out.append("Unknown");
            }
            resource_priority(ctx, out, sink_group.as_deref());
            out.end_line();
            out.add_line()
                .label("Fuel capacity")
                .append(units::volume(*fuel_capacity))
                .end_line();
        }
        ProducerKind::Reactor {
            fuels,
            inventory_volume,
            inventory_max_volume,
            constraint,
        } => {
            if ctx.held(HeldInfoFlags::ITEM_INPUTS) && !fuels.is_empty() {
                let single = fuels.len() == 1;
                if single {
                    out.add_line().label("Needs fuel");
                } else {
                    out.add_line()
                        .color(palette::WARNING)
                        .append("Needs combined fuels:")
                        .end_line();
                }

                for fuel in fuels {
                    if !single {
                        out.add_line().append("       - ");
                    }
                    out.append(fuel.fuel.to_string())
                        .append(" (")
                        .append(units::rounded(fuel.per_second, 5))
                        .append("/s)")
                        .end_line();
                }
            }

            if !ctx.held(HeldInfoFlags::INVENTORY_STATS) {
                return;
            }

            let volume = if *inventory_max_volume > 0.0 {
                *inventory_max_volume
            } else {
                *inventory_volume
            };
            out.add_line()
                .label("Inventory")
                .append(inventory_format(volume, constraint.as_ref()))
                .end_line();

            let Some(constraint) = constraint else {
                return;
            };
            if !ctx.held(HeldInfoFlags::INVENTORY_EXTRAS) {
                return;
            }

            out.add_styled(FontStyle::Blue)
                .color(palette::WARNING)
                .append("Inventory items ")
                .append(if constraint.whitelist {
                    "allowed:"
                } else {
                    "NOT allowed:"
                })
                .end_line();
            for id in &constraint.ids {
                out.add_line().append("       - ").append(id.to_string()).end_line();
            }
            for type_name in &constraint.types {
                out.add_line()
                    .append("       - All of type: ")
                    .append(type_name)
                    .end_line();
            }
        }
        ProducerKind::Battery {
            required_input,
            sink_group,
            adaptible_input,
            max_stored,
            initial_ratio,
        } => {
            if ctx.held(HeldInfoFlags::POWER_STATS) {
                let font = if *adaptible_input {
                    FontStyle::White
                } else {
                    FontStyle::Red
                };
                out.add_styled(font)
                    .label("Power input")
                    .append(units::power(*required_input))
                    .append(if *adaptible_input {
                        " (adaptable)"
                    } else {
                        " (minimum required)"
                    });
                resource_priority(ctx, out, sink_group.as_deref());
                out.end_line();
            }

            if ctx.held(HeldInfoFlags::INVENTORY_STATS) {
                out.add_line()
                    .label("Power capacity")
                    .append(units::power_storage(*max_stored))
                    .separator()
                    .label("Pre-charged")
                    .append(units::power_storage(max_stored * initial_ratio))
                    .append(" (")
                    .append(units::percent(*initial_ratio))
                    .append(")")
                    .end_line();
            }

            if ctx.held(HeldInfoFlags::EXTRA_INFO) {
                out.add_line()
                    .label("Discharge time")
                    .append(units::time(max_stored / producer.max_output * 3600.0))
                    .separator()
                    .label("Recharge time")
                    .append(units::time(max_stored / required_input * 3600.0))
                    .end_line();
            }
        }
        ProducerKind::Solar { two_sided } => {
            if ctx.held(HeldInfoFlags::EXTRA_INFO) {
                sidedness(*two_sided, out);
            }
        }
        ProducerKind::WindTurbine {
            ground_clearance,
            raycaster_size,
            optimal_wind_speed,
        } => {
            if ctx.held(HeldInfoFlags::EXTRA_INFO) {
                out.add_line()
                    .label("Clearance - Ground")
                    .append(units::distance(*ground_clearance))
                    .separator()
                    .label("Sides")
                    .append(units::distance(*raycaster_size))
                    .end_line();
                out.add_line()
                    .label("Optimal wind speed")
                    .append(units::number(*optimal_wind_speed))
                    .end_line();
            }
        }
        ProducerKind::Generic => {}
    }
}

fn radio_antenna(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::RadioAntenna(antenna) = &def.kind else {
        return data_error(def, out);
    };

    power_required(
        ctx,
        out,
        hardcoded::radio_antenna_power(antenna.max_radius),
        antenna.sink_group.as_deref(),
        true,
    );

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        out.add_line()
            .label("Max radius")
            .append(units::distance(antenna.max_radius))
            .end_line();
    }
}

fn beacon(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::Beacon(beacon) = &def.kind else {
        return data_error(def, out);
    };

    power_required(
        ctx,
        out,
        hardcoded::beacon_power(beacon.max_radius),
        beacon.sink_group.as_deref(),
        true,
    );

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        out.add_line()
            .label("Max radius")
            .append(units::distance(beacon.max_radius))
            .end_line();
    }
}

fn laser_antenna(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::LaserAntenna(laser) = &def.kind else {
        return data_error(def, out);
    };

    if ctx.held(HeldInfoFlags::POWER_STATS) {
        out.add_line()
            .label_hardcoded("Power - Active")
            .append(units::power(hardcoded::laser_antenna_power(laser, 1000.0)))
            .append(" per km")
            .end_line();
        moving_idle_power(
            ctx,
            out,
            "Power - Turning",
            laser.power_turning,
            "Idle",
            laser.power_idle,
            laser.sink_group.as_deref(),
        );
    }

    if !ctx.held(HeldInfoFlags::EXTRA_INFO) {
        return;
    }

    let infinite = laser.max_range < 0.0;
    out.add_styled(if laser.line_of_sight {
        FontStyle::White
    } else {
        FontStyle::Green
    })
    .color(if infinite { palette::GOOD } else { palette::NORMAL })
    .label("Range");
    if infinite {
        out.append("Infinite");
    } else {
        out.append(units::distance(laser.max_range));
    }
    out.reset_color()
        .separator()
        .color(if laser.line_of_sight {
            palette::WARNING
        } else {
            palette::GOOD
        })
        .label("Line-of-sight")
        .append(if laser.line_of_sight {
            "Required"
        } else {
            "Not required"
        })
        .end_line();

    out.add_line()
        .label("Rotation Pitch")
        .append(units::angle(laser.min_elevation))
        .append(" to ")
        .append(units::angle(laser.max_elevation))
        .separator()
        .label("Yaw")
        .append(units::angle(laser.min_azimuth))
        .append(" to ")
        .append(units::angle(laser.max_azimuth))
        .end_line();
    out.add_line()
        .label_hardcoded("Rotation speed")
        .append(units::rotation_speed(
            laser.rotation_rate * hardcoded::LASER_ANTENNA_ROTATION_SPEED_MULTIPLIER,
        ))
        .end_line();
}

fn timer(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::Timer(timer) = &def.kind else {
        return data_error(def, out);
    };

    power_required(ctx, out, hardcoded::TIMER_POWER, timer.sink_group.as_deref(), true);

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        out.add_line()
            .label("Timer range")
            .append(units::time_precise(timer.min_delay_ms / 1000.0))
            .append(" to ")
            .append(units::time_precise(timer.max_delay_ms / 1000.0))
            .end_line();
    }
}

fn programmable_block(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::ProgrammableBlock(pb) = &def.kind else {
        return data_error(def, out);
    };

    power_required(
        ctx,
        out,
        hardcoded::PROGRAMMABLE_BLOCK_POWER,
        pb.sink_group.as_deref(),
        true,
    );
}

fn text_panel(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::TextPanel(panel) = &def.kind else {
        return data_error(def, out);
    };

    power_required(ctx, out, panel.required_power_input, panel.sink_group.as_deref(), false);

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        let width = panel.texture_resolution * panel.texture_aspect_ratio;
        out.add_line()
            .label("Screen resolution")
            .append(format!("{width}x{}", panel.texture_resolution))
            .end_line();
        out.add_line()
            .label("Font size limits")
            .append(units::rounded(panel.min_font_size, 4))
            .append(" to ")
            .append(units::rounded(panel.max_font_size, 4))
            .end_line();
    }
}

fn sound_block(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::SoundBlock(sound) = &def.kind else {
        return data_error(def, out);
    };

    power_required(ctx, out, hardcoded::SOUND_BLOCK_POWER, sound.sink_group.as_deref(), true);

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        out.add_line()
            .label("Range")
            .append(units::distance_range(sound.min_range, sound.max_range))
            .end_line();
        out.add_line()
            .label("Max loop time")
            .append(units::time(sound.max_loop_period))
            .end_line();
    }
}

fn sensor(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::Sensor(sensor) = &def.kind else {
        return data_error(def, out);
    };

    let field = hardcoded::sensor_max_field(sensor.max_range);
    power_required(
        ctx,
        out,
        hardcoded::sensor_power(field),
        sensor.sink_group.as_deref(),
        true,
    );

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        out.add_line().label("Max area").append(units::vector(field)).end_line();
    }
}

fn camera(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::Camera(camera) = &def.kind else {
        return data_error(def, out);
    };

    moving_idle_power(
        ctx,
        out,
        "Power - Normal use",
        camera.required_power_input,
        "Raycast charging",
        camera.charging_power,
        camera.sink_group.as_deref(),
    );

    if !ctx.held(HeldInfoFlags::EXTRA_INFO) {
        return;
    }

    out.add_line()
        .label("Field of view")
        .append(units::angle_rad(camera.min_fov))
        .append(" to ")
        .append(units::angle_rad(camera.max_fov))
        .end_line();

    out.add_line()
        .label("Raycast - Cone limit")
        .append(units::angle(camera.raycast_cone_limit))
        .separator()
        .label("Distance limit");
    if camera.raycast_distance_limit < 0.0 {
        out.append("Infinite");
    } else {
        out.append(units::distance(camera.raycast_distance_limit as f32));
    }
    out.separator()
        .label("Time multiplier")
        .append(units::number(camera.raycast_time_multiplier))
        .end_line();
}

fn button_panel(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::ButtonPanel(panel) = &def.kind else {
        return data_error(def, out);
    };

    power_required(ctx, out, hardcoded::BUTTON_PANEL_POWER, panel.sink_group.as_deref(), true);

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        out.add_line()
            .label("Button count")
            .append(panel.button_count.to_string())
            .end_line();
    }
}

fn gravity_generator(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::GravityGenerator(generator) = &def.kind else {
        return data_error(def, out);
    };
    let production = ctx.held(HeldInfoFlags::PRODUCTION);

    match &generator.shape {
        GravityShape::Flat {
            required_power_input,
            sink_group,
            min_field_size,
            max_field_size,
        } => {
            power_required(ctx, out, *required_power_input, sink_group.as_deref(), false);
            if production {
                out.add_line()
                    .label("Field size")
                    .append(units::vector(*min_field_size))
                    .append(" to ")
                    .append(units::vector(*max_field_size))
                    .end_line();
            }
        }
        shape @ GravityShape::Sphere {
            sink_group,
            min_radius,
            max_radius,
            ..
        } => {
            let power =
                hardcoded::sphere_gravity_power(shape, *max_radius, generator.max_acceleration);
            power_required(ctx, out, power, sink_group.as_deref(), true);
            if production {
                out.add_line()
                    .label("Radius")
                    .append(units::distance(*min_radius))
                    .append(" to ")
                    .append(units::distance(*max_radius))
                    .end_line();
            }
        }
    }

    if production {
        out.add_line()
            .label("Acceleration")
            .append(units::acceleration(generator.min_acceleration))
            .append(" to ")
            .append(units::acceleration(generator.max_acceleration))
            .end_line();
    }
}

fn virtual_mass(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::VirtualMass(mass) = &def.kind else {
        return data_error(def, out);
    };

    power_required(ctx, out, mass.required_power_input, mass.sink_group.as_deref(), false);

    if ctx.held(HeldInfoFlags::PRODUCTION) {
        out.add_line()
            .label("Artificial mass")
            .append(units::mass(mass.virtual_mass))
            .end_line();
    }
}

fn space_ball(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::SpaceBall(ball) = &def.kind else {
        return data_error(def, out);
    };

    power_required(ctx, out, 0.0, None, true);

    if ctx.held(HeldInfoFlags::PRODUCTION) {
        out.add_line()
            .label("Max artificial mass")
            .append(units::mass(ball.max_virtual_mass))
            .end_line();
    }
}

fn jump_drive(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::JumpDrive(drive) = &def.kind else {
        return data_error(def, out);
    };

    power_required(ctx, out, drive.required_power_input, drive.sink_group.as_deref(), false);

    if ctx.held(HeldInfoFlags::INVENTORY_STATS) {
        out.add_line()
            .label("Stored power for jump")
            .append(units::power_storage(drive.power_needed_for_jump))
            .end_line();
    }

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        out.add_line()
            .label("Jump delay")
            .append(units::time_precise(drive.jump_delay))
            .end_line();
        out.add_line()
            .label("Max distance")
            .append(units::distance(drive.max_jump_distance as f32))
            .end_line();
        out.add_line()
            .label("Max mass")
            .append(units::mass(drive.max_jump_mass as f32))
            .end_line();
    }
}

#[cfg(test)]
mod tests {
    use blockinfo_shared::block::{BlockCategory, BlockDefinition, BlockDefinitionId, CubeSize};
    use blockinfo_shared::item::ItemId;
    use blockinfo_shared::kinds::{
        BlockKind, MedicalRoomData, PowerProducerData, ProducerKind, ProductionData,
        ProductionKind, RotorData, ShipControllerData, ThrustData,
    };
    use blockinfo_shared::registry::{DefinitionGroup, DefinitionRegistry, ResourceGroup};

    use crate::format::test_support::{block, rich};
    use crate::format::{dispatch, FormatContext};
    use crate::host::{GameSession, LiveData};
    use crate::lines::{plain_text, Lines, RichTextBuffer};
    use crate::settings::{HeldInfoFlags, Settings};

    fn settings(flags: HeldInfoFlags) -> Settings {
        Settings {
            held_info: flags,
            ..Settings::default()
        }
    }

    fn dispatched(registry: &DefinitionRegistry, settings: &Settings, def: &BlockDefinition) -> String {
        let session = GameSession::default();
        rich(registry, settings, &session, |ctx, out| dispatch(ctx, def, out))
    }

    #[test]
    fn thrust_power_carries_priority() {
        let mut registry = DefinitionRegistry::new();
        registry.register_resource_group(ResourceGroup {
            name: "Thrust".to_string(),
            priority: 1,
            is_source: false,
        });
        registry.register_resource_group(ResourceGroup {
            name: "Utility".to_string(),
            priority: 5,
            is_source: false,
        });

        let def = block(
            BlockCategory::Thrust,
            "LargeIon",
            BlockKind::Thrust(ThrustData {
                force: 4_320_000.0,
                slowdown_factor: 1.0,
                max_power: 33.6,
                min_power: 0.002,
                sink_group: Some("Thrust".to_string()),
                effectiveness_at_min_influence: 1.0,
                effectiveness_at_max_influence: 0.3,
                max_planetary_influence: 1.0,
                ..Default::default()
            }),
        );

        let text = dispatched(
            &registry,
            &settings(HeldInfoFlags::POWER_STATS | HeldInfoFlags::RESOURCE_PRIORITIES | HeldInfoFlags::PRODUCTION),
            &def,
        );
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Power: 33.60 MW, Idle: 2.00 kW, Priority: Thrust (1/2)");
        assert_eq!(lines[1], "Force: 4.32 MN, Dampener factor: 1");
        assert_eq!(lines[2], "30% max thrust in atmosphere");
        assert_eq!(lines[3], "100% max thrust in space");
    }

    #[test]
    fn thrust_live_data_appears_once_sampled() {
        let registry = DefinitionRegistry::new();
        let settings = settings(HeldInfoFlags::EXTRA_INFO);
        let session = GameSession::default();
        let def = block(BlockCategory::Thrust, "Atmo", BlockKind::Thrust(ThrustData::default()));
        let live = LiveData::Thrust {
            flames: 2,
            max_distance: 4.5,
            ship_damage: 12.0,
            other_damage: 3.5,
        };

        let ctx = FormatContext {
            registry: &registry,
            settings: &settings,
            session: &session,
            live: Some(&live),
        };
        let mut buf = RichTextBuffer::new();
        {
            let mut out = Lines::new(&mut buf);
            dispatch(&ctx, &def, &mut out);
        }
        assert_eq!(
            plain_text(buf.runs()),
            "Flames: 2, Max distance: 4.50 m\nShip damage: 12/s, Other damage: 3.5/s\n"
        );

        assert_eq!(dispatched(&registry, &settings, &def), "");
    }

    #[test]
    fn battery_branch_returns_before_other_producers() {
        let registry = DefinitionRegistry::new();
        let def = block(
            BlockCategory::BatteryBlock,
            "Battery",
            BlockKind::PowerProducer(PowerProducerData {
                max_output: 12.0,
                source_group: None,
                producer: ProducerKind::Battery {
                    required_input: 12.0,
                    sink_group: None,
                    adaptible_input: true,
                    max_stored: 3.0,
                    initial_ratio: 0.3,
                },
            }),
        );

        let text = dispatched(&registry, &Settings::default(), &def);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Power output: 12.00 MW",
                "Power input: 12.00 MW (adaptable)",
                "Power capacity: 3.00 MWh, Pre-charged: 900.00 kWh (30%)",
                "Discharge time: 15:00, Recharge time: 15:00",
            ]
        );
    }

    #[test]
    fn hydrogen_engine_without_production_ratio_has_no_rate() {
        let registry = DefinitionRegistry::new();
        let def = block(
            BlockCategory::HydrogenEngine,
            "Engine",
            BlockKind::PowerProducer(PowerProducerData {
                max_output: 5.0,
                source_group: None,
                producer: ProducerKind::HydrogenEngine {
                    fuel: ItemId::new("GasProperties", "Hydrogen"),
                    fuel_capacity: 16.0,
                    fuel_production_to_capacity: 0.0,
                    sink_group: None,
                },
            }),
        );

        let text = dispatched(&registry, &settings(HeldInfoFlags::ITEM_INPUTS), &def);
        assert_eq!(
            text,
            "Needs fuel: Hydrogen GasProperties\nConsumption: Unknown\nFuel capacity: 16.00 kL\n"
        );
    }

    #[test]
    fn reactor_lists_combined_fuels() {
        let registry = DefinitionRegistry::new();
        let def = block(
            BlockCategory::Reactor,
            "Reactor",
            BlockKind::PowerProducer(PowerProducerData {
                max_output: 15.0,
                source_group: None,
                producer: ProducerKind::Reactor {
                    fuels: vec![
                        blockinfo_shared::kinds::ReactorFuel {
                            fuel: ItemId::new("Ingot", "Uranium"),
                            per_second: 0.001,
                        },
                        blockinfo_shared::kinds::ReactorFuel {
                            fuel: ItemId::new("Ingot", "Thorium"),
                            per_second: 0.5,
                        },
                    ],
                    inventory_volume: 1.0,
                    inventory_max_volume: 0.0,
                    constraint: None,
                },
            }),
        );

        let text = dispatched(&registry, &settings(HeldInfoFlags::ITEM_INPUTS), &def);
        assert_eq!(
            text,
            "Needs combined fuels:\n       - Uranium Ingot (0.001/s)\n       - Thorium Ingot (0.5/s)\n"
        );
    }

    #[test]
    fn medical_room_reports_missing_suit() {
        let registry = DefinitionRegistry::new();
        let def = block(
            BlockCategory::MedicalRoom,
            "MedBay",
            BlockKind::MedicalRoom(MedicalRoomData {
                respawn_allowed: true,
                force_suit_change: true,
                respawn_suit: Some("Astronaut_Heavy".to_string()),
                ..Default::default()
            }),
        );

        let text = dispatched(&registry, &settings(HeldInfoFlags::EXTRA_INFO), &def);
        let first = text.lines().next().expect("respawn line");
        assert_eq!(
            first,
            "Respawn: Yes, Forced suit: Astronaut_Heavy (Error: not found)"
        );
        assert!(text.contains("Usable suits: (all)"));
    }

    #[test]
    fn ship_controller_lists_abilities_and_stops_without_cockpit() {
        let registry = DefinitionRegistry::new();
        let def = block(
            BlockCategory::RemoteControl,
            "Remote",
            BlockKind::ShipController(ShipControllerData {
                ship_control: true,
                builder_cockpit: false,
                first_person: false,
                ..Default::default()
            }),
        );

        let text = dispatched(&registry, &settings(HeldInfoFlags::EXTRA_INFO | HeldInfoFlags::INVENTORY_STATS), &def);
        assert_eq!(text, "Abilities: Ship control, 3rd person view only.\n");
    }

    #[test]
    fn rotor_shows_top_part_for_its_grid_size() {
        let mut registry = DefinitionRegistry::new();
        let head_id = BlockDefinitionId::new(BlockCategory::CubeBlock, "SmallRotorHead");
        let mut head = BlockDefinition::minimal(head_id.clone(), "Small Rotor Head");
        head.mass = 40.0;
        registry.register_block(head);
        registry.register_group(DefinitionGroup {
            name: "Rotor".to_string(),
            large: None,
            small: Some(head_id),
        });

        let mut def = block(
            BlockCategory::MotorStator,
            "SmallStator",
            BlockKind::Rotor(RotorData {
                top_part: Some("Rotor".to_string()),
                ..Default::default()
            }),
        );
        def.cube_size = CubeSize::Small;

        let text = dispatched(&registry, &settings(HeldInfoFlags::PART_STATS | HeldInfoFlags::LINE1), &def);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Part: Small Rotor Head");
        assert_eq!(lines[1], "        | 40 kg, 1x1x1, 00:01");
    }

    #[test]
    fn production_lists_blueprints_by_role() {
        let registry = DefinitionRegistry::new();
        let def = block(
            BlockCategory::Refinery,
            "Refinery",
            BlockKind::Production(ProductionData {
                inventory_volume: 4.0,
                blueprint_classes: Some(vec!["Ingots\nextra".to_string(), "Stone".to_string()]),
                specialization: ProductionKind::Refinery {
                    refine_speed: 1.3,
                    material_efficiency: 1.0,
                },
                ..Default::default()
            }),
        );

        let text = dispatched(
            &registry,
            &settings(HeldInfoFlags::PRODUCTION | HeldInfoFlags::INVENTORY_STATS),
            &def,
        );
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Refine speed: 130%, Efficiency: 100%");
        assert_eq!(lines[1], "In+out inventories: 8.00 kL");
        assert_eq!(lines[2], "Refines: Ingots, Stone");
    }

    #[test]
    fn mismatched_payload_is_an_inline_error() {
        let registry = DefinitionRegistry::new();
        let def = block(BlockCategory::Gyro, "Broken", BlockKind::Decorative);
        let text = dispatched(&registry, &Settings::default(), &def);
        assert_eq!(
            text,
            "Block error: unexpected definition data for Gyro/Broken\n"
        );
    }
}
