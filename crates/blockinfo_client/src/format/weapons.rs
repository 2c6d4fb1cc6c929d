use blockinfo_shared::block::BlockDefinition;
use blockinfo_shared::kinds::BlockKind;
use blockinfo_shared::weapon::{AmmoDefinition, AmmoKind, AmmoMagazineDefinition, AmmoStats, WeaponAmmoData};
use tracing::warn;

use super::{data_error, power_required, FormatContext};
use crate::hardcoded;
use crate::lines::{FontStyle, Lines};
use crate::palette;
use crate::settings::HeldInfoFlags;
use crate::units;

pub(super) fn weapon(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::Weapon(block) = &def.kind else {
        return data_error(def, out);
    };

    let Some(weapon) = ctx.registry.weapon(&block.weapon_id) else {
        out.add_styled(FontStyle::Red)
            .color(palette::BAD)
            .append("Block error: can't find weapon definition: ")
            .append(&block.weapon_id)
            .end_line();
        return;
    };

    let power = if block.turret.is_some() {
        hardcoded::TURRET_POWER
    } else {
        hardcoded::SHIP_GUN_POWER
    };
    power_required(ctx, out, power, block.sink_group.as_deref(), true);

    if ctx.held(HeldInfoFlags::INVENTORY_STATS) {
        out.add_line()
            .label("Inventory")
            .append(units::volume(block.inventory_max_volume));
        if !weapon.magazines.is_empty() {
            out.append(" (").append(weapon.magazines.join(", ")).append(")");
        }
        out.end_line();
    }

    if let Some(turret) = &block.turret {
        if ctx.held(HeldInfoFlags::EXTRA_INFO) {
            out.add_line()
                .color(if turret.ai_enabled { palette::GOOD } else { palette::BAD })
                .label("Auto-target")
                .append(units::yes_no(turret.ai_enabled))
                .reset_color()
                .append(if turret.idle_rotation {
                    " (With idle rotation)"
                } else {
                    " (No idle rotation)"
                })
                .separator()
                .color(palette::WARNING)
                .label("Max range")
                .append(units::distance(turret.max_range))
                .end_line();

            let speed_mul = hardcoded::TURRET_ROTATION_SPEED_MULTIPLIER;
            out.add_line().append("Rotation - ");
            rotation_limit(out, "Pitch", turret.min_elevation, turret.max_elevation);
            out.reset_color()
                .append(" @ ")
                .append(units::rotation_speed((turret.elevation_speed * speed_mul).to_degrees()))
                .separator();
            rotation_limit(out, "Yaw", turret.min_azimuth, turret.max_azimuth);
            out.reset_color()
                .append(" @ ")
                .append(units::rotation_speed((turret.rotation_speed * speed_mul).to_degrees()))
                .end_line();
        }
    }

    if ctx.held(HeldInfoFlags::EXTRA_INFO) {
        out.add_line()
            .label("Accuracy")
            .append(units::distance(weapon.deviate_shot_angle.tan() * 200.0))
            .append(" group at 100m")
            .separator()
            .label("Reload")
            .append(units::time(weapon.reload_time_ms / 1000.0))
            .end_line();
    }

    if !ctx.held(HeldInfoFlags::AMMO_DETAILS) {
        return;
    }

    let mut projectiles = Vec::new();
    let mut missiles = Vec::new();
    for magazine_id in &weapon.magazines {
        let Some(magazine) = ctx.registry.magazine(magazine_id) else {
            warn!("weapon {} lists unknown magazine {magazine_id}", weapon.id);
            continue;
        };
        let Some(ammo) = ctx.registry.ammo(&magazine.ammo) else {
            warn!("magazine {magazine_id} uses unknown ammo {}", magazine.ammo);
            continue;
        };
        if weapon.ammo_data(ammo.kind()).is_none() {
            continue;
        }
        match ammo.kind() {
            AmmoKind::Projectile => projectiles.push((magazine, ammo)),
            AmmoKind::Missile => missiles.push((magazine, ammo)),
        }
    }

    if let (Some(data), false) = (weapon.projectile.as_ref(), projectiles.is_empty()) {
        fire_rate(out, "Projectiles - Fire rate", data);
        projectile_table(out, &projectiles);
    }

    if let (Some(data), false) = (weapon.missile.as_ref(), missiles.is_empty()) {
        fire_rate(out, "Missiles - Fire rate", data);
        missile_table(out, &missiles);
    }
}

fn rotation_limit(out: &mut Lines<'_>, label: &str, min: f32, max: f32) {
    if min <= -180.0 && max >= 180.0 {
        out.color(palette::GOOD).label(label).append(units::angle(360.0));
    } else {
        out.color(palette::WARNING)
            .label(label)
            .append(units::angle(min))
            .append(" to ")
            .append(units::angle(max));
    }
}

fn fire_rate(out: &mut Lines<'_>, label: &str, data: &WeaponAmmoData) {
    let reloads = data.shots_in_burst > 0;
    out.add_line()
        .label(label)
        .append(units::rounded(data.rate_of_fire / 60.0, 3))
        .append(" rounds/s")
        .separator()
        .color(if reloads { palette::WARNING } else { palette::GOOD })
        .append("Magazine: ");
    if reloads {
        out.append(data.shots_in_burst.to_string());
    } else {
        out.append("No reloading");
    }
    out.end_line();
}

/// "prefix - Type (a, b, ...)" legend of a stat table.
fn legend(out: &mut Lines<'_>, prefix: &str, columns: &[(palette::Rgb, &str)]) {
    out.add_line()
        .append(prefix)
        .append(" - ")
        .color(palette::PART)
        .append("Type")
        .reset_color()
        .append(" (");
    for (i, (color, name)) in columns.iter().enumerate() {
        if i > 0 {
            out.append(", ");
        }
        out.color(*color).append(name).reset_color();
    }
    out.append(")").end_line();
}

fn table_row<'o, 'a>(out: &'o mut Lines<'a>, magazine: &AmmoMagazineDefinition) -> &'o mut Lines<'a> {
    out.add_line()
        .append("      - ")
        .color(palette::PART)
        .append(&magazine.id)
        .reset_color()
        .append(" (")
}

fn projectile_table(out: &mut Lines<'_>, rows: &[(&AmmoMagazineDefinition, &AmmoDefinition)]) {
    legend(
        out,
        "Projectiles",
        &[
            (palette::STAT_SHIPDMG, "ship"),
            (palette::STAT_CHARACTERDMG, "character"),
            (palette::STAT_HEADSHOTDMG, "headshot"),
            (palette::STAT_SPEED, "speed"),
            (palette::STAT_TRAVEL, "travel"),
        ],
    );

    for (magazine, ammo) in rows {
        let AmmoStats::Projectile {
            projectile_count,
            mass_damage,
            health_damage,
            head_shot,
            head_shot_damage,
        } = &ammo.stats
        else {
            continue;
        };

        table_row(out, magazine);
        if *projectile_count > 1 {
            out.color(palette::STAT_PROJECTILECOUNT)
                .append(format!("{projectile_count}x "));
        }

        let head_damage = if *head_shot {
            *head_shot_damage
        } else {
            *health_damage
        };
        out.color(palette::STAT_SHIPDMG)
            .append(units::number(*mass_damage))
            .reset_color()
            .append(", ")
            .color(palette::STAT_CHARACTERDMG)
            .append(units::number(*health_damage))
            .reset_color()
            .append(", ")
            .color(palette::STAT_HEADSHOTDMG)
            .append(units::number(head_damage))
            .reset_color()
            .append(", ")
            .color(palette::STAT_SPEED);

        if ammo.speed_var > 0.0 {
            out.append(units::number(ammo.desired_speed * (1.0 - ammo.speed_var)))
                .append("~")
                .append(units::number(ammo.desired_speed * (1.0 + ammo.speed_var)))
                .append(" m/s");
        } else {
            out.append(units::speed(ammo.desired_speed));
        }

        out.reset_color()
            .append(", ")
            .color(palette::STAT_TRAVEL)
            .append(units::distance_range(
                ammo.max_trajectory * hardcoded::PROJECTILE_RANGE_MIN_MULTIPLIER,
                ammo.max_trajectory * hardcoded::PROJECTILE_RANGE_MAX_MULTIPLIER,
            ))
            .reset_color()
            .append(")")
            .end_line();
    }
}

fn missile_table(out: &mut Lines<'_>, rows: &[(&AmmoMagazineDefinition, &AmmoDefinition)]) {
    legend(
        out,
        "Missiles",
        &[
            (palette::STAT_SHIPDMG, "damage"),
            (palette::STAT_CHARACTERDMG, "radius"),
            (palette::STAT_SPEED, "speed"),
            (palette::STAT_TRAVEL, "travel"),
        ],
    );

    for (magazine, ammo) in rows {
        let AmmoStats::Missile {
            explosion_damage,
            explosion_radius,
            initial_speed,
            acceleration,
            skip_acceleration,
        } = &ammo.stats
        else {
            continue;
        };

        table_row(out, magazine)
            .color(palette::STAT_SHIPDMG)
            .append(units::number(*explosion_damage))
            .reset_color()
            .append(", ")
            .color(palette::STAT_CHARACTERDMG)
            .append(units::distance(*explosion_radius))
            .reset_color()
            .append(", ")
            .color(palette::STAT_SPEED);

        if *skip_acceleration {
            out.append(units::speed(
                ammo.desired_speed * hardcoded::MISSILE_DESIRED_SPEED_MULTIPLIER,
            ));
        } else {
            out.append(units::speed(*initial_speed))
                .append(" + ")
                .append(units::acceleration(*acceleration));
        }

        out.reset_color()
            .append(", ")
            .color(palette::STAT_TRAVEL)
            .append(units::distance(ammo.max_trajectory))
            .reset_color()
            .append(")")
            .end_line();
    }
}

pub(super) fn warhead(ctx: &FormatContext<'_>, def: &BlockDefinition, out: &mut Lines<'_>) {
    let BlockKind::Warhead(warhead) = &def.kind else {
        return data_error(def, out);
    };

    power_required(ctx, out, 0.0, None, true);

    if ctx.held(HeldInfoFlags::AMMO_DETAILS) {
        out.add_line()
            .label("Radius")
            .append(units::distance(warhead.explosion_radius))
            .end_line();
        out.add_line()
            .label("Damage")
            .append(units::grouped_number(f64::from(warhead.explosion_damage)))
            .end_line();
    }
}

#[cfg(test)]
mod tests {
    use blockinfo_shared::block::BlockCategory;
    use blockinfo_shared::kinds::{BlockKind, TurretData, WarheadData, WeaponBlockData};
    use blockinfo_shared::registry::DefinitionRegistry;
    use blockinfo_shared::weapon::{
        AmmoDefinition, AmmoMagazineDefinition, AmmoStats, WeaponAmmoData, WeaponDefinition,
    };

    use crate::format::dispatch;
    use crate::format::test_support::{block, rich};
    use crate::host::GameSession;
    use crate::settings::{HeldInfoFlags, Settings};

    fn gatling_registry() -> DefinitionRegistry {
        let mut registry = DefinitionRegistry::new();
        registry.register_weapon(WeaponDefinition {
            id: "GatlingTurret".to_string(),
            deviate_shot_angle: 0.0,
            reload_time_ms: 0.0,
            magazines: vec!["NATO_25x184mm".to_string(), "Missing".to_string()],
            projectile: Some(WeaponAmmoData {
                rate_of_fire: 600.0,
                shots_in_burst: 0,
            }),
            missile: None,
        });
        registry.register_magazine(AmmoMagazineDefinition {
            id: "NATO_25x184mm".to_string(),
            ammo: "Nato25".to_string(),
            capacity: 200,
        });
        registry.register_ammo(AmmoDefinition {
            id: "Nato25".to_string(),
            desired_speed: 400.0,
            speed_var: 0.0,
            max_trajectory: 800.0,
            stats: AmmoStats::Projectile {
                projectile_count: 1,
                mass_damage: 50.0,
                health_damage: 33.0,
                head_shot: false,
                head_shot_damage: 0.0,
            },
        });
        registry
    }

    fn settings(flags: HeldInfoFlags) -> Settings {
        Settings {
            held_info: flags,
            ..Settings::default()
        }
    }

    #[test]
    fn missing_weapon_definition_is_reported() {
        let registry = DefinitionRegistry::new();
        let def = block(
            BlockCategory::SmallGatlingGun,
            "Gun",
            BlockKind::Weapon(WeaponBlockData {
                weapon_id: "Nope".to_string(),
                ..Default::default()
            }),
        );
        let text = rich(&registry, &Settings::default(), &GameSession::default(), |ctx, out| {
            dispatch(ctx, &def, out)
        });
        assert_eq!(text, "Block error: can't find weapon definition: Nope\n");
    }

    #[test]
    fn turret_lists_limits_and_projectile_table() {
        let registry = gatling_registry();
        let def = block(
            BlockCategory::LargeGatlingTurret,
            "Gatling",
            BlockKind::Weapon(WeaponBlockData {
                weapon_id: "GatlingTurret".to_string(),
                sink_group: None,
                inventory_max_volume: 0.084,
                turret: Some(TurretData {
                    ai_enabled: true,
                    idle_rotation: true,
                    max_range: 800.0,
                    min_elevation: -9.0,
                    max_elevation: 50.0,
                    elevation_speed: 0.0,
                    min_azimuth: -180.0,
                    max_azimuth: 180.0,
                    rotation_speed: 0.0,
                }),
            }),
        );

        let text = rich(
            &registry,
            &settings(
                HeldInfoFlags::POWER_STATS
                    | HeldInfoFlags::INVENTORY_STATS
                    | HeldInfoFlags::EXTRA_INFO
                    | HeldInfoFlags::AMMO_DETAILS,
            ),
            &GameSession::default(),
            |ctx, out| dispatch(ctx, &def, out),
        );
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Power required*: 2.00 kW",
                "Inventory: 84.00 L (NATO_25x184mm, Missing)",
                "Auto-target: Yes (With idle rotation), Max range: 800 m",
                "Rotation - Pitch: -9° to 50° @ 0°/s, Yaw: 360° @ 0°/s",
                "Accuracy: 0.00 m group at 100m, Reload: 00:00",
                "Projectiles - Fire rate: 10 rounds/s, Magazine: No reloading",
                "Projectiles - Type (ship, character, headshot, speed, travel)",
                "      - NATO_25x184mm (50, 33, 33, 400 m/s, 640 m~960 m)",
            ]
        );
    }

    #[test]
    fn warhead_damage_is_grouped() {
        let registry = DefinitionRegistry::new();
        let def = block(
            BlockCategory::Warhead,
            "Warhead",
            BlockKind::Warhead(WarheadData {
                explosion_radius: 15.0,
                explosion_damage: 5000.0,
            }),
        );
        let text = rich(
            &registry,
            &settings(HeldInfoFlags::AMMO_DETAILS),
            &GameSession::default(),
            |ctx, out| dispatch(ctx, &def, out),
        );
        assert_eq!(text, "Radius: 15 m\nDamage: 5,000\n");
    }
}
