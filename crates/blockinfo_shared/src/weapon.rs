use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmmoKind {
    Projectile,
    Missile,
}

/// Firing parameters for one ammo kind of a weapon.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeaponAmmoData {
    /// Rounds per minute.
    pub rate_of_fire: f32,
    /// Zero means the weapon never reloads.
    #[serde(default)]
    pub shots_in_burst: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponDefinition {
    pub id: String,
    /// radians
    #[serde(default)]
    pub deviate_shot_angle: f32,
    #[serde(default)]
    pub reload_time_ms: f32,
    #[serde(default)]
    pub magazines: Vec<String>,
    #[serde(default)]
    pub projectile: Option<WeaponAmmoData>,
    #[serde(default)]
    pub missile: Option<WeaponAmmoData>,
}

impl WeaponDefinition {
    pub fn ammo_data(&self, kind: AmmoKind) -> Option<&WeaponAmmoData> {
        match kind {
            AmmoKind::Projectile => self.projectile.as_ref(),
            AmmoKind::Missile => self.missile.as_ref(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AmmoMagazineDefinition {
    pub id: String,
    pub ammo: String,
    #[serde(default)]
    pub capacity: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AmmoDefinition {
    pub id: String,
    pub desired_speed: f32,
    #[serde(default)]
    pub speed_var: f32,
    pub max_trajectory: f32,
    pub stats: AmmoStats,
}

impl AmmoDefinition {
    pub fn kind(&self) -> AmmoKind {
        match self.stats {
            AmmoStats::Projectile { .. } => AmmoKind::Projectile,
            AmmoStats::Missile { .. } => AmmoKind::Missile,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AmmoStats {
    Projectile {
        #[serde(default = "one_projectile")]
        projectile_count: u32,
        mass_damage: f32,
        health_damage: f32,
        #[serde(default)]
        head_shot: bool,
        #[serde(default)]
        head_shot_damage: f32,
    },
    Missile {
        explosion_damage: f32,
        explosion_radius: f32,
        initial_speed: f32,
        acceleration: f32,
        #[serde(default)]
        skip_acceleration: bool,
    },
}

fn one_projectile() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::{AmmoDefinition, AmmoKind, AmmoStats, WeaponAmmoData, WeaponDefinition};

    #[test]
    fn ammo_kind_follows_stats_variant() {
        let missile = AmmoDefinition {
            id: "Missile200mm".to_string(),
            desired_speed: 200.0,
            speed_var: 0.0,
            max_trajectory: 800.0,
            stats: AmmoStats::Missile {
                explosion_damage: 500.0,
                explosion_radius: 4.0,
                initial_speed: 100.0,
                acceleration: 600.0,
                skip_acceleration: false,
            },
        };
        assert_eq!(missile.kind(), AmmoKind::Missile);
    }

    #[test]
    fn weapon_exposes_ammo_data_per_kind() {
        let weapon = WeaponDefinition {
            id: "GatlingGun".to_string(),
            deviate_shot_angle: 0.002,
            reload_time_ms: 0.0,
            magazines: vec!["NATO_25x184mm".to_string()],
            projectile: Some(WeaponAmmoData {
                rate_of_fire: 700.0,
                shots_in_burst: 0,
            }),
            missile: None,
        };

        assert_eq!(
            weapon
                .ammo_data(AmmoKind::Projectile)
                .map(|data| data.rate_of_fire),
            Some(700.0)
        );
        assert!(weapon.ammo_data(AmmoKind::Missile).is_none());
    }
}
