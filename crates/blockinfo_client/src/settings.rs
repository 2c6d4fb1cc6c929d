use std::{fs, io, path::Path};

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Bumped whenever a flag is added so older files pick it up on load.
pub const CONFIG_VERSION: u32 = 2;

bitflags! {
    /// Lines shown for the block under the crosshair.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct AimInfoFlags: u32 {
        const BLOCK_NAME           = 1 << 0;
        const MASS                 = 1 << 1;
        const INTEGRITY            = 1 << 2;
        const DAMAGE_MULTIPLIER    = 1 << 3;
        const OWNERSHIP            = 1 << 4;
        const TOOL_USE_TIME        = 1 << 5;
        const GRIND_CHANGE_WARNING = 1 << 6;
        const GRID_MOVING          = 1 << 7;
        const SHIP_GRINDER_IMPULSE = 1 << 8;
        const GRIND_GRID_SPLIT     = 1 << 9;
        const ADDED_BY_MOD         = 1 << 10;
        const OVERLAY_HINT         = 1 << 11;
    }
}

bitflags! {
    /// Lines shown for the block held for placement.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct HeldInfoFlags: u32 {
        const BLOCK_NAME           = 1 << 0;
        const LINE1                = 1 << 1;
        const LINE2                = 1 << 2;
        const AIRTIGHT             = 1 << 3;
        const MIRRORING            = 1 << 4;
        const GRIND_CHANGE_WARNING = 1 << 5;
        const POWER_STATS          = 1 << 6;
        const RESOURCE_PRIORITIES  = 1 << 7;
        const PRODUCTION           = 1 << 8;
        const INVENTORY_STATS      = 1 << 9;
        const INVENTORY_EXTRAS     = 1 << 10;
        const ITEM_INPUTS          = 1 << 11;
        const AMMO_DETAILS         = 1 << 12;
        const EXTRA_INFO           = 1 << 13;
        const PART_STATS           = 1 << 14;
        const ADDED_BY_MOD         = 1 << 15;
        const OVERLAY_HINT         = 1 << 16;
    }
}

/// User configuration persisted as `settings.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Absent in files written before versioning, which reads as 0.
    #[serde(default)]
    pub config_version: u32,
    pub show_text_info: bool,
    pub always_visible: bool,
    pub use_rich_text: bool,
    pub text_scale: f32,
    /// Negative uses the HUD's own background opacity.
    pub background_opacity: f32,
    pub custom_styling: bool,
    pub screen_pos: Vec2,
    pub align_right: bool,
    pub align_bottom: bool,
    pub aim_info: AimInfoFlags,
    pub held_info: HeldInfoFlags,
    pub cycle_overlays_bind: String,
    pub menu_bind: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_version: CONFIG_VERSION,
            show_text_info: true,
            always_visible: false,
            use_rich_text: true,
            text_scale: 1.0,
            background_opacity: -1.0,
            custom_styling: false,
            screen_pos: Vec2::new(-0.9825, 0.8),
            align_right: false,
            align_bottom: false,
            aim_info: AimInfoFlags::all(),
            held_info: HeldInfoFlags::all(),
            cycle_overlays_bind: "Ctrl+Shift+Plus".to_string(),
            menu_bind: "Plus".to_string(),
        }
    }
}

impl Settings {
    /// Saves settings as pretty TOML.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("failed to serialize settings: {e}"),
            )
        })?;
        fs::write(path, toml_string)
    }

    /// Loads settings, or `None` when the file does not exist yet.
    pub fn load(path: &Path) -> io::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let toml_string = fs::read_to_string(path)?;
        let mut settings: Settings = toml::from_str(&toml_string).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("failed to deserialize settings: {e}"),
            )
        })?;
        settings.migrate();
        Ok(Some(settings))
    }

    /// Turns on flags introduced after the file's version.
    pub fn migrate(&mut self) {
        if self.config_version >= CONFIG_VERSION {
            return;
        }

        if self.config_version < 2 {
            self.aim_info |= AimInfoFlags::SHIP_GRINDER_IMPULSE | AimInfoFlags::GRIND_GRID_SPLIT;
            self.held_info |= HeldInfoFlags::INVENTORY_EXTRAS | HeldInfoFlags::PART_STATS;
        }

        info!(
            "migrated settings from version {} to {CONFIG_VERSION}",
            self.config_version
        );
        self.config_version = CONFIG_VERSION;
    }

    /// Whether switching from `self` to `other` changes generated text, not only its placement.
    pub fn affects_content(&self, other: &Settings) -> bool {
        self.aim_info != other.aim_info
            || self.held_info != other.held_info
            || self.cycle_overlays_bind != other.cycle_overlays_bind
            || self.menu_bind != other.menu_bind
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{AimInfoFlags, HeldInfoFlags, Settings, CONFIG_VERSION};

    fn temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("blockinfo-{name}-{}-{nanos}", std::process::id()))
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = temp_dir("settings-roundtrip");
        let path = dir.join("settings.toml");

        let mut settings = Settings::default();
        settings.use_rich_text = false;
        settings.held_info.remove(HeldInfoFlags::AMMO_DETAILS);
        settings.save(&path).expect("settings should save");

        let loaded = Settings::load(&path)
            .expect("settings should load")
            .expect("settings file should exist");
        assert_eq!(loaded, settings);

        fs::remove_dir_all(dir).expect("temp dir should be removable");
    }

    #[test]
    fn missing_file_is_none() {
        let path = temp_dir("settings-missing").join("settings.toml");
        assert!(Settings::load(&path).expect("missing file is not an error").is_none());
    }

    #[test]
    fn old_files_gain_new_flags() {
        let dir = temp_dir("settings-migrate");
        fs::create_dir_all(&dir).expect("temp dir should be creatable");
        let path = dir.join("settings.toml");
        fs::write(
            &path,
            "show_text_info = false\naim_info = \"BLOCK_NAME | MASS\"\nheld_info = \"LINE1\"\n",
        )
        .expect("settings file should write");

        let loaded = Settings::load(&path)
            .expect("settings should load")
            .expect("settings file should exist");
        assert!(!loaded.show_text_info);
        assert_eq!(loaded.config_version, CONFIG_VERSION);
        assert!(loaded.aim_info.contains(AimInfoFlags::MASS | AimInfoFlags::GRIND_GRID_SPLIT));
        assert!(!loaded.aim_info.contains(AimInfoFlags::OWNERSHIP));
        assert!(loaded.held_info.contains(HeldInfoFlags::LINE1 | HeldInfoFlags::PART_STATS));

        fs::remove_dir_all(dir).expect("temp dir should be removable");
    }

    #[test]
    fn only_flags_and_binds_affect_content() {
        let base = Settings::default();

        let mut moved = base.clone();
        moved.screen_pos.x = 0.5;
        moved.text_scale = 2.0;
        assert!(!base.affects_content(&moved));

        let mut trimmed = base.clone();
        trimmed.aim_info.remove(AimInfoFlags::MASS);
        assert!(base.affects_content(&trimmed));
    }
}
