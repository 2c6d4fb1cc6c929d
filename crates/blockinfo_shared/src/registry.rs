use std::{fs, io, path::Path};

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::block::{BlockDefinition, BlockDefinitionId, CubeSize};
use crate::weapon::{AmmoDefinition, AmmoMagazineDefinition, WeaponDefinition};

/// Large and small variants of a mechanical top part.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DefinitionGroup {
    pub name: String,
    #[serde(default)]
    pub large: Option<BlockDefinitionId>,
    #[serde(default)]
    pub small: Option<BlockDefinitionId>,
}

impl DefinitionGroup {
    pub fn for_size(&self, size: CubeSize) -> Option<&BlockDefinitionId> {
        match size {
            CubeSize::Large => self.large.as_ref(),
            CubeSize::Small => self.small.as_ref(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacterDefinition {
    pub id: String,
    pub display_name: String,
}

/// Distribution group for power sinks or sources. Lower priority is served first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceGroup {
    pub name: String,
    pub priority: u32,
    #[serde(default)]
    pub is_source: bool,
}

/// On-disk layout of a definitions file.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefinitionFile {
    pub blocks: Vec<BlockDefinition>,
    pub weapons: Vec<WeaponDefinition>,
    pub magazines: Vec<AmmoMagazineDefinition>,
    pub ammo: Vec<AmmoDefinition>,
    pub characters: Vec<CharacterDefinition>,
    pub groups: Vec<DefinitionGroup>,
    pub hud_definitions: Vec<String>,
    pub resource_groups: Vec<ResourceGroup>,
}

#[derive(Default)]
pub struct DefinitionRegistry {
    blocks: FxHashMap<BlockDefinitionId, BlockDefinition>,
    order: Vec<BlockDefinitionId>,
    weapons: FxHashMap<String, WeaponDefinition>,
    magazines: FxHashMap<String, AmmoMagazineDefinition>,
    ammo: FxHashMap<String, AmmoDefinition>,
    characters: FxHashMap<String, CharacterDefinition>,
    groups: FxHashMap<String, DefinitionGroup>,
    hud_definitions: FxHashSet<String>,
    resource_groups: Vec<ResourceGroup>,
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file(file: DefinitionFile) -> Self {
        let mut registry = Self::new();

        for block in file.blocks {
            registry.register_block(block);
        }
        for weapon in file.weapons {
            registry.weapons.insert(weapon.id.clone(), weapon);
        }
        for magazine in file.magazines {
            registry.magazines.insert(magazine.id.clone(), magazine);
        }
        for ammo in file.ammo {
            registry.ammo.insert(ammo.id.clone(), ammo);
        }
        for character in file.characters {
            registry.characters.insert(character.id.clone(), character);
        }
        for group in file.groups {
            registry.groups.insert(group.name.clone(), group);
        }
        registry.hud_definitions.extend(file.hud_definitions);
        for group in file.resource_groups {
            registry.register_resource_group(group);
        }

        registry
    }

    /// Parses a definitions file from TOML text.
    pub fn from_toml_str(text: &str) -> io::Result<Self> {
        let file: DefinitionFile = toml::from_str(text).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("failed to deserialize definitions: {e}"),
            )
        })?;
        Ok(Self::from_file(file))
    }

    /// Loads a definitions file from disk.
    pub fn load(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        let registry = Self::from_toml_str(&text)?;
        debug!(
            "loaded {} block definitions from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Adds a block definition. A definition with the same id replaces the old one but keeps its position.
    pub fn register_block(&mut self, def: BlockDefinition) {
        if !self.blocks.contains_key(&def.id) {
            self.order.push(def.id.clone());
        }
        self.blocks.insert(def.id.clone(), def);
    }

    pub fn register_weapon(&mut self, weapon: WeaponDefinition) {
        self.weapons.insert(weapon.id.clone(), weapon);
    }

    pub fn register_magazine(&mut self, magazine: AmmoMagazineDefinition) {
        self.magazines.insert(magazine.id.clone(), magazine);
    }

    pub fn register_ammo(&mut self, ammo: AmmoDefinition) {
        self.ammo.insert(ammo.id.clone(), ammo);
    }

    pub fn register_character(&mut self, character: CharacterDefinition) {
        self.characters.insert(character.id.clone(), character);
    }

    pub fn register_group(&mut self, group: DefinitionGroup) {
        self.groups.insert(group.name.clone(), group);
    }

    pub fn register_hud(&mut self, name: impl Into<String>) {
        self.hud_definitions.insert(name.into());
    }

    pub fn register_resource_group(&mut self, group: ResourceGroup) {
        self.resource_groups.retain(|existing| existing.name != group.name);
        self.resource_groups.push(group);
        self.resource_groups
            .sort_by(|a, b| (a.is_source, a.priority).cmp(&(b.is_source, b.priority)));
    }

    pub fn block(&self, id: &BlockDefinitionId) -> Option<&BlockDefinition> {
        self.blocks.get(id)
    }

    /// Block definitions in registration order.
    pub fn blocks(&self) -> impl Iterator<Item = &BlockDefinition> {
        self.order.iter().filter_map(|id| self.blocks.get(id))
    }

    pub fn find_by_subtype(&self, subtype: &str) -> Option<&BlockDefinition> {
        self.blocks().find(|def| def.id.subtype == subtype)
    }

    pub fn weapon(&self, id: &str) -> Option<&WeaponDefinition> {
        self.weapons.get(id)
    }

    pub fn magazine(&self, id: &str) -> Option<&AmmoMagazineDefinition> {
        self.magazines.get(id)
    }

    pub fn ammo(&self, id: &str) -> Option<&AmmoDefinition> {
        self.ammo.get(id)
    }

    pub fn character(&self, id: &str) -> Option<&CharacterDefinition> {
        self.characters.get(id)
    }

    pub fn group(&self, name: &str) -> Option<&DefinitionGroup> {
        self.groups.get(name)
    }

    pub fn has_hud(&self, name: &str) -> bool {
        self.hud_definitions.contains(name)
    }

    /// 1-based rank of a resource group among groups of the same direction, plus that direction's count.
    pub fn resource_priority(&self, name: &str) -> Option<(usize, usize)> {
        let group = self.resource_groups.iter().find(|g| g.name == name)?;
        let peers: Vec<&ResourceGroup> = self
            .resource_groups
            .iter()
            .filter(|g| g.is_source == group.is_source)
            .collect();
        let rank = peers.iter().position(|g| g.name == name)? + 1;
        Some((rank, peers.len()))
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{DefinitionRegistry, ResourceGroup};
    use crate::block::{BlockCategory, BlockDefinition, BlockDefinitionId, CubeSize};
    use crate::kinds::BlockKind;

    const SAMPLE: &str = r#"
[[blocks]]
display_name = "Large Atmospheric Thruster"
size = [1.0, 1.0, 2.0]
mass = 4000.0
max_integrity = 2000.0
integrity_per_second = 20.0
has_computer = true

[blocks.id]
category = "Thrust"
subtype = "LargeAtmo"

[blocks.kind]
kind = "thrust"
force = 6480000.0
max_power = 16.8
min_power = 0.000002
sink_group = "Thrust"

[[blocks]]
display_name = "Rotor Head"
size = [1.0, 1.0, 1.0]
mass = 100.0
max_integrity = 100.0
integrity_per_second = 10.0

[blocks.id]
category = "Decorative"
subtype = "RotorHead"

[[groups]]
name = "Rotor"
large = { category = "CubeBlock", subtype = "LargeRotorHead" }

[[resource_groups]]
name = "Utility"
priority = 3

[[resource_groups]]
name = "Thrust"
priority = 1

[[resource_groups]]
name = "Reactors"
priority = 1
is_source = true
"#;

    #[test]
    fn parses_blocks_from_toml() {
        let registry = DefinitionRegistry::from_toml_str(SAMPLE).expect("sample should parse");
        assert_eq!(registry.len(), 2);

        let thrust = registry
            .block(&BlockDefinitionId::new(BlockCategory::Thrust, "LargeAtmo"))
            .expect("thruster should be registered");
        assert_eq!(thrust.mass, 4000.0);
        assert!(thrust.has_computer);
        match &thrust.kind {
            BlockKind::Thrust(data) => {
                assert_eq!(data.force, 6_480_000.0);
                assert_eq!(data.sink_group.as_deref(), Some("Thrust"));
            }
            other => panic!("expected thrust payload, got {other:?}"),
        }

        let head = registry
            .find_by_subtype("RotorHead")
            .expect("rotor head should be registered");
        assert_eq!(head.id.category, BlockCategory::Unknown);
        assert_eq!(head.kind, BlockKind::Decorative);
    }

    #[test]
    fn groups_resolve_per_cube_size() {
        let registry = DefinitionRegistry::from_toml_str(SAMPLE).expect("sample should parse");
        let group = registry.group("Rotor").expect("rotor group should exist");

        assert_eq!(
            group.for_size(CubeSize::Large).map(|id| id.subtype.as_str()),
            Some("LargeRotorHead")
        );
        assert!(group.for_size(CubeSize::Small).is_none());
    }

    #[test]
    fn resource_priority_ranks_within_direction() {
        let registry = DefinitionRegistry::from_toml_str(SAMPLE).expect("sample should parse");

        assert_eq!(registry.resource_priority("Thrust"), Some((1, 2)));
        assert_eq!(registry.resource_priority("Utility"), Some((2, 2)));
        assert_eq!(registry.resource_priority("Reactors"), Some((1, 1)));
        assert_eq!(registry.resource_priority("Missing"), None);
    }

    #[test]
    fn re_registering_keeps_order() {
        let mut registry = DefinitionRegistry::new();
        let first = BlockDefinitionId::new(BlockCategory::CubeBlock, "A");
        let second = BlockDefinitionId::new(BlockCategory::CubeBlock, "B");

        registry.register_block(BlockDefinition::minimal(first.clone(), "A"));
        registry.register_block(BlockDefinition::minimal(second, "B"));
        let mut renamed = BlockDefinition::minimal(first, "A2");
        renamed.mass = 10.0;
        registry.register_block(renamed);

        let names: Vec<&str> = registry.blocks().map(|def| def.display_name.as_str()).collect();
        assert_eq!(names, vec!["A2", "B"]);

        registry.register_resource_group(ResourceGroup {
            name: "Doors".to_string(),
            priority: 2,
            is_source: false,
        });
        assert_eq!(registry.resource_priority("Doors"), Some((1, 1)));
    }

    #[test]
    fn invalid_toml_is_invalid_data() {
        let err = DefinitionRegistry::from_toml_str("blocks = 5")
            .err()
            .expect("bad input should fail");
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
