use std::fmt;

use serde::{Deserialize, Serialize};

/// Physical item reference such as `Ingot/Uranium`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId {
    pub type_name: String,
    pub subtype: String,
}

impl ItemId {
    pub fn new(type_name: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            subtype: subtype.into(),
        }
    }
}

/// Reads as "Uranium Ingot".
impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.subtype, self.type_name)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryConstraint {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "whitelist_default")]
    pub whitelist: bool,
    #[serde(default)]
    pub ids: Vec<ItemId>,
    #[serde(default)]
    pub types: Vec<String>,
}

impl InventoryConstraint {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty() && self.types.is_empty()
    }

    /// Short summary used after an inventory volume, e.g. "Ore only".
    pub fn summary(&self) -> String {
        if let Some(description) = &self.description {
            return description.clone();
        }

        let mut names: Vec<String> = self.types.clone();
        names.extend(self.ids.iter().map(|id| id.subtype.clone()));

        if self.whitelist {
            format!("{} only", names.join(", "))
        } else {
            format!("no {}", names.join(", "))
        }
    }
}

fn whitelist_default() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::{InventoryConstraint, ItemId};

    #[test]
    fn item_id_reads_subtype_first() {
        assert_eq!(ItemId::new("Ingot", "Uranium").to_string(), "Uranium Ingot");
    }

    #[test]
    fn constraint_summary_prefers_description() {
        let described = InventoryConstraint {
            description: Some("Ammo only".to_string()),
            ..InventoryConstraint::default()
        };
        assert_eq!(described.summary(), "Ammo only");

        let listed = InventoryConstraint {
            description: None,
            whitelist: true,
            ids: vec![ItemId::new("Ingot", "Uranium")],
            types: vec!["Ore".to_string()],
        };
        assert_eq!(listed.summary(), "Ore, Uranium only");

        let blocked = InventoryConstraint {
            whitelist: false,
            ..listed.clone()
        };
        assert_eq!(blocked.summary(), "no Ore, Uranium");
    }
}
