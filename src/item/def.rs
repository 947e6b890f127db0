//! Item type definitions and the catalog that validates them.
//!
//! A definition carries everything that is fixed per item type; stacks copy
//! this data at construction time. The catalog is validated once when it is
//! built, so the rest of the crate never re-checks definition shape.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed schema for one item type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
    pub stack_size: i32,
    pub buy_value: i32,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Errors raised while building a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not parse item definitions: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("item definition '{id}' is invalid: {reason}")]
    InvalidDef { id: String, reason: String },
    #[error("duplicate item definition '{id}'")]
    Duplicate { id: String },
}

#[derive(Deserialize)]
struct CatalogFile {
    items: Vec<ItemDef>,
}

/// Registry of item definitions keyed by id.
#[derive(Debug, Default)]
pub struct ItemCatalog {
    defs: HashMap<String, ItemDef>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TOML document of `[[items]]` tables and validates every entry.
    pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(source)?;
        let mut catalog = Self::new();
        for def in file.items {
            catalog.register(def)?;
        }
        Ok(catalog)
    }

    /// Registers a definition. Ids must be unique and non-empty, and the
    /// stack size must be positive.
    pub fn register(&mut self, def: ItemDef) -> Result<(), CatalogError> {
        if def.id.is_empty() {
            return Err(CatalogError::InvalidDef {
                id: def.id,
                reason: "empty id".to_string(),
            });
        }
        if def.stack_size < 1 {
            return Err(CatalogError::InvalidDef {
                id: def.id,
                reason: format!("stack size {} is not positive", def.stack_size),
            });
        }
        if self.defs.contains_key(&def.id) {
            return Err(CatalogError::Duplicate { id: def.id });
        }
        self.defs.insert(def.id.clone(), def);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ItemDef> {
        self.defs.get(id)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_toml_definitions() {
        let catalog = ItemCatalog::from_toml_str(
            r#"
            [[items]]
            id = "apple"
            name = "Apple"
            tags = ["usable"]
            description = "Nom nom."
            stack_size = 20
            buy_value = 3

            [[items]]
            id = "sword"
            name = "Sword"
            tags = ["weapon", "equip"]
            description = "This is a powerful sword."
            stack_size = 1
            buy_value = 100
            "#,
        )
        .expect("catalog should parse");

        assert_eq!(catalog.len(), 2);
        let apple = catalog.get("apple").expect("apple is registered");
        assert_eq!(apple.stack_size, 20);
        assert_eq!(apple.tags, vec!["usable".to_string()]);
        assert!(apple.icon.is_none());
    }

    #[test]
    fn optional_fields_default() {
        let catalog = ItemCatalog::from_toml_str(
            r#"
            [[items]]
            id = "rock"
            name = "Rock"
            stack_size = 5
            buy_value = 1
            "#,
        )
        .expect("catalog should parse");

        let rock = catalog.get("rock").expect("rock is registered");
        assert!(rock.tags.is_empty());
        assert!(rock.description.is_empty());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut catalog = ItemCatalog::new();
        let def = ItemDef {
            id: "apple".to_string(),
            name: "Apple".to_string(),
            tags: Vec::new(),
            description: String::new(),
            stack_size: 20,
            buy_value: 3,
            icon: None,
        };
        catalog.register(def.clone()).expect("first registration");
        assert!(matches!(
            catalog.register(def),
            Err(CatalogError::Duplicate { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_stack_size() {
        let mut catalog = ItemCatalog::new();
        let def = ItemDef {
            id: "broken".to_string(),
            name: "Broken".to_string(),
            tags: Vec::new(),
            description: String::new(),
            stack_size: 0,
            buy_value: 1,
            icon: None,
        };
        assert!(matches!(
            catalog.register(def),
            Err(CatalogError::InvalidDef { .. })
        ));
    }
}
