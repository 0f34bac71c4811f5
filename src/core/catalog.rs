/// Read-only registry of known characters, actions, and locations.
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// The catalog shipped with the tool.
const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.ron");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("duplicate {axis} entry: {name}")]
    Duplicate { axis: Axis, name: String },
}

/// Which list of the catalog a name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Character,
    Action,
    Location,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Character => "character",
            Self::Action => "action",
            Self::Location => "location",
        };
        f.write_str(label)
    }
}

/// A name that the catalog does not know. Callers degrade to the raw token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupMiss {
    pub axis: Axis,
    pub name: String,
}

/// Display metadata for a known character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterTheme {
    pub name: String,
    #[serde(default)]
    pub palette: Vec<String>,
    #[serde(default)]
    pub accessories: Vec<String>,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub temperament: String,
}

/// An action or location key and the text it renders as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayEntry {
    pub name: String,
    pub display: String,
}

// RON file shape. Display strings are optional and default to the key.

#[derive(Debug, Deserialize)]
struct RonEntry {
    name: String,
    #[serde(default)]
    display: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RonCatalog {
    #[serde(default)]
    characters: Vec<CharacterTheme>,
    #[serde(default)]
    actions: Vec<RonEntry>,
    #[serde(default)]
    locations: Vec<RonEntry>,
}

impl From<RonEntry> for DisplayEntry {
    fn from(entry: RonEntry) -> Self {
        let display = entry.display.unwrap_or_else(|| entry.name.clone());
        Self {
            name: entry.name,
            display,
        }
    }
}

/// Immutable registry of entity names. Each axis keeps its declaration
/// order, which is the order wildcard expansion uses.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    characters: Vec<CharacterTheme>,
    actions: Vec<DisplayEntry>,
    locations: Vec<DisplayEntry>,
    character_index: FxHashMap<String, usize>,
    action_index: FxHashMap<String, usize>,
    location_index: FxHashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from explicit lists, rejecting duplicate keys.
    pub fn from_parts(
        characters: Vec<CharacterTheme>,
        actions: Vec<DisplayEntry>,
        locations: Vec<DisplayEntry>,
    ) -> Result<Catalog, CatalogError> {
        let character_index =
            index_names(Axis::Character, characters.iter().map(|c| c.name.as_str()))?;
        let action_index = index_names(Axis::Action, actions.iter().map(|a| a.name.as_str()))?;
        let location_index =
            index_names(Axis::Location, locations.iter().map(|l| l.name.as_str()))?;

        Ok(Catalog {
            characters,
            actions,
            locations,
            character_index,
            action_index,
            location_index,
        })
    }

    /// The catalog embedded in the crate.
    pub fn builtin() -> Result<Catalog, CatalogError> {
        Self::parse_ron(BUILTIN_CATALOG)
    }

    /// Load a catalog from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Catalog, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a catalog from a RON string.
    pub fn parse_ron(input: &str) -> Result<Catalog, CatalogError> {
        let raw: RonCatalog = ron::from_str(input)?;
        Self::from_parts(
            raw.characters,
            raw.actions.into_iter().map(DisplayEntry::from).collect(),
            raw.locations.into_iter().map(DisplayEntry::from).collect(),
        )
    }

    pub fn character(&self, name: &str) -> Result<&CharacterTheme, LookupMiss> {
        self.character_index
            .get(name)
            .map(|&i| &self.characters[i])
            .ok_or_else(|| miss(Axis::Character, name))
    }

    pub fn action(&self, name: &str) -> Result<&DisplayEntry, LookupMiss> {
        self.action_index
            .get(name)
            .map(|&i| &self.actions[i])
            .ok_or_else(|| miss(Axis::Action, name))
    }

    pub fn location(&self, name: &str) -> Result<&DisplayEntry, LookupMiss> {
        self.location_index
            .get(name)
            .map(|&i| &self.locations[i])
            .ok_or_else(|| miss(Axis::Location, name))
    }

    pub fn is_character(&self, name: &str) -> bool {
        self.character_index.contains_key(name)
    }

    pub fn characters(&self) -> &[CharacterTheme] {
        &self.characters
    }

    /// Character keys in declaration order.
    pub fn character_names(&self) -> Vec<String> {
        self.characters.iter().map(|c| c.name.clone()).collect()
    }

    /// Action keys in declaration order.
    pub fn action_names(&self) -> Vec<String> {
        self.actions.iter().map(|a| a.name.clone()).collect()
    }

    /// Location keys in declaration order.
    pub fn location_names(&self) -> Vec<String> {
        self.locations.iter().map(|l| l.name.clone()).collect()
    }
}

fn miss(axis: Axis, name: &str) -> LookupMiss {
    LookupMiss {
        axis,
        name: name.to_string(),
    }
}

fn index_names<'a>(
    axis: Axis,
    names: impl Iterator<Item = &'a str>,
) -> Result<FxHashMap<String, usize>, CatalogError> {
    let mut index = FxHashMap::default();
    for (i, name) in names.enumerate() {
        if index.insert(name.to_string(), i).is_some() {
            return Err(CatalogError::Duplicate {
                axis,
                name: name.to_string(),
            });
        }
    }
    Ok(index)
}
