use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// The characters assigned to one scene.
///
/// Order is kept for rendering; identity for repetition purposes is the
/// set of names (see [`CharacterGrouping::same_set`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterGrouping(pub Vec<String>);

impl CharacterGrouping {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if both groupings hold the same names, ignoring order.
    pub fn same_set(&self, other: &CharacterGrouping) -> bool {
        let mine: FxHashSet<&str> = self.0.iter().map(String::as_str).collect();
        let theirs: FxHashSet<&str> = other.0.iter().map(String::as_str).collect();
        mine == theirs
    }
}

impl From<Vec<String>> for CharacterGrouping {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

/// One fully resolved scene, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    pub grouping: CharacterGrouping,
    pub action: String,
    pub location: String,
}
