use serde::{Deserialize, Serialize};

/// How the requested characters are spread across scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistributionMode {
    /// `A+B+C`: the whole list appears together in every scene.
    Together,
    /// `A,B,C`: characters are split across scenes.
    Separate,
}

/// Grouping size taken from an optional `[n]` or `[min-max]` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sizing {
    Fixed(usize),
    Range { min: usize, max: usize },
    Unspecified,
}

impl Sizing {
    /// Inclusive bounds of the size to draw, or `None` when unspecified.
    pub fn bounds(&self) -> Option<(usize, usize)> {
        match *self {
            Self::Fixed(n) => Some((n, n)),
            Self::Range { min, max } => Some((min, max)),
            Self::Unspecified => None,
        }
    }
}

/// The character segment of a scene specification.
///
/// When `mode` is `Together` the sizing is carried along but never used:
/// the full name list is the grouping for every scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDistributionRequest {
    pub names: Vec<String>,
    pub mode: DistributionMode,
    pub sizing: Sizing,
}

impl CharacterDistributionRequest {
    /// One character per scene, cycled in list order.
    pub fn cycled(names: Vec<String>) -> Self {
        Self {
            names,
            mode: DistributionMode::Separate,
            sizing: Sizing::Unspecified,
        }
    }

    pub fn together(names: Vec<String>) -> Self {
        Self {
            names,
            mode: DistributionMode::Together,
            sizing: Sizing::Unspecified,
        }
    }

    pub fn sized(names: Vec<String>, sizing: Sizing) -> Self {
        Self {
            names,
            mode: DistributionMode::Separate,
            sizing,
        }
    }
}

/// A fully parsed `count|characters|actions|locations` specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneGenerationRequest {
    /// Number of scenes to produce. Non-positive values produce none.
    pub scene_count: i64,
    pub characters: CharacterDistributionRequest,
    pub actions: Vec<String>,
    pub locations: Vec<String>,
}

impl SceneGenerationRequest {
    /// Scene count clamped to zero.
    pub fn scenes(&self) -> usize {
        usize::try_from(self.scene_count).unwrap_or(0)
    }
}
