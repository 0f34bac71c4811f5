/// Scene specification parser for the `count|characters|actions|locations` format.
///
/// Grammar:
/// - `count`: integer literal; non-positive counts are accepted and yield no scenes
/// - `characters`: optional `[n]` or `[min-max]` prefix, then either
///   `A+B+C` (together), `A,B,C` (separate), or `ALL` (the whole catalog
///   together, or split across scenes when sized)
/// - `actions` / `locations`: `a,b,c` or `RANDOM`
///
/// Empty names are kept as empty strings so they surface as lookup misses
/// when rendered.
use thiserror::Error;
use tracing::debug;

use crate::core::catalog::Catalog;
use crate::schema::request::{
    CharacterDistributionRequest, DistributionMode, SceneGenerationRequest, Sizing,
};

/// Expands to every catalog character.
pub const ALL_CHARACTERS: &str = "ALL";
/// Expands to every catalog action or location.
pub const RANDOM_ENTRIES: &str = "RANDOM";

const SEGMENT_SEPARATOR: char = '|';
const TOGETHER_SEPARATOR: char = '+';
const LIST_SEPARATOR: char = ',';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpecError {
    #[error("expected 4 segments (count|characters|actions|locations), found {0}")]
    SegmentCount(usize),
    #[error("scene count is not an integer: '{0}'")]
    InvalidCount(String),
    #[error("invalid character count '[{0}]': expected 1 <= min <= max")]
    InvalidSizing(String),
}

impl SpecError {
    /// Returns true for errors where the spec string does not have the
    /// basic `count|characters|actions|locations` shape.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::SegmentCount(_) | Self::InvalidCount(_))
    }
}

/// Parses specification strings against a catalog, which supplies the
/// wildcard expansions.
#[derive(Debug, Clone, Copy)]
pub struct SpecParser<'a> {
    catalog: &'a Catalog,
}

impl<'a> SpecParser<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn parse(&self, spec: &str) -> Result<SceneGenerationRequest, SpecError> {
        let parts: Vec<&str> = spec.split(SEGMENT_SEPARATOR).map(str::trim).collect();
        if parts.len() != 4 {
            return Err(SpecError::SegmentCount(parts.len()));
        }

        let scene_count = parts[0]
            .parse::<i64>()
            .map_err(|_| SpecError::InvalidCount(parts[0].to_string()))?;
        let characters = self.parse_characters(parts[1])?;
        let actions = parse_list(parts[2], RANDOM_ENTRIES, || self.catalog.action_names());
        let locations = parse_list(parts[3], RANDOM_ENTRIES, || self.catalog.location_names());

        debug!(
            scene_count,
            mode = ?characters.mode,
            sizing = ?characters.sizing,
            characters = characters.names.len(),
            actions = actions.len(),
            locations = locations.len(),
            "parsed scene spec"
        );

        Ok(SceneGenerationRequest {
            scene_count,
            characters,
            actions,
            locations,
        })
    }

    fn parse_characters(&self, segment: &str) -> Result<CharacterDistributionRequest, SpecError> {
        let prefix = split_sizing(segment);
        let names_part = prefix.as_ref().map_or(segment, |p| p.names);

        // Together uses the full list, so its size prefix is carried unchecked.
        if names_part.contains(TOGETHER_SEPARATOR) {
            let names = names_part
                .split(TOGETHER_SEPARATOR)
                .map(|n| n.trim().to_string())
                .collect();
            return Ok(CharacterDistributionRequest {
                names,
                mode: DistributionMode::Together,
                sizing: prefix.and_then(|p| p.sizing).unwrap_or(Sizing::Unspecified),
            });
        }

        let sizing = match prefix {
            Some(prefix) => prefix.validated()?,
            None => Sizing::Unspecified,
        };

        // A bare `ALL` puts the whole cast in every scene; `[n]ALL` splits it.
        let mode = if sizing == Sizing::Unspecified && names_part.trim() == ALL_CHARACTERS {
            DistributionMode::Together
        } else {
            DistributionMode::Separate
        };
        let names = parse_list(names_part, ALL_CHARACTERS, || self.catalog.character_names());
        Ok(CharacterDistributionRequest {
            names,
            mode,
            sizing,
        })
    }
}

/// A leading `[n]` / `[min-max]` group and the names after it.
struct SizePrefix<'s> {
    /// Text between the brackets.
    text: &'s str,
    /// `None` when a bound does not fit in `usize`.
    sizing: Option<Sizing>,
    names: &'s str,
}

impl SizePrefix<'_> {
    /// The sizing, if it satisfies `1 <= min <= max`.
    fn validated(&self) -> Result<Sizing, SpecError> {
        match self.sizing {
            Some(sizing) => match sizing.bounds() {
                Some((min, max)) if min >= 1 && min <= max => Ok(sizing),
                _ => Err(SpecError::InvalidSizing(self.text.to_string())),
            },
            None => Err(SpecError::InvalidSizing(self.text.to_string())),
        }
    }
}

/// Split a leading size group off the character segment.
///
/// Returns `None` when the segment has no well-formed group or nothing
/// follows the closing bracket; the whole segment is then read as names.
fn split_sizing(segment: &str) -> Option<SizePrefix<'_>> {
    let rest = segment.strip_prefix('[')?;
    let (inner, names) = rest.split_once(']')?;
    if names.is_empty() {
        return None;
    }

    let (min_text, max_text) = match inner.split_once('-') {
        Some((min, max)) => (min, Some(max)),
        None => (inner, None),
    };
    if !is_digits(min_text) || !max_text.map_or(true, is_digits) {
        return None;
    }

    let min = min_text.parse::<usize>().ok();
    let sizing = match max_text {
        Some(max_text) => match (min, max_text.parse::<usize>().ok()) {
            (Some(min), Some(max)) => Some(Sizing::Range { min, max }),
            _ => None,
        },
        None => min.map(Sizing::Fixed),
    };

    Some(SizePrefix {
        text: inner,
        sizing,
        names,
    })
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Split a comma list, expanding `wildcard` when it is the only entry.
fn parse_list(segment: &str, wildcard: &str, expand: impl FnOnce() -> Vec<String>) -> Vec<String> {
    let entries: Vec<String> = segment
        .split(LIST_SEPARATOR)
        .map(|e| e.trim().to_string())
        .collect();
    if entries.len() == 1 && entries[0] == wildcard {
        expand()
    } else {
        entries
    }
}
