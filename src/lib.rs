//! Scene Forge — compact scene specifications to image-prompt text.
//!
//! Parses a `count|characters|actions|locations` mini-language, expands it
//! into character groupings with best-effort repetition avoidance, and
//! renders each grouping with a cycled action and location into a sentence.

pub mod core;
pub mod schema;
