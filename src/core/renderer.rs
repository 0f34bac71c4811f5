/// Prompt renderer — turns a grouping, action, and location into a sentence.
use crate::core::catalog::{Catalog, LookupMiss};
use crate::schema::scene::{CharacterGrouping, SceneDescriptor};

/// Renders scenes against a catalog. Rendering is deterministic and
/// never fails; unknown names degrade to their raw text.
#[derive(Debug, Clone, Copy)]
pub struct PromptRenderer<'a> {
    catalog: &'a Catalog,
}

impl<'a> PromptRenderer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Render one scene.
    ///
    /// - No characters: `"{action} in {location}"` with raw tokens.
    /// - Any unknown character: names joined by `" and "`, raw tokens.
    /// - Otherwise: `"A"`, `"A and B"`, or `"A, B, and C"`, followed by the
    ///   catalog display strings for the action and location.
    pub fn render(&self, grouping: &CharacterGrouping, action: &str, location: &str) -> String {
        let names = grouping.names();
        if names.is_empty() {
            return format!("{} in {}", action, location);
        }

        if !names.iter().all(|n| self.catalog.is_character(n)) {
            return format!("{} {} in {}", names.join(" and "), action, location);
        }

        let action_display = match self.catalog.action(action) {
            Ok(entry) => entry.display.as_str(),
            Err(_) => action,
        };
        let location_display = match self.catalog.location(location) {
            Ok(entry) => entry.display.as_str(),
            Err(_) => location,
        };

        format!(
            "{} {} in {}",
            subject_phrase(names),
            action_display,
            location_display
        )
    }

    pub fn render_descriptor(&self, scene: &SceneDescriptor) -> String {
        self.render(&scene.grouping, &scene.action, &scene.location)
    }

    /// Every name in the scene that the catalog does not know.
    pub fn misses(&self, scene: &SceneDescriptor) -> Vec<LookupMiss> {
        let mut misses: Vec<LookupMiss> = scene
            .grouping
            .names()
            .iter()
            .filter_map(|n| self.catalog.character(n).err())
            .collect();
        misses.extend(self.catalog.action(&scene.action).err());
        misses.extend(self.catalog.location(&scene.location).err());
        misses
    }
}

/// Join names with "and", using a serial comma for three or more.
fn subject_phrase(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} and {}", first, second),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}
