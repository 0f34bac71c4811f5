/// Batch orchestration: spec string → groupings → paired scenes → rendered prompts.
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::core::catalog::{Axis, Catalog};
use crate::core::generator::CombinationGenerator;
use crate::core::parser::{SpecError, SpecParser};
use crate::core::renderer::PromptRenderer;
use crate::core::sampler::Sampler;
use crate::schema::request::SceneGenerationRequest;
use crate::schema::scene::SceneDescriptor;

/// Most scenes a single spec may request unless overridden.
pub const DEFAULT_SCENE_LIMIT: usize = 10_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("spec error: {0}")]
    Spec(#[from] SpecError),
    #[error("{requested} scenes requested, limit is {limit}")]
    TooManyScenes { requested: i64, limit: usize },
    #[error("no {0} entries to pair scenes with")]
    EmptyList(Axis),
}

/// Runs the whole pipeline for one spec at a time.
///
/// The i-th grouping is paired with `actions[i % actions.len()]` and
/// `locations[i % locations.len()]`; output order is scene order.
pub struct BatchOrchestrator<'a, S> {
    catalog: &'a Catalog,
    generator: CombinationGenerator<S>,
    scene_limit: usize,
}

impl<'a, S: Sampler> BatchOrchestrator<'a, S> {
    pub fn new(catalog: &'a Catalog, sampler: S) -> Self {
        Self {
            catalog,
            generator: CombinationGenerator::new(sampler),
            scene_limit: DEFAULT_SCENE_LIMIT,
        }
    }

    pub fn with_scene_limit(mut self, limit: usize) -> Self {
        self.scene_limit = limit;
        self
    }

    /// Generate rendered prompts, logging and swallowing any failure.
    ///
    /// An empty result means either nothing was requested or the spec was
    /// rejected; see [`Self::try_generate_all`] to tell them apart.
    pub fn generate_all(&mut self, spec: &str) -> Vec<String> {
        match self.try_generate_all(spec) {
            Ok(prompts) => prompts,
            Err(e) => {
                error!(spec, error = %e, "failed to generate prompts");
                Vec::new()
            }
        }
    }

    pub fn try_generate_all(&mut self, spec: &str) -> Result<Vec<String>, BatchError> {
        let scenes = self.plan(spec)?;
        let renderer = PromptRenderer::new(self.catalog);

        let prompts: Vec<String> = scenes
            .iter()
            .map(|scene| {
                let misses = renderer.misses(scene);
                if !misses.is_empty() {
                    let names: Vec<&str> = misses.iter().map(|m| m.name.as_str()).collect();
                    warn!(?names, "unknown catalog names, rendering raw text");
                }
                renderer.render_descriptor(scene)
            })
            .collect();

        debug!(count = prompts.len(), "rendered prompts");
        Ok(prompts)
    }

    /// Parse a spec and resolve it into scene descriptors without rendering.
    pub fn plan(&mut self, spec: &str) -> Result<Vec<SceneDescriptor>, BatchError> {
        let request = SpecParser::new(self.catalog).parse(spec)?;
        self.plan_request(&request)
    }

    pub fn plan_request(
        &mut self,
        request: &SceneGenerationRequest,
    ) -> Result<Vec<SceneDescriptor>, BatchError> {
        if request.scenes() > self.scene_limit {
            return Err(BatchError::TooManyScenes {
                requested: request.scene_count,
                limit: self.scene_limit,
            });
        }

        let groupings = self
            .generator
            .generate(&request.characters, request.scene_count);
        if groupings.is_empty() {
            return Ok(Vec::new());
        }
        if request.actions.is_empty() {
            return Err(BatchError::EmptyList(Axis::Action));
        }
        if request.locations.is_empty() {
            return Err(BatchError::EmptyList(Axis::Location));
        }

        Ok(groupings
            .into_iter()
            .enumerate()
            .map(|(i, grouping)| SceneDescriptor {
                grouping,
                action: request.actions[i % request.actions.len()].clone(),
                location: request.locations[i % request.locations.len()].clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sampler::RngSampler;
    use crate::schema::request::CharacterDistributionRequest;

    #[test]
    fn cycles_actions_and_locations() {
        let catalog = Catalog::builtin().unwrap();
        let mut batch = BatchOrchestrator::new(&catalog, RngSampler::seeded(1));
        let scenes = batch
            .plan("5|Orange|playing,eating|park,beach,city")
            .unwrap();
        let actions: Vec<&str> = scenes.iter().map(|s| s.action.as_str()).collect();
        let locations: Vec<&str> = scenes.iter().map(|s| s.location.as_str()).collect();
        assert_eq!(actions, vec!["playing", "eating", "playing", "eating", "playing"]);
        assert_eq!(locations, vec!["park", "beach", "city", "park", "beach"]);
    }

    #[test]
    fn malformed_spec_yields_empty() {
        let catalog = Catalog::builtin().unwrap();
        let mut batch = BatchOrchestrator::new(&catalog, RngSampler::seeded(1));
        assert!(batch.generate_all("abc|Orange|dancing|garden").is_empty());
        assert_eq!(
            batch.try_generate_all("abc|Orange|dancing|garden"),
            Err(BatchError::Spec(SpecError::InvalidCount("abc".to_string())))
        );
    }

    #[test]
    fn empty_pairing_list_is_an_error() {
        let catalog = Catalog::builtin().unwrap();
        let mut batch = BatchOrchestrator::new(&catalog, RngSampler::seeded(1));
        let request = SceneGenerationRequest {
            scene_count: 2,
            characters: CharacterDistributionRequest::cycled(vec!["Orange".to_string()]),
            actions: vec![],
            locations: vec!["park".to_string()],
        };
        assert_eq!(
            batch.plan_request(&request),
            Err(BatchError::EmptyList(Axis::Action))
        );
    }

    #[test]
    fn huge_scene_count_is_rejected_before_allocating() {
        let catalog = Catalog::builtin().unwrap();
        let mut batch = BatchOrchestrator::new(&catalog, RngSampler::seeded(1));
        for spec in [
            "9223372036854775807|Orange+Pigeon|dancing|garden",
            "9223372036854775807|[1]Orange,Pigeon|dancing|garden",
            "9223372036854775807|Orange,Pigeon|dancing|garden",
        ] {
            assert!(batch.generate_all(spec).is_empty(), "{}", spec);
            assert_eq!(
                batch.try_generate_all(spec),
                Err(BatchError::TooManyScenes {
                    requested: i64::MAX,
                    limit: DEFAULT_SCENE_LIMIT,
                })
            );
        }
    }

    #[test]
    fn scene_limit_is_inclusive() {
        let catalog = Catalog::builtin().unwrap();
        let mut batch =
            BatchOrchestrator::new(&catalog, RngSampler::seeded(1)).with_scene_limit(3);
        assert_eq!(batch.generate_all("3|Orange|dancing|garden").len(), 3);
        assert_eq!(
            batch.try_generate_all("4|Orange|dancing|garden"),
            Err(BatchError::TooManyScenes {
                requested: 4,
                limit: 3
            })
        );
    }

    #[test]
    fn zero_scenes_is_not_an_error() {
        let catalog = Catalog::builtin().unwrap();
        let mut batch = BatchOrchestrator::new(&catalog, RngSampler::seeded(1));
        assert_eq!(batch.try_generate_all("0|Orange|dancing|garden"), Ok(vec![]));
        assert_eq!(batch.try_generate_all("-3|Orange|dancing|garden"), Ok(vec![]));
    }
}
