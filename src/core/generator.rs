/// Combination generator — expands a character request into per-scene groupings.
use tracing::{debug, trace};

use crate::core::sampler::Sampler;
use crate::schema::request::{CharacterDistributionRequest, DistributionMode};
use crate::schema::scene::CharacterGrouping;

/// Builds one [`CharacterGrouping`] per scene.
///
/// - `Together`: the full name list, every scene.
/// - `Separate` without sizing: one name per scene, cycling in list order.
/// - `Separate` with sizing: groupings are drawn without replacement from a
///   pool of the names. When the pool holds fewer names than the drawn size
///   it is refilled, so repeats are only avoided within one pool epoch.
#[derive(Debug, Clone)]
pub struct CombinationGenerator<S> {
    sampler: S,
}

impl<S: Sampler> CombinationGenerator<S> {
    pub fn new(sampler: S) -> Self {
        Self { sampler }
    }

    /// Returns exactly `max(0, scene_count)` groupings. The count is not
    /// bounded here; [`crate::core::batch::BatchOrchestrator`] caps it.
    pub fn generate(
        &mut self,
        request: &CharacterDistributionRequest,
        scene_count: i64,
    ) -> Vec<CharacterGrouping> {
        let scenes = usize::try_from(scene_count).unwrap_or(0);
        if scenes == 0 {
            return Vec::new();
        }

        let groupings = match (request.mode, request.sizing.bounds()) {
            (DistributionMode::Together, _) => {
                vec![CharacterGrouping::new(request.names.clone()); scenes]
            }
            (DistributionMode::Separate, None) => cycle(&request.names, scenes),
            (DistributionMode::Separate, Some((min, max))) => {
                self.draw(&request.names, scenes, min, max)
            }
        };

        debug!(
            scenes,
            mode = ?request.mode,
            names = request.names.len(),
            "generated character groupings"
        );
        groupings
    }

    fn draw(
        &mut self,
        names: &[String],
        scenes: usize,
        min: usize,
        max: usize,
    ) -> Vec<CharacterGrouping> {
        let mut pool: Vec<String> = names.to_vec();
        let mut groupings = Vec::with_capacity(scenes);

        for scene in 0..scenes {
            let size = if min == max {
                min
            } else {
                self.sampler.roll(min, max)
            };

            if pool.len() < size {
                trace!(scene, remaining = pool.len(), size, "refilling draw pool");
                pool = names.to_vec();
            }

            let mut picked = self.sampler.sample(pool.len(), size.min(pool.len()));
            let selected: Vec<String> = picked.iter().map(|&i| pool[i].clone()).collect();

            // Highest index first so earlier removals don't shift later ones.
            picked.sort_unstable_by(|a, b| b.cmp(a));
            picked.dedup();
            for i in picked {
                pool.remove(i);
            }

            groupings.push(CharacterGrouping::new(selected));
        }

        let repeats = groupings
            .windows(2)
            .filter(|pair| pair[0].same_set(&pair[1]))
            .count();
        debug!(scenes, repeats, "drew sized groupings");
        groupings
    }
}

fn cycle(names: &[String], scenes: usize) -> Vec<CharacterGrouping> {
    if names.is_empty() {
        return vec![CharacterGrouping::default(); scenes];
    }
    (0..scenes)
        .map(|i| CharacterGrouping::new(vec![names[i % names.len()].clone()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sampler::RngSampler;
    use crate::schema::request::Sizing;
    use rustc_hash::FxHashSet;
    use std::collections::VecDeque;

    /// Always takes the first `k` indices and the minimum size.
    struct FirstSampler;

    impl Sampler for FirstSampler {
        fn sample(&mut self, _n: usize, k: usize) -> Vec<usize> {
            (0..k).collect()
        }

        fn roll(&mut self, min: usize, _max: usize) -> usize {
            min
        }
    }

    /// Replays scripted sizes; sampling takes the last `k` indices.
    struct ScriptedSampler {
        sizes: VecDeque<usize>,
    }

    impl Sampler for ScriptedSampler {
        fn sample(&mut self, n: usize, k: usize) -> Vec<usize> {
            (n - k..n).rev().collect()
        }

        fn roll(&mut self, min: usize, _max: usize) -> usize {
            self.sizes.pop_front().unwrap_or(min)
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn as_strs(groupings: &[CharacterGrouping]) -> Vec<Vec<&str>> {
        groupings
            .iter()
            .map(|g| g.names().iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn together_repeats_full_list() {
        let req = CharacterDistributionRequest::together(names(&["Orange", "Pigeon"]));
        let out = CombinationGenerator::new(FirstSampler).generate(&req, 3);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|g| g.names() == ["Orange", "Pigeon"]));
    }

    #[test]
    fn together_ignores_sizing() {
        let mut req = CharacterDistributionRequest::together(names(&["A", "B", "C"]));
        req.sizing = Sizing::Fixed(1);
        let out = CombinationGenerator::new(FirstSampler).generate(&req, 2);
        assert!(out.iter().all(|g| g.len() == 3));
    }

    #[test]
    fn cycling_wraps_around() {
        let req = CharacterDistributionRequest::cycled(names(&["Orange", "Pigeon", "Orca"]));
        let out = CombinationGenerator::new(FirstSampler).generate(&req, 5);
        assert_eq!(
            as_strs(&out),
            vec![
                vec!["Orange"],
                vec!["Pigeon"],
                vec!["Orca"],
                vec!["Orange"],
                vec!["Pigeon"]
            ]
        );
    }

    #[test]
    fn non_positive_count_is_empty() {
        let req = CharacterDistributionRequest::cycled(names(&["Orange"]));
        let mut generator = CombinationGenerator::new(FirstSampler);
        assert!(generator.generate(&req, 0).is_empty());
        assert!(generator.generate(&req, -5).is_empty());
    }

    #[test]
    fn empty_names_yield_empty_groupings() {
        let mut generator = CombinationGenerator::new(FirstSampler);
        let cycled = generator.generate(&CharacterDistributionRequest::cycled(vec![]), 2);
        assert_eq!(cycled.len(), 2);
        assert!(cycled.iter().all(CharacterGrouping::is_empty));

        let sized = generator.generate(
            &CharacterDistributionRequest::sized(vec![], Sizing::Fixed(2)),
            3,
        );
        assert_eq!(sized.len(), 3);
        assert!(sized.iter().all(CharacterGrouping::is_empty));
    }

    #[test]
    fn fixed_draw_exhausts_pool_before_reset() {
        let req = CharacterDistributionRequest::sized(
            names(&["Stick", "Fish", "Hamster"]),
            Sizing::Fixed(1),
        );
        let out = CombinationGenerator::new(FirstSampler).generate(&req, 4);
        assert_eq!(
            as_strs(&out),
            vec![vec!["Stick"], vec!["Fish"], vec!["Hamster"], vec!["Stick"]]
        );
    }

    #[test]
    fn pool_resets_when_short() {
        // Pool of 5 with size 2: the third draw finds one name left and refills.
        let req = CharacterDistributionRequest::sized(
            names(&["A", "B", "C", "D", "E"]),
            Sizing::Fixed(2),
        );
        let out = CombinationGenerator::new(FirstSampler).generate(&req, 3);
        assert_eq!(
            as_strs(&out),
            vec![vec!["A", "B"], vec!["C", "D"], vec!["A", "B"]]
        );
    }

    #[test]
    fn range_rerolls_each_scene() {
        let req = CharacterDistributionRequest::sized(
            names(&["A", "B", "C", "D", "E", "F"]),
            Sizing::Range { min: 1, max: 3 },
        );
        let sampler = ScriptedSampler {
            sizes: VecDeque::from([3, 1, 2]),
        };
        let out = CombinationGenerator::new(sampler).generate(&req, 3);
        assert_eq!(
            as_strs(&out),
            vec![vec!["F", "E", "D"], vec!["C"], vec!["B", "A"]]
        );
    }

    #[test]
    fn fixed_size_larger_than_names_is_clamped() {
        let req = CharacterDistributionRequest::sized(names(&["A", "B"]), Sizing::Fixed(5));
        let out = CombinationGenerator::new(RngSampler::seeded(9)).generate(&req, 4);
        assert!(out.iter().all(|g| g.len() == 2));
    }

    #[test]
    fn no_repeats_within_pool_epoch() {
        let all: Vec<String> = (0..12).map(|i| format!("C{}", i)).collect();
        let req = CharacterDistributionRequest::sized(all, Sizing::Fixed(3));
        let mut generator = CombinationGenerator::new(RngSampler::seeded(11));

        for _ in 0..20 {
            // Four draws of three exhaust the twelve-name pool exactly.
            let out = generator.generate(&req, 4);
            let mut seen = FxHashSet::default();
            for grouping in &out {
                assert_eq!(grouping.len(), 3);
                for name in grouping.names() {
                    assert!(seen.insert(name.clone()), "{} repeated in epoch", name);
                }
            }
        }
    }

    #[test]
    fn random_range_sizes_stay_in_bounds() {
        let all: Vec<String> = (0..18).map(|i| format!("C{}", i)).collect();
        let req = CharacterDistributionRequest::sized(all, Sizing::Range { min: 2, max: 4 });
        let out = CombinationGenerator::new(RngSampler::seeded(5)).generate(&req, 30);
        assert_eq!(out.len(), 30);
        assert!(out.iter().all(|g| (2..=4).contains(&g.len())));
    }
}
