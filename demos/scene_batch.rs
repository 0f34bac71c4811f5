//! Scene batch — generates prompts for a handful of specs with a fixed seed.
//!
//! Run with: `cargo run --example scene_batch`

use scene_forge::core::batch::BatchOrchestrator;
use scene_forge::core::catalog::Catalog;
use scene_forge::core::sampler::RngSampler;

const SPECS: &[&str] = &[
    "5|Orange,Pigeon,Orca|swimming|beach",
    "3|Orange+Pigeon|playing,eating|park",
    "2|[2]Orange,Pigeon,Orca,Hamster|RANDOM|bedroom,kitchen",
    "6|[1-3]ALL|RANDOM|RANDOM",
    "2|Dragon,Orange|flying|moon",
    "abc|Orange|dancing|garden",
];

fn main() {
    let catalog = match Catalog::builtin() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };
    let mut batch = BatchOrchestrator::new(&catalog, RngSampler::seeded(42));

    for spec in SPECS {
        println!("=== {}", spec);
        match batch.try_generate_all(spec) {
            Ok(prompts) => {
                for (i, prompt) in prompts.iter().enumerate() {
                    println!("  {}. {}", i + 1, prompt);
                }
            }
            Err(e) => println!("  ERROR: {}", e),
        }
        println!();
    }
}
