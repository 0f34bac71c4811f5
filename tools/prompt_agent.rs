/// Prompt agent — interactive shell that turns scene specs into prompt lists.
///
/// Usage: prompt_agent [--config <path>] [--catalog <path>] [--target <path>]
///                     [--list-name <name>] [--seed <n>] [--spec <spec> [--write]] [--list]
///
/// Each line typed at the prompt is a `count|characters|actions|locations`
/// spec. `quit`, `exit`, or `q` leaves the shell.
use anyhow::Context;
use clap::Parser;
use scene_forge::core::artifact::ArtifactWriter;
use scene_forge::core::batch::BatchOrchestrator;
use scene_forge::core::catalog::Catalog;
use scene_forge::core::config::AgentConfig;
use scene_forge::core::sampler::RngSampler;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "prompt_agent")]
#[command(about = "Generate scene prompts from count|characters|actions|locations specs")]
struct Args {
    /// RON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RON catalog file (overrides config; built-in catalog if neither is set)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Script whose prompt list is patched
    #[arg(short, long)]
    target: Option<PathBuf>,

    /// Name of the list literal to patch
    #[arg(long)]
    list_name: Option<String>,

    /// Sampling seed (unseeded if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Characters of each prompt shown in the preview
    #[arg(long)]
    preview_width: Option<usize>,

    /// Largest scene count accepted from one spec
    #[arg(long)]
    max_scenes: Option<usize>,

    /// Generate from a single spec and exit
    #[arg(long)]
    spec: Option<String>,

    /// With --spec, patch the target without asking
    #[arg(long, requires = "spec")]
    write: bool,

    /// Print the catalog and exit
    #[arg(long)]
    list: bool,
}

const EXIT_COMMANDS: &[&str] = &["quit", "exit", "q"];

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scene_forge=info,prompt_agent=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = resolve_config(&args)?;
    let catalog = config.load_catalog().context("failed to load catalog")?;
    let writer = ArtifactWriter::new(&config.list_name)?;

    info!(
        characters = catalog.character_names().len(),
        actions = catalog.action_names().len(),
        locations = catalog.location_names().len(),
        target = %config.target.display(),
        "catalog loaded"
    );

    if args.list {
        print_catalog(&catalog);
        return Ok(());
    }

    let sampler = match config.seed {
        Some(seed) => RngSampler::seeded(seed),
        None => RngSampler::from_entropy(),
    };
    let mut batch = BatchOrchestrator::new(&catalog, sampler).with_scene_limit(config.max_scenes);

    if let Some(ref spec) = args.spec {
        let prompts = batch.generate_all(spec);
        for (i, prompt) in prompts.iter().enumerate() {
            println!("{}. {}", i + 1, prompt);
        }
        if args.write && !prompts.is_empty() {
            writer
                .write_file(&config.target, &prompts)
                .with_context(|| format!("failed to update {}", config.target.display()))?;
        }
        return Ok(());
    }

    run_shell(&mut batch, &writer, &config);
    Ok(())
}

fn resolve_config(args: &Args) -> anyhow::Result<AgentConfig> {
    let mut config = match args.config {
        Some(ref path) => AgentConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AgentConfig::default(),
    };

    if let Some(ref catalog) = args.catalog {
        config.catalog = Some(catalog.clone());
    }
    if let Some(ref target) = args.target {
        config.target = target.clone();
    }
    if let Some(ref list_name) = args.list_name {
        config.list_name = list_name.clone();
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(width) = args.preview_width {
        config.preview_width = width;
    }
    if let Some(max_scenes) = args.max_scenes {
        config.max_scenes = max_scenes;
    }
    Ok(config)
}

fn run_shell(
    batch: &mut BatchOrchestrator<'_, RngSampler<rand::rngs::StdRng>>,
    writer: &ArtifactWriter,
    config: &AgentConfig,
) {
    print_banner();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        let Some(line) = prompt_line(&stdin, &mut stdout, "Enter prompt specs: ") else {
            break;
        };

        if EXIT_COMMANDS.contains(&line.to_lowercase().as_str()) {
            break;
        }
        if line.is_empty() {
            continue;
        }

        let prompts = batch.generate_all(&line);
        if prompts.is_empty() {
            println!("No valid prompts generated");
            continue;
        }

        println!("\nGenerated {} prompts:", prompts.len());
        for (i, prompt) in prompts.iter().enumerate() {
            println!("{}. {}", i + 1, preview(prompt, config.preview_width));
        }

        let question = format!(
            "\nUpdate {} in {}? (y/n): ",
            writer.list_name(),
            config.target.display()
        );
        let Some(answer) = prompt_line(&stdin, &mut stdout, &question) else {
            break;
        };
        if answer.to_lowercase() == "y" {
            match writer.write_file(&config.target, &prompts) {
                Ok(count) => println!("Updated {} with {} prompts", config.target.display(), count),
                Err(e) => {
                    warn!(error = %e, "could not update target");
                    println!("ERROR: {}", e);
                }
            }
        }
    }
}

/// Print `label`, read one trimmed line. `None` on end of input.
fn prompt_line(stdin: &io::Stdin, stdout: &mut io::Stdout, label: &str) -> Option<String> {
    print!("{}", label);
    stdout.flush().ok();

    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

fn preview(prompt: &str, width: usize) -> String {
    let head: String = prompt.chars().take(width).collect();
    format!("{}...", head)
}

fn print_banner() {
    println!("Prompt Generation Agent");
    println!("Format: count|characters|actions|locations");
    println!("\nExamples:");
    println!("  5|Orange,Pigeon,Orca|swimming|beach");
    println!("  3|Orange+Pigeon|playing,eating|park");
    println!("  2|[2]Orange,Pigeon,Orca,Hamster|RANDOM|bedroom,kitchen");
    println!("  4|[1-3]ALL|RANDOM|RANDOM");
    println!("  1|ALL|dancing|garden");
    println!("\nEnter 'quit' to exit\n");
}

fn print_catalog(catalog: &Catalog) {
    println!("Characters:");
    for theme in catalog.characters() {
        println!(
            "  {:<22} {} ({}); colours: {}; props: {}",
            theme.name,
            theme.style,
            theme.temperament,
            theme.palette.join(", "),
            theme.accessories.join(", ")
        );
    }

    println!("\nActions:");
    for name in catalog.action_names() {
        if let Ok(entry) = catalog.action(&name) {
            println!("  {:<12} {}", entry.name, entry.display);
        }
    }

    println!("\nLocations:");
    for name in catalog.location_names() {
        if let Ok(entry) = catalog.location(&name) {
            println!("  {:<12} {}", entry.name, entry.display);
        }
    }
}
