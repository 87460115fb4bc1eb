//! Place command implementation.

use std::fs;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qtopo_search::{FITNESS_SENTINEL, GaConfig, Placement, optimize_topology_with_observer};

use super::common::{InputSource, load_config, load_coupling};

/// Arguments of the place command.
#[derive(Debug, Default)]
pub struct PlaceArgs {
    pub input: String,
    pub output: Option<String>,
    pub rows: Option<u32>,
    pub columns: Option<u32>,
    pub generations: Option<usize>,
    pub population: Option<usize>,
    pub seed: Option<u64>,
    pub config: Option<String>,
}

/// Execute the place command.
pub fn execute(args: &PlaceArgs) -> Result<()> {
    eprintln!(
        "{} Placing {}",
        style("→").cyan().bold(),
        style(&args.input).green()
    );

    let (coupling, source) = load_coupling(&args.input)?;
    match &source {
        InputSource::Circuit { name, operations } => eprintln!(
            "  Loaded circuit '{}': {} qubits, {} operations",
            name,
            coupling.num_qubits(),
            operations
        ),
        InputSource::Matrix => {
            eprintln!("  Loaded coupling matrix: {} qubits", coupling.num_qubits());
        }
    }
    eprintln!(
        "  Interactions: {} coupled pairs, total weight {}",
        coupling.coupled_pairs().count(),
        coupling.total_weight()
    );

    let config = resolve_config(args)?;
    eprintln!(
        "  Search: population {}, {} generations, crossover {}, mutation {}",
        config.population_size, config.generations, config.crossover_rate, config.mutation_rate
    );

    let progress = ProgressBar::new(config.generations as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .context("Invalid progress template")?
            .progress_chars("=> "),
    );

    let placement =
        optimize_topology_with_observer(&coupling, args.rows, args.columns, &config, |record| {
            progress.set_message(format!("best {}", format_fitness(record.best_fitness)));
            progress.inc(1);
        });
    progress.finish_and_clear();
    let placement = placement?;

    print_summary(&placement);

    let json = serde_json::to_string_pretty(&placement.layout)?;
    match &args.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write file: {path}"))?;
            eprintln!("  Output: {}", style(path).green());
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Start from the config file (or defaults) and apply flag overrides.
fn resolve_config(args: &PlaceArgs) -> Result<GaConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GaConfig::default(),
    };
    if let Some(generations) = args.generations {
        config = config.with_generations(generations);
    }
    if let Some(size) = args.population {
        config = config.with_population_size(size);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    config.validate()?;
    Ok(config)
}

fn print_summary(placement: &Placement) {
    let layout = &placement.layout;
    eprintln!(
        "{} Placement complete on {}x{} grid",
        style("✓").green().bold(),
        layout.row_count,
        layout.col_num
    );
    eprintln!(
        "  Fitness: {}  Couplers: {} ({} direct, {} routed)",
        style(format_fitness(placement.fitness)).yellow(),
        placement.repair.augmented.count(),
        placement.repair.direct.count(),
        placement.repair.augmented.count() - placement.repair.direct.count()
    );

    for y in 0..layout.row_count {
        let row: Vec<String> = (0..layout.col_num)
            .map(|x| {
                layout
                    .positions
                    .iter()
                    .find(|(_, c)| c.x == x && c.y == y)
                    .map_or_else(|| ".".to_string(), |(name, _)| name.clone())
            })
            .map(|cell| format!("{cell:>4}"))
            .collect();
        eprintln!("  {}", style(row.concat()).dim());
    }
}

fn format_fitness(fitness: f64) -> String {
    if fitness >= FITNESS_SENTINEL {
        "disconnected".to_string()
    } else {
        format!("{fitness}")
    }
}
