//! Version command implementation.

use console::style;

use qtopo_search::{FITNESS_SENTINEL, GaConfig};

/// Execute the version command.
pub fn execute() {
    println!(
        "{} {}",
        style("qtopo").cyan().bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).yellow()
    );
    for line in search_defaults(&GaConfig::default()) {
        println!("  {line}");
    }
}

/// The default search parameters, one `key value` line each.
fn search_defaults(config: &GaConfig) -> Vec<String> {
    vec![
        format!("population   {}", config.population_size),
        format!("generations  {}", config.generations),
        format!("crossover    {}", config.crossover_rate),
        format!("mutation     {}", config.mutation_rate),
        format!("tournament   {}", config.tournament_size),
        format!("retries      {}", config.max_attempts),
        format!("infeasible   {FITNESS_SENTINEL}"),
    ]
}
