//! qtopo Command-Line Interface
//!
//! Places a circuit's qubit-interaction graph on a rectangular grid.
//!
//! ```text
//!   circuit.json ──┐
//!                  ├─► coupling matrix ─► GA + tabu search ─► repair ─► layout.json
//!   matrix.json ───┘
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{place, version};

/// qtopo - grid topology placement for quantum circuits
#[derive(Parser)]
#[command(name = "qtopo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Place a circuit or coupling matrix on a grid
    Place {
        /// Input file (circuit JSON or {"coupling_matrix": [[..]]})
        #[arg(short, long)]
        input: String,

        /// Output file for the layout JSON (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Grid rows
        #[arg(long)]
        rows: Option<u32>,

        /// Grid columns
        #[arg(long)]
        columns: Option<u32>,

        /// Number of generations, including the initial population
        #[arg(short, long)]
        generations: Option<usize>,

        /// Population size
        #[arg(short, long)]
        population: Option<usize>,

        /// Random seed for reproducible runs
        #[arg(short, long, env = "QTOPO_SEED")]
        seed: Option<u64>,

        /// Search configuration file (YAML or JSON)
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Place {
            input,
            output,
            rows,
            columns,
            generations,
            population,
            seed,
            config,
        } => place::execute(&place::PlaceArgs {
            input,
            output,
            rows,
            columns,
            generations,
            population,
            seed,
            config,
        }),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_place_minimal() {
        let cli = Cli::try_parse_from(["qtopo", "place", "-i", "circuit.json"]).unwrap();
        match cli.command {
            Commands::Place {
                input,
                output,
                rows,
                columns,
                config,
                ..
            } => {
                assert_eq!(input, "circuit.json");
                assert!(output.is_none());
                assert!(rows.is_none());
                assert!(columns.is_none());
                assert!(config.is_none());
            }
            Commands::Version => panic!("expected place"),
        }
    }

    #[test]
    fn test_parse_place_full() {
        let cli = Cli::try_parse_from([
            "qtopo",
            "place",
            "--input",
            "m.json",
            "--output",
            "layout.json",
            "--rows",
            "3",
            "--columns",
            "4",
            "--generations",
            "50",
            "--population",
            "20",
            "--seed",
            "9",
            "--config",
            "ga.yaml",
        ])
        .unwrap();
        match cli.command {
            Commands::Place {
                output,
                rows,
                columns,
                generations,
                population,
                seed,
                config,
                ..
            } => {
                assert_eq!(output.as_deref(), Some("layout.json"));
                assert_eq!((rows, columns), (Some(3), Some(4)));
                assert_eq!((generations, population), (Some(50), Some(20)));
                assert_eq!(seed, Some(9));
                assert_eq!(config.as_deref(), Some("ga.yaml"));
            }
            Commands::Version => panic!("expected place"),
        }
    }

    #[test]
    fn test_parse_place_requires_input() {
        assert!(Cli::try_parse_from(["qtopo", "place"]).is_err());
    }

    #[test]
    fn test_parse_verbosity() {
        let cli = Cli::try_parse_from(["qtopo", "-vv", "version"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_parse_no_subcommand() {
        assert!(Cli::try_parse_from(["qtopo"]).is_err());
    }
}
