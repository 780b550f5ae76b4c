//! # Groceries CLI
//!
//! Drives the parsing and aggregation engine from files or stdin and prints
//! JSON on stdout.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `groceries parse [LINE]...` | Split ingredient lines (stdin when none given) |
//! | `groceries quantity <TEXT>` | Parse one quantity string |
//! | `groceries combine <FILE>` | Aggregate a JSON array of occurrences (`-` for stdin) |
//! | `groceries schedule <FILE> --start <DATE> --end <DATE>` | Shopping list for a date range |
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`. Settings are read
//! from the environment (and a `.env` file): `GROCERIES_CATEGORIZE`,
//! `GROCERIES_MAX_NAME_LENGTH`.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::{debug, info};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use groceries::categorization::validate_departments;
use groceries::config::{self, GroceriesConfig};
use groceries::ingredient_parser::IngredientParser;
use groceries::quantity_parser::parse_quantity;
use groceries::schedule::{shopping_list_for_range, ScheduledRecipe};
use groceries::shopping_list::{IngredientOccurrence, ShoppingListBuilder};

/// Ingredient parsing and shopping-list aggregation.
#[derive(Parser)]
#[command(name = "groceries", version, about)]
struct Cli {
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split ingredient lines into quantity, name, description and optional flag.
    Parse {
        /// Ingredient lines; read from stdin, one per line, when omitted
        lines: Vec<String>,
    },

    /// Parse a single quantity string such as "1 1/2 cups".
    Quantity {
        text: String,
    },

    /// Combine a JSON array of `{quantity, name, recipe_id}` occurrences.
    Combine {
        /// Input file, or `-` for stdin
        file: PathBuf,
    },

    /// Build the shopping list for recipes scheduled in a date range.
    Schedule {
        /// JSON array of `{recipe_id, on, count, ingredients}` entries, or `-` for stdin
        file: PathBuf,

        /// First day of the range (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Last day of the range, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = config::from_env().context("Failed to load configuration")?;
    validate_departments().context("Department keyword table is inconsistent")?;

    info!("Starting groceries");
    run(cli, config)
}

fn run(cli: Cli, config: GroceriesConfig) -> Result<()> {
    match cli.command {
        Commands::Parse { lines } => {
            let parser = IngredientParser::with_config(config.parser);
            let input = if lines.is_empty() {
                read_input(Path::new("-"))?
            } else {
                lines.join("\n")
            };
            print_json(&parser.parse_list(&input), cli.pretty)
        }
        Commands::Quantity { text } => print_json(&parse_quantity(&text), cli.pretty),
        Commands::Combine { file } => {
            let input = read_input(&file)?;
            let occurrences: Vec<IngredientOccurrence> = serde_json::from_str(&input)
                .with_context(|| format!("Failed to parse occurrences from {}", file.display()))?;
            debug!("Read {} occurrences", occurrences.len());

            let mut builder = ShoppingListBuilder::with_config(config.shopping_list);
            builder.extend(&occurrences);
            print_json(&builder.finish(), cli.pretty)
        }
        Commands::Schedule { file, start, end } => {
            let input = read_input(&file)?;
            let schedule: Vec<ScheduledRecipe> = serde_json::from_str(&input)
                .with_context(|| format!("Failed to parse schedule from {}", file.display()))?;

            let builder = ShoppingListBuilder::with_config(config.shopping_list);
            let list = shopping_list_for_range(builder, &schedule, start, end)
                .context("Failed to build shopping list")?;
            print_json(&list, cli.pretty)
        }
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read stdin")?;
        return Ok(input);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
