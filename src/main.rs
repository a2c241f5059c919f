use std::process::ExitCode;

use clap::Parser;
use log::{debug, error};

use recipe_finder::render::render_outcome;
use recipe_finder::{Cuisine, EnrichMode, FinderConfig, FinderError, RecipeFinder, SearchOutcome};

#[derive(Parser)]
#[command(
    name = "recipe-finder",
    version,
    about = "Find recipes based on ingredients you have"
)]
struct Cli {
    /// Ingredients, separated with commas
    #[arg(default_value = "chicken, tomato")]
    ingredients: String,

    /// Cuisine filter (All, American, Italian, Asian, Mexican, ...)
    #[arg(short, long, default_value = "All")]
    cuisine: Cuisine,

    /// How to fetch recipe details: skip, sequential or concurrent
    #[arg(short, long)]
    mode: Option<EnrichMode>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// List the supported cuisines and exit
    #[arg(long)]
    list_cuisines: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env first so RUST_LOG set there is honoured
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    if cli.list_cuisines {
        for cuisine in Cuisine::ALL {
            println!("{}", cuisine);
        }
        return ExitCode::SUCCESS;
    }

    match run(&cli).await {
        Ok(outcome) => {
            print_outcome(&outcome, cli.json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            if e.is_usage_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

async fn run(cli: &Cli) -> Result<SearchOutcome, FinderError> {
    let config = FinderConfig::load()?;
    config.require_api_key()?;

    let mut builder = RecipeFinder::builder().config(&config);
    if let Some(mode) = cli.mode {
        builder = builder.enrich_mode(mode);
    }
    let finder = builder.build()?;
    debug!("Enrichment mode: {}", finder.enrich_mode());

    finder.find(&cli.ingredients, cli.cuisine).await
}

fn print_outcome(outcome: &SearchOutcome, json: bool) {
    if json {
        match serde_json::to_string_pretty(outcome) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("Failed to serialize results: {}", e),
        }
        return;
    }

    print!("{}", render_outcome(outcome));
}
