mod search;
mod store;

pub const USER_AGENT: &str = concat!("nosh/", env!("CARGO_PKG_VERSION"));

use std::time::Duration;

use clap::Parser;
use reqwest::Client;

use search::{ResultItem, engine};
use store::postgrest::PostgrestStore;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Search a bilingual (Hebrew/English) food database and print per-100g
/// nutrition facts.
///
/// Configuration via environment variables: `SUPABASE_URL` and
/// `SUPABASE_ANON_KEY` (required), `NOSH_TABLE` (optional table override).
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Search text, Hebrew or English
    query: String,

    /// Maximum number of results
    #[arg(short, long, default_value_t = 20)]
    limit: usize,

    /// Print results as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nosh=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let http = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(HTTP_TIMEOUT)
        .build()?;
    let store = PostgrestStore::from_env(http)?;

    let items = engine::search(&store, &cli.query, cli.limit).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if items.is_empty() {
        println!("no results for \"{}\"", cli.query.trim());
    } else {
        print_table(&items);
    }

    Ok(())
}

fn print_table(items: &[ResultItem]) {
    let width = items
        .iter()
        .map(|i| i.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("name".len());

    println!(
        "{:<width$}  {:>7}  {:>7}  {:>6}  {:>6}",
        "name", "kcal", "protein", "fat", "carbs"
    );
    for item in items {
        println!(
            "{:<width$}  {:>7.1}  {:>7.1}  {:>6.1}  {:>6.1}",
            item.name, item.calories, item.protein, item.fat, item.carbs
        );
    }
}
