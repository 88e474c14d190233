use anyhow::{Context, Result};
use clap::Parser;
use futbol_hoy::config::AppConfig;
use futbol_hoy::data::{load_matches_from_json, save_matches_to_csv, save_matches_to_json};
use futbol_hoy::grouping::group_matches;
use futbol_hoy::build_service;

/// List today's and tomorrow's matches for the followed leagues
#[derive(Debug, Parser)]
#[command(name = "cli", version)]
struct Args {
    /// Read a list saved with --json instead of calling the API
    #[arg(long, value_name = "PATH")]
    from_json: Option<String>,

    /// Also write the match list to this JSON file
    #[arg(long, value_name = "PATH")]
    json: Option<String>,

    /// Also write the match list to this CSV file
    #[arg(long, value_name = "PATH")]
    csv: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let matches = match &args.from_json {
        Some(path) => {
            println!("Leyendo partidos de {}...\n", path);
            load_matches_from_json(path)?
        }
        None => {
            let config = AppConfig::from_env().context("Failed to load configuration")?;
            let service = build_service(&config);

            println!("Buscando partidos...\n");
            service.get_today_matches().await
        }
    };

    if matches.is_empty() {
        println!("No hay partidos de las ligas seguidas para hoy ni mañana.");
    }

    for day in group_matches(&matches) {
        println!("{} ({} partidos)", day.label.to_uppercase(), day.match_count());
        for league in &day.leagues {
            println!("\n  {}", league.league);
            for m in &league.matches {
                let score = m.score().map(|s| format!("  [{}]", s)).unwrap_or_default();
                println!("    {:<14} {}{}", m.time, m.title(), score);
            }
        }
        println!();
    }

    if let Some(path) = &args.json {
        save_matches_to_json(&matches, path)?;
        println!("{} partidos guardados en {}", matches.len(), path);
    }

    if let Some(path) = &args.csv {
        save_matches_to_csv(&matches, path)?;
        println!("{} partidos guardados en {}", matches.len(), path);
    }

    Ok(())
}
