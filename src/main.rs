use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use xc_score::config::Config;
use xc_score::sheet::Meet;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 4;
const EXIT_NOT_FOUND: i32 = 5;

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the races in a meet sheet
    List {
        /// Path to the meet sheet (YAML)
        sheet: PathBuf,
    },
    /// Score a race and print its results and team scores
    Show {
        /// Path to the meet sheet (YAML)
        sheet: PathBuf,
        /// Index number of the race (1-based, as shown in list)
        index: usize,
        /// Print tab-separated results instead of the formatted sheet
        #[arg(long)]
        tsv: bool,
    },
    /// Score a race and write it to a JSON file
    Export {
        /// Path to the meet sheet (YAML)
        sheet: PathBuf,
        /// Index number of the race (1-based, as shown in list)
        index: usize,
        /// Output file
        out: PathBuf,
    },
    /// Show a runner's schools and results across the meet sheet
    Runner {
        /// Path to the meet sheet (YAML)
        sheet: PathBuf,
        /// Runner key, as written in the sheet
        key: String,
    },
    /// List a school's men's and women's teams for a season
    Team {
        /// Path to the meet sheet (YAML)
        sheet: PathBuf,
        /// School key, as written in the sheet
        school: String,
        /// Season (defaults to the school's most recent one)
        #[arg(long)]
        year: Option<i32>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "xc-score")]
#[command(about = "Cross-country race scoring", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/xc-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// RUST_LOG wins unless --verbose asks for debug output.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_meet(path: &Path) -> Meet {
    match xc_score::sheet::load_sheet(path) {
        Ok(meet) => meet,
        Err(e) => {
            eprintln!("Sheet error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    }
}

/// Score the race at 1-based `index`, exiting on a bad index or a scoring error.
fn score_race(meet: &mut Meet, index: usize, config: &Config) -> usize {
    if index < 1 || index > meet.races.len() {
        eprintln!(
            "Invalid index {}. Must be between 1 and {}.",
            index,
            meet.races.len()
        );
        std::process::exit(EXIT_NOT_FOUND);
    }

    let rules = config.scoring.unwrap_or_default();
    if let Err(e) = meet.score(index - 1, &rules) {
        eprintln!("Scoring error: {}", e);
        std::process::exit(EXIT_CONFIG);
    }
    index - 1
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match xc_score::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let effective_scoring = config.scoring.unwrap_or_default();
    if let Err(errors) = xc_score::scoring::validate_rules(&effective_scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let use_colors = config
        .output
        .color
        .enabled(xc_score::output::should_use_colors());

    match cli.command {
        Commands::List { sheet } => {
            let meet = load_meet(&sheet);
            println!(
                "{}",
                xc_score::output::format_race_list(&meet.races, use_colors)
            );
        }
        Commands::Show { sheet, index, tsv } => {
            let mut meet = load_meet(&sheet);
            let i = score_race(&mut meet, index, &config);
            let race = &meet.races[i];
            if tsv {
                println!("{}", xc_score::output::format_tsv(race, &meet.roster));
            } else {
                println!(
                    "{}",
                    xc_score::output::format_race(
                        race,
                        &meet.roster,
                        config.output.header,
                        use_colors
                    )
                );
            }
        }
        Commands::Export { sheet, index, out } => {
            let mut meet = load_meet(&sheet);
            let i = score_race(&mut meet, index, &config);
            let report = xc_score::output::RaceReport::new(&meet.races[i], &meet.roster);
            if let Err(e) = xc_score::output::write_report(&out, &report) {
                eprintln!("Export error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
            println!("Wrote {} to {}", meet.races[i], out.display());
        }
        Commands::Runner { sheet, key } => {
            let mut meet = load_meet(&sheet);
            if let Err(e) = meet.score_all(&effective_scoring) {
                eprintln!("Scoring error: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
            let output = meet
                .runner_by_key(&key)
                .and_then(|id| xc_score::output::format_runner(&meet, id, use_colors));
            match output {
                Some(text) => println!("{}", text),
                None => {
                    eprintln!("No runner with key '{}' in {}", key, sheet.display());
                    std::process::exit(EXIT_NOT_FOUND);
                }
            }
        }
        Commands::Team { sheet, school, year } => {
            let meet = load_meet(&sheet);
            let Some(id) = meet.school_by_key(&school) else {
                eprintln!("No school with key '{}' in {}", school, sheet.display());
                std::process::exit(EXIT_NOT_FOUND);
            };
            let season = year.or_else(|| meet.roster.school(id).and_then(|s| s.latest_season()));
            let Some(season) = season else {
                println!("No runners have run for '{}'.", school);
                std::process::exit(EXIT_SUCCESS);
            };
            if let Some(text) = xc_score::output::format_team(&meet, id, season, use_colors) {
                println!("{}", text);
            }
        }
    }

    debug!(elapsed = ?start_time.elapsed(), "done");
    std::process::exit(EXIT_SUCCESS);
}
