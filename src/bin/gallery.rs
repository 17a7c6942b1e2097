use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;
use log::{debug, error};
use std::io::{self, Write};
use std::process;

use pattern_gallery::catalog::{self, Category};
use pattern_gallery::patterns::behavioral::sample;
use pattern_gallery::sorting::count_comparisons;
use pattern_gallery::{GalleryConfig, GalleryError, PageContext, Result, SortAlgorithm};

#[derive(Parser)]
#[command(author, version, about = "Runnable design-pattern pages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Disable coloured output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available pages
    List {
        /// Only show one family: creational, structural or behavioral
        #[arg(long)]
        category: Option<String>,
    },
    /// Run one or more pages by name
    Run {
        #[arg(required = true)]
        pages: Vec<String>,
    },
    /// Run every page in catalog order
    All,
    /// Sort integers with a quicksort strategy
    Sort {
        /// hoare or lomuto; defaults to the configured algorithm
        #[arg(short, long)]
        algorithm: Option<String>,
        /// Values to sort; a random sample is used when empty
        #[arg(allow_negative_numbers = true)]
        values: Vec<i64>,
    },
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        error!("{}", e);
        eprintln!("{} {}", "error:".red().bold(), e);
        if let Some(hint) = e.suggestion() {
            eprintln!("  did you mean '{}'?", hint.yellow());
        }
        process::exit(1);
    }
}

fn setup_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();
}

fn load_configuration(cli: &Cli) -> Result<GalleryConfig> {
    match &cli.config {
        Some(path) => GalleryConfig::load(path),
        None => {
            debug!("no config file given, using defaults");
            Ok(GalleryConfig::default())
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_configuration(&cli)?;
    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::List { category } => {
            let filter = category.as_deref().map(str::parse::<Category>).transpose()?;
            list_pages(&mut out, filter)
        }
        Commands::Run { pages } => {
            // Resolve every name first so a typo fails before anything runs
            let resolved = pages
                .iter()
                .map(|name| catalog::find(name))
                .collect::<Result<Vec<_>>>()?;
            let mut ctx = PageContext::new(&mut out, &config);
            for page in resolved {
                writeln!(ctx.out, "{}", header(page.name, page.category))?;
                catalog::run_page(page, &mut ctx)?;
                writeln!(ctx.out)?;
            }
            Ok(())
        }
        Commands::All => {
            let mut ctx = PageContext::new(&mut out, &config);
            let count = catalog::run_all(&mut ctx)?;
            writeln!(ctx.out, "{}", format!("{} pages run", count).green())?;
            Ok(())
        }
        Commands::Sort { algorithm, values } => {
            let algorithm = match algorithm {
                Some(name) => name.parse::<SortAlgorithm>()?,
                None => config.sort.algorithm,
            };
            sort_values(&mut out, &config, algorithm, values)
        }
    }
}

fn header(name: &str, category: Category) -> String {
    format!("=== {} ({}) ===", name, category).bold().to_string()
}

fn list_pages(out: &mut dyn Write, filter: Option<Category>) -> Result<()> {
    for category in Category::ALL {
        if filter.is_some_and(|wanted| wanted != category) {
            continue;
        }
        writeln!(out, "{}", category.to_string().to_uppercase().cyan().bold())?;
        for page in catalog::by_category(category) {
            writeln!(out, "  {:<24} {}", page.name.green(), page.summary)?;
        }
    }
    Ok(())
}

fn sort_values(
    out: &mut dyn Write,
    config: &GalleryConfig,
    algorithm: SortAlgorithm,
    values: Vec<i64>,
) -> Result<()> {
    let mut data = if values.is_empty() {
        sample(&config.sort).into_iter().map(i64::from).collect()
    } else {
        values
    };
    if data.is_empty() {
        return Err(GalleryError::invalid_config("values", "nothing to sort"));
    }

    writeln!(out, "input:  {:?}", data)?;
    let comparisons = count_comparisons(algorithm, &mut data);
    writeln!(out, "{}: {:?}", algorithm.to_string().green(), data)?;
    writeln!(out, "{} comparisons", comparisons)?;
    Ok(())
}
