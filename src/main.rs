mod cli;

use clap::Parser;
use planit::catalog::{self, Catalog};
use planit::config;
use planit::error::PlanitError;
use planit::rank::{self, Direction, RankOptions, SortKey};
use planit::report::{self, OutputFormat, ProductReport, RankingReport};
use planit::scoring;
use planit::snapshot::{self, StatsSnapshot};
use planit::types::scoring::Stats;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const BLOCKING: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn output_format(format: cli::ReportFormat) -> OutputFormat {
    match format {
        cli::ReportFormat::Json => OutputFormat::Json,
        cli::ReportFormat::Md => OutputFormat::Md,
    }
}

fn sort_key(field: cli::SortField) -> SortKey {
    match field {
        cli::SortField::Planit => SortKey::Planit,
        cli::SortField::Health => SortKey::Health,
        cli::SortField::Sustainability => SortKey::Sustainability,
        cli::SortField::Price => SortKey::Price,
        cli::SortField::UnitPrice => SortKey::UnitPrice,
    }
}

fn ensure_dataset_dir(path: &Path) -> Result<(), PlanitError> {
    if !path.is_dir() {
        return Err(PlanitError::DatasetNotFound(path.display().to_string()));
    }
    Ok(())
}

/// Bounds for a scoring run, plus whether they came from an outdated snapshot.
/// `None` means the fixed fallback bounds.
fn resolve_stats(
    dir: &Path,
    catalog: &Catalog,
    args: &cli::ScoringArgs,
) -> Result<(Option<Stats>, bool), PlanitError> {
    if let Some(path) = &args.stats_file {
        let loaded = snapshot::read_snapshot(path)?;
        let stale = !loaded.is_current(&snapshot::dataset_digest(dir)?);
        if stale {
            tracing::warn!(
                snapshot = %path.display(),
                "stats snapshot was computed from a different dataset; rerun `planit stats`"
            );
        }
        return Ok((Some(loaded.stats), stale));
    }
    match args.bounds {
        cli::BoundsMode::Dataset => Ok((Some(catalog.stats()), false)),
        cli::BoundsMode::Default => Ok((None, false)),
    }
}

fn run_rank(cmd: cli::RankCommand) -> Result<i32, PlanitError> {
    ensure_dataset_dir(&cmd.path)?;
    let loaded = config::load_config(&cmd.path, cmd.scoring.config.as_deref())?;
    let catalog = catalog::load(&cmd.path)?;
    let (stats, stale) = resolve_stats(&cmd.path, &catalog, &cmd.scoring)?;
    let stats = stats.unwrap_or_default();

    let scored = scoring::score_catalog(&catalog, &loaded.config, &stats);
    let skipped = scored.skipped.clone();
    let direction = if cmd.asc {
        Some(Direction::Ascending)
    } else if cmd.desc {
        Some(Direction::Descending)
    } else {
        None
    };
    let options = RankOptions {
        sort: sort_key(cmd.sort),
        direction,
        query: cmd.query,
        limit: cmd.limit,
    };
    let ranked = rank::rank(scored.scored, &options);
    tracing::info!(rows = ranked.len(), skipped = skipped.len(), "ranked catalog");

    let report = RankingReport::new(&ranked, stats.bounds, skipped);
    println!("{}", report::render_ranking(&report, output_format(cmd.format))?);

    if stale || !report.skipped.is_empty() {
        Ok(exit_code::WARNINGS)
    } else {
        Ok(exit_code::SUCCESS)
    }
}

fn run_score(cmd: cli::ScoreCommand) -> Result<i32, PlanitError> {
    ensure_dataset_dir(&cmd.path)?;
    let loaded = config::load_config(&cmd.path, cmd.scoring.config.as_deref())?;
    let catalog = catalog::load(&cmd.path)?;

    let basics = catalog
        .product(&cmd.id)
        .ok_or_else(|| PlanitError::ProductNotFound(cmd.id.clone()))?;
    let attributes = catalog
        .attributes_for(&cmd.id)
        .ok_or_else(|| PlanitError::MissingAttributes(cmd.id.clone()))?;
    let (stats, stale) = resolve_stats(&cmd.path, &catalog, &cmd.scoring)?;

    let scores = scoring::score_product(basics, attributes, &loaded.config, stats.as_ref());
    let report = ProductReport {
        product: basics,
        attributes,
        scores,
        bounds: stats.unwrap_or_default().bounds,
    };
    println!("{}", report::render_product(&report, output_format(cmd.format))?);

    if stale {
        Ok(exit_code::WARNINGS)
    } else {
        Ok(exit_code::SUCCESS)
    }
}

fn run_stats(cmd: cli::StatsCommand) -> Result<i32, PlanitError> {
    ensure_dataset_dir(&cmd.path)?;
    let catalog = catalog::load(&cmd.path)?;
    let digest = snapshot::dataset_digest(&cmd.path)?;
    let stats_snapshot = StatsSnapshot::new(&catalog, digest);

    match &cmd.out {
        Some(out) => {
            snapshot::write_snapshot(out, &stats_snapshot)?;
            println!("stats snapshot: {}", out.display());
        }
        None => println!(
            "{}",
            report::render_stats(&stats_snapshot, output_format(cmd.format))?
        ),
    }
    Ok(exit_code::SUCCESS)
}

fn run_validate(cmd: cli::ValidateCommand) -> Result<i32, PlanitError> {
    ensure_dataset_dir(&cmd.path)?;
    let mismatches = catalog::validate_headers(&cmd.path)?;
    if !mismatches.is_empty() {
        for mismatch in &mismatches {
            println!("[BLOCKING] {}: unexpected header", mismatch.file);
            println!("  expected: {}", mismatch.expected);
            println!("  found:    {}", mismatch.found);
        }
        return Ok(exit_code::BLOCKING);
    }
    println!("CSV headers OK");

    let catalog = catalog::load(&cmd.path)?;
    let mut warnings = 0;
    for product_id in catalog.products_without_attributes() {
        println!("[WARN] {product_id}: no attributes row");
        warnings += 1;
    }
    for product_id in catalog.orphan_attributes() {
        println!("[WARN] {product_id}: attributes row without product");
        warnings += 1;
    }
    let incomplete = catalog.incomplete_nutrition_count();
    if incomplete > 0 {
        println!("[WARN] {incomplete} attribute row(s) will use imputed nutrition values");
        warnings += 1;
    }

    if warnings == 0 {
        println!("validate: no findings");
        Ok(exit_code::SUCCESS)
    } else {
        Ok(exit_code::WARNINGS)
    }
}

fn run_config(cmd: cli::ConfigCommand) -> Result<i32, PlanitError> {
    let loaded = config::load_config(&cmd.dir, cmd.config.as_deref())?;
    for source in &loaded.sources {
        tracing::info!(source = %source.display(), "config layer");
    }
    print!("{}", config::render_config(&loaded.config)?);
    Ok(exit_code::SUCCESS)
}

fn run() -> Result<i32, PlanitError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    match cli.command {
        cli::Commands::Rank(cmd) => run_rank(cmd),
        cli::Commands::Score(cmd) => run_score(cmd),
        cli::Commands::Stats(cmd) => run_stats(cmd),
        cli::Commands::Validate(cmd) => run_validate(cmd),
        cli::Commands::Config(cmd) => run_config(cmd),
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
