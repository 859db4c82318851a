use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use jobs_digest::config::Settings;
use jobs_digest::enrich::{enrich, DescriptionCache};
use jobs_digest::merge::CompanyIndex;
use jobs_digest::model::EditionText;
use jobs_digest::parser::line::parse_line;
use jobs_digest::pipeline::{clean_listing, fold_editions_with, fold_listings, RunStats};
use jobs_digest::report::{clean_companies, Summary};
use jobs_digest::store::{expand_to_listings, load_raw_editions, CompaniesFile};
use jobs_digest::{CanonicalCompany, RawListing};

#[derive(Parser)]
#[command(name = "jobs_digest", about = "Newsletter job listings → merged companies dataset")]
struct Cli {
    /// Raw editions directory (overrides settings)
    #[arg(long, global = true)]
    raw_dir: Option<PathBuf>,
    /// Companies JSON file (overrides settings)
    #[arg(long, global = true)]
    companies: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse every raw edition and write the companies file from scratch
    Build,
    /// Fold only editions newer than the stored maximum onto the companies file
    Update,
    /// Re-validate and re-normalize an existing companies file
    Clean,
    /// Industry and location summary
    Stats {
        /// Entries per top list (default from settings)
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },
    /// Parse and clean a single listing line, print it as JSON
    ParseLine { line: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let mut settings = Settings::load()?;
    if let Some(dir) = cli.raw_dir {
        settings.raw_dir = dir;
    }
    if let Some(file) = cli.companies {
        settings.companies_file = file;
    }
    info!(?settings, "settings loaded");

    let result = match cli.command {
        Commands::Build => {
            let editions = load_raw_editions(&settings.raw_dir)?;
            if editions.is_empty() {
                println!("No editions in {}.", settings.raw_dir.display());
                return Ok(());
            }
            println!("Processing {} editions...", editions.len());
            let mut index = CompanyIndex::new();
            let stats = process_editions(&mut index, &editions);
            write_companies(&settings, index, &[])?;
            print_stats(&stats);
            Ok(())
        }
        Commands::Update => {
            let stored = CompaniesFile::load(&settings.companies_file)?;
            let max = stored.max_edition().unwrap_or(0);
            let fresh: Vec<EditionText> = load_raw_editions(&settings.raw_dir)?
                .into_iter()
                .filter(|e| e.number > max)
                .collect();
            if fresh.is_empty() {
                println!("No editions newer than {}.", max);
                return Ok(());
            }
            println!(
                "Folding {} new editions onto {} stored companies...",
                fresh.len(),
                stored.companies.len()
            );

            let mut index = CompanyIndex::new();
            let mut seeded = RunStats::default();
            fold_listings(&mut index, expand_to_listings(&stored.companies), &mut seeded);
            let stats = process_editions(&mut index, &fresh);
            write_companies(&settings, index, &stored.companies)?;
            print_stats(&stats);
            Ok(())
        }
        Commands::Clean => {
            let path = &settings.companies_file;
            let backup = PathBuf::from(format!("{}.backup", path.display()));
            fs::copy(path, &backup)
                .with_context(|| format!("backing up {} to {}", path.display(), backup.display()))?;

            let mut file = CompaniesFile::load(path)?;
            let before = file.companies.len();
            let (kept, counts) = clean_companies(std::mem::take(&mut file.companies));
            CompaniesFile::new(kept).save(path)?;
            println!(
                "Cleaned {}: {} → {} companies ({} invalid, {} duplicates removed).",
                path.display(),
                before,
                counts.kept,
                counts.removed_invalid,
                counts.removed_duplicate
            );
            println!("Backup saved to {}", backup.display());
            Ok(())
        }
        Commands::Stats { top } => {
            let file = CompaniesFile::load(&settings.companies_file)?;
            let summary = Summary::from_companies(&file.companies, top.unwrap_or(settings.top_n));
            println!("Last updated: {}\n", file.last_updated);
            println!("{}", summary.to_markdown());
            Ok(())
        }
        Commands::ParseLine { line } => {
            let Some(parsed) = parse_line(&line) else {
                println!("No listing found in line.");
                return Ok(());
            };
            let listing = RawListing {
                job_title: parsed.job_title,
                company: parsed.company,
                industry: parsed.industry,
                stage: parsed.stage,
                investors: parsed.investors,
                location: parsed.location,
                ..Default::default()
            };
            match clean_listing(listing.clone()) {
                Ok(cleaned) => println!("{}", serde_json::to_string_pretty(&cleaned)?),
                Err(reason) => {
                    println!("{}", serde_json::to_string_pretty(&listing)?);
                    println!("Rejected: {}", reason);
                }
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

fn process_editions(index: &mut CompanyIndex, editions: &[EditionText]) -> RunStats {
    let pb = ProgressBar::new(editions.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let stats = fold_editions_with(index, editions, |_| pb.inc(1));

    pb.finish_and_clear();
    stats
}

/// Descriptions already on `previous` records are kept.
fn write_companies(settings: &Settings, index: CompanyIndex, previous: &[CanonicalCompany]) -> Result<()> {
    let mut companies = index.into_sorted();
    let mut cache = DescriptionCache::load(&settings.descriptions_cache)?;
    for c in previous.iter().filter(|c| !c.description.is_empty()) {
        cache.insert(c.key(), c.description.clone());
    }
    enrich(&mut companies, &mut cache, None);
    if !cache.is_empty() {
        cache.save(&settings.descriptions_cache)?;
    }

    let file = CompaniesFile::new(companies);
    file.save(&settings.companies_file)?;
    println!(
        "Saved {} companies to {}",
        file.total_companies,
        settings.companies_file.display()
    );
    Ok(())
}

fn print_stats(stats: &RunStats) {
    println!(
        "Editions {} | lines {} | listings {} | rejected {} invalid, {} duplicate | companies {}",
        stats.editions,
        stats.lines_scanned,
        stats.listings_parsed,
        stats.rejected_invalid,
        stats.rejected_duplicate,
        stats.companies,
    );
}
