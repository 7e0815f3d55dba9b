//! Catalog Builder CLI
//!
//! Character JSON/YAML → MessagePack+LZ4 cache, and strike-team checks
//! against a catalog from the command line.

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "catalog_builder")]
#[command(about = "Build character catalog caches and check strike teams", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Build a catalog cache from a character JSON/YAML file
    Build {
        /// Input character file path
        #[arg(long)]
        r#in: PathBuf,

        /// Output MsgPack+LZ4 file path
        #[arg(long)]
        out: PathBuf,

        /// Schema version (e.g., "v1")
        #[arg(long, default_value = "v1")]
        schema_version: String,

        /// Verify cache after building
        #[arg(long, default_value = "false")]
        verify: bool,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },

    /// Check a roster against a catalog and print every violated rule
    Validate {
        /// Catalog cache (.lz4) or character JSON/YAML file
        #[arg(long)]
        catalog: PathBuf,

        /// Roster JSON file
        #[arg(long)]
        roster: PathBuf,

        /// Treat the roster as still being built (missing slots are not reported)
        #[arg(long, default_value = "false")]
        partial: bool,

        /// Rules JSON file (defaults to $ST_RULES_PATH, then built-in rules)
        #[arg(long)]
        rules: Option<PathBuf>,
    },

    /// Print a JSON Schema
    Schema {
        #[arg(long, value_enum, default_value = "request")]
        target: SchemaTarget,
    },
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum SchemaTarget {
    /// Roster validation request accepted by the JSON API
    Request,
    /// Cache metadata file
    Metadata,
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { r#in, out, schema_version, verify, metadata } => {
            println!("🔨 Building catalog cache...");
            println!("   Input:  {}", r#in.display());
            println!("   Output: {}", out.display());
            println!("   Schema: {}", schema_version);

            let (meta, stats) = catalog_builder::build_catalog_cache(&r#in, &out, &schema_version)?;

            for reason in &stats.rejected {
                println!("   ⚠️  Skipped: {}", reason);
            }
            print_metadata(&meta);

            if verify {
                verify_cache_integrity(&out, &meta.checksum)?;
            }

            if let Some(metadata_path) = metadata {
                save_metadata(&metadata_path, &meta)?;
            }
        }

        Commands::Validate { catalog, roster, partial, rules } => {
            run_validate(&catalog, &roster, partial, rules.as_deref())?;
        }

        Commands::Schema { target } => {
            let schema = match target {
                SchemaTarget::Request => st_core::api::request_schema_json()?,
                SchemaTarget::Metadata => serde_json::to_string_pretty(&schemars::schema_for!(
                    catalog_builder::CacheMetadata
                ))?,
            };
            println!("{}", schema);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn run_validate(catalog: &Path, roster: &Path, partial: bool, rules: Option<&Path>) -> Result<()> {
    use st_core::validation::{roster_summary, CompositionValidator};
    use st_core::RuleConfig;

    let load = catalog_builder::load_catalog_any(catalog)?;
    let roster = catalog_builder::load_roster(roster)?;
    let rules = match rules {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read rules file: {}", path.display()))?;
            RuleConfig::from_json(&content)?
        }
        None => RuleConfig::from_env()?,
    };

    println!("🔍 Checking strike team...");
    println!("   Catalog: {} ({} characters)", catalog.display(), load.catalog.len());
    println!("   Slots:   {}", roster.len());
    println!("   Eras:    {:?}", rules.era_rule);

    let validator = CompositionValidator::new(rules);
    let violations = if partial {
        validator.validate_partial(&roster, &load.catalog)
    } else {
        validator.validate(&roster, &load.catalog)
    };

    println!();
    for squad in roster_summary(&roster, &load.catalog) {
        match squad.budget {
            Some(budget) => println!(
                "   Squad {}: {}/{} pts spent",
                squad.squad + 1,
                budget.spent(),
                budget.primary_cost
            ),
            None => println!("   Squad {}: {} of 3 slots", squad.squad + 1, squad.filled),
        }
    }

    if violations.is_empty() {
        println!("\n✅ Strike team is valid");
        return Ok(());
    }

    println!();
    for violation in &violations {
        println!("   ❌ {}", violation);
    }
    anyhow::bail!("{} rule violation(s)", violations.len())
}

#[cfg(feature = "cli")]
fn print_metadata(meta: &catalog_builder::CacheMetadata) {
    println!("\n✅ Cache built successfully!");
    println!("   Characters:      {} ({} skipped)", meta.unit_count, meta.skipped);
    println!(
        "   Original size:   {} bytes ({:.2} KB)",
        meta.original_size,
        meta.original_size as f64 / 1024.0
    );
    println!(
        "   Compressed size: {} bytes ({:.2} KB)",
        meta.compressed_size,
        meta.compressed_size as f64 / 1024.0
    );
    println!("   Compression:     {:.1}%", meta.compression_ratio * 100.0);
    println!("   Checksum:        {}", meta.checksum);
    println!("   Created:         {}", meta.created_at);
}

#[cfg(feature = "cli")]
fn verify_cache_integrity(cache_path: &Path, checksum: &str) -> Result<()> {
    println!("\n🔍 Verifying cache integrity...");
    let is_valid = catalog_builder::verify_cache(cache_path, checksum)?;

    if is_valid {
        println!("✅ Cache verification passed");
        Ok(())
    } else {
        anyhow::bail!("❌ Cache verification failed - checksum mismatch!")
    }
}

#[cfg(feature = "cli")]
fn save_metadata(path: &Path, meta: &catalog_builder::CacheMetadata) -> Result<()> {
    let metadata_json = serde_json::to_string_pretty(meta)?;
    std::fs::write(path, metadata_json)?;
    println!("\n📄 Metadata saved to: {}", path.display());
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("catalog_builder CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
