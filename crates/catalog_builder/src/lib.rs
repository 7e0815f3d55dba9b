//! Catalog Builder Library
//!
//! Character catalog (JSON/YAML) → normalized units → MessagePack → LZ4 → SHA256 checksum,
//! plus the file helpers the CLI uses to check rosters against a catalog.

use anyhow::{bail, Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use st_core::api::RosterEntry;
use st_core::catalog::{CatalogLoad, LoadStats, UnitCatalog};
use st_core::models::Roster;
use std::fs;
use std::path::Path;

/// Cache metadata
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheMetadata {
    /// Schema version (e.g. "v1")
    pub schema_version: String,
    /// SHA256 of the compressed file (hex)
    pub checksum: String,
    /// RFC3339
    pub created_at: String,
    /// Source file size (bytes)
    pub original_size: u64,
    /// Cache file size (bytes)
    pub compressed_size: u64,
    /// compressed / original
    pub compression_ratio: f64,
    /// Units written to the cache
    pub unit_count: usize,
    /// Source records that were rejected
    pub skipped: usize,
}

/// Normalize a raw character file and write it as a MsgPack+LZ4 cache.
///
/// Rejected records are left out of the cache and counted in `skipped`.
pub fn build_catalog_cache(
    input: &Path,
    output_msgpack_lz4: &Path,
    schema_version: &str,
) -> Result<(CacheMetadata, LoadStats)> {
    let original_size = fs::metadata(input)
        .with_context(|| format!("Failed to read catalog file: {}", input.display()))?
        .len();

    let CatalogLoad { catalog, stats } = UnitCatalog::load(input)
        .with_context(|| format!("Failed to load catalog: {}", input.display()))?;
    if catalog.is_empty() {
        bail!("Catalog {} contains no usable characters", input.display());
    }

    let msgpack_bytes =
        rmp_serde::to_vec(&catalog).context("Failed to serialize catalog to MessagePack")?;

    // LZ4 with the uncompressed size prepended
    let compressed = lz4_flex::compress_prepend_size(&msgpack_bytes);
    let compressed_size = compressed.len() as u64;
    let checksum = sha256_hex(&compressed);

    if let Some(parent) = output_msgpack_lz4.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(output_msgpack_lz4, &compressed).with_context(|| {
        format!("Failed to write output file: {}", output_msgpack_lz4.display())
    })?;

    let compression_ratio =
        if original_size == 0 { 0.0 } else { compressed_size as f64 / original_size as f64 };

    let metadata = CacheMetadata {
        schema_version: schema_version.to_string(),
        checksum,
        created_at: chrono::Utc::now().to_rfc3339(),
        original_size,
        compressed_size,
        compression_ratio,
        unit_count: catalog.len(),
        skipped: stats.skipped(),
    };
    Ok((metadata, stats))
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Whether the cache file matches `expected_checksum`.
pub fn verify_cache(cache_file: &Path, expected_checksum: &str) -> Result<bool> {
    let bytes = fs::read(cache_file)
        .with_context(|| format!("Failed to read cache file: {}", cache_file.display()))?;
    Ok(sha256_hex(&bytes) == expected_checksum)
}

pub fn load_catalog_cache(cache_file: &Path) -> Result<UnitCatalog> {
    let compressed = fs::read(cache_file)
        .with_context(|| format!("Failed to read cache file: {}", cache_file.display()))?;

    let msgpack_bytes =
        lz4_flex::decompress_size_prepended(&compressed).context("Failed to decompress LZ4")?;

    rmp_serde::from_slice(&msgpack_bytes).context("Failed to deserialize MessagePack")
}

/// Load a catalog from a built cache (`.lz4`) or a raw JSON/YAML file.
pub fn load_catalog_any(path: &Path) -> Result<CatalogLoad> {
    let is_cache = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("lz4"));

    if is_cache {
        let catalog = load_catalog_cache(path)?;
        let stats = LoadStats {
            total_records: catalog.len(),
            loaded: catalog.len(),
            ..LoadStats::default()
        };
        return Ok(CatalogLoad { catalog, stats });
    }

    UnitCatalog::load(path).with_context(|| format!("Failed to load catalog: {}", path.display()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RosterDocument {
    List(Vec<RosterEntry>),
    Wrapped { characters: Vec<RosterEntry> },
}

/// Read a roster file: either a bare list of picks or `{ "characters": [...] }`.
pub fn load_roster(path: &Path) -> Result<Roster> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster file: {}", path.display()))?;
    let document: RosterDocument = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse roster file: {}", path.display()))?;

    let entries = match document {
        RosterDocument::List(entries) => entries,
        RosterDocument::Wrapped { characters } => characters,
    };
    Ok(Roster::from_picks(entries.into_iter().map(|e| (e.character_id, e.role))))
}
