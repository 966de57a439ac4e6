//! Catalog (§6): the immutable, loaded aggregate that `classify()` is a
//! method on. `load`/`load_path` run the full pipeline — parse, canonicalize,
//! deduplicate, order, batch — compiling pattern and batch regexes in
//! parallel the way the teacher compiles its Matomo parsers.

use std::path::Path;

use rayon::prelude::*;

use crate::batch::{self, Batch};
use crate::canonical;
use crate::dedup;
use crate::error::{Error, Result};
use crate::ini;
use crate::order::{self, Pattern};
use crate::query;
use crate::types::{Record, Section};

/// Default batch size, matching the reference implementation's own
/// benchmark default.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// An immutable, loaded browscap catalog ready to classify User-Agent
/// strings. Build one with [`Catalog::load`] or [`Catalog::load_path`] and
/// reuse it across every query — loading is the expensive part.
pub struct Catalog {
    sections: Vec<Section>,
    patterns: Vec<Pattern>,
    batches: Vec<Batch>,
    batch_size: usize,
    version: String,
    trigram: fancy_regex::Regex,
}

impl Catalog {
    /// Load a catalog from a path on disk.
    pub fn load_path(path: impl AsRef<Path>, batch_size: usize) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loading browscap catalog from {}", path.display());
        Self::load(&bytes, batch_size)
    }

    /// Load a catalog from an in-memory INI byte buffer.
    pub fn load(bytes: &[u8], batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(Error::ZeroBatchSize);
        }

        let parsed = ini::parse(bytes)?;
        log::debug!(
            "parsed {} sections, version {}",
            parsed.sections.len(),
            parsed.version
        );

        let families = canonical::build_families(&parsed.sections);
        let deduped = dedup::dedup_families(families);
        log::debug!("deduplicated to {} pattern families", deduped.len());

        let scored = order::order_patterns(deduped);

        // Compiling each pattern's anchored regex is the expensive,
        // embarrassingly parallel part of a load — mirrors the teacher's
        // `into_par_iter().map(...).collect()` over its own YAML parsers.
        let patterns: Vec<Pattern> = scored
            .into_par_iter()
            .map(order::compile_pattern)
            .collect::<Result<Vec<_>>>()?;

        let batches = batch::compile_batches(&patterns, batch_size)?;

        log::info!(
            "compiled {} patterns into {} batches (batch_size={})",
            patterns.len(),
            batches.len(),
            batch_size
        );

        Ok(Catalog {
            sections: parsed.sections,
            patterns,
            batches,
            batch_size,
            version: parsed.version,
            trigram: query::trigram_regex(),
        })
    }

    /// Classify a single User-Agent string. Returns `None` on no match —
    /// classification never fails.
    pub fn classify(&self, ua: &str) -> Option<Record> {
        query::classify(
            ua,
            &self.patterns,
            &self.batches,
            &self.sections,
            &self.trigram,
        )
    }

    /// The browscap catalog version string (`GJK_Browscap_Version`).
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Number of sections parsed from the source INI.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Number of distinct (deduplicated) patterns the catalog matches
    /// against.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Configured batch size this catalog was built with.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}
