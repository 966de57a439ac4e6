//! Pattern Orderer (§4.5): decodes each deduplicated skeleton back toward
//! its approximate literal form to compute sort keys, then stably sorts so
//! that more specific patterns are tried before more general ones.

use fancy_regex::Regex;

use crate::dedup::DedupedPattern;
use crate::error::{Error, Result};
use crate::types::SectionId;

pub(crate) struct Pattern {
    pub priority: u8,
    pub position: SectionId,
    pub pattern_str: String,
    pub regex: Regex,
    pub intval: SectionId,
    pub matches: indexmap::IndexMap<String, SectionId>,
}

/// A deduplicated pattern after sorting but before regex compilation —
/// compilation is the expensive, parallelizable half of this pipeline stage
/// (see `Catalog::load`), so it's kept out of the sort step itself.
pub(crate) struct ScoredPattern {
    pub priority: u8,
    pub position: SectionId,
    pub skeleton: String,
    pub intval: SectionId,
    pub matches: indexmap::IndexMap<String, SectionId>,
}

/// Placeholders for the two skeleton substrings that quote-meta escaping
/// produces and that no later rewrite ever touches (`\.` for a literal dot,
/// `\\` for a literal backslash) — they must survive the wildcard-reversal
/// rules below untouched, since those rules work on *un*-escaped `.` chars.
const DOT_PLACEHOLDER: char = '\u{1}';
const BACKSLASH_PLACEHOLDER: char = '\u{2}';

/// Reverse `canonical::canonicalize_name`'s rewrites well enough to recover
/// approximate decoded length/short_length for sort purposes. Implemented as
/// an explicit ordered list of rules, not a lookup map: `\.` and the bare `.`
/// that `\?` produces both decode through a literal `.` byte at different
/// points in the pipeline, so rule order — not a keyed table — is what makes
/// this unambiguous.
fn decode(skeleton: &str) -> String {
    let mut s = skeleton.replace("(\\d)", "0");

    s = s.replace("\\.", &DOT_PLACEHOLDER.to_string());
    s = s.replace("\\\\", &BACKSLASH_PLACEHOLDER.to_string());

    // Reverse `\x` -> `\\x` before the generic backslash placeholder could
    // otherwise be mistaken to apply here.
    s = s.replace("\\\\x", "\\x");

    // Longest match first: `.*` only ever came from `\*`, so consume it
    // before treating any leftover lone `.` as having come from `\?`.
    s = s.replace(".*", "*");
    s = s.replace('.', "?");

    s = s.replace("\\:", ":");
    s = s.replace("\\-", "-");

    s.replace(DOT_PLACEHOLDER, ".")
        .replace(BACKSLASH_PLACEHOLDER, "\\")
}

fn short_length(decoded: &str) -> usize {
    decoded.chars().filter(|&c| c != '*' && c != '?').count()
}

/// Sort deduplicated patterns into their final query order (§4.5): priority
/// ascending (the universal `*` pattern always sorts last), length
/// descending, short_length descending, position ascending. Regex
/// compilation is deferred to `compile_pattern` so callers can parallelize
/// it.
pub(crate) fn order_patterns(deduped: Vec<DedupedPattern>) -> Vec<ScoredPattern> {
    let mut scored: Vec<(u8, usize, usize, SectionId, DedupedPattern)> = deduped
        .into_iter()
        .map(|p| {
            let decoded = decode(&p.skeleton);
            let length = decoded.chars().count();
            let short = short_length(&decoded);
            let priority = if decoded == "*" { 2 } else { 1 };
            (priority, length, short, p.position, p)
        })
        .collect();

    scored.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then(b.1.cmp(&a.1))
            .then(b.2.cmp(&a.2))
            .then(a.3.cmp(&b.3))
    });

    scored
        .into_iter()
        .map(|(priority, _, _, position, p)| ScoredPattern {
            priority,
            position,
            skeleton: p.skeleton,
            intval: p.intval,
            matches: p.matches,
        })
        .collect()
}

/// Compile one scored pattern's skeleton into its final anchored,
/// case-insensitive regex. `(?i-u)` restricts case folding to ASCII,
/// matching PCRE `CASELESS` (without `PCRE_UCP`) rather than the engine's
/// default Unicode-aware folding — see spec §1/§9.
pub(crate) fn compile_pattern(scored: ScoredPattern) -> Result<Pattern> {
    let anchored = format!("^(?i-u)(?:{})$", scored.skeleton);
    let regex = Regex::new(&anchored).map_err(|e| Error::PatternRegex {
        pattern: scored.skeleton.clone(),
        source: Box::new(e),
    })?;
    Ok(Pattern {
        priority: scored.priority,
        position: scored.position,
        pattern_str: scored.skeleton,
        regex,
        intval: scored.intval,
        matches: scored.matches,
    })
}
