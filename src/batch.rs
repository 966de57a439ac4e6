//! Batch Compiler (§4.6): groups the ordered pattern list into fixed-size
//! alternations so the query engine can rule out most of the catalog with
//! one regex match before testing individual patterns.

use fancy_regex::Regex;

use crate::error::{Error, Result};
use crate::order::Pattern;

pub(crate) struct Batch {
    pub index: usize,
    pub pattern_str: String,
    pub regex: Regex,
    pub first: usize,
    pub last: usize,
}

/// Partition `patterns` into contiguous batches of `batch_size` and compile
/// each into one alternation regex.
///
/// The alternation is built literally as
/// `^(?:p1)|(?:p2)|...(?:pN)$` — note that `^` only binds to the first
/// alternative and `$` only to the last, since `|` has lower precedence
/// than anchors. That asymmetry is intentional: it lets an unanchored
/// interior alternative still contribute a match anywhere in the batch,
/// which is what makes the prefilter a cheap superset test rather than a
/// a second full per-pattern pass.
pub(crate) fn compile_batches(patterns: &[Pattern], batch_size: usize) -> Result<Vec<Batch>> {
    if batch_size == 0 {
        return Err(Error::ZeroBatchSize);
    }

    patterns
        .chunks(batch_size)
        .enumerate()
        .map(|(index, chunk)| {
            let first = index * batch_size;
            let last = first + chunk.len() - 1;
            let alternation = chunk
                .iter()
                .map(|p| format!("(?:{})", p.pattern_str))
                .collect::<Vec<_>>()
                .join("|");
            let pattern_str = format!("^{}$", alternation);
            // `(?i-u)`: ASCII-only case folding, matching PCRE `CASELESS`
            // without `PCRE_UCP` — see order.rs::compile_pattern.
            let regex =
                Regex::new(&format!("(?i-u){}", pattern_str)).map_err(|e| Error::BatchRegex {
                    index,
                    source: Box::new(e),
                })?;
            Ok(Batch {
                index,
                pattern_str,
                regex,
                first,
                last,
            })
        })
        .collect()
}
