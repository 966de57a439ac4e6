//! Pattern Canonicalizer (§4.3): turns each contributing section's wildcard
//! name into a regex skeleton, compressing embedded decimal digits into a
//! parameterized `(\d)` capture so that digit-variant families (version
//! numbers, build ids, ...) can be folded together by the deduplicator.

use indexmap::IndexMap;

use crate::types::{Section, SectionId};

/// Characters escaped literally, matching the canonical generic regex-quote
/// behavior this pipeline was built against (Go's `regexp.QuoteMeta`): every
/// PCRE metacharacter plus the backslash itself.
const METACHARS: &[char] = &[
    '\\', '.', '+', '*', '?', '(', ')', '|', '[', ']', '{', '}', '^', '$',
];

fn quote_meta(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        if METACHARS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Canonicalize one section's raw UA glob into a regex skeleton (§4.3 step
/// 1-3): lowercase, quote-meta, then the fixed sequence of textual rewrites
/// that turn escaped wildcards into their regex equivalents.
fn canonicalize_name(name: &str) -> String {
    // ASCII-only, matching the `(?i-u)` compiled regexes in order.rs/batch.rs
    // — see query.rs for the corresponding UA-side lowering.
    let lowered = name.to_ascii_lowercase();
    let quoted = quote_meta(&lowered);
    let s = quoted
        .replace(':', "\\:")
        .replace('-', "\\-")
        .replace("\\*", ".*")
        .replace("\\?", ".")
        .replace("\\x", "\\\\x");
    s
}

/// A family of one or more sections sharing the same digit-compressed
/// skeleton. `Trivial` sections have no embedded digits at all and map
/// directly to a section id; `Variadic` families carry one capture vector
/// per original variant, keyed by the variant's section id.
pub(crate) enum Family {
    Trivial {
        intval: SectionId,
        position: SectionId,
    },
    Variadic {
        /// Uncompressed skeleton of the lowest-id variant — used by the
        /// deduplicator's single-variant demotion case.
        first: String,
        position: SectionId,
        /// variant section id -> digit sequence, in skeleton order.
        matches: IndexMap<SectionId, Vec<char>>,
    },
}

/// Run the canonicalizer over every section in id order, producing a
/// skeleton -> Family map. Iteration order of the input must be id order so
/// that "lowest-id variant" bookkeeping (`first`, `position`) is correct.
pub(crate) fn build_families(sections: &[Section]) -> IndexMap<String, Family> {
    let mut families: IndexMap<String, Family> = IndexMap::new();

    for section in sections {
        if !section.contributes_pattern() {
            continue;
        }

        let pattern = canonicalize_name(&section.name);
        let digits: Vec<char> = pattern.chars().filter(|c| c.is_ascii_digit()).collect();

        if digits.is_empty() {
            families.insert(
                pattern,
                Family::Trivial {
                    intval: section.id,
                    position: section.id,
                },
            );
            continue;
        }

        let compressed = compress_digits(&pattern);
        let family = families.entry(compressed).or_insert_with(|| Family::Variadic {
            first: pattern,
            position: section.id,
            matches: IndexMap::new(),
        });
        match family {
            Family::Variadic { matches, .. } => {
                matches.insert(section.id, digits);
            }
            Family::Trivial { .. } => unreachable!("digit pattern keyed into a trivial family"),
        }
    }

    families
}

/// Replace every ASCII-digit character with the literal token `(\d)`.
fn compress_digits(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    for c in pattern.chars() {
        if c.is_ascii_digit() {
            out.push_str("(\\d)");
        } else {
            out.push(c);
        }
    }
    out
}
