//! Query Engine (§4.7): classifies a single User-Agent string against a
//! loaded catalog. Deliberately sequential — intra-query parallelism was
//! considered and rejected as an optimization with no measured win over
//! the overhead of spawning work per query (see DESIGN.md).

use fancy_regex::Regex;

use crate::batch::Batch;
use crate::order::Pattern;
use crate::types::{Record, Section, SectionId};

/// `^([A-Za-z]+)[^A-Za-z]+([A-Za-z]+)[^A-Za-z]+([A-Za-z]+).*`, used to pull
/// three leading "words" out of a UA string for the batch prefilter below.
pub(crate) fn trigram_regex() -> Regex {
    Regex::new(r"^([A-Za-z]+)[^A-Za-z]+([A-Za-z]+)[^A-Za-z]+([A-Za-z]+).*")
        .expect("trigram regex is a fixed, valid pattern")
}

/// Classify `ua` against `patterns`/`batches`/`sections`, returning the
/// merged Record of the first pattern to match, or `None`.
pub(crate) fn classify(
    ua: &str,
    patterns: &[Pattern],
    batches: &[Batch],
    sections: &[Section],
    trigram: &Regex,
) -> Option<Record> {
    // ASCII-only: browscap patterns are ASCII, and PCRE `CASELESS` (without
    // `PCRE_UCP`) never folds non-ASCII code points. `str::to_lowercase()`
    // would fold things like U+212A KELVIN SIGN to ASCII `k`, which PCRE
    // would not — see order.rs / batch.rs for the matching `(?i-u)` half.
    let lowered = ua.to_ascii_lowercase();

    // Step 1: opportunistically narrow to batches whose raw alternation
    // string contains all three leading words of the UA. If that subset
    // search comes up empty, fall through to the full batch list rather
    // than declaring no-match outright — the prefilter is an optimization,
    // never a source of false negatives.
    if let Ok(Some(caps)) = trigram.captures(&lowered) {
        let words: Vec<&str> = (1..=3)
            .filter_map(|i| caps.get(i).map(|m| m.as_str()))
            .collect();
        if words.len() == 3 {
            // One multi-pattern search per batch instead of three sequential
            // `.contains()` calls.
            let word_search = aho_corasick::AhoCorasick::builder()
                .build(&words)
                .expect("three plain literal words always build a valid automaton");
            let subset: Vec<&Batch> = batches
                .iter()
                .filter(|b| {
                    let mut seen = [false; 3];
                    for m in word_search.find_iter(&b.pattern_str) {
                        seen[m.pattern().as_usize()] = true;
                    }
                    seen.iter().all(|&found| found)
                })
                .collect();
            if !subset.is_empty() {
                if let Some(record) = search_batches(&lowered, &subset, patterns, sections) {
                    return Some(record);
                }
            }
        }
    }

    let all: Vec<&Batch> = batches.iter().collect();
    search_batches(&lowered, &all, patterns, sections)
}

/// Step 2 + 3: test each candidate batch's alternation regex in ascending
/// order, and for each that matches, walk its patterns in stored order
/// looking for the first exact, resolvable match.
fn search_batches(
    lowered: &str,
    candidates: &[&Batch],
    patterns: &[Pattern],
    sections: &[Section],
) -> Option<Record> {
    for batch in candidates {
        match batch.regex.is_match(lowered) {
            Ok(true) => {}
            _ => continue,
        }

        for pattern in &patterns[batch.first..=batch.last] {
            let Ok(Some(caps)) = pattern.regex.captures(lowered) else {
                continue;
            };

            let section_id = if pattern.matches.is_empty() {
                pattern.intval
            } else {
                let key = capture_key(&caps);
                match pattern.matches.get(&key) {
                    Some(&id) => id,
                    None => continue, // partial match: digits present but unresolved
                }
            };

            return Some(resolve_record(section_id, pattern, sections));
        }
    }
    None
}

fn capture_key(caps: &fancy_regex::Captures) -> String {
    let mut key = String::from("@");
    let mut first = true;
    // Group 0 is the whole match; capture groups from `(\d)` start at 1.
    for i in 1..caps.len() {
        if let Some(m) = caps.get(i) {
            if !first {
                key.push('|');
            }
            key.push_str(m.as_str());
            first = false;
        }
    }
    key
}

/// Step 4: build the Record from the winning section, then walk `parent_id`
/// merging each ancestor, first-writer-wins. Depth is capped at
/// `sections.len() + 1` as a defensive guard against a malformed parent
/// cycle slipping past load-time validation.
fn resolve_record(section_id: SectionId, pattern: &Pattern, sections: &[Section]) -> Record {
    let mut record = Record {
        pattern: pattern.pattern_str.clone(),
        ..Default::default()
    };

    let mut current = Some(section_id);
    let max_depth = sections.len() + 1;
    for _ in 0..max_depth {
        let Some(id) = current else { break };
        let Some(section) = sections.get(id as usize) else {
            break;
        };
        record.merge_from(section);
        current = section.parent_id;
    }

    record
}
