//! Pattern Deduplicator (§4.4): folds a family of digit-variant patterns into
//! one skeleton, splicing back any digit position that happens to be
//! identical across every variant so only genuinely differential positions
//! remain as `(\d)` captures.

use indexmap::IndexMap;

use crate::canonical::Family;
use crate::types::SectionId;

pub(crate) struct DedupedPattern {
    pub skeleton: String,
    /// Non-zero iff this pattern resolves to a section directly on match,
    /// with no capture-key lookup needed. Exactly one of `intval != 0` /
    /// `!matches.is_empty()` holds, per §3's invariant.
    pub intval: SectionId,
    /// `"@v1|v2|..." -> section_id`, keyed by the differential digit values
    /// in capture order.
    pub matches: IndexMap<String, SectionId>,
    pub position: SectionId,
}

pub(crate) fn dedup_families(families: IndexMap<String, Family>) -> Vec<DedupedPattern> {
    families
        .into_iter()
        .map(|(skeleton, family)| match family {
            Family::Trivial { intval, position } => DedupedPattern {
                skeleton,
                intval,
                matches: IndexMap::new(),
                position,
            },
            Family::Variadic {
                first,
                position,
                matches,
            } => dedup_family(skeleton, first, position, matches),
        })
        .collect()
}

fn dedup_family(
    skeleton: String,
    first: String,
    position: SectionId,
    matches: IndexMap<SectionId, Vec<char>>,
) -> DedupedPattern {
    // Degenerate case: a single variant with an uncompressed form on hand —
    // there's nothing to deduplicate, just use the literal pattern directly.
    if matches.len() == 1 && !first.is_empty() {
        let &section_id = matches.keys().next().unwrap();
        return DedupedPattern {
            skeleton: first,
            intval: section_id,
            matches: IndexMap::new(),
            position,
        };
    }

    // General case: pick the variant with the smallest section id as the
    // reference vector, then find which digit positions agree with it
    // across every other variant in the family.
    let (&ref_id, reference) = matches.iter().min_by_key(|(id, _)| **id).unwrap();
    let digit_count = reference.len();

    let identical: Vec<Option<char>> = (0..digit_count)
        .map(|p| {
            let value = reference[p];
            let agrees = matches
                .iter()
                .all(|(id, v)| *id == ref_id || v.get(p) == Some(&value));
            agrees.then_some(value)
        })
        .collect();

    let rewritten_skeleton = splice_identical(&skeleton, &identical);

    let resolved: IndexMap<String, SectionId> = matches
        .iter()
        .map(|(&section_id, digits)| {
            let mut key = String::from("@");
            let mut first_value = true;
            for (p, &d) in digits.iter().enumerate() {
                if identical[p].is_some() {
                    continue;
                }
                if !first_value {
                    key.push('|');
                }
                key.push(d);
                first_value = false;
            }
            (key, section_id)
        })
        .collect();

    DedupedPattern {
        skeleton: rewritten_skeleton,
        intval: 0,
        matches: resolved,
        position,
    }
}

/// Splice identical digit values back into the skeleton's literal text,
/// removing their `(\d)` tokens while leaving differential positions as
/// captures. Mirrors the original's split-on-token / rejoin approach.
fn splice_identical(skeleton: &str, identical: &[Option<char>]) -> String {
    let parts: Vec<&str> = skeleton.split("(\\d)").collect();
    let mut merged: Vec<Option<String>> = parts.iter().map(|p| Some(p.to_string())).collect();

    for (p, value) in identical.iter().enumerate() {
        if let Some(v) = value {
            let spliced = format!(
                "{}{}{}",
                merged[p].take().unwrap_or_default(),
                v,
                merged[p + 1].as_deref().unwrap_or_default()
            );
            merged[p + 1] = Some(spliced);
        }
    }

    merged
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join("(\\d)")
}
