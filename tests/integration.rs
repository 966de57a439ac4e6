//! Black-box integration tests for the catalog loader and query engine.
//!
//! Most of this suite runs against a small synthetic INI catalog embedded as
//! a string literal, since no real `full_php_browscap.ini` ships with this
//! crate (see SPEC_FULL.md §0). The six end-to-end scenarios from spec §8
//! are exercised as `#[ignore]`d tests that only run when `BROWSCAP_INI`
//! points at a real catalog file on disk, mirroring the teacher's
//! path-gated `assert!(path.exists(), ...)` integration test.

use browscap_rs::Catalog;
use std::sync::OnceLock;

// `Mozilla/5.0*Chrome/37.*` and `Mozilla/5.0*Chrome/38.*` share every digit
// except the last one, exercising the deduplicator's identical/differential
// split (§4.4) against a realistic nested UA glob rather than a standalone
// literal. `Opera/9.6*` / `Opera/9.7*` form a second, unrelated family used
// to exercise capture-miss fallthrough in isolation (no other pattern in
// this catalog overlaps an "Opera/9.*" UA).
const SAMPLE_INI: &[u8] = b"\
[GJK_Browscap_Version]
Version=6001026

[DefaultProperties]
Comment=abstract parent
Browser=Default Browser
Platform=unknown
isMobileDevice=false
isTablet=false
Crawler=false

[Mozilla/5.0*]
Parent=DefaultProperties
Comment=
Browser=Chrome
Browser_Maker=Google Inc

[Mozilla/5.0*Chrome/37.*]
Parent=Mozilla/5.0*
Comment=
Browser=Chrome
Version=37.0

[Mozilla/5.0*Chrome/38.*]
Parent=Mozilla/5.0*
Comment=
Browser=Chrome
Version=38.0

[GoogleBot/*]
Parent=DefaultProperties
Comment=
Browser=GoogleBot
Crawler=true

[*Mobile*iPhone*]
Parent=DefaultProperties
Comment=
Browser=Safari
Platform=iOS
isMobileDevice=true

[Opera/9.6*]
Parent=DefaultProperties
Comment=
Browser=Opera
Version=9.6

[Opera/9.7*]
Parent=DefaultProperties
Comment=
Browser=Opera
Version=9.7

[*]
Parent=DefaultProperties
Comment=catch all
";

fn sample_catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(|| Catalog::load(SAMPLE_INI, 10).expect("sample catalog must load"))
}

#[test]
fn version_is_read_from_header_section() {
    assert_eq!(sample_catalog().version(), "6001026");
}

#[test]
fn digit_family_resolves_to_the_matching_variant() {
    let record = sample_catalog()
        .classify("Mozilla/5.0 (Windows NT 6.1) AppleWebKit/537 Chrome/37.0.1234 Safari/537.36")
        .expect("expected a match");
    assert_eq!(record.browser, "Chrome");
    assert_eq!(record.version, "37.0");
}

#[test]
fn another_digit_variant_resolves_independently() {
    let record = sample_catalog()
        .classify("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537 Chrome/38.1.2 Safari/537.36")
        .expect("expected a match");
    assert_eq!(record.version, "38.0");
}

#[test]
fn properties_are_inherited_from_parent_chain() {
    let record = sample_catalog()
        .classify("Mozilla/5.0 (Windows NT 6.1) AppleWebKit/537 Chrome/37.0.1234 Safari/537.36")
        .expect("expected a match");
    // Browser_Maker only lives on the intermediate `Mozilla/5.0*` section,
    // not the leaf version variant — it must be pulled up the chain.
    assert_eq!(record.browser_maker, "Google Inc");
}

#[test]
fn crawler_flag_is_set_from_a_matching_section() {
    let record = sample_catalog()
        .classify("GoogleBot/2.1 (+http://example.com/bot)")
        .expect("expected a match");
    assert!(record.is_crawler.present);
    assert!(record.is_crawler.value);
}

#[test]
fn crawler_flag_defaults_unset_for_non_crawlers() {
    let record = sample_catalog()
        .classify("Mozilla/5.0 (Windows NT 6.1) AppleWebKit/537 Chrome/37.0.1234 Safari/537.36")
        .expect("expected a match");
    assert!(record.is_crawler.present);
    assert!(!record.is_crawler.value);
}

#[test]
fn mobile_device_flag_is_inherited_through_wildcard_match() {
    let record = sample_catalog()
        .classify("Some Mobile Browser running on an iPhone")
        .expect("expected a match");
    assert!(record.is_mobile_device.value);
    assert_eq!(record.platform, "iOS");
}

#[test]
fn digit_family_capture_miss_is_treated_as_non_match_and_search_continues() {
    // `Opera/9.6*` and `Opera/9.7*` dedup into one pattern whose only
    // differential digit resolves via `matches["@6"]`/`matches["@7"]`. A UA
    // whose differential digit is neither keys a regex match with no entry
    // in `matches` — spec §8's "Family pattern where captures don't key
    // into `matches`: treated as non-match; search continues" (the
    // `None => continue` arm in `query::search_batches`). Nothing else in
    // the sample catalog matches an "Opera/9.*" UA, so the search must run
    // all the way out to the catch-all rather than stall or mis-resolve.
    let record = sample_catalog()
        .classify("Opera/9.8 (X11; Linux x86_64)")
        .expect("catch-all should still match");
    assert_eq!(record.comment, "catch all");
    assert_eq!(record.browser, "Default Browser");
}

#[test]
fn batch_prefilter_match_with_no_resolving_pattern_continues_to_next_batch() {
    // With `batch_size = 1` every pattern is its own batch, so the `Opera/9.*`
    // family's batch prefilter matches on its own but resolves nothing (same
    // capture-miss as above) — the outer `for batch in candidates` loop in
    // `query::search_batches` must move on to later batches (eventually the
    // catch-all's own batch) rather than stopping at the first batch whose
    // coarse regex matched.
    let catalog = Catalog::load(SAMPLE_INI, 1).expect("catalog must load with batch_size=1");
    let record = catalog
        .classify("Opera/9.8 (X11; Linux x86_64)")
        .expect("catch-all should still match");
    assert_eq!(record.comment, "catch all");
}

#[test]
fn unknown_ua_falls_through_to_catch_all() {
    let record = sample_catalog()
        .classify("a string that matches nothing specific")
        .expect("catch-all should always match");
    assert_eq!(record.comment, "catch all");
}

#[test]
fn empty_ua_matches_the_catch_all() {
    let record = sample_catalog()
        .classify("")
        .expect("catch-all should match empty UA");
    assert_eq!(record.comment, "catch all");
}

#[test]
fn classify_is_pure_and_repeatable() {
    let ua = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537 Chrome/38.1.2 Safari/537.36";
    let first = sample_catalog().classify(ua);
    let second = sample_catalog().classify(ua);
    assert_eq!(first.unwrap().version, second.unwrap().version);
}

#[test]
fn batch_size_does_not_change_query_results() {
    let small = Catalog::load(SAMPLE_INI, 1).unwrap();
    let large = Catalog::load(SAMPLE_INI, 1000).unwrap();
    let ua = "Mozilla/5.0 (Windows NT 6.1) AppleWebKit/537 Chrome/37.0.1234 Safari/537.36";
    let a = small.classify(ua).unwrap();
    let b = large.classify(ua).unwrap();
    assert_eq!(a.browser, b.browser);
    assert_eq!(a.version, b.version);
}

#[test]
fn zero_batch_size_is_rejected_at_load() {
    assert!(Catalog::load(SAMPLE_INI, 0).is_err());
}

#[test]
fn duplicate_section_name_is_rejected_at_load() {
    let ini = b"[A]\nComment=x\n[A]\nComment=y\n";
    assert!(Catalog::load(ini, 10).is_err());
}

#[test]
fn unknown_parent_is_rejected_at_load() {
    let ini = b"[A]\nParent=Nope\n";
    assert!(Catalog::load(ini, 10).is_err());
}

// ---------------------------------------------------------------------------
// Reference-fidelity scenarios (spec §8), gated on a real browscap catalog.
// ---------------------------------------------------------------------------

fn real_catalog() -> Option<Catalog> {
    let path = std::env::var_os("BROWSCAP_INI")?;
    Some(Catalog::load_path(path, 100).expect("BROWSCAP_INI must point at a valid catalog"))
}

#[test]
#[ignore = "requires BROWSCAP_INI pointing at a real full_php_browscap.ini"]
fn reference_chrome_on_macos() {
    let catalog = real_catalog().expect("set BROWSCAP_INI to run this test");
    let record = catalog
        .classify(
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_10_0) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/37.0.1062.110 Safari/537.36",
        )
        .expect("expected a match");
    assert_eq!(record.browser, "Chrome");
    assert_eq!(record.platform, "MacOSX");
    assert_eq!(record.version, "37.0");
    assert!(!record.is_crawler.value);
}

#[test]
#[ignore = "requires BROWSCAP_INI pointing at a real full_php_browscap.ini"]
fn reference_safari_on_ios() {
    let catalog = real_catalog().expect("set BROWSCAP_INI to run this test");
    let record = catalog
        .classify(
            "Mozilla/5.0 (iPhone; U; CPU iPhone OS 4_3_2 like Mac OS X; en-us) \
             AppleWebKit/533.17.9 (KHTML, like Gecko) Version/5.0.2 Mobile/8H7 \
             Safari/6533.18.5",
        )
        .expect("expected a match");
    assert_eq!(record.browser, "Safari");
    assert_eq!(record.platform, "iOS");
    assert!(record.is_mobile_device.value);
}

#[test]
#[ignore = "requires BROWSCAP_INI pointing at a real full_php_browscap.ini"]
fn reference_yandex_browser() {
    let catalog = real_catalog().expect("set BROWSCAP_INI to run this test");
    let record = catalog
        .classify(
            "Mozilla/5.0 (Windows NT 6.1; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) \
             Chrome/30.0.1599.12785 YaBrowser/13.12.1599.12785 Safari/537.36",
        )
        .expect("expected a match");
    assert_eq!(record.browser, "Yandex Browser");
    assert!(!record.is_crawler.value);
}

#[test]
#[ignore = "requires BROWSCAP_INI pointing at a real full_php_browscap.ini"]
fn reference_galaxy_note_chrome() {
    let catalog = real_catalog().expect("set BROWSCAP_INI to run this test");
    let record = catalog
        .classify(
            "Mozilla/5.0 (Linux; Android 4.0.4; GT-N7000 Build/IMM76D) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/39.0.2171.93 Mobile Safari/537.36",
        )
        .expect("expected a match");
    assert_eq!(record.browser, "Chrome");
    assert_eq!(record.platform, "Android");
    assert_eq!(record.device_name, "Galaxy Note");
}

#[test]
#[ignore = "requires BROWSCAP_INI pointing at a real full_php_browscap.ini"]
fn reference_firefox_general_mobile() {
    let catalog = real_catalog().expect("set BROWSCAP_INI to run this test");
    let record = catalog
        .classify("Mozilla/5.0 (Android 4.1.1; Mobile; rv:55.0) Gecko/55.0 Firefox/55.0")
        .expect("expected a match");
    assert_eq!(record.browser, "Firefox");
    assert_eq!(record.platform, "Android");
    assert_eq!(record.device_name, "general Mobile Phone");
}

#[test]
#[ignore = "requires BROWSCAP_INI pointing at a real full_php_browscap.ini"]
fn reference_ipad_is_a_tablet() {
    let catalog = real_catalog().expect("set BROWSCAP_INI to run this test");
    let record = catalog
        .classify(
            "Mozilla/5.0 (iPad; CPU OS 5_0_1 like Mac OS X) AppleWebKit/534.46 \
             (KHTML, like Gecko) Version/5.1 Mobile/9A405 Safari/7534.48.3",
        )
        .expect("expected a match");
    assert_eq!(record.device_type, "Tablet");
}
