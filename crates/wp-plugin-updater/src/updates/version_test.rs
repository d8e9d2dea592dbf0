//! Tests for version ordering.

use std::cmp::Ordering;

use super::version::{compare, is_newer};

#[test]
fn newer_minor_is_an_update() {
    assert!(is_newer("1.1.0", "1.0.0"));
    assert!(is_newer("1.2.0", "1.1.9"));
}

#[test]
fn older_remote_is_not_an_update() {
    assert!(!is_newer("1.9.9", "2.0.0"));
}

#[test]
fn missing_trailing_zero_is_equal() {
    assert_eq!(compare("1.0.0", "1.0"), Ordering::Equal);
    assert_eq!(compare("1.2", "1.2.0"), Ordering::Equal);
    assert!(!is_newer("1.0.0", "1.0"));
    assert!(!is_newer("1.0", "1.0.0"));
}

#[test]
fn equal_versions_are_not_an_update() {
    assert!(!is_newer("3.1.0", "3.1.0"));
    assert!(!is_newer(" 3.1.0 ", "3.1.0"));
}

#[test]
fn segments_compare_numerically() {
    assert!(is_newer("1.10.0", "1.9.0"));
    assert!(is_newer("1.0.10", "1.0.9"));
    assert!(is_newer("2.10", "2.9"));
    assert_eq!(compare("1.01", "1.1"), Ordering::Equal);
}

#[test]
fn extra_numeric_segment_is_newer() {
    assert!(is_newer("3.4.1.7", "3.4.1"));
    assert!(!is_newer("3.4.1", "3.4.1.7"));
}

#[test]
fn prereleases_sort_before_the_release() {
    assert!(is_newer("1.0.0", "1.0.0-beta.2"));
    assert!(is_newer("1.0.0-rc.1", "1.0.0-beta.2"));
    assert!(is_newer("1.0", "1.0-beta"));
    assert!(is_newer("1.0RC1", "1.0beta3"));
    assert!(is_newer("1.0beta", "1.0alpha"));
    assert!(is_newer("1.0alpha", "1.0dev"));
}

#[test]
fn patch_level_sorts_after_the_release() {
    assert!(is_newer("1.0pl1", "1.0"));
    assert!(!is_newer("1.0", "1.0pl1"));
}

#[test]
fn build_metadata_is_ignored() {
    assert_eq!(compare("1.2.3+build.7", "1.2.3+build.9"), Ordering::Equal);
    assert!(!is_newer("1.2.3+20240101", "1.2.3"));
}

#[test]
fn leading_v_is_ignored() {
    assert_eq!(compare("v2.0.0", "2.0.0"), Ordering::Equal);
    assert!(is_newer("v2.1", "2.0.9"));
}

#[test]
fn huge_segments_do_not_overflow() {
    assert!(is_newer("1.99999999999999999999999", "1.9999999999999999999999"));
}

#[test]
fn unknown_words_fall_back_to_string_order() {
    assert!(is_newer("1.0-hotfixb", "1.0-hotfixa"));
    // An unknown word still ranks below a known pre-release word
    assert!(is_newer("1.0-dev", "1.0-custom"));
}

#[test]
fn garbage_against_a_real_version_is_not_an_update() {
    assert!(!is_newer("unknown", "1.0.0"));
    assert!(!is_newer("", "1.0.0"));
}

#[test]
fn semver_shaped_prereleases_use_word_ranks_and_numeric_counters() {
    assert!(is_newer("1.0.0-beta10", "1.0.0-beta2"));
    assert!(is_newer("1.0.0-alpha", "1.0.0-dev"));
    assert!(is_newer("1.0.0-pl1", "1.0.0"));
    assert!(!is_newer("1.0.0", "1.0.0-pl1"));
}

#[test]
fn ordering_does_not_depend_on_semver_shape() {
    let pairs = [
        ("1.0.0-beta10", "1.0.0-beta2", "1.0beta10", "1.0beta2"),
        ("1.0.0-pl1", "1.0.0", "1.0-pl1", "1.0"),
        ("1.0.0-rc.1", "1.0.0-alpha", "1.0rc1", "1.0alpha"),
    ];
    for (strict_a, strict_b, loose_a, loose_b) in pairs {
        assert_eq!(compare(strict_a, strict_b), compare(loose_a, loose_b), "{strict_a} vs {strict_b}");
    }
}
