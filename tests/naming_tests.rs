//! Integration tests for canonical name synthesis and mark encoding.

use std::path::PathBuf;

use dupefold::naming::{
    apply_marks, count_marks, most_common_long_prefix, synthesize, MarkPolicy, MAX_MARKS,
};

fn stems(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn paths(items: &[&str]) -> Vec<PathBuf> {
    items.iter().map(PathBuf::from).collect()
}

#[test]
fn test_most_common_long_prefix_tie_break() {
    // The recurring prefix beats shorter sub-prefixes like "long".
    let input = stems(&[
        "long prefix here",
        "long prefix here 1",
        "long prefix here 2",
        "zed",
    ]);
    assert_eq!(most_common_long_prefix(&input), "long prefix here");
}

#[test]
fn test_token_delta_merging_skips_copy_conventions() {
    let group = paths(&[
        "/pics/Vacation Photo.jpg",
        "/pics/Vacation Photo copy.jpg",
        "/pics/Vacation Photo (2).jpg",
    ]);
    let name = synthesize(&group, '!');

    // "copy" and the bare digit delta are duplication conventions, not
    // content, so the base survives untouched.
    assert_eq!(name.base, "Vacation Photo");
    assert_eq!(name.extension, ".jpg");
}

#[test]
fn test_mark_monotonicity_image_mode() {
    // k files with no pre-existing indicators -> exactly k - 1 glyphs.
    for k in 2..=10usize {
        let group: Vec<PathBuf> = (0..k)
            .map(|i| PathBuf::from(format!("/pics/photo {i:02}x.jpg")))
            .collect();
        let name = synthesize(&group, '!');
        assert_eq!(name.marks, 0, "no carryover expected for k={k}");

        let encoded = apply_marks(
            &name.base,
            &name.extension,
            k,
            name.marks,
            MarkPolicy::Additive,
            '!',
        );
        let glyphs = encoded.chars().filter(|&c| c == '!').count();
        assert_eq!(glyphs, k - 1, "expected {} marks in {encoded:?}", k - 1);
    }
}

#[test]
fn test_overflow_encoding_is_bounded() {
    let encoded = apply_marks("photo", ".jpg", 2, 14, MarkPolicy::Additive, '!');
    assert_eq!(encoded, "photo !!15!!.jpg");
    // Never a run of 15 raw glyphs.
    assert_eq!(count_marks(&encoded, '!'), 2);
}

#[test]
fn test_carryover_marks_detected_and_recombined() {
    let group = paths(&["/pics/party.jpg", "/pics/party !!!.jpg"]);
    let name = synthesize(&group, '!');
    assert_eq!(name.marks, 3);

    // Image mode adds: 1 (this group) + 3 (carryover) = 4.
    let encoded = apply_marks(&name.base, &name.extension, 2, name.marks, MarkPolicy::Additive, '!');
    assert_eq!(encoded, "party !!!!.jpg");

    // Video-style high-water keeps the larger of the two.
    let encoded = apply_marks(&name.base, &name.extension, 2, name.marks, MarkPolicy::HighWater, '!');
    assert_eq!(encoded, "party !!!.jpg");
}

#[test]
fn test_length_bound_holds_for_oversized_stems() {
    let long_a = "a".repeat(300);
    let long_b = format!("{long_a} extra words to merge");
    let group = vec![
        PathBuf::from(format!("/pics/{long_a}.jpeg")),
        PathBuf::from(format!("/pics/{long_b}.jpeg")),
    ];
    let name = synthesize(&group, '!');

    assert!(
        name.base.chars().count() + name.extension.chars().count() <= 253,
        "base + extension exceeded 253 chars"
    );
    assert!(name.base.chars().count() + name.extension.chars().count() <= 253 - MAX_MARKS);
}

#[test]
fn test_divergent_names_merge_in_encounter_order() {
    let group = paths(&[
        "/pics/lake trip.jpg",
        "/pics/lake trip boat.jpg",
        "/pics/lake trip evening.jpg",
    ]);
    let name = synthesize(&group, '!');
    assert_eq!(name.base, "lake trip boat evening");
}

#[test]
fn test_rootiest_directory_selected() {
    let group = paths(&[
        "/deep/nest/photo.jpg",
        "/top/photo.jpg",
        "/also/photo.jpg",
    ]);
    let name = synthesize(&group, '!');
    // Shortest depth first, then lexicographic: /also beats /top.
    assert_eq!(name.directory, PathBuf::from("/also"));
}

#[test]
fn test_synthesis_is_deterministic() {
    let group = paths(&[
        "/pics/beach day.jpg",
        "/pics/beach day copy 2.jpg",
        "/pics/beach day sunset.jpg",
    ]);
    let first = synthesize(&group, '!');
    let second = synthesize(&group, '!');
    assert_eq!(first, second);
}
