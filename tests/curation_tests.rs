mod common;

use common::{row_with_score, synthetic_table};
use rstest::rstest;
use seqforge::curation::slicer::{check_range, slice_indices};
use seqforge::curation::{
    annotate_gaps, annotate_gaps_against, filter_stratified, filter_threshold, slice, Difficulty,
    DifficultyFilter, FilterKind,
};
use seqforge::error::SeqForgeError;
use seqforge::table::hamming_distance;
use std::collections::HashSet;
use strum::IntoEnumIterator;

#[test]
fn test_top_percentile_is_best_row() {
    let table = synthetic_table(100, 30, 1);
    let top = slice(&table, (0.99, 1.0)).unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top.records()[0].score, 100.0);
}

#[test]
fn test_gap_of_worst_row_is_distance_to_best() {
    let table = synthetic_table(100, 30, 2);
    let annotated = annotate_gaps(&table).unwrap();

    let worst = row_with_score(&table, 1.0);
    let best = row_with_score(&table, 100.0);
    let expected = hamming_distance(
        &table.records()[worst].sequence,
        &table.records()[best].sequence,
    )
    .unwrap();

    assert_eq!(annotated.gaps().unwrap()[worst], expected);
    assert_eq!(annotated.gaps().unwrap()[best], 0);
}

#[test]
fn test_gap_bounds() {
    let table = synthetic_table(300, 25, 3);
    let annotated = annotate_gaps(&table).unwrap();
    let gaps = annotated.gaps().unwrap();

    assert_eq!(gaps.len(), table.len());
    assert!(gaps.iter().all(|&g| g <= table.sequence_len()));

    // Reference rows sit at distance zero from themselves.
    let reference: HashSet<Vec<u8>> = slice(&table, (0.99, 1.0))
        .unwrap()
        .iter()
        .map(|r| r.sequence.clone())
        .collect();
    for (rec, &gap) in table.iter().zip(gaps) {
        if reference.contains(&rec.sequence) {
            assert_eq!(gap, 0);
        }
    }
}

#[test]
fn test_stratified_scenario() {
    let table = synthetic_table(100, 30, 4);
    let mut rng = fastrand::Rng::with_seed(42);
    let out = filter_stratified(&table, (0.2, 0.4), 5, 5, &mut rng).unwrap();

    assert_eq!(out.len(), 10);
    let scores = out.scores();
    assert_eq!(&scores[..5], &[40.0, 39.0, 38.0, 37.0, 36.0]);

    let oracle: HashSet<u64> = scores[5..].iter().map(|s| *s as u64).collect();
    assert_eq!(oracle.len(), 5, "oracle rows drawn with replacement");
    assert!(oracle.iter().all(|&s| (21..=35).contains(&s)));
}

#[test]
fn test_stratified_is_seeded() {
    let table = synthetic_table(500, 20, 5);
    let a = filter_stratified(&table, (0.1, 0.5), 10, 50, &mut fastrand::Rng::with_seed(7)).unwrap();
    let b = filter_stratified(&table, (0.1, 0.5), 10, 50, &mut fastrand::Rng::with_seed(7)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_stratified_out_of_range() {
    let table = synthetic_table(100, 20, 6);
    let mut rng = fastrand::Rng::with_seed(42);
    // (0.2, 0.4) holds 20 rows
    let res = filter_stratified(&table, (0.2, 0.4), 15, 6, &mut rng);
    assert!(matches!(
        res,
        Err(SeqForgeError::SampleSize {
            requested: 6,
            available: 5
        })
    ));
}

#[test]
fn test_threshold_keeps_only_distant_rows() {
    let table = synthetic_table(400, 30, 8);
    let annotated = annotate_gaps(&table).unwrap();
    let out = filter_threshold(&annotated, (0.2, 0.4), 6).unwrap();

    assert!(out.gaps().unwrap().iter().all(|&g| g >= 6));
    assert!(out.scores().iter().all(|&s| (81.0..=160.0).contains(&s)));
}

#[rstest]
#[case(Difficulty::Medium)]
#[case(Difficulty::Hard)]
fn test_stratified_presets_on_large_table(#[case] difficulty: Difficulty) {
    let table = synthetic_table(2000, 20, 9);
    let filter = DifficultyFilter::preset(FilterKind::Stratified, difficulty);
    let out = filter.apply(&table, &mut fastrand::Rng::with_seed(42)).unwrap();
    assert_eq!(out.len(), 128 + 256);
}

#[rstest]
#[case(Difficulty::Medium, 6)]
#[case(Difficulty::Hard, 7)]
fn test_threshold_presets(#[case] difficulty: Difficulty, #[case] min_gap: usize) {
    let table = annotate_gaps(&synthetic_table(500, 30, 10)).unwrap();
    let filter = DifficultyFilter::preset(FilterKind::Threshold, difficulty);
    let out = filter.apply(&table, &mut fastrand::Rng::with_seed(42)).unwrap();
    assert!(out.gaps().unwrap().iter().all(|&g| g >= min_gap));
}

#[test]
fn test_reference_gaps_bounded_by_lower_subset_gaps() {
    let table = synthetic_table(500, 30, 17);
    let reference_idx = slice_indices(&table, (0.99, 1.0)).unwrap();
    let lower_idx = slice_indices(&table, (0.0, 0.5)).unwrap();
    let reference = table.select(&reference_idx);
    let lower = table.select(&lower_idx);

    let against_ref = annotate_gaps_against(&table, &reference).unwrap();
    let against_lower = annotate_gaps_against(&table, &lower).unwrap();
    let ref_gaps = against_ref.gaps().unwrap();
    let lower_gaps = against_lower.gaps().unwrap();

    // Reference rows are never further from the reference than from a
    // disjoint, lower-scoring subset.
    for &i in &reference_idx {
        assert!(ref_gaps[i] <= lower_gaps[i]);
    }

    // Growing the reference set can only shrink gaps.
    let combined_idx: Vec<usize> = reference_idx.iter().chain(&lower_idx).copied().collect();
    let against_both = annotate_gaps_against(&table, &table.select(&combined_idx)).unwrap();
    for (i, &g) in against_both.gaps().unwrap().iter().enumerate() {
        assert!(g <= ref_gaps[i]);
        assert!(g <= lower_gaps[i]);
    }
}

#[test]
fn test_every_preset_is_valid() {
    for kind in FilterKind::iter() {
        assert_eq!(kind.to_string().parse::<FilterKind>().unwrap(), kind);
        for difficulty in Difficulty::iter() {
            assert_eq!(difficulty.to_string().parse::<Difficulty>().unwrap(), difficulty);

            let filter = DifficultyFilter::preset(kind, difficulty);
            assert_eq!(filter.needs_gaps(), kind == FilterKind::Threshold);
            let range = match filter {
                DifficultyFilter::Threshold(p) => p.range,
                DifficultyFilter::Stratified(p) => p.range,
            };
            assert!(check_range(range).is_ok(), "{} / {}", kind, difficulty);
        }
    }
}
