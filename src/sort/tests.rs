use super::*;
use crate::genome::{Chromosome, GenomeMap, Marker};

//-----------------------------------------------------------------------------
// Helpers
//-----------------------------------------------------------------------------

/// Builds a single-chromosome dataset from (name, genotype row) pairs.
fn test_dataset(rows: &[(&str, &[&str])]) -> DataSet {
    let marker_count = rows[0].1.len();
    let mut chromosome = Chromosome::new("1H", marker_count * 10);
    for i in 0..marker_count {
        chromosome.add_marker(Marker::new(&format!("m{}", i), i * 10));
    }
    let mut data = DataSet::new(GenomeMap::new(vec![chromosome]));
    for (name, raw_codes) in rows.iter() {
        let mut codes = Vec::with_capacity(raw_codes.len());
        for raw in raw_codes.iter() {
            codes.push(data.intern_genotype(raw, Some("/")).unwrap());
        }
        data.add_germplasm(name, vec![codes], None).unwrap();
    }
    data.rebuild_similarity();
    data
}

fn names_of(data: &DataSet, view: &LineView) -> Vec<String> {
    view.order().iter()
        .map(|i| data.germplasm(*i).unwrap().name().to_string())
        .collect()
}

//-----------------------------------------------------------------------------
// LineView
//-----------------------------------------------------------------------------

#[test]
fn identity_view() {
    let view = LineView::new(4);
    assert_eq!(view.len(), 4);
    assert_eq!(view.order(), &[0, 1, 2, 3]);
    assert_eq!(view.get(2), Some(2));
    assert_eq!(view.get(4), None);
}

#[test]
fn filtered_view() {
    let mut view = LineView::new(5);
    view.retain(|index| index % 2 == 0);
    assert_eq!(view.order(), &[0, 2, 4]);
    view.reset(3);
    assert_eq!(view.order(), &[0, 1, 2]);
}

//-----------------------------------------------------------------------------
// ImportOrderSort and AlphabeticSort
//-----------------------------------------------------------------------------

#[test]
fn import_order_restores_original_sequence() {
    let data = test_dataset(&[("c", &["A"]), ("a", &["T"]), ("b", &["A"])]);
    let mut view = LineView::new(data.germplasm_count());
    AlphabeticSort::new().sort(&data, &mut view).unwrap();
    assert_eq!(names_of(&data, &view), ["a", "b", "c"]);

    ImportOrderSort::new().sort(&data, &mut view).unwrap();
    assert_eq!(names_of(&data, &view), ["c", "a", "b"]);
}

#[test]
fn alphabetic_sort_is_idempotent() {
    let data = test_dataset(&[
        ("delta", &["A"]),
        ("alpha", &["T"]),
        ("charlie", &["A"]),
        ("bravo", &["G"]),
    ]);
    let mut view = LineView::new(data.germplasm_count());
    let mut sort = AlphabeticSort::new();
    sort.sort(&data, &mut view).unwrap();
    let sorted_once = view.order().to_vec();
    sort.sort(&data, &mut view).unwrap();
    assert_eq!(view.order(), sorted_once.as_slice(), "Re-sorting should not change the order");
    assert_eq!(names_of(&data, &view), ["alpha", "bravo", "charlie", "delta"]);
}

#[test]
fn alphabetic_sort_is_stable() {
    let data = test_dataset(&[("same", &["A"]), ("other", &["T"]), ("same", &["G"])]);
    let mut view = LineView::new(data.germplasm_count());
    AlphabeticSort::new().sort(&data, &mut view).unwrap();
    // The duplicate names keep their import order.
    assert_eq!(view.order(), &[1, 0, 2]);
}

//-----------------------------------------------------------------------------
// TraitSort
//-----------------------------------------------------------------------------

#[test]
fn trait_sort() {
    let mut data = test_dataset(&[("a", &["A"]), ("b", &["T"]), ("c", &["G"]), ("d", &["C"])]);
    data.set_phenotype("a", "height", 80.0).unwrap();
    data.set_phenotype("b", "height", 60.0).unwrap();
    data.set_phenotype("d", "height", 70.0).unwrap();

    let mut view = LineView::new(data.germplasm_count());
    let mut sort = TraitSort::new("height");
    sort.sort(&data, &mut view).unwrap();
    // Ascending by value; `c` has no value and sorts to the end.
    assert_eq!(names_of(&data, &view), ["b", "d", "a", "c"]);
}

#[test]
fn trait_sort_with_equal_values() {
    let mut data = test_dataset(&[("a", &["A"]), ("b", &["T"]), ("c", &["G"])]);
    for name in ["a", "b", "c"] {
        data.set_phenotype(name, "height", 50.0).unwrap();
    }
    let mut view = LineView::new(data.germplasm_count());
    TraitSort::new("height").sort(&data, &mut view).unwrap();
    assert_eq!(view.len(), 3, "Equal values must not break the sort");
}

#[test]
fn trait_sort_requires_a_trait() {
    let data = test_dataset(&[("a", &["A"])]);
    let mut view = LineView::new(1);
    let mut sort = TraitSort::default();
    assert!(sort.sort(&data, &mut view).is_err());
    sort.set_trait("height");
    assert!(sort.sort(&data, &mut view).is_ok());
}

//-----------------------------------------------------------------------------
// SimilaritySort
//-----------------------------------------------------------------------------

#[test]
fn similarity_sort_ranks_by_score() {
    let data = test_dataset(&[
        ("reference", &["A", "A", "T", "T"]),
        ("far", &["T", "T", "A", "A"]),
        ("close", &["A", "A", "T", "A"]),
        ("half", &["A", "A", "A", "A"]),
    ]);
    let mut view = LineView::new(data.germplasm_count());
    let mut sort = SimilaritySort::new("reference", &[0]);
    sort.sort(&data, &mut view).unwrap();
    assert_eq!(names_of(&data, &view), ["reference", "close", "half", "far"]);
    assert_eq!(sort.score("reference"), Some(1.0));
    assert_eq!(sort.score("close"), Some(0.75));
    assert_eq!(sort.score("half"), Some(0.5));
    assert_eq!(sort.score("far"), Some(0.0));
    assert_eq!(sort.score("unknown"), None);
}

#[test]
fn similarity_sort_is_stable_under_resort() {
    let data = test_dataset(&[
        ("reference", &["A", "T"]),
        ("x", &["A", "A"]),
        ("y", &["A", "A"]),
    ]);
    let mut view = LineView::new(data.germplasm_count());
    let mut sort = SimilaritySort::new("reference", &[0]);
    sort.sort(&data, &mut view).unwrap();
    let first = view.order().to_vec();
    sort.sort(&data, &mut view).unwrap();
    assert_eq!(view.order(), first.as_slice(), "Ranking should be stable under re-sort");
    // The tied lines keep their import order.
    assert_eq!(names_of(&data, &view), ["reference", "x", "y"]);
}

#[test]
fn similarity_sort_reference_resolved_at_sort_time() {
    let data = test_dataset(&[
        ("a", &["A", "A"]),
        ("b", &["T", "T"]),
        ("c", &["A", "T"]),
    ]);
    let mut view = LineView::new(data.germplasm_count());
    let mut sort = SimilaritySort::new("a", &[0]);
    // Reorder the view before sorting; the reference is found by name.
    AlphabeticSort::new().sort(&data, &mut view).unwrap();
    sort.sort(&data, &mut view).unwrap();
    assert_eq!(names_of(&data, &view)[0], "a");

    sort.set_comparison_line("b");
    assert_eq!(sort.score("a"), None, "Changing the reference discards old scores");
    sort.sort(&data, &mut view).unwrap();
    assert_eq!(names_of(&data, &view)[0], "b");
}

#[test]
fn similarity_sort_errors() {
    let data = test_dataset(&[("a", &["A"])]);
    let mut view = LineView::new(1);
    let mut unknown = SimilaritySort::new("nonexistent", &[0]);
    assert!(unknown.sort(&data, &mut view).is_err());

    let mut stale = SimilaritySort::new("a", &[0]);
    let mut data = data;
    data.intern_genotype("T", None).unwrap();
    assert!(
        stale.sort(&data, &mut view).is_err(),
        "Sorting against a stale matrix should fail"
    );
}

#[test]
fn similarity_sort_empty_chromosome_subset() {
    let data = test_dataset(&[("a", &["A"]), ("b", &["T"])]);
    let mut view = LineView::new(data.germplasm_count());
    let mut sort = SimilaritySort::new("a", &[]);
    sort.sort(&data, &mut view).unwrap();
    assert_eq!(sort.score("a"), Some(0.0), "An empty subset scores zero for every line");
    assert_eq!(sort.score("b"), Some(0.0));
}
