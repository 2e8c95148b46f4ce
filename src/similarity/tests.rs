use super::*;
use crate::genome::{Chromosome, GenomeMap, Marker};
use crate::dataset::DataSet;

//-----------------------------------------------------------------------------
// Helpers
//-----------------------------------------------------------------------------

/// Builds a state table with homozygous A, T and heterozygous A/T, T/G.
fn test_table() -> (StateTable, [u16; 4]) {
    let mut table = StateTable::new();
    let a = table.intern("A", None).unwrap();
    let t = table.intern("T", None).unwrap();
    let at = table.intern("A/T", Some("/")).unwrap();
    let tg = table.intern("T/G", Some("/")).unwrap();
    (table, [a, t, at, tg])
}

/// Builds a dataset with one chromosome of `names.len()` lines, one line per
/// raw genotype row.
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

//-----------------------------------------------------------------------------
// Classification
//-----------------------------------------------------------------------------

#[test]
fn diagonal_is_full_match() {
    let (table, codes) = test_table();
    let matrix = SimilarityMatrix::new(&table);
    for code in codes.iter() {
        assert_eq!(
            matrix.class_of(*code, *code), SimilarityClass::FullMatch,
            "Code {} should fully match itself", code
        );
    }
    // Except for the missing code.
    let missing = StateTable::MISSING_CODE;
    assert_eq!(matrix.class_of(missing, missing), SimilarityClass::Missing);
}

#[test]
fn missing_row_and_column() {
    let (table, codes) = test_table();
    let matrix = SimilarityMatrix::new(&table);
    let missing = StateTable::MISSING_CODE;
    for code in codes.iter() {
        assert_eq!(matrix.class_of(*code, missing), SimilarityClass::Missing);
        assert_eq!(matrix.class_of(missing, *code), SimilarityClass::Missing);
    }
}

#[test]
fn homozygous_pairs() {
    let (table, [a, t, _, _]) = test_table();
    let matrix = SimilarityMatrix::new(&table);
    assert_eq!(matrix.class_of(a, t), SimilarityClass::Mismatch);
    assert_eq!(matrix.class_of(t, a), SimilarityClass::Mismatch);
}

#[test]
fn homozygous_against_heterozygous() {
    let (table, [a, t, at, tg]) = test_table();
    let matrix = SimilarityMatrix::new(&table);
    // A shared allele counts as a full match.
    assert_eq!(matrix.class_of(a, at), SimilarityClass::FullMatch);
    assert_eq!(matrix.class_of(t, at), SimilarityClass::FullMatch);
    assert_eq!(matrix.class_of(t, tg), SimilarityClass::FullMatch);
    assert_eq!(matrix.class_of(a, tg), SimilarityClass::Mismatch);
}

#[test]
fn heterozygous_against_homozygous() {
    let (table, [a, t, at, tg]) = test_table();
    let matrix = SimilarityMatrix::new(&table);
    assert_eq!(matrix.class_of(at, a), SimilarityClass::Het1Match);
    assert_eq!(matrix.class_of(at, t), SimilarityClass::Het2Match);
    assert_eq!(matrix.class_of(tg, a), SimilarityClass::Mismatch);
}

#[test]
fn heterozygous_pairs() {
    let (table, [_, _, at, tg]) = test_table();
    let matrix = SimilarityMatrix::new(&table);
    // A/T against T/G: allele 1 does not match, allele 2 does.
    assert_eq!(matrix.class_of(at, tg), SimilarityClass::Het2Match);
    // T/G against A/T: allele 1 matches the reference allele 2.
    assert_eq!(matrix.class_of(tg, at), SimilarityClass::Het1Match);
}

#[test]
fn first_allele_takes_precedence() {
    let mut table = StateTable::new();
    let at = table.intern("A/T", Some("/")).unwrap();
    let ta = table.intern("T/A", Some("/")).unwrap();
    let matrix = SimilarityMatrix::new(&table);
    // Both alleles match; allele 1 is checked first.
    assert_eq!(matrix.class_of(at, ta), SimilarityClass::Het1Match);
    assert_eq!(matrix.class_of(ta, at), SimilarityClass::Het1Match);
}

#[test]
fn out_of_range_codes() {
    let (table, _) = test_table();
    let matrix = SimilarityMatrix::new(&table);
    assert_eq!(matrix.class_of(100, 0), SimilarityClass::Missing);
    assert_eq!(matrix.class_of(0, 100), SimilarityClass::Missing);
}

#[test]
fn class_scores() {
    assert_eq!(SimilarityClass::FullMatch.score(), 1.0);
    assert_eq!(SimilarityClass::Het1Match.score(), 0.5);
    assert_eq!(SimilarityClass::Het2Match.score(), 0.5);
    assert_eq!(SimilarityClass::Mismatch.score(), 0.0);
    assert_eq!(SimilarityClass::Missing.score(), 0.0);
}

//-----------------------------------------------------------------------------
// Germplasm scoring
//-----------------------------------------------------------------------------

#[test]
fn self_similarity_is_one() {
    let data = test_dataset(&[("line1", &["A", "T", "A/T", "G"])]);
    let score = data.similarity_score(0, 0, &data.all_chromosomes()).unwrap();
    assert_eq!(score, 1.0, "A complete line should fully match itself");
}

#[test]
fn score_aggregation() {
    let data = test_dataset(&[
        ("reference", &["A", "T", "A", "T"]),
        ("compared", &["A", "T", "T", "A/T"]),
    ]);
    // full + full + mismatch + het = (1 + 1 + 0 + 0.5) / 4
    let score = data.similarity_score(0, 1, &[0]).unwrap();
    assert_eq!(score, 0.625);
}

#[test]
fn missing_data_scores_zero() {
    let data = test_dataset(&[
        ("reference", &["A", "T"]),
        ("compared", &["-", "T"]),
    ]);
    let score = data.similarity_score(0, 1, &[0]).unwrap();
    assert_eq!(score, 0.5, "Missing markers should contribute nothing");
}

#[test]
fn empty_chromosome_subset() {
    let data = test_dataset(&[("line1", &["A", "T"])]);
    let score = data.similarity_score(0, 0, &[]).unwrap();
    assert_eq!(score, 0.0, "An empty subset should score zero");
}

#[test]
fn invalid_chromosomes_are_skipped() {
    let data = test_dataset(&[("line1", &["A", "T"])]);
    let score = data.similarity_score(0, 0, &[0, 7]).unwrap();
    assert_eq!(score, 1.0);
}
