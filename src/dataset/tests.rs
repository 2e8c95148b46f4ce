use super::*;
use crate::genome::{Chromosome, Marker};

//-----------------------------------------------------------------------------
// Helpers
//-----------------------------------------------------------------------------

/// Builds a genome map with the given marker counts.
fn genome_map(counts: &[usize]) -> GenomeMap {
    let chromosomes = counts.iter().enumerate()
        .map(|(i, count)| {
            let name = format!("{}H", i + 1);
            let mut chromosome = Chromosome::new(&name, count * 10);
            for j in 0..*count {
                chromosome.add_marker(Marker::new(&format!("{}_{}", name, j), j * 10));
            }
            chromosome
        })
        .collect();
    GenomeMap::new(chromosomes)
}

//-----------------------------------------------------------------------------
// Germplasm validation
//-----------------------------------------------------------------------------

#[test]
fn add_germplasm() {
    let mut data = DataSet::new(genome_map(&[2, 3]));
    let a = data.intern_genotype("A", None).unwrap();
    let t = data.intern_genotype("T", None).unwrap();
    data.add_germplasm("line1", vec![vec![a, t], vec![t, t, a]], None).unwrap();
    assert_eq!(data.germplasm_count(), 1);
    assert_eq!(data.germplasm_by_name("line1"), Some(0));
    assert_eq!(data.germplasm_by_name("line2"), None);
}

#[test]
fn genotype_vector_lengths_are_validated() {
    let mut data = DataSet::new(genome_map(&[2, 3]));
    let a = data.intern_genotype("A", None).unwrap();
    // Wrong number of chromosomes.
    assert!(data.add_germplasm("bad", vec![vec![a, a]], None).is_err());
    // Wrong number of markers on chromosome 1.
    assert!(data.add_germplasm("bad", vec![vec![a, a], vec![a]], None).is_err());
    assert_eq!(data.germplasm_count(), 0);
}

#[test]
fn genotype_codes_are_validated() {
    let mut data = DataSet::new(genome_map(&[1]));
    assert!(
        data.add_germplasm("bad", vec![vec![42]], None).is_err(),
        "Codes must exist in the state table"
    );
}

#[test]
fn zero_marker_chromosomes_are_allowed() {
    let mut data = DataSet::new(genome_map(&[2, 0]));
    let a = data.intern_genotype("A", None).unwrap();
    data.add_germplasm("line1", vec![vec![a, a], vec![]], None).unwrap();
    assert_eq!(data.genotype_code_at(0, 1, 0), None);
}

//-----------------------------------------------------------------------------
// Code access
//-----------------------------------------------------------------------------

#[test]
fn genotype_code_at() {
    let mut data = DataSet::new(genome_map(&[2]));
    let a = data.intern_genotype("A", None).unwrap();
    let t = data.intern_genotype("T", None).unwrap();
    data.add_germplasm("line1", vec![vec![a, t]], None).unwrap();
    assert_eq!(data.genotype_code_at(0, 0, 0), Some(a));
    assert_eq!(data.genotype_code_at(0, 0, 1), Some(t));
    assert_eq!(data.genotype_code_at(0, 0, 2), None);
    assert_eq!(data.genotype_code_at(0, 1, 0), None);
    assert_eq!(data.genotype_code_at(1, 0, 0), None);
}

//-----------------------------------------------------------------------------
// Similarity snapshot lifecycle
//-----------------------------------------------------------------------------

#[test]
fn matrix_is_stale_until_rebuilt() {
    let mut data = DataSet::new(genome_map(&[1]));
    assert!(data.similarity().is_none());
    data.rebuild_similarity();
    assert!(data.similarity().is_some());
}

#[test]
fn new_codes_mark_the_matrix_stale() {
    let mut data = DataSet::new(genome_map(&[1]));
    let a = data.intern_genotype("A", None).unwrap();
    data.rebuild_similarity();

    // Interning an existing genotype keeps the snapshot.
    data.intern_genotype("A", None).unwrap();
    assert!(data.similarity().is_some());

    // A new genotype invalidates it.
    let t = data.intern_genotype("T", None).unwrap();
    assert!(data.similarity().is_none());
    assert!(data.similarity_class_of(a, t).is_none());

    data.rebuild_similarity();
    assert_eq!(data.similarity().unwrap().size(), 3);
}

//-----------------------------------------------------------------------------
// Phenotypes
//-----------------------------------------------------------------------------

#[test]
fn set_phenotype() {
    let mut data = DataSet::new(genome_map(&[1]));
    let a = data.intern_genotype("A", None).unwrap();
    data.add_germplasm("line1", vec![vec![a]], None).unwrap();
    data.set_phenotype("line1", "height", 72.5).unwrap();
    assert_eq!(data.germplasm(0).unwrap().trait_value("height"), Some(72.5));
    assert_eq!(data.germplasm(0).unwrap().trait_value("yield"), None);
    assert_eq!(data.traits(), &["height".to_string()]);
    assert!(data.set_phenotype("missing", "height", 1.0).is_err());
}

#[test]
fn traits_are_registered_in_order() {
    let mut data = DataSet::new(genome_map(&[1]));
    let a = data.intern_genotype("A", None).unwrap();
    data.add_germplasm("line1", vec![vec![a]], None).unwrap();
    data.set_phenotype("line1", "height", 1.0).unwrap();
    data.set_phenotype("line1", "yield", 2.0).unwrap();
    data.set_phenotype("line1", "height", 3.0).unwrap();
    assert_eq!(data.traits(), &["height".to_string(), "yield".to_string()]);
}
