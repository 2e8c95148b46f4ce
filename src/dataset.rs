//! Germplasm lines and the dataset context object.
//!
//! A [`DataSet`] owns everything derived from one imported dataset: the genome
//! map, the state table, the germplasm lines, and the current similarity
//! matrix snapshot.
//! The similarity matrix is rebuilt wholesale whenever the state table has
//! grown: a new matrix is built and then swapped in, so readers never observe
//! a partially built matrix.

use crate::genome::GenomeMap;
use crate::genotype::StateTable;
use crate::similarity::{SimilarityClass, SimilarityMatrix};

use std::collections::HashMap;

#[cfg(test)]
mod tests;

//-----------------------------------------------------------------------------

/// A named germplasm line with genotype codes for every marker and optional
/// phenotype values.
///
/// The codes are stored per chromosome, one code per marker, drawn from the
/// dataset's shared [`StateTable`].
#[derive(Clone, Debug, PartialEq)]
pub struct Germplasm {
    name: String,

    // Genotype codes, indexed by (chromosome, marker).
    genotypes: Vec<Vec<u16>>,

    // Trait values by trait name.
    phenotype: HashMap<String, f64>,
}

impl Germplasm {
    /// Returns the name of the line.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the genotype code at the given marker, or [`None`] if the
    /// position is out of range.
    #[inline]
    pub fn code_at(&self, chromosome: usize, marker: usize) -> Option<u16> {
        self.genotypes.get(chromosome)?.get(marker).copied()
    }

    /// Returns the genotype codes for the given chromosome, or [`None`] if
    /// there is no such chromosome.
    #[inline]
    pub fn chromosome_codes(&self, chromosome: usize) -> Option<&[u16]> {
        self.genotypes.get(chromosome).map(|v| v.as_slice())
    }

    /// Returns the value of the given trait, or [`None`] if the line does not
    /// have it.
    pub fn trait_value(&self, name: &str) -> Option<f64> {
        self.phenotype.get(name).copied()
    }
}

//-----------------------------------------------------------------------------

/// The dataset-scoped context object.
///
/// Owns the genome map, the state table, the germplasm lines, and the current
/// [`SimilarityMatrix`] snapshot.
/// Interning new genotypes or adding lines marks the matrix stale; it stays
/// unavailable until [`DataSet::rebuild_similarity`] builds and swaps in a new
/// one.
///
/// # Examples
///
/// ```
/// use geno_grid::{Chromosome, DataSet, GenomeMap, Marker};
///
/// let mut chromosome = Chromosome::new("1H", 200);
/// chromosome.add_marker(Marker::new("m1", 0));
/// chromosome.add_marker(Marker::new("m2", 100));
/// let mut data = DataSet::new(GenomeMap::new(vec![chromosome]));
///
/// let a = data.intern_genotype("A", None).unwrap();
/// let t = data.intern_genotype("T", None).unwrap();
/// data.add_germplasm("line1", vec![vec![a, t]], None).unwrap();
///
/// assert!(data.similarity().is_none(), "The matrix is stale after interning");
/// data.rebuild_similarity();
/// assert!(data.similarity().is_some());
/// assert_eq!(data.genotype_code_at(0, 0, 1), Some(t));
/// ```
#[derive(Clone, Debug)]
pub struct DataSet {
    genome: GenomeMap,
    states: StateTable,
    germplasm: Vec<Germplasm>,

    // Trait names in first-seen order.
    traits: Vec<String>,

    // Current similarity matrix snapshot; `None` while stale.
    similarity: Option<SimilarityMatrix>,
}

impl DataSet {
    /// Creates an empty dataset over the given genome map.
    pub fn new(genome: GenomeMap) -> Self {
        DataSet {
            genome,
            states: StateTable::new(),
            germplasm: Vec::new(),
            traits: Vec::new(),
            similarity: None,
        }
    }

    /// Returns the genome map.
    pub fn genome(&self) -> &GenomeMap {
        &self.genome
    }

    /// Returns the state table.
    pub fn states(&self) -> &StateTable {
        &self.states
    }

    /// Returns the number of germplasm lines.
    #[inline]
    pub fn germplasm_count(&self) -> usize {
        self.germplasm.len()
    }

    /// Returns the germplasm line at the given index, or [`None`] if there is
    /// no such line.
    #[inline]
    pub fn germplasm(&self, index: usize) -> Option<&Germplasm> {
        self.germplasm.get(index)
    }

    /// Returns the index of the germplasm line with the given name, or
    /// [`None`] if there is no such line.
    pub fn germplasm_by_name(&self, name: &str) -> Option<usize> {
        self.germplasm.iter().position(|g| g.name() == name)
    }

    /// Returns the trait names in first-seen order.
    pub fn traits(&self) -> &[String] {
        &self.traits
    }

    /// Interns a raw genotype string in the state table and returns its code.
    ///
    /// Marks the similarity matrix stale when a new code is created.
    /// Malformed strings propagate a parse error to the caller, which decides
    /// between aborting the import and substituting missing data.
    pub fn intern_genotype(&mut self, raw: &str, separator: Option<&str>) -> Result<u16, String> {
        let before = self.states.len();
        let code = self.states.intern(raw, separator)?;
        if self.states.len() != before {
            self.similarity = None;
        }
        Ok(code)
    }

    /// Adds a germplasm line with the given per-chromosome genotype codes.
    ///
    /// Each chromosome's code vector must be exactly as long as that
    /// chromosome's marker list, and every code must exist in the state table.
    pub fn add_germplasm(
        &mut self,
        name: &str,
        genotypes: Vec<Vec<u16>>,
        phenotype: Option<HashMap<String, f64>>,
    ) -> Result<(), String> {
        if genotypes.len() != self.genome.chromosome_count() {
            return Err(format!(
                "Line {}: expected codes for {} chromosomes, got {}",
                name, self.genome.chromosome_count(), genotypes.len()
            ));
        }
        for (chromosome, codes) in genotypes.iter().enumerate() {
            let expected = self.genome.marker_count(chromosome).unwrap_or(0);
            if codes.len() != expected {
                return Err(format!(
                    "Line {}: expected {} codes on chromosome {}, got {}",
                    name, expected, chromosome, codes.len()
                ));
            }
            if let Some(code) = codes.iter().find(|c| **c as usize >= self.states.len()) {
                return Err(format!("Line {}: unknown genotype code {}", name, code));
            }
        }
        let phenotype = phenotype.unwrap_or_default();
        for name in phenotype.keys() {
            self.register_trait(name);
        }
        self.germplasm.push(Germplasm { name: name.to_string(), genotypes, phenotype });
        Ok(())
    }

    /// Sets a trait value on the germplasm line with the given name.
    ///
    /// Returns an error if there is no such line.
    pub fn set_phenotype(&mut self, line: &str, trait_name: &str, value: f64) -> Result<(), String> {
        let index = self.germplasm_by_name(line)
            .ok_or_else(|| format!("Unknown germplasm line {}", line))?;
        self.register_trait(trait_name);
        self.germplasm[index].phenotype.insert(trait_name.to_string(), value);
        Ok(())
    }

    /// Returns the genotype code at the given position, or [`None`] if the
    /// position is out of range.
    #[inline]
    pub fn genotype_code_at(&self, germplasm: usize, chromosome: usize, marker: usize) -> Option<u16> {
        self.germplasm.get(germplasm)?.code_at(chromosome, marker)
    }

    /// Returns the current similarity matrix, or [`None`] if it is stale.
    pub fn similarity(&self) -> Option<&SimilarityMatrix> {
        self.similarity.as_ref()
    }

    /// Builds a new similarity matrix from the current state table and swaps
    /// it in.
    pub fn rebuild_similarity(&mut self) {
        let matrix = SimilarityMatrix::new(&self.states);
        self.similarity = Some(matrix);
    }

    /// Returns the classification of two genotype codes, or [`None`] if the
    /// matrix is stale.
    pub fn similarity_class_of(&self, genotype: u16, reference: u16) -> Option<SimilarityClass> {
        Some(self.similarity.as_ref()?.class_of(genotype, reference))
    }

    /// Returns the similarity score of line `compared` against line
    /// `reference` over the given chromosomes, or [`None`] if either index is
    /// out of range or the matrix is stale.
    pub fn similarity_score(
        &self,
        reference: usize,
        compared: usize,
        chromosomes: &[usize],
    ) -> Option<f64> {
        let matrix = self.similarity.as_ref()?;
        let reference = self.germplasm.get(reference)?;
        let compared = self.germplasm.get(compared)?;
        Some(matrix.similarity_score(reference, compared, chromosomes))
    }

    /// Returns the indexes of all chromosomes, for whole-genome scoring.
    pub fn all_chromosomes(&self) -> Vec<usize> {
        (0..self.genome.chromosome_count()).collect()
    }

    fn register_trait(&mut self, name: &str) {
        if !self.traits.iter().any(|t| t == name) {
            self.traits.push(name.to_string());
        }
    }
}

//-----------------------------------------------------------------------------
