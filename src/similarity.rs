//! Pairwise genotype similarity classification and germplasm scoring.
//!
//! A [`SimilarityMatrix`] precomputes how any two genotype codes of a
//! [`StateTable`] relate.
//! The matrix is built once per state table snapshot and read-only afterwards:
//! when the table gains new codes, a new matrix is built and swapped in.
//! The matrix size is bounded by the number of distinct genotypes in the
//! dataset, not by the number of germplasm lines, so the O(N²) construction
//! stays cheap even for large datasets.
//!
//! [`SimilarityMatrix::similarity_score`] aggregates the per-marker
//! classifications of two germplasm lines into a score in `[0, 1]`, which
//! drives both similarity coloring and similarity sorting.

use crate::dataset::Germplasm;
use crate::genotype::{Genotype, StateTable};

use std::fmt::Display;

#[cfg(test)]
mod tests;

//-----------------------------------------------------------------------------

/// Classification of a genotype code against a reference code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SimilarityClass {
    /// At least one of the genotypes is missing.
    Missing,

    /// The genotypes share no alleles.
    Mismatch,

    /// The genotypes are equal, or a homozygous genotype shares its allele
    /// with a heterozygous reference.
    FullMatch,

    /// A heterozygous genotype shares its first allele with the reference.
    Het1Match,

    /// A heterozygous genotype shares its second allele with the reference.
    Het2Match,
}

impl SimilarityClass {
    /// Returns the per-marker score contribution of the classification.
    #[inline]
    pub fn score(self) -> f64 {
        match self {
            SimilarityClass::FullMatch => 1.0,
            SimilarityClass::Het1Match | SimilarityClass::Het2Match => 0.5,
            SimilarityClass::Missing | SimilarityClass::Mismatch => 0.0,
        }
    }
}

impl Display for SimilarityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SimilarityClass::Missing => write!(f, "missing"),
            SimilarityClass::Mismatch => write!(f, "mismatch"),
            SimilarityClass::FullMatch => write!(f, "full match"),
            SimilarityClass::Het1Match => write!(f, "het allele 1 match"),
            SimilarityClass::Het2Match => write!(f, "het allele 2 match"),
        }
    }
}

//-----------------------------------------------------------------------------

/// A precomputed N×N classification of all genotype code pairs.
///
/// Cell `(i, j)` classifies code `i` against reference code `j`.
/// The classification rule, applied uniformly:
///
/// 1. If either genotype is missing, the cell is [`SimilarityClass::Missing`].
/// 2. If `i == j`, the cell is [`SimilarityClass::FullMatch`].
/// 3. Homozygous `i` against heterozygous `j` is a full match if the single
///    allele equals either of the reference alleles.
/// 4. Heterozygous `i` is classified by its first matching allele, checking
///    allele 1 before allele 2 against the reference alleles.
/// 5. Everything else is a [`SimilarityClass::Mismatch`].
///
/// # Examples
///
/// ```
/// use geno_grid::{SimilarityClass, SimilarityMatrix, StateTable};
///
/// let mut table = StateTable::new();
/// let a = table.intern("A", None).unwrap();
/// let t = table.intern("T", None).unwrap();
/// let het = table.intern("A/T", Some("/")).unwrap();
///
/// let matrix = SimilarityMatrix::new(&table);
/// assert_eq!(matrix.class_of(a, a), SimilarityClass::FullMatch);
/// assert_eq!(matrix.class_of(a, t), SimilarityClass::Mismatch);
/// assert_eq!(matrix.class_of(a, het), SimilarityClass::FullMatch);
/// assert_eq!(matrix.class_of(het, a), SimilarityClass::Het1Match);
/// assert_eq!(matrix.class_of(het, t), SimilarityClass::Het2Match);
/// assert_eq!(matrix.class_of(a, StateTable::MISSING_CODE), SimilarityClass::Missing);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimilarityMatrix {
    size: usize,
    classes: Vec<SimilarityClass>,
}

impl SimilarityMatrix {
    /// Builds the classification matrix for the given state table.
    pub fn new(states: &StateTable) -> Self {
        let size = states.len();
        let mut classes = Vec::with_capacity(size * size);
        for (i, genotype) in states.iter().enumerate() {
            for (j, reference) in states.iter().enumerate() {
                classes.push(Self::classify(genotype, reference, i == j));
            }
        }
        SimilarityMatrix { size, classes }
    }

    /// Returns the number of genotype codes covered by the matrix.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the classification of code `genotype` against code `reference`.
    ///
    /// Codes outside the matrix classify as [`SimilarityClass::Missing`].
    #[inline]
    pub fn class_of(&self, genotype: u16, reference: u16) -> SimilarityClass {
        let (i, j) = (genotype as usize, reference as usize);
        if i >= self.size || j >= self.size {
            return SimilarityClass::Missing;
        }
        self.classes[i * self.size + j]
    }

    fn classify(genotype: &Genotype, reference: &Genotype, equal: bool) -> SimilarityClass {
        if genotype.is_missing() || reference.is_missing() {
            return SimilarityClass::Missing;
        }
        if equal {
            return SimilarityClass::FullMatch;
        }
        if genotype.is_homozygous() {
            // Against a heterozygous reference, a shared allele is as good as
            // an equal genotype. Homozygous references were handled above.
            if !reference.is_homozygous()
                && (genotype.allele1() == reference.allele1()
                    || genotype.allele1() == reference.allele2())
            {
                return SimilarityClass::FullMatch;
            }
            return SimilarityClass::Mismatch;
        }
        // Heterozygous genotype: the first matching allele decides the class.
        if genotype.allele1() == reference.allele1() || genotype.allele1() == reference.allele2() {
            return SimilarityClass::Het1Match;
        }
        if genotype.allele2() == reference.allele1() || genotype.allele2() == reference.allele2() {
            return SimilarityClass::Het2Match;
        }
        SimilarityClass::Mismatch
    }

    /// Returns the similarity score of `compared` against `reference` over the
    /// given chromosomes.
    ///
    /// The score is the mean per-marker score over every marker of every
    /// chromosome in the subset, in `[0, 1]`.
    /// Returns 0.0 if the subset is empty or contains no markers.
    /// Chromosome indexes outside either germplasm are skipped.
    pub fn similarity_score(
        &self,
        reference: &Germplasm,
        compared: &Germplasm,
        chromosomes: &[usize],
    ) -> f64 {
        let mut total = 0.0;
        let mut markers = 0;
        for chromosome in chromosomes.iter() {
            let reference_codes = match reference.chromosome_codes(*chromosome) {
                Some(codes) => codes,
                None => continue,
            };
            let compared_codes = match compared.chromosome_codes(*chromosome) {
                Some(codes) => codes,
                None => continue,
            };
            for (code, reference_code) in compared_codes.iter().zip(reference_codes.iter()) {
                total += self.class_of(*code, *reference_code).score();
                markers += 1;
            }
        }
        if markers == 0 {
            return 0.0;
        }
        total / markers as f64
    }
}

//-----------------------------------------------------------------------------
