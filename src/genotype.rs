//! Genotype values and the state table that interns them.
//!
//! A [`Genotype`] stores the two alleles observed for one line at one marker.
//! Distinct genotypes are enumerated dataset-wide by a [`StateTable`], which
//! maps each of them to a small integer code.
//! Genotype matrices store these codes instead of the allele strings.

use std::collections::HashMap;
use std::fmt::Display;


//-----------------------------------------------------------------------------

/// A two-allele genotype with structural equality.
///
/// Genotypes are immutable once parsed.
/// A genotype is homozygous if both alleles are equal.
/// The empty genotype (both alleles empty) represents missing data.
///
/// # Examples
///
/// ```
/// use geno_grid::Genotype;
///
/// let gt = Genotype::parse("A/T", Some("/")).unwrap();
/// assert!(!gt.is_homozygous());
/// assert_eq!(gt.allele1(), "A");
/// assert_eq!(gt.allele2(), "T");
/// assert_eq!(gt.text(), "A/T");
///
/// // Two-character strings split into single-character alleles.
/// let same = Genotype::parse("AT", None).unwrap();
/// assert_eq!(gt, same);
///
/// let homozygous = Genotype::parse("A", None).unwrap();
/// assert!(homozygous.is_homozygous());
/// assert_eq!(homozygous.text(), "A");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Genotype {
    allele1: String,
    allele2: String,
}

impl Genotype {
    /// Creates the missing genotype.
    pub fn missing() -> Self {
        Genotype { allele1: String::new(), allele2: String::new() }
    }

    /// Parses a genotype from a raw allele string.
    ///
    /// If the string contains the separator, it must split into exactly two alleles.
    /// Without a separator, an empty or single-character string is a homozygous
    /// genotype and a two-character string splits into two single-character alleles.
    /// Everything else is an error.
    ///
    /// # Arguments
    ///
    /// * `raw`: The raw allele string.
    /// * `separator`: An optional allele separator, such as `/`.
    pub fn parse(raw: &str, separator: Option<&str>) -> Result<Self, String> {
        if let Some(sep) = separator {
            if !sep.is_empty() && raw.contains(sep) {
                let alleles: Vec<&str> = raw.split(sep).collect();
                if alleles.len() != 2 || alleles.iter().any(|a| a.is_empty()) {
                    return Err(format!("Invalid genotype {}: expected two alleles", raw));
                }
                return Ok(Genotype {
                    allele1: alleles[0].to_string(),
                    allele2: alleles[1].to_string(),
                });
            }
        }
        let mut chars = raw.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (_, None, _) => Ok(Genotype { allele1: raw.to_string(), allele2: raw.to_string() }),
            (Some(first), Some(second), None) => Ok(Genotype {
                allele1: first.to_string(),
                allele2: second.to_string(),
            }),
            _ => Err(format!("Invalid genotype {}: cannot determine alleles", raw)),
        }
    }

    /// Returns the first allele.
    pub fn allele1(&self) -> &str {
        &self.allele1
    }

    /// Returns the second allele.
    pub fn allele2(&self) -> &str {
        &self.allele2
    }

    /// Returns `true` if both alleles are equal.
    #[inline]
    pub fn is_homozygous(&self) -> bool {
        self.allele1 == self.allele2
    }

    /// Returns `true` if this is the missing genotype.
    #[inline]
    pub fn is_missing(&self) -> bool {
        self.allele1.is_empty() && self.allele2.is_empty()
    }

    /// Returns the canonical text representation.
    ///
    /// A homozygous genotype is written as a single allele and a heterozygous
    /// genotype as `allele1/allele2`, regardless of the separator used for parsing.
    pub fn text(&self) -> String {
        if self.is_homozygous() {
            self.allele1.clone()
        } else {
            format!("{}/{}", self.allele1, self.allele2)
        }
    }
}

impl Display for Genotype {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_homozygous() {
            write!(f, "{}", self.allele1)
        } else {
            write!(f, "{}/{}", self.allele1, self.allele2)
        }
    }
}

//-----------------------------------------------------------------------------

/// An interner mapping distinct genotypes to sequential integer codes.
///
/// Code [`StateTable::MISSING_CODE`] is reserved for the missing genotype.
/// The table preserves insertion order and is append-only: codes are never
/// reassigned within one import session, so identical raw strings always
/// intern to the same code.
///
/// # Examples
///
/// ```
/// use geno_grid::{Genotype, StateTable};
///
/// let mut table = StateTable::new();
/// let a = table.intern("A", None).unwrap();
/// let het = table.intern("A/T", Some("/")).unwrap();
/// assert_eq!(a, 1);
/// assert_eq!(het, 2);
///
/// // Interning is deterministic.
/// assert_eq!(table.intern("A", None), Ok(a));
///
/// // Empty and dash strings normalize to the missing code.
/// assert_eq!(table.intern("-", None), Ok(StateTable::MISSING_CODE));
/// assert_eq!(table.len(), 3);
///
/// let genotype = table.genotype(het).unwrap();
/// assert_eq!(genotype.text(), "A/T");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateTable {
    // Genotypes in code order.
    states: Vec<Genotype>,

    // Maps genotypes to codes.
    codes: HashMap<Genotype, u16>,
}

impl StateTable {
    /// Code reserved for the missing genotype.
    pub const MISSING_CODE: u16 = 0;

    /// Creates a new state table containing only the missing genotype.
    pub fn new() -> Self {
        let missing = Genotype::missing();
        let mut codes = HashMap::new();
        codes.insert(missing.clone(), Self::MISSING_CODE);
        StateTable { states: vec![missing], codes }
    }

    /// Returns the number of codes in the table, including the missing code.
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `false`, as the missing genotype is always present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the genotype for the given code, or [`None`] if there is no such code.
    #[inline]
    pub fn genotype(&self, code: u16) -> Option<&Genotype> {
        self.states.get(code as usize)
    }

    /// Returns the code for the given genotype, or [`None`] if it has not been interned.
    #[inline]
    pub fn code(&self, genotype: &Genotype) -> Option<u16> {
        self.codes.get(genotype).copied()
    }

    /// Returns an iterator over the genotypes in code order.
    pub fn iter(&self) -> impl Iterator<Item = &Genotype> {
        self.states.iter()
    }

    /// Interns a raw allele string and returns its code.
    ///
    /// Empty and dash strings normalize to the missing code without parsing.
    /// Otherwise the string is parsed with [`Genotype::parse`], inserted with
    /// the next sequential code if it is new, and its code is returned.
    ///
    /// Returns an error if the string cannot be parsed or the table is full.
    pub fn intern(&mut self, raw: &str, separator: Option<&str>) -> Result<u16, String> {
        if raw.is_empty() || raw == "-" {
            return Ok(Self::MISSING_CODE);
        }
        let genotype = Genotype::parse(raw, separator)?;
        self.insert(genotype)
    }

    /// Inserts a genotype and returns its code, reusing the code of an existing
    /// structurally equal genotype.
    pub fn insert(&mut self, genotype: Genotype) -> Result<u16, String> {
        if let Some(code) = self.codes.get(&genotype) {
            return Ok(*code);
        }
        if self.states.len() > u16::MAX as usize {
            return Err(format!("State table is full: cannot add genotype {}", genotype));
        }
        let code = self.states.len() as u16;
        self.codes.insert(genotype.clone(), code);
        self.states.push(genotype);
        Ok(code)
    }
}

impl Default for StateTable {
    fn default() -> Self {
        Self::new()
    }
}

//-----------------------------------------------------------------------------
