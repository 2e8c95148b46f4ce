//! Line ordering strategies.
//!
//! A [`LineView`] is an ordering over the canonical germplasm list of a
//! [`DataSet`]: a vector of original indexes.
//! Sorting reorders the view, never the canonical list, so the original
//! import order can always be restored.
//!
//! Strategies implement the [`LineSort`] trait.
//! The required operation is [`LineSort::sort`]; the optional capabilities
//! (per-line scores, comparison line, chromosome subset, trait selection)
//! have default implementations, so callers dispatch through the trait
//! instead of checking for method presence.

use crate::dataset::DataSet;

use std::cmp::Ordering;
use std::collections::HashMap;

#[cfg(test)]
mod tests;

//-----------------------------------------------------------------------------

/// An ordering over the germplasm lines of a dataset.
///
/// Row `i` of the view displays the germplasm line `order()[i]` of the
/// canonical list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineView {
    order: Vec<usize>,
}

impl LineView {
    /// Creates an identity view over the given number of lines.
    pub fn new(count: usize) -> Self {
        LineView { order: (0..count).collect() }
    }

    /// Returns the number of visible lines.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the view is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the original index of the line at the given row, or [`None`]
    /// if the row is out of range.
    #[inline]
    pub fn get(&self, row: usize) -> Option<usize> {
        self.order.get(row).copied()
    }

    /// Returns the current ordering.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Resets the view to the identity ordering over the given number of lines.
    pub fn reset(&mut self, count: usize) {
        self.order = (0..count).collect();
    }

    /// Keeps only the lines accepted by the filter, preserving the order.
    pub fn retain<F: FnMut(usize) -> bool>(&mut self, mut keep: F) {
        self.order.retain(|index| keep(*index));
    }

    fn sort_by<F: FnMut(usize, usize) -> Ordering>(&mut self, mut compare: F) {
        // A stable sort, so equal keys preserve their relative order.
        self.order.sort_by(|a, b| compare(*a, *b));
    }
}

//-----------------------------------------------------------------------------

/// A line ordering strategy.
///
/// [`LineSort::sort`] is required.
/// The other operations are optional capabilities with no-op defaults:
/// a strategy that does not support them ignores the calls and reports no
/// scores.
pub trait LineSort {
    /// Reorders the view over the given dataset.
    fn sort(&mut self, data: &DataSet, view: &mut LineView) -> Result<(), String>;

    /// Returns the score computed for the given line by the latest sort, if
    /// the strategy computes scores.
    fn score(&self, _name: &str) -> Option<f64> {
        None
    }

    /// Selects the comparison line, if the strategy uses one.
    fn set_comparison_line(&mut self, _name: &str) {}

    /// Selects the chromosome subset, if the strategy uses one.
    fn set_chromosomes(&mut self, _chromosomes: &[usize]) {}

    /// Selects the trait, if the strategy uses one.
    fn set_trait(&mut self, _name: &str) {}
}

//-----------------------------------------------------------------------------

/// Restores the original import order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportOrderSort {}

impl ImportOrderSort {
    /// Creates the strategy.
    pub fn new() -> Self {
        ImportOrderSort {}
    }
}

impl LineSort for ImportOrderSort {
    fn sort(&mut self, _data: &DataSet, view: &mut LineView) -> Result<(), String> {
        view.sort_by(|a, b| a.cmp(&b));
        Ok(())
    }
}

//-----------------------------------------------------------------------------

/// Sorts lines lexicographically by name.
///
/// The sort is stable, so lines with equal names keep their relative order,
/// and sorting an already sorted view is a no-op.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlphabeticSort {}

impl AlphabeticSort {
    /// Creates the strategy.
    pub fn new() -> Self {
        AlphabeticSort {}
    }
}

impl LineSort for AlphabeticSort {
    fn sort(&mut self, data: &DataSet, view: &mut LineView) -> Result<(), String> {
        view.sort_by(|a, b| {
            let a = data.germplasm(a).map_or("", |g| g.name());
            let b = data.germplasm(b).map_or("", |g| g.name());
            a.cmp(b)
        });
        Ok(())
    }
}

//-----------------------------------------------------------------------------

/// Sorts lines by the value of a trait.
///
/// Lines without a value for the trait sort to the end.
/// The sort is stable, so lines with equal values keep their relative order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TraitSort {
    trait_name: Option<String>,
}

impl TraitSort {
    /// Creates the strategy for the given trait.
    pub fn new(trait_name: &str) -> Self {
        TraitSort { trait_name: Some(trait_name.to_string()) }
    }
}

impl LineSort for TraitSort {
    fn sort(&mut self, data: &DataSet, view: &mut LineView) -> Result<(), String> {
        let trait_name = self.trait_name.clone()
            .ok_or_else(|| String::from("No trait selected for sorting"))?;
        view.sort_by(|a, b| {
            let a = data.germplasm(a).and_then(|g| g.trait_value(&trait_name));
            let b = data.germplasm(b).and_then(|g| g.trait_value(&trait_name));
            match (a, b) {
                (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        });
        Ok(())
    }

    fn set_trait(&mut self, name: &str) {
        self.trait_name = Some(name.to_string());
    }
}

//-----------------------------------------------------------------------------

/// Sorts lines by similarity to a comparison line, highest first.
///
/// The comparison line is keyed by name and resolved to its current index at
/// sort time, so the selection survives earlier reorderings.
/// The scores computed by the latest sort are exposed through
/// [`LineSort::score`] for display.
/// Changing the comparison line or the chromosome subset discards the scores;
/// the next sort recomputes them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimilaritySort {
    comparison_line: Option<String>,
    chromosomes: Vec<usize>,
    scores: HashMap<String, f64>,
}

impl SimilaritySort {
    /// Creates the strategy with the given comparison line and chromosome
    /// subset.
    pub fn new(comparison_line: &str, chromosomes: &[usize]) -> Self {
        SimilaritySort {
            comparison_line: Some(comparison_line.to_string()),
            chromosomes: chromosomes.to_vec(),
            scores: HashMap::new(),
        }
    }
}

impl LineSort for SimilaritySort {
    fn sort(&mut self, data: &DataSet, view: &mut LineView) -> Result<(), String> {
        let line = self.comparison_line.clone()
            .ok_or_else(|| String::from("No comparison line selected for sorting"))?;
        let reference = data.germplasm_by_name(&line)
            .ok_or_else(|| format!("Unknown comparison line {}", line))?;
        if data.similarity().is_none() {
            return Err(String::from("The similarity matrix has not been built"));
        }

        self.scores.clear();
        let mut by_index: HashMap<usize, f64> = HashMap::with_capacity(view.len());
        for index in view.order().iter() {
            let score = data.similarity_score(reference, *index, &self.chromosomes).unwrap_or(0.0);
            by_index.insert(*index, score);
            if let Some(germplasm) = data.germplasm(*index) {
                self.scores.insert(germplasm.name().to_string(), score);
            }
        }

        // Highest similarity first; the stable sort keeps equal scores in
        // their previous relative order.
        view.sort_by(|a, b| {
            let a = by_index.get(&a).copied().unwrap_or(0.0);
            let b = by_index.get(&b).copied().unwrap_or(0.0);
            b.partial_cmp(&a).unwrap_or(Ordering::Equal)
        });
        Ok(())
    }

    fn score(&self, name: &str) -> Option<f64> {
        self.scores.get(name).copied()
    }

    fn set_comparison_line(&mut self, name: &str) {
        self.comparison_line = Some(name.to_string());
        self.scores.clear();
    }

    fn set_chromosomes(&mut self, chromosomes: &[usize]) {
        self.chromosomes = chromosomes.to_vec();
        self.scores.clear();
    }
}

//-----------------------------------------------------------------------------
