//! Support for reading tab-delimited genotype datasets.
//!
//! Three file kinds are supported, all line-based with `#` comments and blank
//! lines skipped, plain or gzip-compressed (see [`crate::utils::open_file`]):
//!
//! * A map file with `marker<TAB>chromosome<TAB>position` lines, read by
//!   [`load_genome_map`].
//! * A genotype file with a header line naming the markers and one row of
//!   allele strings per germplasm line, read by [`GenotypeImporter`].
//! * A trait file with a header line naming the traits and one row of numeric
//!   values per germplasm line, read by [`load_traits`].
//!
//! Genotype import is chunked: the caller repeatedly asks for the next chunk
//! and can check for cancellation between the calls.
//! Genotype columns for markers missing from the map are skipped, as partial
//! maps are an expected condition.

use crate::dataset::DataSet;
use crate::genome::{Chromosome, GenomeMap, Marker};
use crate::genotype::StateTable;

use std::collections::HashMap;
use std::io::BufRead;


//-----------------------------------------------------------------------------

// Reads the next data line, skipping comments and blank lines.
// Returns `None` at the end of the input.
fn next_data_line(reader: &mut dyn BufRead, line_number: &mut usize) -> Result<Option<String>, String> {
    let mut buffer = String::new();
    loop {
        buffer.clear();
        let len = reader.read_line(&mut buffer).map_err(|x| x.to_string())?;
        if len == 0 {
            return Ok(None);
        }
        *line_number += 1;
        let line = buffer.trim_end_matches(|c| c == '\n' || c == '\r');
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        return Ok(Some(line.to_string()));
    }
}

//-----------------------------------------------------------------------------

/// Loads a genome map from a tab-delimited map file.
///
/// Each line contains a marker name, a chromosome name, and an integer
/// position.
/// Chromosomes are created in first-seen order, and their declared length is
/// the largest position seen.
pub fn load_genome_map(reader: &mut dyn BufRead, verbose: bool) -> Result<GenomeMap, String> {
    let mut chromosomes: Vec<Chromosome> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();
    let mut line_number = 0;

    while let Some(line) = next_data_line(reader, &mut line_number)? {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 3 {
            return Err(format!("Map line {}: expected 3 fields, got {}", line_number, fields.len()));
        }
        let position = fields[2].parse::<usize>().map_err(|err| {
            format!("Map line {}: invalid position {}: {}", line_number, fields[2], err)
        })?;
        let index = match by_name.get(fields[1]) {
            Some(index) => *index,
            None => {
                by_name.insert(fields[1].to_string(), chromosomes.len());
                chromosomes.push(Chromosome::new(fields[1], 0));
                chromosomes.len() - 1
            },
        };
        let chromosome = &mut chromosomes[index];
        if position > chromosome.length() {
            chromosome.set_length(position);
        }
        chromosome.add_marker(Marker::new(fields[0], position));
    }

    let map = GenomeMap::new(chromosomes);
    if verbose {
        eprintln!("Loaded {} markers on {} chromosomes", map.total_markers(), map.chromosome_count());
    }
    Ok(map)
}

//-----------------------------------------------------------------------------

/// A chunked reader for tab-delimited genotype files.
///
/// The header line contains a tab-separated list of marker names after an
/// ignored corner field.
/// Each data line contains a germplasm name followed by one raw allele string
/// per header marker; missing trailing fields intern as missing data.
/// Columns whose marker is not in the genome map are skipped and counted in
/// [`GenotypeImporter::skipped_markers`].
///
/// [`GenotypeImporter::next_chunk`] imports a bounded number of lines, so the
/// caller can interleave cancellation checks; [`GenotypeImporter::import_all`]
/// drives the loop to completion.
pub struct GenotypeImporter {
    reader: Box<dyn BufRead>,

    // Map position for each genotype column, `None` for unknown markers.
    columns: Vec<Option<(usize, usize)>>,

    separator: Option<String>,
    skipped_markers: usize,
    line_number: usize,
}

impl GenotypeImporter {
    /// Number of germplasm lines imported per chunk.
    pub const CHUNK_LINES: usize = 128;

    /// Creates an importer by reading the header line.
    ///
    /// # Arguments
    ///
    /// * `reader`: The genotype file.
    /// * `genome`: The genome map used to resolve marker names.
    /// * `separator`: An optional allele separator for [`StateTable::intern`].
    pub fn new(
        mut reader: Box<dyn BufRead>,
        genome: &GenomeMap,
        separator: Option<&str>,
    ) -> Result<Self, String> {
        let mut line_number = 0;
        let header = next_data_line(reader.as_mut(), &mut line_number)?
            .ok_or_else(|| String::from("Genotype file has no header line"))?;
        let mut columns = Vec::new();
        let mut skipped_markers = 0;
        for name in header.split('\t').skip(1) {
            let column = genome.marker_by_name(name);
            if column.is_none() {
                skipped_markers += 1;
            }
            columns.push(column);
        }
        Ok(GenotypeImporter {
            reader,
            columns,
            separator: separator.map(String::from),
            skipped_markers,
            line_number,
        })
    }

    /// Returns the number of header markers missing from the genome map.
    pub fn skipped_markers(&self) -> usize {
        self.skipped_markers
    }

    /// Imports up to [`Self::CHUNK_LINES`] germplasm lines into the dataset.
    ///
    /// Returns the number of lines imported; 0 means the input is exhausted.
    /// Malformed genotype strings fail the import with the offending line
    /// number.
    pub fn next_chunk(&mut self, data: &mut DataSet) -> Result<usize, String> {
        let separator = self.separator.clone();
        let mut imported = 0;
        while imported < Self::CHUNK_LINES {
            let line = match next_data_line(self.reader.as_mut(), &mut self.line_number)? {
                Some(line) => line,
                None => break,
            };
            let mut fields = line.split('\t');
            let name = fields.next().unwrap_or("");
            if name.is_empty() {
                return Err(format!("Genotype line {}: missing germplasm name", self.line_number));
            }

            let mut genotypes: Vec<Vec<u16>> = (0..data.genome().chromosome_count())
                .map(|c| vec![StateTable::MISSING_CODE; data.genome().marker_count(c).unwrap_or(0)])
                .collect();
            for (column, raw) in fields.enumerate() {
                if column >= self.columns.len() {
                    return Err(format!(
                        "Genotype line {}: more genotypes than header markers", self.line_number
                    ));
                }
                if let Some((chromosome, marker)) = self.columns[column] {
                    let code = data.intern_genotype(raw, separator.as_deref()).map_err(|err| {
                        format!("Genotype line {}: {}", self.line_number, err)
                    })?;
                    genotypes[chromosome][marker] = code;
                }
            }
            data.add_germplasm(name, genotypes, None)?;
            imported += 1;
        }
        Ok(imported)
    }

    /// Imports the remaining input and returns the total number of lines.
    pub fn import_all(&mut self, data: &mut DataSet, verbose: bool) -> Result<usize, String> {
        let mut total = 0;
        loop {
            let imported = self.next_chunk(data)?;
            if imported == 0 {
                break;
            }
            total += imported;
            if verbose {
                eprintln!("Imported {} germplasm lines", total);
            }
        }
        Ok(total)
    }
}

//-----------------------------------------------------------------------------

/// Loads trait values from a tab-delimited trait file into the dataset.
///
/// The header line names the traits after an ignored corner field.
/// Each data line contains a germplasm name followed by one numeric value per
/// trait; empty fields are skipped.
/// Returns the number of germplasm lines with values.
pub fn load_traits(reader: &mut dyn BufRead, data: &mut DataSet) -> Result<usize, String> {
    let mut line_number = 0;
    let header = next_data_line(reader, &mut line_number)?
        .ok_or_else(|| String::from("Trait file has no header line"))?;
    let traits: Vec<String> = header.split('\t').skip(1).map(String::from).collect();

    let mut lines = 0;
    while let Some(line) = next_data_line(reader, &mut line_number)? {
        let mut fields = line.split('\t');
        let name = fields.next().unwrap_or("");
        for (column, value) in fields.enumerate() {
            if value.is_empty() {
                continue;
            }
            let trait_name = traits.get(column).ok_or_else(|| {
                format!("Trait line {}: more values than header traits", line_number)
            })?;
            let value = value.parse::<f64>().map_err(|err| {
                format!("Trait line {}: invalid value {}: {}", line_number, value, err)
            })?;
            data.set_phenotype(name, trait_name, value).map_err(|err| {
                format!("Trait line {}: {}", line_number, err)
            })?;
        }
        lines += 1;
    }
    Ok(lines)
}

//-----------------------------------------------------------------------------
