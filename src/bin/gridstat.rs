use std::time::Instant;
use std::{env, process};

use geno_grid::formats::{self, GenotypeImporter};
use geno_grid::sort::{LineSort, LineView, SimilaritySort};
use geno_grid::{utils, DataSet};
use getopts::Options;

//-----------------------------------------------------------------------------

fn main() -> Result<(), String> {
    let start_time = Instant::now();

    // Parse arguments.
    let config = Config::new();

    // Load the genome map.
    if config.verbose {
        if let Some(size) = utils::file_size(&config.map_file) {
            eprintln!("Map file {} ({})", config.map_file, size);
        }
    }
    let mut reader = utils::open_file(&config.map_file)?;
    let genome = formats::load_genome_map(reader.as_mut(), config.verbose)?;

    // Import the genotypes.
    let mut data = DataSet::new(genome);
    let reader = utils::open_file(&config.genotype_file)?;
    let mut importer = GenotypeImporter::new(reader, data.genome(), config.separator.as_deref())?;
    importer.import_all(&mut data, config.verbose)?;
    if importer.skipped_markers() > 0 {
        eprintln!("Skipped {} markers missing from the map", importer.skipped_markers());
    }

    // Import the traits.
    if let Some(trait_file) = &config.trait_file {
        let mut reader = utils::open_file(trait_file)?;
        let lines = formats::load_traits(reader.as_mut(), &mut data)?;
        if config.verbose {
            eprintln!("Loaded trait values for {} lines", lines);
        }
    }

    data.rebuild_similarity();

    // Statistics.
    println!(
        "{} chromosomes, {} markers, {} germplasm lines, {} genotype states, {} traits",
        data.genome().chromosome_count(),
        data.genome().total_markers(),
        data.germplasm_count(),
        data.states().len(),
        data.traits().len()
    );
    for (index, chromosome) in data.genome().iter().enumerate() {
        println!(
            "Chromosome {} ({}): {} markers over {} units",
            index, chromosome.name(), chromosome.marker_count(), chromosome.length()
        );
    }

    // Similarity ranking against the reference line.
    if let Some(reference) = &config.reference {
        let mut view = LineView::new(data.germplasm_count());
        let mut sort = SimilaritySort::new(reference, &data.all_chromosomes());
        sort.sort(&data, &mut view)?;
        println!("Most similar lines to {}:", reference);
        for row in view.order().iter().take(config.top) {
            let name = data.germplasm(*row).map_or("?", |g| g.name());
            let score = sort.score(name).unwrap_or(0.0);
            println!("{}\t{:.4}", name, score);
        }
    }

    let end_time = Instant::now();
    let seconds = end_time.duration_since(start_time).as_secs_f64();
    eprintln!("Used {:.3} seconds", seconds);

    Ok(())
}

//-----------------------------------------------------------------------------

struct Config {
    pub map_file: String,
    pub genotype_file: String,
    pub trait_file: Option<String>,
    pub separator: Option<String>,
    pub reference: Option<String>,
    pub top: usize,
    pub verbose: bool,
}

impl Config {
    const DEFAULT_TOP: usize = 10;

    pub fn new() -> Config {
        let args: Vec<String> = env::args().collect();
        let program = args[0].clone();

        let mut opts = Options::new();
        opts.optflag("h", "help", "print this help");
        opts.optopt("t", "traits", "trait file name", "FILE");
        opts.optopt("s", "separator", "allele separator in the genotype file", "STR");
        opts.optopt("r", "reference", "rank lines by similarity to this line", "NAME");
        opts.optopt("n", "top", &format!("number of ranked lines to print (default {})", Self::DEFAULT_TOP), "NUM");
        opts.optflag("v", "verbose", "print progress information");
        let matches = match opts.parse(&args[1..]) {
            Ok(m) => m,
            Err(f) => {
                eprintln!("{}", f);
                process::exit(1);
            }
        };

        let header = format!("Usage: {} [options] markers.map genotypes.dat", program);
        if matches.opt_present("h") {
            eprint!("{}", opts.usage(&header));
            process::exit(0);
        }
        if matches.free.len() != 2 {
            eprint!("{}", opts.usage(&header));
            process::exit(1);
        }

        let top = match matches.opt_str("n") {
            Some(s) => match s.parse::<usize>() {
                Ok(n) => n,
                Err(err) => {
                    eprintln!("Invalid number of lines {}: {}", s, err);
                    process::exit(1);
                }
            },
            None => Self::DEFAULT_TOP,
        };

        Config {
            map_file: matches.free[0].clone(),
            genotype_file: matches.free[1].clone(),
            trait_file: matches.opt_str("t"),
            separator: matches.opt_str("s"),
            reference: matches.opt_str("r"),
            top,
            verbose: matches.opt_present("v"),
        }
    }
}

//-----------------------------------------------------------------------------
