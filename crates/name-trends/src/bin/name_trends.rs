//! `name-trends` — query baby-name popularity year by year.
//!
//! Usage:
//!   name-trends <dataset.csv>
//!
//! Loads the dataset, then interactively reports, for each name/county
//! pair entered, every year's share of births as a percentage histogram.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::process;

use name_trends::{dataset, repl};

fn main() {
    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("Usage Error: the program expects file name as an argument.");
        process::exit(1);
    };

    let path = Path::new(&path);
    if !path.exists() {
        eprintln!("Error: the file {} does not exist.", path.display());
        process::exit(1);
    }
    let file = match File::open(path) {
        Ok(file) => file,
        Err(_) => {
            eprintln!(
                "Error: the file {} cannot be opened for reading.",
                path.display()
            );
            process::exit(1);
        }
    };

    let years = match dataset::load(BufReader::new(file)) {
        Ok(years) => years,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = repl::run(&years, stdin.lock(), stdout.lock()) {
        eprintln!("{e}");
        process::exit(1);
    }
}
