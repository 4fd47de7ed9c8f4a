use std::io::{self, BufRead, Write};

use crate::year_index::YearIndex;

/// Drives the interactive popularity loop over any reader/writer pair.
///
/// Each round asks for a name (`q` quits) and a county (`ALL` spans
/// counties), then prints one histogram line per year, or a single
/// not-found line when the combination never occurs. Input is
/// lowercased; end of input quits like `q`.
pub fn run<R: BufRead, W: Write>(years: &[YearIndex], mut input: R, mut out: W) -> io::Result<()> {
    loop {
        write!(out, "Enter a name or \"q\" to stop:\t")?;
        out.flush()?;
        let Some(name) = read_line(&mut input)? else {
            break;
        };
        let name = name.to_lowercase();
        writeln!(out)?;
        if name == "q" {
            break;
        }

        write!(out, "Enter a county (enter \"ALL\" to see all counties):\t")?;
        out.flush()?;
        let Some(county) = read_line(&mut input)? else {
            break;
        };
        let county = county.to_lowercase();
        writeln!(out)?;

        match popularity_report(years, &name, &county) {
            Some(report) => write!(out, "{report}")?,
            None => writeln!(out, "No such name/county combination in dataset.")?,
        }
    }
    Ok(())
}

/// One `year (percent) : |…` line per year, in year order: the percent
/// with four decimals, then one bar per 0.01% of the county's births
/// (rounded up). `None` when every year's fraction is zero.
pub fn popularity_report(years: &[YearIndex], name: &str, county: &str) -> Option<String> {
    let mut any_hits = false;
    let mut report = String::new();
    for year in years {
        let fraction = year.fraction_for_name_in_county(name, county);
        if fraction > 0.0 {
            any_hits = true;
        }
        report.push_str(&format!("{} ({:.4}) : ", year.year(), fraction * 100.0));
        let bars = (fraction * 10_000.0).ceil() as usize;
        for _ in 0..bars {
            report.push('|');
        }
        report.push('\n');
    }
    any_hits.then_some(report)
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
}
