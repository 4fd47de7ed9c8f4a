use std::io::{self, BufRead};

use crate::record::NameRecord;
use crate::split::split_delimited_line;
use crate::year_index::YearIndex;

/// Reads the line-oriented dataset, one record per line in the field
/// order `year,name,county,gender,count`, and buckets the records into
/// one [`YearIndex`] per distinct year, sorted by year.
///
/// Malformed lines (wrong field count, unparsable or out-of-range
/// year, unparsable count, invalid record fields) are skipped; only
/// I/O failures surface as errors.
pub fn load<R: BufRead>(reader: R) -> io::Result<Vec<YearIndex>> {
    let mut years: Vec<YearIndex> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let fields = split_delimited_line(&line);
        if fields.len() != 5 {
            continue;
        }
        let Ok(year) = fields[0].parse::<u16>() else {
            continue;
        };
        let Ok(count) = fields[4].parse::<u32>() else {
            continue;
        };
        let Ok(record) = NameRecord::new(&fields[1], &fields[3], count, &fields[2]) else {
            continue;
        };

        let bucket = match years.iter_mut().find(|y| y.year() == year) {
            Some(bucket) => bucket,
            None => {
                let Ok(bucket) = YearIndex::new(year) else {
                    continue;
                };
                years.push(bucket);
                years.last_mut().expect("bucket was just pushed")
            }
        };
        bucket.add(record);
    }

    years.sort_by_key(YearIndex::year);
    Ok(years)
}
