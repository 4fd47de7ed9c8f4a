use std::fmt;

use avl_forest::AvlTree;

use crate::record::{NameRecord, RecordError};

/// The span of years the dataset covers.
pub const FIRST_YEAR: u16 = 1900;
pub const LAST_YEAR: u16 = 2018;

/// One year's worth of records, indexed by an AVL tree keyed on the
/// record order (name-dominant), plus a running total of all record
/// counts for ratio queries.
#[derive(Debug)]
pub struct YearIndex {
    year: u16,
    total_count: u64,
    names: AvlTree<NameRecord>,
}

impl YearIndex {
    pub fn new(year: u16) -> Result<Self, RecordError> {
        if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
            return Err(RecordError::InvalidYear);
        }
        Ok(Self {
            year,
            total_count: 0,
            names: AvlTree::new(),
        })
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    /// Sum of the counts of every record stored for this year.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Inserts the record and reports whether it was new. The running
    /// total only grows when the record actually entered the tree
    /// (duplicates are dropped).
    pub fn add(&mut self, record: NameRecord) -> bool {
        let count = u64::from(record.count());
        let inserted = self.names.insert(record);
        if inserted {
            self.total_count += count;
        }
        inserted
    }

    /// Total count across every entry for `name` (a name can appear once
    /// per county/gender/count combination); 0 when the name is absent.
    pub fn count_for_name(&self, name: &str) -> u64 {
        self.names
            .find_by_primary(name)
            .iter()
            .map(|r| u64::from(r.count()))
            .sum()
    }

    /// Total count for a county; `"all"` selects the whole year. The
    /// county is not the dominant key, so this walks every record.
    pub fn total_for_county(&self, county: &str) -> u64 {
        if county.eq_ignore_ascii_case("all") {
            return self.total_count;
        }
        self.names
            .find_by_secondary(county)
            .iter()
            .map(|r| u64::from(r.count()))
            .sum()
    }

    /// Total count for `name` within `county`; `"all"` spans counties.
    pub fn count_for_name_in_county(&self, name: &str, county: &str) -> u64 {
        if county.eq_ignore_ascii_case("all") {
            return self.count_for_name(name);
        }
        self.names
            .find_by_primary(name)
            .iter()
            .filter(|r| r.county() == county)
            .map(|r| u64::from(r.count()))
            .sum()
    }

    /// Fraction of the year's total held by `name`, in `[0, 1]`; 0 for
    /// an empty year.
    pub fn fraction_for_name(&self, name: &str) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        self.count_for_name(name) as f64 / self.total_count as f64
    }

    /// Fraction of a county's total held by `name`, in `[0, 1]`; 0 when
    /// the county has no records.
    pub fn fraction_for_name_in_county(&self, name: &str, county: &str) -> f64 {
        let county_total = self.total_for_county(county);
        if county_total == 0 {
            return 0.0;
        }
        self.count_for_name_in_county(name, county) as f64 / county_total as f64
    }
}

impl fmt::Display for YearIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "List of names for year {}", self.year)
    }
}
