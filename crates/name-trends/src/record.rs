use std::cmp::Ordering;
use std::fmt;

use avl_forest::FieldKeyed;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Invalid name argument given.")]
    InvalidName,

    #[error("Invalid gender argument given.")]
    InvalidGender,

    #[error("Invalid count argument given.")]
    InvalidCount,

    #[error("Invalid county argument given.")]
    InvalidCounty,

    #[error("Year was not valid.")]
    InvalidYear,
}

/// Declaration order is the sort order: male entries tie-break before
/// female ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    fn parse(s: &str) -> Result<Self, RecordError> {
        match s.to_lowercase().as_str() {
            "m" => Ok(Gender::Male),
            "f" => Ok(Gender::Female),
            _ => Err(RecordError::InvalidGender),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "m",
            Gender::Female => "f",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dataset row: how many children of one gender received a name in
/// one county, for the year of the bucket the record is stored in.
///
/// Name and county are stored lowercased. The total order runs name,
/// then county, then count, then gender, so the name is the dominant
/// key of any tree holding these records and records sharing a name
/// still order deterministically.
#[derive(Debug, Clone)]
pub struct NameRecord {
    name: String,
    gender: Gender,
    count: u32,
    county: String,
}

impl NameRecord {
    /// Validates and normalizes the fields: name and county must be
    /// non-empty, gender must be `m` or `f` (any case), count must be
    /// positive.
    pub fn new(name: &str, gender: &str, count: u32, county: &str) -> Result<Self, RecordError> {
        if name.is_empty() {
            return Err(RecordError::InvalidName);
        }
        if county.is_empty() {
            return Err(RecordError::InvalidCounty);
        }
        if count == 0 {
            return Err(RecordError::InvalidCount);
        }
        Ok(Self {
            name: name.to_lowercase(),
            gender: Gender::parse(gender)?,
            count,
            county: county.to_lowercase(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn county(&self) -> &str {
        &self.county
    }
}

impl Ord for NameRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.county.cmp(&other.county))
            .then_with(|| self.count.cmp(&other.count))
            .then_with(|| self.gender.cmp(&other.gender))
    }
}

impl PartialOrd for NameRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NameRecord {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NameRecord {}

impl FieldKeyed for NameRecord {
    fn primary_key(&self) -> &str {
        &self.name
    }

    fn secondary_key(&self) -> &str {
        &self.county
    }
}

impl fmt::Display for NameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name {} is gender {}, with count {}, belonging to county {}.",
            self.name, self.gender, self.count, self.county
        )
    }
}
