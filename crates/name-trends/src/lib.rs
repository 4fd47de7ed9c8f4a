//! `name-trends` — year-by-year baby-name popularity over AVL-indexed
//! records.
//!
//! The pipeline: a line-oriented dataset (`year,name,county,gender,count`
//! per line) is tokenized by [`split`], validated into [`record`] values,
//! bucketed into one [`year_index`] per year by [`dataset`], and queried
//! interactively by [`repl`] (driven by the `name-trends` binary).
//!
//! Each [`YearIndex`] owns an `avl_forest::AvlTree<NameRecord>` plus a
//! running total of record counts, from which the per-year popularity
//! fractions are derived.

pub mod dataset;
pub mod record;
pub mod repl;
pub mod split;
pub mod year_index;

pub use record::{Gender, NameRecord, RecordError};
pub use year_index::YearIndex;
