//! Ordering of listing records.
//!
//! Records compare on the display string of the key column, so sizes and
//! timestamps order lexicographically on their formatted text
//! (`"10.0 KB"` sorts before `"9.0 B"`).

use crate::catalog::Column;
use crate::metadata::FileRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Stable sort of `records` by the formatted value of `key`. Records with
/// equal keys keep their input order in both directions.
pub fn sort_records(records: Vec<FileRecord>, key: Column, order: SortOrder) -> Vec<FileRecord> {
    let mut keyed: Vec<(String, FileRecord)> = records
        .into_iter()
        .map(|record| (record.display(key), record))
        .collect();

    match order {
        SortOrder::Ascending => keyed.sort_by(|a, b| a.0.cmp(&b.0)),
        SortOrder::Descending => keyed.sort_by(|a, b| b.0.cmp(&a.0)),
    }

    keyed.into_iter().map(|(_, record)| record).collect()
}
