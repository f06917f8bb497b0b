//! Matching compare-folder records against the base index.

use crate::duplicates::index::DuplicateIndex;
use crate::scanner::FileRecord;

/// Return the compare records whose (name, size) is present in `index`.
///
/// Input order is preserved and the compare-side record is returned, so
/// paths point into the compare tree. The index is only read, which makes
/// repeated calls with the same inputs return identical results.
///
/// # Example
///
/// ```
/// use dupsweep::duplicates::{find_duplicates, DuplicateIndex};
/// use dupsweep::scanner::FileRecord;
///
/// let index: DuplicateIndex = vec![FileRecord::new("a.txt", 10, "/base/a.txt")]
///     .into_iter()
///     .collect();
/// let compare = vec![
///     FileRecord::new("a.txt", 10, "/cmp/a.txt"),
///     FileRecord::new("c.txt", 10, "/cmp/c.txt"),
/// ];
///
/// let duplicates = find_duplicates(&compare, &index);
/// assert_eq!(duplicates, vec![FileRecord::new("a.txt", 10, "/cmp/a.txt")]);
/// ```
#[must_use]
pub fn find_duplicates(compare: &[FileRecord], index: &DuplicateIndex) -> Vec<FileRecord> {
    let duplicates: Vec<FileRecord> = compare
        .iter()
        .filter(|record| index.contains_record(record))
        .cloned()
        .collect();

    log::debug!(
        "Matched {} of {} compare files against {} indexed keys",
        duplicates.len(),
        compare.len(),
        index.len()
    );

    duplicates
}
