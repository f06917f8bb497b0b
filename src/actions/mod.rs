//! File actions module.
//!
//! Currently this is deletion of reported duplicates:
//! - Permanent deletion (default)
//! - Move to system trash (recoverable, opt-in)
//! - Batch operation that never stops at the first failure
//!
//! ```no_run
//! use dupsweep::actions::{delete_all, DeleteConfig};
//! use dupsweep::scanner::FileRecord;
//!
//! let duplicates = vec![FileRecord::new("a.txt", 10, "/compare/a.txt")];
//! for outcome in delete_all(&duplicates, &DeleteConfig::trash()) {
//!     println!("{}: {}", outcome.path.display(), outcome.message);
//! }
//! ```

pub mod delete;

pub use delete::{
    delete_all, delete_one, delete_to_trash, permanent_delete, DeleteConfig, DeleteError,
    DeletionOutcome, DeletionReport,
};
