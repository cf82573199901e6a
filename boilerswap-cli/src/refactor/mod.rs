mod guard;
mod planner;
mod preview;
pub mod substitute;
mod transaction;
mod write_plan;

pub use guard::{check, ensure_unique_destinations, ConflictReport};
pub use planner::{plan, PathEntry, PathFilter};
pub use preview::{display_path, format_plan, generate_preview, PreviewDiff};
pub use transaction::{TransactionMode, TransactionResult, WriteTransaction};
pub use write_plan::{PlannedDirectory, PlannedFile, WritePlan};
