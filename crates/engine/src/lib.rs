//! Pure aggregation over fetched transaction records.
//!
//! The engine never performs I/O: the data layer fetches records for a
//! window and hands them over, and everything here is derived in memory.
//! Records the backend sent in a shape this client cannot use are skipped,
//! not treated as errors, so a partially dirty dataset still renders.
pub use buckets::TimeBucket;
pub use error::EngineError;
pub use format::signed_amount;
pub use rollup::CategoryTotal;
pub use summary::{Totals, WindowSummary, summarize};
pub use trend::{TrendDelta, TrendSet, trend_set};
pub use window::{AnalysisWindow, Granularity, ResolvedWindow};

mod buckets;
mod dates;
mod error;
mod format;
mod rollup;
mod summary;
mod trend;
mod window;
