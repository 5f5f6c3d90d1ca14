//! spendlens-insights: filters, aggregates, CSV export and text summaries over
//! parsed transaction tables.

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod summary;

pub use aggregate::{CategoryTotal, DirectionSplit, Insights, YearMonth};
pub use export::{export_csv, write_csv};
pub use filter::{TableFilter, date_span, payee_names};
pub use summary::{format_amount, render_summary};
