//! spendlens-core: transaction record types, categories and the error taxonomy

pub mod category;
pub mod error;
pub mod record;

pub use category::{Category, categorize};
pub use error::{ExtractionError, LineParseError, RecordError};
pub use record::{Direction, TransactionRecord, TransactionTable};
