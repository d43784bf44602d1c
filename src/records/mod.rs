//! Daily Records
//!
//! Input side of the analysis engine:
//!
//! - **types**: `DailyRecord` and the `Attribute` field selector
//! - **source**: the read-only `DataSource` capability and its file-backed implementations
//! - **error**: Error types
//!
//! Records are produced and stored elsewhere; this module only reads them.

pub mod error;
pub mod source;
pub mod types;

pub use error::{SourceError, SourceResult};
pub use source::{CsvParseResult, CsvSource, DataSource, JsonSource, MemorySource};
pub use types::{Attribute, DailyRecord, DATE_FORMAT, UNKNOWN_CONDITION};
