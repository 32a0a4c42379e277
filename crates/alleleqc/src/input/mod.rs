//! Input handling: submission records and file reading.

mod reader;
mod record;

pub use reader::{RawLine, RecordSource, SourceMetadata};
pub use record::{COLUMN_COUNT, InputRecord, join_multi, split_multi};
