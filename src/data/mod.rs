//! Data module - spreadsheet loading, flow processing and CSV export

mod loader;
mod processor;
mod record;
mod schema;
mod writer;

pub use loader::{DataLoader, LoaderError};
pub use processor::{FlowProcessor, ProcessorError};
pub use record::{FlowRecord, FlowType};
pub use schema::SchemaError;
pub use writer::{CsvExporter, WriterError};
