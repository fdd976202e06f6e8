// Adapters layer: concrete implementations for the filesystem and the CSV wire format.

pub mod csv_records;
pub mod storage;
