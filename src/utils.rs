pub mod ingest;
pub mod storage;
