// Ingest: uploaded bytes -> canonical text -> CandidateRecord.
// Text decoding may fail per file; field extraction never does.

pub mod fields;
pub mod handlers;
pub mod ingest;
pub mod text;
