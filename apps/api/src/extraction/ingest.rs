use bytes::Bytes;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::errors::AppError;
use crate::extraction::fields::extract_candidate;
use crate::extraction::text::{extension_of, extract_text, DocumentFormat};
use crate::models::candidate::CandidateRecord;
use crate::models::resume::ResumeRecord;

/// One file received in an upload batch.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Bytes,
}

/// Per-file result of a batch. A failure never affects sibling files.
#[derive(Debug)]
pub enum FileOutcome {
    Parsed(ResumeRecord),
    Failed { original_name: String, error: AppError },
}

/// Decodes a document and extracts its candidate record.
/// The extension is checked before any decoding work is done.
pub fn parse_document(
    bytes: &[u8],
    extension: &str,
    catalog: &Catalog,
) -> Result<CandidateRecord, AppError> {
    let format = DocumentFormat::from_extension(extension)?;
    let text = extract_text(bytes, format)?;
    Ok(extract_candidate(&text, catalog))
}

fn parse_upload(
    file: &UploadedFile,
    catalog: &Catalog,
    max_bytes: usize,
) -> Result<ResumeRecord, AppError> {
    let extension = extension_of(&file.file_name);
    DocumentFormat::from_extension(extension)?;
    if file.data.len() > max_bytes {
        return Err(AppError::ExtractionFailure(format!(
            "file is {} bytes, limit is {} bytes",
            file.data.len(),
            max_bytes
        )));
    }
    let parsed = parse_document(&file.data, extension, catalog)?;
    Ok(ResumeRecord::new(&file.file_name, file.data.len(), parsed))
}

/// Parses every file independently and collects one outcome per file, in order.
pub fn parse_batch(files: Vec<UploadedFile>, catalog: &Catalog, max_bytes: usize) -> Vec<FileOutcome> {
    files
        .into_iter()
        .map(|file| match parse_upload(&file, catalog, max_bytes) {
            Ok(record) => {
                info!(
                    file = %file.file_name,
                    name = %record.parsed_data.name,
                    skills = record.parsed_data.skills.len(),
                    "Parsed resume"
                );
                FileOutcome::Parsed(record)
            }
            Err(error) => {
                warn!(file = %file.file_name, error = %error, "Failed to parse resume");
                FileOutcome::Failed {
                    original_name: file.file_name,
                    error,
                }
            }
        })
        .collect()
}
