//! Format-specific decoding of uploaded bytes into canonical text.

use std::path::Path;

use crate::errors::AppError;

/// Document formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Txt,
}

impl DocumentFormat {
    /// Resolves a declared extension (`"pdf"`, `".TXT"`, ...). Matching is
    /// case-insensitive; anything else is `UnsupportedFormat`.
    pub fn from_extension(extension: &str) -> Result<Self, AppError> {
        let ext = extension.trim().trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "txt" => Ok(DocumentFormat::Txt),
            "" => Err(AppError::UnsupportedFormat("(none)".to_string())),
            _ => Err(AppError::UnsupportedFormat(ext)),
        }
    }
}

/// The extension of an uploaded file name, or `""` when it has none.
pub fn extension_of(file_name: &str) -> &str {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
}

/// Decodes `bytes` as `format` and returns canonical text.
///
/// No layout analysis: text comes out in whatever order the decoder yields it.
pub fn extract_text(bytes: &[u8], format: DocumentFormat) -> Result<String, AppError> {
    let text = match format {
        DocumentFormat::Pdf => extract_pdf(bytes)?,
        DocumentFormat::Txt => extract_txt(bytes)?,
    };
    Ok(canonicalize(&text))
}

fn extract_pdf(bytes: &[u8]) -> Result<String, AppError> {
    // pdf-extract panics on some malformed inputs instead of returning an error.
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(AppError::ExtractionFailure(format!("PDF parsing error: {e}"))),
        Err(_) => Err(AppError::ExtractionFailure(
            "PDF parsing error: decoder aborted on malformed input".to_string(),
        )),
    }
}

fn extract_txt(bytes: &[u8]) -> Result<String, AppError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| AppError::ExtractionFailure(format!("TXT reading error: {e}")))
}

/// Strips a leading BOM and normalizes line endings to `\n`.
fn canonicalize(text: &str) -> String {
    text.trim_start_matches('\u{feff}')
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_matching_is_case_insensitive() {
        assert_eq!(DocumentFormat::from_extension("PDF").unwrap(), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_extension(".Txt").unwrap(), DocumentFormat::Txt);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let err = DocumentFormat::from_extension("exe").unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(ref ext) if ext == "exe"));
    }

    #[test]
    fn test_file_name_without_extension_rejected() {
        assert_eq!(extension_of("resume"), "");
        let err = DocumentFormat::from_extension(extension_of("resume")).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_file_name_uses_last_extension() {
        assert_eq!(extension_of("jane.doe.resume.TXT"), "TXT");
        assert_eq!(extension_of("resume.txt.exe"), "exe");
    }

    #[test]
    fn test_txt_normalizes_line_endings_and_bom() {
        let text = extract_text("\u{feff}Jane\r\nDoe\rX".as_bytes(), DocumentFormat::Txt).unwrap();
        assert_eq!(text, "Jane\nDoe\nX");
    }

    #[test]
    fn test_invalid_utf8_txt_is_extraction_failure() {
        let err = extract_text(&[0xff, 0xfe, 0x00, 0xc3], DocumentFormat::Txt).unwrap_err();
        assert!(matches!(err, AppError::ExtractionFailure(_)));
    }

    #[test]
    fn test_valid_pdf_text_is_extracted() {
        let bytes = include_bytes!("../../fixtures/sample_resume.pdf");
        let text = extract_text(bytes, DocumentFormat::Pdf).unwrap();
        assert!(text.contains("Ada Lovelace"), "got {text:?}");
        assert!(text.contains("Python and Rust engineer"), "got {text:?}");
        assert!(!text.contains('\r'));
    }

    #[test]
    fn test_garbage_pdf_is_extraction_failure() {
        let err = extract_text(b"definitely not a pdf", DocumentFormat::Pdf).unwrap_err();
        assert!(matches!(err, AppError::ExtractionFailure(_)));
    }
}
