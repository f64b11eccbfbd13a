use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// One image picked by the user, read into memory. Cloning shares the bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
    pub bytes: Bytes,
}

impl SelectedFile {
    pub fn summary(&self) -> FileSummary {
        FileSummary {
            name: self.name.clone(),
            mime: self.mime.clone(),
            len: self.bytes.len(),
        }
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// What stays behind once the bytes are handed to the upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub name: String,
    pub mime: String,
    pub len: usize,
}

/// Opaque identifier issued by the storage endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReference {
    #[serde(rename = "ref")]
    pub reference: String,
}

impl FileReference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }
}

impl fmt::Display for FileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reference)
    }
}

/// Body of the classification request.
pub type AnalysisRequest = FileReference;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    // `anwer` is the field name the front-end contract uses; the server
    // itself answers with `answer`.
    #[serde(rename = "anwer", alias = "answer")]
    pub answer: String,
    pub is_dirty: bool,
    pub imglink: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_uses_ref_on_the_wire() {
        let reference: FileReference = serde_json::from_str(r#"{"ref":"abc123"}"#).unwrap();
        assert_eq!(reference, FileReference::new("abc123"));
        assert_eq!(
            serde_json::to_value(&reference).unwrap(),
            serde_json::json!({ "ref": "abc123" })
        );
    }

    #[test]
    fn result_keeps_the_anwer_spelling() {
        let result: AnalysisResult = serde_json::from_str(
            r#"{"anwer":"No visible debris","is_dirty":false,"imglink":"x"}"#,
        )
        .unwrap();
        assert_eq!(result.answer, "No visible debris");
        assert!(!result.is_dirty);

        let encoded = serde_json::to_value(&result).unwrap();
        assert_eq!(encoded["anwer"], "No visible debris");
        assert!(encoded.get("answer").is_none());
    }

    #[test]
    fn result_accepts_the_server_spelling() {
        let result: AnalysisResult = serde_json::from_str(
            r#"{"answer":"Yes, the desk is cluttered","is_dirty":true,"imglink":"a.png"}"#,
        )
        .unwrap();
        assert_eq!(result.answer, "Yes, the desk is cluttered");
        assert!(result.is_dirty);
        assert_eq!(result.imglink, "a.png");
    }

    #[test]
    fn debug_output_omits_file_contents() {
        let file = SelectedFile {
            name: "desk.png".into(),
            mime: "image/png".into(),
            bytes: Bytes::from(vec![7u8; 2048]),
        };
        let rendered = format!("{file:?}");
        assert!(rendered.contains("len: 2048"));
        assert!(!rendered.contains("7, 7"));
    }

    #[test]
    fn summary_keeps_metadata_only() {
        let file = SelectedFile {
            name: "desk.png".into(),
            mime: "image/png".into(),
            bytes: Bytes::from_static(b"12345"),
        };
        assert_eq!(
            file.summary(),
            FileSummary {
                name: "desk.png".into(),
                mime: "image/png".into(),
                len: 5,
            }
        );
    }
}
