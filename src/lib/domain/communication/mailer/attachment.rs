//! Message attachments

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Serialize, Serializer};

use super::MessageError;

const DEFAULT_FILE_NAME: &str = "no-name";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Overrides used when attaching content
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttachOptions {
    /// The file name shown to the recipient
    pub file_name: Option<String>,

    /// The MIME type of the content
    pub content_type: Option<String>,
}

impl AttachOptions {
    /// Sets the file name
    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Sets the MIME type
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// A file attached to a message
///
/// Serializes to Postmark's attachment object, with the content base64
/// encoded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Attachment {
    #[serde(rename = "Name")]
    file_name: String,

    #[serde(rename = "Content", serialize_with = "serialize_base64")]
    content: Vec<u8>,

    #[serde(rename = "ContentType")]
    content_type: String,
}

impl Attachment {
    /// Reads an attachment from disk
    ///
    /// The file name defaults to the last component of `path`.
    pub fn from_file(path: impl AsRef<Path>, options: AttachOptions) -> Result<Self, MessageError> {
        let path = path.as_ref();

        let content = std::fs::read(path).map_err(|source| MessageError::Attachment {
            path: path.to_path_buf(),
            source,
        })?;

        let file_name = options.file_name.unwrap_or_else(|| {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string())
        });

        Ok(Self::new(file_name, content, options.content_type))
    }

    /// Creates an attachment from in-memory content
    pub fn from_content(content: impl Into<Vec<u8>>, options: AttachOptions) -> Self {
        let file_name = options
            .file_name
            .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());

        Self::new(file_name, content.into(), options.content_type)
    }

    fn new(file_name: String, content: Vec<u8>, content_type: Option<String>) -> Self {
        let content_type = content_type.unwrap_or_else(|| {
            mime_guess::from_path(&file_name)
                .first_raw()
                .unwrap_or(DEFAULT_CONTENT_TYPE)
                .to_string()
        });

        Self {
            file_name,
            content,
            content_type,
        }
    }

    /// The file name shown to the recipient
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The raw content
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// The MIME type
    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

fn serialize_base64<S: Serializer>(content: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(content))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_from_content_defaults() {
        let attachment = Attachment::from_content(b"hello".to_vec(), AttachOptions::default());

        assert_eq!(attachment.file_name(), "no-name");
        assert_eq!(attachment.content(), b"hello");
        assert_eq!(attachment.content_type(), "application/octet-stream");
    }

    #[test]
    fn test_content_type_guessed_from_file_name() {
        let attachment = Attachment::from_content(
            "a,b\n1,2\n",
            AttachOptions::default().file_name("report.csv"),
        );

        assert_eq!(attachment.file_name(), "report.csv");
        assert_eq!(attachment.content_type(), "text/csv");
    }

    #[test]
    fn test_explicit_content_type_wins() {
        let attachment = Attachment::from_content(
            "{}",
            AttachOptions::default()
                .file_name("data.txt")
                .content_type("application/json"),
        );

        assert_eq!(attachment.content_type(), "application/json");
    }

    #[test]
    fn test_from_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("invoice.pdf");
        std::fs::File::create(&path)?.write_all(b"%PDF-1.4")?;

        let attachment = Attachment::from_file(&path, AttachOptions::default())?;

        assert_eq!(attachment.file_name(), "invoice.pdf");
        assert_eq!(attachment.content(), b"%PDF-1.4");
        assert_eq!(attachment.content_type(), "application/pdf");

        let renamed = Attachment::from_file(&path, AttachOptions::default().file_name("bill.pdf"))?;

        assert_eq!(renamed.file_name(), "bill.pdf");

        Ok(())
    }

    #[test]
    fn test_from_missing_file() {
        let result = Attachment::from_file("/does/not/exist.txt", AttachOptions::default());

        assert!(matches!(result, Err(MessageError::Attachment { .. })));
    }

    #[test]
    fn test_serializes_as_postmark_attachment() -> TestResult {
        let attachment = Attachment::from_content(
            "hello",
            AttachOptions::default().file_name("hello.txt"),
        );

        assert_eq!(
            serde_json::to_value(&attachment)?,
            json!({
                "Name": "hello.txt",
                "Content": "aGVsbG8=",
                "ContentType": "text/plain",
            })
        );

        Ok(())
    }
}
