use crate::error::ValidationError;
use crate::upload::types::SelectedFile;
use bytes::Bytes;
use crate::workflow::ensure_single;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extensions offered by the file dialog.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Turns picked or dropped files into [`SelectedFile`]s. Only one image is
/// accepted per selection and it must carry an `image/*` type.
pub struct FileProcessor;

impl FileProcessor {
    /// Reads the selection after checking its size, so a rejected multi-file
    /// selection never touches the disk.
    pub fn read_selection(paths: &[PathBuf]) -> Result<Vec<SelectedFile>, ValidationError> {
        ensure_single(paths.len())?;
        paths.iter().map(|path| Self::read_file(path)).collect()
    }

    pub fn read_file(path: &Path) -> Result<SelectedFile, ValidationError> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| ValidationError::Unreadable {
                path: path.to_path_buf(),
                reason: "not a file".to_string(),
            })?;

        let mime = Self::image_mime(&name)?;

        let bytes = fs::read(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "failed to read selected file");
            ValidationError::Unreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        debug!(name = %name, mime = %mime, len = bytes.len(), "read selected file");
        Ok(SelectedFile {
            name,
            mime,
            bytes: Bytes::from(bytes),
        })
    }

    /// Files dropped without a filesystem path (the bytes come with the event).
    pub fn from_bytes(name: &str, bytes: &[u8]) -> Result<SelectedFile, ValidationError> {
        let mime = Self::image_mime(name)?;
        Ok(SelectedFile {
            name: name.to_string(),
            mime,
            bytes: Bytes::copy_from_slice(bytes),
        })
    }

    fn image_mime(name: &str) -> Result<String, ValidationError> {
        let mime = mime_guess::from_path(name).first_or_octet_stream();
        if mime.type_() != mime_guess::mime::IMAGE {
            return Err(ValidationError::UnsupportedType {
                name: name.to_string(),
                mime: mime.essence_str().to_string(),
            });
        }
        Ok(mime.essence_str().to_string())
    }
}
