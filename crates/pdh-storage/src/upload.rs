//! Checks on an uploaded persona photo.

use crate::error::StorageError;

const BYTES_PER_MIB: usize = 1024 * 1024;

/// A file received from a multipart form.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    /// Reject non-images and files over `max_bytes`.
    ///
    /// # Errors
    ///
    /// [`StorageError::InvalidUpload`] with the message returned as 400.
    pub fn validate(&self, max_bytes: usize) -> Result<(), StorageError> {
        if !self.content_type.starts_with("image/") {
            return Err(StorageError::InvalidUpload("File must be an image".into()));
        }
        if self.bytes.len() > max_bytes {
            return Err(StorageError::InvalidUpload(format!(
                "File size exceeds the {}MB limit",
                max_bytes.div_ceil(BYTES_PER_MIB)
            )));
        }
        Ok(())
    }

    /// Object key: `{user_id}_{unix_ts}_{file_name}`. Only the last path
    /// component of the client-supplied name is kept.
    pub fn object_path(&self, user_id: &str, unix_ts: i64) -> String {
        let base = self
            .file_name
            .rsplit(['/', '\\'])
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or("photo");
        format!("{user_id}_{unix_ts}_{base}")
    }
}
