use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use qrdrop_storage::{Storage, StorageError, StorageResult, StoredObject};

/// A file the mock was asked to create.
#[derive(Clone, Debug)]
pub struct CreatedFile {
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
    pub parent_folder_id: String,
}

/// Recording storage double.
#[derive(Default)]
pub struct MockStorage {
    created: Mutex<Vec<CreatedFile>>,
    failure: Option<String>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `create_file` call fails with `UploadFailed(message)`.
    pub fn failing(message: &str) -> Self {
        Self {
            created: Mutex::new(Vec::new()),
            failure: Some(message.to_string()),
        }
    }

    pub fn created(&self) -> Vec<CreatedFile> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for MockStorage {
    async fn create_file(
        &self,
        name: &str,
        mime_type: &str,
        data: Bytes,
        parent_folder_id: &str,
    ) -> StorageResult<StoredObject> {
        if let Some(message) = &self.failure {
            return Err(StorageError::UploadFailed(message.clone()));
        }

        let mut created = self.created.lock().unwrap();
        created.push(CreatedFile {
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            data: data.to_vec(),
            parent_folder_id: parent_folder_id.to_string(),
        });
        Ok(StoredObject {
            id: format!("mock-{}", created.len()),
            name: name.to_string(),
        })
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}
