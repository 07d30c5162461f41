use std::{
    io::ErrorKind,
    path::PathBuf,
    sync::Arc,
};

use async_trait::async_trait;
use models::Employee;
use tokio::fs;
use tracing::{debug, warn};

use crate::employees::repository::RecordStore;
use crate::errors::ServiceError;
use crate::storage::record_codec;

/// Flat text file holding one pipe-delimited employee per line.
///
/// Every `load_all` re-reads the file and every `save_all` rewrites it whole.
/// Writes go to a sibling `.tmp` file that is renamed over the target, so a
/// reader sees either the previous or the new content.
#[derive(Clone, Debug)]
pub struct FlatFileStore {
    file_path: PathBuf,
}

impl FlatFileStore {
    /// The file is not touched until the first save.
    pub fn new<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { file_path: path.into() })
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.file_path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    pub async fn load_all(&self) -> Result<Vec<Employee>, ServiceError> {
        let content = match fs::read(&self.file_path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(file = %self.file_path.display(), "record file missing; empty roster");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(ServiceError::Storage(format!("read {}: {e}", self.file_path.display())))
            }
        };

        let decoded = record_codec::decode_document(&content);
        for bad in &decoded.malformed {
            warn!(
                file = %self.file_path.display(),
                line = bad.line_no,
                defect = ?bad.defect,
                raw = %bad.raw,
                "skipping malformed record line"
            );
        }
        debug!(count = decoded.records.len(), skipped = decoded.malformed.len(), "records loaded");
        Ok(decoded.records)
    }

    pub async fn save_all(&self, records: &[Employee]) -> Result<(), ServiceError> {
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::Storage(format!("create {}: {e}", parent.display())))?;
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, record_codec::encode_document(records))
            .await
            .map_err(|e| ServiceError::Storage(format!("write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.file_path)
            .await
            .map_err(|e| ServiceError::Storage(format!("replace {}: {e}", self.file_path.display())))?;
        debug!(count = records.len(), file = %self.file_path.display(), "records saved");
        Ok(())
    }
}

#[async_trait]
impl RecordStore for FlatFileStore {
    async fn load_all(&self) -> Result<Vec<Employee>, ServiceError> { self.load_all().await }
    async fn save_all(&self, records: &[Employee]) -> Result<(), ServiceError> { self.save_all(records).await }
}
