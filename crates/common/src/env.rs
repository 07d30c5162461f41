//! Environment/runtime helpers
//!
//! Sanity checks to ensure the record file location is usable at startup.

use std::path::Path;

use tracing::{debug, warn};

/// Ensure the directory holding the record file exists.
///
/// The file itself is not created here: a missing file means an empty roster
/// and is materialized on the first write.
pub async fn ensure_data_dir(data_file: &Path) -> anyhow::Result<()> {
    let Some(dir) = data_file.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    match tokio::fs::metadata(data_file).await {
        Ok(_) => debug!(file = %data_file.display(), "record file present"),
        Err(_) => warn!(file = %data_file.display(), "record file not found; starting with an empty roster"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_parent_dir() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("common_env_{}", std::process::id()));
        let file = root.join("nested").join("records.txt");
        ensure_data_dir(&file).await?;
        assert!(tokio::fs::metadata(root.join("nested")).await?.is_dir());
        // file is left for the first write
        assert!(tokio::fs::metadata(&file).await.is_err());
        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[tokio::test]
    async fn bare_file_name_is_accepted() -> anyhow::Result<()> {
        ensure_data_dir(Path::new("records.txt")).await
    }
}
