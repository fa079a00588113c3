// Writing generated composites to disk

use crate::composition::GenerationResult;
use crate::error::Result;
use chrono::Local;
use std::path::{Path, PathBuf};

/// Timestamp used in output file names
pub fn timestamp() -> String {
    Local::now().format("%Y%m%d-%H%M%S").to_string()
}

/// Write both images as `<kind>-<stamp>.<ext>`, artistic first.
/// Both payloads are decoded before anything is written.
pub async fn save_result(result: &GenerationResult, dir: &Path, stamp: &str) -> Result<Vec<PathBuf>> {
    let images = [("artistic", &result.artistic), ("expository", &result.expository)];

    let mut decoded = Vec::with_capacity(images.len());
    for (kind, image) in images {
        let path = dir.join(format!("{}-{}.{}", kind, stamp, image.extension()));
        decoded.push((kind, path, image.decode()?));
    }

    tokio::fs::create_dir_all(dir).await?;

    let mut saved = Vec::with_capacity(decoded.len());
    for (kind, path, bytes) in decoded {
        tokio::fs::write(&path, bytes).await?;
        tracing::info!("Saved {} image to {}", kind, path.display());
        saved.push(path);
    }

    Ok(saved)
}
