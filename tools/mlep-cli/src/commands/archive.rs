use std::path::Path;

use anyhow::{Context, Result};

use crate::archive::create_tar;

pub async fn handle_archive_command(dest: &Path, source: &Path) -> Result<()> {
    let (dest, source) = (dest.to_path_buf(), source.to_path_buf());
    let archive = dest.clone();
    let size_mb = tokio::task::spawn_blocking(move || create_tar(&dest, &source))
        .await?
        .with_context(|| format!("Failed to create archive {}", archive.display()))?;
    println!("Created {} ({size_mb:.3} MB)", archive.display());
    Ok(())
}
