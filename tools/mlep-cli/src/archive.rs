use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use tracing::debug;

/// Pack every regular file under `source_dir` into a gzip-compressed tar at
/// `archive_path` and return the archive size in megabytes (10^6 bytes).
///
/// Entry names are relative to `source_dir`. Files whose relative path
/// starts with `.` are skipped. Only the leading character of the relative
/// path is checked, so `sub/.env` is still packed.
pub fn create_tar(archive_path: &Path, source_dir: &Path) -> io::Result<f64> {
    let mut files = Vec::new();
    collect_files(source_dir, &mut files)?;
    files.sort();

    let file = File::create(archive_path)?;
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    for path in &files {
        let relative = path
            .strip_prefix(source_dir)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        if relative.to_string_lossy().starts_with('.') {
            debug!(path = %relative.display(), "skip hidden file");
            continue;
        }
        builder.append_path_with_name(path, relative)?;
    }
    builder.into_inner()?.finish()?;

    let size = fs::metadata(archive_path)?.len();
    Ok(size as f64 / 1_000_000.0)
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_files(&entry.path(), out)?;
        } else if file_type.is_file() {
            out.push(entry.path());
        }
    }
    Ok(())
}
