//! Database backups taken with `VACUUM INTO`, so the copy is a consistent
//! snapshot even while the connection is open.

use crate::config::Config;
use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use crate::utils::prompt::confirm_overwrite;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Snapshot the database to `dest_file`. With `compress` the artifact
    /// is `dest_file` with a `.zip` extension, holding the snapshot under
    /// the database's own file name.
    ///
    /// Returns the artifact path, or `None` when the user kept an existing
    /// file.
    pub fn backup(
        pool: &DbPool,
        cfg: &Config,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        let artifact = if compress {
            Path::new(dest_file).with_extension("zip")
        } else {
            PathBuf::from(dest_file)
        };

        if artifact.exists() {
            if !force && !confirm_overwrite(&artifact)? {
                warning("Backup cancelled by user.");
                return Ok(None);
            }
            fs::remove_file(&artifact)?;
        }

        if let Some(parent) = artifact.parent() {
            fs::create_dir_all(parent)?;
        }

        if compress {
            let snapshot = artifact.with_extension("snapshot");
            fs::remove_file(&snapshot).ok();
            snapshot_to(pool, &snapshot)?;

            let entry = Path::new(&cfg.database)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "qrattend.sqlite".to_string());
            let zipped = zip_file(&snapshot, &entry, &artifact);
            fs::remove_file(&snapshot).ok();
            zipped?;
        } else {
            snapshot_to(pool, &artifact)?;
        }

        success(format!("Backup created: {}", artifact.display()));

        ttlog_or_warn(
            &pool.conn,
            "backup",
            &artifact.to_string_lossy(),
            if compress {
                "Compressed snapshot written"
            } else {
                "Snapshot written"
            },
        );

        Ok(Some(artifact))
    }
}

fn snapshot_to(pool: &DbPool, path: &Path) -> AppResult<()> {
    pool.conn
        .execute("VACUUM INTO ?1", [path.to_string_lossy().to_string()])?;
    Ok(())
}

fn zip_file(src: &Path, entry: &str, dest: &Path) -> AppResult<()> {
    let mut zip = ZipWriter::new(fs::File::create(dest)?);
    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file(entry, options)
        .map_err(|e| AppError::Io(std::io::Error::other(e)))?;
    std::io::copy(&mut fs::File::open(src)?, &mut zip)?;
    zip.finish()
        .map_err(|e| AppError::Io(std::io::Error::other(e)))?;

    Ok(())
}
