//! Snapshot and archive persistence
//!
//! Both artifacts are pretty-printed JSON objects keyed by post id. Writes go
//! to a temporary file in the target directory, are synced, and are then
//! renamed into place, so a crash never leaves a truncated artifact behind.

use crate::JanitorError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use untweet_domain::{ArchiveBundle, Timeline};

/// File name of the full-timeline snapshot
pub const SNAPSHOT_FILE_NAME: &str = "timeline_snapshot.json";

/// Timestamp format embedded in archive file names
pub const ARCHIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Archive file name for a run started at `at`
pub fn archive_file_name(at: DateTime<Utc>) -> String {
    format!("archived_posts_{}.json", at.format(ARCHIVE_TIMESTAMP_FORMAT))
}

/// Writes the full timeline, replacing the previous snapshot
#[derive(Debug, Clone)]
pub struct Snapshotter {
    path: PathBuf,
}

impl Snapshotter {
    /// Snapshot into `dir`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SNAPSHOT_FILE_NAME),
        }
    }

    /// Snapshot file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist every post of the timeline
    pub fn write(&self, timeline: &Timeline) -> Result<&Path, JanitorError> {
        write_json_atomic(&self.path, timeline, Replace::Overwrite).map_err(|source| {
            JanitorError::Snapshot {
                path: self.path.clone(),
                source,
            }
        })?;
        Ok(&self.path)
    }
}

/// Proof that the posts about to be deleted are durably archived
///
/// Only [`Archiver::write`] creates one, and the deletion stage requires it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReceipt {
    path: PathBuf,
    posts: usize,
}

impl ArchiveReceipt {
    /// Archive file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of archived posts
    pub fn posts(&self) -> usize {
        self.posts
    }
}

/// Writes the posts selected for deletion to a per-run file
#[derive(Debug, Clone)]
pub struct Archiver {
    dir: PathBuf,
}

impl Archiver {
    /// Archive into `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Persist the bundle under a name derived from `at`
    ///
    /// An empty bundle writes nothing and returns `Ok(None)`. An existing
    /// file with the same name is never replaced; the collision is reported
    /// as an archive write failure.
    pub fn write(
        &self,
        bundle: &ArchiveBundle<'_>,
        at: DateTime<Utc>,
    ) -> Result<Option<ArchiveReceipt>, JanitorError> {
        if bundle.is_empty() {
            return Ok(None);
        }

        let path = self.dir.join(archive_file_name(at));
        write_json_atomic(&path, bundle, Replace::Never).map_err(|source| {
            JanitorError::ArchiveWrite {
                path: path.clone(),
                source,
            }
        })?;

        Ok(Some(ArchiveReceipt {
            path,
            posts: bundle.len(),
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Replace {
    Overwrite,
    Never,
}

fn write_json_atomic<T>(path: &Path, value: &T, replace: Replace) -> io::Result<()>
where
    T: Serialize + ?Sized,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;

    match replace {
        Replace::Overwrite => temp.persist(path)?,
        Replace::Never => temp.persist_noclobber(path)?,
    };

    // Make the rename itself durable
    #[cfg(unix)]
    std::fs::File::open(dir)?.sync_all()?;

    Ok(())
}
