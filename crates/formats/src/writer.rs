//! Frequency-list writer
//!
//! In [`WriteMode::Atomic`] (the default) entries go to a temporary file
//! next to the destination, which is renamed over the destination only in
//! [`FreqListWriter::finish`]. A writer dropped before `finish` leaves the
//! destination untouched and the temporary file is removed. The committed
//! file keeps the permissions of the file it replaces, or gets the same
//! umask-derived permissions as a direct write.

use crate::{Error, FreqEntry, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};
use tracing::debug;

/// How the output file is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Write to a temp file and rename into place on success
    #[default]
    Atomic,
    /// Truncate and write the destination directly
    Direct,
}

enum Sink {
    Atomic(BufWriter<NamedTempFile>),
    Direct(BufWriter<File>),
}

/// Streaming writer for `word,frequency` lines
pub struct FreqListWriter {
    sink: Sink,
    path: PathBuf,
    records_written: usize,
}

impl FreqListWriter {
    /// Create an atomic writer for `path`
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::create_with_mode(path, WriteMode::Atomic)
    }

    /// Create a writer for `path` using the given mode
    pub fn create_with_mode<P: AsRef<Path>>(path: P, mode: WriteMode) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let sink = match mode {
            WriteMode::Atomic => {
                let dir = match path.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => parent,
                    _ => Path::new("."),
                };
                let temp = staging_file(&path, dir)?;
                debug!("Staging output for {:?} in {:?}", path, temp.path());
                Sink::Atomic(BufWriter::new(temp))
            }
            WriteMode::Direct => Sink::Direct(BufWriter::new(File::create(&path)?)),
        };

        Ok(Self {
            sink,
            path,
            records_written: 0,
        })
    }

    /// Append one entry
    pub fn write_entry(&mut self, entry: &FreqEntry) -> Result<()> {
        match &mut self.sink {
            Sink::Atomic(w) => writeln!(w, "{}", entry)?,
            Sink::Direct(w) => writeln!(w, "{}", entry)?,
        }
        self.records_written += 1;
        Ok(())
    }

    /// Number of entries written so far
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush everything and, for atomic writers, move the file into place.
    ///
    /// This must be called; an atomic writer that is dropped discards its
    /// output.
    pub fn finish(self) -> Result<()> {
        match self.sink {
            Sink::Atomic(w) => {
                let temp = w.into_inner().map_err(|e| Error::Io(e.into_error()))?;
                temp.as_file().sync_all()?;
                temp.persist(&self.path)?;
            }
            Sink::Direct(mut w) => {
                w.flush()?;
            }
        }
        debug!(
            "Wrote {} entries to {:?}",
            self.records_written, self.path
        );
        Ok(())
    }
}

/// Temp file in `dir` whose permissions match what `path` has, or would
/// get from [`File::create`]
fn staging_file(path: &Path, dir: &Path) -> Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(".trfreq");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Subject to the umask, like `File::create`.
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let temp = builder.tempfile_in(dir)?;

    if let Ok(existing) = fs::metadata(path) {
        temp.as_file().set_permissions(existing.permissions())?;
    }
    Ok(temp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_write_commits_on_finish() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tr_freq_list.txt");

        let mut writer = FreqListWriter::create(&path).unwrap();
        writer.write_entry(&FreqEntry::new("kalem", 5, 1)).unwrap();
        writer.write_entry(&FreqEntry::new("café", 3, 2)).unwrap();
        assert_eq!(writer.records_written(), 2);
        assert!(!path.exists());

        writer.finish().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "kalem,5\ncafé,3\n");
    }

    #[test]
    fn test_atomic_write_dropped_keeps_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "eski,2\n").unwrap();

        {
            let mut writer = FreqListWriter::create(&path).unwrap();
            writer.write_entry(&FreqEntry::new("yeni", 9, 1)).unwrap();
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "eski,2\n");
        // Only the previous output is left behind.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_atomic_write_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        for mode in [0o644, 0o640] {
            let path = dir.path().join(format!("out_{mode:o}.txt"));
            std::fs::write(&path, "eski,2\n").unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).unwrap();

            let mut writer = FreqListWriter::create(&path).unwrap();
            writer.write_entry(&FreqEntry::new("yeni", 9, 1)).unwrap();
            writer.finish().unwrap();

            let after = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
            assert_eq!(after, mode);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_atomic_write_new_file_matches_direct_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let atomic = dir.path().join("atomic.txt");
        let direct = dir.path().join("direct.txt");

        FreqListWriter::create(&atomic).unwrap().finish().unwrap();
        FreqListWriter::create_with_mode(&direct, WriteMode::Direct)
            .unwrap()
            .finish()
            .unwrap();

        let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&atomic), mode(&direct));
    }

    #[test]
    fn test_direct_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("direct.txt");

        let mut writer = FreqListWriter::create_with_mode(&path, WriteMode::Direct).unwrap();
        writer.write_entry(&FreqEntry::new("ev", 4, 1)).unwrap();
        writer.finish().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "ev,4\n");
    }

    #[test]
    fn test_empty_output_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");

        FreqListWriter::create(&path).unwrap().finish().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.txt");
        assert!(FreqListWriter::create(&path).is_err());
    }
}
