use crate::{Error, Result};
use orgpop_types::SourceFile;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Lines};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Manifest file listing the outline files of a root directory, one path
/// per non-empty line.
pub const MANIFEST_FILE: &str = ".agenda-files";

/// Resolve which files to scan under `root`.
///
/// When `<root>/.agenda-files` exists it is authoritative: every non-empty
/// line becomes one file, relative entries joined to the root, and no
/// filtering is applied. Without a manifest the root is listed
/// non-recursively for files with the given extension, excluding names
/// ending with the archive suffix.
///
/// Only the manifest probe can fail here; a missing manifest silently
/// falls back to the directory listing.
pub fn discover(root: &Path, extension: &str, archive_suffix: &str) -> Result<FileDiscovery> {
    let manifest_path = root.join(MANIFEST_FILE);
    let source = match File::open(&manifest_path) {
        Ok(file) => Source::Manifest {
            root: root.to_path_buf(),
            manifest_path,
            lines: BufReader::new(file).lines(),
        },
        Err(err) if err.kind() == ErrorKind::NotFound => Source::Listing {
            extension: extension.to_string(),
            walker: WalkDir::new(root)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
                .into_iter(),
        },
        Err(source) => {
            return Err(Error::Discover {
                root: root.to_path_buf(),
                source,
            });
        }
    };

    Ok(FileDiscovery {
        archive_suffix: archive_suffix.to_string(),
        source,
    })
}

/// Lazy, finite, single-pass sequence of files to scan.
pub struct FileDiscovery {
    archive_suffix: String,
    source: Source,
}

enum Source {
    Manifest {
        root: PathBuf,
        manifest_path: PathBuf,
        lines: Lines<BufReader<File>>,
    },
    Listing {
        extension: String,
        walker: walkdir::IntoIter,
    },
}

impl Iterator for FileDiscovery {
    type Item = Result<SourceFile>;

    fn next(&mut self) -> Option<Self::Item> {
        let archive_suffix = &self.archive_suffix;
        match &mut self.source {
            Source::Manifest {
                root,
                manifest_path,
                lines,
            } => loop {
                match lines.next()? {
                    Ok(line) => {
                        if line.is_empty() {
                            continue;
                        }
                        let entry = PathBuf::from(&line);
                        let path = if entry.is_absolute() {
                            entry
                        } else {
                            root.join(entry)
                        };
                        return Some(Ok(SourceFile::new(path, archive_suffix)));
                    }
                    Err(source) => {
                        return Some(Err(Error::Read {
                            path: manifest_path.clone(),
                            source,
                        }));
                    }
                }
            },
            Source::Listing { extension, walker } => loop {
                let entry = match walker.next()? {
                    Ok(entry) => entry,
                    // A listing is glob-like: unreadable entries are skipped,
                    // a missing root yields nothing.
                    Err(_) => continue,
                };

                if !entry.file_type().is_file() {
                    continue;
                }
                if entry.path().extension().is_none_or(|e| e != extension.as_str()) {
                    continue;
                }
                if entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| name.ends_with(archive_suffix.as_str()))
                {
                    continue;
                }

                return Some(Ok(SourceFile::new(entry.into_path(), archive_suffix)));
            },
        }
    }
}
