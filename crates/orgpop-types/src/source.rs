use std::path::PathBuf;

/// A file selected for scanning, with its archive status precomputed.
///
/// Discovery never filters manifest entries; it only computes the flag.
/// Archive files are skipped by the scan pipeline before being opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub is_archive: bool,
}

impl SourceFile {
    pub fn new(path: PathBuf, archive_suffix: &str) -> Self {
        let is_archive = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(archive_suffix));
        Self { path, is_archive }
    }
}
