use crate::{Config, Result};
use orgpop_index::EventIndex;
use orgpop_scan::{discover, extract_file};

/// Outcome of one full scan: the finished index plus scan statistics.
pub struct ScanReport {
    pub index: EventIndex,
    pub files_scanned: usize,
}

/// Build the event index for this invocation.
///
/// Roots are processed in configuration order, files in discovery order,
/// events in line order. Archive-flagged files are skipped before being
/// opened. Every discovery or extraction failure is fatal; nothing partial
/// is returned.
pub fn build_index(config: &Config) -> Result<ScanReport> {
    let mut index = EventIndex::new();
    let mut files_scanned = 0;

    for root in config.resolved_roots() {
        for source in discover(&root, &config.extension, &config.archive_suffix)? {
            let source = source?;
            if source.is_archive {
                continue;
            }

            for event in extract_file(&source.path)? {
                index.insert(event);
            }
            files_scanned += 1;
        }
    }

    Ok(ScanReport {
        index,
        files_scanned,
    })
}
