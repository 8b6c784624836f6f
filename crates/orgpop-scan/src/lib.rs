mod discovery;
mod error;
mod extract;

pub use discovery::{FileDiscovery, MANIFEST_FILE, discover};
pub use error::{Error, Result};
pub use extract::{extract_file, extract_lines};
