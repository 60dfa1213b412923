//! File descriptors used by the selecting framework
//!
//! The outer job framework inspects an upload, produces a [`FileInfo`] and
//! asks each preprocessor whether it accepts it.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of leading bytes inspected when sniffing a file type
const SNIFF_LEN: usize = 1024;

/// Declared type of an input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Lowercase file type token, e.g. `kml`, `geojson`, `csv`
    pub filetype: String,

    /// Size in bytes
    #[serde(default)]
    pub size: u64,
}

impl FileInfo {
    /// Creates a FileInfo with a declared type
    pub fn new(filetype: impl Into<String>) -> Self {
        Self {
            filetype: filetype.into().to_lowercase(),
            size: 0,
        }
    }

    /// Inspects a file on disk
    ///
    /// A file whose header carries a `<kml` root element is typed `kml`
    /// regardless of its extension. Otherwise the lowercase extension is used,
    /// or `unknown` when there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        let size = file.metadata()?.len();

        let mut head = Vec::with_capacity(SNIFF_LEN);
        file.by_ref().take(SNIFF_LEN as u64).read_to_end(&mut head)?;

        let filetype = if looks_like_kml(&head) {
            "kml".to_string()
        } else {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.to_lowercase())
                .unwrap_or_else(|| "unknown".to_string())
        };

        Ok(Self { filetype, size })
    }
}

fn looks_like_kml(head: &[u8]) -> bool {
    let text = String::from_utf8_lossy(head).to_lowercase();
    text.trim_start_matches('\u{feff}')
        .trim_start()
        .starts_with('<')
        && text.contains("<kml")
}
