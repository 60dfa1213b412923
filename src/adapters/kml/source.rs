//! KML dataset opened from disk

use super::charset::decode_document;
use super::parser::parse_kml;
use crate::adapters::vector::{SourceDataset, VectorSource};
use crate::domain::{InvalidInputError, Result, SourceLayer};
use std::path::{Path, PathBuf};

/// Opens KML files
#[derive(Debug, Clone, Default)]
pub struct KmlSource;

impl KmlSource {
    pub fn new() -> Self {
        Self
    }
}

impl VectorSource for KmlSource {
    fn driver_name(&self) -> &str {
        "KML"
    }

    fn open(&self, path: &Path) -> Result<Box<dyn SourceDataset>> {
        let bytes = std::fs::read(path).map_err(|e| {
            InvalidInputError::OpenFailure(format!("{}: {}", path.display(), e))
        })?;
        let xml = decode_document(&bytes).map_err(|e| {
            InvalidInputError::OpenFailure(format!("{}: {}", path.display(), e))
        })?;

        let default_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "layer".to_string());

        let layers = parse_kml(&xml, &default_name).map_err(|e| {
            InvalidInputError::OpenFailure(format!("{}: {}", path.display(), e))
        })?;

        tracing::debug!(
            path = %path.display(),
            layers = layers.len(),
            "Opened KML dataset"
        );

        Ok(Box::new(KmlDataset {
            path: path.to_path_buf(),
            layers,
            closed: false,
        }))
    }
}

/// A parsed KML document
#[derive(Debug)]
pub struct KmlDataset {
    path: PathBuf,
    layers: Vec<SourceLayer>,
    closed: bool,
}

impl SourceDataset for KmlDataset {
    fn layers(&self) -> &[SourceLayer] {
        &self.layers
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.layers = Vec::new();
        self.closed = true;
        tracing::debug!(path = %self.path.display(), "Closed KML dataset");
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PreprocessError;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_open_and_close() {
        let mut file = Builder::new().suffix(".kml").tempfile().unwrap();
        write!(
            file,
            "<kml><Folder><name>a</name><Placemark><Point><coordinates>1,2</coordinates></Point></Placemark></Folder></kml>"
        )
        .unwrap();
        file.flush().unwrap();

        let mut dataset = KmlSource::new().open(file.path()).unwrap();
        assert_eq!(dataset.layer_count(), 1);
        assert!(!dataset.is_closed());

        dataset.close();
        dataset.close();
        assert!(dataset.is_closed());
        assert_eq!(dataset.layer_count(), 0);
    }

    #[test]
    fn test_open_missing_file_is_open_failure() {
        let Err(err) = KmlSource::new().open(Path::new("/nonexistent/input.kml")) else {
            panic!("expected missing file to fail");
        };
        assert!(matches!(
            err,
            PreprocessError::InvalidInput(InvalidInputError::OpenFailure(_))
        ));
    }

    #[test]
    fn test_open_garbage_is_open_failure() {
        let mut file = Builder::new().suffix(".kml").tempfile().unwrap();
        file.write_all(b"this is not xml <<<").unwrap();
        file.flush().unwrap();

        let Err(err) = KmlSource::new().open(file.path()) else {
            panic!("expected garbage to fail");
        };
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_open_latin1_document() {
        let mut file = Builder::new().suffix(".kml").tempfile().unwrap();
        file.write_all(b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<kml><Folder><name>Caf\xE9s</name>")
            .unwrap();
        file.write_all(b"<Placemark><name>Z\xFCrich</name><Point><coordinates>8.54,47.37</coordinates></Point></Placemark>")
            .unwrap();
        file.write_all(b"</Folder></kml>").unwrap();
        file.flush().unwrap();

        let dataset = KmlSource::new().open(file.path()).unwrap();
        let layer = &dataset.layers()[0];
        assert_eq!(layer.name(), "Cafés");
        let feature = layer.features().next().unwrap();
        assert_eq!(feature.properties.get("Name").unwrap(), "Zürich");
    }
}
