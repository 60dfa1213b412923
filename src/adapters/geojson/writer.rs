//! Streaming GeoJSON FeatureCollection writer
//!
//! Features are appended one per line as they arrive, so a large layer is
//! never held in memory. The collection carries the layer `name` and a named
//! `crs` member.

use crate::adapters::vector::{OutputDocument, OutputDriver, OutputLayerSpec};
use crate::domain::{Result, SourceFeature};
use serde_json::{json, Value as JsonValue};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Creates GeoJSON output documents
#[derive(Debug, Clone, Default)]
pub struct GeoJsonDriver;

impl GeoJsonDriver {
    pub fn new() -> Self {
        Self
    }
}

impl OutputDriver for GeoJsonDriver {
    fn extension(&self) -> &str {
        "geojson"
    }

    fn create(&self, path: &Path, layer: &OutputLayerSpec<'_>) -> Result<Box<dyn OutputDocument>> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        let crs = json!({
            "type": "name",
            "properties": { "name": layer.crs.urn },
        });
        write!(
            writer,
            "{{\n\"type\": \"FeatureCollection\",\n\"name\": {},\n\"crs\": {},\n\"features\": [",
            serde_json::to_string(layer.name)?,
            serde_json::to_string(&crs)?
        )?;

        tracing::trace!(
            path = %path.display(),
            geometry_type = %layer.geometry_type,
            "Created GeoJSON document"
        );

        Ok(Box::new(GeoJsonDocument {
            path: path.to_path_buf(),
            writer,
            written: 0,
        }))
    }
}

/// A GeoJSON document open for writing
pub struct GeoJsonDocument {
    path: PathBuf,
    writer: BufWriter<File>,
    written: usize,
}

impl GeoJsonDocument {
    fn encode(feature: &SourceFeature) -> geojson::Feature {
        let geometry = feature
            .geometry
            .as_ref()
            .map(|g| geojson::Geometry::new(geojson::Value::from(g)));

        let properties: geojson::JsonObject = feature
            .properties
            .iter()
            .map(|(k, v)| (k.clone(), JsonValue::String(v.clone())))
            .collect();

        geojson::Feature {
            bbox: None,
            geometry,
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

impl OutputDocument for GeoJsonDocument {
    fn add_feature(&mut self, feature: &SourceFeature) -> Result<()> {
        let separator = if self.written == 0 { "\n" } else { ",\n" };
        self.writer.write_all(separator.as_bytes())?;
        serde_json::to_writer(&mut self.writer, &Self::encode(feature))?;
        self.written += 1;
        Ok(())
    }

    fn close(mut self: Box<Self>) -> Result<()> {
        self.writer.write_all(b"\n]\n}\n")?;
        self.writer.flush()?;
        tracing::trace!(
            path = %self.path.display(),
            features = self.written,
            "Closed GeoJSON document"
        );
        Ok(())
    }
}
