//! Digest computed by re-opening the original file

use super::{MetadataDigester, MetadataRecord, VectorLayer, VectorLayers};
use crate::adapters::vector::VectorSource;
use crate::core::convert::{sanitize, UniqueNames};
use crate::core::provenance::checksum::calculate_checksum_bytes;
use crate::domain::{PreprocessError, Result};
use async_trait::async_trait;
use geo::{BoundingRect, Coord, Rect};
use std::path::Path;
use std::sync::Arc;

/// proj4 string for WGS84 longitude/latitude
const WGS84_PROJ4: &str = "+proj=longlat +ellps=WGS84 +datum=WGS84 +no_defs";

/// Digests a file by reading its bytes and re-opening it with a vector source
#[derive(Clone)]
pub struct FileDigester {
    source: Arc<dyn VectorSource>,
}

impl FileDigester {
    pub fn new(source: Arc<dyn VectorSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl MetadataDigester for FileDigester {
    async fn digest(&self, path: &Path) -> Result<MetadataRecord> {
        let source = Arc::clone(&self.source);
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || digest_file(source.as_ref(), &path))
            .await
            .map_err(|e| PreprocessError::Internal(format!("digest task failed: {e}")))?
    }
}

fn digest_file(source: &dyn VectorSource, path: &Path) -> Result<MetadataRecord> {
    let bytes = std::fs::read(path)?;
    let sha256 = calculate_checksum_bytes(&bytes);

    let mut dataset = source.open(path)?;

    let mut extent: Option<Rect<f64>> = None;
    let mut layers = Vec::with_capacity(dataset.layer_count());
    let mut vector_layers = Vec::with_capacity(dataset.layer_count());
    let mut names = UniqueNames::new();

    for layer in dataset.layers() {
        for rect in layer
            .features()
            .filter_map(|f| f.geometry.as_ref())
            .filter_map(|g| g.bounding_rect())
        {
            extent = Some(match extent {
                Some(current) => union(current, rect),
                None => rect,
            });
        }

        layers.push(layer.name().to_string());
        vector_layers.push(VectorLayer {
            id: names.claim(&sanitize(layer.name())),
            description: layer.name().to_string(),
            fields: layer
                .field_names()
                .into_iter()
                .map(|field| (field, "String".to_string()))
                .collect(),
        });
    }
    dataset.close();

    let filetype = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default();

    Ok(MetadataRecord {
        filename: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        filesize: bytes.len() as u64,
        filetype,
        dstype: "gdal".to_string(),
        projection: WGS84_PROJ4.to_string(),
        extent: extent.map(|r| [r.min().x, r.min().y, r.max().x, r.max().y]),
        center: extent.map(|r| [r.center().x, r.center().y]),
        layers,
        json: VectorLayers { vector_layers },
        sha256,
    })
}

fn union(a: Rect<f64>, b: Rect<f64>) -> Rect<f64> {
    Rect::new(
        Coord {
            x: a.min().x.min(b.min().x),
            y: a.min().y.min(b.min().y),
        },
        Coord {
            x: a.max().x.max(b.max().x),
            y: a.max().y.max(b.max().y),
        },
    )
}
