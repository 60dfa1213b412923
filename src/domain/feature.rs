//! Source features, layers and geometry metadata
//!
//! These are the records the vector reader hands to the pipeline. Geometry is
//! represented with the `geo` crate so emptiness and extent come from the
//! geometry library rather than from this crate.

use geo::Geometry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Layer-level geometry type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryType {
    /// Mixed geometry kinds, or no geometry at all
    Unknown,
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    /// Returns the geometry type of a single geometry
    pub fn of(geometry: &Geometry<f64>) -> Self {
        match geometry {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::Line(_) | Geometry::LineString(_) => GeometryType::LineString,
            Geometry::Polygon(_) | Geometry::Rect(_) | Geometry::Triangle(_) => {
                GeometryType::Polygon
            }
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// Returns the shared type of all present geometries, or `Unknown`
    pub fn common<'a>(geometries: impl IntoIterator<Item = &'a Geometry<f64>>) -> Self {
        let mut common = None;
        for geometry in geometries {
            let kind = Self::of(geometry);
            match common {
                None => common = Some(kind),
                Some(existing) if existing != kind => return GeometryType::Unknown,
                Some(_) => {}
            }
        }
        common.unwrap_or(GeometryType::Unknown)
    }

    /// Returns the name as used by OGC simple features
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryType::Unknown => "Unknown",
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One source record: optional geometry plus string attributes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceFeature {
    /// Geometry, if the record carries one
    pub geometry: Option<Geometry<f64>>,

    /// Attribute values keyed by field name
    pub properties: BTreeMap<String, String>,
}

impl SourceFeature {
    /// Creates a feature with the given geometry and no attributes
    pub fn new(geometry: Option<Geometry<f64>>) -> Self {
        Self {
            geometry,
            properties: BTreeMap::new(),
        }
    }

    /// Adds an attribute
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// A named, homogeneous collection of features
#[derive(Debug, Clone, PartialEq)]
pub struct SourceLayer {
    name: String,
    geometry_type: GeometryType,
    features: Vec<SourceFeature>,
}

impl SourceLayer {
    /// Creates a layer, deriving its geometry type from the features
    pub fn new(name: impl Into<String>, features: Vec<SourceFeature>) -> Self {
        let geometry_type = GeometryType::common(features.iter().filter_map(|f| f.geometry.as_ref()));
        Self {
            name: name.into(),
            geometry_type,
            features,
        }
    }

    /// Raw layer name as found in the source
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry_type(&self) -> GeometryType {
        self.geometry_type
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    pub fn features(&self) -> impl Iterator<Item = &SourceFeature> {
        self.features.iter()
    }

    /// Union of attribute names across all features, sorted
    pub fn field_names(&self) -> Vec<String> {
        let mut fields: Vec<String> = self
            .features
            .iter()
            .flat_map(|f| f.properties.keys().cloned())
            .collect();
        fields.sort();
        fields.dedup();
        fields
    }
}

/// Reference system every output document is declared in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetCrs {
    /// URN written into the output document
    pub urn: String,
}

impl TargetCrs {
    /// WGS84 longitude/latitude
    pub fn wgs84() -> Self {
        Self {
            urn: "urn:ogc:def:crs:OGC:1.3:CRS84".to_string(),
        }
    }
}

impl Default for TargetCrs {
    fn default() -> Self {
        Self::wgs84()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, point};

    #[test]
    fn test_layer_geometry_type_homogeneous() {
        let layer = SourceLayer::new(
            "points",
            vec![
                SourceFeature::new(Some(Geometry::Point(point!(x: 1.0, y: 2.0)))),
                SourceFeature::new(None),
                SourceFeature::new(Some(Geometry::Point(point!(x: 3.0, y: 4.0)))),
            ],
        );
        assert_eq!(layer.geometry_type(), GeometryType::Point);
        assert_eq!(layer.feature_count(), 3);
    }

    #[test]
    fn test_layer_geometry_type_mixed() {
        let layer = SourceLayer::new(
            "mixed",
            vec![
                SourceFeature::new(Some(Geometry::Point(point!(x: 1.0, y: 2.0)))),
                SourceFeature::new(Some(Geometry::LineString(line_string![
                    (x: 0.0, y: 0.0),
                    (x: 1.0, y: 1.0)
                ]))),
            ],
        );
        assert_eq!(layer.geometry_type(), GeometryType::Unknown);
    }

    #[test]
    fn test_empty_layer_is_unknown() {
        let layer = SourceLayer::new("empty", vec![]);
        assert_eq!(layer.geometry_type(), GeometryType::Unknown);
        assert_eq!(layer.feature_count(), 0);
    }

    #[test]
    fn test_field_names_union() {
        let layer = SourceLayer::new(
            "attrs",
            vec![
                SourceFeature::new(None).with_property("Name", "a"),
                SourceFeature::new(None)
                    .with_property("Name", "b")
                    .with_property("Description", "c"),
            ],
        );
        assert_eq!(layer.field_names(), vec!["Description", "Name"]);
    }

    #[test]
    fn test_target_crs_default() {
        let crs = TargetCrs::default();
        assert_eq!(crs.urn, "urn:ogc:def:crs:OGC:1.3:CRS84");
    }
}
