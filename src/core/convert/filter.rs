//! Feature usability filter

use crate::domain::SourceFeature;
use geo::HasDimensions;

/// A feature is usable iff it has a geometry and that geometry is non-empty
///
/// Attributes play no part. Unusable features are skipped, never an error.
pub fn is_usable(feature: &SourceFeature) -> bool {
    feature
        .geometry
        .as_ref()
        .is_some_and(|geometry| !geometry.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, point, Geometry, LineString, MultiPoint, Polygon};

    #[test]
    fn test_point_is_usable() {
        let feature = SourceFeature::new(Some(Geometry::Point(point!(x: 1.0, y: 2.0))));
        assert!(is_usable(&feature));
    }

    #[test]
    fn test_missing_geometry_not_usable() {
        let feature = SourceFeature::new(None).with_property("Name", "no geometry");
        assert!(!is_usable(&feature));
    }

    #[test]
    fn test_empty_geometries_not_usable() {
        let empties = [
            Geometry::LineString(LineString::<f64>::new(vec![])),
            Geometry::MultiPoint(MultiPoint::<f64>::new(vec![])),
            Geometry::Polygon(Polygon::new(LineString::new(vec![]), vec![])),
        ];
        for geometry in empties {
            assert!(!is_usable(&SourceFeature::new(Some(geometry))));
        }
    }

    #[test]
    fn test_line_is_usable() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)];
        assert!(is_usable(&SourceFeature::new(Some(Geometry::LineString(line)))));
    }
}
