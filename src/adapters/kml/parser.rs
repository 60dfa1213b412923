//! Streaming KML parser
//!
//! Walks the document with `quick-xml` and groups Placemarks into layers:
//!
//! - every `<Folder>` is a layer, even when it holds no Placemarks
//! - a `<Document>` is a layer only when it directly holds Placemarks
//! - Placemarks outside any container land in a layer named after the file
//!
//! Layers keep the document order of their opening tags.

use crate::domain::{SourceFeature, SourceLayer};
use geo::{
    Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::BTreeMap;

/// Parse a KML document into layers
///
/// `default_name` names the Document layer when it has no `<name>` and the
/// layer of Placemarks found outside any container.
///
/// # Errors
///
/// Returns a description of the problem when the XML is malformed or the
/// document has no `<kml>` root element.
pub fn parse_kml(xml: &str, default_name: &str) -> Result<Vec<SourceLayer>, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut parser = KmlParser::new(default_name);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = local_name(&e);
                parser.start(&name, &e);
            }
            Ok(Event::Empty(e)) => {
                let name = local_name(&e);
                parser.start(&name, &e);
                parser.end(&name);
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                parser.end(&name);
            }
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_err(|e| format!("invalid text at byte {}: {e}", reader.buffer_position()))?;
                parser.text.push_str(&text);
            }
            Ok(Event::CData(c)) => {
                parser.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "malformed XML at byte {}: {e}",
                    reader.buffer_position()
                ))
            }
            Ok(_) => {}
        }
    }

    parser.finish()
}

/// Parse a `<coordinates>` body: whitespace separated `lon,lat[,alt]` tuples
///
/// Tuples that do not carry two finite numbers are dropped. The altitude is
/// read past and discarded; geometries are two-dimensional.
pub fn parse_coordinates(text: &str) -> Vec<Coord<f64>> {
    text.split_whitespace()
        .filter_map(|tuple| {
            let mut parts = tuple.split(',');
            let x = parts.next()?.trim().parse::<f64>().ok()?;
            let y = parts.next()?.trim().parse::<f64>().ok()?;
            (x.is_finite() && y.is_finite()).then_some(Coord { x, y })
        })
        .collect()
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn attribute(e: &BytesStart<'_>, key: &str) -> Option<String> {
    e.attributes().flatten().find_map(|attr| {
        if attr.key.local_name().as_ref() == key.as_bytes() {
            Some(
                attr.unescape_value()
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned()),
            )
        } else {
            None
        }
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContainerKind {
    Document,
    Folder,
}

struct Container {
    kind: ContainerKind,
    slot: usize,
    name: Option<String>,
    features: Vec<SourceFeature>,
}

enum GeometryBuilder {
    Point(Vec<Coord<f64>>),
    LineString(Vec<Coord<f64>>),
    LinearRing(Vec<Coord<f64>>),
    Polygon {
        exterior: Vec<Coord<f64>>,
        interiors: Vec<Vec<Coord<f64>>>,
    },
    Multi(Vec<Geometry<f64>>),
}

impl GeometryBuilder {
    fn for_element(name: &str) -> Option<Self> {
        match name {
            "Point" => Some(GeometryBuilder::Point(Vec::new())),
            "LineString" => Some(GeometryBuilder::LineString(Vec::new())),
            "LinearRing" => Some(GeometryBuilder::LinearRing(Vec::new())),
            "Polygon" => Some(GeometryBuilder::Polygon {
                exterior: Vec::new(),
                interiors: Vec::new(),
            }),
            "MultiGeometry" => Some(GeometryBuilder::Multi(Vec::new())),
            _ => None,
        }
    }

    fn set_coordinates(&mut self, coords: Vec<Coord<f64>>) {
        match self {
            GeometryBuilder::Point(c)
            | GeometryBuilder::LineString(c)
            | GeometryBuilder::LinearRing(c) => *c = coords,
            GeometryBuilder::Polygon { .. } | GeometryBuilder::Multi(_) => {}
        }
    }

    fn finish(self) -> Geometry<f64> {
        match self {
            GeometryBuilder::Point(coords) => match coords.first() {
                Some(c) => Geometry::Point(Point::from(*c)),
                // A point without coordinates is an empty geometry
                None => Geometry::MultiPoint(MultiPoint(Vec::new())),
            },
            GeometryBuilder::LineString(coords) | GeometryBuilder::LinearRing(coords) => {
                Geometry::LineString(LineString::new(coords))
            }
            GeometryBuilder::Polygon {
                exterior,
                interiors,
            } => Geometry::Polygon(Polygon::new(
                LineString::new(exterior),
                interiors.into_iter().map(LineString::new).collect(),
            )),
            GeometryBuilder::Multi(children) => collapse_multi(children),
        }
    }
}

/// Homogeneous MultiGeometry children become the matching Multi* type
fn collapse_multi(children: Vec<Geometry<f64>>) -> Geometry<f64> {
    if children.is_empty() {
        return Geometry::GeometryCollection(GeometryCollection(Vec::new()));
    }

    if children.iter().all(|g| matches!(g, Geometry::Point(_))) {
        let points = children
            .into_iter()
            .filter_map(|g| match g {
                Geometry::Point(p) => Some(p),
                _ => None,
            })
            .collect();
        return Geometry::MultiPoint(MultiPoint::new(points));
    }

    if children.iter().all(|g| matches!(g, Geometry::LineString(_))) {
        let lines = children
            .into_iter()
            .filter_map(|g| match g {
                Geometry::LineString(l) => Some(l),
                _ => None,
            })
            .collect();
        return Geometry::MultiLineString(MultiLineString::new(lines));
    }

    if children.iter().all(|g| matches!(g, Geometry::Polygon(_))) {
        let polygons = children
            .into_iter()
            .filter_map(|g| match g {
                Geometry::Polygon(p) => Some(p),
                _ => None,
            })
            .collect();
        return Geometry::MultiPolygon(MultiPolygon::new(polygons));
    }

    Geometry::GeometryCollection(GeometryCollection(children))
}

#[derive(Default)]
struct PlacemarkState {
    name: Option<String>,
    description: Option<String>,
    extended: BTreeMap<String, String>,
    geometry: Option<Geometry<f64>>,
    builders: Vec<GeometryBuilder>,
    data_name: Option<String>,
    simple_data_name: Option<String>,
}

impl PlacemarkState {
    fn attach(&mut self, geometry: Geometry<f64>) {
        match self.builders.last_mut() {
            Some(GeometryBuilder::Multi(children)) => children.push(geometry),
            Some(_) => {}
            None => {
                // Only the first top-level geometry of a Placemark counts
                if self.geometry.is_none() {
                    self.geometry = Some(geometry);
                }
            }
        }
    }

    fn into_feature(self) -> SourceFeature {
        let mut properties = self.extended;
        if let Some(name) = self.name {
            properties.insert("Name".to_string(), name);
        }
        if let Some(description) = self.description {
            properties.insert("Description".to_string(), description);
        }
        SourceFeature {
            geometry: self.geometry,
            properties,
        }
    }
}

struct KmlParser {
    default_name: String,
    path: Vec<String>,
    text: String,
    saw_root: bool,
    slots: Vec<Option<SourceLayer>>,
    containers: Vec<Container>,
    root_slot: Option<usize>,
    root_features: Vec<SourceFeature>,
    placemark: Option<PlacemarkState>,
}

impl KmlParser {
    fn new(default_name: &str) -> Self {
        Self {
            default_name: default_name.to_string(),
            path: Vec::new(),
            text: String::new(),
            saw_root: false,
            slots: Vec::new(),
            containers: Vec::new(),
            root_slot: None,
            root_features: Vec::new(),
            placemark: None,
        }
    }

    fn reserve_slot(&mut self) -> usize {
        self.slots.push(None);
        self.slots.len() - 1
    }

    fn start(&mut self, name: &str, e: &BytesStart<'_>) {
        match name {
            "kml" => self.saw_root = true,
            "Document" | "Folder" if self.placemark.is_none() => {
                let kind = if name == "Folder" {
                    ContainerKind::Folder
                } else {
                    ContainerKind::Document
                };
                let slot = self.reserve_slot();
                self.containers.push(Container {
                    kind,
                    slot,
                    name: None,
                    features: Vec::new(),
                });
            }
            "Placemark" => self.placemark = Some(PlacemarkState::default()),
            "Data" => {
                if let Some(pm) = self.placemark.as_mut() {
                    pm.data_name = attribute(e, "name");
                }
            }
            "SimpleData" => {
                if let Some(pm) = self.placemark.as_mut() {
                    pm.simple_data_name = attribute(e, "name");
                }
            }
            _ => {
                if let (Some(pm), Some(builder)) =
                    (self.placemark.as_mut(), GeometryBuilder::for_element(name))
                {
                    pm.builders.push(builder);
                }
            }
        }

        self.path.push(name.to_string());
        self.text.clear();
    }

    fn end(&mut self, name: &str) {
        let text = std::mem::take(&mut self.text);
        self.path.pop();
        let parent = self.path.last().cloned();
        let parent = parent.as_deref();

        match name {
            "name" => match parent {
                Some("Placemark") => {
                    if let Some(pm) = self.placemark.as_mut() {
                        pm.name = Some(text);
                    }
                }
                Some("Document") | Some("Folder") if self.placemark.is_none() => {
                    if let Some(container) = self.containers.last_mut() {
                        container.name = Some(text);
                    }
                }
                _ => {}
            },
            "description" if parent == Some("Placemark") => {
                if let Some(pm) = self.placemark.as_mut() {
                    pm.description = Some(text);
                }
            }
            "coordinates" => {
                if let Some(builder) = self
                    .placemark
                    .as_mut()
                    .and_then(|pm| pm.builders.last_mut())
                {
                    builder.set_coordinates(parse_coordinates(&text));
                }
            }
            "value" if parent == Some("Data") => {
                if let Some(pm) = self.placemark.as_mut() {
                    if let Some(key) = pm.data_name.clone() {
                        pm.extended.insert(key, text);
                    }
                }
            }
            "Data" => {
                if let Some(pm) = self.placemark.as_mut() {
                    pm.data_name = None;
                }
            }
            "SimpleData" => {
                if let Some(pm) = self.placemark.as_mut() {
                    if let Some(key) = pm.simple_data_name.take() {
                        pm.extended.insert(key, text);
                    }
                }
            }
            "Point" | "LineString" | "LinearRing" | "Polygon" | "MultiGeometry" => {
                self.end_geometry(parent);
            }
            "Placemark" => self.end_placemark(),
            "Document" | "Folder" if self.placemark.is_none() => self.close_container(),
            _ => {}
        }
    }

    fn end_geometry(&mut self, parent: Option<&str>) {
        let Some(pm) = self.placemark.as_mut() else {
            return;
        };
        let Some(builder) = pm.builders.pop() else {
            return;
        };

        match (builder, parent) {
            (GeometryBuilder::LinearRing(coords), Some("outerBoundaryIs")) => {
                if let Some(GeometryBuilder::Polygon { exterior, .. }) = pm.builders.last_mut() {
                    *exterior = coords;
                }
            }
            (GeometryBuilder::LinearRing(coords), Some("innerBoundaryIs")) => {
                if let Some(GeometryBuilder::Polygon { interiors, .. }) = pm.builders.last_mut() {
                    interiors.push(coords);
                }
            }
            (builder, _) => {
                let geometry = builder.finish();
                pm.attach(geometry);
            }
        }
    }

    fn end_placemark(&mut self) {
        let Some(pm) = self.placemark.take() else {
            return;
        };
        let feature = pm.into_feature();

        if let Some(container) = self.containers.last_mut() {
            container.features.push(feature);
            return;
        }

        if self.root_slot.is_none() {
            self.root_slot = Some(self.reserve_slot());
        }
        self.root_features.push(feature);
    }

    fn close_container(&mut self) {
        let Some(container) = self.containers.pop() else {
            return;
        };

        let layer = match container.kind {
            ContainerKind::Folder => {
                let name = container
                    .name
                    .unwrap_or_else(|| format!("Layer #{}", container.slot));
                Some(SourceLayer::new(name, container.features))
            }
            ContainerKind::Document if !container.features.is_empty() => {
                let name = container
                    .name
                    .unwrap_or_else(|| self.default_name.clone());
                Some(SourceLayer::new(name, container.features))
            }
            ContainerKind::Document => None,
        };

        self.slots[container.slot] = layer;
    }

    fn finish(mut self) -> Result<Vec<SourceLayer>, String> {
        if !self.saw_root {
            return Err("document has no <kml> root element".to_string());
        }

        while !self.containers.is_empty() {
            self.close_container();
        }

        if let Some(slot) = self.root_slot {
            let features = std::mem::take(&mut self.root_features);
            self.slots[slot] = Some(SourceLayer::new(self.default_name.clone(), features));
        }

        Ok(self.slots.into_iter().flatten().collect())
    }
}
