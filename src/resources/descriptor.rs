//! Flat, JSON-shaped sprite description.
//!
//! A descriptor carries what is needed to load a sprite again: its name,
//! transparency, named origin and sheet grid. Backend-derived fields (id,
//! size) are not part of it. A manifest is a JSON array of descriptors.
//!
//! ```json
//! { "name": "ship.png", "transparent": true, "origin": "Center", "imageNumber": { "X": 4, "Y": 1 } }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpriteError};
use crate::math::Point2i;
use crate::origin::Layout;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteDescriptor {
    pub name: String,
    #[serde(default)]
    pub transparent: bool,
    #[serde(default)]
    pub origin: Layout,
    #[serde(default = "one_by_one")]
    pub image_number: Point2i,
}

fn one_by_one() -> Point2i {
    Point2i::ONE
}

impl SpriteDescriptor {
    pub fn new(name: impl Into<String>, transparent: bool, origin: Layout) -> Self {
        Self {
            name: name.into(),
            transparent,
            origin,
            image_number: Point2i::ONE,
        }
    }

    pub fn with_image_number(mut self, image_number: Point2i) -> Self {
        self.image_number = image_number.at_least(1);
        self
    }

    /// Parse one descriptor. The grid is clamped to at least 1x1.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        let desc: SpriteDescriptor = serde_json::from_str(text)?;
        Ok(desc.clamped())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    fn clamped(mut self) -> Self {
        self.image_number = self.image_number.at_least(1);
        self
    }
}

/// Parse a manifest: a JSON array of descriptors.
pub fn parse_manifest(text: &str) -> serde_json::Result<Vec<SpriteDescriptor>> {
    let descs: Vec<SpriteDescriptor> = serde_json::from_str(text)?;
    Ok(descs.into_iter().map(SpriteDescriptor::clamped).collect())
}

pub fn read_manifest(path: &Path) -> Result<Vec<SpriteDescriptor>> {
    let manifest_err = |reason: String| SpriteError::Manifest {
        path: path.to_path_buf(),
        reason,
    };
    let text = fs::read_to_string(path).map_err(|e| manifest_err(e.to_string()))?;
    parse_manifest(&text).map_err(|e| manifest_err(e.to_string()))
}

pub fn write_manifest(path: &Path, descriptors: &[SpriteDescriptor]) -> Result<()> {
    let manifest_err = |reason: String| SpriteError::Manifest {
        path: path.to_path_buf(),
        reason,
    };
    let text = serde_json::to_string_pretty(descriptors).map_err(|e| manifest_err(e.to_string()))?;
    fs::write(path, text).map_err(|e| manifest_err(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let desc = SpriteDescriptor::new("ship.png", true, Layout::Center)
            .with_image_number(Point2i::new(4, 2));
        let json = desc.to_json().unwrap();
        assert_eq!(SpriteDescriptor::from_json(&json).unwrap(), desc);
    }

    #[test]
    fn test_field_names() {
        let json = SpriteDescriptor::new("a.png", false, Layout::BottomRight)
            .to_json()
            .unwrap();
        assert_eq!(
            json,
            r#"{"name":"a.png","transparent":false,"origin":"BottomRight","imageNumber":{"X":1,"Y":1}}"#
        );
    }

    #[test]
    fn test_defaults_when_fields_missing() {
        let desc = SpriteDescriptor::from_json(r#"{"name":"bg.png"}"#).unwrap();
        assert!(!desc.transparent);
        assert_eq!(desc.origin, Layout::TopLeft);
        assert_eq!(desc.image_number, Point2i::ONE);
    }

    #[test]
    fn test_image_number_clamped() {
        let desc = SpriteDescriptor::from_json(
            r#"{"name":"s.png","transparent":true,"origin":"Center","imageNumber":{"X":0,"Y":-3}}"#,
        )
        .unwrap();
        assert_eq!(desc.image_number, Point2i::ONE);
    }

    #[test]
    fn test_unknown_origin_rejected() {
        assert!(SpriteDescriptor::from_json(r#"{"name":"s.png","origin":"Middle"}"#).is_err());
    }

    #[test]
    fn test_manifest_parse() {
        let descs = parse_manifest(
            r#"[{"name":"a.png","origin":"TopCenter"},{"name":"b.png","imageNumber":{"X":3,"Y":0}}]"#,
        )
        .unwrap();
        assert_eq!(descs.len(), 2);
        assert_eq!(descs[0].origin, Layout::TopCenter);
        assert_eq!(descs[1].image_number, Point2i::new(3, 1));
    }

    #[test]
    fn test_missing_manifest_file() {
        let err = read_manifest(Path::new("./no/such/manifest.json")).unwrap_err();
        assert!(matches!(err, SpriteError::Manifest { .. }));
    }
}
