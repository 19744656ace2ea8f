//! Fallback values for data a document leaves out.

use std::fmt;

use crate::detection::Version;

use super::geometry::{Geometry, Position, Size};

/// Canvas of documents that do not state a presentation size.
pub const DEFAULT_CANVAS: Size = Size::new(1024.0, 768.0);

/// Shape size used when a modern document gives none.
pub const DEFAULT_SHAPE_SIZE: Size = Size::new(100.0, 100.0);

/// Per-version strategy filling in missing presentation and geometry values.
pub trait Defaults: fmt::Debug {
    fn presentation_size(&self, size: &mut Option<Size>);

    fn geometry(&self, geometry: &mut Geometry, canvas: Size);
}

/// Version 1 documents carry all their values; nothing is filled in.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyDefaults;

impl Defaults for LegacyDefaults {
    fn presentation_size(&self, _size: &mut Option<Size>) {}

    fn geometry(&self, _geometry: &mut Geometry, _canvas: Size) {}
}

/// Defaults of the unified format: a 1024×768 canvas, shapes anchored at the
/// bottom-right corner.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModernDefaults;

impl Defaults for ModernDefaults {
    fn presentation_size(&self, size: &mut Option<Size>) {
        size.get_or_insert(DEFAULT_CANVAS);
    }

    fn geometry(&self, geometry: &mut Geometry, canvas: Size) {
        if geometry.natural_size.is_none() {
            geometry.natural_size = Some(geometry.size.unwrap_or(DEFAULT_SHAPE_SIZE));
        }
        if geometry.position.is_none() {
            let extent = geometry.extent();
            geometry.position = Some(Position::new(
                canvas.width - extent.width,
                canvas.height - extent.height,
            ));
        }
    }
}

static LEGACY: LegacyDefaults = LegacyDefaults;
static MODERN: ModernDefaults = ModernDefaults;

/// Strategy for `version`.
pub fn for_version(version: Version) -> &'static dyn Defaults {
    if version.is_legacy() { &LEGACY } else { &MODERN }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modern_fills_size_and_anchors_bottom_right() {
        let defaults = for_version(Version::V5);
        let mut size = None;
        defaults.presentation_size(&mut size);
        assert_eq!(size, Some(DEFAULT_CANVAS));

        let mut geometry = Geometry::default();
        defaults.geometry(&mut geometry, DEFAULT_CANVAS);
        assert_eq!(geometry.natural_size, Some(DEFAULT_SHAPE_SIZE));
        assert_eq!(geometry.position, Some(Position::new(924.0, 668.0)));
    }

    #[test]
    fn test_modern_keeps_given_values() {
        let mut geometry = Geometry {
            size: Some(Size::new(20.0, 10.0)),
            position: Some(Position::new(1.0, 2.0)),
            ..Geometry::default()
        };
        ModernDefaults.geometry(&mut geometry, DEFAULT_CANVAS);
        assert_eq!(geometry.natural_size, Some(Size::new(20.0, 10.0)));
        assert_eq!(geometry.position, Some(Position::new(1.0, 2.0)));

        let mut size = Some(Size::new(800.0, 600.0));
        ModernDefaults.presentation_size(&mut size);
        assert_eq!(size, Some(Size::new(800.0, 600.0)));
    }

    #[test]
    fn test_legacy_is_inert() {
        let defaults = for_version(Version::V1);
        let mut size = None;
        defaults.presentation_size(&mut size);
        assert!(size.is_none());
        let mut geometry = Geometry::default();
        defaults.geometry(&mut geometry, DEFAULT_CANVAS);
        assert_eq!(geometry, Geometry::default());
    }
}
