//! Run attributes that change how a run is shaped and drawn

use crate::{
    error::{GlyphRunError, Result},
    transform::ShapeTransform,
};

/// Attribute keys the painter looks up on a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKey {
    /// Extra spacing per character index, as a float
    Kerning,
    /// A [`ShapeTransform`] that back-slants the run
    OppositeItalic,
    /// A [`ShapeTransform`] that stretches the run vertically
    ScaleTransform,
}

impl AttributeKey {
    /// The key's historical attribute name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kerning => "KEY_KERNING",
            Self::OppositeItalic => "KEY_OPPOSITE_ITALIC",
            Self::ScaleTransform => "KEY_SCALE_TRANSFORM",
        }
    }
}

/// What an attribute lookup can return
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Float(f64),
    Transform(ShapeTransform),
    Text(String),
}

/// Keyed attribute lookup for one run
pub trait AttributeSource {
    fn attribute(&self, key: AttributeKey) -> Option<AttributeValue>;
}

/// The kerning value of a run, if it has a numeric one
pub fn kerning(attrs: &dyn AttributeSource) -> Option<f32> {
    match attrs.attribute(AttributeKey::Kerning)? {
        AttributeValue::Float(k) => Some(k as f32),
        other => {
            log::warn!("Ignoring non-numeric {} value {:?}", AttributeKey::Kerning.as_str(), other);
            None
        },
    }
}

/// The shape transform for a run
///
/// At most one transform is honored. Opposite italic is checked first and
/// wins when both keys are present.
pub fn shape_transform(attrs: &dyn AttributeSource) -> Result<ShapeTransform> {
    for key in [AttributeKey::OppositeItalic, AttributeKey::ScaleTransform] {
        match attrs.attribute(key) {
            Some(AttributeValue::Transform(t)) => return Ok(t),
            Some(other) => {
                return Err(GlyphRunError::UnsupportedTransform {
                    key,
                    found: format!("{other:?}"),
                })
            },
            None => {},
        }
    }
    Ok(ShapeTransform::Identity)
}
