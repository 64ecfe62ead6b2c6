//! Highlight annotations.
//!
//! Builds `/Subtype /Highlight` annotation dictionaries with a normal
//! appearance stream, so viewers that do not synthesize markup
//! appearances still show the highlight.

use crate::color::Rgb;
use crate::error::{Error, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Object, Stream};

/// Print flag (bit 3) of the annotation flags.
const FLAG_PRINT: i64 = 4;

/// Name of the graphics state used by the appearance stream.
const GS_NAME: &str = "GS0";

/// A highlight annotation in PDF user space.
///
/// Each quad is 8 numbers `x1 y1 x2 y2 x3 y3 x4 y4` giving the upper-left,
/// upper-right, lower-left and lower-right corners, the order viewers use
/// for `QuadPoints`.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightAnnotation {
    quad_points: Vec<[f32; 8]>,
    color: Rgb,
    opacity: f32,
    creation_date: Option<String>,
}

impl HighlightAnnotation {
    /// Create a highlight covering the given quads.
    pub fn new(quad_points: Vec<[f32; 8]>, color: Rgb) -> Self {
        Self {
            quad_points,
            color,
            opacity: 1.0,
            creation_date: None,
        }
    }

    /// Set the opacity (0.0 = transparent, 1.0 = opaque).
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Stamp the annotation with the current local time.
    pub fn with_creation_date_now(mut self) -> Self {
        let now = chrono::Local::now();
        self.creation_date = Some(now.format("D:%Y%m%d%H%M%S").to_string());
        self
    }

    /// Bounding rectangle `[x0, y0, x1, y1]` of all quads.
    pub fn rect(&self) -> [f32; 4] {
        let mut rect = [f32::INFINITY, f32::INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY];
        for quad in &self.quad_points {
            for point in quad.chunks_exact(2) {
                rect[0] = rect[0].min(point[0]);
                rect[1] = rect[1].min(point[1]);
                rect[2] = rect[2].max(point[0]);
                rect[3] = rect[3].max(point[1]);
            }
        }
        if self.quad_points.is_empty() {
            [0.0; 4]
        } else {
            rect
        }
    }

    /// Build the annotation dictionary.
    ///
    /// `appearance` is the object holding the normal appearance stream, as
    /// returned by adding [`appearance_stream`](Self::appearance_stream) to
    /// the document.
    pub fn build(&self, appearance: Option<lopdf::ObjectId>) -> Dictionary {
        let [r, g, b] = self.color.to_array();
        let mut dict = dictionary! {
            "Type" => "Annot",
            "Subtype" => "Highlight",
            "Rect" => reals(&self.rect()),
            "QuadPoints" => self
                .quad_points
                .iter()
                .flat_map(|quad| quad.iter().map(|v| Object::from(*v)))
                .collect::<Vec<_>>(),
            "C" => reals(&[r, g, b]),
            "CA" => self.opacity,
            "F" => FLAG_PRINT,
        };

        if let Some(ref date) = self.creation_date {
            dict.set("CreationDate", Object::string_literal(date.as_str()));
            dict.set("M", Object::string_literal(date.as_str()));
        }

        if let Some(id) = appearance {
            dict.set("AP", dictionary! { "N" => Object::Reference(id) });
        }

        dict
    }

    /// Form XObject painting the quads with a multiply blend.
    pub fn appearance_stream(&self) -> Result<Stream> {
        let [r, g, b] = self.color.to_array();

        let mut operations = vec![
            Operation::new("gs", vec![Object::Name(GS_NAME.as_bytes().to_vec())]),
            Operation::new("rg", reals(&[r, g, b])),
        ];
        for quad in &self.quad_points {
            // ul, ur, lr, ll
            operations.push(Operation::new("m", reals(&[quad[0], quad[1]])));
            operations.push(Operation::new("l", reals(&[quad[2], quad[3]])));
            operations.push(Operation::new("l", reals(&[quad[6], quad[7]])));
            operations.push(Operation::new("l", reals(&[quad[4], quad[5]])));
            operations.push(Operation::new("h", vec![]));
        }
        operations.push(Operation::new("f", vec![]));

        let content = Content { operations }.encode().map_err(|e| {
            Error::OutputWrite(format!("Cannot encode highlight appearance: {}", e))
        })?;

        let ext_gstate = dictionary! {
            "Type" => "ExtGState",
            "BM" => "Multiply",
            "CA" => self.opacity,
            "ca" => self.opacity,
        };
        let form = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Form",
            "BBox" => reals(&self.rect()),
            "Resources" => dictionary! {
                "ExtGState" => dictionary! { GS_NAME => ext_gstate },
            },
        };

        Ok(Stream::new(form, content))
    }
}

/// Array of real numbers.
pub(crate) fn reals(values: &[f32]) -> Vec<Object> {
    values.iter().map(|v| Object::from(*v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotation() -> HighlightAnnotation {
        let quads = vec![[72.0, 712.0, 172.0, 712.0, 72.0, 700.0, 172.0, 700.0]];
        HighlightAnnotation::new(quads, Rgb::from_u8(255, 255, 0)).with_opacity(0.5)
    }

    #[test]
    fn test_rect_bounds_all_quads() {
        let quads = vec![
            [72.0, 712.0, 172.0, 712.0, 72.0, 700.0, 172.0, 700.0],
            [72.0, 698.0, 100.0, 698.0, 72.0, 686.0, 100.0, 686.0],
        ];
        let annot = HighlightAnnotation::new(quads, Rgb::from_u8(0, 0, 0));
        assert_eq!(annot.rect(), [72.0, 686.0, 172.0, 712.0]);
    }

    #[test]
    fn test_build_highlight_dict() {
        let dict = annotation().with_creation_date_now().build(None);

        assert!(matches!(dict.get(b"Subtype"), Ok(Object::Name(n)) if n == b"Highlight"));
        assert_eq!(dict.get(b"QuadPoints").unwrap().as_array().unwrap().len(), 8);
        assert!(matches!(dict.get(b"CA"), Ok(Object::Real(v)) if *v == 0.5));
        assert!(matches!(dict.get(b"F"), Ok(Object::Integer(4))));
        assert!(dict.get(b"CreationDate").is_ok());
        assert!(dict.get(b"AP").is_err());
    }

    #[test]
    fn test_build_links_appearance() {
        let dict = annotation().build(Some((9, 0)));
        let ap = dict.get(b"AP").unwrap().as_dict().unwrap();
        assert!(matches!(ap.get(b"N"), Ok(Object::Reference((9, 0)))));
    }

    #[test]
    fn test_appearance_stream_uses_multiply_blend() {
        let stream = annotation().appearance_stream().unwrap();
        let resources = stream.dict.get(b"Resources").unwrap().as_dict().unwrap();
        let gs = resources
            .get(b"ExtGState")
            .unwrap()
            .as_dict()
            .unwrap()
            .get(b"GS0")
            .unwrap()
            .as_dict()
            .unwrap();
        assert!(matches!(gs.get(b"BM"), Ok(Object::Name(n)) if n == b"Multiply"));

        let content = Content::decode(&stream.content).unwrap();
        let operators: Vec<&str> =
            content.operations.iter().map(|op| op.operator.as_str()).collect();
        assert_eq!(operators, vec!["gs", "rg", "m", "l", "l", "l", "h", "f"]);
    }
}
