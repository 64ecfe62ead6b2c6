//! Stroked border outlines appended to page content.

use super::highlight::reals;
use crate::color::Rgb;
use lopdf::content::Operation;

/// A closed, unfilled outline in PDF user space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderPath {
    /// Corners in drawing order
    pub corners: [(f32, f32); 4],
    /// Stroke color
    pub color: Rgb,
    /// Line width
    pub width: f32,
}

impl BorderPath {
    /// Create an outline from corners given in `ul, ur, ll, lr` order.
    pub fn from_quad_corners(
        ul: (f32, f32),
        ur: (f32, f32),
        ll: (f32, f32),
        lr: (f32, f32),
        color: Rgb,
        width: f32,
    ) -> Self {
        Self {
            corners: [ul, ur, lr, ll],
            color,
            width,
        }
    }

    /// Operators stroking the outline inside its own `q … Q` pair.
    pub fn operations(&self) -> Vec<Operation> {
        let [r, g, b] = self.color.to_array();
        let [first, rest @ ..] = self.corners;

        let mut ops = vec![
            Operation::new("q", vec![]),
            Operation::new("w", reals(&[self.width])),
            Operation::new("RG", reals(&[r, g, b])),
            Operation::new("m", reals(&[first.0, first.1])),
        ];
        for (x, y) in rest {
            ops.push(Operation::new("l", reals(&[x, y])));
        }
        ops.push(Operation::new("h", vec![]));
        ops.push(Operation::new("S", vec![]));
        ops.push(Operation::new("Q", vec![]));
        ops
    }
}
