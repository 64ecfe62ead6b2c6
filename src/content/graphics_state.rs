//! Graphics state for content stream interpretation.
//!
//! Only the parts of the state that move text are tracked: the current
//! transformation matrix, the text matrices and the text state parameters.

use crate::geometry::Point;

/// A 2D transformation matrix.
///
/// PDF uses matrices of the form:
/// ```text
/// [ a  b  0 ]
/// [ c  d  0 ]
/// [ e  f  1 ]
/// ```
///
/// Points are row vectors, so `p × M` transforms `p`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    /// Horizontal scaling component
    pub a: f32,
    /// Rotation/skew component
    pub b: f32,
    /// Rotation/skew component
    pub c: f32,
    /// Vertical scaling component
    pub d: f32,
    /// Horizontal translation
    pub e: f32,
    /// Vertical translation
    pub f: f32,
}

impl Matrix {
    /// Create a matrix from its six components.
    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Create an identity matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_partmark::content::Matrix;
    ///
    /// let m = Matrix::identity();
    /// assert_eq!(m.a, 1.0);
    /// assert_eq!(m.d, 1.0);
    /// assert_eq!(m.e, 0.0);
    /// ```
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Create a translation matrix.
    pub fn translation(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Create a scaling matrix.
    pub fn scaling(sx: f32, sy: f32) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Concatenate `self × other`: the result applies `self` first, then `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_partmark::content::Matrix;
    ///
    /// let m = Matrix::scaling(2.0, 2.0).multiply(&Matrix::translation(10.0, 0.0));
    /// let p = m.transform_point(1.0, 1.0);
    /// assert_eq!((p.x, p.y), (12.0, 2.0));
    /// ```
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Transform a point using this matrix.
    pub fn transform_point(&self, x: f32, y: f32) -> Point {
        Point {
            x: self.a * x + self.c * y + self.e,
            y: self.b * x + self.d * y + self.f,
        }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

/// Graphics state parameters that affect text placement.
#[derive(Debug, Clone)]
pub struct GraphicsState {
    /// Current transformation matrix (maps user space to device space)
    pub ctm: Matrix,
    /// Text matrix (maps text space to user space)
    pub text_matrix: Matrix,
    /// Text line matrix (saved position at start of line)
    pub text_line_matrix: Matrix,
    /// Character spacing (Tc)
    pub char_space: f32,
    /// Word spacing (Tw)
    pub word_space: f32,
    /// Horizontal scaling percentage (Tz)
    pub horizontal_scaling: f32,
    /// Text leading (TL)
    pub leading: f32,
    /// Current font resource name
    pub font_name: Option<Vec<u8>>,
    /// Current font size (Tf)
    pub font_size: f32,
    /// Text rise (Ts)
    pub text_rise: f32,
}

impl GraphicsState {
    /// Create a graphics state with PDF defaults and the given CTM.
    pub fn with_ctm(ctm: Matrix) -> Self {
        Self {
            ctm,
            text_matrix: Matrix::identity(),
            text_line_matrix: Matrix::identity(),
            char_space: 0.0,
            word_space: 0.0,
            horizontal_scaling: 100.0,
            leading: 0.0,
            font_name: None,
            font_size: 12.0,
            text_rise: 0.0,
        }
    }

    /// Move to the start of the next line, offset by `(tx, ty)` from the
    /// current line start.
    pub fn move_line(&mut self, tx: f32, ty: f32) {
        self.text_line_matrix = Matrix::translation(tx, ty).multiply(&self.text_line_matrix);
        self.text_matrix = self.text_line_matrix;
    }

    /// Advance the text position horizontally by `tx` text space units.
    pub fn advance(&mut self, tx: f32) {
        self.text_matrix = Matrix::translation(tx, 0.0).multiply(&self.text_matrix);
    }

    /// Text rendering matrix: maps glyph space, in font size units, to
    /// device space.
    pub fn rendering_matrix(&self) -> Matrix {
        let params = Matrix::new(
            self.font_size * self.horizontal_scaling / 100.0,
            0.0,
            0.0,
            self.font_size,
            0.0,
            self.text_rise,
        );
        params.multiply(&self.text_matrix).multiply(&self.ctm)
    }
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self::with_ctm(Matrix::identity())
    }
}

/// Stack of graphics states for `q`/`Q`.
#[derive(Debug, Clone, Default)]
pub struct GraphicsStateStack {
    current: GraphicsState,
    saved: Vec<GraphicsState>,
}

impl GraphicsStateStack {
    /// Create a stack whose initial state uses the given CTM.
    pub fn new(ctm: Matrix) -> Self {
        Self {
            current: GraphicsState::with_ctm(ctm),
            saved: Vec::new(),
        }
    }

    /// Current graphics state.
    pub fn current(&self) -> &GraphicsState {
        &self.current
    }

    /// Mutable current graphics state.
    pub fn current_mut(&mut self) -> &mut GraphicsState {
        &mut self.current
    }

    /// Save the current state (`q`).
    pub fn save(&mut self) {
        self.saved.push(self.current.clone());
    }

    /// Restore the last saved state (`Q`). Unbalanced restores are ignored.
    pub fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.current = state;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_multiply_order() {
        let m = Matrix::translation(10.0, 20.0).multiply(&Matrix::scaling(2.0, 3.0));
        let p = m.transform_point(1.0, 1.0);
        assert_eq!(p.x, 22.0);
        assert_eq!(p.y, 63.0);
    }

    #[test]
    fn test_move_line_accumulates() {
        let mut state = GraphicsState::default();
        state.move_line(72.0, 700.0);
        state.advance(30.0);
        state.move_line(0.0, -14.0);
        assert_eq!(state.text_matrix.e, 72.0);
        assert_eq!(state.text_matrix.f, 686.0);
    }

    #[test]
    fn test_advance_follows_text_matrix_scale() {
        let mut state = GraphicsState::default();
        state.text_matrix = Matrix::new(2.0, 0.0, 0.0, 2.0, 100.0, 100.0);
        state.advance(5.0);
        assert_eq!(state.text_matrix.e, 110.0);
    }

    #[test]
    fn test_rendering_matrix_applies_size_and_rise() {
        let mut state = GraphicsState::default();
        state.font_size = 10.0;
        state.text_rise = 2.0;
        state.move_line(50.0, 100.0);
        let p = state.rendering_matrix().transform_point(1.0, 0.0);
        assert_eq!(p.x, 60.0);
        assert_eq!(p.y, 102.0);
    }

    #[test]
    fn test_stack_save_restore() {
        let mut stack = GraphicsStateStack::default();
        stack.current_mut().font_size = 9.0;
        stack.save();
        stack.current_mut().font_size = 14.0;
        stack.restore();
        assert_eq!(stack.current().font_size, 9.0);
    }

    #[test]
    fn test_unbalanced_restore_keeps_current_state() {
        let mut stack = GraphicsStateStack::default();
        stack.current_mut().font_size = 9.0;
        stack.restore();
        assert_eq!(stack.current().font_size, 9.0);
    }
}
