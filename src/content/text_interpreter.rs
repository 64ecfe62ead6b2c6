//! Content stream text interpretation.
//!
//! Runs the text and graphics state operators of a decoded content stream
//! and records one positioned [`Glyph`] per shown character code. Drawing
//! operators other than text are ignored.
//!
//! Character codes of simple fonts are decoded as Latin-1. Composite fonts
//! need a CMap to map codes to characters and are skipped.

use super::font_metrics::FontMetrics;
use super::graphics_state::{GraphicsState, GraphicsStateStack, Matrix};
use super::objects::{name, number, numbers};
use crate::geometry::Quad;
use crate::layout::Glyph;
use lopdf::content::Operation;
use lopdf::Object;
use std::collections::{HashMap, HashSet};

/// Bottom of a glyph box below the baseline, in em.
const DESCENT: f32 = 0.2;
/// Top of a glyph box above the baseline, in em.
const ASCENT: f32 = 0.8;

/// Interprets text operators into positioned glyphs.
#[derive(Debug)]
pub struct TextInterpreter {
    stack: GraphicsStateStack,
    fonts: HashMap<Vec<u8>, FontMetrics>,
    fallback_font: FontMetrics,
    warned: HashSet<Vec<u8>>,
    glyphs: Vec<Glyph>,
}

impl TextInterpreter {
    /// Create an interpreter.
    ///
    /// `ctm` maps user space to the glyph coordinates wanted by the caller;
    /// `fonts` maps font resource names to their metrics.
    pub fn new(ctm: Matrix, fonts: HashMap<Vec<u8>, FontMetrics>) -> Self {
        Self {
            stack: GraphicsStateStack::new(ctm),
            fonts,
            fallback_font: FontMetrics::default(),
            warned: HashSet::new(),
            glyphs: Vec::new(),
        }
    }

    /// Run a sequence of operations.
    pub fn run(&mut self, operations: &[Operation]) {
        for operation in operations {
            self.execute(operation);
        }
    }

    /// Glyphs recorded so far, in content order.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Consume the interpreter and return its glyphs.
    pub fn into_glyphs(self) -> Vec<Glyph> {
        self.glyphs
    }

    fn execute(&mut self, operation: &Operation) {
        let operands = operation.operands.as_slice();

        match operation.operator.as_str() {
            "q" => self.stack.save(),
            "Q" => self.stack.restore(),
            "cm" => {
                if let Some([a, b, c, d, e, f]) = six_numbers(operands) {
                    let state = self.stack.current_mut();
                    state.ctm = Matrix::new(a, b, c, d, e, f).multiply(&state.ctm);
                }
            },
            "BT" => {
                let state = self.stack.current_mut();
                state.text_matrix = Matrix::identity();
                state.text_line_matrix = Matrix::identity();
            },
            "ET" => {},
            "Tf" => {
                if let [font, size] = operands {
                    let state = self.stack.current_mut();
                    state.font_name = name(font).map(<[u8]>::to_vec);
                    if let Some(size) = number(size) {
                        state.font_size = size;
                    }
                }
            },
            "Td" => {
                if let Some([tx, ty]) = two_numbers(operands) {
                    self.stack.current_mut().move_line(tx, ty);
                }
            },
            "TD" => {
                if let Some([tx, ty]) = two_numbers(operands) {
                    let state = self.stack.current_mut();
                    state.leading = -ty;
                    state.move_line(tx, ty);
                }
            },
            "Tm" => {
                if let Some([a, b, c, d, e, f]) = six_numbers(operands) {
                    let state = self.stack.current_mut();
                    state.text_matrix = Matrix::new(a, b, c, d, e, f);
                    state.text_line_matrix = state.text_matrix;
                }
            },
            "T*" => self.next_line(),
            "TL" => self.set_number(operands, |state, v| state.leading = v),
            "Tc" => self.set_number(operands, |state, v| state.char_space = v),
            "Tw" => self.set_number(operands, |state, v| state.word_space = v),
            "Tz" => self.set_number(operands, |state, v| state.horizontal_scaling = v),
            "Ts" => self.set_number(operands, |state, v| state.text_rise = v),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    self.show_text(bytes);
                }
            },
            "'" => {
                self.next_line();
                if let Some(Object::String(bytes, _)) = operands.first() {
                    self.show_text(bytes);
                }
            },
            "\"" => {
                if let [word_space, char_space, Object::String(bytes, _)] = operands {
                    let state = self.stack.current_mut();
                    if let Some(v) = number(word_space) {
                        state.word_space = v;
                    }
                    if let Some(v) = number(char_space) {
                        state.char_space = v;
                    }
                    self.next_line();
                    self.show_text(bytes);
                }
            },
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    self.show_text_array(items);
                }
            },
            _ => {},
        }
    }

    fn set_number(&mut self, operands: &[Object], apply: impl FnOnce(&mut GraphicsState, f32)) {
        if let Some(value) = operands.first().and_then(number) {
            apply(self.stack.current_mut(), value);
        }
    }

    fn next_line(&mut self) {
        let state = self.stack.current_mut();
        let leading = state.leading;
        state.move_line(0.0, -leading);
    }

    fn show_text_array(&mut self, items: &[Object]) {
        for item in items {
            match item {
                Object::String(bytes, _) => self.show_text(bytes),
                other => {
                    if let Some(offset) = number(other) {
                        let state = self.stack.current_mut();
                        let tx =
                            -offset / 1000.0 * state.font_size * state.horizontal_scaling / 100.0;
                        state.advance(tx);
                    }
                },
            }
        }
    }

    fn show_text(&mut self, bytes: &[u8]) {
        let font_name = self.stack.current().font_name.clone().unwrap_or_default();
        let font = self.fonts.get(&font_name).unwrap_or(&self.fallback_font);

        if font.is_composite() {
            if self.warned.insert(font_name.clone()) {
                log::warn!(
                    "Skipping text in composite font '{}' ({})",
                    String::from_utf8_lossy(&font_name),
                    font.base_font()
                );
            }
            return;
        }

        for &code in bytes {
            let width = font.glyph_width(code);
            let state = self.stack.current();
            let trm = state.rendering_matrix();

            let ch = code as char;
            if !ch.is_control() {
                let corners = Quad::new(
                    trm.transform_point(0.0, ASCENT),
                    trm.transform_point(width, ASCENT),
                    trm.transform_point(0.0, -DESCENT),
                    trm.transform_point(width, -DESCENT),
                );
                self.glyphs.push(Glyph::new(ch, corners.rect()));
            }

            let mut tx = width * state.font_size + state.char_space;
            if code == b' ' {
                tx += state.word_space;
            }
            tx *= state.horizontal_scaling / 100.0;
            self.stack.current_mut().advance(tx);
        }
    }
}

fn two_numbers(operands: &[Object]) -> Option<[f32; 2]> {
    match numbers(operands)?.as_slice() {
        [a, b] => Some([*a, *b]),
        _ => None,
    }
}

fn six_numbers(operands: &[Object]) -> Option<[f32; 6]> {
    match numbers(operands)?.as_slice() {
        [a, b, c, d, e, f] => Some([*a, *b, *c, *d, *e, *f]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::Content;

    /// Monospace font, half an em per glyph.
    fn mono() -> HashMap<Vec<u8>, FontMetrics> {
        let mut fonts = HashMap::new();
        fonts.insert(b"F1".to_vec(), FontMetrics::uniform("Mono", 500.0));
        fonts
    }

    fn run(stream: &str) -> Vec<Glyph> {
        let content = Content::decode(stream.as_bytes()).unwrap();
        let mut interpreter = TextInterpreter::new(Matrix::identity(), mono());
        interpreter.run(&content.operations);
        interpreter.into_glyphs()
    }

    #[test]
    fn test_tj_positions_monospace_glyphs() {
        let glyphs = run("BT /F1 10 Tf 100 700 Td (AB) Tj ET");
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].ch, 'A');
        assert_eq!(glyphs[0].rect.x, 100.0);
        assert_eq!(glyphs[1].rect.x, 105.0);
        assert_eq!(glyphs[1].rect.width, 5.0);
        assert_eq!(glyphs[0].rect.y, 698.0);
        assert_eq!(glyphs[0].rect.height, 10.0);
    }

    #[test]
    fn test_tj_array_offsets_move_pen() {
        let glyphs = run("BT /F1 10 Tf 0 0 Td [(A) -1000 (B)] TJ ET");
        assert_eq!(glyphs[1].rect.x, 15.0);
    }

    #[test]
    fn test_next_line_uses_leading() {
        let glyphs = run("BT /F1 10 Tf 14 TL 50 500 Td (A) Tj T* (B) Tj T* (C) Tj ET");
        let baselines: Vec<f32> = glyphs.iter().map(|g| g.rect.y + 2.0).collect();
        assert_eq!(baselines, vec![500.0, 486.0, 472.0]);
        assert_eq!(glyphs[1].rect.x, 50.0);
    }

    #[test]
    fn test_cm_flip_gives_top_left_origin() {
        let content = Content::decode(b"BT /F1 10 Tf 72 700 Td (A) Tj ET".as_slice()).unwrap();
        // Page 792 tall: y' = 792 - y
        let flip = Matrix::new(1.0, 0.0, 0.0, -1.0, 0.0, 792.0);
        let mut interpreter = TextInterpreter::new(flip, mono());
        interpreter.run(&content.operations);

        let glyph = interpreter.glyphs()[0];
        assert_eq!(glyph.rect.x, 72.0);
        assert_eq!(glyph.rect.y, 84.0);
        assert_eq!(glyph.rect.bottom(), 94.0);
    }

    #[test]
    fn test_save_restore_scopes_ctm() {
        let glyphs = run("q 1 0 0 1 100 0 cm BT /F1 10 Tf (A) Tj ET Q BT /F1 10 Tf (B) Tj ET");
        assert_eq!(glyphs[0].rect.x, 100.0);
        assert_eq!(glyphs[1].rect.x, 0.0);
    }

    #[test]
    fn test_spaces_are_recorded_and_word_spacing_applied() {
        let glyphs = run("BT /F1 10 Tf 5 Tw (A B) Tj ET");
        assert_eq!(glyphs.len(), 3);
        assert_eq!(glyphs[1].ch, ' ');
        assert_eq!(glyphs[2].rect.x, 15.0);
    }

    #[test]
    fn test_composite_font_is_skipped() {
        let content = Content::decode(b"BT /F2 10 Tf (AB) Tj ET".as_slice()).unwrap();
        let mut fonts = HashMap::new();
        let doc = lopdf::Document::with_version("1.5");
        let type0 = lopdf::dictionary! { "Subtype" => "Type0", "BaseFont" => "Noto" };
        fonts.insert(b"F2".to_vec(), FontMetrics::from_dict(&doc, &type0));

        let mut interpreter = TextInterpreter::new(Matrix::identity(), fonts);
        interpreter.run(&content.operations);
        assert!(interpreter.glyphs().is_empty());
    }
}
