//! Page surface over a PDF document, backed by `lopdf`.
//!
//! Text is extracted by interpreting each page's content stream once and is
//! cached for the lifetime of the surface. Highlights become annotation
//! objects immediately; border outlines are buffered per page and appended
//! to the page content when the document is saved, wrapped so the page's
//! own graphics state cannot leak into them.

use super::{AnnotationHandle, PageSurface, Token};
use crate::color::Rgb;
use crate::content::objects::{get_resolved, number, resolve};
use crate::content::{FontMetrics, Matrix, TextInterpreter};
use crate::error::{Error, Result};
use crate::geometry::{Point, Quad};
use crate::layout::PageText;
use crate::search::TextSearcher;
use crate::writer::{BorderPath, HighlightAnnotation};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// US Letter, used when a page has no usable `MediaBox`.
const DEFAULT_MEDIA_BOX: [f32; 4] = [0.0, 0.0, 612.0, 792.0];

/// Path reported for documents loaded from memory.
const IN_MEMORY: &str = "<memory>";

/// Limit on `Parent` links followed for inherited page attributes.
const MAX_INHERITANCE_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy)]
struct PageInfo {
    id: ObjectId,
    /// `[x0, y0, x1, y1]` in PDF user space
    media_box: [f32; 4],
}

impl PageInfo {
    /// Matrix from PDF user space to page space (top-left origin).
    fn to_page_space(&self) -> Matrix {
        let [x0, _, _, y1] = self.media_box;
        Matrix::new(1.0, 0.0, 0.0, -1.0, -x0, y1)
    }

    /// Convert a page space point back to PDF user space.
    fn to_user_space(&self, point: Point) -> (f32, f32) {
        let [x0, _, _, y1] = self.media_box;
        (point.x + x0, y1 - point.y)
    }
}

/// A PDF document opened for highlighting.
///
/// # Examples
///
/// ```no_run
/// use pdf_partmark::surface::{PageSurface, PdfSurface};
///
/// let mut surface = PdfSurface::open("drawing.pdf")?;
/// for page in 0..surface.page_count() {
///     println!("{:?}", surface.text_lines(page)?);
/// }
/// # Ok::<(), pdf_partmark::Error>(())
/// ```
#[derive(Debug)]
pub struct PdfSurface {
    doc: Document,
    pages: Vec<PageInfo>,
    text: HashMap<usize, PageText>,
    pending_borders: BTreeMap<usize, Vec<Operation>>,
    highlight_counts: HashMap<usize, usize>,
}

impl PdfSurface {
    /// Open a PDF file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::InputNotFound(path.to_path_buf()));
        }

        let doc = Document::load(path).map_err(|e| unreadable(path, e))?;
        log::info!("Opened {}", path.display());
        Self::from_document(doc)
    }

    /// Open a PDF held in memory.
    ///
    /// Load failures are reported as [`Error::Unreadable`] with the path
    /// `<memory>`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let doc = Document::load_mem(bytes).map_err(|e| unreadable(Path::new(IN_MEMORY), e))?;
        Self::from_document(doc)
    }

    /// Wrap an already loaded document.
    pub fn from_document(doc: Document) -> Result<Self> {
        let pages = doc
            .get_pages()
            .into_values()
            .map(|id| PageInfo {
                id,
                media_box: media_box(&doc, id),
            })
            .collect();

        Ok(Self {
            doc,
            pages,
            text: HashMap::new(),
            pending_borders: BTreeMap::new(),
            highlight_counts: HashMap::new(),
        })
    }

    fn page_info(&self, page: usize) -> Result<PageInfo> {
        self.pages.get(page).copied().ok_or(Error::PageOutOfRange {
            page,
            count: self.pages.len(),
        })
    }

    fn page_text(&mut self, page: usize) -> Result<&PageText> {
        if !self.text.contains_key(&page) {
            let info = self.page_info(page)?;
            let text = self.extract_text(info)?;
            self.text.insert(page, text);
        }
        self.text.get(&page).ok_or(Error::PageOutOfRange {
            page,
            count: self.pages.len(),
        })
    }

    fn extract_text(&self, info: PageInfo) -> Result<PageText> {
        let data = self.doc.get_page_content(info.id)?;
        let content = Content::decode(&data)
            .map_err(|e| Error::InvalidPdf(format!("Cannot decode page content: {}", e)))?;

        let mut interpreter = TextInterpreter::new(info.to_page_space(), self.page_fonts(info.id));
        interpreter.run(&content.operations);
        Ok(PageText::from_glyphs(interpreter.into_glyphs()))
    }

    fn page_fonts(&self, page_id: ObjectId) -> HashMap<Vec<u8>, FontMetrics> {
        let mut fonts = HashMap::new();

        let resources = match inherited(&self.doc, page_id, b"Resources") {
            Some(Object::Dictionary(resources)) => resources,
            _ => return fonts,
        };
        let font_dict = match get_resolved(&self.doc, resources, b"Font") {
            Some(Object::Dictionary(font_dict)) => font_dict,
            _ => return fonts,
        };

        for (name, font) in font_dict.iter() {
            if let Ok(Object::Dictionary(font)) = resolve(&self.doc, font) {
                fonts.insert(name.clone(), FontMetrics::from_dict(&self.doc, font));
            }
        }
        fonts
    }

    fn user_space_quad(info: &PageInfo, quad: &Quad) -> [f32; 8] {
        let (x1, y1) = info.to_user_space(quad.ul);
        let (x2, y2) = info.to_user_space(quad.ur);
        let (x3, y3) = info.to_user_space(quad.ll);
        let (x4, y4) = info.to_user_space(quad.lr);
        [x1, y1, x2, y2, x3, y3, x4, y4]
    }

    fn append_annotation(&mut self, page_id: ObjectId, annot_id: ObjectId) -> Result<()> {
        let annots_ref = match self.doc.get_object(page_id)?.as_dict()?.get(b"Annots") {
            Ok(Object::Reference(id)) => Some(*id),
            _ => None,
        };

        if let Some(id) = annots_ref {
            self.doc.get_object_mut(id)?.as_array_mut()?.push(Object::Reference(annot_id));
            return Ok(());
        }

        let page = self.doc.get_object_mut(page_id)?.as_dict_mut()?;
        if let Ok(Object::Array(annots)) = page.get_mut(b"Annots") {
            annots.push(Object::Reference(annot_id));
        } else {
            page.set("Annots", vec![Object::Reference(annot_id)]);
        }
        Ok(())
    }

    /// Append every buffered border to its page's content.
    fn flush_borders(&mut self) -> Result<()> {
        let pending = std::mem::take(&mut self.pending_borders);

        for (page, operations) in pending {
            let info = self.page_info(page)?;

            let head = encode(vec![Operation::new("q", vec![])])?;
            let mut tail_ops = vec![Operation::new("Q", vec![])];
            tail_ops.extend(operations);
            let tail = encode(tail_ops)?;

            let head_id = self.doc.add_object(Stream::new(dictionary! {}, head));
            let tail_id = self.doc.add_object(Stream::new(dictionary! {}, tail));

            let existing = self.existing_contents(info.id)?;
            let mut contents = Vec::with_capacity(existing.len() + 2);
            contents.push(Object::Reference(head_id));
            contents.extend(existing);
            contents.push(Object::Reference(tail_id));

            let page_dict = self.doc.get_object_mut(info.id)?.as_dict_mut()?;
            page_dict.set("Contents", contents);
            log::debug!("Appended border outlines to page {}", page + 1);
        }
        Ok(())
    }

    /// References making up a page's current content.
    fn existing_contents(&self, page_id: ObjectId) -> Result<Vec<Object>> {
        let page = self.doc.get_object(page_id)?.as_dict()?;
        let contents = match page.get(b"Contents") {
            Ok(Object::Reference(id)) => match self.doc.get_object(*id)? {
                Object::Array(items) => items.clone(),
                _ => vec![Object::Reference(*id)],
            },
            Ok(Object::Array(items)) => items.clone(),
            _ => Vec::new(),
        };
        Ok(contents)
    }
}

impl PageSurface for PdfSurface {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn text_lines(&mut self, page: usize) -> Result<Vec<String>> {
        Ok(self.page_text(page)?.lines())
    }

    fn words(&mut self, page: usize) -> Result<Vec<Token>> {
        Ok(self.page_text(page)?.tokens())
    }

    fn search_for(&mut self, page: usize, literal: &str) -> Result<Vec<Quad>> {
        TextSearcher::search_quads(self.page_text(page)?, literal)
    }

    fn draw_quad(&mut self, page: usize, quad: &Quad, color: Rgb, width: f32) -> Result<()> {
        let info = self.page_info(page)?;
        let path = BorderPath::from_quad_corners(
            info.to_user_space(quad.ul),
            info.to_user_space(quad.ur),
            info.to_user_space(quad.ll),
            info.to_user_space(quad.lr),
            color,
            width,
        );
        self.pending_borders.entry(page).or_default().extend(path.operations());
        Ok(())
    }

    fn add_highlight(
        &mut self,
        page: usize,
        regions: &[Quad],
        color: Rgb,
        opacity: f32,
    ) -> Result<AnnotationHandle> {
        let info = self.page_info(page)?;
        let quads = regions.iter().map(|q| Self::user_space_quad(&info, q)).collect();

        let annotation = HighlightAnnotation::new(quads, color)
            .with_opacity(opacity)
            .with_creation_date_now();
        let appearance_id = self.doc.add_object(annotation.appearance_stream()?);
        let annot_id = self.doc.add_object(annotation.build(Some(appearance_id)));
        self.append_annotation(info.id, annot_id)?;

        let count = self.highlight_counts.entry(page).or_insert(0);
        let handle = AnnotationHandle { page, index: *count };
        *count += 1;
        Ok(handle)
    }

    fn save(&mut self) -> Result<Vec<u8>> {
        self.flush_borders()?;

        let mut buffer = Vec::new();
        self.doc
            .save_to(&mut buffer)
            .map_err(|e| Error::OutputWrite(e.to_string()))?;
        log::info!("Serialized document ({} bytes)", buffer.len());
        Ok(buffer)
    }
}

fn unreadable(path: &Path, err: lopdf::Error) -> Error {
    Error::Unreadable {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

fn encode(operations: Vec<Operation>) -> Result<Vec<u8>> {
    Content { operations }
        .encode()
        .map_err(|e| Error::OutputWrite(format!("Cannot encode page content: {}", e)))
}

/// Look up a page attribute, following `Parent` links for inherited ones.
fn inherited<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut node: &Dictionary = doc.get_object(page_id).ok()?.as_dict().ok()?;

    for _ in 0..MAX_INHERITANCE_DEPTH {
        if let Some(value) = get_resolved(doc, node, key) {
            return Some(value);
        }
        node = match get_resolved(doc, node, b"Parent") {
            Some(Object::Dictionary(parent)) => parent,
            _ => return None,
        };
    }
    None
}

fn media_box(doc: &Document, page_id: ObjectId) -> [f32; 4] {
    let values: Option<Vec<f32>> = match inherited(doc, page_id, b"MediaBox") {
        Some(Object::Array(items)) => items
            .iter()
            .map(|item| resolve(doc, item).ok().and_then(number))
            .collect(),
        _ => None,
    };

    match values.as_deref() {
        Some([ax, ay, bx, by]) => [ax.min(*bx), ay.min(*by), ax.max(*bx), ay.max(*by)],
        _ => DEFAULT_MEDIA_BOX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One Courier page of 595x842 with the given lines, 14pt apart from y=700.
    fn sample_pdf(lines: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("TL", vec![14.into()]),
            Operation::new("Td", vec![72.into(), 700.into()]),
        ];
        for line in lines {
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));
        let content = Content { operations }.encode().unwrap();
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_extracts_lines_and_words() {
        let pdf = sample_pdf(&["Use (AB-123-L) here", "C-100"]);
        let mut surface = PdfSurface::from_bytes(&pdf).unwrap();
        assert_eq!(surface.page_count(), 1);
        assert_eq!(surface.text_lines(0).unwrap(), vec!["Use (AB-123-L) here", "C-100"]);

        let words = surface.words(0).unwrap();
        let texts: Vec<&str> = words.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Use", "(AB-123-L)", "here", "C-100"]);
    }

    #[test]
    fn test_search_uses_top_left_origin() {
        let mut surface = PdfSurface::from_bytes(&sample_pdf(&["Use (AB-123-L) here"])).unwrap();
        let quads = surface.search_for(0, "AB-123").unwrap();
        assert_eq!(quads.len(), 1);

        let rect = quads[0].rect();
        assert!(close(rect.left(), 72.0 + 5.0 * 7.2));
        assert!(close(rect.right(), 72.0 + 11.0 * 7.2));
        // Baseline 700 on an 842 tall page, descent 0.2 em
        assert!(close(rect.bottom(), 842.0 - 700.0 + 2.4));
    }

    #[test]
    fn test_page_out_of_range() {
        let mut surface = PdfSurface::from_bytes(&sample_pdf(&["A-100"])).unwrap();
        assert!(matches!(
            surface.text_lines(3),
            Err(Error::PageOutOfRange { page: 3, count: 1 })
        ));
    }

    #[test]
    fn test_open_missing_file() {
        let err = PdfSurface::open("/definitely/not/here.pdf").unwrap_err();
        assert!(matches!(err, Error::InputNotFound(_)));
    }

    #[test]
    fn test_garbage_bytes_are_unreadable() {
        let err = PdfSurface::from_bytes(b"not a pdf").unwrap_err();
        match err {
            Error::Unreadable { path, .. } => assert_eq!(path, Path::new("<memory>")),
            other => panic!("expected Unreadable, got {:?}", other),
        }
    }

    #[test]
    fn test_save_writes_annotations_and_borders() {
        let mut surface = PdfSurface::from_bytes(&sample_pdf(&["(AB-123-L)"])).unwrap();
        let region = surface.search_for(0, "AB-123").unwrap();
        let marker = surface.search_for(0, "-L").unwrap()[0];

        let handle = surface.add_highlight(0, &region, Rgb::from_u8(0, 255, 255), 0.5).unwrap();
        assert_eq!(handle, AnnotationHandle { page: 0, index: 0 });
        surface.draw_quad(0, &marker, Rgb::from_u8(139, 0, 0), 1.0).unwrap();

        let saved = surface.save().unwrap();
        let doc = Document::load_mem(&saved).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let page = doc.get_object(page_id).unwrap().as_dict().unwrap();

        let annots = page.get(b"Annots").unwrap().as_array().unwrap();
        assert_eq!(annots.len(), 1);
        let annot = resolve(&doc, &annots[0]).unwrap().as_dict().unwrap();
        assert!(matches!(annot.get(b"Subtype"), Ok(Object::Name(n)) if n == b"Highlight"));

        let contents = page.get(b"Contents").unwrap().as_array().unwrap();
        assert_eq!(contents.len(), 3);
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        assert!(content.operations.iter().any(|op| op.operator == "S"));
    }

    #[test]
    fn test_saved_text_is_unchanged() {
        let mut surface = PdfSurface::from_bytes(&sample_pdf(&["A-100-R"])).unwrap();
        let marker = surface.search_for(0, "-R").unwrap()[0];
        surface.draw_quad(0, &marker, Rgb::from_u8(0, 0, 0), 1.0).unwrap();

        let saved = surface.save().unwrap();
        let mut reopened = PdfSurface::from_bytes(&saved).unwrap();
        assert_eq!(reopened.text_lines(0).unwrap(), vec!["A-100-R"]);
    }
}
