//! Content-stream interpreter (C7, spec §4.6): tokenizes a decoded
//! content stream into operand/operator frames and applies them against
//! a graphics-state stack, emitting a flat, content-stream-ordered list
//! of path/text/image elements.
//!
//! Form XObject and soft-mask-form recursion is iterative (an explicit
//! frame stack), not host-stack recursion, per spec §9's design note.

use std::rc::Rc;

use crate::pdf::error::{Error, Result};
use crate::pdf::gstate::{ClipRule, Color, GraphicsState, GraphicsStateStack, Matrix, SoftMask};
use crate::pdf::lexer::{Lexer, Token};
use crate::pdf::object::{Dict, Object};
use crate::pdf::resolver::Document;

/// A glyph-metrics source the interpreter consults to advance the text
/// matrix (spec §9: widths are 1/1000 em; `codeByteWidth` picks 1 or 2
/// bytes per code for a given font resource name).
pub trait GlyphMetrics {
    fn code_byte_width(&self, font_name: &str) -> u8;
    fn glyph_width(&self, font_name: &str, code: u32) -> f64;
}

/// A metrics source that assumes every glyph is 500/1000 em wide and
/// every font uses single-byte codes; used when no font table was
/// supplied (callers that only need path/image geometry).
pub struct DefaultGlyphMetrics;

impl GlyphMetrics for DefaultGlyphMetrics {
    fn code_byte_width(&self, _font_name: &str) -> u8 {
        1
    }
    fn glyph_width(&self, _font_name: &str, _code: u32) -> f64 {
        500.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintOp {
    Stroke,
    CloseStroke,
    Fill,
    FillEvenOdd,
    FillStroke,
    FillStrokeEvenOdd,
    CloseFillStroke,
    CloseFillStrokeEvenOdd,
    NoPaint,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    CurveTo(f64, f64, f64, f64, f64, f64),
    ClosePath,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPath {
    pub segments: Vec<PathSegment>,
    pub paint_op: PaintOp,
    pub clip: Option<ClipRule>,
    pub state: GraphicsState,
}

/// One show-text adjacency group item: a string to show, or a number
/// (from a `TJ` array) that shifts the text position before the next
/// string (in 1/1000 text-space units, subtracted from the advance).
#[derive(Debug, Clone, PartialEq)]
pub enum TextShowItem {
    Show(Vec<u8>),
    Adjust(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedText {
    pub items: Vec<TextShowItem>,
    pub state: GraphicsState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InlineImageData {
    pub dict: Dict,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedImage {
    pub resource_name: String,
    pub state: GraphicsState,
    pub inline: Option<InlineImageData>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedElement {
    Path(ParsedPath),
    Text(ParsedText),
    Image(ParsedImage),
}

#[derive(Debug, Clone, PartialEq)]
enum Operand {
    Num(f64),
    Name(String),
    Str(Vec<u8>),
    Arr(Vec<Operand>),
}

impl Operand {
    fn as_f64(&self) -> f64 {
        match self {
            Operand::Num(n) => *n,
            _ => 0.0,
        }
    }
}

struct Frame {
    // Reference-counted so that pushing a new frame (which may grow and
    // reallocate the enclosing `Vec<Frame>`) never invalidates a
    // `Lexer` borrowing an earlier frame's bytes: lexing always goes
    // through a cloned `Rc`, never `&frames[..]` directly.
    bytes: Rc<Vec<u8>>,
    pos: usize,
    resources: Dict,
    is_recursive: bool,
}

pub struct Interpreter<'a> {
    doc: &'a Document,
    max_depth: u32,
    metrics: &'a dyn GlyphMetrics,
}

impl<'a> Interpreter<'a> {
    pub fn new(doc: &'a Document, max_depth: u32, metrics: &'a dyn GlyphMetrics) -> Self {
        Self { doc, max_depth, metrics }
    }

    /// Run a page's (or form's) content stream to completion and return
    /// its elements in paint order.
    pub fn run(&self, content: &[u8], resources: &Dict) -> Result<Vec<ParsedElement>> {
        let mut elements = Vec::new();
        let mut stack = GraphicsStateStack::new();
        let mut frames = vec![Frame {
            bytes: Rc::new(content.to_vec()),
            pos: 0,
            resources: resources.clone(),
            is_recursive: false,
        }];
        let mut operands: Vec<Operand> = Vec::new();
        let mut pending_clip: Option<ClipRule> = None;
        let mut path_segments: Vec<PathSegment> = Vec::new();

        loop {
            let Some(top) = frames.last() else { break };
            let frame_bytes = Rc::clone(&top.bytes);
            let frame_pos = top.pos;
            let frame_resources = top.resources.clone();

            let mut lex = Lexer::at(&frame_bytes, frame_pos);
            let tok = lex.next_token()?;
            frames.last_mut().unwrap().pos = lex.pos;

            let Some(tok) = tok else {
                let finished = frames.pop().unwrap();
                if finished.is_recursive {
                    stack.pop()?;
                }
                continue;
            };

            match tok {
                Token::Integer(n) => operands.push(Operand::Num(n as f64)),
                Token::Real(r) => operands.push(Operand::Num(r)),
                Token::Name(n) => operands.push(Operand::Name(n)),
                Token::LiteralString(b) | Token::HexString(b) => operands.push(Operand::Str(b)),
                Token::ArrayStart => {
                    let arr = read_array(&mut lex)?;
                    frames.last_mut().unwrap().pos = lex.pos;
                    operands.push(Operand::Arr(arr));
                }
                Token::ArrayEnd | Token::DictStart | Token::DictEnd => {
                    operands.clear();
                }
                Token::Keyword(op) => {
                    self.dispatch(
                        &op,
                        &mut operands,
                        &mut stack,
                        &mut elements,
                        &mut pending_clip,
                        &mut path_segments,
                        &frame_resources,
                        &mut frames,
                        &mut lex,
                    )?;
                    if let Some(frame) = frames.last_mut() {
                        // Only meaningful when dispatch didn't push/pop
                        // a frame (BI inline-image reading advances the
                        // lexer within the same frame); Do-driven pushes
                        // start their own frame at position 0 already.
                        if !Rc::ptr_eq(&frame.bytes, &frame_bytes) {
                            // A new frame was pushed by `Do`; its own
                            // position (0) is already correct.
                        } else {
                            frame.pos = lex.pos;
                        }
                    }
                    operands.clear();
                }
            }
        }

        Ok(elements)
    }

    #[allow(clippy::too_many_arguments)]
    fn dispatch(
        &self,
        op: &str,
        operands: &mut Vec<Operand>,
        stack: &mut GraphicsStateStack,
        elements: &mut Vec<ParsedElement>,
        pending_clip: &mut Option<ClipRule>,
        path_segments: &mut Vec<PathSegment>,
        resources: &Dict,
        frames: &mut Vec<Frame>,
        lex: &mut Lexer<'_>,
    ) -> Result<()> {
        match op {
            "q" => stack.push(),
            "Q" => stack.pop()?,
            "cm" => {
                if operands.len() >= 6 {
                    let m = matrix_from(operands);
                    let gs = stack.current_mut();
                    gs.ctm = gs.ctm.pre_multiply(&m);
                }
            }
            "w" => stack.current_mut().line.width = operand(operands, 0),
            "J" => stack.current_mut().line.cap = operand(operands, 0) as i64,
            "j" => stack.current_mut().line.join = operand(operands, 0) as i64,
            "M" => stack.current_mut().line.miter_limit = operand(operands, 0),
            "d" => {
                let (pattern, phase) = dash_from(operands);
                let line = &mut stack.current_mut().line;
                line.dash_pattern = pattern;
                line.dash_phase = phase;
            }
            "ri" | "i" => {}
            "gs" => {
                if let Some(Operand::Name(name)) = operands.first() {
                    self.apply_ext_gstate(name, resources, stack)?;
                }
            }
            "g" => stack.current_mut().fill_color = Color::Gray(operand(operands, 0)),
            "G" => stack.current_mut().stroke_color = Color::Gray(operand(operands, 0)),
            "rg" => {
                stack.current_mut().fill_color =
                    Color::Rgb(operand(operands, 0), operand(operands, 1), operand(operands, 2))
            }
            "RG" => {
                stack.current_mut().stroke_color =
                    Color::Rgb(operand(operands, 0), operand(operands, 1), operand(operands, 2))
            }
            "k" => {
                stack.current_mut().fill_color = Color::Cmyk(
                    operand(operands, 0),
                    operand(operands, 1),
                    operand(operands, 2),
                    operand(operands, 3),
                )
            }
            "K" => {
                stack.current_mut().stroke_color = Color::Cmyk(
                    operand(operands, 0),
                    operand(operands, 1),
                    operand(operands, 2),
                    operand(operands, 3),
                )
            }
            "cs" => {
                if let Some(Operand::Name(name)) = operands.first() {
                    stack.current_mut().fill_color =
                        Color::Other { space: name.clone(), components: Vec::new() };
                }
            }
            "CS" => {
                if let Some(Operand::Name(name)) = operands.first() {
                    stack.current_mut().stroke_color =
                        Color::Other { space: name.clone(), components: Vec::new() };
                }
            }
            "scn" | "sc" => {
                let color = scn_color(operands);
                stack.current_mut().fill_color = color;
            }
            "SCN" | "SC" => {
                let color = scn_color(operands);
                stack.current_mut().stroke_color = color;
            }
            "m" => path_segments.push(PathSegment::MoveTo(operand(operands, 0), operand(operands, 1))),
            "l" => path_segments.push(PathSegment::LineTo(operand(operands, 0), operand(operands, 1))),
            "c" => path_segments.push(PathSegment::CurveTo(
                operand(operands, 0),
                operand(operands, 1),
                operand(operands, 2),
                operand(operands, 3),
                operand(operands, 4),
                operand(operands, 5),
            )),
            "v" => {
                let (cx, cy) = last_point(path_segments);
                path_segments.push(PathSegment::CurveTo(
                    cx,
                    cy,
                    operand(operands, 0),
                    operand(operands, 1),
                    operand(operands, 2),
                    operand(operands, 3),
                ))
            }
            "y" => path_segments.push(PathSegment::CurveTo(
                operand(operands, 0),
                operand(operands, 1),
                operand(operands, 2),
                operand(operands, 3),
                operand(operands, 2),
                operand(operands, 3),
            )),
            "re" => {
                let x = operand(operands, 0);
                let y = operand(operands, 1);
                let w = operand(operands, 2);
                let h = operand(operands, 3);
                path_segments.push(PathSegment::MoveTo(x, y));
                path_segments.push(PathSegment::LineTo(x + w, y));
                path_segments.push(PathSegment::LineTo(x + w, y + h));
                path_segments.push(PathSegment::LineTo(x, y + h));
                path_segments.push(PathSegment::ClosePath);
            }
            "h" => path_segments.push(PathSegment::ClosePath),
            "W" => *pending_clip = Some(ClipRule::NonZero),
            "W*" => *pending_clip = Some(ClipRule::EvenOdd),
            "S" | "s" | "f" | "F" | "f*" | "B" | "B*" | "b" | "b*" | "n" => {
                let paint_op = match op {
                    "S" => PaintOp::Stroke,
                    "s" => PaintOp::CloseStroke,
                    "f" | "F" => PaintOp::Fill,
                    "f*" => PaintOp::FillEvenOdd,
                    "B" => PaintOp::FillStroke,
                    "B*" => PaintOp::FillStrokeEvenOdd,
                    "b" => PaintOp::CloseFillStroke,
                    "b*" => PaintOp::CloseFillStrokeEvenOdd,
                    _ => PaintOp::NoPaint,
                };
                if !path_segments.is_empty() || pending_clip.is_some() {
                    elements.push(ParsedElement::Path(ParsedPath {
                        segments: std::mem::take(path_segments),
                        paint_op,
                        clip: pending_clip.take(),
                        state: stack.current().clone(),
                    }));
                }
            }
            "BT" => {
                let gs = stack.current_mut();
                gs.text.text_matrix = Matrix::IDENTITY;
                gs.text.line_matrix = Matrix::IDENTITY;
            }
            "ET" => {}
            "Tc" => stack.current_mut().text.char_spacing = operand(operands, 0),
            "Tw" => stack.current_mut().text.word_spacing = operand(operands, 0),
            "Tz" => stack.current_mut().text.horiz_scale = operand(operands, 0),
            "TL" => stack.current_mut().text.leading = operand(operands, 0),
            "Ts" => stack.current_mut().text.rise = operand(operands, 0),
            "Tr" => stack.current_mut().text.render_mode = operand(operands, 0) as i64,
            "Tf" => {
                if let Some(Operand::Name(name)) = operands.first() {
                    stack.current_mut().text.font_name = Some(name.clone());
                }
                stack.current_mut().text.font_size = operand(operands, 1);
            }
            "Td" => {
                let tx = operand(operands, 0);
                let ty = operand(operands, 1);
                let gs = stack.current_mut();
                let new_line = Matrix { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: tx, f: ty }
                    .pre_multiply(&gs.text.line_matrix);
                gs.text.line_matrix = new_line;
                gs.text.text_matrix = new_line;
            }
            "TD" => {
                let tx = operand(operands, 0);
                let ty = operand(operands, 1);
                stack.current_mut().text.leading = -ty;
                let gs = stack.current_mut();
                let new_line = Matrix { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: tx, f: ty }
                    .pre_multiply(&gs.text.line_matrix);
                gs.text.line_matrix = new_line;
                gs.text.text_matrix = new_line;
            }
            "Tm" => {
                if operands.len() >= 6 {
                    let m = matrix_from(operands);
                    let gs = stack.current_mut();
                    gs.text.line_matrix = m;
                    gs.text.text_matrix = m;
                }
            }
            "T*" => {
                let gs = stack.current_mut();
                let leading = gs.text.leading;
                let new_line = Matrix { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: -leading }
                    .pre_multiply(&gs.text.line_matrix);
                gs.text.line_matrix = new_line;
                gs.text.text_matrix = new_line;
            }
            "Tj" => {
                if let Some(Operand::Str(s)) = operands.first() {
                    self.advance_and_emit_text(stack, elements, vec![TextShowItem::Show(s.clone())]);
                }
            }
            "'" => {
                let gs = stack.current_mut();
                let leading = gs.text.leading;
                let new_line = Matrix { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: -leading }
                    .pre_multiply(&gs.text.line_matrix);
                gs.text.line_matrix = new_line;
                gs.text.text_matrix = new_line;
                if let Some(Operand::Str(s)) = operands.first() {
                    self.advance_and_emit_text(stack, elements, vec![TextShowItem::Show(s.clone())]);
                }
            }
            "\"" => {
                stack.current_mut().text.word_spacing = operand(operands, 0);
                stack.current_mut().text.char_spacing = operand(operands, 1);
                let gs = stack.current_mut();
                let leading = gs.text.leading;
                let new_line = Matrix { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: -leading }
                    .pre_multiply(&gs.text.line_matrix);
                gs.text.line_matrix = new_line;
                gs.text.text_matrix = new_line;
                if let Some(Operand::Str(s)) = operands.get(2) {
                    self.advance_and_emit_text(stack, elements, vec![TextShowItem::Show(s.clone())]);
                }
            }
            "TJ" => {
                if let Some(Operand::Arr(items)) = operands.first() {
                    let show_items = items
                        .iter()
                        .map(|o| match o {
                            Operand::Str(s) => TextShowItem::Show(s.clone()),
                            other => TextShowItem::Adjust(other.as_f64()),
                        })
                        .collect();
                    self.advance_and_emit_text(stack, elements, show_items);
                }
            }
            "Do" => {
                if let Some(Operand::Name(name)) = operands.first() {
                    self.invoke_xobject(name, resources, stack, elements, frames)?;
                }
            }
            "BI" => {
                self.read_inline_image(lex, resources, stack, elements)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn advance_and_emit_text(
        &self,
        stack: &mut GraphicsStateStack,
        elements: &mut Vec<ParsedElement>,
        items: Vec<TextShowItem>,
    ) {
        let state_snapshot = stack.current().clone();
        let font = state_snapshot.text.font_name.clone().unwrap_or_default();
        let byte_width = self.metrics.code_byte_width(&font).max(1) as usize;
        let gs = stack.current_mut();

        for item in &items {
            match item {
                TextShowItem::Show(bytes) => {
                    for chunk in bytes.chunks(byte_width) {
                        let code = chunk
                            .iter()
                            .fold(0u32, |acc, b| (acc << 8) | *b as u32);
                        let w0 = self.metrics.glyph_width(&font, code) / 1000.0;
                        let word_spacing = if byte_width == 1 && chunk == [0x20] {
                            gs.text.word_spacing
                        } else {
                            0.0
                        };
                        let tx = (w0 * gs.text.font_size + gs.text.char_spacing + word_spacing)
                            * (gs.text.horiz_scale / 100.0);
                        gs.text.text_matrix =
                            Matrix { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: tx, f: 0.0 }
                                .pre_multiply(&gs.text.text_matrix);
                    }
                }
                TextShowItem::Adjust(adj) => {
                    let tx = (-adj / 1000.0) * gs.text.font_size * (gs.text.horiz_scale / 100.0);
                    gs.text.text_matrix =
                        Matrix { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: tx, f: 0.0 }
                            .pre_multiply(&gs.text.text_matrix);
                }
            }
        }

        elements.push(ParsedElement::Text(ParsedText { items, state: state_snapshot }));
    }

    fn apply_ext_gstate(
        &self,
        name: &str,
        resources: &Dict,
        stack: &mut GraphicsStateStack,
    ) -> Result<()> {
        let Some(ext_gstates) = resources.get_dict("ExtGState") else {
            return Ok(());
        };
        let Some(entry) = ext_gstates.get(name) else {
            return Ok(());
        };
        let entry = self.doc.resolve(entry)?;
        let Some(dict) = entry.as_dict() else { return Ok(()) };

        let gs = stack.current_mut();
        if let Some(ca) = dict.get_f64("ca") {
            gs.fill_alpha = ca;
        }
        if let Some(ca) = dict.get_f64("CA") {
            gs.stroke_alpha = ca;
        }
        if let Some(bm) = dict.get_name("BM") {
            gs.blend_mode = bm.to_string();
        }
        if let Some(lw) = dict.get_f64("LW") {
            gs.line.width = lw;
        }
        if let Some(lc) = dict.get_int("LC") {
            gs.line.cap = lc;
        }
        if let Some(lj) = dict.get_int("LJ") {
            gs.line.join = lj;
        }
        if let Some(ml) = dict.get_f64("ML") {
            gs.line.miter_limit = ml;
        }

        match dict.get("SMask") {
            Some(Object::Name(n)) if n.as_str() == "None" => {
                stack.current_mut().soft_mask = None;
            }
            Some(smask_ref) => {
                let smask_obj = self.doc.resolve(smask_ref)?;
                if let Some(smask_dict) = smask_obj.as_dict() {
                    let mask = self.extract_soft_mask(smask_dict)?;
                    stack.current_mut().soft_mask = mask;
                }
            }
            None => {}
        }
        Ok(())
    }

    /// Extract a soft mask from an `/SMask` dict: fast-path a form that
    /// reduces to a single full-bbox rectangle fill as a constant alpha;
    /// otherwise attempt per-pixel sampling, and on failure fall back to
    /// no mask while surfacing a warning (spec §9 open question).
    fn extract_soft_mask(&self, smask_dict: &Dict) -> Result<Option<SoftMask>> {
        let Some(form_obj) = self.doc.resolve_dict_entry(smask_dict, "G")? else {
            return Ok(None);
        };
        let Some(form) = form_obj.as_stream() else {
            return Ok(None);
        };
        let form_resources = form.dict.get_dict("Resources").cloned().unwrap_or_default();
        let content = crate::pdf::filters::decode_stream(&form.dict, &form.raw_data)?;

        let elements = self.run(&content, &form_resources).unwrap_or_default();

        if elements.len() == 1 {
            if let ParsedElement::Path(p) = &elements[0] {
                if p.segments.len() == 5 {
                    let alpha = match &p.state.fill_color {
                        Color::Gray(g) => *g,
                        Color::Rgb(r, g, b) => 0.299 * r + 0.587 * g + 0.114 * b,
                        _ => 1.0,
                    };
                    return Ok(Some(SoftMask::Constant(alpha)));
                }
            }
        }

        log::warn!("soft mask form did not reduce to a single rectangle fill; sampling is not implemented, falling back to no mask");
        Ok(None)
    }

    fn invoke_xobject(
        &self,
        name: &str,
        resources: &Dict,
        stack: &mut GraphicsStateStack,
        elements: &mut Vec<ParsedElement>,
        frames: &mut Vec<Frame>,
    ) -> Result<()> {
        let Some(xobjects) = resources.get_dict("XObject") else {
            return Ok(());
        };
        let Some(entry) = xobjects.get(name) else { return Ok(()) };
        let resolved = self.doc.resolve(entry)?;
        let Some(stream) = resolved.as_stream() else {
            return Ok(());
        };

        match stream.dict.get_name("Subtype") {
            Some("Image") => {
                elements.push(ParsedElement::Image(ParsedImage {
                    resource_name: name.to_string(),
                    state: stack.current().clone(),
                    inline: None,
                }));
            }
            Some("Form") => {
                let depth = frames.iter().filter(|f| f.is_recursive).count() as u32;
                if depth >= self.max_depth {
                    return Err(Error::Unsupported("Form XObject recursion depth exceeded".into()));
                }
                let form_matrix = stream
                    .dict
                    .get_array("Matrix")
                    .map(matrix_from_objects)
                    .unwrap_or(Matrix::IDENTITY);
                let form_resources = stream
                    .dict
                    .get_dict("Resources")
                    .cloned()
                    .unwrap_or_else(|| resources.clone());
                let content = crate::pdf::filters::decode_stream(&stream.dict, &stream.raw_data)?;

                stack.push();
                let gs = stack.current_mut();
                gs.ctm = gs.ctm.pre_multiply(&form_matrix);
                frames.push(Frame {
                    bytes: Rc::new(content),
                    pos: 0,
                    resources: form_resources,
                    is_recursive: true,
                });
            }
            _ => {}
        }
        Ok(())
    }

    fn read_inline_image(
        &self,
        lex: &mut Lexer<'_>,
        resources: &Dict,
        stack: &mut GraphicsStateStack,
        elements: &mut Vec<ParsedElement>,
    ) -> Result<()> {
        let mut dict = Dict::new();
        loop {
            match lex.next_token()? {
                Some(Token::Keyword(k)) if k == "ID" => break,
                Some(Token::Name(k)) => {
                    let value = lex
                        .next_token()?
                        .ok_or_else(|| Error::UnexpectedToken("inline image value".into()))?;
                    let key = expand_inline_abbrev(&k);
                    dict.insert(key.as_str().into(), inline_value(value));
                }
                Some(_) => continue,
                None => return Err(Error::UnexpectedToken("unterminated inline image dict".into())),
            }
        }
        // One whitespace byte follows ID; raw data runs until an "EI"
        // keyword delimited by whitespace on both sides. This is a
        // pragmatic approximation: strict binary-safe scanning would
        // track expected data length from Width/Height/BitsPerComponent/
        // ColorSpace instead.
        let region = &lex.remaining()[1.min(lex.remaining().len())..];
        let ei_pos = find_ei(region).unwrap_or(region.len());
        let data_end = ei_pos.saturating_sub(1);
        let data = region[..data_end.min(region.len())].to_vec();
        lex.pos += 1 + ei_pos + 2;

        let _ = resources;
        elements.push(ParsedElement::Image(ParsedImage {
            resource_name: String::new(),
            state: stack.current().clone(),
            inline: Some(InlineImageData { dict, data }),
        }));
        Ok(())
    }
}

/// Find the byte offset of an "EI" keyword bounded by whitespace (or
/// input edges) on both sides.
fn find_ei(data: &[u8]) -> Option<usize> {
    let mut i = 0;
    while i + 1 < data.len() {
        if &data[i..i + 2] == b"EI"
            && (i == 0 || data[i - 1].is_ascii_whitespace())
            && (i + 2 == data.len() || data[i + 2].is_ascii_whitespace())
        {
            return Some(i);
        }
        i += 1;
    }
    None
}

fn expand_inline_abbrev(k: &str) -> String {
    match k {
        "BPC" => "BitsPerComponent",
        "CS" => "ColorSpace",
        "D" => "Decode",
        "DP" => "DecodeParms",
        "F" => "Filter",
        "H" => "Height",
        "IM" => "ImageMask",
        "I" => "Interpolate",
        "W" => "Width",
        "L" => "Length",
        other => other,
    }
    .to_string()
}

fn inline_value(tok: Token) -> Object {
    match tok {
        Token::Integer(n) => Object::integer(n),
        Token::Real(r) => Object::real(r),
        Token::Name(n) => Object::Name(crate::pdf::object::Name(n)),
        Token::Keyword(k) if k == "true" => Object::Bool(true),
        Token::Keyword(k) if k == "false" => Object::Bool(false),
        _ => Object::Null,
    }
}

fn read_array(lex: &mut Lexer<'_>) -> Result<Vec<Operand>> {
    let mut out = Vec::new();
    loop {
        match lex.next_token()? {
            Some(Token::ArrayEnd) => break,
            Some(Token::Integer(n)) => out.push(Operand::Num(n as f64)),
            Some(Token::Real(r)) => out.push(Operand::Num(r)),
            Some(Token::Name(n)) => out.push(Operand::Name(n)),
            Some(Token::LiteralString(b)) | Some(Token::HexString(b)) => out.push(Operand::Str(b)),
            Some(Token::ArrayStart) => out.push(Operand::Arr(read_array(lex)?)),
            Some(_) => continue,
            None => return Err(Error::UnexpectedToken("unterminated array operand".into())),
        }
    }
    Ok(out)
}

fn operand(operands: &[Operand], index: usize) -> f64 {
    operands.get(index).map(Operand::as_f64).unwrap_or(0.0)
}

fn matrix_from(operands: &[Operand]) -> Matrix {
    Matrix {
        a: operand(operands, 0),
        b: operand(operands, 1),
        c: operand(operands, 2),
        d: operand(operands, 3),
        e: operand(operands, 4),
        f: operand(operands, 5),
    }
}

fn matrix_from_objects(arr: &[Object]) -> Matrix {
    let n = |i: usize| arr.get(i).and_then(Object::as_f64).unwrap_or(0.0);
    Matrix { a: n(0), b: n(1), c: n(2), d: n(3), e: n(4), f: n(5) }
}

fn dash_from(operands: &[Operand]) -> (Vec<f64>, f64) {
    let pattern = match operands.first() {
        Some(Operand::Arr(items)) => items.iter().map(Operand::as_f64).collect(),
        _ => Vec::new(),
    };
    let phase = operand(operands, 1);
    (pattern, phase)
}

fn last_point(segments: &[PathSegment]) -> (f64, f64) {
    match segments.last() {
        Some(PathSegment::MoveTo(x, y)) | Some(PathSegment::LineTo(x, y)) => (*x, *y),
        Some(PathSegment::CurveTo(_, _, _, x, y, _)) => (*x, *y),
        _ => (0.0, 0.0),
    }
}

fn scn_color(operands: &[Operand]) -> Color {
    let pattern_name = operands.iter().rev().find_map(|o| match o {
        Operand::Name(n) => Some(n.clone()),
        _ => None,
    });
    let numbers: Vec<f64> = operands
        .iter()
        .filter_map(|o| match o {
            Operand::Num(n) => Some(*n),
            _ => None,
        })
        .collect();

    if let Some(name) = pattern_name {
        if numbers.is_empty() {
            return Color::Pattern(name);
        }
    }
    match numbers.len() {
        1 => Color::Gray(numbers[0]),
        3 => Color::Rgb(numbers[0], numbers[1], numbers[2]),
        4 => Color::Cmyk(numbers[0], numbers[1], numbers[2], numbers[3]),
        _ => Color::Other { space: String::new(), components: numbers },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::ParseOptions;

    fn empty_doc() -> Document {
        // A minimal single-object document with no startxref: the
        // resolver falls back to its linear-scan reconstruction path.
        // The tests below only need a Document for XObject/ExtGState
        // lookups that none of them actually trigger.
        let data = b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\ntrailer\n<< /Root 1 0 R >>\n";
        Document::open(data, &ParseOptions::default()).expect("linear-scan reconstruction")
    }

    #[test]
    fn simple_fill_rect_produces_one_path() {
        let doc = empty_doc();
        let metrics = DefaultGlyphMetrics;
        let interp = Interpreter::new(&doc, 16, &metrics);
        let content = b"1 0 0 RG 0 0 100 100 re f";
        let resources = Dict::new();
        let elements = interp.run(content, &resources).unwrap();
        assert_eq!(elements.len(), 1);
        match &elements[0] {
            ParsedElement::Path(p) => {
                assert_eq!(p.paint_op, PaintOp::Fill);
                assert_eq!(p.segments.len(), 5);
            }
            _ => panic!("expected a path"),
        }
    }

    #[test]
    fn q_q_balance_restores_color() {
        let doc = empty_doc();
        let metrics = DefaultGlyphMetrics;
        let interp = Interpreter::new(&doc, 16, &metrics);
        let content = b"1 0 0 rg q 0 1 0 rg Q 0 0 10 10 re f";
        let resources = Dict::new();
        let elements = interp.run(content, &resources).unwrap();
        match &elements[0] {
            ParsedElement::Path(p) => assert_eq!(p.state.fill_color, Color::Rgb(1.0, 0.0, 0.0)),
            _ => panic!("expected a path"),
        }
    }

    #[test]
    fn unbalanced_q_pop_is_fatal() {
        let doc = empty_doc();
        let metrics = DefaultGlyphMetrics;
        let interp = Interpreter::new(&doc, 16, &metrics);
        let content = b"Q";
        let resources = Dict::new();
        assert!(interp.run(content, &resources).is_err());
    }

    #[test]
    fn tj_array_advances_text_matrix() {
        let doc = empty_doc();
        let metrics = DefaultGlyphMetrics;
        let interp = Interpreter::new(&doc, 16, &metrics);
        let content = b"BT /F1 12 Tf 0 0 Td [(Hi) -200 (There)] TJ ET";
        let resources = Dict::new();
        let elements = interp.run(content, &resources).unwrap();
        assert_eq!(elements.len(), 1);
        match &elements[0] {
            ParsedElement::Text(t) => assert_eq!(t.items.len(), 3),
            _ => panic!("expected text"),
        }
    }
}
