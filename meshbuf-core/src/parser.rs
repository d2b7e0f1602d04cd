/// Line classifier and directive parser for the `v`/`vt`/`vn`/`f` format
use nom::{
    branch::alt,
    character::complete::{char, digit0, digit1, one_of},
    combinator::{opt, recognize},
    number::complete::float,
    sequence::pair,
    IResult,
};

use crate::error::{AttributeKind, Diagnostic, LoadError, Result};
use crate::index::{decode_corner_checked, FaceCorner};
use crate::options::{FaceArity, LoadOptions, WidthCheck};

/// Flat scalar storage for one attribute kind.
#[derive(Debug, Clone, Default)]
pub struct AttributeTable {
    values: Vec<f32>,
    entries: usize,
    first_width: Option<usize>,
    min_width: usize,
    max_width: usize,
}

impl AttributeTable {
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Number of directive lines that fed this table.
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Components per entry, inferred as `values / entries`.
    pub fn width(&self) -> usize {
        if self.entries == 0 {
            0
        } else {
            self.values.len() / self.entries
        }
    }

    /// Smallest and largest component count seen on a single directive.
    pub fn width_range(&self) -> Option<(usize, usize)> {
        self.first_width.map(|_| (self.min_width, self.max_width))
    }

    /// Entry by 1-based index, or `None` when it lies outside the table.
    pub fn entry(&self, index: i64) -> Option<&[f32]> {
        let width = self.width();
        if index < 1 || index as u64 > self.entries as u64 {
            return None;
        }
        let start = (index as usize - 1) * width;
        self.values.get(start..start + width)
    }

    fn record_width(&mut self, width: usize) {
        match self.first_width {
            None => {
                self.first_width = Some(width);
                self.min_width = width;
                self.max_width = width;
            }
            Some(_) => {
                self.min_width = self.min_width.min(width);
                self.max_width = self.max_width.max(width);
            }
        }
    }
}

/// Everything a parse pass accumulates before buffer expansion.
#[derive(Debug, Clone, Default)]
pub struct RawGeometry {
    pub positions: AttributeTable,
    pub texture_coords: AttributeTable,
    pub normals: AttributeTable,
    pub corners: Vec<FaceCorner>,
    pub faces: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl RawGeometry {
    pub fn table(&self, kind: AttributeKind) -> &AttributeTable {
        match kind {
            AttributeKind::Position => &self.positions,
            AttributeKind::TextureCoord => &self.texture_coords,
            AttributeKind::Normal => &self.normals,
        }
    }

    fn table_mut(&mut self, kind: AttributeKind) -> &mut AttributeTable {
        match kind {
            AttributeKind::Position => &mut self.positions,
            AttributeKind::TextureCoord => &mut self.texture_coords,
            AttributeKind::Normal => &mut self.normals,
        }
    }
}

/// Accumulator that data tokens currently feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveTarget {
    None,
    Attribute(AttributeKind),
    Face,
}

/// A directive whose data tokens are still arriving.
#[derive(Debug, Clone, Copy)]
struct OpenDirective {
    target: ActiveTarget,
    line: usize,
    start: usize,
}

/// Streaming parser; feed it lines in order, then call `finish`.
pub struct Parser<'a> {
    options: &'a LoadOptions,
    raw: RawGeometry,
    target: ActiveTarget,
    open: Option<OpenDirective>,
}

impl<'a> Parser<'a> {
    pub fn new(options: &'a LoadOptions) -> Self {
        Self {
            options,
            raw: RawGeometry::default(),
            target: ActiveTarget::None,
            open: None,
        }
    }

    /// Process one line. `line_no` is 1-based and only used for reporting.
    pub fn feed_line(&mut self, line_no: usize, line: &str) -> Result<()> {
        let line = match line.find('#') {
            Some(comment) => &line[..comment],
            None => line,
        };
        if line.len() < 2 || line.starts_with('u') {
            return Ok(());
        }

        for token in line.split_whitespace() {
            let mut chars = token.chars();
            match chars.next() {
                Some('v') => match chars.next() {
                    None => self.open_directive(ActiveTarget::Attribute(AttributeKind::Position), line_no)?,
                    Some('t') => {
                        self.open_directive(ActiveTarget::Attribute(AttributeKind::TextureCoord), line_no)?
                    }
                    Some('n') => self.open_directive(ActiveTarget::Attribute(AttributeKind::Normal), line_no)?,
                    Some(_) => self.unknown_directive()?,
                },
                Some('f') => self.open_directive(ActiveTarget::Face, line_no)?,
                Some(c) if c.is_ascii_digit() || c == '-' => self.push_data(token, line_no),
                _ => self.unknown_directive()?,
            }
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<RawGeometry> {
        self.close_directive()?;
        tracing::debug!(
            positions = self.raw.positions.entries(),
            texture_coords = self.raw.texture_coords.entries(),
            normals = self.raw.normals.entries(),
            faces = self.raw.faces,
            corners = self.raw.corners.len(),
            "parsed geometry source"
        );
        Ok(self.raw)
    }

    fn open_directive(&mut self, target: ActiveTarget, line: usize) -> Result<()> {
        self.close_directive()?;
        let start = match target {
            ActiveTarget::Attribute(kind) => {
                let table = self.raw.table_mut(kind);
                table.entries += 1;
                table.values.len()
            }
            ActiveTarget::Face => {
                self.raw.faces += 1;
                self.raw.corners.len()
            }
            ActiveTarget::None => 0,
        };
        self.target = target;
        self.open = Some(OpenDirective {
            target,
            line,
            start,
        });
        Ok(())
    }

    fn unknown_directive(&mut self) -> Result<()> {
        if self.options.isolate_unknown_directives {
            self.close_directive()?;
            self.target = ActiveTarget::None;
        }
        Ok(())
    }

    fn push_data(&mut self, token: &str, line: usize) {
        match self.target {
            ActiveTarget::None => {}
            ActiveTarget::Face => {
                let (corner, clean) = decode_corner_checked(token, self.options.corner_decoding);
                if !clean {
                    self.malformed(token, line);
                }
                self.raw.corners.push(corner);
            }
            ActiveTarget::Attribute(kind) => {
                let (value, clean) = parse_number_checked(token);
                if !clean {
                    self.malformed(token, line);
                }
                self.raw.table_mut(kind).values.push(value);
            }
        }
    }

    fn malformed(&mut self, token: &str, line: usize) {
        tracing::warn!(line, token, "malformed number coerced");
        self.raw.diagnostics.push(Diagnostic::MalformedNumber {
            line,
            token: token.to_string(),
        });
    }

    fn close_directive(&mut self) -> Result<()> {
        let Some(open) = self.open.take() else {
            return Ok(());
        };
        match open.target {
            ActiveTarget::Attribute(kind) => self.close_attribute(kind, open),
            ActiveTarget::Face => self.close_face(open),
            ActiveTarget::None => Ok(()),
        }
    }

    fn close_attribute(&mut self, kind: AttributeKind, open: OpenDirective) -> Result<()> {
        let enforce = self.options.widths == WidthCheck::Enforce;
        let table = self.raw.table_mut(kind);
        let found = table.values.len() - open.start;
        if let Some(expected) = table.first_width {
            if found != expected {
                if enforce {
                    return Err(LoadError::InconsistentWidth {
                        attribute: kind,
                        line: open.line,
                        expected,
                        found,
                    });
                }
                tracing::debug!(line = open.line, %kind, expected, found, "mixed attribute width");
            }
        }
        table.record_width(found);
        Ok(())
    }

    fn close_face(&mut self, open: OpenDirective) -> Result<()> {
        let corners = self.raw.corners.len() - open.start;
        if corners == 3 {
            return Ok(());
        }
        match self.options.face_arity {
            FaceArity::Flatten => Ok(()),
            FaceArity::Reject => Err(LoadError::FaceArity {
                line: open.line,
                corners,
            }),
            FaceArity::Triangulate => {
                let polygon = self.raw.corners.split_off(open.start);
                if polygon.len() < 3 {
                    tracing::warn!(line = open.line, corners, "face dropped, too few corners");
                    self.raw.diagnostics.push(Diagnostic::DroppedFace {
                        line: open.line,
                        corners,
                    });
                    return Ok(());
                }
                for i in 1..polygon.len() - 1 {
                    self.raw
                        .corners
                        .extend([polygon[0], polygon[i], polygon[i + 1]]);
                }
                Ok(())
            }
        }
    }
}

/// Parse a whole document.
pub fn parse_str(text: &str, options: &LoadOptions) -> Result<RawGeometry> {
    let mut parser = Parser::new(options);
    for (i, line) in text.lines().enumerate() {
        parser.feed_line(i + 1, line)?;
    }
    parser.finish()
}

/// Numeric fallback policy: parse the longest float prefix like C `atof`,
/// and yield `0.0` when there is none.
pub fn parse_number_or_zero(token: &str) -> f32 {
    parse_number_checked(token).0
}

/// Like `parse_number_or_zero`, also reporting whether the whole token parsed.
fn parse_number_checked(token: &str) -> (f32, bool) {
    if let Ok((rest, value)) = float::<&str, nom::error::Error<&str>>(token) {
        return (value, rest.is_empty());
    }
    // `float` fails outright on a dangling exponent (`1e`, `2.5e-x`)
    match mantissa(token) {
        Ok((rest, digits)) => (digits.parse().unwrap_or(0.0), rest.is_empty()),
        Err(_) => (0.0, false),
    }
}

/// Sign, digits and fraction without an exponent.
fn mantissa(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        opt(one_of("+-")),
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )),
    ))(input)
}
