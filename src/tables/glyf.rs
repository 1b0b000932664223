//! `glyf` table: glyph outline data
//!
//! Each glyph is either a simple outline (contours of on/off-curve
//! points stored as flag-compressed deltas), a composite referencing
//! other glyphs with a transform, or intentionally empty (a zero-length
//! `loca` range). Empty glyphs resolve by substituting glyph 0; the
//! substitution count is bounded so a malformed font whose glyph 0 is
//! itself empty fails fast instead of looping.

use crate::binary::BigEndianReader;
use crate::error::{FontError, Result};
use crate::geometry::{Bounds, Point};
use crate::tables::loca::IndexLocationTable;
use crate::tables::{FontReader, TableTag};
use bitflags::bitflags;

/// Table tag for the glyph data.
pub const TAG: TableTag = TableTag::new(b"glyf");

/// How many times an empty glyph may substitute glyph 0 while resolving
/// a single glyph before the chain is treated as circular.
pub const EMPTY_SUBSTITUTION_LIMIT: u16 = 100;

/// Maximum composite nesting before a component cycle is assumed.
const COMPOSITE_DEPTH_LIMIT: u16 = 32;

bitflags! {
    /// Simple-glyph per-point flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct SimpleGlyphFlags: u8 {
        const ON_CURVE = 0x01;
        const X_SHORT = 0x02;
        const Y_SHORT = 0x04;
        const REPEAT = 0x08;
        const X_SAME_OR_POSITIVE = 0x10;
        const Y_SAME_OR_POSITIVE = 0x20;
    }
}

bitflags! {
    /// Composite-glyph component flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct CompositeFlags: u16 {
        const ARG_1_AND_2_ARE_WORDS = 0x0001;
        const ARGS_ARE_XY_VALUES = 0x0002;
        const WE_HAVE_A_SCALE = 0x0008;
        const MORE_COMPONENTS = 0x0020;
        const WE_HAVE_AN_X_AND_Y_SCALE = 0x0040;
        const WE_HAVE_A_TWO_BY_TWO = 0x0080;
    }
}

/// A glyph outline: control points, on-curve flags, contour end indices
/// and the tight bounds over the points. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct GlyphVector {
    control_points: Vec<Point>,
    on_curves: Vec<bool>,
    end_points: Vec<u16>,
    bounds: Bounds,
}

impl GlyphVector {
    /// Build an outline, deriving bounds from the points.
    ///
    /// The point and flag sequences must be the same length and end
    /// indices strictly increasing and within the point count.
    pub fn new(control_points: Vec<Point>, on_curves: Vec<bool>, end_points: Vec<u16>) -> Self {
        debug_assert_eq!(control_points.len(), on_curves.len());
        debug_assert!(end_points
            .windows(2)
            .all(|pair| pair[0] < pair[1]));
        debug_assert!(end_points
            .last()
            .is_none_or(|&last| (last as usize) < control_points.len()));

        let bounds = Bounds::over_points(&control_points);
        Self {
            control_points,
            on_curves,
            end_points,
            bounds,
        }
    }

    /// An outline with no contours.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The points defining the shape of the glyph, in font units.
    pub fn control_points(&self) -> &[Point] {
        &self.control_points
    }

    /// Whether the corresponding control point lies on the curve.
    pub fn on_curves(&self) -> &[bool] {
        &self.on_curves
    }

    /// Index of the last point of each contour.
    pub fn end_points(&self) -> &[u16] {
        &self.end_points
    }

    /// Tight bounds over the control points.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

#[derive(Debug, Clone)]
struct CompositeComponent {
    glyph_id: u16,
    offset: Point,
    // Row-major 2x2 transform applied before the offset.
    transform: [f32; 4],
}

#[derive(Debug, Clone)]
enum GlyphLoader {
    Simple(GlyphVector),
    Composite(Vec<CompositeComponent>),
    Empty,
}

/// Parsed glyph outline table.
#[derive(Debug, Clone)]
pub struct GlyphTable {
    loaders: Vec<GlyphLoader>,
    substitution_limit: u16,
}

impl GlyphTable {
    /// Load the outline table; `Ok(None)` when the font carries none.
    pub fn load(font: &FontReader<'_>, loca: &IndexLocationTable) -> Result<Option<Self>> {
        let Some(reader) = font.try_table_reader(TAG) else {
            return Ok(None);
        };
        let data = reader;

        let mut loaders = Vec::with_capacity(loca.glyph_count());
        for glyph_id in 0..loca.glyph_count() as u16 {
            let (start, end) = loca
                .glyph_range(glyph_id)
                .ok_or(FontError::InvalidTable(TAG))?;
            if start == end {
                loaders.push(GlyphLoader::Empty);
                continue;
            }
            if start > end || end as usize > data.len() {
                return Err(FontError::InvalidTable(TAG));
            }

            let mut reader = data.clone();
            reader.seek(start as usize);
            loaders.push(Self::parse_glyph(&mut reader)?);
        }

        Ok(Some(Self {
            loaders,
            substitution_limit: EMPTY_SUBSTITUTION_LIMIT,
        }))
    }

    /// Replace the empty-glyph substitution bound (tests only need this
    /// to exercise the guard without building hundred-link chains).
    pub fn with_substitution_limit(mut self, limit: u16) -> Self {
        self.substitution_limit = limit;
        self
    }

    /// Number of glyphs in the table.
    pub fn glyph_count(&self) -> usize {
        self.loaders.len()
    }

    /// Resolve the outline for a glyph index.
    ///
    /// Out-of-range indices resolve like empty glyphs: glyph 0 stands
    /// in. Fails with [`FontError::CircularGlyphReference`] when the
    /// substitution bound is exceeded.
    pub fn glyph(&self, glyph_id: u16) -> Result<GlyphVector> {
        let mut substitutions = 0u16;
        self.resolve(glyph_id, &mut substitutions, 0)
    }

    fn resolve(&self, glyph_id: u16, substitutions: &mut u16, depth: u16) -> Result<GlyphVector> {
        if depth > COMPOSITE_DEPTH_LIMIT {
            return Err(FontError::CircularGlyphReference);
        }

        let loader = match self.loaders.get(glyph_id as usize) {
            Some(loader) => loader,
            None => &GlyphLoader::Empty,
        };

        match loader {
            GlyphLoader::Simple(vector) => Ok(vector.clone()),
            GlyphLoader::Empty => {
                *substitutions += 1;
                if *substitutions > self.substitution_limit {
                    return Err(FontError::CircularGlyphReference);
                }
                // Glyph 0 may itself be empty; the counter is what stops
                // that chain.
                self.resolve(0, substitutions, depth)
            }
            GlyphLoader::Composite(components) => {
                let mut points = Vec::new();
                let mut on_curves = Vec::new();
                let mut end_points = Vec::new();
                for component in components {
                    let child = self.resolve(component.glyph_id, substitutions, depth + 1)?;
                    let base = points.len() as u16;
                    let [a, b, c, d] = component.transform;
                    for &p in child.control_points() {
                        points.push(Point::new(
                            a * p.x + b * p.y + component.offset.x,
                            c * p.x + d * p.y + component.offset.y,
                        ));
                    }
                    on_curves.extend_from_slice(child.on_curves());
                    for &e in child.end_points() {
                        end_points.push(base + e);
                    }
                }
                Ok(GlyphVector::new(points, on_curves, end_points))
            }
        }
    }

    fn parse_glyph(reader: &mut BigEndianReader<'_>) -> Result<GlyphLoader> {
        let num_contours = reader.read_i16()?;
        // Bounding box recorded in the file; we derive bounds from the
        // decoded points instead.
        reader.skip(8);

        if num_contours >= 0 {
            Ok(GlyphLoader::Simple(Self::parse_simple(
                reader,
                num_contours as usize,
            )?))
        } else {
            Ok(GlyphLoader::Composite(Self::parse_composite(reader)?))
        }
    }

    fn parse_simple(reader: &mut BigEndianReader<'_>, num_contours: usize) -> Result<GlyphVector> {
        let mut end_points = Vec::with_capacity(num_contours);
        for _ in 0..num_contours {
            let end = reader.read_u16()?;
            if end_points.last().is_some_and(|&prev| end <= prev) {
                return Err(FontError::InvalidTable(TAG));
            }
            end_points.push(end);
        }
        let num_points = match end_points.last() {
            Some(&last) => last as usize + 1,
            None => 0,
        };

        let instruction_len = reader.read_u16()?;
        reader.skip(instruction_len as usize);

        let mut flags = Vec::with_capacity(num_points);
        while flags.len() < num_points {
            let flag = SimpleGlyphFlags::from_bits_truncate(reader.read_u8()?);
            flags.push(flag);
            if flag.contains(SimpleGlyphFlags::REPEAT) {
                let repeat = reader.read_u8()?;
                for _ in 0..repeat {
                    if flags.len() >= num_points {
                        break;
                    }
                    flags.push(flag);
                }
            }
        }

        let xs = Self::parse_coordinates(
            reader,
            &flags,
            SimpleGlyphFlags::X_SHORT,
            SimpleGlyphFlags::X_SAME_OR_POSITIVE,
        )?;
        let ys = Self::parse_coordinates(
            reader,
            &flags,
            SimpleGlyphFlags::Y_SHORT,
            SimpleGlyphFlags::Y_SAME_OR_POSITIVE,
        )?;

        let points = xs
            .iter()
            .zip(&ys)
            .map(|(&x, &y)| Point::new(x as f32, y as f32))
            .collect();
        let on_curves = flags
            .iter()
            .map(|f| f.contains(SimpleGlyphFlags::ON_CURVE))
            .collect();

        Ok(GlyphVector::new(points, on_curves, end_points))
    }

    fn parse_coordinates(
        reader: &mut BigEndianReader<'_>,
        flags: &[SimpleGlyphFlags],
        short: SimpleGlyphFlags,
        same_or_positive: SimpleGlyphFlags,
    ) -> Result<Vec<i16>> {
        let mut coords = Vec::with_capacity(flags.len());
        let mut value = 0i16;
        for flag in flags {
            if flag.contains(short) {
                let delta = reader.read_u8()? as i16;
                if flag.contains(same_or_positive) {
                    value = value.wrapping_add(delta);
                } else {
                    value = value.wrapping_sub(delta);
                }
            } else if !flag.contains(same_or_positive) {
                value = value.wrapping_add(reader.read_i16()?);
            }
            coords.push(value);
        }
        Ok(coords)
    }

    fn parse_composite(reader: &mut BigEndianReader<'_>) -> Result<Vec<CompositeComponent>> {
        let mut components = Vec::new();
        loop {
            let flags = CompositeFlags::from_bits_truncate(reader.read_u16()?);
            let glyph_id = reader.read_u16()?;

            let (arg1, arg2) = if flags.contains(CompositeFlags::ARG_1_AND_2_ARE_WORDS) {
                (reader.read_i16()? as f32, reader.read_i16()? as f32)
            } else {
                (reader.read_i8()? as f32, reader.read_i8()? as f32)
            };
            // Point-matching composites (args are point indices) are not
            // supported; they place the component at the origin.
            let offset = if flags.contains(CompositeFlags::ARGS_ARE_XY_VALUES) {
                Point::new(arg1, arg2)
            } else {
                Point::zero()
            };

            let transform = if flags.contains(CompositeFlags::WE_HAVE_A_SCALE) {
                let s = read_f2dot14(reader)?;
                [s, 0.0, 0.0, s]
            } else if flags.contains(CompositeFlags::WE_HAVE_AN_X_AND_Y_SCALE) {
                let sx = read_f2dot14(reader)?;
                let sy = read_f2dot14(reader)?;
                [sx, 0.0, 0.0, sy]
            } else if flags.contains(CompositeFlags::WE_HAVE_A_TWO_BY_TWO) {
                [
                    read_f2dot14(reader)?,
                    read_f2dot14(reader)?,
                    read_f2dot14(reader)?,
                    read_f2dot14(reader)?,
                ]
            } else {
                [1.0, 0.0, 0.0, 1.0]
            };

            components.push(CompositeComponent {
                glyph_id,
                offset,
                transform,
            });

            if !flags.contains(CompositeFlags::MORE_COMPONENTS) {
                break;
            }
        }
        Ok(components)
    }
}

fn read_f2dot14(reader: &mut BigEndianReader<'_>) -> Result<f32> {
    Ok(reader.read_i16()? as f32 / 16384.0)
}
