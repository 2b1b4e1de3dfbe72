//! Points, rectangles and the SWF affine matrix.

use bitstream::{sb_bits_needed, BitReader, BitResult, BitWriter};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 1.0 in 16.16 fixed point.
pub const FIXED_ONE: i32 = 0x1_0000;

/// Width of the `NBits` fields inside a `MATRIX`.
const NBITS_WIDTH: u8 = 5;

/// A point in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in twips.
///
/// [`Rect::EMPTY`] holds inverted extremes and is the identity of
/// [`Rect::union`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl Rect {
    /// The empty rectangle.
    pub const EMPTY: Self = Self {
        x_min: i32::MAX,
        x_max: i32::MIN,
        y_min: i32::MAX,
        y_max: i32::MIN,
    };

    /// Creates a rectangle from its extremes, in SWF field order.
    #[must_use]
    pub const fn new(x_min: i32, x_max: i32, y_min: i32, y_max: i32) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Returns `true` if the rectangle encloses nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.x_min > self.x_max || self.y_min > self.y_max
    }

    /// Componentwise min of the minima and max of the maxima.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            x_max: self.x_max.max(other.x_max),
            y_min: self.y_min.min(other.y_min),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Maps the two diagonal corners through `matrix` and returns the
    /// rectangle spanned by their images.
    ///
    /// Only `(x_min, y_min)` and `(x_max, y_max)` are mapped, so under
    /// rotation or skew the result can be smaller than the true image of the
    /// rectangle.
    #[must_use]
    pub fn transform_corners(self, matrix: &Matrix) -> Self {
        let top_left = matrix.apply(Point::new(self.x_min, self.y_min));
        let bottom_right = matrix.apply(Point::new(self.x_max, self.y_max));
        Self {
            x_min: top_left.x.min(bottom_right.x),
            x_max: top_left.x.max(bottom_right.x),
            y_min: top_left.y.min(bottom_right.y),
            y_max: top_left.y.max(bottom_right.y),
        }
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl FromIterator<Rect> for Rect {
    fn from_iter<I: IntoIterator<Item = Rect>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::union)
    }
}

/// A 2D affine transform (`MATRIX`).
///
/// Scale and rotate/skew terms are raw 16.16 fixed-point values; translation
/// is in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Matrix {
    pub scale_x: i32,
    pub scale_y: i32,
    pub rotate_skew0: i32,
    pub rotate_skew1: i32,
    pub translate_x: i32,
    pub translate_y: i32,
}

impl Matrix {
    pub const IDENTITY: Self = Self {
        scale_x: FIXED_ONE,
        scale_y: FIXED_ONE,
        rotate_skew0: 0,
        rotate_skew1: 0,
        translate_x: 0,
        translate_y: 0,
    };

    /// A pure translation.
    #[must_use]
    pub const fn translate(x: i32, y: i32) -> Self {
        Self {
            translate_x: x,
            translate_y: y,
            ..Self::IDENTITY
        }
    }

    /// A pure scale from floating-point factors.
    #[must_use]
    pub fn scale(x: f64, y: f64) -> Self {
        Self {
            scale_x: to_fixed(x),
            scale_y: to_fixed(y),
            ..Self::IDENTITY
        }
    }

    /// A counter-clockwise rotation by `radians` in y-down twip space.
    #[must_use]
    pub fn rotation(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            scale_x: to_fixed(cos),
            scale_y: to_fixed(cos),
            rotate_skew0: to_fixed(sin),
            rotate_skew1: to_fixed(-sin),
            translate_x: 0,
            translate_y: 0,
        }
    }

    /// Maps a point through the transform.
    ///
    /// Evaluated in floating point and truncated toward zero.
    #[must_use]
    pub fn apply(&self, point: Point) -> Point {
        let x = f64::from(point.x);
        let y = f64::from(point.y);
        let mapped_x = x * from_fixed(self.scale_x)
            + y * from_fixed(self.rotate_skew1)
            + f64::from(self.translate_x);
        let mapped_y = x * from_fixed(self.rotate_skew0)
            + y * from_fixed(self.scale_y)
            + f64::from(self.translate_y);
        Point::new(mapped_x as i32, mapped_y as i32)
    }

    /// Returns `true` if a scale group must be written.
    #[must_use]
    pub const fn has_scale(&self) -> bool {
        self.scale_x != FIXED_ONE || self.scale_y != FIXED_ONE
    }

    /// Returns `true` if a rotate/skew group must be written.
    #[must_use]
    pub const fn has_rotate(&self) -> bool {
        self.rotate_skew0 != 0 || self.rotate_skew1 != 0
    }

    /// Reads a bit-packed `MATRIX` and aligns the reader to the next byte.
    pub fn read(reader: &mut BitReader<'_>) -> BitResult<Self> {
        let mut matrix = Self::IDENTITY;
        if reader.read_bit()? {
            let bits = reader.read_ub(NBITS_WIDTH)? as u8;
            matrix.scale_x = reader.read_fb(bits)?;
            matrix.scale_y = reader.read_fb(bits)?;
        }
        if reader.read_bit()? {
            let bits = reader.read_ub(NBITS_WIDTH)? as u8;
            matrix.rotate_skew0 = reader.read_fb(bits)?;
            matrix.rotate_skew1 = reader.read_fb(bits)?;
        }
        let bits = reader.read_ub(NBITS_WIDTH)? as u8;
        matrix.translate_x = reader.read_sb(bits)?;
        matrix.translate_y = reader.read_sb(bits)?;
        reader.align_to_byte()?;
        Ok(matrix)
    }

    /// Writes a bit-packed `MATRIX` with minimal field widths, then pads to
    /// the next byte.
    ///
    /// Values that need all 32 bits cannot be described by the 5-bit width
    /// field and fail with [`bitstream::BitError::ValueOutOfRange`].
    pub fn write(&self, writer: &mut BitWriter) -> BitResult<()> {
        let has_scale = self.has_scale();
        writer.write_bit(has_scale);
        if has_scale {
            let bits = sb_bits_needed(self.scale_x).max(sb_bits_needed(self.scale_y));
            writer.write_ub(u32::from(bits), NBITS_WIDTH)?;
            writer.write_fb(self.scale_x, bits)?;
            writer.write_fb(self.scale_y, bits)?;
        }
        let has_rotate = self.has_rotate();
        writer.write_bit(has_rotate);
        if has_rotate {
            let bits = sb_bits_needed(self.rotate_skew0).max(sb_bits_needed(self.rotate_skew1));
            writer.write_ub(u32::from(bits), NBITS_WIDTH)?;
            writer.write_fb(self.rotate_skew0, bits)?;
            writer.write_fb(self.rotate_skew1, bits)?;
        }
        let bits = sb_bits_needed(self.translate_x).max(sb_bits_needed(self.translate_y));
        writer.write_ub(u32::from(bits), NBITS_WIDTH)?;
        writer.write_sb(self.translate_x, bits)?;
        writer.write_sb(self.translate_y, bits)?;
        writer.align_to_byte();
        Ok(())
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn to_fixed(value: f64) -> i32 {
    (value * f64::from(FIXED_ONE)).round() as i32
}

fn from_fixed(value: i32) -> f64 {
    f64::from(value) / f64::from(FIXED_ONE)
}
