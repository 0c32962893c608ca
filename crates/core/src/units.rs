//! Length and font-size units used by the deck object model.

use serde::{Deserialize, Serialize};

/// EMUs per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// EMUs per typographic point.
pub const EMU_PER_POINT: i64 = 12_700;

/// A length in English Metric Units (1/914400 inch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Emu(pub i64);

impl Emu {
    /// Convert inches to EMU, rounding to the nearest unit.
    pub fn from_inches(inches: f64) -> Self {
        Self((inches * EMU_PER_INCH as f64).round() as i64)
    }

    /// Convert points to EMU, rounding to the nearest unit.
    pub fn from_points(points: f64) -> Self {
        Self((points * EMU_PER_POINT as f64).round() as i64)
    }

    /// Raw EMU value.
    pub fn get(self) -> i64 {
        self.0
    }

    /// Value in inches.
    pub fn inches(self) -> f64 {
        self.0 as f64 / EMU_PER_INCH as f64
    }
}

/// A font size in points.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Pt(pub f64);

impl Pt {
    /// Size in hundredths of a point, as stored in DrawingML `sz` attributes.
    pub fn centipoints(self) -> u32 {
        (self.0 * 100.0).round().max(0.0) as u32
    }
}

/// An axis-aligned rectangle on a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: Emu,
    pub top: Emu,
    pub width: Emu,
    pub height: Emu,
}

impl Rect {
    /// Create a rectangle from raw EMU values.
    pub const fn new(left: i64, top: i64, width: i64, height: i64) -> Self {
        Self {
            left: Emu(left),
            top: Emu(top),
            width: Emu(width),
            height: Emu(height),
        }
    }

    /// Create a rectangle from inch values.
    pub fn from_inches(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left: Emu::from_inches(left),
            top: Emu::from_inches(top),
            width: Emu::from_inches(width),
            height: Emu::from_inches(height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inches_to_emu() {
        assert_eq!(Emu::from_inches(10.0), Emu(9_144_000));
        assert_eq!(Emu::from_inches(7.5), Emu(6_858_000));
        assert_eq!(Emu::from_inches(1.5), Emu(1_371_600));
    }

    #[test]
    fn test_points() {
        assert_eq!(Emu::from_points(18.0), Emu(228_600));
        assert_eq!(Pt(18.0).centipoints(), 1800);
        assert_eq!(Pt(10.5).centipoints(), 1050);
    }

    #[test]
    fn test_rect_from_inches() {
        let rect = Rect::from_inches(1.0, 2.0, 8.0, 1.0);
        assert_eq!(rect, Rect::new(914_400, 1_828_800, 7_315_200, 914_400));
        assert_eq!(rect.width.inches(), 8.0);
    }
}
