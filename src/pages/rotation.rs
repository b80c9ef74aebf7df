//! Rotation requests.

use std::fmt;
use std::str::FromStr;

use super::range::PageRangeSet;
use crate::error::{PdfOpsError, Result};

/// Rotation angle in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Angle {
    /// A quarter turn.
    Deg90,
    /// A half turn.
    Deg180,
    /// Three quarter turns.
    Deg270,
}

impl Angle {
    /// Parse an angle from degrees.
    ///
    /// # Errors
    ///
    /// Returns an error if the degrees value is not 90, 180, or 270.
    pub fn from_degrees(degrees: u16) -> Result<Self> {
        match degrees {
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            _ => Err(PdfOpsError::invalid_config(format!(
                "Invalid rotation: {degrees}. Must be 90, 180, or 270"
            ))),
        }
    }

    /// Get the angle as degrees.
    pub fn as_degrees(&self) -> u16 {
        match self {
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }
}

/// Which way pages turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Clockwise; positive rotation delta.
    Clockwise,
    /// Counter-clockwise; negative rotation delta.
    CounterClockwise,
}

impl Direction {
    /// Short code used in output file names.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Clockwise => "c",
            Self::CounterClockwise => "cc",
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::Clockwise => "clockwise",
            Self::CounterClockwise => "counter-clockwise",
        }
    }
}

impl FromStr for Direction {
    type Err = PdfOpsError;

    /// Accepts `c`/`cw`/`clockwise` and `cc`/`ccw`/`counter-clockwise`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "c" | "cw" | "clockwise" => Ok(Self::Clockwise),
            "cc" | "ccw" | "counter-clockwise" | "counterclockwise" => Ok(Self::CounterClockwise),
            other => Err(PdfOpsError::invalid_config(format!(
                "Invalid direction: {other}. Must be 'c' (clockwise) or 'cc' (counter-clockwise)"
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Pages a rotation applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotationTarget {
    /// Every page of the document.
    All,
    /// Only these pages; out-of-range ones are dropped at execution time.
    Pages(PageRangeSet),
}

impl RotationTarget {
    /// Parse a target: `all` (any case) or a page-range expression.
    pub fn parse(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            Ok(Self::Pages(PageRangeSet::parse(s)?))
        }
    }
}

/// A complete rotation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationSpec {
    /// How far to turn.
    pub angle: Angle,
    /// Which way to turn.
    pub direction: Direction,
    /// Which pages to turn.
    pub target: RotationTarget,
}

impl RotationSpec {
    /// Create a rotation request.
    pub fn new(angle: Angle, direction: Direction, target: RotationTarget) -> Self {
        Self {
            angle,
            direction,
            target,
        }
    }

    /// Signed delta to add to a page's orientation.
    pub fn delta(&self) -> i64 {
        let degrees = i64::from(self.angle.as_degrees());
        match self.direction {
            Direction::Clockwise => degrees,
            Direction::CounterClockwise => -degrees,
        }
    }
}

/// Add `delta` to `current`, normalised into `0..360`.
pub fn accumulate(current: i64, delta: i64) -> i64 {
    (current + delta).rem_euclid(360)
}
