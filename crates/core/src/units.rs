//! Lengths in an abstract `(magnitude, unit)` form.
//!
//! Front ends hand geometry to the tree in whatever unit they decoded it
//! in. All comparisons happen in points.

use std::fmt;

use ordered_float::OrderedFloat;

/// Points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Unit of a [`Length`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Unit {
    Pt,
    Px,
    In,
    Cm,
    Mm,
}

impl Unit {
    /// Number of points in one of this unit.
    pub const fn points(self) -> f64 {
        match self {
            Unit::Pt => 1.0,
            Unit::Px => 0.75,
            Unit::In => POINTS_PER_INCH,
            Unit::Cm => POINTS_PER_INCH / 2.54,
            Unit::Mm => POINTS_PER_INCH / 25.4,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Unit::Pt => "pt",
            Unit::Px => "px",
            Unit::In => "in",
            Unit::Cm => "cm",
            Unit::Mm => "mm",
        }
    }
}

/// A magnitude paired with its unit.
///
/// Equality and hashing are exact on the stored magnitude and unit, so a
/// length compares equal only to the value it was built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Length {
    magnitude: OrderedFloat<f64>,
    unit: Unit,
}

impl Length {
    pub const fn new(magnitude: f64, unit: Unit) -> Self {
        Self {
            magnitude: OrderedFloat(magnitude),
            unit,
        }
    }

    pub const fn pt(magnitude: f64) -> Self {
        Self::new(magnitude, Unit::Pt)
    }

    pub const fn magnitude(&self) -> f64 {
        self.magnitude.0
    }

    pub const fn unit(&self) -> Unit {
        self.unit
    }

    /// Value converted to points.
    pub fn to_points(&self) -> f64 {
        self.magnitude.0 * self.unit.points()
    }

    pub fn is_positive(&self) -> bool {
        self.magnitude.0 > 0.0 && self.magnitude.0.is_finite()
    }

    pub fn is_finite(&self) -> bool {
        self.magnitude.0.is_finite()
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.magnitude.0, self.unit.as_str())
    }
}
