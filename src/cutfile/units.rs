use crate::error::Warning;

/// Unit declared by the `units` attribute on the root element
#[derive(Debug, Clone, PartialEq)]
pub enum Unit {
    HundredthsMm,
    Inches,
    /// Anything else, including a missing attribute. Treated as millimeters.
    Unrecognized(Option<String>),
}

impl Unit {
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("hundredths_mm") => Unit::HundredthsMm,
            Some("inches") => Unit::Inches,
            other => Unit::Unrecognized(other.map(str::to_string)),
        }
    }

    /// Millimeters per raw unit
    pub fn scale(&self) -> f64 {
        match self {
            Unit::HundredthsMm => 0.01,
            Unit::Inches => 25.4,
            Unit::Unrecognized(_) => 1.0,
        }
    }

    pub fn warning(&self) -> Option<Warning> {
        match self {
            Unit::Unrecognized(unit) => Some(Warning::UnrecognizedUnit { unit: unit.clone() }),
            _ => None,
        }
    }
}

/// Resolve a unit attribute to its scale factor, with a warning when the
/// unit is not recognized. Never fails.
pub fn resolve_unit(value: Option<&str>) -> (f64, Option<Warning>) {
    let unit = Unit::from_attr(value);
    (unit.scale(), unit.warning())
}
