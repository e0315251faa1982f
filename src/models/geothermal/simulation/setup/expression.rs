use std::fmt;

use crate::support::geology::rounded;

/// A named model parameter and the expression that defines it.
///
/// Expressions use the solver's unit syntax, e.g. `300[m]`, and may refer to
/// other parameters by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub expression: String,
}

impl Parameter {
    /// A parameter with a numeric value, rounded to six significant digits.
    #[must_use]
    pub fn quantity(name: impl Into<String>, value: f64, unit: &str) -> Self {
        Self {
            name: name.into(),
            expression: format!("{}[{unit}]", rounded(value)),
        }
    }

    /// A parameter defined in terms of other parameters.
    #[must_use]
    pub fn derived(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expression: expression.into(),
        }
    }

    /// Parses a numeric value back from a `value[unit]` expression.
    ///
    /// Returns `None` for derived parameters or a different unit.
    #[must_use]
    pub fn value_in(&self, unit: &str) -> Option<f64> {
        self.expression
            .strip_suffix(']')
            .and_then(|rest| rest.strip_suffix(unit))
            .and_then(|rest| rest.strip_suffix('['))
            .and_then(|number| number.parse().ok())
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.expression)
    }
}

/// How a piecewise function behaves outside its pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extrapolation {
    /// The outermost pieces are continued.
    Interior,

    /// The pieces repeat with the period of their combined span.
    Periodic,
}

/// One interval of a [`Piecewise`] function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub start: String,
    pub end: String,
    pub expression: String,
}

/// A function of one argument defined by intervals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piecewise {
    pub name: String,
    pub argument: String,
    pub argument_unit: String,
    pub function_unit: String,
    pub extrapolation: Extrapolation,
    pub pieces: Vec<Piece>,
}

/// A named variable defined on the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub expression: String,
}

impl Variable {
    pub(super) fn new(name: &str, expression: impl Into<String>) -> Self {
        Self {
            name: name.to_owned(),
            expression: expression.into(),
        }
    }
}
