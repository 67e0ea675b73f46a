//! Numbers with units.
//!
//! A unit is a product of numerator units over a product of denominator
//! units: `px*em/s`. Units in the same class (lengths, angles, times,
//! frequencies, resolutions) convert into one another through a fixed
//! factor table; anything else only matches itself.

use std::cmp::Ordering;
use std::fmt::Write;

use smallvec::SmallVec;

use crate::EvalResult;

/// Tolerance used by value equality.
pub const EPSILON: f64 = 1e-12;

/// Unit names of one side of a fraction. Most numbers carry at most one.
pub type UnitList = SmallVec<[String; 1]>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum UnitClass {
    Length,
    Angle,
    Time,
    Frequency,
    Resolution,
}

/// Class of a unit and how many canonical units (px, deg, s, Hz, dppx) one of
/// it is worth.
fn unit_info(unit: &str) -> Option<(UnitClass, f64)> {
    let info = match unit.to_ascii_lowercase().as_str() {
        "px" => (UnitClass::Length, 1.0),
        "in" => (UnitClass::Length, 96.0),
        "cm" => (UnitClass::Length, 96.0 / 2.54),
        "mm" => (UnitClass::Length, 96.0 / 25.4),
        "q" => (UnitClass::Length, 96.0 / 101.6),
        "pt" => (UnitClass::Length, 96.0 / 72.0),
        "pc" => (UnitClass::Length, 16.0),
        "deg" => (UnitClass::Angle, 1.0),
        "grad" => (UnitClass::Angle, 0.9),
        "rad" => (UnitClass::Angle, 180.0 / std::f64::consts::PI),
        "turn" => (UnitClass::Angle, 360.0),
        "s" => (UnitClass::Time, 1.0),
        "ms" => (UnitClass::Time, 0.001),
        "hz" => (UnitClass::Frequency, 1.0),
        "khz" => (UnitClass::Frequency, 1000.0),
        "dppx" => (UnitClass::Resolution, 1.0),
        "dpi" => (UnitClass::Resolution, 1.0 / 96.0),
        "dpcm" => (UnitClass::Resolution, 2.54 / 96.0),
        _ => return None,
    };
    Some(info)
}

/// Factor turning a quantity in `from` into one in `to`, if they convert.
pub fn conversion_factor(from: &str, to: &str) -> Option<f64> {
    if from == to {
        return Some(1.0);
    }
    let (from_class, from_factor) = unit_info(from)?;
    let (to_class, to_factor) = unit_info(to)?;
    (from_class == to_class).then_some(from_factor / to_factor)
}

/// Round to the nearest integer, treating values within `precision` digits
/// of `.5` as halfway and rounding them up.
pub fn fuzzy_round(value: f64, precision: u8) -> f64 {
    let fract = value.rem_euclid(1.0);
    let epsilon = 10f64.powi(-i32::from(precision) - 1);
    if fract - 0.5 > -epsilon {
        value.ceil()
    } else {
        value.floor()
    }
}

pub fn fuzzy_equals(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON || (a.is_nan() && b.is_nan())
}

/// Total order used for sorting and comparison: NaN equals NaN and sorts
/// above every other number.
pub fn fuzzy_cmp(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) if fuzzy_equals(a, b) => Ordering::Equal,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Format `value` with at most `precision` fractional digits.
///
/// Trailing zeros and a trailing point are dropped, and negative zero
/// prints as `0`.
pub fn format_number(value: f64, precision: u8) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    let mut out = String::new();
    let _ = write!(out, "{:.*}", usize::from(precision), value);
    if out.contains('.') {
        let trimmed = out.trim_end_matches('0').trim_end_matches('.').len();
        out.truncate(trimmed);
    }
    if out == "-0" || out.is_empty() {
        out = "0".to_owned();
    }
    out
}

#[derive(Clone, Debug, Default)]
pub struct Number {
    pub value: f64,
    pub numerators: UnitList,
    pub denominators: UnitList,
}

impl Number {
    /// A number with a unit string such as `px`, `%` or `px*em/s`.
    pub fn new(value: f64, unit: &str) -> Self {
        let mut number = Number::unitless(value);
        let (numer, denom) = match unit.split_once('/') {
            Some((n, d)) => (n, Some(d)),
            None => (unit, None),
        };
        number.numerators = numer
            .split('*')
            .filter(|u| !u.is_empty())
            .map(str::to_owned)
            .collect();
        if let Some(denom) = denom {
            number.denominators = denom
                .split(['*', '/'])
                .filter(|u| !u.is_empty())
                .map(str::to_owned)
                .collect();
        }
        number
    }

    pub fn unitless(value: f64) -> Self {
        Number {
            value,
            numerators: UnitList::new(),
            denominators: UnitList::new(),
        }
    }

    #[must_use]
    pub fn with_value(&self, value: f64) -> Self {
        Number {
            value,
            ..self.clone()
        }
    }

    pub fn is_unitless(&self) -> bool {
        self.numerators.is_empty() && self.denominators.is_empty()
    }

    /// A single plain unit, as in `1px`; `%` included.
    pub fn single_unit(&self) -> Option<&str> {
        match (self.numerators.as_slice(), self.denominators.is_empty()) {
            ([unit], true) => Some(unit),
            _ => None,
        }
    }

    pub fn has_unit(&self, unit: &str) -> bool {
        self.single_unit() == Some(unit)
    }

    /// Units that CSS can represent: none, or exactly one numerator.
    pub fn is_valid_css(&self) -> bool {
        self.numerators.len() <= 1 && self.denominators.is_empty()
    }

    /// The unit as `unit()` reports it: `px*em/s`.
    pub fn unit(&self) -> String {
        let mut out = self.numerators.join("*");
        if !self.denominators.is_empty() {
            out.push('/');
            out.push_str(&self.denominators.join("*"));
        }
        out
    }

    /// Cancel numerator units against convertible denominator units.
    ///
    /// `1in/1px` becomes the unitless `96`.
    #[must_use]
    pub fn reduced(mut self) -> Self {
        let mut i = 0;
        while i < self.numerators.len() {
            let found = self
                .denominators
                .iter()
                .enumerate()
                .find_map(|(j, d)| conversion_factor(&self.numerators[i], d).map(|f| (j, f)));
            if let Some((j, factor)) = found {
                self.value *= factor;
                self.numerators.remove(i);
                self.denominators.remove(j);
            } else {
                i += 1;
            }
        }
        self
    }

    /// Multiplier taking this number's units to `target`'s, when every unit
    /// on each side pairs up with a convertible one on the other.
    fn factor_to(&self, target: &Number) -> Option<f64> {
        fn side(from: &[String], to: &[String]) -> Option<f64> {
            if from.len() != to.len() {
                return None;
            }
            let mut remaining: Vec<&String> = to.iter().collect();
            let mut factor = 1.0;
            for unit in from {
                let (index, f) = remaining
                    .iter()
                    .enumerate()
                    .find_map(|(i, t)| conversion_factor(unit, t).map(|f| (i, f)))?;
                factor *= f;
                remaining.swap_remove(index);
            }
            Some(factor)
        }
        let numer = side(&self.numerators, &target.numerators)?;
        let denom = side(&self.denominators, &target.denominators)?;
        Some(numer / denom)
    }

    /// Whether the two numbers can be added, compared or converted.
    pub fn comparable(&self, other: &Number) -> bool {
        self.is_unitless() || other.is_unitless() || self.factor_to(other).is_some()
    }

    /// This number's value expressed in `target`'s units.
    pub fn value_in(&self, target: &Number) -> EvalResult<f64> {
        if self.is_unitless() || target.is_unitless() {
            return Ok(self.value);
        }
        self.factor_to(target)
            .map(|f| self.value * f)
            .ok_or_else(|| crate::incompatible_units(&target.unit(), &self.unit()))
    }

    /// Combine two numbers whose units must agree (`+`, `-`, `%`).
    ///
    /// The result carries the left operand's units, or the right operand's
    /// when the left is unitless.
    pub fn combine(&self, rhs: &Number, op: impl FnOnce(f64, f64) -> f64) -> EvalResult<Number> {
        if self.is_unitless() {
            return Ok(rhs.with_value(op(self.value, rhs.value)));
        }
        let value = op(self.value, rhs.value_in(self)?);
        Ok(self.with_value(value))
    }

    #[must_use]
    pub fn multiply(&self, rhs: &Number) -> Number {
        let mut out = Number::unitless(self.value * rhs.value);
        out.numerators = self.numerators.iter().chain(&rhs.numerators).cloned().collect();
        out.denominators = self
            .denominators
            .iter()
            .chain(&rhs.denominators)
            .cloned()
            .collect();
        out.reduced()
    }

    #[must_use]
    pub fn divide(&self, rhs: &Number) -> Number {
        let mut out = Number::unitless(self.value / rhs.value);
        out.numerators = self
            .numerators
            .iter()
            .chain(&rhs.denominators)
            .cloned()
            .collect();
        out.denominators = self
            .denominators
            .iter()
            .chain(&rhs.numerators)
            .cloned()
            .collect();
        out.reduced()
    }

    /// Ordering after unit conversion; unitless numbers compare by value.
    pub fn compare(&self, rhs: &Number) -> EvalResult<Ordering> {
        let rhs_value = rhs.value_in(self)?;
        Ok(fuzzy_cmp(self.value, rhs_value))
    }

    /// `96px` and `1in` are equal; mismatched classes are not.
    pub fn fuzzy_eq(&self, rhs: &Number) -> bool {
        let lhs = self.clone().reduced();
        let rhs = rhs.clone().reduced();
        if lhs.is_unitless() || rhs.is_unitless() {
            return fuzzy_equals(lhs.value, rhs.value);
        }
        match rhs.factor_to(&lhs) {
            Some(f) => fuzzy_equals(lhs.value, rhs.value * f),
            None => false,
        }
    }

    pub fn is_int(&self) -> bool {
        fuzzy_equals(self.value, self.value.round())
    }

    pub fn format(&self, precision: u8) -> String {
        let mut out = format_number(self.value, precision);
        out.push_str(&self.unit());
        out
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.fuzzy_eq(other)
    }
}
