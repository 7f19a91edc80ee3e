//! The named-unit table, decimal prefixes, and metric systems.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::MetricError;

/// Base physical quantities: length, mass, time, current,
/// temperature, amount, luminous intensity, and plane angle.
pub(crate) const BASE_QUANTITIES: &[&str] = &["L", "M", "T", "I", "Θ", "N", "J", "A"];

/// One entry of the named-unit table.
pub(crate) struct NamedUnit {
    pub symbol: &'static str,
    #[allow(dead_code)]
    pub name: &'static str,
    /// Dimension expression over the base quantities.
    pub quantity: &'static str,
    /// Scale relative to the MKS-coherent unit of the quantity.
    pub factor: f64,
}

const DEGREE: f64 = std::f64::consts::PI / 180.0;

pub(crate) const NAMED_UNITS: &[NamedUnit] = &[
    NamedUnit { symbol: "m", name: "meter", quantity: "L", factor: 1.0 },
    NamedUnit { symbol: "s", name: "second", quantity: "T", factor: 1.0 },
    NamedUnit { symbol: "g", name: "gram", quantity: "M", factor: 1e-3 },
    NamedUnit { symbol: "A", name: "ampere", quantity: "I", factor: 1.0 },
    NamedUnit { symbol: "K", name: "kelvin", quantity: "Θ", factor: 1.0 },
    NamedUnit { symbol: "mol", name: "mole", quantity: "N", factor: 1.0 },
    NamedUnit { symbol: "cd", name: "candela", quantity: "J", factor: 1.0 },
    NamedUnit { symbol: "rad", name: "radian", quantity: "A", factor: 1.0 },
    NamedUnit { symbol: "deg", name: "degree", quantity: "A", factor: DEGREE },
    NamedUnit { symbol: "sr", name: "steradian", quantity: "A^2", factor: 1.0 },
    NamedUnit { symbol: "Hz", name: "hertz", quantity: "T^-1", factor: 1.0 },
    NamedUnit { symbol: "N", name: "newton", quantity: "M L T^-2", factor: 1.0 },
    NamedUnit { symbol: "Pa", name: "pascal", quantity: "M L^-1 T^-2", factor: 1.0 },
    NamedUnit { symbol: "J", name: "joule", quantity: "M L^2 T^-2", factor: 1.0 },
    NamedUnit { symbol: "W", name: "watt", quantity: "M L^2 T^-3", factor: 1.0 },
    NamedUnit { symbol: "C", name: "coulomb", quantity: "T I", factor: 1.0 },
    NamedUnit { symbol: "V", name: "volt", quantity: "M L^2 T^-3 I^-1", factor: 1.0 },
    NamedUnit { symbol: "T", name: "tesla", quantity: "M T^-2 I^-1", factor: 1.0 },
    NamedUnit { symbol: "F", name: "farad", quantity: "M^-1 L^-2 T^4 I^2", factor: 1.0 },
    NamedUnit { symbol: "eV", name: "electronvolt", quantity: "M L^2 T^-2", factor: 1.602176634e-19 },
    NamedUnit { symbol: "erg", name: "erg", quantity: "M L^2 T^-2", factor: 1e-7 },
    NamedUnit { symbol: "dyn", name: "dyne", quantity: "M L T^-2", factor: 1e-5 },
    NamedUnit { symbol: "min", name: "minute", quantity: "T", factor: 60.0 },
    NamedUnit { symbol: "h", name: "hour", quantity: "T", factor: 3600.0 },
    NamedUnit { symbol: "day", name: "day", quantity: "T", factor: 86400.0 },
    NamedUnit { symbol: "au", name: "astronomical unit", quantity: "L", factor: 1.495978707e11 },
];

/// Decimal prefixes. The two-character `da` comes first so prefix
/// matching can scan in order.
pub(crate) const PREFIXES: &[(&str, f64)] = &[
    ("da", 1e1),
    ("Y", 1e24),
    ("Z", 1e21),
    ("E", 1e18),
    ("P", 1e15),
    ("T", 1e12),
    ("G", 1e9),
    ("M", 1e6),
    ("k", 1e3),
    ("h", 1e2),
    ("d", 1e-1),
    ("c", 1e-2),
    ("m", 1e-3),
    ("µ", 1e-6),
    ("μ", 1e-6),
    ("u", 1e-6),
    ("n", 1e-9),
    ("p", 1e-12),
    ("f", 1e-15),
    ("a", 1e-18),
    ("z", 1e-21),
    ("y", 1e-24),
];

/// A unit symbol resolved against the table.
pub(crate) struct Resolved {
    /// Scale to the MKS-coherent unit, prefix included.
    pub factor: f64,
    pub quantity: &'static str,
}

/// Resolve a symbol, trying the full spelling before any prefix split
/// so that `cd` is candela rather than centi-day.
pub(crate) fn resolve(symbol: &str) -> Result<Resolved, MetricError> {
    if let Some(u) = named(symbol) {
        return Ok(Resolved {
            factor: u.factor,
            quantity: u.quantity,
        });
    }
    for (prefix, power) in PREFIXES {
        if let Some(rest) = symbol.strip_prefix(prefix) {
            if let Some(u) = named(rest) {
                return Ok(Resolved {
                    factor: power * u.factor,
                    quantity: u.quantity,
                });
            }
        }
    }
    Err(MetricError::UnknownUnit(symbol.to_string()))
}

fn named(symbol: &str) -> Option<&'static NamedUnit> {
    NAMED_UNITS.iter().find(|u| u.symbol == symbol)
}

/// A coherent system of base units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum System {
    #[default]
    Mks,
    Cgs,
}

impl System {
    /// The system's base unit for a base-quantity symbol.
    pub fn base_unit(&self, quantity: &str) -> Option<&'static str> {
        let mks = matches!(self, System::Mks);
        match quantity {
            "L" => Some(if mks { "m" } else { "cm" }),
            "M" => Some(if mks { "kg" } else { "g" }),
            "T" => Some("s"),
            // Electromagnetic cgs subsystems are out of scope; amperes
            // serve both systems.
            "I" => Some("A"),
            "Θ" => Some("K"),
            "N" => Some("mol"),
            "J" => Some("cd"),
            "A" => Some("rad"),
            _ => None,
        }
    }
}

impl FromStr for System {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("mks") {
            Ok(System::Mks)
        } else if s.eq_ignore_ascii_case("cgs") {
            Ok(System::Cgs)
        } else {
            Err(MetricError::UnknownSystem(s.to_string()))
        }
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            System::Mks => write!(f, "mks"),
            System::Cgs => write!(f, "cgs"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_symbol_wins_over_prefix_split() {
        // `cd` must resolve as candela, not centi-day.
        let r = resolve("cd").unwrap();
        assert_eq!(r.quantity, "J");
        assert_eq!(r.factor, 1.0);
    }

    #[test]
    fn prefix_split_applies_when_no_full_match() {
        let km = resolve("km").unwrap();
        assert_eq!(km.quantity, "L");
        assert_eq!(km.factor, 1e3);

        let nt = resolve("nT").unwrap();
        assert_eq!(nt.quantity, "M T^-2 I^-1");
        assert_eq!(nt.factor, 1e-9);
    }

    #[test]
    fn deca_beats_deci() {
        let dam = resolve("dam").unwrap();
        assert_eq!(dam.factor, 1e1);
        let dm = resolve("dm").unwrap();
        assert_eq!(dm.factor, 1e-1);
    }

    #[test]
    fn kilogram_is_coherent() {
        let kg = resolve("kg").unwrap();
        assert_eq!(kg.quantity, "M");
        assert_eq!(kg.factor, 1.0);
    }

    #[test]
    fn unknown_symbol_errors() {
        assert!(resolve("furlong").is_err());
    }
}
