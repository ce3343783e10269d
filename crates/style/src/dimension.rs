//! Scalar dimensions and the six-dimension [`LayoutSize`] a component declares.
use crate::parsers::{self, StyleParseError};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use trellis_types::{Size, SizeRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[derive(Default)]
pub enum DimensionUnit {
    #[default]
    Auto,
    Points,
    Fraction,
}

/// A length that is either automatic, an absolute number of points, or a
/// fraction of the parent's extent on the same axis.
///
/// Invariants: `Auto` carries 0, `Points` is in `[0, inf)`, `Fraction` is in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimension {
    unit: DimensionUnit,
    value: f64,
}

impl Hash for Dimension {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.unit.hash(state);
        self.value.to_bits().hash(state);
    }
}

impl Eq for Dimension {}

impl Dimension {
    pub const AUTO: Dimension = Dimension {
        unit: DimensionUnit::Auto,
        value: 0.0,
    };

    /// Builds a dimension, clamping out-of-range values.
    ///
    /// Out-of-range input is a programming error and trips a debug assertion.
    pub fn new(unit: DimensionUnit, value: f64) -> Self {
        match Self::try_new(unit, value) {
            Ok(d) => d,
            Err(e) => {
                debug_assert!(false, "{}", e);
                log::warn!("{}; clamping", e);
                Self::clamped(unit, value)
            }
        }
    }

    /// Builds a dimension, rejecting values that break the unit's range.
    pub fn try_new(unit: DimensionUnit, value: f64) -> Result<Self, StyleParseError> {
        let ok = match unit {
            DimensionUnit::Auto => value == 0.0,
            DimensionUnit::Points => value >= 0.0 && value < f64::INFINITY,
            DimensionUnit::Fraction => (0.0..=1.0).contains(&value),
        };
        if ok {
            Ok(Self { unit, value })
        } else {
            Err(StyleParseError::InvalidValue {
                property: format!("{:?} dimension", unit),
                value: value.to_string(),
            })
        }
    }

    fn clamped(unit: DimensionUnit, value: f64) -> Self {
        let value = match unit {
            DimensionUnit::Auto => 0.0,
            _ if value.is_nan() => 0.0,
            DimensionUnit::Points => value.clamp(0.0, f64::MAX),
            DimensionUnit::Fraction => value.clamp(0.0, 1.0),
        };
        Self { unit, value }
    }

    pub fn points(value: f64) -> Self {
        Self::new(DimensionUnit::Points, value)
    }

    pub fn fraction(value: f64) -> Self {
        Self::new(DimensionUnit::Fraction, value)
    }

    pub fn unit(&self) -> DimensionUnit {
        self.unit
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_auto(&self) -> bool {
        self.unit == DimensionUnit::Auto
    }

    /// Resolves against the parent's extent on the same axis.
    ///
    /// A fraction of an undefined or unbounded parent resolves to `auto_size`,
    /// never to `value * parent_size`.
    pub fn resolve(&self, parent_size: f64, auto_size: f64) -> f64 {
        match self.unit {
            DimensionUnit::Auto => auto_size,
            DimensionUnit::Points => self.value,
            DimensionUnit::Fraction if parent_size.is_finite() => self.value * parent_size,
            DimensionUnit::Fraction => auto_size,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            DimensionUnit::Auto => f.write_str("auto"),
            DimensionUnit::Points => write!(f, "{}pt", self.value),
            DimensionUnit::Fraction => write!(f, "{}%", self.value * 100.0),
        }
    }
}

impl FromStr for Dimension {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parsers::parse_dimension(s)
    }
}

impl Serialize for Dimension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Dimension {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DimensionVisitor;
        impl<'de> de::Visitor<'de> for DimensionVisitor {
            type Value = Dimension;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string like '10pt', '50%' or 'auto', a number, or a {unit, value} map")
            }

            fn visit_str<E>(self, value: &str) -> Result<Dimension, E>
            where
                E: de::Error,
            {
                parsers::parse_dimension(value).map_err(E::custom)
            }

            fn visit_f64<E>(self, value: f64) -> Result<Dimension, E>
            where
                E: de::Error,
            {
                Dimension::try_new(DimensionUnit::Points, value).map_err(E::custom)
            }

            fn visit_u64<E>(self, value: u64) -> Result<Dimension, E>
            where
                E: de::Error,
            {
                self.visit_f64(value as f64)
            }

            fn visit_i64<E>(self, value: i64) -> Result<Dimension, E>
            where
                E: de::Error,
            {
                self.visit_f64(value as f64)
            }

            fn visit_map<A>(self, mut map: A) -> Result<Dimension, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut unit = DimensionUnit::Points;
                let mut value = 0.0;
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "unit" => unit = map.next_value()?,
                        "value" => value = map.next_value()?,
                        _ => {
                            let _ = map.next_value::<de::IgnoredAny>()?;
                        }
                    }
                }
                Dimension::try_new(unit, value).map_err(de::Error::custom)
            }
        }
        deserializer.deserialize_any(DimensionVisitor)
    }
}

/// A width/height pair of [`Dimension`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DimensionSize {
    #[serde(default)]
    pub width: Dimension,
    #[serde(default)]
    pub height: Dimension,
}

impl DimensionSize {
    pub const AUTO: DimensionSize = DimensionSize {
        width: Dimension::AUTO,
        height: Dimension::AUTO,
    };

    pub fn new(width: Dimension, height: Dimension) -> Self {
        Self { width, height }
    }

    pub fn resolve(&self, parent_size: Size, auto_size: Size) -> Size {
        Size::new(
            self.width.resolve(parent_size.width, auto_size.width),
            self.height.resolve(parent_size.height, auto_size.height),
        )
    }
}

impl fmt::Display for DimensionSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.width, self.height)
    }
}

/// Exact, minimum and maximum size declared by a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutSize {
    pub width: Dimension,
    pub height: Dimension,
    pub min_width: Dimension,
    pub max_width: Dimension,
    pub min_height: Dimension,
    pub max_height: Dimension,
}

impl LayoutSize {
    /// A size with an exact points value on both axes.
    pub fn from_size(size: Size) -> Self {
        Self {
            width: Dimension::points(size.width),
            height: Dimension::points(size.height),
            ..Self::default()
        }
    }

    pub fn exact(&self) -> DimensionSize {
        DimensionSize::new(self.width, self.height)
    }

    pub fn min(&self) -> DimensionSize {
        DimensionSize::new(self.min_width, self.min_height)
    }

    pub fn max(&self) -> DimensionSize {
        DimensionSize::new(self.max_width, self.max_height)
    }

    pub fn resolve(&self, parent_size: Size) -> SizeRange {
        self.resolve_auto_size(parent_size, SizeRange::unconstrained())
    }

    /// Resolves every dimension and applies [`constrain`] per axis. Auto
    /// minimum and maximum fall back to `auto_range`; an auto exact size stays
    /// undefined.
    pub fn resolve_auto_size(&self, parent_size: Size, auto_range: SizeRange) -> SizeRange {
        let exact = self.exact().resolve(parent_size, Size::undefined());
        let min = self.min().resolve(parent_size, auto_range.min);
        let max = self.max().resolve(parent_size, auto_range.max);

        let (min_width, max_width) = constrain(min.width, exact.width, max.width);
        let (min_height, max_height) = constrain(min.height, exact.height, max.height);

        SizeRange::new(
            Size::new(min_width, min_height),
            Size::new(max_width, max_height),
        )
    }
}

impl fmt::Display for LayoutSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<LayoutSize exact={} min={} max={}>",
            self.exact(),
            self.min(),
            self.max()
        )
    }
}

/// Min overrides max overrides exact. An undefined (`NaN`) exact leaves
/// `[min, max]` untouched.
pub fn constrain(min: f64, exact: f64, max: f64) -> (f64, f64) {
    debug_assert!(!min.is_nan(), "min must not be undefined");
    debug_assert!(!max.is_nan(), "max must not be undefined");

    if max <= min {
        return (min, min);
    }
    if exact.is_nan() {
        return (min, max);
    }
    if exact > max {
        (max, max)
    } else if exact < min {
        (min, min)
    } else {
        (exact, exact)
    }
}
