//! Fine-tuning knobs appended to a preset's instruction.
//!
//! Each axis is a closed enumeration. Non-neutral values map to one fixed
//! natural-language clause; the neutral value maps to nothing.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four independent adjustment axes, in clause order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Lighting,
    Blur,
    Temperature,
    Tint,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Lighting, Axis::Blur, Axis::Temperature, Axis::Tint];

    pub fn as_str(self) -> &'static str {
        match self {
            Axis::Lighting => "lighting",
            Axis::Blur => "blur",
            Axis::Temperature => "temperature",
            Axis::Tint => "tint",
        }
    }

    pub fn parse(axis: &str) -> Option<Axis> {
        let axis = axis.trim();
        // "warmth" is the label the temperature picker was shown under
        if axis.eq_ignore_ascii_case("warmth") {
            return Some(Axis::Temperature);
        }
        Axis::ALL.into_iter().find(|a| a.as_str().eq_ignore_ascii_case(axis))
    }

    /// Accepted option strings for this axis, neutral first.
    pub fn options(self) -> &'static [&'static str] {
        match self {
            Axis::Lighting => &["default", "soft", "dramatic", "natural"],
            Axis::Blur => &["default", "subtle", "strong"],
            Axis::Temperature => &["default", "warm", "cool"],
            Axis::Tint => &["none", "blue", "gold", "sepia", "bw"],
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared behaviour of the per-axis value enums.
pub trait AxisValue: Copy + Sized + 'static {
    const AXIS: Axis;
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    /// The instruction clause for this value, `None` for the neutral value.
    fn clause(self) -> Option<&'static str>;

    fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.iter().copied().find(|v| v.as_str().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lighting {
    #[default]
    Default,
    Soft,
    Dramatic,
    Natural,
}

impl AxisValue for Lighting {
    const AXIS: Axis = Axis::Lighting;
    const ALL: &'static [Self] = &[Lighting::Default, Lighting::Soft, Lighting::Dramatic, Lighting::Natural];

    fn as_str(self) -> &'static str {
        match self {
            Lighting::Default => "default",
            Lighting::Soft => "soft",
            Lighting::Dramatic => "dramatic",
            Lighting::Natural => "natural",
        }
    }

    fn clause(self) -> Option<&'static str> {
        match self {
            Lighting::Default => None,
            Lighting::Soft => Some("Use soft, diffused studio lighting."),
            Lighting::Dramatic => Some("Use dramatic, high-contrast rim lighting."),
            Lighting::Natural => Some("Use bright, natural window light."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Blur {
    #[default]
    Default,
    Subtle,
    Strong,
}

impl AxisValue for Blur {
    const AXIS: Axis = Axis::Blur;
    const ALL: &'static [Self] = &[Blur::Default, Blur::Subtle, Blur::Strong];

    fn as_str(self) -> &'static str {
        match self {
            Blur::Default => "default",
            Blur::Subtle => "subtle",
            Blur::Strong => "strong",
        }
    }

    fn clause(self) -> Option<&'static str> {
        match self {
            Blur::Default => None,
            Blur::Subtle => Some("The background should have a subtle depth of field."),
            Blur::Strong => Some("The background should be heavily blurred with strong bokeh."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    #[default]
    Default,
    Warm,
    Cool,
}

impl AxisValue for Temperature {
    const AXIS: Axis = Axis::Temperature;
    const ALL: &'static [Self] = &[Temperature::Default, Temperature::Warm, Temperature::Cool];

    fn as_str(self) -> &'static str {
        match self {
            Temperature::Default => "default",
            Temperature::Warm => "warm",
            Temperature::Cool => "cool",
        }
    }

    fn clause(self) -> Option<&'static str> {
        match self {
            Temperature::Default => None,
            Temperature::Warm => Some("Ensure the color temperature is warm."),
            Temperature::Cool => Some("Ensure the color temperature is cool."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tint {
    #[default]
    None,
    Blue,
    Gold,
    Sepia,
    Bw,
}

impl AxisValue for Tint {
    const AXIS: Axis = Axis::Tint;
    const ALL: &'static [Self] = &[Tint::None, Tint::Blue, Tint::Gold, Tint::Sepia, Tint::Bw];

    fn as_str(self) -> &'static str {
        match self {
            Tint::None => "none",
            Tint::Blue => "blue",
            Tint::Gold => "gold",
            Tint::Sepia => "sepia",
            Tint::Bw => "bw",
        }
    }

    fn clause(self) -> Option<&'static str> {
        match self {
            Tint::None => None,
            Tint::Blue => Some("Apply a cinematic blue tint."),
            Tint::Gold => Some("Apply a golden tint."),
            Tint::Sepia => Some("Apply a sepia tone."),
            Tint::Bw => Some("Render in black and white."),
        }
    }
}

/// Current value of every axis. Defaults to all-neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Adjustments {
    pub lighting: Lighting,
    pub blur: Blur,
    pub temperature: Temperature,
    pub tint: Tint,
}

impl Adjustments {
    /// Sets a single axis.
    pub fn set(&mut self, adjustment: Adjustment) {
        match adjustment {
            Adjustment::Lighting(v) => self.lighting = v,
            Adjustment::Blur(v) => self.blur = v,
            Adjustment::Temperature(v) => self.temperature = v,
            Adjustment::Tint(v) => self.tint = v,
        }
    }

    pub fn is_neutral(&self) -> bool {
        *self == Adjustments::default()
    }

    /// Instruction clauses for every non-neutral axis, in axis order.
    pub fn encode(&self) -> Vec<&'static str> {
        [
            self.lighting.clause(),
            self.blur.clause(),
            self.temperature.clause(),
            self.tint.clause(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// One axis set to one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Lighting(Lighting),
    Blur(Blur),
    Temperature(Temperature),
    Tint(Tint),
}

impl Adjustment {
    /// Parses the string form used by text-based front ends, e.g.
    /// `("tint", "bw")`. Matching is case-insensitive.
    pub fn parse(axis: &str, value: &str) -> Result<Adjustment> {
        let invalid = || AppError::InvalidAdjustment {
            axis: axis.to_string(),
            value: value.to_string(),
        };

        let axis_kind = Axis::parse(axis).ok_or_else(invalid)?;
        let parsed = match axis_kind {
            Axis::Lighting => Lighting::parse(value).map(Adjustment::Lighting),
            Axis::Blur => Blur::parse(value).map(Adjustment::Blur),
            Axis::Temperature => Temperature::parse(value).map(Adjustment::Temperature),
            Axis::Tint => Tint::parse(value).map(Adjustment::Tint),
        };
        parsed.ok_or_else(invalid)
    }

    pub fn axis(&self) -> Axis {
        match self {
            Adjustment::Lighting(_) => Lighting::AXIS,
            Adjustment::Blur(_) => Blur::AXIS,
            Adjustment::Temperature(_) => Temperature::AXIS,
            Adjustment::Tint(_) => Tint::AXIS,
        }
    }
}

/// Maps adjustments to their ordered instruction clauses.
pub fn encode(adjustments: &Adjustments) -> Vec<&'static str> {
    adjustments.encode()
}
