//! Focal points: the part of an image that must stay visible after cropping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One of the nine anchors an image can be pinned to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FocalPoint {
    TopLeft,
    TopMiddle,
    TopRight,
    MiddleLeft,
    #[default]
    Middle,
    MiddleRight,
    BottomLeft,
    BottomMiddle,
    BottomRight,
}

/// Horizontal alignment family of a focal point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Middle,
    Right,
}

/// Vertical alignment family of a focal point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Top,
    Middle,
    Bottom,
}

impl FocalPoint {
    pub const ALL: [FocalPoint; 9] = [
        FocalPoint::TopLeft,
        FocalPoint::TopMiddle,
        FocalPoint::TopRight,
        FocalPoint::MiddleLeft,
        FocalPoint::Middle,
        FocalPoint::MiddleRight,
        FocalPoint::BottomLeft,
        FocalPoint::BottomMiddle,
        FocalPoint::BottomRight,
    ];

    pub fn horizontal(self) -> Horizontal {
        match self {
            FocalPoint::TopLeft | FocalPoint::MiddleLeft | FocalPoint::BottomLeft => {
                Horizontal::Left
            }
            FocalPoint::TopMiddle | FocalPoint::Middle | FocalPoint::BottomMiddle => {
                Horizontal::Middle
            }
            FocalPoint::TopRight | FocalPoint::MiddleRight | FocalPoint::BottomRight => {
                Horizontal::Right
            }
        }
    }

    pub fn vertical(self) -> Vertical {
        match self {
            FocalPoint::TopLeft | FocalPoint::TopMiddle | FocalPoint::TopRight => Vertical::Top,
            FocalPoint::MiddleLeft | FocalPoint::Middle | FocalPoint::MiddleRight => {
                Vertical::Middle
            }
            FocalPoint::BottomLeft | FocalPoint::BottomMiddle | FocalPoint::BottomRight => {
                Vertical::Bottom
            }
        }
    }

    /// Canonical lowercase token, e.g. `bottom_right`.
    pub fn token(self) -> &'static str {
        match self {
            FocalPoint::TopLeft => "top_left",
            FocalPoint::TopMiddle => "top_middle",
            FocalPoint::TopRight => "top_right",
            FocalPoint::MiddleLeft => "middle_left",
            FocalPoint::Middle => "middle",
            FocalPoint::MiddleRight => "middle_right",
            FocalPoint::BottomLeft => "bottom_left",
            FocalPoint::BottomMiddle => "bottom_middle",
            FocalPoint::BottomRight => "bottom_right",
        }
    }
}

impl fmt::Display for FocalPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for FocalPoint {
    type Err = ConfigError;

    /// Tokens are case-insensitive and accept `-` or `_` as separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        FocalPoint::ALL
            .into_iter()
            .find(|point| point.token() == normalized)
            .ok_or_else(|| ConfigError::UnknownFocalPoint(s.to_string()))
    }
}

impl TryFrom<String> for FocalPoint {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FocalPoint> for String {
    fn from(point: FocalPoint) -> Self {
        point.token().to_string()
    }
}
