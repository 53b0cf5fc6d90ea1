// SPDX-License-Identifier: MPL-2.0
//! Position keywords for the notification container.
//!
//! A keyword is a vertical token and a horizontal token joined by a hyphen,
//! such as `top-left` or `bottom-center`. The bare `center` keyword centers
//! the container on both axes.

use super::measurement::Measurement;

/// Vertical edge the container is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAnchor {
    Top,
    Center,
    Bottom,
}

impl VerticalAnchor {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "top" => Some(Self::Top),
            "center" => Some(Self::Center),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }
}

/// Horizontal edge the container is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAnchor {
    Left,
    Center,
    Right,
}

impl HorizontalAnchor {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Translation that pulls a 50%-offset container back onto its center line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CenteringTransform {
    /// `translate(-50%, -50%)`
    Both,
    /// `translateX(-50%)`
    Horizontal,
    /// `translateY(-50%)`
    Vertical,
}

impl CenteringTransform {
    /// CSS `transform` value.
    #[must_use]
    pub fn css(&self) -> &'static str {
        match self {
            CenteringTransform::Both => "translate(-50%, -50%)",
            CenteringTransform::Horizontal => "translateX(-50%)",
            CenteringTransform::Vertical => "translateY(-50%)",
        }
    }
}

/// Layout directives derived from a position keyword.
///
/// Axes whose token was not recognized carry no directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
    vertical: Option<VerticalAnchor>,
    horizontal: Option<HorizontalAnchor>,
}

impl Placement {
    #[must_use]
    pub fn vertical(&self) -> Option<VerticalAnchor> {
        self.vertical
    }

    #[must_use]
    pub fn horizontal(&self) -> Option<HorizontalAnchor> {
        self.horizontal
    }

    /// Offset from the top edge, if anchored there or centered vertically.
    #[must_use]
    pub fn top(&self) -> Option<Measurement> {
        match self.vertical? {
            VerticalAnchor::Top => Some(Measurement::Px(0.0)),
            VerticalAnchor::Center => Some(Measurement::Percent(50.0)),
            VerticalAnchor::Bottom => None,
        }
    }

    /// Offset from the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> Option<Measurement> {
        match self.vertical? {
            VerticalAnchor::Bottom => Some(Measurement::Px(0.0)),
            _ => None,
        }
    }

    /// Offset from the left edge, if anchored there or centered horizontally.
    #[must_use]
    pub fn left(&self) -> Option<Measurement> {
        match self.horizontal? {
            HorizontalAnchor::Left => Some(Measurement::Px(0.0)),
            HorizontalAnchor::Center => Some(Measurement::Percent(50.0)),
            HorizontalAnchor::Right => None,
        }
    }

    /// Offset from the right edge.
    #[must_use]
    pub fn right(&self) -> Option<Measurement> {
        match self.horizontal? {
            HorizontalAnchor::Right => Some(Measurement::Px(0.0)),
            _ => None,
        }
    }

    /// Centering translation needed by the anchored axes, if any.
    #[must_use]
    pub fn transform(&self) -> Option<CenteringTransform> {
        let v = self.vertical == Some(VerticalAnchor::Center);
        let h = self.horizontal == Some(HorizontalAnchor::Center);
        match (v, h) {
            (true, true) => Some(CenteringTransform::Both),
            (true, false) => Some(CenteringTransform::Vertical),
            (false, true) => Some(CenteringTransform::Horizontal),
            (false, false) => None,
        }
    }

    /// Renders the directives as an inline style string.
    ///
    /// ```
    /// use omni_notify::layout::parse_position;
    ///
    /// assert_eq!(parse_position("top-left").to_css(), "top: 0; left: 0;");
    /// assert_eq!(
    ///     parse_position("center").to_css(),
    ///     "top: 50%; left: 50%; transform: translate(-50%, -50%);"
    /// );
    /// ```
    #[must_use]
    pub fn to_css(&self) -> String {
        let declarations = [
            ("top", self.top()),
            ("bottom", self.bottom()),
            ("left", self.left()),
            ("right", self.right()),
        ];

        let mut parts = Vec::with_capacity(5);
        for (property, offset) in declarations {
            if let Some(offset) = offset {
                parts.push(format!("{property}: {};", css_length(offset)));
            }
        }
        if let Some(transform) = self.transform() {
            parts.push(format!("transform: {};", transform.css()));
        }
        parts.join(" ")
    }
}

/// Unitless zero, as written in stylesheets.
fn css_length(m: Measurement) -> String {
    match m {
        Measurement::Px(v) if v == 0.0 => "0".to_string(),
        other => other.to_string(),
    }
}

/// Parses a position keyword such as `top-left` or `center`.
///
/// The keyword is split on its first hyphen. Unknown tokens are ignored, so
/// this never fails; an unrecognized keyword yields an empty [`Placement`].
#[must_use]
pub fn parse_position(position: &str) -> Placement {
    let (vertical_token, horizontal_token) = match position.split_once('-') {
        Some((v, h)) => (v, Some(h)),
        None => (position, None),
    };

    let vertical = VerticalAnchor::from_token(vertical_token);
    let horizontal = match horizontal_token {
        Some(token) => HorizontalAnchor::from_token(token),
        // bare `center` means both axes
        None if vertical == Some(VerticalAnchor::Center) => Some(HorizontalAnchor::Center),
        None => None,
    };

    Placement {
        vertical,
        horizontal,
    }
}
