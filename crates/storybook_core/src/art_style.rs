//! Illustration styles offered by the storybook tool.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;

/// Closed set of art styles an illustration can be rendered in.
///
/// # Examples
///
/// ```
/// use storybook_core::ArtStyle;
///
/// assert_eq!(ArtStyle::parse_or_default("watercolor"), ArtStyle::Watercolor);
/// assert_eq!(ArtStyle::parse_or_default("oil painting"), ArtStyle::Cartoon3d);
/// assert_eq!(ArtStyle::default().to_string(), "3d cartoon");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
pub enum ArtStyle {
    /// Rounded 3D cartoon rendering
    #[default]
    #[serde(rename = "3d cartoon")]
    #[strum(serialize = "3d cartoon")]
    Cartoon3d,
    /// Soft watercolor painting
    #[serde(rename = "watercolor")]
    #[strum(serialize = "watercolor")]
    Watercolor,
    /// Retro pixel art
    #[serde(rename = "pixel art")]
    #[strum(serialize = "pixel art")]
    PixelArt,
    /// Pencil and ink drawing
    #[serde(rename = "hand drawn")]
    #[strum(serialize = "hand drawn")]
    HandDrawn,
    /// Stop-motion clay figures
    #[serde(rename = "claymation")]
    #[strum(serialize = "claymation")]
    Claymation,
}

impl ArtStyle {
    /// Parse a style name, falling back to the default for anything outside the set.
    pub fn parse_or_default(name: &str) -> Self {
        Self::from_str(name.trim()).unwrap_or_else(|_| {
            tracing::debug!(style = name, "Unknown art style, using default");
            Self::default()
        })
    }

    /// Image prompt asking for `subject` in this style.
    pub fn illustrate(&self, subject: &str) -> String {
        format!(
            "{}, illustrated in a {} style for a children's storybook",
            subject, self
        )
    }

    /// Style names in declaration order, as advertised in the tool schema.
    pub fn names() -> Vec<&'static str> {
        Self::iter().map(Into::into).collect()
    }
}
