//! Layout templates and aspect ratio definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Width of the composited portrait output.
pub const PORTRAIT_WIDTH: u32 = 1080;

/// Height of the composited portrait output.
pub const PORTRAIT_HEIGHT: u32 = 1920;

/// Available crop layouts.
///
/// Every layout composites into a 1080x1920 (9:16) portrait canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum LayoutTemplate {
    /// One region filling the whole portrait frame
    #[default]
    Single,
    /// Regions from the left and right halves of the source, stacked
    /// top and bottom in the output
    Double,
    /// Two regions side by side on top, one band on the bottom
    Triple,
}

impl LayoutTemplate {
    pub const ALL: &'static [LayoutTemplate] = &[
        LayoutTemplate::Single,
        LayoutTemplate::Double,
        LayoutTemplate::Triple,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutTemplate::Single => "single",
            LayoutTemplate::Double => "double",
            LayoutTemplate::Triple => "triple",
        }
    }

    /// Number of crop regions this layout composites.
    pub fn region_count(&self) -> usize {
        self.output_panels().len()
    }

    /// Output panels in template region order.
    ///
    /// Each panel's aspect ratio is the target ratio of the matching crop
    /// region, so a correctly shaped crop scales into it without distortion.
    pub fn output_panels(&self) -> &'static [OutputPanel] {
        match self {
            LayoutTemplate::Single => SINGLE_PANELS,
            LayoutTemplate::Double => DOUBLE_PANELS,
            LayoutTemplate::Triple => TRIPLE_PANELS,
        }
    }

    /// Region ids in template order.
    pub fn region_ids(&self) -> impl Iterator<Item = &'static str> {
        self.output_panels().iter().map(|panel| panel.id)
    }
}

impl fmt::Display for LayoutTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LayoutTemplate {
    type Err = TemplateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" => Ok(LayoutTemplate::Single),
            "double" | "split" => Ok(LayoutTemplate::Double),
            "triple" | "three" | "triple_split" => Ok(LayoutTemplate::Triple),
            _ => Err(TemplateParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown layout template: {0}")]
pub struct TemplateParseError(String);

/// A slot of the portrait output canvas that one crop region is scaled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub struct OutputPanel {
    /// Region id this panel receives
    pub id: &'static str,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Target aspect ratio of the region feeding this panel
    pub aspect_ratio: AspectRatio,
}

impl OutputPanel {
    const fn new(id: &'static str, x: u32, y: u32, width: u32, height: u32, aspect_ratio: AspectRatio) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
            aspect_ratio,
        }
    }
}

const SINGLE_PANELS: &[OutputPanel] = &[OutputPanel::new(
    "main",
    0,
    0,
    PORTRAIT_WIDTH,
    PORTRAIT_HEIGHT,
    AspectRatio::PORTRAIT,
)];

const DOUBLE_PANELS: &[OutputPanel] = &[
    OutputPanel::new("left", 0, 0, PORTRAIT_WIDTH, PORTRAIT_HEIGHT / 2, AspectRatio::SPLIT_VIEW),
    OutputPanel::new(
        "right",
        0,
        PORTRAIT_HEIGHT / 2,
        PORTRAIT_WIDTH,
        PORTRAIT_HEIGHT / 2,
        AspectRatio::SPLIT_VIEW,
    ),
];

const TRIPLE_PANELS: &[OutputPanel] = &[
    OutputPanel::new(
        "top_left",
        0,
        0,
        PORTRAIT_WIDTH / 2,
        PORTRAIT_HEIGHT / 2,
        AspectRatio::PORTRAIT,
    ),
    OutputPanel::new(
        "top_right",
        PORTRAIT_WIDTH / 2,
        0,
        PORTRAIT_WIDTH / 2,
        PORTRAIT_HEIGHT / 2,
        AspectRatio::PORTRAIT,
    ),
    OutputPanel::new(
        "bottom",
        0,
        PORTRAIT_HEIGHT / 2,
        PORTRAIT_WIDTH,
        PORTRAIT_HEIGHT / 2,
        AspectRatio::SPLIT_VIEW,
    ),
];

/// Aspect ratio as a `width:height` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl AspectRatio {
    /// Standard portrait (9:16) for TikTok/Reels
    pub const PORTRAIT: AspectRatio = AspectRatio {
        width: 9,
        height: 16,
    };

    /// Split view aspect (9:8), half of a portrait frame
    pub const SPLIT_VIEW: AspectRatio = AspectRatio {
        width: 9,
        height: 8,
    };

    /// Returns the aspect ratio as a decimal.
    pub fn as_f64(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parse() {
        assert_eq!("single".parse::<LayoutTemplate>().unwrap(), LayoutTemplate::Single);
        assert_eq!("SPLIT".parse::<LayoutTemplate>().unwrap(), LayoutTemplate::Double);
        assert_eq!("three".parse::<LayoutTemplate>().unwrap(), LayoutTemplate::Triple);
        assert!("quad".parse::<LayoutTemplate>().is_err());
    }

    #[test]
    fn test_template_display_round_trip() {
        for template in LayoutTemplate::ALL {
            assert_eq!(template.to_string().parse::<LayoutTemplate>().unwrap(), *template);
        }
    }

    #[test]
    fn test_region_counts() {
        assert_eq!(LayoutTemplate::Single.region_count(), 1);
        assert_eq!(LayoutTemplate::Double.region_count(), 2);
        assert_eq!(LayoutTemplate::Triple.region_count(), 3);
    }

    #[test]
    fn test_panels_tile_portrait_canvas() {
        for template in LayoutTemplate::ALL {
            let area: u64 = template
                .output_panels()
                .iter()
                .map(|p| p.width as u64 * p.height as u64)
                .sum();
            assert_eq!(area, PORTRAIT_WIDTH as u64 * PORTRAIT_HEIGHT as u64, "{template}");

            for panel in template.output_panels() {
                assert!(panel.x + panel.width <= PORTRAIT_WIDTH);
                assert!(panel.y + panel.height <= PORTRAIT_HEIGHT);
                // Panel shape matches the region's target ratio
                let ratio = panel.width as f64 / panel.height as f64;
                assert!((ratio - panel.aspect_ratio.as_f64()).abs() < 1e-9, "{}", panel.id);
            }
        }
    }

    #[test]
    fn test_region_ids_unique() {
        for template in LayoutTemplate::ALL {
            let ids: Vec<_> = template.region_ids().collect();
            let mut deduped = ids.clone();
            deduped.sort_unstable();
            deduped.dedup();
            assert_eq!(ids.len(), deduped.len());
        }
    }

    #[test]
    fn test_aspect_ratio_display() {
        assert_eq!(AspectRatio::PORTRAIT.to_string(), "9:16");
        assert_eq!(AspectRatio::SPLIT_VIEW.to_string(), "9:8");
        assert!((AspectRatio::SPLIT_VIEW.as_f64() - 1.125).abs() < 1e-12);
    }

    #[test]
    fn test_template_serde() {
        let json = serde_json::to_string(&LayoutTemplate::Triple).unwrap();
        assert_eq!(json, "\"triple\"");
        let back: LayoutTemplate = serde_json::from_str("\"double\"").unwrap();
        assert_eq!(back, LayoutTemplate::Double);
    }
}
