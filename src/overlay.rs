use derive_more::Display;
use serde::Serialize;

use crate::model::Price;

pub const SMA_COLORS: [&str; 10] = [
    "#00ff9f", "#ff1744", "#f8f8f2", "#ff3636", "#8be9fd", "#33ffcc", "#ff6699", "#dddddd",
    "#ffaa00", "#9999ff",
];
pub const EMA_COLORS: [&str; 10] = [
    "#ff79c6", "#bd93f9", "#50fa7b", "#ffb86c", "#ff5555", "#66ff66", "#ff3333", "#66ccff",
    "#ffcc00", "#ff66ff",
];
pub const HMA_COLORS: [&str; 10] = [
    "#ff00ff", "#00ffff", "#ff8800", "#ff4444", "#ccff00", "#00cccc", "#cc0066", "#ffcc99",
    "#66ffcc", "#ccff33",
];

pub const BOLLINGER_BAND_COLOR: &str = "purple";
pub const BOLLINGER_MIDDLE_COLOR: &str = "grey";
pub const SUPPORT_COLOR: &str = "green";
pub const RESISTANCE_COLOR: &str = "red";

pub const LINE_WIDTH: f32 = 0.5;

/// Cyclic palette lookup.
pub fn palette_color(palette: &[&'static str], index: usize) -> &'static str {
    palette[index % palette.len()]
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, Serialize)]
pub enum OverlayKind {
    #[display(fmt = "SMA")]
    Sma,
    #[display(fmt = "EMA")]
    Ema,
    #[display(fmt = "HMA")]
    Hma,
    #[display(fmt = "BB Upper")]
    BollingerUpper,
    #[display(fmt = "BB SMA")]
    BollingerMiddle,
    #[display(fmt = "BB Lower")]
    BollingerLower,
    #[display(fmt = "Support")]
    Support,
    #[display(fmt = "Resistance")]
    Resistance,
}

impl OverlayKind {
    pub fn line_style(self) -> LineStyle {
        match self {
            OverlayKind::Sma | OverlayKind::Ema | OverlayKind::Hma => LineStyle::Solid,
            _ => LineStyle::Dashed,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// A derived line drawn over the price chart, aligned 1:1 with the series it
/// was computed from. Undefined points are `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    pub kind: OverlayKind,
    pub period: usize,
    pub label: String,
    pub color: &'static str,
    pub style: LineStyle,
    pub width: f32,
    pub values: Vec<Price>,
}

impl Overlay {
    pub fn new(kind: OverlayKind, period: usize, color: &'static str, values: Vec<Price>) -> Self {
        let label = match kind {
            OverlayKind::Sma | OverlayKind::Ema | OverlayKind::Hma => format!("{kind}({period})"),
            _ => kind.to_string(),
        };

        Self {
            kind,
            period,
            label,
            color,
            style: kind.line_style(),
            width: LINE_WIDTH,
            values,
        }
    }

    /// False when no point has enough history to be defined.
    pub fn is_defined(&self) -> bool {
        self.values.iter().any(|v| !v.is_nan())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: &'static str,
    pub style: LineStyle,
}
