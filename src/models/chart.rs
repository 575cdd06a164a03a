//! Declarative chart configuration
//!
//! These types serialize (camelCase) to the option objects accepted by
//! `lightweight-charts`: `createChart(container, chart)`,
//! `addCandlestickSeries(candles.options)`, `addHistogramSeries(volume.options)`
//! and `priceScale('right').applyOptions(right_price_scale)`.

use serde::{Deserialize, Serialize};

/// Full chart description handed to the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub chart: ChartLayout,
    pub candles: CandlestickSeries,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<HistogramSeries>,
    pub right_price_scale: PriceScaleOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartLayout {
    pub layout: LayoutOptions,
    pub grid: GridOptions,
    /// Initial width; the page replaces it with the container's measured width
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOptions {
    pub background: Background,
    pub text_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    #[serde(rename = "type")]
    pub kind: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOptions {
    pub vert_lines: LineColor,
    pub horz_lines: LineColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineColor {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlestickSeries {
    pub options: CandlestickOptions,
    pub data: Vec<CandlePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandlestickOptions {
    pub up_color: String,
    pub down_color: String,
    pub border_visible: bool,
    pub wick_up_color: String,
    pub wick_down_color: String,
}

/// One candle; `time` is epoch seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlePoint {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramSeries {
    pub options: HistogramOptions,
    pub data: Vec<VolumeBar>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramOptions {
    pub color: String,
    pub price_format: PriceFormat,
    /// Empty string places the series on its own overlay scale
    pub price_scale_id: String,
    pub scale_margins: ScaleMargins,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceFormat {
    #[serde(rename = "type")]
    pub kind: String,
}

/// One volume bar, coloured by the direction of its candle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeBar {
    pub time: i64,
    pub value: u64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceScaleOptions {
    pub scale_margins: ScaleMargins,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleMargins {
    pub top: f64,
    pub bottom: f64,
}
