//! Chart configuration builder
//!
//! Turns a time series into the declarative [`ChartSpec`] consumed by the
//! page. All visual settings are fixed; the only choice is whether to add the
//! volume histogram.

use crate::constants::{
    BACKGROUND_COLOR, CHART_DEFAULT_WIDTH, CHART_HEIGHT, DOWN_COLOR, GRID_COLOR,
    PRICE_MARGIN_BOTTOM, PRICE_MARGIN_TOP, TEXT_COLOR, UP_COLOR, VOLUME_MARGIN_BOTTOM,
    VOLUME_MARGIN_TOP,
};
use crate::models::chart::{
    Background, CandlePoint, CandlestickOptions, CandlestickSeries, ChartLayout, GridOptions,
    HistogramOptions, HistogramSeries, LayoutOptions, LineColor, PriceFormat, PriceScaleOptions,
    ScaleMargins,
};
use crate::models::{ChartSpec, Ohlcv, VolumeBar};

#[derive(Debug, Clone, Copy)]
pub struct ChartOptions {
    /// Add the volume histogram under the candles
    pub volume: bool,
    pub height: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            volume: true,
            height: CHART_HEIGHT,
        }
    }
}

/// Volume bar colour: up when the candle closed above its open
pub fn volume_color(record: &Ohlcv) -> &'static str {
    if record.is_up() {
        UP_COLOR
    } else {
        DOWN_COLOR
    }
}

/// Build the chart description for `records`
pub fn build_chart(records: &[Ohlcv], options: &ChartOptions) -> ChartSpec {
    let candles = CandlestickSeries {
        options: CandlestickOptions {
            up_color: UP_COLOR.to_string(),
            down_color: DOWN_COLOR.to_string(),
            border_visible: false,
            wick_up_color: UP_COLOR.to_string(),
            wick_down_color: DOWN_COLOR.to_string(),
        },
        data: records
            .iter()
            .map(|r| CandlePoint {
                time: r.timestamp(),
                open: r.open,
                high: r.high,
                low: r.low,
                close: r.close,
            })
            .collect(),
    };

    let volume = options.volume.then(|| HistogramSeries {
        options: HistogramOptions {
            color: UP_COLOR.to_string(),
            price_format: PriceFormat {
                kind: "volume".to_string(),
            },
            price_scale_id: String::new(),
            scale_margins: ScaleMargins {
                top: VOLUME_MARGIN_TOP,
                bottom: VOLUME_MARGIN_BOTTOM,
            },
        },
        data: volume_bars(records),
    });

    ChartSpec {
        chart: layout(options.height),
        candles,
        volume,
        right_price_scale: PriceScaleOptions {
            scale_margins: ScaleMargins {
                top: PRICE_MARGIN_TOP,
                bottom: PRICE_MARGIN_BOTTOM,
            },
        },
    }
}

/// Derive the volume series, one bar per record
pub fn volume_bars(records: &[Ohlcv]) -> Vec<VolumeBar> {
    records
        .iter()
        .map(|r| VolumeBar {
            time: r.timestamp(),
            value: r.volume,
            color: volume_color(r).to_string(),
        })
        .collect()
}

fn layout(height: u32) -> ChartLayout {
    let grid_line = || LineColor {
        color: GRID_COLOR.to_string(),
    };

    ChartLayout {
        layout: LayoutOptions {
            background: Background {
                kind: "solid".to_string(),
                color: BACKGROUND_COLOR.to_string(),
            },
            text_color: TEXT_COLOR.to_string(),
        },
        grid: GridOptions {
            vert_lines: grid_line(),
            horz_lines: grid_line(),
        },
        width: CHART_DEFAULT_WIDTH,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(minute: u32, open: f64, close: f64, volume: u64) -> Ohlcv {
        let t = Utc.with_ymd_and_hms(2026, 2, 1, 18, minute, 0).unwrap();
        Ohlcv::new(t, open, open.max(close) + 1.0, open.min(close) - 1.0, close, volume)
    }

    #[test]
    fn test_volume_color() {
        assert_eq!(volume_color(&record(0, 100.0, 102.0, 1)), UP_COLOR);
        assert_eq!(volume_color(&record(0, 100.0, 100.0, 1)), DOWN_COLOR);
        assert_eq!(volume_color(&record(0, 100.0, 98.0, 1)), DOWN_COLOR);
    }

    #[test]
    fn test_build_chart_with_volume() {
        let records = vec![record(10, 100.0, 102.0, 1000), record(15, 102.0, 101.0, 800)];
        let spec = build_chart(&records, &ChartOptions::default());

        assert_eq!(spec.chart.height, CHART_HEIGHT);
        assert_eq!(spec.candles.data.len(), 2);
        assert_eq!(spec.candles.data[0].time, records[0].timestamp());

        let volume = spec.volume.expect("volume series");
        assert_eq!(volume.data.len(), 2);
        assert_eq!(volume.data[0].value, 1000);
        assert_eq!(volume.data[0].color, UP_COLOR);
        assert_eq!(volume.data[1].color, DOWN_COLOR);
        assert_eq!(volume.options.scale_margins.top, VOLUME_MARGIN_TOP);
    }

    #[test]
    fn test_build_chart_without_volume() {
        let options = ChartOptions {
            volume: false,
            ..ChartOptions::default()
        };
        let spec = build_chart(&[record(0, 1.0, 2.0, 3)], &options);
        assert!(spec.volume.is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let spec = build_chart(&[record(0, 1.0, 2.0, 3)], &ChartOptions::default());
        let json = serde_json::to_value(&spec).unwrap();

        assert_eq!(json["chart"]["layout"]["background"]["type"], "solid");
        assert_eq!(json["chart"]["layout"]["textColor"], "black");
        assert_eq!(json["chart"]["grid"]["vertLines"]["color"], GRID_COLOR);
        assert_eq!(json["candles"]["options"]["upColor"], UP_COLOR);
        assert_eq!(json["candles"]["options"]["borderVisible"], false);
        assert_eq!(json["volume"]["options"]["priceFormat"]["type"], "volume");
        assert_eq!(json["volume"]["options"]["priceScaleId"], "");
        assert_eq!(json["rightPriceScale"]["scaleMargins"]["bottom"], PRICE_MARGIN_BOTTOM);
    }
}
