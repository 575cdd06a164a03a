//! HTML pages hosting the chart
//!
//! `render_page` produces a self-contained document for one load (used by the
//! `render` command). `index_page` is the interactive page served at `/`.

use crate::constants::{CHART_HEIGHT, LIGHTWEIGHT_CHARTS_CDN};
use crate::error::{Error, Result};
use crate::models::{ChartSpec, StatusReport};

/// Built-in copy of `public/index.html`, used when no public dir is deployed
const INDEX_PAGE: &str = include_str!("../../public/index.html");

pub fn index_page() -> &'static str {
    INDEX_PAGE
}

/// Render a standalone page for one load
///
/// The chart is created at the container's measured width and a `resize`
/// listener re-applies that width. With no spec only the status is shown.
pub fn render_page(spec: Option<&ChartSpec>, status: &StatusReport) -> Result<String> {
    let spec_json = match spec {
        Some(spec) => embed_json(
            &serde_json::to_string(spec)
                .map_err(|e| Error::Other(format!("Failed to serialize chart: {}", e)))?,
        ),
        None => "null".to_string(),
    };

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>candleview</title>
  <style>
    body {{ font-family: system-ui, sans-serif; margin: 20px; }}
    #chart-container {{ width: 100%; height: {height}px; }}
    #status-message.success {{ color: #1b5e20; }}
    #status-message.error {{ color: #b71c1c; }}
  </style>
  <script src="{cdn}"></script>
</head>
<body>
  <div id="status-message" class="{class}">{message}</div>
  <div id="chart-container"></div>
  <script>
    const spec = {spec};
    const container = document.getElementById('chart-container');
    if (spec) {{
      const chart = LightweightCharts.createChart(container, {{
        ...spec.chart,
        width: container.clientWidth || spec.chart.width,
      }});
      chart.addCandlestickSeries(spec.candles.options).setData(spec.candles.data);
      if (spec.volume) {{
        chart.addHistogramSeries(spec.volume.options).setData(spec.volume.data);
      }}
      chart.priceScale('right').applyOptions(spec.rightPriceScale);
      window.addEventListener('resize', () => {{
        chart.applyOptions({{ width: container.clientWidth }});
      }});
    }}
  </script>
</body>
</html>
"#,
        height = CHART_HEIGHT,
        cdn = LIGHTWEIGHT_CHARTS_CDN,
        class = status.class.as_str(),
        message = escape_html(&status.message),
        spec = spec_json,
    ))
}

/// Make JSON safe to place inside a `<script>` element
fn embed_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
