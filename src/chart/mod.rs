// Chart specifications built per request, and the renderer seam.
// Builders only decide which lines go on which panel; styling is the renderer's business.

mod svg;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::config::ChartConfig;
use crate::models::{Channel, ChannelData, DeviceHealthSeries, HeightSeries, ProfileSeries};

pub use svg::SvgRenderer;

/// One line on a panel; nulls break the line.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub name: String,
    pub data: Channel,
}

/// One stacked sub-chart; all panels share the chart's x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub name: String,
    pub lines: Vec<Line>,
}

/// Everything a renderer needs; built fresh for every call.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub axis: Vec<String>,
    pub panels: Vec<Panel>,
}

impl ChartSpec {
    /// Panels are stacked, each `chart.height` tall.
    fn new(chart: &ChartConfig, title: String, axis: Vec<String>, panels: Vec<Panel>) -> Self {
        let rows = u32::try_from(panels.len().max(1)).unwrap_or(1);
        Self {
            width: chart.width,
            height: chart.height.saturating_mul(rows),
            title,
            axis,
            panels,
        }
    }
}

pub trait ChartRenderer: Send + Sync {
    /// Image bytes for `spec`.
    fn render(&self, spec: &ChartSpec) -> anyhow::Result<Vec<u8>>;
}

/// Image bytes as the base64 text the clients expect.
pub fn encode_image(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

fn lines_of(name: &str, data: &ChannelData) -> Vec<Line> {
    data.parts()
        .into_iter()
        .map(|(suffix, channel)| Line {
            name: format!("{name}{suffix}"),
            data: channel.clone(),
        })
        .collect()
}

fn panel(name: &str, data: &ChannelData) -> Panel {
    Panel {
        name: name.to_string(),
        lines: lines_of(name, data),
    }
}

fn flat_panel(name: &str, data: &Channel) -> Panel {
    Panel {
        name: name.to_string(),
        lines: vec![Line {
            name: name.to_string(),
            data: data.clone(),
        }],
    }
}

fn constant(value: f64, len: usize) -> Channel {
    vec![Some(value); len]
}

pub fn profile_chart(chart: &ChartConfig, title: &str, series: &ProfileSeries) -> ChartSpec {
    ChartSpec::new(
        chart,
        title.to_string(),
        series.time.clone(),
        vec![
            panel("Temperature", &series.temperature),
            panel("Humidity", &series.humidity),
            panel("Pressure", &series.pressure),
            panel("Altitude", &series.altitude),
        ],
    )
}

/// Sonde altitude and fuse altitude on a single panel.
pub fn height_chart(chart: &ChartConfig, title: &str, series: &HeightSeries) -> ChartSpec {
    let mut lines = lines_of("Sonde", &series.profile.altitude);
    lines.push(Line {
        name: "Fuse".to_string(),
        data: series.fuse_altitude.clone(),
    });
    ChartSpec::new(
        chart,
        title.to_string(),
        series.profile.time.clone(),
        vec![Panel {
            name: "Altitude".to_string(),
            lines,
        }],
    )
}

/// Battery voltage is drawn with its manufacturer's threshold lines.
pub fn device_chart(chart: &ChartConfig, title: &str, series: &DeviceHealthSeries) -> ChartSpec {
    let len = series.time.len();
    let mut battery = flat_panel("Battery voltage", &series.battery_voltage);
    battery.lines.extend([
        Line {
            name: "Max".to_string(),
            data: constant(series.threshold.max, len),
        },
        Line {
            name: "Normal".to_string(),
            data: constant(series.threshold.normal, len),
        },
        Line {
            name: "Min".to_string(),
            data: constant(series.threshold.min, len),
        },
    ]);
    ChartSpec::new(
        chart,
        title.to_string(),
        series.time.clone(),
        vec![
            battery,
            flat_panel("Frequency", &series.frequency),
            flat_panel("RSSI", &series.rssi),
            flat_panel("Rising speed", &series.rising_speed),
        ],
    )
}
