// plotters-backed renderer producing SVG documents in memory

use plotters::coord::Shift;
use plotters::prelude::*;

use super::{ChartRenderer, ChartSpec, Panel};

const FONT: &str = "sans-serif";

#[derive(Debug, Clone, Copy, Default)]
pub struct SvgRenderer;

impl ChartRenderer for SvgRenderer {
    fn render(&self, spec: &ChartSpec) -> anyhow::Result<Vec<u8>> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (spec.width, spec.height)).into_drawing_area();
            root.fill(&WHITE)?;
            let root = root.titled(&spec.title, (FONT, 18))?;
            let areas = root.split_evenly((spec.panels.len().max(1), 1));
            for (area, panel) in areas.iter().zip(&spec.panels) {
                draw_panel(area, panel, &spec.axis)?;
            }
            root.present()?;
        }
        Ok(svg.into_bytes())
    }
}

fn draw_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    panel: &Panel,
    axis: &[String],
) -> anyhow::Result<()> {
    let x_max = axis.len().max(2) as f64 - 1.0;
    let (y_min, y_max) = y_range(panel);

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.name, (FONT, 14))
        .margin(8)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_labels(6)
        .y_labels(5)
        .x_label_formatter(&|x| axis.get(x.round() as usize).cloned().unwrap_or_default())
        .label_style((FONT, 11))
        .draw()?;

    for (i, line) in panel.lines.iter().enumerate() {
        let color = Palette99::pick(i);
        for run in runs(&line.data) {
            chart.draw_series(LineSeries::new(run, &color))?;
        }
    }
    Ok(())
}

/// Contiguous non-null stretches as `(index, value)` points.
fn runs(data: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for (i, v) in data.iter().enumerate() {
        match v {
            Some(v) => current.push((i as f64, *v)),
            None if !current.is_empty() => out.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Span of every value on the panel with 5% headroom; a fixed unit span when empty or flat.
fn y_range(panel: &Panel) -> (f64, f64) {
    let (lo, hi) = panel
        .lines
        .iter()
        .flat_map(|l| l.data.iter().flatten())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if hi - lo < f64::EPSILON {
        return (lo - 0.5, hi + 0.5);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}
