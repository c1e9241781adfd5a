//! 24h trend chart for the selected station

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use super::CRIMSON;
use crate::app::App;
use crate::data::{MeasurementType, StationSnapshot};

/// Pairs each value with its index for plotting
pub fn chart_points(values: &[f64]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect()
}

/// Y axis bounds with some headroom around the series
///
/// A flat or empty series still gets a non-zero span.
pub fn y_bounds(values: &[f64]) -> [f64; 2] {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let pad = ((max - min) * 0.1).max(1.0);
    [(min - pad).floor(), (max + pad).ceil()]
}

/// Title with the active measurement highlighted
fn title(active: MeasurementType) -> Line<'static> {
    let mut spans = vec![Span::styled(
        " 24h Trend · ",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];
    for measurement in MeasurementType::all() {
        let style = if *measurement == active {
            Style::default()
                .fg(Color::White)
                .bg(CRIMSON)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", measurement.label()), style));
    }
    spans.push(Span::raw(" "));
    Line::from(spans)
}

/// Renders the trend chart for the active measurement
pub fn render(frame: &mut Frame, app: &App, station: &StationSnapshot, area: Rect) {
    let values = app.active_trend_values(station);
    let points = chart_points(&values);
    let [low, high] = y_bounds(&values);

    let first = station.trends.first().map(|p| p.time.clone()).unwrap_or_default();
    let middle = station
        .trends
        .get(station.trends.len() / 2)
        .map(|p| p.time.clone())
        .unwrap_or_default();
    let last = station.trends.last().map(|p| p.time.clone()).unwrap_or_default();

    let unit = app.measurement_type.unit();
    let dataset = Dataset::default()
        .name(app.measurement_type.label())
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::LightRed))
        .data(&points);

    let x_max = (values.len().saturating_sub(1)).max(1) as f64;

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .title(title(app.measurement_type))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(CRIMSON)),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::raw(first),
                    Span::raw(middle),
                    Span::raw(last),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([low, high])
                .labels(vec![
                    Span::raw(format!("{:.0}{}", low, unit)),
                    Span::raw(format!("{:.0}{}", high, unit)),
                ]),
        );

    frame.render_widget(chart, area);
}
