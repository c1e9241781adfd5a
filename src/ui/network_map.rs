//! Network map panel
//!
//! Draws the state outline with every station plotted, highlights the
//! selected one and shows its coordinates and an external map link.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points, Rectangle},
        Block, Borders, Paragraph,
    },
    Frame,
};

use super::CRIMSON;
use crate::app::App;
use crate::data::StationSnapshot;

/// Approximate New Mexico bounding box as (west, south, width, height) in degrees
pub const STATE_BOUNDS: (f64, f64, f64, f64) = (-109.05, 31.33, 6.05, 5.67);

/// Margin around the state outline in degrees
const MARGIN: f64 = 0.4;

/// Canvas x (longitude) bounds
pub fn x_bounds() -> [f64; 2] {
    let (west, _, width, _) = STATE_BOUNDS;
    [west - MARGIN, west + width + MARGIN]
}

/// Canvas y (latitude) bounds
pub fn y_bounds() -> [f64; 2] {
    let (_, south, _, height) = STATE_BOUNDS;
    [south - MARGIN, south + height + MARGIN]
}

/// Renders the map panel for the selected station
pub fn render(frame: &mut Frame, app: &App, station: &StationSnapshot, area: Rect) {
    let block = Block::default()
        .title(" Network Map ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(CRIMSON));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(inner);

    let others: Vec<(f64, f64)> = app
        .stations
        .iter()
        .filter(|s| s.id != station.id)
        .map(|s| (s.longitude, s.latitude))
        .collect();
    let selected = [(station.longitude, station.latitude)];
    let (west, south, width, height) = STATE_BOUNDS;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds(x_bounds())
        .y_bounds(y_bounds())
        .paint(|ctx| {
            ctx.draw(&Rectangle {
                x: west,
                y: south,
                width,
                height,
                color: Color::DarkGray,
            });
            ctx.draw(&Points {
                coords: &others,
                color: Color::Gray,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &selected,
                color: Color::LightRed,
            });
        });
    frame.render_widget(canvas, chunks[0]);

    let footer = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("◉ ", Style::default().fg(Color::LightRed)),
            Span::styled(
                format!("{:.4}, {:.4}", station.latitude, station.longitude),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            station.map_url(),
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
        )),
    ]);
    frame.render_widget(footer, chunks[1]);
}
