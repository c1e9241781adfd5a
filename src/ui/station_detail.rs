//! Selected station panels
//!
//! Renders the hero panel with the headline conditions and the grid of
//! detailed readings below the charts.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::station_list::temperature_color;
use super::widgets::TrendSparkline;
use super::CRIMSON;
use crate::app::App;
use crate::data::StationSnapshot;

/// One cell of the detailed conditions grid
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
    pub caption: &'static str,
}

/// Builds the detailed conditions cards for a station
///
/// # Returns
///
/// Dew point, peak gust, solar radiation and soil temperature, in that order.
pub fn metric_cards(station: &StationSnapshot) -> [MetricCard; 4] {
    [
        MetricCard {
            label: "Dew Point",
            value: format!("{:.1}°F", station.dew_point),
            caption: "Relative measure",
        },
        MetricCard {
            label: "Peak Gust",
            value: format!("{:.1} mph", station.peak_gust),
            caption: "Last hour",
        },
        MetricCard {
            label: "Solar Rad",
            value: format!("{:.0} W/m²", station.solar_rad),
            caption: "Global index",
        },
        MetricCard {
            label: "Soil Temp",
            value: format!("{:.1}°F", station.soil_temp),
            caption: "4 inch depth",
        },
    ]
}

/// Renders the hero panel: identity, current temperature, headline stats and
/// a sparkline of the active trend
pub fn render_hero(frame: &mut Frame, app: &App, station: &StationSnapshot, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(CRIMSON));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(inner);

    let identity = vec![
        Line::from(vec![
            Span::styled("● ", Style::default().fg(Color::Green)),
            Span::styled(
                format!("Live Feed · Updated {}", station.last_updated),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(Span::styled(
            station.name.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("➤ {}", station.location),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{:.1}°", station.current_temp),
                Style::default()
                    .fg(temperature_color(station.current_temp))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Temperature", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(columns[0]);
    frame.render_widget(Paragraph::new(identity), left[0]);

    let values = app.active_trend_values(station);
    let sparkline = TrendSparkline::new(&values).highlight(values.len().saturating_sub(1));
    frame.render_widget(sparkline, left[1]);

    let stats = vec![
        stat_line(
            "Humidity",
            format!("{:.0}%", station.humidity),
            Color::Cyan,
        ),
        stat_line(
            "Wind",
            format!("{:.1} mph {}", station.wind_speed, station.wind_direction),
            Color::White,
        ),
        stat_line(
            "Daily High",
            format!("{:.1}°", station.high_temp),
            Color::LightRed,
        ),
        stat_line(
            "Daily Low",
            format!("{:.1}°", station.low_temp),
            Color::LightBlue,
        ),
    ];
    frame.render_widget(Paragraph::new(stats), columns[1]);
}

fn stat_line(label: &'static str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<12}", label), Style::default().fg(Color::DarkGray)),
        Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
}

/// Renders the detailed conditions grid
pub fn render_details(frame: &mut Frame, station: &StationSnapshot, area: Rect) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (card, cell) in metric_cards(station).into_iter().zip(cells.iter()) {
        let block = Block::default()
            .title(format!(" {} ", card.label))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let paragraph = Paragraph::new(vec![
            Line::from(Span::styled(
                card.value,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                card.caption,
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(block);

        frame.render_widget(paragraph, *cell);
    }
}
