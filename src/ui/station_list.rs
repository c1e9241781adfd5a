//! Station list rendering
//!
//! Renders the searchable list of stations with their current temperature,
//! marking the selected one.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::CRIMSON;
use crate::app::{App, InputMode};
use crate::data::StationSnapshot;

/// Lines used by each station row (name line and location line)
const ROW_HEIGHT: usize = 2;

/// Lines above the first row (search box and spacer)
const HEADER_LINES: usize = 2;

/// Color for a Fahrenheit temperature (warmer = more red, cooler = more blue)
pub fn temperature_color(temp: f64) -> Color {
    if temp >= 90.0 {
        Color::Red
    } else if temp >= 75.0 {
        Color::LightRed
    } else if temp >= 60.0 {
        Color::Yellow
    } else if temp >= 45.0 {
        Color::Green
    } else if temp >= 32.0 {
        Color::Cyan
    } else {
        Color::Blue
    }
}

/// Rows to scroll so the selected row stays inside a view of `visible` lines
fn scroll_offset(selected: Option<usize>, visible: usize) -> u16 {
    let Some(index) = selected else {
        return 0;
    };
    let bottom = HEADER_LINES + (index + 1) * ROW_HEIGHT;
    bottom.saturating_sub(visible) as u16
}

/// Renders the station list panel into `area`
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let filtered = app.filtered_stations();

    let block = Block::default()
        .title(format!(" Stations ({}) ", filtered.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(CRIMSON));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(inner);

    let mut lines = vec![search_line(app), Line::from("")];

    if app.loading {
        lines.push(Line::from(Span::styled(
            "  Syncing with network...",
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        )));
    } else if filtered.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No stations match",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        let selected_id = app.selected_id();
        for station in &filtered {
            let is_selected = selected_id == Some(station.id.as_str());
            lines.extend(station_lines(station, is_selected));
        }
    }

    let scroll = if app.loading {
        0
    } else {
        scroll_offset(app.selected_filtered_index(), chunks[0].height as usize)
    };
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), chunks[0]);

    let credit = Paragraph::new(vec![
        Line::from(Span::styled(
            " New Mexico State University",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            " Climate Center · ZiaMet Network",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(credit, chunks[1]);
}

/// Builds the search box line
fn search_line(app: &App) -> Line<'static> {
    let searching = app.input_mode == InputMode::Search;
    let prompt_style = if searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };

    if app.search_term.is_empty() && !searching {
        Line::from(vec![
            Span::styled(" ⌕ ", prompt_style),
            Span::styled(
                "Find a station... (/)",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    } else {
        let cursor = if searching { "▏" } else { "" };
        Line::from(vec![
            Span::styled(" ⌕ ", prompt_style),
            Span::styled(
                format!("{}{}", app.search_term, cursor),
                Style::default().fg(Color::White),
            ),
        ])
    }
}

/// Builds the two lines for one station row
fn station_lines(station: &StationSnapshot, is_selected: bool) -> Vec<Line<'static>> {
    let (marker, name_style) = if is_selected {
        (
            "▸ ",
            Style::default()
                .fg(Color::White)
                .bg(CRIMSON)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("  ", Style::default().fg(Color::White))
    };

    vec![
        Line::from(vec![
            Span::styled(marker, Style::default().fg(CRIMSON)),
            Span::styled(station.name.clone(), name_style),
            Span::raw("  "),
            Span::styled(
                format!("{:.0}°", station.current_temp),
                Style::default()
                    .fg(temperature_color(station.current_temp))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("    {}", station.location),
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::snapshot;
    use crate::data::{StationProvider, StationSnapshot};
    use async_trait::async_trait;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    #[derive(Debug)]
    struct FixedProvider(Vec<StationSnapshot>);

    #[async_trait]
    impl StationProvider for FixedProvider {
        async fn get_stations(&self) -> Vec<StationSnapshot> {
            self.0.clone()
        }
    }

    fn fixed_stations() -> Vec<StationSnapshot> {
        vec![
            snapshot("station-0", "NMSU Main Campus", "Las Cruces, NM"),
            snapshot("station-1", "Farmington ASC", "Farmington, NM"),
            snapshot("station-2", "Alcalde ASC", "Alcalde, NM"),
        ]
    }

    fn render_list(app: &App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, app, frame.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_loading_shows_sync_message() {
        let app = App::new(Arc::new(FixedProvider(fixed_stations())));
        let content = render_list(&app, 34, 20);
        assert!(content.contains("Syncing with network..."));
        assert!(content.contains("Find a station..."));
    }

    #[tokio::test]
    async fn test_rows_show_name_temperature_and_location() {
        let mut app = App::new(Arc::new(FixedProvider(fixed_stations())));
        app.refresh().await;
        let content = render_list(&app, 34, 20);

        assert!(content.contains("Stations (3)"));
        assert!(content.contains("▸ NMSU Main Campus"));
        assert!(content.contains("64°"));
        assert!(content.contains("Farmington, NM"));
        assert!(content.contains("Climate Center"));
    }

    #[tokio::test]
    async fn test_search_term_narrows_rows() {
        let mut app = App::new(Arc::new(FixedProvider(fixed_stations())));
        app.refresh().await;
        app.set_search_term("alc");
        let content = render_list(&app, 34, 20);

        assert!(content.contains("Stations (1)"));
        assert!(content.contains("Alcalde ASC"));
        assert!(!content.contains("Farmington ASC"));
    }

    #[tokio::test]
    async fn test_no_match_message() {
        let mut app = App::new(Arc::new(FixedProvider(fixed_stations())));
        app.refresh().await;
        app.set_search_term("tokyo");
        let content = render_list(&app, 34, 20);
        assert!(content.contains("No stations match"));
    }

    #[test]
    fn test_scroll_keeps_selection_visible() {
        assert_eq!(scroll_offset(None, 10), 0);
        assert_eq!(scroll_offset(Some(0), 10), 0);
        // Row 7 ends at line 2 + 8 * 2 = 18
        assert_eq!(scroll_offset(Some(7), 10), 8);
    }

    #[test]
    fn test_temperature_color_ranges() {
        assert_eq!(temperature_color(95.0), Color::Red);
        assert_eq!(temperature_color(65.0), Color::Yellow);
        assert_eq!(temperature_color(50.0), Color::Green);
        assert_eq!(temperature_color(20.0), Color::Blue);
    }
}
