//! UI rendering module for the ZiaMet dashboard
//!
//! This module lays out the screen (header, station list, dashboard panels,
//! footer) and delegates each panel to its own submodule, using the ratatui
//! library for TUI components.

pub mod help_overlay;
pub mod network_map;
pub mod station_detail;
pub mod station_list;
pub mod trend_chart;
pub mod widgets;

use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, InputMode};

/// NMSU crimson
pub const CRIMSON: Color = Color::Rgb(0x89, 0x00, 0x22);

/// Terminals narrower than this hide the station list unless toggled on
pub const NARROW_WIDTH: u16 = 100;

/// Width of the station list column
const LIST_WIDTH: u16 = 34;

/// Returns true if the station list should be drawn beside the dashboard
pub fn list_is_docked(width: u16) -> bool {
    width >= NARROW_WIDTH
}

/// Renders the whole dashboard for the current application state
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(3),    // Body
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    render_header(frame, app, chunks[0]);

    let body = chunks[1];
    if list_is_docked(area.width) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(LIST_WIDTH), Constraint::Min(0)])
            .split(body);
        station_list::render(frame, app, columns[0]);
        render_main(frame, app, columns[1]);
    } else {
        render_main(frame, app, body);
        if app.sidebar_open {
            let overlay = Rect {
                width: LIST_WIDTH.min(body.width),
                ..body
            };
            frame.render_widget(Clear, overlay);
            station_list::render(frame, app, overlay);
        }
    }

    render_footer(frame, app, chunks[2]);

    if app.show_help {
        help_overlay::render(frame);
    }
}

/// Renders the header bar with network name, date, and sync status
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let date = Local::now().format("%a, %b %d, %Y").to_string();

    let status = if app.loading {
        Span::styled(
            "⟳ Syncing...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        let updated = app
            .last_refresh
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string());
        Span::styled(
            format!("⟳ Refreshed {}", updated),
            Style::default().fg(Color::Gray),
        )
    };

    let title = Line::from(vec![
        Span::styled(
            " NM ",
            Style::default()
                .fg(CRIMSON)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            "ZiaMet",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  NMSU WEATHER NETWORK",
            Style::default().fg(Color::Gray),
        ),
        Span::raw("   "),
        Span::styled(date, Style::default().fg(Color::White)),
        Span::raw("   "),
        status,
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(CRIMSON));

    let paragraph = Paragraph::new(vec![Line::from(""), title]).block(block);
    frame.render_widget(paragraph, area);
}

/// Renders the dashboard panels for the selected station
fn render_main(frame: &mut Frame, app: &App, area: Rect) {
    let Some(station) = app.selected_station() else {
        render_placeholder(frame, app, area);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Hero
            Constraint::Min(8),    // Map and trend chart
            Constraint::Length(5), // Detailed conditions
        ])
        .split(area);

    station_detail::render_hero(frame, app, station, rows[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);
    network_map::render(frame, app, station, middle[0]);
    trend_chart::render(frame, app, station, middle[1]);

    station_detail::render_details(frame, station, rows[2]);
}

/// Renders a centered message when no station can be shown
fn render_placeholder(frame: &mut Frame, app: &App, area: Rect) {
    let message = if app.loading {
        "Loading station data..."
    } else if app.stations.is_empty() {
        "No stations available"
    } else {
        "Select a station to view conditions"
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Percentage(45),
        ])
        .split(area);

    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    frame.render_widget(text, chunks[1]);
}

/// Renders the key hints, or the search prompt while searching
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.input_mode {
        InputMode::Search => Line::from(vec![
            Span::styled(" Search: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}▏", app.search_term),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                "   Enter keep · Esc clear",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        InputMode::Normal => {
            let hints = [
                ("↑↓", "Select"),
                ("/", "Search"),
                ("t", "Chart"),
                ("r", "Refresh"),
                ("s", "Stations"),
                ("?", "Help"),
                ("q", "Quit"),
            ];
            let mut spans = vec![Span::raw(" ")];
            for (key, label) in hints {
                spans.push(Span::styled(key, Style::default().fg(Color::Yellow)));
                spans.push(Span::styled(
                    format!(" {}  ", label),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::{backend::TestBackend, Terminal};

    use crate::app::App;

    /// Renders `app` into a test buffer and returns its text
    pub fn render_to_string(app: &App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| super::render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::render_to_string;
    use super::*;
    use crate::data::{generate_mock_stations, StationProvider, StationSnapshot};
    use async_trait::async_trait;
    use std::sync::Arc;

    #[derive(Debug)]
    struct MockProvider;

    #[async_trait]
    impl StationProvider for MockProvider {
        async fn get_stations(&self) -> Vec<StationSnapshot> {
            generate_mock_stations()
        }
    }

    async fn loaded_app() -> App {
        let mut app = App::new(Arc::new(MockProvider));
        app.refresh().await;
        app
    }

    #[test]
    fn test_list_docked_only_on_wide_terminals() {
        assert!(list_is_docked(120));
        assert!(list_is_docked(NARROW_WIDTH));
        assert!(!list_is_docked(80));
    }

    #[test]
    fn test_loading_state_renders_placeholder() {
        let app = App::new(Arc::new(MockProvider));
        let content = render_to_string(&app, 120, 40);

        assert!(content.contains("ZiaMet"));
        assert!(content.contains("Syncing"));
        assert!(content.contains("Loading station data"));
    }

    #[tokio::test]
    async fn test_wide_layout_shows_list_and_dashboard() {
        let app = loaded_app().await;
        let content = render_to_string(&app, 140, 45);

        assert!(content.contains("Stations"));
        assert!(content.contains("Fabian Garcia RC"));
        assert!(content.contains("Network Map"));
        assert!(content.contains("24h Trend"));
        assert!(content.contains("Dew Point"));
        assert!(content.contains("Refreshed"));
    }

    #[tokio::test]
    async fn test_narrow_layout_hides_list_until_toggled() {
        let mut app = loaded_app().await;
        let content = render_to_string(&app, 90, 45);
        assert!(!content.contains("Fabian Garcia RC"));
        assert!(content.contains("NMSU Main Campus"), "Hero still shows selection");

        app.toggle_sidebar();
        let content = render_to_string(&app, 90, 45);
        assert!(content.contains("Fabian Garcia RC"));
    }

    #[tokio::test]
    async fn test_footer_shows_search_prompt_in_search_mode() {
        let mut app = loaded_app().await;
        app.input_mode = InputMode::Search;
        app.set_search_term("alc");
        let content = render_to_string(&app, 120, 40);

        assert!(content.contains("Search: alc"));
    }

    #[tokio::test]
    async fn test_help_overlay_drawn_on_top() {
        let mut app = loaded_app().await;
        app.show_help = true;
        let content = render_to_string(&app, 120, 40);
        assert!(content.contains("Keyboard Shortcuts"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let app = App::new(Arc::new(MockProvider));
        let content = render_to_string(&app, 10, 5);
        assert!(!content.is_empty());
    }
}
