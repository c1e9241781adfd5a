//! Trend sparkline widget for inline visualization

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Block characters for different values (8 levels)
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A one-row sparkline scaled between the series minimum and maximum
pub struct TrendSparkline<'a> {
    values: &'a [f64],
    min: f64,
    max: f64,
    highlight: Option<usize>,
    style: Style,
    highlight_style: Style,
}

impl<'a> TrendSparkline<'a> {
    pub fn new(values: &'a [f64]) -> Self {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            values,
            min,
            max,
            highlight: None,
            style: Style::default().fg(Color::Red),
            highlight_style: Style::default().fg(Color::Yellow),
        }
    }

    /// Marks the point at `index` (usually the latest sample)
    pub fn highlight(mut self, index: usize) -> Self {
        self.highlight = Some(index);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    fn value_to_block(&self, value: f64) -> char {
        let range = self.max - self.min;
        if !range.is_finite() || range <= f64::EPSILON {
            return BLOCKS[3];
        }
        let normalized = ((value - self.min) / range).clamp(0.0, 1.0);
        let index = ((normalized * 7.0).round() as usize).min(7);
        BLOCKS[index]
    }
}

impl<'a> Widget for TrendSparkline<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let width = area.width as usize;

        for (i, value) in self.values.iter().take(width).enumerate() {
            let block = self.value_to_block(*value);
            let x = area.x + i as u16;
            let y = area.y;

            let style = if self.highlight == Some(i) {
                self.highlight_style
            } else {
                self.style
            };

            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(block).set_style(style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_maps_to_lowest_block() {
        let values = [40.0, 50.0, 60.0];
        let sparkline = TrendSparkline::new(&values);
        assert_eq!(sparkline.value_to_block(40.0), '▁');
    }

    #[test]
    fn test_maximum_maps_to_highest_block() {
        let values = [40.0, 50.0, 60.0];
        let sparkline = TrendSparkline::new(&values);
        assert_eq!(sparkline.value_to_block(60.0), '█');
    }

    #[test]
    fn test_flat_series_uses_middle_block() {
        let values = [5.0, 5.0, 5.0];
        let sparkline = TrendSparkline::new(&values);
        assert_eq!(sparkline.value_to_block(5.0), '▄');
    }

    #[test]
    fn test_empty_series_does_not_panic() {
        let sparkline = TrendSparkline::new(&[]);
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        sparkline.render(area, &mut buf);
        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), " ");
    }

    #[test]
    fn test_render_writes_one_cell_per_value() {
        let values = [1.0, 2.0, 3.0, 4.0];
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        TrendSparkline::new(&values).highlight(3).render(area, &mut buf);

        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), "▁");
        assert_eq!(buf.cell((3, 0)).unwrap().symbol(), "█");
        assert_eq!(buf.cell((3, 0)).unwrap().fg, Color::Yellow);
        assert_eq!(buf.cell((4, 0)).unwrap().symbol(), " ");
    }

    #[test]
    fn test_render_truncates_to_width() {
        let values = [1.0; 20];
        let area = Rect::new(0, 0, 5, 1);
        let mut buf = Buffer::empty(area);
        TrendSparkline::new(&values).render(area, &mut buf);
        assert_eq!(buf.area.width, 5);
    }
}
