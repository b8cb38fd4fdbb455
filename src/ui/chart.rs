//! Forecast line chart.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::Line,
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph},
    Frame,
};

use super::theme::{
    COLOR_DIM, COLOR_HEADER, COLOR_SELECTED, COLOR_SERIES, COLOR_TEXT, COLOR_TOOLTIP_BG,
};
use super::view::{ChartView, Tooltip};

/// Draw `chart` into `area` (the panel's inner area).
pub fn render_chart(frame: &mut Frame, area: Rect, chart: &ChartView) {
    let graph = graph_area(area, chart);
    let grid_data: Vec<[(f64, f64); 2]> = grid_heights(graph, chart)
        .into_iter()
        .map(|y| [(chart.x_bounds[0], y), (chart.x_bounds[1], y)])
        .collect();
    let selected_data: Vec<(f64, f64)> = chart.tooltip.iter().map(|t| (t.x, t.y)).collect();

    // Grid first so the series draws over it
    let mut datasets: Vec<Dataset> = grid_data
        .iter()
        .map(|row| {
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(COLOR_DIM))
                .data(row)
        })
        .collect();

    datasets.push(
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(COLOR_SERIES))
            .data(&chart.points),
    );

    if !selected_data.is_empty() {
        datasets.push(
            Dataset::default()
                .marker(Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(COLOR_SELECTED))
                .data(&selected_data),
        );
    }

    let axis_style = Style::default().fg(COLOR_DIM);
    let widget = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(axis_style)
                .bounds(chart.x_bounds)
                .labels(chart.x_ticks.iter().map(|l| Line::from(l.as_str()))),
        )
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds(chart.y_bounds)
                .labels(chart.y_tick_labels()),
        );

    frame.render_widget(widget, area);

    if let Some(tooltip) = &chart.tooltip {
        render_tooltip(frame, area, chart, tooltip);
    }
}

fn render_tooltip(frame: &mut Frame, area: Rect, chart: &ChartView, tooltip: &Tooltip) {
    let graph = graph_area(area, chart);
    let Some((col, row)) = cell_for(graph, chart, tooltip.x, tooltip.y) else {
        return;
    };

    let lines = tooltip.lines();
    let width = lines.iter().map(|l| Line::from(l.as_str()).width()).max().unwrap_or(0) as u16 + 2;
    let height = lines.len() as u16 + 2;
    if width > area.width || height > area.height {
        return;
    }

    // Prefer right of and above the point, flipping when it would overflow
    let x = if col + 2 + width <= area.right() {
        col + 2
    } else {
        col.saturating_sub(width + 1).max(area.x)
    };
    let y = if row >= area.y + height {
        row - height
    } else {
        (row + 1).min(area.bottom().saturating_sub(height))
    };
    let rect = Rect::new(x, y, width, height);

    let text: Vec<Line> = vec![
        Line::styled(lines[0].clone(), Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD)),
        Line::styled(lines[1].clone(), Style::default().fg(COLOR_TEXT)),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_SELECTED))
        .style(Style::default().bg(COLOR_TOOLTIP_BG));

    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(text).block(block), rect);
}

/// Plotting area of a chart drawn into `area`.
///
/// Follows ratatui's `Chart` layout: the y labels (or the overhang of the
/// first x label, capped at a third of the width) and the y axis line on
/// the left, the x axis line and x labels at the bottom.
pub fn graph_area(area: Rect, chart: &ChartView) -> Rect {
    let y_labels = chart
        .y_tick_labels()
        .iter()
        .map(|l| Line::from(l.as_str()).width())
        .max()
        .unwrap_or(0) as u16;
    let first_x = chart
        .x_ticks
        .first()
        .map(|l| Line::from(l.as_str()).width() as u16)
        .unwrap_or(0);
    let left = y_labels.max(first_x.saturating_sub(1)).min(area.width / 3);

    let x = area.x + left + 1;
    let width = area.width.saturating_sub(left + 1);
    let height = area.height.saturating_sub(2);
    Rect::new(x, area.y, width, height)
}

/// Heights of the grid lines, moved onto the rows where their tick labels
/// are drawn.
///
/// Chart places label `i` of `n` at `bottom - 1 - i * (h - 1) / (n - 1)`
/// (integer division) while datasets are rounded to the nearest row, so
/// the raw tick value can land one row off its label.
pub fn grid_heights(graph: Rect, chart: &ChartView) -> Vec<f64> {
    let ticks = chart.y_ticks.len();
    if graph.height < 2 || ticks < 2 {
        return chart.grid.clone();
    }
    let [y_min, y_max] = chart.y_bounds;
    let rows = u32::from(graph.height - 1);
    let last = (ticks - 1) as u32;

    // Grid line j sits on tick j + 1
    (1..=chart.grid.len() as u32)
        .map(|i| {
            let from_top = rows - i * rows / last;
            let fraction = f64::from(from_top) / f64::from(rows);
            y_max * (1.0 - fraction) + y_min * fraction
        })
        .collect()
}

/// Terminal cell of data coordinate `(x, y)`, if inside `graph`.
pub fn cell_for(graph: Rect, chart: &ChartView, x: f64, y: f64) -> Option<(u16, u16)> {
    if graph.width == 0 || graph.height == 0 {
        return None;
    }
    let [x_min, x_max] = chart.x_bounds;
    let [y_min, y_max] = chart.y_bounds;
    let fx = (x - x_min) / (x_max - x_min);
    // Halved so a span wider than f64::MAX does not overflow
    let fy = (y * 0.5 - y_min * 0.5) / (y_max * 0.5 - y_min * 0.5);
    if !(0.0..=1.0).contains(&fx) || !(0.0..=1.0).contains(&fy) {
        return None;
    }

    let col = graph.x + (fx * f64::from(graph.width - 1)).round() as u16;
    let row = graph.bottom() - 1 - (fy * f64::from(graph.height - 1)).round() as u16;
    Some((col, row))
}

/// Index of the point nearest to terminal column `column`, for hover.
///
/// `None` when the column is outside the plotting area.
pub fn point_at_column(graph: Rect, chart: &ChartView, column: u16) -> Option<usize> {
    if chart.is_empty() || column < graph.x || column >= graph.right() {
        return None;
    }
    let [x_min, x_max] = chart.x_bounds;
    let span = f64::from(graph.width.saturating_sub(1).max(1));
    let fraction = f64::from(column - graph.x) / span;
    let x = x_min + fraction * (x_max - x_min);

    let last = chart.len() - 1;
    Some((x.round().max(0.0) as usize).min(last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ForecastPoint, ForecastSeries, Measurement};
    use crate::ui::buffer_to_string;
    use crate::ui::view::chart_view;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn chart(n: i64) -> ChartView {
        let points = (0..n)
            .map(|i| ForecastPoint::new(format!("d{}", i), Measurement::from(10 + i)))
            .collect();
        chart_view(&ForecastSeries::new(points), None)
    }

    #[test]
    fn test_graph_area_leaves_room_for_axes() {
        let chart = chart(5);
        let graph = graph_area(Rect::new(0, 0, 60, 20), &chart);
        // y labels such as "14.4" are four cells wide, plus the axis line
        assert_eq!(chart.y_tick_labels().last().map(String::as_str), Some("14.4"));
        assert_eq!(graph, Rect::new(5, 0, 55, 18));
    }

    #[test]
    fn test_point_at_column_maps_ends() {
        let chart = chart(5);
        let graph = Rect::new(3, 0, 57, 18);
        assert_eq!(point_at_column(graph, &chart, 3), Some(0));
        assert_eq!(point_at_column(graph, &chart, 59), Some(4));
        assert_eq!(point_at_column(graph, &chart, 31), Some(2));
        assert_eq!(point_at_column(graph, &chart, 2), None);
        assert_eq!(point_at_column(graph, &chart, 60), None);
    }

    #[test]
    fn test_grid_rows_line_up_with_tick_labels() {
        let chart = chart(5);
        let area = Rect::new(0, 0, 60, 20);
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| render_chart(f, area, &chart)).unwrap();
        let text = buffer_to_string(terminal.backend().buffer());
        let rows: Vec<&str> = text.lines().collect();

        for label in ["10.8", "12.0", "13.2"] {
            let row = rows
                .iter()
                .position(|r| r.starts_with(label))
                .unwrap_or_else(|| panic!("no row labelled {}", label));
            assert!(rows[row].contains('•'), "grid missing on {} row", label);
            assert!(!rows[row - 1].contains('•'), "grid drawn above {}", label);
        }
    }

    #[test]
    fn test_grid_heights_map_to_label_rows() {
        let chart = chart(5);
        let graph = Rect::new(5, 0, 55, 18);
        let heights = grid_heights(graph, &chart);
        let rows: Vec<u16> = heights
            .iter()
            .map(|&y| cell_for(graph, &chart, 0.0, y).unwrap().1)
            .collect();
        // 17 - i * 17 / 4 for i = 1, 2, 3
        assert_eq!(rows, vec![13, 9, 5]);
    }

    #[test]
    fn test_cell_for_corners() {
        let chart = chart(5);
        let graph = Rect::new(3, 0, 57, 18);
        let [y_min, y_max] = chart.y_bounds;
        assert_eq!(cell_for(graph, &chart, 0.0, y_min), Some((3, 17)));
        assert_eq!(cell_for(graph, &chart, 4.0, y_max), Some((59, 0)));
        assert_eq!(cell_for(graph, &chart, 5.0, y_max), None);
    }
}
