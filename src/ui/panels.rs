//! Title bar, panels and footer.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use super::chart::render_chart;
use super::theme::{COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_LOADING, COLOR_TEXT};
use super::view::{AirQualityView, ForecastView, LOADING, LOADING_FORECAST};
use super::StatusInfo;

pub const APP_TITLE: &str = "Environmental Monitoring & Analytics Platform";
pub const AIR_QUALITY_TITLE: &str = " Air Quality Data ";
pub const FORECAST_TITLE: &str = " PM2.5 Forecast ";

fn panel(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Span::styled(
            title,
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ))
}

pub fn render_title(frame: &mut Frame, area: Rect, status: &StatusInfo) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", APP_TITLE),
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {}", status.base_url), Style::default().fg(COLOR_DIM)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

pub fn render_air_quality(frame: &mut Frame, area: Rect, air: &AirQualityView) {
    let mut lines: Vec<Line> = air
        .lines
        .iter()
        .map(|text| {
            let color = if text.contains(LOADING) { COLOR_LOADING } else { COLOR_TEXT };
            match text.split_once(": ") {
                Some((label, value)) => Line::from(vec![
                    Span::styled(
                        format!("{}: ", label),
                        Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(value.to_string(), Style::default().fg(color)),
                ]),
                None => Line::styled(text.clone(), Style::default().fg(color)),
            }
        })
        .collect();

    if let Some(error) = &air.error {
        lines.push(Line::styled(error.clone(), Style::default().fg(COLOR_ERROR)));
    }

    let paragraph = Paragraph::new(lines)
        .block(panel(AIR_QUALITY_TITLE))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

pub fn render_forecast(frame: &mut Frame, area: Rect, forecast: &ForecastView) {
    let block = panel(FORECAST_TITLE);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match forecast {
        ForecastView::Chart(chart) => render_chart(frame, inner, chart),
        ForecastView::Message(message) => {
            let color = if message == LOADING_FORECAST { COLOR_LOADING } else { COLOR_TEXT };
            let paragraph = Paragraph::new(Line::styled(message.clone(), Style::default().fg(color)))
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, inner);
        }
    }
}

pub fn render_footer(frame: &mut Frame, area: Rect, status: &StatusInfo) {
    let hints = Line::styled(
        " r refresh  ←/→ select point  q quit",
        Style::default().fg(COLOR_DIM),
    );
    frame.render_widget(Paragraph::new(hints), area);

    let state = if status.in_flight {
        "Fetching...".to_string()
    } else {
        match &status.last_updated {
            Some(time) => format!("Updated {}", time.format("%H:%M:%S")),
            None => String::new(),
        }
    };
    let state = match status.refresh_interval {
        Some(every) if !state.is_empty() => format!("{} · every {}s ", state, every.as_secs()),
        _ if !state.is_empty() => format!("{} ", state),
        _ => state,
    };
    frame.render_widget(
        Paragraph::new(Line::styled(state, Style::default().fg(COLOR_DIM))).alignment(Alignment::Right),
        area,
    );
}
