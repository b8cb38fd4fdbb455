//! Message, key and mouse handling for the App.

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use super::{App, AppMessage};
use crate::ui::{chart, dashboard_layout, ForecastView};

impl App {
    /// Handle a fetch result.
    /// Applied results mark the app dirty; stale ones are dropped silently.
    pub fn handle_message(&mut self, msg: AppMessage) {
        let applied = match msg {
            AppMessage::AirQualityLoaded { generation, result } => self.air.apply(generation, result),
            AppMessage::ForecastLoaded { generation, result } => {
                let applied = self.forecast.apply(generation, result);
                if applied {
                    self.clamp_selection();
                }
                applied
            }
        };

        if applied {
            self.last_updated = Some(Local::now());
            self.mark_dirty();
        }
    }

    /// Handle a key press. Returns `true` when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        self.mark_dirty();

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Right | KeyCode::Char('l') => self.select_next_point(),
            KeyCode::Left | KeyCode::Char('h') => self.select_previous_point(),
            KeyCode::Home => self.select_point(0),
            KeyCode::End => self.select_point(self.forecast_len().saturating_sub(1)),
            _ => {}
        }
        self.should_quit
    }

    /// Hovering over the chart selects the nearest point; leaving it clears
    /// the selection.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Down(_)) {
            return;
        }

        let view = self.view();
        let ForecastView::Chart(chart_view) = &view.forecast else {
            return;
        };
        let screen = Rect::new(0, 0, self.terminal_width, self.terminal_height);
        let inner = dashboard_layout(screen, &view).forecast_inner();
        let graph = chart::graph_area(inner, chart_view);

        let inside_rows = mouse.row >= graph.y && mouse.row < graph.bottom();
        let hovered = if inside_rows {
            chart::point_at_column(graph, chart_view, mouse.column)
        } else {
            None
        };

        if hovered != self.selected_point {
            self.selected_point = hovered;
            self.mark_dirty();
        }
    }

    pub fn select_next_point(&mut self) {
        let len = self.forecast_len();
        if len == 0 {
            return;
        }
        self.selected_point = Some(match self.selected_point {
            None => 0,
            Some(i) => (i + 1).min(len - 1),
        });
    }

    pub fn select_previous_point(&mut self) {
        let len = self.forecast_len();
        if len == 0 {
            return;
        }
        self.selected_point = Some(match self.selected_point {
            None => len - 1,
            Some(i) => i.saturating_sub(1).min(len - 1),
        });
    }

    pub fn select_point(&mut self, index: usize) {
        if index < self.forecast_len() {
            self.selected_point = Some(index);
        }
    }

    /// Keep the selection inside a freshly loaded series.
    fn clamp_selection(&mut self) {
        let len = self.forecast_len();
        self.selected_point = match self.selected_point {
            Some(_) if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => None,
        };
    }
}
