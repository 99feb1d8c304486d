//! Display surfaces.
//!
//! The refresh loop publishes widget state through the `Surface` trait so
//! the same loop can drive a live terminal panel or a recorder in tests.

use crate::map::MapViewport;
use crate::settings::Unit;
use std::io::{self, Write};

/// Sink for the five things the widget shows: a title, a clock line, a
/// weather line, a map viewport, and the currently selected city/unit pair.
pub trait Surface {
    fn set_title(&mut self, label: &str);
    fn set_time(&mut self, text: &str);
    fn set_weather(&mut self, text: &str);
    fn set_map(&mut self, view: &MapViewport);
    fn reflect_selection(&mut self, city_key: &str, unit: Unit);
}

const MIN_INNER_WIDTH: usize = 44;

// ─── Panel rendering ────────────────────────────────────────────

/// Render the widget panel as a boxed block of text.
pub fn render_panel(title: &str, time: &str, weather: &str, city_key: &str, unit: Unit) -> String {
    let selection = format!("city: {}    unit: {}", city_key, unit);
    let inner = [title, time, weather, selection.as_str()]
        .iter()
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_INNER_WIDTH);

    let bar = "═".repeat(inner + 2);
    let mut out = String::new();
    out.push_str(&format!("  ╔{}╗\n", bar));
    out.push_str(&pad_line(title, inner));
    out.push_str(&pad_line(time, inner));
    out.push_str(&pad_line(weather, inner));
    out.push_str(&format!("  ╠{}╣\n", bar));
    out.push_str(&pad_line(&selection, inner));
    out.push_str(&format!("  ╚{}╝\n", bar));
    out
}

fn pad_line(text: &str, inner: usize) -> String {
    let padding = inner.saturating_sub(text.chars().count());
    format!("  ║ {}{} ║\n", text, " ".repeat(padding))
}

// ─── Terminal surface ───────────────────────────────────────────

/// Live panel on stdout, redrawn in place once the first frame is out.
pub struct TerminalSurface {
    title: String,
    time: String,
    weather: String,
    map_link: String,
    city_key: String,
    unit: Unit,
    drawn_lines: usize,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            time: String::new(),
            weather: String::new(),
            map_link: String::new(),
            city_key: String::new(),
            unit: Unit::default(),
            drawn_lines: 0,
        }
    }

    fn redraw(&mut self) {
        let panel = render_panel(
            &self.title,
            &self.time,
            &self.weather,
            &self.city_key,
            self.unit,
        );
        let map_line = format!("  map: {}", self.map_link);

        let mut stdout = io::stdout().lock();
        if self.drawn_lines > 0 {
            let _ = write!(stdout, "\u{1b}[{}A", self.drawn_lines);
        }
        let mut lines = 0;
        for line in panel.lines().chain(std::iter::once(map_line.as_str())) {
            let _ = writeln!(stdout, "\u{1b}[2K{}", line);
            lines += 1;
        }
        let _ = stdout.flush();
        self.drawn_lines = lines;
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for TerminalSurface {
    fn set_title(&mut self, label: &str) {
        self.title = label.to_string();
        self.redraw();
    }

    fn set_time(&mut self, text: &str) {
        self.time = text.to_string();
        self.redraw();
    }

    fn set_weather(&mut self, text: &str) {
        self.weather = text.to_string();
        self.redraw();
    }

    fn set_map(&mut self, view: &MapViewport) {
        self.map_link = view.link_url();
        self.redraw();
    }

    fn reflect_selection(&mut self, city_key: &str, unit: Unit) {
        self.city_key = city_key.to_string();
        self.unit = unit;
        self.redraw();
    }
}

// ─── Recording surface (tests) ──────────────────────────────────

/// Surface that records every update for assertions.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub titles: Vec<String>,
    pub times: Vec<String>,
    pub weather: Vec<String>,
    pub maps: Vec<MapViewport>,
    pub selections: Vec<(String, Unit)>,
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn set_title(&mut self, label: &str) {
        self.titles.push(label.to_string());
    }

    fn set_time(&mut self, text: &str) {
        self.times.push(text.to_string());
    }

    fn set_weather(&mut self, text: &str) {
        self.weather.push(text.to_string());
    }

    fn set_map(&mut self, view: &MapViewport) {
        self.maps.push(*view);
    }

    fn reflect_selection(&mut self, city_key: &str, unit: Unit) {
        self.selections.push((city_key.to_string(), unit));
    }
}
