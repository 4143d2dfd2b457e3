//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use console::{measure_text_width, pad_str, Alignment};
use owo_colors::OwoColorize;
use tourism_core::Error;

/// Status message helpers
///
/// Status lines go to stderr so that stdout carries only results.
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        eprintln!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        eprintln!();
        eprintln!("{}", message.bold());
        eprintln!("{}", "─".repeat(measure_text_width(message)));
    }

    /// Print a coded error with its context and suggestion
    pub fn report(error: &Error) {
        Self::error(&format!("[{}] {}", error.code, error.message));
        if let Some(context) = &error.context {
            eprintln!("  {} {}", "context:".dimmed(), context);
        }
        if let Some(suggestion) = &error.suggestion {
            eprintln!("  {} {}", "hint:".cyan(), suggestion);
        }
    }
}

/// Format a distance in kilometers for display
///
/// Below one kilometer the value is shown in whole meters.
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0} m", km * 1000.0)
    } else if km < 10.0 {
        format!("{km:.2} km")
    } else {
        format!("{km:.1} km")
    }
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else {
        format!("{secs:.1}s")
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Plain text table with display-width aware columns
///
/// Place names carry diacritics, so widths are measured in terminal columns
/// rather than bytes.
pub struct Table {
    headers: Vec<String>,
    alignments: Vec<Alignment>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Table with the given left-aligned columns
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let alignments = vec![Alignment::Left; headers.len()];
        Self {
            headers,
            alignments,
            rows: Vec::new(),
        }
    }

    /// Right-align column `index`
    #[must_use]
    pub fn align_right(mut self, index: usize) -> Self {
        if let Some(alignment) = self.alignments.get_mut(index) {
            *alignment = Alignment::Right;
        }
        self
    }

    /// Append a row; missing cells render empty, extra cells are dropped
    pub fn push<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no rows were pushed
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render to a string, one line per row, header first
    pub fn render(&self) -> String {
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .map(|row| measure_text_width(&row[i]))
                    .chain(std::iter::once(measure_text_width(header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .zip(&self.alignments)
                .map(|((cell, width), alignment)| pad_str(cell, *width, *alignment, None).into_owned())
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = line(&self.headers);
        out.push('\n');
        out.push_str(&"─".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
        for row in &self.rows {
            out.push('\n');
            out.push_str(&line(row));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_distance_meters() {
        assert_eq!(format_distance(0.85), "850 m");
        assert_eq!(format_distance(0.0), "0 m");
    }

    #[test]
    fn test_format_distance_km() {
        assert_eq!(format_distance(2.0773), "2.08 km");
        assert_eq!(format_distance(12.34), "12.3 km");
    }

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
    }

    #[test]
    fn test_format_duration_secs() {
        assert_eq!(format_duration(Duration::from_secs_f32(5.5)), "5.5s");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, "place", "places"), "1 place");
        assert_eq!(format_count(0, "place", "places"), "0 places");
    }

    #[test]
    fn test_table_aligns_unicode() {
        let mut table = Table::new(["Name", "Distance"]).align_right(1);
        table.push(["Hồ Gươm", "2.08 km"]);
        table.push(["Phở Thìn", "850 m"]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Name      Distance");
        assert_eq!(lines[2], "Hồ Gươm    2.08 km");
        assert_eq!(lines[3], "Phở Thìn     850 m");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_table_pads_short_rows() {
        let mut table = Table::new(["a", "b", "c"]);
        table.push(["1"]);
        assert!(table.render().ends_with('1'));
    }
}
