//! Table rendering utilities for CLI outputs.

use super::formatting::{pad_right, truncate};

pub struct Column {
    pub header: String,
    pub width: usize,
}

impl Column {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub separator: String,
}

impl Table {
    pub fn new(columns: Vec<Column>, separator: &str) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            separator: separator.to_string(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn render_line(&self, cells: &[String]) -> String {
        let last = self.columns.len().saturating_sub(1);
        let mut parts = Vec::with_capacity(self.columns.len());

        for (i, col) in self.columns.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            // Last column is free-form (reasons) and never padded.
            if i == last {
                parts.push(cell.to_string());
            } else {
                parts.push(pad_right(&truncate(cell, col.width), col.width));
            }
        }
        parts.join(" | ")
    }

    /// Plain-text rendering (no ANSI), so widths stay exact.
    pub fn render(&self) -> String {
        let mut out = String::new();

        let headers: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
        out.push_str(&self.render_line(&headers));
        out.push('\n');

        let total: usize =
            self.columns.iter().map(|c| c.width).sum::<usize>() + 3 * self.columns.len();
        out.push_str(&self.separator.repeat(total.max(10)));
        out.push('\n');

        for row in &self.rows {
            out.push_str(&self.render_line(row));
            out.push('\n');
        }

        out
    }
}
