use colored::Color;

use crate::cli::{io, ui::style::UiStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// Declarative description of a table column.
#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: String,
    pub min_width: usize,
    pub align: Align,
}

impl TableColumn {
    pub fn new(header: impl Into<String>, min_width: usize) -> Self {
        Self {
            header: header.into(),
            min_width,
            align: Align::Left,
        }
    }

    pub fn right(mut self) -> Self {
        self.align = Align::Right;
        self
    }
}

#[derive(Debug, Clone)]
pub struct TableRow {
    pub cells: Vec<String>,
    pub tone: Option<Color>,
}

/// Simple table model used for rendering read-only overviews.
#[derive(Debug, Clone)]
pub struct Table {
    pub title: Option<String>,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn new<T: Into<String>>(title: Option<T>, columns: Vec<TableColumn>) -> Self {
        Self {
            title: title.map(|value| value.into()),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row<S: Into<String>>(&mut self, cells: Vec<S>) {
        self.add_toned_row(cells, None);
    }

    pub fn add_toned_row<S: Into<String>>(&mut self, cells: Vec<S>, tone: Option<Color>) {
        self.rows.push(TableRow {
            cells: cells.into_iter().map(|value| value.into()).collect(),
            tone,
        });
    }

    /// Column widths fitted to the widest cell, never below each column's minimum.
    pub fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.cells.get(idx))
                    .map(|cell| cell.chars().count())
                    .chain([column.header.chars().count(), column.min_width])
                    .max()
                    .unwrap_or(column.min_width)
            })
            .collect()
    }
}

/// Renders [`Table`] instances using padded columns.
pub struct TableRenderer;

impl TableRenderer {
    pub fn render(table: &Table, style: &UiStyle) {
        for line in Self::lines(table, style) {
            let _ = io::println_text(&line);
        }
    }

    pub fn lines(table: &Table, style: &UiStyle) -> Vec<String> {
        let widths = table.widths();
        let mut lines = Vec::new();

        if let Some(title) = &table.title {
            lines.push(style.apply_header_style(title));
        }

        if !table.columns.is_empty() {
            let total_width = widths.iter().map(|width| width + 1).sum::<usize>();
            let headers: Vec<&str> = table
                .columns
                .iter()
                .map(|column| column.header.as_str())
                .collect();
            lines.push(style.horizontal_line(total_width));
            lines.push(style.apply_header_style(&join_cells(&table.columns, &widths, &headers)));
            lines.push(style.horizontal_line(total_width));
        }

        for row in &table.rows {
            let cells: Vec<&str> = row.cells.iter().map(String::as_str).collect();
            let line = join_cells(&table.columns, &widths, &cells);
            lines.push(style.apply_tone(&line, row.tone));
        }
        lines
    }
}

fn join_cells(columns: &[TableColumn], widths: &[usize], cells: &[&str]) -> String {
    let mut line = String::new();
    for (idx, (column, width)) in columns.iter().zip(widths.iter().copied()).enumerate() {
        if idx > 0 {
            line.push(' ');
        }
        let cell = cells.get(idx).copied().unwrap_or("");
        match column.align {
            Align::Left => line.push_str(&format!("{cell:<width$}")),
            Align::Right => line.push_str(&format!("{cell:>width$}")),
        }
    }
    line.trim_end().to_string()
}
