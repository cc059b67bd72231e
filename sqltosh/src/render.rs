//! Table rendering for query results and the help screen.

use crate::catalog::{Catalog, Column};
use crate::metadata::{EntryType, FileRecord};
use colored::{Color, Colorize};

/// Presentation options fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    pub color: bool,
    pub header_color: Color,
}

impl RenderSettings {
    pub fn new(color: bool, header_color: &str) -> Self {
        Self {
            color,
            header_color: header_color.parse().unwrap_or(Color::Magenta),
        }
    }

    pub fn plain() -> Self {
        Self::new(false, "magenta")
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::new(true, "magenta")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxStyle {
    /// Full box-drawing border around every cell.
    Square,
    /// Only a rule under the header.
    SimpleHead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Plain,
    Directory,
    File,
    Other,
}

impl From<EntryType> for RowStyle {
    fn from(entry_type: EntryType) -> Self {
        match entry_type {
            EntryType::Directory => Self::Directory,
            EntryType::File => Self::File,
            EntryType::Unknown => Self::Other,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    title: Option<String>,
    style: BoxStyle,
    columns: Vec<(String, Align)>,
    rows: Vec<(Vec<String>, RowStyle)>,
}

impl Table {
    pub const fn new(style: BoxStyle) -> Self {
        Self {
            title: None,
            style,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn add_column(&mut self, header: impl Into<String>, align: Align) {
        self.columns.push((header.into(), align));
    }

    pub fn add_row(&mut self, cells: Vec<String>, style: RowStyle) {
        self.rows.push((cells, style));
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.columns.iter().map(|(h, _)| h.chars().count()).collect();
        for (cells, _) in &self.rows {
            for (i, cell) in cells.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
        widths
    }

    pub fn render(&self, settings: &RenderSettings) -> String {
        let widths = self.widths();
        let mut out = String::new();

        let table_width = match self.style {
            BoxStyle::Square => widths.iter().map(|w| w + 3).sum::<usize>() + 1,
            BoxStyle::SimpleHead => widths.iter().map(|w| w + 2).sum::<usize>(),
        };

        if let Some(ref title) = self.title {
            let title = format!("{title:^table_width$}");
            out.push_str(title.trim_end());
            out.push('\n');
        }

        let headers: Vec<String> = self.columns.iter().map(|(h, _)| h.clone()).collect();

        match self.style {
            BoxStyle::Square => {
                out.push_str(&rule(&widths, '┌', '┬', '┐'));
                out.push_str(&self.line(&headers, &widths, '│', |s| {
                    paint_header(s, settings)
                }));
                out.push_str(&rule(&widths, '├', '┼', '┤'));
                for (cells, style) in &self.rows {
                    out.push_str(&self.line(cells, &widths, '│', |s| paint_row(s, *style, settings)));
                }
                out.push_str(&rule(&widths, '└', '┴', '┘'));
            }
            BoxStyle::SimpleHead => {
                out.push_str(&self.line(&headers, &widths, ' ', |s| paint_header(s, settings)));
                out.push(' ');
                out.push_str(&"─".repeat(table_width.saturating_sub(1)));
                out.push('\n');
                for (cells, style) in &self.rows {
                    out.push_str(&self.line(cells, &widths, ' ', |s| paint_row(s, *style, settings)));
                }
            }
        }

        out
    }

    fn line<F>(&self, cells: &[String], widths: &[usize], border: char, paint: F) -> String
    where
        F: Fn(&str) -> String,
    {
        let mut out = String::new();
        out.push(border);
        for (i, width) in widths.iter().enumerate() {
            let cell = cells.get(i).map_or("", String::as_str);
            let padded = match self.columns[i].1 {
                Align::Left => format!("{cell:<width$}"),
                Align::Right => format!("{cell:>width$}"),
            };
            out.push(' ');
            out.push_str(&paint(&padded));
            out.push(' ');
            out.push(border);
        }
        if border == ' ' {
            let trimmed = out.trim_end().len();
            out.truncate(trimmed);
        }
        out.push('\n');
        out
    }
}

fn rule(widths: &[usize], left: char, mid: char, right: char) -> String {
    let mut out = String::new();
    out.push(left);
    for (i, width) in widths.iter().enumerate() {
        out.push_str(&"─".repeat(width + 2));
        out.push(if i == widths.len() - 1 { right } else { mid });
    }
    if widths.is_empty() {
        out.push(right);
    }
    out.push('\n');
    out
}

fn paint_header(text: &str, settings: &RenderSettings) -> String {
    if settings.color {
        text.color(settings.header_color).bold().to_string()
    } else {
        text.to_string()
    }
}

fn paint_row(text: &str, style: RowStyle, settings: &RenderSettings) -> String {
    if !settings.color {
        return text.to_string();
    }
    match style {
        RowStyle::Plain => text.to_string(),
        RowStyle::Directory => text.blue().bold().to_string(),
        RowStyle::File => text.green().bold().to_string(),
        RowStyle::Other => text.yellow().bold().to_string(),
    }
}

/// Builds the result table for a listing: an unlabeled 0-based ordinal
/// column followed by the projected columns.
pub fn listing_table(directory: &str, records: &[FileRecord], columns: &[Column]) -> Table {
    let mut table = Table::new(BoxStyle::Square).with_title(directory);
    table.add_column("", Align::Right);
    for column in columns {
        let align = if *column == Column::FileSize { Align::Right } else { Align::Left };
        table.add_column(column.header(), align);
    }

    for (index, record) in records.iter().enumerate() {
        let mut cells = Vec::with_capacity(columns.len() + 1);
        cells.push(index.to_string());
        cells.extend(columns.iter().map(|c| record.display(*c)));
        table.add_row(cells, record.entry_type.into());
    }

    table
}

pub fn summary_line(rows: usize) -> String {
    format!("{rows} rows in set (0.00 sec)")
}

/// The `help` screen.
pub fn help_table(catalog: &Catalog) -> Table {
    let mut table = Table::new(BoxStyle::SimpleHead);
    table.add_column("Commands", Align::Left);
    table.add_column("Description", Align::Left);
    for command in catalog.commands() {
        table.add_row(
            vec![command.as_str().to_string(), command.description().to_string()],
            RowStyle::Plain,
        );
    }
    table
}
