use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A plain-text table: optional centred title, header row, a rule of `=`
/// and one line per row. Columns are separated by a single space.
#[derive(Debug, Clone)]
pub struct Table {
    title: Option<String>,
    columns: Vec<(String, Align)>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: &[(&str, Align)]) -> Self {
        Self {
            title: None,
            columns: columns
                .iter()
                .map(|(name, align)| (name.to_string(), *align))
                .collect(),
            rows: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Missing trailing cells render blank; extra cells are dropped.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, (name, _))| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Total width of a rendered line.
    pub fn width(&self) -> usize {
        let widths = self.widths();
        widths.iter().sum::<usize>() + widths.len().saturating_sub(1)
    }

    fn render_line(&self, cells: &[String], widths: &[usize]) -> String {
        cells
            .iter()
            .zip(widths)
            .zip(&self.columns)
            .map(|((cell, width), (_, align))| match align {
                Align::Left => format!("{:<width$}", cell, width = width),
                Align::Right => format!("{:>width$}", cell, width = width),
            })
            .collect::<Vec<_>>()
            .join(" ")
            .trim_end()
            .to_string()
    }

    pub fn render(&self, use_colors: bool) -> Vec<String> {
        let widths = self.widths();
        let width = self.width();
        let mut lines = Vec::with_capacity(self.rows.len() + 3);

        if let Some(title) = &self.title {
            let line = center(title, width);
            lines.push(if use_colors {
                line.bold().to_string()
            } else {
                line
            });
        }

        let names: Vec<String> = self.columns.iter().map(|(name, _)| name.clone()).collect();
        let header = self.render_line(&names, &widths);
        lines.push(if use_colors {
            header.bold().to_string()
        } else {
            header
        });

        let rule = "=".repeat(width);
        lines.push(if use_colors {
            rule.dimmed().to_string()
        } else {
            rule
        });

        for row in &self.rows {
            lines.push(self.render_line(row, &widths));
        }
        lines
    }
}

/// Centre `text` in a field of `width` characters, trailing space trimmed.
pub fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let left = (width - len) / 2;
    format!("{}{}", " ".repeat(left), text)
}
