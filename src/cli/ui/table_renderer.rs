//! Fixed-width text tables for list, help and detail output.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub header: String,
    pub min_width: usize,
    pub max_width: Option<usize>,
    pub alignment: Alignment,
}

impl TableColumn {
    pub fn left(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            min_width: 0,
            max_width: None,
            alignment: Alignment::Left,
        }
    }

    pub fn right(header: impl Into<String>) -> Self {
        Self {
            alignment: Alignment::Right,
            ..Self::left(header)
        }
    }

    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }
}

pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
    pub show_headers: bool,
    pub rule: char,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            show_headers: true,
            rule: '─',
        }
    }

    /// Key/value layout without a header row.
    pub fn two_column(rows: Vec<(String, String)>) -> Self {
        let mut table = Self::new(vec![TableColumn::left(""), TableColumn::left("")]);
        table.show_headers = false;
        table.rows = rows.into_iter().map(|(k, v)| vec![k, v]).collect();
        table
    }

    pub fn with_rule(mut self, rule: char) -> Self {
        self.rule = rule;
        self
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let header = if self.show_headers {
                    width_of(&column.header)
                } else {
                    0
                };
                let widest = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| width_of(cell))
                    .fold(header.max(column.min_width), usize::max);
                column.max_width.map_or(widest, |max| widest.min(max))
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut lines = Vec::with_capacity(self.rows.len() + 2);

        if self.show_headers {
            let headers: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
            lines.push(self.render_row(&headers, &widths));
            let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
            lines.push(self.rule.to_string().repeat(total));
        }
        for row in &self.rows {
            lines.push(self.render_row(row, &widths));
        }
        lines.join("\n")
    }

    fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        self.columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (column, width))| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                pad(&fit(text, *width), *width, column.alignment)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }
}

fn width_of(text: &str) -> usize {
    text.chars().count()
}

fn fit(text: &str, width: usize) -> String {
    if width_of(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn pad(text: &str, width: usize, alignment: Alignment) -> String {
    let gap = width.saturating_sub(width_of(text));
    match alignment {
        Alignment::Left => format!("{text}{}", " ".repeat(gap)),
        Alignment::Right => format!("{}{text}", " ".repeat(gap)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headers_rule_and_aligned_cells() {
        let mut table = Table::new(vec![TableColumn::left("Name"), TableColumn::right("Amount")])
            .with_rule('-');
        table.push_row(vec!["Lunch".into(), "$12.50".into()]);
        table.push_row(vec!["Bus".into(), "$3.00".into()]);

        assert_eq!(
            table.render(),
            "Name   Amount\n-------------\nLunch  $12.50\nBus     $3.00"
        );
    }

    #[test]
    fn truncates_to_max_width() {
        let mut table = Table::new(vec![TableColumn::left("Name").max_width(6)]).with_rule('-');
        table.push_row(vec!["Groceries".into()]);
        assert_eq!(table.render(), "Name\n------\nGroce…");
    }

    #[test]
    fn two_column_layout_has_no_header() {
        let table = Table::two_column(vec![
            ("Budget".into(), "$200.00".into()),
            ("Spent".into(), "$50.00".into()),
        ]);
        assert_eq!(table.render(), "Budget  $200.00\nSpent   $50.00");
    }
}
