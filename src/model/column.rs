//! Column definitions for the record table
//!
//! A column knows which record field it shows, its header label, an
//! optional width hint, and an optional render function. The table
//! component never inspects records beyond `ColumnDef::cell`.

use super::record::Record;

/// Placeholder shown for missing or empty cell values
pub const CELL_PLACEHOLDER: &str = "-";

/// Pure cell renderer: `(raw value, record) -> display text`
pub type CellRender = fn(&str, &Record) -> String;

/// Describes one table column
#[derive(Clone)]
pub struct ColumnDef {
    /// Field key looked up on each record
    pub key: &'static str,
    /// Header label
    pub title: &'static str,
    /// Width hint as a percentage of the table body; columns without a
    /// hint share the remaining width
    pub width: Option<u16>,
    pub render: Option<CellRender>,
}

impl ColumnDef {
    pub fn new(key: &'static str, title: &'static str) -> Self {
        Self {
            key,
            title,
            width: None,
            render: None,
        }
    }

    pub fn width(mut self, percent: u16) -> Self {
        self.width = Some(percent);
        self
    }

    pub fn render(mut self, f: CellRender) -> Self {
        self.render = Some(f);
        self
    }

    /// Display text for one cell.
    ///
    /// The renderer sees the raw value (empty string for a missing field);
    /// without a renderer, missing/empty values fall back to the
    /// placeholder dash.
    pub fn cell(&self, record: &Record) -> String {
        let raw = record.get(self.key).unwrap_or("");
        match self.render {
            Some(render) => render(raw, record),
            None if raw.trim().is_empty() => CELL_PLACEHOLDER.to_string(),
            None => raw.to_string(),
        }
    }
}

/// Column keys must be unique within one column set; display order is the
/// list order.
pub fn keys_are_unique(columns: &[ColumnDef]) -> bool {
    let mut seen = std::collections::HashSet::new();
    columns.iter().all(|c| seen.insert(c.key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn record(pairs: &[(&str, &str)]) -> Record {
        Record::new(
            7,
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_cell_raw_value() {
        let col = ColumnDef::new("title", "Title");
        let r = record(&[("title", "Best Paper Award")]);
        assert_eq!(col.cell(&r), "Best Paper Award");
    }

    #[test]
    fn test_cell_placeholder_for_missing_or_empty() {
        let col = ColumnDef::new("agency", "Agency");
        assert_eq!(col.cell(&record(&[])), CELL_PLACEHOLDER);
        assert_eq!(col.cell(&record(&[("agency", "  ")])), CELL_PLACEHOLDER);
    }

    #[test]
    fn test_cell_custom_render() {
        fn as_percent(raw: &str, _record: &Record) -> String {
            if raw.is_empty() {
                CELL_PLACEHOLDER.to_string()
            } else {
                format!("{}%", raw)
            }
        }
        let col = ColumnDef::new("load_share", "Load").render(as_percent);
        assert_eq!(col.cell(&record(&[("load_share", "40")])), "40%");
        assert_eq!(col.cell(&record(&[])), CELL_PLACEHOLDER);
    }

    #[test]
    fn test_render_sees_whole_record() {
        fn title_with_year(raw: &str, record: &Record) -> String {
            match record.get("year") {
                Some(year) if !year.is_empty() => format!("{} ({})", raw, year),
                _ => raw.to_string(),
            }
        }
        let col = ColumnDef::new("title", "Title").render(title_with_year);
        let r = record(&[("title", "Keynote"), ("year", "2023")]);
        assert_eq!(col.cell(&r), "Keynote (2023)");
    }

    #[test]
    fn test_unique_keys() {
        let cols = vec![ColumnDef::new("a", "A"), ColumnDef::new("b", "B")];
        assert!(keys_are_unique(&cols));
        let dup = vec![ColumnDef::new("a", "A"), ColumnDef::new("a", "B")];
        assert!(!keys_are_unique(&dup));
    }

    #[test]
    fn test_malformed_record_renders_placeholder() {
        // A record with none of the schema's fields renders a full row of
        // placeholders rather than failing
        let cols = vec![ColumnDef::new("title", "Title"), ColumnDef::new("year", "Year")];
        let r = Record::new(1, BTreeMap::new());
        let row: Vec<String> = cols.iter().map(|c| c.cell(&r)).collect();
        assert_eq!(row, vec![CELL_PLACEHOLDER, CELL_PLACEHOLDER]);
    }
}
