//! Record table component
//!
//! Renders a page of records as a table with a search box, row action
//! hints, and a pagination bar. The component owns no business data: the
//! caller hands it an already-filtered, already-paged slice plus column
//! definitions, and every interaction comes back out as an Action. Its
//! only internal state is the search text and the row highlight.

use crate::action::Action;
use crate::component::Component;
use crate::model::column::ColumnDef;
use crate::model::pagination::Pagination;
use crate::model::record::Record;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Which row/table actions the owner has wired up.
///
/// The actions column is rendered only when at least one row action is
/// enabled, and disabled actions never produce an Action from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableActions {
    pub can_add: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_view: bool,
    pub can_search: bool,
}

impl Default for TableActions {
    fn default() -> Self {
        Self::all()
    }
}

impl TableActions {
    pub fn all() -> Self {
        Self {
            can_add: true,
            can_edit: true,
            can_delete: true,
            can_view: true,
            can_search: true,
        }
    }

    pub fn none() -> Self {
        Self {
            can_add: false,
            can_edit: false,
            can_delete: false,
            can_view: false,
            can_search: false,
        }
    }

    /// True when the actions column should be shown
    pub fn has_row_action(&self) -> bool {
        self.can_edit || self.can_delete || self.can_view
    }

    /// Key hints for one row, one per enabled handler
    pub fn row_hints(&self) -> String {
        let mut hints = Vec::new();
        if self.can_view {
            hints.push("[v]");
        }
        if self.can_edit {
            hints.push("[e]");
        }
        if self.can_delete {
            hints.push("[d]");
        }
        hints.join(" ")
    }
}

/// Everything the owner supplies for one draw call
pub struct TableContext<'a> {
    pub title: &'a str,
    pub columns: &'a [ColumnDef],
    /// Already filtered and paged by the owner
    pub data: &'a [Record],
    pub loading: bool,
    pub empty_message: &'a str,
    pub pagination: Option<&'a Pagination>,
}

/// Record table component
pub struct RecordTable {
    pub actions: TableActions,
    /// Search box text
    pub search_query: String,
    /// Whether keystrokes go to the search box
    pub search_mode: bool,
    /// Highlighted row within the current page
    pub selected: usize,
}

impl Default for RecordTable {
    fn default() -> Self {
        Self::new(TableActions::all())
    }
}

impl RecordTable {
    pub fn new(actions: TableActions) -> Self {
        Self {
            actions,
            search_query: String::new(),
            search_mode: false,
            selected: 0,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────

    pub fn enter_search_mode(&mut self) {
        self.search_mode = true;
    }

    pub fn exit_search_mode(&mut self) {
        self.search_mode = false;
    }

    pub fn search_input(&mut self, c: char) {
        self.search_query.push(c);
        self.selected = 0;
    }

    pub fn search_backspace(&mut self) {
        self.search_query.pop();
        self.selected = 0;
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.selected = 0;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Row selection
    // ─────────────────────────────────────────────────────────────────────────

    pub fn select_next(&mut self, page_len: usize) {
        if page_len > 0 && self.selected + 1 < page_len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self, page_len: usize) {
        self.selected = page_len.saturating_sub(1);
    }

    /// Keep the highlight inside the current page after data changes
    pub fn clamp_selection(&mut self, page_len: usize) {
        if page_len == 0 {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(page_len - 1);
        }
    }
}

impl Component for RecordTable {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.search_mode {
            let action = match key.code {
                KeyCode::Esc | KeyCode::Enter => Some(Action::ExitSearchMode),
                KeyCode::Backspace => Some(Action::SearchBackspace),
                KeyCode::Char(c) => Some(Action::SearchInput(c)),
                _ => None,
            };
            return Ok(action);
        }

        let action = match key.code {
            // Navigation within the page
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstItem),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),

            // Pagination
            KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevPage),
            KeyCode::Char('l') | KeyCode::Right => Some(Action::NextPage),
            KeyCode::Char(c @ '1'..='9') => {
                Some(Action::GoToPage(c.to_digit(10).unwrap_or(1) as usize))
            }

            // Search
            KeyCode::Char('/') if self.actions.can_search => Some(Action::EnterSearchMode),

            // Row actions, gated on the wired-up handlers
            KeyCode::Char('a') if self.actions.can_add => Some(Action::OpenAddForm),
            KeyCode::Char('e') if self.actions.can_edit => Some(Action::OpenEditForm),
            KeyCode::Char('v') | KeyCode::Enter if self.actions.can_view => {
                Some(Action::OpenViewDialog)
            }
            KeyCode::Char('d') if self.actions.can_delete => Some(Action::OpenDeleteConfirm),

            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs caller-supplied data; see draw_table
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════════════

/// Header label for the appended actions column
const ACTIONS_TITLE: &str = "Actions";
/// Hard cap on one column's width
const MAX_COL_WIDTH: usize = 50;

impl RecordTable {
    /// Draw the table into `area` using caller-supplied context
    pub fn draw_table(&self, frame: &mut Frame, area: Rect, ctx: &TableContext) -> Result<()> {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", ctx.title))
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut constraints = vec![Constraint::Min(1)];
        if self.actions.can_search {
            constraints.insert(0, Constraint::Length(1));
        }
        let show_bar = ctx.pagination.is_some_and(|p| p.show_pagination);
        if show_bar {
            constraints.push(Constraint::Length(1));
        }
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        let mut chunk_idx = 0;
        if self.actions.can_search {
            self.render_search_box(frame, chunks[chunk_idx]);
            chunk_idx += 1;
        }

        let body = chunks[chunk_idx];
        if ctx.loading {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "Loading...",
                    Style::default().fg(Color::Yellow),
                ))),
                body,
            );
        } else if ctx.data.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    ctx.empty_message,
                    Style::default().fg(Color::DarkGray),
                ))),
                body,
            );
        } else {
            let lines = self.build_table_lines(ctx, body.width as usize);
            frame.render_widget(Paragraph::new(lines), body);
        }

        if show_bar {
            if let Some(pagination) = ctx.pagination {
                let bar = pagination_bar(pagination);
                frame.render_widget(Paragraph::new(bar), chunks[chunk_idx + 1]);
            }
        }

        Ok(())
    }

    fn render_search_box(&self, frame: &mut Frame, area: Rect) {
        let (prompt_style, text) = if self.search_mode {
            (
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                format!("{}_", self.search_query),
            )
        } else if self.search_query.is_empty() {
            (
                Style::default().fg(Color::DarkGray),
                "press / to search".to_string(),
            )
        } else {
            (Style::default().fg(Color::Cyan), self.search_query.clone())
        };

        let line = Line::from(vec![
            Span::styled("Search: ", prompt_style),
            Span::styled(text, Style::default().fg(Color::White)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    /// Build header, separator, and one line per record
    fn build_table_lines(&self, ctx: &TableContext, total_width: usize) -> Vec<Line<'static>> {
        let widths = column_widths(ctx.columns, &self.actions, total_width, ctx.data);
        let mut lines = Vec::with_capacity(ctx.data.len() + 2);

        // Header
        let mut titles: Vec<String> = ctx.columns.iter().map(|c| c.title.to_string()).collect();
        if self.actions.has_row_action() {
            titles.push(ACTIONS_TITLE.to_string());
        }
        let header_spans: Vec<Span> = titles
            .iter()
            .enumerate()
            .flat_map(|(i, title)| {
                vec![
                    Span::styled(
                        pad_cell(title, widths[i]),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" │ "),
                ]
            })
            .collect();
        lines.push(Line::from(header_spans));

        // Separator
        let separator: String = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        lines.push(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        )));

        // Rows
        for (row_idx, record) in ctx.data.iter().enumerate() {
            let mut cells = build_row(ctx.columns, record);
            if self.actions.has_row_action() {
                cells.push(self.actions.row_hints());
            }

            let row_style = if row_idx == self.selected {
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let row_spans: Vec<Span> = cells
                .iter()
                .enumerate()
                .flat_map(|(i, cell)| {
                    vec![
                        Span::styled(pad_cell(cell, widths[i]), row_style),
                        Span::raw(" │ "),
                    ]
                })
                .collect();
            lines.push(Line::from(row_spans));
        }

        lines
    }
}

/// Cells for one record row, in column order
pub fn build_row(columns: &[ColumnDef], record: &Record) -> Vec<String> {
    columns.iter().map(|c| c.cell(record)).collect()
}

/// `Showing X to Y of Z entries` for the current page
pub fn range_label(pagination: &Pagination) -> String {
    format!(
        "Showing {} to {} of {} entries",
        pagination.first_item(),
        pagination.last_item(),
        pagination.total_items
    )
}

/// One span per pagination control: Previous, the numbered pages, Next
fn pagination_bar(pagination: &Pagination) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    let active = Style::default().fg(Color::Cyan);
    let current = Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled(range_label(pagination), Style::default().fg(Color::DarkGray)),
        Span::raw("   "),
        Span::styled(
            "◀ Prev",
            if pagination.on_first_page() { dim } else { active },
        ),
        Span::raw(" "),
    ];

    for page in 1..=pagination.total_pages() {
        spans.push(Span::styled(
            format!(" {} ", page),
            if page == pagination.current_page {
                current
            } else {
                active
            },
        ));
    }

    spans.push(Span::raw(" "));
    spans.push(Span::styled(
        "Next ▶",
        if pagination.on_last_page() { dim } else { active },
    ));

    Line::from(spans)
}

/// Pad or truncate a cell to the display width
fn pad_cell(text: &str, width: usize) -> String {
    let text_width = UnicodeWidthStr::width(text);
    if text_width <= width {
        let padding = width - text_width;
        format!("{}{}", text, " ".repeat(padding))
    } else {
        let mut out = String::new();
        let mut used = 0;
        for c in text.chars() {
            let w = UnicodeWidthStr::width(c.to_string().as_str());
            if used + w + 3 > width {
                break;
            }
            used += w;
            out.push(c);
        }
        format!("{}...{}", out, " ".repeat(width.saturating_sub(used + 3)))
    }
}

/// Column display widths for the available area.
///
/// Hinted columns take their percentage of the body; unhinted columns share
/// the remainder sized by content, capped at `MAX_COL_WIDTH`.
fn column_widths(
    columns: &[ColumnDef],
    actions: &TableActions,
    total_width: usize,
    data: &[Record],
) -> Vec<usize> {
    let action_width = if actions.has_row_action() {
        UnicodeWidthStr::width(actions.row_hints().as_str()).max(ACTIONS_TITLE.len())
    } else {
        0
    };

    // Separators between cells plus the actions column
    let overhead = columns.len() * 3 + action_width;
    let body_width = total_width.saturating_sub(overhead).max(columns.len() * 4);

    let mut widths: Vec<usize> = columns
        .iter()
        .map(|col| match col.width {
            Some(pct) => (body_width * pct as usize / 100).max(4),
            None => {
                let content = data
                    .iter()
                    .map(|r| UnicodeWidthStr::width(col.cell(r).as_str()))
                    .max()
                    .unwrap_or(0);
                content.max(UnicodeWidthStr::width(col.title)).max(4)
            }
        })
        .map(|w| w.min(MAX_COL_WIDTH))
        .collect();

    if actions.has_row_action() {
        widths.push(action_width);
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use std::collections::BTreeMap;

    fn record(pairs: &[(&str, &str)]) -> Record {
        Record::new(
            1,
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_scenario_showing_11_to_20_of_42() {
        let mut p = Pagination::new(10);
        p.total_items = 42;
        p.set_page(2);
        assert_eq!(range_label(&p), "Showing 11 to 20 of 42 entries");
        assert!(!p.on_first_page());
        assert!(!p.on_last_page());
    }

    #[test]
    fn test_range_label_empty_data() {
        let p = Pagination::new(10);
        assert_eq!(range_label(&p), "Showing 0 to 0 of 0 entries");
    }

    #[test]
    fn test_actions_column_only_with_row_actions() {
        assert!(TableActions::all().has_row_action());
        assert!(!TableActions::none().has_row_action());

        let view_only = TableActions {
            can_view: true,
            ..TableActions::none()
        };
        assert!(view_only.has_row_action());
        assert_eq!(view_only.row_hints(), "[v]");
        assert_eq!(TableActions::all().row_hints(), "[v] [e] [d]");
    }

    #[test]
    fn test_disabled_actions_emit_nothing() {
        let mut table = RecordTable::new(TableActions::none());
        assert_eq!(table.handle_key_event(key(KeyCode::Char('a'))).unwrap(), None);
        assert_eq!(table.handle_key_event(key(KeyCode::Char('e'))).unwrap(), None);
        assert_eq!(table.handle_key_event(key(KeyCode::Char('d'))).unwrap(), None);
        assert_eq!(table.handle_key_event(key(KeyCode::Char('/'))).unwrap(), None);

        let mut table = RecordTable::new(TableActions::all());
        assert_eq!(
            table.handle_key_event(key(KeyCode::Char('a'))).unwrap(),
            Some(Action::OpenAddForm)
        );
        assert_eq!(
            table.handle_key_event(key(KeyCode::Char('/'))).unwrap(),
            Some(Action::EnterSearchMode)
        );
    }

    #[test]
    fn test_search_mode_reports_every_keystroke() {
        let mut table = RecordTable::default();
        table.enter_search_mode();
        assert_eq!(
            table.handle_key_event(key(KeyCode::Char('d'))).unwrap(),
            Some(Action::SearchInput('d'))
        );
        assert_eq!(
            table.handle_key_event(key(KeyCode::Backspace)).unwrap(),
            Some(Action::SearchBackspace)
        );
        assert_eq!(
            table.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::ExitSearchMode)
        );
    }

    #[test]
    fn test_search_input_resets_selection() {
        let mut table = RecordTable::default();
        table.selected = 3;
        table.search_input('x');
        assert_eq!(table.search_query, "x");
        assert_eq!(table.selected, 0);
        table.search_backspace();
        assert_eq!(table.search_query, "");
    }

    #[test]
    fn test_selection_stays_in_page_bounds() {
        let mut table = RecordTable::default();
        table.select_next(3);
        table.select_next(3);
        table.select_next(3);
        assert_eq!(table.selected, 2);
        table.select_prev();
        assert_eq!(table.selected, 1);
        table.select_last(3);
        assert_eq!(table.selected, 2);
        table.clamp_selection(1);
        assert_eq!(table.selected, 0);
        table.clamp_selection(0);
        assert_eq!(table.selected, 0);
    }

    #[test]
    fn test_build_row_uses_placeholder_for_missing() {
        let columns = vec![
            ColumnDef::new("title", "Title"),
            ColumnDef::new("year", "Year"),
        ];
        let row = build_row(&columns, &record(&[("title", "Keynote")]));
        assert_eq!(row, vec!["Keynote".to_string(), "-".to_string()]);
    }

    #[test]
    fn test_pad_cell_truncates_wide_content() {
        assert_eq!(pad_cell("abc", 5), "abc  ");
        let truncated = pad_cell("a very long cell value", 10);
        assert_eq!(UnicodeWidthStr::width(truncated.as_str()), 10);
        assert!(truncated.contains("..."));
    }

    #[test]
    fn test_column_widths_include_actions_column() {
        let columns = vec![
            ColumnDef::new("title", "Title").width(60),
            ColumnDef::new("year", "Year").width(40),
        ];
        let with_actions = column_widths(&columns, &TableActions::all(), 80, &[]);
        assert_eq!(with_actions.len(), 3);

        let without = column_widths(&columns, &TableActions::none(), 80, &[]);
        assert_eq!(without.len(), 2);
    }

    #[test]
    fn test_digit_keys_request_pages() {
        let mut table = RecordTable::default();
        assert_eq!(
            table.handle_key_event(key(KeyCode::Char('3'))).unwrap(),
            Some(Action::GoToPage(3))
        );
    }

    fn render_to_text(table: &RecordTable, ctx: &TableContext) -> String {
        use ratatui::{backend::TestBackend, Terminal};
        let backend = TestBackend::new(70, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                table.draw_table(frame, frame.area(), ctx).unwrap();
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_empty_data_renders_empty_message_and_no_rows() {
        let table = RecordTable::default();
        let columns = vec![ColumnDef::new("title", "Title").width(100)];
        let pagination = Pagination::new(10);

        let text = render_to_text(
            &table,
            &TableContext {
                title: "Awards (0)",
                columns: &columns,
                data: &[],
                loading: false,
                empty_message: "No records found",
                pagination: Some(&pagination),
            },
        );
        assert!(text.contains("No records found"));
        assert!(text.contains("Showing 0 to 0 of 0 entries"));
        assert!(!text.contains("Title"));
    }

    #[test]
    fn test_loading_state_replaces_table() {
        let table = RecordTable::default();
        let columns = vec![ColumnDef::new("title", "Title").width(100)];
        let data = vec![record(&[("title", "Hidden while loading")])];

        let text = render_to_text(
            &table,
            &TableContext {
                title: "Awards (1)",
                columns: &columns,
                data: &data,
                loading: true,
                empty_message: "No records found",
                pagination: None,
            },
        );
        assert!(text.contains("Loading..."));
        assert!(!text.contains("Hidden while loading"));
    }

    #[test]
    fn test_rows_render_with_actions_column() {
        let table = RecordTable::default();
        let columns = vec![
            ColumnDef::new("title", "Title").width(60),
            ColumnDef::new("year", "Year").width(40),
        ];
        let data = vec![record(&[("title", "Best Paper"), ("year", "2023")])];
        let mut pagination = Pagination::new(10);
        pagination.set_total_items(1);

        let text = render_to_text(
            &table,
            &TableContext {
                title: "Awards (1)",
                columns: &columns,
                data: &data,
                loading: false,
                empty_message: "No records found",
                pagination: Some(&pagination),
            },
        );
        assert!(text.contains("Best Paper"));
        assert!(text.contains("Actions"));
        assert!(text.contains("[v] [e] [d]"));
        assert!(text.contains("Showing 1 to 1 of 1 entries"));
    }
}
