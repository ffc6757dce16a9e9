//! Home component - Main application screen
//!
//! Displays category tabs, the record table for the active category, a
//! status bar, and a help bar. Owns the caller side of the table contract:
//! filtering by the search query and slicing the current page.

use crate::action::Action;
use crate::component::Component;
use crate::config::Config;
use crate::model::domain::DomainState;
use crate::model::pagination::Pagination;
use crate::model::record::Record;
use crate::model::schema::Category;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use super::record_table::{RecordTable, TableContext};
use super::calculate_main_layout;

/// Home component for the main application view
pub struct HomeComponent {
    /// Current active category tab
    pub active_category: Category,

    /// Pagination over the filtered record list
    pub pagination: Pagination,
}

impl Default for HomeComponent {
    fn default() -> Self {
        Self::new(10)
    }
}

impl HomeComponent {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            active_category: Category::Awards,
            pagination: Pagination::new(items_per_page),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Filtering & paging (the owner side of the table contract)
    // ─────────────────────────────────────────────────────────────────────────

    /// Records of the active category matching the search query
    pub fn filtered_records<'a>(&self, domain: &'a DomainState, query: &str) -> Vec<&'a Record> {
        domain
            .records_for(self.active_category)
            .iter()
            .filter(|r| r.matches_query(query))
            .collect()
    }

    /// The current page slice of the filtered records
    pub fn page_records<'a>(&self, domain: &'a DomainState, query: &str) -> Vec<&'a Record> {
        let filtered = self.filtered_records(domain, query);
        let range = self.pagination.page_range();
        filtered
            .into_iter()
            .skip(range.start)
            .take(range.len())
            .collect()
    }

    /// Re-derive pagination totals after data or query changes
    pub fn sync_pagination(&mut self, domain: &DomainState, query: &str) {
        let total = self.filtered_records(domain, query).len();
        self.pagination.set_total_items(total);
    }

    /// The record the table highlight currently points at
    pub fn selected_record<'a>(
        &self,
        domain: &'a DomainState,
        query: &str,
        selected_row: usize,
    ) -> Option<&'a Record> {
        self.page_records(domain, query).get(selected_row).copied()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    pub fn next_tab(&mut self) {
        let tabs = Category::all();
        let current = tabs
            .iter()
            .position(|c| *c == self.active_category)
            .unwrap_or(0);
        self.active_category = tabs[(current + 1) % tabs.len()];
        self.pagination.reset();
    }

    pub fn previous_tab(&mut self) {
        let tabs = Category::all();
        let current = tabs
            .iter()
            .position(|c| *c == self.active_category)
            .unwrap_or(0);
        self.active_category = tabs[(current + tabs.len() - 1) % tabs.len()];
        self.pagination.reset();
    }
}

impl Component for HomeComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Tab => Some(Action::NextTab),
            KeyCode::BackTab => Some(Action::PrevTab),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('x') => Some(Action::ExportCsv),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_home_screen which takes full context
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the home screen
pub struct HomeRenderContext<'a> {
    pub domain: &'a DomainState,
    pub config: &'a Config,
    pub loading: bool,
    pub error: Option<&'a str>,
    pub status_message: Option<&'a str>,
}

/// Draw the home screen
pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    home: &mut HomeComponent,
    table: &mut RecordTable,
    ctx: &HomeRenderContext,
) -> Result<()> {
    let layout = calculate_main_layout(area);

    render_tabs(frame, layout.tabs, home);

    let page = home.page_records(ctx.domain, &table.search_query);
    let page: Vec<Record> = page.into_iter().cloned().collect();
    let schema = home.active_category.schema();
    let total = home
        .filtered_records(ctx.domain, &table.search_query)
        .len();
    let title = format!("{} ({})", home.active_category.name(), total);

    let table_ctx = TableContext {
        title: &title,
        columns: &schema.columns,
        data: &page,
        loading: ctx.loading,
        empty_message: &ctx.config.empty_message,
        pagination: Some(&home.pagination),
    };
    table.draw_table(frame, layout.body, &table_ctx)?;

    render_status_bar(frame, layout.status, home, ctx);
    render_help_bar(frame, layout.help, table.search_mode);

    Ok(())
}

fn render_tabs(frame: &mut Frame, area: Rect, home: &HomeComponent) {
    let all_tabs = Category::all();
    let titles: Vec<&str> = all_tabs.iter().map(|c| c.name()).collect();
    let selected = all_tabs
        .iter()
        .position(|c| *c == home.active_category)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::BOTTOM))
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, home: &HomeComponent, ctx: &HomeRenderContext) {
    let mut spans = vec![];

    if let Some(profile) = &ctx.domain.profile {
        spans.push(Span::styled(
            format!(" {} ", profile.display_name()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        if !profile.department.is_empty() {
            spans.push(Span::styled(
                format!(" {} ", profile.department),
                Style::default().fg(Color::Cyan),
            ));
        }
        spans.push(Span::raw(" "));
    }

    spans.push(Span::styled(
        format!(
            "{}: {} record(s), {} total",
            home.active_category.name(),
            ctx.domain.records_for(home.active_category).len(),
            ctx.domain.total_records()
        ),
        Style::default().fg(Color::DarkGray),
    ));

    // Error message takes over the whole bar
    if let Some(error) = ctx.error {
        spans.clear();
        spans.push(Span::styled(
            format!(" Error: {} ", error),
            Style::default().fg(Color::Red),
        ));
    }

    if let Some(status) = ctx.status_message {
        spans.push(Span::styled(
            format!("  {} ", status),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, search_mode: bool) {
    let help_spans = if search_mode {
        vec![
            Span::styled(
                " Esc/Enter ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Done  "),
            Span::raw("Type to filter records"),
        ]
    } else {
        vec![
            Span::styled(
                " a ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Add "),
            Span::styled(
                " e ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Edit "),
            Span::styled(
                " d ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Delete "),
            Span::styled(
                " v ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("View "),
            Span::styled(
                " / ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Search "),
            Span::styled(
                " ←/→ ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Page "),
            Span::styled(
                " Tab ",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Category "),
            Span::styled(
                " x ",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Export "),
            Span::styled(
                " ? ",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Help "),
            Span::styled(
                " q ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Quit"),
        ]
    };

    let paragraph = Paragraph::new(Line::from(help_spans))
        .alignment(ratatui::layout::Alignment::Left)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn record(id: u64, pairs: &[(&str, &str)]) -> Record {
        Record::new(
            id,
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn domain_with_awards(count: usize) -> DomainState {
        let mut domain = DomainState::new();
        let entries = domain.records.entry(Category::Awards).or_default();
        for i in 0..count {
            let title = format!("Award {}", i + 1);
            entries.push(record(i as u64 + 1, &[("title", title.as_str())]));
        }
        domain
    }

    #[test]
    fn test_filtering_is_case_insensitive_substring() {
        let mut domain = DomainState::new();
        domain.records.entry(Category::Awards).or_default().extend([
            record(1, &[("title", "Best Teacher"), ("agency", "UGC")]),
            record(2, &[("title", "Young Scientist"), ("agency", "DST")]),
        ]);

        let home = HomeComponent::new(10);
        assert_eq!(home.filtered_records(&domain, "").len(), 2);
        assert_eq!(home.filtered_records(&domain, "ugc").len(), 1);
        assert_eq!(home.filtered_records(&domain, "SCIENT").len(), 1);
        assert_eq!(home.filtered_records(&domain, "nothing").len(), 0);
    }

    #[test]
    fn test_page_records_slices_filtered_set() {
        let domain = domain_with_awards(25);
        let mut home = HomeComponent::new(10);
        home.sync_pagination(&domain, "");

        assert_eq!(home.page_records(&domain, "").len(), 10);
        home.pagination.set_page(3);
        let last_page = home.page_records(&domain, "");
        assert_eq!(last_page.len(), 5);
        assert_eq!(last_page[0].get("title"), Some("Award 21"));
    }

    #[test]
    fn test_sync_pagination_reclamps_after_filter() {
        let domain = domain_with_awards(25);
        let mut home = HomeComponent::new(10);
        home.sync_pagination(&domain, "");
        home.pagination.set_page(3);

        // A narrow query shrinks the set; the page clamps back
        home.sync_pagination(&domain, "Award 25");
        assert_eq!(home.pagination.current_page, 1);
    }

    #[test]
    fn test_selected_record_follows_page() {
        let domain = domain_with_awards(15);
        let mut home = HomeComponent::new(10);
        home.sync_pagination(&domain, "");
        home.pagination.set_page(2);

        let selected = home.selected_record(&domain, "", 2).unwrap();
        assert_eq!(selected.get("title"), Some("Award 13"));
        assert!(home.selected_record(&domain, "", 9).is_none());
    }

    #[test]
    fn test_tab_cycling_wraps_and_resets_page() {
        let mut home = HomeComponent::new(10);
        home.pagination.total_items = 50;
        home.pagination.set_page(4);

        home.next_tab();
        assert_eq!(home.active_category, Category::Publications);
        assert_eq!(home.pagination.current_page, 1);

        home.previous_tab();
        home.previous_tab();
        assert_eq!(home.active_category, Category::TechnicalTalks);
    }
}
