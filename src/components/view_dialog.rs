//! Record view dialog component
//!
//! Read-only overlay showing every schema field of one record, plus the
//! attached document descriptor and store timestamps when present.

use crate::action::Action;
use crate::component::Component;
use crate::model::column::CELL_PLACEHOLDER;
use crate::model::record::Record;
use crate::model::schema::FormSchema;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Record detail dialog
#[derive(Default)]
pub struct ViewDialog {
    pub scroll: usize,
}

impl Component for ViewDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('v') | KeyCode::Char('q') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::Char('e') => Some(Action::OpenEditForm),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ScrollDown => self.scroll = self.scroll.saturating_add(1),
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // This needs record data, so we use draw_with_record
        Ok(())
    }
}

impl ViewDialog {
    pub fn draw_with_record(
        &self,
        frame: &mut Frame,
        area: Rect,
        schema: &FormSchema,
        record: &Record,
    ) -> Result<()> {
        let margin = 4;
        let overlay_area = Rect::new(
            margin,
            margin,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin * 2),
        );

        frame.render_widget(Clear, overlay_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(overlay_area);

        let lines = detail_lines(schema, record);
        let visible_height = chunks[0].height.saturating_sub(2) as usize;
        let scroll = self.scroll.min(lines.len().saturating_sub(visible_height));

        let detail = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} #{} ", schema.category.singular(), record.id))
                    .title_style(
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .scroll((scroll as u16, 0));
        frame.render_widget(detail, chunks[0]);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(
                " Esc ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Close  "),
            Span::styled(
                " e ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Edit  "),
            Span::styled(
                " j/k ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Scroll"),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[1]);

        Ok(())
    }
}

/// Label: value lines for every schema field, then document and timestamps
fn detail_lines(schema: &FormSchema, record: &Record) -> Vec<Line<'static>> {
    let label_width = schema
        .fields
        .iter()
        .map(|f| f.label.len())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = Vec::new();
    for field in &schema.fields {
        let value = match record.get(field.key) {
            Some(v) if !v.trim().is_empty() => v.to_string(),
            _ => CELL_PLACEHOLDER.to_string(),
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:width$}  ", field.label, width = label_width),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(value),
        ]));
    }

    if let Some(doc) = record.document() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                "Attached document: ",
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(doc.name, Style::default().fg(Color::White)),
            Span::styled(format!(" ({})", doc.url), Style::default().fg(Color::DarkGray)),
        ]));
    }

    if record.created_at.is_some() || record.updated_at.is_some() {
        lines.push(Line::from(""));
        if let Some(created) = &record.created_at {
            lines.push(Line::from(Span::styled(
                format!("Created  {}", created),
                Style::default().fg(Color::DarkGray),
            )));
        }
        if let Some(updated) = &record.updated_at {
            lines.push(Line::from(Span::styled(
                format!("Updated  {}", updated),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schema::Category;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_detail_lines_cover_all_fields() {
        let schema = Category::Publications.schema();
        let mut record = Record::default();
        record.set("title", "A Study".to_string());

        let lines = detail_lines(&schema, &record);
        // One line per schema field, no document/timestamp extras
        assert_eq!(lines.len(), schema.fields.len());
    }

    #[test]
    fn test_detail_lines_include_document() {
        let schema = Category::Awards.schema();
        let mut record = Record::default();
        record.set("title", "Best Teacher".to_string());
        record.set("document_url", "https://docs.example.edu/a.pdf".to_string());

        let lines = detail_lines(&schema, &record);
        assert!(lines.len() > schema.fields.len());
    }

    #[test]
    fn test_escape_and_edit_keys() {
        let mut dialog = ViewDialog::default();
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::CloseModal)
        );
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Char('e'))).unwrap(),
            Some(Action::OpenEditForm)
        );
    }

    #[test]
    fn test_scroll_saturates_at_zero() {
        let mut dialog = ViewDialog::default();
        dialog.update(Action::ScrollUp).unwrap();
        assert_eq!(dialog.scroll, 0);
        dialog.update(Action::ScrollDown).unwrap();
        assert_eq!(dialog.scroll, 1);
    }
}
