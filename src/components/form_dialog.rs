//! Record form dialog component
//!
//! Modal add/edit form for one record. One input line per schema field;
//! submitting runs a full validation pass and only emits `SubmitForm`
//! when every field passes. Field errors show inline and are cleared the
//! moment the field's value changes.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::record::Record;
use crate::model::schema::FormSchema;
use crate::model::validation::FormErrors;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::collections::BTreeMap;

/// Record add/edit form dialog
#[derive(Default)]
pub struct FormDialog {
    /// Schema of the category being edited; set while the dialog is open
    pub schema: Option<FormSchema>,
    /// Record being edited; `None` in add mode
    pub record_id: Option<u64>,
    /// Current field values, keyed by field key
    pub values: BTreeMap<String, String>,
    /// Index of the focused field
    pub focus: usize,
    /// Validation state from the last submit attempt
    pub errors: FormErrors,
}

impl FormDialog {
    /// Open in add mode with blank values
    pub fn open_add(&mut self, schema: FormSchema) {
        self.values = schema
            .fields
            .iter()
            .map(|f| (f.key.to_string(), String::new()))
            .collect();
        self.schema = Some(schema);
        self.record_id = None;
        self.focus = 0;
        self.errors = FormErrors::new();
    }

    /// Open in edit mode, pre-filled from an existing record
    pub fn open_edit(&mut self, schema: FormSchema, record: &Record) {
        self.values = schema
            .fields
            .iter()
            .map(|f| {
                (
                    f.key.to_string(),
                    record.get(f.key).unwrap_or("").to_string(),
                )
            })
            .collect();
        self.schema = Some(schema);
        self.record_id = Some(record.id);
        self.focus = 0;
        self.errors = FormErrors::new();
    }

    pub fn close(&mut self) {
        self.schema = None;
        self.values.clear();
        self.errors = FormErrors::new();
    }

    pub fn is_open(&self) -> bool {
        self.schema.is_some()
    }

    fn field_count(&self) -> usize {
        self.schema.as_ref().map(|s| s.fields.len()).unwrap_or(0)
    }

    fn focused_key(&self) -> Option<&'static str> {
        self.schema
            .as_ref()
            .and_then(|s| s.fields.get(self.focus))
            .map(|f| f.key)
    }

    fn focus_next(&mut self) {
        let count = self.field_count();
        if count > 0 {
            self.focus = (self.focus + 1) % count;
        }
    }

    fn focus_prev(&mut self) {
        let count = self.field_count();
        if count > 0 {
            self.focus = (self.focus + count - 1) % count;
        }
    }

    /// Run the full validation pass; true means the form may be saved
    fn submit(&mut self) -> bool {
        match &self.schema {
            Some(schema) => self.errors.validate_form(&self.values, &schema.rule_set()),
            None => false,
        }
    }
}

impl Component for FormDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                None
            }
            KeyCode::Enter => {
                if self.submit() {
                    Some(Action::SubmitForm)
                } else {
                    None
                }
            }
            KeyCode::Backspace => {
                if let Some(field_key) = self.focused_key() {
                    if let Some(value) = self.values.get_mut(field_key) {
                        value.pop();
                    }
                    self.errors.clear_field(field_key);
                }
                None
            }
            KeyCode::Char(c) => {
                if let Some(field_key) = self.focused_key() {
                    self.values.entry(field_key.to_string()).or_default().push(c);
                    self.errors.clear_field(field_key);
                }
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let schema = match &self.schema {
            Some(s) => s,
            None => return Ok(()),
        };

        // One line per field, one extra per field error, notice and help
        let error_lines = schema
            .fields
            .iter()
            .filter(|f| self.errors.error(f.key).is_some())
            .count();
        let height = (schema.fields.len() + error_lines + 7) as u16;
        let popup_area = centered_popup(area, 64, height.min(area.height));

        frame.render_widget(Clear, popup_area);

        let title = match self.record_id {
            Some(_) => format!(" Edit {} ", schema.category.singular()),
            None => format!(" Add {} ", schema.category.singular()),
        };

        let mut lines = vec![Line::from("")];
        let label_width = schema
            .fields
            .iter()
            .map(|f| f.label.len())
            .max()
            .unwrap_or(0);

        for (i, field) in schema.fields.iter().enumerate() {
            let focused = i == self.focus;
            let value = self.values.get(field.key).map(String::as_str).unwrap_or("");

            let value_span = if focused {
                Span::styled(
                    format!("{}_", value),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(value.to_string(), Style::default().fg(Color::White))
            };

            lines.push(Line::from(vec![
                Span::styled(
                    format!(
                        " {} {:width$} ",
                        if focused { ">" } else { " " },
                        field.label,
                        width = label_width
                    ),
                    if focused {
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::Cyan)
                    },
                ),
                value_span,
            ]));

            if let Some(error) = self.errors.error(field.key) {
                lines.push(Line::from(Span::styled(
                    format!("   {:width$} {}", "", error, width = label_width),
                    Style::default().fg(Color::Red),
                )));
            }
        }

        lines.push(Line::from(""));
        if let Some(notice) = self.errors.notice() {
            lines.push(Line::from(Span::styled(
                format!(" {}", notice),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        } else {
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![
            Span::styled(
                " Enter ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Save  "),
            Span::styled(
                " Tab ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Next field  "),
            Span::styled(
                " Esc ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Cancel"),
        ]));

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                )
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(paragraph, popup_area);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schema::Category;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(dialog: &mut FormDialog, text: &str) {
        for c in text.chars() {
            dialog.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_open_add_starts_blank() {
        let mut dialog = FormDialog::default();
        dialog.open_add(Category::Awards.schema());
        assert!(dialog.is_open());
        assert!(dialog.record_id.is_none());
        assert_eq!(dialog.values.get("title").map(String::as_str), Some(""));
        assert_eq!(dialog.focus, 0);
    }

    #[test]
    fn test_open_edit_prefills_values() {
        let mut record = Record::default();
        record.id = 9;
        record.set("title", "Best Paper".to_string());
        record.set("year", "2021".to_string());

        let mut dialog = FormDialog::default();
        dialog.open_edit(Category::Awards.schema(), &record);
        assert_eq!(dialog.record_id, Some(9));
        assert_eq!(
            dialog.values.get("title").map(String::as_str),
            Some("Best Paper")
        );
        // Fields the record lacks still get an entry
        assert_eq!(dialog.values.get("agency").map(String::as_str), Some(""));
    }

    #[test]
    fn test_invalid_submit_blocks_and_sets_errors() {
        let mut dialog = FormDialog::default();
        dialog.open_add(Category::Awards.schema());

        let action = dialog.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(action, None);
        assert!(dialog.errors.error("title").is_some());
        assert!(dialog.errors.notice().is_some());
    }

    #[test]
    fn test_valid_submit_emits_submit_form() {
        let mut dialog = FormDialog::default();
        dialog.open_add(Category::Awards.schema());

        type_text(&mut dialog, "Best Teacher Award");
        dialog.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_text(&mut dialog, "UGC");
        dialog.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_text(&mut dialog, "2023");

        let action = dialog.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(action, Some(Action::SubmitForm));
        assert!(dialog.errors.is_empty());
    }

    #[test]
    fn test_typing_clears_field_error() {
        let mut dialog = FormDialog::default();
        dialog.open_add(Category::Awards.schema());

        dialog.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(dialog.errors.error("title").is_some());

        // First field is focused; one keystroke clears its error without
        // touching the others
        type_text(&mut dialog, "B");
        assert!(dialog.errors.error("title").is_none());
        assert!(dialog.errors.error("agency").is_some());
    }

    #[test]
    fn test_focus_wraps_both_directions() {
        let mut dialog = FormDialog::default();
        dialog.open_add(Category::JournalEditorials.schema());
        let count = dialog.field_count();

        dialog.handle_key_event(key(KeyCode::BackTab)).unwrap();
        assert_eq!(dialog.focus, count - 1);
        dialog.handle_key_event(key(KeyCode::Tab)).unwrap();
        assert_eq!(dialog.focus, 0);
    }

    #[test]
    fn test_escape_closes_without_saving() {
        let mut dialog = FormDialog::default();
        dialog.open_add(Category::Books.schema());
        let action = dialog.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert_eq!(action, Some(Action::CloseModal));
    }
}
