//! Delete confirmation dialog component

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::record::Record;
use crate::model::schema::FormSchema;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Delete confirmation dialog; the pending target lives in the modal stack
#[derive(Default)]
pub struct DeleteDialog;

impl Component for DeleteDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            // The app resolves confirmation against the modal's target
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => None,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // This needs record data, so we use draw_with_record
        Ok(())
    }
}

impl DeleteDialog {
    /// Whether a key press confirms the deletion
    pub fn confirms(key: &KeyEvent) -> bool {
        matches!(
            key.code,
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter
        )
    }

    pub fn draw_with_record(
        &self,
        frame: &mut Frame,
        area: Rect,
        schema: &FormSchema,
        record: &Record,
    ) -> Result<()> {
        let popup_area = centered_popup(area, 50, 8);
        frame.render_widget(Clear, popup_area);

        // Lead with the first column's value so the user sees what dies
        let summary = schema
            .columns
            .first()
            .map(|c| c.cell(record))
            .unwrap_or_else(|| format!("record #{}", record.id));

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Delete this {}?", schema.category.singular().to_lowercase()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                summary,
                Style::default().fg(Color::Cyan),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " y ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw("Yes, delete  "),
                Span::styled(
                    " n/Esc ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("No, keep it"),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Delete? ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            )
            .alignment(ratatui::layout::Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_confirm_keys() {
        assert!(DeleteDialog::confirms(&key(KeyCode::Char('y'))));
        assert!(DeleteDialog::confirms(&key(KeyCode::Enter)));
        assert!(!DeleteDialog::confirms(&key(KeyCode::Char('n'))));
        assert!(!DeleteDialog::confirms(&key(KeyCode::Esc)));
    }

    #[test]
    fn test_decline_closes_modal() {
        let mut dialog = DeleteDialog;
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::CloseModal)
        );
        assert_eq!(dialog.handle_key_event(key(KeyCode::Char('y'))).unwrap(), None);
    }
}
