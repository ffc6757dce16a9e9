//! Faculty-profile wizard component
//!
//! Multi-step first-run flow that builds the faculty profile. Each step
//! validates its fields with the same engine the record forms use before
//! advancing.

use crate::action::Action;
use crate::component::Component;
use crate::model::profile::FacultyProfile;
use crate::model::schema::{profile_step_fields, ProfileStep};
use crate::model::validation::{FormErrors, RuleSet};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::collections::BTreeMap;

/// Faculty profile wizard component
pub struct ProfileWizard {
    /// Current step
    pub step: ProfileStep,
    /// Collected field values across all steps
    pub values: BTreeMap<String, String>,
    /// Focused field within the current step
    pub focus: usize,
    /// Validation state for the current step
    pub errors: FormErrors,
    /// Whether the wizard has finished
    pub complete: bool,
}

impl Default for ProfileWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileWizard {
    pub fn new() -> Self {
        Self {
            step: ProfileStep::Welcome,
            values: BTreeMap::new(),
            focus: 0,
            errors: FormErrors::new(),
            complete: false,
        }
    }

    /// Start pre-filled, e.g. when re-running the wizard over an existing
    /// profile
    pub fn with_profile(profile: &FacultyProfile) -> Self {
        let mut wizard = Self::new();
        wizard.values = profile.to_values();
        wizard
    }

    /// The profile once the wizard completed
    pub fn profile(&self) -> Option<FacultyProfile> {
        if self.complete {
            Some(FacultyProfile::from_values(&self.values))
        } else {
            None
        }
    }

    fn step_rule_set(&self) -> RuleSet {
        profile_step_fields(self.step)
            .iter()
            .fold(RuleSet::new(), |set, f| set.field(f.key, f.rules.clone()))
    }

    fn validate_current_step(&mut self) -> bool {
        let rule_set = self.step_rule_set();
        if rule_set.is_empty() {
            self.errors = FormErrors::new();
            return true;
        }
        self.errors.validate_form(&self.values, &rule_set)
    }

    fn advance_step(&mut self) {
        if !self.validate_current_step() {
            return;
        }
        if let Some(next) = self.step.next() {
            self.step = next;
            self.focus = 0;
            self.errors = FormErrors::new();
        } else {
            self.complete = true;
        }
    }

    fn go_back(&mut self) {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
            self.focus = 0;
            self.errors = FormErrors::new();
        }
    }

    fn focused_key(&self) -> Option<&'static str> {
        profile_step_fields(self.step)
            .get(self.focus)
            .map(|f| f.key)
    }

    fn focus_next(&mut self) {
        let count = profile_step_fields(self.step).len();
        if count > 0 {
            self.focus = (self.focus + 1) % count;
        }
    }

    fn focus_prev(&mut self) {
        let count = profile_step_fields(self.step).len();
        if count > 0 {
            self.focus = (self.focus + count - 1) % count;
        }
    }
}

impl Component for ProfileWizard {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.step {
            ProfileStep::Welcome => match key.code {
                KeyCode::Enter => {
                    self.advance_step();
                    Ok(None)
                }
                KeyCode::Esc => Ok(Some(Action::ForceQuit)),
                _ => Ok(None),
            },
            ProfileStep::Identity | ProfileStep::Position | ProfileStep::Workload => {
                match key.code {
                    KeyCode::Enter => {
                        self.advance_step();
                        Ok(None)
                    }
                    KeyCode::Esc => {
                        self.go_back();
                        Ok(None)
                    }
                    KeyCode::Tab | KeyCode::Down => {
                        self.focus_next();
                        Ok(None)
                    }
                    KeyCode::BackTab | KeyCode::Up => {
                        self.focus_prev();
                        Ok(None)
                    }
                    KeyCode::Backspace => {
                        if let Some(field_key) = self.focused_key() {
                            if let Some(value) = self.values.get_mut(field_key) {
                                value.pop();
                            }
                            self.errors.clear_field(field_key);
                        }
                        Ok(None)
                    }
                    KeyCode::Char(c) => {
                        if let Some(field_key) = self.focused_key() {
                            self.values.entry(field_key.to_string()).or_default().push(c);
                            self.errors.clear_field(field_key);
                        }
                        Ok(None)
                    }
                    _ => Ok(None),
                }
            }
            ProfileStep::Confirm => match key.code {
                KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.advance_step();
                    if self.complete {
                        Ok(Some(Action::ProfileComplete))
                    } else {
                        Ok(None)
                    }
                }
                KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Backspace => {
                    self.go_back();
                    Ok(None)
                }
                _ => Ok(None),
            },
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);
        let background = Block::default().style(Style::default().bg(Color::Reset));
        frame.render_widget(background, area);

        let margin = 4;
        let content_area = Rect::new(
            margin,
            margin,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin * 2),
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(2), // Progress
                Constraint::Min(10),   // Content
                Constraint::Length(3), // Help
            ])
            .split(content_area);

        let title = Paragraph::new(Line::from(Span::styled(
            " Faculty Profile Setup ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let progress = format!("Step {} of 5: {}", self.step.step_number(), self.step.title());
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                progress,
                Style::default().fg(Color::DarkGray),
            ))),
            chunks[1],
        );

        match self.step {
            ProfileStep::Welcome => self.draw_welcome(frame, chunks[2]),
            ProfileStep::Confirm => self.draw_confirm(frame, chunks[2]),
            _ => self.draw_fields(frame, chunks[2]),
        }

        let help_text = match self.step {
            ProfileStep::Welcome => " Enter  Continue   Esc  Quit",
            ProfileStep::Confirm => " Enter/y  Save & Continue   Esc/n  Go Back",
            _ => " Enter  Continue   Tab  Next field   Esc  Back",
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                help_text,
                Style::default().fg(Color::DarkGray),
            )))
            .block(Block::default().borders(Borders::ALL)),
            chunks[3],
        );

        Ok(())
    }
}

impl ProfileWizard {
    fn draw_welcome(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Welcome to fims-tui!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("This wizard sets up the faculty profile this installation"),
            Line::from("belongs to. Your records are stored locally and can be"),
            Line::from("exported to CSV at any time."),
            Line::from(""),
            Line::from("You will be asked for:"),
            Line::from(Span::styled(
                "  1. Your name and email",
                Style::default().fg(Color::Cyan),
            )),
            Line::from(Span::styled(
                "  2. Department, designation, and joining year",
                Style::default().fg(Color::Cyan),
            )),
            Line::from(Span::styled(
                "  3. Teaching load and weekly hours",
                Style::default().fg(Color::Cyan),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to begin...",
                Style::default().fg(Color::Yellow),
            )),
        ];

        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Welcome ")
                    .border_style(Style::default().fg(Color::Green)),
            ),
            area,
        );
    }

    fn draw_fields(&self, frame: &mut Frame, area: Rect) {
        let fields = profile_step_fields(self.step);
        let label_width = fields.iter().map(|f| f.label.len()).max().unwrap_or(0);

        let mut lines = vec![Line::from("")];
        for (i, field) in fields.iter().enumerate() {
            let focused = i == self.focus;
            let value = self.values.get(field.key).map(String::as_str).unwrap_or("");

            let value_text = if focused {
                format!("{}_", value)
            } else {
                value.to_string()
            };

            lines.push(Line::from(vec![
                Span::styled(
                    format!(
                        " {} {:width$}  ",
                        if focused { ">" } else { " " },
                        field.label,
                        width = label_width
                    ),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    value_text,
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(if focused { Modifier::BOLD } else { Modifier::empty() }),
                ),
            ]));

            if let Some(error) = self.errors.error(field.key) {
                lines.push(Line::from(Span::styled(
                    format!("   {:width$}  {}", "", error, width = label_width),
                    Style::default().fg(Color::Red),
                )));
            }
        }

        if let Some(notice) = self.errors.notice() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!(" {}", notice),
                Style::default().fg(Color::Red),
            )));
        }

        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", self.step.title()))
                    .border_style(Style::default().fg(Color::Cyan)),
            ),
            area,
        );
    }

    fn draw_confirm(&self, frame: &mut Frame, area: Rect) {
        let get = |key: &str| self.values.get(key).map(String::as_str).unwrap_or("-");

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Review your profile:",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Name:          ", Style::default().fg(Color::Cyan)),
                Span::raw(get("name").to_string()),
            ]),
            Line::from(vec![
                Span::styled("Email:         ", Style::default().fg(Color::Cyan)),
                Span::raw(get("email").to_string()),
            ]),
            Line::from(vec![
                Span::styled("Department:    ", Style::default().fg(Color::Cyan)),
                Span::raw(get("department").to_string()),
            ]),
            Line::from(vec![
                Span::styled("Designation:   ", Style::default().fg(Color::Cyan)),
                Span::raw(get("designation").to_string()),
            ]),
            Line::from(vec![
                Span::styled("Joining year:  ", Style::default().fg(Color::Cyan)),
                Span::raw(get("joining_year").to_string()),
            ]),
            Line::from(vec![
                Span::styled("Teaching load: ", Style::default().fg(Color::Cyan)),
                Span::raw(format!("{}%", get("teaching_load"))),
            ]),
            Line::from(vec![
                Span::styled("Weekly hours:  ", Style::default().fg(Color::Cyan)),
                Span::raw(get("weekly_hours").to_string()),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter or 'y' to save and continue...",
                Style::default().fg(Color::Yellow),
            )),
        ];

        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Confirm Profile ")
                    .border_style(Style::default().fg(Color::Green)),
            ),
            area,
        );
    }
}
