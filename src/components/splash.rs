//! Splash screen component
//!
//! Displays the application banner briefly before transitioning to the
//! main app.

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

/// Splash screen component
pub struct SplashComponent {
    /// When the splash screen was shown
    start_time: Option<Instant>,
    /// Duration to show splash before auto-advancing
    duration: Duration,
}

impl Default for SplashComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl SplashComponent {
    pub fn new() -> Self {
        Self {
            start_time: None,
            duration: Duration::from_millis(1200),
        }
    }

    /// Check if splash duration has elapsed
    pub fn is_complete(&self) -> bool {
        self.start_time
            .map(|t| t.elapsed() >= self.duration)
            .unwrap_or(false)
    }

    fn banner() -> Vec<&'static str> {
        vec![
            "███████╗ ██╗ ███╗   ███╗ ███████╗",
            "██╔════╝ ██║ ████╗ ████║ ██╔════╝",
            "█████╗   ██║ ██╔████╔██║ ███████╗",
            "██╔══╝   ██║ ██║╚██╔╝██║ ╚════██║",
            "██║      ██║ ██║ ╚═╝ ██║ ███████║",
            "╚═╝      ╚═╝ ╚═╝     ╚═╝ ╚══════╝",
        ]
    }
}

impl Component for SplashComponent {
    fn init(&mut self) -> Result<()> {
        self.start_time = Some(Instant::now());
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Any key press skips the splash screen
        match key.code {
            KeyCode::Char('q') => Ok(Some(Action::ForceQuit)),
            _ => Ok(Some(Action::SplashComplete)),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action == Action::Tick && self.is_complete() {
            return Ok(Some(Action::SplashComplete));
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);
        frame.render_widget(
            Block::default().style(Style::default().bg(Color::Reset)),
            area,
        );

        let banner = Self::banner();
        let banner_height = banner.len() as u16;
        let banner_width = banner
            .first()
            .map(|l| l.chars().count())
            .unwrap_or(0) as u16;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length((area.height.saturating_sub(banner_height + 5)) / 2),
                Constraint::Length(banner_height),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let banner_lines: Vec<Line> = banner
            .iter()
            .map(|line| {
                Line::from(Span::styled(
                    *line,
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ))
            })
            .collect();

        let centered_x = (area.width.saturating_sub(banner_width)) / 2;
        let banner_rect = Rect::new(centered_x, chunks[1].y, banner_width, banner_height);
        frame.render_widget(Paragraph::new(banner_lines), banner_rect);

        let title = Line::from(Span::styled(
            "fims-tui",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
        let title_x = (area.width.saturating_sub(8)) / 2;
        frame.render_widget(
            Paragraph::new(title),
            Rect::new(title_x, chunks[3].y, 8, 1),
        );

        let subtitle = Line::from(Span::styled(
            "Faculty information management for the terminal",
            Style::default().fg(Color::DarkGray),
        ));
        let subtitle_width = 47;
        let subtitle_x = (area.width.saturating_sub(subtitle_width)) / 2;
        frame.render_widget(
            Paragraph::new(subtitle),
            Rect::new(subtitle_x, chunks[4].y, subtitle_width, 1),
        );

        Ok(())
    }
}
