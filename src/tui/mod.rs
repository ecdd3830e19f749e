//! Ratatui-based terminal UI.
//!
//! The TUI shows the six-field profile form on the left and the estimate on the
//! right. Prediction failures are shown in the status line; they never end the
//! session. `?` swaps the body for the "About This Prediction" page.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::pipeline::{Estimate, run_estimate};
use crate::breakdown::ILLUSTRATIVE_NOTICE;
use crate::error::{AppError, RETRY_HINT};
use crate::report::{ABOUT_SECTIONS, ESTIMATE_DISCLAIMER, format_currency};
use crate::service::PredictionService;

pub mod form;

use form::{Field, ProfileForm};

/// Start the TUI.
pub fn run(service: PredictionService) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(1, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(service);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(1, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(1, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    service: PredictionService,
    model_label: String,
    form: ProfileForm,
    estimate: Option<Estimate>,
    status: String,
    error: bool,
    show_about: bool,
}

impl App {
    fn new(service: PredictionService) -> Self {
        let (model_label, status, error) = match service.model_info() {
            Ok(info) => (
                format!("{} ({})", info.name, info.kind),
                "Complete your profile and press Enter to calculate.".to_string(),
                false,
            ),
            Err(err) => ("-".to_string(), err.user_message(), true),
        };
        Self {
            service,
            model_label,
            form: ProfileForm::default(),
            estimate: None,
            status,
            error,
            show_about: false,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(1, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(1, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(1, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.show_about {
            match code {
                KeyCode::Char('q') => return true,
                KeyCode::Char('?') | KeyCode::Esc | KeyCode::Enter => self.show_about = false,
                _ => {}
            }
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('?') => self.show_about = true,
            KeyCode::Up => self.form.select_prev(),
            KeyCode::Down | KeyCode::Tab => self.form.select_next(),
            KeyCode::Left => self.edit(-1),
            KeyCode::Right => self.edit(1),
            KeyCode::Enter | KeyCode::Char('c') => self.calculate(),
            KeyCode::Char('r') => {
                self.form = ProfileForm::default();
                self.estimate = None;
                self.set_status("Form reset.", false);
            }
            _ => {}
        }
        false
    }

    fn edit(&mut self, delta: i32) {
        self.form.adjust(delta);
        if self.estimate.take().is_some() {
            self.set_status("Profile changed. Press Enter to recalculate.", false);
        }
    }

    fn calculate(&mut self) {
        match run_estimate(&self.service, &self.form.profile, true) {
            Ok(estimate) => {
                self.set_status(
                    format!("Estimated {}", format_currency(estimate.prediction.annual_cost)),
                    false,
                );
                self.estimate = Some(estimate);
            }
            Err(err) => {
                tracing::warn!(error = %err, "prediction failed");
                self.estimate = None;
                self.set_status(format!("{} {RETRY_HINT}", err.user_message()), true);
            }
        }
    }

    fn set_status(&mut self, status: impl Into<String>, error: bool) {
        self.status = status.into();
        self.error = error;
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        if self.show_about {
            self.draw_about(frame, chunks[1]);
        } else {
            self.draw_body(frame, chunks[1]);
        }
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(vec![
                Span::styled("medinsure", Style::default().fg(Color::Cyan)),
                Span::raw(" - insurance cost estimator"),
            ]),
            Line::from(Span::styled(
                format!("model: {}", self.model_label),
                Style::default().fg(Color::Gray),
            )),
        ];
        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        self.draw_form(frame, chunks[0]);
        self.draw_result(frame, chunks[1]);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = Field::ALL
            .iter()
            .map(|&f| ListItem::new(format!("{:<11} {}", f.label(), self.form.value_text(f))))
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Your Profile").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.form.selected()));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_result(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Estimate").borders(Borders::ALL);

        let Some(estimate) = &self.estimate else {
            let msg = Paragraph::new("Your estimate awaits.\n\nPress Enter to calculate.")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow))
                .block(block);
            frame.render_widget(msg, area);
            return;
        };

        let mut lines = vec![
            Line::from(Span::raw("Your estimated annual cost")),
            Line::from(Span::styled(
                format_currency(estimate.prediction.annual_cost),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        if let Some(breakdown) = &estimate.breakdown {
            lines.push(Line::from(Span::styled(
                "Cost factors breakdown",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                ILLUSTRATIVE_NOTICE,
                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            )));
            for f in &breakdown.factors {
                lines.push(Line::from(format!(
                    "  {:<11} {:>11}",
                    f.factor.display_name(),
                    format_currency(f.impact)
                )));
            }
        }

        let p = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(p, area);
    }

    fn draw_about(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines = Vec::new();
        for (heading, items) in ABOUT_SECTIONS {
            lines.push(Line::from(Span::styled(
                heading,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
            for item in items {
                lines.push(Line::from(format!("  • {item}")));
            }
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            ESTIMATE_DISCLAIMER,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        )));

        let p = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .block(Block::default().title("About This Prediction").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = if self.show_about {
            "? / Esc back  q quit"
        } else {
            "↑/↓ select  ←/→ adjust  Enter calculate  r reset  ? about  q quit"
        };
        let status_color = if self.error { Color::Red } else { Color::Yellow };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(status_color)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    #[test]
    fn unavailable_model_is_reported_not_fatal() {
        let mut app = App::new(PredictionService::unavailable("artifact missing"));
        assert!(app.error);
        app.calculate();
        assert!(app.estimate.is_none());
        assert!(app.status.contains("model unavailable"), "{}", app.status);
        assert!(!app.handle_key(KeyCode::Enter));
    }

    #[test]
    fn renders_placeholder_before_calculation() {
        let mut app = App::new(PredictionService::unavailable("artifact missing"));
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Your Profile"));
        assert!(text.contains("Your estimate awaits."));
    }

    fn screen_text(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn question_mark_toggles_about_page() {
        let mut app = App::new(PredictionService::unavailable("artifact missing"));
        assert!(!app.handle_key(KeyCode::Char('?')));
        let text = screen_text(&mut app);
        assert!(text.contains("About This Prediction"));
        assert!(text.contains("Tips to reduce costs"));
        assert!(text.contains(ESTIMATE_DISCLAIMER));
        assert!(!text.contains("Your Profile"));

        // Esc leaves the page instead of quitting.
        assert!(!app.handle_key(KeyCode::Esc));
        let text = screen_text(&mut app);
        assert!(text.contains("Your Profile"));
        assert!(!text.contains("Tips to reduce costs"));
    }

    #[test]
    fn quit_keys() {
        let mut app = App::new(PredictionService::unavailable("x"));
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.handle_key(KeyCode::Esc));
    }
}
