// SPDX-License-Identifier: GPL-3.0-only

//! Terminal display surface
//!
//! Renders the controller's [`View`] with ratatui and maps key presses back
//! to the view's action messages. Permission prompts from the providers are
//! shown as a modal dialog, standing in for the OS permission sheet.

use crate::app::{AppModel, AppRuntime, Message, Screen, View};
use crate::backends::{PermissionPrompt, PermissionPrompter, PermissionResponse};
use crate::config::Config;
use crate::constants::UI_POLL_INTERVAL;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};
use std::io::{self, stdout};
use tokio::sync::mpsc;
use tracing::{debug, info};

const ACCENT: Color = Color::Rgb(0x00, 0x79, 0x6B);
const BUTTON: Color = Color::Rgb(0x4D, 0xB6, 0xAC);
const TEXT: Color = Color::Rgb(0x00, 0x4D, 0x40);

/// Run the terminal UI
pub fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let (prompter, prompts) = PermissionPrompter::channel();
    let mut app = AppRuntime::new(AppModel::from_config(&config, prompter));

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, prompts);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    drop(app);
    runtime.shutdown_background();
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppRuntime,
    mut prompts: mpsc::UnboundedReceiver<PermissionPrompt>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut dialog: Option<PermissionPrompt> = None;

    loop {
        app.pump();

        if dialog.as_ref().is_some_and(PermissionPrompt::is_abandoned) {
            debug!("Closing permission dialog of a cancelled request");
            dialog = None;
        }
        if dialog.is_none() {
            dialog = prompts.try_recv().ok();
        }

        let view = app.model().view();
        terminal.draw(|f| draw(f, &view, dialog.as_ref()))?;

        if event::poll(UI_POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            // Ctrl+C to quit
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }

            // The dialog is modal
            if let Some(prompt) = dialog.take() {
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                        prompt.respond(PermissionResponse::Granted)
                    }
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                        prompt.respond(PermissionResponse::Denied)
                    }
                    _ => dialog = Some(prompt),
                }
                continue;
            }

            match key.code {
                KeyCode::Char('q') => break,
                KeyCode::Esc if view.screen != Screen::Home => {
                    app.dispatch(Message::Navigate(Screen::Home));
                }
                KeyCode::Char(c) => {
                    if let Some(action) = view.action_for_key(c) {
                        debug!(key = %c, label = action.label, "Action triggered");
                        app.dispatch(action.message.clone());
                    }
                }
                _ => {}
            }
        }
    }

    info!("Terminal UI closed");
    Ok(())
}

fn draw(f: &mut Frame, view: &View, dialog: Option<&PermissionPrompt>) {
    let [title_area, body_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    let title = Paragraph::new(view.title.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .block(Block::bordered().border_style(Style::default().fg(BUTTON)));
    f.render_widget(title, title_area);

    let mut lines: Vec<String> = view.body.clone();
    if !view.actions.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.extend(
            view.actions
                .iter()
                .map(|action| format!("[{}] {}", action.key, action.label)),
        );
    }
    let body = Paragraph::new(lines.join("\n"))
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT))
        .wrap(Wrap { trim: false });
    f.render_widget(body, body_area);

    let message = match &view.status {
        Some(status) => format!("{} | 'q' quit", status),
        None => "'q' quit".to_string(),
    };
    f.render_widget(StatusBar { message: &message }, status_area);

    if let Some(prompt) = dialog {
        let area = centered_rect(f.area(), 50, 5);
        f.render_widget(Clear, area);
        let text = format!("{}\n\n[y] Allow   [n] Deny", prompt.message());
        let dialog = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .title(" Permission ")
                    .border_style(Style::default().fg(ACCENT)),
            );
        f.render_widget(dialog, area);
    }
}

/// A `width`×`height` rectangle centered in `area`, clamped to fit
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Status bar widget
struct StatusBar<'a> {
    message: &'a str,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(Color::White).bg(ACCENT);
        buf.set_style(area, style);

        let text: String = self.message.chars().take(area.width as usize).collect();
        buf.set_string(area.x, area.y, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_clamped() {
        let area = Rect::new(0, 0, 20, 4);
        assert_eq!(centered_rect(area, 50, 5), Rect::new(0, 0, 20, 4));
        assert_eq!(centered_rect(Rect::new(0, 0, 80, 24), 50, 5), Rect::new(15, 9, 50, 5));
    }

    #[test]
    fn test_status_bar_truncates() {
        let area = Rect::new(0, 0, 5, 1);
        let mut buf = Buffer::empty(area);
        StatusBar {
            message: "'q' quit",
        }
        .render(area, &mut buf);
        assert_eq!(buf[(4, 0)].symbol(), "q");
    }
}
