//! Contact TUI - Actor-based contact form
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - form state machine processing events
//! - Network Layer (Tokio) - async submission with timeout

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use contact_tui::constants::{APP_NAME, CONTACT_DETAILS, LOG_FILE, SOCIAL_LINKS};
use contact_tui::messages::ui_events::{key_to_ui_event, InputMode};
use contact_tui::models::{Field, StatusKind};
use contact_tui::ui::{cursor_offset, field_style, render_backend_tabs, status_style};
use contact_tui::{AppActor, AppState, Config, NetworkActor, NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log to a file; stdout belongs to the terminal UI
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Falling back to default configuration");
        Config::default()
    });
    tracing::info!(
        node = %config.backends.node,
        python = %config.backends.python,
        timeout_ms = config.request_timeout_ms,
        "Starting {}",
        APP_NAME
    );

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    let network_actor = NetworkActor::new(net_resp_tx, config.request_timeout());
    tokio::spawn(network_actor.run(net_cmd_rx));

    let app_actor = AppActor::new(AppState::new(config), net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.focused,
                    current_state.input_mode,
                    current_state.show_help,
                ) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Heading
            Constraint::Length(2), // Backend selector
            Constraint::Min(0),    // Form + info
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    draw_heading(f, chunks[0]);
    draw_backend_selector(f, state, chunks[1]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[2]);

    draw_form(f, state, columns[0]);
    draw_info(f, columns[1]);
    draw_key_hints(f, state, chunks[3]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_heading(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(APP_NAME, Style::default().fg(Color::Cyan).bold())),
        Line::from(Span::styled(
            "We're here for your questions, collaboration, and ideas. Get in touch!",
            Style::default().fg(Color::Gray),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_backend_selector(f: &mut Frame, state: &RenderState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    f.render_widget(render_backend_tabs(state.backend), rows[0]);

    let current = Line::from(vec![
        Span::styled("Currently using: ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{} backend ", state.backend.as_str())),
        Span::styled(format!("({})", state.endpoint), Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(current), rows[1]);
}

fn draw_form(f: &mut Frame, state: &RenderState, area: Rect) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(" Send Message ");
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(3), // Email
            Constraint::Length(3), // Subject
            Constraint::Min(4),    // Message
            Constraint::Length(1), // Submit button
            Constraint::Length(1), // Status
        ])
        .split(inner);

    for (field, row) in Field::ALL.into_iter().zip(rows.iter()) {
        draw_field(f, state, field, *row);
    }

    let button = if state.is_loading {
        Span::styled(" Sending... ", Style::default().fg(Color::DarkGray).bg(Color::Gray))
    } else {
        Span::styled(" Send Message (s) ", Style::default().fg(Color::White).bg(Color::Blue).bold())
    };
    f.render_widget(Paragraph::new(Line::from(button)).alignment(Alignment::Center), rows[4]);

    if state.status_kind != StatusKind::Idle {
        let status = Paragraph::new(state.status.as_str())
            .style(status_style(state.status_kind))
            .alignment(Alignment::Center);
        f.render_widget(status, rows[5]);
    }
}

fn draw_field(f: &mut Frame, state: &RenderState, field: Field, area: Rect) {
    let is_focused = state.focused == field;
    let is_editing = is_focused && state.input_mode == InputMode::Editing;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(field_style(is_focused, is_editing))
        .title(format!(" {} * ", field.label()));

    let value = state.fields.get(field);
    let content = if value.is_empty() && !is_editing {
        Text::from(Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray)))
    } else {
        Text::from(value)
    };

    let mut paragraph = Paragraph::new(content).block(block);
    if field.is_multiline() {
        paragraph = paragraph.wrap(Wrap { trim: false });
    }
    f.render_widget(paragraph, area);

    if is_editing {
        let (row, col) = cursor_offset(value, state.cursor_position);
        let max_x = area.x + area.width.saturating_sub(2);
        let max_y = area.y + area.height.saturating_sub(2);
        let cursor_x = (area.x + col + 1).min(max_x);
        let cursor_y = (area.y + row + 1).min(max_y);
        f.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}

fn draw_info(f: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(CONTACT_DETAILS.len() as u16 * 2 + 2),
            Constraint::Min(0),
        ])
        .split(area);

    let details: Vec<ListItem> = CONTACT_DETAILS
        .iter()
        .map(|d| {
            ListItem::new(vec![
                Line::from(Span::styled(d.label, Style::default().bold())),
                Line::from(Span::styled(d.value, Style::default().fg(Color::Gray))),
            ])
        })
        .collect();
    let details = List::new(details).block(Block::default().borders(Borders::ALL).title(" Contact Info "));
    f.render_widget(details, rows[0]);

    let links: Vec<ListItem> = SOCIAL_LINKS
        .iter()
        .map(|l| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("{:10}", l.name), Style::default().fg(Color::Cyan).bold()),
                    Span::styled(l.caption, Style::default().fg(Color::Gray)),
                ]),
                Line::from(Span::styled(format!("  {}", l.url), Style::default().fg(Color::DarkGray))),
            ])
        })
        .collect();
    let links = List::new(links).block(Block::default().borders(Borders::ALL).title(" Connect With Us "));
    f.render_widget(links, rows[1]);
}

fn draw_key_hints(f: &mut Frame, state: &RenderState, area: Rect) {
    let hints = if state.is_loading {
        " Sending... "
    } else if state.input_mode == InputMode::Editing {
        " ESC:stop editing | arrows:move | Tab:next field | Ctrl+S:send "
    } else {
        " Tab:field | e:edit | s:send | b:backend | ?:help | q:quit "
    };

    let bar = Paragraph::new(hints).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = r#"
 CONTACT US - Keyboard Shortcuts

 FORM
   Tab / Shift+Tab    Next / previous field
   e / Enter          Edit focused field
   Esc                Stop editing
   Enter (editing)    Next field, new line in Message
   s / Ctrl+S         Send message

 BACKEND
   b                  Toggle Node.js / Python
   n / p              Select Node.js / Python

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
