//! Rendering functions for the TUI.
//!
//! Pure functions over ratatui frames; terminal lifecycle lives in
//! [`super::tui`].

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::display::ViewState;

/// Render the full UI: the ASCII view, the control bar, and (on top of
/// everything) the error popup when a fatal start failure is pending.
pub fn draw(frame: &mut ratatui::Frame, state: &ViewState, error: Option<&str>) {
    let area = frame.area();

    let main_area = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    render_ascii_view(frame, state, main_area);
    render_control_bar(frame, state, area);

    if let Some(message) = error {
        render_error_popup(frame, message, area);
    }
}

/// Render the ASCII frame inside a bordered block.
fn render_ascii_view(frame: &mut ratatui::Frame, state: &ViewState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title("asciicam");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = match &state.frame {
        Some(ascii_frame) => ascii_frame.to_text(),
        None => String::new(),
    };
    let paragraph = Paragraph::new(text).style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, inner);
}

/// Render the one-line control bar at the bottom: the toggle label plus
/// key hints.
fn render_control_bar(frame: &mut ratatui::Frame, state: &ViewState, area: Rect) {
    let bar_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let line = Line::from(vec![
        Span::styled(
            format!("[ {} ]", state.control_label.text()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  space: toggle   q: quit"),
    ]);
    let bar = Paragraph::new(line).style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(bar, bar_area);
}

/// Render a centered modal error popup. Dismissed by any key; the popup
/// blocks the toggle until then.
fn render_error_popup(frame: &mut ratatui::Frame, message: &str, area: Rect) {
    let max_width = area.width.saturating_sub(2).max(1);
    let width = (message.len() as u16 + 4).clamp(1, max_width);
    let height = 5.min(area.height);
    let popup = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title("Error");
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let body = Paragraph::new(format!("{}\n\npress any key", message))
        .style(Style::default().fg(Color::White));
    frame.render_widget(body, inner);
}
