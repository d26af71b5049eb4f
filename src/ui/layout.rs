//! Layout components (header, content panes, status bar)

use crate::app::App;
use crate::state::{Focus, PAGE_SUBTITLE, PAGE_TITLE};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Screen regions
pub struct Areas {
    pub header: Rect,
    pub progress: Rect,
    pub form: Rect,
    pub faq: Option<Rect>,
    pub status: Rect,
}

/// Split the screen: header, progress, form (and FAQ), status bar
pub fn create_layout(area: Rect, show_faq: bool) -> Areas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title + subtitle
            Constraint::Length(3), // Progress indicator
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let (form, faq) = if show_faq {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(rows[2]);
        (columns[0], Some(columns[1]))
    } else {
        (rows[2], None)
    };

    Areas {
        header: rows[0],
        progress: rows[1],
        form,
        faq,
        status: rows[3],
    }
}

pub fn draw_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            PAGE_TITLE,
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(PAGE_SUBTITLE, Style::default().fg(Color::Gray))),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Submission state
    let indicator = if app.state.form.is_submitting() {
        Span::styled(" ◐ sending ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    };
    spans.push(indicator);

    let focus = match app.state.focus {
        Focus::Form => "form",
        Focus::Faq => "faq",
    };
    spans.push(Span::styled(
        format!("focus: {focus}"),
        Style::default().fg(Color::Black),
    ));

    spans.push(Span::raw(" | "));
    spans.push(Span::styled(
        format!("store: {}", app.store_label()),
        Style::default().fg(Color::Blue),
    ));

    spans.push(Span::styled(
        " | ^C:quit ",
        Style::default().fg(Color::Black),
    ));

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}
