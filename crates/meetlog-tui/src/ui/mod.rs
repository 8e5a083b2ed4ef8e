use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use meetlog_core::domain::Meeting;
use meetlog_core::time::{format_meeting_date, format_timestamp_datetime};
use meetlog_store::Store;

use crate::app::{App, DetailView, FormFocus, MeetingForm, Mode};

pub fn draw(frame: &mut Frame<'_>, app: &App, store: &Store) {
    let size = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(4),
        ])
        .split(size);

    render_header(frame, chunks[0], app, store);

    match &app.mode {
        Mode::Detail(view) => render_detail(frame, chunks[1], app, store, view),
        _ => render_list(frame, chunks[1], app, store),
    }

    render_footer(frame, chunks[2], app);

    match &app.mode {
        Mode::Create(form) => render_meeting_form(frame, size, form),
        Mode::Detail(view) => {
            if let Some(form) = &view.edit {
                render_meeting_form(frame, size, form);
            } else if view.confirm_delete {
                let company = store
                    .get(view.meeting_id)
                    .map(|meeting| meeting.company_name.as_str())
                    .unwrap_or("this meeting");
                render_confirm(frame, size, company);
            }
        }
        _ => {}
    }

    if app.show_help {
        render_help(frame, size);
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, app: &App, store: &Store) {
    let editing = matches!(app.mode, Mode::FilterEditing);
    let query = app.list.query();
    let filter_span = if editing {
        Span::styled(format!("{query}_"), Style::default().fg(Color::Yellow))
    } else if query.is_empty() {
        Span::styled("(none)", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(query.to_string())
    };
    let line = Line::from(vec![
        Span::raw(format!(
            "meetings: {}  shown: {}  filter: ",
            store.len(),
            app.visible.len()
        )),
        filter_span,
    ]);

    let block = Block::default().borders(Borders::ALL).title("meetlog");
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let hint = match &app.mode {
        Mode::List => "j/k move  enter detail  space expand  / filter  c clear  a new  ? help  q quit",
        Mode::FilterEditing => "type to filter  enter/esc done  ctrl+u clear",
        Mode::Create(_) => "tab next  shift+tab prev  ctrl+a add contact  ctrl+d remove contact  ctrl+s save  esc cancel",
        Mode::Detail(view) if view.edit.is_some() => {
            "tab next  shift+tab prev  ctrl+a add contact  ctrl+d remove contact  ctrl+s save  esc cancel"
        }
        Mode::Detail(view) if view.confirm_delete => "y delete  n/esc keep",
        Mode::Detail(_) => "esc back  j/k scroll  e edit  d delete  ? help  q quit",
    };

    let mut lines = vec![Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    ))];
    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Green),
        )));
    }
    if let Some(err) = &app.error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, app: &App, store: &Store) {
    let meetings: Vec<&Meeting> = app
        .visible
        .iter()
        .filter_map(|id| store.get(*id))
        .collect();

    if meetings.is_empty() {
        let paragraph = Paragraph::new(app.empty_hint())
            .block(Block::default().borders(Borders::ALL).title("Meetings"))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = meetings
        .iter()
        .map(|meeting| {
            let expanded = app.list.is_expanded(meeting.id);
            ListItem::new(meeting_card(meeting, expanded, app))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.selected));

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Meetings"))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("➤ ");

    frame.render_stateful_widget(list, area, &mut state);
}

fn meeting_card(meeting: &Meeting, expanded: bool, app: &App) -> Text<'static> {
    let marker = if expanded { "▾ " } else { "▸ " };
    let mut header = vec![
        Span::raw(marker),
        Span::styled(
            meeting.company_name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format_meeting_date(meeting.date, &app.date_format),
            Style::default().fg(Color::Yellow),
        ),
    ];
    for (label, style) in badges(meeting) {
        header.push(Span::raw(" "));
        header.push(Span::styled(format!("[{label}]"), style));
    }

    let mut lines = vec![Line::from(header)];

    let names = meeting.contact_names();
    if !names.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {}", names.join(", ")),
            Style::default().fg(Color::Cyan),
        )));
    }

    if expanded {
        for contact in &meeting.contacts {
            lines.push(Line::from(format!(
                "    {}  {}  {}  {}",
                contact.name,
                or_dash(&contact.title),
                or_dash(&contact.phone),
                or_dash(&contact.email)
            )));
        }
        lines.push(Line::from(format!("  Our attendees: {}", meeting.our_attendees)));
        for content_line in meeting.content.lines() {
            lines.push(Line::from(format!("  {content_line}")));
        }
        if let Some(reason) = &meeting.proposal_rejection_reason {
            lines.push(Line::from(Span::styled(
                format!("  Rejection reason: {reason}"),
                Style::default().fg(Color::Red),
            )));
        }
    } else {
        lines.push(Line::from(Span::styled(
            format!("  {}", preview(&meeting.content, app.preview_chars)),
            Style::default().fg(Color::DarkGray),
        )));
    }

    Text::from(lines)
}

fn render_detail(frame: &mut Frame<'_>, area: Rect, app: &App, store: &Store, view: &DetailView) {
    // `App::sync` redirects before a frame is drawn, so this only covers a
    // record that vanished between the two.
    let Some(meeting) = store.get(view.meeting_id) else {
        let paragraph = Paragraph::new("Meeting not found.")
            .block(Block::default().borders(Borders::ALL).title("Meeting"))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(4)])
        .split(area);

    let mut badge_spans = Vec::new();
    for (label, style) in badges(meeting) {
        badge_spans.push(Span::styled(format!("[{label}]"), style));
        badge_spans.push(Span::raw(" "));
    }
    let info_lines = vec![
        Line::from(Span::styled(
            meeting.company_name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "Date: {}",
            format_meeting_date(meeting.date, &app.date_format)
        )),
        Line::from(format!("Our attendees: {}", meeting.our_attendees)),
        Line::from(format!(
            "Logged: {}",
            format_timestamp_datetime(meeting.created_at)
        )),
        Line::from(badge_spans),
    ];
    let info =
        Paragraph::new(info_lines).block(Block::default().borders(Borders::ALL).title("Meeting"));
    frame.render_widget(info, chunks[0]);

    let paragraph = Paragraph::new(Text::from(detail_body(meeting)))
        .block(Block::default().borders(Borders::ALL).title("Details"))
        .scroll((view.scroll, 0))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, chunks[1]);
}

/// Scrollable part of the detail screen; `App::sync` clamps the scroll
/// offset to its length.
pub(crate) fn detail_body(meeting: &Meeting) -> Vec<Line<'static>> {
    let mut body = Vec::new();
    body.push(section_title("Contacts"));
    if meeting.contacts.is_empty() {
        body.push(Line::from(Span::styled(
            "No contacts recorded.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for contact in &meeting.contacts {
        body.push(Line::from(vec![
            Span::styled(
                contact.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {}", or_dash(&contact.title))),
        ]));
        body.push(Line::from(format!(
            "  Phone: {}  Email: {}",
            or_dash(&contact.phone),
            or_dash(&contact.email)
        )));
    }
    body.push(Line::from(""));

    body.push(section_title("Notes"));
    for content_line in meeting.content.lines() {
        body.push(Line::from(content_line.to_string()));
    }
    body.push(Line::from(""));

    body.push(section_title("Proposal"));
    body.push(Line::from(if meeting.proposal_given {
        "Given"
    } else {
        "Not given"
    }));
    if let Some(reason) = &meeting.proposal_rejection_reason {
        body.push(Line::from(format!("Rejection reason: {reason}")));
    }
    body.push(Line::from(format!(
        "Follow-up: {}",
        if meeting.follow_up_done { "done" } else { "pending" }
    )));
    body
}

fn render_meeting_form(frame: &mut Frame<'_>, area: Rect, form: &MeetingForm) {
    let modal = centered_rect(80, 90, area);
    frame.render_widget(Clear, modal);

    let draft = &form.draft;
    let focus = form.focus;
    let mut lines = Vec::new();
    let mut focus_line = 0usize;
    let mut mark = |line: usize, target: FormFocus| {
        if focus == target {
            focus_line = line;
        }
    };

    mark(lines.len(), FormFocus::CompanyName);
    lines.push(field_line("Company", &draft.company_name, focus == FormFocus::CompanyName));
    mark(lines.len(), FormFocus::Date);
    lines.push(field_line("Date (YYYY-MM-DD)", &draft.date, focus == FormFocus::Date));
    mark(lines.len(), FormFocus::OurAttendees);
    lines.push(field_line(
        "Our attendees",
        &draft.our_attendees,
        focus == FormFocus::OurAttendees,
    ));
    mark(lines.len(), FormFocus::Content);
    lines.push(Line::from(Span::styled(
        "Notes:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    push_multiline(&mut lines, &draft.content, focus == FormFocus::Content);
    lines.push(Line::from(""));

    for (index, contact) in draft.contacts().iter().enumerate() {
        lines.push(section_title(&format!("Contact {}", index + 1)));
        for field in meetlog_core::ContactField::ALL {
            let target = FormFocus::Contact(contact.id, field);
            mark(lines.len(), target);
            let value = match field {
                meetlog_core::ContactField::Name => &contact.name,
                meetlog_core::ContactField::Title => &contact.title,
                meetlog_core::ContactField::Phone => &contact.phone,
                meetlog_core::ContactField::Email => &contact.email,
            };
            lines.push(field_line(field.label(), value, focus == target));
        }
    }
    lines.push(Line::from(Span::styled(
        "Ctrl+A adds a contact, Ctrl+D removes the focused one. Unnamed rows are dropped on save.",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    mark(lines.len(), FormFocus::ProposalGiven);
    lines.push(checkbox_line(
        "Proposal given",
        draft.proposal_given,
        focus == FormFocus::ProposalGiven,
    ));
    if draft.proposal_given {
        mark(lines.len(), FormFocus::RejectionReason);
        lines.push(Line::from(Span::styled(
            "Rejection reason:",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        push_multiline(
            &mut lines,
            &draft.proposal_rejection_reason,
            focus == FormFocus::RejectionReason,
        );
    }
    mark(lines.len(), FormFocus::FollowUpDone);
    lines.push(checkbox_line(
        "Follow-up done",
        draft.follow_up_done,
        focus == FormFocus::FollowUpDone,
    ));
    lines.push(Line::from(""));

    if let Some(err) = &form.error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let save_style = if focus == FormFocus::Save {
        Style::default().fg(Color::Black).bg(Color::LightGreen)
    } else {
        Style::default().fg(Color::Green)
    };
    let cancel_style = if focus == FormFocus::Cancel {
        Style::default().fg(Color::Black).bg(Color::LightRed)
    } else {
        Style::default().fg(Color::Red)
    };
    if matches!(focus, FormFocus::Save | FormFocus::Cancel) {
        focus_line = lines.len();
    }
    lines.push(Line::from(vec![
        Span::styled("[Save]", save_style),
        Span::raw("  "),
        Span::styled("[Cancel]", cancel_style),
    ]));

    let visible = modal.height.saturating_sub(2) as usize;
    let scroll = (focus_line + 1).saturating_sub(visible);
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(form.title()))
        .scroll((scroll as u16, 0));
    frame.render_widget(paragraph, modal);
}

fn render_confirm(frame: &mut Frame<'_>, area: Rect, company: &str) {
    let modal = centered_rect(50, 30, area);
    frame.render_widget(Clear, modal);
    let text = vec![
        Line::from(format!("Delete the meeting with {company}?")),
        Line::from(""),
        Line::from(Span::styled(
            "y delete  n keep",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Confirm"))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, modal);
}

fn render_help(frame: &mut Frame<'_>, area: Rect) {
    let modal = centered_rect(70, 70, area);
    frame.render_widget(Clear, modal);

    let text = vec![
        Line::from("Global: Ctrl+C quit, Ctrl+G meetings list, Ctrl+N new meeting"),
        Line::from("Outside forms: q quit, ? help"),
        Line::from("List: j/k move, enter detail, space expand, / filter, c clear filter, a new"),
        Line::from("Filter: matches company, contact names and our attendees, case-insensitive"),
        Line::from("Detail: esc back, j/k scroll, e edit, d delete"),
        Line::from("Forms: tab/shift+tab move, space toggles boxes, enter activates, Ctrl+S save, esc cancel"),
        Line::from("Forms: Ctrl+A add contact, Ctrl+D remove contact, Ctrl+T today (date field)"),
        Line::from("Text: Ctrl+U clears the field, Ctrl+W deletes a word"),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, modal);
}

fn badges(meeting: &Meeting) -> Vec<(&'static str, Style)> {
    let mut badges = Vec::new();
    if meeting.proposal_given {
        badges.push(("proposal", Style::default().fg(Color::Blue)));
    }
    if meeting.proposal_rejection_reason.is_some() {
        badges.push((
            "rejected",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    if meeting.follow_up_done {
        badges.push(("followed up", Style::default().fg(Color::Green)));
    } else {
        badges.push(("follow-up pending", Style::default().fg(Color::Magenta)));
    }
    badges
}

fn preview(content: &str, max_chars: usize) -> String {
    let flat = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let mut cut: String = flat.chars().take(max_chars).collect();
    cut.push('…');
    cut
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn push_multiline(lines: &mut Vec<Line<'static>>, value: &str, focused: bool) {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    if value.is_empty() {
        lines.push(Line::from(Span::styled("  (empty)", style)));
        return;
    }
    for line in value.split('\n') {
        lines.push(Line::from(Span::styled(format!("  {line}"), style)));
    }
}

fn checkbox_line(label: &str, checked: bool, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let mark = if checked { "[x]" } else { "[ ]" };
    Line::from(Span::styled(format!("{mark} {label}"), style))
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(
            format!("{}: ", label),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(value.to_string(), style),
    ])
}

fn centered_rect(percent_x: u16, percent_y: u16, rect: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(rect);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::{draw, preview};
    use crate::app::App;
    use meetlog_config::AppConfig;
    use meetlog_store::sample::sample_meetings;
    use meetlog_store::Store;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn preview_truncates_on_char_boundaries() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("Şirket  mevcut\ntedarikçi", 6), "Şirket…");
    }

    #[test]
    fn list_and_forms_render_without_panicking() {
        let store = Store::with_meetings(sample_meetings()).expect("seed");
        let mut app = App::new(&AppConfig::default());
        app.sync(&store);
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).expect("terminal");

        terminal
            .draw(|frame| draw(frame, &app, &store))
            .expect("draw list");
        let rendered = format!("{:?}", terminal.backend().buffer());
        assert!(rendered.contains("Delta"));

        app.go_new();
        terminal
            .draw(|frame| draw(frame, &app, &store))
            .expect("draw form");

        let id = store.list()[0].id;
        assert!(app.go_detail(&store, id));
        terminal
            .draw(|frame| draw(frame, &app, &store))
            .expect("draw detail");
    }
}
