use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use meetlog_config::AppConfig;
use meetlog_core::domain::{ContactId, Meeting, MeetingId};
use meetlog_core::draft::{ContactField, MeetingDraft};
use meetlog_core::filter::ListState;
use meetlog_core::time::{format_date_input, today_local};
use meetlog_store::Store;
use tracing::{debug, warn};

use crate::actions::Action;
use crate::ui::detail_body;

const LIST_EMPTY: &str = "No meetings yet. Press 'a' to log one.";
const LIST_NO_MATCH: &str = "No meetings match the filter.";

#[derive(Debug, Clone)]
pub enum Mode {
    List,
    FilterEditing,
    Create(MeetingForm),
    Detail(DetailView),
}

/// The detail screen only remembers which meeting it shows; the record itself
/// is looked up in the store on every frame.
#[derive(Debug, Clone)]
pub struct DetailView {
    pub meeting_id: MeetingId,
    pub edit: Option<MeetingForm>,
    pub confirm_delete: bool,
    pub scroll: u16,
}

impl DetailView {
    fn new(meeting_id: MeetingId) -> Self {
        Self {
            meeting_id,
            edit: None,
            confirm_delete: false,
            scroll: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nav {
    Stay,
    New,
    Detail(MeetingId),
    Back,
    Edit,
    Filter,
}

#[derive(Debug)]
pub struct App {
    pub mode: Mode,
    pub show_help: bool,
    pub should_quit: bool,
    pub list: ListState,
    pub visible: Vec<MeetingId>,
    pub selected: usize,
    pub status: Option<String>,
    pub error: Option<String>,
    pub date_format: String,
    pub preview_chars: usize,
    default_attendees: Option<String>,
    actions: VecDeque<Action>,
    pub(crate) pending_select: Option<MeetingId>,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            mode: Mode::List,
            show_help: false,
            should_quit: false,
            list: ListState::new(),
            visible: Vec::new(),
            selected: 0,
            status: None,
            error: None,
            date_format: config.display.date_format.clone(),
            preview_chars: config.display.preview_chars,
            default_attendees: config.default_attendees.clone(),
            actions: VecDeque::new(),
            pending_select: None,
        }
    }

    pub fn enqueue(&mut self, action: Action) {
        self.actions.push_back(action);
    }

    pub fn next_action(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn selected_meeting_id(&self) -> Option<MeetingId> {
        self.visible.get(self.selected).copied()
    }

    pub fn empty_hint(&self) -> &'static str {
        if self.list.filter().is_empty() {
            LIST_EMPTY
        } else {
            LIST_NO_MATCH
        }
    }

    pub fn is_typing(&self) -> bool {
        match &self.mode {
            Mode::FilterEditing | Mode::Create(_) => true,
            Mode::Detail(view) => view.edit.is_some(),
            Mode::List => false,
        }
    }

    pub fn go_home(&mut self) {
        match self.mode {
            Mode::List => {}
            Mode::FilterEditing => self.mode = Mode::List,
            _ => self.enter_list(),
        }
    }

    pub fn go_new(&mut self) {
        let mut draft = MeetingDraft::new().with_date(today_local());
        if let Some(attendees) = &self.default_attendees {
            draft = draft.with_attendees(attendees.clone());
        }
        self.list = ListState::new();
        self.mode = Mode::Create(MeetingForm::new(draft));
    }

    pub fn go_detail(&mut self, store: &Store, id: MeetingId) -> bool {
        if store.get(id).is_none() {
            self.set_error("meeting not found");
            return false;
        }
        debug!(%id, "open detail");
        self.list = ListState::new();
        self.pending_select = Some(id);
        self.mode = Mode::Detail(DetailView::new(id));
        true
    }

    pub fn go_back(&mut self) {
        match &mut self.mode {
            Mode::List => {}
            Mode::FilterEditing => self.mode = Mode::List,
            Mode::Create(_) => self.enter_list(),
            Mode::Detail(view) => {
                if view.confirm_delete {
                    view.confirm_delete = false;
                } else if view.edit.is_some() {
                    view.edit = None;
                } else {
                    self.enter_list();
                }
            }
        }
    }

    pub fn begin_edit(&mut self, store: &Store) {
        if let Mode::Detail(view) = &mut self.mode {
            if view.edit.is_none() {
                if let Some(meeting) = store.get(view.meeting_id) {
                    view.confirm_delete = false;
                    view.edit = Some(MeetingForm::edit(meeting));
                }
            }
        }
    }

    /// Called after a create or update went through: both land on the list.
    pub fn finish_save(&mut self, id: MeetingId, message: impl Into<String>) {
        self.pending_select = Some(id);
        self.clear_error();
        self.set_status(message);
        self.enter_list();
    }

    /// Shows a rejected save inside the open form so the draft is kept.
    pub fn reject_form(&mut self, message: impl Into<String>) {
        let message = message.into();
        match &mut self.mode {
            Mode::Create(form) => form.error = Some(message),
            Mode::Detail(DetailView {
                edit: Some(form), ..
            }) => form.error = Some(message),
            _ => self.set_error(message),
        }
    }

    /// Reconciles view state with the store before a frame is drawn.
    pub fn sync(&mut self, store: &Store) {
        if let Mode::Detail(view) = &mut self.mode {
            let id = view.meeting_id;
            match store.get(id) {
                Some(meeting) => {
                    let last = detail_body(meeting).len().saturating_sub(1);
                    view.scroll = view.scroll.min(u16::try_from(last).unwrap_or(u16::MAX));
                }
                None => {
                    warn!(%id, "meeting vanished while open; returning to list");
                    self.enter_list();
                    self.set_status("Meeting no longer exists; returned to list");
                }
            }
        }

        self.visible = self
            .list
            .visible(store.list())
            .iter()
            .map(|meeting| meeting.id)
            .collect();

        if matches!(self.mode, Mode::List | Mode::FilterEditing) {
            if let Some(target) = self.pending_select.take() {
                if let Some(pos) = self.visible.iter().position(|id| *id == target) {
                    self.selected = pos;
                }
            }
        }
        if self.selected >= self.visible.len() {
            self.selected = self.visible.len().saturating_sub(1);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, store: &Store) {
        if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('g') => {
                    self.go_home();
                    return;
                }
                KeyCode::Char('n') => {
                    self.go_new();
                    return;
                }
                _ => {}
            }
        }

        if !self.is_typing() {
            match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                    return;
                }
                _ => {}
            }
        }

        let mut mode = std::mem::replace(&mut self.mode, Mode::List);
        let nav = match &mut mode {
            Mode::List => self.handle_list_key(key),
            Mode::FilterEditing => self.handle_filter_key(key),
            Mode::Create(form) => self.handle_form_key(form, key),
            Mode::Detail(view) => self.handle_detail_key(view, key),
        };
        self.mode = mode;
        self.navigate(nav, store);
    }

    fn navigate(&mut self, nav: Nav, store: &Store) {
        match nav {
            Nav::Stay => {}
            Nav::New => self.go_new(),
            Nav::Detail(id) => {
                self.go_detail(store, id);
            }
            Nav::Back => self.go_back(),
            Nav::Edit => self.begin_edit(store),
            Nav::Filter => self.mode = Mode::FilterEditing,
        }
    }

    fn enter_list(&mut self) {
        self.list = ListState::new();
        self.mode = Mode::List;
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Nav {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::PageDown => self.move_selection(5),
            KeyCode::PageUp => self.move_selection(-5),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.selected = self.visible.len().saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(id) = self.selected_meeting_id() {
                    return Nav::Detail(id);
                }
            }
            KeyCode::Char(' ') | KeyCode::Tab => {
                if let Some(id) = self.selected_meeting_id() {
                    self.list.toggle_expand(id);
                }
            }
            KeyCode::Char('/') => return Nav::Filter,
            KeyCode::Char('c') => {
                self.list.set_query("");
                self.selected = 0;
            }
            KeyCode::Char('a') | KeyCode::Char('n') => return Nav::New,
            KeyCode::Esc => self.clear_error(),
            _ => {}
        }
        Nav::Stay
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> Nav {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => Nav::Back,
            _ => {
                let mut query = self.list.query().to_string();
                apply_text_input(&mut query, key);
                if query != self.list.query() {
                    self.list.set_query(query);
                    self.selected = 0;
                }
                Nav::Stay
            }
        }
    }

    fn handle_detail_key(&mut self, view: &mut DetailView, key: KeyEvent) -> Nav {
        if let Some(form) = view.edit.as_mut() {
            return self.handle_form_key(form, key);
        }

        if view.confirm_delete {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.enqueue(Action::DeleteMeeting(view.meeting_id));
                    return Nav::Stay;
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return Nav::Back,
                _ => return Nav::Stay,
            }
        }

        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => return Nav::Back,
            KeyCode::Down | KeyCode::Char('j') => view.scroll = view.scroll.saturating_add(1),
            KeyCode::Up | KeyCode::Char('k') => view.scroll = view.scroll.saturating_sub(1),
            KeyCode::PageDown => view.scroll = view.scroll.saturating_add(5),
            KeyCode::PageUp => view.scroll = view.scroll.saturating_sub(5),
            KeyCode::Char('e') => return Nav::Edit,
            KeyCode::Char('d') => view.confirm_delete = true,
            _ => {}
        }
        Nav::Stay
    }

    fn handle_form_key(&mut self, form: &mut MeetingForm, key: KeyEvent) -> Nav {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('a') => {
                    form.add_contact();
                    return Nav::Stay;
                }
                KeyCode::Char('d') => {
                    if let Err(message) = form.remove_focused_contact() {
                        form.error = Some(message);
                    }
                    return Nav::Stay;
                }
                KeyCode::Char('t') => {
                    if form.focus == FormFocus::Date {
                        form.draft.date = format_date_input(today_local());
                    }
                    return Nav::Stay;
                }
                KeyCode::Char('s') => {
                    self.submit_form(form);
                    return Nav::Stay;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Esc => return Nav::Back,
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
            KeyCode::Enter => match form.focus {
                FormFocus::Save => self.submit_form(form),
                FormFocus::Cancel => return Nav::Back,
                FormFocus::ProposalGiven | FormFocus::FollowUpDone => form.toggle_focused(),
                FormFocus::Content | FormFocus::RejectionReason => {
                    if let Some(target) = form.active_field_mut() {
                        target.push('\n');
                    }
                }
                _ => form.focus_next(),
            },
            KeyCode::Char(' ') if form.focus_is_toggle() => form.toggle_focused(),
            _ => {
                if let Some(target) = form.active_field_mut() {
                    apply_text_input(target, key);
                }
            }
        }
        Nav::Stay
    }

    fn submit_form(&mut self, form: &mut MeetingForm) {
        match form.to_action() {
            Ok(action) => {
                form.error = None;
                self.enqueue(action);
            }
            Err(message) => form.error = Some(message),
        }
    }

    fn move_selection(&mut self, delta: i32) {
        if self.visible.is_empty() {
            self.selected = 0;
            return;
        }
        let last = self.visible.len() as i32 - 1;
        self.selected = (self.selected as i32 + delta).clamp(0, last) as usize;
    }
}

fn apply_text_input(target: &mut String, key: KeyEvent) {
    match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            target.clear();
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            delete_last_word(target);
        }
        KeyCode::Char(ch) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                target.push(ch);
            }
        }
        KeyCode::Backspace => {
            target.pop();
        }
        _ => {}
    }
}

fn delete_last_word(value: &mut String) {
    while value.ends_with(char::is_whitespace) {
        value.pop();
    }
    while value.ends_with(|ch: char| !ch.is_whitespace()) {
        value.pop();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    CompanyName,
    Date,
    OurAttendees,
    Content,
    ProposalGiven,
    RejectionReason,
    FollowUpDone,
    Contact(ContactId, ContactField),
    Save,
    Cancel,
}

#[derive(Debug, Clone)]
pub struct MeetingForm {
    pub draft: MeetingDraft,
    pub focus: FormFocus,
    pub editing: Option<(MeetingId, i64)>,
    pub error: Option<String>,
}

impl MeetingForm {
    pub fn new(draft: MeetingDraft) -> Self {
        Self {
            draft,
            focus: FormFocus::CompanyName,
            editing: None,
            error: None,
        }
    }

    pub fn edit(meeting: &Meeting) -> Self {
        Self {
            draft: MeetingDraft::from_meeting(meeting),
            focus: FormFocus::CompanyName,
            editing: Some((meeting.id, meeting.created_at)),
            error: None,
        }
    }

    pub fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Meeting"
        } else {
            "New Meeting"
        }
    }

    /// Focusable targets in display order. The rejection reason is only
    /// reachable while the proposal box is ticked.
    pub fn focus_order(&self) -> Vec<FormFocus> {
        let mut order = vec![
            FormFocus::CompanyName,
            FormFocus::Date,
            FormFocus::OurAttendees,
            FormFocus::Content,
        ];
        for contact in self.draft.contacts() {
            order.extend(
                ContactField::ALL
                    .iter()
                    .map(|field| FormFocus::Contact(contact.id, *field)),
            );
        }
        order.push(FormFocus::ProposalGiven);
        if self.draft.proposal_given {
            order.push(FormFocus::RejectionReason);
        }
        order.push(FormFocus::FollowUpDone);
        order.push(FormFocus::Save);
        order.push(FormFocus::Cancel);
        order
    }

    pub fn focus_next(&mut self) {
        let order = self.focus_order();
        let index = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(index + 1) % order.len()];
    }

    pub fn focus_prev(&mut self) {
        let order = self.focus_order();
        let index = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(index + order.len() - 1) % order.len()];
    }

    pub fn focus_is_toggle(&self) -> bool {
        matches!(self.focus, FormFocus::ProposalGiven | FormFocus::FollowUpDone)
    }

    pub fn toggle_focused(&mut self) {
        match self.focus {
            FormFocus::ProposalGiven => self.draft.proposal_given = !self.draft.proposal_given,
            FormFocus::FollowUpDone => self.draft.follow_up_done = !self.draft.follow_up_done,
            _ => {}
        }
    }

    pub fn active_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormFocus::CompanyName => Some(&mut self.draft.company_name),
            FormFocus::Date => Some(&mut self.draft.date),
            FormFocus::OurAttendees => Some(&mut self.draft.our_attendees),
            FormFocus::Content => Some(&mut self.draft.content),
            FormFocus::RejectionReason => Some(&mut self.draft.proposal_rejection_reason),
            FormFocus::Contact(id, field) => self.draft.contact_field_mut(id, field),
            FormFocus::ProposalGiven
            | FormFocus::FollowUpDone
            | FormFocus::Save
            | FormFocus::Cancel => None,
        }
    }

    pub fn add_contact(&mut self) {
        let id = self.draft.add_contact();
        self.focus = FormFocus::Contact(id, ContactField::Name);
    }

    pub fn remove_focused_contact(&mut self) -> Result<(), String> {
        let FormFocus::Contact(id, _) = self.focus else {
            return Err("move to a contact row to remove it".to_string());
        };
        let index = self
            .draft
            .contacts()
            .iter()
            .position(|contact| contact.id == id)
            .unwrap_or(0);
        if !self.draft.remove_contact(id) {
            return Err("at least one contact row is required".to_string());
        }
        let contacts = self.draft.contacts();
        let next = contacts[index.min(contacts.len() - 1)].id;
        self.focus = FormFocus::Contact(next, ContactField::Name);
        self.error = None;
        Ok(())
    }

    pub fn to_action(&self) -> Result<Action, String> {
        let meeting = self.draft.finalize().map_err(|err| err.to_string())?;
        Ok(match self.editing {
            Some((id, created_at)) => Action::UpdateMeeting(meeting.into_meeting(id, created_at)),
            None => Action::CreateMeeting(meeting),
        })
    }
}
