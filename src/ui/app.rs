use std::cmp::min;
use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::DogProfile;
use crate::photo;
use crate::store::ProfileStore;

use super::forms::{ConfirmProfileDelete, ProfileField, ProfileForm};
use super::helpers::{centered_rect, surface_error};
use super::screens::{DetailScreen, ProfileList};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Height allocation per profile card in the list view.
const PROFILE_CARD_HEIGHT: u16 = 5;

/// High-level navigation states. Keeping this explicit makes it easy to reason
/// about which rendering path runs and what keyboard shortcuts should do.
enum Screen {
    List,
    Detail(DetailScreen),
}

/// Fine-grained modes scoped to the current screen.
enum Mode {
    Normal,
    CreatingProfile(ProfileForm),
    ConfirmDelete(ConfirmProfileDelete),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. The store arrives as an
/// injected capability so the production binary hands over SQLite while the
/// tests below drive the same flows against an in-memory fake.
pub struct App {
    store: Box<dyn ProfileStore>,
    list: ProfileList,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(store: Box<dyn ProfileStore>, profiles: Vec<DogProfile>) -> Self {
        Self {
            store,
            list: ProfileList::new(profiles),
            screen: Screen::List,
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        let mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::CreatingProfile(form) => self.handle_create_profile(code, form)?,
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm)?,
        };

        self.mode = mode;
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.screen {
            Screen::List => {
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        *exit = true;
                    }
                    KeyCode::Up => self.list.move_selection(-1),
                    KeyCode::Down => self.list.move_selection(1),
                    KeyCode::PageUp => self.list.move_selection(-5),
                    KeyCode::PageDown => self.list.move_selection(5),
                    KeyCode::Home => self.list.select_first(),
                    KeyCode::End => self.list.select_last(),
                    KeyCode::Enter => {
                        if let Some(profile) = self.list.current().cloned() {
                            self.clear_status();
                            self.screen = Screen::Detail(DetailScreen::new(profile));
                        } else {
                            self.set_status("No profile selected.", StatusKind::Error);
                        }
                    }
                    KeyCode::Char('+') | KeyCode::Char('a') | KeyCode::Char('A') => {
                        self.clear_status();
                        return Ok(Mode::CreatingProfile(ProfileForm::default()));
                    }
                    KeyCode::Char('-') | KeyCode::Char('d') | KeyCode::Char('D') => {
                        if let Some(profile) = self.list.current() {
                            let confirm = ConfirmProfileDelete::from(profile);
                            self.clear_status();
                            return Ok(Mode::ConfirmDelete(confirm));
                        } else {
                            self.set_status("No profile selected to delete.", StatusKind::Error);
                        }
                    }
                    _ => {}
                }
                Ok(Mode::Normal)
            }
            Screen::Detail(ref detail) => {
                match code {
                    KeyCode::Char('q') => {
                        *exit = true;
                    }
                    KeyCode::Esc => {
                        self.clear_status();
                        self.screen = Screen::List;
                    }
                    KeyCode::Char('-') | KeyCode::Char('d') | KeyCode::Char('D') => {
                        let confirm = ConfirmProfileDelete::from(&detail.profile);
                        self.clear_status();
                        return Ok(Mode::ConfirmDelete(confirm));
                    }
                    _ => {}
                }
                Ok(Mode::Normal)
            }
        }
    }

    /// Drive the create form. Validation and photo problems keep the form
    /// open with a blocking message and never reach the store; a rejected
    /// commit dismisses the form without touching the snapshot.
    fn handle_create_profile(&mut self, code: KeyCode, mut form: ProfileForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Add dog cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Tab | KeyCode::BackTab => {
                form.toggle_field();
                Ok(Mode::CreatingProfile(form))
            }
            KeyCode::Backspace => {
                form.backspace();
                Ok(Mode::CreatingProfile(form))
            }
            KeyCode::Enter => {
                let input = match form.parse_inputs() {
                    Ok(input) => input,
                    Err(err) => {
                        let message = surface_error(&err);
                        form.error = Some(message.clone());
                        self.set_status(message, StatusKind::Error);
                        return Ok(Mode::CreatingProfile(form));
                    }
                };

                let photo = match input.photo_path.as_deref() {
                    Some(path) => match photo::load_cropped(path) {
                        Ok(bytes) => Some(bytes),
                        Err(err) => {
                            let message = surface_error(&err);
                            form.error = Some(message.clone());
                            self.set_status(message, StatusKind::Error);
                            return Ok(Mode::CreatingProfile(form));
                        }
                    },
                    None => None,
                };

                match self.store.save(
                    &input.name,
                    input.owner.as_deref(),
                    input.summary.as_deref(),
                    photo.as_deref(),
                ) {
                    Ok(profile) => {
                        self.set_status(format!("Added {}.", profile.name), StatusKind::Info);
                        self.list.insert(profile);
                    }
                    Err(err) => {
                        self.set_status(err.to_string(), StatusKind::Error);
                    }
                }
                Ok(Mode::Normal)
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
                Ok(Mode::CreatingProfile(form))
            }
            _ => Ok(Mode::CreatingProfile(form)),
        }
    }

    fn handle_confirm_delete(
        &mut self,
        code: KeyCode,
        confirm: ConfirmProfileDelete,
    ) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.store.delete(&confirm.id) {
                    Ok(()) => {
                        self.list.remove_by_id(&confirm.id);
                        if matches!(&self.screen, Screen::Detail(d) if d.profile.id == confirm.id)
                        {
                            self.screen = Screen::List;
                        }
                        self.set_status(format!("Deleted {}.", confirm.name), StatusKind::Info);
                        Ok(Mode::Normal)
                    }
                    Err(err) => {
                        self.set_status(err.to_string(), StatusKind::Error);
                        Ok(Mode::ConfirmDelete(confirm))
                    }
                }
            }
            _ => Ok(Mode::ConfirmDelete(confirm)),
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::List => self.draw_profile_list(frame, content_area),
            Screen::Detail(detail) => self.draw_detail(frame, content_area, detail),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::CreatingProfile(form) => self.draw_profile_form(frame, area, form),
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::Normal => {}
        }
    }

    fn draw_profile_list(&self, frame: &mut Frame, area: Rect) {
        if self.list.is_empty() {
            let message = Paragraph::new("No dog profiles yet. Press '+' to add one.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::NONE));
            frame.render_widget(message, area);
            return;
        }

        self.render_profile_cards(frame, area, &self.list.profiles, self.list.selected);
    }

    fn render_profile_cards(
        &self,
        frame: &mut Frame,
        area: Rect,
        profiles: &[DogProfile],
        selected: usize,
    ) {
        if profiles.is_empty() || area.height == 0 {
            return;
        }

        let card_height = PROFILE_CARD_HEIGHT as usize;
        let capacity = ((area.height as usize) / card_height).max(1);
        let len = profiles.len();
        let mut start = if selected >= capacity {
            selected + 1 - capacity
        } else {
            0
        };
        if start + capacity > len {
            start = len.saturating_sub(capacity);
        }
        let end = min(start + capacity, len);
        let visible_len = end.saturating_sub(start);
        if visible_len == 0 {
            return;
        }

        let constraints: Vec<Constraint> = (0..visible_len)
            .map(|_| Constraint::Length(PROFILE_CARD_HEIGHT))
            .collect();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (idx, chunk) in rows.iter().enumerate() {
            if chunk.height == 0 {
                continue;
            }

            let profile_index = start + idx;
            if profile_index >= len {
                break;
            }

            let profile = &profiles[profile_index];
            let mut block = Block::default().borders(Borders::ALL);
            let mut paragraph_style = Style::default();
            if profile_index == selected {
                block = block.style(Style::default().fg(Color::Yellow));
                paragraph_style = Style::default().fg(Color::Yellow);
            }

            let mut lines = Vec::new();
            let name = if profile_index == selected {
                format!("▶ {}", profile.name)
            } else {
                profile.name.clone()
            };
            let mut name_spans = vec![Span::styled(
                name,
                Style::default().add_modifier(Modifier::BOLD),
            )];
            if profile.has_photo() {
                name_spans.push(Span::styled(
                    "  [photo]",
                    Style::default().fg(Color::Cyan),
                ));
            }
            lines.push(Line::from(name_spans));

            lines.push(Line::from(Span::styled(
                profile.owner_display().to_string(),
                Style::default().fg(Color::Gray),
            )));
            lines.push(Line::from(profile.summary_display().to_string()));

            let paragraph = Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Left)
                .style(paragraph_style);

            frame.render_widget(paragraph, *chunk);
        }
    }

    fn draw_detail(&self, frame: &mut Frame, area: Rect, detail: &DetailScreen) {
        let block = Block::default().title("Dog Profile").borders(Borders::ALL);

        let mut lines = Vec::new();
        match &detail.preview {
            Some(rows) => {
                for row in rows {
                    lines.push(Line::from(Span::styled(
                        row.clone(),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
            }
            None => {
                lines.push(Line::from(Span::styled(
                    "No photo",
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            detail.profile.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            detail.profile.owner_display().to_string(),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(detail.profile.summary_display().to_string()));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .alignment(Alignment::Left);
        frame.render_widget(paragraph, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match (&self.screen, &self.mode) {
            (_, Mode::CreatingProfile(_)) => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Switch Field   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Save   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (_, Mode::ConfirmDelete(_)) => Line::from(vec![
                Span::styled("[Y]", key_style),
                Span::raw(" Confirm   "),
                Span::styled("[N/Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (Screen::Detail(_), _) => Line::from(vec![
                Span::styled("[d]", key_style),
                Span::raw(" Delete   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Back   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
            _ => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Select   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Details   "),
                Span::styled("[+]", key_style),
                Span::raw(" Add   "),
                Span::styled("[-]", key_style),
                Span::raw(" Delete   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_profile_form(&self, frame: &mut Frame, area: Rect, form: &ProfileForm) {
        let popup_area = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("New Dog").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let name_line = form.build_line("Name", ProfileField::Name);
        let owner_line = form.build_line("Owner", ProfileField::Owner);
        let summary_line = form.build_line("Summary", ProfileField::Summary);
        let photo_line = form.build_line("Photo", ProfileField::PhotoPath);

        let mut lines = vec![name_line, owner_line, summary_line, photo_line, Line::from("")];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (prefix, row) = match form.active {
            ProfileField::Name => ("Name: ", 0),
            ProfileField::Owner => ("Owner: ", 1),
            ProfileField::Summary => ("Summary: ", 2),
            ProfileField::PhotoPath => ("Photo: ", 3),
        };
        let cursor_x = inner.x + prefix.len() as u16 + form.value_len(form.active) as u16;
        frame.set_cursor_position((cursor_x, inner.y + row));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmProfileDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Deletion")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Delete {}'s profile?", confirm.name)),
            Line::from("This cannot be undone."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
