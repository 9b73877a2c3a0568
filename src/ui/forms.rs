use std::path::PathBuf;

use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::DogProfile;

/// Internal representation of the "new dog" form fields.
#[derive(Default, Clone)]
pub(crate) struct ProfileForm {
    pub(crate) name: String,
    pub(crate) owner: String,
    pub(crate) summary: String,
    pub(crate) photo_path: String,
    pub(crate) active: ProfileField,
    pub(crate) error: Option<String>,
}

/// Fields available within the profile form, in focus order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ProfileField {
    Name,
    Owner,
    Summary,
    PhotoPath,
}

impl Default for ProfileField {
    fn default() -> Self {
        ProfileField::Name
    }
}

/// Validated form values ready to hand to the store.
pub(crate) struct ProfileInput {
    pub(crate) name: String,
    pub(crate) owner: Option<String>,
    pub(crate) summary: Option<String>,
    pub(crate) photo_path: Option<PathBuf>,
}

impl ProfileForm {
    /// Cycle focus across the four fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            ProfileField::Name => ProfileField::Owner,
            ProfileField::Owner => ProfileField::Summary,
            ProfileField::Summary => ProfileField::PhotoPath,
            ProfileField::PhotoPath => ProfileField::Name,
        };
    }

    /// Insert a character into the active field.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            ProfileField::Name => self.name.push(ch),
            ProfileField::Owner => self.owner.push(ch),
            ProfileField::Summary => self.summary.push(ch),
            ProfileField::PhotoPath => self.photo_path.push(ch),
        }
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            ProfileField::Name => {
                self.name.pop();
            }
            ProfileField::Owner => {
                self.owner.pop();
            }
            ProfileField::Summary => {
                self.summary.pop();
            }
            ProfileField::PhotoPath => {
                self.photo_path.pop();
            }
        }
    }

    /// Validate and normalize the inputs before any store interaction. The
    /// name is the only required field; the rest become `None` when blank.
    pub(crate) fn parse_inputs(&self) -> Result<ProfileInput> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(anyhow!("A dog name is required."));
        }

        Ok(ProfileInput {
            name: name.to_string(),
            owner: optional(&self.owner),
            summary: optional(&self.summary),
            photo_path: optional(&self.photo_path).map(PathBuf::from),
        })
    }

    /// Render a styled line for the modal form widget.
    pub(crate) fn build_line(&self, field_name: &str, field: ProfileField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let placeholder = match field {
            ProfileField::Name => "<required>",
            ProfileField::Owner | ProfileField::Summary | ProfileField::PhotoPath => "<optional>",
        };

        let display = if value.is_empty() {
            placeholder.to_string()
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    /// Character length of the requested field, for cursor placement.
    pub(crate) fn value_len(&self, field: ProfileField) -> usize {
        self.value(field).chars().count()
    }

    fn value(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Owner => &self.owner,
            ProfileField::Summary => &self.summary,
            ProfileField::PhotoPath => &self.photo_path,
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// State for confirming the deletion of a profile. Carries the id and name so
/// the dialog keeps working even if the snapshot moves underneath it.
#[derive(Clone)]
pub(crate) struct ConfirmProfileDelete {
    pub(crate) id: String,
    pub(crate) name: String,
}

impl ConfirmProfileDelete {
    pub(crate) fn from(profile: &DogProfile) -> Self {
        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_blocks_parsing() {
        let form = ProfileForm::default();
        assert!(form.parse_inputs().is_err());

        let mut form = ProfileForm::default();
        form.name = "   ".to_string();
        assert!(form.parse_inputs().is_err());
    }

    #[test]
    fn inputs_are_trimmed_and_blank_fields_become_none() {
        let mut form = ProfileForm::default();
        form.name = "  Rex ".to_string();
        form.owner = "   ".to_string();
        form.summary = " Loves fetch. ".to_string();

        let input = form.parse_inputs().unwrap();
        assert_eq!(input.name, "Rex");
        assert!(input.owner.is_none());
        assert_eq!(input.summary.as_deref(), Some("Loves fetch."));
        assert!(input.photo_path.is_none());
    }

    #[test]
    fn photo_path_parses_when_present() {
        let mut form = ProfileForm::default();
        form.name = "Rex".to_string();
        form.photo_path = " /tmp/rex.png ".to_string();

        let input = form.parse_inputs().unwrap();
        assert_eq!(input.photo_path, Some(PathBuf::from("/tmp/rex.png")));
    }

    #[test]
    fn focus_cycles_through_every_field() {
        let mut form = ProfileForm::default();
        assert_eq!(form.active, ProfileField::Name);
        form.toggle_field();
        assert_eq!(form.active, ProfileField::Owner);
        form.toggle_field();
        assert_eq!(form.active, ProfileField::Summary);
        form.toggle_field();
        assert_eq!(form.active, ProfileField::PhotoPath);
        form.toggle_field();
        assert_eq!(form.active, ProfileField::Name);
    }

    #[test]
    fn push_char_edits_the_active_field_and_rejects_controls() {
        let mut form = ProfileForm::default();
        assert!(form.push_char('R'));
        assert!(!form.push_char('\u{8}'));
        form.toggle_field();
        assert!(form.push_char('S'));

        assert_eq!(form.name, "R");
        assert_eq!(form.owner, "S");
    }

    #[test]
    fn backspace_edits_the_active_field() {
        let mut form = ProfileForm::default();
        form.name = "Rex".to_string();
        form.backspace();
        assert_eq!(form.name, "Re");

        form.toggle_field();
        form.backspace();
        assert!(form.owner.is_empty());
    }
}
