use crate::models::DogProfile;
use crate::photo;

/// Column width of the ASCII photo preview on the detail screen.
const PREVIEW_WIDTH: u32 = 56;

/// In-memory ordered snapshot of the store, kept sorted ascending by name.
/// The snapshot is refreshed explicitly by its owner rather than being a live
/// view: creates append and re-sort, deletes remove by id, and neither path
/// re-fetches from the store.
pub(crate) struct ProfileList {
    pub(crate) profiles: Vec<DogProfile>,
    pub(crate) selected: usize,
}

impl ProfileList {
    pub(crate) fn new(mut profiles: Vec<DogProfile>) -> Self {
        sort_by_name(&mut profiles);
        Self {
            profiles,
            selected: 0,
        }
    }

    /// Append a freshly saved profile, re-sort, and focus it.
    pub(crate) fn insert(&mut self, profile: DogProfile) {
        let id = profile.id.clone();
        self.profiles.push(profile);
        sort_by_name(&mut self.profiles);
        if let Some(idx) = self.profiles.iter().position(|p| p.id == id) {
            self.selected = idx;
        }
    }

    /// Drop the profile with the given identifier. Membership is decided by
    /// id, never by field values, so two dogs sharing a name stay distinct.
    pub(crate) fn remove_by_id(&mut self, id: &str) {
        self.profiles.retain(|p| p.id != id);
        if self.profiles.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.profiles.len() {
            self.selected = self.profiles.len() - 1;
        }
    }

    pub(crate) fn current(&self) -> Option<&DogProfile> {
        self.profiles.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.profiles.is_empty() {
            return;
        }
        let len = self.profiles.len() as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        if !self.profiles.is_empty() {
            self.selected = 0;
        }
    }

    pub(crate) fn select_last(&mut self) {
        if !self.profiles.is_empty() {
            self.selected = self.profiles.len() - 1;
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Lowercase first with the original text as tiebreak, so mixed-case names
/// group together while the order stays deterministic.
fn sort_by_name(profiles: &mut [DogProfile]) {
    profiles.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Backing state for the read-only detail view of one profile. The preview
/// rows are derived from the stored photo bytes once, when the screen opens,
/// and never persisted.
pub(crate) struct DetailScreen {
    pub(crate) profile: DogProfile,
    pub(crate) preview: Option<Vec<String>>,
}

impl DetailScreen {
    pub(crate) fn new(profile: DogProfile) -> Self {
        let preview = profile
            .photo
            .as_deref()
            .and_then(|bytes| photo::preview_rows(bytes, PREVIEW_WIDTH).ok());
        Self { profile, preview }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgb};

    use super::*;

    fn profile(id: &str, name: &str) -> DogProfile {
        DogProfile {
            id: id.to_string(),
            name: name.to_string(),
            owner: None,
            summary: None,
            photo: None,
        }
    }

    fn names(list: &ProfileList) -> Vec<&str> {
        list.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn new_sorts_ascending_by_name() {
        let list = ProfileList::new(vec![
            profile("1", "rex"),
            profile("2", "Ace"),
            profile("3", "Biscuit"),
        ]);
        assert_eq!(names(&list), ["Ace", "Biscuit", "rex"]);
    }

    #[test]
    fn insert_keeps_order_and_focuses_the_new_profile() {
        let mut list = ProfileList::new(vec![profile("1", "Ace"), profile("2", "Rex")]);
        list.insert(profile("3", "Milo"));

        assert_eq!(names(&list), ["Ace", "Milo", "Rex"]);
        assert_eq!(list.selected, 1);
        assert_eq!(list.current().unwrap().id, "3");
    }

    #[test]
    fn remove_by_id_distinguishes_identical_names() {
        let mut list = ProfileList::new(vec![profile("1", "Twin"), profile("2", "Twin")]);
        list.remove_by_id("2");

        assert_eq!(list.profiles.len(), 1);
        assert_eq!(list.profiles[0].id, "1");
    }

    #[test]
    fn remove_by_id_clamps_the_selection() {
        let mut list = ProfileList::new(vec![profile("1", "Ace"), profile("2", "Rex")]);
        list.select_last();
        list.remove_by_id("2");
        assert_eq!(list.selected, 0);

        list.remove_by_id("1");
        assert!(list.is_empty());
        assert_eq!(list.selected, 0);
        assert!(list.current().is_none());
    }

    #[test]
    fn removing_an_unknown_id_changes_nothing() {
        let mut list = ProfileList::new(vec![profile("1", "Ace")]);
        list.remove_by_id("no-such-id");
        assert_eq!(list.profiles.len(), 1);
    }

    #[test]
    fn selection_clamps_at_both_ends() {
        let mut list = ProfileList::new(vec![
            profile("1", "Ace"),
            profile("2", "Biscuit"),
            profile("3", "Rex"),
        ]);

        list.move_selection(-5);
        assert_eq!(list.selected, 0);
        list.move_selection(10);
        assert_eq!(list.selected, 2);
        list.select_first();
        assert_eq!(list.selected, 0);
        list.select_last();
        assert_eq!(list.selected, 2);
    }

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(160, 90, Rgb([200, 200, 200]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn detail_derives_a_preview_from_stored_bytes() {
        let mut with_photo = profile("1", "Rex");
        with_photo.photo = Some(png_bytes());

        let screen = DetailScreen::new(with_photo);
        let rows = screen.preview.expect("preview rows");
        assert!(!rows.is_empty());
    }

    #[test]
    fn detail_without_photo_has_no_preview() {
        let screen = DetailScreen::new(profile("1", "Rex"));
        assert!(screen.preview.is_none());
    }

    #[test]
    fn detail_with_undecodable_bytes_has_no_preview() {
        let mut broken = profile("1", "Rex");
        broken.photo = Some(b"not an image".to_vec());

        let screen = DetailScreen::new(broken);
        assert!(screen.preview.is_none());
    }
}
