//! Admin editing session.
//!
//! An [`EditorSession`] holds a local copy of the [`HeroConfig`] while an
//! operator edits it. Nothing reaches the server until the caller runs the
//! save flow; there is no autosave and no check against a competing editor.
//!
//! ```text
//! Loading ──loaded──▶ Ready ◀──────────────────────────────┐
//!                       │ edit            upload   save    │
//!                       ▼                   │        │     │
//!                    Editing ──────────▶ Uploading / Saving ┘
//!
//! any failure ──▶ Error(msg) ──acknowledge──▶ Ready
//! ```
//!
//! The session performs no I/O. The caller fetches, uploads and posts, then
//! reports the outcome through the matching `*_finished` / `*_failed` call.

use crate::error::EditorError;
use crate::hero::{Card, CardKind, CtaButton, HeroConfig, Slide};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorState {
    /// Waiting for the initial fetch.
    Loading,
    /// Loaded, no unsaved changes.
    Ready,
    /// Holding unsaved changes.
    Editing,
    /// An upload is in flight.
    Uploading,
    /// A save is in flight.
    Saving,
    /// The last fetch, upload or save failed; the message is shown until
    /// acknowledged.
    Error(String),
}

impl EditorState {
    /// Short name for messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Editing => "editing",
            Self::Uploading => "uploading",
            Self::Saving => "saving",
            Self::Error(_) => "showing an error",
        }
    }
}

/// Which call-to-action slot to edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonSlot {
    First,
    Second,
}

/// Editable text fields of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    Title,
    Desc,
    Alt,
}

/// Where the URLs of a finished upload go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTarget {
    /// Append one slide per file, alt text = original file name.
    Slides,
    /// Append to the image list of one card.
    Card { kind: CardKind, index: usize },
}

/// One finished upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// Public URL returned by the upload handler.
    pub src: String,
    /// Name of the file the operator picked.
    pub original_name: String,
}

/// Local editing state for one operator.
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: HeroConfig,
    state: EditorState,
    dirty: bool,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    /// A session waiting for its initial fetch, holding defaults meanwhile.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: HeroConfig::default(),
            state: EditorState::Loading,
            dirty: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &HeroConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Whether local changes have not been saved yet.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The error message being shown, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            EditorState::Error(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    // ── Load ─────────────────────────────────────────────────────────

    /// Start a (re)fetch, discarding unsaved changes.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Busy`] while an upload or save is in flight.
    pub fn begin_load(&mut self) -> Result<(), EditorError> {
        if matches!(self.state, EditorState::Uploading | EditorState::Saving) {
            return Err(EditorError::Busy {
                state: self.state.name(),
            });
        }
        self.state = EditorState::Loading;
        Ok(())
    }

    /// The fetch returned `config`.
    pub fn loaded(&mut self, config: HeroConfig) {
        self.config = config;
        self.dirty = false;
        self.state = EditorState::Ready;
    }

    /// The initial fetch failed; keep editing on top of defaults.
    pub fn load_failed(&mut self, message: impl Into<String>) {
        self.config = HeroConfig::default();
        self.dirty = false;
        self.state = EditorState::Error(message.into());
    }

    /// Dismiss the error banner.
    pub fn acknowledge(&mut self) {
        if matches!(self.state, EditorState::Error(_)) {
            self.state = self.settled_state();
        }
    }

    // ── Text fields ──────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns [`EditorError`] unless the session accepts edits.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), EditorError> {
        self.edit("edit the title", |cfg| {
            cfg.title = title.into();
            true
        })
    }

    /// # Errors
    ///
    /// Returns [`EditorError`] unless the session accepts edits.
    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) -> Result<(), EditorError> {
        self.edit("edit the subtitle", |cfg| {
            cfg.subtitle = subtitle.into();
            true
        })
    }

    /// Update one CTA button. `None` leaves that sub-field unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError`] unless the session accepts edits.
    pub fn set_button(
        &mut self,
        slot: ButtonSlot,
        text: Option<String>,
        href: Option<String>,
    ) -> Result<(), EditorError> {
        self.edit("edit a button", |cfg| {
            let button: &mut CtaButton = match slot {
                ButtonSlot::First => &mut cfg.button1,
                ButtonSlot::Second => &mut cfg.button2,
            };
            let changed = text.is_some() || href.is_some();
            if let Some(text) = text {
                button.text = text;
            }
            if let Some(href) = href {
                button.href = href;
            }
            changed
        })
    }

    // ── Slides ───────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns [`EditorError`] unless the session accepts edits.
    pub fn add_slide(&mut self, slide: Slide) -> Result<(), EditorError> {
        self.edit("add a slide", |cfg| {
            cfg.slides.push(slide);
            true
        })
    }

    /// Remove the slide at `index`; out-of-range indices are ignored.
    ///
    /// Returns whether a slide was removed.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError`] unless the session accepts edits.
    pub fn remove_slide(&mut self, index: usize) -> Result<bool, EditorError> {
        self.edit_reporting("remove a slide", |cfg| remove_at(&mut cfg.slides, index))
    }

    /// Swap the slide at `index` with its neighbour in `direction`.
    ///
    /// Negative moves towards the front, positive towards the back, always
    /// by one position. Moves past either end are ignored. Returns whether anything moved.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError`] unless the session accepts edits.
    pub fn move_slide(&mut self, index: usize, direction: isize) -> Result<bool, EditorError> {
        self.edit_reporting("move a slide", |cfg| move_by(&mut cfg.slides, index, direction))
    }

    /// Set or clear (with an empty string) the alt text of one slide.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError`] unless the session accepts edits.
    pub fn set_slide_alt(&mut self, index: usize, alt: &str) -> Result<bool, EditorError> {
        self.edit_reporting("edit slide alt text", |cfg| {
            let Some(slide) = cfg.slides.get_mut(index) else {
                return false;
            };
            slide.alt = (!alt.is_empty()).then(|| alt.to_owned());
            true
        })
    }

    // ── Cards ────────────────────────────────────────────────────────

    /// Append an empty card.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError`] unless the session accepts edits.
    pub fn add_card(&mut self, kind: CardKind) -> Result<(), EditorError> {
        self.edit("add a card", |cfg| {
            cfg.cards_mut(kind).push(Card::default());
            true
        })
    }

    /// # Errors
    ///
    /// Returns [`EditorError`] unless the session accepts edits.
    pub fn remove_card(&mut self, kind: CardKind, index: usize) -> Result<bool, EditorError> {
        self.edit_reporting("remove a card", |cfg| remove_at(cfg.cards_mut(kind), index))
    }

    /// Same clamping rules as [`move_slide`](Self::move_slide).
    ///
    /// # Errors
    ///
    /// Returns [`EditorError`] unless the session accepts edits.
    pub fn move_card(
        &mut self,
        kind: CardKind,
        index: usize,
        direction: isize,
    ) -> Result<bool, EditorError> {
        self.edit_reporting("move a card", |cfg| move_by(cfg.cards_mut(kind), index, direction))
    }

    /// # Errors
    ///
    /// Returns [`EditorError`] unless the session accepts edits.
    pub fn update_card(
        &mut self,
        kind: CardKind,
        index: usize,
        field: CardField,
        value: &str,
    ) -> Result<bool, EditorError> {
        self.edit_reporting("edit a card", |cfg| {
            let Some(card) = cfg.cards_mut(kind).get_mut(index) else {
                return false;
            };
            let slot = match field {
                CardField::Title => &mut card.title,
                CardField::Desc => &mut card.desc,
                CardField::Alt => &mut card.alt,
            };
            value.clone_into(slot);
            true
        })
    }

    /// # Errors
    ///
    /// Returns [`EditorError`] unless the session accepts edits.
    pub fn remove_card_image(
        &mut self,
        kind: CardKind,
        card: usize,
        image: usize,
    ) -> Result<bool, EditorError> {
        self.edit_reporting("remove a card image", |cfg| {
            cfg.cards_mut(kind)
                .get_mut(card)
                .is_some_and(|c| remove_at(&mut c.images, image))
        })
    }

    /// Append already-hosted image URLs to one card.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError`] unless the session accepts edits.
    pub fn append_card_images(
        &mut self,
        kind: CardKind,
        card: usize,
        urls: Vec<String>,
    ) -> Result<bool, EditorError> {
        self.edit_reporting("add card images", |cfg| {
            match cfg.cards_mut(kind).get_mut(card) {
                Some(c) if !urls.is_empty() => {
                    c.images.extend(urls);
                    true
                }
                _ => false,
            }
        })
    }

    // ── Upload flow ──────────────────────────────────────────────────

    /// Mark an upload as in flight.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError`] while loading, uploading, saving or showing an
    /// error.
    pub fn begin_upload(&mut self) -> Result<(), EditorError> {
        self.ensure_editable("upload")?;
        self.state = EditorState::Uploading;
        Ok(())
    }

    /// Append uploaded URLs to `target` and return to editing.
    ///
    /// A card target that no longer exists drops the URLs; the files stay on
    /// the server either way.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidState`] unless an upload is in flight.
    pub fn uploads_finished(
        &mut self,
        target: UploadTarget,
        images: Vec<UploadedImage>,
    ) -> Result<(), EditorError> {
        self.expect_state(&EditorState::Uploading, "finish an upload")?;
        let added = match target {
            UploadTarget::Slides => {
                let added = !images.is_empty();
                self.config.slides.extend(
                    images
                        .into_iter()
                        .map(|img| Slide::with_alt(img.src, img.original_name)),
                );
                added
            }
            UploadTarget::Card { kind, index } => {
                match self.config.cards_mut(kind).get_mut(index) {
                    Some(card) if !images.is_empty() => {
                        card.images.extend(images.into_iter().map(|img| img.src));
                        true
                    }
                    _ => false,
                }
            }
        };
        self.dirty |= added;
        self.state = self.settled_state();
        Ok(())
    }

    /// The upload failed.
    pub fn upload_failed(&mut self, message: impl Into<String>) {
        self.state = EditorState::Error(message.into());
    }

    // ── Save flow ────────────────────────────────────────────────────

    /// Mark a save as in flight and return the document to post.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError`] while loading, uploading, saving or showing an
    /// error.
    pub fn begin_save(&mut self) -> Result<HeroConfig, EditorError> {
        self.ensure_editable("save")?;
        self.state = EditorState::Saving;
        Ok(self.config.clone())
    }

    /// The server accepted the save.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidState`] unless a save is in flight.
    pub fn save_succeeded(&mut self) -> Result<(), EditorError> {
        self.expect_state(&EditorState::Saving, "finish a save")?;
        self.dirty = false;
        self.state = EditorState::Ready;
        Ok(())
    }

    /// The save failed; local changes are kept.
    pub fn save_failed(&mut self, message: impl Into<String>) {
        self.state = EditorState::Error(message.into());
    }

    // ── Internals ────────────────────────────────────────────────────

    fn settled_state(&self) -> EditorState {
        if self.dirty {
            EditorState::Editing
        } else {
            EditorState::Ready
        }
    }

    fn ensure_editable(&self, operation: &'static str) -> Result<(), EditorError> {
        match self.state {
            EditorState::Ready | EditorState::Editing => Ok(()),
            EditorState::Uploading | EditorState::Saving => Err(EditorError::Busy {
                state: self.state.name(),
            }),
            EditorState::Loading | EditorState::Error(_) => Err(EditorError::InvalidState {
                operation,
                state: self.state.name(),
            }),
        }
    }

    fn expect_state(
        &self,
        expected: &EditorState,
        operation: &'static str,
    ) -> Result<(), EditorError> {
        if &self.state == expected {
            Ok(())
        } else {
            Err(EditorError::InvalidState {
                operation,
                state: self.state.name(),
            })
        }
    }

    fn edit(
        &mut self,
        operation: &'static str,
        f: impl FnOnce(&mut HeroConfig) -> bool,
    ) -> Result<(), EditorError> {
        self.edit_reporting(operation, f).map(|_| ())
    }

    fn edit_reporting(
        &mut self,
        operation: &'static str,
        f: impl FnOnce(&mut HeroConfig) -> bool,
    ) -> Result<bool, EditorError> {
        self.ensure_editable(operation)?;
        let changed = f(&mut self.config);
        if changed {
            self.dirty = true;
            self.state = EditorState::Editing;
        }
        Ok(changed)
    }
}

fn remove_at<T>(items: &mut Vec<T>, index: usize) -> bool {
    if index < items.len() {
        items.remove(index);
        true
    } else {
        false
    }
}

/// Swap `items[index]` with its neighbour on the side of `direction`.
///
/// Only the sign of `direction` counts; a move is always one position.
fn move_by<T>(items: &mut [T], index: usize, direction: isize) -> bool {
    let Some(target) = index.checked_add_signed(direction.signum()) else {
        return false;
    };
    if index >= items.len() || target >= items.len() || target == index {
        return false;
    }
    items.swap(index, target);
    true
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn slides(names: &[&str]) -> Vec<Slide> {
        names.iter().map(|n| Slide::new(*n)).collect()
    }

    fn ready_with_slides(names: &[&str]) -> EditorSession {
        let mut session = EditorSession::new();
        session.loaded(HeroConfig {
            slides: slides(names),
            ..HeroConfig::default()
        });
        session
    }

    fn srcs(session: &EditorSession) -> Vec<&str> {
        session.config().slides.iter().map(|s| s.src.as_str()).collect()
    }

    #[test]
    fn starts_loading_and_rejects_edits() {
        let mut session = EditorSession::new();
        assert_eq!(session.state(), &EditorState::Loading);
        assert!(matches!(
            session.set_title("x"),
            Err(EditorError::InvalidState { .. })
        ));
    }

    #[test]
    fn moving_first_slide_left_is_ignored() {
        let mut session = ready_with_slides(&["a", "b", "c"]);
        assert!(!session.move_slide(0, -1).unwrap());
        assert_eq!(srcs(&session), ["a", "b", "c"]);
        assert_eq!(session.state(), &EditorState::Ready);
        assert!(!session.is_dirty());
    }

    #[test]
    fn moving_last_slide_right_is_ignored() {
        let mut session = ready_with_slides(&["a", "b", "c"]);
        assert!(!session.move_slide(2, 1).unwrap());
        assert!(!session.move_slide(7, -1).unwrap());
        assert_eq!(srcs(&session), ["a", "b", "c"]);
    }

    #[test]
    fn move_swaps_with_neighbour() {
        let mut session = ready_with_slides(&["a", "b", "c"]);
        assert!(session.move_slide(1, -1).unwrap());
        assert_eq!(srcs(&session), ["b", "a", "c"]);
        assert!(session.move_slide(1, 1).unwrap());
        assert_eq!(srcs(&session), ["b", "c", "a"]);
        assert_eq!(session.state(), &EditorState::Editing);
    }

    #[test]
    fn move_is_always_one_position() {
        let mut session = ready_with_slides(&["a", "b", "c", "d"]);
        assert!(session.move_slide(0, 2).unwrap());
        assert_eq!(srcs(&session), ["b", "a", "c", "d"]);
        assert!(session.move_slide(3, -3).unwrap());
        assert_eq!(srcs(&session), ["b", "a", "d", "c"]);
        assert!(!session.move_slide(1, 0).unwrap());
        assert_eq!(srcs(&session), ["b", "a", "d", "c"]);
    }

    #[test]
    fn remove_and_alt_edits() {
        let mut session = ready_with_slides(&["a", "b"]);
        assert!(session.set_slide_alt(1, "stern").unwrap());
        assert_eq!(session.config().slides[1].alt.as_deref(), Some("stern"));
        assert!(session.set_slide_alt(1, "").unwrap());
        assert_eq!(session.config().slides[1].alt, None);

        assert!(session.remove_slide(0).unwrap());
        assert!(!session.remove_slide(5).unwrap());
        assert_eq!(srcs(&session), ["b"]);
    }

    #[test]
    fn card_operations() {
        let mut session = ready_with_slides(&[]);
        session.add_card(CardKind::Products).unwrap();
        session.add_card(CardKind::Products).unwrap();
        session
            .update_card(CardKind::Products, 0, CardField::Title, "Ropes")
            .unwrap();
        session
            .update_card(CardKind::Products, 1, CardField::Desc, "Paint")
            .unwrap();

        assert!(session.move_card(CardKind::Products, 0, 1).unwrap());
        assert!(!session.move_card(CardKind::Products, 0, -1).unwrap());
        assert_eq!(session.config().products[0].desc, "Paint");
        assert_eq!(session.config().products[1].title, "Ropes");

        assert!(!session
            .update_card(CardKind::TechnicalServices, 0, CardField::Alt, "x")
            .unwrap());
        assert!(session.remove_card(CardKind::Products, 1).unwrap());
        assert_eq!(session.config().products.len(), 1);
    }

    #[test]
    fn upload_appends_slides_with_file_name_as_alt() {
        let mut session = ready_with_slides(&["a"]);
        session.begin_upload().unwrap();
        assert!(matches!(session.set_title("x"), Err(EditorError::Busy { .. })));

        session
            .uploads_finished(
                UploadTarget::Slides,
                vec![UploadedImage {
                    src: "/uploads/1-deck.jpg".to_owned(),
                    original_name: "deck.jpg".to_owned(),
                }],
            )
            .unwrap();

        assert_eq!(session.state(), &EditorState::Editing);
        assert_eq!(
            session.config().slides[1],
            Slide::with_alt("/uploads/1-deck.jpg", "deck.jpg")
        );
    }

    #[test]
    fn upload_to_missing_card_leaves_session_clean() {
        let mut session = ready_with_slides(&["a"]);
        session.begin_upload().unwrap();
        session
            .uploads_finished(
                UploadTarget::Card {
                    kind: CardKind::Products,
                    index: 3,
                },
                vec![UploadedImage {
                    src: "/uploads/1-lost.png".to_owned(),
                    original_name: "lost.png".to_owned(),
                }],
            )
            .unwrap();

        assert!(!session.is_dirty());
        assert_eq!(session.state(), &EditorState::Ready);
        assert!(session.config().products.is_empty());
    }

    #[test]
    fn upload_to_card_appends_images_then_image_can_be_removed() {
        let mut session = ready_with_slides(&[]);
        session.add_card(CardKind::TechnicalServices).unwrap();
        session.begin_upload().unwrap();
        session
            .uploads_finished(
                UploadTarget::Card {
                    kind: CardKind::TechnicalServices,
                    index: 0,
                },
                vec![
                    UploadedImage {
                        src: "/uploads/1-a.png".to_owned(),
                        original_name: "a.png".to_owned(),
                    },
                    UploadedImage {
                        src: "/uploads/2-b.png".to_owned(),
                        original_name: "b.png".to_owned(),
                    },
                ],
            )
            .unwrap();
        assert_eq!(
            session.config().technical_services[0].images,
            vec!["/uploads/1-a.png", "/uploads/2-b.png"]
        );

        assert!(session
            .remove_card_image(CardKind::TechnicalServices, 0, 0)
            .unwrap());
        assert_eq!(
            session.config().technical_services[0].images,
            vec!["/uploads/2-b.png"]
        );
    }

    #[test]
    fn failed_upload_shows_error_until_acknowledged() {
        let mut session = ready_with_slides(&["a"]);
        session.begin_upload().unwrap();
        session.upload_failed("only image files are allowed");
        assert_eq!(session.error(), Some("only image files are allowed"));
        assert!(session.begin_save().is_err());

        session.acknowledge();
        assert_eq!(session.state(), &EditorState::Ready);
    }

    #[test]
    fn save_flow_clears_dirty_flag() {
        let mut session = ready_with_slides(&[]);
        session.set_title("Marine chandlery").unwrap();
        assert!(session.is_dirty());

        let snapshot = session.begin_save().unwrap();
        assert_eq!(snapshot.title, "Marine chandlery");
        assert!(matches!(session.begin_upload(), Err(EditorError::Busy { .. })));

        session.save_succeeded().unwrap();
        assert_eq!(session.state(), &EditorState::Ready);
        assert!(!session.is_dirty());
    }

    #[test]
    fn failed_save_keeps_local_changes() {
        let mut session = ready_with_slides(&[]);
        session.set_subtitle("Draft").unwrap();
        session.begin_save().unwrap();
        session.save_failed("disk full");

        session.acknowledge();
        assert_eq!(session.state(), &EditorState::Editing);
        assert_eq!(session.config().subtitle, "Draft");
    }

    #[test]
    fn load_failure_falls_back_to_defaults() {
        let mut session = EditorSession::new();
        session.load_failed("connection refused");
        assert_eq!(session.config(), &HeroConfig::default());
        session.acknowledge();
        assert!(session.set_title("ok").is_ok());
    }

    #[test]
    fn finishing_without_begin_is_rejected() {
        let mut session = ready_with_slides(&[]);
        assert!(session.save_succeeded().is_err());
        assert!(session.uploads_finished(UploadTarget::Slides, Vec::new()).is_err());
    }

    #[test]
    fn reload_discards_local_changes() {
        let mut session = ready_with_slides(&["a"]);
        session.remove_slide(0).unwrap();
        session.begin_load().unwrap();
        assert!(session.add_slide(Slide::new("b")).is_err());

        session.loaded(HeroConfig {
            slides: slides(&["a"]),
            ..HeroConfig::default()
        });
        assert_eq!(srcs(&session), ["a"]);
        assert!(!session.is_dirty());
    }

    #[test]
    fn append_card_images_ignores_missing_card() {
        let mut session = ready_with_slides(&[]);
        assert!(!session
            .append_card_images(CardKind::Products, 0, vec!["/uploads/x.png".to_owned()])
            .unwrap());
        session.add_card(CardKind::Products).unwrap();
        assert!(session
            .append_card_images(CardKind::Products, 0, vec!["/uploads/x.png".to_owned()])
            .unwrap());
        assert_eq!(session.config().products[0].images, vec!["/uploads/x.png"]);
    }

    #[test]
    fn button_edit_touches_only_given_parts() {
        let mut session = ready_with_slides(&[]);
        session
            .set_button(ButtonSlot::Second, None, Some("#contact".to_owned()))
            .unwrap();
        assert_eq!(session.config().button2.text, "View Catalogue");
        assert_eq!(session.config().button2.href, "#contact");
    }
}
