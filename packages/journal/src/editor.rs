//! # Entry editor state
//!
//! Buffers the form for one entry being created or edited and turns it into exactly
//! one store write per submit.
//!
//! A submit is split in two so that UI code can keep the editor in reactive state and
//! run the write on its own task:
//!
//! - [`EntryEditor::begin_submit`] validates the draft, marks the editor as saving and
//!   returns the [`Write`] to perform (a create, or an update when an entry is bound);
//! - [`EntryEditor::finish_submit`] takes the write's result. Success clears the draft
//!   and closes the editor; failure keeps the draft and records an error so the author
//!   can retry.
//!
//! While a write is in flight `begin_submit` refuses with [`JournalError::Busy`].
//! [`EntryEditor::submit`] does both halves for callers that can simply await.

use store::{Entry, EntryFields, EntryStore, StoreError};

use crate::error::{JournalError, ValidationError};

/// The form fields as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
    /// Empty means "no image".
    pub image_url: String,
    pub display_date: String,
}

impl Draft {
    /// An empty form dated `today`.
    pub fn blank(today: impl Into<String>) -> Self {
        Self {
            display_date: today.into(),
            ..Self::default()
        }
    }

    /// A form pre-filled from `entry`.
    ///
    /// A stored image equal to `default_image` shows as empty, and a stored timestamp
    /// is cut down to its date.
    pub fn from_entry(entry: &Entry, default_image: &str) -> Self {
        let image_url = match entry.image_url.as_deref() {
            Some(url) if url != default_image => url.to_string(),
            _ => String::new(),
        };
        Self {
            title: entry.title.clone(),
            content: entry.content.clone(),
            image_url,
            display_date: store::models::normalize_display_date(&entry.display_date).to_string(),
        }
    }

    /// Check the draft and produce the fields to write.
    pub fn validate(&self) -> Result<EntryFields, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let content = self.content.trim();
        if content.is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        let display_date = self.display_date.trim();
        if !store::models::is_valid_display_date(display_date) {
            return Err(ValidationError::InvalidDate(self.display_date.clone()));
        }
        let image_url = Some(self.image_url.trim())
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        Ok(EntryFields {
            title: title.to_string(),
            content: content.to_string(),
            image_url,
            display_date: display_date.to_string(),
        })
    }
}

/// The single store call a submit performs.
#[derive(Clone, Debug, PartialEq)]
pub enum Write {
    Create(EntryFields),
    Update { id: String, fields: EntryFields },
}

impl Write {
    /// Perform the write, returning the id of the entry written.
    pub async fn execute<S: EntryStore>(&self, store: &S) -> Result<String, StoreError> {
        match self {
            Self::Create(fields) => store.create(fields.clone()).await,
            Self::Update { id, fields } => {
                store.update(id, fields.clone()).await?;
                Ok(id.clone())
            }
        }
    }
}

/// A write that the store accepted.
#[derive(Clone, Debug, PartialEq)]
pub struct Committed {
    pub id: String,
    pub fields: EntryFields,
    pub updated: bool,
}

/// Form state for creating or editing one entry.
#[derive(Clone, Debug, Default)]
pub struct EntryEditor {
    draft: Draft,
    editing: Option<String>,
    open: bool,
    /// Bumped whenever the form is opened or closed, so a save can tell whether the
    /// form it came from is still on screen.
    generation: u64,
    in_flight: Option<(u64, Write)>,
    error: Option<JournalError>,
}

impl EntryEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_saving(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Id of the entry being edited, `None` when creating.
    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// Last validation or write error, shown next to the form.
    pub fn error(&self) -> Option<&JournalError> {
        self.error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Open an empty form for a new entry.
    pub fn open_new(&mut self, today: impl Into<String>) {
        self.draft = Draft::blank(today);
        self.editing = None;
        self.error = None;
        self.open = true;
        self.generation += 1;
    }

    /// Open the form on an existing entry.
    pub fn open_edit(&mut self, entry: &Entry, default_image: &str) {
        self.draft = Draft::from_entry(entry, default_image);
        self.editing = Some(entry.id.clone());
        self.error = None;
        self.open = true;
        self.generation += 1;
    }

    /// Close the form and forget the draft. A write already in flight still lands.
    pub fn close(&mut self) {
        self.draft = Draft::default();
        self.editing = None;
        self.error = None;
        self.open = false;
        self.generation += 1;
    }

    /// Validate and mark the editor as saving. Returns the write to perform.
    pub fn begin_submit(&mut self) -> Result<Write, JournalError> {
        if !self.open {
            return Err(JournalError::EditorClosed);
        }
        if self.in_flight.is_some() {
            return Err(JournalError::Busy);
        }
        let fields = match self.draft.validate() {
            Ok(fields) => fields,
            Err(e) => {
                self.error = Some(e.clone().into());
                return Err(e.into());
            }
        };
        let write = match &self.editing {
            Some(id) => Write::Update {
                id: id.clone(),
                fields,
            },
            None => Write::Create(fields),
        };
        self.error = None;
        self.in_flight = Some((self.generation, write.clone()));
        Ok(write)
    }

    /// Record the outcome of the write returned by [`begin_submit`](Self::begin_submit).
    ///
    /// Only touches the form when it is still the one the write came from. If the
    /// author closed it and opened another form meanwhile, that form is left alone.
    pub fn finish_submit(
        &mut self,
        result: Result<String, StoreError>,
    ) -> Result<Committed, JournalError> {
        let (generation, write) = self.in_flight.take().ok_or(JournalError::EditorClosed)?;
        let current = self.open && generation == self.generation;
        match result {
            Ok(id) => {
                tracing::debug!(%id, "entry saved");
                let updated = matches!(write, Write::Update { .. });
                let fields = match write {
                    Write::Create(fields) | Write::Update { fields, .. } => fields,
                };
                if current {
                    self.close();
                }
                Ok(Committed {
                    id,
                    fields,
                    updated,
                })
            }
            Err(e) => {
                tracing::warn!("saving entry failed: {e}");
                let err = JournalError::from(e);
                if current {
                    self.error = Some(err.clone());
                }
                Err(err)
            }
        }
    }

    /// Validate, write and record the result in one go.
    pub async fn submit<S: EntryStore>(&mut self, store: &S) -> Result<Committed, JournalError> {
        let write = self.begin_submit()?;
        let result = write.execute(store).await;
        self.finish_submit(result)
    }
}
