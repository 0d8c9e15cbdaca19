//! Ordered batch container with per-entry exchange status.
//!
//! A [`Store`] owns its items until they are successfully exchanged. Entries
//! carry a monotonically increasing identifier assigned at insertion and a
//! four-state status driven by the probe, selection, and drain passes.
//! Entries live in a growable vector; committing a drain round marks the
//! sent entries `Processed` and drops them in a single `retain` pass, so
//! identifiers are never reused and iteration never observes removal.

use crate::{error::UplinkError, item::Item, sizing, wire};

/// Stable identifier assigned to a store entry at insertion, 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

impl EntryId {
    /// Inner numeric identifier.
    #[must_use]
    pub const fn get(self) -> u64 { self.0 }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

/// Exchange status of one entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryStatus {
    /// Eligible for selection; the initial state.
    Ready,
    /// Chosen for the in-flight batch, not yet committed.
    Selected,
    /// Rendered into a body that transport accepted; removed at commit.
    Processed,
    /// Permanently excluded: cannot fit one body even alone.
    Ignored,
}

/// One store slot: an owned item plus its exchange bookkeeping.
#[derive(Debug)]
pub struct StoreEntry {
    id: EntryId,
    item: Item,
    status: EntryStatus,
    /// Cached tuple size, valid only after a size-probe pass.
    size: Option<usize>,
}

impl StoreEntry {
    /// Identifier assigned at insertion.
    #[must_use]
    pub const fn id(&self) -> EntryId { self.id }

    /// Current exchange status.
    #[must_use]
    pub const fn status(&self) -> EntryStatus { self.status }

    /// Cached tuple size from the last probe pass, if any.
    #[must_use]
    pub const fn size(&self) -> Option<usize> { self.size }

    /// The wrapped item.
    #[must_use]
    pub const fn item(&self) -> &Item { &self.item }

    pub(crate) fn item_mut(&mut self) -> &mut Item { &mut self.item }
}

/// Ordered collection of items awaiting upload.
#[derive(Debug)]
pub struct Store {
    entries: Vec<StoreEntry>,
    next_id: u64,
}

impl Default for Store {
    fn default() -> Self { Self::new() }
}

impl Store {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Validate and append `item`, returning its assigned identifier.
    ///
    /// Identifiers are strictly increasing in insertion order and are never
    /// reused, even after earlier entries are removed.
    ///
    /// # Errors
    ///
    /// Returns the item's validation error; the store is left unchanged.
    pub fn add(&mut self, item: impl Into<Item>) -> Result<EntryId, UplinkError> {
        let item = item.into();
        item.validate()?;
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push(StoreEntry {
            id,
            item,
            status: EntryStatus::Ready,
            size: None,
        });
        Ok(id)
    }

    /// Number of entries currently held, `Ignored` ones included.
    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    /// Whether the store holds no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[StoreEntry] { &self.entries }

    /// Number of entries currently in `status`.
    #[must_use]
    pub fn count_with_status(&self, status: EntryStatus) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.status == status)
            .count()
    }

    /// Size-probe pass: cache each `Ready` entry's tuple size, permanently
    /// ignoring entries that could not fit a body of `max_body_size` even
    /// with zero other content.
    pub(crate) fn probe(&mut self, max_body_size: usize) {
        for entry in &mut self.entries {
            if entry.status != EntryStatus::Ready {
                continue;
            }
            let size = sizing::tuple_size(&entry.item);
            entry.size = Some(size);
            if size + wire::body_close_len() > max_body_size {
                log::warn!(
                    "store entry {} ({}) needs {} bytes and can never fit a {}-byte body; ignoring it permanently",
                    entry.id,
                    entry.item.kind(),
                    size + wire::body_close_len(),
                    max_body_size,
                );
                entry.status = EntryStatus::Ignored;
            }
        }
    }

    /// Greedy first-fit selection in insertion order.
    ///
    /// Iteration order is stable so earlier-inserted items are never starved
    /// by later smaller ones. Returns the exact byte count one body needs
    /// for the selected entries (their tuples plus the closing boundary), or
    /// zero when nothing fits.
    pub(crate) fn select(&mut self, budget: usize) -> usize {
        let mut remaining = budget.saturating_sub(wire::body_close_len());
        let mut consumed = 0_usize;
        for entry in &mut self.entries {
            if entry.status != EntryStatus::Ready {
                continue;
            }
            let Some(size) = entry.size else {
                // Not yet probed; a later pass will size it.
                continue;
            };
            if size <= remaining {
                entry.status = EntryStatus::Selected;
                remaining -= size;
                consumed += size;
            }
        }
        if consumed == 0 {
            0
        } else {
            consumed + wire::body_close_len()
        }
    }

    pub(crate) fn selected_mut(&mut self) -> impl Iterator<Item = &mut StoreEntry> {
        self.entries
            .iter_mut()
            .filter(|entry| entry.status == EntryStatus::Selected)
    }

    /// Roll every `Selected` entry back to `Ready` after a failed round.
    pub(crate) fn rollback_selected(&mut self) {
        for entry in &mut self.entries {
            if entry.status == EntryStatus::Selected {
                entry.status = EntryStatus::Ready;
            }
        }
    }

    /// Commit the in-flight round: `Selected` entries become `Processed` and
    /// are dropped together with their owned items. Returns the number of
    /// entries committed.
    pub(crate) fn commit_selected(&mut self) -> usize {
        let mut committed = 0_usize;
        for entry in &mut self.entries {
            if entry.status == EntryStatus::Selected {
                entry.status = EntryStatus::Processed;
                committed += 1;
            }
        }
        self.entries
            .retain(|entry| entry.status != EntryStatus::Processed);
        committed
    }

    /// Whether every remaining entry is permanently `Ignored`.
    pub(crate) fn all_ignored(&self) -> bool {
        !self.entries.is_empty()
            && self
                .entries
                .iter()
                .all(|entry| entry.status == EntryStatus::Ignored)
    }

    /// Whether any entry is still eligible for selection.
    pub(crate) fn has_ready(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.status == EntryStatus::Ready)
    }

    /// Largest cached tuple size, used for size-error diagnostics.
    pub(crate) fn max_cached_size(&self) -> Option<usize> {
        self.entries.iter().filter_map(|entry| entry.size).max()
    }
}
