//! # Sidebar
//!
//! The list of conversations known to this client, newest first, plus the
//! active highlight, keyboard selection and visibility toggle.
//!
//! Removal is animated: an entry leaves the list model immediately (it no
//! longer counts as a conversation) but stays renderable while it fades out.

use std::time::{Duration, Instant};

use super::conversation::ConversationId;
use super::title::AnimatedTitle;

/// Slide-in duration of a freshly inserted entry.
pub const SLIDE_IN: Duration = Duration::from_millis(300);
/// Fade-out after an explicit delete.
pub const REMOVE_FADE: Duration = Duration::from_millis(300);
/// Faster fade-out for empty conversations discarded on navigation.
pub const CLEANUP_FADE: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPhase {
    Entering { since: Instant },
    Idle,
    Leaving { since: Instant, fade: Duration },
}

#[derive(Debug, Clone)]
pub struct SidebarEntry {
    pub id: ConversationId,
    pub title: AnimatedTitle,
    pub updated_at: String,
    pub phase: EntryPhase,
}

impl SidebarEntry {
    pub fn new(id: ConversationId, title: impl Into<String>, updated_at: impl Into<String>) -> Self {
        Self {
            id,
            title: AnimatedTitle::new(title),
            updated_at: updated_at.into(),
            phase: EntryPhase::Idle,
        }
    }

    pub fn is_leaving(&self) -> bool {
        matches!(self.phase, EntryPhase::Leaving { .. })
    }

    /// Animation progress in `0.0..=1.0`: 1.0 is fully shown.
    pub fn opacity(&self, now: Instant) -> f32 {
        match self.phase {
            EntryPhase::Idle => 1.0,
            EntryPhase::Entering { since } => progress(since, SLIDE_IN, now),
            EntryPhase::Leaving { since, fade } => 1.0 - progress(since, fade, now),
        }
    }
}

fn progress(since: Instant, total: Duration, now: Instant) -> f32 {
    if total.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(since).as_secs_f32();
    (elapsed / total.as_secs_f32()).clamp(0.0, 1.0)
}

#[derive(Debug, Default)]
pub struct Sidebar {
    entries: Vec<SidebarEntry>,
    active: Option<ConversationId>,
    selected: usize,
    pub hidden: bool,
}

impl Sidebar {
    pub fn new(hidden: bool) -> Self {
        Self {
            hidden,
            ..Self::default()
        }
    }

    /// Append an entry known at startup (no animation, not active).
    pub fn push_seed(&mut self, entry: SidebarEntry) {
        if self.position(entry.id).is_none() {
            self.entries.push(entry);
        }
    }

    /// Insert a new conversation at the top, slide it in and make it active.
    pub fn insert_top(&mut self, mut entry: SidebarEntry, now: Instant) {
        self.entries.retain(|e| e.id != entry.id);
        entry.phase = EntryPhase::Entering { since: now };
        self.active = Some(entry.id);
        self.entries.insert(0, entry);
        self.selected = 0;
    }

    /// Start removing an entry. Returns false if it was not listed.
    pub fn remove(&mut self, id: ConversationId, fade: Duration, now: Instant) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id && !e.is_leaving()) else {
            return false;
        };
        entry.phase = EntryPhase::Leaving { since: now, fade };
        if self.active == Some(id) {
            self.active = None;
        }
        self.clamp_selection();
        true
    }

    pub fn set_active(&mut self, id: ConversationId) {
        self.active = Some(id);
        let index = self.live().position(|e| e.id == id);
        if let Some(index) = index {
            self.selected = index;
        }
    }

    pub fn active(&self) -> Option<ConversationId> {
        self.active
    }

    /// Number of conversations listed, excluding entries that are fading out.
    pub fn live_count(&self) -> usize {
        self.live().count()
    }

    pub fn is_empty(&self) -> bool {
        self.live_count() == 0
    }

    pub fn contains(&self, id: ConversationId) -> bool {
        self.live().any(|e| e.id == id)
    }

    /// Every renderable entry, including those fading out.
    pub fn entries(&self) -> &[SidebarEntry] {
        &self.entries
    }

    pub fn entry_mut(&mut self, id: ConversationId) -> Option<&mut SidebarEntry> {
        self.entries.iter_mut().find(|e| e.id == id && !e.is_leaving())
    }

    pub fn select_next(&mut self) {
        let count = self.live_count();
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_id(&self) -> Option<ConversationId> {
        self.live().nth(self.selected).map(|e| e.id)
    }

    /// Settle finished animations and purge entries that have faded out.
    pub fn tick(&mut self, now: Instant) {
        for entry in &mut self.entries {
            if let EntryPhase::Entering { since } = entry.phase
                && now.saturating_duration_since(since) >= SLIDE_IN
            {
                entry.phase = EntryPhase::Idle;
            }
            entry.title.tick(now);
        }
        self.entries.retain(|e| match e.phase {
            EntryPhase::Leaving { since, fade } => now.saturating_duration_since(since) < fade,
            _ => true,
        });
    }

    fn live(&self) -> impl Iterator<Item = &SidebarEntry> {
        self.entries.iter().filter(|e| !e.is_leaving())
    }

    fn position(&self, id: ConversationId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    fn clamp_selection(&mut self) {
        let count = self.live_count();
        self.selected = self.selected.min(count.saturating_sub(1));
    }
}
