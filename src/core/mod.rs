//! # Core Application Logic
//!
//! This module contains the chat widget's business logic.
//! It knows nothing about terminals or HTTP.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Dispatch  │      │   Speech   │
//!     │  Adapter   │      │ (backend)  │      │ recognizer │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all widget state in one place
//! - [`action`]: `Action`, `Effect` and the `update()` reducer
//! - [`tracker`]: Which conversations hold messages; empty-conversation cleanup
//! - [`sidebar`], [`transcript`], [`title`], [`notification`], [`modal`]:
//!   the individual pieces of on-screen state
//! - [`config`], [`prefs`]: settings read at startup and the persisted sidebar toggle

pub mod action;
pub mod config;
pub mod conversation;
pub mod modal;
pub mod notification;
pub mod prefs;
pub mod sidebar;
pub mod state;
pub mod texts;
pub mod title;
pub mod tracker;
pub mod transcript;
pub mod voice;
