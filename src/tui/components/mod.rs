//! # TUI Components
//!
//! UI components for the chat screen.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Built each frame from `App` data:
//! - `Header`: sidebar toggle, conversation title, mic state
//! - `SidebarView`: conversation list with slide-in and fade-out
//! - `MessageBubble`: one chat message
//! - `Welcome`: greeting and suggestion chips
//! - `ToastStack`: notifications
//! - `ConfirmDialogView`: the shared confirmation modal
//!
//! ### Stateful Components (Event-Driven)
//!
//! Own state persisted in `TuiState` and emit events:
//! - `InputBox`: message input
//! - `TranscriptViewState`: scroll position of the transcript
//!
//! Every clickable region is recorded in the frame's `HitMap` by the
//! component that draws it, so mouse routing never re-derives layout.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── header.rs         (title bar)
//! ├── sidebar.rs        (conversation list)
//! ├── message.rs        (single message bubble)
//! ├── transcript.rs     (scrollable message container)
//! ├── welcome.rs        (empty conversation placeholder)
//! ├── input_box.rs      (text input)
//! ├── toast.rs          (notification stack)
//! └── confirm_dialog.rs (modal)
//! ```

pub mod confirm_dialog;
pub mod header;
pub mod input_box;
pub mod message;
pub mod sidebar;
pub mod toast;
pub mod transcript;
pub mod welcome;

pub use confirm_dialog::ConfirmDialogView;
pub use header::Header;
pub use input_box::{InputBox, InputEvent};
pub use sidebar::SidebarView;
pub use toast::ToastStack;
pub use transcript::{TranscriptView, TranscriptViewState};
pub use welcome::Welcome;
