//! # Kanban Widget
//!
//! Board model, renderer and interaction controller for a single-page
//! kanban board.
//!
//! The host supplies three collaborators: a [`KeyValueStore`] the board is
//! persisted into, a [`UserInput`] for prompts and confirmations, and a
//! [`RenderTarget`] the view tree is rebuilt into after every change.

pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod render;
pub mod storage;

// Re-export commonly used types
pub use config::{ColumnSeed, WidgetConfig};
pub use controller::{BoardController, DragState, FocusTarget, ScriptedInput, UiEvent, UserInput};
pub use domain::{Board, Column, ColumnId, Priority, Task, TaskId};
pub use error::{KanbanError, Result};
pub use render::{EntityRef, RenderTarget, Renderer, ViewNode, ViewRoot, ViewState};
pub use storage::{BoardStore, KeyValueStore, MemoryStore};

#[cfg(feature = "file-storage")]
pub use storage::FileStore;
