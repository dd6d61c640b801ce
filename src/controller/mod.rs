//! Binds user gestures to board mutations.
//!
//! Every mutation runs to completion inside one call: mutate the board,
//! rebuild the view, persist. Keystrokes in editable fields are the exception:
//! they update the board and the view, and persistence waits for focus-out.

pub mod drag;
pub mod event;
pub mod input;

pub use drag::DragState;
pub use event::{FocusTarget, UiEvent};
pub use input::{ScriptedInput, UserInput};

use crate::{
    config::WidgetConfig,
    domain::{Board, ColumnId, TaskId},
    error::Result,
    render::{EntityRef, Expansion, RenderTarget, Renderer, ViewState},
    storage::{BoardStore, KeyValueStore},
};

/// Owns the board and drives the render/persist cycle
pub struct BoardController<S, U, T> {
    board: Board,
    store: BoardStore<S>,
    input: U,
    target: T,
    renderer: Renderer,
    config: WidgetConfig,
    drag: DragState,
    expanded: Option<Expansion>,
}

impl<S, U, T> BoardController<S, U, T>
where
    S: KeyValueStore,
    U: UserInput,
    T: RenderTarget,
{
    /// Loads the stored board (or the configured default) and renders it
    pub fn new(config: WidgetConfig, store: BoardStore<S>, input: U, target: T) -> Self {
        let board = store.load_or_default(&config);
        Self::with_board(config, board, store, input, target)
    }

    /// Starts from an explicit board and renders it
    pub fn with_board(
        config: WidgetConfig,
        board: Board,
        store: BoardStore<S>,
        input: U,
        target: T,
    ) -> Self {
        let mut controller = Self {
            board,
            store,
            input,
            target,
            renderer: Renderer::from_config(&config),
            config,
            drag: DragState::Idle,
            expanded: None,
        };
        controller.render();
        controller
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn store(&self) -> &BoardStore<S> {
        &self.store
    }

    pub fn input(&self) -> &U {
        &self.input
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// Current presentation state
    pub fn view_state(&self) -> ViewState {
        ViewState {
            expanded: self.expanded.clone(),
            dragging: self.drag.subject().cloned(),
        }
    }

    /// Dispatches a host event
    pub fn handle(&mut self, event: UiEvent) {
        match event {
            UiEvent::AddColumnClicked => {
                self.add_column();
            }
            UiEvent::AddTaskClicked(column_id) => {
                self.add_task(&column_id);
            }
            UiEvent::DeleteColumnClicked(column_id) => {
                self.delete_column(&column_id);
            }
            UiEvent::DeleteTaskClicked(task_id) => {
                self.delete_task(&task_id);
            }
            UiEvent::ColumnTitleInput { column_id, text } => {
                self.input_column_title(&column_id, text);
            }
            UiEvent::TaskContentInput {
                task_id,
                text,
                content_height,
            } => {
                self.input_task_content(&task_id, text, content_height);
            }
            UiEvent::FocusIn(target) => self.focus_in(target),
            UiEvent::FocusOut { target, text } => self.focus_out(target, text),
            UiEvent::DragStart(subject) => self.begin_drag(subject),
            UiEvent::DragEnd => self.end_drag(),
            UiEvent::Drop(column_id) => {
                self.drop_on_column(&column_id);
            }
        }
    }

    /// Prompts for a title and appends a column
    pub fn add_column(&mut self) -> ColumnId {
        let message = self.config.column_prompt.clone();
        let fallback = self.config.new_column_title.clone();
        let title = self.prompt_or_default(&message, &fallback);

        let id = self.board.add_column(title).id.clone();
        tracing::info!("Created column {}", id);
        self.commit();
        id
    }

    /// Prompts for content and appends a task. A stale column id does nothing.
    pub fn add_task(&mut self, column_id: &ColumnId) -> Option<TaskId> {
        if self.board.column(column_id).is_none() {
            tracing::debug!("Ignoring add task for missing column {}", column_id);
            return None;
        }

        let message = self.config.task_prompt.clone();
        let fallback = self.config.new_task_title.clone();
        let content = self.prompt_or_default(&message, &fallback);

        let id = match self.board.add_task(column_id, content) {
            Ok(task) => task.id.clone(),
            Err(e) => {
                tracing::debug!("Add task skipped: {}", e);
                return None;
            }
        };
        tracing::info!("Created task {} in column {}", id, column_id);
        self.commit();
        Some(id)
    }

    /// Deletes a column and its tasks after confirmation
    pub fn delete_column(&mut self, column_id: &ColumnId) -> bool {
        if self.board.column(column_id).is_none() {
            tracing::debug!("Ignoring delete of missing column {}", column_id);
            return false;
        }
        let message = self.config.delete_column_confirm.clone();
        if !self.input.confirm(&message) {
            return false;
        }

        let deleted = self.apply(|board| board.delete_column(column_id).map(|_| ()));
        if deleted {
            tracing::info!("Deleted column {}", column_id);
        }
        deleted
    }

    pub fn delete_task(&mut self, task_id: &TaskId) -> bool {
        let deleted = self.apply(|board| board.delete_task(task_id).map(|_| ()));
        if deleted {
            tracing::info!("Deleted task {}", task_id);
        }
        deleted
    }

    pub fn begin_drag(&mut self, subject: EntityRef) {
        self.drag.start(subject);
        self.render();
    }

    /// Drag ended without a drop. The board is left alone.
    pub fn end_drag(&mut self) {
        if self.drag.finish().is_some() {
            self.render();
        }
    }

    /// Handles a drop on a column body. Tasks always land at the end of the
    /// column; dropped columns are ignored since columns cannot be reordered.
    pub fn drop_on_column(&mut self, column_id: &ColumnId) -> bool {
        match self.drag.finish() {
            Some(EntityRef::Task(task_id)) => {
                let moved = self.apply(|board| board.move_task(&task_id, column_id));
                if moved {
                    tracing::info!("Moved task {} to column {}", task_id, column_id);
                } else {
                    self.render();
                }
                moved
            }
            Some(EntityRef::Column(dragged)) => {
                tracing::debug!("Ignoring drop of column {} on {}", dragged, column_id);
                self.render();
                false
            }
            None => false,
        }
    }

    /// Applies a keystroke to a column title. Not persisted until focus-out.
    pub fn input_column_title(&mut self, column_id: &ColumnId, text: String) {
        match self.board.edit_column_title(column_id, text) {
            Ok(()) => self.render(),
            Err(e) => tracing::debug!("Title input skipped: {}", e),
        }
    }

    /// Applies a keystroke to task content and grows its view to fit.
    /// Not persisted until focus-out.
    pub fn input_task_content(
        &mut self,
        task_id: &TaskId,
        text: String,
        content_height: Option<u32>,
    ) {
        if let Err(e) = self.board.edit_task_content(task_id, text) {
            tracing::debug!("Content input skipped: {}", e);
            return;
        }
        self.expanded = Some(Expansion {
            task_id: task_id.clone(),
            content_height,
        });
        self.render();
    }

    pub fn focus_in(&mut self, target: FocusTarget) {
        if let FocusTarget::TaskContent(task_id) = target {
            if self.board.task(&task_id).is_some() {
                self.expanded = Some(Expansion {
                    task_id,
                    content_height: None,
                });
                self.render();
            }
        }
    }

    /// Commits the field's final value, collapses the task and persists
    pub fn focus_out(&mut self, target: FocusTarget, text: Option<String>) {
        let committed = match (&target, text) {
            (FocusTarget::ColumnTitle(id), Some(text)) => self.board.edit_column_title(id, text),
            (FocusTarget::TaskContent(id), Some(text)) => self.board.edit_task_content(id, text),
            _ => Ok(()),
        };
        if let Err(e) = committed {
            tracing::debug!("Focus-out commit skipped: {}", e);
        }

        if let FocusTarget::TaskContent(task_id) = &target {
            if self.expanded.as_ref().map(|e| &e.task_id) == Some(task_id) {
                self.expanded = None;
            }
        }
        self.commit();
    }

    /// Persists the board now
    pub fn save(&mut self) -> Result<()> {
        self.store.save(&self.board)
    }

    fn apply<F>(&mut self, mutation: F) -> bool
    where
        F: FnOnce(&mut Board) -> Result<()>,
    {
        match mutation(&mut self.board) {
            Ok(()) => {
                self.prune_view_state();
                self.commit();
                true
            }
            Err(e) => {
                tracing::debug!("Board unchanged: {}", e);
                false
            }
        }
    }

    /// Drops presentation state that points at deleted entities
    fn prune_view_state(&mut self) {
        if let Some(expansion) = &self.expanded {
            if self.board.task(&expansion.task_id).is_none() {
                self.expanded = None;
            }
        }
        let stale = match self.drag.subject() {
            Some(EntityRef::Task(id)) => self.board.task(id).is_none(),
            Some(EntityRef::Column(id)) => self.board.column(id).is_none(),
            None => false,
        };
        if stale {
            self.drag = DragState::Idle;
        }
    }

    fn prompt_or_default(&mut self, message: &str, fallback: &str) -> String {
        match self.input.prompt(message, fallback) {
            Some(text) if !text.is_empty() => text,
            _ => fallback.to_string(),
        }
    }

    fn render(&mut self) {
        let state = self.view_state();
        self.renderer
            .render_into(&mut self.target, &self.board, &state);
    }

    fn commit(&mut self) {
        self.render();
        if let Err(e) = self.save() {
            tracing::error!("Failed to save board: {}", e);
        }
    }
}
