// app.rs

use std::sync::mpsc::{Receiver, Sender};

use crate::sync::{StoreCommand, StoreEvent};
use crate::todo::TodoItem;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Adding,
    Editing,
    ConfirmingDelete,
}

/// Client-side mirror of the store plus UI state.
///
/// Every mutation is applied to the mirror first, then sent to the store
/// writer without waiting for it to land. The mirror is never rolled back on
/// a failed write; failures show up on the error line and the snapshot
/// refresh replaces the mirror wholesale.
pub struct App {
    pub todos: Vec<TodoItem>,
    pub input_mode: InputMode,
    pub input_text: String,
    pub editing_id: Option<i64>,
    pub selected: usize,
    pub error_message: Option<String>,
    commands: Sender<StoreCommand>,
    events: Receiver<StoreEvent>,
}

impl App {
    pub fn new(
        snapshot: Vec<TodoItem>,
        commands: Sender<StoreCommand>,
        events: Receiver<StoreEvent>,
    ) -> Self {
        let mut todos = snapshot;
        todos.sort_by_key(|t| t.id);
        Self {
            todos,
            input_mode: InputMode::Normal,
            input_text: String::new(),
            editing_id: None,
            selected: 0,
            error_message: None,
            commands,
            events,
        }
    }

    fn dispatch(&mut self, cmd: StoreCommand) {
        if self.commands.send(cmd).is_err() {
            tracing::error!("store writer is gone, keeping local state only");
            self.error_message =
                Some("Store writer stopped; changes are no longer saved".to_string());
        }
    }

    // Ids are distinct and strictly increasing within one run; ids of
    // deleted items may be reused by later creates.
    fn next_id(&self) -> i64 {
        self.todos.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    pub fn create_todo(&mut self) -> Result<(), String> {
        let text = self.input_text.trim().to_string();
        if text.is_empty() {
            return Err("Todo text cannot be empty.".to_string());
        }

        let id = self.next_id();
        self.todos.push(TodoItem::new(id, text.clone()));
        self.dispatch(StoreCommand::Create { id, text });

        self.input_text.clear();
        self.error_message = None;
        Ok(())
    }

    pub fn begin_edit_selected(&mut self) {
        if let Some(todo) = self.todos.get(self.selected) {
            self.editing_id = Some(todo.id);
            self.input_text = todo.text.clone();
            self.input_mode = InputMode::Editing;
            self.error_message = None;
        }
    }

    pub fn change_todo_text(&mut self) -> Result<(), String> {
        let id = match self.editing_id {
            Some(id) => id,
            None => return Ok(()),
        };
        let text = self.input_text.trim().to_string();
        if text.is_empty() {
            return Err("Todo text cannot be empty.".to_string());
        }

        if let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) {
            todo.text = text.clone();
        }
        self.dispatch(StoreCommand::Edit { id, text });

        self.editing_id = None;
        self.input_text.clear();
        self.error_message = None;
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.editing_id = None;
        self.input_text.clear();
        self.input_mode = InputMode::Normal;
    }

    pub fn toggle_todo(&mut self) {
        // Read needed values without holding a mutable borrow of self
        let (id, done) = match self.todos.get_mut(self.selected) {
            Some(todo) => {
                todo.done = !todo.done;
                (todo.id, todo.done)
            }
            None => return,
        };
        self.dispatch(StoreCommand::Toggle { id, done });
    }

    pub fn delete_todo(&mut self) {
        if self.selected >= self.todos.len() {
            return;
        }
        let removed = self.todos.remove(self.selected);
        if self.selected > 0 {
            self.selected -= 1;
        }
        self.dispatch(StoreCommand::Delete { id: removed.id });
    }

    pub fn request_refresh(&mut self) {
        self.dispatch(StoreCommand::Snapshot);
    }

    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                StoreEvent::Snapshot(mut todos) => {
                    todos.sort_by_key(|t| t.id);
                    self.todos = todos;
                    if self.selected >= self.todos.len() {
                        self.selected = self.todos.len().saturating_sub(1);
                    }
                    self.error_message = Some("Reloaded from store".to_string());
                }
                StoreEvent::OpFailed(msg) => {
                    self.error_message = Some(msg);
                }
            }
        }
    }

    pub fn done_count(&self) -> usize {
        self.todos.iter().filter(|t| t.done).count()
    }
}
