// sync.rs

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::store::{StoreError, TodoStore};
use crate::todo::TodoItem;

#[derive(Clone, Debug, PartialEq)]
pub enum StoreCommand {
    Create { id: i64, text: String },
    Edit { id: i64, text: String },
    Toggle { id: i64, done: bool },
    Delete { id: i64 },
    Snapshot,
}

#[derive(Debug, PartialEq)]
pub enum StoreEvent {
    Snapshot(Vec<TodoItem>),
    OpFailed(String),
}

pub fn apply(store: &TodoStore, cmd: &StoreCommand) -> Result<(), StoreError> {
    match cmd {
        StoreCommand::Create { id, text } => store.create(*id, text),
        StoreCommand::Edit { id, text } => store.edit(*id, text),
        StoreCommand::Toggle { id, done } => store.toggle(*id, *done),
        StoreCommand::Delete { id } => store.delete(*id),
        // Snapshot is answered by the writer loop, never applied as a write
        StoreCommand::Snapshot => Ok(()),
    }
}

/// Spawns the thread that owns the store and applies commands in the order
/// they were sent. Senders never wait on the result; failures are logged and
/// reported back as displayable events. Returns the store on join so callers
/// can inspect it after shutdown.
pub fn spawn_writer(
    store: TodoStore,
    commands: Receiver<StoreCommand>,
    events: Sender<StoreEvent>,
) -> JoinHandle<TodoStore> {
    thread::spawn(move || {
        for cmd in commands {
            match cmd {
                StoreCommand::Snapshot => match store.list() {
                    Ok(todos) => {
                        let _ = events.send(StoreEvent::Snapshot(todos));
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "snapshot read failed");
                        let _ = events.send(StoreEvent::OpFailed(format!("Reload failed: {}", e)));
                    }
                },
                cmd => {
                    if let Err(e) = apply(&store, &cmd) {
                        tracing::error!(error = %e, ?cmd, "store write failed");
                        let _ = events
                            .send(StoreEvent::OpFailed(format!("Store write failed: {}", e)));
                    }
                }
            }
        }
        store
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn writer_applies_commands_in_order() {
        let store = TodoStore::open_in_memory().unwrap();
        let (tx, rx) = mpsc::channel();
        let (etx, _erx) = mpsc::channel();
        let writer = spawn_writer(store, rx, etx);

        tx.send(StoreCommand::Create {
            id: 1,
            text: "buy milk".to_string(),
        })
        .unwrap();
        tx.send(StoreCommand::Toggle { id: 1, done: true }).unwrap();
        tx.send(StoreCommand::Edit {
            id: 1,
            text: "buy oat milk".to_string(),
        })
        .unwrap();
        drop(tx);

        let store = writer.join().unwrap();
        let todos = store.list().unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].text, "buy oat milk");
        assert!(todos[0].done);
    }

    #[test]
    fn writer_reports_failure_and_keeps_going() {
        let store = TodoStore::open_in_memory().unwrap();
        let (tx, rx) = mpsc::channel();
        let (etx, erx) = mpsc::channel();
        let writer = spawn_writer(store, rx, etx);

        tx.send(StoreCommand::Create {
            id: 1,
            text: "first".to_string(),
        })
        .unwrap();
        tx.send(StoreCommand::Create {
            id: 1,
            text: "duplicate".to_string(),
        })
        .unwrap();
        tx.send(StoreCommand::Create {
            id: 2,
            text: "second".to_string(),
        })
        .unwrap();
        drop(tx);

        let store = writer.join().unwrap();
        let ids: Vec<i64> = store.list().unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let events: Vec<StoreEvent> = erx.try_iter().collect();
        assert!(matches!(events.as_slice(), [StoreEvent::OpFailed(_)]));
    }

    #[test]
    fn writer_answers_snapshot_requests() {
        let store = TodoStore::open_in_memory().unwrap();
        let (tx, rx) = mpsc::channel();
        let (etx, erx) = mpsc::channel();
        let writer = spawn_writer(store, rx, etx);

        tx.send(StoreCommand::Create {
            id: 1,
            text: "buy milk".to_string(),
        })
        .unwrap();
        tx.send(StoreCommand::Snapshot).unwrap();
        drop(tx);
        writer.join().unwrap();

        match erx.recv().unwrap() {
            StoreEvent::Snapshot(todos) => {
                assert_eq!(todos.len(), 1);
                assert_eq!(todos[0].text, "buy milk");
            }
            other => panic!("expected snapshot, got {:?}", other),
        }
    }
}
