// todo.rs

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: i64,
    pub text: String,
    pub done: bool,
}

impl TodoItem {
    pub fn new(id: i64, text: String) -> Self {
        Self {
            id,
            text,
            done: false,
        }
    }
}
