//! Todos collection

use chrono::{DateTime, Utc};

use crate::error::{SquirrelError, SquirrelResult};
use crate::models::Todo;

use super::repository::{CollectionStore, Record, Repository};

impl Record for Todo {
    type Id = i64;
    const ENTITY: &'static str = "Todo";

    fn record_id(&self) -> i64 {
        self.id
    }
}

/// Repository for todos.json
pub type TodoRepository = Repository<Todo>;

impl Repository<Todo> {
    /// Next free id (one past the highest)
    pub fn next_id(&self) -> SquirrelResult<i64> {
        match self.all()?.last() {
            None => Ok(1),
            Some(last) => last.id.checked_add(1).ok_or_else(|| {
                SquirrelError::Validation(format!("No todo id left after {}", last.id))
            }),
        }
    }

    /// Add an open todo and return it
    pub fn add(
        &self,
        name: impl Into<String>,
        project: Option<String>,
        at: DateTime<Utc>,
    ) -> SquirrelResult<Todo> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SquirrelError::Validation("Todo name cannot be empty".into()));
        }
        let mut todo = Todo::new(self.next_id()?, name, at);
        todo.project = project;
        self.insert(todo.clone())?;
        Ok(todo)
    }

    /// Mark a todo completed
    pub fn complete(&self, id: i64, at: DateTime<Utc>) -> SquirrelResult<Todo> {
        self.update(&id, |t| t.complete(at))?
            .ok_or_else(|| SquirrelError::todo_not_found(id))
    }
}
