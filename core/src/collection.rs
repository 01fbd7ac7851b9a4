//! Pure operations over a loaded `Collection` snapshot.
//!
//! # Design
//! Every operation consumes the snapshot and hands back either a query result
//! or the next snapshot, so the caller decides whether anything gets
//! persisted. Nothing here touches the file system.
//!
//! Ids are derived from the current contents (`max + 1`), not from a
//! persistent sequence: deleting the highest id and creating a new todo hands
//! the same id out again. Clients observe these ids, so the policy is part of
//! the contract.

use serde_json::Value;

use crate::error::CollectionError;
use crate::types::{is_present, Collection, Fields, Todo};

impl Collection {
    /// Keep only todos whose `completed` is exactly `is_done`. `None` returns
    /// the snapshot unchanged.
    pub fn filter_by_completed(self, is_done: Option<bool>) -> Collection {
        match is_done {
            None => self,
            Some(done) => self
                .into_vec()
                .into_iter()
                .filter(|todo| todo.completed() == Some(done))
                .collect::<Vec<_>>()
                .into(),
        }
    }

    pub fn find_by_id(&self, id: i64) -> Option<&Todo> {
        self.iter().find(|todo| todo.id() == Some(id))
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.iter().position(|todo| todo.id() == Some(id))
    }

    /// Id the next inserted todo would receive, or `None` once the highest
    /// stored id is `i64::MAX`.
    pub fn next_id(&self) -> Option<i64> {
        match self.iter().filter_map(Todo::id).max() {
            None => Some(1),
            Some(max) => max.checked_add(1),
        }
    }

    /// Append a new todo built from `draft`.
    ///
    /// Any client-supplied `id` is overwritten. `completed` defaults to
    /// `false` when missing or null.
    pub fn insert(mut self, draft: Fields) -> Result<(Collection, Todo), CollectionError> {
        if !is_present(draft.get("title")) {
            return Err(CollectionError::MissingTitle);
        }

        let mut todo = Todo::from_fields(draft);
        let id = self.next_id().ok_or(CollectionError::IdsExhausted)?;
        let fields = todo.fields_mut();
        fields.insert("id".to_string(), Value::from(id));
        if matches!(fields.get("completed"), None | Some(Value::Null)) {
            fields.insert("completed".to_string(), Value::Bool(false));
        }

        self.items_mut().push(todo.clone());
        Ok((self, todo))
    }

    /// Shallow merge of `patch` onto the todo with `id`.
    ///
    /// Every key in the patch wins, `id` included.
    pub fn update(mut self, id: i64, patch: Fields) -> Result<(Collection, Todo), CollectionError> {
        let index = self.position(id).ok_or(CollectionError::NotFound)?;
        let todo = &mut self.items_mut()[index];
        todo.fields_mut().extend(patch);
        let merged = todo.clone();
        Ok((self, merged))
    }

    /// Drop the todo with `id`, keeping the order of the rest.
    pub fn remove(mut self, id: i64) -> Result<Collection, CollectionError> {
        let index = self.position(id).ok_or(CollectionError::NotFound)?;
        self.items_mut().remove(index);
        Ok(self)
    }
}
