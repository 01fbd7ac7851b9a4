//! Domain records for the todo collection.
//!
//! # Design
//! A `Todo` is kept as a JSON object rather than a fixed struct. Clients may
//! attach arbitrary fields and a patch may overwrite any of them (including
//! `id`), so the record has to round-trip whatever it was given. Typed
//! accessors read the three well-known fields without enforcing a schema.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON object used for create drafts and update patches.
pub type Fields = Map<String, Value>;

/// A single todo item as stored and served.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Todo(Fields);

impl Todo {
    pub fn from_fields(fields: Fields) -> Self {
        Self(fields)
    }

    /// Integral id, if the record has one.
    ///
    /// Float-encoded integers (`3.0`) count, since the file format does not
    /// distinguish them.
    pub fn id(&self) -> Option<i64> {
        match self.0.get("id")? {
            Value::Number(n) => n.as_i64().or_else(|| {
                let f = n.as_f64()?;
                (f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
            }),
            _ => None,
        }
    }

    pub fn title(&self) -> Option<&Value> {
        self.0.get("title")
    }

    /// `Some` only when `completed` holds an actual boolean.
    pub fn completed(&self) -> Option<bool> {
        self.0.get("completed").and_then(Value::as_bool)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Fields {
        &self.0
    }

    pub fn into_fields(self) -> Fields {
        self.0
    }

    pub(crate) fn fields_mut(&mut self) -> &mut Fields {
        &mut self.0
    }
}

/// Ordered sequence of todos, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection(Vec<Todo>);

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Todo> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Todo> {
        self.0
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<Todo> {
        &mut self.0
    }
}

impl From<Vec<Todo>> for Collection {
    fn from(todos: Vec<Todo>) -> Self {
        Self(todos)
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Todo;
    type IntoIter = std::slice::Iter<'a, Todo>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Loose "is this value set" check used for the required `title`.
///
/// `null`, `false`, `0`, and the empty string all count as unset; any other
/// value, including empty arrays and objects, counts as set.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn todo(value: Value) -> Todo {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn todo_serializes_as_plain_object() {
        let t = todo(json!({"id": 1, "title": "Test", "completed": false}));
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"{"id":1,"title":"Test","completed":false}"#);
    }

    #[test]
    fn extra_fields_survive_a_roundtrip() {
        let t = todo(json!({"id": 7, "title": "x", "completed": true, "tags": ["a"], "due": null}));
        let back: Todo = serde_json::from_str(&serde_json::to_string(&t).unwrap()).unwrap();
        assert_eq!(back, t);
        assert_eq!(back.get("tags"), Some(&json!(["a"])));
    }

    #[test]
    fn id_accepts_integral_numbers_only() {
        assert_eq!(todo(json!({"id": 3})).id(), Some(3));
        assert_eq!(todo(json!({"id": 3.0})).id(), Some(3));
        assert_eq!(todo(json!({"id": 3.5})).id(), None);
        assert_eq!(todo(json!({"id": "3"})).id(), None);
        assert_eq!(todo(json!({})).id(), None);
    }

    #[test]
    fn completed_requires_a_boolean() {
        assert_eq!(todo(json!({"completed": true})).completed(), Some(true));
        assert_eq!(todo(json!({"completed": "true"})).completed(), None);
        assert_eq!(todo(json!({})).completed(), None);
    }

    #[test]
    fn collection_serializes_as_array() {
        let c = Collection::from(vec![todo(json!({"id": 1})), todo(json!({"id": 2}))]);
        assert_eq!(serde_json::to_value(&c).unwrap(), json!([{"id": 1}, {"id": 2}]));
    }

    #[test]
    fn presence_follows_truthiness() {
        assert!(!is_present(None));
        assert!(!is_present(Some(&json!(null))));
        assert!(!is_present(Some(&json!(""))));
        assert!(!is_present(Some(&json!(0))));
        assert!(!is_present(Some(&json!(false))));
        assert!(is_present(Some(&json!("a"))));
        assert!(is_present(Some(&json!(2))));
        assert!(is_present(Some(&json!([]))));
        assert!(is_present(Some(&json!({}))));
    }
}
