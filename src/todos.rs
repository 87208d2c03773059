//! Todo List Operations
//!
//! Pure helpers behind the list view: completion toggling and the
//! optimistic "remove all done" split.

use crate::models::Todo;

/// Copy of `todo` with only `done` replaced
pub fn with_done(todo: &Todo, done: bool) -> Todo {
    Todo { done, ..todo.clone() }
}

/// Whether `item` is the list entry `original` refers to. Saved todos match
/// by id; a todo the backend never assigned an id to matches by value.
fn same_entry(item: &Todo, original: &Todo) -> bool {
    match original.id {
        Some(id) => item.id == Some(id),
        None => item == original,
    }
}

/// Replace the entry matching `original` with `saved`, leaving the rest
/// untouched. Returns false when no entry matched.
pub fn replace_todo(todos: &mut [Todo], original: &Todo, saved: Todo) -> bool {
    match todos.iter_mut().find(|item| same_entry(item, original)) {
        Some(slot) => {
            *slot = saved;
            true
        }
        None => false,
    }
}

/// True exactly when no todo is done; disables the remove control
pub fn nothing_to_remove(todos: &[Todo]) -> bool {
    !todos.iter().any(|todo| todo.done)
}

/// Key for a rendered card. Covers every field, including unmodelled server
/// ones, so a card never holds a stale copy of its todo.
pub fn render_key(index: usize, todo: &Todo) -> (usize, String) {
    (index, serde_json::to_string(todo).unwrap_or_default())
}

/// Split computed when "Remove" is pressed
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RemovePlan {
    /// Sent to the backend
    pub done: Vec<Todo>,
    /// Becomes the list once the backend call returns
    pub keep: Vec<Todo>,
}

impl RemovePlan {
    pub fn new(todos: &[Todo]) -> Self {
        let (done, keep) = todos.iter().cloned().partition(|todo| todo.done);
        Self { done, keep }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_todo(id: i64, task: &str, done: bool) -> Todo {
        Todo {
            id: Some(id),
            task: task.to_string(),
            done,
            ..Default::default()
        }
    }

    #[test]
    fn test_toggle_replaces_only_matching_id() {
        let mut todos = vec![
            make_todo(3, "Make food", false),
            make_todo(7, "Walk the dog", false),
            make_todo(9, "Mow the lawn", true),
        ];
        let before = todos.clone();

        let updated = with_done(&todos[1], true);
        assert_eq!(updated.task, "Walk the dog");
        assert!(updated.done);

        let echoed = Todo { priority: Some(1), ..updated };
        assert!(replace_todo(&mut todos, &before[1], echoed.clone()));

        assert_eq!(todos[0], before[0]);
        assert_eq!(todos[1], echoed);
        assert_eq!(todos[2], before[2]);
    }

    #[test]
    fn test_replace_without_id_matches_by_value() {
        let unsaved = Todo { task: "Draft".into(), ..Todo::draft() };
        let mut todos = vec![make_todo(1, "a", false), unsaved.clone()];
        let toggled = with_done(&unsaved, true);
        assert!(replace_todo(&mut todos, &unsaved, toggled.clone()));
        assert_eq!(todos[1], toggled);
        assert_eq!(todos[0].id, Some(1));
    }

    #[test]
    fn test_replace_missing_entry() {
        let mut todos = vec![make_todo(1, "a", false)];
        let gone = make_todo(2, "b", false);
        assert!(!replace_todo(&mut todos, &gone, with_done(&gone, true)));
        assert_eq!(todos, vec![make_todo(1, "a", false)]);
    }

    #[test]
    fn test_remove_plan() {
        let todos = vec![
            make_todo(1, "a", true),
            make_todo(2, "b", false),
            make_todo(3, "c", true),
        ];
        let plan = RemovePlan::new(&todos);
        assert_eq!(plan.done.iter().map(|t| t.id).collect::<Vec<_>>(), vec![Some(1), Some(3)]);
        assert_eq!(plan.keep, vec![make_todo(2, "b", false)]);
    }

    #[test]
    fn test_render_key_tracks_every_field() {
        let todo = make_todo(7, "Walk the dog", false);
        let key = render_key(0, &todo);
        assert_eq!(key, render_key(0, &todo.clone()));

        let described = Todo { description: Some("twice".into()), ..todo.clone() };
        assert_ne!(render_key(0, &described), key);

        let dated = Todo { deadline: chrono::NaiveDate::from_ymd_opt(2024, 1, 2), ..todo.clone() };
        assert_ne!(render_key(0, &dated), key);

        let mut versioned = todo.clone();
        versioned.extra.insert("version".into(), serde_json::Value::from(2));
        assert_ne!(render_key(0, &versioned), key);

        assert_ne!(render_key(1, &todo), key);
    }

    #[test]
    fn test_nothing_to_remove() {
        assert!(nothing_to_remove(&[]));
        assert!(nothing_to_remove(&[make_todo(1, "a", false)]));
        assert!(!nothing_to_remove(&[make_todo(1, "a", false), make_todo(2, "b", true)]));
    }
}
