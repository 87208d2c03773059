//! Todo Form Controller
//!
//! Draft todo, per-field error messages and the submit lifecycle.
//! Validation is left to the backend; its violations are mapped back onto
//! the fields they name.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::commands::EndpointError;
use crate::models::{Contact, Todo, ValidationViolation};

/// Suggestions offered by the task field
pub const TASK_PRESETS: [&str; 5] = [
    "Make food",
    "Clean the house",
    "Do the groceries",
    "Mow the lawn",
    "Walk the dog",
];

/// Start of the displayed part of a violation message
const VALIDATION_MARKER: &str = "validation error:";

/// Draft fields that can display an error
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TodoField {
    Task,
    Description,
    Priority,
    Deadline,
    Assigned,
}

impl TodoField {
    /// Resolve a violation's parameter name, either bare (`task`) or a
    /// property path (`todo.task`)
    pub fn from_parameter_name(name: &str) -> Option<Self> {
        match name.rsplit('.').next()? {
            "task" => Some(TodoField::Task),
            "description" => Some(TodoField::Description),
            "priority" => Some(TodoField::Priority),
            "deadline" => Some(TodoField::Deadline),
            "assigned" => Some(TodoField::Assigned),
            _ => None,
        }
    }
}

/// Message text from the marker onwards, or all of it when the marker is absent
pub fn violation_text(message: &str) -> &str {
    message.find(VALIDATION_MARKER).map_or(message, |start| &message[start..])
}

/// Map violations onto fields; ones that name no field are dropped
pub fn field_errors(violations: &[ValidationViolation]) -> BTreeMap<TodoField, String> {
    violations
        .iter()
        .filter_map(|violation| {
            let field = violation.parameter_name.as_deref().and_then(TodoField::from_parameter_name)?;
            Some((field, violation_text(&violation.message).to_string()))
        })
        .collect()
}

/// Result of a finished submission
#[derive(Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Stored record (or the submitted draft if the backend returned none)
    Saved(Todo),
    /// Backend rejected the draft; field errors are set
    Rejected,
    Failed(EndpointError),
}

#[derive(Clone, Debug, Default)]
pub struct TodoForm {
    draft: Todo,
    errors: BTreeMap<TodoField, String>,
    submitting: bool,
}

impl TodoForm {
    pub fn new() -> Self {
        Self {
            draft: Todo::draft(),
            ..Default::default()
        }
    }

    pub fn draft(&self) -> &Todo {
        &self.draft
    }

    pub fn error(&self, field: TodoField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_task(&mut self, value: &str) {
        self.draft.task = value.to_string();
        self.errors.remove(&TodoField::Task);
    }

    pub fn set_description(&mut self, value: &str) {
        self.draft.description = Some(value.to_string()).filter(|v| !v.is_empty());
        self.errors.remove(&TodoField::Description);
    }

    /// Number input text; anything that is not an integer clears the value
    pub fn set_priority(&mut self, value: &str) {
        self.draft.priority = value.trim().parse().ok();
        self.errors.remove(&TodoField::Priority);
    }

    /// Date input text in `yyyy-MM-dd`
    pub fn set_deadline(&mut self, value: &str) {
        self.draft.deadline = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok();
        self.errors.remove(&TodoField::Deadline);
    }

    pub fn assign(&mut self, contact: Contact) {
        self.draft.assigned = Some(contact);
        self.errors.remove(&TodoField::Assigned);
    }

    /// Label of the button that opens the contact dialog
    pub fn assign_label(&self) -> String {
        self.draft
            .assigned
            .as_ref()
            .map_or_else(|| "Assign".to_string(), Contact::full_name)
    }

    /// Start a submission; `None` while one is already in flight
    pub fn begin_submit(&mut self) -> Option<Todo> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        self.errors.clear();
        Some(self.draft.clone())
    }

    pub fn finish_submit(&mut self, submitted: Todo, result: Result<Option<Todo>, EndpointError>) -> SubmitOutcome {
        self.submitting = false;
        match result {
            Ok(saved) => {
                self.draft = Todo::draft();
                self.errors.clear();
                SubmitOutcome::Saved(saved.unwrap_or(submitted))
            }
            Err(EndpointError::Validation { violations, .. }) => {
                log::debug!("[TodoForm] Validation violations: {:?}", violations);
                self.errors = field_errors(&violations);
                SubmitOutcome::Rejected
            }
            Err(e) => SubmitOutcome::Failed(e),
        }
    }
}
