use serde::{Deserialize, Serialize};

/// A single to-do item, persisted as a flat three-field record. Stored data
/// with missing or mistyped fields fails deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

/// View selector over the task collection. Not persisted; every run starts
/// on `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// Selector order as presented in the header.
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_wire_shape_is_three_flat_fields() {
        let task = Task {
            id: "1700000000000".to_string(),
            text: "Buy milk".to_string(),
            completed: false,
        };
        let value = serde_json::to_value(&task).expect("serialize task");
        assert_eq!(
            value,
            serde_json::json!({
              "id": "1700000000000",
              "text": "Buy milk",
              "completed": false
            })
        );

        let back: Task = serde_json::from_value(value).expect("deserialize task");
        assert_eq!(back, task);
    }

    #[test]
    fn task_deserialization_rejects_missing_fields() {
        let result = serde_json::from_str::<Task>(r#"{ "id": "1", "text": "x" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn filter_matches_by_completion_state() {
        let open = Task {
            id: "1".to_string(),
            text: "open".to_string(),
            completed: false,
        };
        let done = Task {
            id: "2".to_string(),
            text: "done".to_string(),
            completed: true,
        };

        assert!(Filter::All.matches(&open));
        assert!(Filter::All.matches(&done));
        assert!(Filter::Active.matches(&open));
        assert!(!Filter::Active.matches(&done));
        assert!(!Filter::Completed.matches(&open));
        assert!(Filter::Completed.matches(&done));
    }

    #[test]
    fn filter_labels_follow_selector_order() {
        let labels: Vec<&str> = Filter::ALL.iter().map(|f| f.label()).collect();
        assert_eq!(labels, vec!["All", "Active", "Completed"]);
    }
}
