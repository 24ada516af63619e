//! crates/course_builder_core/src/progress.rs
//!
//! The learner's progress through a generated course, in the shape the
//! generated application persists under the `course-progress` storage key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    #[serde(default)]
    pub completed_modules: BTreeSet<usize>,
    pub last_accessed: DateTime<Utc>,
}

impl CourseProgress {
    pub fn new() -> Self {
        Self {
            completed_modules: BTreeSet::new(),
            last_accessed: Utc::now(),
        }
    }

    /// Marks module `index` complete. Marking it again changes nothing.
    pub fn mark_complete(&mut self, index: usize) -> bool {
        self.last_accessed = Utc::now();
        self.completed_modules.insert(index)
    }

    pub fn is_complete(&self, index: usize) -> bool {
        self.completed_modules.contains(&index)
    }

    pub fn completed_count(&self) -> usize {
        self.completed_modules.len()
    }

    /// `round(100 * completed / total)`, or 0 for a course without modules.
    pub fn percentage(&self, total_modules: usize) -> u32 {
        completion_percentage(self.completed_count(), total_modules)
    }
}

impl Default for CourseProgress {
    fn default() -> Self {
        Self::new()
    }
}

pub fn completion_percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marking_twice_is_idempotent() {
        let mut progress = CourseProgress::new();
        assert!(progress.mark_complete(2));
        let after_one = progress.completed_count();
        assert!(!progress.mark_complete(2));
        assert_eq!(progress.completed_count(), after_one);
        assert!(progress.is_complete(2));
        assert!(!progress.is_complete(0));
    }

    #[test]
    fn percentage_rounds_and_handles_empty_course() {
        let mut progress = CourseProgress::new();
        assert_eq!(progress.percentage(0), 0);
        progress.mark_complete(0);
        assert_eq!(progress.percentage(3), 33);
        progress.mark_complete(1);
        assert_eq!(progress.percentage(3), 67);
        assert_eq!(progress.percentage(0), 0);
        assert_eq!(completion_percentage(1, 8), 13);
    }

    #[test]
    fn reads_what_the_browser_stores() {
        let stored = r#"{"completedModules":[3,0,3],"lastAccessed":"2024-05-01T10:00:00.000Z"}"#;
        let progress: CourseProgress = serde_json::from_str(stored).unwrap();
        assert_eq!(progress.completed_count(), 2);

        let value = serde_json::to_value(&progress).unwrap();
        assert_eq!(value["completedModules"], serde_json::json!([0, 3]));
        assert!(value["lastAccessed"].is_string());
    }
}
