//! Display derivation: sorting and summary counts.
//!
//! Pure functions over [`TaskList`] — nothing here mutates state. The sort
//! modes produce a display sequence; explicit reordering goes through
//! [`TaskList::reorder`] instead.

use taskdeck_proto::task::{Priority, Task};

use crate::state::TaskList;

/// How the display sequence is derived from the collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Identity order: pass through the collection as-is.
    #[default]
    Unsorted,
    /// Ascending by due date; undated tasks after all dated ones.
    DueDate,
    /// Ascending by rank: high < medium < low < unset.
    Priority,
}

impl std::str::FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::Unsorted),
            "due" => Ok(Self::DueDate),
            "priority" => Ok(Self::Priority),
            other => Err(format!("unknown sort mode '{other}' (none, due, priority)")),
        }
    }
}

/// Derives the display sequence for the given mode.
///
/// Both sorts are stable: ties (equal due dates, equal ranks, and all
/// undated/unranked tasks among themselves) keep their collection order.
#[must_use]
pub fn sorted(list: &TaskList, mode: SortMode) -> Vec<&Task> {
    let mut tasks: Vec<&Task> = list.tasks().iter().collect();
    match mode {
        SortMode::Unsorted => {}
        SortMode::DueDate => {
            // `None < Some` for Option's Ord, so key on is_none() first to
            // push undated tasks to the back.
            tasks.sort_by_key(|t| (t.due_date.is_none(), t.due_date));
        }
        SortMode::Priority => {
            tasks.sort_by_key(|t| t.priority.map_or(3, Priority::rank));
        }
    }
    tasks
}

/// Summary counts for display, computed on each query, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSummary {
    /// Number of completed tasks.
    pub completed: usize,
    /// Total number of tasks.
    pub total: usize,
}

/// Counts completed and total tasks in the collection.
#[must_use]
pub fn summary(list: &TaskList) -> ListSummary {
    ListSummary {
        completed: list.tasks().iter().filter(|t| t.completed).count(),
        total: list.len(),
    }
}
