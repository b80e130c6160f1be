use chrono::NaiveDate;
use serde::Serialize;

use super::{Bucket, Todo};

/// A user's todos partitioned into buckets against a single "today".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoBoard {
    pub today: NaiveDate,
    pub overdue: Vec<Todo>,
    pub due_today: Vec<Todo>,
    pub due_later: Vec<Todo>,
    pub completed: Vec<Todo>,
}

impl TodoBoard {
    /// Partition `todos` by [`Todo::bucket`]. Every todo lands in exactly
    /// one bucket; each bucket is ordered by ascending id.
    pub fn classify(todos: impl IntoIterator<Item = Todo>, today: NaiveDate) -> Self {
        let mut board = Self {
            today,
            overdue: Vec::new(),
            due_today: Vec::new(),
            due_later: Vec::new(),
            completed: Vec::new(),
        };

        for todo in todos {
            match todo.bucket(today) {
                Bucket::Overdue => board.overdue.push(todo),
                Bucket::DueToday => board.due_today.push(todo),
                Bucket::DueLater => board.due_later.push(todo),
                Bucket::Completed => board.completed.push(todo),
            }
        }

        for bucket in [
            &mut board.overdue,
            &mut board.due_today,
            &mut board.due_later,
            &mut board.completed,
        ] {
            bucket.sort_by_key(|todo| todo.id);
        }

        board
    }

    pub fn bucket(&self, bucket: Bucket) -> &[Todo] {
        match bucket {
            Bucket::Overdue => &self.overdue,
            Bucket::DueToday => &self.due_today,
            Bucket::DueLater => &self.due_later,
            Bucket::Completed => &self.completed,
        }
    }

    pub fn len(&self) -> usize {
        Bucket::ALL.iter().map(|b| self.bucket(*b).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
