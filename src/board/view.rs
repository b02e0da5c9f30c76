use taskboard_common::Task;

use super::dnd::Column;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub column: Column,
    pub tasks: Vec<Task>,
}

impl ColumnView {
    pub fn count(&self) -> usize {
        self.tasks.len()
    }
}

/// The task list split into the three kanban columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub project_id: Option<i64>,
    pub columns: Vec<ColumnView>,
}

impl BoardView {
    /// Group `tasks` by status, in column order. List order is kept inside
    /// each column.
    pub fn group(project_id: Option<i64>, tasks: &[Task]) -> Self {
        let columns = Column::ALL
            .iter()
            .map(|&column| ColumnView {
                column,
                tasks: tasks
                    .iter()
                    .filter(|t| t.status == column.status())
                    .cloned()
                    .collect(),
            })
            .collect();
        Self {
            project_id,
            columns,
        }
    }

    pub fn column(&self, column: Column) -> Option<&ColumnView> {
        self.columns.iter().find(|c| c.column == column)
    }

    pub fn total(&self) -> usize {
        self.columns.iter().map(ColumnView::count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_common::{Priority, TaskStatus};

    fn task(id: i64, status: TaskStatus) -> Task {
        Task {
            id,
            title: format!("task {}", id),
            description: String::new(),
            status,
            priority: Priority::Low,
            assignee_id: None,
            project_id: Some(3),
        }
    }

    #[test]
    fn test_group_preserves_order_within_column() {
        let tasks = vec![
            task(5, TaskStatus::Done),
            task(1, TaskStatus::ToDo),
            task(9, TaskStatus::ToDo),
            task(2, TaskStatus::InProgress),
        ];
        let view = BoardView::group(Some(3), &tasks);

        let ids = |c: Column| -> Vec<i64> {
            view.column(c).unwrap().tasks.iter().map(|t| t.id).collect()
        };
        assert_eq!(ids(Column::ToDo), vec![1, 9]);
        assert_eq!(ids(Column::InProgress), vec![2]);
        assert_eq!(ids(Column::Done), vec![5]);
        assert_eq!(view.total(), 4);
    }

    #[test]
    fn test_group_empty_list_still_has_three_columns() {
        let view = BoardView::group(None, &[]);
        assert_eq!(view.columns.len(), 3);
        assert!(view.columns.iter().all(|c| c.count() == 0));
        assert_eq!(view.columns[0].column, Column::ToDo);
        assert_eq!(view.columns[2].column, Column::Done);
    }
}
