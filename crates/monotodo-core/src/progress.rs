use crate::task::Task;

/// Length of the completion indicator's scale.
pub const ARC_SCALE: u16 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub percent: u16,
}

impl Progress {
    pub fn of(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            completed,
            total,
            percent: percent(completed, total),
        }
    }

    /// `(filled, unfilled)` parts of the indicator, summing to `ARC_SCALE`.
    pub fn arc(&self) -> (u16, u16) {
        (self.percent, ARC_SCALE - self.percent)
    }

    pub fn label(&self) -> String {
        format!("{}%", self.percent)
    }
}

/// `round(100 * completed / max(total, 1))`, ties rounded up.
pub fn percent(completed: usize, total: usize) -> u16 {
    let total = total.max(1);
    let completed = completed.min(total);
    ((completed * 200 + total) / (total * 2)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskDraft;

    fn tasks(done: usize, open: usize) -> Vec<Task> {
        let draft = TaskDraft::default();
        (0..done + open)
            .map(|i| {
                let mut t = Task::new(format!("t{i}"), &draft);
                t.completed = i < done;
                t
            })
            .collect()
    }

    #[test]
    fn empty_list_is_zero_percent() {
        let p = Progress::of(&[]);
        assert_eq!(p.percent, 0);
        assert_eq!(p.arc(), (0, 100));
        assert_eq!(p.label(), "0%");
    }

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(1, 200), 1);
        assert_eq!(percent(3, 3), 100);
    }

    #[test]
    fn progress_counts_completed_tasks() {
        let p = Progress::of(&tasks(1, 3));
        assert_eq!(p.completed, 1);
        assert_eq!(p.total, 4);
        assert_eq!(p.percent, 25);
        assert_eq!(p.arc(), (25, 75));
    }

    #[test]
    fn matches_float_rounding_for_small_lists() {
        for total in 1..=40usize {
            for done in 0..=total {
                let expected = (100.0 * done as f64 / total as f64).round() as u16;
                assert_eq!(percent(done, total), expected, "{done}/{total}");
            }
        }
    }
}
