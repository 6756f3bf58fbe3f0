//! User behavior definitions
use crate::task::Task;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use stampede_core::{ConfigError, WaitPolicy};
use std::fmt;

/// How a virtual user chooses its next task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskOrder {
    /// Pick at random, proportionally to task weights.
    #[default]
    Weighted,
    /// Walk tasks in declaration order, running each `weight` times before moving on, then wrap
    /// around.
    Sequential,
}

/// The behavior shared by every virtual user of a swarm: a wait policy plus weighted tasks.
///
/// Built once, validated, and then read concurrently by all users.
///
/// # Example
/// ```ignore
/// use stampede::prelude::*;
///
/// #[task]
/// async fn index<S: Session>(session: &S) -> Result<(), TransportError> {
///     session.get("/").await?;
///     Ok(())
/// }
///
/// fn web_user<S: Session>() -> Result<UserBehavior<S>, ConfigError> {
///     UserBehavior::builder("WebUser")
///         .wait_time(WaitPolicy::between_secs(1., 1.)?)
///         .task(index())
///         .build()
/// }
/// ```
pub struct UserBehavior<S> {
    name: String,
    wait_time: WaitPolicy,
    order: TaskOrder,
    tasks: Vec<Task<S>>,
    weights: WeightedIndex<u32>,
}

impl<S> UserBehavior<S> {
    pub fn builder(name: &str) -> UserBehaviorBuilder<S> {
        UserBehaviorBuilder {
            name: name.to_string(),
            wait_time: WaitPolicy::default(),
            order: TaskOrder::default(),
            tasks: vec![],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wait_time(&self) -> &WaitPolicy {
        &self.wait_time
    }

    pub fn order(&self) -> TaskOrder {
        self.order
    }

    pub fn tasks(&self) -> &[Task<S>] {
        &self.tasks
    }

    pub fn task(&self, name: &str) -> Option<&Task<S>> {
        self.tasks.iter().find(|t| t.name() == name)
    }

    pub(crate) fn picker(&self) -> TaskPicker {
        TaskPicker {
            task: 0,
            repeats: 0,
        }
    }
}

impl<S> fmt::Debug for UserBehavior<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserBehavior")
            .field("name", &self.name)
            .field("wait_time", &self.wait_time)
            .field("order", &self.order)
            .field("tasks", &self.tasks)
            .finish()
    }
}

pub struct UserBehaviorBuilder<S> {
    name: String,
    wait_time: WaitPolicy,
    order: TaskOrder,
    tasks: Vec<Task<S>>,
}

impl<S> UserBehaviorBuilder<S> {
    /// Delay between consecutive tasks. Defaults to no delay.
    pub fn wait_time(mut self, wait_time: WaitPolicy) -> Self {
        self.wait_time = wait_time;
        self
    }

    pub fn order(mut self, order: TaskOrder) -> Self {
        self.order = order;
        self
    }

    pub fn task(mut self, task: Task<S>) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn tasks(mut self, tasks: impl IntoIterator<Item = Task<S>>) -> Self {
        self.tasks.extend(tasks);
        self
    }

    pub fn build(self) -> Result<UserBehavior<S>, ConfigError> {
        if self.tasks.is_empty() {
            return Err(ConfigError::NoTasks(self.name));
        }

        if let Some(task) = self.tasks.iter().find(|t| t.weight() == 0) {
            return Err(ConfigError::ZeroWeight(task.name()));
        }

        // WeightedIndex sums unchecked; the total must fit in a u32.
        self.tasks
            .iter()
            .try_fold(0u32, |total, t| total.checked_add(t.weight()))
            .ok_or_else(|| {
                ConfigError::InvalidWeights("total weight overflows u32".to_string())
            })?;

        let weights = WeightedIndex::new(self.tasks.iter().map(Task::weight))
            .map_err(|e| ConfigError::InvalidWeights(e.to_string()))?;

        Ok(UserBehavior {
            name: self.name,
            wait_time: self.wait_time,
            order: self.order,
            tasks: self.tasks,
            weights,
        })
    }
}

/// Per-user cursor over a behavior's tasks.
pub(crate) struct TaskPicker {
    task: usize,
    // Runs of `task` already done in sequential order.
    repeats: u32,
}

impl TaskPicker {
    pub fn next<'a, S, R: Rng + ?Sized>(
        &mut self,
        behavior: &'a UserBehavior<S>,
        rng: &mut R,
    ) -> &'a Task<S> {
        let idx = match behavior.order {
            TaskOrder::Weighted => behavior.weights.sample(rng),
            TaskOrder::Sequential => {
                let idx = self.task;
                self.repeats += 1;
                if self.repeats >= behavior.tasks[idx].weight() {
                    self.task = (idx + 1) % behavior.tasks.len();
                    self.repeats = 0;
                }
                idx
            }
        };

        &behavior.tasks[idx]
    }
}
