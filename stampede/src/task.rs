//! Tasks: the units of work a virtual user picks from.
use std::fmt;
use std::future::Future;
use std::pin::Pin;

pub use stampede_core::DEFAULT_TASK_WEIGHT;

/// Error surfaced by a task to the swarm.
pub type TaskError = Box<dyn std::error::Error + Send + Sync>;

pub type TaskResult = Result<(), TaskError>;

pub type TaskFuture<'a> = Pin<Box<dyn Future<Output = TaskResult> + Send + 'a>>;

/// Function pointer behind a task. Receives the owning user's session.
pub type TaskFn<S> = for<'a> fn(&'a S) -> TaskFuture<'a>;

/// A named, weighted unit of user behavior.
///
/// Usually created with the [`#[task]`](stampede_macros::task) macro rather than by hand.
pub struct Task<S> {
    name: &'static str,
    weight: u32,
    func: TaskFn<S>,
}

impl<S> Task<S> {
    pub fn new(name: &'static str, weight: u32, func: TaskFn<S>) -> Self {
        Self { name, weight, func }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Override the declared weight.
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Execute the task once against `session`.
    pub fn run<'a>(&self, session: &'a S) -> TaskFuture<'a> {
        (self.func)(session)
    }
}

// Manual impls: `S` itself need not be `Clone`/`Debug`.
impl<S> Clone for Task<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            weight: self.weight,
            func: self.func,
        }
    }
}

impl<S> fmt::Debug for Task<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("weight", &self.weight)
            .finish()
    }
}

/// Return values a task function may produce.
pub trait TaskOutput {
    fn into_task_result(self) -> TaskResult;
}

impl TaskOutput for () {
    fn into_task_result(self) -> TaskResult {
        Ok(())
    }
}

impl<T, E> TaskOutput for Result<T, E>
where
    E: Into<TaskError>,
{
    fn into_task_result(self) -> TaskResult {
        self.map(|_| ()).map_err(Into::into)
    }
}
