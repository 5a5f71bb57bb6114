use std::fmt::{Display, Formatter};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single unit of trackable work.
///
/// Every task carries a description and a completion flag; the kind-specific
/// details live in [`TaskKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "UncheckedTask"))]
pub struct Task {
    description: String,
    done: bool,
    kind: TaskKind,
}

/// A task read from outside that has not been checked yet.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct UncheckedTask {
    description: String,
    #[serde(default)]
    done: bool,
    kind: TaskKind,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidTask {
    #[error("task description is blank")]
    BlankDescription,
    #[error("task '{description}' has a blank '{field}' value")]
    BlankField {
        description: String,
        field: &'static str,
    },
}

#[cfg(feature = "serde")]
impl TryFrom<UncheckedTask> for Task {
    type Error = InvalidTask;

    fn try_from(unchecked: UncheckedTask) -> Result<Self, Self::Error> {
        let task = Task {
            description: unchecked.description,
            done: unchecked.done,
            kind: unchecked.kind,
        };
        task.check()?;
        Ok(task)
    }
}

/// The kinds of task that can be tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum TaskKind {
    Todo,
    Deadline { by: String },
    Event { from: String, to: String },
}

impl Task {
    fn new(description: impl Into<String>, kind: TaskKind) -> Self {
        Task {
            description: description.into(),
            done: false,
            kind,
        }
    }

    pub fn todo(description: impl Into<String>) -> Self {
        Self::new(description, TaskKind::Todo)
    }

    pub fn deadline(description: impl Into<String>, by: impl Into<String>) -> Self {
        Self::new(description, TaskKind::Deadline { by: by.into() })
    }

    pub fn event(
        description: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self::new(
            description,
            TaskKind::Event {
                from: from.into(),
                to: to.into(),
            },
        )
    }

    /// Checks that the description and every kind-specific value are non-blank.
    pub fn check(&self) -> Result<(), InvalidTask> {
        if self.description.trim().is_empty() {
            return Err(InvalidTask::BlankDescription);
        }
        let blank = |field: &'static str| InvalidTask::BlankField {
            description: self.description.clone(),
            field,
        };
        match &self.kind {
            TaskKind::Todo => Ok(()),
            TaskKind::Deadline { by } if by.trim().is_empty() => Err(blank("by")),
            TaskKind::Deadline { .. } => Ok(()),
            TaskKind::Event { from, .. } if from.trim().is_empty() => Err(blank("from")),
            TaskKind::Event { to, .. } if to.trim().is_empty() => Err(blank("to")),
            TaskKind::Event { .. } => Ok(()),
        }
    }

    /// Marks the task as done. Marking an already done task is a no-op.
    pub fn mark_as_done(&mut self) {
        self.done = true;
    }

    /// Marks the task as not done. Unmarking a pending task is a no-op.
    pub fn mark_as_undone(&mut self) {
        self.done = false;
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    /// Returns the fixed textual form of the task, e.g. `[D][X] return book (by: Sunday)`.
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn kind_marker(&self) -> char {
        match self.kind {
            TaskKind::Todo => 'T',
            TaskKind::Deadline { .. } => 'D',
            TaskKind::Event { .. } => 'E',
        }
    }

    fn status_marker(&self) -> char {
        if self.done { 'X' } else { ' ' }
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}][{}] {}",
            self.kind_marker(),
            self.status_marker(),
            self.description
        )?;
        match &self.kind {
            TaskKind::Todo => Ok(()),
            TaskKind::Deadline { by } => write!(f, " (by: {by})"),
            TaskKind::Event { from, to } => write!(f, " (from: {from} to: {to})"),
        }
    }
}

/// The ordered collection of tasks for a session.
///
/// Positions handed out to users are 1-based; the accessors here take 0-based
/// indices and leave range checking to the caller.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self { tasks: vec![] }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Task> {
        self.tasks.get_mut(index)
    }

    /// Removes the task at `index`, shifting every later task down by one.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> Task {
        self.tasks.remove(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}
