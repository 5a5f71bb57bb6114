use crate::task::{Task, TaskList};
use thiserror::Error;
use tracing::{debug, info};

const DEADLINE_SEPARATOR: &str = " /by ";
const EVENT_START_SEPARATOR: &str = " /from ";
const EVENT_END_SEPARATOR: &str = " /to ";

/// A user line split into its command word and the raw remaining argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    pub command: String,
    pub argument: Option<String>,
}

impl Tokens {
    pub fn new(command: impl Into<String>, argument: Option<String>) -> Self {
        Self {
            command: command.into(),
            argument,
        }
    }

    /// Splits a raw line on the first run of whitespace.
    ///
    /// The argument is trimmed, and an argument that is empty after trimming
    /// is treated as absent.
    pub fn from_line(line: &str) -> Self {
        let line = line.trim();
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));
        let rest = rest.trim();
        let argument = (!rest.is_empty()).then(|| rest.to_string());
        Self::new(command, argument)
    }
}

/// The result of a successfully interpreted command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub message: String,
    /// Whether the task list was modified and needs saving.
    pub changed: bool,
}

impl Response {
    fn query(message: String) -> Self {
        Self {
            message,
            changed: false,
        }
    }

    fn mutation(message: String) -> Self {
        Self {
            message,
            changed: true,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("OOPS!!! The {command} command needs something after it.")]
    MissingArgument { command: String },
    #[error("OOPS!!! I couldn't understand that {command} command: {reason}")]
    MalformedArgument { command: String, reason: String },
    #[error("OOPS!!! {}", out_of_range_hint(.index, .size))]
    IndexOutOfRange { index: i64, size: usize },
    #[error("OOPS!!! I'm sorry, but I don't know what '{0}' means.")]
    UnknownCommand(String),
}

fn out_of_range_hint(index: &i64, size: &usize) -> String {
    match size {
        0 => format!("You have 0 tasks in the list, so there is no task {index}."),
        1 => format!("You have 1 task in the list. Please pick 1, not {index}."),
        _ => format!("You have {size} tasks. Please pick a number from 1 to {size}, not {index}."),
    }
}

/// Interprets a command against the task list and returns the text to show.
///
/// Failures are turned into their messages here, so the caller always gets
/// something to display. The list is only touched when the command succeeds.
pub fn parse(tasks: &mut TaskList, tokens: &Tokens) -> String {
    respond(tasks, tokens).message
}

/// Like [`parse`], but also reports whether the list changed.
pub fn respond(tasks: &mut TaskList, tokens: &Tokens) -> Response {
    execute(tasks, tokens).unwrap_or_else(|error| Response::query(error.to_string()))
}

/// Interprets a command against the task list, keeping failures typed.
pub fn execute(tasks: &mut TaskList, tokens: &Tokens) -> Result<Response, CommandError> {
    debug!(command = %tokens.command, argument = ?tokens.argument, "interpreting command");
    let result = dispatch(tasks, tokens);
    if let Err(error) = &result {
        info!(command = %tokens.command, %error, "command rejected");
    }
    result
}

fn dispatch(tasks: &mut TaskList, tokens: &Tokens) -> Result<Response, CommandError> {
    match tokens.command.as_str() {
        "list" => Ok(Response::query(list(tasks))),
        "find" => find(tasks, tokens),
        "mark" => mark(tasks, tokens, true),
        "unmark" => mark(tasks, tokens, false),
        "delete" => delete(tasks, tokens),
        "todo" => {
            let description = required_argument(tokens)?;
            Ok(add(tasks, Task::todo(description)))
        }
        "deadline" => {
            let task = parse_deadline(tokens)?;
            Ok(add(tasks, task))
        }
        "event" => {
            let task = parse_event(tokens)?;
            Ok(add(tasks, task))
        }
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

fn list(tasks: &TaskList) -> String {
    if tasks.is_empty() {
        return "You have no tasks in your list.".to_string();
    }
    numbered(tasks.iter().enumerate())
}

fn find(tasks: &TaskList, tokens: &Tokens) -> Result<Response, CommandError> {
    let keyword = required_argument(tokens)?;
    let matches: Vec<_> = tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| task.description().contains(keyword))
        .collect();
    if matches.is_empty() {
        return Ok(Response::query(format!("No tasks match '{keyword}'.")));
    }
    Ok(Response::query(numbered(matches.into_iter())))
}

fn numbered<'a>(tasks: impl Iterator<Item = (usize, &'a Task)>) -> String {
    tasks
        .map(|(index, task)| format!("{}.{}", index + 1, task))
        .collect::<Vec<_>>()
        .join("\n")
}

fn mark(tasks: &mut TaskList, tokens: &Tokens, done: bool) -> Result<Response, CommandError> {
    let task = task_mut(tasks, tokens)?;
    let message = if done {
        task.mark_as_done();
        format!("Nice! I've marked this task as done:\n  {task}")
    } else {
        task.mark_as_undone();
        format!("OK, I've marked this task as not done yet:\n  {task}")
    };
    Ok(Response::mutation(message))
}

fn delete(tasks: &mut TaskList, tokens: &Tokens) -> Result<Response, CommandError> {
    let index = task_index(tasks, tokens)?;
    let removed = tasks.remove(index);
    Ok(Response::mutation(format!(
        "Noted. I've removed this task:\n  {removed}\n{}",
        count_line(tasks.len())
    )))
}

fn add(tasks: &mut TaskList, task: Task) -> Response {
    let message = format!("Got it. I've added this task:\n  {task}");
    tasks.add(task);
    Response::mutation(format!("{message}\n{}", count_line(tasks.len())))
}

fn count_line(count: usize) -> String {
    let noun = if count == 1 { "task" } else { "tasks" };
    format!("Now you have {count} {noun} in the list.")
}

fn required_argument(tokens: &Tokens) -> Result<&str, CommandError> {
    tokens
        .argument
        .as_deref()
        .map(str::trim)
        .filter(|argument| !argument.is_empty())
        .ok_or_else(|| CommandError::MissingArgument {
            command: tokens.command.clone(),
        })
}

fn task_position(tokens: &Tokens) -> Result<i64, CommandError> {
    let raw = required_argument(tokens)?;
    raw.parse()
        .map_err(|_| malformed(tokens, format!("'{raw}' is not a task number")))
}

fn zero_based(position: i64) -> Option<usize> {
    usize::try_from(position).ok()?.checked_sub(1)
}

/// Resolves the 1-based position argument into a 0-based index into `tasks`.
fn task_index(tasks: &TaskList, tokens: &Tokens) -> Result<usize, CommandError> {
    let position = task_position(tokens)?;
    let size = tasks.len();
    zero_based(position)
        .filter(|&index| index < size)
        .ok_or(CommandError::IndexOutOfRange {
            index: position,
            size,
        })
}

/// Looks up the task named by the 1-based position argument.
fn task_mut<'a>(tasks: &'a mut TaskList, tokens: &Tokens) -> Result<&'a mut Task, CommandError> {
    let position = task_position(tokens)?;
    let size = tasks.len();
    let task = match zero_based(position) {
        Some(index) => tasks.get_mut(index),
        None => None,
    };
    task.ok_or(CommandError::IndexOutOfRange {
        index: position,
        size,
    })
}

fn parse_deadline(tokens: &Tokens) -> Result<Task, CommandError> {
    let argument = required_argument(tokens)?;
    let (description, by) = split_parts(tokens, argument, DEADLINE_SEPARATOR)?;
    Ok(Task::deadline(description, by))
}

fn parse_event(tokens: &Tokens) -> Result<Task, CommandError> {
    let argument = required_argument(tokens)?;
    let (description, period) = split_parts(tokens, argument, EVENT_START_SEPARATOR)?;
    let (from, to) = split_parts(tokens, period, EVENT_END_SEPARATOR)?;
    Ok(Task::event(description, from, to))
}

/// Splits on the first occurrence of `separator`, requiring both sides to be non-empty.
fn split_parts<'a>(
    tokens: &Tokens,
    argument: &'a str,
    separator: &str,
) -> Result<(&'a str, &'a str), CommandError> {
    let marker = separator.trim();
    let (head, tail) = argument
        .split_once(separator)
        .ok_or_else(|| malformed(tokens, format!("expected '{marker}' followed by a value")))?;
    let (head, tail) = (head.trim(), tail.trim());
    if head.is_empty() || tail.is_empty() {
        return Err(malformed(
            tokens,
            format!("both sides of '{marker}' must be filled in"),
        ));
    }
    Ok((head, tail))
}

fn malformed(tokens: &Tokens, reason: String) -> CommandError {
    CommandError::MalformedArgument {
        command: tokens.command.clone(),
        reason,
    }
}
