use crate::storage::TaskStorage;
use crate::ui::Ui;
use anyhow::Context;
use std::io::{BufRead, Write};
use task_cli_core::{TaskList, Tokens};
use tracing::{error, info};

const EXIT_COMMAND: &str = "bye";

/// One interactive run: the task list plus where it gets saved.
pub struct Session<S: TaskStorage> {
    tasks: TaskList,
    storage: S,
}

impl<S: TaskStorage> Session<S> {
    /// Starts a session from whatever the storage already holds.
    pub fn open(storage: S) -> anyhow::Result<Self> {
        let tasks = storage
            .load_all()
            .context("could not load saved tasks")?;
        info!(count = tasks.len(), "session opened");
        Ok(Self {
            tasks: TaskList::from(tasks),
            storage,
        })
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Handles a single line, saving the list if the command changed it.
    pub fn handle_line(&mut self, line: &str) -> String {
        let tokens = Tokens::from_line(line);
        let response = task_cli_core::respond(&mut self.tasks, &tokens);
        if !response.changed {
            return response.message;
        }
        match self.save() {
            Ok(()) => response.message,
            Err(e) => format!("{}\n(Could not save your tasks: {e:#})", response.message),
        }
    }

    /// Reads commands until `bye` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, ui: &mut Ui<W>) -> anyhow::Result<()> {
        ui.greet()?;
        for line in input.lines() {
            let line = line.context("could not read input")?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line == EXIT_COMMAND {
                break;
            }
            let message = self.handle_line(line);
            ui.show(&message)?;
        }
        ui.farewell()?;
        info!(count = self.tasks.len(), "session closed");
        Ok(())
    }

    fn save(&self) -> anyhow::Result<()> {
        self.storage.save_all(self.tasks.as_slice()).map_err(|e| {
            error!(error = %e, "failed to save tasks");
            e.into()
        })
    }
}
