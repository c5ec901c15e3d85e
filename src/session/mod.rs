//! Session Module
//!
//! The interactive command loop.
//!
//! ## Flow
//! ```text
//!   ┌──────────────────────┐
//!   │  awaiting command    │◄──────────────┐
//!   └──────────┬───────────┘               │
//!              │ "1".."5"   → CRUD action ──┤
//!              │ other      → invalid ──────┘
//!              │ "6" / EOF  → farewell, return
//!              ▼
//! ```
//!
//! Store errors are rendered as one line and never end the loop. Only a
//! failure to read from or write to the console itself is returned.

mod console;

use console::Console;

use std::io::{BufRead, Write};

use crate::command::MenuChoice;
use crate::error::{Result, RosterError};
use crate::storage::LoadOutcome;
use crate::store::{DeleteOutcome, RecordStore};

const MENU_TITLE: &str = "--- Student Record Management System ---";
const FAREWELL: &str = "Exiting program. Records saved.";

/// Whether the loop should keep going after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    EndOfInput,
}

/// One interactive session over a record store
pub struct Session<'a, R, W> {
    /// The store, borrowed for the whole session
    store: &'a mut RecordStore,

    /// Prompt/response I/O
    console: Console<R, W>,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(store: &'a mut RecordStore, input: R, output: W) -> Self {
        Self {
            store,
            console: Console::new(input, output),
        }
    }

    /// Tell the user how the backing file was loaded
    ///
    /// Silent unless the file was corrupt.
    pub fn report_load(&mut self, outcome: &LoadOutcome) -> Result<()> {
        if let LoadOutcome::Corrupt { reason, backup } = outcome {
            self.console.say(format!(
                "Warning: {} could not be read as student records ({}).",
                self.store.data_file().display(),
                reason
            ))?;
            let kept = match backup {
                Some(path) => format!("The original file was kept at {}.", path.display()),
                None => "No backup of the original file could be made.".to_string(),
            };
            self.console.say(format!("Starting with no records. {}", kept))?;
        }
        Ok(())
    }

    /// Run until the user exits or input ends
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.show_menu()?;

            let Some(line) = self.console.prompt("Enter your choice (1-6): ")? else {
                return self.farewell();
            };

            let flow = match MenuChoice::parse(&line) {
                Some(MenuChoice::Exit) => return self.farewell(),
                Some(choice) => {
                    tracing::debug!("Menu choice: {:?}", choice);
                    self.dispatch(choice)?
                }
                None => {
                    self.console.say("Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::EndOfInput {
                return self.farewell();
            }
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    fn dispatch(&mut self, choice: MenuChoice) -> Result<Flow> {
        match choice {
            MenuChoice::Add => self.add(),
            MenuChoice::View => self.view(),
            MenuChoice::Search => self.search(),
            MenuChoice::Update => self.update(),
            MenuChoice::Delete => self.delete(),
            MenuChoice::Exit => Ok(Flow::EndOfInput),
        }
    }

    fn add(&mut self) -> Result<Flow> {
        let Some(id) = self.console.prompt("Enter Student ID: ")? else {
            return Ok(Flow::EndOfInput);
        };
        let id = id.trim().to_string();
        if self.store.contains(&id) {
            self.report(RosterError::DuplicateKey(id))?;
            return Ok(Flow::Continue);
        }

        let Some(name) = self.console.prompt("Enter Student Name: ")? else {
            return Ok(Flow::EndOfInput);
        };
        let Some(age) = self.console.prompt("Enter Age: ")? else {
            return Ok(Flow::EndOfInput);
        };
        let Some(grade) = self.console.prompt("Enter Grade: ")? else {
            return Ok(Flow::EndOfInput);
        };

        match self.store.add(&id, &name, &age, &grade) {
            Ok(record) => self
                .console
                .say(format!("Record added for {} (ID: {})", record.name, id))?,
            Err(e) => self.report(e)?,
        }
        Ok(Flow::Continue)
    }

    fn view(&mut self) -> Result<Flow> {
        let records = self.store.view();
        if records.is_empty() {
            self.console.say("No records found.")?;
            return Ok(Flow::Continue);
        }

        let lines: Vec<String> = records
            .iter()
            .map(|(id, r)| {
                format!("ID: {} | Name: {} | Age: {} | Grade: {}", id, r.name, r.age, r.grade)
            })
            .collect();

        self.console.say("\nStudent Records:")?;
        for line in lines {
            self.console.say(line)?;
        }
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> Result<Flow> {
        let Some(id) = self.console.prompt("Enter Student ID to search: ")? else {
            return Ok(Flow::EndOfInput);
        };

        let found = self
            .store
            .search(&id)
            .map(|r| format!("Found: {} (Age: {}, Grade: {})", r.name, r.age, r.grade));
        match found {
            Ok(line) => self.console.say(line)?,
            Err(e) => self.report(e)?,
        }
        Ok(Flow::Continue)
    }

    fn update(&mut self) -> Result<Flow> {
        let Some(id) = self.console.prompt("Enter Student ID to update: ")? else {
            return Ok(Flow::EndOfInput);
        };
        let current = match self.store.search(&id) {
            Ok(record) => record.clone(),
            Err(e) => {
                self.report(e)?;
                return Ok(Flow::Continue);
            }
        };

        self.console
            .say("Enter new details (leave blank to keep current value):")?;
        let Some(name) = self.console.prompt(&format!("New Name [{}]: ", current.name))? else {
            return Ok(Flow::EndOfInput);
        };
        let Some(age) = self.console.prompt(&format!("New Age [{}]: ", current.age))? else {
            return Ok(Flow::EndOfInput);
        };
        let Some(grade) = self.console.prompt(&format!("New Grade [{}]: ", current.grade))? else {
            return Ok(Flow::EndOfInput);
        };

        match self.store.update(&id, &name, &age, &grade) {
            Ok(_) => self.console.say("Record updated successfully.")?,
            Err(e) => self.report(e)?,
        }
        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> Result<Flow> {
        let Some(id) = self.console.prompt("Enter Student ID to delete: ")? else {
            return Ok(Flow::EndOfInput);
        };
        let name = match self.store.search(&id) {
            Ok(record) => record.name.clone(),
            Err(e) => {
                self.report(e)?;
                return Ok(Flow::Continue);
            }
        };

        let question = format!("Are you sure you want to delete record for {}? (y/n): ", name);
        let Some(answer) = self.console.prompt(&question)? else {
            return Ok(Flow::EndOfInput);
        };
        let confirmed = answer.trim().eq_ignore_ascii_case("y");

        match self.store.delete(&id, |_| confirmed) {
            Ok(DeleteOutcome::Deleted(_)) => self.console.say("Record deleted successfully.")?,
            Ok(DeleteOutcome::Kept) => {}
            Err(e) => self.report(e)?,
        }
        Ok(Flow::Continue)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn show_menu(&mut self) -> Result<()> {
        self.console.say(format!("\n{}", MENU_TITLE))?;
        for choice in MenuChoice::ALL {
            self.console
                .say(format!("{}. {}", choice.number(), choice.label()))?;
        }
        Ok(())
    }

    fn farewell(&mut self) -> Result<()> {
        self.console.say(FAREWELL)?;
        self.console.flush()
    }

    /// Render a store error for the user
    fn report(&mut self, error: RosterError) -> Result<()> {
        let message = match &error {
            RosterError::DuplicateKey(_) => "Student ID already exists!".to_string(),
            RosterError::NotFound(_) => "Student not found.".to_string(),
            RosterError::InvalidAge(text) => format!(
                "Invalid age {:?}: please enter a whole number. No changes were made.",
                text
            ),
            RosterError::Io(_) | RosterError::Serialization(_) => {
                format!("Failed to save records: {}", error)
            }
        };
        self.console.say(message)
    }
}
