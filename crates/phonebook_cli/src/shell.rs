//! Command loop over a `ContactStore`.
//!
//! # Responsibility
//! - Parse typed commands and collect field values through prompts.
//! - Keep the displayed list in sync with the store and the search text.
//!
//! # Invariants
//! - Empty name or phone, or a cancelled prompt, aborts without a store write.
//! - Every mutation is followed by a re-list using the current search text.
//! - Edit and delete address rows by surrogate id, never by display name.

use crate::prompt::Prompt;
use log::{debug, warn};
use phonebook_core::{Contact, ContactDraft, ContactId, ContactStore, StoreError};
use rustyline::error::ReadlineError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;

const COMMAND_PROMPT: &str = "phonebook> ";

const HELP_TEXT: &str = "Commands:
  list            show contacts matching the current search
  search [text]   filter by name, phone or email (no text clears the filter)
  add             add a contact
  edit <n>        edit contact number n
  delete <n>      delete contact number n
  help            show this help
  quit            leave the phone book";

/// One parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Search(String),
    Add,
    /// 1-based position in the displayed list.
    Edit(usize),
    Delete(usize),
    Help,
    Quit,
    /// Input that does not form a valid command.
    Invalid(String),
}

/// Parses one input line; `None` for a blank line.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim_start();
    if line.trim().is_empty() {
        return None;
    }

    // Only the one separator after the command word is dropped; search text
    // keeps its surrounding spaces.
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "list" | "ls" => Command::List,
        "search" | "find" => Command::Search(rest.to_string()),
        "add" => Command::Add,
        "edit" => parse_position(rest).map_or_else(|| invalid("edit <n>"), Command::Edit),
        "delete" | "rm" => {
            parse_position(rest).map_or_else(|| invalid("delete <n>"), Command::Delete)
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command `{other}`; type `help`")),
    };

    Some(command)
}

fn parse_position(rest: &str) -> Option<usize> {
    rest.trim().parse::<usize>().ok().filter(|n| *n > 0)
}

fn invalid(usage: &str) -> Command {
    Command::Invalid(format!("usage: {usage}"))
}

/// Error that ends a shell session.
#[derive(Debug)]
pub enum ShellError {
    Prompt(ReadlineError),
    Output(std::io::Error),
    Store(StoreError),
}

impl Display for ShellError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Prompt(err) => write!(f, "input error: {err}"),
            Self::Output(err) => write!(f, "output error: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ShellError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Prompt(err) => Some(err),
            Self::Output(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ShellError {
    fn from(value: std::io::Error) -> Self {
        Self::Output(value)
    }
}

type ShellResult<T> = Result<T, ShellError>;

enum Flow {
    Continue,
    Quit,
}

/// Interactive session bound to one open store.
pub struct Shell<'s, P: Prompt, W: Write> {
    store: &'s ContactStore,
    prompt: P,
    out: W,
    search_text: String,
    rows: Vec<Contact>,
}

impl<'s, P: Prompt, W: Write> Shell<'s, P, W> {
    pub fn new(store: &'s ContactStore, prompt: P, out: W) -> Self {
        Self {
            store,
            prompt,
            out,
            search_text: String::new(),
            rows: Vec::new(),
        }
    }

    /// Contacts currently displayed, in list order.
    pub fn rows(&self) -> &[Contact] {
        &self.rows
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Consumes the shell and returns its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs the command loop until `quit` or end of input.
    pub fn run(&mut self) -> ShellResult<()> {
        self.refresh()?;

        loop {
            let line = match self.prompt.read_command(COMMAND_PROMPT) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(ShellError::Prompt(err)),
            };

            let Some(command) = parse_command(&line) else {
                continue;
            };
            if let Flow::Quit = self.execute(command)? {
                break;
            }
        }

        Ok(())
    }

    /// Executes one command; exposed for scripted sessions.
    pub fn execute_line(&mut self, line: &str) -> ShellResult<()> {
        if let Some(command) = parse_command(line) {
            self.execute(command)?;
        }
        Ok(())
    }

    fn execute(&mut self, command: Command) -> ShellResult<Flow> {
        debug!("event=shell_command module=shell command={}", command_name(&command));
        match command {
            Command::List => self.refresh()?,
            Command::Search(text) => {
                self.search_text = text;
                self.refresh()?;
            }
            Command::Add => self.add()?,
            Command::Edit(position) => self.edit(position)?,
            Command::Delete(position) => self.delete(position)?,
            Command::Help => writeln!(self.out, "{HELP_TEXT}")?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Invalid(message) => writeln!(self.out, "{message}")?,
        }
        Ok(Flow::Continue)
    }

    /// Reloads the list with the current search text and prints it.
    pub fn refresh(&mut self) -> ShellResult<()> {
        let filter = Some(self.search_text.as_str()).filter(|text| !text.is_empty());
        match self.store.list(filter) {
            Ok(rows) => self.rows = rows,
            Err(err) => return self.report(err),
        }

        if self.rows.is_empty() {
            match filter {
                Some(text) => writeln!(self.out, "(no contacts match `{text}`)")?,
                None => writeln!(self.out, "(no contacts)")?,
            }
            return Ok(());
        }

        for (index, contact) in self.rows.iter().enumerate() {
            writeln!(self.out, "{:>3}. {}", index + 1, contact.display_line())?;
        }
        Ok(())
    }

    fn add(&mut self) -> ShellResult<()> {
        let Some(draft) = self.collect_draft(&ContactDraft::default())? else {
            return Ok(());
        };

        match self.store.add(&draft.name, &draft.phone, &draft.email) {
            Ok(_) => self.refresh(),
            Err(err) => self.report(err),
        }
    }

    fn edit(&mut self, position: usize) -> ShellResult<()> {
        let Some(row_id) = self.row_id(position)? else {
            return Ok(());
        };

        // Rehydrate from the store; the row may have changed since listing.
        let current = match self.store.get(row_id) {
            Ok(Some(contact)) => contact,
            Ok(None) => {
                writeln!(self.out, "contact #{position} no longer exists")?;
                return self.refresh();
            }
            Err(err) => return self.report(err),
        };

        let Some(draft) = self.collect_draft(&current.to_draft())? else {
            return Ok(());
        };

        match self.store.update_by_id(current.id, &draft) {
            Ok(()) => self.refresh(),
            Err(err) => self.report(err),
        }
    }

    fn delete(&mut self, position: usize) -> ShellResult<()> {
        let Some(row_id) = self.row_id(position)? else {
            return Ok(());
        };
        let name = self.rows[position - 1].name.clone();

        let question = format!("Delete {name}? [y/N] ");
        let confirmed = match self.ask(&question, "")? {
            Some(answer) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            None => false,
        };
        if !confirmed {
            return Ok(());
        }

        match self.store.delete_by_id(row_id) {
            Ok(()) => self.refresh(),
            Err(err) => self.report(err),
        }
    }

    /// Prompts for all three fields starting from `initial`.
    ///
    /// Returns `None` when a prompt is cancelled or name/phone is left empty.
    fn collect_draft(&mut self, initial: &ContactDraft) -> ShellResult<Option<ContactDraft>> {
        let Some(name) = self.ask("Name: ", &initial.name)? else {
            return Ok(None);
        };
        if name.is_empty() {
            return Ok(None);
        }

        let Some(phone) = self.ask("Phone: ", &initial.phone)? else {
            return Ok(None);
        };
        if phone.is_empty() {
            return Ok(None);
        }

        let Some(email) = self.ask("Email (optional): ", &initial.email)? else {
            return Ok(None);
        };

        Ok(Some(ContactDraft::new(name, phone, email)))
    }

    fn ask(&mut self, label: &str, initial: &str) -> ShellResult<Option<String>> {
        match self.prompt.read_field(label, initial) {
            Ok(value) => Ok(Some(value)),
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
            Err(err) => Err(ShellError::Prompt(err)),
        }
    }

    fn row_id(&mut self, position: usize) -> ShellResult<Option<ContactId>> {
        match self.rows.get(position.wrapping_sub(1)) {
            Some(contact) => Ok(Some(contact.id)),
            None => {
                writeln!(self.out, "no contact #{position} in the list")?;
                Ok(None)
            }
        }
    }

    fn report(&mut self, err: StoreError) -> ShellResult<()> {
        match err {
            // Validation is pre-checked by the prompts; a late rejection just
            // cancels the action.
            StoreError::Validation(_) => Ok(()),
            StoreError::NotFound(_) => {
                writeln!(self.out, "contact no longer exists")?;
                self.refresh()
            }
            StoreError::Closed => Err(ShellError::Store(err)),
            other => {
                warn!("event=shell_store_error module=shell status=error error={other}");
                writeln!(self.out, "error: {other}")?;
                Ok(())
            }
        }
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::List => "list",
        Command::Search(_) => "search",
        Command::Add => "add",
        Command::Edit(_) => "edit",
        Command::Delete(_) => "delete",
        Command::Help => "help",
        Command::Quit => "quit",
        Command::Invalid(_) => "invalid",
    }
}
