//! Line input sources for the shell.

use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};

/// Blocking line input used by the shell.
///
/// `ReadlineError::Interrupted` and `ReadlineError::Eof` mean the user
/// cancelled the prompt.
pub trait Prompt {
    /// Reads one command line.
    fn read_command(&mut self, prompt: &str) -> rustyline::Result<String>;
    /// Reads one field value, pre-filled with `initial` for in-place editing.
    fn read_field(&mut self, prompt: &str, initial: &str) -> rustyline::Result<String>;
}

/// Terminal prompt backed by a rustyline editor with command history.
pub struct EditorPrompt {
    editor: Editor<(), DefaultHistory>,
}

impl EditorPrompt {
    pub fn new() -> rustyline::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl Prompt for EditorPrompt {
    fn read_command(&mut self, prompt: &str) -> rustyline::Result<String> {
        let line = self.editor.readline(prompt)?;
        if !line.trim().is_empty() {
            self.editor.add_history_entry(line.as_str())?;
        }
        Ok(line)
    }

    fn read_field(&mut self, prompt: &str, initial: &str) -> rustyline::Result<String> {
        self.editor.readline_with_initial(prompt, (initial, ""))
    }
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn read_command(&mut self, prompt: &str) -> rustyline::Result<String> {
        (**self).read_command(prompt)
    }

    fn read_field(&mut self, prompt: &str, initial: &str) -> rustyline::Result<String> {
        (**self).read_field(prompt, initial)
    }
}
