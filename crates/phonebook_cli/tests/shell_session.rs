use phonebook_cli::{Prompt, Shell};
use phonebook_core::{ContactDraft, ContactStore};
use rustyline::error::ReadlineError;
use std::collections::VecDeque;

/// Prompt fed from a fixed script; `None` entries simulate Ctrl-C.
struct ScriptedPrompt {
    commands: VecDeque<&'static str>,
    fields: VecDeque<Option<&'static str>>,
    seen_initials: Vec<String>,
}

impl ScriptedPrompt {
    fn new(commands: &[&'static str], fields: &[Option<&'static str>]) -> Self {
        Self {
            commands: commands.iter().copied().collect(),
            fields: fields.iter().copied().collect(),
            seen_initials: Vec::new(),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn read_command(&mut self, _prompt: &str) -> rustyline::Result<String> {
        self.commands
            .pop_front()
            .map(str::to_string)
            .ok_or(ReadlineError::Eof)
    }

    fn read_field(&mut self, _prompt: &str, initial: &str) -> rustyline::Result<String> {
        self.seen_initials.push(initial.to_string());
        match self.fields.pop_front() {
            Some(Some(value)) => Ok(value.to_string()),
            Some(None) => Err(ReadlineError::Interrupted),
            None => Err(ReadlineError::Eof),
        }
    }
}

fn run_session(
    store: &ContactStore,
    commands: &[&'static str],
    fields: &[Option<&'static str>],
) -> String {
    let mut shell = Shell::new(
        store,
        ScriptedPrompt::new(commands, fields),
        Vec::<u8>::new(),
    );
    shell.run().unwrap();
    String::from_utf8(shell.into_output()).unwrap()
}

#[test]
fn add_lists_the_new_contact() {
    let store = ContactStore::initialize_in_memory().unwrap();

    let output = run_session(
        &store,
        &["add", "quit"],
        &[Some("Alice"), Some("555-1000"), Some("")],
    );

    assert!(output.starts_with("(no contacts)"));
    assert!(output.contains("  1. Alice - 555-1000\n"));
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn empty_name_or_phone_or_cancel_writes_nothing() {
    let store = ContactStore::initialize_in_memory().unwrap();

    run_session(
        &store,
        &["add", "add", "add"],
        &[
            Some(""),
            Some("Bob"),
            Some(""),
            Some("Carol"),
            Some("555"),
            None,
        ],
    );

    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn whitespace_only_fields_are_saved_as_entered() {
    let store = ContactStore::initialize_in_memory().unwrap();

    run_session(&store, &["add"], &[Some(" "), Some("555"), Some("")]);

    let saved = store.find_by_name(" ").unwrap().unwrap();
    assert_eq!(saved.to_draft(), ContactDraft::new(" ", "555", ""));
}

#[test]
fn search_text_spaces_are_part_of_the_match() {
    let store = ContactStore::initialize_in_memory().unwrap();
    store.add("Ann Lee", "1", "").unwrap();
    store.add("Annabel", "2", "").unwrap();

    let mut shell = Shell::new(&store, ScriptedPrompt::new(&[], &[]), Vec::<u8>::new());

    shell.execute_line("search Ann").unwrap();
    assert_eq!(shell.rows().len(), 2);

    shell.execute_line("search Ann ").unwrap();
    assert_eq!(shell.search_text(), "Ann ");
    let names = shell
        .rows()
        .iter()
        .map(|contact| contact.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Ann Lee"]);

    shell.execute_line("search  Lee").unwrap();
    assert_eq!(shell.rows().len(), 1);
    shell.execute_line("search  Annabel").unwrap();
    assert!(shell.rows().is_empty());
}

#[test]
fn edit_prefills_current_values_and_overwrites_by_id() {
    let store = ContactStore::initialize_in_memory().unwrap();
    let first = store.add("Sam", "1", "").unwrap();
    let second = store.add("Sam", "2", "s@x.com").unwrap();

    let mut shell = Shell::new(
        &store,
        ScriptedPrompt::new(
            &["edit 2", "quit"],
            &[Some("Samuel"), Some("22"), Some("")],
        ),
        Vec::<u8>::new(),
    );
    shell.run().unwrap();

    assert_eq!(store.get(first).unwrap().unwrap().name, "Sam");
    let edited = store.get(second).unwrap().unwrap();
    assert_eq!(edited.to_draft(), ContactDraft::new("Samuel", "22", ""));
    assert_eq!(shell.rows().len(), 2);
}

#[test]
fn edit_shows_stored_values_as_initial_text() {
    let store = ContactStore::initialize_in_memory().unwrap();
    store.add("Ann", "42", "ann@x.com").unwrap();
    let mut prompt = ScriptedPrompt::new(&[], &[Some("Ann"), Some("42"), Some("ann@x.com")]);

    {
        let mut shell = Shell::new(&store, &mut prompt, Vec::<u8>::new());
        shell.refresh().unwrap();
        shell.execute_line("edit 1").unwrap();
    }

    assert_eq!(prompt.seen_initials, vec!["Ann", "42", "ann@x.com"]);
}

#[test]
fn delete_requires_confirmation() {
    let store = ContactStore::initialize_in_memory().unwrap();
    store.add("Dora", "7", "").unwrap();

    run_session(&store, &["delete 1"], &[Some("n")]);
    assert_eq!(store.count().unwrap(), 1);

    run_session(&store, &["delete 1"], &[None]);
    assert_eq!(store.count().unwrap(), 1);

    let output = run_session(&store, &["delete 1"], &[Some("Y")]);
    assert_eq!(store.count().unwrap(), 0);
    assert!(output.ends_with("(no contacts)\n"));
}

#[test]
fn mutations_relist_with_active_search_text() {
    let store = ContactStore::initialize_in_memory().unwrap();
    store.add("Alice", "555-1000", "").unwrap();
    store.add("Bob", "777-2000", "").unwrap();

    let mut shell = Shell::new(
        &store,
        ScriptedPrompt::new(&[], &[Some("Alicia"), Some("555-1001"), Some("")]),
        Vec::<u8>::new(),
    );
    shell.execute_line("search 555").unwrap();
    assert_eq!(shell.rows().len(), 1);

    shell.execute_line("add").unwrap();

    assert_eq!(shell.search_text(), "555");
    let names = shell
        .rows()
        .iter()
        .map(|contact| contact.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Alice", "Alicia"]);

    shell.execute_line("search").unwrap();
    assert_eq!(shell.rows().len(), 3);
}

#[test]
fn stale_row_is_reported_and_list_refreshed() {
    let store = ContactStore::initialize_in_memory().unwrap();
    let id = store.add("Eve", "9", "").unwrap();

    let mut shell = Shell::new(&store, ScriptedPrompt::new(&[], &[]), Vec::<u8>::new());
    shell.refresh().unwrap();
    store.delete_by_id(id).unwrap();

    shell.execute_line("edit 1").unwrap();

    assert!(shell.rows().is_empty());
    let output = String::from_utf8(shell.into_output()).unwrap();
    assert!(output.contains("no longer exists"));
}

#[test]
fn out_of_range_positions_are_reported() {
    let store = ContactStore::initialize_in_memory().unwrap();

    let output = run_session(&store, &["edit 3", "delete 1", "bogus"], &[]);

    assert!(output.contains("no contact #3 in the list"));
    assert!(output.contains("no contact #1 in the list"));
    assert!(output.contains("unknown command `bogus`"));
}

#[test]
fn closed_store_ends_the_session_with_error() {
    let mut store = ContactStore::initialize_in_memory().unwrap();
    store.close().unwrap();

    let mut shell = Shell::new(&store, ScriptedPrompt::new(&[], &[]), Vec::<u8>::new());
    assert!(shell.run().is_err());
}
