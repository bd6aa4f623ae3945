use phonebook_core::{Contact, ContactDraft, ContactStore, StoreError};

fn fields(contacts: &[Contact]) -> Vec<(&str, &str, &str)> {
    contacts
        .iter()
        .map(|c| (c.name.as_str(), c.phone.as_str(), c.email.as_str()))
        .collect()
}

#[test]
fn add_update_delete_scenario() {
    let store = ContactStore::initialize_in_memory().unwrap();

    store.add("Alice", "555-1000", "").unwrap();
    assert_eq!(
        fields(&store.list(None).unwrap()),
        vec![("Alice", "555-1000", "")]
    );

    store
        .update("Alice", "Alice B", "555-2000", "a@x.com")
        .unwrap();
    let updated = store.find_by_name("Alice B").unwrap().unwrap();
    assert_eq!(
        updated.to_draft(),
        ContactDraft::new("Alice B", "555-2000", "a@x.com")
    );
    assert!(store.find_by_name("Alice").unwrap().is_none());

    store.delete("Alice B").unwrap();
    assert!(store.list(None).unwrap().is_empty());
}

#[test]
fn add_grows_list_by_exactly_one_matching_row() {
    let store = ContactStore::initialize_in_memory().unwrap();
    store.add("Bob", "1", "").unwrap();
    let before = store.list(None).unwrap();

    store.add("Bob", "1", "").unwrap();
    let after = store.list(None).unwrap();

    assert_eq!(after.len(), before.len() + 1);
    let matching = |list: &[Contact]| {
        list.iter()
            .filter(|c| c.to_draft() == ContactDraft::new("Bob", "1", ""))
            .count()
    };
    assert_eq!(matching(&after), matching(&before) + 1);
}

#[test]
fn add_then_find_by_name_roundtrips() {
    let store = ContactStore::initialize_in_memory().unwrap();
    store.add("Zed", "+1 (555) 0000", "zed@x.io").unwrap();

    let found = store.find_by_name("Zed").unwrap().unwrap();
    assert_eq!(
        found.to_draft(),
        ContactDraft::new("Zed", "+1 (555) 0000", "zed@x.io")
    );
}

#[test]
fn empty_required_fields_are_rejected_without_write() {
    let store = ContactStore::initialize_in_memory().unwrap();

    assert!(matches!(
        store.add("", "555", ""),
        Err(StoreError::Validation(_))
    ));
    assert!(matches!(
        store.add("Ann", "", "ann@x.com"),
        Err(StoreError::Validation(_))
    ));
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn whitespace_name_or_phone_is_accepted_as_text() {
    let store = ContactStore::initialize_in_memory().unwrap();

    store.add(" ", "555", "").unwrap();
    store.add("Bob", "  ", "").unwrap();

    assert_eq!(
        fields(&store.list(None).unwrap()),
        vec![(" ", "555", ""), ("Bob", "  ", "")]
    );
    assert!(store.find_by_name(" ").unwrap().is_some());
}

#[test]
fn missing_edit_and_delete_targets_are_not_found() {
    let store = ContactStore::initialize_in_memory().unwrap();

    let err = store.update("Nobody", "X", "1", "").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    assert!(!err.is_fatal());
    assert!(matches!(store.delete("Nobody"), Err(StoreError::NotFound(_))));
    assert!(matches!(
        store.delete_by_id(99),
        Err(StoreError::NotFound(_))
    ));
}

#[test]
fn id_operations_address_single_duplicate() {
    let store = ContactStore::initialize_in_memory().unwrap();
    let first = store.add("Sam", "1", "").unwrap();
    let second = store.add("Sam", "2", "").unwrap();

    store
        .update_by_id(first, &ContactDraft::new("Sam", "11", ""))
        .unwrap();
    store.delete_by_id(second).unwrap();

    let remaining = store.list(None).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, first);
    assert_eq!(remaining[0].phone, "11");
    assert_eq!(store.get(second).unwrap(), None);
}

#[test]
fn initialize_twice_on_same_file_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("phonebook.db");

    let mut store = ContactStore::initialize(&path).unwrap();
    store.add("Alice", "555-1000", "").unwrap();
    store.ensure_schema().unwrap();
    store.close().unwrap();

    let reopened = ContactStore::initialize(&path).unwrap();
    let again = ContactStore::initialize(&path).unwrap();
    assert_eq!(reopened.count().unwrap(), 1);
    assert_eq!(again.list(Some("Ali")).unwrap().len(), 1);
}

#[test]
fn writes_are_visible_to_a_second_connection_immediately() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("phonebook.db");

    let writer = ContactStore::initialize(&path).unwrap();
    let reader = ContactStore::initialize(&path).unwrap();

    writer.add("Dora", "42", "").unwrap();
    assert!(reader.find_by_name("Dora").unwrap().is_some());
}

#[test]
fn operations_after_close_fail_with_closed() {
    let mut store = ContactStore::initialize_in_memory().unwrap();
    store.close().unwrap();

    assert!(matches!(store.list(None), Err(StoreError::Closed)));
    assert!(matches!(store.add("A", "1", ""), Err(StoreError::Closed)));
    assert!(matches!(store.find_by_name("A"), Err(StoreError::Closed)));
    assert!(matches!(
        store.update("A", "B", "1", ""),
        Err(StoreError::Closed)
    ));
    assert!(matches!(store.delete("A"), Err(StoreError::Closed)));
}

#[test]
fn unopenable_path_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("phonebook.db");

    let err = ContactStore::initialize(&path).err().unwrap();
    assert!(matches!(err, StoreError::Io(_)));
    assert!(err.is_fatal());
}
