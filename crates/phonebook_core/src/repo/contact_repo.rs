//! Contact repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and substring search over the `contacts` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `ContactDraft::validate()` before SQL mutations.
//! - Read paths reject rows with an empty name or phone instead of masking
//!   them.
//! - Listing order is primary-key order.
//! - Name-keyed update/delete touch every row carrying that exact name.

use crate::db::DbError;
use crate::model::contact::{Contact, ContactDraft, ContactId, ContactValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    name,
    phone,
    email
FROM contacts";

pub type RepoResult<T> = Result<T, RepoError>;

/// How a write addressed the contact(s) it expected to find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactRef {
    Id(ContactId),
    Name(String),
}

impl Display for ContactRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id={id}"),
            Self::Name(_) => write!(f, "name=<redacted>"),
        }
    }
}

/// Repository error for contact persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ContactValidationError),
    Db(DbError),
    NotFound(ContactRef),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(target) => write!(f, "contact not found: {target}"),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for contact CRUD operations.
pub trait ContactRepository {
    /// Lists all contacts, or those containing `filter` in name, phone or
    /// email. An empty filter matches everything.
    fn list_contacts(&self, filter: Option<&str>) -> RepoResult<Vec<Contact>>;
    /// Returns the lowest-id contact whose name equals `name` exactly.
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Contact>>;
    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>>;
    fn create_contact(&self, draft: &ContactDraft) -> RepoResult<ContactId>;
    /// Overwrites every row named `old_name`; returns the number changed.
    fn update_by_name(&self, old_name: &str, draft: &ContactDraft) -> RepoResult<usize>;
    fn update_contact(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<()>;
    /// Deletes every row named `name`; returns the number removed.
    fn delete_by_name(&self, name: &str) -> RepoResult<usize>;
    fn delete_contact(&self, id: ContactId) -> RepoResult<()>;
    fn count_contacts(&self) -> RepoResult<usize>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn list_contacts(&self, filter: Option<&str>) -> RepoResult<Vec<Contact>> {
        let filter = filter.filter(|text| !text.is_empty());

        // instr() keeps the match case-sensitive and treats `%`/`_` literally,
        // unlike LIKE.
        let mut stmt = match filter {
            Some(_) => self.conn.prepare_cached(&format!(
                "{CONTACT_SELECT_SQL}
                 WHERE instr(name, ?1) > 0
                    OR instr(phone, ?1) > 0
                    OR instr(COALESCE(email, ''), ?1) > 0
                 ORDER BY id ASC;"
            ))?,
            None => self
                .conn
                .prepare_cached(&format!("{CONTACT_SELECT_SQL} ORDER BY id ASC;"))?,
        };

        let mut rows = match filter {
            Some(text) => stmt.query([text])?,
            None => stmt.query([])?,
        };

        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }

        Ok(contacts)
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<Contact>> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "{CONTACT_SELECT_SQL}
             WHERE name = ?1
             ORDER BY id ASC
             LIMIT 1;"
        ))?;

        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_contact_row(row)?));
        }

        Ok(None)
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_contact_row(row)?));
        }

        Ok(None)
    }

    fn create_contact(&self, draft: &ContactDraft) -> RepoResult<ContactId> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO contacts (name, phone, email) VALUES (?1, ?2, ?3);",
            params![draft.name, draft.phone, draft.email],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_by_name(&self, old_name: &str, draft: &ContactDraft) -> RepoResult<usize> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE contacts
             SET
                name = ?1,
                phone = ?2,
                email = ?3
             WHERE name = ?4;",
            params![draft.name, draft.phone, draft.email, old_name],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(ContactRef::Name(old_name.to_string())));
        }

        Ok(changed)
    }

    fn update_contact(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<()> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE contacts
             SET
                name = ?1,
                phone = ?2,
                email = ?3
             WHERE id = ?4;",
            params![draft.name, draft.phone, draft.email, id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(ContactRef::Id(id)));
        }

        Ok(())
    }

    fn delete_by_name(&self, name: &str) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE name = ?1;", [name])?;

        if changed == 0 {
            return Err(RepoError::NotFound(ContactRef::Name(name.to_string())));
        }

        Ok(changed)
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(ContactRef::Id(id)));
        }

        Ok(())
    }

    fn count_contacts(&self) -> RepoResult<usize> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM contacts;", [], |row| {
                row.get::<_, i64>(0)
            })?;

        usize::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("invalid contact count `{count}`")))
    }
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    let id: ContactId = row.get("id")?;
    let name: String = row.get("name")?;
    if name.is_empty() {
        return Err(RepoError::InvalidData(format!(
            "empty contacts.name for id {id}"
        )));
    }

    let phone: String = row.get("phone")?;
    if phone.is_empty() {
        return Err(RepoError::InvalidData(format!(
            "empty contacts.phone for id {id}"
        )));
    }

    Ok(Contact {
        id,
        name,
        phone,
        email: row.get::<_, Option<String>>("email")?.unwrap_or_default(),
    })
}
