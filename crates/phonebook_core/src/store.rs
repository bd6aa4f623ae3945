//! Contact Store: lifecycle owner of the phone book connection.
//!
//! # Responsibility
//! - Open (or create) the backing SQLite file and ensure the schema.
//! - Expose the list/search/add/edit/delete operations used by the shell.
//! - Release the connection on `close()` or drop.
//!
//! # Invariants
//! - Exactly one connection per store; no process-wide globals.
//! - Every mutation is committed before the call returns (auto-commit).
//! - After `close()` every operation fails with `StoreError::Closed`.

use crate::db::{migrations, open_db, open_db_in_memory, DbError};
use crate::model::contact::{Contact, ContactDraft, ContactId, ContactValidationError};
use crate::repo::contact_repo::{ContactRef, RepoError, SqliteContactRepository};
use crate::service::contact_service::ContactService;
use log::{info, warn};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error surfaced by `ContactStore` operations.
#[derive(Debug)]
pub enum StoreError {
    /// A required field (name or phone) was empty; nothing was written.
    Validation(ContactValidationError),
    /// The edit/delete target no longer exists.
    NotFound(ContactRef),
    /// The backing file could not be opened, migrated, read or written.
    Io(DbError),
    /// A persisted row violates the contact invariants.
    InvalidData(String),
    /// The store was used after `close()`.
    Closed,
}

impl StoreError {
    /// Returns whether the shell cannot meaningfully continue after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Closed)
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(target) => write!(f, "contact not found: {target}"),
            Self::Io(err) => write!(f, "phone book storage error: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
            Self::Closed => write!(f, "phone book store is closed"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) | Self::Closed => None,
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::Db(err) => Self::Io(err),
            RepoError::NotFound(target) => Self::NotFound(target),
            RepoError::InvalidData(message) => Self::InvalidData(message),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Io(DbError::Sqlite(value))
    }
}

/// Durable contact table bound to one SQLite connection.
pub struct ContactStore {
    conn: Option<Connection>,
}

impl ContactStore {
    /// Opens (creating if absent) the phone book file at `path` and ensures
    /// the schema. Safe to call on every startup.
    pub fn initialize(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = open_db(path)?;
        info!("event=store_init module=store status=ok mode=file");
        Ok(Self { conn: Some(conn) })
    }

    /// Opens a store over a fresh in-memory database.
    pub fn initialize_in_memory() -> StoreResult<Self> {
        let conn = open_db_in_memory()?;
        info!("event=store_init module=store status=ok mode=memory");
        Ok(Self { conn: Some(conn) })
    }

    /// Re-applies pending migrations on the live connection.
    ///
    /// A no-op when the schema is already current; existing rows are kept.
    pub fn ensure_schema(&mut self) -> StoreResult<()> {
        let conn = self.conn.as_mut().ok_or(StoreError::Closed)?;
        migrations::apply_migrations(conn)?;
        Ok(())
    }

    /// Returns whether the backing connection is still held.
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Lists all contacts, or those whose name, phone or email contains
    /// `filter_text` (case-sensitive).
    pub fn list(&self, filter_text: Option<&str>) -> StoreResult<Vec<Contact>> {
        Ok(self.service()?.list(filter_text)?)
    }

    /// Adds a contact. Fails with `StoreError::Validation` when `name` or
    /// `phone` is empty, without writing.
    pub fn add(&self, name: &str, phone: &str, email: &str) -> StoreResult<ContactId> {
        Ok(self.service()?.add(&ContactDraft::new(name, phone, email))?)
    }

    /// Returns the first contact whose name equals `name` exactly.
    pub fn find_by_name(&self, name: &str) -> StoreResult<Option<Contact>> {
        Ok(self.service()?.find_by_name(name)?)
    }

    pub fn get(&self, id: ContactId) -> StoreResult<Option<Contact>> {
        Ok(self.service()?.get(id)?)
    }

    /// Overwrites name, phone and email of every contact named `old_name`.
    ///
    /// Names are not unique: all matching rows receive the same values.
    /// Returns the number of rows changed.
    pub fn update(
        &self,
        old_name: &str,
        new_name: &str,
        new_phone: &str,
        new_email: &str,
    ) -> StoreResult<usize> {
        let draft = ContactDraft::new(new_name, new_phone, new_email);
        Ok(self.service()?.update_by_name(old_name, &draft)?)
    }

    /// Overwrites exactly the contact with the given id.
    pub fn update_by_id(&self, id: ContactId, draft: &ContactDraft) -> StoreResult<()> {
        Ok(self.service()?.update_by_id(id, draft)?)
    }

    /// Removes every contact named `name`; returns the number removed.
    pub fn delete(&self, name: &str) -> StoreResult<usize> {
        Ok(self.service()?.delete_by_name(name)?)
    }

    pub fn delete_by_id(&self, id: ContactId) -> StoreResult<()> {
        Ok(self.service()?.delete_by_id(id)?)
    }

    pub fn count(&self) -> StoreResult<usize> {
        Ok(self.service()?.count()?)
    }

    /// Releases the backing connection. Calling it again is a no-op.
    pub fn close(&mut self) -> StoreResult<()> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };

        match conn.close() {
            Ok(()) => {
                info!("event=store_close module=store status=ok");
                Ok(())
            }
            // The handle is dropped either way; dropping it retries the close.
            Err((_conn, err)) => {
                warn!("event=store_close module=store status=error error={err}");
                Err(err.into())
            }
        }
    }

    fn service(&self) -> StoreResult<ContactService<SqliteContactRepository<'_>>> {
        let conn = self.conn.as_ref().ok_or(StoreError::Closed)?;
        Ok(ContactService::new(SqliteContactRepository::new(conn)))
    }
}
