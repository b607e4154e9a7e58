//! Property repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the get/create/update/delete/clear surface over `properties`.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `validate()` before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Concurrent writers are not detected; the last write wins.

use crate::db::DbError;
use crate::model::property::{
    Property, PropertyDraft, PropertyId, PropertyPatch, PropertyValidationError,
};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const PROPERTY_SELECT_SQL: &str = "SELECT id, name, lat, lng, price FROM properties";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for property persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(PropertyValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted property data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<PropertyValidationError> for RepoError {
    fn from(value: PropertyValidationError) -> Self {
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

/// Persistence contract for property records.
pub trait PropertyRepository {
    /// Returns every stored property in insertion order.
    fn get_all(&self) -> RepoResult<Vec<Property>>;
    /// Returns one property, or `None` when the id is unknown.
    fn get_by_id(&self, id: PropertyId) -> RepoResult<Option<Property>>;
    /// Stores a new property under a freshly assigned id.
    fn create(&self, draft: &PropertyDraft) -> RepoResult<Property>;
    /// Merges `patch` into an existing property. `None` when the id is unknown.
    fn update(&self, id: PropertyId, patch: &PropertyPatch) -> RepoResult<Option<Property>>;
    /// Removes a property. Returns whether a row was removed.
    fn delete(&self, id: PropertyId) -> RepoResult<bool>;
    /// Removes every property.
    fn clear(&self) -> RepoResult<()>;
}

/// SQLite-backed property repository.
pub struct SqlitePropertyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePropertyRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PropertyRepository for SqlitePropertyRepository<'_> {
    fn get_all(&self) -> RepoResult<Vec<Property>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROPERTY_SELECT_SQL} ORDER BY created_at ASC, rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut properties = Vec::new();

        while let Some(row) = rows.next()? {
            properties.push(parse_property_row(row)?);
        }

        Ok(properties)
    }

    fn get_by_id(&self, id: PropertyId) -> RepoResult<Option<Property>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROPERTY_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_property_row(row)?));
        }

        Ok(None)
    }

    fn create(&self, draft: &PropertyDraft) -> RepoResult<Property> {
        draft.validate()?;
        let property = Property::from_draft(draft.clone());

        self.conn.execute(
            "INSERT INTO properties (id, name, lat, lng, price)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                property.id.to_string(),
                property.name.as_str(),
                property.lat,
                property.lng,
                property.price,
            ],
        )?;

        Ok(property)
    }

    fn update(&self, id: PropertyId, patch: &PropertyPatch) -> RepoResult<Option<Property>> {
        let Some(mut property) = self.get_by_id(id)? else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(property));
        }
        property.apply_patch(patch);
        property.validate()?;

        let changed = self.conn.execute(
            "UPDATE properties
             SET
                name = ?1,
                lat = ?2,
                lng = ?3,
                price = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?5;",
            params![
                property.name.as_str(),
                property.lat,
                property.lng,
                property.price,
                id.to_string(),
            ],
        )?;

        // A concurrent delete between read and write loses the update.
        if changed == 0 {
            return Ok(None);
        }

        Ok(Some(property))
    }

    fn delete(&self, id: PropertyId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM properties WHERE id = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }

    fn clear(&self) -> RepoResult<()> {
        self.conn.execute("DELETE FROM properties;", [])?;
        Ok(())
    }
}

fn parse_property_row(row: &Row<'_>) -> RepoResult<Property> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid id value `{id_text}` in properties.id"))
    })?;

    let property = Property {
        id,
        name: row.get("name")?,
        lat: row.get("lat")?,
        lng: row.get("lng")?,
        price: row.get("price")?,
    };
    property.validate()?;
    Ok(property)
}
