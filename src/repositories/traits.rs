//! Repository traits
//!
//! Generic CRUD seams shared by every table repository. Each repository
//! also exposes its own query methods for lookups that are not by primary key.

/// Inserts a new row and returns it as stored (id and timestamps filled in)
///
/// # Type Parameters
/// * `Entity` - Row type returned after the insert
/// * `CreateDTO` - Input without database-generated columns
pub trait Create<Entity, CreateDTO> {
    async fn create(&self, data: &CreateDTO) -> Result<Entity, sqlx::Error>;
}

/// Reads a single row by primary key
///
/// # Returns
/// * `Ok(None)` - No row with that id
pub trait Read<Entity, Id> {
    async fn read(&self, id: &Id) -> Result<Option<Entity>, sqlx::Error>;
}

/// Replaces the mutable columns of an existing row
///
/// # Returns
/// * `Err(sqlx::Error::RowNotFound)` - The row does not exist
pub trait Update<Entity, UpdateDTO, Id> {
    async fn update(&self, id: &Id, data: &UpdateDTO) -> Result<Entity, sqlx::Error>;
}

/// Deletes a row by primary key
///
/// # Returns
/// * `Ok(true)` - A row was deleted
/// * `Ok(false)` - Nothing matched the id
pub trait Delete<Id> {
    async fn delete(&self, id: &Id) -> Result<bool, sqlx::Error>;
}
