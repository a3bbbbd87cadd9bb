//! Image repositories - group_images and event_images tables

use super::{Create, Delete, Read};
use crate::dtos::{CreateEventImageDTO, CreateGroupImageDTO};
use crate::entities::{EventImage, GroupImage};
use sqlx::{Error, SqlitePool};

pub struct GroupImageRepository {
    connection_pool: SqlitePool,
}

impl GroupImageRepository {
    pub fn new(connection_pool: SqlitePool) -> GroupImageRepository {
        Self { connection_pool }
    }

    pub async fn list_by_group(&self, group_id: i64) -> Result<Vec<GroupImage>, Error> {
        sqlx::query_as::<_, GroupImage>("SELECT * FROM group_images WHERE group_id = ? ORDER BY id")
            .bind(group_id)
            .fetch_all(&self.connection_pool)
            .await
    }
}

impl Create<GroupImage, CreateGroupImageDTO> for GroupImageRepository {
    async fn create(&self, data: &CreateGroupImageDTO) -> Result<GroupImage, Error> {
        sqlx::query_as::<_, GroupImage>(
            "INSERT INTO group_images (group_id, url, preview) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(data.group_id)
        .bind(&data.url)
        .bind(data.preview)
        .fetch_one(&self.connection_pool)
        .await
    }
}

impl Read<GroupImage, i64> for GroupImageRepository {
    async fn read(&self, id: &i64) -> Result<Option<GroupImage>, Error> {
        sqlx::query_as::<_, GroupImage>("SELECT * FROM group_images WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl Delete<i64> for GroupImageRepository {
    async fn delete(&self, id: &i64) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM group_images WHERE id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

pub struct EventImageRepository {
    connection_pool: SqlitePool,
}

impl EventImageRepository {
    pub fn new(connection_pool: SqlitePool) -> EventImageRepository {
        Self { connection_pool }
    }

    pub async fn list_by_event(&self, event_id: i64) -> Result<Vec<EventImage>, Error> {
        sqlx::query_as::<_, EventImage>("SELECT * FROM event_images WHERE event_id = ? ORDER BY id")
            .bind(event_id)
            .fetch_all(&self.connection_pool)
            .await
    }
}

impl Create<EventImage, CreateEventImageDTO> for EventImageRepository {
    async fn create(&self, data: &CreateEventImageDTO) -> Result<EventImage, Error> {
        sqlx::query_as::<_, EventImage>(
            "INSERT INTO event_images (event_id, url, preview) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(data.event_id)
        .bind(&data.url)
        .bind(data.preview)
        .fetch_one(&self.connection_pool)
        .await
    }
}

impl Read<EventImage, i64> for EventImageRepository {
    async fn read(&self, id: &i64) -> Result<Option<EventImage>, Error> {
        sqlx::query_as::<_, EventImage>("SELECT * FROM event_images WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl Delete<i64> for EventImageRepository {
    async fn delete(&self, id: &i64) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM event_images WHERE id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
