//! VenueRepository - venues table

use super::{Create, Read, Update};
use crate::dtos::{CreateVenueDTO, VenueDataDTO};
use crate::entities::Venue;
use sqlx::{Error, SqlitePool};

pub struct VenueRepository {
    connection_pool: SqlitePool,
}

impl VenueRepository {
    pub fn new(connection_pool: SqlitePool) -> VenueRepository {
        Self { connection_pool }
    }

    pub async fn list_by_group(&self, group_id: i64) -> Result<Vec<Venue>, Error> {
        sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE group_id = ? ORDER BY id")
            .bind(group_id)
            .fetch_all(&self.connection_pool)
            .await
    }
}

impl Create<Venue, CreateVenueDTO> for VenueRepository {
    async fn create(&self, data: &CreateVenueDTO) -> Result<Venue, Error> {
        sqlx::query_as::<_, Venue>(
            "INSERT INTO venues (group_id, address, city, state, lat, lng)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(data.group_id)
        .bind(&data.data.address)
        .bind(&data.data.city)
        .bind(&data.data.state)
        .bind(data.data.lat)
        .bind(data.data.lng)
        .fetch_one(&self.connection_pool)
        .await
    }
}

impl Read<Venue, i64> for VenueRepository {
    async fn read(&self, id: &i64) -> Result<Option<Venue>, Error> {
        sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl Update<Venue, VenueDataDTO, i64> for VenueRepository {
    async fn update(&self, id: &i64, data: &VenueDataDTO) -> Result<Venue, Error> {
        sqlx::query_as::<_, Venue>(
            "UPDATE venues
             SET address = ?, city = ?, state = ?, lat = ?, lng = ?,
                 updated_at = CURRENT_TIMESTAMP
             WHERE id = ?
             RETURNING *",
        )
        .bind(&data.address)
        .bind(&data.city)
        .bind(&data.state)
        .bind(data.lat)
        .bind(data.lng)
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?
        .ok_or(Error::RowNotFound)
    }
}
