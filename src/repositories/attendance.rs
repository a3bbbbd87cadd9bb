//! AttendanceRepository - attendances table

use super::{Create, Delete};
use crate::dtos::CreateAttendanceDTO;
use crate::entities::{Attendance, AttendanceStatus, EventAttendee};
use sqlx::{Error, SqlitePool};

pub struct AttendanceRepository {
    connection_pool: SqlitePool,
}

impl AttendanceRepository {
    pub fn new(connection_pool: SqlitePool) -> AttendanceRepository {
        Self { connection_pool }
    }

    pub async fn find(&self, event_id: i64, user_id: i64) -> Result<Option<Attendance>, Error> {
        sqlx::query_as::<_, Attendance>(
            "SELECT * FROM attendances WHERE event_id = ? AND user_id = ?",
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.connection_pool)
        .await
    }

    pub async fn list_attendees(
        &self,
        event_id: i64,
        include_pending: bool,
    ) -> Result<Vec<EventAttendee>, Error> {
        sqlx::query_as::<_, EventAttendee>(
            "SELECT u.id, u.first_name, u.last_name, a.status
             FROM attendances a
             JOIN users u ON u.id = a.user_id
             WHERE a.event_id = ? AND (? OR a.status != 'pending')
             ORDER BY a.id",
        )
        .bind(event_id)
        .bind(include_pending)
        .fetch_all(&self.connection_pool)
        .await
    }

    pub async fn update_status(
        &self,
        id: i64,
        status: AttendanceStatus,
    ) -> Result<Attendance, Error> {
        sqlx::query_as::<_, Attendance>(
            "UPDATE attendances SET status = ?, updated_at = CURRENT_TIMESTAMP
             WHERE id = ?
             RETURNING *",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?
        .ok_or(Error::RowNotFound)
    }
}

impl Create<Attendance, CreateAttendanceDTO> for AttendanceRepository {
    async fn create(&self, data: &CreateAttendanceDTO) -> Result<Attendance, Error> {
        sqlx::query_as::<_, Attendance>(
            "INSERT INTO attendances (event_id, user_id, status) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(data.event_id)
        .bind(data.user_id)
        .bind(data.status)
        .fetch_one(&self.connection_pool)
        .await
    }
}

impl Delete<i64> for AttendanceRepository {
    async fn delete(&self, id: &i64) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM attendances WHERE id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
