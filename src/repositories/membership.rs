//! MembershipRepository - memberships table

use super::{Create, Delete, Read};
use crate::dtos::CreateMembershipDTO;
use crate::entities::{GroupMember, Membership, MembershipStatus};
use sqlx::{Error, SqlitePool};

pub struct MembershipRepository {
    connection_pool: SqlitePool,
}

impl MembershipRepository {
    pub fn new(connection_pool: SqlitePool) -> MembershipRepository {
        Self { connection_pool }
    }

    /// Membership of `user_id` in `group_id`, whatever its status
    pub async fn find(&self, group_id: i64, user_id: i64) -> Result<Option<Membership>, Error> {
        sqlx::query_as::<_, Membership>(
            "SELECT * FROM memberships WHERE group_id = ? AND user_id = ?",
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_optional(&self.connection_pool)
        .await
    }

    /// Members of a group with their status; pending requests only when asked for
    pub async fn list_members(
        &self,
        group_id: i64,
        include_pending: bool,
    ) -> Result<Vec<GroupMember>, Error> {
        sqlx::query_as::<_, GroupMember>(
            "SELECT u.id, u.first_name, u.last_name, m.status
             FROM memberships m
             JOIN users u ON u.id = m.user_id
             WHERE m.group_id = ? AND (? OR m.status != 'pending')
             ORDER BY m.id",
        )
        .bind(group_id)
        .bind(include_pending)
        .fetch_all(&self.connection_pool)
        .await
    }

    pub async fn update_status(
        &self,
        id: i64,
        status: MembershipStatus,
    ) -> Result<Membership, Error> {
        sqlx::query_as::<_, Membership>(
            "UPDATE memberships SET status = ?, updated_at = CURRENT_TIMESTAMP
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

impl Create<Membership, CreateMembershipDTO> for MembershipRepository {
    async fn create(&self, data: &CreateMembershipDTO) -> Result<Membership, Error> {
        sqlx::query_as::<_, Membership>(
            "INSERT INTO memberships (user_id, group_id, status) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.group_id)
        .bind(data.status)
        .fetch_one(&self.connection_pool)
        .await
    }
}

impl Read<Membership, i64> for MembershipRepository {
    async fn read(&self, id: &i64) -> Result<Option<Membership>, Error> {
        sqlx::query_as::<_, Membership>("SELECT * FROM memberships WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl Delete<i64> for MembershipRepository {
    async fn delete(&self, id: &i64) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM memberships WHERE id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
