//! GroupRepository - groups table and the group listing aggregates

use super::{Create, Delete, Read, Update};
use crate::dtos::{CreateGroupDTO, GroupDataDTO};
use crate::entities::{Group, GroupSummary, MembershipStatus};
use sqlx::{Error, SqlitePool};

/// Group columns plus member count and first preview image
const SUMMARY_SELECT: &str = "
    SELECT g.*,
        (SELECT COUNT(*) FROM memberships m
            WHERE m.group_id = g.id AND m.status != 'pending') AS num_members,
        (SELECT gi.url FROM group_images gi
            WHERE gi.group_id = g.id AND gi.preview = 1
            ORDER BY gi.id LIMIT 1) AS preview_image
    FROM groups g";

pub struct GroupRepository {
    connection_pool: SqlitePool,
}

impl GroupRepository {
    pub fn new(connection_pool: SqlitePool) -> GroupRepository {
        Self { connection_pool }
    }

    pub async fn list_summaries(&self) -> Result<Vec<GroupSummary>, Error> {
        sqlx::query_as::<_, GroupSummary>(&format!("{SUMMARY_SELECT} ORDER BY g.id"))
            .fetch_all(&self.connection_pool)
            .await
    }

    /// Groups the user organizes or belongs to with a non-pending membership
    pub async fn list_summaries_for_user(&self, user_id: i64) -> Result<Vec<GroupSummary>, Error> {
        sqlx::query_as::<_, GroupSummary>(&format!(
            "{SUMMARY_SELECT}
             WHERE g.organizer_id = ?1
                OR EXISTS (SELECT 1 FROM memberships m
                           WHERE m.group_id = g.id AND m.user_id = ?1 AND m.status != 'pending')
             ORDER BY g.id"
        ))
        .bind(user_id)
        .fetch_all(&self.connection_pool)
        .await
    }

    pub async fn count_members(&self, group_id: i64) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM memberships WHERE group_id = ? AND status != 'pending'",
        )
        .bind(group_id)
        .fetch_one(&self.connection_pool)
        .await
    }
}

impl Create<Group, CreateGroupDTO> for GroupRepository {
    /// Inserts the group and the organizer's host membership in one transaction
    async fn create(&self, data: &CreateGroupDTO) -> Result<Group, Error> {
        let mut tx = self.connection_pool.begin().await?;

        let group = sqlx::query_as::<_, Group>(
            "INSERT INTO groups (organizer_id, name, about, type, private, city, state)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(data.organizer_id)
        .bind(&data.data.name)
        .bind(&data.data.about)
        .bind(data.data.kind)
        .bind(data.data.private)
        .bind(&data.data.city)
        .bind(&data.data.state)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO memberships (user_id, group_id, status) VALUES (?, ?, ?)")
            .bind(data.organizer_id)
            .bind(group.id)
            .bind(MembershipStatus::Host)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(group)
    }
}

impl Read<Group, i64> for GroupRepository {
    async fn read(&self, id: &i64) -> Result<Option<Group>, Error> {
        sqlx::query_as::<_, Group>("SELECT * FROM groups WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl Update<Group, GroupDataDTO, i64> for GroupRepository {
    async fn update(&self, id: &i64, data: &GroupDataDTO) -> Result<Group, Error> {
        sqlx::query_as::<_, Group>(
            "UPDATE groups
             SET name = ?, about = ?, type = ?, private = ?, city = ?, state = ?,
                 updated_at = CURRENT_TIMESTAMP
             WHERE id = ?
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.about)
        .bind(data.kind)
        .bind(data.private)
        .bind(&data.city)
        .bind(&data.state)
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?
        .ok_or(Error::RowNotFound)
    }
}

impl Delete<i64> for GroupRepository {
    async fn delete(&self, id: &i64) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM groups WHERE id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::MeetingType;

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "groups")))]
    async fn test_summaries_count_non_pending_members(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = GroupRepository::new(pool);
        let groups = repo.list_summaries().await?;

        assert_eq!(groups.len(), 2);
        // host, co-host and member; dave is still pending
        assert_eq!(groups[0].num_members, 3);
        assert_eq!(
            groups[0].preview_image.as_deref(),
            Some("https://images.example.com/tennis-preview.png")
        );
        assert_eq!(groups[1].num_members, 2);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "groups")))]
    async fn test_current_user_groups_skip_pending(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = GroupRepository::new(pool);

        let alice: Vec<i64> = repo
            .list_summaries_for_user(1)
            .await?
            .iter()
            .map(|g| g.group.id)
            .collect();
        assert_eq!(alice, vec![1, 2]);
        assert!(repo.list_summaries_for_user(4).await?.is_empty());
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users")))]
    async fn test_create_adds_host_membership(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = GroupRepository::new(pool.clone());
        let group = repo
            .create(&CreateGroupDTO {
                organizer_id: 3,
                data: GroupDataDTO {
                    name: "Morning Runners".into(),
                    about: "Easy paced runs along the river every weekday.".into(),
                    kind: MeetingType::InPerson,
                    private: false,
                    city: "Chicago".into(),
                    state: "IL".into(),
                },
            })
            .await?;

        let status: String =
            sqlx::query_scalar("SELECT status FROM memberships WHERE group_id = ? AND user_id = 3")
                .bind(group.id)
                .fetch_one(&pool)
                .await?;
        assert_eq!(status, "host");
        assert_eq!(repo.count_members(group.id).await?, 1);
        Ok(())
    }
}
