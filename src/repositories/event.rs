//! EventRepository - events table and the event listing query

use super::{Create, Delete, Read, Update};
use crate::dtos::{CreateEventDTO, EventDataDTO, EventFilter};
use crate::entities::{Event, EventSummary};
use sqlx::{Error, QueryBuilder, Sqlite, SqlitePool};

/// Event list columns joined with the owning group and optional venue
const SUMMARY_SELECT: &str = "
    SELECT e.id, e.group_id, e.venue_id, e.name, e.type, e.start_date, e.end_date,
        (SELECT COUNT(*) FROM attendances a
            WHERE a.event_id = e.id AND a.status = 'attending') AS num_attending,
        (SELECT ei.url FROM event_images ei
            WHERE ei.event_id = e.id AND ei.preview = 1
            ORDER BY ei.id LIMIT 1) AS preview_image,
        g.name AS group_name, g.city AS group_city, g.state AS group_state,
        v.city AS venue_city, v.state AS venue_state
    FROM events e
    JOIN groups g ON g.id = e.group_id
    LEFT JOIN venues v ON v.id = e.venue_id";

pub struct EventRepository {
    connection_pool: SqlitePool,
}

impl EventRepository {
    pub fn new(connection_pool: SqlitePool) -> EventRepository {
        Self { connection_pool }
    }

    /// One page of events matching the filter, soonest first
    pub async fn list_summaries(&self, filter: &EventFilter) -> Result<Vec<EventSummary>, Error> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(SUMMARY_SELECT);
        query.push(" WHERE 1 = 1");

        if let Some(name) = &filter.name {
            query
                .push(" AND e.name LIKE ")
                .push_bind(format!("%{}%", escape_like(name)))
                .push(" ESCAPE '\\'");
        }
        if let Some(kind) = filter.kind {
            query.push(" AND e.type = ").push_bind(kind);
        }
        if let Some(start_date) = filter.start_date {
            query.push(" AND e.start_date >= ").push_bind(start_date);
        }

        query
            .push(" ORDER BY e.start_date, e.id LIMIT ")
            .push_bind(filter.limit())
            .push(" OFFSET ")
            .push_bind(filter.offset());

        query
            .build_query_as::<EventSummary>()
            .fetch_all(&self.connection_pool)
            .await
    }

    pub async fn list_summaries_by_group(&self, group_id: i64) -> Result<Vec<EventSummary>, Error> {
        sqlx::query_as::<_, EventSummary>(&format!(
            "{SUMMARY_SELECT} WHERE e.group_id = ? ORDER BY e.start_date, e.id"
        ))
        .bind(group_id)
        .fetch_all(&self.connection_pool)
        .await
    }

    pub async fn count_attending(&self, event_id: i64) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM attendances WHERE event_id = ? AND status = 'attending'",
        )
        .bind(event_id)
        .fetch_one(&self.connection_pool)
        .await
    }
}

impl Create<Event, CreateEventDTO> for EventRepository {
    async fn create(&self, data: &CreateEventDTO) -> Result<Event, Error> {
        let event = &data.data;
        sqlx::query_as::<_, Event>(
            "INSERT INTO events
                (group_id, venue_id, name, description, type, capacity, price, start_date, end_date)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(data.group_id)
        .bind(event.venue_id)
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.kind)
        .bind(event.capacity)
        .bind(event.price)
        .bind(event.start_date)
        .bind(event.end_date)
        .fetch_one(&self.connection_pool)
        .await
    }
}

impl Read<Event, i64> for EventRepository {
    async fn read(&self, id: &i64) -> Result<Option<Event>, Error> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl Update<Event, EventDataDTO, i64> for EventRepository {
    async fn update(&self, id: &i64, data: &EventDataDTO) -> Result<Event, Error> {
        sqlx::query_as::<_, Event>(
            "UPDATE events
             SET venue_id = ?, name = ?, description = ?, type = ?, capacity = ?, price = ?,
                 start_date = ?, end_date = ?, updated_at = CURRENT_TIMESTAMP
             WHERE id = ?
             RETURNING *",
        )
        .bind(data.venue_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.kind)
        .bind(data.capacity)
        .bind(data.price)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?
        .ok_or(Error::RowNotFound)
    }
}

impl Delete<i64> for EventRepository {
    async fn delete(&self, id: &i64) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Makes `%`, `_` and `\` match themselves in a `LIKE ... ESCAPE '\'` pattern
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtos::EventsQuery;
    use crate::entities::MeetingType;

    fn filter(query: EventsQuery) -> EventFilter {
        query.into_filter().expect("valid query")
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "groups", "events")))]
    async fn test_list_summaries_joins_group_and_venue(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = EventRepository::new(pool);
        let events = repo.list_summaries(&filter(EventsQuery::default())).await?;

        assert_eq!(events.len(), 3);
        let first = &events[0];
        assert_eq!(first.name, "Tennis Group First Meet and Greet");
        assert_eq!(first.num_attending, 2);
        assert_eq!(first.group_name, "Evening Tennis on the Water");
        assert_eq!(first.venue_city.as_deref(), Some("New York"));
        assert!(events[1].venue_id.is_none());
        assert!(events[1].venue_city.is_none());
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "groups", "events")))]
    async fn test_list_summaries_filters_and_pages(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = EventRepository::new(pool);

        let online = repo
            .list_summaries(&filter(EventsQuery {
                kind: Some("online".into()),
                ..Default::default()
            }))
            .await?;
        assert_eq!(online.len(), 2);
        assert!(online.iter().all(|e| e.kind == MeetingType::Online));

        let named = repo
            .list_summaries(&filter(EventsQuery {
                name: Some("chess".into()),
                ..Default::default()
            }))
            .await?;
        assert_eq!(named.len(), 1);

        let late = repo
            .list_summaries(&filter(EventsQuery {
                start_date: Some("2030-11-20".into()),
                ..Default::default()
            }))
            .await?;
        assert_eq!(late.len(), 2);

        let second_page = repo
            .list_summaries(&filter(EventsQuery {
                page: Some("2".into()),
                size: Some("2".into()),
                ..Default::default()
            }))
            .await?;
        assert_eq!(second_page.len(), 1);
        assert_eq!(second_page[0].id, 3);
        Ok(())
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("chess"), "chess");
        assert_eq!(escape_like("100%_a\\b"), "100\\%\\_a\\\\b");
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "groups", "events")))]
    async fn test_name_filter_matches_wildcards_literally(pool: SqlitePool) -> sqlx::Result<()> {
        sqlx::query(
            "INSERT INTO events (id, group_id, venue_id, name, description, type, capacity, price, start_date, end_date) \
             VALUES (4, 2, NULL, '100% Blitz_Night', 'Another long night of three minute blitz games online.', 'Online', NULL, 0, '2030-12-08 19:00:00', '2030-12-08 23:00:00')",
        )
        .execute(&pool)
        .await?;
        let repo = EventRepository::new(pool);
        let by_name = |name: &str| {
            filter(EventsQuery {
                name: Some(name.into()),
                ..Default::default()
            })
        };

        let underscore = repo.list_summaries(&by_name("_")).await?;
        assert_eq!(underscore.len(), 1);
        assert_eq!(underscore[0].id, 4);

        let percent = repo.list_summaries(&by_name("0%")).await?;
        assert_eq!(percent.len(), 1);
        assert_eq!(percent[0].id, 4);

        assert!(repo.list_summaries(&by_name("Tennis_")).await?.is_empty());
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("users", "groups", "events")))]
    async fn test_deleting_venue_detaches_events(pool: SqlitePool) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM venues WHERE id = 1")
            .execute(&pool)
            .await?;
        let repo = EventRepository::new(pool);
        let event = repo.read(&1).await?.expect("event survives");
        assert!(event.venue_id.is_none());
        Ok(())
    }
}
