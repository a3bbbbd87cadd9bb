//! Integration tests for the attendance endpoints
//!
//! - GET /api/events/{eventId}/attendees
//! - POST/PUT /api/events/{eventId}/attendance
//! - DELETE /api/events/{eventId}/attendance/{userId}
//!
//! Fixture attendance on event 1: alice and carol attending, bob pending.

mod common;

#[cfg(test)]
mod attendance_tests {
    use super::common::*;
    use axum::http::header::AUTHORIZATION;
    use serde_json::{Value, json};
    use sqlx::SqlitePool;

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "groups", "events")))]
    async fn test_list_attendees(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let anonymous: Value = server.get("/api/events/1/attendees").await.json();
        let attendees = anonymous["Attendees"].as_array().unwrap();
        assert_eq!(attendees.len(), 2);
        assert_eq!(
            attendees[0],
            json!({
                "id": 1,
                "firstName": "Alice",
                "lastName": "Organizer",
                "Attendance": { "status": "attending" }
            })
        );

        let organizer: Value = server
            .get("/api/events/1/attendees")
            .add_header(AUTHORIZATION, bearer(1))
            .await
            .json();
        assert_eq!(organizer["Attendees"].as_array().unwrap().len(), 3);

        server
            .get("/api/events/999/attendees")
            .await
            .assert_status_not_found();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "groups", "events")))]
    async fn test_request_attendance(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        // alice is a member of the chess club
        let response = server
            .post("/api/events/3/attendance")
            .add_header(AUTHORIZATION, bearer(1))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({ "userId": 1, "status": "pending" }));

        let again = server
            .post("/api/events/3/attendance")
            .add_header(AUTHORIZATION, bearer(1))
            .await;
        again.assert_status_bad_request();
        again.assert_json(&json!({ "message": "Attendance has already been requested" }));

        let attending = server
            .post("/api/events/1/attendance")
            .add_header(AUTHORIZATION, bearer(3))
            .await;
        attending.assert_status_bad_request();
        attending.assert_json(&json!({ "message": "User is already an attendee of the event" }));
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "groups", "events")))]
    async fn test_request_attendance_needs_membership(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        // dave's membership is still pending
        server
            .post("/api/events/1/attendance")
            .add_header(AUTHORIZATION, bearer(4))
            .await
            .assert_status_forbidden();

        server
            .post("/api/events/999/attendance")
            .add_header(AUTHORIZATION, bearer(4))
            .await
            .assert_status_not_found();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "groups", "events")))]
    async fn test_change_attendance(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .put("/api/events/1/attendance")
            .add_header(AUTHORIZATION, bearer(1))
            .json(&json!({ "userId": 2, "status": "attending" }))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({ "id": 3, "eventId": 1, "userId": 2, "status": "attending" }));

        let details: Value = server.get("/api/events/1").await.json();
        assert_eq!(details["numAttending"], 3);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "groups", "events")))]
    async fn test_change_attendance_user_id_forms(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .put("/api/events/1/attendance")
            .add_header(AUTHORIZATION, bearer(1))
            .json(&json!({ "userId": "2", "status": "waitlist" }))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({ "id": 3, "eventId": 1, "userId": 2, "status": "waitlist" }));

        let response = server
            .put("/api/events/1/attendance")
            .add_header(AUTHORIZATION, bearer(1))
            .json(&json!({ "userId": true, "status": "waitlist" }))
            .await;
        response.assert_status_bad_request();
        response.assert_json(&json!({
            "message": "Bad Request",
            "errors": { "userId": "User id is required" }
        }));
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "groups", "events")))]
    async fn test_change_attendance_errors(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .put("/api/events/1/attendance")
            .add_header(AUTHORIZATION, bearer(1))
            .json(&json!({ "userId": 2, "status": "pending" }))
            .await;
        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(
            body["errors"]["status"],
            "Cannot change an attendance status to pending"
        );

        let response = server
            .put("/api/events/1/attendance")
            .add_header(AUTHORIZATION, bearer(1))
            .json(&json!({ "userId": 4, "status": "attending" }))
            .await;
        response.assert_status_not_found();
        response.assert_json(&json!({
            "message": "Attendance between the user and the event does not exist"
        }));

        // plain members cannot approve attendance
        server
            .put("/api/events/1/attendance")
            .add_header(AUTHORIZATION, bearer(3))
            .json(&json!({ "userId": 2, "status": "attending" }))
            .await
            .assert_status_forbidden();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "groups", "events")))]
    async fn test_delete_attendance(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .delete("/api/events/1/attendance/1")
            .add_header(AUTHORIZATION, bearer(3))
            .await;
        response.assert_status_forbidden();
        response.assert_json(&json!({
            "message": "Only the User or organizer may delete an Attendance"
        }));

        let response = server
            .delete("/api/events/1/attendance/3")
            .add_header(AUTHORIZATION, bearer(3))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({ "message": "Successfully deleted attendance from event" }));

        let response = server
            .delete("/api/events/1/attendance/3")
            .add_header(AUTHORIZATION, bearer(1))
            .await;
        response.assert_status_not_found();
        response.assert_json(&json!({ "message": "Attendance does not exist for this User" }));
        Ok(())
    }
}
