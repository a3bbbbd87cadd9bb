//! Integration tests for the membership endpoints
//!
//! - GET /api/groups/{groupId}/members
//! - POST/PUT /api/groups/{groupId}/membership
//! - DELETE /api/groups/{groupId}/membership/{memberId}

mod common;

#[cfg(test)]
mod membership_tests {
    use super::common::*;
    use axum::http::header::AUTHORIZATION;
    use serde_json::{Value, json};
    use sqlx::SqlitePool;

    fn member_names(body: &Value) -> Vec<String> {
        body["Members"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["firstName"].as_str().unwrap().to_string())
            .collect()
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "groups")))]
    async fn test_list_members_hides_pending(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let anonymous: Value = server.get("/api/groups/1/members").await.json();
        assert_eq!(member_names(&anonymous), vec!["Alice", "Bob", "Carol"]);
        assert_eq!(anonymous["Members"][1]["Membership"]["status"], "co-host");

        let member: Value = server
            .get("/api/groups/1/members")
            .add_header(AUTHORIZATION, bearer(3))
            .await
            .json();
        assert_eq!(member_names(&member).len(), 3);

        let cohost: Value = server
            .get("/api/groups/1/members")
            .add_header(AUTHORIZATION, bearer(2))
            .await
            .json();
        assert_eq!(member_names(&cohost), vec!["Alice", "Bob", "Carol", "Dave"]);
        assert_eq!(cohost["Members"][3]["Membership"]["status"], "pending");
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "groups")))]
    async fn test_request_membership(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .post("/api/groups/2/membership")
            .add_header(AUTHORIZATION, bearer(3))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "memberId": 3, "status": "pending" }));

        let again = server
            .post("/api/groups/2/membership")
            .add_header(AUTHORIZATION, bearer(3))
            .await;
        again.assert_status_bad_request();
        again.assert_json(&json!({ "message": "Membership has already been requested" }));
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "groups")))]
    async fn test_request_membership_existing_member(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .post("/api/groups/1/membership")
            .add_header(AUTHORIZATION, bearer(3))
            .await;
        response.assert_status_bad_request();
        response.assert_json(&json!({ "message": "User is already a member of the group" }));

        server
            .post("/api/groups/999/membership")
            .add_header(AUTHORIZATION, bearer(3))
            .await
            .assert_status_not_found();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "groups")))]
    async fn test_change_membership_to_member(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        // co-hosts may approve pending members
        let response = server
            .put("/api/groups/1/membership")
            .add_header(AUTHORIZATION, bearer(2))
            .json(&json!({ "memberId": 4, "status": "member" }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "id": 4, "groupId": 1, "memberId": 4, "status": "member" }));
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "groups")))]
    async fn test_change_membership_member_id_forms(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .put("/api/groups/1/membership")
            .add_header(AUTHORIZATION, bearer(1))
            .json(&json!({ "memberId": "4", "status": "member" }))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({ "id": 4, "groupId": 1, "memberId": 4, "status": "member" }));

        let response = server
            .put("/api/groups/1/membership")
            .add_header(AUTHORIZATION, bearer(1))
            .json(&json!({ "memberId": { "id": 3 }, "status": "member" }))
            .await;
        response.assert_status_bad_request();
        response.assert_json(&json!({
            "message": "Bad Request",
            "errors": { "memberId": "Member id is required" }
        }));

        let response = server
            .put("/api/groups/1/membership")
            .add_header(AUTHORIZATION, bearer(1))
            .await;
        response.assert_status_bad_request();
        response.assert_json(&json!({ "message": "Bad Request" }));
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "groups")))]
    async fn test_change_membership_to_cohost_needs_organizer(
        pool: SqlitePool,
    ) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));
        let promote = json!({ "memberId": 3, "status": "co-host" });

        server
            .put("/api/groups/1/membership")
            .add_header(AUTHORIZATION, bearer(2))
            .json(&promote)
            .await
            .assert_status_forbidden();

        let response = server
            .put("/api/groups/1/membership")
            .add_header(AUTHORIZATION, bearer(1))
            .json(&promote)
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "co-host");
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "groups")))]
    async fn test_change_membership_errors(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .put("/api/groups/1/membership")
            .add_header(AUTHORIZATION, bearer(1))
            .json(&json!({ "memberId": 3, "status": "pending" }))
            .await;
        response.assert_status_bad_request();
        response.assert_json(&json!({
            "message": "Bad Request",
            "errors": { "status": "Cannot change a membership status to pending" }
        }));

        let response = server
            .put("/api/groups/1/membership")
            .add_header(AUTHORIZATION, bearer(1))
            .json(&json!({ "memberId": 999, "status": "member" }))
            .await;
        response.assert_status_not_found();
        response.assert_json(&json!({ "message": "User couldn't be found" }));

        let response = server
            .put("/api/groups/1/membership")
            .add_header(AUTHORIZATION, bearer(1))
            .json(&json!({ "memberId": 5, "status": "member" }))
            .await;
        response.assert_status_not_found();
        response.assert_json(&json!({
            "message": "Membership between the user and the group does not exist"
        }));
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "groups")))]
    async fn test_delete_membership(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        // carol cannot remove bob
        let response = server
            .delete("/api/groups/1/membership/2")
            .add_header(AUTHORIZATION, bearer(3))
            .await;
        response.assert_status_forbidden();

        // carol leaves on her own
        let response = server
            .delete("/api/groups/1/membership/3")
            .add_header(AUTHORIZATION, bearer(3))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({ "message": "Successfully deleted membership from group" }));

        // the organizer removes dave's request
        server
            .delete("/api/groups/1/membership/4")
            .add_header(AUTHORIZATION, bearer(1))
            .await
            .assert_status_ok();

        let members: Value = server.get("/api/groups/1/members").await.json();
        assert_eq!(member_names(&members), vec!["Alice", "Bob"]);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users", "groups")))]
    async fn test_host_membership_cannot_be_removed(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server
            .delete("/api/groups/1/membership/1")
            .add_header(AUTHORIZATION, bearer(1))
            .await
            .assert_status_forbidden();

        let response = server
            .delete("/api/groups/1/membership/5")
            .add_header(AUTHORIZATION, bearer(1))
            .await;
        response.assert_status_not_found();
        response.assert_json(&json!({ "message": "Membership does not exist for this User" }));
        Ok(())
    }
}
