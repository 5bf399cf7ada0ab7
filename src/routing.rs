//! Application router configuration.

use axum::{
    Router,
    extract::State,
    response::IntoResponse,
    routing::{get, patch},
};

use crate::{
    AppState, Error,
    budget::{list_budgets_endpoint, save_budgets_endpoint},
    category::Category,
    db::{lock_connection, ping},
    endpoints,
    not_found::get_404_not_found,
    response::Envelope,
    summary::{budget_report_endpoint, dashboard_endpoint, monthly_expenses_endpoint},
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            patch(edit_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::BUDGETS,
            get(list_budgets_endpoint).post(save_budgets_endpoint),
        )
        .route(endpoints::BUDGET_REPORT, get(budget_report_endpoint))
        .route(endpoints::DASHBOARD, get(dashboard_endpoint))
        .route(endpoints::MONTHLY_EXPENSES, get(monthly_expenses_endpoint))
        .route(endpoints::CATEGORIES, get(get_categories))
        .route(endpoints::HEALTH, get(get_health))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The spending categories in display order.
async fn get_categories() -> Envelope<[Category; 10]> {
    Envelope::success(Category::ALL)
}

/// Check that the database answers queries.
async fn get_health(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let connection = lock_connection(&state.db_connection)?;
    ping(&connection)?;

    Ok(Envelope::empty())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        build_router,
        endpoints::{self, format_endpoint},
        test_utils::must_create_test_app_state,
    };

    fn get_test_server() -> TestServer {
        let app = build_router(must_create_test_app_state());

        TestServer::try_new(app).expect("Could not create test server.")
    }

    fn lunch() -> Value {
        json!({
            "description": "Lunch",
            "amount": 12.5,
            "date": "2025-01-05",
            "category": "Food"
        })
    }

    #[tokio::test]
    async fn create_then_list_transactions() {
        let server = get_test_server();

        let response = server.post(endpoints::TRANSACTIONS).json(&lunch()).await;

        response.assert_status_ok();
        let created = response.json::<Value>();
        assert_eq!(created["success"], true);
        assert_eq!(created["data"]["description"], "Lunch");
        assert_eq!(created["data"]["amount"], 12.5);
        assert_eq!(created["data"]["date"], "2025-01-05");
        assert_eq!(created["data"]["category"], "Food");
        assert!(created["data"]["id"].is_i64());

        let listed = server.get(endpoints::TRANSACTIONS).await.json::<Value>();
        assert_eq!(listed["data"].as_array().unwrap().len(), 1);
        assert_eq!(listed["data"][0], created["data"]);
    }

    #[tokio::test]
    async fn create_with_missing_field_persists_nothing() {
        let server = get_test_server();
        let mut body = lunch();
        body.as_object_mut().unwrap().remove("date");

        let response = server.post(endpoints::TRANSACTIONS).json(&body).await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["success"], false);
        let listed = server.get(endpoints::TRANSACTIONS).await.json::<Value>();
        assert_eq!(listed["data"], json!([]));
    }

    #[tokio::test]
    async fn malformed_json_is_json_bad_request() {
        let server = get_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .text("{not json")
            .content_type("application/json")
            .await;

        assert!(response.status_code().is_client_error());
        assert_eq!(response.json::<Value>()["success"], false);
    }

    #[tokio::test]
    async fn edit_and_delete_transaction() {
        let server = get_test_server();
        let created = server
            .post(endpoints::TRANSACTIONS)
            .json(&lunch())
            .await
            .json::<Value>();
        let id = created["data"]["id"].as_i64().unwrap();
        let path = format_endpoint(endpoints::TRANSACTION, id);

        let edited = server
            .patch(&path)
            .json(&json!({
                "description": "Dinner",
                "amount": 30,
                "date": "2025-01-06",
                "category": "Food"
            }))
            .await;
        edited.assert_status_ok();
        assert_eq!(edited.json::<Value>()["data"]["description"], "Dinner");

        let deleted = server.delete(&path).await;
        deleted.assert_status_ok();
        assert_eq!(deleted.json::<Value>()["message"], "Transaction deleted");

        server.delete(&path).await.assert_status_not_found();
    }

    #[tokio::test]
    async fn malformed_id_is_bad_request_and_unknown_id_is_not_found() {
        let server = get_test_server();

        server
            .delete("/api/transactions/not-an-id")
            .await
            .assert_status_bad_request();
        server
            .delete(&format_endpoint(endpoints::TRANSACTION, 999))
            .await
            .assert_status_not_found();
        server
            .patch(&format_endpoint(endpoints::TRANSACTION, 999))
            .json(&lunch())
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn edit_reports_malformed_id_before_missing_fields() {
        let server = get_test_server();

        let response = server
            .patch("/api/transactions/abc")
            .json(&json!({"description": "Dinner"}))
            .await;

        response.assert_status_bad_request();
        assert_eq!(
            response.json::<Value>()["message"],
            "\"abc\" is not a valid transaction ID"
        );
    }

    #[tokio::test]
    async fn saving_a_budget_twice_keeps_latest_amount() {
        let server = get_test_server();

        for amount in [100, 150] {
            server
                .post(endpoints::BUDGETS)
                .json(&json!([{"month": "2025-01", "category": "Food", "amount": amount}]))
                .await
                .assert_status_ok();
        }

        let budgets = server
            .get(endpoints::BUDGETS)
            .add_query_param("month", "2025-01")
            .await
            .json::<Value>();
        assert_eq!(budgets["data"].as_array().unwrap().len(), 1);
        assert_eq!(budgets["data"][0]["amount"], 150.0);
    }

    #[tokio::test]
    async fn invalid_budget_batch_writes_nothing() {
        let server = get_test_server();

        server
            .post(endpoints::BUDGETS)
            .json(&json!([
                {"month": "2025-01", "category": "Food", "amount": 100},
                {"month": "2025-01", "category": "Groceries", "amount": 50},
            ]))
            .await
            .assert_status_bad_request();

        let budgets = server
            .get(endpoints::BUDGETS)
            .add_query_param("month", "2025-01")
            .await
            .json::<Value>();
        assert_eq!(budgets["data"], json!([]));
    }

    #[tokio::test]
    async fn budget_report_scenario() {
        let server = get_test_server();
        for (description, amount, category) in [
            ("Groceries", 150, "Food"),
            ("Bus pass", 30, "Transportation"),
        ] {
            server
                .post(endpoints::TRANSACTIONS)
                .json(&json!({
                    "description": description,
                    "amount": amount,
                    "date": "2025-01-10",
                    "category": category
                }))
                .await
                .assert_status_ok();
        }
        server
            .post(endpoints::BUDGETS)
            .json(&json!([{"month": "2025-01", "category": "Food", "amount": 120}]))
            .await
            .assert_status_ok();

        let response = server
            .get(endpoints::BUDGET_REPORT)
            .add_query_param("month", "2025-01")
            .await;

        response.assert_status_ok();
        let report = &response.json::<Value>()["data"];
        assert_eq!(
            report["comparison"],
            json!([
                {"category": "Food", "budget": 120.0, "spent": 150.0, "difference": -30.0},
                {"category": "Transportation", "budget": null, "spent": 30.0, "difference": -30.0},
            ])
        );
        assert_eq!(
            report["insights"],
            json!([{
                "category": "Food",
                "kind": "exceeded",
                "message": "Exceeded Food budget by 30.00."
            }])
        );
    }

    #[tokio::test]
    async fn monthly_series_is_in_calendar_order() {
        let server = get_test_server();
        for date in ["2025-03-01", "2025-01-01", "2024-01-20"] {
            server
                .post(endpoints::TRANSACTIONS)
                .json(&json!({
                    "description": "Rent",
                    "amount": 10,
                    "date": date,
                    "category": "Housing"
                }))
                .await
                .assert_status_ok();
        }

        let series = server
            .get(endpoints::MONTHLY_EXPENSES)
            .await
            .json::<Value>();

        assert_eq!(series["data"].as_array().unwrap().len(), 2);
        assert_eq!(series["data"][0]["label"], "Jan");
        assert_eq!(series["data"][0]["total"], 20.0);
        assert_eq!(series["data"][1]["label"], "Mar");
    }

    #[tokio::test]
    async fn dashboard_requires_period() {
        let server = get_test_server();

        server
            .get(endpoints::DASHBOARD)
            .await
            .assert_status_bad_request();
        server
            .get(endpoints::DASHBOARD)
            .add_query_param("period", "2025-01")
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn categories_are_listed_in_order() {
        let server = get_test_server();

        let response = server.get(endpoints::CATEGORIES).await;

        response.assert_status_ok();
        let categories = response.json::<Value>();
        assert_eq!(categories["data"].as_array().unwrap().len(), 10);
        assert_eq!(categories["data"][0], "Food");
        assert_eq!(categories["data"][9], "Other");
    }

    #[tokio::test]
    async fn health_check_succeeds() {
        let server = get_test_server();

        let response = server.get(endpoints::HEALTH).await;

        response.assert_status_ok();
        response.assert_json(&json!({"success": true}));
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let server = get_test_server();

        let response = server.get("/api/nope").await;

        response.assert_status_not_found();
        response.assert_json(&json!({"success": false, "message": "Not found"}));
    }
}
