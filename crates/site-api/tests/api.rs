use axum::extract::Request;
use axum::ServiceExt;
use database::Database;
use reqwest::StatusCode;
use serde_json::{json, Value};
use site_api::AppState;

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod over a fresh, bootstrapped in-memory store.
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .expect("failed to open in-memory database");
        db.migrate().await.expect("failed to migrate");
        database::bootstrap::run(&db).await.expect("failed to bootstrap");

        let app = site_api::app(AppState::new(db));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
                .await
                .unwrap();
        });

        Self {
            base_url,
            client: reqwest::Client::new(),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let res = self.client.get(self.url(path)).send().await.unwrap();
        (res.status(), res.json().await.unwrap())
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let res = self.client.post(self.url(path)).json(&body).send().await.unwrap();
        (res.status(), res.json().await.unwrap())
    }

    async fn put(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let res = self.client.put(self.url(path)).json(&body).send().await.unwrap();
        (res.status(), res.json().await.unwrap())
    }

    async fn delete(&self, path: &str) -> (StatusCode, Value) {
        let res = self.client.delete(self.url(path)).send().await.unwrap();
        (res.status(), res.json().await.unwrap())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn service_body(title: &str, category: &str) -> Value {
    json!({
        "title": title,
        "description": format!("{title} description"),
        "icon": "fas fa-home",
        "category": category
    })
}

#[tokio::test]
async fn root_and_health_are_static() {
    let srv = TestServer::spawn().await;

    let (status, body) = srv.get("/api/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], "1.0.0");
    assert_eq!(body["status"], "active");

    let (status, body) = srv.get("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn bootstrapped_services_are_listed() {
    let srv = TestServer::spawn().await;

    let (status, body) = srv.get("/api/services").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total"], 6);
    assert_eq!(body["per_page"], 10);
    assert_eq!(body["total_pages"], 1);
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|s| s["id"].is_string() && s.get("_id").is_none()));

    let (_, body) = srv.get("/api/services?page=2&per_page=4").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["total_pages"], 2);

    let (_, body) = srv.get("/api/services?page=5&per_page=4").await;
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["total"], 6);
    assert_eq!(body["total_pages"], 2);

    let (_, body) = srv.get("/api/services/categories/list").await;
    assert_eq!(
        body["data"],
        json!(["construction", "design", "finishing", "technology"])
    );
}

#[tokio::test]
async fn out_of_range_paging_is_rejected() {
    let srv = TestServer::spawn().await;

    let (status, body) = srv.get("/api/services?per_page=51").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["detail"].as_str().unwrap().contains("per_page"));

    let (status, _) = srv.get("/api/services?page=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = srv.get("/api/contact/forms?per_page=100").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = srv.get("/api/projects/featured?limit=21").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn service_lifecycle_with_soft_delete() {
    let srv = TestServer::spawn().await;

    let (status, body) = srv.post("/api/services", service_body("Kitchens", "design")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Service created successfully");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = srv.get(&format!("/api/services/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Kitchens");

    let (status, body) = srv
        .put(&format!("/api/services/{id}"), service_body("Kitchens & Baths", "design"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("data").is_none());

    let (status, _) = srv.delete(&format!("/api/services/{id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = srv.get("/api/services").await;
    assert_eq!(body["total"], 6);

    let (_, body) = srv.get("/api/services?is_active=false").await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["title"], "Kitchens & Baths");
    assert_eq!(body["data"][0]["is_active"], false);

    let (status, body) = srv.get("/api/services/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Service not found");
}

#[tokio::test]
async fn malformed_body_is_a_validation_error() {
    let srv = TestServer::spawn().await;

    let (status, body) = srv.post("/api/services", json!({"title": "No fields"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn review_rating_bounds_and_featured_order() {
    let srv = TestServer::spawn().await;

    for rating in [0, 6] {
        let (status, _) = srv
            .post(
                "/api/reviews",
                json!({"name": "Bad", "rating": rating, "text": "..."}),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
    let (_, body) = srv.get("/api/reviews").await;
    assert_eq!(body["total"], 0);

    let reviews = [
        ("A", 5, "2025-05-04T00:00:00Z"),
        ("B", 4, "2025-05-03T00:00:00Z"),
        ("C", 5, "2025-05-02T00:00:00Z"),
        ("D", 3, "2025-05-01T00:00:00Z"),
    ];
    for (name, rating, date) in reviews {
        let (status, _) = srv
            .post(
                "/api/reviews",
                json!({"name": name, "rating": rating, "text": "Great", "date": date}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = srv.get("/api/reviews/featured?min_rating=4").await;
    let names: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["A", "C", "B"]);

    let (_, body) = srv.get("/api/reviews/stats").await;
    let distribution = body["data"]["rating_distribution"].as_object().unwrap();
    assert_eq!(distribution.len(), 5);
    assert_eq!(distribution["2"], 0);
    assert_eq!(distribution["5"], 2);
    assert_eq!(body["data"]["average_rating"], 4.3);
}

#[tokio::test]
async fn contact_form_status_and_hard_delete() {
    let srv = TestServer::spawn().await;

    let (status, body) = srv
        .post(
            "/api/contact/submit",
            json!({"name": "Khalid", "phone": "+966 50 123 4567", "service": "Interior Design"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = srv.get(&format!("/api/contact/forms/{id}")).await;
    assert_eq!(body["status"], "pending");

    let res = srv
        .client
        .put(srv.url(&format!("/api/contact/forms/{id}/status?status=archived")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body["detail"],
        "Invalid status. Must be one of: pending, contacted, completed"
    );

    let res = srv
        .client
        .put(srv.url(&format!("/api/contact/forms/{id}/status?status=completed")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let (_, body) = srv.get("/api/contact/forms?status=completed").await;
    assert_eq!(body["total"], 1);

    let (_, body) = srv.get("/api/contact/stats").await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["completed"], 1);

    let (status, _) = srv.delete(&format!("/api/contact/forms/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = srv.delete(&format!("/api/contact/forms/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Contact form not found");
}

#[tokio::test]
async fn company_partial_update() {
    let srv = TestServer::spawn().await;

    let (status, before) = srv.get("/api/company/info").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(before["rating"], 4.8);

    let (status, _) = srv
        .put("/api/company/info", json!({"phone": "+966 50 000 0000"}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, after) = srv.get("/api/company/info").await;
    let mut expected = before.clone();
    expected["phone"] = json!("+966 50 000 0000");
    assert_eq!(after, expected);

    let (status, body) = srv.put("/api/company/info", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "No data provided for update");
}

#[tokio::test]
async fn company_stats_read_and_update() {
    let srv = TestServer::spawn().await;

    let (status, body) = srv.get("/api/company/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["projects_completed"], 100);
    assert_eq!(body["data"]["team_members"], 25);

    let (status, body) = srv
        .put("/api/company/stats", json!({"team_members": 30}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["team_members"], 30);
    assert_eq!(body["data"]["happy_clients"], 150);
}

#[tokio::test]
async fn trailing_slash_collection_paths() {
    let srv = TestServer::spawn().await;

    let (status, body) = srv.get("/api/services/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 6);
    // Bootstrap services share one timestamp; the last inserted leads.
    assert_eq!(body["data"][0]["icon"], "fas fa-laptop");

    let (status, body) = srv.post("/api/services/", service_body("Slash", "design")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["id"].is_string());

    let (status, _) = srv
        .post(
            "/api/reviews/",
            json!({"name": "Sara", "rating": 5, "text": "Great"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = srv.get("/api/reviews/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);

    for path in ["/api/projects/", "/api/contact/forms/", "/api/"] {
        let (status, _) = srv.get(path).await;
        assert_eq!(status, StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn bad_path_and_unknown_route_use_error_envelope() {
    let srv = TestServer::spawn().await;

    let (status, body) = srv.get("/api/services/%FF").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["detail"].is_string());

    let (status, body) = srv.get("/api/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "detail": "Not found"}));

    let (status, body) = srv.delete("/api/reviews/missing/extra").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}
