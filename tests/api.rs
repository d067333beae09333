use bson::oid::ObjectId;
use learnhub_backend::config::Config;
use learnhub_backend::seed;
use learnhub_backend::store::{MemoryStore, Storage};
use rocket::http::{ContentType, Header, Status};
use rocket::local::asynchronous::Client;
use serde_json::{json, Value};

fn memory_config() -> Config {
    Config {
        port: 8000,
        database_url: Some("memory://".to_string()),
        database_name: Some("learnhub".to_string()),
    }
}

async fn client_with(storage: Storage) -> Client {
    let rocket = learnhub_backend::build(rocket::Config::figment(), memory_config(), storage);
    Client::tracked(rocket).await.expect("valid rocket instance")
}

async fn seeded_client() -> Client {
    let storage = Storage::new(MemoryStore::new("learnhub"));
    seed::seed_demo(&storage).await;
    client_with(storage).await
}

async fn get_json(client: &Client, uri: &str) -> (Status, Value) {
    let response = client.get(uri.to_string()).dispatch().await;
    let status = response.status();
    (status, response.into_json().await.unwrap_or(Value::Null))
}

async fn post_json(client: &Client, uri: &str, body: Value) -> (Status, Value) {
    let response = client
        .post(uri.to_string())
        .header(ContentType::JSON)
        .body(body.to_string())
        .dispatch()
        .await;
    let status = response.status();
    (status, response.into_json().await.unwrap_or(Value::Null))
}

fn items(body: &Value) -> &Vec<Value> {
    body["items"].as_array().expect("items array")
}

fn names(body: &Value, key: &str) -> Vec<String> {
    items(body)
        .iter()
        .map(|it| it[key].as_str().unwrap_or_default().to_string())
        .collect()
}

async fn maria_id(client: &Client) -> String {
    let (_, body) = get_json(client, "/api/tutors?course=Information%20Technology").await;
    items(&body)[0]["id"].as_str().unwrap().to_string()
}

fn booking(tutor_id: &str) -> Value {
    json!({
        "data": {
            "tutor_id": tutor_id,
            "student_name": "X",
            "student_email": "x@y",
            "mode": "One-on-One",
            "session_datetime": "Mon 7pm",
            "duration_hours": 1.5,
        }
    })
}

#[rocket::async_test]
async fn identity_and_greeting() {
    let client = seeded_client().await;

    let response = client.get("/").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.into_string().await.unwrap(),
        r#"{"name":"LearnHub","message":"Backend running","university":"Pamantasan ng Lungsod ng Valenzuela"}"#
    );

    let (status, body) = get_json(&client, "/api/hello").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body, json!({ "message": "Hello from LearnHub backend!" }));
}

#[rocket::async_test]
async fn seed_fixtures_are_listed() {
    let client = seeded_client().await;

    let (status, body) = get_json(&client, "/api/materials").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(
        names(&body, "title"),
        vec!["Data Structures Reviewer", "Circuit Analysis Handout"]
    );

    let first = &items(&body)[0];
    assert_eq!(first["price"], 50);
    assert_eq!(first["rating"], 4.9);
    assert_eq!(first["downloads"], 120);
    assert_eq!(first["type"], "Reviewer");
    assert!(first["file_url"].is_null());
    assert!(first.get("_id").is_none());
    assert_eq!(first["id"].as_str().unwrap().len(), 24);

    let (_, body) = get_json(&client, "/api/tutors").await;
    assert_eq!(names(&body, "name"), vec!["Maria Santos", "Mark Reyes"]);
    assert_eq!(items(&body)[0]["modes"], json!(["One-on-One", "Group"]));
}

#[rocket::async_test]
async fn material_search_is_case_insensitive() {
    let client = seeded_client().await;

    let (_, body) = get_json(&client, "/api/materials?q=circuit").await;
    assert_eq!(names(&body, "title"), vec!["Circuit Analysis Handout"]);

    let (_, body) = get_json(&client, "/api/materials?q=THEVENIN").await;
    assert_eq!(names(&body, "title"), vec!["Circuit Analysis Handout"]);

    let (_, body) = get_json(&client, "/api/materials?q=nothing-like-this").await;
    assert!(items(&body).is_empty());
}

#[rocket::async_test]
async fn material_filters_use_equality() {
    let client = seeded_client().await;

    let (_, body) = get_json(&client, "/api/materials?course=Electrical%20Engineering").await;
    assert_eq!(names(&body, "title"), vec!["Circuit Analysis Handout"]);

    let (_, body) = get_json(&client, "/api/materials?subject=data%20structures").await;
    assert!(items(&body).is_empty());

    let (_, body) = get_json(&client, "/api/materials?course=&q=").await;
    assert_eq!(items(&body).len(), 2);
}

#[rocket::async_test]
async fn tutor_subject_search() {
    let client = seeded_client().await;

    let (_, body) = get_json(&client, "/api/tutors?subject=data").await;
    assert_eq!(names(&body, "name"), vec!["Maria Santos"]);

    let (_, body) = get_json(
        &client,
        "/api/tutors?course=Information%20Technology&subject=programming",
    )
    .await;
    assert_eq!(names(&body, "name"), vec!["Maria Santos"]);

    let (_, body) = get_json(&client, "/api/tutors?course=Civil%20Engineering&subject=data").await;
    assert!(items(&body).is_empty());
}

#[rocket::async_test]
async fn created_material_round_trips_with_defaults() {
    let client = seeded_client().await;

    let (status, created) = post_json(
        &client,
        "/api/materials",
        json!({
            "data": {
                "id": "ffffffffffffffffffffffff",
                "title": "Nursing Fundamentals Notes",
                "course": "Nursing",
                "subject": "Fundamentals",
                "type": "Class Notes",
                "author_name": "R. Garcia",
            }
        }),
    )
    .await;
    assert_eq!(status, Status::Ok);
    let id = created["id"].as_str().unwrap().to_string();
    assert_ne!(id, "ffffffffffffffffffffffff");
    assert!(ObjectId::parse_str(&id).is_ok());

    let (_, body) = get_json(&client, "/api/materials?course=Nursing").await;
    let listed = items(&body);
    assert_eq!(listed.len(), 1);

    let material = &listed[0];
    assert_eq!(material["id"], id.as_str());
    assert_eq!(material["title"], "Nursing Fundamentals Notes");
    assert_eq!(material["author_name"], "R. Garcia");
    assert_eq!(material["price"], 0.0);
    assert_eq!(material["rating"], 4.8);
    assert_eq!(material["downloads"], 0);
    assert_eq!(material["university"], "Pamantasan ng Lungsod ng Valenzuela");
    assert!(material["description"].is_null());
}

#[rocket::async_test]
async fn created_tutor_is_searchable() {
    let client = seeded_client().await;

    let (status, _) = post_json(
        &client,
        "/api/tutors",
        json!({
            "data": {
                "name": "Ana Cruz",
                "course": "Accountancy",
                "subjects": ["Financial Accounting"],
                "rate_per_hour": 180,
            }
        }),
    )
    .await;
    assert_eq!(status, Status::Ok);

    let (_, body) = get_json(&client, "/api/tutors?subject=ACCOUNTING").await;
    assert_eq!(names(&body, "name"), vec!["Ana Cruz"]);
    assert_eq!(items(&body)[0]["modes"], json!(["One-on-One"]));
    assert_eq!(items(&body)[0]["availability"], json!([]));
}

#[rocket::async_test]
async fn invalid_bodies_are_unprocessable() {
    let client = seeded_client().await;

    let (status, problem) = post_json(
        &client,
        "/api/materials",
        json!({
            "data": {
                "title": "T",
                "course": "Medicine",
                "subject": "S",
                "type": "Reviewer",
                "author_name": "A",
            }
        }),
    )
    .await;
    assert_eq!(status, Status::UnprocessableEntity);
    assert_eq!(problem["field"], "course");
    assert_eq!(problem["status"], 422);

    let (status, problem) = post_json(&client, "/api/tutors", json!({ "name": "Unwrapped" })).await;
    assert_eq!(status, Status::UnprocessableEntity);
    assert_eq!(problem["field"], "data");

    let (_, body) = get_json(&client, "/api/tutors").await;
    assert_eq!(items(&body).len(), 2);
}

#[rocket::async_test]
async fn malformed_json_is_unprocessable() {
    let client = seeded_client().await;

    for (uri, raw) in [
        ("/api/tutors", "{not json"),
        ("/api/materials", r#"{"data": {"title": "T""#),
        ("/api/bookings", ""),
    ] {
        let response = client
            .post(uri)
            .header(ContentType::JSON)
            .body(raw)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::UnprocessableEntity, "{uri}");
        assert_eq!(
            response.content_type(),
            Some(ContentType::new("application", "problem+json"))
        );

        let problem: Value = response.into_json().await.unwrap();
        assert_eq!(problem["status"], 422);
    }

    let (_, body) = get_json(&client, "/api/tutors").await;
    assert_eq!(items(&body).len(), 2);
}

#[rocket::async_test]
async fn booking_an_existing_tutor() {
    let client = seeded_client().await;
    let tutor_id = maria_id(&client).await;

    let (status, body) = post_json(&client, "/api/bookings", booking(&tutor_id)).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["status"], "pending");
    assert!(ObjectId::parse_str(body["id"].as_str().unwrap()).is_ok());
    assert_eq!(body.as_object().unwrap().len(), 2);
}

#[rocket::async_test]
async fn booking_rejects_malformed_tutor_id() {
    let client = seeded_client().await;

    let (status, problem) = post_json(&client, "/api/bookings", booking("abc")).await;
    assert_eq!(status, Status::BadRequest);
    assert_eq!(problem["tutor_id"], "abc");
}

#[rocket::async_test]
async fn booking_requires_existing_tutor() {
    let client = seeded_client().await;
    let unknown = ObjectId::new().to_hex();

    let (status, problem) = post_json(&client, "/api/bookings", booking(&unknown)).await;
    assert_eq!(status, Status::NotFound);
    assert_eq!(problem["tutor_id"], unknown.as_str());
}

#[rocket::async_test]
async fn booking_validation_precedes_lookup() {
    let client = seeded_client().await;
    let tutor_id = maria_id(&client).await;

    let mut body = booking(&tutor_id);
    body["data"]["group_size"] = json!(1);

    let (status, problem) = post_json(&client, "/api/bookings", body).await;
    assert_eq!(status, Status::UnprocessableEntity);
    assert_eq!(problem["field"], "group_size");
}

#[rocket::async_test]
async fn missing_store_answers_service_unavailable() {
    let client = client_with(Storage::unavailable()).await;

    let (status, _) = get_json(&client, "/api/materials").await;
    assert_eq!(status, Status::ServiceUnavailable);

    let (status, _) = post_json(&client, "/api/bookings", booking(&ObjectId::new().to_hex())).await;
    assert_eq!(status, Status::ServiceUnavailable);

    let (status, report) = get_json(&client, "/test").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(report["backend"], "✅ Running");
    assert_eq!(report["database"], "⚠️  Available but not initialized");
    assert_eq!(report["connection_status"], "Not Connected");
}

#[rocket::async_test]
async fn diagnostics_list_collections() {
    let client = seeded_client().await;

    let (status, report) = get_json(&client, "/test").await;
    assert_eq!(status, Status::Ok);
    assert_eq!(report["database"], "✅ Connected & Working");
    assert_eq!(report["collections"], json!(["material", "tutor"]));

    let url = report["database_url"].as_str().unwrap();
    assert!(url == "✅ Set" || url == "❌ Not Set");
}

#[rocket::async_test]
async fn cors_allows_any_origin_with_credentials() {
    let client = seeded_client().await;

    let response = client
        .get("/api/hello")
        .header(Header::new("Origin", "http://localhost:5173"))
        .dispatch()
        .await;

    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some("http://localhost:5173")
    );
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Credentials"),
        Some("true")
    );
}

#[rocket::async_test]
async fn unknown_paths_are_problems() {
    let client = seeded_client().await;

    let response = client.get("/api/nothing").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    assert_eq!(
        response.content_type(),
        Some(ContentType::new("application", "problem+json"))
    );
}
