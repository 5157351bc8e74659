use serde_json::{Value, json};
use tokio::net::TcpListener;

use flight_service::api::{AppState, build_router};
use flight_service::config::app::ServerConfig;
use flight_service::config::database::{create_connection, create_tables};

/// Start a test server backed by a fresh in-memory database, returning its base URL.
pub async fn start_test_server() -> String {
    start_test_server_with(&ServerConfig::default()).await
}

/// Same as [`start_test_server`], with custom listener settings (e.g. CORS origins).
pub async fn start_test_server_with(server: &ServerConfig) -> String {
    let db = create_connection("sqlite::memory:").await.unwrap();
    create_tables(&db).await.unwrap();

    let app = build_router(AppState::new(db), server);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}");

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    base_url
}

/// Request body for a valid flight on the given route and date.
pub fn flight_body(from: &str, to: &str, date: &str) -> Value {
    json!({
        "airlines": "Air India",
        "name": "AI4131",
        "from": from,
        "to": to,
        "date": date,
        "fare": 4000
    })
}

/// Create a flight through the API and return its id, taken from the `Location` header.
pub async fn create_flight_api(client: &reqwest::Client, base_url: &str, body: &Value) -> i64 {
    let resp = client
        .post(format!("{base_url}/flights/"))
        .json(body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 201);

    let location = resp
        .headers()
        .get(reqwest::header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    location
        .strip_prefix("/flights/")
        .unwrap()
        .parse()
        .unwrap()
}

/// Fetch all flights through the API.
pub async fn list_flights_api(client: &reqwest::Client, base_url: &str) -> Vec<Value> {
    let resp = client
        .get(format!("{base_url}/flights"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    resp.json().await.unwrap()
}
