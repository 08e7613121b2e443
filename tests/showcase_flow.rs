//! Public showcase assembly: published-only listing, location and contact
//! resolution, and template rendering on the detail page.
//! Run: cargo test --test showcase_flow

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use review_server::api::build_app;
use review_server::db::DbService;
use review_server::geo::{GeoPoint, GeocodeError, GeocodeRequest, Geocoder};
use review_server::{Config, ServerState};

struct ScriptedGeocoder {
    answer: Option<GeoPoint>,
}

#[async_trait::async_trait]
impl Geocoder for ScriptedGeocoder {
    async fn geocode(&self, _request: &GeocodeRequest) -> Result<Option<GeoPoint>, GeocodeError> {
        Ok(self.answer)
    }
}

const BAMBERG: GeoPoint = GeoPoint {
    latitude: 49.8988,
    longitude: 10.9028,
};

async fn test_app(answer: Option<GeoPoint>) -> (Router, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("reviews.db");
    let db = DbService::new(&db_path.to_string_lossy()).await.unwrap().db;

    let mut config = Config::with_overrides(tmp.path().to_string_lossy(), 0);
    config.geocoding_delay_ms = 0;

    let state = ServerState::new(config, db, Arc::new(ScriptedGeocoder { answer }));
    (build_app(state), tmp)
}

/// Request with admin identity headers
fn admin(method: &str, path: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(path)
        .header("x-auth-user-id", "u-1")
        .header("x-auth-user-name", "Petra")
        .header("x-auth-role", "admin");
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Anonymous request, as the public website sends them
fn public(path: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn review_payload(lastname: &str, city: &str, category: &str) -> Value {
    json!({
        "customer_salutation": "Familie",
        "customer_lastname": lastname,
        "city": city,
        "postal_code": "96047",
        "product_category": category,
        "installation_date": "2024-03-15",
        "text": "Saubere Montage und sehr gute Beratung.",
        "street": "Obere Königstraße 14",
        "rating": 5.0
    })
}

async fn create_review(app: &Router, lastname: &str, city: &str, category: &str) -> Value {
    let (status, body) = send(
        app,
        admin(
            "POST",
            "/api/reviews",
            Some(review_payload(lastname, city, category)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "seed review failed: {body}");
    body
}

async fn publish(app: &Router, id: &str) {
    let (status, body) = send(
        app,
        admin(
            "PUT",
            &format!("/api/reviews/{id}/publish"),
            Some(json!({ "is_published": true })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "publish failed: {body}");
}

#[tokio::test]
async fn test_public_list_serves_only_published_reviews() {
    let (app, _work_dir) = test_app(None).await;

    let published = create_review(&app, "Müller", "Bamberg", "Kaminofen").await;
    create_review(&app, "Schneider", "Forchheim", "Kaminofen").await;
    publish(&app, published["id"].as_str().unwrap()).await;

    // No identity headers on public routes
    let (status, list) = send(&app, public("/api/public/reviews")).await;
    assert_eq!(status, StatusCode::OK, "public list failed: {list}");
    let entries = list.as_array().unwrap();
    assert_eq!(entries.len(), 1, "unpublished reviews must stay hidden");
    assert_eq!(entries[0]["slug"], published["slug"]);

    // Summaries carry no street and no full text
    assert!(entries[0].get("street").is_none());
    assert!(entries[0].get("text").is_none());
}

#[tokio::test]
async fn test_public_list_filters_by_category() {
    let (app, _work_dir) = test_app(None).await;

    let kamin = create_review(&app, "Müller", "Bamberg", "Kaminofen").await;
    let pellet = create_review(&app, "Weber", "Bamberg", "Pelletofen").await;
    publish(&app, kamin["id"].as_str().unwrap()).await;
    publish(&app, pellet["id"].as_str().unwrap()).await;

    let (_, all) = send(&app, public("/api/public/reviews")).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, filtered) = send(&app, public("/api/public/reviews?category=Pelletofen")).await;
    let entries = filtered.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["slug"], pellet["slug"]);

    let (_, limited) = send(&app, public("/api/public/reviews?limit=1")).await;
    assert_eq!(limited.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_public_detail_assembles_location_contact_and_copy() {
    let (app, _work_dir) = test_app(Some(BAMBERG)).await;

    // Company-wide seed data
    send(
        &app,
        admin(
            "PUT",
            "/api/settings",
            Some(json!({ "company_name": "Ofenbau Franken", "region_label": "Oberfranken" })),
        ),
    )
    .await;
    send(
        &app,
        admin(
            "POST",
            "/api/categories",
            Some(json!({
                "name": "Kaminofen",
                "seo_description":
                    "Moderner {category} in {city} ({postal_code}), Region {region}. Bewertung: {rating} Sterne.",
                "faqs": [{
                    "question": "Wie lange dauerte der Einbau in {city}?",
                    "answer": "Der Einbau im {installation_month} {installation_year} war zügig."
                }]
            })),
        ),
    )
    .await;
    // The default sits in Coburg; Bamberg is closer to the review
    send(
        &app,
        admin(
            "POST",
            "/api/locations",
            Some(json!({
                "name": "Coburg Filiale",
                "street": "Marktplatz 2",
                "postal_code": "96450",
                "city": "Coburg",
                "latitude": 50.2612,
                "longitude": 10.9627,
                "is_default": true
            })),
        ),
    )
    .await;
    send(
        &app,
        admin(
            "POST",
            "/api/locations",
            Some(json!({
                "name": "Bamberg Zentrale",
                "street": "Hauptstraße 1",
                "postal_code": "96047",
                "city": "Bamberg",
                "latitude": 49.8988,
                "longitude": 10.9028
            })),
        ),
    )
    .await;
    send(
        &app,
        admin(
            "POST",
            "/api/field-staff",
            Some(json!({
                "name": "Jens Hartmann",
                "role_title": "Ofenbaumeister",
                "assigned_postal_codes": ["96"]
            })),
        ),
    )
    .await;

    let review = create_review(&app, "Müller", "Bamberg", "Kaminofen").await;
    let id = review["id"].as_str().unwrap();
    let slug = review["slug"].as_str().unwrap();

    let (status, _) = send(
        &app,
        admin("POST", &format!("/api/reviews/{id}/geocode"), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    publish(&app, id).await;

    let (status, detail) = send(&app, public(&format!("/api/public/reviews/{slug}"))).await;
    assert_eq!(status, StatusCode::OK, "detail failed: {detail}");

    assert_eq!(detail["location"]["name"], "Bamberg Zentrale", "nearest beats default");
    assert_eq!(detail["contact"]["name"], "Jens Hartmann");
    assert_eq!(
        detail["seo_description"],
        "Moderner Kaminofen in Bamberg (96047), Region Oberfranken. Bewertung: 5 Sterne."
    );
    assert_eq!(
        detail["faqs"][0]["question"],
        "Wie lange dauerte der Einbau in Bamberg?"
    );
    assert_eq!(
        detail["faqs"][0]["answer"],
        "Der Einbau im März 2024 war zügig."
    );

    // The customer street never leaves the admin API
    assert!(detail.get("street").is_none());
}

#[tokio::test]
async fn test_public_detail_falls_back_to_default_location() {
    let (app, _work_dir) = test_app(None).await;

    send(
        &app,
        admin(
            "POST",
            "/api/locations",
            Some(json!({
                "name": "Bamberg Zentrale",
                "street": "Hauptstraße 1",
                "postal_code": "96047",
                "city": "Bamberg",
                "latitude": 49.8988,
                "longitude": 10.9028
            })),
        ),
    )
    .await;
    send(
        &app,
        admin(
            "POST",
            "/api/locations",
            Some(json!({
                "name": "Coburg Filiale",
                "street": "Marktplatz 2",
                "postal_code": "96450",
                "city": "Coburg",
                "latitude": 50.2612,
                "longitude": 10.9627,
                "is_default": true
            })),
        ),
    )
    .await;

    // Never geocoded, so nearest-location matching is impossible
    let review = create_review(&app, "Schneider", "Forchheim", "Kaminofen").await;
    publish(&app, review["id"].as_str().unwrap()).await;

    let slug = review["slug"].as_str().unwrap();
    let (status, detail) = send(&app, public(&format!("/api/public/reviews/{slug}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["location"]["name"], "Coburg Filiale");
}

#[tokio::test]
async fn test_public_detail_hides_unpublished_reviews() {
    let (app, _work_dir) = test_app(None).await;

    let review = create_review(&app, "Müller", "Bamberg", "Kaminofen").await;
    let slug = review["slug"].as_str().unwrap();

    let (status, _) = send(&app, public(&format!("/api/public/reviews/{slug}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_public_detail_degrades_without_category_copy() {
    let (app, _work_dir) = test_app(None).await;

    // No "Pelletofen" category record exists
    let review = create_review(&app, "Weber", "Hof", "Pelletofen").await;
    publish(&app, review["id"].as_str().unwrap()).await;

    let slug = review["slug"].as_str().unwrap();
    let (status, detail) = send(&app, public(&format!("/api/public/reviews/{slug}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["seo_description"], "");
    assert_eq!(detail["faqs"].as_array().unwrap().len(), 0);
    assert!(detail.get("location").is_none(), "no locations seeded");
    assert!(detail.get("contact").is_none(), "no staff seeded");
}
