use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use web_server::{AppState, app};

fn router() -> Router {
    let config = configuration::config_from_toml(
        r#"
        [defaults.okuns-law]
        beta = 0.5
        natural_growth = 2.2
        initial_unemployment = 9.5
        "#,
    )
    .unwrap();
    app(Arc::new(AppState::new(config)))
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = router().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_check() {
    let (status, body) = send(get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));
}

#[tokio::test]
async fn lists_every_concept() {
    let (status, body) = send(get("/api/concepts")).await;
    assert_eq!(status, StatusCode::OK);
    let concepts = body.as_array().unwrap();
    assert_eq!(concepts.len(), 22);
    assert!(concepts.iter().any(|c| c["name"] == "rule-of-70" && c["required_values"] == json!(["growth_rate"])));
}

#[tokio::test]
async fn evaluates_the_deflator() {
    let (status, body) = send(post_json(
        "/api/evaluate",
        json!({ "concept": "deflator", "input": { "values": { "nominal": 150, "real": 100 } } }),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["concept"], "deflator");
    assert_eq!(body["outputs"]["deflator"].as_f64(), Some(1.5));
    assert_eq!(body["outputs"]["deflator_index"].as_f64(), Some(150.0));
}

#[tokio::test]
async fn configured_defaults_fill_only_missing_inputs() {
    let request = json!({
        "concept": "okuns-law",
        "input": { "values": { "growth": 4.2 } },
        "apply_defaults": true
    });
    let (status, body) = send(post_json("/api/evaluate", request)).await;
    assert_eq!(status, StatusCode::OK);
    // -0.5 x (4.2 - 2.2) = -1 from 9.5
    assert_eq!(body["outputs"]["unemployment_change"].as_f64(), Some(-1.0));
    assert_eq!(body["outputs"]["new_unemployment"].as_f64(), Some(8.5));
    assert_eq!(body["classification"], "falling");
}

#[tokio::test]
async fn defaults_are_not_applied_unless_asked() {
    let request = json!({ "concept": "okuns-law", "input": { "values": { "growth": 4 } } });
    let (status, body) = send(post_json("/api/evaluate", request)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Missing input"));
}

#[tokio::test]
async fn clamp_is_opt_in_and_reported() {
    let input = json!({ "values": { "initial_unemployment": 19, "natural_growth": 2, "beta": 1, "growth": -2 } });

    let (_, raw) = send(post_json("/api/evaluate", json!({ "concept": "okuns-law", "input": input }))).await;
    assert_eq!(raw["outputs"]["new_unemployment"].as_f64(), Some(23.0));
    assert!(raw.get("warnings").is_none());

    let (_, shown) = send(post_json(
        "/api/evaluate",
        json!({ "concept": "okuns-law", "input": input, "clamp": true }),
    ))
    .await;
    assert_eq!(shown["outputs"]["new_unemployment"].as_f64(), Some(20.0));
    assert_eq!(shown["warnings"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn domain_errors_are_unprocessable() {
    let (status, body) = send(post_json(
        "/api/evaluate",
        json!({ "concept": "rule-of-70", "input": { "values": { "growth_rate": 0 } } }),
    ))
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("Invalid argument"));
}

#[tokio::test]
async fn unknown_concept_is_not_found() {
    let (status, _) = send(post_json("/api/evaluate", json!({ "concept": "gdp-by-magic" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(get("/api/concepts/gdp-by-magic/defaults")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn serves_configured_defaults() {
    let (status, body) = send(get("/api/concepts/okuns-law/defaults")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["beta"].as_f64(), Some(0.5));

    let (status, body) = send(get("/api/concepts/cpi/defaults")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn policy_table_has_six_rows() {
    let (status, body) = send(get("/api/policies")).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0]["kind"], "expansionary-fiscal");
}

#[tokio::test]
async fn trend_and_correlation() {
    let (status, body) = send(post_json("/api/analyze/trend", json!({ "values": [100, 110, 121] }))).await;
    assert_eq!(status, StatusCode::OK);
    let growth = body["trend"]["average_growth"].as_f64().unwrap();
    assert!((growth - 10.0).abs() < 1e-6);
    assert_eq!(body["summary"]["count"], 3);

    let (status, body) = send(post_json(
        "/api/analyze/correlation",
        json!({ "x": [1, 2, 3, 4], "y": [8, 6, 4, 2] }),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["correlation"]["strength"], "strong");
    assert_eq!(body["correlation"]["direction"], "negative");
    assert_eq!(body["regression"]["slope"].as_f64(), Some(-2.0));
}

#[tokio::test]
async fn too_little_data_is_unprocessable() {
    let (status, _) = send(post_json("/api/analyze/trend", json!({ "values": [1] }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn summarizes_an_uploaded_csv() {
    let request = Request::post("/api/analyze/csv")
        .header(header::CONTENT_TYPE, "text/csv")
        .body(Body::from("year,growth\n2021,6.8\n2022,2.5\n2023,0.9\n"))
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    let columns = body["columns"].as_array().unwrap();
    assert_eq!(columns.len(), 2);
    assert_eq!(columns[1]["name"], "growth");
    assert_eq!(columns[1]["summary"]["count"], 3);
    assert_eq!(body["correlations"]["columns"], json!(["year", "growth"]));
    assert_eq!(body["correlations"]["coefficients"][0][0].as_f64(), Some(1.0));
    let r = body["correlations"]["coefficients"][0][1].as_f64().unwrap();
    assert!(r < -0.9, "growth falls as the years pass, got {r}");

    let bad = Request::post("/api/analyze/csv")
        .body(Body::from("year,growth\n2021,lots\n"))
        .unwrap();
    let (status, body) = send(bad).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("growth"));
}

#[tokio::test]
async fn france_sample_has_nine_years() {
    let (status, body) = send(get("/api/samples/france")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "france");
    let columns = body["columns"].as_array().unwrap();
    assert!(columns.iter().all(|c| c["values"].as_array().unwrap().len() == 9));
}

#[tokio::test]
async fn csv_matrix_leaves_undefined_pairs_empty() {
    let request = Request::post("/api/analyze/csv")
        .body(Body::from("year,flat\n2021,5\n2022,5\n2023,5\n"))
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["correlations"]["coefficients"][0][1].is_null());
    assert!(body["correlations"]["coefficients"][1][1].is_null());
}

#[tokio::test]
async fn household_outlook_is_served() {
    let (status, body) = send(post_json(
        "/api/evaluate",
        json!({
            "concept": "household-outlook",
            "input": { "values": { "consumption": 1500 }, "labels": { "outlook": "very-pessimistic" } }
        }),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outputs"]["gdp_effect"].as_f64(), Some(-450.0));
    assert_eq!(body["classification"], "falling");
}
