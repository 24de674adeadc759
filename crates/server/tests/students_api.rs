use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use configs::AppConfig;
use serde_json::{json, Value};
use tower::Service;

fn app() -> Router {
    server::build_app(&AppConfig::default())
}

fn empty_app() -> Router {
    let mut cfg = AppConfig::default();
    cfg.roster.seed = false;
    server::build_app(&cfg)
}

fn student_uri(name: &str) -> String {
    let encoded: String = name.bytes().map(|b| format!("%{b:02X}")).collect();
    format!("/students/{encoded}")
}

async fn send_raw(app: &Router, method: &str, uri: &str, body: Option<Body>) -> anyhow::Result<(StatusCode, Vec<u8>)> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(b) => {
            builder = builder.header("content-type", "application/json");
            b
        }
        None => Body::empty(),
    };
    let resp = app.clone().call(builder.body(body)?).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok((status, bytes.to_vec()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let body = body.map(|v| serde_json::to_vec(&v)).transpose()?.map(Body::from);
    let (status, bytes) = send_raw(app, method, uri, body).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, value))
}

async fn roster_len(app: &Router) -> anyhow::Result<usize> {
    let (_, body) = send(app, "GET", "/students", None).await?;
    Ok(body.as_array().map(Vec::len).unwrap_or_default())
}

#[tokio::test]
async fn banner_is_byte_exact() -> anyhow::Result<()> {
    let app = app();
    let (status, bytes) = send_raw(&app, "GET", "/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        String::from_utf8(bytes)?,
        r#"{"message":"학생 점수 관리 API에 오신 것을 환영합니다!","docs":"/docs","endpoints":{"전체 학생 목록":"/students","학생 조회":"/students/{name}","통계 정보":"/statistics"}}"#
    );
    Ok(())
}

#[tokio::test]
async fn list_returns_seed_roster_in_order() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, "GET", "/students", None).await?;
    assert_eq!(status, StatusCode::OK);
    let all = body.as_array().expect("array");
    assert_eq!(all.len(), 10);
    assert_eq!(
        all[0],
        json!({"name": "정약용", "korean": 85, "english": 90, "math": 80, "science": 75, "total": 330, "average": 82.5})
    );
    assert_eq!(all[9]["name"], "세종대왕");
    assert_eq!(all[9]["total"], 390);
    Ok(())
}

#[tokio::test]
async fn repeated_reads_are_identical() -> anyhow::Result<()> {
    let app = app();
    let (_, a) = send_raw(&app, "GET", "/students", None).await?;
    let (_, b) = send_raw(&app, "GET", "/students", None).await?;
    assert_eq!(a, b);
    let (_, a) = send_raw(&app, "GET", &student_uri("이율곡"), None).await?;
    let (_, b) = send_raw(&app, "GET", &student_uri("이율곡"), None).await?;
    assert_eq!(a, b);
    Ok(())
}

#[tokio::test]
async fn create_then_get_returns_same_record() -> anyhow::Result<()> {
    let app = app();
    let payload = json!({"name": "테스트", "korean": 100, "english": 100, "math": 100, "science": 100});
    let (status, created) = send(&app, "POST", "/students", Some(payload)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["total"], 400);
    assert_eq!(created["average"], json!(100.0));

    let (status, fetched) = send(&app, "GET", &student_uri("테스트"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert_eq!(roster_len(&app).await?, 11);
    Ok(())
}

#[tokio::test]
async fn create_out_of_range_is_unprocessable() -> anyhow::Result<()> {
    let app = app();
    let payload = json!({"name": "초과", "korean": 150, "english": 90, "math": 90, "science": 90});
    let (status, body) = send(&app, "POST", "/students", Some(payload)).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["body", "korean"]));
    assert_eq!(body["detail"][0]["type"], "less_than_equal");
    assert_eq!(roster_len(&app).await?, 10);
    Ok(())
}

#[tokio::test]
async fn create_with_missing_or_mistyped_fields_is_unprocessable() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, "POST", "/students", Some(json!({"name": "부족", "korean": "A"}))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let detail = body["detail"].as_array().expect("detail list");
    assert_eq!(detail.len(), 4);
    assert_eq!(detail[0]["type"], "int_parsing");
    assert_eq!(detail[1]["loc"], json!(["body", "english"]));
    assert_eq!(detail[1]["msg"], "Field required");

    let (status, body) =
        send(&app, "POST", "/students", Some(json!({"name": null, "korean": 1, "english": 1, "math": 1, "science": null}))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "string_type");
    assert_eq!(body["detail"][1]["loc"], json!(["body", "science"]));
    assert_eq!(body["detail"][1]["type"], "int_type");

    let (status, bytes) = send_raw(&app, "POST", "/students", Some(Body::from("{not json"))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["detail"][0]["type"], "json_invalid");
    assert_eq!(roster_len(&app).await?, 10);
    Ok(())
}

#[tokio::test]
async fn create_accepts_numeric_strings_and_booleans() -> anyhow::Result<()> {
    let app = app();
    let payload = json!({"name": "문자열", "korean": "85", "english": true, "math": 90.0, "science": " 70 "});
    let (status, body) = send(&app, "POST", "/students", Some(payload)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["korean"], 85);
    assert_eq!(body["english"], 1);
    assert_eq!(body["total"], 246);
    assert_eq!(body["average"], 61.5);
    Ok(())
}

#[tokio::test]
async fn create_duplicate_name_is_bad_request() -> anyhow::Result<()> {
    let app = app();
    let payload = json!({"name": "홍길동", "korean": 1, "english": 1, "math": 1, "science": 1});
    let (status, body) = send(&app, "POST", "/students", Some(payload)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"detail": "학생 '홍길동'은(는) 이미 존재합니다."}));

    let (_, existing) = send(&app, "GET", &student_uri("홍길동"), None).await?;
    assert_eq!(existing["total"], 308);
    assert_eq!(roster_len(&app).await?, 10);
    Ok(())
}

#[tokio::test]
async fn get_unknown_student_is_not_found() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, "GET", &student_uri("없음"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "학생 '없음'을(를) 찾을 수 없습니다."}));
    Ok(())
}

#[tokio::test]
async fn update_replaces_slot_in_place() -> anyhow::Result<()> {
    let app = app();
    let payload = json!({"name": "충무공", "korean": 100, "english": 90, "math": 95, "science": 85});
    let (status, body) = send(&app, "PUT", &student_uri("이순신"), Some(payload)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "충무공");
    assert_eq!(body["total"], 370);
    assert_eq!(body["average"], json!(92.5));

    let (_, all) = send(&app, "GET", "/students", None).await?;
    let all = all.as_array().expect("array");
    assert_eq!(all.len(), 10);
    assert_eq!(all[1]["name"], "충무공");

    let (status, _) = send(&app, "GET", &student_uri("이순신"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn update_failures_leave_roster_unchanged() -> anyhow::Result<()> {
    let app = app();
    let (_, before) = send_raw(&app, "GET", "/students", None).await?;

    let valid = json!({"name": "없음", "korean": 1, "english": 1, "math": 1, "science": 1});
    let (status, body) = send(&app, "PUT", &student_uri("없음"), Some(valid)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "학생 '없음'을(를) 찾을 수 없습니다.");

    let invalid = json!({"name": "홍길동", "korean": -3, "english": 1, "math": 1, "science": 1});
    let (status, _) = send(&app, "PUT", &student_uri("홍길동"), Some(invalid)).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let collision = json!({"name": "세종대왕", "korean": 1, "english": 1, "math": 1, "science": 1});
    let (status, body) = send(&app, "PUT", &student_uri("홍길동"), Some(collision)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "학생 '세종대왕'은(는) 이미 존재합니다.");

    let (_, after) = send_raw(&app, "GET", "/students", None).await?;
    assert_eq!(before, after);
    Ok(())
}

#[tokio::test]
async fn delete_removes_exactly_one() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, "DELETE", &student_uri("김유신"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "message": "학생 '김유신'이(가) 삭제되었습니다.",
            "deleted_student": {"name": "김유신", "korean": 77, "english": 75, "math": 73, "science": 70}
        })
    );
    assert_eq!(roster_len(&app).await?, 9);

    let (status, _) = send(&app, "DELETE", &student_uri("김유신"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(roster_len(&app).await?, 9);
    Ok(())
}

#[tokio::test]
async fn delete_unknown_is_not_found() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, "DELETE", &student_uri("없음"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "학생 '없음'을(를) 찾을 수 없습니다.");
    assert_eq!(roster_len(&app).await?, 10);
    Ok(())
}

#[tokio::test]
async fn statistics_on_seed_roster() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, "GET", "/statistics", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "total_students": 10,
            "average_korean": 85.1,
            "average_english": 84.5,
            "average_math": 83.5,
            "average_science": 85.6,
            "overall_average": 84.67,
            "top_student": "세종대왕"
        })
    );
    Ok(())
}

#[tokio::test]
async fn statistics_on_empty_roster_is_not_found() -> anyhow::Result<()> {
    let app = empty_app();
    let (status, body) = send(&app, "GET", "/statistics", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "점수 데이터가 없습니다."}));

    let (status, body) = send(&app, "GET", "/students", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let payload = json!({"name": "혼자", "korean": 70, "english": 80, "math": 90, "science": 100});
    send(&app, "POST", "/students", Some(payload)).await?;
    let (status, body) = send(&app, "GET", "/statistics", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_students"], 1);
    assert_eq!(body["overall_average"], json!(85.0));
    assert_eq!(body["top_student"], "혼자");
    Ok(())
}

#[tokio::test]
async fn operational_endpoints_respond() -> anyhow::Result<()> {
    let app = app();
    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    send(&app, "GET", "/students", None).await?;
    let (status, bytes) = send_raw(&app, "GET", "/metrics", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(bytes)?.contains("roster_requests_total"));

    let (status, doc) = send(&app, "GET", "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/students/{name}").is_some());
    Ok(())
}
