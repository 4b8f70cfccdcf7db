use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Appointment, Business, Service, Slot, OPEN_HOURS};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- root ---

#[tokio::test]
async fn root_greets() {
    let resp = app().oneshot(get_request("/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], "Appointment Scheduler API");
}

// --- businesses ---

#[tokio::test]
async fn list_businesses_returns_seeded_data_in_id_order() {
    let resp = app().oneshot(get_request("/businesses")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let businesses: Vec<Business> = body_json(resp).await;
    assert!(!businesses.is_empty());
    let ids: Vec<u64> = businesses.iter().map(|b| b.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[tokio::test]
async fn get_business_by_id() {
    let resp = app().oneshot(get_request("/businesses/1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let business: Business = body_json(resp).await;
    assert_eq!(business.id, 1);
}

#[tokio::test]
async fn get_unknown_business_is_404() {
    let resp = app().oneshot(get_request("/businesses/999")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- services ---

#[tokio::test]
async fn list_services_filters_by_business() {
    let resp = app()
        .oneshot(get_request("/businesses/1/services"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let services: Vec<Service> = body_json(resp).await;
    assert!(!services.is_empty());
    assert!(services.iter().all(|s| s.business_id == 1));
}

#[tokio::test]
async fn list_services_for_unknown_business_is_empty_not_404() {
    let resp = app()
        .oneshot(get_request("/businesses/999/services"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let services: Vec<Service> = body_json(resp).await;
    assert!(services.is_empty());
}

// --- slots ---

#[tokio::test]
async fn slots_cover_open_hours_when_nothing_is_booked() {
    let resp = app()
        .oneshot(get_request("/services/1/slots?date=2024-05-01"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let slots: Vec<Slot> = body_json(resp).await;
    assert_eq!(slots.len(), OPEN_HOURS.len());
    assert!(slots.iter().all(|s| s.service_id == 1 && s.date == "2024-05-01"));
}

#[tokio::test]
async fn slots_for_unknown_service_is_empty_list() {
    let resp = app()
        .oneshot(get_request("/services/999/slots?date=2024-05-01"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let slots: Vec<Slot> = body_json(resp).await;
    assert!(slots.is_empty());
}

#[tokio::test]
async fn slots_require_date_param() {
    let resp = app().oneshot(get_request("/services/1/slots")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- appointments ---

#[tokio::test]
async fn create_appointment_returns_201_and_echoes_payload() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/appointments",
            r#"{"service_id":1,"client_id":7,"date":"2024-05-01","start_time":"10:00"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let appointment: Appointment = body_json(resp).await;
    assert_eq!(appointment.service_id, 1);
    assert_eq!(appointment.client_id, 7);
    assert_eq!(appointment.date, "2024-05-01");
    assert_eq!(appointment.start_time, "10:00");
}

#[tokio::test]
async fn create_appointment_for_unknown_service_is_400() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/appointments",
            r#"{"service_id":999,"client_id":7,"date":"2024-05-01","start_time":"10:00"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn create_appointment_outside_open_hours_is_400() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/appointments",
            r#"{"service_id":1,"client_id":7,"date":"2024-05-01","start_time":"03:00"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn double_booking_a_slot_is_400() {
    let app = app();
    let payload = r#"{"service_id":1,"client_id":7,"date":"2024-05-01","start_time":"10:00"}"#;

    let first = app
        .clone()
        .oneshot(json_request("POST", "/appointments", payload))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(json_request("POST", "/appointments", payload))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn booking_removes_the_slot_from_availability() {
    let app = app();

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/appointments",
            r#"{"service_id":1,"client_id":7,"date":"2024-05-01","start_time":"10:00"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let resp = app
        .oneshot(get_request("/services/1/slots?date=2024-05-01"))
        .await
        .unwrap();
    let slots: Vec<Slot> = body_json(resp).await;
    assert_eq!(slots.len(), OPEN_HOURS.len() - 1);
    assert!(slots.iter().all(|s| s.start_time != "10:00"));
}

#[tokio::test]
async fn list_appointments_reflects_bookings() {
    let app = app();

    let empty = app
        .clone()
        .oneshot(get_request("/appointments"))
        .await
        .unwrap();
    let appointments: Vec<Appointment> = body_json(empty).await;
    assert!(appointments.is_empty());

    app.clone()
        .oneshot(json_request(
            "POST",
            "/appointments",
            r#"{"service_id":3,"client_id":2,"date":"2024-06-10","start_time":"09:00"}"#,
        ))
        .await
        .unwrap();

    let resp = app.oneshot(get_request("/appointments")).await.unwrap();
    let appointments: Vec<Appointment> = body_json(resp).await;
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].service_id, 3);
}
