//! In-memory booking backend used for integration testing and local dev.
//!
//! Implements the HTTP contract the client expects: seeded businesses and
//! services, hourly availability per service and date, and appointment
//! creation that takes a slot out of availability. State lives in an
//! `Arc<RwLock<Store>>` and resets with the process.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Start times offered for every service on every date. Booking one removes
/// it from that service's availability for that date.
pub const OPEN_HOURS: [&str; 8] = [
    "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00",
];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Business {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Service {
    pub id: u64,
    pub business_id: u64,
    pub name: String,
    pub duration_minutes: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Slot {
    pub service_id: u64,
    pub date: String,
    pub start_time: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub service_id: u64,
    pub client_id: u64,
    pub date: String,
    pub start_time: String,
}

#[derive(Deserialize)]
pub struct CreateAppointment {
    pub service_id: u64,
    pub client_id: u64,
    pub date: String,
    pub start_time: String,
}

#[derive(Deserialize)]
pub struct SlotsQuery {
    pub date: String,
}

pub struct Store {
    businesses: HashMap<u64, Business>,
    services: HashMap<u64, Service>,
    appointments: Vec<Appointment>,
}

impl Store {
    fn seeded() -> Self {
        let businesses = [
            Business {
                id: 1,
                name: "Fresh Fade Barbershop".to_string(),
            },
            Business {
                id: 2,
                name: "Lakeside Dental".to_string(),
            },
        ];
        let services = [
            Service {
                id: 1,
                business_id: 1,
                name: "Haircut".to_string(),
                duration_minutes: 30,
            },
            Service {
                id: 2,
                business_id: 1,
                name: "Beard Trim".to_string(),
                duration_minutes: 15,
            },
            Service {
                id: 3,
                business_id: 2,
                name: "Cleaning".to_string(),
                duration_minutes: 60,
            },
        ];
        Self {
            businesses: businesses.into_iter().map(|b| (b.id, b)).collect(),
            services: services.into_iter().map(|s| (s.id, s)).collect(),
            appointments: Vec::new(),
        }
    }

    fn available_slots(&self, service_id: u64, date: &str) -> Vec<Slot> {
        if !self.services.contains_key(&service_id) {
            return Vec::new();
        }
        OPEN_HOURS
            .iter()
            .copied()
            .filter(|&start_time| !self.is_booked(service_id, date, start_time))
            .map(|start_time| Slot {
                service_id,
                date: date.to_string(),
                start_time: start_time.to_string(),
            })
            .collect()
    }

    fn is_booked(&self, service_id: u64, date: &str, start_time: &str) -> bool {
        self.appointments
            .iter()
            .any(|a| a.service_id == service_id && a.date == date && a.start_time == start_time)
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded()));
    Router::new()
        .route("/", get(root))
        .route("/businesses", get(list_businesses))
        .route("/businesses/{id}", get(get_business))
        .route("/businesses/{id}/services", get(list_services))
        .route("/services/{id}/slots", get(list_available_slots))
        .route("/appointments", get(list_appointments).post(create_appointment))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Appointment Scheduler API" }))
}

async fn list_businesses(State(db): State<Db>) -> Json<Vec<Business>> {
    let store = db.read().await;
    let mut businesses: Vec<Business> = store.businesses.values().cloned().collect();
    businesses.sort_by_key(|b| b.id);
    Json(businesses)
}

async fn get_business(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Business>, StatusCode> {
    let store = db.read().await;
    store
        .businesses
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_services(State(db): State<Db>, Path(id): Path<u64>) -> Json<Vec<Service>> {
    let store = db.read().await;
    let mut services: Vec<Service> = store
        .services
        .values()
        .filter(|s| s.business_id == id)
        .cloned()
        .collect();
    services.sort_by_key(|s| s.id);
    Json(services)
}

async fn list_available_slots(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Query(query): Query<SlotsQuery>,
) -> Json<Vec<Slot>> {
    let store = db.read().await;
    Json(store.available_slots(id, &query.date))
}

async fn create_appointment(
    State(db): State<Db>,
    Json(input): Json<CreateAppointment>,
) -> Result<(StatusCode, Json<Appointment>), StatusCode> {
    let mut store = db.write().await;
    let bookable = store.services.contains_key(&input.service_id)
        && OPEN_HOURS.contains(&input.start_time.as_str())
        && !store.is_booked(input.service_id, &input.date, &input.start_time);
    if !bookable {
        return Err(StatusCode::BAD_REQUEST);
    }
    let appointment = Appointment {
        id: Uuid::new_v4(),
        service_id: input.service_id,
        client_id: input.client_id,
        date: input.date,
        start_time: input.start_time,
    };
    store.appointments.push(appointment.clone());
    tracing::info!(id = %appointment.id, service_id = appointment.service_id, "appointment booked");
    Ok((StatusCode::CREATED, Json(appointment)))
}

async fn list_appointments(State(db): State<Db>) -> Json<Vec<Appointment>> {
    let store = db.read().await;
    Json(store.appointments.clone())
}
