use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize, Serializer};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub const LIGHT_LEVELS: [&str; 3] = ["low", "med", "high"];

const TIMESTAMP_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Plant {
    pub id: String,
    pub name: String,
    pub light_required: String,
    #[serde(rename = "createdAt", serialize_with = "millis")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", serialize_with = "millis")]
    pub updated_at: DateTime<Utc>,
}

fn millis<S: Serializer>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&timestamp.format(TIMESTAMP_PATTERN))
}

#[derive(Serialize, Deserialize)]
pub struct PlantEnvelope {
    pub plant: Plant,
}

#[derive(Serialize, Deserialize)]
pub struct PlantsEnvelope {
    pub plants: Vec<Plant>,
}

#[derive(Deserialize)]
pub struct PlantPayload {
    pub plant: PlantInput,
}

#[derive(Deserialize)]
pub struct PlantInput {
    pub name: String,
    pub light_required: String,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub light_required: Option<String>,
}

pub type Db = Arc<RwLock<HashMap<String, Plant>>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router whose store starts out holding `plants`.
pub fn app_with(plants: Vec<Plant>) -> Router {
    let db: Db = Arc::new(RwLock::new(
        plants.into_iter().map(|p| (p.id.clone(), p)).collect(),
    ));
    Router::new()
        .route("/plants", get(list_plants).post(create_plant))
        .route(
            "/plants/{id}",
            get(get_plant).put(update_plant).delete(delete_plant),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

fn validate(input: &PlantInput) -> Result<(), StatusCode> {
    if LIGHT_LEVELS.contains(&input.light_required.as_str()) {
        Ok(())
    } else {
        Err(StatusCode::UNPROCESSABLE_ENTITY)
    }
}

/// `light_required` is a comma-separated list of level names; an empty value
/// matches nothing.
async fn list_plants(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> Json<PlantsEnvelope> {
    let plants = db.read().await;
    let wanted: Option<Vec<&str>> = params
        .light_required
        .as_deref()
        .map(|raw| raw.split(',').filter(|s| !s.is_empty()).collect());
    let mut plants: Vec<Plant> = plants
        .values()
        .filter(|p| match &wanted {
            Some(levels) => levels.contains(&p.light_required.as_str()),
            None => true,
        })
        .cloned()
        .collect();
    plants.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    Json(PlantsEnvelope { plants })
}

async fn create_plant(
    State(db): State<Db>,
    Json(input): Json<PlantPayload>,
) -> Result<(StatusCode, Json<PlantEnvelope>), StatusCode> {
    validate(&input.plant)?;
    let now = now();
    let plant = Plant {
        id: Uuid::new_v4().to_string(),
        name: input.plant.name,
        light_required: input.plant.light_required,
        created_at: now,
        updated_at: now,
    };
    tracing::info!(id = %plant.id, name = %plant.name, "created plant");
    db.write().await.insert(plant.id.clone(), plant.clone());
    Ok((StatusCode::CREATED, Json(PlantEnvelope { plant })))
}

async fn get_plant(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<PlantEnvelope>, StatusCode> {
    let plants = db.read().await;
    plants
        .get(&id)
        .cloned()
        .map(|plant| Json(PlantEnvelope { plant }))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_plant(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<PlantPayload>,
) -> Result<Json<PlantEnvelope>, StatusCode> {
    validate(&input.plant)?;
    let mut plants = db.write().await;
    let plant = plants.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    plant.name = input.plant.name;
    plant.light_required = input.plant.light_required;
    plant.updated_at = now();
    Ok(Json(PlantEnvelope {
        plant: plant.clone(),
    }))
}

async fn delete_plant(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut plants = db.write().await;
    plants
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}
