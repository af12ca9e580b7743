//! Domain types for the plants API.
//!
//! # Design
//! `Plant` is the value callers exchange with `NetworkService`. It carries no
//! serde attributes: the wire representation lives in `parser`, where the
//! timestamp profile is known. `PlantPayload` is the only shape ever written
//! to the server, and it structurally excludes id and timestamps.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How much light a plant needs. Also used as a list filter.
///
/// Variants are ordered by declaration, which fixes the join order of the
/// `light_required` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightLevel {
    Low,
    Med,
    High,
}

impl LightLevel {
    pub const ALL: [LightLevel; 3] = [LightLevel::Low, LightLevel::Med, LightLevel::High];

    /// Name used on the wire and in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            LightLevel::Low => "low",
            LightLevel::Med => "med",
            LightLevel::High => "high",
        }
    }
}

impl fmt::Display for LightLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known light level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown light level `{0}`")]
pub struct UnknownLightLevel(pub String);

impl FromStr for LightLevel {
    type Err = UnknownLightLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LightLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| UnknownLightLevel(s.to_string()))
    }
}

/// A plant as stored by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plant {
    pub id: String,
    pub name: String,
    pub light_required: LightLevel,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl Plant {
    /// Build a submission with a fresh client-side id and "now" timestamps.
    ///
    /// The server assigns its own id and timestamps on create; only `name`
    /// and `light_required` are sent.
    pub fn new(name: impl Into<String>, light_required: LightLevel) -> Self {
        let now: DateTime<FixedOffset> = Utc::now().trunc_subsecs(3).into();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            light_required,
            created_at: now,
            updated_at: now,
        }
    }
}

impl fmt::Display for Plant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "*Plant* id: {}, name: {}, lightRequired: {}",
            self.id, self.name, self.light_required
        )
    }
}

/// Request body for create and update: `{"plant": {"name", "light_required"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlantPayload {
    pub plant: PlantPayloadElement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlantPayloadElement {
    pub name: String,
    pub light_required: LightLevel,
}

impl From<&Plant> for PlantPayload {
    fn from(plant: &Plant) -> Self {
        Self {
            plant: PlantPayloadElement {
                name: plant.name.clone(),
                light_required: plant.light_required,
            },
        }
    }
}
