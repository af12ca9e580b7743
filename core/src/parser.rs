//! Response decoding and payload encoding.
//!
//! # Design
//! `NetworkParser` owns the `TimestampFormat` and the wire envelope types,
//! so nothing outside this module knows how a plant looks on the wire.
//!
//! Error precedence when a body is present: a body that fails to decode
//! replaces any transport error with `DeserializationError`; a body that
//! decodes while a transport error is also present yields the transport
//! error. Without a body the transport error passes through unchanged, and
//! no error at all means "nothing to return".
//!
//! The masking rule applies to 404 as well: a not-found response whose body is
//! not a plant envelope, such as a proxy's HTML error page, surfaces as
//! `DeserializationError` from `decode_list` and `decode_one`, not `NotFound`.
//! Callers that need to tell "missing" apart must rely on the server sending
//! 404 with an empty body. `decode_empty` never reads the body, so deletes
//! still report `NotFound`.

use serde::Deserialize;

use crate::error::ApiError;
use crate::network::NetworkResponse;
use crate::timestamp::TimestampFormat;
use crate::types::{LightLevel, Plant, PlantPayload};

#[derive(Deserialize)]
struct PlantsEnvelope {
    plants: Vec<PlantWire>,
}

#[derive(Deserialize)]
struct PlantEnvelope {
    plant: PlantWire,
}

#[derive(Deserialize)]
struct PlantWire {
    id: String,
    name: String,
    light_required: LightLevel,
    #[serde(rename = "createdAt")]
    created_at: String,
    #[serde(rename = "updatedAt")]
    updated_at: String,
}

/// Decodes transport output into plants and encodes plants into payloads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkParser {
    timestamps: TimestampFormat,
}

impl NetworkParser {
    pub fn new(timestamps: TimestampFormat) -> Self {
        Self { timestamps }
    }

    pub fn timestamps(&self) -> &TimestampFormat {
        &self.timestamps
    }

    /// Decode a `{"plants": [...]}` response.
    pub fn decode_list(&self, response: NetworkResponse) -> Result<Vec<Plant>, ApiError> {
        let Some(body) = response.body else {
            return pass_through(response.error).map(|()| Vec::new());
        };
        let envelope: PlantsEnvelope = decode_json(&body)?;
        let plants = envelope
            .plants
            .into_iter()
            .map(|wire| self.plant_from_wire(wire))
            .collect::<Result<Vec<_>, _>>()?;
        pass_through(response.error).map(|()| plants)
    }

    /// Decode a `{"plant": {...}}` response.
    pub fn decode_one(&self, response: NetworkResponse) -> Result<Option<Plant>, ApiError> {
        let Some(body) = response.body else {
            return pass_through(response.error).map(|()| None);
        };
        let envelope: PlantEnvelope = decode_json(&body)?;
        let plant = self.plant_from_wire(envelope.plant)?;
        pass_through(response.error).map(|()| Some(plant))
    }

    /// Result of a call that carries no content; any body is ignored.
    pub fn decode_empty(&self, response: NetworkResponse) -> Result<(), ApiError> {
        pass_through(response.error)
    }

    pub fn encode_payload(&self, plant: &Plant) -> PlantPayload {
        PlantPayload::from(plant)
    }

    fn plant_from_wire(&self, wire: PlantWire) -> Result<Plant, ApiError> {
        Ok(Plant {
            created_at: self.timestamps.parse(&wire.created_at)?,
            updated_at: self.timestamps.parse(&wire.updated_at)?,
            id: wire.id,
            name: wire.name,
            light_required: wire.light_required,
        })
    }
}

fn decode_json<'a, T: Deserialize<'a>>(body: &'a [u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

fn pass_through(error: Option<ApiError>) -> Result<(), ApiError> {
    match error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
