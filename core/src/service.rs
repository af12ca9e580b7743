//! The single entry point for plant operations.
//!
//! `NetworkService` composes a `Network` with a `NetworkParser`. Every method
//! performs one round-trip and resolves exactly once; nothing is retried or
//! cached, and the service holds no mutable state, so one instance can serve
//! concurrent calls.

use std::collections::BTreeSet;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpClient, ReqwestClient};
use crate::network::Network;
use crate::parser::NetworkParser;
use crate::types::{LightLevel, Plant};

/// Query parameter carrying the light-level filter.
pub const LIGHT_FILTER_PARAM: &str = "light_required";

/// Query parameters for a list request.
///
/// Requesting every level sends no filter at all. Any other set, including
/// the empty one, is sent as a comma-joined list in declaration order.
pub fn filter_params(levels: &BTreeSet<LightLevel>) -> Vec<(String, String)> {
    if LightLevel::ALL.iter().all(|level| levels.contains(level)) {
        return Vec::new();
    }
    let joined = levels
        .iter()
        .map(LightLevel::as_str)
        .collect::<Vec<_>>()
        .join(",");
    vec![(LIGHT_FILTER_PARAM.to_string(), joined)]
}

#[derive(Debug, Clone)]
pub struct NetworkService<C = ReqwestClient> {
    network: Network<C>,
    parser: NetworkParser,
}

impl NetworkService<ReqwestClient> {
    /// Service talking to `config.base_url` through a default `reqwest` client.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let network = Network::new(&config.base_url, ReqwestClient::new())?;
        Ok(Self::new(network, NetworkParser::new(config.timestamps)))
    }
}

impl<C: HttpClient> NetworkService<C> {
    pub fn new(network: Network<C>, parser: NetworkParser) -> Self {
        Self { network, parser }
    }

    pub fn network(&self) -> &Network<C> {
        &self.network
    }

    pub fn parser(&self) -> &NetworkParser {
        &self.parser
    }

    /// Plants whose light requirement is in `levels`.
    pub async fn list_plants(&self, levels: &BTreeSet<LightLevel>) -> Result<Vec<Plant>, ApiError> {
        let response = self.network.list(&filter_params(levels)).await;
        self.parser.decode_list(response)
    }

    /// `Ok(None)` only when the server answered successfully with no body.
    pub async fn get_plant(&self, id: &str) -> Result<Option<Plant>, ApiError> {
        let response = self.network.get(id).await;
        self.parser.decode_one(response)
    }

    /// Create `plant` and return the server's record, with its own id and
    /// timestamps.
    pub async fn create_plant(&self, plant: &Plant) -> Result<Option<Plant>, ApiError> {
        let payload = self.parser.encode_payload(plant);
        let response = self.network.create(&payload).await;
        self.parser.decode_one(response)
    }

    /// Replace the name and light level of the plant identified by `plant.id`.
    pub async fn update_plant(&self, plant: &Plant) -> Result<Option<Plant>, ApiError> {
        let payload = self.parser.encode_payload(plant);
        let response = self.network.update(&plant.id, &payload).await;
        self.parser.decode_one(response)
    }

    pub async fn delete_plant(&self, plant: &Plant) -> Result<(), ApiError> {
        let response = self.network.delete(&plant.id).await;
        self.parser.decode_empty(response)
    }
}
