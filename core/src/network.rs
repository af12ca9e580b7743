//! Transport layer: the five REST calls against the plants collection.
//!
//! # Design
//! `Network` holds only the collection URL and an `HttpClient`. Each
//! operation is split into a `build_*` method that produces an `HttpRequest`
//! and an async method that executes it and classifies the outcome into a
//! `NetworkResponse`. Bodies are never interpreted here.

use bytes::Bytes;
use url::Url;

use crate::error::ApiError;
use crate::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::types::PlantPayload;

/// Raw outcome of one transport call.
///
/// Both fields may be set: a non-2xx response can still deliver a body. Both
/// may also be empty, e.g. a 204 reply to a delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkResponse {
    pub body: Option<Bytes>,
    pub error: Option<ApiError>,
}

impl NetworkResponse {
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self {
            body: Some(body.into()),
            error: None,
        }
    }

    pub fn failed(error: ApiError) -> Self {
        Self {
            body: None,
            error: Some(error),
        }
    }

    fn from_http(result: Result<HttpResponse, ApiError>) -> Self {
        let response = match result {
            Ok(response) => response,
            Err(error) => return Self::failed(error),
        };
        let error = status_error(&response);
        let body = (!response.body.is_empty()).then_some(response.body);
        Self { body, error }
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn status_error(response: &HttpResponse) -> Option<ApiError> {
    match response.status {
        200..=299 => None,
        404 => Some(ApiError::NotFound),
        status => Some(ApiError::HttpError {
            status,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        }),
    }
}

/// Issues plant requests against a collection URL such as
/// `https://example.com/api/plants`.
#[derive(Debug, Clone)]
pub struct Network<C> {
    client: C,
    base_url: Url,
}

impl<C: HttpClient> Network<C> {
    pub fn new(base_url: &str, client: C) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    fn collection_url(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }

    /// `base/id`, with `id` percent-encoded as a single path segment.
    ///
    /// `""`, `"."` and `".."` would resolve to the collection (or its parent)
    /// rather than a member, so they are rejected.
    fn member_url(&self, id: &str) -> Result<String, ApiError> {
        if matches!(id, "" | "." | "..") {
            return Err(ApiError::InvalidId(id.to_string()));
        }
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }
        Ok(url.to_string())
    }

    pub fn build_list(&self, params: &[(String, String)]) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_url(),
            query: params.to_vec(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get(&self, id: &str) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Get,
            path: self.member_url(id)?,
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn build_create(&self, payload: &PlantPayload) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_url(),
            query: Vec::new(),
            headers: json_headers(),
            body: Some(to_json(payload)?),
        })
    }

    pub fn build_update(&self, id: &str, payload: &PlantPayload) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.member_url(id)?,
            query: Vec::new(),
            headers: json_headers(),
            body: Some(to_json(payload)?),
        })
    }

    pub fn build_delete(&self, id: &str) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Delete,
            path: self.member_url(id)?,
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        })
    }

    pub async fn list(&self, params: &[(String, String)]) -> NetworkResponse {
        self.send(self.build_list(params)).await
    }

    pub async fn get(&self, id: &str) -> NetworkResponse {
        self.send_built(self.build_get(id)).await
    }

    pub async fn create(&self, payload: &PlantPayload) -> NetworkResponse {
        self.send_built(self.build_create(payload)).await
    }

    pub async fn update(&self, id: &str, payload: &PlantPayload) -> NetworkResponse {
        self.send_built(self.build_update(id, payload)).await
    }

    pub async fn delete(&self, id: &str) -> NetworkResponse {
        self.send_built(self.build_delete(id)).await
    }

    /// A request that could not be built never reaches the client.
    async fn send_built(&self, request: Result<HttpRequest, ApiError>) -> NetworkResponse {
        match request {
            Ok(request) => self.send(request).await,
            Err(error) => NetworkResponse::failed(error),
        }
    }

    async fn send(&self, request: HttpRequest) -> NetworkResponse {
        tracing::debug!(method = ?request.method, url = %request.path, query = ?request.query, "plant request");
        let result = self.client.execute(request).await;
        if let Ok(response) = &result {
            tracing::debug!(status = response.status, bytes = response.body.len(), "plant response");
        }
        let response = NetworkResponse::from_http(result);
        if let Some(error) = &response.error {
            tracing::debug!(%error, "plant request failed");
        }
        response
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn to_json(payload: &PlantPayload) -> Result<String, ApiError> {
    serde_json::to_string(payload).map_err(|e| ApiError::SerializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::stub::StubClient;
    use crate::types::{LightLevel, PlantPayloadElement};

    const BASE_URL: &str = "http://localhost:3000/api/plants";

    fn network() -> Network<StubClient> {
        Network::new(BASE_URL, StubClient::default()).unwrap()
    }

    fn payload() -> PlantPayload {
        PlantPayload {
            plant: PlantPayloadElement {
                name: "Snake Plant".to_string(),
                light_required: LightLevel::Low,
            },
        }
    }

    #[test]
    fn build_list_without_params_has_no_query() {
        let req = network().build_list(&[]);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, BASE_URL);
        assert!(req.query.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn build_list_passes_params_through() {
        let params = vec![("light_required".to_string(), "low,med".to_string())];
        let req = network().build_list(&params);
        assert_eq!(req.query, params);
    }

    #[test]
    fn build_get_appends_id() {
        let req = network().build_get("42").unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/plants/42");
    }

    #[test]
    fn build_get_encodes_id_as_one_segment() {
        let req = network().build_get("a b/c").unwrap();
        assert_eq!(req.path, "http://localhost:3000/api/plants/a%20b%2Fc");
    }

    #[test]
    fn build_create_posts_json_payload() {
        let req = network().build_create(&payload()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, BASE_URL);
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"plant": {"name": "Snake Plant", "light_required": "low"}})
        );
    }

    #[test]
    fn build_update_puts_to_member_url() {
        let req = network().build_update("42", &payload()).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/api/plants/42");
        assert!(req.body.is_some());
    }

    #[test]
    fn build_delete_has_no_body() {
        let req = network().build_delete("42").unwrap();
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/api/plants/42");
        assert!(req.body.is_none());
    }

    #[test]
    fn trailing_slash_is_tolerated() {
        let network = Network::new("http://localhost:3000/api/plants/", StubClient::default()).unwrap();
        assert_eq!(network.build_list(&[]).path, BASE_URL);
        assert_eq!(network.build_get("7").unwrap().path, "http://localhost:3000/api/plants/7");
    }

    #[test]
    fn dot_segment_ids_are_rejected() {
        let network = network();
        for id in ["", ".", ".."] {
            let expected = ApiError::InvalidId(id.to_string());
            assert_eq!(network.build_get(id).unwrap_err(), expected, "{id:?}");
            assert_eq!(network.build_delete(id).unwrap_err(), expected, "{id:?}");
            assert_eq!(
                network.build_update(id, &payload()).unwrap_err(),
                expected,
                "{id:?}"
            );
        }
    }

    #[test]
    fn ids_containing_dots_stay_members() {
        let req = network().build_delete("...").unwrap();
        assert_eq!(req.path, "http://localhost:3000/api/plants/...");
        let req = network().build_get(".hidden").unwrap();
        assert_eq!(req.path, "http://localhost:3000/api/plants/.hidden");
    }

    #[tokio::test]
    async fn delete_with_parent_id_sends_nothing() {
        let network = Network::new(BASE_URL, StubClient::replying(204, "")).unwrap();
        let response = network.delete("..").await;
        assert_eq!(
            response,
            NetworkResponse::failed(ApiError::InvalidId("..".to_string()))
        );
        assert!(network.client().requests().is_empty());
    }

    #[test]
    fn rejects_unusable_base_url() {
        let err = Network::new("not a url", StubClient::default()).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
        let err = Network::new("mailto:plants@example.com", StubClient::default()).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn success_delivers_body_without_error() {
        let network = Network::new(BASE_URL, StubClient::replying(200, r#"{"plants":[]}"#)).unwrap();
        let response = network.list(&[]).await;
        assert_eq!(response, NetworkResponse::ok(r#"{"plants":[]}"#));
    }

    #[tokio::test]
    async fn empty_success_body_is_absent() {
        let network = Network::new(BASE_URL, StubClient::replying(204, "")).unwrap();
        let response = network.delete("42").await;
        assert_eq!(response, NetworkResponse::default());
    }

    #[tokio::test]
    async fn not_found_without_body() {
        let network = Network::new(BASE_URL, StubClient::replying(404, "")).unwrap();
        let response = network.get("missing").await;
        assert_eq!(response, NetworkResponse::failed(ApiError::NotFound));
    }

    #[tokio::test]
    async fn server_error_keeps_body_and_status() {
        let network = Network::new(BASE_URL, StubClient::replying(500, "internal error")).unwrap();
        let response = network.create(&payload()).await;
        assert_eq!(response.body.as_deref(), Some(&b"internal error"[..]));
        assert_eq!(
            response.error,
            Some(ApiError::HttpError {
                status: 500,
                body: "internal error".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn client_failure_is_passed_through() {
        let failure = ApiError::Transport("connection refused".to_string());
        let network = Network::new(BASE_URL, StubClient::failing(failure.clone())).unwrap();
        let response = network.update("42", &payload()).await;
        assert_eq!(response, NetworkResponse::failed(failure));
    }

    #[tokio::test]
    async fn each_call_issues_exactly_one_request() {
        let network = Network::new(BASE_URL, StubClient::replying(200, "{}")).unwrap();
        network.get("1").await;
        let requests = network.client().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "http://localhost:3000/api/plants/1");
    }
}
