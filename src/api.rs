use thiserror::Error;

use crate::geometry::{CircleData, DomeData, ShapeParams};

/// Errors surfaced by the backend client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("backend returned status {0}")]
    Status(u16),
    #[error("invalid response: {0}")]
    Decode(String),
}

/// Thin client for the circle/dome generator backend.
///
/// Both endpoints are plain GET + JSON, no auth, no pagination.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    fn shape_url(&self, endpoint: &str, params: &ShapeParams) -> String {
        format!(
            "{}/api/{}?radius={}&filled={}&thickness={}",
            self.base_url,
            endpoint,
            params.radius,
            if params.filled { 1 } else { 0 },
            params.thickness,
        )
    }

    pub fn fetch_circle(&self, params: &ShapeParams) -> Result<CircleData, ApiError> {
        fetch_json(&self.shape_url("circle", params))
    }

    pub fn fetch_dome(&self, params: &ShapeParams) -> Result<DomeData, ApiError> {
        fetch_json(&self.shape_url("dome", params))
    }
}

fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let response = ureq::get(url).call().map_err(|err| match err {
        ureq::Error::Status(code, _) => ApiError::Status(code),
        other => ApiError::Transport(other.to_string()),
    })?;
    response
        .into_json::<T>()
        .map_err(|err| ApiError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_circle_query_url() {
        let client = ApiClient::new("http://127.0.0.1:5000/");
        let params = ShapeParams {
            radius: 12,
            filled: false,
            thickness: 3,
        };
        assert_eq!(
            client.shape_url("circle", &params),
            "http://127.0.0.1:5000/api/circle?radius=12&filled=0&thickness=3"
        );
    }

    #[test]
    fn builds_dome_query_url_with_filled_flag() {
        let client = ApiClient::new("http://localhost:8080");
        let params = ShapeParams {
            radius: 7,
            filled: true,
            thickness: 1,
        };
        assert_eq!(
            client.shape_url("dome", &params),
            "http://localhost:8080/api/dome?radius=7&filled=1&thickness=1"
        );
    }

    #[test]
    fn decodes_circle_response_bits() {
        let json = r#"{
            "radius": 1,
            "size": 3,
            "block_count": 5,
            "grid": [[0, 1, 0], [1, 1, 1], [0, 1, 0]]
        }"#;
        let data: CircleData = serde_json::from_str(json).unwrap();
        assert_eq!(data.radius, 1);
        assert_eq!(data.size, 3);
        assert_eq!(data.block_count, 5);
        assert!(data.grid[1][1]);
        assert!(!data.grid[0][0]);
    }

    #[test]
    fn decodes_dome_response() {
        let json = r#"{
            "radius": 1,
            "total_blocks": 6,
            "layers": [
                {"y": 0, "size": 3, "block_count": 5, "grid": [[0,1,0],[1,1,1],[0,1,0]]},
                {"y": 1, "size": 3, "block_count": 1, "grid": [[0,0,0],[0,1,0],[0,0,0]]}
            ],
            "voxels": [[0,0,-1],[-1,0,0],[0,0,0],[1,0,0],[0,0,1],[0,1,0]]
        }"#;
        let data: DomeData = serde_json::from_str(json).unwrap();
        assert_eq!(data.total_blocks, 6);
        assert_eq!(data.layers.len(), 2);
        assert_eq!(data.voxels.len(), 6);
        assert_eq!(data.voxels[5], [0, 1, 0]);
        assert!(data.layers[1].grid[1][1]);
    }
}
