//! Wire Types

use serde::{Deserialize, Serialize};

/// Body of the generation request
#[derive(Clone, Debug, Serialize)]
pub struct GenerateRequest {
    pub folder_path: String,
    pub output_filename: String,
}

/// Envelope returned by the generation endpoint
#[derive(Clone, Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    pub data: GenerateData,
}

/// The generated artifacts: image and text references plus the tree itself
#[derive(Clone, Debug, Deserialize)]
pub struct GenerateData {
    /// Service-relative URL of the rendered image
    pub image_url: String,
    /// Service-relative URL of the tree text file
    #[serde(default)]
    pub text_url: String,
    /// The tree as plain text
    pub tree_structure: String,
}

/// Error body the service attaches to non-success responses
#[derive(Clone, Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generate_request_serializes_wire_keys() {
        let request = GenerateRequest {
            folder_path: "/tmp/project".to_string(),
            output_filename: "folder_structure".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["folder_path"], "/tmp/project");
        assert_eq!(json["output_filename"], "folder_structure");
    }

    #[test]
    fn test_generate_response_full_envelope() {
        let body = r#"{
            "status": "success",
            "message": "Folder structure generated successfully",
            "data": {
                "image_url": "/static/folder_structure.png",
                "text_url": "/static/folder_structure.txt",
                "tree_structure": "root\n  a\n  b"
            }
        }"#;
        let response: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.status, "success");
        assert_eq!(response.data.image_url, "/static/folder_structure.png");
        assert_eq!(response.data.text_url, "/static/folder_structure.txt");
        assert_eq!(response.data.tree_structure, "root\n  a\n  b");
    }

    #[test]
    fn test_generate_response_without_text_url() {
        let body = r#"{
            "data": {
                "image_url": "/static/x.png",
                "tree_structure": "root"
            }
        }"#;
        let response: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.status, "");
        assert_eq!(response.data.text_url, "");
        assert_eq!(response.data.image_url, "/static/x.png");
    }

    #[test]
    fn test_error_body_with_detail() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail": "path not found"}"#).unwrap();
        assert_eq!(body.detail.as_deref(), Some("path not found"));
    }

    #[test]
    fn test_error_body_without_detail() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.detail, None);
    }
}
