use serde_json::Value;

use crate::core::models::SearchRequest;

/// Reads a search request from either a direct invocation payload or an
/// API Gateway event whose `body` holds the JSON request.
///
/// # Errors
///
/// Returns a client-facing message when the payload is malformed or the
/// title or artist is blank.
pub fn parse_search_request(payload: &Value) -> Result<SearchRequest, String> {
    let request: SearchRequest = match payload.get("body") {
        Some(Value::String(body)) => {
            serde_json::from_str(body).map_err(|e| format!("Invalid JSON body: {}", e))?
        }
        Some(body @ Value::Object(_)) => serde_json::from_value(body.clone())
            .map_err(|e| format!("Invalid request body: {}", e))?,
        Some(_) => return Err("Missing request body".to_string()),
        None => serde_json::from_value(payload.clone())
            .map_err(|e| format!("Invalid request: {}", e))?,
    };

    let title = request.title.trim();
    let artist = request.artist.trim();
    if title.is_empty() {
        return Err("Title must not be empty".to_string());
    }
    if artist.is_empty() {
        return Err("Artist must not be empty".to_string());
    }

    Ok(SearchRequest {
        title: title.to_string(),
        artist: artist.to_string(),
        requester: request.requester.filter(|r| !r.trim().is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_direct_payload() {
        let req = parse_search_request(&json!({
            "title": " Imagine ",
            "artist": "John Lennon",
            "requester": "U1"
        }))
        .unwrap();
        assert_eq!(req.title, "Imagine");
        assert_eq!(req.requester.as_deref(), Some("U1"));
    }

    #[test]
    fn test_gateway_body_string() {
        let req = parse_search_request(&json!({
            "rawPath": "/search",
            "body": "{\"title\": \"Imagine\", \"artist\": \"John Lennon\"}"
        }))
        .unwrap();
        assert_eq!(req.artist, "John Lennon");
        assert!(req.requester.is_none());
    }

    #[test]
    fn test_blank_fields_rejected() {
        let err = parse_search_request(&json!({"title": "  ", "artist": "X"})).unwrap_err();
        assert!(err.contains("Title"));
        let err = parse_search_request(&json!({"title": "X", "artist": ""})).unwrap_err();
        assert!(err.contains("Artist"));
    }

    #[test]
    fn test_malformed_body_rejected() {
        assert!(parse_search_request(&json!({"body": "not json"})).is_err());
        assert!(parse_search_request(&json!({"body": 5})).is_err());
    }
}
