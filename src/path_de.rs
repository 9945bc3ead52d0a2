use serde::de::DeserializeOwned;
use serde_json::Value;

/// Where a deserialization failed, as a JSON path, plus the underlying reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathError {
    pub path: String,
    pub message: String,
}

/// Deserialize with JSON-path context in error messages.
pub fn from_value_with_path<T: DeserializeOwned>(value: &Value) -> Result<T, PathError> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| PathError {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Point {
        x: i64,
        y: i64,
    }

    #[test]
    fn reports_the_failing_path() {
        let points = json!([{"x": 1, "y": 2}, {"x": 1, "y": "no"}]);
        let err = from_value_with_path::<Vec<Point>>(&points).unwrap_err();
        assert_eq!(err.path, "[1].y");

        let err = from_value_with_path::<Point>(&json!({"x": true, "y": 0})).unwrap_err();
        assert_eq!(err.path, "x");
        assert!(err.message.contains("invalid type"));
    }
}
