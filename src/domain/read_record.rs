use serde::{Deserialize, Serialize};

/// One remembered read: the item's URL and when it was first opened.
///
/// Serialized as `{"id": "...", "timestamp": <epoch ms>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadRecord {
    pub id: String,
    #[serde(rename = "timestamp")]
    pub read_at_ms: i64,
}

impl ReadRecord {
    pub fn new(id: impl Into<String>, read_at_ms: i64) -> Self {
        Self {
            id: id.into(),
            read_at_ms,
        }
    }

    /// Milliseconds elapsed since the first read. Negative if the clock went backwards.
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(self.read_at_ms)
    }

    /// A record whose age has reached the window is expired.
    pub fn is_expired(&self, now_ms: i64, window_ms: i64) -> bool {
        self.age_ms(now_ms) >= window_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MS: i64 = 24 * 60 * 60 * 1000;

    #[test]
    fn test_expiry_boundary() {
        let record = ReadRecord::new("https://example.com/a", 1_000);
        assert!(!record.is_expired(1_000 + DAY_MS - 1, DAY_MS));
        assert!(record.is_expired(1_000 + DAY_MS, DAY_MS));
    }

    #[test]
    fn test_future_timestamp_is_not_expired() {
        let record = ReadRecord::new("https://example.com/a", 5_000);
        assert_eq!(record.age_ms(1_000), -4_000);
        assert!(!record.is_expired(1_000, DAY_MS));
    }

    #[test]
    fn test_json_shape_uses_timestamp_key() {
        let record = ReadRecord::new("https://example.com/a", 42);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"id":"https://example.com/a","timestamp":42}"#);

        let parsed: ReadRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
