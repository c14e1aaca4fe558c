use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::draft::PaymentMethod;

/// The serialized form of a draft, as written to the remote store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPayload {
    pub name: String,
    pub activity_kind: String,
    pub guest_count: i64,
    pub payment_method: PaymentMethod,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: String,
    pub map_url: Option<String>,
}

/// A persisted event as returned by the remote store: the payload
/// fields plus system-assigned identity and timestamps. The store is
/// the sole owner once written; this is a read-only copy for
/// rendering. Incoming documents are converted through this contract
/// at the boundary — anything that does not fit is a store error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$collectionId", default)]
    pub collection_id: String,
    #[serde(rename = "$createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "$updatedAt")]
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub activity_kind: String,
    pub guest_count: i64,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: String,
    #[serde(default)]
    pub map_url: Option<String>,
}

/// Envelope of a collection listing response.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentsPage {
    #[serde(default)]
    pub total: u64,
    pub documents: Vec<EventRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_document() -> serde_json::Value {
        json!({
            "$id": "evt_01",
            "$collectionId": "events",
            "$createdAt": "2026-03-01T09:30:00+00:00",
            "$updatedAt": "2026-03-01T09:30:00+00:00",
            "$permissions": [],
            "name": "Saturday Morning Trek",
            "activity_kind": "hiking",
            "guest_count": 4,
            "payment_method": "free",
            "description": "A walk",
            "start_time": "2026-03-07T08:00:00+00:00",
            "end_time": "2026-03-07T11:00:00+00:00",
            "location": "Park",
            "map_url": null
        })
    }

    #[test]
    fn record_converts_from_a_store_document() {
        let record: EventRecord = serde_json::from_value(sample_document()).unwrap();
        assert_eq!(record.id, "evt_01");
        assert_eq!(record.collection_id, "events");
        assert_eq!(record.payment_method, PaymentMethod::Free);
        assert!(record.map_url.is_none());
        assert!(record.end_time > record.start_time);
    }

    #[test]
    fn malformed_documents_are_rejected() {
        let mut doc = sample_document();
        doc["start_time"] = json!("not-a-timestamp");
        assert!(serde_json::from_value::<EventRecord>(doc).is_err());
    }

    #[test]
    fn listing_envelope_preserves_document_order() {
        let mut second = sample_document();
        second["$id"] = json!("evt_02");
        let page: DocumentsPage = serde_json::from_value(json!({
            "total": 2,
            "documents": [sample_document(), second],
        }))
        .unwrap();
        let ids: Vec<&str> = page.documents.iter().map(|doc| doc.id.as_str()).collect();
        assert_eq!(ids, ["evt_01", "evt_02"]);
    }
}
