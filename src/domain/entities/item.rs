//! Item records: sub-items registered through the shop API, grouped into
//! summaries for the panel's item listing.

use serde::{Deserialize, Serialize};

/// A single registered sub-item: a type plus up to five numeric
/// dimensions and an ordered list of image ids.
///
/// Serialized shape matches the panel's `loadItems` contract:
/// `{"type": …, "d1": …, …, "image_list": […]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubItem {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d3: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d4: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d5: Option<f64>,
    pub image_list: Vec<String>,
}

/// One item of a token's listing: the (item_id, color, size) key and the
/// sub-items registered under it, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub item_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    pub items: Vec<SubItem>,
}

/// Input for registering a sub-item via `POST /update`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubItem {
    pub token: String,
    pub item_id: String,
    pub color: String,
    pub size: String,
    pub kind: String,
    pub dims: [Option<f64>; 5],
    pub image_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_item_serializes_kind_as_type() {
        let sub = SubItem {
            kind: "front".to_string(),
            d1: Some(1.5),
            d2: None,
            d3: None,
            d4: None,
            d5: None,
            image_list: vec!["aaa".to_string(), "bbb".to_string()],
        };

        let json = serde_json::to_value(&sub).unwrap();
        assert_eq!(json["type"], "front");
        assert_eq!(json["d1"], 1.5);
        assert!(json.get("d2").is_none());
        assert_eq!(json["image_list"][1], "bbb");
    }

    #[test]
    fn test_summary_omits_missing_color_and_size() {
        let summary = ItemSummary {
            item_id: "sku-1".to_string(),
            color: None,
            size: Some("M".to_string()),
            items: vec![],
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("color").is_none());
        assert_eq!(json["size"], "M");
        assert_eq!(json["items"], serde_json::json!([]));
    }
}
