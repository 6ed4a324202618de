//! Request DTOs for the item endpoints.

use serde::Deserialize;

use crate::domain::entities::NewSubItem;

/// `POST /update` form body: one sub-item registration.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub token: String,
    pub id: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub size: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub d1: Option<f64>,
    pub d2: Option<f64>,
    pub d3: Option<f64>,
    pub d4: Option<f64>,
    pub d5: Option<f64>,
    /// Comma-separated image ids, in display order.
    #[serde(default)]
    pub image_ids: String,
}

impl UpdateRequest {
    /// Splits the comma-separated image-id field.
    ///
    /// An empty field yields an empty list (rejected downstream), and
    /// empty segments are dropped so a trailing comma is harmless.
    pub fn image_id_list(&self) -> Vec<String> {
        self.image_ids
            .split(',')
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    /// Converts the request into the domain registration record.
    pub fn into_new_sub_item(self) -> NewSubItem {
        let image_ids = self.image_id_list();
        NewSubItem {
            token: self.token,
            item_id: self.id,
            color: self.color,
            size: self.size,
            kind: self.kind,
            dims: [self.d1, self.d2, self.d3, self.d4, self.d5],
            image_ids,
        }
    }
}

/// `GET /get` query: item lookup key.
#[derive(Debug, Deserialize)]
pub struct GetQuery {
    pub shop_id: String,
    pub id: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub size: String,
}
