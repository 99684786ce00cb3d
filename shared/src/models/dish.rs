//! Dish Model

use serde::{Deserialize, Serialize};

/// Menu item (catalog entity, owned by the menu surface, referenced by id)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dish {
    pub id: String,
    pub name: String,
    /// Price in currency unit (non-negative)
    pub price: f64,
    pub is_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Dish {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            is_available: true,
            description: None,
            image_url: None,
            category: None,
        }
    }
}
