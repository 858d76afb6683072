// src/models/bid.rs

use serde::{Deserialize, Serialize};

// A proposal prepared for a customer before it becomes a job
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bid {
    pub id: i64,
    pub customer_id: i64,
    pub name: Option<String>,

    #[serde(default)]
    pub hoa_approval_required: bool,
    pub hoa_name: Option<String>,
    pub hoa_phone: Option<String>,
    pub hoa_email: Option<String>,

    #[serde(default)]
    pub has_water_rebate: bool,
    pub water_rebate_company: Option<String>,

    #[serde(default)]
    pub products: Vec<BidProduct>,
    #[serde(default)]
    pub media: Vec<BidMedia>,
}

impl Bid {
    pub fn has_media(&self, media_type: &str) -> bool {
        self.media.iter().any(|m| m.media_type == media_type)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidProduct {
    pub id: i64,
    pub product_id: i64,
    pub units: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidMedia {
    pub id: i64,
    pub media_type: String,
    pub url: String,
}

// Photo/document types a bid can carry
pub struct MediaTypeRule {
    pub key: &'static str,
    pub label: &'static str,
    pub required: bool,
}

pub const MEDIA_TYPES: [MediaTypeRule; 6] = [
    MediaTypeRule { key: "front_of_house", label: "Front of house photo", required: true },
    MediaTypeRule { key: "backyard", label: "Backyard photo", required: true },
    MediaTypeRule { key: "side_yard", label: "Side yard photo", required: true },
    MediaTypeRule { key: "utility_bill", label: "Utility bill", required: true },
    MediaTypeRule { key: "hoa_letter", label: "HOA letter", required: false },
    MediaTypeRule { key: "other", label: "Other", required: false },
];
