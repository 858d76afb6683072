// src/services/bid_checklist.rs

use crate::models::{
    bid::{Bid, MEDIA_TYPES},
    dashboard::RequirementCheck,
};

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// What a bid still needs before it can be sent, sorted by label.
///
/// HOA contact checks only appear when the bid needs HOA approval, and the
/// rebate company only when a water rebate applies.
pub fn bid_checklist(bid: &Bid) -> Vec<RequirementCheck> {
    let mut checks = vec![
        RequirementCheck { label: "Name", passed: present(&bid.name) },
        RequirementCheck { label: "Products", passed: !bid.products.is_empty() },
    ];

    if bid.hoa_approval_required {
        checks.extend([
            RequirementCheck { label: "HOA name", passed: present(&bid.hoa_name) },
            RequirementCheck { label: "HOA phone", passed: present(&bid.hoa_phone) },
            RequirementCheck { label: "HOA email", passed: present(&bid.hoa_email) },
        ]);
    }

    if bid.has_water_rebate {
        checks.push(RequirementCheck {
            label: "Water rebate company",
            passed: present(&bid.water_rebate_company),
        });
    }

    checks.extend(
        MEDIA_TYPES
            .iter()
            .filter(|rule| rule.required)
            .map(|rule| RequirementCheck {
                label: rule.label,
                passed: bid.has_media(rule.key),
            }),
    );

    checks.sort_by_key(|check| check.label.to_lowercase());
    checks
}

pub fn is_complete(checks: &[RequirementCheck]) -> bool {
    checks.iter().all(|c| c.passed)
}
