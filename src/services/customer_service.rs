// src/services/customer_service.rs

use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, params::parse_id},
    db::CustomerRepository,
    models::{
        bid::Bid,
        customer::{Customer, CustomerPatch, Note, ScheduleAppointmentPayload},
        location::{Appointment, Location},
    },
};

// =============================================================================
//  LOOKUPS (within the selected location's snapshot)
// =============================================================================

/// Finds the customer named by a `customerId` route parameter.
pub fn find_customer<'a>(location: &'a Location, raw_id: &str) -> Option<&'a Customer> {
    let id = parse_id(raw_id)?;
    location.customers.iter().find(|c| c.id == id)
}

pub fn find_bid<'a>(location: &'a Location, raw_id: &str) -> Option<&'a Bid> {
    let id = parse_id(raw_id)?;
    location
        .customers
        .iter()
        .flat_map(|c| c.bids.iter())
        .find(|b| b.id == id)
}

// =============================================================================
//  WRITES
// =============================================================================

// Writes go straight to the backend. Nothing cached is touched here; callers
// refetch the session snapshot to observe the change.
#[derive(Clone)]
pub struct CustomerService {
    repo: CustomerRepository,
}

impl CustomerService {
    pub fn new(repo: CustomerRepository) -> Self {
        Self { repo }
    }

    pub async fn update_customer(&self, id: i64, patch: &CustomerPatch) -> Result<(), AppError> {
        patch.validate()?;
        self.repo.update_customer(id, patch).await?;
        tracing::info!("✏️ Customer {} updated", id);
        Ok(())
    }

    pub async fn add_note(&self, customer_id: i64, author_id: Uuid, body: &str) -> Result<Note, AppError> {
        self.repo.insert_note(customer_id, author_id, body.trim()).await
    }

    pub async fn schedule_appointment(
        &self,
        customer_id: i64,
        payload: &ScheduleAppointmentPayload,
    ) -> Result<Appointment, AppError> {
        payload.validate()?;
        self.repo
            .insert_appointment(customer_id, payload.closer_id, payload.start_time, payload.end_time)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> Location {
        Location {
            id: 1,
            customers: vec![
                Customer { id: 10, first_name: Some("Ana".into()), ..Default::default() },
                Customer {
                    id: 11,
                    bids: vec![Bid { id: 5, customer_id: 11, ..Default::default() }],
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn finds_customer_by_route_param() {
        let location = location();
        let customer = find_customer(&location, "10").unwrap();
        assert_eq!(customer.first_name.as_deref(), Some("Ana"));
    }

    #[test]
    fn lookup_misses_are_none() {
        let location = location();
        assert!(find_customer(&location, "12").is_none());
        assert!(find_customer(&location, "ten").is_none());
        assert!(find_customer(&location, "").is_none());
        assert!(find_customer(&Location::default(), "10").is_none());
    }

    #[test]
    fn finds_bid_across_customers() {
        let location = location();
        assert_eq!(find_bid(&location, "5").unwrap().customer_id, 11);
        assert!(find_bid(&location, "6").is_none());
    }
}
