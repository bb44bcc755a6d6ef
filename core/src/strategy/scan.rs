//! O(N²) strategies: every customer scans the whole preference slice.

use crate::dataset::Dataset;
use crate::error::{JoinError, JoinResult};
use crate::model::{CustomerAggregate, CustomerPreference};

/// Finds the only preference for `customer_id`, or `None`.
///
/// The whole slice is always visited so that a second match can be reported.
pub fn single_or_none(
    preferences: &[CustomerPreference],
    customer_id: i64,
) -> JoinResult<Option<&CustomerPreference>> {
    let mut found = None;
    let mut matches = 0usize;
    for preference in preferences {
        if preference.customer_id == customer_id {
            matches += 1;
            if found.is_none() {
                found = Some(preference);
            }
        }
    }
    if matches > 1 {
        return Err(JoinError::AmbiguousMatch { customer_id, matches });
    }
    Ok(found)
}

// Index based iteration is the variant being measured.
#[allow(clippy::needless_range_loop)]
pub fn for_loop_lookup(dataset: &Dataset) -> JoinResult<Vec<CustomerAggregate<'_>>> {
    let customers = dataset.customers();
    let preferences = dataset.preferences();
    let mut aggregates = Vec::new();
    for i in 0..customers.len() {
        let customer = &customers[i];
        let preference = single_or_none(preferences, customer.id)?;
        aggregates.push(CustomerAggregate::new(customer, preference));
    }
    Ok(aggregates)
}

pub fn for_each_loop_lookup(dataset: &Dataset) -> JoinResult<Vec<CustomerAggregate<'_>>> {
    let preferences = dataset.preferences();
    let mut aggregates = Vec::new();
    for customer in dataset.customers() {
        let preference = single_or_none(preferences, customer.id)?;
        aggregates.push(CustomerAggregate::new(customer, preference));
    }
    Ok(aggregates)
}

pub fn select_lookup(dataset: &Dataset) -> JoinResult<Vec<CustomerAggregate<'_>>> {
    let preferences = dataset.preferences();
    dataset
        .customers()
        .iter()
        .map(|customer| {
            let preference = single_or_none(preferences, customer.id)?;
            Ok(CustomerAggregate::new(customer, preference))
        })
        .collect()
}
