//! O(N) strategies that look customers up in a key → preference mapping.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::dataset::Dataset;
use crate::error::{JoinError, JoinResult};
use crate::model::{CustomerAggregate, CustomerPreference};

/// Borrowing counterpart of [`crate::dataset::build_preference_map`].
pub fn index_preferences(preferences: &[CustomerPreference]) -> JoinResult<FxHashMap<i64, &CustomerPreference>> {
    let mut index = FxHashMap::with_capacity_and_hasher(preferences.len(), Default::default());
    for preference in preferences {
        match index.entry(preference.customer_id) {
            Entry::Occupied(_) => {
                return Err(JoinError::DuplicateKey {
                    customer_id: preference.customer_id,
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(preference);
            }
        }
    }
    trace!(entries = index.len(), "indexed preferences");
    Ok(index)
}

pub fn dict_created(dataset: &Dataset) -> JoinResult<Vec<CustomerAggregate<'_>>> {
    let index = index_preferences(dataset.preferences())?;
    dataset
        .customers()
        .iter()
        .map(|customer| {
            let preference = index
                .get(&customer.id)
                .copied()
                .ok_or(JoinError::KeyNotFound { customer_id: customer.id })?;
            Ok(CustomerAggregate::new(customer, Some(preference)))
        })
        .collect()
}

pub fn dict_on_the_fly(dataset: &Dataset) -> JoinResult<Vec<CustomerAggregate<'_>>> {
    let map = dataset.preference_map();
    dataset
        .customers()
        .iter()
        .map(|customer| {
            let preference = map
                .get(&customer.id)
                .ok_or(JoinError::KeyNotFound { customer_id: customer.id })?;
            Ok(CustomerAggregate::new(customer, Some(preference)))
        })
        .collect()
}

/// Two explicit passes: fill a pre-sized map, then look up every customer.
/// Customers without a preference get `None`.
pub fn manual_iteration(dataset: &Dataset) -> JoinResult<Vec<CustomerAggregate<'_>>> {
    let by_customer = presized_preference_map(dataset.preferences())?;

    let customers = dataset.customers();
    let mut aggregates = Vec::with_capacity(customers.len());
    for customer in customers {
        let preference = by_customer.get(&customer.id).copied();
        aggregates.push(CustomerAggregate::new(customer, preference));
    }
    Ok(aggregates)
}

/// First pass of [`manual_iteration`]: a map sized up front, filled by plain
/// inserts. A repeated customer id is an error.
pub fn presized_preference_map(preferences: &[CustomerPreference]) -> JoinResult<FxHashMap<i64, &CustomerPreference>> {
    let mut by_customer = FxHashMap::with_capacity_and_hasher(preferences.len(), Default::default());
    for preference in preferences {
        if by_customer.insert(preference.customer_id, preference).is_some() {
            return Err(JoinError::DuplicateKey {
                customer_id: preference.customer_id,
            });
        }
    }
    Ok(by_customer)
}
