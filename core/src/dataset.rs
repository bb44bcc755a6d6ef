//! Deterministic test data for the join strategies.

use std::collections::hash_map::Entry;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{JoinError, JoinResult};
use crate::model::{Customer, CustomerPreference};

/// Preference lookup keyed by customer id.
pub type PreferenceMap = FxHashMap<i64, CustomerPreference>;

/// Customers, their preferences and the precomputed mapping for one scale.
///
/// Shared read-only by every strategy invocation at that scale.
#[derive(Debug, Clone)]
pub struct Dataset {
    customers: Vec<Customer>,
    preferences: Vec<CustomerPreference>,
    preference_map: PreferenceMap,
}

impl Dataset {
    /// Builds `scale` customers and exactly one preference per customer id.
    pub fn generate(scale: usize) -> Self {
        let customers: Vec<Customer> = (0..scale)
            .map(|i| Customer {
                id: i as i64,
                name: customer_name(i as i64),
            })
            .collect();
        let preferences: Vec<CustomerPreference> = (0..scale)
            .map(|i| CustomerPreference {
                customer_id: i as i64,
                total: i as i64,
            })
            .collect();
        // ids are 0..scale, so every key is unique
        let preference_map: PreferenceMap = preferences.iter().map(|p| (p.customer_id, *p)).collect();
        debug!(scale, "generated join dataset");
        Self {
            customers,
            preferences,
            preference_map,
        }
    }

    /// Builds a dataset from arbitrary collections. Preferences must not repeat
    /// a customer id; customers without a preference are allowed.
    pub fn from_parts(customers: Vec<Customer>, preferences: Vec<CustomerPreference>) -> JoinResult<Self> {
        let preference_map = build_preference_map(&preferences)?;
        debug!(
            customers = customers.len(),
            preferences = preferences.len(),
            "assembled join dataset from parts"
        );
        Ok(Self {
            customers,
            preferences,
            preference_map,
        })
    }

    /// Number of rows every strategy is expected to produce.
    pub fn scale(&self) -> usize {
        self.customers.len()
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn preferences(&self) -> &[CustomerPreference] {
        &self.preferences
    }

    pub fn preference_map(&self) -> &PreferenceMap {
        &self.preference_map
    }
}

pub fn customer_name(id: i64) -> Arc<str> {
    Arc::from(format!("Name ${}", id))
}

/// Strict mapping construction: a repeated customer id is an error.
pub fn build_preference_map(preferences: &[CustomerPreference]) -> JoinResult<PreferenceMap> {
    let mut map = PreferenceMap::with_capacity_and_hasher(preferences.len(), Default::default());
    for preference in preferences {
        match map.entry(preference.customer_id) {
            Entry::Occupied(_) => {
                return Err(JoinError::DuplicateKey {
                    customer_id: preference.customer_id,
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(*preference);
            }
        }
    }
    Ok(map)
}

/// Parses a dataset scale from a command-line argument.
pub fn parse_scale(raw: &str) -> JoinResult<usize> {
    let trimmed = raw.trim();
    trimmed.parse::<usize>().map_err(|err| {
        let reason = if trimmed.parse::<i64>().is_ok() {
            "scale must not be negative".to_string()
        } else {
            err.to_string()
        };
        JoinError::InvalidScale {
            input: raw.to_string(),
            reason,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_builds_matching_keys() {
        let dataset = Dataset::generate(4);
        assert_eq!(dataset.scale(), 4);
        let ids: Vec<i64> = dataset.customers().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(&*dataset.customers()[2].name, "Name $2");
        for preference in dataset.preferences() {
            assert_eq!(preference.total, preference.customer_id);
            assert_eq!(dataset.preference_map().get(&preference.customer_id), Some(preference));
        }
        assert_eq!(dataset.preference_map().len(), 4);
    }

    #[test]
    fn generate_zero_is_empty() {
        let dataset = Dataset::generate(0);
        assert_eq!(dataset.scale(), 0);
        assert!(dataset.customers().is_empty());
        assert!(dataset.preferences().is_empty());
        assert!(dataset.preference_map().is_empty());
    }

    #[test]
    fn from_parts_rejects_duplicate_preferences() {
        let customers = vec![Customer {
            id: 1,
            name: customer_name(1),
        }];
        let preferences = vec![
            CustomerPreference { customer_id: 1, total: 1 },
            CustomerPreference { customer_id: 1, total: 2 },
        ];
        let err = Dataset::from_parts(customers, preferences).unwrap_err();
        assert_eq!(err, JoinError::DuplicateKey { customer_id: 1 });
    }

    #[test]
    fn from_parts_allows_missing_preferences() {
        let customers = (0..3)
            .map(|id| Customer {
                id,
                name: customer_name(id),
            })
            .collect();
        let preferences = vec![CustomerPreference { customer_id: 0, total: 5 }];
        let dataset = Dataset::from_parts(customers, preferences).expect("valid parts");
        assert_eq!(dataset.scale(), 3);
        assert_eq!(dataset.preference_map().len(), 1);
    }

    #[test]
    fn parse_scale_accepts_integers() {
        assert_eq!(parse_scale("1000").unwrap(), 1000);
        assert_eq!(parse_scale(" 7 ").unwrap(), 7);
        assert_eq!(parse_scale("0").unwrap(), 0);
    }

    #[test]
    fn parse_scale_rejects_garbage() {
        match parse_scale("ten") {
            Err(JoinError::InvalidScale { input, .. }) => assert_eq!(input, "ten"),
            other => panic!("expected InvalidScale, got {:?}", other),
        }
        match parse_scale("-3") {
            Err(JoinError::InvalidScale { reason, .. }) => assert!(reason.contains("negative")),
            other => panic!("expected InvalidScale, got {:?}", other),
        }
    }
}
