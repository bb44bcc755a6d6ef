//! Equi-join strategies built on a grouped lookup of the inner side.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::dataset::Dataset;
use crate::error::JoinResult;
use crate::model::CustomerAggregate;

/// Groups `items` by key, keeping input order within each group.
pub fn to_lookup<T, K, F>(items: &[T], key: F) -> FxHashMap<K, Vec<&T>>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut lookup: FxHashMap<K, Vec<&T>> = FxHashMap::default();
    for item in items {
        lookup.entry(key(item)).or_default().push(item);
    }
    lookup
}

/// Inner equi-join of `outer` against `inner`.
///
/// Emits one row per matching pair, in outer order and then inner order.
/// Outer items without a match produce nothing.
pub fn hash_join<'o, 'i, O, I, K, FO, FI, R, FR>(
    outer: &'o [O],
    inner: &'i [I],
    outer_key: FO,
    inner_key: FI,
    mut result: FR,
) -> Vec<R>
where
    K: Eq + Hash,
    FO: Fn(&O) -> K,
    FI: Fn(&I) -> K,
    FR: FnMut(&'o O, &'i I) -> R,
{
    let lookup = to_lookup(inner, inner_key);
    let mut rows = Vec::new();
    for item in outer {
        if let Some(matches) = lookup.get(&outer_key(item)) {
            for &matched in matches {
                rows.push(result(item, matched));
            }
        }
    }
    rows
}

pub fn join(dataset: &Dataset) -> JoinResult<Vec<CustomerAggregate<'_>>> {
    Ok(hash_join(
        dataset.customers(),
        dataset.preferences(),
        |customer| customer.id,
        |preference| preference.customer_id,
        |customer, preference| CustomerAggregate::new(customer, Some(preference)),
    ))
}

pub fn query_join(dataset: &Dataset) -> JoinResult<Vec<CustomerAggregate<'_>>> {
    let by_customer = to_lookup(dataset.preferences(), |preference| preference.customer_id);
    Ok(dataset
        .customers()
        .iter()
        .flat_map(|customer| {
            by_customer
                .get(&customer.id)
                .into_iter()
                .flatten()
                .map(move |preference| CustomerAggregate::new(customer, Some(*preference)))
        })
        .collect())
}
