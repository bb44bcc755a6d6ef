use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: i64,
    pub name: Arc<str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CustomerPreference {
    pub customer_id: i64,
    pub total: i64,
}

/// A customer paired with the preference that matched its id, if any.
///
/// The name buffer is shared with the source [`Customer`] and the preference
/// borrows from the dataset the strategy ran against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerAggregate<'a> {
    pub customer_id: i64,
    pub name: Arc<str>,
    pub preference: Option<&'a CustomerPreference>,
}

/// Owned projection of an aggregate used to compare strategy outputs.
pub type JoinedRow = (i64, Arc<str>, Option<i64>);

impl<'a> CustomerAggregate<'a> {
    pub fn new(customer: &Customer, preference: Option<&'a CustomerPreference>) -> Self {
        Self {
            customer_id: customer.id,
            name: Arc::clone(&customer.name),
            preference,
        }
    }

    pub fn total(&self) -> Option<i64> {
        self.preference.map(|p| p.total)
    }

    pub fn to_row(&self) -> JoinedRow {
        (self.customer_id, Arc::clone(&self.name), self.total())
    }
}

pub fn to_rows(aggregates: &[CustomerAggregate<'_>]) -> Vec<JoinedRow> {
    aggregates.iter().map(CustomerAggregate::to_row).collect()
}
