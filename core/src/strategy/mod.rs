//! The eight join strategies under comparison.
//!
//! Every strategy shares one signature: it reads a [`Dataset`] and returns a
//! freshly allocated list of aggregates in customer order. Runners iterate
//! [`StrategyKind::ALL`] instead of discovering strategies dynamically.

pub mod hash_join;
pub mod mapping;
pub mod scan;


use std::fmt;

use crate::dataset::Dataset;
use crate::error::JoinResult;
use crate::model::CustomerAggregate;

pub type StrategyFn = for<'a> fn(&'a Dataset) -> JoinResult<Vec<CustomerAggregate<'a>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Complexity {
    Linear,
    Quadratic,
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Complexity::Linear => write!(f, "O(N)"),
            Complexity::Quadratic => write!(f, "O(N²)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    ForLoopLookup,
    ForEachLoopLookup,
    SelectLookup,
    Join,
    QueryJoin,
    DictCreated,
    DictOnTheFly,
    ManualIteration,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 8] = [
        StrategyKind::ForLoopLookup,
        StrategyKind::ForEachLoopLookup,
        StrategyKind::SelectLookup,
        StrategyKind::Join,
        StrategyKind::QueryJoin,
        StrategyKind::DictCreated,
        StrategyKind::DictOnTheFly,
        StrategyKind::ManualIteration,
    ];

    /// Stable identifier used for bench case names and reports.
    pub fn key(self) -> &'static str {
        match self {
            StrategyKind::ForLoopLookup => "for_loop_lookup",
            StrategyKind::ForEachLoopLookup => "for_each_loop_lookup",
            StrategyKind::SelectLookup => "select_lookup",
            StrategyKind::Join => "join",
            StrategyKind::QueryJoin => "query_join",
            StrategyKind::DictCreated => "dict_created",
            StrategyKind::DictOnTheFly => "dict_on_the_fly",
            StrategyKind::ManualIteration => "manual_iteration",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            StrategyKind::ForLoopLookup => "Index loop with linear lookup",
            StrategyKind::ForEachLoopLookup => "For-each loop with linear lookup",
            StrategyKind::SelectLookup => "Mapped iterator with linear lookup",
            StrategyKind::Join => "Hash equi-join",
            StrategyKind::QueryJoin => "Grouped lookup flat_map",
            StrategyKind::DictCreated => "Map built per call",
            StrategyKind::DictOnTheFly => "Precomputed map",
            StrategyKind::ManualIteration => "Manual two-pass map",
        }
    }

    pub fn complexity(self) -> Complexity {
        match self {
            StrategyKind::ForLoopLookup | StrategyKind::ForEachLoopLookup | StrategyKind::SelectLookup => {
                Complexity::Quadratic
            }
            _ => Complexity::Linear,
        }
    }

    pub fn from_key(key: &str) -> Option<StrategyKind> {
        StrategyKind::ALL.into_iter().find(|kind| kind.key() == key)
    }

    pub fn func(self) -> StrategyFn {
        match self {
            StrategyKind::ForLoopLookup => scan::for_loop_lookup,
            StrategyKind::ForEachLoopLookup => scan::for_each_loop_lookup,
            StrategyKind::SelectLookup => scan::select_lookup,
            StrategyKind::Join => hash_join::join,
            StrategyKind::QueryJoin => hash_join::query_join,
            StrategyKind::DictCreated => mapping::dict_created,
            StrategyKind::DictOnTheFly => mapping::dict_on_the_fly,
            StrategyKind::ManualIteration => mapping::manual_iteration,
        }
    }

    pub fn run(self, dataset: &Dataset) -> JoinResult<Vec<CustomerAggregate<'_>>> {
        (self.func())(dataset)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
