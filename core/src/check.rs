use crate::error::{JoinError, JoinResult};
use crate::model::CustomerAggregate;

/// Postcondition applied after every run: the output must have exactly
/// `expected` rows. Row contents are not inspected.
pub fn check_size(aggregates: &[CustomerAggregate<'_>], expected: usize) -> JoinResult<()> {
    if aggregates.len() != expected {
        return Err(JoinError::SizeMismatch {
            expected,
            actual: aggregates.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::strategy::StrategyKind;

    #[test]
    fn matching_size_passes() {
        let dataset = Dataset::generate(5);
        let aggregates = StrategyKind::ManualIteration.run(&dataset).unwrap();
        assert!(check_size(&aggregates, 5).is_ok());
    }

    #[test]
    fn wrong_size_is_reported() {
        let dataset = Dataset::generate(5);
        let aggregates = StrategyKind::Join.run(&dataset).unwrap();
        let err = check_size(&aggregates[..2], 5).unwrap_err();
        assert_eq!(err, JoinError::SizeMismatch { expected: 5, actual: 2 });
        assert!(err.to_string().contains("right size"));
    }
}
