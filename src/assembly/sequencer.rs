//! Block ordering
//!
//! Resolves the order in which blocks are processed. Only block positions
//! move; a block's own source, target, and mode are never touched here.

use rand::seq::SliceRandom;
use rand::Rng;

use super::error::{AssemblyError, Result};
use super::request::SequenceMode;

/// Resolve the processing order for `count` blocks.
///
/// Returns input block positions in output order. Manual orders are
/// validated as a bijection over `0..count` and rejected otherwise.
pub fn sequence_blocks<R: Rng>(
    count: usize,
    mode: &SequenceMode,
    rng: &mut R,
) -> Result<Vec<usize>> {
    match mode {
        SequenceMode::Identity => Ok((0..count).collect()),
        SequenceMode::Shuffle => {
            let mut order: Vec<usize> = (0..count).collect();
            order.shuffle(rng);
            Ok(order)
        }
        SequenceMode::Manual(order) => {
            validate_manual_order(order, count)?;
            Ok(order.clone())
        }
    }
}

/// Check that `order` is a bijection over exactly `0..count`
pub fn validate_manual_order(order: &[usize], count: usize) -> Result<()> {
    if order.len() != count {
        return Err(AssemblyError::OrderLengthMismatch {
            expected: count,
            got: order.len(),
        });
    }

    let mut taken = vec![false; count];
    for &position in order {
        if position >= count {
            return Err(AssemblyError::OrderOutOfRange { position, count });
        }
        if taken[position] {
            return Err(AssemblyError::OrderDuplicate { position });
        }
        taken[position] = true;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn identity_keeps_input_order() {
        let mut rng = StdRng::seed_from_u64(0);
        let order = sequence_blocks(4, &SequenceMode::Identity, &mut rng).unwrap();
        assert_eq!(order, [0, 1, 2, 3]);
    }

    #[test]
    fn manual_swap_of_two_blocks() {
        let mut rng = StdRng::seed_from_u64(0);
        let order = sequence_blocks(2, &SequenceMode::Manual(vec![1, 0]), &mut rng).unwrap();
        assert_eq!(order, [1, 0]);
    }

    #[test]
    fn manual_rejects_wrong_length() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = sequence_blocks(3, &SequenceMode::Manual(vec![0, 1]), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            AssemblyError::OrderLengthMismatch { expected: 3, got: 2 }
        ));
    }

    #[test]
    fn manual_rejects_out_of_range() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = sequence_blocks(2, &SequenceMode::Manual(vec![0, 2]), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            AssemblyError::OrderOutOfRange { position: 2, count: 2 }
        ));
    }

    #[test]
    fn manual_rejects_duplicates() {
        let mut rng = StdRng::seed_from_u64(0);
        let err =
            sequence_blocks(3, &SequenceMode::Manual(vec![0, 1, 1]), &mut rng).unwrap_err();
        assert!(matches!(err, AssemblyError::OrderDuplicate { position: 1 }));
    }

    #[test]
    fn shuffle_preserves_the_block_multiset() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut order = sequence_blocks(10, &SequenceMode::Shuffle, &mut rng).unwrap();
        order.sort_unstable();
        assert_eq!(order, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_is_reproducible_per_seed() {
        let mut rng_a = StdRng::seed_from_u64(5);
        let mut rng_b = StdRng::seed_from_u64(5);
        let a = sequence_blocks(8, &SequenceMode::Shuffle, &mut rng_a).unwrap();
        let b = sequence_blocks(8, &SequenceMode::Shuffle, &mut rng_b).unwrap();
        assert_eq!(a, b);
    }
}
