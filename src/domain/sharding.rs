//! Shard selection policy.
//!
//! Shard assignment is a pure function of the owner id, never of the short
//! code. Codes therefore carry no shard hint, which is why code-keyed reads
//! fan out across all shards (see [`crate::application::router::ShardRouter`]).

/// Maps an owner id to a shard index.
///
/// Implementations must be deterministic and total over all integers:
/// repeated calls with the same owner id always select the same shard, and
/// the returned index is always within `0..shard_count`.
///
/// The policy is pluggable (e.g., consistent hashing) without changing the
/// router's callers.
pub trait ShardPolicy: Send + Sync {
    fn shard_for(&self, owner_id: i64, shard_count: usize) -> usize;
}

/// Current policy: parity of the owner id over two shards.
///
/// Even owner ids map to shard B (index 1), odd owner ids to shard A
/// (index 0). Degenerates to shard 0 when fewer than two shards are
/// configured so the mapping stays total.
pub struct ParityPolicy;

impl ShardPolicy for ParityPolicy {
    fn shard_for(&self, owner_id: i64, shard_count: usize) -> usize {
        if shard_count < 2 {
            return 0;
        }

        if owner_id.rem_euclid(2) == 0 { 1 } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity_even_owner_maps_to_shard_b() {
        let policy = ParityPolicy;

        assert_eq!(policy.shard_for(4, 2), 1);
        assert_eq!(policy.shard_for(0, 2), 1);
        assert_eq!(policy.shard_for(1024, 2), 1);
    }

    #[test]
    fn test_parity_odd_owner_maps_to_shard_a() {
        let policy = ParityPolicy;

        assert_eq!(policy.shard_for(1, 2), 0);
        assert_eq!(policy.shard_for(7, 2), 0);
    }

    #[test]
    fn test_parity_total_over_negative_ids() {
        let policy = ParityPolicy;

        assert_eq!(policy.shard_for(-2, 2), 1);
        assert_eq!(policy.shard_for(-3, 2), 0);
        assert_eq!(policy.shard_for(i64::MIN, 2), 1);
    }

    #[test]
    fn test_parity_is_deterministic() {
        let policy = ParityPolicy;

        for owner_id in [-5i64, 0, 1, 4, 99, i64::MAX] {
            let first = policy.shard_for(owner_id, 2);
            for _ in 0..10 {
                assert_eq!(policy.shard_for(owner_id, 2), first);
            }
        }
    }

    #[test]
    fn test_parity_single_shard_degenerates_to_zero() {
        let policy = ParityPolicy;

        assert_eq!(policy.shard_for(4, 1), 0);
        assert_eq!(policy.shard_for(5, 1), 0);
    }
}
