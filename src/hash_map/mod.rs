//! Separately chained hash table
//!
//! - `Hashtable`: chained buckets over a node arena, prime-sized growth
//!   driven by a load limit
//! - `next_prime` / `is_prime`: the capacity search used on growth
//! - `TableStats`: occupancy snapshot

mod hashtable;
mod primes;
mod stats;

pub use hashtable::{
    Chain, Hashtable, Iter, Keys, Values, ValuesMut, DEFAULT_BUCKET_SIZE, DEFAULT_LOAD_LIMIT,
};
pub use primes::{is_prime, next_prime};
pub use stats::TableStats;

#[cfg(test)]
mod tests {
    use super::hashtable::fold_hash;
    use super::*;

    #[test]
    fn test_module_exports() {
        let table = Hashtable::<i32, String>::new();
        assert_eq!(table.bucket_size(), DEFAULT_BUCKET_SIZE);

        assert_eq!(next_prime(2 * DEFAULT_BUCKET_SIZE), Some(4099));
        assert!(!is_prime(DEFAULT_BUCKET_SIZE));

        let stats: TableStats = table.stats();
        assert_eq!(stats.len, 0);
        assert_eq!(stats.load_limit, DEFAULT_LOAD_LIMIT);
    }

    #[test]
    fn test_example_scenario() {
        // 3 and 8 share slot 3 under five slots
        assert_eq!(fold_hash(3, 5), fold_hash(8, 5));

        let mut table = Hashtable::<u64, &str>::with_capacity_and_load_limit(5, 1.0).unwrap();
        let slot = table.slot_of(&0u64);
        let mut keys = (1u64..).filter(|k| table.slot_of(k) == slot);
        let first = keys.next().unwrap();
        let second = keys.next().unwrap();

        table.put(first, "first");
        table.put(second, "second");
        assert_eq!(table.get(&first), Some(&"first"));
        assert_eq!(table.get(&second), Some(&"second"));

        // `second` went in last, so it heads the chain
        assert_eq!(table.chain(slot).next().map(|(k, _)| *k), Some(second));
        assert_eq!(table.remove(&second), Some("second"));
        assert_eq!(table.get(&first), Some(&"first"));

        assert_eq!(table.remove(&first), Some("first"));
        assert!(table.is_empty());
        assert_eq!(table.remove(&first), None);
        assert_eq!(table.bucket_size(), 5);
    }
}
