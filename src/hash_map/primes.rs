//! Prime search used to size the slot array on growth.

/// Check whether `value` is prime by trial division with odd divisors.
pub fn is_prime(value: usize) -> bool {
    if value <= 1 || (value > 2 && value % 2 == 0) {
        return false;
    }
    let mut divisor = 3;
    // `divisor <= value / divisor` is `divisor * divisor <= value` without overflow
    while divisor <= value / divisor {
        if value % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Smallest prime greater than or equal to `value`.
///
/// Returns `None` when no such prime fits in `usize`.
pub fn next_prime(value: usize) -> Option<usize> {
    let mut candidate = value;
    while !is_prime(candidate) {
        candidate = candidate.checked_add(1)?;
    }
    Some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_prime_small_values() {
        let primes: Vec<usize> = (0..50).filter(|&n| is_prime(n)).collect();
        assert_eq!(
            primes,
            vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47]
        );
    }

    #[test]
    fn test_is_prime_squares_of_primes() {
        // trial division must include the square root itself
        assert!(!is_prime(9));
        assert!(!is_prime(25));
        assert!(!is_prime(49));
        assert!(!is_prime(2047)); // 23 * 89
        assert!(!is_prime(4097)); // 17 * 241
    }

    #[test]
    fn test_next_prime_samples() {
        assert_eq!(next_prime(0), Some(2));
        assert_eq!(next_prime(1), Some(2));
        assert_eq!(next_prime(2), Some(2));
        assert_eq!(next_prime(4), Some(5));
        assert_eq!(next_prime(2048), Some(2053));
        assert_eq!(next_prime(4094), Some(4099));
    }

    #[test]
    fn test_next_prime_returns_primes_unchanged() {
        for p in [3usize, 5, 2053, 4099, 8209, 1_000_003] {
            assert_eq!(next_prime(p), Some(p));
        }
    }

    #[test]
    fn test_next_prime_is_smallest() {
        for n in 0..2000usize {
            let p = next_prime(n).unwrap();
            assert!(p >= n);
            assert!(is_prime(p));
            assert!((n..p).all(|m| !is_prime(m)));
        }
    }

    #[test]
    fn test_next_prime_overflow() {
        // usize::MAX is odd but never prime on 32/64-bit targets (2^k - 1 with composite k)
        assert_eq!(next_prime(usize::MAX), None);
    }
}
