//! Prime capacity selection.
//!
//! Both tables only ever hold a prime number of slots. For the open-addressing table this is
//! what makes quadratic probing reach at least half of the slots; for the chaining table it
//! keeps `digest % capacity` from mirroring regularities in the digests.

/// Returns `true` if `n` is prime.
///
/// `0` and `1` are not prime. Odd candidates are checked by trial division up to `√n`.
///
/// # Examples
///
/// ```
/// use primehash::prime::is_prime;
/// assert!(is_prime(2));
/// assert!(is_prime(53));
/// assert!(!is_prime(1));
/// assert!(!is_prime(91));
/// ```
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }
    if n < 2 || n % 2 == 0 {
        return false;
    }

    let mut factor = 3;
    // factor <= n / factor is factor² <= n without the overflow
    while factor <= n / factor {
        if n % factor == 0 {
            return false;
        }
        factor += 2;
    }
    true
}

/// Returns the smallest odd prime that is at least `n`.
///
/// An even `n` is first bumped to `n + 1`, so `next_prime(2) == 3`. Candidates then advance
/// by two until one is prime.
///
/// # Examples
///
/// ```
/// use primehash::prime::next_prime;
/// assert_eq!(next_prime(0), 3);
/// assert_eq!(next_prime(20), 23);
/// assert_eq!(next_prime(53), 53);
/// ```
pub fn next_prime(n: usize) -> usize {
    let mut candidate = if n % 2 == 0 { n + 1 } else { n };
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}

/// Normalizes a capacity requested through `resize_table`: primes are kept as they are
/// (including 2), anything else moves up to [`next_prime`].
pub(crate) fn normalize(n: usize) -> usize {
    if is_prime(n) {
        n
    } else {
        next_prime(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_primes() {
        let primes: Vec<usize> = (0..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn squares_are_composite() {
        for p in [3usize, 5, 7, 11, 101] {
            assert!(!is_prime(p * p));
        }
    }

    #[test]
    fn next_prime_skips_even() {
        assert_eq!(next_prime(1), 3);
        assert_eq!(next_prime(2), 3);
        assert_eq!(next_prime(4), 5);
        assert_eq!(next_prime(24), 29);
        assert_eq!(next_prime(106), 107);
    }

    #[test]
    fn next_prime_is_at_least_input() {
        for n in 0..2000 {
            let p = next_prime(n);
            assert!(p >= n);
            assert!(is_prime(p));
        }
    }

    #[test]
    fn normalize_keeps_two() {
        assert_eq!(normalize(2), 2);
        assert_eq!(normalize(30), 31);
        assert_eq!(normalize(0), 3);
    }
}
