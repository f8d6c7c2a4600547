//! Number-theory predicates
//!
//! Pure functions over signed integers. Divisor searches use trial division
//! bounded by `i <= n / i`, which never overflows for any `i64`.

/// Parity tag, exactly one is emitted per number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    pub const fn of(n: i64) -> Self {
        if n % 2 == 0 {
            Self::Even
        } else {
            Self::Odd
        }
    }
}

/// True when `n` has no divisor in `[2, floor(sqrt(n))]`
pub const fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    let mut i = 2;
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

/// True when `n` equals the sum of its proper divisors
pub fn is_perfect(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    // 1 divides everything >= 2; n itself is excluded
    let target = i128::from(n);
    let mut sum: i128 = 1;
    let mut i = 2;
    while i <= n / i {
        if n % i == 0 {
            sum += i128::from(i);
            let pair = n / i;
            if pair != i {
                sum += i128::from(pair);
            }
            if sum > target {
                return false;
            }
        }
        i += 1;
    }
    sum == target
}

/// True when the digits of `|n|`, each raised to the digit count, sum to `n`.
///
/// Negative numbers never qualify since the sum is non-negative.
pub fn is_armstrong(n: i64) -> bool {
    if n < 0 {
        return false;
    }
    let digits = decimal_digits(n);
    let Ok(len) = u32::try_from(digits.len()) else {
        return false;
    };
    let sum: u128 = digits.iter().map(|&d| u128::from(d).pow(len)).sum();
    sum == u128::from(n.unsigned_abs())
}

/// Sum of the decimal digits of `|n|`
pub fn digit_sum(n: i64) -> u32 {
    decimal_digits(n).iter().map(|&d| u32::from(d)).sum()
}

/// Decimal digits of `|n|`, most significant first
fn decimal_digits(n: i64) -> Vec<u8> {
    let mut rest = n.unsigned_abs();
    if rest == 0 {
        return vec![0];
    }
    let mut digits = Vec::with_capacity(20);
    while rest > 0 {
        #[allow(clippy::cast_possible_truncation)]
        let digit = (rest % 10) as u8;
        digits.push(digit);
        rest /= 10;
    }
    digits.reverse();
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_is_prime(n: i64) -> bool {
        n >= 2 && (2..n).all(|d| n % d != 0)
    }

    #[test]
    fn test_prime_boundaries() {
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(!is_prime(1));
        assert!(!is_prime(0));
        assert!(!is_prime(-5));
        assert!(!is_prime(i64::MIN));
    }

    #[test]
    fn test_prime_matches_naive_search() {
        for n in -10..500 {
            assert_eq!(is_prime(n), naive_is_prime(n), "mismatch for {n}");
        }
    }

    #[test]
    fn test_prime_squares() {
        assert!(!is_prime(4));
        assert!(!is_prime(49));
        assert!(!is_prime(7919 * 7919));
        assert!(is_prime(7919));
    }

    #[test]
    fn test_prime_large() {
        // Largest prime below 2^31
        assert!(is_prime(2_147_483_647));
        assert!(!is_prime(2_147_483_649));
    }

    #[test]
    fn test_perfect() {
        assert!(is_perfect(6));
        assert!(is_perfect(28));
        assert!(is_perfect(496));
        assert!(is_perfect(8128));
        assert!(!is_perfect(10));
        assert!(!is_perfect(1));
        assert!(!is_perfect(0));
        assert!(!is_perfect(-6));
    }

    #[test]
    fn test_perfect_square_divisor_counted_once() {
        // 1 + 2 + 4 + 8 = 15 for 16, root 4 must not be added twice
        assert!(!is_perfect(16));
        assert!(!is_perfect(36));
    }

    #[test]
    fn test_armstrong() {
        assert!(is_armstrong(153));
        assert!(is_armstrong(370));
        assert!(is_armstrong(9474));
        assert!(!is_armstrong(10));
        assert!(!is_armstrong(100));
    }

    #[test]
    fn test_armstrong_single_digits_and_negatives() {
        for n in 0..10 {
            assert!(is_armstrong(n), "{n} should be armstrong");
        }
        assert!(!is_armstrong(-153));
        assert!(!is_armstrong(-1));
        assert!(!is_armstrong(i64::MIN));
        assert!(!is_armstrong(i64::MAX));
    }

    #[test]
    fn test_digit_sum() {
        assert_eq!(digit_sum(123), 6);
        assert_eq!(digit_sum(153), 9);
        assert_eq!(digit_sum(0), 0);
        assert_eq!(digit_sum(-45), 9);
        assert_eq!(digit_sum(i64::MIN), 89);
    }

    #[test]
    fn test_parity() {
        assert_eq!(Parity::of(0), Parity::Even);
        assert_eq!(Parity::of(7), Parity::Odd);
        assert_eq!(Parity::of(-3), Parity::Odd);
        assert_eq!(Parity::of(-4), Parity::Even);
    }
}
