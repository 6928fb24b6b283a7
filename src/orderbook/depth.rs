//! Depth-weighted effective rate computation
//!
//! Walks a level ladder best-to-worst, consuming liquidity until a target
//! fill size is reached. A book with insufficient depth yields no rate at
//! all rather than a rate computed from a partial fill.

use super::BookLevel;
use rust_decimal::Decimal;

/// Compute the depth-weighted effective rate for filling `target` base units
/// against `levels`, ordered best-to-worst from the taker's perspective.
///
/// Each level contributes `min(remaining, level.size)` units at its price.
/// Returns `None` when the cumulative size of `levels` cannot cover
/// `target`: pricing a partial fill as `cost / target` would understate the
/// true cost, so callers get no rate instead. A non-positive `target` is a
/// caller contract violation and is also treated as unfillable.
pub fn effective_rate(levels: &[BookLevel], target: Decimal) -> Option<Decimal> {
    if target <= Decimal::ZERO {
        return None;
    }

    let mut filled = Decimal::ZERO;
    let mut cost = Decimal::ZERO;

    for level in levels {
        if level.size <= Decimal::ZERO {
            continue;
        }

        let consumed = (target - filled).min(level.size);
        cost += level.price * consumed;
        filled += consumed;

        if filled >= target {
            return Some(cost / target);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn level(price: Decimal, size: Decimal) -> BookLevel {
        BookLevel { price, size }
    }

    #[test]
    fn test_fill_across_two_levels() {
        // 600 @ 5.40 + 400 @ 5.41 = 3240 + 2164 = 5404 over 1000 units
        let levels = vec![level(dec!(5.40), dec!(600)), level(dec!(5.41), dec!(500))];
        assert_eq!(effective_rate(&levels, dec!(1000)), Some(dec!(5.404)));
    }

    #[test]
    fn test_insufficient_depth_returns_none() {
        let levels = vec![level(dec!(5.40), dec!(600))];
        assert_eq!(effective_rate(&levels, dec!(1000)), None);
    }

    #[test]
    fn test_exact_fill_at_boundary() {
        let levels = vec![level(dec!(5.40), dec!(600)), level(dec!(5.41), dec!(400))];
        assert_eq!(effective_rate(&levels, dec!(1000)), Some(dec!(5.404)));
    }

    #[test]
    fn test_single_level_covers_target() {
        let levels = vec![level(dec!(5.40), dec!(5000))];
        assert_eq!(effective_rate(&levels, dec!(1000)), Some(dec!(5.40)));
    }

    #[test]
    fn test_empty_book_is_unfillable() {
        assert_eq!(effective_rate(&[], dec!(1000)), None);
    }

    #[test]
    fn test_zero_size_levels_are_skipped() {
        let with_zeros = vec![
            level(dec!(5.39), dec!(0)),
            level(dec!(5.40), dec!(600)),
            level(dec!(5.405), dec!(0)),
            level(dec!(5.41), dec!(500)),
            level(dec!(5.42), dec!(0)),
        ];
        let without_zeros = vec![level(dec!(5.40), dec!(600)), level(dec!(5.41), dec!(500))];

        assert_eq!(
            effective_rate(&with_zeros, dec!(1000)),
            effective_rate(&without_zeros, dec!(1000))
        );
    }

    #[test]
    fn test_only_zero_size_levels_is_unfillable() {
        let levels = vec![level(dec!(5.40), dec!(0)), level(dec!(5.41), dec!(0))];
        assert_eq!(effective_rate(&levels, dec!(100)), None);
    }

    #[test]
    fn test_non_positive_target_yields_none() {
        let levels = vec![level(dec!(5.40), dec!(600))];
        assert_eq!(effective_rate(&levels, Decimal::ZERO), None);
        assert_eq!(effective_rate(&levels, dec!(-10)), None);
    }

    #[test]
    fn test_cost_is_exact_sum_of_consumed_levels() {
        let levels = vec![
            level(dec!(1.00), dec!(100)),
            level(dec!(2.00), dec!(100)),
            level(dec!(4.00), dec!(100)),
        ];
        // 100 @ 1 + 100 @ 2 + 50 @ 4 = 100 + 200 + 200 = 500 over 250 units
        assert_eq!(effective_rate(&levels, dec!(250)), Some(dec!(2)));
    }

    #[test]
    fn test_rate_worsens_with_larger_target() {
        let levels = vec![
            level(dec!(5.40), dec!(600)),
            level(dec!(5.41), dec!(500)),
            level(dec!(5.45), dec!(2000)),
        ];
        let small = effective_rate(&levels, dec!(500)).unwrap();
        let large = effective_rate(&levels, dec!(3000)).unwrap();
        assert!(small < large);
    }
}
