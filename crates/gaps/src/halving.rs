/// Thresholds below this many meters are not worth a gap.
pub const MIN_THRESHOLD_M: f64 = 1.0;

/// Upper bound on halving steps, reached only for absurd thresholds.
pub const MAX_HALVINGS: u32 = 64;

/// Halves `threshold` until it is no longer larger than `capacity`.
///
/// Returns `None` once the threshold falls below [`MIN_THRESHOLD_M`] or after
/// [`MAX_HALVINGS`] steps without fitting.
pub fn fit_threshold(threshold: f64, capacity: f64) -> Option<f64> {
    if !threshold.is_finite() || !capacity.is_finite() {
        return None;
    }
    let mut current = threshold;
    let mut halvings = 0;
    while current > capacity {
        current *= 0.5;
        halvings += 1;
        log::trace!("gap threshold halved to {:.1} m", current);
        if current < MIN_THRESHOLD_M || halvings >= MAX_HALVINGS {
            return None;
        }
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitting_threshold_is_unchanged() {
        assert_eq!(fit_threshold(50_000.0, 80_000.0), Some(50_000.0));
        assert_eq!(fit_threshold(80_000.0, 80_000.0), Some(80_000.0));
    }

    #[test]
    fn halves_until_it_fits() {
        assert_eq!(fit_threshold(200_000.0, 60_000.0), Some(50_000.0));
        assert_eq!(fit_threshold(100_000.0, 99_999.0), Some(50_000.0));
    }

    #[test]
    fn gives_up_below_floor() {
        assert_eq!(fit_threshold(100_000.0, 0.0), None);
        assert_eq!(fit_threshold(3.0, 0.9), None);
    }

    #[test]
    fn gives_up_on_non_finite_input() {
        assert_eq!(fit_threshold(f64::INFINITY, 10.0), None);
        assert_eq!(fit_threshold(10.0, f64::NAN), None);
    }

    #[test]
    fn zero_threshold_always_fits() {
        assert_eq!(fit_threshold(0.0, 0.0), Some(0.0));
    }
}
