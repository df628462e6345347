//! Synthetic field values and partitions.

/// `count` finite values in `[-1000, 1000)`.
pub fn random_f64_values(count: usize) -> Vec<f64> {
    (0..count)
        .map(|_| fastrand::f64() * 2000.0 - 1000.0)
        .collect()
}

/// `count` values in `[0, 1]`, suitable for opacities.
pub fn random_unit_f32_values(count: usize) -> Vec<f32> {
    (0..count).map(|_| fastrand::f32()).collect()
}

/// Splits `total` into `parts` lengths that add up to `total`.
///
/// Zero-length parts are allowed. `parts` must be non-zero unless `total` is
/// zero.
pub fn random_partition(total: usize, parts: usize) -> Vec<usize> {
    if parts == 0 {
        assert_eq!(total, 0, "cannot split {total} values into zero parts");
        return Vec::new();
    }
    let mut cuts: Vec<usize> = (0..parts - 1).map(|_| fastrand::usize(0..=total)).collect();
    cuts.sort_unstable();
    let mut lengths = Vec::with_capacity(parts);
    let mut prev = 0;
    for cut in cuts {
        lengths.push(cut - prev);
        prev = cut;
    }
    lengths.push(total - prev);
    lengths
}

/// A `width * height` image of class ids below `num_classes`.
pub fn random_class_ids(width: usize, height: usize, num_classes: u16) -> Vec<u16> {
    assert_ne!(num_classes, 0);
    (0..width * height)
        .map(|_| fastrand::u16(0..num_classes))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_partition_sums_to_total() {
        fastrand::seed(42);
        for _ in 0..100 {
            let total = fastrand::usize(0..100);
            let parts = fastrand::usize(1..10);
            let lengths = random_partition(total, parts);
            assert_eq!(lengths.len(), parts);
            assert_eq!(lengths.iter().sum::<usize>(), total);
        }
        assert!(random_partition(0, 0).is_empty());
    }

    #[test]
    fn test_value_ranges() {
        assert!(random_f64_values(50).iter().all(|v| (-1000.0..1000.0).contains(v)));
        assert!(random_unit_f32_values(50).iter().all(|v| (0.0..=1.0).contains(v)));
        let ids = random_class_ids(4, 3, 5);
        assert_eq!(ids.len(), 12);
        assert!(ids.iter().all(|&id| id < 5));
    }
}
