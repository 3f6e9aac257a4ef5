use crate::models::{Property, PropertyStats};

/// Aggregate counts and means over a snapshot. Means of nothing are zero.
pub fn compute(snapshot: &[Property]) -> PropertyStats {
    let total = snapshot.len();
    let non_article4 = snapshot.iter().filter(|p| !p.is_article4).count();

    let (average_price, average_size) = if total == 0 {
        (0.0, 0.0)
    } else {
        let price_sum: u64 = snapshot.iter().map(|p| u64::from(p.price)).sum();
        let size_sum: u64 = snapshot.iter().map(|p| u64::from(p.size)).sum();
        (price_sum as f64 / total as f64, size_sum as f64 / total as f64)
    };

    PropertyStats {
        total_properties: total,
        non_article4_properties: non_article4,
        average_price,
        average_size,
    }
}
