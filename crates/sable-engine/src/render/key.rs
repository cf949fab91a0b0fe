use core::cmp::Ordering;

/// Paint-order key for render items.
///
/// Ordering rules:
/// 1) `depth`: descending (larger depth is further back and paints first)
/// 2) `order`: ascending (submission order for equal depth)
///
/// Depth uses `f32::total_cmp`, so NaN depths still produce a total order
/// (positive NaN sorts as the furthest-back value).
#[derive(Debug, Copy, Clone)]
pub struct DepthKey {
    pub depth: f32,
    /// Submission index within the frame.
    pub order: u32,
}

impl DepthKey {
    #[inline]
    pub const fn new(depth: f32, order: u32) -> Self {
        Self { depth, order }
    }
}

impl PartialEq for DepthKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DepthKey {}

impl Ord for DepthKey {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        match other.depth.total_cmp(&self.depth) {
            Ordering::Equal => self.order.cmp(&other.order),
            o => o,
        }
    }
}

impl PartialOrd for DepthKey {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deeper_sorts_first() {
        assert!(DepthKey::new(50.0, 1) < DepthKey::new(10.0, 0));
    }

    #[test]
    fn equal_depth_keeps_submission_order() {
        assert!(DepthKey::new(5.0, 0) < DepthKey::new(5.0, 1));
    }
}
