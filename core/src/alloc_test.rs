#[cfg(test)]
mod tests {
    use crate::alloc::{AllocSnapshot, realloc_charge};

    #[test]
    fn test_growing_realloc_charges_the_new_block() {
        assert_eq!(realloc_charge(128, 1024), Some(1024));
        assert_eq!(realloc_charge(0, 8), Some(8));
    }

    #[test]
    fn test_shrinking_realloc_is_free() {
        assert_eq!(realloc_charge(1024, 128), None);
        assert_eq!(realloc_charge(64, 64), None);
    }

    #[test]
    fn test_since_saturates() {
        let earlier = AllocSnapshot { allocations: 5, bytes: 100 };
        let later = AllocSnapshot { allocations: 7, bytes: 90 };
        let delta = later.since(&earlier);
        assert_eq!(delta.allocations, 2);
        assert_eq!(delta.bytes, 0);
    }
}
