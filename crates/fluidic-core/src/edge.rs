//! Buffer addressing at the grid edge.

/// How a buffer resolves sample coordinates that fall outside the grid.
///
/// Field buffers are created clamped; wrapped buffers exist for periodic
/// inputs such as tiling images.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum EdgeMode {
    /// Out-of-range coordinates map to the nearest edge sample.
    #[default]
    Clamp,
    /// Out-of-range coordinates wrap to the opposite side (periodic).
    Wrap,
}

impl EdgeMode {
    /// Resolve an integer sample index along an axis of length `len`.
    ///
    /// `len` must be non-zero.
    pub fn resolve(self, index: i64, len: u32) -> u32 {
        let len = len as i64;
        if index >= 0 && index < len {
            return index as u32;
        }
        match self {
            Self::Clamp => index.clamp(0, len - 1) as u32,
            Self::Wrap => index.rem_euclid(len) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_bounds_is_identity() {
        assert_eq!(EdgeMode::Clamp.resolve(2, 5), 2);
        assert_eq!(EdgeMode::Wrap.resolve(0, 5), 0);
    }

    #[test]
    fn clamp_pins_to_edge() {
        assert_eq!(EdgeMode::Clamp.resolve(-1, 5), 0);
        assert_eq!(EdgeMode::Clamp.resolve(7, 5), 4);
    }

    #[test]
    fn wrap_is_periodic() {
        assert_eq!(EdgeMode::Wrap.resolve(-1, 5), 4);
        assert_eq!(EdgeMode::Wrap.resolve(5, 5), 0);
        assert_eq!(EdgeMode::Wrap.resolve(7, 5), 2);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn resolve_stays_in_bounds(index in any::<i32>(), len in 1u32..10_000) {
                for mode in [EdgeMode::Clamp, EdgeMode::Wrap] {
                    prop_assert!(mode.resolve(i64::from(index), len) < len);
                }
            }

            #[test]
            fn in_bounds_index_is_unchanged(
                (len, index) in (1u32..10_000).prop_flat_map(|len| (Just(len), 0..len)),
            ) {
                for mode in [EdgeMode::Clamp, EdgeMode::Wrap] {
                    prop_assert_eq!(mode.resolve(i64::from(index), len), index);
                }
            }

            #[test]
            fn wrap_has_period_len(index in any::<i32>(), len in 1u32..10_000) {
                let i = i64::from(index);
                prop_assert_eq!(
                    EdgeMode::Wrap.resolve(i, len),
                    EdgeMode::Wrap.resolve(i + i64::from(len), len)
                );
            }
        }
    }
}
