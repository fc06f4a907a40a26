// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Tree depth suggested for `expected_items` items.
///
/// Two levels per decimal digit of the count: divide by ten until zero,
/// counting the steps. Not clamped.
#[inline]
pub(crate) const fn auto_depth(mut expected_items: usize) -> u32 {
    let mut digits = 0;
    while expected_items != 0 {
        expected_items /= 10;
        digits += 1;
    }
    digits * 2
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
macro_rules! debug_event {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!($($arg)*);
        }
    };
}

pub(crate) use debug_event;

#[cfg(test)]
mod tests {
    #[test]
    fn auto_depth() {
        assert_eq!(super::auto_depth(0), 0);
        assert_eq!(super::auto_depth(1), 2);
        assert_eq!(super::auto_depth(9), 2);
        assert_eq!(super::auto_depth(10), 4);
        assert_eq!(super::auto_depth(1000), 8);
        assert_eq!(super::auto_depth(1_000_000), 14);
        assert_eq!(super::auto_depth(999), 6);
    }
}
