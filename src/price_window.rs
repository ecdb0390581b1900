use crate::Price;
use std::collections::VecDeque;

/// Trailing window of the last `size` prices with a running sum.
///
/// The sum is Neumaier-compensated: low-order bits lost when a large price
/// is added are kept in `compensation`, so they come back once that price
/// leaves the window.
#[derive(Clone, Debug)]
pub(crate) struct PriceWindow {
    size: usize,
    window: VecDeque<Price>,
    sum: Price,
    compensation: Price,
}

impl PriceWindow {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            window: VecDeque::with_capacity(size),
            sum: 0.0,
            compensation: 0.0,
        }
    }

    #[inline]
    pub fn push(&mut self, price: Price) {
        if self.is_ready()
            && let Some(oldest) = self.window.pop_front()
        {
            self.add(-oldest);
        }

        self.window.push_back(price);
        self.add(price);
    }

    /// Sum of the window, `None` until `size` prices were pushed.
    #[inline]
    pub fn sum(&self) -> Option<Price> {
        self.is_ready().then_some(self.sum + self.compensation)
    }

    #[inline]
    fn add(&mut self, value: Price) {
        let total = self.sum + value;
        self.compensation += if self.sum.abs() >= value.abs() {
            (self.sum - total) + value
        } else {
            (value - total) + self.sum
        };
        self.sum = total;
    }

    #[inline]
    fn is_ready(&self) -> bool {
        self.window.len() == self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(size: usize, prices: &[Price]) -> PriceWindow {
        let mut w = PriceWindow::new(size);
        for &p in prices {
            w.push(p);
        }
        w
    }

    mod filling {
        use super::*;

        #[test]
        fn sum_is_none_when_empty() {
            assert_eq!(PriceWindow::new(3).sum(), None);
        }

        #[test]
        fn sum_is_none_until_window_full() {
            assert_eq!(filled(3, &[10.0]).sum(), None);
            assert_eq!(filled(3, &[10.0, 20.0]).sum(), None);
        }

        #[test]
        fn sum_returns_value_when_full() {
            assert_eq!(filled(2, &[10.0, 20.0]).sum(), Some(30.0));
        }
    }

    mod sliding {
        use super::*;

        #[test]
        fn oldest_value_drops_on_push() {
            // 10 dropped, 20 + 30 = 50
            assert_eq!(filled(2, &[10.0, 20.0, 30.0]).sum(), Some(50.0));
        }

        #[test]
        fn slides_across_many_prices() {
            // 4 + 5 = 9
            assert_eq!(filled(2, &[1.0, 2.0, 3.0, 4.0, 5.0]).sum(), Some(9.0));
        }

        #[test]
        fn size_one_tracks_latest() {
            assert_eq!(filled(1, &[42.0]).sum(), Some(42.0));
            assert_eq!(filled(1, &[10.0, 20.0]).sum(), Some(20.0));
        }
    }

    mod compensation {
        use super::*;

        #[test]
        fn recovers_after_large_price_leaves() {
            // 1e16 + 1 is not representable; the lost 1 must not stay lost.
            assert_eq!(filled(2, &[1e16, 1.0, 1.0]).sum(), Some(2.0));
            assert_eq!(filled(2, &[1e16, 1.0, 1.0, 1.0]).sum(), Some(2.0));
        }

        #[test]
        fn cancelling_prices_leave_no_residue() {
            assert_eq!(filled(2, &[0.1, 1e20, -1e20, 0.2, 0.3]).sum(), Some(0.5));
        }

        #[test]
        fn long_run_matches_fresh_sum() {
            let prices: Vec<Price> = (0..10_000_i32)
                .map(|i| 100.0 + f64::from(i % 97) * 0.01 + f64::from(i % 13) * 1e-7)
                .collect();
            let window = filled(20, &prices);
            let fresh: Price = prices[prices.len() - 20..].iter().sum();
            assert!((window.sum().unwrap() - fresh).abs() < 1e-10);
        }
    }
}
