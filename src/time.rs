//! Unit tagged instants and durations. The menu never reads a clock itself;
//! the host samples its monotonic millisecond source and passes the instant
//! into every per-tick call.

use core::cmp::Ordering;
use core::marker::PhantomData;
use core::ops::Add;
use core::ops::Sub;

/// Time unit marker
#[derive(Copy, Clone, Default, Debug)]
pub struct MilliSeconds;

#[derive(Copy, Clone, Debug)]
pub struct Duration<UNIT> {
    pub count: u32,
    pub unit: PhantomData<UNIT>,
}

/// An instant on the host's monotonic clock. Wraps around; only differences
/// between instants are meaningful.
#[derive(Copy, Clone)]
pub struct Time<UNIT> {
    pub instant: u32,
    pub unit: PhantomData<UNIT>,
}

impl<UNIT> PartialEq for Time<UNIT> {
    fn eq(&self, other: &Time<UNIT>) -> bool {
        self.instant == other.instant
    }
}

impl<UNIT> From<u32> for Time<UNIT> {
    fn from(original: u32) -> Time<UNIT> {
        Time::<UNIT> {
            instant: original,
            unit: PhantomData::<UNIT>,
        }
    }
}

impl Duration<MilliSeconds> {
    pub fn ms(count: u32) -> Duration<MilliSeconds> {
        Duration::<MilliSeconds> {
            count,
            unit: PhantomData::<MilliSeconds>,
        }
    }
}

impl<UNIT> PartialOrd for Duration<UNIT> {
    fn partial_cmp(&self, other: &Duration<UNIT>) -> Option<Ordering> {
        Some(self.count.cmp(&other.count))
    }
}

impl<UNIT> Ord for Duration<UNIT> {
    fn cmp(&self, other: &Duration<UNIT>) -> Ordering {
        self.count.cmp(&other.count)
    }
}

impl<UNIT> PartialEq for Duration<UNIT> {
    fn eq(&self, other: &Duration<UNIT>) -> bool {
        self.count == other.count
    }
}

impl<UNIT> Eq for Duration<UNIT> {}

impl<UNIT> Default for Duration<UNIT> {
    fn default() -> Duration<UNIT> {
        Duration::<UNIT> {
            count: 0,
            unit: PhantomData::<UNIT>,
        }
    }
}

impl<UNIT> Add for Duration<UNIT> {
    type Output = Duration<UNIT>;
    fn add(self, rhs: Self) -> Self::Output {
        Duration::<UNIT> {
            count: self.count + rhs.count,
            unit: PhantomData::<UNIT>,
        }
    }
}

impl<UNIT> Sub for Duration<UNIT> {
    type Output = Duration<UNIT>;
    fn sub(self, rhs: Self) -> Self::Output {
        Duration::<UNIT> {
            count: self.count - rhs.count,
            unit: PhantomData::<UNIT>,
        }
    }
}

impl<UNIT> Sub for Time<UNIT> {
    type Output = Duration<UNIT>;
    fn sub(self, rhs: Self) -> Self::Output {
        Duration::<UNIT> {
            count: self.instant.wrapping_sub(rhs.instant),
            unit: PhantomData::<UNIT>,
        }
    }
}

impl<UNIT> Add<Duration<UNIT>> for Time<UNIT> {
    type Output = Time<UNIT>;
    fn add(self, rhs: Duration<UNIT>) -> Self::Output {
        Time::<UNIT> {
            instant: self.instant.wrapping_add(rhs.count),
            unit: PhantomData::<UNIT>,
        }
    }
}

impl<UNIT> Sub<Duration<UNIT>> for Time<UNIT> {
    type Output = Time<UNIT>;
    fn sub(self, rhs: Duration<UNIT>) -> Self::Output {
        Time::<UNIT> {
            instant: self.instant.wrapping_sub(rhs.count),
            unit: PhantomData::<UNIT>,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_a_duration() {
        let start = Time::<MilliSeconds>::from(100);
        let now = start + Duration::ms(650);
        assert_eq!(now - start, Duration::ms(650));
    }

    #[test]
    fn elapsed_survives_clock_wraparound() {
        let start = Time::<MilliSeconds>::from(u32::MAX - 10);
        let now = start + Duration::ms(25);
        assert_eq!(now - start, Duration::ms(25));
    }

    #[test]
    fn durations_order_by_count() {
        assert!(Duration::ms(650) < Duration::ms(650) + Duration::ms(700));
        assert_eq!(Duration::ms(700) - Duration::ms(50), Duration::ms(650));
        assert_eq!(Duration::<MilliSeconds>::default(), Duration::ms(0));
    }
}
