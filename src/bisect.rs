//! Binary search that reports how hard it had to work.

/// Where a [`search`] ended up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit<T> {
    /// Index of an element equal to the target.
    Found(usize),
    /// Target absent. Holds the smallest visited element greater than the
    /// target, if the search ever moved left.
    UpperBound(Option<T>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bisect<T> {
    pub iterations: usize,
    pub hit: Hit<T>,
}

/// Binary search over ascending `values`.
///
/// The upper bound is the last element that sent the search left. Every
/// later left move visits a smaller element that is still above `target`,
/// so the last one is the tightest bound seen.
#[must_use]
pub fn search<T: PartialOrd + Copy>(values: &[T], target: T) -> Bisect<T> {
    let mut low = 0;
    let mut high = values.len();
    let mut iterations = 0;
    let mut upper_bound = None;

    // `high` is one past the last candidate; `mid` is the lower middle of
    // the inclusive range, which fixes the iteration counts
    while low < high {
        let mid = (low + high - 1) / 2;
        iterations += 1;

        let value = values[mid];
        if value == target {
            return Bisect {
                iterations,
                hit: Hit::Found(mid),
            };
        } else if value < target {
            low = mid + 1;
        } else {
            high = mid;
            upper_bound = Some(value);
        }
    }

    Bisect {
        iterations,
        hit: Hit::UpperBound(upper_bound),
    }
}
