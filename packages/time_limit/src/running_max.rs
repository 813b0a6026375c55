use std::num::NonZero;

/// Maximum over a sliding window of the most recently pushed values.
///
/// The window holds the last `capacity` values. Pushing is amortized O(1): the maximum is only
/// rescanned when the value being evicted is the current maximum and the incoming value is
/// smaller than it.
///
/// # Examples
///
/// ```
/// use std::num::NonZero;
///
/// use time_limit::RunningMax;
///
/// let mut running_max = RunningMax::new(NonZero::new(2).unwrap());
/// assert_eq!(running_max.current_max(), None);
///
/// running_max.push(5);
/// running_max.push(1);
/// assert_eq!(running_max.current_max(), Some(5));
///
/// // The 5 falls out of the window.
/// running_max.push(3);
/// assert_eq!(running_max.current_max(), Some(3));
/// ```
#[derive(Clone, Debug)]
pub struct RunningMax<T> {
    values: Vec<T>,
    capacity: NonZero<usize>,

    // Slot that the next push overwrites once the window is full. Always the oldest value.
    next_index: usize,
    max_index: usize,
}

impl<T> RunningMax<T>
where
    T: Copy + Ord,
{
    /// Creates an empty window that remembers the last `capacity` values.
    #[must_use]
    pub fn new(capacity: NonZero<usize>) -> Self {
        Self {
            values: Vec::with_capacity(capacity.get()),
            capacity,
            next_index: 0,
            max_index: 0,
        }
    }

    /// Adds a value, evicting the oldest one if the window is full.
    pub fn push(&mut self, value: T) {
        if self.values.len() < self.capacity.get() {
            if self.current_max().is_none_or(|max| value >= max) {
                self.max_index = self.values.len();
            }

            self.values.push(value);
            return;
        }

        let is_new_max = self.current_max().is_some_and(|max| value >= max);

        *self
            .values
            .get_mut(self.next_index)
            .expect("next_index is always within a full window") = value;

        if is_new_max {
            self.max_index = self.next_index;
        } else if self.next_index == self.max_index {
            // We just overwrote the maximum with something smaller.
            self.max_index = self
                .values
                .iter()
                .enumerate()
                .max_by_key(|(_, candidate)| **candidate)
                .map(|(index, _)| index)
                .expect("window is full, so never empty");
        }

        self.next_index = self.next_index.wrapping_add(1);
        if self.next_index == self.capacity.get() {
            self.next_index = 0;
        }
    }

    /// The largest value in the window, or `None` if nothing has been pushed yet.
    #[must_use]
    pub fn current_max(&self) -> Option<T> {
        self.values.get(self.max_index).copied()
    }

    /// Number of values currently in the window. Never exceeds the capacity.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing has been pushed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// How many values the window remembers.
    #[must_use]
    pub fn capacity(&self) -> NonZero<usize> {
        self.capacity
    }
}
