//! Ring buffers accumulating timed input contributions
//!
//! A ring buffer decouples the arrival order of external events (arbitrary,
//! driven by network fan-in) from the strictly sequential consumption order
//! of the update loop: it turns an unordered multiset of timed contributions
//! into an indexable, pre-summed sequence with one slot per timestep of the
//! current scheduling slice.

/// Fixed-capacity circular accumulator indexed by offset within a slice
///
/// Slots hold the weighted sum of all contributions assigned to that offset.
/// Reads consume: [`RingBuffer::get_value`] zeroes the slot it returns, so a
/// contribution is never applied twice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RingBuffer {
    slots: Vec<f64>,
}

impl RingBuffer {
    /// Create an empty ring buffer; sized later via [`RingBuffer::clear`]
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Reset all slots to zero and resize to the slice length currently
    /// configured by the host
    ///
    /// Called once at buffer-initialization time and whenever the slice
    /// length changes.
    pub fn clear(&mut self, slice_len: usize) {
        self.slots.clear();
        self.slots.resize(slice_len, 0.0);
    }

    /// Accumulate `amount` into the slot at `offset`
    ///
    /// `offset` is relative to the start of the current scheduling slice.
    /// Multiple calls to the same offset before it is consumed sum. An
    /// out-of-range offset indicates a scheduling bug in the host and fails
    /// fast.
    pub fn add_value(&mut self, offset: usize, amount: f64) {
        assert!(
            offset < self.slots.len(),
            "ring buffer offset {} out of range (slice length {})",
            offset,
            self.slots.len()
        );
        self.slots[offset] += amount;
    }

    /// Return the accumulated value at `offset` and zero the slot in the
    /// same operation
    ///
    /// Called exactly once per offset per timestep by the update loop.
    pub fn get_value(&mut self, offset: usize) -> f64 {
        assert!(
            offset < self.slots.len(),
            "ring buffer offset {} out of range (slice length {})",
            offset,
            self.slots.len()
        );
        let value = self.slots[offset];
        self.slots[offset] = 0.0;
        value
    }

    /// Number of slots (the configured slice length)
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check whether the buffer has been sized yet
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
