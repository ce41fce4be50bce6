//! Interface to the host simulation engine.

use {Result, Time};

/// A handle of the host engine.
///
/// The host engine owns simulated time and the running statistics; the
/// sampler only observes the former and takes named snapshots of the latter.
pub trait Host {
    /// Return the current simulated time.
    fn time(&self) -> Time;

    /// Return the number of cores.
    fn cores(&self) -> usize;

    /// Return the frequency of a core in megahertz.
    fn frequency(&self, core: usize) -> f64;

    /// Persist a snapshot of the current statistics.
    fn write_snapshot(&mut self, snapshot: &Handle) -> Result<()>;

    /// Delete a previously persisted snapshot.
    ///
    /// When `lenient` is set, a missing snapshot is not an error.
    fn delete_snapshot(&mut self, snapshot: &Handle, lenient: bool) -> Result<()>;
}

/// A name referencing a point-in-time statistics image.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Handle {
    slot: usize,
    name: String,
}

/// A two-slot ring of snapshot handles.
///
/// At most two snapshots are alive at any moment: the current one and the
/// previous one. The generation counter selects the slot of the next
/// snapshot, alternating between the two.
pub struct Ring {
    generation: u64,
    slots: [Option<Handle>; 2],
}

impl Handle {
    #[inline]
    fn new(slot: usize) -> Handle {
        Handle { slot: slot, name: format!("cosim-temp-{}", slot) }
    }

    getter! { slot: usize }

    /// Return the name of the snapshot.
    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Ring {
    /// Create a ring.
    #[inline]
    pub fn new() -> Ring {
        Ring { generation: 0, slots: [None, None] }
    }

    getter! { generation: u64 }

    /// Allocate a handle for the next snapshot and return it along with the
    /// displaced one, if any.
    pub fn advance(&mut self) -> (Handle, Option<Handle>) {
        let slot = (self.generation % 2) as usize;
        self.generation += 1;
        let current = Handle::new(slot);
        let previous = self.slots[1 - slot].take();
        self.slots[slot] = Some(current.clone());
        (current, previous)
    }

    /// Remove and return the live handle, if any.
    pub fn take(&mut self) -> Option<Handle> {
        for slot in self.slots.iter_mut() {
            if let Some(handle) = slot.take() {
                return Some(handle);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::Ring;

    #[test]
    fn advance() {
        let mut ring = Ring::new();

        let (current, previous) = ring.advance();
        assert_eq!(current.name(), "cosim-temp-0");
        assert!(previous.is_none());

        let (current, previous) = ring.advance();
        assert_eq!(current.name(), "cosim-temp-1");
        assert_eq!(previous.unwrap().name(), "cosim-temp-0");

        let (current, previous) = ring.advance();
        assert_eq!(current.name(), "cosim-temp-0");
        assert_eq!(previous.unwrap().name(), "cosim-temp-1");

        assert_eq!(ring.generation(), 3);
    }

    #[test]
    fn take() {
        let mut ring = Ring::new();
        assert!(ring.take().is_none());

        let _ = ring.advance();
        let _ = ring.advance();
        assert_eq!(ring.take().unwrap().name(), "cosim-temp-1");
        assert!(ring.take().is_none());
    }
}
