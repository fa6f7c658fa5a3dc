//! Double-buffered field store.
//!
//! [`FieldStore`] is the single owner of every field buffer. Each slot has
//! a front buffer (current value, readable) and a back buffer (free,
//! writable). The lifecycle of one write is:
//!
//! 1. `write_with(slot, ..)`: the closure receives a [`FieldReader`] over all
//!    front buffers and `&mut` to the slot's back buffer
//! 2. the kernel writes the back buffer
//! 3. `swap(slot)`: back becomes front, old front becomes the next back
//!
//! Because reads only see front buffers and the write only sees one back
//! buffer, a read can never observe a write in progress.

use fluidic_core::{Device, FieldSlot, GridBuffer, GridSize, Resolution};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::read::FieldReader;

/// Double-buffered storage for every field slot.
///
/// # Buffer layout
///
/// ```text
/// front[slot]  ←─── current generation, visible to readers
/// back[slot]   ←─── free; next write target for the slot
/// ```
pub struct FieldStore<B> {
    /// Current buffer per slot.
    front: [B; FieldSlot::COUNT],
    /// Free buffer per slot.
    back: [B; FieldSlot::COUNT],
    /// Fixed size per slot.
    sizes: [GridSize; FieldSlot::COUNT],
    /// Number of times each slot's front buffer has changed.
    generation: [u64; FieldSlot::COUNT],
}

impl<B: GridBuffer> FieldStore<B> {
    /// Allocate both buffers of every slot on `device`.
    ///
    /// Physics slots are sized to `config.solve_size`, the dye slot to
    /// `config.draw_size`. All buffers start zero-filled.
    ///
    /// Returns `Err(StoreError)` if either grid has a zero-length axis or
    /// the device fails to allocate.
    pub fn new<D>(device: &mut D, config: &StoreConfig) -> Result<Self, StoreError>
    where
        D: Device<Buffer = B>,
    {
        for resolution in [Resolution::Solve, Resolution::Draw] {
            if config.size_for(resolution).is_empty() {
                return Err(StoreError::EmptyGrid { resolution });
            }
        }

        let sizes = FieldSlot::ALL.map(|slot| config.size_for(slot.resolution()));
        let front = Self::allocate(device, sizes, config)?;
        let back = Self::allocate(device, sizes, config)?;

        Ok(Self {
            front,
            back,
            sizes,
            generation: [0; FieldSlot::COUNT],
        })
    }

    fn allocate<D>(
        device: &mut D,
        sizes: [GridSize; FieldSlot::COUNT],
        config: &StoreConfig,
    ) -> Result<[B; FieldSlot::COUNT], StoreError>
    where
        D: Device<Buffer = B>,
    {
        let [velocity, divergence, pressure, dye] =
            sizes.map(|size| device.create_buffer(size, config.edge));
        Ok([velocity?, divergence?, pressure?, dye?])
    }

    /// Replace a slot's front buffer, returning the previous one.
    ///
    /// The replacement must have the slot's fixed size. The back buffer is
    /// untouched.
    pub fn set(&mut self, slot: FieldSlot, buffer: B) -> Result<B, StoreError> {
        let expected = self.size(slot);
        let found = buffer.size();
        if found != expected {
            return Err(StoreError::SizeMismatch {
                slot,
                expected,
                found,
            });
        }
        let i = slot.index();
        self.generation[i] += 1;
        Ok(std::mem::replace(&mut self.front[i], buffer))
    }
}

impl<B> FieldStore<B> {
    /// The current (front) buffer of a slot.
    pub fn get(&self, slot: FieldSlot) -> &B {
        &self.front[slot.index()]
    }

    /// The free (back) buffer of a slot: the next write target.
    ///
    /// Read-only; the only way to write it is
    /// [`write_with`](Self::write_with).
    pub fn back(&self, slot: FieldSlot) -> &B {
        &self.back[slot.index()]
    }

    /// The fixed size of a slot.
    pub fn size(&self, slot: FieldSlot) -> GridSize {
        self.sizes[slot.index()]
    }

    /// How many times a slot's front buffer has changed (swaps plus sets).
    pub fn generation(&self, slot: FieldSlot) -> u64 {
        self.generation[slot.index()]
    }

    /// Exchange the front and back buffers of a slot.
    ///
    /// Called exactly once per write, after the write completes, by
    /// [`write_with`](Self::write_with). Two swaps restore the original
    /// buffers.
    pub(crate) fn swap(&mut self, slot: FieldSlot) {
        let i = slot.index();
        std::mem::swap(&mut self.front[i], &mut self.back[i]);
        self.generation[i] += 1;
    }

    /// Borrow every front buffer for reading.
    pub fn reader(&self) -> FieldReader<'_, B> {
        FieldReader::new(&self.front)
    }

    /// Write one generation of `slot`.
    ///
    /// Runs `write` with a reader over the front buffers and the slot's back
    /// buffer as the destination, then promotes the destination by swapping
    /// it to the front. This is the only way a slot's buffers change places.
    pub fn write_with<R>(
        &mut self,
        slot: FieldSlot,
        write: impl FnOnce(FieldReader<'_, B>, &mut B) -> R,
    ) -> R {
        let result = write(
            FieldReader::new(&self.front),
            &mut self.back[slot.index()],
        );
        self.swap(slot);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluidic_core::{BackendError, EdgeMode};
    use fluidic_test_utils::{MockBuffer, RecordingDevice};

    fn store(device: &mut RecordingDevice) -> FieldStore<MockBuffer> {
        let config = StoreConfig::new(GridSize::square(16), GridSize::new(32, 24));
        FieldStore::new(device, &config).unwrap()
    }

    #[test]
    fn sizes_follow_resolution_class() {
        let mut device = RecordingDevice::new();
        let store = store(&mut device);
        assert_eq!(store.size(FieldSlot::Velocity), GridSize::square(16));
        assert_eq!(store.size(FieldSlot::Pressure), GridSize::square(16));
        assert_eq!(store.size(FieldSlot::Divergence), GridSize::square(16));
        assert_eq!(store.size(FieldSlot::Dye), GridSize::new(32, 24));
        assert_eq!(store.get(FieldSlot::Dye).size(), GridSize::new(32, 24));
    }

    #[test]
    fn every_buffer_is_distinct() {
        let mut device = RecordingDevice::new();
        let store = store(&mut device);
        let mut ids: Vec<u64> = FieldSlot::ALL
            .iter()
            .flat_map(|&s| [store.get(s).id(), store.back(s).id()])
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 2 * FieldSlot::COUNT);
    }

    #[test]
    fn swap_promotes_back_buffer() {
        let mut device = RecordingDevice::new();
        let mut store = store(&mut device);
        let front = store.get(FieldSlot::Pressure).id();
        let back = store.back(FieldSlot::Pressure).id();

        store.swap(FieldSlot::Pressure);
        assert_eq!(store.get(FieldSlot::Pressure).id(), back);
        assert_eq!(store.back(FieldSlot::Pressure).id(), front);
        assert_eq!(store.generation(FieldSlot::Pressure), 1);

        store.swap(FieldSlot::Pressure);
        assert_eq!(store.get(FieldSlot::Pressure).id(), front);
        assert_eq!(store.generation(FieldSlot::Pressure), 2);
    }

    #[test]
    fn swap_leaves_other_slots_alone() {
        let mut device = RecordingDevice::new();
        let mut store = store(&mut device);
        let velocity = store.get(FieldSlot::Velocity).id();
        store.swap(FieldSlot::Dye);
        assert_eq!(store.get(FieldSlot::Velocity).id(), velocity);
        assert_eq!(store.generation(FieldSlot::Velocity), 0);
    }

    #[test]
    fn write_with_targets_back_then_swaps() {
        let mut device = RecordingDevice::new();
        let mut store = store(&mut device);
        let front = store.get(FieldSlot::Velocity).id();
        let back = store.back(FieldSlot::Velocity).id();

        let (read_id, write_id) = store.write_with(FieldSlot::Velocity, |reader, target| {
            (reader.get(FieldSlot::Velocity).id(), target.id())
        });

        assert_eq!(read_id, front);
        assert_eq!(write_id, back);
        assert_eq!(store.get(FieldSlot::Velocity).id(), back);
    }

    #[test]
    fn set_checks_size() {
        let mut device = RecordingDevice::new();
        let mut store = store(&mut device);
        let wrong = device
            .create_buffer(GridSize::square(8), EdgeMode::Clamp)
            .unwrap();
        let err = store.set(FieldSlot::Dye, wrong).unwrap_err();
        assert!(matches!(err, StoreError::SizeMismatch { slot: FieldSlot::Dye, .. }));

        let right = device
            .create_buffer(GridSize::new(32, 24), EdgeMode::Clamp)
            .unwrap();
        let right_id = right.id();
        let old = store.get(FieldSlot::Dye).id();
        let previous = store.set(FieldSlot::Dye, right).unwrap();
        assert_eq!(previous.id(), old);
        assert_eq!(store.get(FieldSlot::Dye).id(), right_id);
    }

    #[test]
    fn empty_grid_rejected() {
        let mut device = RecordingDevice::new();
        let config = StoreConfig::new(GridSize::new(0, 4), GridSize::square(4));
        let result = FieldStore::new(&mut device, &config);
        assert!(matches!(
            result,
            Err(StoreError::EmptyGrid {
                resolution: Resolution::Solve
            })
        ));
    }

    #[test]
    fn allocation_failure_is_a_device_error() {
        let mut device = RecordingDevice::new();
        device.fail_allocation();
        let config = StoreConfig::new(GridSize::square(4), GridSize::square(4));
        let result = FieldStore::new(&mut device, &config);
        assert!(matches!(
            result,
            Err(StoreError::Device(BackendError::Allocation { .. }))
        ));
        assert_eq!(device.allocated(), 0);
    }

    #[test]
    fn new_allocates_two_buffers_per_slot() {
        let mut device = RecordingDevice::new();
        let _store = store(&mut device);
        assert_eq!(device.allocated(), 2 * FieldSlot::COUNT);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_slot() -> impl Strategy<Value = FieldSlot> {
            prop_oneof![
                Just(FieldSlot::Velocity),
                Just(FieldSlot::Divergence),
                Just(FieldSlot::Pressure),
                Just(FieldSlot::Dye),
            ]
        }

        proptest! {
            #[test]
            fn front_after_swap_is_last_write_target(
                swaps in proptest::collection::vec(arb_slot(), 0..64),
            ) {
                let mut device = RecordingDevice::new();
                let mut store = store(&mut device);
                let initial: Vec<u64> =
                    FieldSlot::ALL.iter().map(|&s| store.get(s).id()).collect();

                for slot in &swaps {
                    let target = store.back(*slot).id();
                    store.swap(*slot);
                    prop_assert_eq!(store.get(*slot).id(), target);
                }

                for slot in FieldSlot::ALL {
                    let count = swaps.iter().filter(|&&s| s == slot).count();
                    prop_assert_eq!(store.generation(slot), count as u64);
                    if count % 2 == 0 {
                        prop_assert_eq!(store.get(slot).id(), initial[slot.index()]);
                    }
                }
            }
        }
    }
}
