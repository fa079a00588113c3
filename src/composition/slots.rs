// Image slot store and readiness gate

use super::types::{ImageFile, InlineImage, SlotId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Holds at most one image per slot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageSlotStore {
    slots: BTreeMap<SlotId, ImageFile>,
}

impl ImageSlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a file, replacing whatever the slot held before
    pub fn set_slot(&mut self, slot: SlotId, file: ImageFile) -> Option<ImageFile> {
        self.slots.insert(slot, file)
    }

    pub fn get_slot(&self, slot: SlotId) -> Option<&ImageFile> {
        self.slots.get(&slot)
    }

    /// Slots that still have no image, in canonical order
    pub fn missing(&self) -> Vec<SlotId> {
        SlotId::ALL
            .into_iter()
            .filter(|slot| !self.slots.contains_key(slot))
            .collect()
    }

    pub fn filled_count(&self) -> usize {
        self.slots.len()
    }

    /// Payloads for every slot in canonical order, or None unless all six are filled
    pub fn snapshot(&self) -> Option<Vec<InlineImage>> {
        SlotId::ALL
            .into_iter()
            .map(|slot| self.get_slot(slot).map(ImageFile::to_inline))
            .collect()
    }
}

/// True iff every slot holds an image
pub fn is_ready(store: &ImageSlotStore) -> bool {
    SlotId::ALL.iter().all(|slot| store.get_slot(*slot).is_some())
}
