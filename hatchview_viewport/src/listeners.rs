// Copyright 2025 the Hatchview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::viewport::ViewState;

/// Handle returned by [`ViewportTransform::subscribe`](crate::ViewportTransform::subscribe).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(&ViewState)>;

/// Registered change callbacks, called in subscription order.
#[derive(Default)]
pub(crate) struct Listeners {
    entries: Vec<(ListenerId, Callback)>,
    next_id: u64,
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl Listeners {
    pub(crate) fn add(&mut self, callback: Callback) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn notify(&mut self, state: &ViewState) {
        for (_, callback) in &mut self.entries {
            callback(state);
        }
    }
}
