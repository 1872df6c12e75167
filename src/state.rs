// SPDX-License-Identifier: MIT

//! The item state table of Section 6.2.2.7 and 6.2.2.8.
//!
//! Global items modify the [GlobalState] on top of a [GlobalStack], the
//! stack itself is modified by the Push and Pop items. Local items modify
//! the single [LocalState] which is reset after every Main item.

use crate::types::*;

/// The global part of the item state table. One of these exists per
/// level of the Push/Pop stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlobalState {
    pub usage_page: UsagePage,
    pub logical_minimum: LogicalMinimum,
    pub logical_maximum: LogicalMaximum,
    /// Unset until a Physical Minimum item is seen, see [GlobalState::physical_range].
    pub physical_minimum: Option<PhysicalMinimum>,
    pub physical_maximum: Option<PhysicalMaximum>,
    pub unit_exponent: Option<UnitExponent>,
    pub unit: Unit,
    pub report_size: ReportSize,
    pub report_id: ReportId,
    pub report_count: ReportCount,
}

impl GlobalState {
    /// The effective physical range. Section 6.2.2.7: if both Physical
    /// Minimum and Physical Maximum are undefined (or zero) they assume the
    /// values of the logical range.
    pub fn physical_range(&self) -> (i32, i32) {
        match (self.physical_minimum, self.physical_maximum) {
            (Some(PhysicalMinimum(0)), Some(PhysicalMaximum(0))) | (None, None) => {
                (self.logical_minimum.0, self.logical_maximum.0)
            }
            (min, max) => (
                min.map_or(self.logical_minimum.0, i32::from),
                max.map_or(self.logical_maximum.0, i32::from),
            ),
        }
    }

    /// The total number of bits a data item with this state occupies,
    /// `None` on overflow.
    pub fn bit_length(&self) -> Option<u32> {
        self.report_size.0.checked_mul(self.report_count.0)
    }
}

/// The Push/Pop stack of [GlobalState]s. The stack is never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlobalStack {
    globals: Vec<GlobalState>,
}

impl Default for GlobalStack {
    fn default() -> Self {
        GlobalStack {
            globals: vec![GlobalState::default()],
        }
    }
}

impl GlobalStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Duplicate the current state and make the duplicate the new top.
    pub fn push(&mut self) {
        let current = *self.current();
        self.globals.push(current);
    }

    /// Restore the previous state. Returns `false` (and leaves the stack
    /// unchanged) if only one state is left.
    pub fn pop(&mut self) -> bool {
        if self.globals.len() > 1 {
            self.globals.pop();
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> &GlobalState {
        // The stack is never empty, see pop()
        &self.globals[self.globals.len() - 1]
    }

    pub fn current_mut(&mut self) -> &mut GlobalState {
        let top = self.globals.len() - 1;
        &mut self.globals[top]
    }

    /// The number of states on the stack, at least 1.
    pub fn depth(&self) -> usize {
        self.globals.len()
    }
}

/// The local part of the item state table, valid for the next Main item only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocalState {
    /// One entry per Usage item, in order.
    pub usages: Vec<UsageId>,
    pub usage_minimum: Option<UsageMinimum>,
    pub usage_maximum: Option<UsageMaximum>,
    pub designator_index: Option<DesignatorIndex>,
    pub designator_minimum: Option<DesignatorMinimum>,
    pub designator_maximum: Option<DesignatorMaximum>,
    pub string_index: Option<StringIndex>,
    pub string_minimum: Option<StringMinimum>,
    pub string_maximum: Option<StringMaximum>,
    pub delimiter: Option<Delimiter>,
}

impl LocalState {
    pub fn reset(&mut self) {
        *self = LocalState::default();
    }
}
