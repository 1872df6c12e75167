// SPDX-License-Identifier: MIT

//! Decoding of input reports against an [ItemTree].
//!
//! ```
//! # use hidtree::*;
//! # fn show(tree: &ItemTree, report: &[u8]) -> Result<(), ReportError> {
//! for value in decode_report(tree, report)? {
//!     match value.kind() {
//!         ValueKind::Axis => println!("{}: {}", value.name(), value.signed()),
//!         ValueKind::Button => println!("{}: {}", value.name(), value.unsigned() != 0),
//!         _ => println!("{}: {:#x}", value.name(), value.unsigned()),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use crate::bits::{extract_bits, sign_extend};
use crate::ensure;
use crate::tree::{HidValue, ItemTree, MainItemNode};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Report too short: {needed} bytes needed, {actual} available")]
    ReportTooShort { needed: usize, actual: usize },
    #[error("Field of {width} bits at bit {bit_offset} is outside a {len} byte report")]
    OutOfBounds { bit_offset: u32, width: u32, len: usize },
    #[error("Invalid field width {width}, expected 1 to 32 bits")]
    InvalidWidth { width: u32 },
}

/// A rough classification of a value by its usage, for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Axis,
    Button,
    Hat,
    Other,
}

impl ValueKind {
    fn of(field: &HidValue) -> ValueKind {
        let Some(usage) = field.usage else {
            return ValueKind::Other;
        };
        match (usage.usage_page.0, usage.usage_id.0) {
            // X, Y, Z, Rx, Ry, Rz, Slider, Dial, Wheel
            (0x01, 0x30..=0x38) => ValueKind::Axis,
            (0x01, 0x39) => ValueKind::Hat,
            // Rudder, Throttle, Accelerator, Brake, Clutch, Steering
            (0x02, 0xba | 0xbb | 0xc4 | 0xc5 | 0xc6 | 0xc8) => ValueKind::Axis,
            (0x09, _) => ValueKind::Button,
            _ => ValueKind::Other,
        }
    }
}

/// One value of an input report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedValue<'a> {
    item: &'a MainItemNode,
    field: &'a HidValue,
    raw: u32,
}

impl<'a> DecodedValue<'a> {
    pub fn name(&self) -> &'a str {
        &self.field.name
    }

    /// The raw bits, zero-extended.
    pub fn unsigned(&self) -> u32 {
        self.raw
    }

    /// The raw bits, sign-extended from the field width.
    pub fn signed(&self) -> i32 {
        sign_extend(self.raw, self.field.bit_width)
    }

    pub fn kind(&self) -> ValueKind {
        ValueKind::of(self.field)
    }

    /// The field this value was read from.
    pub fn field(&self) -> &'a HidValue {
        self.field
    }

    /// The Input item the field belongs to, for access to the logical
    /// range, units and attribute flags.
    pub fn item(&self) -> &'a MainItemNode {
        self.item
    }
}

/// Decode `report` against `tree`, yielding one [DecodedValue] per field of
/// every non-constant Input item in report descriptor order.
///
/// The report must be at least [ItemTree::input_report_len] bytes long,
/// longer reports are accepted and the excess ignored. Values are
/// extracted lazily as the iterator advances.
pub fn decode_report<'a>(
    tree: &'a ItemTree,
    report: &'a [u8],
) -> Result<impl Iterator<Item = DecodedValue<'a>> + 'a, ReportError> {
    let needed = tree.input_report_len();
    ensure!(
        report.len() >= needed,
        ReportError::ReportTooShort {
            needed,
            actual: report.len()
        }
    );

    Ok(tree.input_items().flat_map(move |(_, item)| {
        item.values.iter().filter_map(move |field| {
            // Every field ends within input_report_bits() and is at most
            // 32 bits wide, so extraction cannot fail after the check above
            let raw = extract_bits(report, field.bit_offset, field.bit_width);
            debug_assert!(raw.is_ok(), "field {} not extractable: {raw:?}", field.name);
            raw.ok().map(|raw| DecodedValue { item, field, raw })
        })
    }))
}
