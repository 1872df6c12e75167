// SPDX-License-Identifier: MIT

//! A HID Report Descriptor parser that builds a tree of collections and
//! data items, and a decoder that uses that tree to pull named values out
//! of raw input reports.
//!
//! The parser follows the item state machine of Section 6.2.2 of the
//! [HID Device Class Definition for HID 1.11](https://www.usb.org/document-library/device-class-definition-hid-111):
//! Global items update a (pushable) state table, Local items apply to the
//! next Main item only, and Main items create nodes in the [ItemTree].
//! Every data field is annotated with its absolute bit offset and width.
//!
//! ```
//! # use hidtree::*;
//! let rdesc = [
//!     0x05, 0x01,        // Usage Page (Generic Desktop)
//!     0x09, 0x30,        // Usage (X)
//!     0x09, 0x31,        // Usage (Y)
//!     0x15, 0x00,        // Logical Minimum (0)
//!     0x26, 0xff, 0x00,  // Logical Maximum (255)
//!     0x75, 0x08,        // Report Size (8)
//!     0x95, 0x02,        // Report Count (2)
//!     0x81, 0x02,        // Input (Data,Var,Abs)
//! ];
//! let tree = parse(&rdesc).unwrap();
//! let values: Vec<(String, u32)> = decode_report(&tree, &[0x10, 0x20])
//!     .unwrap()
//!     .map(|v| (v.name().to_string(), v.unsigned()))
//!     .collect();
//! assert_eq!(values, [("X".to_string(), 16), ("Y".to_string(), 32)]);
//! ```
//!
//! Malformed-but-recoverable descriptors (excess End Collection, Pop on an
//! empty stack, zero-sized fields, reserved items) are logged through
//! [tracing] and parsing continues. The only fatal parse error is a
//! descriptor that ends in the middle of an item, see
//! [ParserError::MalformedDescriptor].

use thiserror::Error;

/// Returns early with the given error if the condition does not hold.
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err);
        }
    };
}
pub(crate) use ensure;

pub mod bits;
pub mod builder;
pub mod decode;
pub mod dump;
pub mod hid;
pub mod parser;
pub mod state;
pub mod tree;
pub mod types;
pub mod usages;

pub use bits::{extract_bits, extract_signed, sign_extend};
pub use builder::ReportDescriptorBuilder;
pub use decode::{decode_report, DecodedValue, ReportError, ValueKind};
pub use dump::dump;
pub use parser::Parser;
pub use state::{GlobalState, LocalState};
pub use tree::{HidValue, ItemTree, MainItemNode, MainItemType, NodeId, Usage};
pub use types::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    /// An item header promises more bytes than the descriptor has left.
    #[error("Malformed descriptor: item at offset {offset} needs {needed} bytes, {available} available")]
    MalformedDescriptor {
        offset: usize,
        needed: usize,
        available: usize,
    },
}

type Result<T> = std::result::Result<T, ParserError>;

/// Parse a complete HID Report Descriptor into an [ItemTree].
///
/// This is a shortcut for [Parser::new] followed by [Parser::parse]
/// and [Parser::into_tree].
pub fn parse(bytes: &[u8]) -> Result<ItemTree> {
    let mut parser = Parser::new();
    parser.parse(bytes)?;
    Ok(parser.into_tree())
}

impl TryFrom<&[u8]> for ItemTree {
    type Error = ParserError;

    fn try_from(bytes: &[u8]) -> Result<ItemTree> {
        parse(bytes)
    }
}

impl TryFrom<&Vec<u8>> for ItemTree {
    type Error = ParserError;

    fn try_from(bytes: &Vec<u8>) -> Result<ItemTree> {
        parse(bytes)
    }
}
