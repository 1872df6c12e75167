// SPDX-License-Identifier: MIT

//! A wrapper around the HID Core items. This module handles splitting
//! a report descriptor byte stream into its individual components.
//! Interpretation of the resulting items (state tables, bit offsets,
//! the item tree) is done by the [Parser](crate::Parser).
//!
//! In this document and unless stated otherwise, a reference to "Section a.b.c" refers to the
//! [HID Device Class Definition for HID 1.11](https://www.usb.org/document-library/device-class-definition-hid-111).
//!
//! # Itemizing HID Report Descriptors
//!
//! Entry point is usually [`ReportDescriptorItems::try_from(bytes)`](ReportDescriptorItems::try_from):
//!
//! ```
//! # use hidtree::hid::*;
//! # fn parse(bytes: &[u8]) {
//! let rdesc_items = ReportDescriptorItems::try_from(bytes).unwrap();
//! for rdesc_item in rdesc_items.iter() {
//!     println!("Item at offset {:02x}", rdesc_item.offset());
//!     match rdesc_item.item_type() {
//!         ItemType::Main(MainItem::Output(o)) => println!("This is an output item"),
//!         _ => {}
//!     }
//! }
//! # }
//! ```
//!
//! Itemizing is all-or-nothing: a descriptor that ends in the middle of
//! an item fails with [ParserError::MalformedDescriptor] and no items are
//! returned.

use crate::types::*;
use crate::{ensure, ParserError};

use thiserror::Error;

/// Convenience function to be extract a single bit as bool from a value
fn bit(bits: u32, bit: u8) -> bool {
    debug_assert!(bit < 32);
    bits & (1 << bit) != 0
}

/// The data bytes of a HID item, guaranteed to
/// be of length 0, 1, 2, or 4 bytes depending on the
/// input and in LE byte order.
///
/// This struct only exists for conversion from numbers to
/// a hid-compatible byte array.
pub(crate) struct HidBytes(Vec<u8>);

impl HidBytes {
    pub(crate) fn take(self) -> Vec<u8> {
        self.0
    }

    /// The two size bits of a short item header for this payload.
    fn size_code(&self) -> u8 {
        match self.0.len() {
            0 => 0b00,
            1 => 0b01,
            2 => 0b10,
            _ => 0b11,
        }
    }
}

impl std::ops::Deref for HidBytes {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<u32> for HidBytes {
    fn from(value: u32) -> HidBytes {
        let bytes = value.to_le_bytes();
        let cutoff = match value {
            0..=255 => 1,
            256..=0xffff => 2,
            _ => 4,
        };
        HidBytes(bytes[0..cutoff].to_vec())
    }
}

impl From<i32> for HidBytes {
    fn from(value: i32) -> HidBytes {
        const MIN16: i32 = i16::MIN as i32;
        const MAX16: i32 = i16::MAX as i32;
        let bytes = match value {
            -128..=127 => (value as i8).to_le_bytes().to_vec(),
            MIN16..=MAX16 => (value as i16).to_le_bytes().to_vec(),
            _ => value.to_le_bytes().to_vec(),
        };
        HidBytes(bytes)
    }
}

/// Represents one value extracted from the (LE) data bytes of an item.
/// The number of bytes is kept since it decides how a signed value is
/// sign-extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ItemValue {
    value: u32,
    nbytes: usize,
}

impl ItemValue {
    /// The length of the value in bytes, required to
    /// determine if the actual value may be signed
    pub(crate) fn len(&self) -> usize {
        self.nbytes
    }

    /// The raw payload, zero-extended.
    pub(crate) fn unsigned(&self) -> u32 {
        self.value
    }

    /// The payload reinterpreted as `i8`, `i16` or `i32`
    /// depending on its width.
    pub(crate) fn signed(&self) -> i32 {
        match self.len() {
            0 => 0,
            1 => ((self.value & 0xFF) as u8 as i8) as i32,
            2 => ((self.value & 0xFFFF) as u16 as i16) as i32,
            _ => self.value as i32,
        }
    }
}

impl TryFrom<&[u8]> for ItemValue {
    type Error = HidError;

    fn try_from(bytes: &[u8]) -> Result<ItemValue> {
        let value = match bytes {
            [] => 0,
            [b0] => *b0 as u32,
            [b0, b1] => u16::from_le_bytes([*b0, *b1]) as u32,
            [b0, b1, b2, b3] => u32::from_le_bytes([*b0, *b1, *b2, *b3]),
            _ => {
                return Err(HidError::InvalidData {
                    message: format!("Invalid item data length {}", bytes.len()),
                })
            }
        };
        Ok(ItemValue {
            value,
            nbytes: bytes.len(),
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HidError {
    #[error("Invalid data: {message}")]
    InvalidData { message: String },
    #[error("Insufficient data: {needed} bytes needed, {available} available")]
    InsufficientData { needed: usize, available: usize },
}

type Result<T> = std::result::Result<T, HidError>;

/// The type of a HID item may be one of [MainItem], [GlobalItem], or [LocalItem].
/// These items comprise the report descriptor and how the report descriptor should
/// be compiled.
///
/// The special types [ItemType::Long] and [ItemType::Reserved] are placeholders
/// for items that are legal but carry no meaning to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    Main(MainItem),
    Global(GlobalItem),
    Local(LocalItem),
    Long { tag: u8 },
    Reserved { tag: u8 },
}

impl ItemType {
    /// Return the HID bytes representing this [ItemType].
    ///
    /// ```
    /// # use hidtree::hid::*;
    /// # use hidtree::types::*;
    /// let item = ItemType::from(GlobalItem::LogicalMinimum(LogicalMinimum(-127)));
    /// assert_eq!(item.as_bytes(), [0x15, 0x81]);
    /// ```
    ///
    /// Note that [ItemType::Long] and [ItemType::Reserved] return
    /// an empty vector.
    pub fn as_bytes(&self) -> Vec<u8> {
        match self {
            ItemType::Main(item) => item.as_bytes(),
            ItemType::Global(item) => item.as_bytes(),
            ItemType::Local(item) => item.as_bytes(),
            ItemType::Long { .. } | ItemType::Reserved { .. } => vec![],
        }
    }
}

impl From<MainItem> for ItemType {
    fn from(item: MainItem) -> ItemType {
        ItemType::Main(item)
    }
}

impl From<GlobalItem> for ItemType {
    fn from(item: GlobalItem) -> ItemType {
        ItemType::Global(item)
    }
}

impl From<LocalItem> for ItemType {
    fn from(item: LocalItem) -> ItemType {
        ItemType::Local(item)
    }
}

/// Encode a short item: `prefix` carries tag and type, the size bits
/// are filled in from the payload.
fn short_item_bytes(prefix: u8, data: Option<HidBytes>) -> Vec<u8> {
    match data {
        Some(data) => [vec![prefix | data.size_code()], data.take()].concat(),
        None => vec![prefix],
    }
}

/// Main Items, see Section 6.2.2.4
///
/// > Main items are used to either define or group certain types of data fields within a
/// > Report descriptor. There are two types of Main items: data and non-data. Data-
/// > type Main items are used to create a field within a report and include Input,
/// > Output, and Feature. Other items do not create fields and are subsequently
/// > referred to as non-data Main items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainItem {
    Input(DataItem),
    Output(DataItem),
    Feature(DataItem),
    Collection(CollectionItem),
    EndCollection,
    /// A Main item tag not defined by Section 6.2.2.4.
    Reserved { tag: u8 },
}

impl MainItem {
    /// The 4-bit tag of this item.
    pub fn tag(&self) -> u8 {
        match self {
            MainItem::Input(_) => 0x8,
            MainItem::Output(_) => 0x9,
            MainItem::Collection(_) => 0xA,
            MainItem::Feature(_) => 0xB,
            MainItem::EndCollection => 0xC,
            MainItem::Reserved { tag } => *tag,
        }
    }

    pub fn as_bytes(&self) -> Vec<u8> {
        let prefix = self.tag() << 4;
        match self {
            MainItem::Input(item) | MainItem::Output(item) | MainItem::Feature(item) => {
                short_item_bytes(prefix, Some(HidBytes::from(item.flags())))
            }
            MainItem::Collection(c) => short_item_bytes(prefix, Some(HidBytes::from(u32::from(c)))),
            MainItem::EndCollection | MainItem::Reserved { .. } => short_item_bytes(prefix, None),
        }
    }
}

/// Main Data Item, see Section 6.2.5.
///
/// A data item is a [MainItem] that "create a field within a report and include Input,
/// Output, and Feature.". These have shared properties provided by this trait.
///
/// These properties come in pairs (bit set or unset in the HID report descriptor item),
/// for readability in the caller, a function is provided for each state.
pub trait MainDataItem {
    /// True if the data is constant and never changes. This typically means the data
    /// is padding and can be ignored.
    ///
    /// Mutually exclusive with [MainDataItem::is_data].
    fn is_constant(&self) -> bool;

    /// True if the field carries data.
    fn is_data(&self) -> bool {
        !self.is_constant()
    }

    /// True if the data is a variable field.
    ///
    /// Mutually exclusive with [MainDataItem::is_array].
    fn is_variable(&self) -> bool;

    /// True if the data is an array field.
    fn is_array(&self) -> bool {
        !self.is_variable()
    }

    /// True if the data is relative compared to a previous report
    ///
    /// Mutually exclusive with [MainDataItem::is_absolute].
    fn is_relative(&self) -> bool;

    /// True if the data is absolute
    fn is_absolute(&self) -> bool {
        !self.is_relative()
    }

    /// True if the data wraps around at the logical
    /// minimum/maximum (e.g. a dial that can spin at 360 degrees).
    fn wraps(&self) -> bool;

    /// True if the data was pre-processed on the device
    /// and the logical range is not linear.
    fn is_nonlinear(&self) -> bool;

    /// True if the control does not have a preferred state it
    /// returns to when the user stops interacting (e.g. a joystick
    /// may return to a neutral position)
    fn has_no_preferred_state(&self) -> bool;

    /// True if the control has a null state where it does not send
    /// data (e.g. a hat switch in neutral position)
    fn has_null_state(&self) -> bool;

    /// True if the value may change without host interaction.
    /// Only meaningful for Output and Feature items, the bit is
    /// reserved for Input items.
    fn is_volatile(&self) -> bool;

    /// True if the control emits a fixed size stream of bytes.
    ///
    /// Mutually exclusive with [MainDataItem::is_bitfield].
    fn is_buffered_bytes(&self) -> bool;

    /// True if the control is a single bit field (value).
    fn is_bitfield(&self) -> bool {
        !self.is_buffered_bytes()
    }
}

/// The attribute flags shared by [Input](MainItem::Input),
/// [Output](MainItem::Output) and [Feature](MainItem::Feature) items,
/// see Section 6.2.2.5.
///
/// The raw value is kept as-is so callers can inspect bits this crate
/// does not name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DataItem {
    flags: u32,
}

impl DataItem {
    pub fn new(flags: u32) -> Self {
        DataItem { flags }
    }

    /// The raw attribute bits of this item.
    pub fn flags(&self) -> u32 {
        self.flags
    }
}

impl MainDataItem for DataItem {
    fn is_constant(&self) -> bool {
        bit(self.flags, 0)
    }

    fn is_variable(&self) -> bool {
        bit(self.flags, 1)
    }

    fn is_relative(&self) -> bool {
        bit(self.flags, 2)
    }

    fn wraps(&self) -> bool {
        bit(self.flags, 3)
    }

    fn is_nonlinear(&self) -> bool {
        bit(self.flags, 4)
    }

    fn has_no_preferred_state(&self) -> bool {
        bit(self.flags, 5)
    }

    fn has_null_state(&self) -> bool {
        bit(self.flags, 6)
    }

    fn is_volatile(&self) -> bool {
        bit(self.flags, 7)
    }

    fn is_buffered_bytes(&self) -> bool {
        bit(self.flags, 8)
    }
}

/// See Section 6.2.2.6. A collection groups several items together.
///
/// > A Collection item identifies a relationship between two or more data (Input,
/// > Output, or Feature.) For example, a mouse could be described as a collection of
/// > two to four data (x, y, button 1, button 2). While the Collection item opens a
/// > collection of data, the [MainItem::EndCollection] item closes a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionItem {
    Physical,
    Application,
    Logical,
    Report,
    NamedArray,
    UsageSwitch,
    UsageModifier,
    Reserved { value: u32 },
    VendorDefined { value: u32 },
}

impl From<&CollectionItem> for u32 {
    fn from(c: &CollectionItem) -> u32 {
        match c {
            CollectionItem::Physical => 0x00,
            CollectionItem::Application => 0x01,
            CollectionItem::Logical => 0x02,
            CollectionItem::Report => 0x03,
            CollectionItem::NamedArray => 0x04,
            CollectionItem::UsageSwitch => 0x05,
            CollectionItem::UsageModifier => 0x06,
            CollectionItem::Reserved { value } => *value,
            CollectionItem::VendorDefined { value } => *value,
        }
    }
}

impl From<CollectionItem> for u32 {
    fn from(c: CollectionItem) -> u32 {
        u32::from(&c)
    }
}

impl From<u32> for CollectionItem {
    fn from(v: u32) -> CollectionItem {
        match v {
            0x00 => CollectionItem::Physical,
            0x01 => CollectionItem::Application,
            0x02 => CollectionItem::Logical,
            0x03 => CollectionItem::Report,
            0x04 => CollectionItem::NamedArray,
            0x05 => CollectionItem::UsageSwitch,
            0x06 => CollectionItem::UsageModifier,
            value @ 0x80..=0xff => CollectionItem::VendorDefined { value },
            value => CollectionItem::Reserved { value },
        }
    }
}

/// See Section 6.2.2.7, a global item applies to all subsequently identified items.
///
/// > Global items describe rather than define data from a control. A new Main item
/// > assumes the characteristics of the item state table. Global items can change the
/// > state table. As a result Global item tags apply to all subsequently defined items
/// > unless overridden by another Global item.
///
/// Minimums and the unit exponent are sign-extended from the width of the
/// item's data. Maximums are taken as the raw unsigned data, which is good
/// enough for anything that doesn't have a maximum < 0 encoded in fewer
/// than four bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalItem {
    UsagePage(UsagePage),
    LogicalMinimum(LogicalMinimum),
    LogicalMaximum(LogicalMaximum),
    PhysicalMinimum(PhysicalMinimum),
    PhysicalMaximum(PhysicalMaximum),
    UnitExponent(UnitExponent),
    Unit(Unit),
    ReportSize(ReportSize),
    ReportId(ReportId),
    ReportCount(ReportCount),
    Push,
    Pop,
    Reserved { tag: u8 },
}

/// Encodes a maximum so that it reads back unchanged as raw unsigned data.
fn maximum_bytes(max: i32) -> HidBytes {
    if max < 0 {
        HidBytes(max.to_le_bytes().to_vec())
    } else {
        HidBytes::from(max as u32)
    }
}

impl GlobalItem {
    /// The 4-bit tag of this item.
    pub fn tag(&self) -> u8 {
        match self {
            GlobalItem::UsagePage(_) => 0x0,
            GlobalItem::LogicalMinimum(_) => 0x1,
            GlobalItem::LogicalMaximum(_) => 0x2,
            GlobalItem::PhysicalMinimum(_) => 0x3,
            GlobalItem::PhysicalMaximum(_) => 0x4,
            GlobalItem::UnitExponent(_) => 0x5,
            GlobalItem::Unit(_) => 0x6,
            GlobalItem::ReportSize(_) => 0x7,
            GlobalItem::ReportId(_) => 0x8,
            GlobalItem::ReportCount(_) => 0x9,
            GlobalItem::Push => 0xA,
            GlobalItem::Pop => 0xB,
            GlobalItem::Reserved { tag } => *tag,
        }
    }

    pub fn as_bytes(&self) -> Vec<u8> {
        let prefix = (self.tag() << 4) | 0b0100;
        let data: Option<HidBytes> = match self {
            GlobalItem::UsagePage(usage_page) => Some(HidBytes::from(u32::from(usage_page))),
            GlobalItem::LogicalMinimum(min) => Some(HidBytes::from(i32::from(min))),
            GlobalItem::LogicalMaximum(max) => Some(maximum_bytes(i32::from(max))),
            GlobalItem::PhysicalMinimum(min) => Some(HidBytes::from(i32::from(min))),
            GlobalItem::PhysicalMaximum(max) => Some(maximum_bytes(i32::from(max))),
            GlobalItem::UnitExponent(exponent) => Some(HidBytes::from(i32::from(exponent))),
            GlobalItem::Unit(unit) => Some(HidBytes::from(u32::from(unit))),
            GlobalItem::ReportSize(size) => Some(HidBytes::from(u32::from(size))),
            GlobalItem::ReportId(id) => Some(HidBytes::from(u32::from(id))),
            GlobalItem::ReportCount(count) => Some(HidBytes::from(u32::from(count))),
            GlobalItem::Push | GlobalItem::Pop | GlobalItem::Reserved { .. } => None,
        };
        short_item_bytes(prefix, data)
    }
}

/// See Section 6.2.2.8, a local item applies to the current [MainItem].
///
/// > Local item tags define characteristics of controls. These items do not carry over to
/// > the next Main item. If a Main item defines more than one control, it may be
/// > preceded by several similar Local item tags. For example, an Input item may
/// > have several Usage tags associated with it, one for each control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalItem {
    /// A Usage, possibly an extended usage with the Usage Page
    /// in the upper 16 bits (see [UsageId::extended_page]).
    Usage(UsageId),
    UsageMinimum(UsageMinimum),
    UsageMaximum(UsageMaximum),
    DesignatorIndex(DesignatorIndex),
    DesignatorMinimum(DesignatorMinimum),
    DesignatorMaximum(DesignatorMaximum),
    StringIndex(StringIndex),
    StringMinimum(StringMinimum),
    StringMaximum(StringMaximum),
    Delimiter(Delimiter),
    Reserved { tag: u8 },
}

impl LocalItem {
    /// The 4-bit tag of this item.
    pub fn tag(&self) -> u8 {
        match self {
            LocalItem::Usage(_) => 0x0,
            LocalItem::UsageMinimum(_) => 0x1,
            LocalItem::UsageMaximum(_) => 0x2,
            LocalItem::DesignatorIndex(_) => 0x3,
            LocalItem::DesignatorMinimum(_) => 0x4,
            LocalItem::DesignatorMaximum(_) => 0x5,
            LocalItem::StringIndex(_) => 0x7,
            LocalItem::StringMinimum(_) => 0x8,
            LocalItem::StringMaximum(_) => 0x9,
            LocalItem::Delimiter(_) => 0xA,
            LocalItem::Reserved { tag } => *tag,
        }
    }

    pub fn as_bytes(&self) -> Vec<u8> {
        let prefix = (self.tag() << 4) | 0b1000;
        let data = match self {
            // An extended usage must stay 4 bytes wide or the page is lost
            LocalItem::Usage(usage) if usage.extended_page().is_some() => {
                Some(HidBytes(usage.0.to_le_bytes().to_vec()))
            }
            LocalItem::Usage(usage) => Some(HidBytes::from(u32::from(usage))),
            LocalItem::UsageMinimum(min) => Some(HidBytes::from(u32::from(min))),
            LocalItem::UsageMaximum(max) => Some(HidBytes::from(u32::from(max))),
            LocalItem::DesignatorIndex(idx) => Some(HidBytes::from(u32::from(idx))),
            LocalItem::DesignatorMinimum(min) => Some(HidBytes::from(u32::from(min))),
            LocalItem::DesignatorMaximum(max) => Some(HidBytes::from(u32::from(max))),
            LocalItem::StringIndex(idx) => Some(HidBytes::from(u32::from(idx))),
            LocalItem::StringMinimum(min) => Some(HidBytes::from(u32::from(min))),
            LocalItem::StringMaximum(max) => Some(HidBytes::from(u32::from(max))),
            LocalItem::Delimiter(delimiter) => Some(HidBytes::from(u32::from(delimiter))),
            LocalItem::Reserved { .. } => None,
        };
        short_item_bytes(prefix, data)
    }
}

fn main_item(tag: u8, value: ItemValue) -> MainItem {
    match tag {
        0x8 => MainItem::Input(DataItem::new(value.unsigned())),
        0x9 => MainItem::Output(DataItem::new(value.unsigned())),
        0xA => MainItem::Collection(CollectionItem::from(value.unsigned())),
        0xB => MainItem::Feature(DataItem::new(value.unsigned())),
        0xC => MainItem::EndCollection,
        tag => MainItem::Reserved { tag },
    }
}

fn global_item(tag: u8, value: ItemValue) -> GlobalItem {
    let raw = value.unsigned();
    match tag {
        0x0 => GlobalItem::UsagePage(UsagePage(raw)),
        0x1 => GlobalItem::LogicalMinimum(LogicalMinimum(value.signed())),
        0x2 => GlobalItem::LogicalMaximum(LogicalMaximum(raw as i32)),
        0x3 => GlobalItem::PhysicalMinimum(PhysicalMinimum(value.signed())),
        0x4 => GlobalItem::PhysicalMaximum(PhysicalMaximum(raw as i32)),
        0x5 => GlobalItem::UnitExponent(UnitExponent(value.signed())),
        0x6 => GlobalItem::Unit(Unit(raw)),
        0x7 => GlobalItem::ReportSize(ReportSize(raw)),
        0x8 => GlobalItem::ReportId(ReportId(raw)),
        0x9 => GlobalItem::ReportCount(ReportCount(raw)),
        0xA => GlobalItem::Push,
        0xB => GlobalItem::Pop,
        tag => GlobalItem::Reserved { tag },
    }
}

fn local_item(tag: u8, value: ItemValue) -> LocalItem {
    let raw = value.unsigned();
    match tag {
        0x0 => LocalItem::Usage(UsageId(raw)),
        0x1 => LocalItem::UsageMinimum(UsageMinimum(raw)),
        0x2 => LocalItem::UsageMaximum(UsageMaximum(raw)),
        0x3 => LocalItem::DesignatorIndex(DesignatorIndex(raw)),
        0x4 => LocalItem::DesignatorMinimum(DesignatorMinimum(raw)),
        0x5 => LocalItem::DesignatorMaximum(DesignatorMaximum(raw)),
        0x7 => LocalItem::StringIndex(StringIndex(raw)),
        0x8 => LocalItem::StringMinimum(StringMinimum(raw)),
        0x9 => LocalItem::StringMaximum(StringMaximum(raw)),
        0xA => LocalItem::Delimiter(Delimiter(raw)),
        tag => LocalItem::Reserved { tag },
    }
}

// Representation of a raw item in the byte array, see Section 6.2.2.2 and
// 6.2.2.3. Items in a HID report descriptor are represented as short items (1-5 bytes)
// and long items as 3 to 258 bytes.
//
// Note that Section 6.2.2.3 states:
//
// > **Important** No long item tags are defined in this document. These tags are
// > reserved for future use. Tags xF0–xFF are vendor defined.
//
// Long items are therefore only skipped over.
pub trait Item {
    /// The length of this item in bytes, inclusive of the header byte.
    /// For short items this is the length of the data in bytes plus 1 for the header byte.
    /// For long items this is the length of the data plus 3 (header byte, data size
    /// byte and the long item tag byte).
    fn size(&self) -> usize;

    fn item_type(&self) -> ItemType;

    /// The tag of this item as shifted-down numeric value. For short items this
    /// tag are the upper 4 bits in the header byte shifted down and returned as value in the range
    /// 0..15.
    /// For long items this is the 8-bit long item tag from byte 2.
    fn tag(&self) -> u8;

    /// The header byte of this item. For short items this
    /// comprises data size, type and tag. For long items this is a constant
    /// value of 0xfe (see Section 6.2.2.3)
    fn header(&self) -> u8;

    /// Returns true if this item is a Long Item (Section 6.2.2.3).
    fn is_long_item(&self) -> bool;

    /// The bytes representing this item as extracted from the report descriptor.
    /// The first byte is the header byte and is guaranteed to exist.
    fn bytes(&self) -> &[u8];

    /// Return the item's data bytes, possibly empty.
    fn data(&self) -> &[u8];
}

/// The header byte that introduces a long item.
pub const LONG_ITEM_HEADER: u8 = 0xfe;

#[derive(Debug, Clone)]
struct ShortItem {
    item_type: ItemType,
    bytes: Vec<u8>,
}

impl Item for ShortItem {
    fn is_long_item(&self) -> bool {
        false
    }

    fn size(&self) -> usize {
        self.bytes.len()
    }

    fn item_type(&self) -> ItemType {
        self.item_type
    }

    fn tag(&self) -> u8 {
        (self.header() & 0b11110000) >> 4
    }

    fn header(&self) -> u8 {
        self.bytes[0]
    }

    fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn data(&self) -> &[u8] {
        &self.bytes[1..]
    }
}

impl TryFrom<&[u8]> for ShortItem {
    type Error = HidError;

    fn try_from(bytes: &[u8]) -> Result<ShortItem> {
        ensure!(
            !bytes.is_empty(),
            HidError::InsufficientData {
                needed: 1,
                available: 0
            }
        );
        let header = bytes[0];
        let size = match header & 0b0011 {
            0 => 0,
            1 => 1,
            2 => 2,
            _ => 4,
        };
        ensure!(
            bytes.len() > size,
            HidError::InsufficientData {
                needed: size + 1,
                available: bytes.len()
            }
        );
        let value = ItemValue::try_from(&bytes[1..size + 1])?;
        let tag = (header & 0b11110000) >> 4;
        let item_type = match (header & 0b1100) >> 2 {
            0 => ItemType::Main(main_item(tag, value)),
            1 => ItemType::Global(global_item(tag, value)),
            2 => ItemType::Local(local_item(tag, value)),
            _ => ItemType::Reserved { tag },
        };

        Ok(ShortItem {
            item_type,
            bytes: bytes[0..size + 1].to_owned(),
        })
    }
}

#[derive(Debug, Clone)]
struct LongItem {
    bytes: Vec<u8>,
}

impl Item for LongItem {
    fn is_long_item(&self) -> bool {
        true
    }

    fn size(&self) -> usize {
        self.bytes.len()
    }

    fn item_type(&self) -> ItemType {
        ItemType::Long { tag: self.tag() }
    }

    fn tag(&self) -> u8 {
        self.bytes[2]
    }

    fn header(&self) -> u8 {
        self.bytes[0]
    }

    fn data(&self) -> &[u8] {
        &self.bytes[3..]
    }

    fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl TryFrom<&[u8]> for LongItem {
    type Error = HidError;

    fn try_from(bytes: &[u8]) -> Result<LongItem> {
        ensure!(
            bytes.first() == Some(&LONG_ITEM_HEADER),
            HidError::InvalidData {
                message: "Item is not a long item".into(),
            }
        );
        ensure!(
            bytes.len() >= 3,
            HidError::InsufficientData {
                needed: 3,
                available: bytes.len()
            }
        );
        let size = bytes[1] as usize + 3;
        ensure!(
            bytes.len() >= size,
            HidError::InsufficientData {
                needed: size,
                available: bytes.len()
            }
        );

        Ok(LongItem {
            bytes: bytes[0..size].to_owned(),
        })
    }
}

#[derive(Debug, Clone)]
enum RawItem {
    Short(ShortItem),
    Long(LongItem),
}

/// A single item in a parsed (but not yet interpreted) report descriptor.
#[derive(Debug, Clone)]
pub struct ReportDescriptorItem {
    offset: usize,
    item: RawItem,
}

impl ReportDescriptorItem {
    /// The offset of this item in the Report Descriptor it was extracted from.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The item that is this report descriptor item.
    pub fn item(&self) -> &dyn Item {
        match &self.item {
            RawItem::Short(item) => item,
            RawItem::Long(item) => item,
        }
    }

    /// Shortcut for `self.item().item_type()`.
    pub fn item_type(&self) -> ItemType {
        self.item().item_type()
    }
}

/// A set of items extracted from a report descriptor byte array. This is the
/// result of parsing a report descriptor without *interpreting* it and
/// thus generally only useful to analyze the components of the report descriptor.
#[derive(Debug, Clone)]
pub struct ReportDescriptorItems {
    items: Vec<ReportDescriptorItem>,
}

impl std::ops::Deref for ReportDescriptorItems {
    type Target = [ReportDescriptorItem];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl TryFrom<&[u8]> for ReportDescriptorItems {
    type Error = ParserError;

    /// Attempts to itemize the given HID report descriptor into its
    /// set of [ReportDescriptorItem]s.
    fn try_from(bytes: &[u8]) -> crate::Result<Self> {
        itemize(bytes)
    }
}

/// Split the HID Report Descriptor represented by bytes into its set of
/// items.
fn itemize(bytes: &[u8]) -> crate::Result<ReportDescriptorItems> {
    let mut offset = 0;
    let mut items: Vec<ReportDescriptorItem> = Vec::new();
    while offset < bytes.len() {
        let remaining = &bytes[offset..];
        let item = if remaining[0] == LONG_ITEM_HEADER {
            LongItem::try_from(remaining).map(RawItem::Long)
        } else {
            ShortItem::try_from(remaining).map(RawItem::Short)
        };
        let item = match item {
            Ok(item) => item,
            Err(HidError::InsufficientData { needed, available }) => {
                return Err(ParserError::MalformedDescriptor {
                    offset,
                    needed,
                    available,
                })
            }
            // Only reachable through a size code/length mismatch, which
            // the size checks above rule out.
            Err(HidError::InvalidData { .. }) => {
                return Err(ParserError::MalformedDescriptor {
                    offset,
                    needed: 1,
                    available: remaining.len(),
                })
            }
        };
        let rdesc_item = ReportDescriptorItem { offset, item };
        offset += rdesc_item.item().size();
        items.push(rdesc_item);
    }
    Ok(ReportDescriptorItems { items })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_size() {
        for size in 0..4 {
            let itype = 0b100; // Global
            let tag = 0b00010000; // Logical Minimum
            let bytes: [u8; 5] = [tag | itype | size, 1, 2, 3, 4];
            let bytes = bytes.as_slice();

            let item = ShortItem::try_from(bytes).unwrap();
            match size {
                0 => assert_eq!(item.size(), 1),
                1 => assert_eq!(item.size(), 2),
                2 => assert_eq!(item.size(), 3),
                3 => assert_eq!(item.size(), 5),
                _ => panic!("Size {size} cannot happen"),
            }
        }
    }

    #[test]
    fn item_type() {
        let itype = 0b10010000; // Output
        let size = 3;
        let bytes: [u8; 5] = [itype | size, 0b10101010, 0b1, 0, 0];
        let bytes = bytes.as_slice();

        let item = ShortItem::try_from(bytes).unwrap();
        match item.item_type() {
            ItemType::Main(MainItem::Output(o)) => {
                assert!(!o.is_constant());
                assert!(o.is_variable());
                assert!(!o.is_relative());
                assert!(o.wraps());
                assert!(!o.is_nonlinear());
                assert!(o.has_no_preferred_state());
                assert!(!o.has_null_state());
                assert!(o.is_volatile());
                assert!(o.is_buffered_bytes());
                assert_eq!(o.flags(), 0x1aa);
            }
            _ => panic!("Wrong item type"),
        }
    }

    #[test]
    fn item_classes() {
        let classify = |bytes: &[u8]| ShortItem::try_from(bytes).unwrap().item_type();

        assert_eq!(
            classify(&[0x05, 0x01]),
            ItemType::Global(GlobalItem::UsagePage(UsagePage(1)))
        );
        assert_eq!(
            classify(&[0x09, 0x30]),
            ItemType::Local(LocalItem::Usage(UsageId(0x30)))
        );
        assert_eq!(
            classify(&[0xa1, 0x01]),
            ItemType::Main(MainItem::Collection(CollectionItem::Application))
        );
        assert_eq!(classify(&[0xc0]), ItemType::Main(MainItem::EndCollection));
        assert_eq!(classify(&[0xa4]), ItemType::Global(GlobalItem::Push));
        assert_eq!(classify(&[0xb4]), ItemType::Global(GlobalItem::Pop));
        // type bits 0b11 are reserved
        assert_eq!(classify(&[0x3c]), ItemType::Reserved { tag: 0x3 });
        assert_eq!(
            classify(&[0xd0]),
            ItemType::Main(MainItem::Reserved { tag: 0xd })
        );
        assert_eq!(
            classify(&[0x68, 0x01]),
            ItemType::Local(LocalItem::Reserved { tag: 0x6 })
        );
    }

    #[test]
    fn item_data() {
        let item = ShortItem::try_from([0x27u8, 1, 2, 3, 4].as_slice()).unwrap();
        assert_eq!(item.data(), [1, 2, 3, 4]);
        assert_eq!(
            item.item_type(),
            ItemType::Global(GlobalItem::LogicalMaximum(LogicalMaximum(0x04030201)))
        );
        let item = ShortItem::try_from([0xc0u8].as_slice()).unwrap();
        assert!(item.data().is_empty());
    }

    macro_rules! test_item_value {
        ($bytes:expr, $unsigned:expr, $signed:expr) => {
            let v = ItemValue::try_from($bytes.as_slice()).unwrap();
            assert_eq!(v.unsigned(), $unsigned);
            assert_eq!(v.signed(), $signed);
        };
    }

    #[test]
    fn item_value() {
        test_item_value!([0x1, 0x2, 0x3, 0x4], 0x04030201u32, 0x04030201);

        test_item_value!([0x7F], 0x7F, 127);
        test_item_value!([0x80], 0x80, -128);
        test_item_value!([0x81], 0x81, -127);
        test_item_value!([0xFF], 0xFF, -1);
        test_item_value!([0x0], 0x0, 0);

        test_item_value!([0xFF, 0x7F], 0x7FFFu32, 32767);
        test_item_value!([0x00, 0x80], 0x8000u32, -32768);
        test_item_value!([0xCC, 0xED], 0xEDCCu32, -4660);

        test_item_value!([0x00, 0x00, 0x00, 0x80], 0x80000000u32, -2147483648);
        test_item_value!([0x88, 0xA9, 0xCB, 0xED], 0xEDCBA988u32, -305419896);

        let empty: [u8; 0] = [];
        test_item_value!(empty, 0, 0);

        assert!(ItemValue::try_from([1u8, 2, 3].as_slice()).is_err());
    }

    #[test]
    fn signed_globals() {
        let items = ReportDescriptorItems::try_from(
            [0x15u8, 0x81, 0x25, 0x7f, 0x36, 0x00, 0xfc, 0x55, 0x0e].as_slice(),
        )
        .unwrap();
        let types: Vec<ItemType> = items.iter().map(|i| i.item_type()).collect();
        assert_eq!(
            types,
            [
                GlobalItem::LogicalMinimum(LogicalMinimum(-127)).into(),
                GlobalItem::LogicalMaximum(LogicalMaximum(127)).into(),
                GlobalItem::PhysicalMinimum(PhysicalMinimum(-1024)).into(),
                // Unit Exponent is sign-extended from the data width only
                GlobalItem::UnitExponent(UnitExponent(14)).into(),
            ]
        );
    }

    #[test]
    fn hidbytes() {
        assert_eq!(HidBytes::from(1u32).take(), [0x1]);
        assert_eq!(HidBytes::from(255u32).take(), [0xff]);
        assert_eq!(HidBytes::from(256u32).take(), [0x0, 0x1]);
        assert_eq!(HidBytes::from(0x10000u32).take(), [0x0, 0x0, 0x1, 0x0]);

        // >=128 signed is encoded over two bytes
        assert_eq!(HidBytes::from(128i32).take(), [0x80, 0x0]);
        assert_eq!(HidBytes::from(-1i32).take(), [0xff]);
        assert_eq!(HidBytes::from(-127i32).take(), [0x81]);
        assert_eq!(HidBytes::from(i32::MAX - 1).take(), [0xfe, 0xff, 0xff, 0x7f]);
    }

    #[test]
    fn item_encoding() {
        let bytes = ItemType::from(GlobalItem::LogicalMaximum(LogicalMaximum(255))).as_bytes();
        assert_eq!(bytes, [0x25, 0xff]);
        let bytes = ItemType::from(GlobalItem::LogicalMaximum(LogicalMaximum(-1))).as_bytes();
        assert_eq!(bytes, [0x27, 0xff, 0xff, 0xff, 0xff]);
        let bytes = ItemType::from(LocalItem::Usage(UsageId(0x0009_0001))).as_bytes();
        assert_eq!(bytes, [0x0b, 0x01, 0x00, 0x09, 0x00]);
        let bytes = ItemType::from(MainItem::Input(DataItem::new(0x02))).as_bytes();
        assert_eq!(bytes, [0x81, 0x02]);
        let bytes = ItemType::from(MainItem::EndCollection).as_bytes();
        assert_eq!(bytes, [0xc0]);
        let bytes = ItemType::from(GlobalItem::Push).as_bytes();
        assert_eq!(bytes, [0xa4]);
    }

    #[test]
    fn long_items() {
        let bytes = [0xfeu8, 0x02, 0xf0, 0xaa, 0xbb, 0xc0];
        let items = ReportDescriptorItems::try_from(bytes.as_slice()).unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[0].item().is_long_item());
        assert_eq!(items[0].item().size(), 5);
        assert_eq!(items[0].item().data(), [0xaa, 0xbb]);
        assert_eq!(items[0].item_type(), ItemType::Long { tag: 0xf0 });
        assert_eq!(items[1].offset(), 5);
        assert_eq!(items[1].item_type(), ItemType::Main(MainItem::EndCollection));
    }

    #[test]
    fn truncated_items() {
        // Logical Maximum promising two bytes, only one present
        let err = ReportDescriptorItems::try_from([0x05u8, 0x01, 0x26, 0xff].as_slice()).unwrap_err();
        assert_eq!(
            err,
            ParserError::MalformedDescriptor {
                offset: 2,
                needed: 3,
                available: 2
            }
        );

        let err = ReportDescriptorItems::try_from([0xfeu8, 0x04, 0x01, 0x00].as_slice()).unwrap_err();
        assert_eq!(
            err,
            ParserError::MalformedDescriptor {
                offset: 0,
                needed: 7,
                available: 4
            }
        );

        let err = ReportDescriptorItems::try_from([0xfeu8, 0x04].as_slice()).unwrap_err();
        assert!(matches!(err, ParserError::MalformedDescriptor { offset: 0, .. }));
    }

    #[test]
    fn empty_descriptor() {
        let items = ReportDescriptorItems::try_from([0u8; 0].as_slice()).unwrap();
        assert!(items.is_empty());
    }
}
