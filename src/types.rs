// SPDX-License-Identifier: MIT

//! A collection of standalone HID types that exist for type safety only.
//! These are all simple wrappers around their underlying integer data type.
//!
//! All unsigned values are widened to `u32` on extraction, signed values
//! (minimums and the unit exponent) to `i32` after sign-extension from the
//! width of the item payload.
//!
//! In this document and unless stated otherwise, a reference to "Section a.b.c" refers to the
//! [HID Device Class Definition for HID 1.11](https://www.usb.org/document-library/device-class-definition-hid-111).

/// Creates a `From<Foo> for u32` and `From<u32> for Foo` implementation for the given `Foo` type.
/// Use like this: `impl_from(Foo, Foo, u32)`.
macro_rules! impl_from {
    ($tipo:ty, $tipo_expr:expr, $to:ty) => {
        impl From<$tipo> for $to {
            fn from(f: $tipo) -> $to {
                f.0
            }
        }
        impl From<&$tipo> for $to {
            fn from(f: &$tipo) -> $to {
                f.0
            }
        }
        impl From<$to> for $tipo {
            fn from(f: $to) -> Self {
                $tipo_expr(f)
            }
        }
    };
}

/// Creates a `impl Display for Foo` that just converts into the underlying number.
/// Use like this: `impl_fmt(Foo, u32)`.
macro_rules! impl_fmt {
    ($tipo:ty, $to:ty) => {
        impl std::fmt::Display for $tipo {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let v: $to = self.into();
                write!(f, "{v}")
            }
        }
    };
}

// ---------- GLOBAL ITEMS ---------------------

/// The Usage Page, Section 6.2.2.7. Older tooling calls this the "usage table".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct UsagePage(pub u32);

impl UsagePage {
    /// Usage Pages `0xFF00..=0xFFFF` are vendor-defined and carry no
    /// standard usage names.
    pub fn is_vendor_defined(&self) -> bool {
        (0xFF00..=0xFFFF).contains(&self.0)
    }
}

impl_from!(UsagePage, UsagePage, u32);
impl_fmt!(UsagePage, u32);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LogicalMinimum(pub i32);

impl_from!(LogicalMinimum, LogicalMinimum, i32);
impl_fmt!(LogicalMinimum, i32);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LogicalMaximum(pub i32);

impl_from!(LogicalMaximum, LogicalMaximum, i32);
impl_fmt!(LogicalMaximum, i32);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PhysicalMinimum(pub i32);

impl_from!(PhysicalMinimum, PhysicalMinimum, i32);
impl_fmt!(PhysicalMinimum, i32);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PhysicalMaximum(pub i32);

impl_from!(PhysicalMaximum, PhysicalMaximum, i32);
impl_fmt!(PhysicalMaximum, i32);

/// A unit in the 7-nibble HID unit system, see Section 6.2.2.7.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Unit(pub u32);

impl_from!(Unit, Unit, u32);
impl_fmt!(Unit, u32);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct UnitExponent(pub i32);

impl_from!(UnitExponent, UnitExponent, i32);
impl_fmt!(UnitExponent, i32);

/// The size of one field in bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ReportSize(pub u32);

impl_from!(ReportSize, ReportSize, u32);
impl_fmt!(ReportSize, u32);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ReportId(pub u32);

impl_from!(ReportId, ReportId, u32);
impl_fmt!(ReportId, u32);

/// The number of fields of [ReportSize] bits in the next data item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ReportCount(pub u32);

impl_from!(ReportCount, ReportCount, u32);
impl_fmt!(ReportCount, u32);

// ----------------- LOCAL ITEMS --------------------

/// A Usage as found in a Usage local item. For 4-byte items the upper
/// 16 bits may carry a Usage Page, see [UsageId::extended_page].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct UsageId(pub u32);

impl UsageId {
    /// The Usage Page embedded in an extended (32-bit) usage, if any.
    pub fn extended_page(&self) -> Option<UsagePage> {
        match self.0 >> 16 {
            0 => None,
            page => Some(UsagePage(page)),
        }
    }

    /// The 16-bit usage id without any embedded Usage Page.
    pub fn id(&self) -> u32 {
        self.0 & 0xFFFF
    }
}

impl_from!(UsageId, UsageId, u32);
impl_fmt!(UsageId, u32);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct UsageMinimum(pub u32);

impl_from!(UsageMinimum, UsageMinimum, u32);
impl_fmt!(UsageMinimum, u32);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct UsageMaximum(pub u32);

impl_from!(UsageMaximum, UsageMaximum, u32);
impl_fmt!(UsageMaximum, u32);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StringIndex(pub u32);

impl_from!(StringIndex, StringIndex, u32);
impl_fmt!(StringIndex, u32);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StringMinimum(pub u32);

impl_from!(StringMinimum, StringMinimum, u32);
impl_fmt!(StringMinimum, u32);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StringMaximum(pub u32);

impl_from!(StringMaximum, StringMaximum, u32);
impl_fmt!(StringMaximum, u32);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DesignatorIndex(pub u32);

impl_from!(DesignatorIndex, DesignatorIndex, u32);
impl_fmt!(DesignatorIndex, u32);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DesignatorMinimum(pub u32);

impl_from!(DesignatorMinimum, DesignatorMinimum, u32);
impl_fmt!(DesignatorMinimum, u32);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DesignatorMaximum(pub u32);

impl_from!(DesignatorMaximum, DesignatorMaximum, u32);
impl_fmt!(DesignatorMaximum, u32);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Delimiter(pub u32);

impl_from!(Delimiter, Delimiter, u32);
impl_fmt!(Delimiter, u32);
