// SPDX-License-Identifier: MIT

//! Programmatic construction of report descriptor bytes.

use crate::hid::*;
use crate::types::*;

/// A struct for programatically building a HID Report Descriptor.
///
/// Items are encoded with the minimum data length their value needs.
/// The builder does not validate anything: unbalanced collections,
/// a Pop without Push or duplicate items end up in the bytes as-is.
///
/// ```
/// # use hidtree::*;
/// # use hidtree::hid::CollectionItem;
/// let rdesc = ReportDescriptorBuilder::new()
///     .usage_page(0x01)
///     .usage(0x02)
///     .open_collection(CollectionItem::Application)
///     .usage(0x30)
///     .usage(0x31)
///     .logical_minimum(-127)
///     .logical_maximum(127)
///     .report_size(8)
///     .report_count(2)
///     .input(0x06)
///     .close_collection()
///     .build();
/// let tree = parse(&rdesc).unwrap();
/// let names: Vec<String> = decode_report(&tree, &[0xff, 0x01])
///     .unwrap()
///     .map(|v| format!("{}={}", v.name(), v.signed()))
///     .collect();
/// assert_eq!(names, ["X=-1", "Y=1"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReportDescriptorBuilder {
    items: Vec<ItemType>,
}

impl ReportDescriptorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item to this builder. This will append the necessary
    /// bytes once [ReportDescriptorBuilder::build()] is called.
    pub fn append(mut self, item: ItemType) -> Self {
        self.items.push(item);
        self
    }

    fn global(self, item: GlobalItem) -> Self {
        self.append(item.into())
    }

    fn local(self, item: LocalItem) -> Self {
        self.append(item.into())
    }

    fn main(self, item: MainItem) -> Self {
        self.append(item.into())
    }

    pub fn usage_page(self, usage_page: u32) -> Self {
        self.global(GlobalItem::UsagePage(UsagePage(usage_page)))
    }

    /// Append a Usage. Values above `0xFFFF` are extended usages that
    /// carry their own Usage Page in the upper 16 bits.
    pub fn usage(self, usage: u32) -> Self {
        self.local(LocalItem::Usage(UsageId(usage)))
    }

    pub fn usage_minimum(self, min: u32) -> Self {
        self.local(LocalItem::UsageMinimum(UsageMinimum(min)))
    }

    pub fn usage_maximum(self, max: u32) -> Self {
        self.local(LocalItem::UsageMaximum(UsageMaximum(max)))
    }

    /// Append the Usage Page of the given [hut] usage page.
    #[cfg(feature = "hut")]
    pub fn hut_usage_page(self, usage_page: impl hut::AsUsagePage) -> Self {
        self.usage_page(u32::from(usage_page.usage_page_value()))
    }

    /// Append the given [hut] usage as an extended (4-byte) Usage, so
    /// that it resolves to the right usage regardless of the Usage Page
    /// currently in effect.
    #[cfg(feature = "hut")]
    pub fn hut_usage(self, usage: impl hut::AsUsage) -> Self {
        self.usage(usage.usage_value())
    }

    pub fn logical_minimum(self, min: i32) -> Self {
        self.global(GlobalItem::LogicalMinimum(LogicalMinimum(min)))
    }

    pub fn logical_maximum(self, max: i32) -> Self {
        self.global(GlobalItem::LogicalMaximum(LogicalMaximum(max)))
    }

    pub fn physical_minimum(self, min: i32) -> Self {
        self.global(GlobalItem::PhysicalMinimum(PhysicalMinimum(min)))
    }

    pub fn physical_maximum(self, max: i32) -> Self {
        self.global(GlobalItem::PhysicalMaximum(PhysicalMaximum(max)))
    }

    pub fn unit(self, unit: u32) -> Self {
        self.global(GlobalItem::Unit(Unit(unit)))
    }

    pub fn unit_exponent(self, exponent: i32) -> Self {
        self.global(GlobalItem::UnitExponent(UnitExponent(exponent)))
    }

    pub fn report_size(self, size: u32) -> Self {
        self.global(GlobalItem::ReportSize(ReportSize(size)))
    }

    pub fn report_count(self, count: u32) -> Self {
        self.global(GlobalItem::ReportCount(ReportCount(count)))
    }

    pub fn report_id(self, id: u32) -> Self {
        self.global(GlobalItem::ReportId(ReportId(id)))
    }

    pub fn push(self) -> Self {
        self.global(GlobalItem::Push)
    }

    pub fn pop(self) -> Self {
        self.global(GlobalItem::Pop)
    }

    pub fn open_collection(self, collection: CollectionItem) -> Self {
        self.main(MainItem::Collection(collection))
    }

    pub fn close_collection(self) -> Self {
        self.main(MainItem::EndCollection)
    }

    /// Append an Input item with the given attribute flags,
    /// see [DataItem].
    pub fn input(self, flags: u32) -> Self {
        self.main(MainItem::Input(DataItem::new(flags)))
    }

    pub fn output(self, flags: u32) -> Self {
        self.main(MainItem::Output(DataItem::new(flags)))
    }

    pub fn feature(self, flags: u32) -> Self {
        self.main(MainItem::Feature(DataItem::new(flags)))
    }

    /// Build the report descriptor bytes.
    ///
    /// This does **not** optimize potentially duplicate items added by the caller,
    /// e.g. adding two consecutive `ReportSize()` in the builder will result
    /// in both of these showing up in the resulting report descriptor byte array.
    pub fn build(&self) -> Vec<u8> {
        self.items.iter().flat_map(ItemType::as_bytes).collect()
    }
}
