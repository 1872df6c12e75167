// SPDX-License-Identifier: MIT

//! An annotated, human-readable listing of a report descriptor.
//!
//! ```
//! # use hidtree::dump;
//! let listing = dump(&[0x05, 0x01, 0x09, 0x04, 0xa1, 0x01, 0xc0]).unwrap();
//! assert_eq!(
//!     listing,
//!     "  0: 05 01               Usage Page 'Generic Desktop Controls'\n\
//!     \x20 2: 09 04               Usage 'Joystick'\n\
//!     \x20 4: a1 01               Collection 'Application (mouse, keyboard)'\n\
//!     \x20 6: c0                  End Collection\n"
//! );
//! ```

use crate::hid::*;
use crate::tree::{MainItemType, Usage};
use crate::types::*;
use crate::usages;
use crate::ParserError;

/// A one-line description of a single item. Usages are resolved against
/// `usage_page`, the Usage Page in effect when the item is seen.
pub(crate) fn describe(item: &ItemType, usage_page: UsagePage) -> String {
    match item {
        ItemType::Main(item) => describe_main(item),
        ItemType::Global(item) => describe_global(item),
        ItemType::Local(item) => describe_local(item, usage_page),
        ItemType::Long { tag } => format!("Long item, tag {tag:#04x}"),
        ItemType::Reserved { tag } => format!("Reserved item, tag {tag:#03x}"),
    }
}

fn describe_main(item: &MainItem) -> String {
    match item {
        MainItem::Input(d) => format!(
            "Input {}",
            usages::data_flags_description(MainItemType::Input, d.flags())
        ),
        MainItem::Output(d) => format!(
            "Output {}",
            usages::data_flags_description(MainItemType::Output, d.flags())
        ),
        MainItem::Feature(d) => format!(
            "Feature {}",
            usages::data_flags_description(MainItemType::Feature, d.flags())
        ),
        MainItem::Collection(c) => {
            format!("Collection '{}'", usages::collection_name(u32::from(c)))
        }
        MainItem::EndCollection => "End Collection".to_string(),
        MainItem::Reserved { tag } => format!("Reserved main item, tag {tag:#03x}"),
    }
}

fn describe_global(item: &GlobalItem) -> String {
    match item {
        GlobalItem::UsagePage(page) => {
            format!("Usage Page '{}'", usages::usage_page_name(page.0))
        }
        GlobalItem::LogicalMinimum(v) => format!("Logical Minimum = {v}"),
        GlobalItem::LogicalMaximum(v) => format!("Logical Maximum = {v}"),
        GlobalItem::PhysicalMinimum(v) => format!("Physical Minimum = {v}"),
        GlobalItem::PhysicalMaximum(v) => format!("Physical Maximum = {v}"),
        GlobalItem::UnitExponent(v) => format!("Unit Exponent = {v}"),
        GlobalItem::Unit(u) => format!("Unit = {}", usages::unit_description(u.0)),
        GlobalItem::ReportSize(v) => format!("Report Size = {v}"),
        GlobalItem::ReportId(v) => format!("Report ID = {v}"),
        GlobalItem::ReportCount(v) => format!("Report Count = {v}"),
        GlobalItem::Push => "Push".to_string(),
        GlobalItem::Pop => "Pop".to_string(),
        GlobalItem::Reserved { tag } => format!("Reserved global item, tag {tag:#03x}"),
    }
}

fn describe_local(item: &LocalItem, usage_page: UsagePage) -> String {
    match item {
        LocalItem::Usage(usage) => {
            format!("Usage '{}'", Usage::resolve(usage_page, *usage).name())
        }
        LocalItem::UsageMinimum(v) => format!("Usage Minimum = {v}"),
        LocalItem::UsageMaximum(v) => format!("Usage Maximum = {v}"),
        LocalItem::DesignatorIndex(v) => format!("Designator Index = {v}"),
        LocalItem::DesignatorMinimum(v) => format!("Designator Minimum = {v}"),
        LocalItem::DesignatorMaximum(v) => format!("Designator Maximum = {v}"),
        LocalItem::StringIndex(v) => format!("String Index = {v}"),
        LocalItem::StringMinimum(v) => format!("String Minimum = {v}"),
        LocalItem::StringMaximum(v) => format!("String Maximum = {v}"),
        LocalItem::Delimiter(v) => format!("Delimiter = {v}"),
        LocalItem::Reserved { tag } => format!("Reserved local item, tag {tag:#03x}"),
    }
}

/// The raw bytes of an item as space-separated hex.
pub(crate) fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<String>>()
        .join(" ")
}

/// Render the report descriptor as one line per item: the decimal offset,
/// the item bytes and a description, indented by collection depth.
///
/// Only the Usage Page (and Push/Pop of it) is tracked to name usages,
/// nothing else is interpreted. Like [crate::parse] this fails only for
/// truncated descriptors.
pub fn dump(bytes: &[u8]) -> Result<String, ParserError> {
    let items = ReportDescriptorItems::try_from(bytes)?;
    let mut pages = vec![UsagePage::default()];
    let mut depth: usize = 0;
    let mut listing = String::new();

    for rdesc_item in items.iter() {
        let item_type = rdesc_item.item_type();
        if item_type == ItemType::Main(MainItem::EndCollection) {
            depth = depth.saturating_sub(1);
        }
        let usage_page = pages.last().copied().unwrap_or_default();
        listing.push_str(&format!(
            "{:3}: {:<19} {}{}\n",
            rdesc_item.offset(),
            hex(rdesc_item.item().bytes()),
            "  ".repeat(depth),
            describe(&item_type, usage_page)
        ));

        match item_type {
            ItemType::Main(MainItem::Collection(_)) => depth += 1,
            ItemType::Global(GlobalItem::UsagePage(page)) => {
                if let Some(top) = pages.last_mut() {
                    *top = page;
                }
            }
            ItemType::Global(GlobalItem::Push) => pages.push(usage_page),
            ItemType::Global(GlobalItem::Pop) if pages.len() > 1 => {
                pages.pop();
            }
            _ => {}
        }
    }
    Ok(listing)
}
