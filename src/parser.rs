// SPDX-License-Identifier: MIT

//! The item state machine of Section 6.2.2.
//!
//! A [Parser] walks the items of a report descriptor, keeping the global
//! and local state tables and a stack of open collections. Every Main item
//! becomes a node of the [ItemTree], data items get one [HidValue] per
//! report field annotated with its absolute bit offset.
//!
//! Recoverable problems in the descriptor are logged through [tracing] and
//! the offending item is ignored:
//!
//! | Problem                                 | Level   |
//! |-----------------------------------------|---------|
//! | End Collection without Collection       | error   |
//! | Pop without Push                        | error   |
//! | Bit offset overflow                     | error   |
//! | Report Size 0 or larger than 32         | warn    |
//! | Reserved Main item tag                  | warn    |
//! | Reserved Global/Local tags, long items  | debug   |

use crate::dump::{describe, hex};
use crate::hid::*;
use crate::state::{GlobalStack, GlobalState, LocalState};
use crate::tree::{HidValue, ItemTree, MainItemNode, MainItemType, NodeId, Usage};
use crate::types::*;

use tracing::{debug, error, warn};

/// The widest field the bit accessor can extract.
const MAX_FIELD_BITS: u32 = 32;

/// An incremental report descriptor parser.
///
/// ```
/// # use hidtree::*;
/// let mut parser = Parser::new();
/// parser.parse(&[0x05, 0x01, 0x09, 0x04, 0xa1, 0x01]).unwrap();
/// // the application collection is still open
/// assert_eq!(parser.item_stack().len(), 2);
/// parser.parse(&[0xc0]).unwrap();
/// assert_eq!(parser.item_stack().len(), 1);
/// let tree = parser.into_tree();
/// assert_eq!(tree.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    globals: GlobalStack,
    local: LocalState,
    tree: ItemTree,
    item_stack: Vec<NodeId>,
    bit_offset: u32,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        let tree = ItemTree::new();
        let root = tree.root();
        Parser {
            globals: GlobalStack::new(),
            local: LocalState::default(),
            tree,
            item_stack: vec![root],
            bit_offset: 0,
        }
    }

    /// Feed a report descriptor (or the next part of one) to the parser.
    ///
    /// The bytes are split into items first. If that fails, the error is
    /// returned and the parser is unchanged. A part must therefore end on
    /// an item boundary.
    pub fn parse(&mut self, bytes: &[u8]) -> crate::Result<()> {
        let items = ReportDescriptorItems::try_from(bytes)?;
        for rdesc_item in items.iter() {
            self.handle_item(rdesc_item);
        }
        Ok(())
    }

    /// The tree built so far.
    pub fn tree(&self) -> &ItemTree {
        &self.tree
    }

    pub fn into_tree(self) -> ItemTree {
        self.tree
    }

    /// The open items, root first. Always contains at least the root.
    pub fn item_stack(&self) -> &[NodeId] {
        &self.item_stack
    }

    /// The current (topmost) global state.
    pub fn global(&self) -> &GlobalState {
        self.globals.current()
    }

    /// The local state accumulated since the last Main item.
    pub fn local(&self) -> &LocalState {
        &self.local
    }

    /// The bit offset the next data field will start at.
    pub fn bit_offset(&self) -> u32 {
        self.bit_offset
    }

    fn top(&self) -> NodeId {
        self.item_stack
            .last()
            .copied()
            .unwrap_or_else(|| self.tree.root())
    }

    fn handle_item(&mut self, rdesc_item: &ReportDescriptorItem) {
        let item_type = rdesc_item.item_type();
        debug!(
            "{:3}: {:<19} {}{}",
            rdesc_item.offset(),
            hex(rdesc_item.item().bytes()),
            "  ".repeat(self.item_stack.len() - 1),
            describe(&item_type, self.globals.current().usage_page)
        );

        match item_type {
            ItemType::Main(item) => self.main_item(item),
            ItemType::Global(item) => self.global_item(item),
            ItemType::Local(item) => self.local_item(item),
            ItemType::Long { tag } => {
                debug!("skipping unsupported long item with tag {tag:#04x}")
            }
            ItemType::Reserved { tag } => {
                debug!("skipping short item of reserved type, tag {tag:#03x}")
            }
        }
    }

    fn main_item(&mut self, item: MainItem) {
        match item {
            MainItem::Input(data) => self.data_item(MainItemType::Input, data),
            MainItem::Output(data) => self.data_item(MainItemType::Output, data),
            MainItem::Feature(data) => self.data_item(MainItemType::Feature, data),
            MainItem::Collection(collection) => {
                let node = MainItemNode::new(
                    MainItemType::Collection,
                    u32::from(collection),
                    *self.globals.current(),
                    self.local.clone(),
                );
                let id = self.tree.add(self.top(), node);
                self.item_stack.push(id);
            }
            MainItem::EndCollection => {
                if self.item_stack.len() > 1 {
                    self.item_stack.pop();
                } else {
                    error!("End Collection without matching Collection, ignoring");
                }
            }
            MainItem::Reserved { tag } => warn!("skipping reserved main item {tag:#03x}"),
        }
        self.local.reset();
    }

    fn data_item(&mut self, item_type: MainItemType, data: DataItem) {
        let global = *self.globals.current();
        let size = global.report_size.0;
        let count = global.report_count.0;
        let mut node = MainItemNode::new(item_type, data.flags(), global, self.local.clone());

        if size == 0 {
            if count > 0 {
                warn!("{item_type} item with Report Count {count} but Report Size 0, no fields created");
            }
        } else {
            let Some(end) = global
                .bit_length()
                .and_then(|len| self.bit_offset.checked_add(len))
            else {
                error!(
                    "{item_type} item of {count}x{size} bits at bit {} overflows the report, skipping",
                    self.bit_offset
                );
                return;
            };
            if size > MAX_FIELD_BITS {
                warn!("{item_type} item with Report Size {size} > {MAX_FIELD_BITS}, no fields created");
            } else {
                node.values = self.fields(&global, count, size);
            }
            self.bit_offset = end;
        }

        self.tree.add(self.top(), node);
    }

    /// Create `count` fields of `size` bits each at the current bit offset.
    /// The caller guarantees that the fields fit into a `u32` bit offset.
    fn fields(&self, global: &GlobalState, count: u32, size: u32) -> Vec<HidValue> {
        let usage_minimum = self.local.usage_minimum.map_or(0, u32::from);
        (0..count)
            .map(|i| {
                let bit_offset = self.bit_offset + i * size;
                match self.local.usages.get(i as usize) {
                    Some(&usage) => {
                        let usage = Usage::resolve(global.usage_page, usage);
                        HidValue {
                            name: usage.name(),
                            usage: Some(usage),
                            bit_offset,
                            bit_width: size,
                        }
                    }
                    None => {
                        let n = usage_minimum.wrapping_add(i);
                        HidValue {
                            name: format!("#{n}"),
                            usage: self
                                .local
                                .usage_minimum
                                .map(|_| Usage::resolve(global.usage_page, UsageId(n))),
                            bit_offset,
                            bit_width: size,
                        }
                    }
                }
            })
            .collect()
    }

    fn global_item(&mut self, item: GlobalItem) {
        let global = self.globals.current_mut();
        match item {
            GlobalItem::UsagePage(page) => global.usage_page = page,
            GlobalItem::LogicalMinimum(min) => global.logical_minimum = min,
            GlobalItem::LogicalMaximum(max) => global.logical_maximum = max,
            GlobalItem::PhysicalMinimum(min) => global.physical_minimum = Some(min),
            GlobalItem::PhysicalMaximum(max) => global.physical_maximum = Some(max),
            GlobalItem::UnitExponent(exponent) => global.unit_exponent = Some(exponent),
            GlobalItem::Unit(unit) => global.unit = unit,
            GlobalItem::ReportSize(size) => global.report_size = size,
            GlobalItem::ReportId(id) => global.report_id = id,
            GlobalItem::ReportCount(count) => global.report_count = count,
            GlobalItem::Push => self.globals.push(),
            GlobalItem::Pop => {
                if !self.globals.pop() {
                    error!("Pop without matching Push, ignoring");
                }
            }
            GlobalItem::Reserved { tag } => debug!("skipping reserved global item {tag:#03x}"),
        }
    }

    fn local_item(&mut self, item: LocalItem) {
        let local = &mut self.local;
        match item {
            LocalItem::Usage(usage) => local.usages.push(usage),
            LocalItem::UsageMinimum(min) => local.usage_minimum = Some(min),
            LocalItem::UsageMaximum(max) => local.usage_maximum = Some(max),
            LocalItem::DesignatorIndex(idx) => local.designator_index = Some(idx),
            LocalItem::DesignatorMinimum(min) => local.designator_minimum = Some(min),
            LocalItem::DesignatorMaximum(max) => local.designator_maximum = Some(max),
            LocalItem::StringIndex(idx) => local.string_index = Some(idx),
            LocalItem::StringMinimum(min) => local.string_minimum = Some(min),
            LocalItem::StringMaximum(max) => local.string_maximum = Some(max),
            LocalItem::Delimiter(delimiter) => local.delimiter = Some(delimiter),
            LocalItem::Reserved { tag } => debug!("skipping reserved local item {tag:#03x}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, ParserError};

    fn offsets(tree: &ItemTree) -> Vec<(String, u32, u32)> {
        tree.iter()
            .flat_map(|(_, n)| n.values.iter())
            .map(|v| (v.name.clone(), v.bit_offset, v.bit_width))
            .collect()
    }

    #[test]
    fn end_to_end() {
        let rdesc = [
            0x05, 0x01, 0x09, 0x30, 0x09, 0x31, 0x15, 0x00, 0x26, 0xff, 0x00, 0x75, 0x08, 0x95,
            0x02, 0x81, 0x02,
        ];
        let tree = parse(&rdesc).unwrap();
        assert_eq!(tree.len(), 2);
        let (_, input) = tree.children(tree.root()).next().unwrap();
        assert_eq!(input.item_type, MainItemType::Input);
        assert_eq!(input.global.logical_minimum, LogicalMinimum(0));
        assert_eq!(input.global.logical_maximum, LogicalMaximum(255));
        assert_eq!(
            offsets(&tree),
            [("X".to_string(), 0, 8), ("Y".to_string(), 8, 8)]
        );
        let values: Vec<u32> = crate::decode_report(&tree, &[0x10, 0x20])
            .unwrap()
            .map(|v| v.unsigned())
            .collect();
        assert_eq!(values, [16, 32]);
    }

    #[test]
    fn offsets_span_collections() {
        let rdesc = [
            0x05u8, 0x01, // Usage Page (Generic Desktop)
            0xa1, 0x01, // Collection (Application)
            0xa1, 0x00, //   Collection (Physical)
            0x09, 0x30, //     Usage (X)
            0x75, 0x0c, //     Report Size (12)
            0x95, 0x01, //     Report Count (1)
            0x81, 0x02, //     Input
            0xc0, //   End Collection
            0xa1, 0x00, //   Collection (Physical)
            0x09, 0x31, //     Usage (Y)
            0x81, 0x02, //     Input
            0xc0, //   End Collection
            0x75, 0x08, //   Report Size (8)
            0x95, 0x02, //   Report Count (2)
            0x91, 0x02, //   Output
            0x09, 0x32, //   Usage (Z)
            0x95, 0x01, //   Report Count (1)
            0x81, 0x02, //   Input
            0xc0, // End Collection
        ];
        let mut parser = Parser::new();
        parser.parse(&rdesc).unwrap();
        assert_eq!(parser.bit_offset(), 48);
        let tree = parser.into_tree();
        assert_eq!(
            offsets(&tree),
            [
                ("X".to_string(), 0, 12),
                ("Y".to_string(), 12, 12),
                ("#0".to_string(), 24, 8),
                ("#1".to_string(), 32, 8),
                ("Z".to_string(), 40, 8),
            ]
        );
    }

    #[test]
    fn push_pop() {
        let rdesc = [
            0x05u8, 0x01, // Usage Page (Generic Desktop)
            0x75, 0x08, // Report Size (8)
            0xa4, // Push
            0x05, 0x09, // Usage Page (Button)
            0x75, 0x01, // Report Size (1)
            0x15, 0x81, // Logical Minimum (-127)
            0xb4, // Pop
        ];
        let mut parser = Parser::new();
        parser.parse(&rdesc[..4]).unwrap();
        let before = *parser.global();
        parser.parse(&rdesc[4..]).unwrap();
        assert_eq!(*parser.global(), before);
        assert_eq!(parser.global().usage_page, UsagePage(1));
        assert_eq!(parser.global().report_size, ReportSize(8));

        // underflow is ignored
        parser.parse(&[0xb4]).unwrap();
        assert_eq!(*parser.global(), before);

        // fields after the Pop resolve against the restored Usage Page
        parser
            .parse(&[
                0x09, 0x30, // Usage (X)
                0x95, 0x01, // Report Count (1)
                0x81, 0x02, // Input (Data,Var,Abs)
            ])
            .unwrap();
        let tree = parser.into_tree();
        assert_eq!(offsets(&tree), [("X".to_string(), 0, 8)]);
        let (_, input) = tree.input_items().next().unwrap();
        assert_eq!(
            input.values[0].usage,
            Some(Usage {
                usage_page: UsagePage(0x01),
                usage_id: UsageId(0x30)
            })
        );
    }

    #[test]
    fn local_state_reset() {
        let rdesc = [
            0x05u8, 0x01, // Usage Page (Generic Desktop)
            0x09, 0x30, // Usage (X)
            0x19, 0x01, // Usage Minimum (1)
            0x75, 0x08, // Report Size (8)
            0x95, 0x01, // Report Count (1)
            0x81, 0x02, // Input
            0x81, 0x02, // Input
        ];
        let mut parser = Parser::new();
        parser.parse(&rdesc[..10]).unwrap();
        assert_eq!(parser.local().usages, [UsageId(0x30)]);
        assert_eq!(parser.local().usage_minimum, Some(UsageMinimum(1)));
        parser.parse(&rdesc[10..12]).unwrap();
        assert_eq!(*parser.local(), LocalState::default());
        parser.parse(&rdesc[12..]).unwrap();
        // the second Input sees none of the first Input's usages
        assert_eq!(
            offsets(parser.tree()),
            [("X".to_string(), 0, 8), ("#0".to_string(), 8, 8)]
        );

        // Collections and End Collection reset local state too
        parser.parse(&[0x09, 0x04, 0xa1, 0x01]).unwrap();
        assert!(parser.local().usages.is_empty());
        parser.parse(&[0x09, 0x04, 0xc0]).unwrap();
        assert!(parser.local().usages.is_empty());
    }

    #[test]
    fn signed_minimum() {
        let tree = parse(&[0x15, 0x81, 0x75, 0x08, 0x95, 0x01, 0x81, 0x02]).unwrap();
        let (_, input) = tree.children(tree.root()).next().unwrap();
        assert_eq!(input.global.logical_minimum, LogicalMinimum(-127));
    }

    #[test]
    fn vendor_usage() {
        let rdesc = [
            0x06u8, 0x00, 0xff, // Usage Page (Vendor Defined 0xFF00)
            0x09, 0x05, // Usage (5)
            0x75, 0x08, // Report Size (8)
            0x95, 0x01, // Report Count (1)
            0xb1, 0x02, // Feature
        ];
        let tree = parse(&rdesc).unwrap();
        assert_eq!(offsets(&tree), [("5".to_string(), 0, 8)]);
    }

    #[test]
    fn collection_nesting() {
        let rdesc = [
            0xa1u8, 0x01, // Collection (Application)
            0xa1, 0x00, //   Collection (Physical)
            0xc0, //   End Collection
            0xc0, // End Collection
            0xc0, // End Collection, unmatched
            0xa1, 0x02, // Collection (Logical)
        ];
        let mut parser = Parser::new();
        parser.parse(&rdesc[..4]).unwrap();
        assert_eq!(parser.item_stack().len(), 3);
        parser.parse(&rdesc[4..7]).unwrap();
        assert_eq!(parser.item_stack(), [parser.tree().root()]);
        parser.parse(&rdesc[7..]).unwrap();

        let tree = parser.into_tree();
        let root = tree.root();
        let top: Vec<u32> = tree
            .children(root)
            .map(|(_, n)| n.collection_value)
            .collect();
        assert_eq!(top, [0x01, 0x02]);
        let (app, _) = tree.children(root).next().unwrap();
        let (phys, node) = tree.children(app).next().unwrap();
        assert_eq!(node.item_type, MainItemType::Collection);
        assert_eq!(tree.parent(phys), Some(app));
        assert_eq!(tree.parent(app), Some(root));
    }

    #[test]
    fn constant_fields() {
        let rdesc = [
            0x05u8, 0x01, // Usage Page (Generic Desktop)
            0x09, 0x30, // Usage (X)
            0x75, 0x04, // Report Size (4)
            0x95, 0x01, // Report Count (1)
            0x81, 0x02, // Input
            0x81, 0x01, // Input (Cnst)
            0x09, 0x31, // Usage (Y)
            0x75, 0x08, // Report Size (8)
            0x81, 0x02, // Input
        ];
        let tree = parse(&rdesc).unwrap();
        let consts: Vec<bool> = tree.iter().skip(1).map(|(_, n)| n.is_constant()).collect();
        assert_eq!(consts, [false, true, false]);
        // padding keeps its bit space
        assert_eq!(
            offsets(&tree),
            [
                ("X".to_string(), 0, 4),
                ("#0".to_string(), 4, 4),
                ("Y".to_string(), 8, 8)
            ]
        );
        let values: Vec<(String, u32)> = crate::decode_report(&tree, &[0xf3, 0x42])
            .unwrap()
            .map(|v| (v.name().to_string(), v.unsigned()))
            .collect();
        assert_eq!(values, [("X".to_string(), 3), ("Y".to_string(), 0x42)]);
    }

    #[test]
    fn usage_ranges() {
        let rdesc = [
            0x05u8, 0x09, // Usage Page (Button)
            0x19, 0x05, // Usage Minimum (5)
            0x29, 0x07, // Usage Maximum (7)
            0x75, 0x01, // Report Size (1)
            0x95, 0x03, // Report Count (3)
            0x81, 0x02, // Input
        ];
        let tree = parse(&rdesc).unwrap();
        let fields = &tree.iter().nth(1).unwrap().1.values;
        let names: Vec<&str> = fields.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["#5", "#6", "#7"]);
        assert_eq!(
            fields[2].usage,
            Some(Usage {
                usage_page: UsagePage(0x09),
                usage_id: UsageId(7)
            })
        );
    }

    #[test]
    fn extended_usages() {
        let rdesc = [
            0x05u8, 0x01, // Usage Page (Generic Desktop)
            0x0b, 0x02, 0x00, 0x09, 0x00, // Usage (Button 2)
            0x09, 0x30, // Usage (X)
            0x75, 0x08, // Report Size (8)
            0x95, 0x02, // Report Count (2)
            0x81, 0x02, // Input
        ];
        let tree = parse(&rdesc).unwrap();
        assert_eq!(
            offsets(&tree),
            [("Button 2".to_string(), 0, 8), ("X".to_string(), 8, 8)]
        );
    }

    #[test]
    fn unusual_sizes() {
        let rdesc = [
            0x75u8, 0x00, // Report Size (0)
            0x95, 0x04, // Report Count (4)
            0x81, 0x02, // Input: no fields, no bits
            0x75, 0x28, // Report Size (40)
            0x95, 0x01, // Report Count (1)
            0x81, 0x02, // Input: no fields, 40 bits
            0x75, 0x08, // Report Size (8)
            0x81, 0x02, // Input
        ];
        let mut parser = Parser::new();
        parser.parse(&rdesc).unwrap();
        assert_eq!(parser.bit_offset(), 48);
        let tree = parser.tree();
        // the nodes exist even without fields
        assert_eq!(tree.len(), 4);
        assert_eq!(offsets(tree), [("#0".to_string(), 40, 8)]);
    }

    #[test]
    fn offset_overflow() {
        let rdesc = [
            0x75u8, 0x20, // Report Size (32)
            0x97, 0x00, 0x00, 0x00, 0x08, // Report Count (0x08000000)
            0x81, 0x03, // Input (Cnst): 2^32 bits
        ];
        let mut parser = Parser::new();
        parser.parse(&rdesc).unwrap();
        assert_eq!(parser.bit_offset(), 0);
        assert_eq!(parser.tree().len(), 1);
        assert!(parser.local().usages.is_empty());
    }

    #[test]
    fn reserved_and_long_items() {
        let rdesc = [
            0xfeu8, 0x02, 0xf0, 0x01, 0x02, // Long item
            0xd0, // Reserved main item
            0xf4, // Reserved global item
            0x68, 0x01, // Reserved local item
            0x3c, // Reserved item type
        ];
        let mut parser = Parser::new();
        parser.parse(&rdesc).unwrap();
        assert_eq!(parser.tree().len(), 1);
        assert_eq!(*parser.global(), GlobalState::default());
        assert_eq!(*parser.local(), LocalState::default());
    }

    #[test]
    fn truncated_descriptor() {
        let mut parser = Parser::new();
        parser.parse(&[0x05, 0x01]).unwrap();
        let err = parser.parse(&[0x09, 0x30, 0x75]).unwrap_err();
        assert!(matches!(err, ParserError::MalformedDescriptor { .. }));
        // nothing of the failed part was applied
        assert!(parser.local().usages.is_empty());
        assert_eq!(parser.global().usage_page, UsagePage(1));
        assert_eq!(
            parse(&[0x05, 0x01, 0x26, 0xff]),
            Err(ParserError::MalformedDescriptor {
                offset: 2,
                needed: 3,
                available: 2
            })
        );
    }

    #[test]
    fn physical_range() {
        let rdesc = [
            0x15u8, 0x00, // Logical Minimum (0)
            0x26, 0xff, 0x03, // Logical Maximum (1023)
            0x75, 0x0a, // Report Size (10)
            0x95, 0x01, // Report Count (1)
            0x81, 0x02, // Input
            0x35, 0x00, // Physical Minimum (0)
            0x46, 0x68, 0x01, // Physical Maximum (360)
            0x65, 0x14, // Unit (Degrees)
            0x55, 0x0f, // Unit Exponent
            0x81, 0x02, // Input
        ];
        let tree = parse(&rdesc).unwrap();
        let ranges: Vec<(i32, i32)> = tree
            .iter()
            .skip(1)
            .map(|(_, n)| n.global.physical_range())
            .collect();
        assert_eq!(ranges, [(0, 1023), (0, 360)]);
        let (_, second) = tree.iter().nth(2).unwrap();
        assert_eq!(second.global.unit, Unit(0x14));
        assert_eq!(second.global.unit_exponent, Some(UnitExponent(15)));
    }
}
