// SPDX-License-Identifier: MIT

//! The tree of Main items built by the [Parser](crate::Parser).
//!
//! The tree is an arena: [ItemTree] owns every [MainItemNode] and nodes
//! refer to their parent and children by [NodeId]. Dropping the tree drops
//! every node. Nodes are stored in the order their items appear in the
//! report descriptor, which is also a depth-first pre-order of the tree.

use crate::hid::{CollectionItem, DataItem};
use crate::state::{GlobalState, LocalState};
use crate::types::*;
use crate::usages;

use std::fmt;

/// Index of a node within its [ItemTree].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MainItemType {
    Root,
    Collection,
    Input,
    Output,
    Feature,
}

impl MainItemType {
    /// True for the types that create report fields.
    pub fn is_data(&self) -> bool {
        matches!(
            self,
            MainItemType::Input | MainItemType::Output | MainItemType::Feature
        )
    }
}

impl fmt::Display for MainItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MainItemType::Root => "Root",
            MainItemType::Collection => "Collection",
            MainItemType::Input => "Input",
            MainItemType::Output => "Output",
            MainItemType::Feature => "Feature",
        };
        f.write_str(s)
    }
}

/// A fully qualified usage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Usage {
    pub usage_page: UsagePage,
    pub usage_id: UsageId,
}

impl Usage {
    /// Resolve a usage from a Usage local item, taking the Usage Page
    /// from the item itself if it is an extended usage.
    pub fn resolve(usage_page: UsagePage, usage: UsageId) -> Usage {
        match usage.extended_page() {
            Some(page) => Usage {
                usage_page: page,
                usage_id: UsageId(usage.id()),
            },
            None => Usage {
                usage_page,
                usage_id: usage,
            },
        }
    }

    /// The human-readable name, see [usages::usage_name].
    pub fn name(&self) -> String {
        usages::usage_name(self.usage_page.0, self.usage_id.0)
    }
}

/// One field within an Input, Output or Feature item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HidValue {
    /// The usage name, `#<n>` for a field whose usage is implied by
    /// its position in a Usage Minimum/Maximum range, or the decimal
    /// usage for vendor-defined pages.
    pub name: String,
    /// The usage the field was named after. For fields named after their
    /// position in a Usage Minimum/Maximum range this is the usage the
    /// range implies, `None` if there is neither a Usage nor a range.
    pub usage: Option<Usage>,
    /// Absolute offset of the field in bits from the start of the report.
    pub bit_offset: u32,
    /// Width of the field in bits, 1 to 32.
    pub bit_width: u32,
}

impl HidValue {
    /// The first bit after this field.
    pub fn bit_end(&self) -> u32 {
        self.bit_offset + self.bit_width
    }
}

/// A node of the [ItemTree]: the root, a collection or a data item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MainItemNode {
    pub item_type: MainItemType,
    /// For collections the collection type (Physical, Application, ...),
    /// for data items the raw attribute flags.
    pub collection_value: u32,
    /// The global state at the time this item was created.
    pub global: GlobalState,
    /// The local state at the time this item was created.
    pub local: LocalState,
    /// The fields of a data item, empty otherwise.
    pub values: Vec<HidValue>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl MainItemNode {
    pub(crate) fn new(
        item_type: MainItemType,
        collection_value: u32,
        global: GlobalState,
        local: LocalState,
    ) -> Self {
        MainItemNode {
            item_type,
            collection_value,
            global,
            local,
            values: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The attribute flags if this is an Input, Output or Feature item.
    pub fn data_item(&self) -> Option<DataItem> {
        self.item_type
            .is_data()
            .then(|| DataItem::new(self.collection_value))
    }

    /// The collection type if this is a collection.
    pub fn collection(&self) -> Option<CollectionItem> {
        (self.item_type == MainItemType::Collection)
            .then(|| CollectionItem::from(self.collection_value))
    }

    /// True for data items whose constant bit is set. These fields are
    /// padding: they take up space in the report but carry no data.
    pub fn is_constant(&self) -> bool {
        self.item_type.is_data() && self.collection_value & 0x1 != 0
    }

    /// The number of bits covered by this item's fields.
    pub fn bit_length(&self) -> u32 {
        self.values.iter().map(|v| v.bit_width).sum()
    }
}

/// The tree of Main items of one report descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemTree {
    nodes: Vec<MainItemNode>,
}

impl Default for ItemTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemTree {
    /// A tree with only the root node.
    pub fn new() -> Self {
        ItemTree {
            nodes: vec![MainItemNode::new(
                MainItemType::Root,
                0,
                GlobalState::default(),
                LocalState::default(),
            )],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append `node` as last child of `parent`.
    pub(crate) fn add(&mut self, parent: NodeId, mut node: MainItemNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// The node with the given id. [NodeId]s are only handed out by the
    /// tree itself, use [ItemTree::get] for ids of unknown origin.
    pub fn node(&self, id: NodeId) -> &MainItemNode {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&MainItemNode> {
        self.nodes.get(id.0)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &MainItemNode)> + '_ {
        self.get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |&c| (c, self.node(c)))
    }

    /// The nearest collection enclosing the given node, if any.
    pub fn enclosing_collection(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.parent(id);
        while let Some(p) = current {
            if self.node(p).item_type == MainItemType::Collection {
                return Some(p);
            }
            current = self.parent(p);
        }
        None
    }

    /// All nodes, root included, in report descriptor order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MainItemNode)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// The number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the tree holds nothing but the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// The Input items whose fields carry data, in report descriptor order.
    pub fn input_items(&self) -> impl Iterator<Item = (NodeId, &MainItemNode)> + '_ {
        self.iter()
            .filter(|(_, n)| n.item_type == MainItemType::Input && !n.is_constant())
    }

    /// The first bit after the last non-constant Input field.
    pub fn input_report_bits(&self) -> u32 {
        self.input_items()
            .flat_map(|(_, n)| n.values.iter())
            .map(HidValue::bit_end)
            .max()
            .unwrap_or(0)
    }

    /// The minimum length in bytes of an input report buffer that can be
    /// decoded against this tree.
    pub fn input_report_len(&self) -> usize {
        (self.input_report_bits() as usize).div_ceil(8)
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let node = self.node(id);
        let indent = "  ".repeat(depth);
        match node.item_type {
            MainItemType::Root => writeln!(f, "{indent}Root")?,
            MainItemType::Collection => {
                write!(
                    f,
                    "{indent}Collection '{}'",
                    usages::collection_name(node.collection_value)
                )?;
                if let Some(usage) = node.local.usages.first() {
                    let usage = Usage::resolve(node.global.usage_page, *usage);
                    write!(f, " ({})", usage.name())?;
                }
                writeln!(f)?;
            }
            t => {
                writeln!(
                    f,
                    "{indent}{t} {}",
                    usages::data_flags_description(t, node.collection_value)
                )?;
                for value in &node.values {
                    writeln!(
                        f,
                        "{indent}  {} bits {}..{}",
                        value.name,
                        value.bit_offset,
                        value.bit_end()
                    )?;
                }
            }
        }
        for &child in &node.children {
            self.fmt_node(f, child, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for ItemTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.root(), 0)
    }
}
