//! Headless engines for a selectable, expandable tree-of-items widget.
//!
//! Two independent engines, neither of which knows anything about rendering:
//!
//! - the selection/expansion engine ([`TreeSelect`]), which keeps a
//!   [`NodeRegistry`] snapshot and computes selected, effectively selected and
//!   partially selected nodes under one of four [`SelectionMode`]s;
//! - the virtualized list engine ([`VirtualList`]), which decides which rows of
//!   a long variable-height list to materialize and how to scroll an item into
//!   view.

pub mod config;
pub mod error;
pub mod expansion;
pub mod filter;
pub mod focus;
pub mod loader;
pub mod node;
pub mod registry;
pub mod selection;
pub mod tree_select;
pub mod virtual_list;

pub use config::{TreeSelectConfig, TreeSelectProps, VirtualListConfig};
pub use error::{LoadError, Result, TreeSelectError};
pub use node::{Node, TreeNodeData};
pub use registry::NodeRegistry;
pub use selection::{SelectionAggregateState, SelectionMode, SelectionState};
pub use tree_select::TreeSelect;
pub use virtual_list::VirtualList;

pub mod prelude {
    pub use crate::config::{TreeSelectConfig, TreeSelectProps, VirtualListConfig};
    pub use crate::error::{LoadError, TreeSelectError};
    pub use crate::expansion::ExpansionState;
    pub use crate::focus::{FocusRegion, FocusTarget};
    pub use crate::loader::{LoadKey, LoadTicket, TreeLoader};
    pub use crate::node::{Node, TreeNodeData};
    pub use crate::registry::NodeRegistry;
    pub use crate::selection::{SelectionAggregateState, SelectionMode, SelectionState};
    pub use crate::tree_select::{
        DisplayedNode, DropdownRow, TreeSelect, TreeSelectEvent, TreeSelectState,
    };
    pub use crate::virtual_list::{ScrollRequest, VirtualList, VisibleWindow};
}
