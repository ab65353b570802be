//! Service dependency graph core: data model, encoding rules, filtering and
//! selection, composed by [`ViewController`].
//!
//! Nothing here touches the DOM; the canvas and inspector components only
//! read from a controller and forward clicks and search text to it.

mod controller;
mod encoding;
mod error;
mod filter;
mod selection;
mod snapshot;

pub use controller::{EdgeDetails, FilterStatus, MetricRow, NodeDetails, ViewController};
pub use encoding::{
	NodePaint, Rgb, ServiceIcon, border_color_for, icon_for, icon_for_name, paint_node,
	parse_percentage,
};
pub use error::{GraphError, LookupMiss};
pub use filter::{FilteredSnapshot, filter};
pub use selection::{Selection, select_edge, select_node};
pub use snapshot::{
	Edge, GraphSnapshot, JsonSnapshot, Node, SampleTopology, ServiceType, SnapshotProvider,
};
