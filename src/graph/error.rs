use thiserror::Error;

/// Failures raised while decoding or encoding graph telemetry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
	/// A percentage string that does not parse as a number.
	#[error("invalid metric format: {0:?}")]
	InvalidMetricFormat(String),
	/// Two nodes in one snapshot share an identifier.
	#[error("duplicate node id in snapshot: {0}")]
	DuplicateNode(String),
	/// The snapshot payload does not have the `{ nodes, links }` shape.
	#[error("malformed graph snapshot: {0}")]
	MalformedSnapshot(String),
}

impl From<serde_json::Error> for GraphError {
	fn from(err: serde_json::Error) -> Self {
		Self::MalformedSnapshot(err.to_string())
	}
}

/// A click referenced a node or link that is not in the snapshot.
///
/// Recoverable: callers leave the current selection untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupMiss {
	/// No node with this identifier.
	#[error("no node with id {0:?}")]
	Node(String),
	/// No link for this ordered `(source, target)` pair.
	#[error("no link {0:?} -> {1:?}")]
	Link(String, String),
}
