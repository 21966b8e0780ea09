//! DOM observation seam.
//!
//! The page is seen through HTML fragments: the current markup of the observed
//! container, then batches of nodes inserted below it.

use futures::stream::BoxStream;

/// Nodes inserted into the observed subtree in one notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationBatch {
    /// Outer HTML of each added node, descendants included.
    pub added_nodes: Vec<String>,
}

impl MutationBatch {
    pub fn new(added_nodes: Vec<String>) -> Self {
        Self { added_nodes }
    }

    pub fn single(node_html: impl Into<String>) -> Self {
        Self {
            added_nodes: vec![node_html.into()],
        }
    }
}

/// A located container: its markup at observation time and the add-only
/// stream of later insertions.
pub struct ObservedSubtree {
    pub current_html: String,
    pub insertions: BoxStream<'static, MutationBatch>,
}

/// Platform that can locate a container and report insertions below it.
pub trait MutationSource: Send + Sync {
    /// Starts observing the container with the given element id.
    ///
    /// Returns `None` when the container does not exist.
    fn observe(&self, container_id: &str) -> Option<ObservedSubtree>;
}
