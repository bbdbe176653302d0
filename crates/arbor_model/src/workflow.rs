//! Workflows and their node dependency graph.
//!
//! Edges point from a dependency to its dependent, i.e. in the direction
//! work flows. Edge order is deterministic: dependents in declaration
//! order, and for each dependent its `depends_on` entries in order.

use crate::node::Node;

/// A named collection of nodes forming a dependency graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workflow {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) entry_node: String,
    pub(crate) nodes: Vec<Node>,
}

impl Workflow {
    /// Workflow name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-text description
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Name of the node where execution starts
    #[must_use]
    pub fn entry_node(&self) -> &str {
        &self.entry_node
    }

    /// Nodes in insertion order
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// First node with the given name
    #[must_use]
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// All dependency edges, including ones that do not resolve
    #[must_use]
    pub fn edges(&self) -> Vec<Edge<'_>> {
        self.nodes
            .iter()
            .flat_map(|node| {
                node.depends_on.iter().map(move |dep| Edge {
                    from: dep.as_str(),
                    to: node.name.as_str(),
                })
            })
            .collect()
    }

    /// Nodes that depend on the given node
    #[must_use]
    pub fn dependents(&self, name: &str) -> Vec<&Node> {
        self.nodes
            .iter()
            .filter(|n| n.depends_on.iter().any(|d| d == name))
            .collect()
    }

    /// Resolvable nodes the given node depends on, in `depends_on` order
    #[must_use]
    pub fn dependencies(&self, name: &str) -> Vec<&Node> {
        self.node(name)
            .map(|n| n.depends_on.iter().filter_map(|d| self.node(d)).collect())
            .unwrap_or_default()
    }

    /// Get total node count
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Check if workflow has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A dependency edge between two node names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge<'a> {
    /// The dependency
    pub from: &'a str,
    /// The dependent
    pub to: &'a str,
}

#[cfg(test)]
mod tests {
    use crate::builder::{NodeBuilder, WorkflowBuilder};

    fn sample() -> crate::Workflow {
        WorkflowBuilder::new("pipeline")
            .entry_node("load")
            .add_node(NodeBuilder::new("load").goal("Load input").build().unwrap())
            .add_node(
                NodeBuilder::new("clean")
                    .goal("Clean data")
                    .depends_on("load")
                    .build()
                    .unwrap(),
            )
            .add_node(
                NodeBuilder::new("report")
                    .goal("Summarize")
                    .depends_on("clean")
                    .depends_on("load")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_edges_follow_declaration_order() {
        let wf = sample();
        let edges: Vec<_> = wf.edges().iter().map(|e| (e.from, e.to)).collect();
        assert_eq!(
            edges,
            vec![("load", "clean"), ("clean", "report"), ("load", "report")]
        );
    }

    #[test]
    fn test_dependents() {
        let wf = sample();
        let names: Vec<_> = wf.dependents("load").iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["clean", "report"]);
        assert!(wf.dependents("report").is_empty());
    }

    #[test]
    fn test_dependencies() {
        let wf = sample();
        let names: Vec<_> = wf.dependencies("report").iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["clean", "load"]);
        assert!(wf.dependencies("load").is_empty());
        assert!(wf.dependencies("ghost").is_empty());
    }

    #[test]
    fn test_node_lookup() {
        let wf = sample();
        assert_eq!(wf.node("clean").map(|n| n.goal()), Some("Clean data"));
        assert!(wf.node("ghost").is_none());
        assert_eq!(wf.node_count(), 3);
        assert!(!wf.is_empty());
    }
}
