//! Dependency graph rules: cycle detection and reachability.
//!
//! Each workflow becomes a graph whose edges run from a dependency to its
//! dependent. Traversal visits nodes in declaration order and edges in
//! the order `Workflow::edges` yields them, so reported cycle paths are
//! reproducible. Names that appear twice resolve to their first node;
//! edges that do not resolve are skipped (the reference rule reports them).

use crate::finding::Finding;
use arbor_core::DefinitionError;
use arbor_model::{AgentDefinition, NodeType, Workflow};
use indexmap::{IndexMap, IndexSet};

/// Name-indexed adjacency list
struct Graph<'a> {
    index: IndexMap<&'a str, usize>,
    /// Flow edges: dependency -> dependents
    out: Vec<IndexSet<usize>>,
    /// Reverse edges: dependent -> dependencies
    deps: Vec<Vec<usize>>,
}

impl<'a> Graph<'a> {
    fn with_names(names: impl Iterator<Item = &'a str>) -> Self {
        let mut index = IndexMap::new();
        for name in names {
            let next = index.len();
            index.entry(name).or_insert(next);
        }
        let len = index.len();
        Self {
            index,
            out: vec![IndexSet::new(); len],
            deps: vec![Vec::new(); len],
        }
    }

    fn of_workflow(workflow: &'a Workflow) -> Self {
        let mut graph = Self::with_names(workflow.nodes().iter().map(|n| n.name()));
        for edge in workflow.edges() {
            graph.add_edge(edge.from, edge.to);
        }
        graph
    }

    fn add_edge(&mut self, from: &str, to: &str) {
        let (Some(&from), Some(&to)) = (self.index.get(from), self.index.get(to)) else {
            return;
        };
        if self.out[from].insert(to) {
            self.deps[to].push(from);
        }
    }

    fn name(&self, idx: usize) -> &'a str {
        self.index.get_index(idx).map_or("", |(name, _)| name)
    }

    fn path_names(&self, path: &[usize]) -> Vec<String> {
        path.iter().map(|&i| self.name(i).to_string()).collect()
    }

    /// Every cycle closed by a back edge, in discovery order
    ///
    /// Iterative; a long dependency chain must not exhaust the thread stack.
    fn cycles(&self) -> Vec<Vec<usize>> {
        let len = self.out.len();
        let mut marks = vec![Mark::Unvisited; len];
        // Position in `frames` of each node while it is on the stack
        let mut depth = vec![0; len];
        // (node, index of the next outgoing edge to follow)
        let mut frames: Vec<(usize, usize)> = Vec::new();
        let mut cycles = Vec::new();

        for start in 0..len {
            if marks[start] != Mark::Unvisited {
                continue;
            }
            marks[start] = Mark::OnStack;
            depth[start] = frames.len();
            frames.push((start, 0));

            while let Some(frame) = frames.last_mut() {
                let (node, edge) = *frame;
                let Some(&next) = self.out[node].get_index(edge) else {
                    frames.pop();
                    marks[node] = Mark::Done;
                    continue;
                };
                frame.1 += 1;

                match marks[next] {
                    Mark::OnStack => {
                        let mut path: Vec<usize> =
                            frames[depth[next]..].iter().map(|&(n, _)| n).collect();
                        path.push(next);
                        cycles.push(path);
                    }
                    Mark::Unvisited => {
                        marks[next] = Mark::OnStack;
                        depth[next] = frames.len();
                        frames.push((next, 0));
                    }
                    Mark::Done => {}
                }
            }
        }

        cycles
    }

    /// Everything downstream of `start`, plus everything those nodes depend on
    fn used_from(&self, start: usize) -> IndexSet<usize> {
        let mut reachable = IndexSet::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if reachable.insert(current) {
                stack.extend(self.out[current].iter().copied());
            }
        }

        let mut used = reachable.clone();
        let mut stack: Vec<usize> = reachable.iter().copied().collect();
        while let Some(current) = stack.pop() {
            for &dep in &self.deps[current] {
                if used.insert(dep) {
                    stack.push(dep);
                }
            }
        }
        used
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

/// Report node dependency cycles per workflow, and subworkflow cycles
/// across workflows
pub fn check_cycles(agent: &AgentDefinition, out: &mut Vec<Finding>) {
    for (i, workflow) in agent.workflows().iter().enumerate() {
        let graph = Graph::of_workflow(workflow);
        for cycle in graph.cycles() {
            out.push(Finding::error(
                format!("workflows[{i}].nodes"),
                DefinitionError::CyclicDependency {
                    workflow: workflow.name().to_string(),
                    path: graph.path_names(&cycle),
                },
            ));
        }
    }

    let mut calls = Graph::with_names(agent.workflows().iter().map(|w| w.name()));
    for workflow in agent.workflows() {
        for node in workflow.nodes() {
            if node.node_type() == NodeType::Subworkflow {
                if let Some(target) = node.reference() {
                    calls.add_edge(workflow.name(), target);
                }
            }
        }
    }
    for cycle in calls.cycles() {
        let path = calls.path_names(&cycle);
        out.push(Finding::error(
            "workflows",
            DefinitionError::CyclicDependency {
                workflow: path.first().cloned().unwrap_or_default(),
                path,
            },
        ));
    }
}

/// Warn about nodes that neither follow from the entry node nor feed a
/// node that does
pub fn check_reachability(agent: &AgentDefinition, out: &mut Vec<Finding>) {
    for (i, workflow) in agent.workflows().iter().enumerate() {
        let graph = Graph::of_workflow(workflow);
        let Some(&entry) = graph.index.get(workflow.entry_node()) else {
            continue;
        };
        let used = graph.used_from(entry);
        // Later duplicates share the first node's index and its verdict.
        let mut seen = vec![false; graph.index.len()];

        for (j, node) in workflow.nodes().iter().enumerate() {
            let Some(&idx) = graph.index.get(node.name()) else {
                continue;
            };
            let first_declared = !std::mem::replace(&mut seen[idx], true);
            if used.contains(&idx) || !first_declared {
                continue;
            }
            out.push(Finding::warning(
                format!("workflows[{i}].nodes[{j}]"),
                DefinitionError::UnreachableNode {
                    workflow: workflow.name().to_string(),
                    node: node.name().to_string(),
                },
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::Severity;
    use arbor_model::{AgentBuilder, NodeBuilder, WorkflowBuilder};
    use proptest::prelude::*;

    fn node(name: &str, deps: &[&str]) -> arbor_model::Node {
        deps.iter()
            .fold(NodeBuilder::new(name).goal("g"), |b, d| b.depends_on(*d))
            .build()
            .unwrap()
    }

    fn agent(nodes: Vec<arbor_model::Node>, entry: &str) -> AgentDefinition {
        let workflow = nodes
            .into_iter()
            .fold(WorkflowBuilder::new("main").entry_node(entry), |wf, n| wf.add_node(n))
            .build()
            .unwrap();
        AgentBuilder::new("agent")
            .version("1.0.0")
            .add_workflow(workflow)
            .build()
            .unwrap()
    }

    fn cycles_of(agent: &AgentDefinition) -> Vec<Vec<String>> {
        let mut out = Vec::new();
        check_cycles(agent, &mut out);
        out.into_iter()
            .map(|f| match f.error {
                DefinitionError::CyclicDependency { path, .. } => path,
                other => panic!("unexpected finding {other:?}"),
            })
            .collect()
    }

    #[test]
    fn test_three_node_cycle_path() {
        let agent = agent(
            vec![node("A", &["C"]), node("B", &["A"]), node("C", &["B"])],
            "A",
        );
        assert_eq!(cycles_of(&agent), vec![vec!["A", "B", "C", "A"]]);
    }

    #[test]
    fn test_no_cycle() {
        let agent = agent(vec![node("A", &[]), node("B", &["A"])], "A");
        assert!(cycles_of(&agent).is_empty());
    }

    #[test]
    fn test_self_dependency() {
        let agent = agent(vec![node("A", &["A"])], "A");
        assert_eq!(cycles_of(&agent), vec![vec!["A", "A"]]);
    }

    #[test]
    fn test_cycle_report_is_deterministic() {
        let build = || {
            agent(
                vec![
                    node("start", &[]),
                    node("x", &["start", "z"]),
                    node("y", &["x"]),
                    node("z", &["y"]),
                ],
                "start",
            )
        };
        let first = cycles_of(&build());
        for _ in 0..5 {
            assert_eq!(cycles_of(&build()), first);
        }
        assert_eq!(first, vec![vec!["x", "y", "z", "x"]]);
    }

    #[test]
    fn test_unresolved_edges_are_ignored() {
        let agent = agent(vec![node("A", &["ghost"])], "A");
        assert!(cycles_of(&agent).is_empty());
    }

    #[test]
    fn test_subworkflow_cycle() {
        let first = WorkflowBuilder::new("first")
            .entry_node("call")
            .add_node(NodeBuilder::new("call").goal("g").runs_workflow("second").build().unwrap())
            .build()
            .unwrap();
        let second = WorkflowBuilder::new("second")
            .entry_node("back")
            .add_node(NodeBuilder::new("back").goal("g").runs_workflow("first").build().unwrap())
            .build()
            .unwrap();
        let agent = AgentBuilder::new("agent")
            .version("1.0.0")
            .add_workflow(first)
            .add_workflow(second)
            .build()
            .unwrap();
        assert_eq!(cycles_of(&agent), vec![vec!["first", "second", "first"]]);
    }

    #[test]
    fn test_unreachable_node_is_warning() {
        let agent = agent(
            vec![
                node("start", &[]),
                node("next", &["start"]),
                node("orphan", &[]),
                node("island", &["orphan"]),
            ],
            "start",
        );
        let mut out = Vec::new();
        check_reachability(&agent, &mut out);
        let nodes: Vec<_> = out
            .iter()
            .map(|f| match &f.error {
                DefinitionError::UnreachableNode { node, .. } => node.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(nodes, vec!["orphan", "island"]);
        assert!(out.iter().all(|f| f.severity == Severity::Warning));
    }

    #[test]
    fn test_dependencies_of_reachable_nodes_are_used() {
        // `config` is not downstream of `start`, but `merge` needs it.
        let agent = agent(
            vec![
                node("start", &[]),
                node("config", &[]),
                node("merge", &["start", "config"]),
            ],
            "start",
        );
        let mut out = Vec::new();
        check_reachability(&agent, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_reachability_skips_unresolved_entry() {
        let agent = agent(vec![node("a", &[]), node("b", &[])], "missing");
        let mut out = Vec::new();
        check_reachability(&agent, &mut out);
        assert!(out.is_empty());
    }

    fn chain(len: usize, closed: bool) -> AgentDefinition {
        let names: Vec<String> = (0..len).map(|i| format!("n{i}")).collect();
        let nodes = names
            .iter()
            .enumerate()
            .map(|(i, name)| match i {
                0 if closed => node(name, &[names[len - 1].as_str()]),
                0 => node(name, &[]),
                _ => node(name, &[names[i - 1].as_str()]),
            })
            .collect();
        agent(nodes, "n0")
    }

    #[test]
    fn test_deep_chain() {
        let open = chain(100_000, false);
        assert!(cycles_of(&open).is_empty());
        let mut out = Vec::new();
        check_reachability(&open, &mut out);
        assert!(out.is_empty());

        let closed = cycles_of(&chain(100_000, true));
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].len(), 100_001);
        assert_eq!(closed[0][0], "n0");
    }

    #[test]
    fn test_duplicate_unreachable_name_reported_once() {
        let agent = agent(
            vec![node("start", &[]), node("orphan", &[]), node("orphan", &[])],
            "start",
        );
        let mut out = Vec::new();
        check_reachability(&agent, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].path, "workflows[0].nodes[1]");
    }

    proptest::proptest! {
        #[test]
        fn prop_chain_is_acyclic_and_reachable(len in 1usize..24) {
            let agent = chain(len, false);
            prop_assert!(cycles_of(&agent).is_empty());
            let mut out = Vec::new();
            check_reachability(&agent, &mut out);
            prop_assert!(out.is_empty());
        }

        #[test]
        fn prop_closed_chain_has_one_cycle(len in 1usize..24) {
            let cycles = cycles_of(&chain(len, true));
            prop_assert_eq!(cycles.len(), 1);
            prop_assert_eq!(cycles[0].len(), len + 1);
            prop_assert_eq!(cycles[0].first(), cycles[0].last());
        }
    }
}
