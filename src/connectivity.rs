//! Node/element connectivity, used to explain why a structure is unstable.

use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::dof::DofMap;
use crate::errors::{Diagnosis, Instability};
use crate::model::{Element, ElementId, Node, NodeId};

/// Undirected graph with one vertex per node and one edge per resolvable element.
#[derive(Clone, Debug)]
pub struct Connectivity {
    /// Vertex `i` is the node with internal index `i`.
    graph: UnGraph<NodeId, ElementId>,
}

impl Connectivity {
    /// Build the graph. Elements that reference unknown nodes are left out.
    #[must_use]
    pub fn new(nodes: &[Node], elements: &[Element], dof_map: &DofMap) -> Self {
        let mut graph = UnGraph::with_capacity(nodes.len(), elements.len());
        for node in nodes {
            graph.add_node(node.id);
        }
        for element in elements {
            if let (Some(a), Some(b)) = (dof_map.index(element.n1), dof_map.index(element.n2)) {
                graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), element.id);
            }
        }
        Self { graph }
    }

    /// Number of separate pieces. A node with no element is a piece of its own.
    #[must_use]
    pub fn component_count(&self) -> usize {
        connected_components(&self.graph)
    }

    /// Nodes with at least one free DOF and no element attached.
    ///
    /// Nothing resists load at such a node, so the stiffness matrix is singular.
    #[must_use]
    pub fn unattached_free_nodes(&self, nodes: &[Node]) -> Vec<NodeId> {
        nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| !(node.rx && node.ry))
            .filter(|(index, _)| {
                self.graph
                    .neighbors(NodeIndex::new(*index))
                    .next()
                    .is_none()
            })
            .map(|(_, node)| node.id)
            .collect()
    }

    /// Combine a solver failure with what the connectivity shows.
    #[must_use]
    pub fn diagnose(&self, nodes: &[Node], cause: Instability) -> Diagnosis {
        Diagnosis {
            cause,
            components: self.component_count(),
            unattached_nodes: self.unattached_free_nodes(nodes),
        }
    }
}
