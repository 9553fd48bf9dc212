use std::fmt;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::dataset::{Dataset, LinkRecord, NodeRecord};

/// Side length of the cube new nodes are scattered in, centered on the origin.
pub const INITIAL_CUBE_SIDE: f32 = 40.0;

/// Position of a node in load order. Assigned once when the graph is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    id: NodeId,
    pub name: String,
    pub group: u32,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Accumulated force for the current relaxation step only.
    pub force: Vec3,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn touches(&self, id: NodeId) -> bool {
        self.source == id || self.target == id
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error(
        "link {link} references node {index} ({end}) but the dataset only has {node_count} nodes"
    )]
    LinkOutOfRange {
        link: usize,
        end: LinkEnd,
        index: usize,
        node_count: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkEnd {
    Source,
    Target,
}

impl fmt::Display for LinkEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Builds the graph in load order and scatters every node uniformly inside the
    /// initial cube. Fails without building anything if a link points past the node list.
    pub fn initialize<R: Rng>(
        raw_nodes: &[NodeRecord],
        raw_links: &[LinkRecord],
        rng: &mut R,
    ) -> Result<Self, GraphError> {
        let node_count = raw_nodes.len();
        let resolve = |link: usize, end: LinkEnd, index: usize| {
            if index < node_count {
                Ok(NodeId(index))
            } else {
                Err(GraphError::LinkOutOfRange {
                    link,
                    end,
                    index,
                    node_count,
                })
            }
        };

        let edges = raw_links
            .iter()
            .enumerate()
            .map(|(link, raw)| {
                Ok(Edge {
                    source: resolve(link, LinkEnd::Source, raw.source)?,
                    target: resolve(link, LinkEnd::Target, raw.target)?,
                })
            })
            .collect::<Result<Vec<_>, GraphError>>()?;

        let half = INITIAL_CUBE_SIDE * 0.5;
        let nodes = raw_nodes
            .iter()
            .enumerate()
            .map(|(index, raw)| Node {
                id: NodeId(index),
                name: raw.name.clone(),
                group: raw.group,
                position: Vec3::new(
                    rng.gen_range(-half..half),
                    rng.gen_range(-half..half),
                    rng.gen_range(-half..half),
                ),
                velocity: Vec3::ZERO,
                force: Vec3::ZERO,
            })
            .collect();

        Ok(Self { nodes, edges })
    }

    pub fn from_dataset(dataset: &Dataset, seed: u64) -> Result<Self, GraphError> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::initialize(&dataset.nodes, &dataset.links, &mut rng)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn position(&self, id: NodeId) -> Option<Vec3> {
        self.node(id).map(|node| node.position)
    }

    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.edges.iter().filter_map(move |edge| {
            if edge.source == id {
                Some(edge.target)
            } else if edge.target == id {
                Some(edge.source)
            } else {
                None
            }
        })
    }

    /// Only the layout engine writes node state, and only while it runs.
    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(names: &[&str]) -> Vec<NodeRecord> {
        names
            .iter()
            .enumerate()
            .map(|(index, name)| NodeRecord {
                name: (*name).to_owned(),
                group: index as u32 % 2,
            })
            .collect()
    }

    #[test]
    fn identities_follow_load_order() {
        let nodes = records(&["Valjean", "Javert", "Cosette"]);
        let mut rng = StdRng::seed_from_u64(1);
        let graph = Graph::initialize(&nodes, &[], &mut rng).unwrap();

        for (index, node) in graph.nodes().iter().enumerate() {
            assert_eq!(node.id().index(), index);
            assert_eq!(node.name, nodes[index].name);
            assert_eq!(node.group, nodes[index].group);
        }
    }

    #[test]
    fn initial_positions_fill_the_cube_with_zero_velocity() {
        let nodes = records(&["a"; 200]);
        let mut rng = StdRng::seed_from_u64(9);
        let graph = Graph::initialize(&nodes, &[], &mut rng).unwrap();

        let half = INITIAL_CUBE_SIDE * 0.5;
        for node in graph.nodes() {
            for axis in node.position.to_array() {
                assert!((-half..half).contains(&axis));
            }
            assert_eq!(node.velocity, Vec3::ZERO);
            assert_eq!(node.force, Vec3::ZERO);
        }

        let spread = graph
            .nodes()
            .iter()
            .map(|node| node.position.x)
            .fold((f32::MAX, f32::MIN), |(lo, hi), x| (lo.min(x), hi.max(x)));
        assert!(spread.1 - spread.0 > half);
    }

    #[test]
    fn same_seed_gives_same_placement() {
        let dataset = Dataset {
            nodes: records(&["a", "b", "c"]),
            links: vec![LinkRecord { source: 0, target: 2 }],
        };

        let first = Graph::from_dataset(&dataset, 77).unwrap();
        let second = Graph::from_dataset(&dataset, 77).unwrap();
        for (a, b) in first.nodes().iter().zip(second.nodes()) {
            assert_eq!(a.position, b.position);
        }
    }

    #[test]
    fn keeps_self_and_duplicate_links() {
        let nodes = records(&["a", "b"]);
        let links = [
            LinkRecord { source: 0, target: 1 },
            LinkRecord { source: 0, target: 1 },
            LinkRecord { source: 1, target: 1 },
        ];
        let mut rng = StdRng::seed_from_u64(3);
        let graph = Graph::initialize(&nodes, &links, &mut rng).unwrap();

        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.edges()[2].source, graph.edges()[2].target);
        let a = graph.nodes()[0].id();
        assert_eq!(graph.neighbors(a).count(), 2);
    }

    #[test]
    fn out_of_range_link_is_fatal() {
        let nodes = records(&["a", "b"]);
        let links = [
            LinkRecord { source: 0, target: 1 },
            LinkRecord { source: 1, target: 2 },
        ];
        let mut rng = StdRng::seed_from_u64(3);

        let error = Graph::initialize(&nodes, &links, &mut rng).unwrap_err();
        assert_eq!(
            error,
            GraphError::LinkOutOfRange {
                link: 1,
                end: LinkEnd::Target,
                index: 2,
                node_count: 2,
            }
        );
        assert!(error.to_string().contains("link 1 references node 2 (target)"));
    }

    #[test]
    fn empty_dataset_builds_empty_graph() {
        let graph = Graph::from_dataset(&Dataset::default(), 0).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }
}
