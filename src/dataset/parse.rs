use anyhow::{Context, Result};
use serde::Deserialize;

/// A character as it appears in the input file.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NodeRecord {
    #[serde(alias = "id")]
    pub name: String,
    #[serde(default)]
    pub group: u32,
}

/// A co-occurrence link between two characters, by position in `nodes`.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct LinkRecord {
    pub source: usize,
    pub target: usize,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default, alias = "edges")]
    pub links: Vec<LinkRecord>,
}

impl Dataset {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

pub fn parse_dataset(raw: &str) -> Result<Dataset> {
    serde_json::from_str(raw).context("invalid graph dataset JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nodes_and_links() {
        let raw = r#"{
            "nodes": [{"name": "Valjean", "group": 2}, {"name": "Javert", "group": 4}],
            "links": [{"source": 0, "target": 1, "value": 17}]
        }"#;

        let dataset = parse_dataset(raw).unwrap();
        assert_eq!(dataset.node_count(), 2);
        assert_eq!(dataset.nodes[1].name, "Javert");
        assert_eq!(dataset.nodes[1].group, 4);
        assert_eq!(dataset.links, vec![LinkRecord { source: 0, target: 1 }]);
    }

    #[test]
    fn accepts_id_and_edges_aliases() {
        let raw = r#"{"nodes": [{"id": "Myriel"}], "edges": [{"source": 0, "target": 0}]}"#;

        let dataset = parse_dataset(raw).unwrap();
        assert_eq!(dataset.nodes[0].name, "Myriel");
        assert_eq!(dataset.nodes[0].group, 0);
        assert_eq!(dataset.link_count(), 1);
    }

    #[test]
    fn rejects_negative_indices() {
        let raw = r#"{"nodes": [{"name": "A"}], "links": [{"source": -1, "target": 0}]}"#;
        assert!(parse_dataset(raw).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        let error = parse_dataset("{\"nodes\": [").unwrap_err();
        assert!(error.to_string().contains("invalid graph dataset JSON"));
    }
}
