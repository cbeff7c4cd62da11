use crate::error::{Result, TaxdbError};
use bio::io::newick;
use std::fs;
use std::path::Path;
use tracing::debug;

/// How an unnamed node is rendered in reports
pub const UNNAMED_NODE: &str = "<unnamed>";

/// Collapses the "no name" conventions of different tree backends
/// (absent label, empty label) into `None`.
pub fn normalize_node_name(raw: Option<&str>) -> Option<String> {
    match raw {
        None | Some("") => None,
        Some(name) => Some(name.to_string()),
    }
}

pub fn display_node_name(name: &Option<String>) -> &str {
    name.as_deref().unwrap_or(UNNAMED_NODE)
}

/// Something that can list the name of every node of a tree, internal and leaf.
pub trait NodeNames {
    /// Labels exactly as the backend stores them
    fn raw_node_names(&self) -> Vec<Option<&str>>;

    fn node_names(&self) -> Vec<Option<String>> {
        self.raw_node_names()
            .into_iter()
            .map(normalize_node_name)
            .collect()
    }

    fn count_unnamed(&self) -> usize {
        self.raw_node_names()
            .into_iter()
            .filter(|name| normalize_node_name(*name).is_none())
            .count()
    }
}

/// Label rust-bio's newick parser gives to every node without a name
pub const BIO_UNNAMED_LABEL: &str = "N/A";

/// A newick tree parsed by rust-bio. Unnamed nodes carry `BIO_UNNAMED_LABEL`,
/// so a node literally named "N/A" is indistinguishable from an unnamed one.
pub struct NewickTree {
    labels: Vec<String>,
}

impl NewickTree {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| TaxdbError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|message| TaxdbError::Newick {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn parse(text: &str) -> std::result::Result<Self, String> {
        let tree = newick::from_string(text.trim()).map_err(|error| error.to_string())?;
        let labels = tree
            .g
            .node_indices()
            .map(|index| tree.g[index].clone())
            .collect::<Vec<String>>();
        debug!("parsed newick tree with {} nodes", labels.len());
        Ok(NewickTree { labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl NodeNames for NewickTree {
    fn raw_node_names(&self) -> Vec<Option<&str>> {
        self.labels
            .iter()
            .map(|label| match label.as_str() {
                BIO_UNNAMED_LABEL => None,
                named => Some(named),
            })
            .collect()
    }
}

/// Node labels from a backend that marks unnamed nodes as absent
impl NodeNames for Vec<Option<String>> {
    fn raw_node_names(&self) -> Vec<Option<&str>> {
        self.iter().map(|label| label.as_deref()).collect()
    }
}
