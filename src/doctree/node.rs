//! Output tree types.

use serde::{Deserialize, Serialize};

use crate::markup::DocSections;

/// Kind of a documentation tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Folder,
    Module,
    Class,
    Function,
}

/// Attributes extracted from one symbol; absent attributes are simply omitted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<DocSections>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<String>,
}

/// One entry of the documentation tree
///
/// Folders and modules carry `children`, classes carry `methods`, functions carry neither.
/// Nodes are only built through the per-type constructors so the shape always matches the type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocNode {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub href: String,
    pub path: String,
    #[serde(flatten)]
    pub metadata: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DocNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methods: Option<Vec<Metadata>>,
}

impl DocNode {
    pub fn folder(name: String, href: String, path: String, children: Vec<DocNode>) -> Self {
        Self {
            node_type: NodeType::Folder,
            href,
            path,
            metadata: Metadata {
                name: Some(name),
                ..Default::default()
            },
            children: Some(children),
            methods: None,
        }
    }

    pub fn module(metadata: Metadata, href: String, path: String, children: Vec<DocNode>) -> Self {
        Self {
            node_type: NodeType::Module,
            href,
            path,
            metadata,
            children: Some(children),
            methods: None,
        }
    }

    pub fn class(metadata: Metadata, href: String, path: String, methods: Vec<Metadata>) -> Self {
        Self {
            node_type: NodeType::Class,
            href,
            path,
            metadata,
            children: None,
            methods: Some(methods),
        }
    }

    pub fn function(metadata: Metadata, href: String, path: String) -> Self {
        Self {
            node_type: NodeType::Function,
            href,
            path,
            metadata,
            children: None,
            methods: None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata.name.as_deref()
    }

    pub fn children(&self) -> &[DocNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn methods(&self) -> &[Metadata] {
        self.methods.as_deref().unwrap_or(&[])
    }

    /// This node and all nodes below it, depth first
    pub fn walk(&self) -> Vec<&DocNode> {
        let mut nodes = vec![self];
        for child in self.children() {
            nodes.extend(child.walk());
        }
        nodes
    }

    /// Find a node anywhere in this subtree by href
    pub fn find(&self, href: &str) -> Option<&DocNode> {
        self.walk().into_iter().find(|node| node.href == href)
    }
}
