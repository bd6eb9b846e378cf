use crate::error::{Error, Result};
use libxml::parser::Parser;
use libxml::tree::{self, Document, NodeType};
use libxml::xpath::Context;
use std::rc::Rc;

/// An element of a parsed html document, kept alive together with its document
pub struct Node {
    document: Rc<Document>,
    context: Rc<Context>,
    node: tree::Node,
}

impl Node {
    /// Elements matched by `xpath`, in document order
    pub fn xpath_elem(&self, xpath: &str) -> Result<Vec<Node>> {
        let nodes = self
            .context
            .node_evaluate(xpath, &self.node)
            .map_err(|_| Error::Html)?
            .get_nodes_as_vec();
        Ok(nodes
            .into_iter()
            .filter(|node| node.get_type() == Some(NodeType::ElementNode))
            .map(|node| Node {
                document: self.document.clone(),
                context: self.context.clone(),
                node,
            })
            .collect())
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.node.get_attribute(name)
    }
}

pub fn parse_html<S: AsRef<str>>(html: S) -> Result<Node> {
    let parser = Parser::default_html();
    let document = parser
        .parse_string(html.as_ref())
        .map_err(|_| Error::Html)?;
    let context = Context::new(&document).map_err(|_| Error::Html)?;
    let root = document.get_root_element().ok_or(Error::Html)?;
    Ok(Node {
        document: Rc::new(document),
        context: Rc::new(context),
        node: root,
    })
}
