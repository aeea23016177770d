//! Owned XML element tree with optional-returning lookups

/// An element of a parsed workbook document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    pub(crate) fn push_child(&mut self, child: XmlNode) {
        self.children.push(child);
    }

    /// Tag name; empty for the synthetic document root
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value by name. The first occurrence wins on duplicates.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check whether the whitespace separated `class` attribute contains `token`
    pub fn has_class(&self, token: &str) -> bool {
        self.attr("class")
            .map(|class| class.split_whitespace().any(|c| c == token))
            .unwrap_or(false)
    }

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Direct children with the given tag name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// All elements below this one in document order (pre-order, self excluded)
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![self.children.iter()],
        }
    }

    /// First descendant with the given tag name
    pub fn find(&self, name: &str) -> Option<&XmlNode> {
        self.descendants().find(|n| n.name == name)
    }

    /// All descendants with the given tag name, in document order
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.descendants().filter(move |n| n.name == name)
    }
}

/// Pre-order iterator over the elements below a node
pub struct Descendants<'a> {
    stack: Vec<std::slice::Iter<'a, XmlNode>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlNode;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(node) => {
                    if !node.children.is_empty() {
                        self.stack.push(node.children.iter());
                    }
                    return Some(node);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> XmlNode {
        XmlNode::new("a")
            .with_child(
                XmlNode::new("b")
                    .with_attr("name", "first")
                    .with_child(XmlNode::new("c").with_attr("name", "nested")),
            )
            .with_child(XmlNode::new("c").with_attr("name", "direct"))
    }

    #[test]
    fn test_descendants_in_document_order() {
        let root = sample();
        let names: Vec<&str> = root.descendants().map(|n| n.name()).collect();
        assert_eq!(names, vec!["b", "c", "c"]);
    }

    #[test]
    fn test_find_returns_first_in_document_order() {
        let root = sample();
        assert_eq!(root.find("c").and_then(|n| n.attr("name")), Some("nested"));
        assert!(root.find("missing").is_none());
    }

    #[test]
    fn test_children_named_is_shallow() {
        let root = sample();
        let direct: Vec<_> = root
            .children_named("c")
            .filter_map(|n| n.attr("name"))
            .collect();
        assert_eq!(direct, vec!["direct"]);
        assert_eq!(root.find_all("c").count(), 2);
    }

    #[test]
    fn test_attr_missing_is_none() {
        let node = XmlNode::new("x").with_attr("name", "v");
        assert_eq!(node.attr("name"), Some("v"));
        assert_eq!(node.attr("caption"), None);
    }

    #[test]
    fn test_has_class_token() {
        let node = XmlNode::new("window").with_attr("class", "dashboard hidden");
        assert!(node.has_class("dashboard"));
        assert!(node.has_class("hidden"));
        assert!(!node.has_class("dash"));
        assert!(!XmlNode::new("window").has_class("dashboard"));
    }
}
