//! Order-preserving element tree.
//!
//! Attribute and child order are kept exactly as parsed so that a document
//! can be read, edited and written back without reshuffling the parts the
//! caller did not touch.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Replaces the attribute value in place, or appends it when absent.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Concatenation of all direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(t) => Some(t.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    /// Replaces all direct text children with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        let first_text = self
            .children
            .iter()
            .position(|node| matches!(node, XmlNode::Text(_)));
        self.children.retain(|node| matches!(node, XmlNode::Element(_)));
        if text.is_empty() {
            return;
        }
        let at = first_text.unwrap_or(0).min(self.children.len());
        self.children.insert(at, XmlNode::Text(text));
    }

    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        self.elements_mut().find(|e| e.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.elements().filter(move |e| e.name == name)
    }

    pub fn children_named_mut<'a>(
        &'a mut self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a mut XmlElement> {
        self.elements_mut().filter(move |e| e.name == name)
    }

    pub fn push_child(&mut self, child: XmlElement) -> &mut XmlElement {
        self.children.push(XmlNode::Element(child));
        match self.children.last_mut() {
            Some(XmlNode::Element(e)) => e,
            _ => unreachable!("element was just pushed"),
        }
    }

    /// Returns the named child, inserting an empty one when absent.
    ///
    /// `order` lists the sibling names in schema order; a new child is placed
    /// before the first existing sibling that sorts after it. Names missing
    /// from `order` are appended.
    pub fn ensure_child(&mut self, name: &str, order: &[&str]) -> &mut XmlElement {
        if let Some(index) = self.position_of(name) {
            return match &mut self.children[index] {
                XmlNode::Element(e) => e,
                XmlNode::Text(_) => unreachable!("position_of only returns elements"),
            };
        }

        let insert_at = order
            .iter()
            .position(|n| *n == name)
            .and_then(|rank| {
                self.children.iter().position(|node| match node {
                    XmlNode::Element(e) => order
                        .iter()
                        .position(|n| *n == e.name)
                        .is_some_and(|other| other > rank),
                    XmlNode::Text(_) => false,
                })
            })
            .unwrap_or(self.children.len());

        self.children
            .insert(insert_at, XmlNode::Element(XmlElement::new(name)));
        match &mut self.children[insert_at] {
            XmlNode::Element(e) => e,
            XmlNode::Text(_) => unreachable!("element was just inserted"),
        }
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|node| matches!(node, XmlNode::Element(e) if e.name == name))
    }
}
