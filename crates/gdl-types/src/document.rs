use crate::error::TypeError;

/// A single element of a parsed document.
///
/// Elements are fully owned so a [`Document`] can move across tasks freely
/// after the source text has been dropped. Text content is the concatenation
/// of the element's direct text and CDATA children, trimmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    /// Create an element with no attributes, children or text.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: String::new(),
        }
    }

    /// Local tag name (namespace prefix stripped).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the attribute `name`, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// All attributes in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Child elements in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First child element named `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All child elements named `name`, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Trimmed text of the first child named `name`.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text())
    }

    /// Whether a child element named `name` exists (used for flag elements
    /// such as `<NoWalk/>`).
    pub fn has_child(&self, name: &str) -> bool {
        self.child(name).is_some()
    }

    /// Trimmed text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Builder: add an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Builder: append a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Builder: set text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let mut text = String::new();
        let mut children = Vec::new();
        for child in node.children() {
            if child.is_element() {
                children.push(Self::from_node(child));
            } else if child.is_text() {
                if let Some(t) = child.text() {
                    text.push_str(t);
                }
            }
        }
        Self {
            name: node.tag_name().name().to_string(),
            attributes: node
                .attributes()
                .map(|a| (a.name().to_string(), a.value().to_string()))
                .collect(),
            children,
            text: text.trim().to_string(),
        }
    }
}

/// A parsed structured document: the unit every acquisition strategy
/// produces and every decoder consumes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Parse XML text into an owned element tree.
    pub fn parse(text: &str) -> Result<Self, TypeError> {
        let doc = roxmltree::Document::parse(text)
            .map_err(|e| TypeError::MalformedDocument(e.to_string()))?;
        Ok(Self {
            root: Element::from_node(doc.root_element()),
        })
    }

    /// Wrap an already-built element tree.
    pub fn from_root(root: Element) -> Self {
        Self { root }
    }

    /// The document's root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Returns `true` when the root element is `<Error>`, the shape remote
    /// endpoints use to report a failed request with a 200 status.
    pub fn is_error(&self) -> bool {
        self.root.name == "Error"
    }
}
