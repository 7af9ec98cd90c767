//! Output markup tree

use std::collections::BTreeMap;
use std::fmt;

/// Rendered output of a component
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Node {
    #[default]
    Empty,
    Text(String),
    Element(Element),
}

/// A tagged element with attributes and children
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Apply a style map as an inline `style` attribute (`paddingLeft` -> `padding-left`)
    pub fn style(self, style: &BTreeMap<String, String>) -> Self {
        let css = style
            .iter()
            .map(|(name, value)| format!("{}: {}", kebab_case(name), value))
            .collect::<Vec<_>>()
            .join("; ");
        if css.is_empty() {
            self
        } else {
            self.attr("style", css)
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn element(tag: impl Into<String>) -> Element {
        Element::new(tag)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }

    /// Concatenated text of this node and all descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Empty => {}
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Whether any element in this tree carries `class` in its class list
    pub fn has_class(&self, class: &str) -> bool {
        match self {
            Node::Element(element) => {
                let own = element
                    .attributes
                    .get("class")
                    .map(|classes| classes.split_whitespace().any(|c| c == class))
                    .unwrap_or(false);
                own || element.children.iter().any(|child| child.has_class(class))
            }
            _ => false,
        }
    }
}

fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn escape(text: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for c in text.chars() {
        match c {
            '&' => f.write_str("&amp;")?,
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '"' => f.write_str("&quot;")?,
            _ => write!(f, "{c}")?,
        }
    }
    Ok(())
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Empty => Ok(()),
            Node::Text(text) => escape(text, f),
            Node::Element(element) => {
                write!(f, "<{}", element.tag)?;
                for (name, value) in &element.attributes {
                    write!(f, " {name}=\"")?;
                    escape(value, f)?;
                    f.write_str("\"")?;
                }
                f.write_str(">")?;
                for child in &element.children {
                    write!(f, "{child}")?;
                }
                write!(f, "</{}>", element.tag)
            }
        }
    }
}
