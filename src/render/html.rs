//! Markup output for hosts that mount HTML directly.
//!
//! Each node goes through one askama template, so all text and attribute
//! values are escaped.

use crate::{
    error::Result,
    render::{EntityRef, ViewNode},
};
use askama::Template;

#[derive(Template)]
#[template(
    source = r#"<{{ tag }} class="{{ classes }}"{% match data_value %}{% when Some with (value) %} {{ data_name }}="{{ value }}"{% when None %}{% endmatch %}{% if draggable %} draggable="true"{% endif %}{% if editable %} contenteditable="true"{% endif %}{% match label %}{% when Some with (label) %} title="{{ label }}"{% when None %}{% endmatch %}{% match style %}{% when Some with (style) %} style="{{ style }}"{% when None %}{% endmatch %}>{% match text %}{% when Some with (text) %}{{ text }}{% when None %}{% endmatch %}{% for child in children %}{{ child|safe }}{% endfor %}</{{ tag }}>"#,
    ext = "html"
)]
struct NodeTemplate<'a> {
    tag: &'static str,
    classes: String,
    data_name: &'static str,
    data_value: Option<&'a str>,
    draggable: bool,
    editable: bool,
    label: Option<&'a str>,
    style: Option<String>,
    text: Option<&'a str>,
    /// Already rendered markup of the child nodes
    children: Vec<String>,
}

impl<'a> NodeTemplate<'a> {
    fn from_node(node: &'a ViewNode, children: Vec<String>) -> Self {
        let (data_name, data_value) = match &node.entity {
            Some(EntityRef::Column(id)) => ("data-column-id", Some(id.as_str())),
            Some(EntityRef::Task(id)) => ("data-task-id", Some(id.as_str())),
            None => ("", None),
        };
        let style = node.size.map(|size| {
            let mut style = String::new();
            if let Some(height) = size.height {
                style.push_str(&format!("height: {}px; ", height));
            }
            style.push_str(&format!("max-height: {}px;", size.max_height));
            if size.scrollable {
                style.push_str(" overflow-y: auto;");
            }
            style
        });

        Self {
            tag: node.element.tag(),
            classes: node.class_list().join(" "),
            data_name,
            data_value,
            draggable: node.draggable,
            editable: node.editable,
            label: node.label.as_deref(),
            style,
            text: node.text.as_deref(),
            children,
        }
    }
}

/// Renders a sequence of sibling nodes as HTML
pub fn render_html(nodes: &[ViewNode]) -> Result<String> {
    nodes
        .iter()
        .map(ViewNode::to_html)
        .collect::<Result<Vec<_>>>()
        .map(|parts| parts.concat())
}

impl ViewNode {
    pub fn to_html(&self) -> Result<String> {
        let children = self
            .children
            .iter()
            .map(ViewNode::to_html)
            .collect::<Result<Vec<_>>>()?;
        Ok(NodeTemplate::from_node(self, children).render()?)
    }
}
