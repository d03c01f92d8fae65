// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

//! Inline style injection for elements that page CSS cannot reach.

use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use html5ever::tendril::TendrilSink;
use html5ever::{Attribute, LocalName, Namespace, QualName, parse_document};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

use crate::Result;
use crate::config::Options;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Tag(&'static str),
    Class(&'static str),
}

impl Selector {
    fn matches(&self, handle: &Handle) -> bool {
        let NodeData::Element {
            ref name,
            ref attrs,
            ..
        } = handle.data
        else {
            return false;
        };
        match self {
            Selector::Tag(tag) => name.local.as_ref() == *tag,
            Selector::Class(class) => attrs
                .borrow()
                .iter()
                .filter(|attr| attr.name.local.as_ref() == "class")
                .any(|attr| attr.value.split_whitespace().any(|c| c == *class)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRule {
    /// The rule applies when any selector matches.
    pub selectors: Vec<Selector>,
    pub declarations: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRules(Vec<StyleRule>);

impl StyleRules {
    pub fn new(rules: Vec<StyleRule>) -> Self {
        Self(rules)
    }

    pub fn from_options(options: &Options) -> Self {
        let border = format!("border: 1px solid {};", options.border_color);
        Self(vec![
            StyleRule {
                selectors: vec![Selector::Tag("table")],
                declarations: format!("{border} border-collapse: collapse;"),
            },
            StyleRule {
                selectors: vec![Selector::Tag("tr")],
                declarations: border.clone(),
            },
            StyleRule {
                selectors: vec![Selector::Tag("th"), Selector::Tag("td")],
                declarations: format!("{border} padding: 5px;"),
            },
            StyleRule {
                selectors: vec![Selector::Tag("code")],
                declarations: "font-family: monospace; border-radius: 5px; font-size: 0.8em;"
                    .to_string(),
            },
            StyleRule {
                selectors: vec![Selector::Class("katex-html")],
                declarations: "display: inline-block".to_string(),
            },
        ])
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.0
    }
}

impl Default for StyleRules {
    fn default() -> Self {
        Self::from_options(&Options::default())
    }
}

/// Append each rule's declarations to the `style` attribute of matching
/// elements in `html`, keeping whatever style they already carry.
pub fn inject_inline_styles(html: &str, rules: &StyleRules) -> Result<String> {
    let dom = parse_body(html);
    let Some(body) = find_first_element(&dom.document, "body") else {
        return Ok(String::new());
    };

    for rule in rules.rules() {
        let mut matched = Vec::new();
        collect_matching(&body, &rule.selectors, &mut matched);
        for element in &matched {
            append_style(element, &rule.declarations);
        }
    }

    serialize_children(&body)
}

fn parse_body(html: &str) -> RcDom {
    let wrapped = format!("<!DOCTYPE html><html><head></head><body>{html}</body></html>");
    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .one(wrapped.as_bytes())
}

fn find_first_element(handle: &Handle, name: &str) -> Option<Handle> {
    if let NodeData::Element { name: ref qname, .. } = handle.data
        && qname.local.as_ref() == name
    {
        return Some(handle.clone());
    }

    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_first_element(child, name))
}

fn collect_matching(handle: &Handle, selectors: &[Selector], out: &mut Vec<Handle>) {
    for child in handle.children.borrow().iter() {
        if selectors.iter().any(|selector| selector.matches(child)) {
            out.push(child.clone());
        }
        collect_matching(child, selectors, out);
    }
}

fn append_style(handle: &Handle, declarations: &str) {
    let NodeData::Element { ref attrs, .. } = handle.data else {
        return;
    };
    let mut attrs = attrs.borrow_mut();

    if let Some(attr) = attrs
        .iter_mut()
        .find(|attr| attr.name.local.as_ref() == "style")
    {
        let merged = merge_declarations(&attr.value, declarations);
        attr.value = merged.into();
        return;
    }

    attrs.push(Attribute {
        name: QualName::new(None, Namespace::from(""), LocalName::from("style")),
        value: declarations.into(),
    });
}

fn merge_declarations(existing: &str, appended: &str) -> String {
    let existing = existing.trim();
    if existing.is_empty() {
        appended.to_string()
    } else if existing.ends_with(';') {
        format!("{existing} {appended}")
    } else {
        format!("{existing}; {appended}")
    }
}

fn serialize_children(handle: &Handle) -> Result<String> {
    let mut bytes = Vec::new();
    let serializable: SerializableHandle = handle.clone().into();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };
    serialize(&mut bytes, &serializable, opts)?;
    Ok(String::from_utf8(bytes)?)
}
