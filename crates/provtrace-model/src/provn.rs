//! PROV-N text notation rendering

use std::fmt::Write;

use crate::document::ProvDocument;
use crate::literal::{AttrValue, Attributes, Literal};
use crate::namespace::QualifiedName;
use crate::record::Collection;

impl ProvDocument {
    /// Render the document in PROV-N notation
    ///
    /// Records are grouped by kind and emitted in insertion order within
    /// each group, so the rendering is deterministic.
    pub fn to_provn(&self) -> String {
        let mut out = String::new();
        out.push_str("document\n");

        for ns in self.namespaces() {
            let _ = writeln!(out, "  prefix {} <{}>", ns.prefix, ns.uri);
        }
        if !self.namespaces().is_empty() {
            out.push('\n');
        }

        for entity in self.entities() {
            let _ = writeln!(out, "  entity({}{})", entity.id, attr_block(&entity.attributes));
        }
        for collection in self.collections() {
            let _ = writeln!(out, "  entity({}{})", collection.id, collection_attr_block(collection));
        }
        for activity in self.activities() {
            let _ = writeln!(
                out,
                "  activity({}, {}, {}{})",
                activity.id,
                activity.start_time.to_rfc3339(),
                activity.end_time.to_rfc3339(),
                attr_block(&activity.attributes)
            );
        }
        for agent in self.agents() {
            let _ = writeln!(out, "  agent({}{})", agent.id, attr_block(&agent.attributes));
        }
        for usage in self.usages() {
            let _ = writeln!(
                out,
                "  used({}, {}, -{})",
                usage.activity,
                usage.entity,
                attr_block(&usage.attributes)
            );
        }
        for gen in self.generations() {
            let _ = writeln!(
                out,
                "  wasGeneratedBy({}, {}, -{})",
                gen.entity,
                gen.activity,
                attr_block(&gen.attributes)
            );
        }
        for assoc in self.associations() {
            let _ = writeln!(
                out,
                "  wasAssociatedWith({}, {}, -{})",
                assoc.activity,
                assoc.agent,
                attr_block(&assoc.attributes)
            );
        }
        for member in self.memberships() {
            let _ = writeln!(out, "  hadMember({}, {})", member.collection, member.entity);
        }

        out.push_str("endDocument\n");
        out
    }
}

/// `, [k1=v1, k2=v2]` suffix, or empty when there are no attributes
fn attr_block(attributes: &Attributes) -> String {
    if attributes.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = attributes
        .iter()
        .map(|(key, value)| format!("{}={}", key, attr_value(value)))
        .collect();
    format!(", [{}]", rendered.join(", "))
}

/// Attribute block for a collection, with `prov:type='prov:Collection'`
/// prepended to its declared attributes
fn collection_attr_block(collection: &Collection) -> String {
    let mut rendered = vec![format!(
        "{}={}",
        QualifiedName::prov("type"),
        qname_value(&QualifiedName::prov("Collection"))
    )];
    rendered.extend(
        collection
            .attributes
            .iter()
            .map(|(key, value)| format!("{}={}", key, attr_value(value))),
    );
    format!(", [{}]", rendered.join(", "))
}

fn attr_value(value: &AttrValue) -> String {
    match value {
        AttrValue::Literal(lit) => literal_value(lit),
        AttrValue::QName(q) => qname_value(q),
    }
}

fn literal_value(lit: &Literal) -> String {
    format!("\"{}\" %% {}", escape(&lit.value), lit.datatype)
}

fn qname_value(q: &QualifiedName) -> String {
    format!("'{q}'")
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
