//! PROV-JSON interchange rendering

use serde_json::{json, Map, Value};

use crate::document::ProvDocument;
use crate::literal::{AttrValue, Attributes, Literal};
use crate::namespace::QualifiedName;

impl ProvDocument {
    /// Render the document in the PROV-JSON interchange form
    ///
    /// Record sections are keyed by identifier, relations by generated
    /// blank-node keys (`_:u1`, `_:g1`, ...). Empty sections are omitted.
    /// Key ordering is the serializer's sorted order, so the rendering is
    /// deterministic.
    pub fn to_json(&self) -> Value {
        let mut root = Map::new();

        if !self.namespaces().is_empty() {
            let prefixes: Map<String, Value> = self
                .namespaces()
                .iter()
                .map(|ns| (ns.prefix.clone(), Value::String(ns.uri.clone())))
                .collect();
            root.insert("prefix".into(), Value::Object(prefixes));
        }

        let mut entities = Map::new();
        for entity in self.entities() {
            entities.insert(entity.id.to_string(), Value::Object(attrs_json(&entity.attributes)));
        }
        for collection in self.collections() {
            let mut attrs = Map::new();
            insert_attr(
                &mut attrs,
                "prov:type".into(),
                qname_json(&QualifiedName::prov("Collection")),
            );
            for (key, value) in collection.attributes.iter() {
                insert_attr(&mut attrs, key.to_string(), attr_value_json(value));
            }
            entities.insert(collection.id.to_string(), Value::Object(attrs));
        }
        if !entities.is_empty() {
            root.insert("entity".into(), Value::Object(entities));
        }

        if !self.activities().is_empty() {
            let mut activities = Map::new();
            for activity in self.activities() {
                let mut attrs = Map::new();
                attrs.insert(
                    "prov:startTime".into(),
                    Value::String(activity.start_time.to_rfc3339()),
                );
                attrs.insert(
                    "prov:endTime".into(),
                    Value::String(activity.end_time.to_rfc3339()),
                );
                for (key, value) in activity.attributes.iter() {
                    insert_attr(&mut attrs, key.to_string(), attr_value_json(value));
                }
                activities.insert(activity.id.to_string(), Value::Object(attrs));
            }
            root.insert("activity".into(), Value::Object(activities));
        }

        if !self.agents().is_empty() {
            let mut agents = Map::new();
            for agent in self.agents() {
                agents.insert(agent.id.to_string(), Value::Object(attrs_json(&agent.attributes)));
            }
            root.insert("agent".into(), Value::Object(agents));
        }

        if !self.usages().is_empty() {
            let mut usages = Map::new();
            for (i, usage) in self.usages().iter().enumerate() {
                let mut attrs = Map::new();
                attrs.insert("prov:activity".into(), Value::String(usage.activity.to_string()));
                attrs.insert("prov:entity".into(), Value::String(usage.entity.to_string()));
                for (key, value) in usage.attributes.iter() {
                    insert_attr(&mut attrs, key.to_string(), attr_value_json(value));
                }
                usages.insert(format!("_:u{}", i + 1), Value::Object(attrs));
            }
            root.insert("used".into(), Value::Object(usages));
        }

        if !self.generations().is_empty() {
            let mut generations = Map::new();
            for (i, gen) in self.generations().iter().enumerate() {
                let mut attrs = Map::new();
                attrs.insert("prov:entity".into(), Value::String(gen.entity.to_string()));
                attrs.insert("prov:activity".into(), Value::String(gen.activity.to_string()));
                for (key, value) in gen.attributes.iter() {
                    insert_attr(&mut attrs, key.to_string(), attr_value_json(value));
                }
                generations.insert(format!("_:g{}", i + 1), Value::Object(attrs));
            }
            root.insert("wasGeneratedBy".into(), Value::Object(generations));
        }

        if !self.associations().is_empty() {
            let mut associations = Map::new();
            for (i, assoc) in self.associations().iter().enumerate() {
                let mut attrs = Map::new();
                attrs.insert("prov:activity".into(), Value::String(assoc.activity.to_string()));
                attrs.insert("prov:agent".into(), Value::String(assoc.agent.to_string()));
                for (key, value) in assoc.attributes.iter() {
                    insert_attr(&mut attrs, key.to_string(), attr_value_json(value));
                }
                associations.insert(format!("_:assoc{}", i + 1), Value::Object(attrs));
            }
            root.insert("wasAssociatedWith".into(), Value::Object(associations));
        }

        if !self.memberships().is_empty() {
            let mut memberships = Map::new();
            for (i, member) in self.memberships().iter().enumerate() {
                memberships.insert(
                    format!("_:m{}", i + 1),
                    json!({
                        "prov:collection": member.collection.to_string(),
                        "prov:entity": member.entity.to_string(),
                    }),
                );
            }
            root.insert("hadMember".into(), Value::Object(memberships));
        }

        Value::Object(root)
    }
}

fn attrs_json(attributes: &Attributes) -> Map<String, Value> {
    let mut map = Map::new();
    for (key, value) in attributes.iter() {
        insert_attr(&mut map, key.to_string(), attr_value_json(value));
    }
    map
}

/// Insert an attribute, folding repeated keys into an array
fn insert_attr(map: &mut Map<String, Value>, key: String, value: Value) {
    match map.get_mut(&key) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let prior = existing.take();
            *existing = Value::Array(vec![prior, value]);
        }
        None => {
            map.insert(key, value);
        }
    }
}

fn attr_value_json(value: &AttrValue) -> Value {
    match value {
        AttrValue::Literal(lit) => literal_json(lit),
        AttrValue::QName(q) => qname_json(q),
    }
}

/// `xsd:string` literals render as plain JSON strings, everything else as
/// a `{"$": lexical, "type": datatype}` pair
fn literal_json(lit: &Literal) -> Value {
    if lit.datatype == QualifiedName::xsd("string") {
        Value::String(lit.value.clone())
    } else {
        json!({ "$": lit.value, "type": lit.datatype.to_string() })
    }
}

fn qname_json(q: &QualifiedName) -> Value {
    json!({ "$": q.to_string(), "type": "prov:QUALIFIED_NAME" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::Namespace;

    fn qn(local: &str) -> QualifiedName {
        QualifiedName::new("ex", local)
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(ProvDocument::new().to_json(), json!({}));
    }

    #[test]
    fn test_prefix_section() {
        let mut doc = ProvDocument::new();
        doc.add_namespace(Namespace::new("ex", "http://example.org/"));
        assert_eq!(doc.to_json()["prefix"], json!({ "ex": "http://example.org/" }));
    }

    #[test]
    fn test_entity_values() {
        let mut doc = ProvDocument::new();
        doc.entity(
            qn("e1"),
            Attributes::new()
                .with(QualifiedName::prov("label"), Literal::string("demo"))
                .with(QualifiedName::prov("value"), Literal::integer(7)),
        );

        let entity = &doc.to_json()["entity"]["ex:e1"];
        assert_eq!(entity["prov:label"], json!("demo"));
        assert_eq!(entity["prov:value"], json!({ "$": "7", "type": "xsd:integer" }));
    }

    #[test]
    fn test_collection_carries_collection_type() {
        let mut doc = ProvDocument::new();
        doc.collection(
            qn("c1"),
            Attributes::new().with(QualifiedName::prov("type"), QualifiedName::new("ex", "Inputs")),
        );

        let entity = &doc.to_json()["entity"]["ex:c1"];
        assert_eq!(
            entity["prov:type"],
            json!([
                { "$": "prov:Collection", "type": "prov:QUALIFIED_NAME" },
                { "$": "ex:Inputs", "type": "prov:QUALIFIED_NAME" },
            ])
        );
    }

    #[test]
    fn test_relation_blank_nodes() {
        let mut doc = ProvDocument::new();
        doc.used(qn("a1"), qn("e1"), Attributes::new());
        doc.used(qn("a1"), qn("e2"), Attributes::new());
        doc.had_member(qn("c1"), qn("e1"));

        let value = doc.to_json();
        assert_eq!(value["used"]["_:u1"]["prov:entity"], json!("ex:e1"));
        assert_eq!(value["used"]["_:u2"]["prov:entity"], json!("ex:e2"));
        assert_eq!(value["hadMember"]["_:m1"]["prov:collection"], json!("ex:c1"));
    }

    #[test]
    fn test_activity_times() {
        use chrono::TimeZone;

        let mut doc = ProvDocument::new();
        let start = chrono::Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let end = start + chrono::Duration::seconds(10);
        doc.activity(qn("a1"), start, end, Attributes::new());

        let activity = &doc.to_json()["activity"]["ex:a1"];
        assert_eq!(activity["prov:startTime"], json!("2026-01-02T03:04:05+00:00"));
        assert_eq!(activity["prov:endTime"], json!("2026-01-02T03:04:15+00:00"));
    }

    #[test]
    fn test_empty_sections_omitted() {
        let mut doc = ProvDocument::new();
        doc.entity(qn("e1"), Attributes::new());

        let value = doc.to_json();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("entity"));
        assert!(!object.contains_key("activity"));
        assert!(!object.contains_key("used"));
    }
}
