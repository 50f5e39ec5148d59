//! The provenance document container

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::literal::Attributes;
use crate::namespace::{Namespace, QualifiedName};
use crate::record::{Activity, Agent, Collection, Entity};
use crate::relation::{Association, Generation, Membership, Usage};

/// A provenance document: namespace declarations plus every record and
/// relation captured for one or more executions
///
/// Node identifiers are content-addressed by the capture layer, so adding
/// a record under an identifier that is already present is a no-op: the
/// existing record and the new one are the same record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProvDocument {
    namespaces: Vec<Namespace>,
    entities: Vec<Entity>,
    collections: Vec<Collection>,
    activities: Vec<Activity>,
    agents: Vec<Agent>,
    usages: Vec<Usage>,
    generations: Vec<Generation>,
    memberships: Vec<Membership>,
    associations: Vec<Association>,
}

impl ProvDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a namespace; redeclaring a prefix is a no-op
    pub fn add_namespace(&mut self, namespace: Namespace) {
        if !self.namespaces.iter().any(|ns| ns.prefix == namespace.prefix) {
            self.namespaces.push(namespace);
        }
    }

    /// Add an entity, returning its identifier
    ///
    /// If an entity or collection with this identifier already exists the
    /// document is unchanged.
    pub fn entity(&mut self, id: QualifiedName, attributes: Attributes) -> QualifiedName {
        if !self.has_node(&id) {
            self.entities.push(Entity {
                id: id.clone(),
                attributes,
            });
        }
        id
    }

    /// Add a collection, returning its identifier
    ///
    /// Deduplicated against entities and collections alike, the same way
    /// [`ProvDocument::entity`] is.
    pub fn collection(&mut self, id: QualifiedName, attributes: Attributes) -> QualifiedName {
        if !self.has_node(&id) {
            self.collections.push(Collection {
                id: id.clone(),
                attributes,
            });
        }
        id
    }

    /// Add an activity, returning its identifier
    pub fn activity(
        &mut self,
        id: QualifiedName,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        attributes: Attributes,
    ) -> QualifiedName {
        self.activities.push(Activity {
            id: id.clone(),
            start_time,
            end_time,
            attributes,
        });
        id
    }

    /// Add an agent, returning its identifier
    ///
    /// If an agent with this identifier already exists the document is
    /// unchanged.
    pub fn agent(&mut self, id: QualifiedName, attributes: Attributes) -> QualifiedName {
        if !self.agents.iter().any(|a| a.id == id) {
            self.agents.push(Agent {
                id: id.clone(),
                attributes,
            });
        }
        id
    }

    /// Record that `activity` used `entity`
    pub fn used(&mut self, activity: QualifiedName, entity: QualifiedName, attributes: Attributes) {
        self.usages.push(Usage {
            activity,
            entity,
            attributes,
        });
    }

    /// Record that `entity` was generated by `activity`
    pub fn was_generated_by(
        &mut self,
        entity: QualifiedName,
        activity: QualifiedName,
        attributes: Attributes,
    ) {
        self.generations.push(Generation {
            entity,
            activity,
            attributes,
        });
    }

    /// Record that `collection` had `entity` as a member
    pub fn had_member(&mut self, collection: QualifiedName, entity: QualifiedName) {
        self.memberships.push(Membership { collection, entity });
    }

    /// Record that `activity` was associated with `agent`
    pub fn was_associated_with(
        &mut self,
        activity: QualifiedName,
        agent: QualifiedName,
        attributes: Attributes,
    ) {
        self.associations.push(Association {
            activity,
            agent,
            attributes,
        });
    }

    /// Declared namespaces
    pub fn namespaces(&self) -> &[Namespace] {
        &self.namespaces
    }

    /// All entities
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// All collections
    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// All activities
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// All agents
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// All usage relations
    pub fn usages(&self) -> &[Usage] {
        &self.usages
    }

    /// All generation relations
    pub fn generations(&self) -> &[Generation] {
        &self.generations
    }

    /// All membership relations
    pub fn memberships(&self) -> &[Membership] {
        &self.memberships
    }

    /// All association relations
    pub fn associations(&self) -> &[Association] {
        &self.associations
    }

    /// Look up an entity by identifier
    pub fn find_entity(&self, id: &QualifiedName) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == *id)
    }

    /// Whether an entity or collection with this identifier exists
    pub fn has_node(&self, id: &QualifiedName) -> bool {
        self.entities.iter().any(|e| e.id == *id)
            || self.collections.iter().any(|c| c.id == *id)
    }

    /// Members of a collection, in insertion order
    pub fn members_of(&self, collection: &QualifiedName) -> Vec<&QualifiedName> {
        self.memberships
            .iter()
            .filter(|m| m.collection == *collection)
            .map(|m| &m.entity)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::Literal;

    fn qn(local: &str) -> QualifiedName {
        QualifiedName::new("ex", local)
    }

    #[test]
    fn test_entity_dedup() {
        let mut doc = ProvDocument::new();
        doc.entity(qn("e1"), Attributes::new().with(QualifiedName::prov("label"), Literal::string("a")));
        doc.entity(qn("e1"), Attributes::new().with(QualifiedName::prov("label"), Literal::string("a")));

        assert_eq!(doc.entities().len(), 1);
    }

    #[test]
    fn test_collection_dedup_spans_entities() {
        let mut doc = ProvDocument::new();
        doc.entity(qn("n1"), Attributes::new());
        doc.collection(qn("n1"), Attributes::new());

        assert_eq!(doc.entities().len(), 1);
        assert!(doc.collections().is_empty());
    }

    #[test]
    fn test_agent_dedup() {
        let mut doc = ProvDocument::new();
        doc.agent(qn("a1"), Attributes::new());
        doc.agent(qn("a1"), Attributes::new());

        assert_eq!(doc.agents().len(), 1);
    }

    #[test]
    fn test_namespace_dedup_by_prefix() {
        let mut doc = ProvDocument::new();
        doc.add_namespace(Namespace::new("ex", "http://example.org/"));
        doc.add_namespace(Namespace::new("ex", "http://example.org/other/"));

        assert_eq!(doc.namespaces().len(), 1);
        assert_eq!(doc.namespaces()[0].uri, "http://example.org/");
    }

    #[test]
    fn test_members_of() {
        let mut doc = ProvDocument::new();
        let c = doc.collection(qn("c"), Attributes::new());
        doc.entity(qn("m1"), Attributes::new());
        doc.entity(qn("m2"), Attributes::new());
        doc.had_member(c.clone(), qn("m1"));
        doc.had_member(c.clone(), qn("m2"));

        let members = doc.members_of(&c);
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].localpart, "m1");
    }

    #[test]
    fn test_clone_is_independent() {
        let mut doc = ProvDocument::new();
        doc.entity(qn("e1"), Attributes::new());

        let snapshot = doc.clone();
        doc.entity(qn("e2"), Attributes::new());

        assert_eq!(snapshot.entities().len(), 1);
        assert_eq!(doc.entities().len(), 2);
        assert_ne!(snapshot, doc);
    }
}
