//! Relations linking graph records

use serde::{Deserialize, Serialize};

use crate::literal::Attributes;
use crate::namespace::QualifiedName;

/// `used`: an activity consumed an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    /// The consuming activity
    pub activity: QualifiedName,

    /// The consumed entity
    pub entity: QualifiedName,

    /// Relation attributes (e.g., the port the value arrived on)
    pub attributes: Attributes,
}

/// `wasGeneratedBy`: an activity produced an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    /// The produced entity
    pub entity: QualifiedName,

    /// The producing activity
    pub activity: QualifiedName,

    /// Relation attributes (e.g., the port the value left on)
    pub attributes: Attributes,
}

/// `hadMember`: a collection contains an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    /// The containing collection
    pub collection: QualifiedName,

    /// The member entity
    pub entity: QualifiedName,
}

/// `wasAssociatedWith`: an agent bears responsibility for an activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Association {
    /// The activity
    pub activity: QualifiedName,

    /// The responsible agent
    pub agent: QualifiedName,

    /// Relation attributes (e.g., the agent's role)
    pub attributes: Attributes,
}
