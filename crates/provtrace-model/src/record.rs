//! Graph records: entities, activities, agents, collections

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::literal::Attributes;
use crate::namespace::QualifiedName;

/// A value node: a file, a scalar, or a composite datum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Record identifier
    pub id: QualifiedName,

    /// Descriptive attributes
    pub attributes: Attributes,
}

/// One execution of a computational step, bounded in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Record identifier
    pub id: QualifiedName,

    /// When the execution started
    pub start_time: DateTime<Utc>,

    /// When the execution ended
    pub end_time: DateTime<Utc>,

    /// Descriptive attributes
    pub attributes: Attributes,
}

/// A responsible party: a person or a piece of software
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Record identifier
    pub id: QualifiedName,

    /// Descriptive attributes
    pub attributes: Attributes,
}

/// An entity grouping other entities
///
/// Members are recorded separately as [`crate::relation::Membership`]
/// relations; the collection itself renders as an entity typed
/// `prov:Collection`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Record identifier
    pub id: QualifiedName,

    /// Descriptive attributes
    pub attributes: Attributes,
}
