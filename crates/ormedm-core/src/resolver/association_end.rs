//! Association ends of one relationship attribute.

use super::join_column::JoinColumnPair;
use crate::edm::{AssociationEnd, Multiplicity};
use crate::metamodel::{AttributeDescriptor, AttributeKind};

/// Relationship kinds that produce associations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RelationshipKind {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl RelationshipKind {
    /// The relationship kind of an attribute, if it is one.
    pub(crate) fn of(kind: AttributeKind) -> Option<Self> {
        match kind {
            AttributeKind::OneToOne => Some(RelationshipKind::OneToOne),
            AttributeKind::OneToMany => Some(RelationshipKind::OneToMany),
            AttributeKind::ManyToOne => Some(RelationshipKind::ManyToOne),
            AttributeKind::ManyToMany => Some(RelationshipKind::ManyToMany),
            AttributeKind::Basic | AttributeKind::Embedded => None,
        }
    }

    /// Whether the referenced end is single-valued.
    pub(crate) fn is_to_one(&self) -> bool {
        matches!(self, RelationshipKind::OneToOne | RelationshipKind::ManyToOne)
    }

    /// Multiplicities of (declaring end, referenced end).
    pub(crate) fn multiplicities(&self, optional: bool) -> (Multiplicity, Multiplicity) {
        let to_one = if optional {
            Multiplicity::ZeroToOne
        } else {
            Multiplicity::One
        };
        match self {
            RelationshipKind::OneToMany => (Multiplicity::One, Multiplicity::Many),
            RelationshipKind::ManyToMany => (Multiplicity::Many, Multiplicity::Many),
            RelationshipKind::ManyToOne => (Multiplicity::Many, to_one),
            RelationshipKind::OneToOne => (Multiplicity::One, to_one),
        }
    }
}

/// How a candidate's ends line up with a known association's ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Alignment {
    /// Candidate end1 is the association's end1.
    Straight,
    /// Candidate end1 is the association's end2.
    Swapped,
}

/// Both ends of one relationship attribute plus what is needed to merge it
/// with the opposite side's declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AssociationEndView {
    /// Declaring entity type.
    pub(crate) end1: AssociationEnd,
    /// Referenced entity type.
    pub(crate) end2: AssociationEnd,
    pub(crate) mapped_by: Option<String>,
    pub(crate) owning_property: Option<String>,
    pub(crate) join_columns: Vec<JoinColumnPair>,
}

impl AssociationEndView {
    /// Compare against a known association's ends.
    ///
    /// Returns the alignment under which the ends are equivalent: same types
    /// and multiplicities, or same types where one position differs only by
    /// ONE vs ZERO_TO_ONE.
    pub(crate) fn compare(&self, end1: &AssociationEnd, end2: &AssociationEnd) -> Option<Alignment> {
        if equivalent(end1, end2, &self.end1, &self.end2) {
            Some(Alignment::Straight)
        } else if equivalent(end1, end2, &self.end2, &self.end1) {
            Some(Alignment::Swapped)
        } else {
            None
        }
    }

    /// Candidate ends ordered as the known association's (end1, end2).
    pub(crate) fn aligned(&self, alignment: Alignment) -> (&AssociationEnd, &AssociationEnd) {
        match alignment {
            Alignment::Straight => (&self.end1, &self.end2),
            Alignment::Swapped => (&self.end2, &self.end1),
        }
    }
}

fn equivalent(
    known1: &AssociationEnd,
    known2: &AssociationEnd,
    candidate1: &AssociationEnd,
    candidate2: &AssociationEnd,
) -> bool {
    if known1.entity_type != candidate1.entity_type || known2.entity_type != candidate2.entity_type {
        return false;
    }
    let (k1, k2) = (known1.multiplicity, known2.multiplicity);
    let (c1, c2) = (candidate1.multiplicity, candidate2.multiplicity);

    (k1 == c1 && k2 == c2)
        || (k1 == c1 && k2.is_optional_variant_of(c2))
        || (k1.is_optional_variant_of(c1) && k2 == c2)
}

/// Build the ends of a relationship attribute declared on `source` and
/// pointing at `target`.
pub(crate) fn resolve(
    source: &str,
    target: &str,
    kind: RelationshipKind,
    attribute: &AttributeDescriptor,
    join_columns: Vec<JoinColumnPair>,
) -> AssociationEndView {
    let (m1, m2) = kind.multiplicities(attribute.is_optional());
    let end1 = AssociationEnd::new(source, m1);
    let mut end2 = AssociationEnd::new(target, m2);
    if end2.role == end1.role {
        end2.role.push('2');
    }

    let mapped_by = attribute.mapped_by_name().map(String::from);
    let owning_property = match mapped_by {
        Some(_) => None,
        None => Some(attribute.name.clone()),
    };

    AssociationEndView {
        end1,
        end2,
        mapped_by,
        owning_property,
        join_columns,
    }
}
