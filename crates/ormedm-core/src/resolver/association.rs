//! Association deduplication, widening and the referential-constraint pass.

use super::association_end::{Alignment, AssociationEndView};
use super::context::BuildContext;
use super::naming;
use crate::edm::Association;
use tracing::{debug, warn};

/// The association a relationship attribute resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AssociationMatch {
    pub(crate) name: String,
    /// Orientation of the attribute's ends within the association.
    pub(crate) alignment: Alignment,
}

/// Find a known association declared by the opposite side of `candidate`.
///
/// A match through the candidate's `mapped_by` relaxes the known ends in place.
pub(crate) fn search(
    ctx: &mut BuildContext<'_>,
    candidate: &AssociationEndView,
) -> Option<AssociationMatch> {
    let (name, alignment, widen) = ctx.associations.iter().find_map(|(name, association)| {
        let alignment = candidate.compare(&association.end1, &association.end2)?;
        let known = ctx.association_views.get(name)?;

        let same_join_columns =
            !candidate.join_columns.is_empty() && candidate.join_columns == known.join_columns;
        let inverse_of_known =
            candidate.mapped_by.is_some() && candidate.mapped_by == known.owning_property;
        let owner_of_known =
            candidate.owning_property.is_some() && candidate.owning_property == known.mapped_by;

        (same_join_columns || inverse_of_known || owner_of_known)
            .then(|| (name.clone(), alignment, inverse_of_known))
    })?;

    if widen {
        if let Some(association) = ctx.associations.get_mut(&name) {
            let (end1, end2) = candidate.aligned(alignment);
            let widened1 = association.end1.multiplicity.widened_by(end1.multiplicity);
            let widened2 = association.end2.multiplicity.widened_by(end2.multiplicity);
            if widened1 != association.end1.multiplicity || widened2 != association.end2.multiplicity {
                debug!(association = %name, end1 = %widened1, end2 = %widened2, "Widened association ends");
            }
            association.end1.multiplicity = widened1;
            association.end2.multiplicity = widened2;
        }
    }

    debug!(association = %name, ?alignment, "Merged with known association");
    Some(AssociationMatch { name, alignment })
}

/// Resolve `candidate` to a known association or register a new one.
pub(crate) fn resolve(ctx: &mut BuildContext<'_>, candidate: AssociationEndView) -> AssociationMatch {
    if let Some(found) = search(ctx, &candidate) {
        return found;
    }

    let end1 = &candidate.end1.entity_type;
    let end2 = &candidate.end2.entity_type;
    let mut similar = ctx
        .associations
        .values()
        .filter(|a| a.connects(end1, end2))
        .count();
    let mut name = naming::association_name(end1, end2, similar);
    while ctx.association_name_taken(&name) {
        similar += 1;
        name = naming::association_name(end1, end2, similar);
    }

    debug!(association = %name, "Created association");
    ctx.associations.insert(
        name.clone(),
        Association {
            name: name.clone(),
            end1: candidate.end1.clone(),
            end2: candidate.end2.clone(),
            referential_constraint: None,
        },
    );
    ctx.association_views.insert(name.clone(), candidate);

    AssociationMatch {
        name,
        alignment: Alignment::Straight,
    }
}

/// One bounded pass over the pending referential constraints.
///
/// Each queued constraint gets exactly one attempt. A resolved constraint is
/// attached to a copy of its association, which replaces both the map entry
/// and any earlier consistent entry. An unresolved one removes its
/// association from the map and stays queued. Returns the number of
/// constraints still pending.
pub(crate) fn drain_pending(ctx: &mut BuildContext<'_>) -> usize {
    let pending_count = ctx.pending.len();
    let mut index = 0;

    for _ in 0..pending_count {
        let mut pending = ctx.pending.remove(index);
        match pending.resolve(ctx) {
            Some(constraint) => {
                let Some(known) = ctx.associations.get(&pending.association) else {
                    debug!(
                        association = %pending.association,
                        attribute = %pending.attribute,
                        "Association no longer exists, constraint discarded"
                    );
                    continue;
                };
                let mut resolved = known.clone();
                resolved.referential_constraint = Some(constraint);

                ctx.associations.insert(resolved.name.clone(), resolved.clone());
                ctx.consistent.retain(|a| a.name != resolved.name);
                ctx.consistent.push(resolved);
            }
            None => {
                warn!(
                    association = %pending.association,
                    attribute = %pending.attribute,
                    "Referential constraint unresolved, dropping association"
                );
                ctx.associations.shift_remove(&pending.association);
                ctx.association_views.remove(&pending.association);
                ctx.pending.insert(index, pending);
                index += 1;
            }
        }
    }

    collect_consistent(ctx);
    ctx.pending.len()
}

/// Union the associations not yet in the consistent list into it.
pub(crate) fn collect_consistent(ctx: &mut BuildContext<'_>) {
    for association in ctx.associations.values() {
        if !ctx.consistent.iter().any(|a| a.name == association.name) {
            ctx.consistent.push(association.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConfig;
    use crate::edm::Multiplicity;
    use crate::metamodel::{AttributeDescriptor, Metamodel};
    use crate::resolver::association_end::{self, RelationshipKind};
    use crate::resolver::join_column::JoinColumnPair;

    fn view(source: &str, target: &str, attribute: &AttributeDescriptor) -> AssociationEndView {
        let kind = RelationshipKind::of(attribute.kind).unwrap();
        association_end::resolve(source, target, kind, attribute, Vec::new())
    }

    #[test]
    fn test_opposite_sides_merge() {
        let metamodel = Metamodel::new("shop");
        let config = BuildConfig::new();
        let mut ctx = BuildContext::new(&metamodel, &config);

        let items = AttributeDescriptor::one_to_many("items", "shop.Item").mapped_by("order");
        let order = AttributeDescriptor::many_to_one("order", "shop.Order");

        let first = resolve(&mut ctx, view("Order", "Item", &items));
        let second = resolve(&mut ctx, view("Item", "Order", &order));

        assert_eq!(first.name, "Item_Order");
        assert_eq!(second.name, "Item_Order");
        assert_eq!(second.alignment, Alignment::Swapped);
        assert_eq!(ctx.associations.len(), 1);
    }

    #[test]
    fn test_inverse_side_widens_known_ends() {
        let metamodel = Metamodel::new("shop");
        let config = BuildConfig::new();
        let mut ctx = BuildContext::new(&metamodel, &config);

        let passport = AttributeDescriptor::one_to_one("passport", "hr.Passport");
        let holder = AttributeDescriptor::one_to_one("holder", "hr.Person")
            .mapped_by("passport")
            .optional();

        resolve(&mut ctx, view("Person", "Passport", &passport));
        let merged = resolve(&mut ctx, view("Passport", "Person", &holder));

        let association = &ctx.associations[&merged.name];
        assert_eq!(association.end1.entity_type, "Person");
        assert_eq!(association.end1.multiplicity, Multiplicity::ZeroToOne);
        assert_eq!(association.end2.multiplicity, Multiplicity::One);
        assert_eq!(ctx.associations.len(), 1);
    }

    #[test]
    fn test_unrelated_pairs_get_suffixed_names() {
        let metamodel = Metamodel::new("shop");
        let config = BuildConfig::new();
        let mut ctx = BuildContext::new(&metamodel, &config);

        let billing = AttributeDescriptor::many_to_one("billingAddress", "shop.Address");
        let shipping = AttributeDescriptor::many_to_one("shippingAddress", "shop.Address");

        let first = resolve(&mut ctx, view("Customer", "Address", &billing));
        let second = resolve(&mut ctx, view("Customer", "Address", &shipping));

        assert_eq!(first.name, "Address_Customer");
        assert_eq!(second.name, "Address_Customer1");
    }

    #[test]
    fn test_identical_join_columns_merge() {
        let metamodel = Metamodel::new("shop");
        let config = BuildConfig::new();
        let mut ctx = BuildContext::new(&metamodel, &config);
        let pair = vec![JoinColumnPair {
            local: "ORDER_ID".to_string(),
            referenced: "ID".to_string(),
        }];

        let order = AttributeDescriptor::many_to_one("order", "shop.Order");
        let again = AttributeDescriptor::many_to_one("parentOrder", "shop.Order");
        let kind = RelationshipKind::ManyToOne;

        resolve(&mut ctx, association_end::resolve("Item", "Order", kind, &order, pair.clone()));
        let merged = resolve(&mut ctx, association_end::resolve("Item", "Order", kind, &again, pair));

        assert_eq!(merged.alignment, Alignment::Straight);
        assert_eq!(ctx.associations.len(), 1);
    }

    #[test]
    fn test_collect_consistent_is_a_union() {
        let metamodel = Metamodel::new("shop");
        let config = BuildConfig::new();
        let mut ctx = BuildContext::new(&metamodel, &config);

        let order = AttributeDescriptor::many_to_one("order", "shop.Order");
        resolve(&mut ctx, view("Item", "Order", &order));

        assert_eq!(drain_pending(&mut ctx), 0);
        collect_consistent(&mut ctx);
        assert_eq!(ctx.consistent.len(), 1);
        assert_eq!(ctx.consistent[0].name, "Item_Order");
    }
}
