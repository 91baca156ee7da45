//! Catalog
//!
//! Offerings and add-ons fetched for a booking session, indexed by id.

use rustc_hash::FxHashMap;

use crate::{
    add_ons::{AddOn, AddOnId},
    offerings::{Offering, OfferingId, OfferingKind},
};

/// Offerings and add-ons available to a booking session.
///
/// Listing order follows fetch order. A later entry with an id already seen
/// replaces the earlier one in place.
#[derive(Debug, Clone, Default)]
pub struct Catalog<'a> {
    offerings: Vec<Offering<'a>>,
    offering_index: FxHashMap<OfferingId, usize>,
    add_ons: Vec<AddOn<'a>>,
    add_on_index: FxHashMap<AddOnId, usize>,
}

impl<'a> Catalog<'a> {
    /// Build a catalog from fetched offerings and add-ons.
    pub fn new(
        offerings: impl IntoIterator<Item = Offering<'a>>,
        add_ons: impl IntoIterator<Item = AddOn<'a>>,
    ) -> Self {
        let mut catalog = Self::default();

        for offering in offerings {
            upsert(
                &mut catalog.offerings,
                &mut catalog.offering_index,
                offering.id().clone(),
                offering,
            );
        }

        for add_on in add_ons {
            upsert(
                &mut catalog.add_ons,
                &mut catalog.add_on_index,
                add_on.id().clone(),
                add_on,
            );
        }

        catalog
    }

    /// Look up an offering by id.
    pub fn offering(&self, id: &OfferingId) -> Option<&Offering<'a>> {
        self.offering_index
            .get(id)
            .and_then(|&idx| self.offerings.get(idx))
    }

    /// Look up an add-on by id.
    pub fn add_on(&self, id: &AddOnId) -> Option<&AddOn<'a>> {
        self.add_on_index
            .get(id)
            .and_then(|&idx| self.add_ons.get(idx))
    }

    /// Every offering, in fetch order.
    pub fn offerings(&self) -> &[Offering<'a>] {
        &self.offerings
    }

    /// Every add-on, in fetch order.
    pub fn add_ons(&self) -> &[AddOn<'a>] {
        &self.add_ons
    }

    /// Bookable offerings of one kind.
    pub fn available(&self, kind: OfferingKind) -> impl Iterator<Item = &Offering<'a>> {
        self.offerings
            .iter()
            .filter(move |offering| offering.kind() == kind && offering.is_available())
    }

    /// Whether nothing was fetched.
    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty() && self.add_ons.is_empty()
    }
}

fn upsert<K, V>(entries: &mut Vec<V>, index: &mut FxHashMap<K, usize>, key: K, value: V)
where
    K: Eq + std::hash::Hash,
{
    if let Some(slot) = index.get(&key).and_then(|&idx| entries.get_mut(idx)) {
        *slot = value;
        return;
    }

    index.insert(key, entries.len());
    entries.push(value);
}
