//! Add-ons

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;

use crate::{ids::TypedId, pricing::total_price};

/// Add-on Id
pub type AddOnId = TypedId<AddOn<'static>>;

/// A flat-priced extra that can be attached to any offering.
#[derive(Debug, Clone, PartialEq)]
pub struct AddOn<'a> {
    id: AddOnId,
    name: String,
    price: Money<'a, Currency>,
}

impl<'a> AddOn<'a> {
    /// Create a new add-on.
    pub fn new(id: AddOnId, name: impl Into<String>, price: Money<'a, Currency>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }

    /// Add-on id
    pub fn id(&self) -> &AddOnId {
        &self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Flat price
    pub fn price(&self) -> Money<'a, Currency> {
        self.price
    }
}

/// Selected add-ons, unique by id, in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddOnSelection<'a> {
    add_ons: SmallVec<[AddOn<'a>; 4]>,
}

impl<'a> AddOnSelection<'a> {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select an add-on. Returns `false` if one with the same id was already selected,
    /// in which case the existing entry is kept.
    pub fn insert(&mut self, add_on: AddOn<'a>) -> bool {
        if self.contains(add_on.id()) {
            return false;
        }

        self.add_ons.push(add_on);

        true
    }

    /// Deselect an add-on by id.
    pub fn remove(&mut self, id: &AddOnId) -> Option<AddOn<'a>> {
        let idx = self.add_ons.iter().position(|add_on| add_on.id() == id)?;

        Some(self.add_ons.remove(idx))
    }

    /// Whether an add-on with this id is selected.
    pub fn contains(&self, id: &AddOnId) -> bool {
        self.add_ons.iter().any(|add_on| add_on.id() == id)
    }

    /// Iterate the selected add-ons.
    pub fn iter(&self) -> impl Iterator<Item = &AddOn<'a>> {
        self.add_ons.iter()
    }

    /// Number of selected add-ons.
    pub fn len(&self) -> usize {
        self.add_ons.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.add_ons.is_empty()
    }

    /// Sum of the selected add-on prices.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if an add-on is priced in a different currency.
    pub fn total(&self, currency: &'a Currency) -> Result<Money<'a, Currency>, MoneyError> {
        total_price(self.add_ons.iter().map(AddOn::price), currency)
    }
}
