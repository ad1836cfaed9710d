//! Search, filter and sort over a fixed catalog of entities.

pub mod animals;

use std::cmp::Ordering;

/// Numeric fields a catalog can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SortField {
    Price,
    Rating,
    Reviews,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SortKey {
    /// Catalog order.
    #[default]
    Featured,
    Ascending(SortField),
    Descending(SortField),
}

impl SortKey {
    pub const LABELS: [&'static str; 5] =
        ["featured", "price-low", "price-high", "rating", "reviews"];

    /// Parses the storefront's sort option values.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "featured" => Some(SortKey::Featured),
            "price-low" => Some(SortKey::Ascending(SortField::Price)),
            "price-high" => Some(SortKey::Descending(SortField::Price)),
            "rating" => Some(SortKey::Descending(SortField::Rating)),
            "reviews" => Some(SortKey::Descending(SortField::Reviews)),
            _ => None,
        }
    }
}

/// Either every value passes, or only the given one.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Selector<T> {
    #[default]
    All,
    Only(T),
}

impl<T> Selector<T> {
    fn admits(&self, matches: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(value) => matches(value),
        }
    }
}

pub trait CatalogEntity {
    type Category: PartialEq;
    type Status;

    /// Strings the free-text query is matched against.
    fn searchable_text(&self) -> Vec<&str>;

    fn category(&self) -> &Self::Category;

    fn matches_status(&self, status: &Self::Status) -> bool;

    fn sort_value(&self, field: SortField) -> Option<f64>;
}

impl<T: CatalogEntity> CatalogEntity for &T {
    type Category = T::Category;
    type Status = T::Status;

    fn searchable_text(&self) -> Vec<&str> {
        (**self).searchable_text()
    }

    fn category(&self) -> &Self::Category {
        (**self).category()
    }

    fn matches_status(&self, status: &Self::Status) -> bool {
        (**self).matches_status(status)
    }

    fn sort_value(&self, field: SortField) -> Option<f64> {
        (**self).sort_value(field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FilterCriteria<C, S> {
    pub query: String,
    pub category: Selector<C>,
    pub status: Selector<S>,
    pub sort: SortKey,
}

impl<C, S> Default for FilterCriteria<C, S> {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: Selector::All,
            status: Selector::All,
            sort: SortKey::Featured,
        }
    }
}

impl<C, S> FilterCriteria<C, S> {
    /// Whether anything narrows or reorders the catalog.
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
            || !matches!(self.category, Selector::All)
            || !matches!(self.status, Selector::All)
            || self.sort != SortKey::Featured
    }
}

/// Entities passing every active predicate, in the requested order.
pub fn filter<'a, E>(
    entities: &'a [E],
    criteria: &FilterCriteria<E::Category, E::Status>,
) -> Vec<&'a E>
where
    E: CatalogEntity,
{
    let query = criteria.query.to_lowercase();

    let mut matching = entities
        .iter()
        .filter(|entity| matches_query(*entity, &query))
        .filter(|entity| criteria.category.admits(|c| entity.category() == c))
        .filter(|entity| criteria.status.admits(|s| entity.matches_status(s)))
        .collect::<Vec<_>>();

    // `sort_by` is stable, so ties keep catalog order
    match criteria.sort {
        SortKey::Featured => {}
        SortKey::Ascending(field) => {
            matching.sort_by(|a, b| compare_field(a.sort_value(field), b.sort_value(field), false))
        }
        SortKey::Descending(field) => {
            matching.sort_by(|a, b| compare_field(a.sort_value(field), b.sort_value(field), true))
        }
    }

    log::debug!(
        "Catalog filter kept {} of {} entities",
        matching.len(),
        entities.len()
    );
    matching
}

fn matches_query<E: CatalogEntity>(entity: &E, lowercase_query: &str) -> bool {
    lowercase_query.is_empty()
        || entity
            .searchable_text()
            .iter()
            .any(|text| text.to_lowercase().contains(lowercase_query))
}

// Entities without the field go after the ones that have it, in either direction.
fn compare_field(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if descending => b.total_cmp(&a),
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
