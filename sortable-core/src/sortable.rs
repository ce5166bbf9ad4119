//! Sort a collection by a logical field name
//!
//! [`Sortable`] resolves a caller-facing field name through an optional
//! [`FieldMap`], applies the requested direction to the resulting tokens and
//! hands the signed fields either to the collection's own ordering or to a
//! stable multi-key sort over in-memory records.

use crate::collection::{Collection, NoView, OrderedView};
use crate::error::{Result, SortError};
use crate::fields::{
    Direction, FieldMap, FieldSpec, SignedField, order_clause, prepare_fields_with,
};
use crate::record::{Accessor, FieldAccess, field_access};
use crate::utils::{collect_by_indices, sorted_indices_by};
use crate::value::SortValue;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Outcome of a sort request
#[derive(Debug, Clone, PartialEq)]
pub enum Sorted<'a, R, Q = NoView> {
    /// The request was a no-op; this is the original collection
    Unchanged(&'a Collection<R, Q>),
    /// A newly ordered collection
    Reordered(Collection<R, Q>),
}

impl<'a, R, Q> Sorted<'a, R, Q> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Sorted::Unchanged(_))
    }

    pub fn as_collection(&self) -> &Collection<R, Q> {
        match self {
            Sorted::Unchanged(collection) => collection,
            Sorted::Reordered(collection) => collection,
        }
    }

    pub fn records(&self) -> Option<&[R]> {
        self.as_collection().as_records()
    }

    pub fn view(&self) -> Option<&Q> {
        self.as_collection().as_view()
    }

    pub fn into_owned(self) -> Collection<R, Q>
    where
        R: Clone,
        Q: Clone,
    {
        match self {
            Sorted::Unchanged(collection) => collection.clone(),
            Sorted::Reordered(collection) => collection,
        }
    }
}

/// A collection plus the logical field names it may be sorted by
pub struct Sortable<R, Q = NoView> {
    objects: Collection<R, Q>,
    fields: Option<FieldMap>,
    accessor: Accessor<R>,
}

impl<R, Q: fmt::Debug> fmt::Debug for Sortable<R, Q>
where
    R: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sortable")
            .field("objects", &self.objects)
            .field("fields", &self.fields)
            .field("accessor", &std::any::type_name::<Accessor<R>>())
            .finish()
    }
}

impl<R: FieldAccess, Q> Sortable<R, Q> {
    /// Create a sortable whose records are read through their [`FieldAccess`] impl
    pub fn new(objects: impl Into<Collection<R, Q>>, fields: Option<FieldMap>) -> Self {
        Self::with_accessor_arc(objects, fields, field_access::<R>())
    }

    /// Create a sortable from raw mapping input (names, pairs, or name/list pairs)
    pub fn with_fields<I, S>(objects: impl Into<Collection<R, Q>>, specs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldSpec>,
    {
        Ok(Self::new(objects, Some(FieldMap::try_from_specs(specs)?)))
    }
}

impl<R, Q> Sortable<R, Q> {
    /// Create a sortable that reads record fields through `accessor`
    pub fn with_accessor(
        objects: impl Into<Collection<R, Q>>,
        fields: Option<FieldMap>,
        accessor: impl Fn(&R, &str) -> Option<SortValue> + Send + Sync + 'static,
    ) -> Self {
        Self::with_accessor_arc(objects, fields, Arc::new(accessor))
    }

    fn with_accessor_arc(
        objects: impl Into<Collection<R, Q>>,
        fields: Option<FieldMap>,
        accessor: Accessor<R>,
    ) -> Self {
        Self {
            objects: objects.into(),
            fields,
            accessor,
        }
    }

    pub fn objects(&self) -> &Collection<R, Q> {
        &self.objects
    }

    pub fn fields(&self) -> Option<&FieldMap> {
        self.fields.as_ref()
    }

    pub(crate) fn accessor(&self) -> &Accessor<R> {
        &self.accessor
    }

    /// Concrete tokens for a logical name.
    ///
    /// Without a mapping (or with an empty one) the name is its own token.
    /// With a mapping, unknown names resolve to `None`.
    pub fn resolve<'a>(&'a self, field_name: &'a str) -> Option<Vec<&'a str>> {
        match self.fields.as_ref().filter(|map| !map.is_empty()) {
            Some(map) => map
                .get(field_name)
                .map(|tokens| tokens.iter().map(String::as_str).collect()),
            None => Some(vec![field_name]),
        }
    }

    /// Sort by a logical field name and a direction string.
    ///
    /// Unknown field names and directions other than `"asc"`/`"desc"` leave
    /// the collection untouched. Sorting an unsupported collection fails.
    pub fn sorted(&self, field_name: &str, direction: &str) -> Result<Sorted<'_, R, Q>>
    where
        R: Clone,
        Q: OrderedView,
    {
        let Some(direction) = Direction::parse(direction) else {
            debug!("Ignoring sort on '{}' with invalid direction '{}'", field_name, direction);
            return Ok(Sorted::Unchanged(&self.objects));
        };
        self.sorted_in(field_name, direction)
    }

    /// Sort by a logical field name in an already parsed direction
    pub fn sorted_in(&self, field_name: &str, direction: Direction) -> Result<Sorted<'_, R, Q>>
    where
        R: Clone,
        Q: OrderedView,
    {
        let Some(tokens) = self.resolve(field_name) else {
            debug!("Ignoring sort on unknown field '{}'", field_name);
            return Ok(Sorted::Unchanged(&self.objects));
        };

        let fields = prepare_fields_with(tokens, direction);
        self.sort_by_fields(&fields)
    }

    /// Order the collection by already signed fields
    pub fn sort_by_fields(&self, fields: &[SignedField]) -> Result<Sorted<'_, R, Q>>
    where
        R: Clone,
        Q: OrderedView,
    {
        trace!(
            "Sorting {} collection by {:?}",
            self.objects.describe(),
            fields.iter().map(ToString::to_string).collect::<Vec<_>>()
        );

        match &self.objects {
            Collection::Native(view) => {
                Ok(Sorted::Reordered(Collection::Native(view.order_by(fields))))
            }
            Collection::InMemory(records) => {
                if records.len() < 2 {
                    return Ok(Sorted::Unchanged(&self.objects));
                }
                let sorted = sort_records(records, fields, &self.accessor);
                Ok(Sorted::Reordered(Collection::InMemory(sorted)))
            }
            Collection::Unsupported { type_name } => {
                Err(SortError::UnsortableCollection(type_name.clone()))
            }
        }
    }

    /// SQL `ORDER BY` fragment for a logical field name.
    ///
    /// Unknown field names and invalid directions fall back to `default`; a
    /// missing default yields an empty string.
    pub fn sql_predicate(
        &self,
        field_name: &str,
        direction: &str,
        default: Option<&[&str]>,
    ) -> String {
        let tokens = if Direction::parse(direction).is_none() {
            debug!(
                "Invalid direction '{}' for '{}', using default ordering",
                direction, field_name
            );
            default.map(<[&str]>::to_vec)
        } else {
            self.resolve(field_name).or_else(|| {
                debug!("Unknown field '{}', using default ordering", field_name);
                default.map(<[&str]>::to_vec)
            })
        };

        order_clause(tokens.unwrap_or_default(), direction)
    }
}

/// Stable lexicographic sort of records over the signed fields
fn sort_records<R: Clone>(records: &[R], fields: &[SignedField], accessor: &Accessor<R>) -> Vec<R> {
    let keys: Vec<Vec<SortValue>> = records
        .iter()
        .map(|record| {
            fields
                .iter()
                .map(|field| accessor(record, &field.name).unwrap_or_default())
                .collect()
        })
        .collect();

    let indices = sorted_indices_by(&keys, |a, b| compare_keys(a, b, fields));
    collect_by_indices(records, &indices)
}

/// Compare key rows field by field, falling through on ties
fn compare_keys(a: &[SortValue], b: &[SortValue], fields: &[SignedField]) -> Ordering {
    a.iter()
        .zip(b)
        .zip(fields)
        .map(|((left, right), field)| left.compare_with_order(right, field.descending))
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}
