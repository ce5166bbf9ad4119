//! Header bucketing on top of a sort
//!
//! [`HeaderedSortable`] sorts like [`Sortable`] and then splits the result into
//! an ordered set of labelled buckets. Labels come from the configured
//! [`HeaderKind`]: the alphabet, a list of related entities, a fixed list of
//! values, or relative date ranges. Buckets that would be empty are left out.

use crate::collection::{Collection, FilteredView, HeaderPredicate, NoView};
use crate::error::{Result, SortError};
use crate::fields::Direction;
use crate::record::FieldAccess;
use crate::sortable::{Sortable, Sorted};
use crate::value::SortValue;
use chrono::{DateTime, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Label used when everything lands under one header
pub const DEFAULT_SINGLE_HEADER: &str = "All";

pub const ALPHABET: [&str; 26] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T", "U", "V", "W", "X", "Y", "Z",
];

/// Date bucket labels, newest first
pub const DATE_BUCKET_LABELS: [&str; 5] = [
    "Today",
    "Last 7 days",
    "Last 30 days",
    "This year",
    "More than 1 year ago",
];

/// How header labels are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderKind {
    /// One bucket holding everything
    #[default]
    None,
    /// One bucket per initial letter
    Alpha,
    /// One bucket per related entity; the record field holds a single key
    RelatedSingle,
    /// One bucket per related entity; the record field holds a list of keys
    RelatedMany,
    /// One bucket per fixed value
    ListValues,
    /// Relative date ranges
    DateBucket,
}

/// Label and key read from a related entity
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedHeader {
    pub label: String,
    pub key: SortValue,
}

impl RelatedHeader {
    pub fn new(label: impl Into<String>, key: impl Into<SortValue>) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
        }
    }
}

/// Read header labels and keys from related entities.
///
/// Both fields must be present on every item.
pub fn related_headers<T: FieldAccess>(
    items: &[T],
    header_field: &str,
    key_field: &str,
) -> Result<Vec<RelatedHeader>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let read = |field: &str| {
                item.field(field)
                    .filter(|value| !value.is_null())
                    .ok_or_else(|| SortError::MissingHeaderField {
                        index,
                        field: field.to_string(),
                    })
            };
            Ok(RelatedHeader {
                label: read(header_field)?.to_string(),
                key: read(key_field)?,
            })
        })
        .collect()
}

/// Header configuration for a [`HeaderedSortable`]
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderSettings {
    pub kind: HeaderKind,
    /// Label for the single-bucket cases; `None` means return the sort flat
    pub single_label: Option<String>,
    pub related: Vec<RelatedHeader>,
    pub fixed_values: Vec<SortValue>,
    /// Reference instant for date buckets, `Utc::now()` when unset
    pub now: Option<DateTime<Utc>>,
}

impl Default for HeaderSettings {
    fn default() -> Self {
        Self {
            kind: HeaderKind::None,
            single_label: Some(DEFAULT_SINGLE_HEADER.to_string()),
            related: Vec::new(),
            fixed_values: Vec::new(),
            now: None,
        }
    }
}

impl HeaderSettings {
    pub fn single() -> Self {
        Self::default()
    }

    pub fn alpha() -> Self {
        Self {
            kind: HeaderKind::Alpha,
            ..Self::default()
        }
    }

    pub fn list_values<V: Into<SortValue>>(values: impl IntoIterator<Item = V>) -> Self {
        Self {
            kind: HeaderKind::ListValues,
            fixed_values: values.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn date_buckets() -> Self {
        Self {
            kind: HeaderKind::DateBucket,
            ..Self::default()
        }
    }

    /// Buckets per related entity where records hold one key
    pub fn related_single<T: FieldAccess>(
        items: &[T],
        header_field: &str,
        key_field: &str,
    ) -> Result<Self> {
        Ok(Self {
            kind: HeaderKind::RelatedSingle,
            related: related_headers(items, header_field, key_field)?,
            ..Self::default()
        })
    }

    /// Buckets per related entity where records hold a list of keys
    pub fn related_many<T: FieldAccess>(
        items: &[T],
        header_field: &str,
        key_field: &str,
    ) -> Result<Self> {
        Ok(Self {
            kind: HeaderKind::RelatedMany,
            related: related_headers(items, header_field, key_field)?,
            ..Self::default()
        })
    }

    pub fn with_single_label(mut self, label: Option<impl Into<String>>) -> Self {
        self.single_label = label.map(Into::into);
        self
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    /// Ordered header labels with the predicate each bucket is built from
    pub fn plan(&self, field_name: &str, direction: Direction) -> Vec<(String, HeaderPredicate)> {
        let field = field_name.to_string();
        let reverse = direction.is_descending();

        match self.kind {
            HeaderKind::None => Vec::new(),
            HeaderKind::Alpha => {
                let letters = ALPHABET.iter().map(|letter| {
                    let predicate = HeaderPredicate::StartsWithIgnoreCase {
                        field: field.clone(),
                        prefix: letter.to_string(),
                    };
                    (letter.to_string(), predicate)
                });
                if reverse {
                    letters.rev().collect()
                } else {
                    letters.collect()
                }
            }
            HeaderKind::RelatedSingle | HeaderKind::RelatedMany => {
                let ordered: Box<dyn Iterator<Item = &RelatedHeader>> = if reverse {
                    Box::new(self.related.iter().rev())
                } else {
                    Box::new(self.related.iter())
                };

                let mut plan: Vec<(String, HeaderPredicate)> = Vec::new();
                for header in ordered {
                    let predicate = if self.kind == HeaderKind::RelatedMany {
                        HeaderPredicate::Contains {
                            field: field.clone(),
                            value: header.key.clone(),
                        }
                    } else {
                        HeaderPredicate::Equals {
                            field: field.clone(),
                            value: header.key.clone(),
                        }
                    };
                    upsert(&mut plan, header.label.clone(), predicate);
                }
                plan
            }
            HeaderKind::ListValues => {
                // Values that render to the same label share one bucket
                let mut labelled: Vec<(String, Vec<SortValue>)> = Vec::new();
                for value in &self.fixed_values {
                    let label = value.to_string();
                    match labelled.iter_mut().find(|(existing, _)| *existing == label) {
                        Some((_, values)) if values.contains(value) => {}
                        Some((_, values)) => values.push(value.clone()),
                        None => labelled.push((label, vec![value.clone()])),
                    }
                }

                labelled
                    .into_iter()
                    .map(|(label, mut values)| {
                        let predicate = if values.len() == 1 {
                            HeaderPredicate::Equals {
                                field: field.clone(),
                                value: values.remove(0),
                            }
                        } else {
                            HeaderPredicate::AnyOf {
                                field: field.clone(),
                                values,
                            }
                        };
                        (label, predicate)
                    })
                    .collect()
            }
            HeaderKind::DateBucket => {
                let now = self.now.unwrap_or_else(Utc::now);
                let buckets = date_bucket_ranges(now).into_iter().map(|(label, from, until)| {
                    let predicate = HeaderPredicate::Range {
                        field: field.clone(),
                        from,
                        until,
                    };
                    (label.to_string(), predicate)
                });
                // Labels run newest first, which matches a descending sort
                if reverse {
                    buckets.collect()
                } else {
                    buckets.rev().collect()
                }
            }
        }
    }
}

/// Insert or replace an entry, keeping the position of the first occurrence
fn upsert<V>(entries: &mut Vec<(String, V)>, label: String, value: V) {
    match entries.iter_mut().find(|(existing, _)| *existing == label) {
        Some((_, slot)) => *slot = value,
        None => entries.push((label, value)),
    }
}

/// Half-open `[from, until)` ranges for each date bucket, newest first.
///
/// `Today` runs from midnight up to and including `now`; instants after `now`
/// fall in no bucket.
pub fn date_bucket_ranges(
    now: DateTime<Utc>,
) -> [(&'static str, Option<DateTime<Utc>>, Option<DateTime<Utc>>); 5] {
    let midnight = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    let week_ago = now - TimeDelta::days(7);
    let month_ago = now - TimeDelta::days(30);
    let year_ago = now - TimeDelta::days(365);
    // Timestamps resolve to nanoseconds, so this bound admits `now` itself
    let after_now = now + TimeDelta::nanoseconds(1);

    [
        (DATE_BUCKET_LABELS[0], Some(midnight), Some(after_now)),
        (DATE_BUCKET_LABELS[1], Some(week_ago), Some(midnight)),
        (DATE_BUCKET_LABELS[2], Some(month_ago), Some(week_ago)),
        (DATE_BUCKET_LABELS[3], Some(year_ago), Some(month_ago)),
        (DATE_BUCKET_LABELS[4], None, Some(year_ago)),
    ]
}

/// Ordered mapping of header label to the records under it
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderBuckets<R, Q = NoView> {
    entries: Vec<(String, Collection<R, Q>)>,
}

impl<R, Q> Default for HeaderBuckets<R, Q> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<R, Q> HeaderBuckets<R, Q> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a bucket; an existing label keeps its position and gets the new subset
    pub fn insert(&mut self, label: impl Into<String>, subset: Collection<R, Q>) {
        upsert(&mut self.entries, label.into(), subset);
    }

    pub fn get(&self, label: &str) -> Option<&Collection<R, Q>> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, subset)| subset)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Collection<R, Q>)> {
        self.entries.iter().map(|(label, subset)| (label.as_str(), subset))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_inner(self) -> Vec<(String, Collection<R, Q>)> {
        self.entries
    }
}

/// Result of a headered sort
#[derive(Debug, Clone, PartialEq)]
pub enum Grouped<'a, R, Q = NoView> {
    /// Too few headers and no single label configured
    Flat(Sorted<'a, R, Q>),
    Headed(HeaderBuckets<R, Q>),
}

impl<'a, R, Q> Grouped<'a, R, Q> {
    pub fn buckets(&self) -> Option<&HeaderBuckets<R, Q>> {
        match self {
            Grouped::Headed(buckets) => Some(buckets),
            Grouped::Flat(_) => None,
        }
    }

    pub fn into_buckets(self) -> Option<HeaderBuckets<R, Q>> {
        match self {
            Grouped::Headed(buckets) => Some(buckets),
            Grouped::Flat(_) => None,
        }
    }
}

/// A [`Sortable`] whose results are split under headers
#[derive(Debug)]
pub struct HeaderedSortable<R, Q = NoView> {
    base: Sortable<R, Q>,
    settings: HeaderSettings,
}

impl<R, Q> HeaderedSortable<R, Q> {
    pub fn new(base: Sortable<R, Q>, settings: HeaderSettings) -> Self {
        Self { base, settings }
    }

    pub fn base(&self) -> &Sortable<R, Q> {
        &self.base
    }

    pub fn settings(&self) -> &HeaderSettings {
        &self.settings
    }

    /// SQL `ORDER BY` fragment, see [`Sortable::sql_predicate`]
    pub fn sql_predicate(
        &self,
        field_name: &str,
        direction: &str,
        default: Option<&[&str]>,
    ) -> String {
        self.base.sql_predicate(field_name, direction, default)
    }

    /// Sort and split the result into header buckets
    pub fn sorted(&self, field_name: &str, direction: &str) -> Result<Grouped<'_, R, Q>>
    where
        R: Clone,
        Q: FilteredView + Clone,
    {
        let sorted_items = self.base.sorted(field_name, direction)?;

        if self.settings.kind == HeaderKind::None {
            let label = self
                .settings
                .single_label
                .as_deref()
                .unwrap_or(DEFAULT_SINGLE_HEADER);
            return Ok(Grouped::Headed(single_bucket(label, sorted_items)));
        }

        let plan = self
            .settings
            .plan(field_name, Direction::parse(direction).unwrap_or_default());

        if plan.len() < 2 {
            return Ok(match self.settings.single_label.as_deref() {
                Some(label) => Grouped::Headed(single_bucket(label, sorted_items)),
                None => Grouped::Flat(sorted_items),
            });
        }

        let mut buckets = HeaderBuckets::new();
        match sorted_items.as_collection() {
            Collection::InMemory(records) => {
                let accessor = self.base.accessor();
                for (label, predicate) in plan {
                    let subset: Vec<R> = records
                        .iter()
                        .filter(|record| {
                            predicate.matches(&accessor(*record, field_name).unwrap_or_default())
                        })
                        .cloned()
                        .collect();
                    if !subset.is_empty() {
                        buckets.insert(label, Collection::InMemory(subset));
                    }
                }
            }
            Collection::Native(view) => {
                for (label, predicate) in plan {
                    let subset = view.filter(&predicate);
                    if !subset.is_empty() {
                        buckets.insert(label, Collection::Native(subset));
                    }
                }
            }
            Collection::Unsupported { type_name } => {
                return Err(SortError::UnsortableCollection(type_name.clone()));
            }
        }

        debug!(
            "Bucketed '{}' into {} {:?} headers",
            field_name,
            buckets.len(),
            self.settings.kind
        );
        Ok(Grouped::Headed(buckets))
    }
}

fn single_bucket<R: Clone, Q: Clone>(label: &str, sorted: Sorted<'_, R, Q>) -> HeaderBuckets<R, Q> {
    let mut buckets = HeaderBuckets::new();
    buckets.insert(label, sorted.into_owned());
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::{Value, json};

    fn titles(collection: &Collection<Value>) -> Vec<&str> {
        collection
            .as_records()
            .unwrap()
            .iter()
            .map(|r| r["title"].as_str().unwrap())
            .collect()
    }

    fn films() -> Vec<Value> {
        vec![
            json!({ "title": "brazil", "studio": 2 }),
            json!({ "title": "Alien", "studio": 1 }),
            json!({ "title": "Amelie", "studio": 2 }),
            json!({ "title": "Zodiac", "studio": 1 }),
        ]
    }

    fn headered(settings: HeaderSettings) -> HeaderedSortable<Value> {
        HeaderedSortable::new(Sortable::new(films(), None), settings)
    }

    #[test]
    fn test_alpha_headers_skip_empty_letters() {
        let source = headered(HeaderSettings::alpha());
        let grouped = source.sorted("title", "asc").unwrap();
        let buckets = grouped.buckets().unwrap();

        assert_eq!(buckets.labels().collect::<Vec<_>>(), vec!["A", "B", "Z"]);
        assert_eq!(titles(buckets.get("A").unwrap()), vec!["Alien", "Amelie"]);
        assert_eq!(titles(buckets.get("B").unwrap()), vec!["brazil"]);
    }

    #[test]
    fn test_alpha_headers_reverse_for_descending() {
        let source = headered(HeaderSettings::alpha());
        let grouped = source.sorted("title", "desc").unwrap();
        assert_eq!(
            grouped.buckets().unwrap().labels().collect::<Vec<_>>(),
            vec!["Z", "B", "A"]
        );
    }

    #[test]
    fn test_single_header_holds_everything() {
        let source = headered(HeaderSettings::single());
        let grouped = source.sorted("title", "asc").unwrap();
        let buckets = grouped.buckets().unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets.get("All").unwrap().as_records().unwrap().len(), 4);

        let empty: HeaderedSortable<Value> = HeaderedSortable::new(
            Sortable::new(Vec::new(), None),
            HeaderSettings::single().with_single_label(Some("Everything")),
        );
        let grouped = empty.sorted("title", "asc").unwrap();
        let buckets = grouped.buckets().unwrap();
        assert_eq!(buckets.labels().collect::<Vec<_>>(), vec!["Everything"]);
    }

    #[test]
    fn test_related_single_headers() {
        let studios = vec![
            json!({ "id": 1, "name": "Fox" }),
            json!({ "id": 2, "name": "Gaumont" }),
            json!({ "id": 3, "name": "Empty Studio" }),
        ];
        let settings = HeaderSettings::related_single(&studios, "name", "id").unwrap();
        let source = headered(settings);
        let grouped = source.sorted("studio", "asc").unwrap();
        let buckets = grouped.buckets().unwrap();

        assert_eq!(buckets.labels().collect::<Vec<_>>(), vec!["Fox", "Gaumont"]);
        assert_eq!(titles(buckets.get("Fox").unwrap()), vec!["Alien", "Zodiac"]);
    }

    #[test]
    fn test_related_duplicate_labels_keep_first_position() {
        let studios = vec![
            json!({ "id": 1, "name": "Same" }),
            json!({ "id": 2, "name": "Other" }),
            json!({ "id": 3, "name": "Same" }),
        ];
        let settings = HeaderSettings::related_single(&studios, "name", "id").unwrap();
        let plan = settings.plan("studio", Direction::Asc);

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].0, "Same");
        assert_eq!(
            plan[0].1,
            HeaderPredicate::Equals {
                field: "studio".into(),
                value: SortValue::Int(3)
            }
        );
    }

    #[test]
    fn test_related_many_matches_list_fields() {
        let records = vec![
            json!({ "title": "One", "tags": [1, 2] }),
            json!({ "title": "Two", "tags": [2] }),
        ];
        let tags = vec![json!({ "id": 1, "label": "red" }), json!({ "id": 2, "label": "blue" })];
        let sortable: HeaderedSortable<Value> = HeaderedSortable::new(
            Sortable::new(records, None),
            HeaderSettings::related_many(&tags, "label", "id").unwrap(),
        );

        let grouped = sortable.sorted("tags", "asc").unwrap();
        let buckets = grouped.buckets().unwrap();
        assert_eq!(titles(buckets.get("red").unwrap()), vec!["One"]);
        assert_eq!(titles(buckets.get("blue").unwrap()), vec!["One", "Two"]);
    }

    #[test]
    fn test_related_items_require_header_field() {
        let items = vec![json!({ "id": 1 })];
        let err = HeaderSettings::related_single(&items, "name", "id").unwrap_err();
        assert_eq!(
            err,
            SortError::MissingHeaderField {
                index: 0,
                field: "name".into()
            }
        );
    }

    #[test]
    fn test_too_few_headers_without_label_is_flat() {
        let studios = vec![json!({ "id": 1, "name": "Fox" })];
        let settings = HeaderSettings::related_single(&studios, "name", "id")
            .unwrap()
            .with_single_label(None::<String>);
        let source = headered(settings);
        let grouped = source.sorted("title", "asc").unwrap();

        match grouped {
            Grouped::Flat(sorted) => assert_eq!(sorted.records().unwrap().len(), 4),
            Grouped::Headed(_) => panic!("expected a flat result"),
        }
    }

    #[test]
    fn test_too_few_headers_with_label_wraps() {
        let settings = HeaderSettings::list_values(["only"]);
        let source = headered(settings);
        let grouped = source.sorted("title", "asc").unwrap();
        assert_eq!(grouped.buckets().unwrap().labels().collect::<Vec<_>>(), vec!["All"]);
    }

    #[test]
    fn test_list_value_headers() {
        let settings = HeaderSettings::list_values([2_i64, 1, 7]);
        let source = headered(settings);
        let grouped = source.sorted("studio", "asc").unwrap();
        let buckets = grouped.buckets().unwrap();

        assert_eq!(buckets.labels().collect::<Vec<_>>(), vec!["2", "1"]);
        assert_eq!(titles(buckets.get("2").unwrap()), vec!["brazil", "Amelie"]);
    }

    #[test]
    fn test_list_values_with_same_label_share_bucket() {
        let records = vec![
            json!({ "code": 1, "title": "int" }),
            json!({ "code": "1", "title": "text" }),
            json!({ "code": 2, "title": "two" }),
        ];
        let settings = HeaderSettings::list_values([
            SortValue::Int(1),
            SortValue::text("1"),
            SortValue::Int(2),
        ]);
        let sortable: HeaderedSortable<Value> =
            HeaderedSortable::new(Sortable::new(records, None), settings);

        let grouped = sortable.sorted("code", "asc").unwrap();
        let buckets = grouped.buckets().unwrap();
        assert_eq!(buckets.labels().collect::<Vec<_>>(), vec!["1", "2"]);
        assert_eq!(titles(buckets.get("1").unwrap()), vec!["int", "text"]);
        assert_eq!(titles(buckets.get("2").unwrap()), vec!["two"]);
    }

    #[test]
    fn test_list_values_equal_values_collapse() {
        let settings = HeaderSettings::list_values([
            SortValue::Int(3),
            SortValue::Float(3.0),
            SortValue::Int(3),
            SortValue::Int(4),
        ]);
        let plan = settings.plan("n", Direction::Asc);

        // 3 and 3.0 both render as "3" and compare equal
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].0, "3");
        assert_eq!(
            plan[0].1,
            HeaderPredicate::Equals {
                field: "n".into(),
                value: SortValue::Int(3),
            }
        );
        assert_eq!(
            plan[1].1,
            HeaderPredicate::Equals {
                field: "n".into(),
                value: SortValue::Int(4),
            }
        );
    }

    #[test]
    fn test_today_ends_at_now() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let ranges = date_bucket_ranges(now);
        let today = HeaderPredicate::Range {
            field: "created".into(),
            from: ranges[0].1,
            until: ranges[0].2,
        };

        assert!(today.matches(&SortValue::from(now)));
        assert!(today.matches(&SortValue::from(now - TimeDelta::hours(12))));
        assert!(!today.matches(&SortValue::from(now + TimeDelta::seconds(1))));
        assert!(
            ranges
                .iter()
                .all(|(_, from, _)| from.is_none_or(|from| from <= now))
        );
        assert!(
            !ranges.iter().any(|(_, from, until)| {
                let later = now + TimeDelta::hours(6);
                from.is_none_or(|from| later >= from) && until.is_none_or(|until| later < until)
            })
        );
    }

    #[test]
    fn test_date_bucket_ranges() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let at = |y, m, d| SortValue::from(Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap());
        let records = vec![
            json!({ "title": "today" }),
            json!({ "title": "week" }),
            json!({ "title": "month" }),
            json!({ "title": "year" }),
            json!({ "title": "ancient" }),
            json!({ "title": "future" }),
        ];
        let stamps = vec![
            at(2024, 6, 15),
            at(2024, 6, 10),
            at(2024, 5, 25),
            at(2023, 9, 1),
            at(2020, 1, 1),
            at(2024, 6, 20),
        ];
        let sortable = HeaderedSortable::new(
            Sortable::<Value, NoView>::with_accessor(records, None, move |record, name| match name {
                "created" => {
                    let index = ["today", "week", "month", "year", "ancient", "future"]
                        .iter()
                        .position(|t| Some(*t) == record["title"].as_str())?;
                    Some(stamps[index].clone())
                }
                other => record.field(other),
            }),
            HeaderSettings::date_buckets().with_now(now),
        );

        let grouped = sortable.sorted("created", "desc").unwrap();
        let buckets = grouped.buckets().unwrap();
        assert_eq!(buckets.labels().collect::<Vec<_>>(), DATE_BUCKET_LABELS.to_vec());
        assert_eq!(titles(buckets.get("Today").unwrap()), vec!["today"]);
        assert_eq!(titles(buckets.get("Last 7 days").unwrap()), vec!["week"]);
        assert_eq!(titles(buckets.get("More than 1 year ago").unwrap()), vec!["ancient"]);

        let ascending = sortable.sorted("created", "asc").unwrap();
        assert_eq!(
            ascending.buckets().unwrap().labels().next(),
            Some("More than 1 year ago")
        );
    }
}
