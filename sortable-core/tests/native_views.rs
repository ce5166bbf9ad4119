use serde_json::{Value, json};
use sortable_core::{
    Collection, FieldAccess, FieldMap, FilteredView, Grouped, HeaderPredicate, HeaderSettings,
    HeaderedSortable, OrderedView, SignedField, SortError, Sortable,
};
use std::cell::RefCell;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Query double that records every call made against it
#[derive(Debug, Clone, Default)]
struct RecordingQuery {
    rows: Vec<Value>,
    ordering: Vec<String>,
    filters: Vec<HeaderPredicate>,
    log: Rc<RefCell<Vec<String>>>,
}

impl RecordingQuery {
    fn new(rows: Vec<Value>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }
}

impl OrderedView for RecordingQuery {
    fn order_by(&self, fields: &[SignedField]) -> Self {
        let ordering: Vec<String> = fields.iter().map(ToString::to_string).collect();
        self.log.borrow_mut().push(format!("order_by {}", ordering.join(",")));
        Self {
            ordering,
            ..self.clone()
        }
    }
}

impl FilteredView for RecordingQuery {
    fn filter(&self, predicate: &HeaderPredicate) -> Self {
        self.log.borrow_mut().push(format!("filter {}", predicate.field()));
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate.matches(&row.field(predicate.field()).unwrap_or_default()))
            .cloned()
            .collect();
        let mut filters = self.filters.clone();
        filters.push(predicate.clone());
        Self {
            rows,
            filters,
            ..self.clone()
        }
    }

    fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn catalog() -> Vec<Value> {
    vec![
        json!({ "title": "Alien", "rating": 8.5 }),
        json!({ "title": "Brazil", "rating": 7.9 }),
        json!({ "title": "Amelie", "rating": 8.3 }),
    ]
}

fn native(query: RecordingQuery) -> Collection<Value, RecordingQuery> {
    Collection::Native(query)
}

fn mapping() -> FieldMap {
    FieldMap::try_from_specs([("rating", vec!["rating", "++title"]), ("title", vec!["title"])])
        .unwrap()
}

#[test]
fn native_view_receives_signed_fields() {
    init_tracing();
    let query = RecordingQuery::new(catalog());
    let sortable: Sortable<Value, RecordingQuery> =
        Sortable::new(native(query), Some(mapping()));

    let sorted = sortable.sorted("rating", "desc").unwrap();
    assert!(!sorted.is_unchanged());
    assert_eq!(sorted.view().unwrap().ordering, vec!["-rating", "title"]);
}

#[test]
fn native_view_untouched_for_unknown_field() {
    let query = RecordingQuery::new(catalog());
    let log = query.log.clone();
    let sortable: Sortable<Value, RecordingQuery> =
        Sortable::new(native(query), Some(mapping()));

    let sorted = sortable.sorted("runtime", "asc").unwrap();
    assert!(sorted.is_unchanged());
    assert!(log.borrow().is_empty());
}

#[test]
fn native_headers_only_emit_non_empty_buckets() {
    init_tracing();
    let query = RecordingQuery::new(catalog());
    let log = query.log.clone();
    let headered: HeaderedSortable<Value, RecordingQuery> = HeaderedSortable::new(
        Sortable::new(native(query), Some(mapping())),
        HeaderSettings::alpha(),
    );

    let grouped = headered.sorted("title", "asc").unwrap();
    let buckets = grouped.buckets().unwrap();
    assert_eq!(buckets.labels().collect::<Vec<_>>(), vec!["A", "B"]);

    let a = buckets.get("A").unwrap().as_view().unwrap();
    assert_eq!(a.rows.len(), 2);
    assert_eq!(a.ordering, vec!["title"]);
    assert_eq!(
        a.filters,
        vec![HeaderPredicate::StartsWithIgnoreCase {
            field: "title".into(),
            prefix: "A".into()
        }]
    );

    // One ordering call, then one filter per letter
    let log = log.borrow();
    assert_eq!(log[0], "order_by title");
    assert_eq!(log.len(), 1 + 26);
}

#[test]
fn headers_on_unsupported_collection_fail() {
    let headered: HeaderedSortable<Value, RecordingQuery> = HeaderedSortable::new(
        Sortable::new(Collection::<Value, RecordingQuery>::unsupported::<String>(), None),
        HeaderSettings::alpha(),
    );

    let err = headered.sorted("title", "asc").unwrap_err();
    assert!(matches!(err, SortError::UnsortableCollection(_)));
}

#[test]
fn headered_sql_predicate_delegates() {
    let headered: HeaderedSortable<Value, RecordingQuery> = HeaderedSortable::new(
        Sortable::new(native(RecordingQuery::new(Vec::new())), Some(mapping())),
        HeaderSettings::single(),
    );
    assert_eq!(headered.sql_predicate("rating", "desc", None), "rating DESC, title ASC");

    match headered.sorted("title", "asc").unwrap() {
        Grouped::Headed(buckets) => assert_eq!(buckets.labels().collect::<Vec<_>>(), vec!["All"]),
        Grouped::Flat(_) => panic!("single header should always bucket"),
    }
}
