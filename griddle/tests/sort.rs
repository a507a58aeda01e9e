use griddle::{
    initial_sort_config, request_sort, sort_items, Column, GridRow, SortConfig, SortDirection,
    Value,
};

#[derive(Clone, Debug, PartialEq)]
struct Item {
    name: &'static str,
    qty: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Field {
    Name,
    Qty,
    Note,
}

impl GridRow for Item {
    type Key = Field;

    fn value(&self, key: Field) -> Value {
        match key {
            Field::Name => self.name.into(),
            Field::Qty => self.qty.into(),
            Field::Note => Value::Null,
        }
    }
}

fn columns() -> Vec<Column<Item>> {
    vec![
        Column::new(Field::Name, "Name").sortable(),
        Column::new(Field::Qty, "Qty").sortable(),
        Column::new(Field::Note, "Note"),
    ]
}

fn items() -> Vec<Item> {
    vec![
        Item { name: "B", qty: 2 },
        Item { name: "A", qty: 2 },
        Item { name: "A", qty: 1 },
    ]
}

#[test]
fn test_stable_sort_preserves_tie_order() {
    let config = SortConfig {
        sort_by: Field::Qty,
        direction: SortDirection::Ascending,
    };
    let sorted = sort_items(&items(), &config);
    // qty 2 appears twice: B before A, as in the input.
    assert_eq!(sorted[0].name, "A");
    assert_eq!(sorted[0].qty, 1);
    assert_eq!(sorted[1].name, "B");
    assert_eq!(sorted[2].name, "A");

    // Descending reverses the comparator, not the output: ties keep input
    // order in both directions.
    let config = SortConfig {
        sort_by: Field::Qty,
        direction: SortDirection::Descending,
    };
    let sorted = sort_items(&items(), &config);
    assert_eq!(sorted[0].name, "B");
    assert_eq!(sorted[1].name, "A");
    assert_eq!(sorted[1].qty, 2);
    assert_eq!(sorted[2].qty, 1);
}

#[test]
fn test_direction_toggle_is_idempotent() {
    let start = SortConfig {
        sort_by: Field::Name,
        direction: SortDirection::Ascending,
    };
    let once = request_sort(Some(&start), Field::Name);
    assert_eq!(once.direction, SortDirection::Descending);
    let twice = request_sort(Some(&once), Field::Name);
    assert_eq!(twice, start);
}

#[test]
fn test_request_sort_adopts_new_column_ascending() {
    let start = SortConfig {
        sort_by: Field::Name,
        direction: SortDirection::Descending,
    };
    let next = request_sort(Some(&start), Field::Qty);
    assert_eq!(next.sort_by, Field::Qty);
    assert_eq!(next.direction, SortDirection::Ascending);

    let from_none = request_sort(None, Field::Qty);
    assert_eq!(from_none.direction, SortDirection::Ascending);
}

#[test]
fn test_initial_sort_honors_sortable_preference() {
    let config = initial_sort_config(&columns(), Some((Field::Qty, SortDirection::Descending)))
        .expect("has sortable columns");
    assert_eq!(config.sort_by, Field::Qty);
    assert_eq!(config.direction, SortDirection::Descending);
}

#[test]
fn test_initial_sort_never_selects_unsortable_column() {
    // Note is not sortable, even when explicitly preferred.
    let config = initial_sort_config(&columns(), Some((Field::Note, SortDirection::Ascending)))
        .expect("has sortable columns");
    assert_eq!(config.sort_by, Field::Name);
    assert_eq!(config.direction, SortDirection::Ascending);
}

#[test]
fn test_no_sortable_columns_means_no_sort() {
    let columns = vec![
        Column::<Item>::new(Field::Name, "Name"),
        Column::new(Field::Qty, "Qty"),
    ];
    assert!(initial_sort_config(&columns, Some((Field::Name, SortDirection::Ascending))).is_none());
    assert!(initial_sort_config(&columns, None).is_none());
}

#[test]
fn test_null_values_sort_before_defined_values() {
    let config = SortConfig {
        sort_by: Field::Note,
        direction: SortDirection::Ascending,
    };
    // All notes are null: ordering must fall back to input order.
    let sorted = sort_items(&items(), &config);
    assert_eq!(sorted, items());
}

#[test]
fn test_worked_example_end_to_end() {
    let columns = columns();
    let items = items();

    let config = initial_sort_config(&columns, None).expect("sortable");
    assert_eq!(config.sort_by, Field::Name);
    assert_eq!(config.direction, SortDirection::Ascending);

    let sorted = sort_items(&items, &config);
    assert_eq!(
        sorted,
        vec![
            Item { name: "A", qty: 2 },
            Item { name: "A", qty: 1 },
            Item { name: "B", qty: 2 },
        ]
    );

    let mut filters = griddle::FilterState::new();
    filters.insert(Field::Name, "a".to_string());
    let filtered = griddle::filter_items(&sorted, &columns, &filters);
    assert_eq!(
        filtered,
        vec![Item { name: "A", qty: 2 }, Item { name: "A", qty: 1 }]
    );

    let config = request_sort(Some(&config), Field::Name);
    assert_eq!(config.direction, SortDirection::Descending);
    let sorted = sort_items(&items, &config);
    assert_eq!(
        sorted,
        vec![
            Item { name: "B", qty: 2 },
            Item { name: "A", qty: 2 },
            Item { name: "A", qty: 1 },
        ]
    );
}
