use std::time::{Duration, Instant};

use griddle::{
    filter_items, CellContent, Column, DebouncedFilter, FilterState, GridRow, Span, Value,
};
use termcell::Style;

#[derive(Clone, Debug, PartialEq)]
struct Item {
    name: &'static str,
    qty: i64,
    tag: Option<&'static str>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Field {
    Name,
    Qty,
    Tag,
}

impl GridRow for Item {
    type Key = Field;

    fn value(&self, key: Field) -> Value {
        match key {
            Field::Name => self.name.into(),
            Field::Qty => self.qty.into(),
            Field::Tag => self.tag.into(),
        }
    }
}

fn columns() -> Vec<Column<Item>> {
    vec![
        Column::new(Field::Name, "Name").sortable(),
        Column::new(Field::Qty, "Qty").sortable(),
        Column::new(Field::Tag, "Tag"),
    ]
}

fn items() -> Vec<Item> {
    vec![
        Item {
            name: "Apple crate",
            qty: 12,
            tag: Some("fruit"),
        },
        Item {
            name: "Banana box",
            qty: 120,
            tag: None,
        },
        Item {
            name: "apricot pallet",
            qty: 7,
            tag: Some("fruit"),
        },
    ]
}

#[test]
fn test_empty_filter_state_is_identity() {
    let filtered = filter_items(&items(), &columns(), &FilterState::new());
    assert_eq!(filtered, items());

    // All-empty terms are equivalent to no terms.
    let mut filters = FilterState::new();
    filters.insert(Field::Name, String::new());
    filters.insert(Field::Qty, String::new());
    let filtered = filter_items(&items(), &columns(), &filters);
    assert_eq!(filtered, items());
}

#[test]
fn test_matching_is_case_insensitive_substring() {
    let mut filters = FilterState::new();
    filters.insert(Field::Name, "AP".to_string());
    let filtered = filter_items(&items(), &columns(), &filters);
    let names: Vec<_> = filtered.iter().map(|i| i.name).collect();
    assert_eq!(names, vec!["Apple crate", "apricot pallet"]);
}

#[test]
fn test_conjunction_equals_intersection() {
    let columns = columns();
    let items = items();

    let mut by_name = FilterState::new();
    by_name.insert(Field::Name, "a".to_string());
    let mut by_qty = FilterState::new();
    by_qty.insert(Field::Qty, "12".to_string());
    let mut both = by_name.clone();
    both.extend(by_qty.clone());

    let name_only = filter_items(&items, &columns, &by_name);
    let qty_only = filter_items(&items, &columns, &by_qty);
    let conjunction = filter_items(&items, &columns, &both);

    let intersection: Vec<Item> = name_only
        .into_iter()
        .filter(|i| qty_only.contains(i))
        .collect();
    assert_eq!(conjunction, intersection);
    assert_eq!(conjunction.len(), 2); // 12 and 120 both contain "12"
}

#[test]
fn test_rich_render_output_never_constrains() {
    let columns = vec![
        Column::new(Field::Name, "Name"),
        Column::new(Field::Qty, "Qty").render(|_: &Item| {
            CellContent::Styled(vec![Span::styled("badge", Style::new().bold())])
        }),
    ];

    let mut filters = FilterState::new();
    filters.insert(Field::Qty, "no such text".to_string());
    // The qty column renders rich content, so its term cannot exclude rows.
    let filtered = filter_items(&items(), &columns, &filters);
    assert_eq!(filtered, items());
}

#[test]
fn test_textual_custom_render_drives_filtering() {
    let columns = vec![
        Column::new(Field::Name, "Name"),
        Column::new(Field::Qty, "Qty").render(|i: &Item| format!("{} pcs", i.qty).into()),
    ];

    let mut filters = FilterState::new();
    filters.insert(Field::Qty, "pcs".to_string());
    assert_eq!(filter_items(&items(), &columns, &filters).len(), 3);

    filters.insert(Field::Qty, "7 pcs".to_string());
    let filtered = filter_items(&items(), &columns, &filters);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "apricot pallet");
}

#[test]
fn test_null_cell_matches_only_empty_term() {
    let mut filters = FilterState::new();
    filters.insert(Field::Tag, "fruit".to_string());
    let filtered = filter_items(&items(), &columns(), &filters);
    // The null-tagged row is excluded.
    assert_eq!(filtered.len(), 2);

    filters.insert(Field::Tag, String::new());
    assert_eq!(filter_items(&items(), &columns(), &filters), items());
}

#[test]
fn test_debounce_commits_after_window() {
    let window = Duration::from_millis(300);
    let mut filter: DebouncedFilter<Field> = DebouncedFilter::new(window);
    let start = Instant::now();

    filter.set(Field::Name, "ap", start);
    assert_eq!(filter.live(Field::Name), "ap");
    assert!(filter.committed().is_empty());

    // Window not yet closed.
    assert!(!filter.poll(start + Duration::from_millis(100)));
    assert!(filter.committed().is_empty());

    assert!(filter.poll(start + Duration::from_millis(350)));
    assert_eq!(filter.committed().get(&Field::Name).unwrap(), "ap");

    // Nothing pending: further polls are no-ops.
    assert!(!filter.poll(start + Duration::from_millis(700)));
}

#[test]
fn test_later_keystroke_supersedes_pending_commit() {
    let window = Duration::from_millis(300);
    let mut filter: DebouncedFilter<Field> = DebouncedFilter::new(window);
    let start = Instant::now();

    filter.set(Field::Name, "a", start);
    // A second keystroke inside the window re-arms the deadline.
    filter.set(Field::Name, "ap", start + Duration::from_millis(200));
    assert!(!filter.poll(start + Duration::from_millis(350)));
    assert!(filter.committed().is_empty());

    // Only the last write lands.
    assert!(filter.poll(start + Duration::from_millis(550)));
    assert_eq!(filter.committed().get(&Field::Name).unwrap(), "ap");
}

#[test]
fn test_clear_resets_both_tiers() {
    let mut filter: DebouncedFilter<Field> = DebouncedFilter::default();
    let start = Instant::now();

    filter.set(Field::Name, "ap", start);
    assert!(filter.flush());
    assert!(filter.is_active());

    assert!(filter.clear());
    assert!(!filter.is_active());
    assert_eq!(filter.live(Field::Name), "");
    assert!(filter.committed().is_empty());
    // A pending deadline from before the clear must not fire.
    assert!(!filter.poll(start + Duration::from_secs(10)));
}
