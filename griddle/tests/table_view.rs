use std::time::{Duration, Instant};

use griddle::{Column, GridRow, MenuAction, SortDirection, TableOutput, TableView, Theme, Value};
use termcell::{Buffer, Event, Key, Modifiers, MouseButton, Rect};

#[derive(Clone, Debug, PartialEq)]
struct Item {
    name: &'static str,
    qty: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Field {
    Name,
    Qty,
}

impl GridRow for Item {
    type Key = Field;

    fn value(&self, key: Field) -> Value {
        match key {
            Field::Name => self.name.into(),
            Field::Qty => self.qty.into(),
        }
    }
}

fn columns() -> Vec<Column<Item>> {
    vec![
        Column::new(Field::Name, "Name").sortable(),
        Column::new(Field::Qty, "Qty").sortable(),
    ]
}

fn click(x: u16, y: u16) -> Event {
    Event::Click {
        x,
        y,
        button: MouseButton::Left,
    }
}

fn key(k: Key) -> Event {
    Event::Key {
        key: k,
        modifiers: Modifiers::new(),
    }
}

fn render(table: &TableView<Item, String>, width: u16, height: u16) -> Buffer {
    let mut buf = Buffer::new(width, height);
    table.render(&mut buf, Rect::from_size(width, height), &Theme::dark());
    buf
}

#[test]
fn test_zero_actions_suppresses_row_trigger() {
    let table: TableView<Item, String> = TableView::new(columns()).row_actions(|item| {
        if item.qty > 1 {
            vec![MenuAction::new("Open", format!("open:{}", item.name))]
        } else {
            Vec::new()
        }
    });
    table.set_rows(vec![Item { name: "X", qty: 2 }, Item { name: "Y", qty: 1 }]);

    let buf = render(&table, 80, 20);
    // Sorted by name ascending: X (has actions) at y=3, Y (none) at y=4.
    assert!(buf.row_text(3).contains('⋮'));
    assert!(!buf.row_text(4).contains('⋮'));
}

#[test]
fn test_no_actions_anywhere_means_no_gutter() {
    let table: TableView<Item, String> =
        TableView::new(columns()).row_actions(|_| Vec::new());
    table.set_rows(vec![Item { name: "X", qty: 2 }]);

    let buf = render(&table, 80, 20);
    assert!(!buf.row_text(3).contains('⋮'));
}

#[test]
fn test_header_click_requests_sort() {
    let table: TableView<Item, String> = TableView::new(columns());
    table.set_rows(vec![
        Item { name: "B", qty: 2 },
        Item { name: "A", qty: 2 },
        Item { name: "A", qty: 1 },
    ]);

    // Initial: first sortable column, ascending.
    let config = table.sort_config().unwrap();
    assert_eq!(config.sort_by, Field::Name);
    assert_eq!(config.direction, SortDirection::Ascending);

    let now = Instant::now();
    render(&table, 80, 20);

    // No row actions: the full width is split between the two columns, so
    // the Qty header owns the right half of row 1.
    assert_eq!(table.handle_event(&click(60, 1), now), None);
    let config = table.sort_config().unwrap();
    assert_eq!(config.sort_by, Field::Qty);
    assert_eq!(config.direction, SortDirection::Ascending);
    assert_eq!(
        table.visible_rows(),
        vec![
            Item { name: "A", qty: 1 },
            Item { name: "B", qty: 2 },
            Item { name: "A", qty: 2 },
        ]
    );

    // Clicking the active column flips direction.
    render(&table, 80, 20);
    table.handle_event(&click(60, 1), now);
    assert_eq!(
        table.sort_config().unwrap().direction,
        SortDirection::Descending
    );
}

#[test]
fn test_inline_search_debounces_and_clears() {
    let table: TableView<Item, String> = TableView::new(columns());
    table.set_rows(vec![
        Item { name: "Apple", qty: 1 },
        Item { name: "Banana", qty: 2 },
        Item { name: "Avocado", qty: 3 },
    ]);

    let start = Instant::now();
    render(&table, 80, 20);

    // Focus the Name search input and type.
    table.handle_event(&click(5, 2), start);
    table.handle_event(&key(Key::Char('a')), start);
    table.handle_event(&key(Key::Char('p')), start);

    // The live term tracks keystrokes; the committed set does not yet.
    assert_eq!(table.search_term(Field::Name), "ap");
    assert!(!table.tick(start + Duration::from_millis(100)));
    assert_eq!(table.visible_count(), 3);

    // After the window closes, the committed set recomputes.
    assert!(table.tick(start + Duration::from_millis(400)));
    assert_eq!(table.visible_count(), 1);
    assert_eq!(table.visible_rows()[0].name, "Apple");

    // One control resets live and committed state together.
    table.clear_filters();
    assert_eq!(table.search_term(Field::Name), "");
    assert_eq!(table.visible_count(), 3);
}

#[test]
fn test_enter_commits_without_waiting() {
    let table: TableView<Item, String> = TableView::new(columns());
    table.set_rows(vec![
        Item { name: "Apple", qty: 1 },
        Item { name: "Banana", qty: 2 },
    ]);

    let start = Instant::now();
    render(&table, 80, 20);
    table.handle_event(&click(5, 2), start);
    table.handle_event(&key(Key::Char('b')), start);
    table.handle_event(&key(Key::Enter), start);
    assert_eq!(table.visible_count(), 1);
    assert_eq!(table.visible_rows()[0].name, "Banana");
}

#[test]
fn test_empty_state_offers_reload() {
    let table: TableView<Item, String> = TableView::new(columns());
    table.set_rows(Vec::new());

    let buf = render(&table, 40, 10);
    let screen: Vec<String> = (0..10).map(|y| buf.row_text(y)).collect();
    assert!(screen.iter().any(|line| line.contains("Nothing to show")));
    let reload_y = screen
        .iter()
        .position(|line| line.contains("[ Reload ]"))
        .expect("reload affordance") as u16;

    let output = table.handle_event(&click(20, reload_y), Instant::now());
    assert_eq!(output, Some(TableOutput::Reload));
}

#[test]
fn test_loading_suspends_interaction() {
    let table: TableView<Item, String> = TableView::new(columns());
    table.set_rows(vec![Item { name: "A", qty: 1 }]);
    table.set_loading(true);

    let buf = render(&table, 80, 20);
    // Skeleton only: no header text, no rows.
    assert!(!buf.row_text(1).contains("Name"));

    let now = Instant::now();
    assert_eq!(table.handle_event(&click(60, 1), now), None);
    // The initial sort is untouched.
    assert_eq!(table.sort_config().unwrap().sort_by, Field::Name);
}

#[test]
fn test_row_menu_activation_reports_action() {
    let table: TableView<Item, String> = TableView::new(columns()).row_actions(|item| {
        vec![MenuAction::new("Open", format!("open:{}", item.name))]
    });
    table.set_rows(vec![Item { name: "X", qty: 2 }, Item { name: "Y", qty: 1 }]);

    let now = Instant::now();
    render(&table, 80, 20);

    // Open the first visible row's menu via its trigger, then activate the
    // first entry with the keyboard.
    table.handle_event(&click(78, 3), now);
    render(&table, 80, 20);
    let output = table.handle_event(&key(Key::Enter), now);
    assert_eq!(
        output,
        Some(TableOutput::RowAction {
            index: 0,
            action: "open:X".to_string()
        })
    );

    // Activation closed the menu.
    render(&table, 80, 20);
    assert_eq!(table.handle_event(&key(Key::Enter), now), None);
}

#[test]
fn test_view_menu_is_exclusive_with_row_menus() {
    let table: TableView<Item, String> = TableView::new(columns())
        .row_actions(|item| vec![MenuAction::new("Open", format!("open:{}", item.name))])
        .view_actions(|| vec![MenuAction::new("Export", "export".to_string())]);
    table.set_rows(vec![Item { name: "X", qty: 2 }]);

    let now = Instant::now();
    render(&table, 80, 20);

    // Open a row menu, then the view menu: only the view menu survives.
    table.handle_event(&click(78, 3), now);
    render(&table, 80, 20);
    table.handle_event(&click(77, 0), now);
    render(&table, 80, 20);
    let output = table.handle_event(&key(Key::Enter), now);
    assert_eq!(output, Some(TableOutput::ViewAction("export".to_string())));
}
