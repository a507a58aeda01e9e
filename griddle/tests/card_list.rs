use griddle::{
    CardListView, CardsOutput, Column, Expansion, GridRow, MenuAction, SortDirection, Theme, Value,
};
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

fn items() -> Vec<Item> {
    vec![
        Item { name: "B", qty: 2 },
        Item { name: "A", qty: 2 },
        Item { name: "A", qty: 1 },
    ]
}

fn key(k: Key) -> Event {
    Event::Key {
        key: k,
        modifiers: Modifiers::new(),
    }
}

fn render(cards: &CardListView<Item, String>, width: u16, height: u16) -> Buffer {
    let mut buf = Buffer::new(width, height);
    cards.render(&mut buf, Rect::from_size(width, height), &Theme::dark());
    buf
}

fn screen(buf: &Buffer) -> String {
    (0..buf.height())
        .map(|y| buf.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_expand_modes_are_mutually_exclusive() {
    let cards: CardListView<Item, String> = CardListView::new(columns(), Field::Name);
    cards.set_rows(items());

    assert_eq!(cards.expansion(), Expansion::Single(None));

    // Expand all, then manually toggle one card: exactly that card stays
    // open and expand-all turns off.
    cards.toggle_all();
    assert!(cards.expansion().all_open());
    cards.toggle_card(1);
    assert_eq!(cards.expansion(), Expansion::Single(Some(1)));

    // Re-toggling expand-all from there opens everything again.
    cards.toggle_all();
    assert!(cards.expansion().all_open());

    // Manual toggle of the open card closes it.
    cards.toggle_card(0);
    assert_eq!(cards.expansion(), Expansion::Single(Some(0)));
    cards.toggle_card(0);
    assert_eq!(cards.expansion(), Expansion::Single(None));
}

#[test]
fn test_expanded_card_shows_non_title_columns() {
    let cards: CardListView<Item, String> = CardListView::new(columns(), Field::Name);
    cards.set_rows(items());
    cards.toggle_card(0);

    let buf = render(&cards, 60, 20);
    let text = screen(&buf);
    // Sorted by name ascending: first card is A (qty 2), open.
    assert!(text.contains("▼ A"));
    assert!(text.contains("Qty: 2"));
    // The title column is not repeated in the body.
    assert!(!text.contains("Name: A"));
    // The other cards stay collapsed.
    assert!(text.contains("▶ B"));
}

#[test]
fn test_zero_actions_suppresses_card_trigger() {
    let cards: CardListView<Item, String> =
        CardListView::new(columns(), Field::Name).card_actions(|item| {
            if item.qty > 1 {
                vec![MenuAction::new("Edit", format!("edit:{}", item.name))]
            } else {
                Vec::new()
            }
        });
    cards.set_rows(items());
    cards.toggle_all();

    let buf = render(&cards, 60, 30);
    let text = screen(&buf);
    // Two cards have qty > 1, one has not: two trigger buttons.
    assert_eq!(text.matches("[Actions]").count(), 2);
}

#[test]
fn test_sort_dialog_applies_on_enter() {
    let cards: CardListView<Item, String> = CardListView::new(columns(), Field::Name);
    cards.set_rows(items());

    let initial = cards.sort_config().unwrap();
    assert_eq!(initial.sort_by, Field::Name);

    cards.open_sort_dialog();
    assert!(cards.dialog_open());

    // Move to Qty, select it, apply.
    cards.handle_event(&key(Key::Down));
    cards.handle_event(&key(Key::Char(' ')));
    cards.handle_event(&key(Key::Enter));

    assert!(!cards.dialog_open());
    let config = cards.sort_config().unwrap();
    assert_eq!(config.sort_by, Field::Qty);
    assert_eq!(config.direction, SortDirection::Ascending);
}

#[test]
fn test_sort_dialog_escape_leaves_sort_untouched() {
    let cards: CardListView<Item, String> = CardListView::new(columns(), Field::Name);
    cards.set_rows(items());

    cards.open_sort_dialog();
    // Selecting the active column toggles direction in the tentative copy.
    cards.handle_event(&key(Key::Char(' ')));
    cards.handle_event(&key(Key::Escape));

    assert!(!cards.dialog_open());
    let config = cards.sort_config().unwrap();
    assert_eq!(config.sort_by, Field::Name);
    assert_eq!(config.direction, SortDirection::Ascending);
}

#[test]
fn test_sort_dialog_reapply_toggles_direction() {
    let cards: CardListView<Item, String> = CardListView::new(columns(), Field::Name);
    cards.set_rows(items());

    // Selecting the already-active column and applying flips direction.
    cards.open_sort_dialog();
    cards.handle_event(&key(Key::Char(' ')));
    cards.handle_event(&key(Key::Enter));

    let config = cards.sort_config().unwrap();
    assert_eq!(config.sort_by, Field::Name);
    assert_eq!(config.direction, SortDirection::Descending);
}

#[test]
fn test_filter_dialog_commits_only_on_apply() {
    let cards: CardListView<Item, String> = CardListView::new(columns(), Field::Name);
    cards.set_rows(items());
    assert_eq!(cards.visible_count(), 3);

    // Type into the Name field; nothing filters until Apply.
    cards.open_filter_dialog();
    cards.handle_event(&key(Key::Char('b')));
    assert_eq!(cards.visible_count(), 3);

    cards.handle_event(&key(Key::Enter));
    assert!(!cards.dialog_open());
    assert_eq!(cards.visible_count(), 1);
    assert_eq!(cards.filters().get(&Field::Name).unwrap(), "b");
}

#[test]
fn test_filter_dialog_escape_discards_edits() {
    let cards: CardListView<Item, String> = CardListView::new(columns(), Field::Name);
    cards.set_rows(items());

    cards.open_filter_dialog();
    cards.handle_event(&key(Key::Char('b')));
    cards.handle_event(&key(Key::Enter));
    assert_eq!(cards.visible_count(), 1);

    // Edits behind Esc never land.
    cards.open_filter_dialog();
    cards.handle_event(&key(Key::Char('z')));
    cards.handle_event(&key(Key::Escape));
    assert_eq!(cards.filters().get(&Field::Name).unwrap(), "b");
    assert_eq!(cards.visible_count(), 1);
}

#[test]
fn test_action_bar_reflects_sortable_columns() {
    let cards: CardListView<Item, String> = CardListView::new(columns(), Field::Name);
    cards.set_rows(items());
    let text = screen(&render(&cards, 60, 20));
    assert!(text.contains("[Sort]"));
    assert!(text.contains("[Filter]"));
    assert!(text.contains("[Expand all]"));

    // No sortable column: the Sort button is suppressed, Filter stays.
    let plain: CardListView<Item, String> = CardListView::new(
        vec![Column::new(Field::Name, "Name"), Column::new(Field::Qty, "Qty")],
        Field::Name,
    );
    plain.set_rows(items());
    assert!(plain.sort_config().is_none());
    let text = screen(&render(&plain, 60, 20));
    assert!(!text.contains("[Sort]"));
    assert!(text.contains("[Filter]"));
}

#[test]
fn test_card_menu_activation_reports_action() {
    let cards: CardListView<Item, String> =
        CardListView::new(columns(), Field::Name)
            .card_actions(|item| vec![MenuAction::new("Edit", format!("edit:{}", item.name))]);
    cards.set_rows(vec![Item { name: "X", qty: 2 }, Item { name: "Y", qty: 1 }]);

    // Open the cursor card's menu with the keyboard, then activate.
    cards.handle_event(&key(Key::Char('m')));
    render(&cards, 60, 20);
    let output = cards.handle_event(&key(Key::Enter));
    assert_eq!(
        output,
        Some(CardsOutput::CardAction {
            index: 0,
            action: "edit:X".to_string()
        })
    );
}

#[test]
fn test_bar_extras_surface_as_bar_actions() {
    let cards: CardListView<Item, String> = CardListView::new(columns(), Field::Name)
        .bar_actions(|| vec![MenuAction::new("Export", "export".to_string())]);
    cards.set_rows(items());

    let buf = render(&cards, 60, 20);
    let bar = buf.row_text(0);
    assert!(bar.contains("[Export]"));

    // Click the Export button.
    let x = bar.find("[Export]").unwrap() as u16 + 1;
    let output = cards.handle_event(&Event::Click {
        x,
        y: 0,
        button: MouseButton::Left,
    });
    assert_eq!(output, Some(CardsOutput::BarAction("export".to_string())));
}
