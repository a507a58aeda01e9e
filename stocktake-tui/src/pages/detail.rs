//! Counted items of one session, as a card list.

use griddle::{
    CardListView, CardsOutput, Column, GridRow, MenuAction, SortDirection, Theme, Value,
};
use stocktake_lib::{CountSession, CountedItem};
use termcell::{Buffer, Event, Rect};
use uuid::Uuid;

/// View-model row wrapping a counted item.
#[derive(Clone)]
pub struct CountedRow(pub CountedItem);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CountedField {
    Product,
    Code,
    Quantity,
    Unit,
    CountedBy,
    CountedAt,
}

impl GridRow for CountedRow {
    type Key = CountedField;

    fn value(&self, key: CountedField) -> Value {
        match key {
            CountedField::Product => self.0.product_name.as_str().into(),
            CountedField::Code => self.0.product_code.as_str().into(),
            CountedField::Quantity => self.0.quantity.into(),
            CountedField::Unit => self.0.unit.as_str().into(),
            CountedField::CountedBy => self.0.counted_by.as_str().into(),
            CountedField::CountedAt => self.0.counted_at.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailAction {
    AddProduct,
    Export,
    Back,
    Reload,
    Increment(Uuid),
    Decrement(Uuid),
    Remove(Uuid),
}

/// One session's counted items.
pub struct DetailPage {
    pub session: CountSession,
    pub cards: CardListView<CountedRow, DetailAction>,
}

impl DetailPage {
    pub fn new(session: CountSession) -> Self {
        let columns = vec![
            Column::new(CountedField::Product, "Product").sortable(),
            Column::new(CountedField::Code, "Code"),
            Column::new(CountedField::Quantity, "Quantity").sortable(),
            Column::new(CountedField::Unit, "Unit"),
            Column::new(CountedField::CountedBy, "Counted by").sortable(),
            Column::new(CountedField::CountedAt, "Counted at").sortable(),
        ];

        let open = session.is_open();
        let cards = CardListView::new(columns, CountedField::Product)
            .initial_sort(CountedField::CountedAt, SortDirection::Descending)
            .card_actions(move |row: &CountedRow| {
                let id = row.0.id;
                if open {
                    vec![
                        MenuAction::new("+1", DetailAction::Increment(id)),
                        MenuAction::new("-1", DetailAction::Decrement(id)),
                        MenuAction::new("Remove", DetailAction::Remove(id))
                            .icon('✕')
                            .dangerous(),
                    ]
                } else {
                    Vec::new()
                }
            })
            .bar_actions(move || {
                let mut actions = Vec::new();
                if open {
                    actions.push(MenuAction::new("Add product", DetailAction::AddProduct));
                }
                actions.push(MenuAction::new("Export", DetailAction::Export));
                actions.push(MenuAction::new("Back", DetailAction::Back));
                actions
            });

        Self { session, cards }
    }

    pub fn set_items(&self, items: Vec<CountedItem>) {
        self.cards
            .set_rows(items.into_iter().map(CountedRow).collect());
        self.cards.set_loading(false);
    }

    pub fn set_loading(&self) {
        self.cards.set_loading(true);
    }

    pub fn render(&self, buf: &mut Buffer, area: Rect, theme: &Theme) {
        self.cards.render(buf, area, theme);
    }

    pub fn handle(&self, event: &Event) -> Option<DetailAction> {
        match self.cards.handle_event(event)? {
            CardsOutput::CardAction { action, .. } => Some(action),
            CardsOutput::BarAction(action) => Some(action),
            CardsOutput::Reload => Some(DetailAction::Reload),
        }
    }
}
