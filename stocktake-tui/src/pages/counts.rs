//! Count sessions overview: one table row per session.

use std::time::Instant;

use griddle::{
    CellContent, Column, GridRow, MenuAction, SortDirection, Span, TableOutput, TableView, Theme,
    Value,
};
use stocktake_lib::{CountSession, CountStatus};
use termcell::{Buffer, Color, Event, Rect, Style};
use uuid::Uuid;

/// View-model row wrapping a session for the grid.
#[derive(Clone)]
pub struct SessionRow(pub CountSession);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionField {
    Name,
    Warehouse,
    Status,
    Started,
    Ended,
}

impl GridRow for SessionRow {
    type Key = SessionField;

    fn value(&self, key: SessionField) -> Value {
        match key {
            SessionField::Name => self.0.name.as_str().into(),
            SessionField::Warehouse => self.0.warehouse.name.as_str().into(),
            SessionField::Status => self.0.status.label().into(),
            SessionField::Started => self.0.started_at.into(),
            SessionField::Ended => self.0.ended_at.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CountsAction {
    Open(Uuid),
    Export(Uuid),
    Delete(Uuid),
    New,
    Reload,
}

/// The sessions table page.
pub struct CountsPage {
    pub table: TableView<SessionRow, CountsAction>,
}

impl CountsPage {
    pub fn new() -> Self {
        let columns = vec![
            Column::new(SessionField::Name, "Name").sortable(),
            Column::new(SessionField::Warehouse, "Warehouse").sortable(),
            Column::new(SessionField::Status, "Status").render(status_badge),
            Column::new(SessionField::Started, "Started").sortable(),
            Column::new(SessionField::Ended, "Ended").sortable(),
        ];

        let table = TableView::new(columns)
            .initial_sort(SessionField::Started, SortDirection::Descending)
            .row_actions(|row: &SessionRow| {
                let id = row.0.id;
                vec![
                    MenuAction::new("Open", CountsAction::Open(id)).icon('▸'),
                    MenuAction::new("Export CSV", CountsAction::Export(id)).icon('⇩'),
                    MenuAction::new("Delete", CountsAction::Delete(id))
                        .icon('✕')
                        .dangerous(),
                ]
            })
            .view_actions(|| {
                vec![
                    MenuAction::new("New count", CountsAction::New).icon('+'),
                    MenuAction::new("Reload", CountsAction::Reload).icon('↻'),
                ]
            });

        Self { table }
    }

    pub fn set_sessions(&self, sessions: Vec<CountSession>) {
        self.table
            .set_rows(sessions.into_iter().map(SessionRow).collect());
        self.table.set_loading(false);
    }

    pub fn set_loading(&self) {
        self.table.set_loading(true);
    }

    pub fn render(&self, buf: &mut Buffer, area: Rect, theme: &Theme) {
        self.table.render(buf, area, theme);
    }

    pub fn handle(&self, event: &Event, now: Instant) -> Option<CountsAction> {
        match self.table.handle_event(event, now)? {
            TableOutput::RowAction { action, .. } => Some(action),
            TableOutput::ViewAction(action) => Some(action),
            TableOutput::Reload => Some(CountsAction::Reload),
        }
    }

    pub fn tick(&self, now: Instant) -> bool {
        self.table.tick(now)
    }
}

impl Default for CountsPage {
    fn default() -> Self {
        Self::new()
    }
}

/// Status column: colored badge, display-only by design (rich content is
/// not searchable, so the status column never constrains filtering).
fn status_badge(row: &SessionRow) -> CellContent {
    let (label, color) = match row.0.status {
        CountStatus::Draft => ("draft", Color::oklch(0.6, 0.02, 250.0)),
        CountStatus::Open => ("● open", Color::oklch(0.6, 0.15, 145.0)),
        CountStatus::Closed => ("closed", Color::oklch(0.65, 0.2, 25.0)),
    };
    CellContent::Styled(vec![Span::styled(label, Style::new().fg(color).bold())])
}
