//! Application shell: pages, shared resources, event loop.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use griddle::{Theme, Toast, Toasts};
use stocktake_lib::{
    export_csv, CountSession, CountStore, CountedItem, ExportHeader, MemoryStore, Product,
    Resource, ResourceState, ScanProducer, WakeupReceiver, WakeupSender,
};
use termcell::{Buffer, Event, Key, Rect, Terminal, TextStyle};
use uuid::Uuid;

use crate::pages::{
    CountsAction, CountsPage, DetailAction, DetailPage, IntakeEvent, IntakePage,
};

/// Toast queue shared with async tasks; pushing wakes the event loop.
#[derive(Clone)]
pub struct Notifier {
    queue: Arc<Mutex<Vec<Toast>>>,
    wakeup: WakeupSender,
}

impl Notifier {
    pub fn new(wakeup: WakeupSender) -> Self {
        Self {
            queue: Arc::new(Mutex::new(Vec::new())),
            wakeup,
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(Toast::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(Toast::error(message));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(Toast::info(message));
    }

    fn push(&self, toast: Toast) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push(toast);
        }
        self.wakeup.send();
    }

    fn drain(&self) -> Vec<Toast> {
        self.queue
            .lock()
            .map(|mut queue| std::mem::take(&mut *queue))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Counts,
    Detail,
    Intake,
}

pub struct App {
    theme: Theme,
    store: Arc<MemoryStore>,
    scanner: Arc<dyn ScanProducer>,
    operator: String,

    page: Page,
    counts: CountsPage,
    detail: Option<DetailPage>,
    intake: Option<IntakePage>,

    sessions: Resource<Vec<CountSession>>,
    items: Resource<Vec<CountedItem>>,
    products: Resource<Vec<Product>>,
    scans: Resource<String>,

    toasts: Toasts,
    notifier: Notifier,
    wakeup_rx: WakeupReceiver,
}

impl App {
    pub fn new(
        store: Arc<MemoryStore>,
        scanner: Arc<dyn ScanProducer>,
        operator: impl Into<String>,
    ) -> Self {
        let (wakeup_tx, wakeup_rx) = stocktake_lib::wakeup_channel();

        let sessions = Resource::new();
        let items = Resource::new();
        let products = Resource::new();
        let scans = Resource::new();
        sessions.install_wakeup(wakeup_tx.clone());
        items.install_wakeup(wakeup_tx.clone());
        products.install_wakeup(wakeup_tx.clone());
        scans.install_wakeup(wakeup_tx.clone());

        Self {
            theme: Theme::dark(),
            store,
            scanner,
            operator: operator.into(),
            page: Page::Counts,
            counts: CountsPage::new(),
            detail: None,
            intake: None,
            sessions,
            items,
            products,
            scans,
            toasts: Toasts::new(),
            notifier: Notifier::new(wakeup_tx),
            wakeup_rx,
        }
    }

    pub async fn run(mut self) -> std::io::Result<()> {
        let mut terminal = Terminal::new()?;
        self.load_sessions();

        loop {
            let now = Instant::now();
            self.pump(now);
            self.counts.tick(now);
            self.toasts.prune(now);
            self.draw(&mut terminal)?;

            let events = terminal.poll(Some(Duration::from_millis(50)))?;
            for event in events {
                if let Event::Key {
                    key: Key::Char('q'),
                    modifiers,
                } = event
                {
                    if modifiers.ctrl {
                        return Ok(());
                    }
                }
                self.dispatch(&event, Instant::now());
            }
            self.wakeup_rx.drain();
        }
    }

    // -------------------------------------------------------------------
    // Resource pumping: async results land here, on the loop thread
    // -------------------------------------------------------------------

    fn pump(&mut self, now: Instant) {
        if self.sessions.take_dirty() {
            match self.sessions.get() {
                ResourceState::Ready(sessions) => self.counts.set_sessions(sessions),
                ResourceState::Loading => self.counts.set_loading(),
                ResourceState::Error(err) => {
                    // Keep whatever the table already shows.
                    self.counts.table.set_loading(false);
                    self.toasts
                        .push(Toast::error(format!("Loading counts failed: {err}")), now);
                }
                ResourceState::Idle => {}
            }
        }

        if self.items.take_dirty() {
            if let Some(detail) = &self.detail {
                match self.items.get() {
                    ResourceState::Ready(items) => detail.set_items(items),
                    ResourceState::Loading => detail.set_loading(),
                    ResourceState::Error(err) => {
                        detail.cards.set_loading(false);
                        self.toasts
                            .push(Toast::error(format!("Loading items failed: {err}")), now);
                    }
                    ResourceState::Idle => {}
                }
            }
        }

        if self.products.take_dirty() {
            if let Some(intake) = &mut self.intake {
                match self.products.get() {
                    ResourceState::Ready(products) => intake.set_results(products),
                    ResourceState::Loading => intake.set_searching(),
                    ResourceState::Error(err) => {
                        intake.set_results(Vec::new());
                        self.toasts
                            .push(Toast::error(format!("Search failed: {err}")), now);
                    }
                    ResourceState::Idle => {}
                }
            }
        }

        if self.scans.take_dirty() {
            if let ResourceState::Ready(code) = self.scans.get() {
                log::info!("scan detected: {code}");
                let fed = self.intake.as_mut().map(|intake| intake.apply_scan(&code));
                if let Some(IntakeEvent::Search(query)) = fed {
                    self.search_products(query);
                }
            }
        }

        for toast in self.notifier.drain() {
            self.toasts.push(toast, now);
        }
    }

    // -------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------

    fn draw(&self, terminal: &mut Terminal) -> std::io::Result<()> {
        let frame = terminal.frame()?;
        let full = Rect::from_size(frame.width(), frame.height());
        self.draw_header(frame, full);

        let content = full.shrink(2, 1, 0, 1);
        match self.page {
            Page::Counts => self.counts.render(frame, content, &self.theme),
            Page::Detail => {
                if let Some(detail) = &self.detail {
                    detail.render(frame, content, &self.theme);
                }
            }
            Page::Intake => {
                if let Some(intake) = &self.intake {
                    intake.render(frame, content, &self.theme);
                }
            }
        }

        self.toasts.paint(frame, full.shrink(1, 1, 0, 1), &self.theme);
        terminal.flush_frame()
    }

    fn draw_header(&self, buf: &mut Buffer, full: Rect) {
        let title = match (self.page, &self.detail) {
            (Page::Counts, _) => "Stocktake — counts".to_string(),
            (Page::Detail, Some(detail)) => {
                format!("Stocktake — {}", detail.session.name)
            }
            (Page::Intake, Some(detail)) => {
                format!("Stocktake — {} — add product", detail.session.name)
            }
            _ => "Stocktake".to_string(),
        };
        buf.put_str(
            1,
            0,
            &title,
            self.theme.primary.to_rgb(),
            self.theme.background.to_rgb(),
            TextStyle {
                bold: true,
                ..TextStyle::new()
            },
        );

        let hint = match self.page {
            Page::Counts => "ctrl+q quit",
            Page::Detail => "b back · ctrl+q quit",
            Page::Intake => "esc back · ctrl+q quit",
        };
        let x = full
            .right()
            .saturating_sub(termcell::display_width(hint) as u16 + 1);
        buf.put_str(
            x,
            0,
            hint,
            self.theme.text_muted.to_rgb(),
            self.theme.background.to_rgb(),
            TextStyle {
                dim: true,
                ..TextStyle::new()
            },
        );
    }

    // -------------------------------------------------------------------
    // Event dispatch
    // -------------------------------------------------------------------

    fn dispatch(&mut self, event: &Event, now: Instant) {
        match self.page {
            Page::Counts => {
                if let Some(action) = self.counts.handle(event, now) {
                    self.handle_counts_action(action);
                }
            }
            Page::Detail => {
                let action = self.detail.as_ref().and_then(|d| d.handle(event));
                if let Some(action) = action {
                    self.handle_detail_action(action);
                } else if self.back_requested(event) {
                    self.leave_detail();
                }
            }
            Page::Intake => {
                let intake_event = self.intake.as_mut().and_then(|i| i.handle(event));
                if let Some(intake_event) = intake_event {
                    self.handle_intake_event(intake_event);
                }
            }
        }
    }

    fn back_requested(&self, event: &Event) -> bool {
        let dialog_open = self
            .detail
            .as_ref()
            .map(|d| d.cards.dialog_open())
            .unwrap_or(false);
        matches!(
            event,
            Event::Key {
                key: Key::Char('b'),
                modifiers,
            } if modifiers.none()
        ) && !dialog_open
    }

    fn handle_counts_action(&mut self, action: CountsAction) {
        match action {
            CountsAction::Open(id) => self.open_detail(id),
            CountsAction::Export(id) => self.export_session(id),
            CountsAction::Delete(id) => self.delete_session(id),
            CountsAction::New => self.create_session(),
            CountsAction::Reload => self.load_sessions(),
        }
    }

    fn handle_detail_action(&mut self, action: DetailAction) {
        match action {
            DetailAction::AddProduct => {
                self.intake = Some(IntakePage::new());
                self.page = Page::Intake;
            }
            DetailAction::Export => {
                if let Some(detail) = &self.detail {
                    self.export_session(detail.session.id);
                }
            }
            DetailAction::Back => self.leave_detail(),
            DetailAction::Reload => {
                if let Some(id) = self.detail.as_ref().map(|d| d.session.id) {
                    self.load_items(id);
                }
            }
            DetailAction::Increment(id) => self.adjust_quantity(id, 1.0),
            DetailAction::Decrement(id) => self.adjust_quantity(id, -1.0),
            DetailAction::Remove(id) => self.remove_item(id),
        }
    }

    fn handle_intake_event(&mut self, event: IntakeEvent) {
        match event {
            IntakeEvent::Search(query) => self.search_products(query),
            IntakeEvent::Scan => self.start_scan(),
            IntakeEvent::Record {
                product_code,
                unit,
                quantity,
            } => self.record_count(product_code, unit, quantity),
            IntakeEvent::Back => {
                self.intake = None;
                self.page = Page::Detail;
                if let Some(id) = self.detail.as_ref().map(|d| d.session.id) {
                    self.load_items(id);
                }
            }
        }
    }

    fn leave_detail(&mut self) {
        self.detail = None;
        self.page = Page::Counts;
        self.load_sessions();
    }

    fn open_detail(&mut self, id: Uuid) {
        let session = match self.sessions.get() {
            ResourceState::Ready(sessions) => sessions.into_iter().find(|s| s.id == id),
            _ => None,
        };
        let Some(session) = session else {
            self.notifier.error("That count is no longer available");
            return;
        };

        let detail = DetailPage::new(session);
        detail.set_loading();
        self.detail = Some(detail);
        self.page = Page::Detail;
        self.load_items(id);
    }

    // -------------------------------------------------------------------
    // Async operations
    // -------------------------------------------------------------------

    fn load_sessions(&self) {
        let store = Arc::clone(&self.store);
        let sessions = self.sessions.clone();
        sessions.set_loading();
        tokio::spawn(async move {
            match store.sessions().await {
                Ok(list) => sessions.set_ready(list),
                Err(err) => sessions.set_error(err),
            }
        });
    }

    fn load_items(&self, session: Uuid) {
        let store = Arc::clone(&self.store);
        let items = self.items.clone();
        items.set_loading();
        tokio::spawn(async move {
            match store.counted_items(session).await {
                Ok(list) => items.set_ready(list),
                Err(err) => items.set_error(err),
            }
        });
    }

    fn create_session(&self) {
        let store = Arc::clone(&self.store);
        let sessions = self.sessions.clone();
        let notifier = self.notifier.clone();
        let count = match self.sessions.get() {
            ResourceState::Ready(list) => list.len(),
            _ => 0,
        };
        tokio::spawn(async move {
            let warehouse = match store.warehouses().await {
                Ok(list) => list.into_iter().next(),
                Err(err) => {
                    notifier.error(format!("Creating count failed: {err}"));
                    return;
                }
            };
            let Some(warehouse) = warehouse else {
                notifier.error("No warehouse configured");
                return;
            };

            let name = format!("Count {}", count + 1);
            match store.create_session(&name, warehouse).await {
                Ok(session) => notifier.success(format!("Created {}", session.name)),
                Err(err) => {
                    notifier.error(format!("Creating count failed: {err}"));
                    return;
                }
            }
            match store.sessions().await {
                Ok(list) => sessions.set_ready(list),
                Err(err) => sessions.set_error(err),
            }
        });
    }

    fn delete_session(&self, id: Uuid) {
        let store = Arc::clone(&self.store);
        let sessions = self.sessions.clone();
        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            match store.delete_session(id).await {
                Ok(()) => notifier.success("Count deleted"),
                Err(err) => {
                    notifier.error(format!("Delete failed: {err}"));
                    return;
                }
            }
            match store.sessions().await {
                Ok(list) => sessions.set_ready(list),
                Err(err) => sessions.set_error(err),
            }
        });
    }

    fn export_session(&self, id: Uuid) {
        let store = Arc::clone(&self.store);
        let notifier = self.notifier.clone();
        let name = match self.sessions.get() {
            ResourceState::Ready(list) => list
                .into_iter()
                .find(|s| s.id == id)
                .map(|s| s.name)
                .unwrap_or_else(|| "count".to_string()),
            _ => "count".to_string(),
        };
        tokio::spawn(async move {
            let items = match store.counted_items(id).await {
                Ok(items) => items,
                Err(err) => {
                    notifier.error(format!("Export failed: {err}"));
                    return;
                }
            };

            let file_name = format!("{}.csv", name.replace(' ', "-").to_lowercase());
            let result = std::fs::File::create(&file_name)
                .map_err(stocktake_lib::ExportError::from)
                .and_then(|file| export_csv(&items, &export_headers(), file));
            match result {
                Ok(()) => {
                    log::info!("exported {} items to {file_name}", items.len());
                    notifier.success(format!("Exported to {file_name}"));
                }
                Err(err) => notifier.error(format!("Export failed: {err}")),
            }
        });
    }

    fn adjust_quantity(&self, id: Uuid, delta: f64) {
        let Some(current) = (match self.items.get() {
            ResourceState::Ready(items) => items.into_iter().find(|i| i.id == id),
            _ => None,
        }) else {
            return;
        };

        let store = Arc::clone(&self.store);
        let items = self.items.clone();
        let notifier = self.notifier.clone();
        let session = current.session_id;
        let quantity = (current.quantity + delta).max(0.0);
        tokio::spawn(async move {
            if let Err(err) = store.update_quantity(id, quantity).await {
                notifier.error(format!("Update failed: {err}"));
                return;
            }
            match store.counted_items(session).await {
                Ok(list) => items.set_ready(list),
                Err(err) => items.set_error(err),
            }
        });
    }

    fn remove_item(&self, id: Uuid) {
        let Some(session) = self.detail.as_ref().map(|d| d.session.id) else {
            return;
        };
        let store = Arc::clone(&self.store);
        let items = self.items.clone();
        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            match store.delete_item(id).await {
                Ok(()) => notifier.success("Item removed"),
                Err(err) => {
                    notifier.error(format!("Remove failed: {err}"));
                    return;
                }
            }
            match store.counted_items(session).await {
                Ok(list) => items.set_ready(list),
                Err(err) => items.set_error(err),
            }
        });
    }

    fn search_products(&mut self, query: String) {
        if let Some(intake) = &mut self.intake {
            intake.set_searching();
        }
        let store = Arc::clone(&self.store);
        let products = self.products.clone();
        tokio::spawn(async move {
            match store.find_products(&query).await {
                Ok(list) => products.set_ready(list),
                Err(err) => products.set_error(err),
            }
        });
    }

    /// Open one scan session: at most one detection is delivered before
    /// the scan surface closes itself.
    fn start_scan(&self) {
        let scanner = Arc::clone(&self.scanner);
        let scans = self.scans.clone();
        let notifier = self.notifier.clone();
        notifier.info("Scanning…");
        tokio::spawn(async move {
            match scanner.next_scan().await {
                Some(code) => scans.set_ready(code),
                None => notifier.error("Scanner yielded nothing"),
            }
        });
    }

    fn record_count(&self, product_code: String, unit: String, quantity: f64) {
        let Some(session) = self.detail.as_ref().map(|d| d.session.id) else {
            return;
        };
        let store = Arc::clone(&self.store);
        let items = self.items.clone();
        let notifier = self.notifier.clone();
        let operator = self.operator.clone();
        tokio::spawn(async move {
            match store
                .record_count(session, &product_code, &unit, quantity, &operator)
                .await
            {
                Ok(item) => notifier.success(format!(
                    "Counted {} {} of {}",
                    item.quantity, item.unit, item.product_name
                )),
                Err(err) => {
                    notifier.error(format!("Recording failed: {err}"));
                    return;
                }
            }
            match store.counted_items(session).await {
                Ok(list) => items.set_ready(list),
                Err(err) => items.set_error(err),
            }
        });
    }
}

fn export_headers() -> Vec<ExportHeader<CountedItem>> {
    vec![
        ExportHeader::new("Product", |i: &CountedItem| i.product_name.clone()),
        ExportHeader::new("Code", |i: &CountedItem| i.product_code.clone()),
        ExportHeader::new("Quantity", |i: &CountedItem| i.quantity.to_string()),
        ExportHeader::new("Unit", |i: &CountedItem| i.unit.clone()),
        ExportHeader::new("Counted by", |i: &CountedItem| i.counted_by.clone()),
        ExportHeader::new("Counted at", |i: &CountedItem| i.counted_at.to_rfc3339())
            .formatter(|cell| cell.replace('T', " ")),
    ]
}
