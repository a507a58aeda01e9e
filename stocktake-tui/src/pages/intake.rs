//! Product intake: scan or search a product, pick a unit, record a
//! quantity against the open session.

use griddle::Theme;
use stocktake_lib::Product;
use termcell::{Buffer, Event, InputState, Key, Rect, TextStyle};

/// What the page asks the app to do.
#[derive(Debug, Clone, PartialEq)]
pub enum IntakeEvent {
    /// Run a product search for the query.
    Search(String),
    /// Open a scan session and feed the decoded code back in.
    Scan,
    /// Record a counted quantity.
    Record {
        product_code: String,
        unit: String,
        quantity: f64,
    },
    /// Leave the page.
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Query,
    Quantity,
}

/// The intake form.
pub struct IntakePage {
    query: InputState,
    quantity: InputState,
    focus: Focus,
    results: Vec<Product>,
    selected: usize,
    unit_index: usize,
    searching: bool,
    error: Option<String>,
}

impl IntakePage {
    pub fn new() -> Self {
        Self {
            query: InputState::default(),
            quantity: InputState::new("1"),
            focus: Focus::Query,
            results: Vec::new(),
            selected: 0,
            unit_index: 0,
            searching: false,
            error: None,
        }
    }

    /// Feed a decoded scan string in as the query and ask for a search.
    pub fn apply_scan(&mut self, code: &str) -> IntakeEvent {
        self.query.set(code);
        self.focus = Focus::Query;
        IntakeEvent::Search(code.to_string())
    }

    pub fn set_searching(&mut self) {
        self.searching = true;
    }

    pub fn set_results(&mut self, results: Vec<Product>) {
        self.searching = false;
        self.error = if results.is_empty() {
            Some("No product matches that code or name".to_string())
        } else {
            None
        };
        self.results = results;
        self.selected = 0;
        self.unit_index = 0;
    }

    fn selected_product(&self) -> Option<&Product> {
        self.results.get(self.selected)
    }

    pub fn handle(&mut self, event: &Event) -> Option<IntakeEvent> {
        let Event::Key { key, modifiers } = *event else {
            return None;
        };
        if !modifiers.none() && !modifiers.shift {
            return None;
        }

        match key {
            Key::Escape => return Some(IntakeEvent::Back),
            Key::F(2) => return Some(IntakeEvent::Scan),
            Key::Tab | Key::BackTab => {
                self.focus = match self.focus {
                    Focus::Query => Focus::Quantity,
                    Focus::Quantity => Focus::Query,
                };
            }
            Key::Up => {
                self.selected = self.selected.saturating_sub(1);
                self.unit_index = 0;
            }
            Key::Down => {
                if !self.results.is_empty() {
                    self.selected = (self.selected + 1).min(self.results.len() - 1);
                    self.unit_index = 0;
                }
            }
            Key::Left | Key::Right => {
                if let Some(product) = self.selected_product() {
                    let n = product.units.len().max(1);
                    self.unit_index = match key {
                        Key::Right => (self.unit_index + 1) % n,
                        _ => (self.unit_index + n - 1) % n,
                    };
                }
            }
            Key::Enter => match self.focus {
                Focus::Query => {
                    if !self.query.is_empty() {
                        return Some(IntakeEvent::Search(self.query.text().to_string()));
                    }
                }
                Focus::Quantity => return self.record(),
            },
            key => {
                let input = match self.focus {
                    Focus::Query => &mut self.query,
                    Focus::Quantity => &mut self.quantity,
                };
                input.handle_key(key, termcell::Modifiers::new());
                self.error = None;
            }
        }
        None
    }

    fn record(&mut self) -> Option<IntakeEvent> {
        let Some(product) = self.selected_product() else {
            self.error = Some("Search or scan a product first".to_string());
            return None;
        };

        let quantity: f64 = match self.quantity.text().parse() {
            Ok(q) if q > 0.0 => q,
            _ => {
                self.error = Some(format!("Not a valid quantity: {}", self.quantity.text()));
                return None;
            }
        };

        let unit = product
            .units
            .get(self.unit_index)
            .or_else(|| product.units.first())?;

        Some(IntakeEvent::Record {
            product_code: product.code.clone(),
            unit: unit.name.clone(),
            quantity,
        })
    }

    pub fn render(&self, buf: &mut Buffer, area: Rect, theme: &Theme) {
        buf.fill(area, theme.text.to_rgb(), theme.background.to_rgb());
        if area.height < 8 {
            return;
        }

        paint_input(
            buf,
            area.row(0),
            "Scan / search",
            &self.query,
            self.focus == Focus::Query,
            theme,
        );
        buf.put_str(
            area.x,
            area.y + 1,
            "enter search · F2 scan · tab quantity · esc back",
            theme.text_muted.to_rgb(),
            theme.background.to_rgb(),
            TextStyle {
                dim: true,
                ..TextStyle::new()
            },
        );

        let list_top = area.y + 3;
        let list_height = area.height.saturating_sub(6);
        if self.searching {
            buf.put_str(
                area.x,
                list_top,
                "Searching…",
                theme.text_muted.to_rgb(),
                theme.background.to_rgb(),
                TextStyle::new(),
            );
        } else {
            for (i, product) in self.results.iter().take(list_height as usize).enumerate() {
                let y = list_top + i as u16;
                let selected = i == self.selected;
                let bg = if selected { theme.surface } else { theme.background };
                buf.fill(Rect::new(area.x, y, area.width, 1), theme.text.to_rgb(), bg.to_rgb());

                let marker = if selected { "▸ " } else { "  " };
                let line = format!("{marker}{}  [{}]", product.name, product.code);
                let after = buf.put_str(
                    area.x,
                    y,
                    &line,
                    theme.text.to_rgb(),
                    bg.to_rgb(),
                    TextStyle::new(),
                );

                if selected {
                    let units: String = product
                        .units
                        .iter()
                        .enumerate()
                        .map(|(u, unit)| {
                            if u == self.unit_index {
                                format!("‹{}›", unit.name)
                            } else {
                                unit.name.clone()
                            }
                        })
                        .collect::<Vec<_>>()
                        .join(" ");
                    buf.put_str(
                        after + 2,
                        y,
                        &units,
                        theme.secondary.to_rgb(),
                        bg.to_rgb(),
                        TextStyle::new(),
                    );
                }
            }
        }

        let qty_row = area.row(area.height - 3);
        paint_input(
            buf,
            qty_row,
            "Quantity",
            &self.quantity,
            self.focus == Focus::Quantity,
            theme,
        );

        if let Some(error) = &self.error {
            buf.put_str(
                area.x,
                area.bottom() - 1,
                error,
                theme.error.to_rgb(),
                theme.background.to_rgb(),
                TextStyle::new(),
            );
        }
    }
}

impl Default for IntakePage {
    fn default() -> Self {
        Self::new()
    }
}

fn paint_input(
    buf: &mut Buffer,
    row: Rect,
    label: &str,
    input: &InputState,
    focused: bool,
    theme: &Theme,
) {
    if row.is_empty() {
        return;
    }

    let after = buf.put_str(
        row.x,
        row.y,
        &format!("{label}: "),
        theme.text_muted.to_rgb(),
        theme.background.to_rgb(),
        TextStyle::new(),
    );

    let box_rect = Rect::new(after, row.y, row.right().saturating_sub(after).min(32), 1);
    buf.fill(box_rect, theme.text.to_rgb(), theme.surface.to_rgb());
    buf.put_str(
        box_rect.x,
        box_rect.y,
        &termcell::truncate_to_width(input.text(), box_rect.width as usize),
        theme.text.to_rgb(),
        theme.surface.to_rgb(),
        TextStyle::new(),
    );

    if focused {
        let cursor_x = box_rect
            .x
            .saturating_add(input.cursor() as u16)
            .min(box_rect.right().saturating_sub(1));
        if let Some(cell) = buf.get_mut(cursor_x, box_rect.y) {
            cell.bg = theme.primary.to_rgb();
            cell.fg = theme.background.to_rgb();
        }
    }
}
