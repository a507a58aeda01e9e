//! Record contract and column descriptors.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::content::CellContent;
use crate::value::Value;

/// Trait for record types displayable in the grid views.
///
/// Implementors expose a key type naming their fields and a lookup from key
/// to raw [`Value`]. Nothing else about the record's shape is required.
///
/// # Example
///
/// ```
/// use griddle::{GridRow, Value};
///
/// #[derive(Clone)]
/// struct Product {
///     name: String,
///     qty: i64,
/// }
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Field {
///     Name,
///     Qty,
/// }
///
/// impl GridRow for Product {
///     type Key = Field;
///
///     fn value(&self, key: Field) -> Value {
///         match key {
///             Field::Name => self.name.as_str().into(),
///             Field::Qty => self.qty.into(),
///         }
///     }
/// }
/// ```
pub trait GridRow: Clone + 'static {
    /// Field identifier type. Unique per column within one descriptor set.
    type Key: Copy + Eq + Hash + fmt::Debug + 'static;

    /// Look up the raw value of one field.
    fn value(&self, key: Self::Key) -> Value;
}

type RenderFn<T> = Arc<dyn Fn(&T) -> CellContent + Send + Sync>;

/// Declarative description of one displayable/sortable/filterable field.
///
/// When a custom `render` is present it is authoritative for both display
/// and (if its output is plain text) filtering. Only columns marked
/// `sortable` participate in sort target selection.
///
/// # Example
///
/// ```ignore
/// let columns = vec![
///     Column::new(Field::Name, "Name").sortable(),
///     Column::new(Field::Qty, "Quantity").sortable(),
///     Column::new(Field::Status, "Status")
///         .render(|p: &Product| status_badge(p).into()),
/// ];
/// ```
pub struct Column<T: GridRow> {
    pub key: T::Key,
    pub header: String,
    pub sortable: bool,
    render: Option<RenderFn<T>>,
}

impl<T: GridRow> Column<T> {
    pub fn new(key: T::Key, header: impl Into<String>) -> Self {
        Self {
            key,
            header: header.into(),
            sortable: false,
            render: None,
        }
    }

    /// Include this column in the sort candidate set.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Install a custom renderer for this column.
    pub fn render<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> CellContent + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(f));
        self
    }

    /// Run the custom renderer, if one is installed.
    pub fn custom_render(&self, item: &T) -> Option<CellContent> {
        self.render.as_ref().map(|f| f(item))
    }

    pub fn has_custom_render(&self) -> bool {
        self.render.is_some()
    }
}

impl<T: GridRow> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            header: self.header.clone(),
            sortable: self.sortable,
            render: self.render.clone(),
        }
    }
}

// The renderer closure has no useful Debug form.
impl<T: GridRow> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("render", &self.render.is_some())
            .finish()
    }
}

/// Find a column by key within a descriptor set.
pub fn column_by_key<T: GridRow>(columns: &[Column<T>], key: T::Key) -> Option<&Column<T>> {
    columns.iter().find(|c| c.key == key)
}
