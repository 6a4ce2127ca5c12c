//! Page shapes: how one listing page's rows map onto named fields

/// Post-processing applied to a cell's text once it has been located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Trimmed display text.
    Text,
    /// Run through [`clean_number`](super::numeric::clean_number).
    Number,
    /// Cleaned magnitude plus a direction read from the `+` glyph.
    Signed,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Value of the cell's `aria-label` attribute.
    pub label: &'static str,
    /// Key the value is stored under in the extracted row.
    pub key: &'static str,
    pub kind: FieldKind,
    /// A row missing a required cell is dropped; a missing optional cell
    /// leaves the field absent.
    pub required: bool,
}

impl FieldSpec {
    const fn new(label: &'static str, key: &'static str, kind: FieldKind, required: bool) -> Self {
        Self {
            label,
            key,
            kind,
            required,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PageShape {
    pub name: &'static str,
    /// Selector for the element holding the table.
    pub container: &'static str,
    /// Selector for the rows, relative to the container.
    pub rows: &'static str,
    pub fields: &'static [FieldSpec],
}

pub const CURRENCIES: PageShape = PageShape {
    name: "currencies",
    container: "section#yfin-list",
    rows: "tbody tr",
    fields: &[
        FieldSpec::new("Name", "name", FieldKind::Text, true),
        FieldSpec::new("Last Price", "last_price", FieldKind::Number, true),
    ],
};

pub const WORLD_INDICES: PageShape = PageShape {
    name: "world-indices",
    container: "section#yfin-list",
    rows: "tbody tr",
    fields: &[
        FieldSpec::new("Symbol", "symbol", FieldKind::Text, true),
        FieldSpec::new("Name", "name", FieldKind::Text, false),
        FieldSpec::new("Last Price", "last_price", FieldKind::Number, false),
        FieldSpec::new("Change", "change", FieldKind::Signed, false),
        FieldSpec::new("% Change", "percent_change", FieldKind::Number, false),
    ],
};

pub const CRYPTO: PageShape = PageShape {
    name: "crypto",
    container: "#scr-res-table",
    rows: "tbody tr",
    fields: &[
        FieldSpec::new("Symbol", "symbol", FieldKind::Text, true),
        FieldSpec::new("Name", "name", FieldKind::Text, false),
        FieldSpec::new("Last Price", "last_price", FieldKind::Number, false),
        FieldSpec::new("Change", "change", FieldKind::Signed, false),
        FieldSpec::new("% Change", "percent_change", FieldKind::Number, false),
        FieldSpec::new("Market Cap", "market_cap", FieldKind::Text, false),
    ],
};
