//! Per-source schemas and field coercion.
//!
//! Each typed record declares its columns as a static list of
//! `(name, coercion)` pairs. [`coerce`] applies that list uniformly to a
//! [`RawRow`], so every source goes through the same conversion path.
//!
//! Numeric coercion reads the longest numeric prefix of the cell (`"42abc"`
//! becomes 42, `"3.9"` becomes 3 for integer columns). Text with no numeric
//! prefix does not fail the load: real columns become `NaN` and integer
//! columns become `None`.

use crate::types::{
    CustomerRecord, Dataset, GenreRecord, InventoryRecord, RawRow, SalesRecord, SourceKind,
    TrackRecord,
};

// ---------------------------------------------------------------------------
// Schema description
// ---------------------------------------------------------------------------

/// How a column's text is turned into a typed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Passed through as-is.
    Label,
    /// Floating point; `NaN` when the text is not a number.
    Real,
    /// Whole number; `None` when the text is not a number.
    Integer,
}

/// One column of a source schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub coercion: Coercion,
}

const fn label(name: &'static str) -> Column {
    Column {
        name,
        coercion: Coercion::Label,
    }
}

const fn real(name: &'static str) -> Column {
    Column {
        name,
        coercion: Coercion::Real,
    }
}

const fn integer(name: &'static str) -> Column {
    Column {
        name,
        coercion: Coercion::Integer,
    }
}

/// A coerced cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Label(Option<String>),
    Real(f64),
    Integer(Option<i64>),
}

/// Coerced values of one row, consumed in schema order by [`Record::from_fields`].
pub struct Fields {
    values: std::vec::IntoIter<Value>,
}

impl Fields {
    pub fn label(&mut self) -> Option<String> {
        match self.values.next() {
            Some(Value::Label(v)) => v,
            _ => None,
        }
    }

    pub fn real(&mut self) -> f64 {
        match self.values.next() {
            Some(Value::Real(v)) => v,
            _ => f64::NAN,
        }
    }

    pub fn integer(&mut self) -> Option<i64> {
        match self.values.next() {
            Some(Value::Integer(v)) => v,
            _ => None,
        }
    }
}

/// A fixed-shape record that one source's rows are coerced into.
pub trait Record: Sized + Send + 'static {
    const KIND: SourceKind;
    const COLUMNS: &'static [Column];

    /// Build the record from values produced by [`Self::COLUMNS`], in order.
    fn from_fields(fields: &mut Fields) -> Self;

    fn into_dataset(records: Vec<Self>) -> Dataset;
}

/// Columns of `R`'s schema that do not appear in `headers`.
pub fn missing_columns<R: Record>(headers: &[String]) -> Vec<&'static str> {
    R::COLUMNS
        .iter()
        .map(|c| c.name)
        .filter(|name| !headers.iter().any(|h| h == name))
        .collect()
}

/// Apply a column list to a row.
pub fn apply(row: &RawRow, columns: &[Column]) -> Vec<Value> {
    columns
        .iter()
        .map(|column| {
            let cell = row.get(column.name);
            match column.coercion {
                Coercion::Label => Value::Label(cell.map(str::to_string)),
                Coercion::Real => Value::Real(cell.map_or(f64::NAN, parse_real)),
                Coercion::Integer => Value::Integer(cell.and_then(parse_integer)),
            }
        })
        .collect()
}

/// Coerce one raw row into `R`.
pub fn coerce<R: Record>(row: &RawRow) -> R {
    let mut fields = Fields {
        values: apply(row, R::COLUMNS).into_iter(),
    };
    R::from_fields(&mut fields)
}

// ---------------------------------------------------------------------------
// Numeric prefix parsing
// ---------------------------------------------------------------------------

fn digits_from(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count()
}

/// Parse the longest decimal prefix of `text` as a float.
///
/// Leading whitespace and a sign are accepted, as are `Infinity`, a fraction
/// without integer digits (`.5`) and an exponent. Anything else is `NaN`.
pub fn parse_real(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = digits_from(bytes, end);
    end += int_digits;
    let mut digits = int_digits;

    if bytes.get(end) == Some(&b'.') {
        let frac_digits = digits_from(bytes, end + 1);
        digits += frac_digits;
        if digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits_from(bytes, exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Parse the longest integer prefix of `text`.
///
/// Leading whitespace, a sign and a `0x` hex prefix are accepted. Returns
/// `None` when there are no digits or the value does not fit in an `i64`.
pub fn parse_integer(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, rest) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let len = rest
        .chars()
        .take_while(|c| c.is_digit(radix))
        .map(char::len_utf8)
        .sum::<usize>();
    if len == 0 {
        return None;
    }

    let magnitude = u64::from_str_radix(&rest[..len], radix).ok()?;
    if negative {
        0i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    }
}

// ---------------------------------------------------------------------------
// Source schemas
// ---------------------------------------------------------------------------

impl Record for SalesRecord {
    const KIND: SourceKind = SourceKind::Sales;
    const COLUMNS: &'static [Column] = &[label("Date"), real("Revenue_USD")];

    fn from_fields(fields: &mut Fields) -> Self {
        Self {
            date: fields.label(),
            revenue_usd: fields.real(),
        }
    }

    fn into_dataset(records: Vec<Self>) -> Dataset {
        Dataset::Sales(records)
    }
}

impl Record for TrackRecord {
    const KIND: SourceKind = SourceKind::Tracks;
    const COLUMNS: &'static [Column] = &[label("Track_ID"), integer("Purchase_Count")];

    fn from_fields(fields: &mut Fields) -> Self {
        Self {
            track_id: fields.label(),
            purchase_count: fields.integer(),
        }
    }

    fn into_dataset(records: Vec<Self>) -> Dataset {
        Dataset::Tracks(records)
    }
}

impl Record for CustomerRecord {
    const KIND: SourceKind = SourceKind::Customers;
    const COLUMNS: &'static [Column] = &[label("Age_Group"), integer("Total_Purchases")];

    fn from_fields(fields: &mut Fields) -> Self {
        Self {
            age_group: fields.label(),
            total_purchases: fields.integer(),
        }
    }

    fn into_dataset(records: Vec<Self>) -> Dataset {
        Dataset::Customers(records)
    }
}

impl Record for GenreRecord {
    const KIND: SourceKind = SourceKind::Genres;
    const COLUMNS: &'static [Column] = &[label("Genre"), integer("Total_Minutes_Played")];

    fn from_fields(fields: &mut Fields) -> Self {
        Self {
            genre: fields.label(),
            total_minutes_played: fields.integer(),
        }
    }

    fn into_dataset(records: Vec<Self>) -> Dataset {
        Dataset::Genres(records)
    }
}

impl Record for InventoryRecord {
    const KIND: SourceKind = SourceKind::Inventory;
    const COLUMNS: &'static [Column] = &[label("Product_Category"), integer("Current_Stock")];

    fn from_fields(fields: &mut Fields) -> Self {
        Self {
            product_category: fields.label(),
            current_stock: fields.integer(),
        }
    }

    fn into_dataset(records: Vec<Self>) -> Dataset {
        Dataset::Inventory(records)
    }
}

/// Column list for a kind, for callers that only have the runtime tag.
pub fn columns_for(kind: SourceKind) -> &'static [Column] {
    match kind {
        SourceKind::Sales => SalesRecord::COLUMNS,
        SourceKind::Tracks => TrackRecord::COLUMNS,
        SourceKind::Customers => CustomerRecord::COLUMNS,
        SourceKind::Genres => GenreRecord::COLUMNS,
        SourceKind::Inventory => InventoryRecord::COLUMNS,
    }
}
