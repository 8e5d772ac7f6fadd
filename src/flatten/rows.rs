//! Row and table types for flattened output

use serde_json::Value;

/// Normalize an identifier value to its string form.
///
/// The vendor sometimes returns numeric identifiers; everything downstream
/// treats identifiers as strings.
pub fn id_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ============================================================================
// Flat Row
// ============================================================================

/// One (primaryId, attribute, value) triple of the long-format output.
///
/// `item_id` is the originating child identifier, stamped only by parent
/// resolution. Rows are immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRow {
    /// Primary identifier of the record, always a string
    pub primary_id: String,
    /// Dotted attribute path
    pub attribute: String,
    /// Attribute value
    pub value: Value,
    /// Child identifier this row was resolved for, if any
    pub item_id: Option<String>,
}

impl FlatRow {
    /// Create a row with no item annotation
    pub fn new(
        primary_id: impl Into<String>,
        attribute: impl Into<String>,
        value: Value,
    ) -> Self {
        Self {
            primary_id: primary_id.into(),
            attribute: attribute.into(),
            value,
            item_id: None,
        }
    }

    /// Annotate the row with the originating child identifier
    #[must_use]
    pub fn with_item_id(mut self, item_id: impl Into<String>) -> Self {
        self.item_id = Some(item_id.into());
        self
    }
}

// ============================================================================
// Result Table
// ============================================================================

/// Ordered accumulation of flattened row batches.
///
/// Owned exclusively by the driving loop until returned to the caller.
/// Concatenating zero batches is the well-defined empty table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    rows: Vec<FlatRow>,
}

impl ResultTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table by concatenating batches in order
    pub fn from_batches(batches: impl IntoIterator<Item = Vec<FlatRow>>) -> Self {
        let mut table = Self::new();
        for batch in batches {
            table.append_batch(batch);
        }
        table
    }

    /// Append a batch of rows, preserving order
    pub fn append_batch(&mut self, batch: Vec<FlatRow>) {
        self.rows.extend(batch);
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrow the rows in order
    pub fn rows(&self) -> &[FlatRow] {
        &self.rows
    }

    /// Take ownership of the rows
    pub fn into_rows(self) -> Vec<FlatRow> {
        self.rows
    }
}

impl IntoIterator for ResultTable {
    type Item = FlatRow;
    type IntoIter = std::vec::IntoIter<FlatRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a FlatRow;
    type IntoIter = std::slice::Iter<'a, FlatRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
