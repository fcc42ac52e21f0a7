//! Output row buffer of a scan.

use crate::datum::Value;

/// One output row in deformed form: a value and a null flag per attribute.
///
/// The slot always owns its values, so a row stays valid after the bridge
/// session it was fetched in has ended.
#[derive(Debug, Clone, PartialEq)]
pub struct TupleSlot {
    values: Vec<Value>,
    isnull: Vec<bool>,
    empty: bool,
}

impl TupleSlot {
    /// Creates an empty slot for `natts` attributes.
    pub fn new(natts: usize) -> Self {
        Self {
            values: vec![Value::Null; natts],
            isnull: vec![true; natts],
            empty: true,
        }
    }

    /// Number of attributes.
    pub fn natts(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the slot holds no row.
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Marks the slot empty and resets every attribute to null.
    pub fn clear(&mut self) {
        self.values.fill(Value::Null);
        self.isnull.fill(true);
        self.empty = true;
    }

    /// Copies a fetched row into the slot.
    ///
    /// Attributes past the end of `row` are stored as null; extra values in
    /// `row` are ignored.
    pub fn store_deformed(&mut self, row: &[Value]) {
        for (i, (value, isnull)) in self.values.iter_mut().zip(&mut self.isnull).enumerate() {
            *value = row.get(i).cloned().unwrap_or(Value::Null);
            *isnull = value.is_null();
        }
        self.empty = false;
    }

    /// Attribute values; nulls are [`Value::Null`].
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Per-attribute null flags.
    pub fn isnull(&self) -> &[bool] {
        &self.isnull
    }

    /// Copies the row out of the slot.
    pub fn to_row(&self) -> Vec<Value> {
        self.values.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_slot_is_empty() {
        let slot = TupleSlot::new(2);
        assert!(slot.is_empty());
        assert_eq!(slot.natts(), 2);
        assert_eq!(slot.isnull(), &[true, true]);
    }

    #[test]
    fn test_store_and_clear() {
        let mut slot = TupleSlot::new(2);
        slot.store_deformed(&[Value::Int32(1), Value::Null]);
        assert!(!slot.is_empty());
        assert_eq!(slot.values(), &[Value::Int32(1), Value::Null]);
        assert_eq!(slot.isnull(), &[false, true]);

        slot.clear();
        assert!(slot.is_empty());
        assert_eq!(slot.values(), &[Value::Null, Value::Null]);
    }

    #[test]
    fn test_short_row_is_padded_with_nulls() {
        let mut slot = TupleSlot::new(3);
        slot.store_deformed(&[Value::Text("a".into())]);
        assert_eq!(slot.isnull(), &[false, true, true]);
    }

    #[test]
    fn test_long_row_is_truncated() {
        let mut slot = TupleSlot::new(1);
        slot.store_deformed(&[Value::Int16(1), Value::Int16(2)]);
        assert_eq!(slot.to_row(), vec![Value::Int16(1)]);
    }
}
