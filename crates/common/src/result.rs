use serde_json::Value as JsonValue;

use crate::types::Value;

/// One row of values as handed to expression evaluation by the storage
/// engine. Rows backing an executor scan may be reused between rows, so
/// anything that outlives the evaluation call must clone out of them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Overwrites the value at `index`; ignored when out of range.
    pub fn set(&mut self, index: usize, value: Value) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value;
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    pub fn to_json(&self) -> Vec<JsonValue> {
        self.values.iter().map(|v| v.to_json()).collect()
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl IntoIterator for Row {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_accessors() {
        let row = Row::new(vec![Value::int64(1), Value::string("a")]);
        assert_eq!(row.len(), 2);
        assert_eq!(row.get(1), Some(&Value::string("a")));
        assert_eq!(row.get(2), None);
    }

    #[test]
    fn test_row_set_in_range_only() {
        let mut row = Row::new(vec![Value::int64(1)]);
        row.set(0, Value::int64(2));
        row.set(5, Value::int64(9));
        assert_eq!(row.values(), &[Value::int64(2)]);
    }

    #[test]
    fn test_row_to_json() {
        let row = Row::new(vec![Value::int64(1), Value::null()]);
        assert_eq!(row.to_json(), vec![serde_json::json!(1), JsonValue::Null]);
    }
}
