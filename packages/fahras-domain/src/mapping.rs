use serde_json::{Map, Value};

pub const SOURCE_LABEL_KEY: &str = "sourceLabel";

/// Reshapes one provider row into a canonical record.
///
/// With an empty mapping the row is returned untouched. Otherwise the result holds the
/// source label followed by every canonical key of the mapping, in mapping order. Provider
/// keys that are missing from the row, or rows that are not objects, yield `null`.
pub fn map_row(row: Value, mapping: &Map<String, Value>, source_label: &str) -> Value {
	if mapping.is_empty() {
		return row;
	}

	let mut record = Map::with_capacity(mapping.len() + 1);

	record.insert(SOURCE_LABEL_KEY.to_string(), Value::String(source_label.to_string()));

	for (canonical_key, provider_key) in mapping {
		let value = provider_key
			.as_str()
			.and_then(|provider_key| row.get(provider_key))
			.cloned()
			.unwrap_or(Value::Null);

		record.insert(canonical_key.clone(), value);
	}

	Value::Object(record)
}

pub fn map_rows(rows: Vec<Value>, mapping: &Map<String, Value>, source_label: &str) -> Vec<Value> {
	rows.into_iter().map(|row| map_row(row, mapping, source_label)).collect()
}
