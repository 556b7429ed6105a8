use serde_json::{Map, Value};

/// Uppercases the first character and lowercases the rest, so
/// `"comments"` becomes `"Comments"` and `"pullRequests"` becomes `"Pullrequests"`.
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Keeps only `keys` of a JSON object. Absent keys are skipped rather than
/// filled with null; non-object values slice down to an empty object.
pub fn slice_fields(value: &Value, keys: &[&str]) -> Value {
    let mut sliced = Map::new();
    if let Value::Object(fields) = value {
        for key in keys {
            if let Some(field) = fields.get(*key) {
                sliced.insert((*key).to_string(), field.clone());
            }
        }
    }
    Value::Object(sliced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn capitalize_matches_title_case_of_first_word() {
        assert_eq!(capitalize("comments"), "Comments");
        assert_eq!(capitalize("pullRequests"), "Pullrequests");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn slice_fields_skips_missing_keys() {
        let value = json!({"id": 1, "created_at": "2024-01-01T00:00:00Z", "body": "hi"});
        assert_eq!(
            slice_fields(&value, &["created_at", "updated_at"]),
            json!({"created_at": "2024-01-01T00:00:00Z"})
        );
    }

    #[test]
    fn slice_fields_on_non_object_is_empty() {
        assert_eq!(slice_fields(&json!([1, 2]), &["created_at"]), json!({}));
    }
}
