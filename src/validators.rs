use serde_json::Value;

use crate::data_models::SearchPage;
use crate::error::ValidationError;

/// Case-insensitive substring check across the top-level fields of an item.
///
/// The needle may sit inside a longer word: `"гео"` matches `"геолог"`.
/// String fields are compared by their text, anything else by its compact JSON.
/// A non-object item is compared as a whole.
pub fn item_contains(item: &Value, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    match item {
        Value::Object(fields) => fields
            .values()
            .any(|value| value_text(value).is_some_and(|text| text.contains(&needle))),
        other => value_text(other).is_some_and(|text| text.contains(&needle)),
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.to_lowercase()),
        other => Some(other.to_string().to_lowercase()),
    }
}

fn describe_item(idx: usize, item: &Value) -> String {
    match item.get("id") {
        Some(Value::String(id)) => format!("item #{idx} (id {id})"),
        Some(id) if !id.is_null() => format!("item #{idx} (id {id})"),
        _ => format!("item #{idx}"),
    }
}

pub fn every_item_contains(
    needle: impl Into<String>,
) -> impl FnMut(&SearchPage) -> Result<(), ValidationError> {
    let needle = needle.into();
    move |page| match page
        .items
        .iter()
        .enumerate()
        .find(|(_, item)| !item_contains(item, &needle))
    {
        Some((idx, item)) => Err(ValidationError::new(format!(
            "{} does not contain {needle:?}",
            describe_item(idx, item)
        ))),
        None => Ok(()),
    }
}

pub fn no_item_contains(
    needle: impl Into<String>,
) -> impl FnMut(&SearchPage) -> Result<(), ValidationError> {
    let needle = needle.into();
    move |page| match page
        .items
        .iter()
        .enumerate()
        .find(|(_, item)| item_contains(item, &needle))
    {
        Some((idx, item)) => Err(ValidationError::new(format!(
            "{} contains excluded {needle:?}",
            describe_item(idx, item)
        ))),
        None => Ok(()),
    }
}

pub fn found_any() -> impl FnMut(&SearchPage) -> Result<(), ValidationError> {
    |page| {
        if page.found > 0 {
            Ok(())
        } else {
            Err(ValidationError::new("found is 0"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page_of(items: Vec<Value>) -> SearchPage {
        SearchPage {
            found: items.len() as u64,
            pages: 1,
            page: Some(0),
            per_page: Some(100),
            items,
        }
    }

    #[test]
    fn test_item_contains_is_case_insensitive() {
        let item = json!({"id": "1", "name": "Ведущий ТЕСТИРОВЩИК"});
        assert!(item_contains(&item, "Тестировщик"));
        assert!(item_contains(&item, "тестировщик"));
        assert!(!item_contains(&item, "junior"));
    }

    #[test]
    fn test_item_contains_matches_inside_words() {
        let item = json!({"name": "Геологоразведка"});
        assert!(item_contains(&item, "Гео"));
    }

    #[test]
    fn test_item_contains_looks_into_nested_fields() {
        let item = json!({
            "id": "7",
            "name": "Developer",
            "snippet": {"requirement": "Опыт работы Junior тестировщиком", "responsibility": null},
            "salary": null
        });
        assert!(item_contains(&item, "junior"));
        assert!(!item_contains(&json!({"name": "QA", "salary": null}), "null"));
    }

    #[test]
    fn test_item_contains_phrase() {
        let item = json!({"name": "Тестировщик Junior / QA"});
        assert!(item_contains(&item, "Тестировщик Junior"));
        assert!(!item_contains(&json!({"name": "Junior Тестировщик"}), "Тестировщик Junior"));
    }

    #[test]
    fn test_every_item_contains_reports_first_offender() {
        let page = page_of(vec![
            json!({"id": "1", "name": "QA тестировщик"}),
            json!({"id": "2", "name": "Backend developer"}),
            json!({"id": "3", "name": "Rust developer"}),
        ]);
        let mut check = every_item_contains("тестировщик");
        let err = check(&page).unwrap_err();
        assert!(err.message.contains("item #1"), "{}", err.message);
        assert!(err.message.contains("id 2"), "{}", err.message);

        let mut check = every_item_contains("developer");
        assert!(check(&page_of(page.items[1..].to_vec())).is_ok());
    }

    #[test]
    fn test_no_item_contains() {
        let page = page_of(vec![
            json!({"id": "1", "name": "Тестировщик"}),
            json!({"id": "2", "name": "Тестировщик", "snippet": {"requirement": "junior"}}),
        ]);
        let mut check = no_item_contains("Junior");
        let err = check(&page).unwrap_err();
        assert!(err.message.contains("id 2"), "{}", err.message);

        let mut check = no_item_contains("Senior");
        assert!(check(&page).is_ok());
    }

    #[test]
    fn test_empty_page_passes_item_checks() {
        let page = page_of(vec![]);
        let mut every = every_item_contains("x");
        let mut none = no_item_contains("x");
        let mut any = found_any();
        assert!(every(&page).is_ok());
        assert!(none(&page).is_ok());
        assert!(any(&page).is_err());
    }
}
