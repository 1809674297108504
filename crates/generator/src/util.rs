//! Casing helpers shared by the mapper and the renderers.

/// Uppercases the first letter, leaving the rest untouched
/// (e.g. `namespaces` -> `Namespaces`, `eventHub` -> `EventHub`).
pub fn pascal_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Converts `camelCase` / `PascalCase` to `snake_case`
/// (e.g. `resourceGroup` -> `resource_group`).
pub fn snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_case_uppercases_the_first_letter() {
        assert_eq!(pascal_case("namespaces"), "Namespaces");
        assert_eq!(pascal_case("eventHub"), "EventHub");
        assert_eq!(pascal_case(""), "");
        assert_eq!(pascal_case("Sku"), "Sku");
    }

    #[test]
    fn snake_case_splits_on_uppercase() {
        assert_eq!(snake_case("resourceGroup"), "resource_group");
        assert_eq!(snake_case("ResourceGroup"), "resource_group");
        assert_eq!(snake_case("name"), "name");
        assert_eq!(snake_case("subscriptionId"), "subscription_id");
    }
}
