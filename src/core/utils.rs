//! Identifier transformation utilities for code generation
//!
//! Every name that ends up in a generated artifact (class names, JSON names,
//! receiver names, command names) is derived through these functions so that
//! the same spec always produces the same identifiers.

/// Converts a string to snake_case.
///
/// Handles camelCase, PascalCase, kebab-case and space separated input. Any
/// character that is not alphanumeric acts as a word separator.
///
/// # Examples
/// ```
/// use apigen::core::utils::to_snake_case;
///
/// assert_eq!(to_snake_case("findPetsByStatus"), "find_pets_by_status");
/// assert_eq!(to_snake_case("FindPetsByStatus"), "find_pets_by_status");
/// assert_eq!(to_snake_case("find-pets-by-status"), "find_pets_by_status");
/// assert_eq!(to_snake_case("get HTTP Response"), "get_http_response");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let mut prev_is_lowercase = false;

    for ch in s.chars() {
        if ch.is_uppercase() {
            if prev_is_lowercase {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
            prev_is_lowercase = false;
        } else if ch.is_alphanumeric() {
            result.push(ch);
            prev_is_lowercase = ch.is_lowercase() || ch.is_ascii_digit();
        } else {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            prev_is_lowercase = false;
        }
    }

    result.trim_matches('_').to_string()
}

/// Converts a string to PascalCase, used for class and type names.
///
/// # Examples
/// ```
/// use apigen::core::utils::to_pascal_case;
///
/// assert_eq!(to_pascal_case("find_pets_by_status"), "FindPetsByStatus");
/// assert_eq!(to_pascal_case("Swagger Petstore"), "SwaggerPetstore");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    to_snake_case(s)
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect()
}

/// Converts a string to camelCase, used for JSON-facing names.
///
/// # Examples
/// ```
/// use apigen::core::utils::to_camel_case;
///
/// assert_eq!(to_camel_case("find_pets_by_status"), "findPetsByStatus");
/// assert_eq!(to_camel_case("X-Rate-Limit"), "xRateLimit");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Lower-cased, space separated words ("get pet by id").
pub fn to_human_name_lower(s: &str) -> String {
    to_snake_case(s).replace('_', " ")
}

/// Kebab-cased command name ("petstore-server").
pub fn to_command_name(s: &str) -> String {
    to_snake_case(s).replace('_', "-")
}

/// Single lower-case letter used as the receiver in generated code.
pub fn receiver_name(s: &str) -> String {
    s.chars()
        .find(|c| c.is_alphabetic())
        .map(|c| c.to_lowercase().collect())
        .unwrap_or_else(|| "o".to_string())
}
