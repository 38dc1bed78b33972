//! Identifier derivation for generated items.
//!
//! Document names (schema names, property names, URL paths) are arbitrary
//! strings. The helpers here turn them into valid, deterministic Rust
//! identifiers.

use clientgen_define::HttpMethod;
use proc_macro2::{Ident, Span};

/// Keywords that can be used as raw identifiers (`r#type`).
const RAW_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "super", "Self"];

/// Extracts parameter names from a path template.
///
/// ## Examples
///
/// ```
/// use clientgen_gen::naming::extract_path_params;
///
/// assert_eq!(extract_path_params("/items"), Vec::<&str>::new());
/// assert_eq!(
///     extract_path_params("/users/{user_id}/posts/{post_id}"),
///     vec!["user_id", "post_id"]
/// );
/// ```
pub fn extract_path_params(path: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut start = None;

    for (idx, c) in path.char_indices() {
        match c {
            '{' => start = Some(idx + 1),
            '}' => {
                if let Some(begin) = start.take()
                    && begin < idx
                {
                    params.push(&path[begin..idx]);
                }
            }
            _ => {}
        }
    }

    params
}

/// Converts an arbitrary name to `snake_case`.
///
/// Camel-case humps and every non-ASCII-alphanumeric character become word
/// boundaries; runs of boundaries collapse to a single `_`, and leading or
/// trailing underscores are dropped.
///
/// ## Examples
///
/// ```
/// use clientgen_gen::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("createdAt"), "created_at");
/// assert_eq!(to_snake_case("HTTPStatus"), "http_status");
/// assert_eq!(to_snake_case("user-name"), "user_name");
/// assert_eq!(to_snake_case("__x__"), "x");
/// ```
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            push_separator(&mut out);
            continue;
        }
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                push_separator(&mut out);
            }
        }
        out.push(c.to_ascii_lowercase());
    }

    out.trim_matches('_').to_string()
}

fn push_separator(out: &mut String) {
    if !out.is_empty() && !out.ends_with('_') {
        out.push('_');
    }
}

/// Converts an arbitrary name to `PascalCase`.
///
/// Non-alphanumeric characters split words; the first letter of each word
/// is uppercased and the rest is kept as written.
///
/// ## Examples
///
/// ```
/// use clientgen_gen::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("pet"), "Pet");
/// assert_eq!(to_pascal_case("pet_store"), "PetStore");
/// assert_eq!(to_pascal_case("NewPet"), "NewPet");
/// assert_eq!(to_pascal_case("error.detail"), "ErrorDetail");
/// ```
pub fn to_pascal_case(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => std::iter::once(first.to_ascii_uppercase())
                    .chain(chars)
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Returns the Rust type name for a schema name.
///
/// Names that would not start with a letter are prefixed with `Schema`.
pub fn type_name(schema_name: &str) -> String {
    let pascal = to_pascal_case(schema_name);
    match pascal.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => pascal,
        _ => format!("Schema{pascal}"),
    }
}

/// Returns the identifier for a schema's generated struct.
pub fn type_ident(schema_name: &str) -> Ident {
    Ident::new(&type_name(schema_name), Span::call_site())
}

/// Returns the field identifier for a property name.
///
/// Keywords become raw identifiers (`type` -> `r#type`). Names that cannot
/// be raw (`self`, `crate`, ...) get a trailing underscore. Names that are
/// empty or start with a digit get a `field_` prefix.
///
/// ## Examples
///
/// ```
/// use clientgen_gen::naming::field_ident;
///
/// assert_eq!(field_ident("userName").to_string(), "user_name");
/// assert_eq!(field_ident("type").to_string(), "r#type");
/// assert_eq!(field_ident("self").to_string(), "self_");
/// assert_eq!(field_ident("2fa").to_string(), "field_2fa");
/// ```
pub fn field_ident(property: &str) -> Ident {
    let snake = to_snake_case(property);

    if snake.is_empty() {
        return Ident::new("field", Span::call_site());
    }
    if snake.starts_with(|c: char| c.is_ascii_digit()) {
        return Ident::new(&format!("field_{snake}"), Span::call_site());
    }
    if RAW_KEYWORDS.contains(&snake.as_str()) {
        return Ident::new_raw(&snake, Span::call_site());
    }
    if NON_RAW_KEYWORDS.contains(&snake.as_str()) {
        return Ident::new(&format!("{snake}_"), Span::call_site());
    }

    Ident::new(&snake, Span::call_site())
}

/// Derives the generated method name for an operation.
///
/// The name is the lowercase method followed by the path in `snake_case`:
/// separators are dropped, each `{param}` becomes `by_param`, and the bare
/// root path becomes `root`.
///
/// ## Examples
///
/// ```
/// use clientgen_define::HttpMethod;
/// use clientgen_gen::naming::function_name;
///
/// assert_eq!(function_name(HttpMethod::Get, "/items"), "get_items");
/// assert_eq!(function_name(HttpMethod::Delete, "/users/{id}"), "delete_users_by_id");
/// assert_eq!(function_name(HttpMethod::Get, "/"), "get_root");
/// ```
pub fn function_name(method: HttpMethod, path: &str) -> String {
    let readable = path.replace('{', "/by_").replace('}', "/");
    let words: Vec<String> = readable
        .split('/')
        .map(to_snake_case)
        .filter(|word| !word.is_empty())
        .collect();

    let stem = if words.is_empty() {
        "root".to_string()
    } else {
        words.join("_")
    };

    format!("{}_{stem}", method.to_string().to_lowercase())
}

/// Returns the identifier for an operation's generated method.
pub fn function_ident(method: HttpMethod, path: &str) -> Ident {
    Ident::new(&function_name(method, path), Span::call_site())
}

/// Returns `true` if `name` is a valid plain (non-keyword) Rust identifier.
///
/// Used to validate user-supplied names such as the client struct name.
pub fn is_plain_ident(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');

    starts_ok
        && name != "_"
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !RAW_KEYWORDS.contains(&name)
        && !NON_RAW_KEYWORDS.contains(&name)
}
