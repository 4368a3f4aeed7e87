/// Builds the display title for a class from its type tags: all but the
/// last tag joined with ", ", the last attached with " y ". The title is
/// never stored independently; callers regenerate it on every tag change.
pub fn derive_title(tags: &[String]) -> Option<String> {
    let cased: Vec<String> = tags.iter().map(|tag| title_case(tag)).collect();
    match cased.as_slice() {
        [] => None,
        [only] => Some(format!("Clase de {only}")),
        [head @ .., last] => Some(format!("Clase de {} y {}", head.join(", "), last)),
    }
}

/// Uppercases the first letter of every word, leaving the rest untouched.
fn title_case(tag: &str) -> String {
    tag.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
