/// Turn a PascalCase tag into a display label: `TotalWallJumps` becomes
/// `Total Wall Jumps`.
///
/// A space goes before every ASCII capital, the result is trimmed, and the
/// first character is upper-cased.
pub fn display_label(tag: &str) -> String {
    let mut spaced = String::with_capacity(tag.len() + tag.len() / 4);
    for ch in tag.chars() {
        if ch.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(ch);
    }

    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
