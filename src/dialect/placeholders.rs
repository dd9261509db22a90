/// Rewrites every `?` into a numbered `:N` marker, left to right.
/// The text is not parsed: a `?` inside a string literal is rewritten too.
pub fn position_bindings(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len() + 8);
    let mut count = 0usize;
    for ch in sql.chars() {
        if ch == '?' {
            count += 1;
            out.push(':');
            out.push_str(&count.to_string());
        } else {
            out.push(ch);
        }
    }
    out
}
