//! Replacement-template normalization.
//!
//! Rule configs written for Python-based tooling use `\1` and `\g<name>`
//! backreferences. The regex crate expands `$1` / `${name}` instead, so those
//! forms are rewritten once when a rule is compiled. Native `$` references
//! pass through untouched.

/// Rewrite Python-style backreferences into regex-crate syntax.
///
/// - `\1` .. `\99` become `${1}` .. `${99}`
/// - `\g<name>` and `\g<1>` become `${name}` and `${1}`
/// - `\\` becomes a single literal backslash
///
/// Braces are always emitted so that a following literal character is never
/// absorbed into the group name.
pub fn normalize_replacement(template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.peek().copied() {
            Some(d @ '1'..='9') => {
                chars.next();
                let mut group = String::from(d);
                if let Some(d2) = chars.peek().copied().filter(char::is_ascii_digit) {
                    chars.next();
                    group.push(d2);
                }
                out.push_str(&format!("${{{group}}}"));
            }
            Some('g') => {
                let rest: String = chars.clone().skip(1).collect();
                match parse_named_group(&rest) {
                    Some(name) => {
                        // Consume `g<`, the name, and `>`.
                        for _ in 0..name.chars().count() + 3 {
                            chars.next();
                        }
                        out.push_str(&format!("${{{name}}}"));
                    }
                    None => out.push('\\'),
                }
            }
            Some('\\') => {
                chars.next();
                out.push('\\');
            }
            _ => out.push('\\'),
        }
    }

    out
}

/// Parse `<name>` at the start of `rest`, returning `name`.
fn parse_named_group(rest: &str) -> Option<&str> {
    let inner = rest.strip_prefix('<')?;
    let end = inner.find('>')?;
    let name = &inner[..end];
    let valid = !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_');
    valid.then_some(name)
}
