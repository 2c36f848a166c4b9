//! Raw-emit template substitution.
//!
//! Placeholders are `$N` (argument `N`, greedy digits) and `$N...` (arguments
//! `N..` joined by `", "`). A `$` not followed by a digit is copied as-is, and
//! so is a placeholder whose index is out of range.

use crate::renderer::{Precedence, Rendered};

/// Substitute pre-rendered arguments into `template`.
///
/// A single-argument placeholder is parenthesized unless the argument is
/// atomic (a member access, call or primary expression). Spread arguments
/// are separated by commas and only need to bind tighter than a comma.
pub(crate) fn substitute(template: &str, args: &[Rendered]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let digits = after.bytes().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            out.push('$');
            rest = after;
            continue;
        }

        let placeholder = &rest[pos..pos + 1 + digits];
        let index = after[..digits].parse::<usize>().ok();
        let tail = &after[digits..];

        if let Some(spread_tail) = tail.strip_prefix("...") {
            match index {
                Some(start) if start <= args.len() => {
                    let spread: Vec<String> = args[start..]
                        .iter()
                        .map(|arg| arg.wrap(Precedence::ASSIGN))
                        .collect();
                    out.push_str(&spread.join(", "));
                }
                _ => {
                    out.push_str(placeholder);
                    out.push_str("...");
                }
            }
            rest = spread_tail;
        } else {
            match index.and_then(|i| args.get(i)) {
                Some(arg) => out.push_str(&arg.wrap(Precedence::CALL)),
                None => out.push_str(placeholder),
            }
            rest = tail;
        }
    }

    out.push_str(rest);
    out
}
