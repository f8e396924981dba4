//! Utility-class token splitting.
//!
//! The shared primitive behind every class rewrite pass. A token such as
//! `hover:border-l-2/50` decomposes into a variant guard (`hover`), a base
//! name (`border-l-2`), and a modifier suffix (`50`). Colons and slashes
//! inside `[...]` groups are part of an arbitrary value, never separators.

/// A utility-class token decomposed into its three parts.
///
/// Borrows from the input token; re-joining the parts with
/// [`join_class_name`] reproduces an equivalent token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitClassName<'a> {
    /// Everything before the last top-level colon, if any
    pub variant: Option<&'a str>,

    /// The class name itself
    pub base: &'a str,

    /// Trailing `/value` alpha or fraction suffix, if any
    pub modifier: Option<&'a str>,
}

/// Split a single utility-class token into `(variant, base, modifier)`.
pub fn split_class_name(class_name: &str) -> SplitClassName<'_> {
    // Fast path: nothing to split.
    if !class_name.contains(':') && !class_name.contains('/') {
        return SplitClassName {
            variant: None,
            base: class_name,
            modifier: None,
        };
    }

    let (variant, rest) = match rfind_top_level(class_name, ':') {
        Some(index) => (Some(&class_name[..index]), &class_name[index + 1..]),
        None => (None, class_name),
    };

    let (base, modifier) = match rfind_top_level(rest, '/') {
        Some(index) => (&rest[..index], Some(&rest[index + 1..])),
        None => (rest, None),
    };

    SplitClassName {
        variant,
        base,
        modifier,
    }
}

/// Reassemble a token from its parts.
pub fn join_class_name(variant: Option<&str>, base: &str, modifier: Option<&str>) -> String {
    let mut token = String::with_capacity(
        base.len() + variant.map_or(0, |v| v.len() + 1) + modifier.map_or(0, |m| m.len() + 1),
    );
    if let Some(variant) = variant {
        token.push_str(variant);
        token.push(':');
    }
    token.push_str(base);
    if let Some(modifier) = modifier {
        token.push('/');
        token.push_str(modifier);
    }
    token
}

/// Rightmost occurrence of `needle` outside any `[...]` group.
///
/// Scans right to left so the separator closest to the base name wins.
/// An unmatched bracket leaves the depth counter pinned rather than
/// underflowing, which degrades the unbalanced region to literal text.
fn rfind_top_level(haystack: &str, needle: char) -> Option<usize> {
    let mut depth: u32 = 0;
    for (index, ch) in haystack.char_indices().rev() {
        match ch {
            ']' => depth += 1,
            '[' => depth = depth.saturating_sub(1),
            ch if ch == needle && depth == 0 => return Some(index),
            _ => {}
        }
    }
    None
}
