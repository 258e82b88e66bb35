//! IE conditional comments: `<!--[if IE]> ... <![endif]-->`.

/// A comment body split into its bracket markers and the markup between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionalComment<'a> {
    /// `[if IE 6]>` or `[if IE 6]`.
    pub opener: &'a str,
    /// The markup to minify.
    pub interior: &'a str,
    /// `<![endif]` or `[endif]`.
    pub closer: &'a str,
}

impl<'a> ConditionalComment<'a> {
    /// Split `body` (the text between `<!--` and `-->`) if it has both an
    /// opening and a closing marker.
    pub fn parse(body: &'a str) -> Option<Self> {
        let opener_len = opener_len(body)?;
        let closer_start = closer_start(body)?;
        if closer_start < opener_len {
            return None;
        }
        Some(Self {
            opener: &body[..opener_len],
            interior: &body[opener_len..closer_start],
            closer: &body[closer_start..],
        })
    }
}

/// Whether `body` has an opening or a closing marker, like either half of a
/// downlevel-revealed comment (`[if !IE]><!` and `<![endif]`).
pub fn has_marker(body: &str) -> bool {
    opener_len(body).is_some() || closer_start(body).is_some()
}

/// `[` non-`]`+ `]`, then an optional `>`, at the start.
fn opener_len(body: &str) -> Option<usize> {
    let inner = body.strip_prefix('[')?;
    let close = inner.find(']').filter(|&close| close > 0)?;
    let len = 1 + close + 1;
    Some(if body[len..].starts_with('>') { len + 1 } else { len })
}

/// An optional `<!`, then `[` non-`]`+ `]`, at the end.
fn closer_start(body: &str) -> Option<usize> {
    let inner = body.strip_suffix(']')?;
    let open = inner.rfind('[')?;
    if open + 1 == inner.len() || inner[open + 1..].contains(']') {
        return None;
    }
    Some(if inner[..open].ends_with("<!") { open - 2 } else { open })
}
