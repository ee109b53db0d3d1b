//! Reverse substitution: placeholders back to their original text.

use clinanon_core::codes::parse_code;

use crate::table::MappingTable;

impl MappingTable {
    /// Replace every placeholder known to this session with its
    /// representative original text. Bracketed text that is not a known
    /// code is left as it is.
    pub fn restore(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(open) = rest.find('[') {
            out.push_str(&rest[..open]);
            let tail = &rest[open..];

            let replacement = tail.find(']').and_then(|close| {
                let code = &tail[..=close];
                parse_code(code).ok()?;
                self.original_for(code).map(|original| (original, close))
            });

            match replacement {
                Some((original, close)) => {
                    out.push_str(original);
                    rest = &tail[close + 1..];
                }
                None => {
                    out.push('[');
                    rest = &tail[1..];
                }
            }
        }

        out.push_str(rest);
        out
    }
}
