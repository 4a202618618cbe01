use std::sync::LazyLock;

use regex::Regex;

/// `union clause ast = <name> : <type>` up to the end of the line.
static VARIANT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"union\s+clause\s+ast\s*=\s*(\w+)\s*:[^\n]*").unwrap());

/// Source text between two variant declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Position in the segment list.
    pub index: usize,
    /// Variant named by the declaration that opens the segment. Only used
    /// for diagnostics; instructions are identified by their mnemonics.
    pub declared: &'a str,
    /// Text after the declaration line, up to the next declaration.
    pub text: &'a str,
}

/// Split `source` into segments, one per variant declaration.
///
/// Text before the first declaration is dropped. A declaration at the very
/// end of the source with nothing after it is reported and skipped.
pub fn split(source: &str) -> Vec<Segment<'_>> {
    let markers: Vec<(usize, usize, &str)> = VARIANT_MARKER
        .captures_iter(source)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            Some((whole.start(), whole.end(), name.as_str()))
        })
        .collect();

    if let Some(&(first, _, _)) = markers.first() {
        if !source[..first].trim().is_empty() {
            log::debug!("Ignoring {first} bytes before the first variant declaration");
        }
    }

    let mut segments = Vec::with_capacity(markers.len());
    for (i, &(_, end, declared)) in markers.iter().enumerate() {
        let next = markers.get(i + 1).map_or(source.len(), |&(start, _, _)| start);
        let text = &source[end..next];

        if i + 1 == markers.len() && text.trim().is_empty() {
            log::warn!("Variant declaration `{declared}` at end of input has no body, skipping");
            continue;
        }

        segments.push(Segment {
            index: segments.len(),
            declared,
            text,
        });
    }

    log::debug!("Split source into {} segments", segments.len());
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_on_declarations() {
        let src = "preamble\n\
                   union clause ast = UTYPE : (bits(20), regidx, uop)\n\
                   body one\n\
                   union clause ast = ITYPE : (bits(12), regidx, regidx, iop)\n\
                   body two\n";
        let segs = split(src);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].declared, "UTYPE");
        assert_eq!(segs[0].text, "\nbody one\n");
        assert_eq!(segs[1].declared, "ITYPE");
        assert_eq!(segs[1].text, "\nbody two\n");
        assert_eq!(segs[1].index, 1);
    }

    #[test]
    fn declaration_line_is_not_segment_text() {
        let segs = split("union clause ast = JAL : (bits(21), regidx)\nx");
        assert_eq!(segs.len(), 1);
        assert!(!segs[0].text.contains("union clause"));
    }

    #[test]
    fn no_declarations() {
        assert!(split("mapping clause encdec = ITYPE(...)\n").is_empty());
        assert!(split("").is_empty());
    }

    #[test]
    fn trailing_declaration_without_body_is_skipped() {
        let src = "union clause ast = A : unit\nbody\nunion clause ast = B : unit\n  \n";
        let segs = split(src);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].declared, "A");
    }

    #[test]
    fn empty_middle_segment_is_kept() {
        let src = "union clause ast = A : unit\nunion clause ast = B : unit\nbody\n";
        let segs = split(src);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].text.trim(), "");
        assert_eq!(segs[1].declared, "B");
    }
}
