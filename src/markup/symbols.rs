//! Marker literals recognised in annotated source.

/// Opens a block of fully editable lines.
pub const BEGIN_LINE: &str = "#BEGIN_EDITABLE#";
/// Closes a block of fully editable lines.
pub const END_LINE: &str = "#END_EDITABLE#";
/// Opens an inline editable section.
pub const BEGIN_CHAR: &str = "#{#";
/// Closes an inline editable section.
pub const END_CHAR: &str = "#}#";
/// Opens the properties block.
pub const BEGIN_PROPERTIES: &str = "#BEGIN_PROPERTIES#";
/// Closes the properties block.
pub const END_PROPERTIES: &str = "#END_PROPERTIES#";
/// Marks where the start-level-end sentinel is re-inserted on export.
pub const END_START_LEVEL: &str = "#END_OF_START_LEVEL#";

/// Inline markers are spliced out of their line; both have this length.
pub const INLINE_MARKER_LEN: usize = 3;

const _: () = assert!(BEGIN_CHAR.len() == INLINE_MARKER_LEN && END_CHAR.len() == INLINE_MARKER_LEN);

/// A marker that occupies a whole line. Recognised only at the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockMarker {
    BeginProperties,
    EndProperties,
    BeginLine,
    EndLine,
    EndStartLevel,
}

impl BlockMarker {
    /// Classify a raw line. Properties markers take precedence over the others.
    pub fn classify(line: &str) -> Option<Self> {
        const ORDER: [(&str, BlockMarker); 5] = [
            (BEGIN_PROPERTIES, BlockMarker::BeginProperties),
            (END_PROPERTIES, BlockMarker::EndProperties),
            (BEGIN_LINE, BlockMarker::BeginLine),
            (END_LINE, BlockMarker::EndLine),
            (END_START_LEVEL, BlockMarker::EndStartLevel),
        ];
        ORDER
            .iter()
            .find(|(symbol, _)| line.starts_with(symbol))
            .map(|(_, marker)| *marker)
    }

    pub fn is_properties(&self) -> bool {
        matches!(self, Self::BeginProperties | Self::EndProperties)
    }
}
