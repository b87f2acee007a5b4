use std::fmt;

/// Structured side-channel messages produced while syncing.
///
/// Library code never prints; these travel in the sync report and callers
/// decide whether they reach stderr, a log, or nowhere at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Two sources share a logical identifier and so contend for the same
    /// output file. Indices refer to positions in the configured source
    /// list.
    DuplicateSpecId {
        spec_id: String,
        first_index: usize,
        index: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSpecId {
                spec_id,
                first_index,
                index,
            } => write!(
                f,
                "duplicate spec_id \"{spec_id}\": sources {first_index} and {index} write the same file"
            ),
        }
    }
}
