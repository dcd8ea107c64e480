//! Profile export selection

/// Which profiles `export_selected` serializes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportSelection {
    /// Every stored profile.
    All,
    /// Only these ids; unknown ids are skipped.
    Ids(Vec<String>),
}

impl ExportSelection {
    pub(crate) fn includes(&self, id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Ids(ids) => ids.iter().any(|selected| selected == id),
        }
    }
}
