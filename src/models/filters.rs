//! Filter parameters from the viewing collaborator (popup UI).

/// Category/date-window filter applied when recomputing dataset
/// metrics or exporting rows. Date bounds are inclusive `YYYY-MM-DD`
/// keys compared lexically against normalized event dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetFilter {
    pub category: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl DatasetFilter {
    pub fn matches_category(&self, category: &str) -> bool {
        self.category.as_deref().map_or(true, |c| c == category)
    }
}
