//! Project search filtering

use super::ProjectsView;
use crate::types::Project;

/// Catalog indices whose title or description contains `query`,
/// case-insensitively, in catalog order. An empty query matches everything.
pub fn matching_indices(projects: &[Project], query: &str) -> Vec<usize> {
    let query_lower = query.to_lowercase();
    projects
        .iter()
        .enumerate()
        .filter(|(_, p)| {
            query_lower.is_empty()
                || p.title.to_lowercase().contains(&query_lower)
                || p.description.to_lowercase().contains(&query_lower)
        })
        .map(|(i, _)| i)
        .collect()
}

impl ProjectsView {
    pub fn apply_filters(&mut self) {
        self.filtered_indices = matching_indices(&self.projects, &self.search_query);

        // Lightbox can't point at a project the search just hid
        if let Some(selected) = self.selected {
            if !self.filtered_indices.contains(&selected) {
                self.close_lightbox();
            }
        }
    }
}
