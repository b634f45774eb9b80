//! TalentBuild - The set of pages chosen for a character

use super::tree::TalentPage;
use super::TalentError;
use serde::{Deserialize, Serialize};

/// Up to `max_pages` distinct talent pages; complete when exactly full
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalentBuild {
    selected_pages: Vec<TalentPage>,
    max_pages: usize,
}

impl Default for TalentBuild {
    fn default() -> Self {
        Self::new(4)
    }
}

impl TalentBuild {
    pub fn new(max_pages: usize) -> Self {
        TalentBuild {
            selected_pages: Vec::new(),
            max_pages,
        }
    }

    /// Add a page to the build
    pub fn select_page(&mut self, page: &TalentPage) -> Result<(), TalentError> {
        if self.selected_pages.len() >= self.max_pages {
            return Err(TalentError::BuildFull(self.max_pages));
        }
        if self.contains(&page.id) {
            return Err(TalentError::DuplicatePage(page.id.clone()));
        }
        self.selected_pages.push(page.clone());
        Ok(())
    }

    /// Remove a page; returns whether it was present
    pub fn remove_page(&mut self, page_id: &str) -> bool {
        let before = self.selected_pages.len();
        self.selected_pages.retain(|p| p.id != page_id);
        self.selected_pages.len() != before
    }

    pub fn reset(&mut self) {
        self.selected_pages.clear();
    }

    pub fn contains(&self, page_id: &str) -> bool {
        self.selected_pages.iter().any(|p| p.id == page_id)
    }

    pub fn selected_pages(&self) -> &[TalentPage] {
        &self.selected_pages
    }

    pub fn is_complete(&self) -> bool {
        self.selected_pages.len() == self.max_pages
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_page(id: &str) -> TalentPage {
        TalentPage {
            id: id.to_string(),
            name: id.to_string(),
            icon: String::new(),
            description: String::new(),
            starting_node: String::new(),
            talent_tree: Vec::new(),
        }
    }

    #[test]
    fn test_complete_at_four_pages() {
        let mut build = TalentBuild::default();
        for id in ["a", "b", "c"] {
            build.select_page(&make_page(id)).unwrap();
            assert!(!build.is_complete());
        }
        build.select_page(&make_page("d")).unwrap();
        assert!(build.is_complete());

        assert_eq!(build.select_page(&make_page("e")), Err(TalentError::BuildFull(4)));
    }

    #[test]
    fn test_duplicate_page_rejected() {
        let mut build = TalentBuild::default();
        build.select_page(&make_page("a")).unwrap();
        assert_eq!(
            build.select_page(&make_page("a")),
            Err(TalentError::DuplicatePage("a".to_string()))
        );
        assert_eq!(build.selected_pages().len(), 1);
    }

    #[test]
    fn test_remove_and_reset() {
        let mut build = TalentBuild::default();
        for id in ["a", "b", "c", "d"] {
            build.select_page(&make_page(id)).unwrap();
        }
        assert!(build.remove_page("b"));
        assert!(!build.remove_page("b"));
        assert!(!build.is_complete());

        build.reset();
        assert!(build.selected_pages().is_empty());
    }
}
