//! Index-based time selector

use crate::model::Reading;

/// One entry in the selector: the reading's timestamp and its position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorOption {
    pub label: String,
    pub index: usize,
}

/// Discrete selector over the reading sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeSelector {
    options: Vec<SelectorOption>,
    selected: Option<usize>,
}

impl TimeSelector {
    /// One option per reading, in reading order. Nothing is selected yet.
    pub fn build(readings: &[Reading]) -> Self {
        Self {
            options: readings
                .iter()
                .enumerate()
                .map(|(index, r)| SelectorOption {
                    label: r.timestamp.clone(),
                    index,
                })
                .collect(),
            selected: None,
        }
    }

    pub fn options(&self) -> &[SelectorOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Label of the selected option
    pub fn selected_label(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.options.get(i))
            .map(|o| o.label.as_str())
    }

    /// Mark `index` selected; returns false if there is no such option
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.options.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_options() {
        let readings = vec![
            Reading::new("2024-01-01T00:00", [("s1", 1.0)]),
            Reading::new("2024-01-01T01:00", [("s1", 2.0)]),
            Reading::new("2024-01-01T02:00", [("s1", 3.0)]),
        ];
        let selector = TimeSelector::build(&readings);

        assert_eq!(selector.len(), 3);
        assert_eq!(selector.selected(), None);
        assert_eq!(selector.options()[1].label, "2024-01-01T01:00");
        let indices: Vec<usize> = selector.options().iter().map(|o| o.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_select_bounds() {
        let readings = vec![Reading::new("t0", [("s1", 1.0)]), Reading::new("t1", [("s1", 2.0)])];
        let mut selector = TimeSelector::build(&readings);

        assert!(selector.select(1));
        assert_eq!(selector.selected_label(), Some("t1"));
        assert!(!selector.select(2));
        assert_eq!(selector.selected(), Some(1));
    }

    #[test]
    fn test_empty() {
        let mut selector = TimeSelector::build(&[]);
        assert!(selector.is_empty());
        assert!(!selector.select(0));
        assert_eq!(selector.selected_label(), None);
    }
}
