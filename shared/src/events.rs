// Click routing for the race page. The browser layer turns a click into
// `ClickTarget`s and acts on the `ClickAction` returned here.

use crate::session::Category;

/// The parts of a DOM element the click router looks at.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClickTarget {
    pub id: String,
    pub classes: Vec<String>,
}

impl ClickTarget {
    pub fn new(id: impl Into<String>, classes: &str) -> Self {
        Self {
            id: id.into(),
            classes: classes.split_whitespace().map(str::to_owned).collect(),
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn card_category(&self) -> Option<Category> {
        if !self.has_class("card") {
            return None;
        }
        if self.has_class("track") {
            Some(Category::Track)
        } else if self.has_class("racer") {
            Some(Category::Racer)
        } else {
            None
        }
    }
}

/// Which of the two inspected elements a selection applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
    Target,
    Parent,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickAction {
    Select { category: Category, hit: Hit, id: String },
    CreateRace,
    Accelerate,
}

/// Route a click. Cards are matched on the element itself or on its parent so
/// clicks on a card's heading or stats still select it.
pub fn classify(target: &ClickTarget, parent: Option<&ClickTarget>) -> Option<ClickAction> {
    if let Some(category) = target.card_category() {
        return Some(ClickAction::Select {
            category,
            hit: Hit::Target,
            id: target.id.clone(),
        });
    }
    if let Some(parent) = parent {
        if let Some(category) = parent.card_category() {
            return Some(ClickAction::Select {
                category,
                hit: Hit::Parent,
                id: parent.id.clone(),
            });
        }
    }
    match target.id.as_str() {
        "submit-create-race" => Some(ClickAction::CreateRace),
        "gas-peddle" => Some(ClickAction::Accelerate),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_click_selects() {
        let card = ClickTarget::new("3", "card track selected");
        assert_eq!(
            classify(&card, None),
            Some(ClickAction::Select { category: Category::Track, hit: Hit::Target, id: "3".into() })
        );
    }

    #[test]
    fn test_child_click_selects_parent_card() {
        let heading = ClickTarget::new("", "");
        let card = ClickTarget::new("5", "card racer");
        assert_eq!(
            classify(&heading, Some(&card)),
            Some(ClickAction::Select { category: Category::Racer, hit: Hit::Parent, id: "5".into() })
        );
    }

    #[test]
    fn test_buttons() {
        let list = ClickTarget::new("tracks", "");
        assert_eq!(
            classify(&ClickTarget::new("submit-create-race", "btn"), Some(&list)),
            Some(ClickAction::CreateRace)
        );
        assert_eq!(classify(&ClickTarget::new("gas-peddle", ""), None), Some(ClickAction::Accelerate));
    }

    #[test]
    fn test_unrelated_clicks_are_ignored() {
        assert_eq!(classify(&ClickTarget::new("", "card"), None), None);
        assert_eq!(classify(&ClickTarget::new("7", "track"), None), None);
        assert_eq!(classify(&ClickTarget::new("race", ""), Some(&ClickTarget::default())), None);
    }
}
