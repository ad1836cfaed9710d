//! Turns chat messages into engine operations.
//!
//! Button labels double as commands, anything else typed while browsing is
//! treated as a search query.

use crate::catalog::animals::{AnimalCategory, AnimalCriteria, ConservationStatus};
use crate::catalog::{Selector, SortKey};
use crate::quiz::QuizSession;
use crate::shop::{ProductCategory, ProductCriteria};

pub const EXPLORE_ANIMALS: &str = "🐾 Explore animals";
pub const TAKE_QUIZ: &str = "🏆 Take the quiz";
pub const VISIT_SHOP: &str = "🛍 Shop";
pub const DID_YOU_KNOW: &str = "💡 Did you know?";
pub const BACK_TO_MENU: &str = "⬅️ Back to menu";

pub const ALL_CATEGORIES: &str = "All categories";
pub const ALL_STATUSES: &str = "All statuses";
pub const ALL_TAGS: &str = "All tags";
pub const CLEAR_SEARCH: &str = "Clear search";

pub const NEXT_QUESTION: &str = "Next question ➡️";
pub const TAKE_QUIZ_AGAIN: &str = "🔄 Take quiz again";

pub const SHOW_CART: &str = "🛒 Cart";
const SORT_PREFIX: &str = "Sort: ";
const TAG_PREFIX: &str = "tag ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ExploreAnimals,
    TakeQuiz,
    Shop,
    DidYouKnow,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 4] = [
        MenuChoice::ExploreAnimals,
        MenuChoice::TakeQuiz,
        MenuChoice::Shop,
        MenuChoice::DidYouKnow,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::ExploreAnimals => EXPLORE_ANIMALS,
            MenuChoice::TakeQuiz => TAKE_QUIZ,
            MenuChoice::Shop => VISIT_SHOP,
            MenuChoice::DidYouKnow => DID_YOU_KNOW,
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|choice| choice.label() == text.trim())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimalInput {
    Filter(AnimalCriteria),
    BackToMenu,
}

impl AnimalInput {
    pub fn parse(criteria: &AnimalCriteria, text: &str) -> Self {
        let text = text.trim();
        let mut next = criteria.clone();

        if text == BACK_TO_MENU {
            return AnimalInput::BackToMenu;
        } else if text == ALL_CATEGORIES {
            next.category = Selector::All;
        } else if text == ALL_STATUSES {
            next.status = Selector::All;
        } else if text == CLEAR_SEARCH {
            next.query.clear();
        } else if let Some(category) = AnimalCategory::from_label(text) {
            next.category = Selector::Only(category);
        } else if let Some(status) = ConservationStatus::from_label(text) {
            next.status = Selector::Only(status);
        } else {
            next.query = text.to_string();
        }

        AnimalInput::Filter(next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizInput {
    Answer(usize),
    Next,
    Restart,
    BackToMenu,
    Unrecognized,
}

impl QuizInput {
    /// Options can be picked by their text or by their 1-based number.
    pub fn parse(session: &QuizSession, text: &str) -> Self {
        let text = text.trim();
        match text {
            NEXT_QUESTION => return QuizInput::Next,
            TAKE_QUIZ_AGAIN => return QuizInput::Restart,
            BACK_TO_MENU => return QuizInput::BackToMenu,
            _ => {}
        }

        if !session.is_completed() {
            let options = &session.current_question().options;
            if let Some(index) = options.iter().position(|option| option == text) {
                return QuizInput::Answer(index);
            }
        }

        match text.parse::<usize>() {
            Ok(number) if number > 0 => QuizInput::Answer(number - 1),
            _ => QuizInput::Unrecognized,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopInput {
    Filter(ProductCriteria),
    Add(u32),
    Increase(u32),
    Decrease(u32),
    Remove(u32),
    ShowCart,
    BackToMenu,
}

impl ShopInput {
    pub fn parse(criteria: &ProductCriteria, text: &str) -> Self {
        let text = text.trim();

        if text == BACK_TO_MENU {
            return ShopInput::BackToMenu;
        }
        // the cart button carries the item count after its label
        if text.starts_with(SHOW_CART) || text.eq_ignore_ascii_case("cart") {
            return ShopInput::ShowCart;
        }
        if let Some(input) = parse_cart_edit(text) {
            return input;
        }

        let mut next = criteria.clone();
        if text == ALL_CATEGORIES {
            next.category = Selector::All;
        } else if text == ALL_TAGS {
            next.status = Selector::All;
        } else if text == CLEAR_SEARCH {
            next.query.clear();
        } else if let Some(category) = ProductCategory::from_label(text) {
            next.category = Selector::Only(category);
        } else if let Some(sort) = text.strip_prefix(SORT_PREFIX).and_then(SortKey::from_label) {
            next.sort = sort;
        } else if let Some(tag) = strip_prefix_ignore_case(text, TAG_PREFIX) {
            next.status = Selector::Only(tag.trim().to_string());
        } else {
            next.query = text.to_string();
        }
        ShopInput::Filter(next)
    }
}

/// Button label for a storefront sort option.
pub fn sort_label(label: &str) -> String {
    format!("{}{}", SORT_PREFIX, label)
}

// `add 3`, `remove 3`, `+3`, `-3`
fn parse_cart_edit(text: &str) -> Option<ShopInput> {
    if let Some(id) = text.strip_prefix('+') {
        return id.trim().parse().ok().map(ShopInput::Increase);
    }
    if let Some(id) = text.strip_prefix('-') {
        return id.trim().parse().ok().map(ShopInput::Decrease);
    }

    let (verb, id) = text.split_once(' ')?;
    let id = id.trim().parse::<u32>().ok()?;
    match verb.to_lowercase().as_str() {
        "add" => Some(ShopInput::Add(id)),
        "remove" => Some(ShopInput::Remove(id)),
        _ => None,
    }
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SortField;
    use crate::quiz::questions::conservation_quiz;
    use chrono::Utc;

    #[test]
    fn test_menu_choices() {
        assert_eq!(MenuChoice::parse(TAKE_QUIZ), Some(MenuChoice::TakeQuiz));
        assert_eq!(MenuChoice::parse(" 🛍 Shop "), Some(MenuChoice::Shop));
        assert_eq!(MenuChoice::parse("hello"), None);
    }

    #[test]
    fn test_animal_buttons_update_criteria() {
        let criteria = AnimalCriteria::default();

        let AnimalInput::Filter(criteria) = AnimalInput::parse(&criteria, "Avian") else {
            panic!("expected a filter");
        };
        assert_eq!(criteria.category, Selector::Only(AnimalCategory::Avian));

        let AnimalInput::Filter(criteria) = AnimalInput::parse(&criteria, "condor") else {
            panic!("expected a filter");
        };
        assert_eq!(criteria.query, "condor");
        assert_eq!(criteria.category, Selector::Only(AnimalCategory::Avian));

        let AnimalInput::Filter(criteria) = AnimalInput::parse(&criteria, "Critically Endangered")
        else {
            panic!("expected a filter");
        };
        assert_eq!(
            criteria.status,
            Selector::Only(ConservationStatus::CriticallyEndangered)
        );

        let AnimalInput::Filter(criteria) = AnimalInput::parse(&criteria, CLEAR_SEARCH) else {
            panic!("expected a filter");
        };
        assert!(criteria.query.is_empty());

        assert_eq!(
            AnimalInput::parse(&criteria, BACK_TO_MENU),
            AnimalInput::BackToMenu
        );
    }

    #[test]
    fn test_quiz_answers_by_text_or_number() {
        let session = QuizSession::new(conservation_quiz(), Utc::now()).unwrap();

        assert_eq!(QuizInput::parse(&session, "Vaquita"), QuizInput::Answer(1));
        assert_eq!(QuizInput::parse(&session, "4"), QuizInput::Answer(3));
        // out of range numbers are left to the engine to reject
        assert_eq!(QuizInput::parse(&session, "9"), QuizInput::Answer(8));
        assert_eq!(QuizInput::parse(&session, "0"), QuizInput::Unrecognized);
        assert_eq!(QuizInput::parse(&session, "Walrus"), QuizInput::Unrecognized);
        assert_eq!(QuizInput::parse(&session, NEXT_QUESTION), QuizInput::Next);
        assert_eq!(QuizInput::parse(&session, TAKE_QUIZ_AGAIN), QuizInput::Restart);
    }

    #[test]
    fn test_shop_cart_edits() {
        let criteria = ProductCriteria::default();

        assert_eq!(ShopInput::parse(&criteria, "add 3"), ShopInput::Add(3));
        assert_eq!(ShopInput::parse(&criteria, "Remove 2"), ShopInput::Remove(2));
        assert_eq!(ShopInput::parse(&criteria, "+1"), ShopInput::Increase(1));
        assert_eq!(ShopInput::parse(&criteria, "- 5"), ShopInput::Decrease(5));
        assert_eq!(ShopInput::parse(&criteria, SHOW_CART), ShopInput::ShowCart);
        assert_eq!(ShopInput::parse(&criteria, "cart"), ShopInput::ShowCart);
        assert_eq!(ShopInput::parse(&criteria, "🛒 Cart (3)"), ShopInput::ShowCart);
    }

    #[test]
    fn test_shop_filters() {
        let criteria = ProductCriteria::default();

        let ShopInput::Filter(criteria) = ShopInput::parse(&criteria, &sort_label("price-high"))
        else {
            panic!("expected a filter");
        };
        assert_eq!(criteria.sort, SortKey::Descending(SortField::Price));

        let ShopInput::Filter(criteria) = ShopInput::parse(&criteria, "Tag Recycled") else {
            panic!("expected a filter");
        };
        assert_eq!(criteria.status, Selector::Only("Recycled".to_string()));

        let ShopInput::Filter(criteria) = ShopInput::parse(&criteria, "Books") else {
            panic!("expected a filter");
        };
        assert_eq!(criteria.category, Selector::Only(ProductCategory::Books));

        // a word that is not a command becomes the search
        let ShopInput::Filter(criteria) = ShopInput::parse(&criteria, "add bottle") else {
            panic!("expected a filter");
        };
        assert_eq!(criteria.query, "add bottle");
        assert_eq!(criteria.sort, SortKey::Descending(SortField::Price));
    }
}
