//! Property tests for the catalog, quiz and cart engines.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use wildlife_bot::catalog::animals::{
    endangered_animals, AnimalCategory, AnimalCriteria, ConservationStatus,
};
use wildlife_bot::catalog::{filter, Selector, SortField, SortKey};
use wildlife_bot::quiz::questions::conservation_quiz;
use wildlife_bot::quiz::{Badge, QuizSession};
use wildlife_bot::shop::{conservation_products, Cart, Money, ProductCategory, ProductCriteria};

fn any_sort_key() -> impl Strategy<Value = SortKey> {
    let field = prop_oneof![
        Just(SortField::Price),
        Just(SortField::Rating),
        Just(SortField::Reviews)
    ];
    prop_oneof![
        Just(SortKey::Featured),
        field.clone().prop_map(SortKey::Ascending),
        field.prop_map(SortKey::Descending),
    ]
}

fn any_product_criteria() -> impl Strategy<Value = ProductCriteria> {
    let category = prop_oneof![
        Just(Selector::All),
        proptest::sample::select(ProductCategory::ALL.to_vec()).prop_map(Selector::Only),
    ];
    let tag = prop_oneof![
        Just(Selector::All),
        proptest::sample::select(vec!["Recycled", "Educational", "Warm", "Nope"])
            .prop_map(|t| Selector::Only(t.to_string())),
    ];
    let query = proptest::sample::select(vec!["", "e", "ECO", "book", "wildlife", "zebra"]);

    (query, category, tag, any_sort_key()).prop_map(|(query, category, status, sort)| {
        ProductCriteria {
            query: query.to_string(),
            category,
            status,
            sort,
        }
    })
}

fn any_animal_criteria() -> impl Strategy<Value = AnimalCriteria> {
    let category = prop_oneof![
        Just(Selector::All),
        proptest::sample::select(AnimalCategory::ALL.to_vec()).prop_map(Selector::Only),
    ];
    let status = prop_oneof![
        Just(Selector::All),
        proptest::sample::select(ConservationStatus::ALL.to_vec()).prop_map(Selector::Only),
    ];
    let query = proptest::sample::select(vec!["", "a", "RHINO", "pongo", "xyz"]);

    (query, category, status).prop_map(|(query, category, status)| AnimalCriteria {
        query: query.to_string(),
        category,
        status,
        sort: SortKey::Featured,
    })
}

#[test]
fn test_default_criteria_return_every_entity_in_order() {
    let animals = endangered_animals();
    let products = conservation_products();

    let all_animals = filter(&animals, &AnimalCriteria::default());
    let all_products = filter(&products, &ProductCriteria::default());

    assert_eq!(
        all_animals.iter().map(|a| a.id).collect::<Vec<_>>(),
        animals.iter().map(|a| a.id).collect::<Vec<_>>()
    );
    assert_eq!(
        all_products.iter().map(|p| p.id).collect::<Vec<_>>(),
        products.iter().map(|p| p.id).collect::<Vec<_>>()
    );
}

#[test]
fn test_full_quiz_walkthrough() {
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let questions = conservation_quiz();
    let mut session = QuizSession::new(questions.clone(), start).unwrap();

    for question in &questions {
        session = session
            .submit_answer(question.correct_option)
            .unwrap()
            .advance(start + Duration::seconds(60))
            .unwrap();
    }

    let result = session.compute_result().unwrap();
    assert_eq!(result.correct_answers, 8);
    assert_eq!(result.max_streak, 8);
    assert_eq!(result.badges.len(), Badge::ALL.len());
}

proptest! {
    #[test]
    fn prop_product_filter_is_idempotent(criteria in any_product_criteria()) {
        let products = conservation_products();
        let once = filter(&products, &criteria);
        let twice = filter(&once, &criteria);

        let once_ids = once.iter().map(|p| p.id).collect::<Vec<_>>();
        let twice_ids = twice.iter().map(|p| p.id).collect::<Vec<_>>();
        prop_assert_eq!(once_ids, twice_ids);
    }

    #[test]
    fn prop_animal_filter_results_satisfy_every_predicate(criteria in any_animal_criteria()) {
        let animals = endangered_animals();
        let query = criteria.query.to_lowercase();

        for animal in filter(&animals, &criteria) {
            prop_assert!(
                animal.name.to_lowercase().contains(&query)
                    || animal.scientific_name.to_lowercase().contains(&query)
            );
            if let Selector::Only(category) = criteria.category {
                prop_assert_eq!(animal.category, category);
            }
            if let Selector::Only(status) = criteria.status {
                prop_assert_eq!(animal.status, status);
            }
        }
    }

    #[test]
    fn prop_score_counts_correct_answers(answers in prop::collection::vec(0usize..4, 8)) {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let questions = conservation_quiz();
        let mut session = QuizSession::new(questions.clone(), start).unwrap();
        let mut previous_max = 0;

        for (question, &answer) in questions.iter().zip(&answers) {
            session = session.submit_answer(answer).unwrap();

            // a repeated submission never scores
            let score = session.score();
            prop_assert!(session.submit_answer(answer).is_err());
            prop_assert_eq!(session.score(), score);

            if answer != question.correct_option {
                prop_assert_eq!(session.streak(), 0);
            }
            prop_assert!(session.streak() <= session.max_streak());
            prop_assert!(session.max_streak() >= previous_max);
            previous_max = session.max_streak();

            session = session.advance(start + Duration::seconds(200)).unwrap();
        }

        let expected = questions
            .iter()
            .zip(&answers)
            .filter(|(question, answer)| question.correct_option == **answer)
            .count() as u32;
        let result = session.compute_result().unwrap();
        prop_assert_eq!(result.correct_answers, expected);
        prop_assert!(!result.badges.contains(&Badge::SpeedDemon));
    }

    #[test]
    fn prop_cart_total_matches_lines(picks in prop::collection::vec(0usize..8, 0..30)) {
        let products = conservation_products();
        let cart = picks
            .iter()
            .try_fold(Cart::new(), |cart, &i| cart.add_item(&products[i]))
            .unwrap();

        let expected: u64 = picks.iter().map(|&i| products[i].price.cents()).sum();
        prop_assert_eq!(cart.total(), Money::from_cents(expected));
        prop_assert_eq!(cart.item_count(), picks.len() as u64);

        // one line per distinct product
        let mut distinct = picks.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(cart.lines().len(), distinct.len());
    }
}
