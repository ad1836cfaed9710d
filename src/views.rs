//! Plain-text renderings of engine state for chat replies.

use chrono::{DateTime, Utc};

use crate::catalog::animals::{Animal, AnimalCriteria};
use crate::catalog::FilterCriteria;
use crate::quiz::{QuizResult, QuizSession};
use crate::shop::{Cart, Product, ProductCriteria};

pub const GREETING: &str = "Hi! I'm the wildlife conservation bot 🌍\n\
Learn about endangered animals, test your knowledge and support conservation through our shop.\n\
What would you like to do?";

pub fn animal_list(
    animals: &[&Animal],
    criteria: &AnimalCriteria,
    max_results: usize,
) -> String {
    if animals.is_empty() && criteria.is_active() {
        return "No animals match your search. Try another name or clear the filters.".to_string();
    } else if animals.is_empty() {
        return "There are no animals in the catalog yet.".to_string();
    }

    let mut text = found_header(animals.len(), "animal(s)", criteria);
    for animal in animals.iter().take(max_results) {
        text.push_str(&format!(
            "\n{} {} ({})\n{} · {} · {}\nPopulation: {}\nThreats: {}\n",
            animal.emoji,
            animal.name,
            animal.scientific_name,
            animal.status,
            animal.category.label(),
            animal.location,
            animal.population,
            animal.threats.join(", "),
        ));
    }
    push_truncation_note(&mut text, animals.len(), max_results);
    text
}

pub fn fact(animal: &Animal, fact: &str) -> String {
    format!("Did you know? {} {}: {}", animal.emoji, animal.name, fact)
}

pub fn product_list(
    products: &[&Product],
    criteria: &ProductCriteria,
    max_results: usize,
) -> String {
    if products.is_empty() && criteria.is_active() {
        return "No products match your search. Try another word or clear the filters.".to_string();
    } else if products.is_empty() {
        return "The shop has no products yet.".to_string();
    }

    let mut text = found_header(products.len(), "product(s)", criteria);
    for product in products.iter().take(max_results) {
        let price = match product.original_price {
            Some(original) => format!("{} (was {})", product.price, original),
            None => product.price.to_string(),
        };
        text.push_str(&format!(
            "\n#{} {} {} · {}\n⭐ {:.1} ({} reviews)\n🌱 {}\n",
            product.id,
            product.emoji,
            product.name,
            price,
            product.rating,
            product.reviews,
            product.conservation_impact,
        ));
        if !product.in_stock {
            text.push_str("Out of stock\n");
        }
    }
    push_truncation_note(&mut text, products.len(), max_results);
    text.push_str("\nSend \"add <number>\" to put a product in your cart.");
    text
}

pub fn cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Your cart is empty.".to_string();
    }

    let mut text = format!("Your cart ({} item(s)):\n", cart.item_count());
    for line in cart.lines() {
        text.push_str(&format!(
            "\n#{} {} × {} = {}",
            line.product_id,
            line.name,
            line.quantity,
            line.subtotal()
        ));
    }
    text.push_str(&format!("\n\nTotal: {}", cart.total()));
    text.push_str("\nUse \"+<number>\", \"-<number>\" or \"remove <number>\" to change it.");
    text
}

pub fn question(session: &QuizSession, now: DateTime<Utc>) -> String {
    let question = session.current_question();
    let options = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| format!("{}. {}", i + 1, option))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Question {} of {} ({}%)\nScore: {} · Streak: {} · Time: {}s\n\n[{} · {}]\n{}\n\n{}",
        session.current_index() + 1,
        session.total_questions(),
        session.progress_percent(),
        session.score(),
        session.streak(),
        session.elapsed_seconds(now),
        question.category,
        question.difficulty,
        question.prompt,
        options
    )
}

/// Feedback for the answer just submitted to the current question.
pub fn answer_feedback(session: &QuizSession) -> String {
    let question = session.current_question();
    let verdict = match session.is_correct() {
        Some(true) => "✅ Correct!".to_string(),
        Some(false) => format!(
            "❌ Not quite. The answer is {}.",
            question.correct_answer().unwrap_or("unknown")
        ),
        None => return "Pick one of the options first.".to_string(),
    };

    format!("{}\n\n{}", verdict, question.explanation)
}

pub fn quiz_result(result: &QuizResult) -> String {
    let mut text = format!(
        "Quiz complete! 🏆\n\nCorrect answers: {}/{}\nAccuracy: {}%\nTime taken: {}s\nBest streak: {}",
        result.correct_answers,
        result.total_questions,
        result.accuracy,
        result.elapsed_seconds,
        result.max_streak
    );

    if !result.badges.is_empty() {
        let badges = result
            .badges
            .iter()
            .map(|badge| format!("🏅 {}", badge))
            .collect::<Vec<_>>()
            .join("\n");
        text.push_str(&format!("\n\nBadges earned:\n{}", badges));
    }
    text
}

fn found_header<C, S>(count: usize, noun: &str, criteria: &FilterCriteria<C, S>) -> String {
    if criteria.is_active() {
        format!("Found {} {} matching your filters:\n", count, noun)
    } else {
        format!("Found {} {}:\n", count, noun)
    }
}

fn push_truncation_note(text: &mut String, total: usize, shown: usize) {
    if total > shown {
        text.push_str(&format!("\n…and {} more. Narrow your search to see them.\n", total - shown));
    }
}
