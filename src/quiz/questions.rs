use super::{Difficulty, Question};

/// The wildlife conservation quiz, in the order it is asked.
pub fn conservation_quiz() -> Vec<Question> {
    vec![
        Question::new(
            1,
            "Which marine animal is known as the 'panda of the sea'?",
            &["Dolphin", "Vaquita", "Sea Turtle", "Whale"],
            1,
            "The Vaquita is called the 'panda of the sea' due to its distinctive black markings around the eyes and mouth.",
            "Marine",
            Difficulty::Easy,
        ),
        Question::new(
            2,
            "What is the primary threat to Sumatran Orangutans?",
            &["Climate Change", "Deforestation", "Pollution", "Overfishing"],
            1,
            "Deforestation for palm oil plantations and logging is the primary threat to Sumatran Orangutans, destroying their habitat.",
            "Terrestrial",
            Difficulty::Medium,
        ),
        Question::new(
            3,
            "How many California Condors remain in the wild?",
            &["Less than 100", "About 500", "Over 1000", "Around 2000"],
            1,
            "There are approximately 500 California Condors in the wild, making them one of the rarest birds in the world.",
            "Avian",
            Difficulty::Hard,
        ),
        Question::new(
            4,
            "Which endangered animal is only found in Ujung Kulon National Park?",
            &["Sumatran Tiger", "Javan Rhino", "Bornean Elephant", "Malayan Tapir"],
            1,
            "The Javan Rhino is only found in Ujung Kulon National Park in Java, Indonesia, with less than 75 individuals remaining.",
            "Terrestrial",
            Difficulty::Medium,
        ),
        Question::new(
            5,
            "What makes Hawksbill Sea Turtles crucial for coral reef health?",
            &[
                "They eat coral",
                "They clean the reef",
                "They eat sponges",
                "They provide nutrients",
            ],
            2,
            "Hawksbill Sea Turtles eat sponges, which helps maintain coral reef health by preventing sponges from overgrowing corals.",
            "Marine",
            Difficulty::Hard,
        ),
        Question::new(
            6,
            "Which big cat is adapted to cold climates and found in the Russian Far East?",
            &["Siberian Tiger", "Amur Leopard", "Snow Leopard", "Lynx"],
            1,
            "The Amur Leopard is adapted to cold climates and is found in the Russian Far East, with only about 100 individuals remaining.",
            "Terrestrial",
            Difficulty::Medium,
        ),
        Question::new(
            7,
            "What percentage of DNA do humans share with orangutans?",
            &["85%", "90%", "95%", "97%"],
            3,
            "Humans share approximately 97% of their DNA with orangutans, making them one of our closest relatives.",
            "Terrestrial",
            Difficulty::Easy,
        ),
        Question::new(
            8,
            "Which conservation method has been most successful for California Condors?",
            &["Habitat Protection", "Captive Breeding", "Anti-Poaching Laws", "Public Education"],
            1,
            "Captive breeding programs have been the most successful conservation method for California Condors, helping increase their population from just 22 birds in 1982.",
            "Avian",
            Difficulty::Medium,
        ),
    ]
}
