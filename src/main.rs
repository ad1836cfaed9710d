use std::sync::Arc;

use chrono::Utc;
use teloxide::{
    dispatching::dialogue::{serializer::Json, ErasedStorage, SqliteStorage, Storage},
    prelude::*,
    types::{KeyboardButton, KeyboardMarkup},
};
use wildlife_bot::{
    catalog::{
        animals::{self, Animal, AnimalCategory, AnimalCriteria, ConservationStatus},
        filter, SortKey,
    },
    commands::{self, AnimalInput, MenuChoice, QuizInput, ShopInput},
    config::Config,
    quiz::{questions::conservation_quiz, Question, QuizPhase, QuizSession},
    shop::{conservation_products, Cart, Product, ProductCategory, ProductCriteria},
    views, EngineError,
};

type ChatDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    MainMenu,
    BrowseAnimals {
        criteria: AnimalCriteria,
    },
    Quiz {
        session: QuizSession,
    },
    Shop {
        criteria: ProductCriteria,
        cart: Cart,
    },
}

type ChatStorage = Arc<ErasedStorage<State>>;

/// Static data every chat reads from.
struct Content {
    animals: Vec<Animal>,
    products: Vec<Product>,
    questions: Vec<Question>,
    config: Config,
}

#[tokio::main]
async fn main() {
    // .env may set RUST_LOG, so it is loaded before the logger starts
    let dotenv_loaded = dotenv::dotenv();
    pretty_env_logger::init();
    if let Err(err) = dotenv_loaded {
        log::debug!("No .env file loaded: {}", err);
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Invalid configuration: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = run(config).await {
        log::error!("Bot stopped: {}", err);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> HandlerResult {
    log::info!("Starting wildlife conservation bot...");

    let bot = Bot::from_env();

    log::info!("Opening dialogue storage at {}", config.database_path);
    let storage: ChatStorage = SqliteStorage::open(&config.database_path, Json)
        .await?
        .erase();

    let content = Arc::new(Content {
        animals: animals::endangered_animals(),
        products: conservation_products(),
        questions: conservation_quiz(),
        config,
    });
    log::info!(
        "Loaded {} animals, {} products and {} quiz questions",
        content.animals.len(),
        content.products.len(),
        content.questions.len()
    );

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::MainMenu].endpoint(receive_menu_choice))
            .branch(dptree::case![State::BrowseAnimals { criteria }].endpoint(browse_animals))
            .branch(dptree::case![State::Quiz { session }].endpoint(quiz))
            .branch(dptree::case![State::Shop { criteria, cart }].endpoint(shop)),
    )
    .dependencies(dptree::deps![storage, content])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;

    Ok(())
}

async fn start(bot: Bot, dialogue: ChatDialogue, msg: Message) -> HandlerResult {
    show_menu(&bot, &dialogue, msg.chat.id, views::GREETING).await
}

async fn receive_menu_choice(
    bot: Bot,
    dialogue: ChatDialogue,
    content: Arc<Content>,
    msg: Message,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    match msg.text().and_then(MenuChoice::parse) {
        Some(MenuChoice::ExploreAnimals) => {
            show_animals(&bot, &dialogue, &content, chat_id, AnimalCriteria::default()).await
        }
        Some(MenuChoice::TakeQuiz) => start_quiz(&bot, &dialogue, &content, chat_id).await,
        Some(MenuChoice::Shop) => {
            let criteria = ProductCriteria::default();
            show_products(&bot, &dialogue, &content, chat_id, criteria, Cart::new()).await
        }
        Some(MenuChoice::DidYouKnow) => {
            let text = {
                let mut rng = rand::thread_rng();
                animals::random_fact(&content.animals, &mut rng)
                    .map(|(animal, fact)| views::fact(animal, fact))
            };
            let text = text.unwrap_or_else(|| "No facts to share yet.".to_string());
            bot.send_message(chat_id, text)
                .reply_markup(menu_keyboard())
                .await?;
            Ok(())
        }
        None => {
            bot.send_message(chat_id, "Please choose one of the options")
                .reply_markup(menu_keyboard())
                .await?;
            Ok(())
        }
    }
}

async fn browse_animals(
    bot: Bot,
    dialogue: ChatDialogue,
    criteria: AnimalCriteria,
    content: Arc<Content>,
    msg: Message,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, "Please type a name to search for, or use the buttons")
            .await?;
        return Ok(());
    };

    match AnimalInput::parse(&criteria, text) {
        AnimalInput::Filter(criteria) => {
            show_animals(&bot, &dialogue, &content, msg.chat.id, criteria).await
        }
        AnimalInput::BackToMenu => {
            show_menu(&bot, &dialogue, msg.chat.id, "What would you like to do next?").await
        }
    }
}

async fn quiz(
    bot: Bot,
    dialogue: ChatDialogue,
    session: QuizSession,
    msg: Message,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let Some(text) = msg.text() else {
        bot.send_message(chat_id, "Please answer using the buttons")
            .reply_markup(quiz_keyboard(&session))
            .await?;
        return Ok(());
    };
    let now = Utc::now();

    match QuizInput::parse(&session, text) {
        QuizInput::Answer(option) => match session.submit_answer(option) {
            Ok(answered) => {
                bot.send_message(chat_id, views::answer_feedback(&answered))
                    .reply_markup(quiz_keyboard(&answered))
                    .await?;
                dialogue.update(State::Quiz { session: answered }).await?;
                Ok(())
            }
            Err(err) => reject_quiz_input(&bot, chat_id, &session, err).await,
        },
        QuizInput::Next => match session.advance(now) {
            Ok(next) if next.is_completed() => finish_quiz(&bot, &dialogue, chat_id, next).await,
            Ok(next) => ask_question(&bot, &dialogue, chat_id, next).await,
            Err(err) => reject_quiz_input(&bot, chat_id, &session, err).await,
        },
        QuizInput::Restart => {
            log::debug!("Chat {} restarted the quiz", chat_id);
            ask_question(&bot, &dialogue, chat_id, session.restart(now)).await
        }
        QuizInput::BackToMenu => {
            show_menu(&bot, &dialogue, chat_id, "What would you like to do next?").await
        }
        QuizInput::Unrecognized => {
            bot.send_message(chat_id, "Please choose one of the options")
                .reply_markup(quiz_keyboard(&session))
                .await?;
            Ok(())
        }
    }
}

async fn shop(
    bot: Bot,
    dialogue: ChatDialogue,
    (criteria, cart): (ProductCriteria, Cart),
    content: Arc<Content>,
    msg: Message,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let Some(text) = msg.text() else {
        bot.send_message(chat_id, "Please type what you are looking for, or use the buttons")
            .await?;
        return Ok(());
    };

    match ShopInput::parse(&criteria, text) {
        ShopInput::Filter(criteria) => {
            show_products(&bot, &dialogue, &content, chat_id, criteria, cart).await
        }
        ShopInput::Add(product_id) => {
            match content.products.iter().find(|p| p.id == product_id) {
                Some(product) if product.in_stock => match cart.add_item(product) {
                    Ok(cart) => {
                        let text = format!(
                            "Added {} to your cart. {} item(s), {} in total.",
                            product.name,
                            cart.item_count(),
                            cart.total()
                        );
                        update_shop(&bot, &dialogue, chat_id, text, criteria, cart).await
                    }
                    Err(err) => {
                        log::warn!("Chat {}: rejected cart change: {}", chat_id, err);
                        let text = format!("Hmm, {}.", err);
                        update_shop(&bot, &dialogue, chat_id, text, criteria, cart).await
                    }
                },
                Some(product) => {
                    let text = format!("Sorry, {} is out of stock.", product.name);
                    update_shop(&bot, &dialogue, chat_id, text, criteria, cart).await
                }
                None => {
                    let text = format!("There is no product #{}.", product_id);
                    update_shop(&bot, &dialogue, chat_id, text, criteria, cart).await
                }
            }
        }
        ShopInput::Increase(product_id) => {
            let wanted = quantity_in(&cart, product_id) + 1;
            change_quantity(&bot, &dialogue, chat_id, criteria, cart, product_id, wanted).await
        }
        ShopInput::Decrease(product_id) => {
            let wanted = quantity_in(&cart, product_id) - 1;
            change_quantity(&bot, &dialogue, chat_id, criteria, cart, product_id, wanted).await
        }
        ShopInput::Remove(product_id) => {
            let cart = cart.remove_item(product_id);
            let text = views::cart(&cart);
            update_shop(&bot, &dialogue, chat_id, text, criteria, cart).await
        }
        ShopInput::ShowCart => {
            let text = views::cart(&cart);
            update_shop(&bot, &dialogue, chat_id, text, criteria, cart).await
        }
        ShopInput::BackToMenu => {
            show_menu(&bot, &dialogue, chat_id, "Thanks for supporting conservation!").await
        }
    }
}

async fn show_menu(
    bot: &Bot,
    dialogue: &ChatDialogue,
    chat_id: ChatId,
    text: &str,
) -> HandlerResult {
    bot.send_message(chat_id, text)
        .reply_markup(menu_keyboard())
        .await?;
    dialogue.update(State::MainMenu).await?;
    Ok(())
}

async fn show_animals(
    bot: &Bot,
    dialogue: &ChatDialogue,
    content: &Content,
    chat_id: ChatId,
    criteria: AnimalCriteria,
) -> HandlerResult {
    let text = views::animal_list(
        &filter(&content.animals, &criteria),
        &criteria,
        content.config.max_results,
    );
    bot.send_message(chat_id, text)
        .reply_markup(animal_keyboard())
        .await?;
    dialogue.update(State::BrowseAnimals { criteria }).await?;
    Ok(())
}

async fn start_quiz(
    bot: &Bot,
    dialogue: &ChatDialogue,
    content: &Content,
    chat_id: ChatId,
) -> HandlerResult {
    match QuizSession::new(content.questions.clone(), Utc::now()) {
        Ok(session) => {
            log::info!("Chat {} started the quiz", chat_id);
            ask_question(bot, dialogue, chat_id, session).await
        }
        Err(err) => {
            log::error!("Cannot start the quiz: {}", err);
            show_menu(bot, dialogue, chat_id, "The quiz is not available right now.").await
        }
    }
}

async fn ask_question(
    bot: &Bot,
    dialogue: &ChatDialogue,
    chat_id: ChatId,
    session: QuizSession,
) -> HandlerResult {
    bot.send_message(chat_id, views::question(&session, Utc::now()))
        .reply_markup(quiz_keyboard(&session))
        .await?;
    dialogue.update(State::Quiz { session }).await?;
    Ok(())
}

async fn finish_quiz(
    bot: &Bot,
    dialogue: &ChatDialogue,
    chat_id: ChatId,
    session: QuizSession,
) -> HandlerResult {
    let result = session.compute_result()?;
    log::info!(
        "Chat {} finished the quiz: {}/{} in {}s, {} badge(s)",
        chat_id,
        result.correct_answers,
        result.total_questions,
        result.elapsed_seconds,
        result.badges.len()
    );

    bot.send_message(chat_id, views::quiz_result(&result))
        .reply_markup(quiz_keyboard(&session))
        .await?;
    dialogue.update(State::Quiz { session }).await?;
    Ok(())
}

// The session is unchanged, so the stored state stays as it was.
async fn reject_quiz_input(
    bot: &Bot,
    chat_id: ChatId,
    session: &QuizSession,
    err: EngineError,
) -> HandlerResult {
    log::warn!("Chat {}: rejected quiz input: {}", chat_id, err);
    bot.send_message(chat_id, format!("Hmm, {}.", err))
        .reply_markup(quiz_keyboard(session))
        .await?;
    Ok(())
}

async fn show_products(
    bot: &Bot,
    dialogue: &ChatDialogue,
    content: &Content,
    chat_id: ChatId,
    criteria: ProductCriteria,
    cart: Cart,
) -> HandlerResult {
    let text = views::product_list(
        &filter(&content.products, &criteria),
        &criteria,
        content.config.max_results,
    );
    update_shop(bot, dialogue, chat_id, text, criteria, cart).await
}

fn quantity_in(cart: &Cart, product_id: u32) -> i64 {
    cart.line(product_id)
        .map(|line| i64::from(line.quantity))
        .unwrap_or(0)
}

async fn change_quantity(
    bot: &Bot,
    dialogue: &ChatDialogue,
    chat_id: ChatId,
    criteria: ProductCriteria,
    cart: Cart,
    product_id: u32,
    quantity: i64,
) -> HandlerResult {
    match cart.set_quantity(product_id, quantity) {
        Ok(cart) => {
            let text = views::cart(&cart);
            update_shop(bot, dialogue, chat_id, text, criteria, cart).await
        }
        Err(err) => {
            log::warn!("Chat {}: rejected cart change: {}", chat_id, err);
            let text = match err {
                EngineError::UnknownCartLine(_) => {
                    format!("Hmm, {}. Add it first with \"add {}\".", err, product_id)
                }
                _ => format!("Hmm, {}.", err),
            };
            update_shop(bot, dialogue, chat_id, text, criteria, cart).await
        }
    }
}

async fn update_shop(
    bot: &Bot,
    dialogue: &ChatDialogue,
    chat_id: ChatId,
    text: String,
    criteria: ProductCriteria,
    cart: Cart,
) -> HandlerResult {
    bot.send_message(chat_id, text)
        .reply_markup(shop_keyboard(&cart))
        .await?;
    dialogue.update(State::Shop { criteria, cart }).await?;
    Ok(())
}

fn buttons<I, S>(labels: I) -> Vec<KeyboardButton>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    labels.into_iter().map(KeyboardButton::new).collect()
}

fn menu_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        buttons([commands::EXPLORE_ANIMALS, commands::TAKE_QUIZ]),
        buttons([commands::VISIT_SHOP, commands::DID_YOU_KNOW]),
    ])
    .resize_keyboard(true)
}

fn animal_keyboard() -> KeyboardMarkup {
    let categories = AnimalCategory::ALL
        .iter()
        .map(AnimalCategory::label)
        .chain([commands::ALL_CATEGORIES]);
    let statuses = ConservationStatus::ALL
        .iter()
        .map(ConservationStatus::label)
        .collect::<Vec<_>>();

    KeyboardMarkup::new(vec![
        buttons(categories),
        buttons(statuses[..2].to_vec()),
        buttons(statuses[2..].iter().copied().chain([commands::ALL_STATUSES])),
        buttons([commands::CLEAR_SEARCH, commands::BACK_TO_MENU]),
    ])
    .resize_keyboard(true)
}

fn quiz_keyboard(session: &QuizSession) -> KeyboardMarkup {
    let rows = match session.phase() {
        QuizPhase::AwaitingAnswer(_) => session
            .current_question()
            .options
            .iter()
            .map(|option| vec![KeyboardButton::new(option.clone())])
            .chain([buttons([commands::BACK_TO_MENU])])
            .collect::<Vec<_>>(),
        QuizPhase::Answered { .. } => vec![buttons([commands::NEXT_QUESTION])],
        QuizPhase::Completed => vec![buttons([commands::TAKE_QUIZ_AGAIN, commands::BACK_TO_MENU])],
    };
    KeyboardMarkup::new(rows).resize_keyboard(true)
}

fn shop_keyboard(cart: &Cart) -> KeyboardMarkup {
    let cart_label = if cart.is_empty() {
        commands::SHOW_CART.to_string()
    } else {
        format!("{} ({})", commands::SHOW_CART, cart.item_count())
    };
    let (first, rest) = ProductCategory::ALL.split_at(3);

    KeyboardMarkup::new(vec![
        buttons(first.iter().map(ProductCategory::label)),
        buttons(rest.iter().map(ProductCategory::label).chain([commands::ALL_CATEGORIES])),
        buttons(SortKey::LABELS.iter().map(|label| commands::sort_label(label))),
        buttons([commands::CLEAR_SEARCH, commands::ALL_TAGS]),
        vec![
            KeyboardButton::new(cart_label),
            KeyboardButton::new(commands::BACK_TO_MENU),
        ],
    ])
    .resize_keyboard(true)
}
