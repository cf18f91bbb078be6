//! End-to-end widget scenarios through the mock page

#![allow(clippy::unwrap_used, clippy::panic)]

use rand::rngs::StdRng;
use rand::SeedableRng;
use surprise_calc::prelude::*;
use surprise_calc::wasm::ids;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG=surprise_calc=debug` shows the widget's logs for a failing run
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn page(storage: &MemoryStorage, seed: u64) -> WasmDriver {
    init_tracing();
    WasmDriver::with_app(CalculatorApp::with_rng(
        storage.clone(),
        CalculatorConfig::default(),
        StdRng::seed_from_u64(seed),
    ))
}

#[test]
fn scenario_addition_is_recorded_and_persisted() {
    let storage = MemoryStorage::new();
    let mut page = page(&storage, 1);

    for id in ["btn-1", "btn-2", "btn-add", "btn-3", "btn-calculate"] {
        page.click(id);
    }

    assert_eq!(page.display_text(), "15");
    assert_eq!(page.history_items(), vec!["12+3 = 15"]);
    assert_eq!(
        storage.get_item("calculatorHistory").unwrap().as_deref(),
        Some(r#"["12+3 = 15"]"#)
    );
}

#[test]
fn scenario_percentage_replaces_buffer() {
    let mut page = page(&MemoryStorage::new(), 1);
    page.type_keys("50");
    page.click("btn-percentage");
    assert_eq!(page.display_text(), "0.5");
    assert_eq!(page.expression_text(), "0.5");
    assert!(page.history_items().is_empty());
}

#[test]
fn scenario_exact_tie_rounds_up() {
    let mut page = page(&MemoryStorage::new(), 1);
    page.click("btn-1");
    page.click("btn-divide");
    page.type_keys("2048");
    page.press_key("Enter");
    assert_eq!(page.display_text(), "0.0004882813");
    assert_eq!(page.history_items(), vec!["1/2048 = 0.0004882813"]);
}

#[test]
fn scenario_sine_of_zero() {
    let mut page = page(&MemoryStorage::new(), 1);
    page.click("btn-sin");
    page.click("btn-0");
    page.click("btn-right-parenthesis");
    page.click("btn-calculate");
    assert_eq!(page.display_text(), "0");
    assert_eq!(page.history_items(), vec!["sin(0) = 0"]);
}

#[test]
fn scenario_number_game_too_much() {
    let mut page = page(&MemoryStorage::new(), 99);
    page.type_keys("561234");

    assert!(!page.is_overlay_hidden(Overlay::Game));
    assert!(page.app().is_popup_active());
    assert_eq!(
        page.game_message(),
        "I made a number from 1 to 100. Try to guess!"
    );
    let Some(GameSession::NumberGuess { secret }) = page.app().game().cloned() else {
        panic!("expected number game");
    };
    assert!((1..=100).contains(&secret));

    page.type_game_input("150");
    page.click(ids::GAME_BUTTON);
    assert_eq!(page.game_message(), "Too much. Try again!");

    // Calculator input is ignored while the game is up
    page.click("btn-9");
    page.press_key("9");
    assert_eq!(page.expression_text(), "561234");
}

#[test]
fn scenario_zeroes_play_greeting_then_reset() {
    let mut page = page(&MemoryStorage::new(), 1);
    page.type_keys("70000");
    assert_eq!(page.display_text(), "Hello!");
    assert_eq!(page.expression_text(), "70000");

    page.advance(2000);
    assert_eq!(page.display_text(), "I'm a calculator");
    page.advance(2000);
    assert_eq!(page.display_text(), "with surprises :)");
    page.advance(2000);
    assert_eq!(page.display_text(), "0");
    assert_eq!(page.expression_text(), "");
    assert!(page.app().scheduler().is_idle());
}

#[test]
fn scenario_error_then_recovery() {
    let mut page = page(&MemoryStorage::new(), 1);
    page.type_keys("5");
    page.click("btn-add");
    page.click("btn-calculate");
    assert_eq!(page.display_text(), "Error");
    assert_eq!(page.expression_text(), "5+");

    page.type_keys("5");
    page.press_key("Enter");
    assert_eq!(page.display_text(), "10");
    assert_eq!(page.history_items(), vec!["5+5 = 10"]);
}

#[test]
fn scenario_history_eviction_and_reload() {
    let storage = MemoryStorage::new();
    {
        let mut page = page(&storage, 1);
        for i in 0..11 {
            page.type_keys(&i.to_string());
            page.press_key("Enter");
            page.click("btn-clear");
        }
        let items = page.history_items();
        assert_eq!(items.len(), 10);
        assert_eq!(items[0], "1 = 1");
        assert_eq!(items[9], "10 = 10");
    }

    let mut reloaded = page(&storage, 2);
    assert_eq!(reloaded.history_items().len(), 10);

    reloaded.press_key("h");
    reloaded.click(ids::CLEAR_HISTORY);
    reloaded.click(ids::CLOSE_HISTORY);
    assert!(!storage.contains_key("calculatorHistory"));
    assert!(page(&storage, 3).history_items().is_empty());
}

#[test]
fn scenario_malformed_history_loads_empty() {
    let mut storage = MemoryStorage::new();
    storage.set_item("calculatorHistory", "not json").unwrap();
    let page = page(&storage, 1);
    assert!(page.history_items().is_empty());
    assert_eq!(page.display_text(), "0");
}

#[test]
fn scenario_math_game_single_answer() {
    let mut page = page(&MemoryStorage::new(), 5);
    page.type_keys("4321");
    let Some(GameSession::Multiplication { left, right, .. }) = page.app().game().cloned() else {
        panic!("expected multiplication game");
    };

    page.type_game_input("0");
    page.click(ids::GAME_BUTTON);
    assert_eq!(
        page.game_message(),
        format!("Wrong. Right answer: {}", left * right)
    );

    page.type_game_input(&(left * right).to_string());
    page.click(ids::GAME_BUTTON);
    assert_eq!(
        page.game_message(),
        format!("Wrong. Right answer: {}", left * right)
    );

    page.click(ids::CLOSE_GAME);
    page.advance(300);
    assert!(page.is_overlay_hidden(Overlay::Game));
    assert!(page.app().game().is_none());
}

#[test]
fn scenario_game_gate_blocks_codes() {
    let mut page = page(&MemoryStorage::new(), 1);
    page.type_keys("1234");
    // Keys typed while the game is open neither reach the calculator nor
    // the detector
    page.type_keys("0000");
    assert_eq!(page.display_text(), "1234");
    assert_eq!(page.app().scheduler().pending(), 1);
}
