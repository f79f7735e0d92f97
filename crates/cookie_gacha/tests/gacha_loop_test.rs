//! End-to-end tests for the draw and purchase loop.

use std::path::PathBuf;

use cookie_gacha::{
    Balances, Currency, EconomyError, GachaEvent, GachaService, GameConfig, Rarity,
    RewardGenerator, Session,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::sync::Arc;

fn shipped_config_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/economy.toml")
}

fn session_with(coins: u64, gems: u64, seed: u64) -> Session {
    let rules = GameConfig {
        starting_coins: coins,
        starting_gems: gems,
        reveal_delay_ms: 0,
        ..GameConfig::default()
    }
    .validate()
    .unwrap();
    Session::seeded(Arc::new(rules), seed)
}

#[test]
fn test_rarity_distribution_converges() {
    let rules = GameConfig::default().validate().unwrap();
    let generator = RewardGenerator::new(
        Arc::clone(&rules.archetypes),
        rules.rarity.clone(),
        cookie_gacha::CharacterIdAllocator::new(),
    );
    let mut rng = ChaCha20Rng::seed_from_u64(0xC00C1E);

    let stats = generator.run_statistics(&mut rng, 200_000);

    assert_eq!(stats.total, 200_000);
    for rarity in Rarity::ALL {
        let expected = rules.rarity.chance_percent(rarity);
        let observed = stats.frequency_percent(rarity);
        assert!(
            (observed - expected).abs() <= 1.0,
            "{rarity}: observed {observed:.2}%, expected {expected:.2}%"
        );
    }
}

#[test]
fn test_drawn_characters_follow_their_tier() {
    let mut session = session_with(0, 100_000, 11);

    let mut legendary = 0u64;
    while session.can_draw() {
        let character = session.perform_draw().unwrap();
        let template = session
            .rules()
            .archetypes
            .find(character.archetype_id)
            .unwrap();

        assert_eq!(character.stats, template.base_stats.scaled(character.rarity));
        assert!(character.power >= 100);
        assert!(character.power < 100 + character.rarity.scale(1000));
        if character.rarity == Rarity::Legendary {
            legendary += 1;
        }
    }

    assert_eq!(session.collection().len(), 10_000);
    assert_eq!(session.collection().summary().legendary, legendary);
    assert_eq!(session.balances().gems, 0);
}

#[test]
fn test_short_balance_rejects_draw() {
    let mut session = session_with(0, 5, 1);

    let err = session.commit_draw().unwrap_err();

    assert_eq!(
        err,
        EconomyError::InsufficientFunds { currency: Currency::Gems, required: 10, available: 5 }
    );
    assert_eq!(session.balances(), Balances { coins: 0, gems: 5 });
    assert!(session.collection().is_empty());
    assert!(matches!(
        session.drain_events().as_slice(),
        [GachaEvent::DrawRejected { .. }]
    ));
}

#[test]
fn test_exact_balance_draws_once() {
    let mut session = session_with(0, 10, 1);

    let character = session.perform_draw().unwrap();

    assert_eq!(session.balances().gems, 0);
    assert_eq!(session.collection().as_slice(), &[character]);
    assert!(!session.can_draw());
    assert!(session.perform_draw().is_err());
    assert_eq!(session.collection().len(), 1);
}

#[test]
fn test_purchase_is_reproducible() {
    let mut first = session_with(1000, 50, 1);
    let mut second = session_with(1000, 50, 99);

    let a = first.purchase(2).unwrap();
    let b = second.purchase(2).unwrap();

    assert_eq!(a.balances, Balances { coins: 550, gems: 100 });
    assert_eq!(a, b);
}

#[test]
fn test_unknown_item_changes_nothing() {
    let mut session = session_with(1000, 50, 1);

    assert_eq!(session.purchase(42), Err(EconomyError::UnknownItem(42)));
    assert_eq!(session.balances(), Balances { coins: 1000, gems: 50 });
}

#[test]
fn test_seeded_sessions_replay() {
    let mut a = session_with(1000, 50, 2024);
    let mut b = session_with(1000, 50, 2024);

    for _ in 0..5 {
        let x = a.perform_draw().unwrap();
        let y = b.perform_draw().unwrap();
        assert_eq!((x.archetype_id, x.rarity, x.power), (y.archetype_id, y.rarity, y.power));
    }
}

#[test]
fn test_shipped_config_loads() {
    let config = GameConfig::from_file(shipped_config_path()).unwrap();
    let service = GachaService::from_config(config).unwrap();

    let player = service.open_seeded_session(3);
    let state = service.state(player).unwrap();

    assert_eq!(state.balances, Balances { coins: 1000, gems: 50 });
    assert_eq!(service.rules().shop.len(), 4);
    assert_eq!(service.rules().archetypes.len(), 6);
}

#[tokio::test(start_paused = true)]
async fn test_full_loop_through_service() {
    let service = GachaService::from_config(GameConfig::default()).unwrap();
    let player = service.open_seeded_session(7);

    for _ in 0..5 {
        service.request_draw(player).await.unwrap();
    }
    assert!(matches!(
        service.request_draw(player).await,
        Err(EconomyError::InsufficientFunds { .. })
    ));

    let balances = service.request_purchase(player, 3).unwrap();
    assert_eq!(balances, Balances { coins: 200, gems: 100 });

    let closed = service.close_session(player).unwrap();
    assert_eq!(closed.collection.len(), 5);
    assert_eq!(closed.summary.total, 5);
    assert!(matches!(service.state(player), Err(EconomyError::UnknownSession(_))));
}
