//! Action execution tests.
//!
//! These tests drive `execute_action` end to end:
//! - The opposite-card/opposite-half rule
//! - Failed actions leaving the battlefield untouched
//! - Dispatch effects visible in the next snapshot

use hexhaven_engine::actions::{execute_action, ActionFailure, ActionRejection, ActionRequest};
use hexhaven_engine::cards::{
    ActionModifier, CardAction, CardId, CardRegistry, CardTemplate, SummonDefinition,
};
use hexhaven_engine::combatants::{Character, CharacterClass, Monster};
use hexhaven_engine::conditions::Condition;
use hexhaven_engine::core::{
    ActionPosition, Battlefield, DeckSide, EntityId, GameRng, HexCoord, RulesConfig,
};
use hexhaven_engine::modifiers::{AttackModifierCard, AttackModifierDeck, CardEffect};
use hexhaven_engine::CombatDispatcher;

const HERO: EntityId = EntityId(0);
const GUARD: EntityId = EntityId(1);

fn registry() -> CardRegistry {
    CardRegistry::from_cards([
        CardTemplate::new(CardId(1), "Overwhelming Assault", CharacterClass::Brute, 1)
            .with_initiative(61)
            .with_top(CardAction::attack(2).with_modifier(ActionModifier::Condition(Condition::Poison)))
            .with_bottom(CardAction::move_(3)),
        CardTemplate::new(CardId(2), "Spare Dagger", CharacterClass::Brute, 1)
            .with_initiative(27)
            .with_top(CardAction::attack(1))
            .with_bottom(CardAction::summon(SummonDefinition::new("Wolf", 4, 1, 2, 0))),
        CardTemplate::new(CardId(3), "Hexing Strike", CharacterClass::Brute, 1)
            .with_initiative(44)
            .with_top(CardAction::attack(1).with_modifier(ActionModifier::Condition(Condition::Curse)))
            .with_bottom(CardAction::move_(1)),
    ])
    .unwrap()
}

/// A deck of plain +0 cards keeps damage predictable.
fn flat_deck() -> AttackModifierDeck {
    AttackModifierDeck::from_piles(vec![AttackModifierCard::add(0); 20], Vec::new())
}

fn battlefield() -> Battlefield {
    let mut hero = Character::new(HERO, "Hero", CharacterClass::Brute, 10, [CardId(1), CardId(2)])
        .at(HexCoord::new(0, 0));
    hero.selected_cards = Some([CardId(1), CardId(2)]);

    Battlefield::new(flat_deck())
        .add(hero)
        .unwrap()
        .add(Monster::new(GUARD, "Bandit Guard", 1, 6, 2).at(HexCoord::new(1, 0)))
        .unwrap()
}

fn run(field: &Battlefield, request: ActionRequest) -> hexhaven_engine::actions::ActionExecution {
    let config = RulesConfig::default();
    let mut rng = GameRng::new(3);
    execute_action(
        field,
        &registry(),
        &CombatDispatcher::new(config.clone()),
        &request,
        &config,
        &mut rng,
    )
    .unwrap()
}

/// Top of one card then bottom of the other is allowed; a third is not.
#[test]
fn test_opposite_action_rule() {
    let field = battlefield();

    let first = run(
        &field,
        ActionRequest::new(HERO, CardId(1), ActionPosition::Top).targeting(GUARD),
    );
    assert!(first.result.success);

    let same_card = run(
        &first.field,
        ActionRequest::new(HERO, CardId(1), ActionPosition::Bottom),
    );
    assert_eq!(
        same_card.result.failure,
        Some(ActionFailure::Rejected(ActionRejection::SameCard))
    );

    let same_half = run(
        &first.field,
        ActionRequest::new(HERO, CardId(2), ActionPosition::Top).targeting(GUARD),
    );
    assert_eq!(
        same_half.result.failure,
        Some(ActionFailure::Rejected(ActionRejection::SamePosition))
    );
    assert_eq!(
        same_half.result.error.as_deref(),
        Some("second action must use the opposite half")
    );

    let second = run(
        &first.field,
        ActionRequest::new(HERO, CardId(2), ActionPosition::Bottom).at_hex(HexCoord::new(0, 1)),
    );
    assert!(second.result.success);

    let third = run(
        &second.field,
        ActionRequest::new(HERO, CardId(1), ActionPosition::Bottom),
    );
    assert_eq!(
        third.result.failure,
        Some(ActionFailure::Rejected(ActionRejection::MaximumActions))
    );
}

/// An attack damages the target and applies its condition.
#[test]
fn test_attack_with_condition() {
    let field = battlefield();
    let out = run(
        &field,
        ActionRequest::new(HERO, CardId(1), ActionPosition::Top).targeting(GUARD),
    );

    let guard = out.field.get(GUARD).unwrap();
    assert_eq!(guard.vitals().health, 4);
    assert!(guard.vitals().conditions.has(Condition::Poison));

    let damage = out.result.damage.unwrap();
    assert_eq!(damage.target, GUARD);
    assert_eq!(damage.damage, 2);
    assert_eq!(out.result.affected_entities, vec![GUARD]);
}

/// Cursing a monster seeds the monster deck; the party keeps drawing clean cards.
#[test]
fn test_curse_on_monster_spares_party() {
    let field = battlefield();
    let mut hero = field.character(HERO).unwrap().clone();
    hero.hand.push_back(CardId(3));
    hero.selected_cards = Some([CardId(3), CardId(2)]);
    let field = field.with_character(hero).unwrap();

    let cursed = run(
        &field,
        ActionRequest::new(HERO, CardId(3), ActionPosition::Top).targeting(GUARD),
    );
    assert!(cursed.result.success);
    assert_eq!(cursed.field.deck(DeckSide::Monsters).count_tagged(CardEffect::Curse), 1);
    assert_eq!(cursed.field.deck(DeckSide::Party).count_tagged(CardEffect::Curse), 0);

    // Next turn, the hero attacks the cursed guard again.
    let mut hero = cursed.field.character(HERO).unwrap().clone();
    hero.executed_actions.clear();
    let field = cursed.field.with_character(hero).unwrap();
    let again = run(
        &field,
        ActionRequest::new(HERO, CardId(2), ActionPosition::Top).targeting(GUARD),
    );

    let damage = again.result.damage.unwrap();
    assert_eq!(damage.applied, AttackModifierCard::add(0));
    assert_eq!(damage.damage, 1);
    let guard = again.field.get(GUARD).unwrap();
    assert_eq!(guard.vitals().health, 4);
    assert!(guard.vitals().conditions.has(Condition::Curse));
}

/// A rejected or failed action returns the input battlefield.
#[test]
fn test_failure_keeps_snapshot() {
    let field = battlefield();

    let unselected = run(&field, ActionRequest::new(HERO, CardId(9), ActionPosition::Top));
    assert!(!unselected.result.success);
    assert_eq!(
        unselected.result.failure,
        Some(ActionFailure::Rejected(ActionRejection::CardNotSelected))
    );

    // Attacking nothing fails in dispatch.
    let no_target = run(&field, ActionRequest::new(HERO, CardId(1), ActionPosition::Top));
    assert_eq!(no_target.result.failure, Some(ActionFailure::Dispatch));
    assert!(no_target.field.character(HERO).unwrap().executed_actions.is_empty());
    assert_eq!(no_target.field.get(GUARD).unwrap().vitals().health, 6);
}

/// A summon action places an owned summon on the requested hex.
#[test]
fn test_summon_is_owned() {
    let field = battlefield();
    let out = run(
        &field,
        ActionRequest::new(HERO, CardId(2), ActionPosition::Bottom).at_hex(HexCoord::new(-1, 0)),
    );

    assert!(out.result.success);
    assert_eq!(out.result.summon_definition.as_ref().map(|d| d.name.as_str()), Some("Wolf"));
    let id = out.result.affected_entities[0];
    let summon = out.field.get(id).unwrap().as_summon().unwrap();
    assert_eq!(summon.owner, Some(HERO));
    assert_eq!(summon.vitals.position, Some(HexCoord::new(-1, 0)));
}

/// Unknown actors are the only hard error.
#[test]
fn test_unknown_actor() {
    let config = RulesConfig::default();
    let err = execute_action(
        &battlefield(),
        &registry(),
        &CombatDispatcher::default(),
        &ActionRequest::new(EntityId(42), CardId(1), ActionPosition::Top),
        &config,
        &mut GameRng::new(1),
    )
    .unwrap_err();
    assert_eq!(err.kind(), hexhaven_engine::ErrorKind::NotFound);
}
