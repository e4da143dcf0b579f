//! Turn order tests.
//!
//! These tests verify initiative ordering across the whole battlefield:
//! - Ascending initiative with class tie-breaks
//! - Long rests acting last
//! - Monster groups and summons placement

use hexhaven_engine::cards::{CardId, SummonDefinition};
use hexhaven_engine::combatants::{Character, CharacterClass, CombatantKind, Monster, Summon};
use hexhaven_engine::core::{Battlefield, EntityId, ErrorKind};
use hexhaven_engine::modifiers::AttackModifierDeck;
use hexhaven_engine::turns::{
    build_turn_order, calculate_initiative, determine_turn_order, next_living_entity_index,
    RestDeclaration, TurnEntity,
};
use proptest::prelude::*;

fn entity(id: u32, initiative: u8, class: Option<CharacterClass>) -> TurnEntity {
    let kind = if class.is_some() {
        CombatantKind::Character
    } else {
        CombatantKind::Monster
    };
    let e = TurnEntity::new(EntityId(id), kind, initiative, format!("e{id}"));
    match class {
        Some(class) => e.with_class(class),
        None => e,
    }
}

fn character(id: u32, class: CharacterClass, initiative: u8) -> Character {
    let mut ch = Character::new(EntityId(id), format!("c{id}"), class, 10, [CardId(id)]);
    ch.initiative = Some(initiative);
    ch
}

/// Initiatives [30, 10, 20] act as [10, 20, 30].
#[test]
fn test_ascending_order() {
    let order = determine_turn_order(&[entity(1, 30, None), entity(2, 10, None), entity(3, 20, None)]);
    let initiatives: Vec<_> = order.iter().map(|e| e.initiative).collect();
    assert_eq!(initiatives, vec![10, 20, 30]);
}

/// Two long-resters: Brute before Tinkerer regardless of input order.
#[test]
fn test_long_rest_class_tiebreak() {
    let rest = calculate_initiative(None, None, RestDeclaration::Long).unwrap();
    let order = determine_turn_order(&[
        entity(1, rest, Some(CharacterClass::Tinkerer)),
        entity(2, rest, Some(CharacterClass::Brute)),
        entity(3, 98, None),
    ]);
    let ids: Vec<_> = order.iter().map(|e| e.entity_id.raw()).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

/// Monster and unowned summon initiatives cannot reach the long-rest slot.
#[test]
fn test_long_rest_stays_last_on_battlefield() {
    let rest = calculate_initiative(None, None, RestDeclaration::Long).unwrap();
    let base = Battlefield::new(AttackModifierDeck::standard_unshuffled())
        .add(character(0, CharacterClass::Brute, rest))
        .unwrap();

    let late = base
        .add(Monster::new(EntityId(1), "Bandit Guard", 1, 5, 2).with_initiative(98))
        .unwrap();
    let ids: Vec<_> = build_turn_order(&late)
        .unwrap()
        .iter()
        .map(|e| e.entity_id.raw())
        .collect();
    assert_eq!(ids, vec![1, 0]);

    let too_late = base
        .add(Monster::new(EntityId(1), "Bandit Guard", 1, 5, 2).with_initiative(120))
        .unwrap();
    assert_eq!(build_turn_order(&too_late).unwrap_err().kind(), ErrorKind::Validation);

    let wisp = SummonDefinition::new("Wisp", 2, 1, 2, 0);
    let stray = base
        .add(Summon::new(EntityId(2), None, wisp).with_initiative(99))
        .unwrap();
    assert_eq!(build_turn_order(&stray).unwrap_err().kind(), ErrorKind::Validation);
}

/// Monster standees are grouped by type, elites first.
#[test]
fn test_monster_groups_contiguous() {
    let field = Battlefield::new(AttackModifierDeck::standard_unshuffled())
        .add(character(0, CharacterClass::Scoundrel, 50))
        .unwrap()
        .add(Monster::new(EntityId(1), "Bandit Guard", 2, 5, 2).with_initiative(50))
        .unwrap()
        .add(Monster::new(EntityId(2), "Living Bones", 1, 5, 1).with_initiative(50))
        .unwrap()
        .add(Monster::new(EntityId(3), "Bandit Guard", 1, 5, 2).with_initiative(50))
        .unwrap()
        .add(Monster::new(EntityId(4), "Bandit Guard", 3, 9, 3).elite().with_initiative(50))
        .unwrap();

    let order = build_turn_order(&field).unwrap();
    let ids: Vec<_> = order.iter().map(|e| e.entity_id.raw()).collect();
    assert_eq!(ids, vec![0, 4, 3, 1, 2]);
}

/// Owned summons act right before their owner.
#[test]
fn test_summon_before_owner() {
    let bear = SummonDefinition::new("Bear", 6, 2, 3, 0);
    let field = Battlefield::new(AttackModifierDeck::standard_unshuffled())
        .add(character(0, CharacterClass::BeastTyrant, 20))
        .unwrap()
        .add(character(1, CharacterClass::Brute, 60))
        .unwrap()
        .add(Monster::new(EntityId(2), "Rat", 1, 2, 1).with_initiative(40))
        .unwrap()
        .add(Summon::new(EntityId(3), Some(EntityId(0)), bear.clone()))
        .unwrap()
        .add(Summon::new(EntityId(4), None, bear).with_initiative(55))
        .unwrap();

    let order = build_turn_order(&field).unwrap();
    let ids: Vec<_> = order.iter().map(|e| e.entity_id.raw()).collect();
    assert_eq!(ids, vec![3, 0, 2, 4, 1]);
    assert_eq!(order[0].initiative, 20);
}

/// An active character without an initiative blocks the turn order.
#[test]
fn test_build_requires_initiative() {
    let mut idle = character(0, CharacterClass::Brute, 10);
    idle.initiative = None;
    let field = Battlefield::new(AttackModifierDeck::standard_unshuffled())
        .add(idle)
        .unwrap();
    assert!(build_turn_order(&field).is_err());
}

/// The cursor skips removed entities and reports when none remain.
#[test]
fn test_skip_removed() {
    let order = vec![entity(1, 5, None), entity(2, 6, None), entity(3, 7, None)];
    let removed = [EntityId(2), EntityId(3)];
    let next = next_living_entity_index(&order, 0, |e| removed.contains(&e.entity_id));
    assert_eq!(next, Some(0));
    assert_eq!(next_living_entity_index(&order, 0, |_| true), None);
}

fn class() -> impl Strategy<Value = Option<CharacterClass>> {
    prop_oneof![
        Just(None),
        (0..CharacterClass::ALL.len()).prop_map(|i| Some(CharacterClass::ALL[i])),
    ]
}

proptest! {
    /// Ordering is deterministic, sorted, and a permutation of the input.
    #[test]
    fn prop_turn_order_sorted(entries in prop::collection::vec((1..99u8, class()), 0..20)) {
        let entities: Vec<_> = entries
            .iter()
            .enumerate()
            .map(|(i, (init, class))| entity(i as u32, *init, *class))
            .collect();

        let order = determine_turn_order(&entities);
        prop_assert_eq!(&order, &determine_turn_order(&entities));
        prop_assert_eq!(order.len(), entities.len());

        for pair in order.windows(2) {
            prop_assert!(pair[0].initiative <= pair[1].initiative);
            if pair[0].initiative == pair[1].initiative {
                match (pair[0].character_class, pair[1].character_class) {
                    (Some(a), Some(b)) => prop_assert!(a.turn_priority() <= b.turn_priority()),
                    (None, Some(_)) => prop_assert!(false, "unclassed before classed"),
                    (None, None) => prop_assert!(pair[0].entity_id < pair[1].entity_id),
                    (Some(_), None) => {}
                }
            }
        }
    }
}
