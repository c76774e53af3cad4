use rand::SeedableRng;
use rand::rngs::StdRng;

use unohub::deck::{flip_dual, full_deck};
use unohub::{Card, Color, Face, Game, GameError, GameEvent, Mode, Opponent, Seat, Side, Value};

fn dual(front: (Color, Value), back: (Color, Value)) -> Card {
    Card::dual(Face::new(front.0, front.1), Face::new(back.0, back.1))
}

fn stacked(p1: &[Card], p2: &[Card], top: Card, draws: &[Card]) -> Vec<Card> {
    assert_eq!(p1.len(), p2.len());
    let mut deck = draws.to_vec();
    deck.push(top);
    for i in (0..p1.len()).rev() {
        deck.push(p2[i]);
        deck.push(p1[i]);
    }
    deck
}

#[test]
fn flip_deck_is_all_dual_with_dark_backs() {
    let mut rng = StdRng::seed_from_u64(9);
    let deck = full_deck(Mode::Flip, &mut rng);
    assert_eq!(deck.len(), 56);
    for card in &deck {
        assert!(card.is_dual());
        let back = card.face(Side::Back);
        assert!(matches!(
            back.color,
            Color::Pink | Color::Teal | Color::Orange | Color::Purple
        ));
        assert_ne!(back.value, Value::Flip);
    }
}

#[test]
fn flip_back_is_a_small_numeral() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..50 {
        let card = flip_dual(Face::new(Color::Green, Value::Flip), &mut rng);
        let n = card.face(Side::Back).value.number();
        assert!(n.is_some_and(|n| (1..=7).contains(&n)));
    }
}

#[test]
fn playing_flip_turns_the_table_over() -> Result<(), GameError> {
    let p1 = [
        dual((Color::Green, Value::Flip), (Color::Teal, Value::Number(4))),
        dual((Color::Red, Value::Number(1)), (Color::Pink, Value::Number(6))),
    ];
    let p2 = [
        dual((Color::Red, Value::Number(3)), (Color::Teal, Value::Number(2))),
        dual((Color::Green, Value::Number(8)), (Color::Orange, Value::Number(9))),
    ];
    let top = dual((Color::Green, Value::Number(5)), (Color::Purple, Value::Number(5)));
    let draws = vec![dual((Color::Yellow, Value::Number(2)), (Color::Pink, Value::Number(1))); 6];
    let mut game = Game::builder(Mode::Flip)
        .with_deck(stacked(&p1, &p2, top, &draws))
        .with_hand_size(2)
        .with_opponent(Opponent::Local)
        .build()?;

    assert_eq!(game.side(), Side::Front);
    let outcome = game.play(Seat::P1, 0)?;
    assert_eq!(game.side(), Side::Back);
    assert_eq!(outcome.face, Face::new(Color::Teal, Value::Number(4)));
    assert_eq!(game.top_face(), Face::new(Color::Teal, Value::Number(4)));
    assert_eq!(game.turn(), Seat::P2);
    assert!(
        game.history()
            .any(|e| *e == GameEvent::SideFlipped { side: Side::Back })
    );

    // Back faces now decide legality: teal 2 matches, green 8 (orange 9 underneath) does not.
    assert_eq!(game.legal_plays(Seat::P2), vec![0]);
    game.check_conservation()
}

#[test]
fn flip_value_in_other_modes_does_not_flip() -> Result<(), GameError> {
    let p1 = [Card::single(Color::Green, Value::Flip), Card::single(Color::Red, Value::Number(1))];
    let p2 = [Card::single(Color::Blue, Value::Number(1)); 2];
    let top = Card::single(Color::Green, Value::Number(5));
    let mut game = Game::builder(Mode::Classic)
        .with_deck(stacked(&p1, &p2, top, &[top; 4]))
        .with_hand_size(2)
        .with_opponent(Opponent::Local)
        .build()?;

    game.play(Seat::P1, 0)?;
    assert_eq!(game.side(), Side::Front);
    Ok(())
}
