use unohub::{
    Action, Card, Color, Game, GameError, GameEvent, InvalidAction, Mode, Opponent, Seat, Value,
};

fn card(color: Color, value: Value) -> Card {
    Card::single(color, value)
}

fn num(color: Color, n: u8) -> Card {
    card(color, Value::Number(n))
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

fn table(p1: &[Card], p2: &[Card]) -> Result<Game, GameError> {
    Game::builder(Mode::Classic)
        .with_deck(stacked(p1, p2, num(Color::Red, 5), &[num(Color::Yellow, 8); 10]))
        .with_hand_size(p1.len())
        .with_opponent(Opponent::Local)
        .build()
}

#[test]
fn uno_needs_one_or_two_cards() -> Result<(), GameError> {
    let mut game = table(&[num(Color::Red, 1); 3], &[num(Color::Blue, 1); 3])?;
    assert_eq!(game.call_uno(Seat::P1), Err(InvalidAction::UnoNotAllowed));
    assert!(!game.legal_actions(Seat::P1).contains(&Action::CallUno));

    game.play(Seat::P1, 0)?;
    assert!(game.legal_actions(Seat::P1).contains(&Action::CallUno));
    game.call_uno(Seat::P1)?;
    assert!(game.state().uno_called(Seat::P1));
    assert!(!game.legal_actions(Seat::P1).contains(&Action::CallUno));
    Ok(())
}

#[test]
fn forgotten_uno_costs_two_cards() -> Result<(), GameError> {
    let mut game = table(&[num(Color::Red, 1), num(Color::Red, 2)], &[num(Color::Blue, 1); 2])?;

    game.play(Seat::P1, 0)?;
    assert_eq!(game.state().uno_debt(), Some(Seat::P1));

    game.draw(Seat::P2)?;
    assert_eq!(game.turn(), Seat::P1);
    assert_eq!(game.hand(Seat::P1).len(), 3);
    assert_eq!(game.state().uno_debt(), None);
    assert!(game.history().any(|e| *e
        == GameEvent::UnoPenalty {
            seat: Seat::P1,
            count: 2
        }));
    game.check_conservation()
}

#[test]
fn called_uno_avoids_the_penalty() -> Result<(), GameError> {
    let mut game = table(&[num(Color::Red, 1), num(Color::Red, 2)], &[num(Color::Blue, 1); 2])?;

    game.call_uno(Seat::P1)?;
    game.play(Seat::P1, 0)?;
    assert_eq!(game.state().uno_debt(), None);

    game.draw(Seat::P2)?;
    assert_eq!(game.hand(Seat::P1).len(), 1);
    game.play(Seat::P1, 0)?;
    assert_eq!(game.winner(), Some(Seat::P1));
    Ok(())
}

#[test]
fn last_card_cannot_be_played_without_calling() -> Result<(), GameError> {
    let mut game = table(
        &[card(Color::Red, Value::Skip), num(Color::Red, 1)],
        &[num(Color::Blue, 1); 2],
    )?;

    game.play(Seat::P1, 0)?;
    assert_eq!(game.turn(), Seat::P1);
    assert_eq!(game.play(Seat::P1, 0), Err(InvalidAction::MustCallUno(Seat::P1)));
    assert!(game.legal_plays(Seat::P1).is_empty());

    game.call_uno(Seat::P1)?;
    assert_eq!(game.state().uno_debt(), None);
    game.play(Seat::P1, 0)?;
    assert_eq!(game.winner(), Some(Seat::P1));
    Ok(())
}

#[test]
fn drawing_clears_the_call() -> Result<(), GameError> {
    let mut game = table(&[num(Color::Green, 1), num(Color::Green, 2)], &[num(Color::Blue, 1); 2])?;
    game.call_uno(Seat::P1)?;
    game.draw(Seat::P1)?;
    assert!(!game.state().uno_called(Seat::P1));
    Ok(())
}

/// Probes every seat and index without a successful play; rejected plays leave the round as is.
fn assert_rejections_agree(game: &mut Game) {
    for seat in Seat::ALL {
        for index in 0..game.hand(seat).len() + 1 {
            if !game.can_play(seat, index) {
                assert!(game.play(seat, index).is_err(), "{seat} index {index}");
            }
        }
    }
}

#[test]
fn can_play_agrees_with_play_on_the_last_card() -> Result<(), GameError> {
    let mut game = table(
        &[card(Color::Red, Value::Skip), num(Color::Red, 1)],
        &[num(Color::Blue, 1); 2],
    )?;
    game.play(Seat::P1, 0)?;

    assert!(!game.can_play(Seat::P1, 0));
    assert_eq!(game.play(Seat::P1, 0), Err(InvalidAction::MustCallUno(Seat::P1)));
    assert_rejections_agree(&mut game);
    assert_eq!(game.hand(Seat::P1).len(), 1);

    game.call_uno(Seat::P1)?;
    assert!(game.can_play(Seat::P1, 0));
    assert_rejections_agree(&mut game);
    assert_eq!(game.legal_plays(Seat::P1), vec![0]);
    game.play(Seat::P1, 0)?;
    assert_eq!(game.winner(), Some(Seat::P1));
    Ok(())
}
