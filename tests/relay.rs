use unohub::{
    Color, Envelope, GameError, Message, Mode, Origin, PeerId, Relay, RelayError, RoomCode, Seat,
    Session, SessionConfig,
};

fn room() -> RoomCode {
    RoomCode::parse("k7qz").expect("valid room code")
}

fn host_with(guests: &[&str]) -> Result<Session, Box<dyn std::error::Error>> {
    let code = room();
    let mut session = Session::new(SessionConfig::for_room(&code))?.with_relay(Relay::host(code));
    if let Relay::Host(hub) = session.relay_mut() {
        for guest in guests {
            hub.join(PeerId::new(*guest))?;
        }
    }
    Ok(session)
}

fn guest() -> Result<Session, GameError> {
    let code = room();
    Ok(Session::new(SessionConfig::for_room(&code))?.with_relay(Relay::guest(code)))
}

#[test]
fn wire_format_is_stable() -> Result<(), RelayError> {
    let cases = [
        (
            Message::Start { mode: Mode::Mercy },
            r#"{"action":"uno:start","payload":{"mode":"mercy"}}"#,
        ),
        (Message::play(3), r#"{"action":"uno:play","payload":{"index":3}}"#),
        (Message::Draw {}, r#"{"action":"uno:draw","payload":{}}"#),
        (
            Message::CallUno { seat: Seat::P1 },
            r#"{"action":"uno:call","payload":{"seat":"p1"}}"#,
        ),
        (Message::room_full(), r#"{"action":"system","payload":"room full (max 4)"}"#),
    ];
    for (message, json) in cases {
        assert_eq!(message.to_json()?, json);
        assert_eq!(Message::from_json(json)?, message);
    }
    Ok(())
}

#[test]
fn malformed_messages_are_rejected() {
    assert!(matches!(
        Message::from_json(r#"{"action":"uno:teleport","payload":{}}"#),
        Err(RelayError::Malformed(_))
    ));
    assert!(matches!(
        Message::from_json("not json"),
        Err(RelayError::Malformed(_))
    ));
}

#[test]
fn local_actions_go_out_remote_ones_do_not() -> Result<(), Box<dyn std::error::Error>> {
    let mut host = host_with(&["g1"])?;

    host.draw(Origin::Local)?;
    let sent = host.drain_outbox();
    assert_eq!(
        sent,
        vec![Envelope {
            to: PeerId::new("g1"),
            message: Message::Draw {},
        }]
    );
    assert_eq!(host.game().turn(), Seat::P2);

    host.receive(r#"{"action":"uno:draw","payload":{}}"#, PeerId::new("g1"))?;
    assert_eq!(host.game().turn(), Seat::P1);
    assert!(host.drain_outbox().is_empty());
    Ok(())
}

#[test]
fn peers_stay_in_lockstep() -> Result<(), Box<dyn std::error::Error>> {
    let mut host = host_with(&["guest"])?;
    let mut guest = guest()?;
    assert_eq!(host.relay().room(), guest.relay().room());
    assert_eq!(host.game().state(), guest.game().state());

    host.start_round(Mode::Fkk, Origin::Local)?;
    host.draw(Origin::Local)?;
    for envelope in host.drain_outbox() {
        guest.receive(&envelope.message.to_json()?, room().host_peer_id())?;
    }
    assert_eq!(guest.game().mode(), Mode::Fkk);
    assert_eq!(guest.scoreboard().round, 2);
    assert!(guest.drain_outbox().is_empty());

    let index = guest.game().legal_plays(Seat::P2).first().copied();
    match index {
        Some(index) if !guest.game().hand(Seat::P2)[index].face(guest.game().side()).is_wild() => {
            guest.play(index, Origin::Local)?;
        }
        _ => {
            guest.draw(Origin::Local)?;
        }
    }
    let sent = guest.drain_outbox();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, room().host_peer_id());
    host.receive(&sent[0].message.to_json()?, PeerId::new("guest"))?;

    assert_eq!(host.game().state(), guest.game().state());
    Ok(())
}

#[test]
fn uno_calls_keep_peers_in_lockstep() -> Result<(), Box<dyn std::error::Error>> {
    let mut host = host_with(&["guest"])?;
    let mut guest = guest()?;
    let mut called_with_two = false;

    for _ in 0..2000 {
        if host.game().is_finished() {
            break;
        }
        let seat = host.game().turn();
        if host.game().hand(seat).len() == 2 && !host.game().state().uno_called(seat) {
            host.call_uno(seat, Origin::Local)?;
            called_with_two = true;
        } else if host.game().hand(seat).len() == 1 {
            let _ = host.call_uno(seat, Origin::Local);
        }
        match host.game().legal_plays(seat).first().copied() {
            Some(index) => {
                host.play_with_color(index, Color::Red, Origin::Local)?;
            }
            None => {
                host.draw(Origin::Local)?;
            }
        }
        for envelope in host.drain_outbox() {
            guest.receive(&envelope.message.to_json()?, room().host_peer_id())?;
        }
        assert_eq!(host.game().state(), guest.game().state());
    }
    assert!(called_with_two);
    assert!(host.game().is_finished());
    assert_eq!(host.game().winner(), guest.game().winner());
    Ok(())
}

#[test]
fn color_is_only_sent_for_wild_plays() -> Result<(), Box<dyn std::error::Error>> {
    let mut host = host_with(&["guest"])?;
    for _ in 0..200 {
        let side = host.game().side();
        let seat = host.game().turn();
        let plain = host
            .game()
            .legal_plays(seat)
            .into_iter()
            .find(|&index| !host.game().hand(seat)[index].face(side).is_wild());
        let Some(index) = plain else {
            host.draw(Origin::Local)?;
            host.drain_outbox();
            continue;
        };
        host.play_with_color(index, Color::Red, Origin::Local)?;
        let sent: Vec<Message> = host.drain_outbox().into_iter().map(|e| e.message).collect();
        assert_eq!(sent, vec![Message::play(index)]);
        assert!(!sent[0].to_json()?.contains("color"));
        return Ok(());
    }
    panic!("no plain card became playable");
}

#[test]
fn strangers_cannot_touch_the_round() -> Result<(), Box<dyn std::error::Error>> {
    let mut host = host_with(&["a"])?;
    let before = host.game().state().clone();
    assert!(matches!(
        host.receive(r#"{"action":"uno:draw","payload":{}}"#, PeerId::new("zz")),
        Err(RelayError::UnknownPeer(_))
    ));
    assert_eq!(host.game().state(), &before);
    assert!(host.drain_outbox().is_empty());
    Ok(())
}

#[test]
fn host_fans_out_to_other_guests() -> Result<(), Box<dyn std::error::Error>> {
    let mut host = host_with(&["a", "b", "c"])?;
    host.receive(r#"{"action":"uno:start","payload":{"mode":"classic"}}"#, PeerId::new("b"))?;
    let targets: Vec<PeerId> = host.drain_outbox().into_iter().map(|e| e.to).collect();
    assert_eq!(targets, vec![PeerId::new("a"), PeerId::new("c")]);
    assert_eq!(host.scoreboard().round, 2);
    Ok(())
}

#[test]
fn fifth_participant_is_turned_away() -> Result<(), Box<dyn std::error::Error>> {
    let mut host = host_with(&["a", "b", "c"])?;
    let Relay::Host(hub) = host.relay_mut() else {
        panic!("expected a hosting relay");
    };
    assert!(matches!(
        hub.join(PeerId::new("d")),
        Err(RelayError::RoomFull { max: 4 })
    ));
    assert_eq!(hub.guests().len(), 3);
    Ok(())
}

#[test]
fn system_notices_never_touch_the_round() -> Result<(), Box<dyn std::error::Error>> {
    let mut guest = guest()?;
    let before = guest.game().state().clone();
    guest.receive(&Message::room_full().to_json()?, room().host_peer_id())?;
    assert_eq!(guest.game().state(), &before);
    Ok(())
}

#[test]
fn room_codes_map_to_host_ids() -> Result<(), RelayError> {
    let code: RoomCode = "ab12".parse()?;
    assert_eq!(code.as_str(), "AB12");
    assert_eq!(code.host_peer_id(), PeerId::new("gamehub-AB12"));
    assert!(matches!(
        RoomCode::parse("abcde"),
        Err(RelayError::InvalidRoomCode(_))
    ));
    Ok(())
}
