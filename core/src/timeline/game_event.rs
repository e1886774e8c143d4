use crate::demo_event::{
    BombDefused, BombExploded, BombPlanted, ChickenKilled, DisconnectedPlayer, FeedbackMessage,
    FreezetimeEnded, HostagePickedUp, HostageRescued, MatchStarted, NadeKind, NadeThrow,
    PlayerHurt, PlayerKilled, PlayerPositionSample, RoundEnded, RoundMvp, RoundOfficiallyEnded,
    ShotFired, SwitchSides, TeamEquipment, TeamRoster,
};

/// Partition key of the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    MatchStarted,
    RoundEnded,
    RoundOfficiallyEnded,
    FreezetimeEnded,
    SwitchSides,
    PlayerKilled,
    PlayerHurt,
    RoundMvp,
    PlayerDisconnected,
    BombPlanted,
    BombExploded,
    BombDefused,
    HostagePickedUp,
    HostageRescued,
    ShotFired,
    NadeFire,
    NadeSmoke,
    NadeFlash,
    NadeDecoy,
    NadeExplosive,
    FeedbackMessage,
    PlayerPositionSample,
    ChickenKilled,
    TeamRoster,
    TeamEquipment,
}

impl EventKind {
    pub const NADES: [EventKind; 5] = [
        EventKind::NadeFire,
        EventKind::NadeSmoke,
        EventKind::NadeFlash,
        EventKind::NadeDecoy,
        EventKind::NadeExplosive,
    ];
}

impl From<NadeKind> for EventKind {
    fn from(kind: NadeKind) -> Self {
        match kind {
            NadeKind::Fire => EventKind::NadeFire,
            NadeKind::Smoke => EventKind::NadeSmoke,
            NadeKind::Flash => EventKind::NadeFlash,
            NadeKind::Decoy => EventKind::NadeDecoy,
            NadeKind::Explosive => EventKind::NadeExplosive,
        }
    }
}

/// A stored event. The timeline owns every instance; readers borrow.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    MatchStarted(MatchStarted),
    RoundEnded(RoundEnded),
    RoundOfficiallyEnded(RoundOfficiallyEnded),
    FreezetimeEnded(FreezetimeEnded),
    SwitchSides(SwitchSides),
    PlayerKilled(PlayerKilled),
    PlayerHurt(PlayerHurt),
    RoundMvp(RoundMvp),
    PlayerDisconnected(DisconnectedPlayer),
    BombPlanted(BombPlanted),
    BombExploded(BombExploded),
    BombDefused(BombDefused),
    HostagePickedUp(HostagePickedUp),
    HostageRescued(HostageRescued),
    ShotFired(ShotFired),
    Nade(NadeThrow),
    FeedbackMessage(FeedbackMessage),
    PlayerPositionSample(PlayerPositionSample),
    ChickenKilled(ChickenKilled),
    TeamRoster(TeamRoster),
    TeamEquipment(TeamEquipment),
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::MatchStarted(_) => EventKind::MatchStarted,
            GameEvent::RoundEnded(_) => EventKind::RoundEnded,
            GameEvent::RoundOfficiallyEnded(_) => EventKind::RoundOfficiallyEnded,
            GameEvent::FreezetimeEnded(_) => EventKind::FreezetimeEnded,
            GameEvent::SwitchSides(_) => EventKind::SwitchSides,
            GameEvent::PlayerKilled(_) => EventKind::PlayerKilled,
            GameEvent::PlayerHurt(_) => EventKind::PlayerHurt,
            GameEvent::RoundMvp(_) => EventKind::RoundMvp,
            GameEvent::PlayerDisconnected(_) => EventKind::PlayerDisconnected,
            GameEvent::BombPlanted(_) => EventKind::BombPlanted,
            GameEvent::BombExploded(_) => EventKind::BombExploded,
            GameEvent::BombDefused(_) => EventKind::BombDefused,
            GameEvent::HostagePickedUp(_) => EventKind::HostagePickedUp,
            GameEvent::HostageRescued(_) => EventKind::HostageRescued,
            GameEvent::ShotFired(_) => EventKind::ShotFired,
            GameEvent::Nade(nade) => nade.kind.into(),
            GameEvent::FeedbackMessage(_) => EventKind::FeedbackMessage,
            GameEvent::PlayerPositionSample(_) => EventKind::PlayerPositionSample,
            GameEvent::ChickenKilled(_) => EventKind::ChickenKilled,
            GameEvent::TeamRoster(_) => EventKind::TeamRoster,
            GameEvent::TeamEquipment(_) => EventKind::TeamEquipment,
        }
    }
}

/// Typed access to one payload type stored in the timeline.
///
/// `KINDS` lists every partition the payload can live in; grenades span five.
pub trait TimelineRecord: Sized + 'static {
    const KINDS: &'static [EventKind];

    fn from_event(event: &GameEvent) -> Option<&Self>;
    fn from_event_mut(event: &mut GameEvent) -> Option<&mut Self>;
    fn into_event(self) -> GameEvent;
}

macro_rules! timeline_record {
    ($ty:ty => $variant:ident [$($kind:ident),+]) => {
        impl TimelineRecord for $ty {
            const KINDS: &'static [EventKind] = &[$(EventKind::$kind),+];

            fn from_event(event: &GameEvent) -> Option<&Self> {
                match event {
                    GameEvent::$variant(record) => Some(record),
                    _ => None,
                }
            }

            fn from_event_mut(event: &mut GameEvent) -> Option<&mut Self> {
                match event {
                    GameEvent::$variant(record) => Some(record),
                    _ => None,
                }
            }

            fn into_event(self) -> GameEvent {
                GameEvent::$variant(self)
            }
        }
    };
}

timeline_record!(MatchStarted => MatchStarted [MatchStarted]);
timeline_record!(RoundEnded => RoundEnded [RoundEnded]);
timeline_record!(RoundOfficiallyEnded => RoundOfficiallyEnded [RoundOfficiallyEnded]);
timeline_record!(FreezetimeEnded => FreezetimeEnded [FreezetimeEnded]);
timeline_record!(SwitchSides => SwitchSides [SwitchSides]);
timeline_record!(PlayerKilled => PlayerKilled [PlayerKilled]);
timeline_record!(PlayerHurt => PlayerHurt [PlayerHurt]);
timeline_record!(RoundMvp => RoundMvp [RoundMvp]);
timeline_record!(DisconnectedPlayer => PlayerDisconnected [PlayerDisconnected]);
timeline_record!(BombPlanted => BombPlanted [BombPlanted]);
timeline_record!(BombExploded => BombExploded [BombExploded]);
timeline_record!(BombDefused => BombDefused [BombDefused]);
timeline_record!(HostagePickedUp => HostagePickedUp [HostagePickedUp]);
timeline_record!(HostageRescued => HostageRescued [HostageRescued]);
timeline_record!(ShotFired => ShotFired [ShotFired]);
timeline_record!(NadeThrow => Nade [NadeFire, NadeSmoke, NadeFlash, NadeDecoy, NadeExplosive]);
timeline_record!(FeedbackMessage => FeedbackMessage [FeedbackMessage]);
timeline_record!(PlayerPositionSample => PlayerPositionSample [PlayerPositionSample]);
timeline_record!(ChickenKilled => ChickenKilled [ChickenKilled]);
timeline_record!(TeamRoster => TeamRoster [TeamRoster]);
timeline_record!(TeamEquipment => TeamEquipment [TeamEquipment]);
