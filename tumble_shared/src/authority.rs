//! Turn authority.
//!
//! Only the player "in charge" has their gestures take effect. The control
//! layer consumes authority through the `Authority` trait; the claim and
//! hand-over mechanism lives behind it.
//!
//! Two in-process implementations:
//! - `SoloAuthority`: always in charge (single player, no contention).
//! - `AuthorityHub` + `PlayerAuthority`: one shared slot for the active
//!   player, claimable only while unclaimed.

use std::{cell::RefCell, fmt, rc::Rc};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::event::Observers;

/// Identifies a participant of a shared session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player#{}", self.0)
    }
}

/// Single-writer permission gate, seen from one participant.
pub trait Authority {
    /// Whether this participant currently holds authority.
    fn are_we_in_charge(&self) -> bool;

    /// Fire-and-forget claim attempt. Query `are_we_in_charge` afterwards
    /// to learn whether it took.
    fn take_charge(&self);

    /// Registers `callback` for every change of the active participant.
    fn on_active_player_changed(&self, callback: Box<dyn Fn()>);
}

/// Authority for a single local player: always in charge.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoloAuthority;

impl Authority for SoloAuthority {
    fn are_we_in_charge(&self) -> bool {
        true
    }

    fn take_charge(&self) {}

    fn on_active_player_changed(&self, _callback: Box<dyn Fn()>) {}
}

#[derive(Default)]
struct HubState {
    active: Option<PlayerId>,
    on_change: Observers<Option<PlayerId>>,
}

/// Shared active-player slot for a local session.
#[derive(Clone, Default)]
pub struct AuthorityHub {
    inner: Rc<RefCell<HubState>>,
}

impl AuthorityHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_player(&self) -> Option<PlayerId> {
        self.inner.borrow().active
    }

    /// Sets the active player out of band (for example a hand-over
    /// received from the session host). Notifies on change only.
    pub fn set_active_player(&self, player: Option<PlayerId>) {
        let listeners = {
            let mut state = self.inner.borrow_mut();
            if state.active == player {
                return;
            }
            state.active = player;
            state.on_change.snapshot()
        };
        debug!(?player, "active player changed");
        for listener in listeners {
            listener(&player);
        }
    }

    /// Claims the slot for `player` if nobody holds it.
    ///
    /// Returns whether `player` is in charge afterwards.
    pub fn claim(&self, player: PlayerId) -> bool {
        match self.active_player() {
            Some(current) => current == player,
            None => {
                self.set_active_player(Some(player));
                true
            }
        }
    }

    /// Releases the slot if `player` holds it.
    pub fn release(&self, player: PlayerId) {
        if self.active_player() == Some(player) {
            self.set_active_player(None);
        }
    }

    pub fn on_change(&self, listener: impl Fn(&Option<PlayerId>) + 'static) {
        self.inner.borrow_mut().on_change.subscribe(listener);
    }

    /// View of the hub for one participant.
    pub fn player(&self, id: PlayerId) -> PlayerAuthority {
        PlayerAuthority {
            id,
            hub: self.clone(),
        }
    }
}

impl fmt::Debug for AuthorityHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorityHub")
            .field("active", &self.active_player())
            .finish()
    }
}

/// One participant's view of an `AuthorityHub`.
#[derive(Debug, Clone)]
pub struct PlayerAuthority {
    id: PlayerId,
    hub: AuthorityHub,
}

impl PlayerAuthority {
    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn hub(&self) -> &AuthorityHub {
        &self.hub
    }
}

impl Authority for PlayerAuthority {
    fn are_we_in_charge(&self) -> bool {
        self.hub.active_player() == Some(self.id)
    }

    fn take_charge(&self) {
        if !self.hub.claim(self.id) {
            debug!(player = %self.id, "claim refused, authority held elsewhere");
        }
    }

    fn on_active_player_changed(&self, callback: Box<dyn Fn()>) {
        self.hub.on_change(move |_| callback());
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn solo_is_always_in_charge() {
        let solo = SoloAuthority;
        assert!(solo.are_we_in_charge());
    }

    #[test]
    fn first_claimant_wins() {
        let hub = AuthorityHub::new();
        let alice = hub.player(PlayerId(1));
        let bob = hub.player(PlayerId(2));

        assert!(!alice.are_we_in_charge());
        alice.take_charge();
        assert!(alice.are_we_in_charge());

        bob.take_charge();
        assert!(!bob.are_we_in_charge());
        assert_eq!(hub.active_player(), Some(PlayerId(1)));
    }

    #[test]
    fn release_reopens_the_slot() {
        let hub = AuthorityHub::new();
        let alice = hub.player(PlayerId(1));
        let bob = hub.player(PlayerId(2));
        alice.take_charge();

        hub.release(PlayerId(2));
        assert_eq!(hub.active_player(), Some(PlayerId(1)));

        hub.release(PlayerId(1));
        bob.take_charge();
        assert!(bob.are_we_in_charge());
    }

    #[test]
    fn change_callbacks_fire_on_each_handover() {
        let hub = AuthorityHub::new();
        let alice = hub.player(PlayerId(1));
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        alice.on_active_player_changed(Box::new(move || h.set(h.get() + 1)));

        alice.take_charge();
        alice.take_charge();
        hub.set_active_player(Some(PlayerId(2)));
        hub.set_active_player(None);
        assert_eq!(hits.get(), 3);
    }
}
