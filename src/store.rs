//! Shared preference state
//!
//! One `AppStore` holds the values every screen can see: who the gift is
//! for, the theme, and the music controls. Screens read snapshots and send
//! `Intent`s; subscribers are woken through a watch channel. Everything but
//! the display name is written back to the preference file.

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::config::persistence::{
    PreferenceMap, PreferenceStore, INTRO_SEEN_KEY, MUTED_KEY, THEME_KEY, TRACK_KEY,
};
use crate::content::PLAYLIST;

/// Everything a screen may read
#[derive(Debug, Clone, PartialEq)]
pub struct AppSnapshot {
    pub display_name: String,
    pub dark_mode: bool,
    pub muted: bool,
    pub track_index: usize,
    pub intro_seen: Option<DateTime<Utc>>,
}

impl AppSnapshot {
    fn defaults(display_name: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            dark_mode: true,
            muted: false,
            track_index: 0,
            intro_seen: None,
        }
    }

    fn from_preferences(map: &PreferenceMap, display_name: &str) -> Self {
        let mut snapshot = Self::defaults(display_name);
        if let Some(theme) = map.get(THEME_KEY) {
            snapshot.dark_mode = theme != "light";
        }
        if let Some(muted) = map.get(MUTED_KEY) {
            snapshot.muted = muted == "true";
        }
        if let Some(index) = map.get(TRACK_KEY).and_then(|v| v.parse::<usize>().ok()) {
            if index < PLAYLIST.len() {
                snapshot.track_index = index;
            }
        }
        snapshot.intro_seen = map
            .get(INTRO_SEEN_KEY)
            .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
            .map(|t| t.with_timezone(&Utc));
        snapshot
    }
}

/// Changes a screen can ask for
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Blank names fall back to the default
    SetDisplayName(String),
    ToggleTheme,
    ToggleMute,
    NextTrack,
    PreviousTrack,
    MarkIntroSeen,
}

#[derive(Debug)]
pub struct AppStore {
    tx: watch::Sender<AppSnapshot>,
    preferences: Option<PreferenceStore>,
    default_name: String,
}

impl AppStore {
    /// Store seeded from, and written back to, `preferences`
    pub fn open(preferences: PreferenceStore, default_name: &str) -> Self {
        let snapshot = AppSnapshot::from_preferences(&preferences.load_or_default(), default_name);
        debug!(?snapshot, "preferences loaded");
        let (tx, _) = watch::channel(snapshot);
        Self {
            tx,
            preferences: Some(preferences),
            default_name: default_name.to_string(),
        }
    }

    /// Store that forgets everything on exit
    pub fn in_memory(default_name: &str) -> Self {
        let (tx, _) = watch::channel(AppSnapshot::defaults(default_name));
        Self {
            tx,
            preferences: None,
            default_name: default_name.to_string(),
        }
    }

    pub fn snapshot(&self) -> AppSnapshot {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AppSnapshot> {
        self.tx.subscribe()
    }

    /// Apply `intent`, notify subscribers and persist. Returns the new
    /// snapshot. A failed write is logged and the in-memory value kept.
    pub fn dispatch(&self, intent: Intent) -> AppSnapshot {
        let tracks = PLAYLIST.len().max(1);
        let default_name = &self.default_name;
        self.tx.send_modify(|state| match &intent {
            Intent::SetDisplayName(name) => {
                let name = name.trim();
                state.display_name = if name.is_empty() {
                    default_name.clone()
                } else {
                    name.to_string()
                };
            }
            Intent::ToggleTheme => state.dark_mode = !state.dark_mode,
            Intent::ToggleMute => state.muted = !state.muted,
            Intent::NextTrack => state.track_index = (state.track_index + 1) % tracks,
            Intent::PreviousTrack => state.track_index = (state.track_index + tracks - 1) % tracks,
            Intent::MarkIntroSeen => {
                if state.intro_seen.is_none() {
                    state.intro_seen = Some(Utc::now());
                }
            }
        });

        let snapshot = self.snapshot();
        debug!(?intent, "intent applied");
        self.persist(&intent, &snapshot);
        snapshot
    }

    fn persist(&self, intent: &Intent, snapshot: &AppSnapshot) {
        let Some(preferences) = &self.preferences else {
            return;
        };
        let saved = match intent {
            Intent::SetDisplayName(_) => Ok(()),
            Intent::ToggleTheme => preferences.set(THEME_KEY, theme_value(snapshot.dark_mode)),
            // mute and track are always written as a pair
            Intent::ToggleMute | Intent::NextTrack | Intent::PreviousTrack => preferences.set_many([
                (MUTED_KEY, snapshot.muted.to_string()),
                (TRACK_KEY, snapshot.track_index.to_string()),
            ]),
            Intent::MarkIntroSeen => match snapshot.intro_seen {
                Some(seen) => preferences.set(INTRO_SEEN_KEY, seen.to_rfc3339()),
                None => Ok(()),
            },
        };
        if let Err(e) = saved {
            warn!(?intent, error = %e, "failed to save preferences");
        }
    }
}

fn theme_value(dark_mode: bool) -> &'static str {
    if dark_mode {
        "dark"
    } else {
        "light"
    }
}
