#![forbid(unsafe_code)]

//! Screen identifiers.

use std::fmt;
use std::str::FromStr;

/// Identifies which screen is active once a session exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    /// Landing page with one card per section.
    Home,
    /// Bhagavad Gita chapter browser.
    Scripture,
    /// Scripted chat companion ("AI Buddy").
    Assistant,
    /// Course catalogue.
    Courses,
    /// Discussion forum.
    Community,
    /// Quiz catalogue and question flow.
    Quizzes,
    /// Video library.
    Videos,
    /// Personalized video player ("AI Video Learning").
    PersonalizedVideo,
    /// User profile and settings.
    Profile,
}

impl ScreenId {
    /// Shown right after login and after logout.
    pub const DEFAULT: ScreenId = ScreenId::Home;

    /// All screens in display order.
    pub const ALL: &[ScreenId] = &[
        Self::Home,
        Self::Scripture,
        Self::Assistant,
        Self::Courses,
        Self::Community,
        Self::Quizzes,
        Self::Videos,
        Self::PersonalizedVideo,
        Self::Profile,
    ];

    /// Destinations of the bottom navigation bar, left to right.
    pub const BOTTOM_NAV: &[ScreenId] = &[
        Self::Home,
        Self::Courses,
        Self::Community,
        Self::Videos,
        Self::Profile,
    ];

    /// 0-based index in [`ScreenId::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::Home => 0,
            Self::Scripture => 1,
            Self::Assistant => 2,
            Self::Courses => 3,
            Self::Community => 4,
            Self::Quizzes => 5,
            Self::Videos => 6,
            Self::PersonalizedVideo => 7,
            Self::Profile => 8,
        }
    }

    /// Stable lowercase identifier used on the command line and in logs.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Scripture => "scripture",
            Self::Assistant => "assistant",
            Self::Courses => "courses",
            Self::Community => "community",
            Self::Quizzes => "quizzes",
            Self::Videos => "videos",
            Self::PersonalizedVideo => "personalized-video",
            Self::Profile => "profile",
        }
    }

    /// Human-readable title for headers.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Radha Govind Dham",
            Self::Scripture => "Bhagavad Gita",
            Self::Assistant => "AI Buddy",
            Self::Courses => "Courses",
            Self::Community => "Community",
            Self::Quizzes => "Quizzes",
            Self::Videos => "Video Library",
            Self::PersonalizedVideo => "AI Video Learning",
            Self::Profile => "Profile",
        }
    }

    /// Where the header's back affordance leads.
    pub const fn parent(self) -> Option<ScreenId> {
        match self {
            Self::Home => None,
            Self::PersonalizedVideo => Some(Self::Videos),
            _ => Some(Self::Home),
        }
    }

    /// Position in the bottom bar, if this screen has one.
    pub fn nav_slot(self) -> Option<usize> {
        Self::BOTTOM_NAV.iter().position(|&id| id == self)
    }

    /// Map bottom-bar number keys: '1'..='5'.
    pub fn from_nav_key(ch: char) -> Option<Self> {
        let idx = match ch {
            '1'..='9' => (ch as usize) - ('1' as usize),
            _ => return None,
        };
        Self::BOTTOM_NAV.get(idx).copied()
    }
}

impl Default for ScreenId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Returned when a string names no screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseScreenIdError {
    input: String,
}

impl fmt::Display for ParseScreenIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown screen '{}'", self.input)
    }
}

impl std::error::Error for ParseScreenIdError {}

impl FromStr for ScreenId {
    type Err = ParseScreenIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        let id = match normalized.as_str() {
            "bhagavad-gita" | "gita" => Self::Scripture,
            "ai-buddy" | "chat" => Self::Assistant,
            "forum" | "forums" => Self::Community,
            "ai-video" => Self::PersonalizedVideo,
            other => match Self::ALL.iter().find(|id| id.slug() == other) {
                Some(id) => *id,
                None => {
                    return Err(ParseScreenIdError {
                        input: s.to_string(),
                    });
                }
            },
        };
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_all_order() {
        for (idx, id) in ScreenId::ALL.iter().enumerate() {
            assert_eq!(id.index(), idx, "index mismatch for {id:?}");
        }
    }

    #[test]
    fn slugs_round_trip() {
        for &id in ScreenId::ALL {
            assert_eq!(id.slug().parse::<ScreenId>(), Ok(id));
        }
    }

    #[test]
    fn legacy_aliases_parse() {
        assert_eq!("bhagavad-gita".parse(), Ok(ScreenId::Scripture));
        assert_eq!("ai-buddy".parse(), Ok(ScreenId::Assistant));
        assert_eq!("AI_VIDEO".parse(), Ok(ScreenId::PersonalizedVideo));
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = "settings".parse::<ScreenId>().unwrap_err();
        assert_eq!(err.to_string(), "unknown screen 'settings'");
    }

    #[test]
    fn parents_lead_home_except_video_player() {
        assert_eq!(ScreenId::Home.parent(), None);
        assert_eq!(ScreenId::PersonalizedVideo.parent(), Some(ScreenId::Videos));
        for &id in ScreenId::ALL {
            if !matches!(id, ScreenId::Home | ScreenId::PersonalizedVideo) {
                assert_eq!(id.parent(), Some(ScreenId::Home), "{id:?}");
            }
        }
    }

    #[test]
    fn nav_keys_map_to_bottom_bar() {
        assert_eq!(ScreenId::from_nav_key('1'), Some(ScreenId::Home));
        assert_eq!(ScreenId::from_nav_key('2'), Some(ScreenId::Courses));
        assert_eq!(ScreenId::from_nav_key('3'), Some(ScreenId::Community));
        assert_eq!(ScreenId::from_nav_key('4'), Some(ScreenId::Videos));
        assert_eq!(ScreenId::from_nav_key('5'), Some(ScreenId::Profile));
        assert_eq!(ScreenId::from_nav_key('6'), None);
        assert_eq!(ScreenId::from_nav_key('0'), None);
        assert_eq!(ScreenId::from_nav_key('x'), None);
    }

    #[test]
    fn nav_slot_only_for_bottom_bar_screens() {
        assert_eq!(ScreenId::Home.nav_slot(), Some(0));
        assert_eq!(ScreenId::Profile.nav_slot(), Some(4));
        assert_eq!(ScreenId::Quizzes.nav_slot(), None);
    }
}
