//! The embedded "Wrapped" deck.

use super::{Deck, DeckError, Slide, SlideTheme, StatValue, TERMINAL_SLIDE_ID};

const SLIDES: [Slide; 11] = [
    Slide {
        id: "intro",
        title: "Your Year, Wrapped",
        subtitle: "Twelve months of shipping, reviewing and learning. Let's look back.",
        stat_label: None,
        stat_value: None,
        theme: SlideTheme::A,
        details: &[],
    },
    Slide {
        id: "commits",
        title: "You kept the lights on",
        subtitle: "Commits pushed across every project you touched",
        stat_label: Some("commits"),
        stat_value: Some(StatValue::Number(1847.0)),
        theme: SlideTheme::B,
        details: &[
            "Busiest month: March, with 312 commits.",
            "Most commits in a single day: 41, the night before the 2.0 release.",
        ],
    },
    Slide {
        id: "languages",
        title: "Your top language",
        subtitle: "Rust made up most of the lines you wrote this year",
        stat_label: Some("of your code"),
        stat_value: Some(StatValue::Text("64% Rust")),
        theme: SlideTheme::C,
        details: &[
            "Runner-up: TypeScript at 21%.",
            "Newcomer: Zig, first seen in September.",
            "Shell scripts still sneak in at 4%.",
        ],
    },
    Slide {
        id: "top-repo",
        title: "Where you lived",
        subtitle: "One repository got more of your attention than any other",
        stat_label: Some("days active"),
        stat_value: Some(StatValue::Number(203.0)),
        theme: SlideTheme::D,
        details: &[],
    },
    Slide {
        id: "reviews",
        title: "A generous reviewer",
        subtitle: "Pull requests you reviewed for your teammates",
        stat_label: Some("reviews"),
        stat_value: Some(StatValue::Number(486.0)),
        theme: SlideTheme::A,
        details: &[
            "Median time to first review: 3 hours.",
            "You approved 71% of them on the first pass.",
        ],
    },
    Slide {
        id: "streak",
        title: "On a roll",
        subtitle: "Your longest streak of consecutive contribution days",
        stat_label: Some("days in a row"),
        stat_value: Some(StatValue::Number(58.0)),
        theme: SlideTheme::B,
        details: &[],
    },
    Slide {
        id: "night-owl",
        title: "Night owl",
        subtitle: "Your most productive hour of the day",
        stat_label: Some("peak hour"),
        stat_value: Some(StatValue::Text("23:00")),
        theme: SlideTheme::C,
        details: &["Weekends accounted for 18% of your activity."],
    },
    Slide {
        id: "collab",
        title: "Better together",
        subtitle: "People you co-authored commits with",
        stat_label: Some("collaborators"),
        stat_value: Some(StatValue::Number(27.0)),
        theme: SlideTheme::D,
        details: &[],
    },
    Slide {
        id: "issues",
        title: "Bug squasher",
        subtitle: "Issues you closed, from typos to race conditions",
        stat_label: Some("issues closed"),
        stat_value: Some(StatValue::Number(132.0)),
        theme: SlideTheme::A,
        details: &[
            "Oldest issue closed: opened 4 years ago.",
            "Fastest fix: 6 minutes from report to merge.",
        ],
    },
    Slide {
        id: "milestones",
        title: "Milestones",
        subtitle: "Releases you helped get out the door",
        stat_label: Some("releases"),
        stat_value: Some(StatValue::Number(9.0)),
        theme: SlideTheme::B,
        details: &[],
    },
    Slide {
        id: TERMINAL_SLIDE_ID,
        title: "What's next?",
        subtitle: "Thanks for an amazing year. Here's to the next one.",
        stat_label: None,
        stat_value: None,
        theme: SlideTheme::C,
        details: &[],
    },
];

pub fn wrapped_deck() -> Result<Deck, DeckError> {
    Deck::new(SLIDES.to_vec(), TERMINAL_SLIDE_ID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_deck_is_valid() {
        let deck = wrapped_deck().unwrap();
        assert_eq!(deck.len(), 11);
        assert!(deck.is_terminal(deck.len() - 1));
    }

    #[test]
    fn test_embedded_deck_has_details() {
        let deck = wrapped_deck().unwrap();
        assert!(deck.slides().iter().any(|s| s.has_details()));
        assert!(!deck.slide(0).has_details());
    }
}
