/// How the position in the deck is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressStyle {
    /// One marker per slide, the current one highlighted.
    #[default]
    Dots,
    /// A continuous bar filled to the fraction of slides seen.
    Bar,
}

impl ProgressStyle {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dots" => Some(Self::Dots),
            "bar" => Some(Self::Bar),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dots => "dots",
            Self::Bar => "bar",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressMarker {
    Dots { total: usize, active: usize },
    Bar { fraction: f32 },
}

impl ProgressMarker {
    /// Whether each dot is the active one. Empty for [`ProgressMarker::Bar`].
    pub fn dots(&self) -> Vec<bool> {
        match *self {
            ProgressMarker::Dots { total, active } => (0..total).map(|i| i == active).collect(),
            ProgressMarker::Bar { .. } => Vec::new(),
        }
    }
}

pub fn marker(current: usize, total: usize, style: ProgressStyle) -> ProgressMarker {
    match style {
        ProgressStyle::Dots => ProgressMarker::Dots {
            total,
            active: current,
        },
        ProgressStyle::Bar => ProgressMarker::Bar {
            fraction: if total == 0 {
                0.0
            } else {
                (current + 1) as f32 / total as f32
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dots_have_one_active() {
        let m = marker(3, 11, ProgressStyle::Dots);
        let dots = m.dots();
        assert_eq!(dots.len(), 11);
        assert_eq!(dots.iter().filter(|d| **d).count(), 1);
        assert!(dots[3]);
    }

    #[test]
    fn test_bar_fraction() {
        assert_eq!(
            marker(0, 4, ProgressStyle::Bar),
            ProgressMarker::Bar { fraction: 0.25 }
        );
        assert_eq!(
            marker(3, 4, ProgressStyle::Bar),
            ProgressMarker::Bar { fraction: 1.0 }
        );
    }

    #[test]
    fn test_style_names() {
        assert_eq!(ProgressStyle::from_name("bar"), Some(ProgressStyle::Bar));
        assert_eq!(ProgressStyle::from_name("dots"), Some(ProgressStyle::Dots));
        assert_eq!(ProgressStyle::from_name("ring"), None);
        assert_eq!(ProgressStyle::Bar.name(), "bar");
    }
}
