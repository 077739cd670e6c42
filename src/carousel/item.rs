use crate::geometry::Color;

/// One `label value` pair in a ticker row
#[derive(Clone, Debug, PartialEq)]
pub struct InfoSegment {
    /// Dimmed label shown before the value
    pub label: Option<String>,
    pub value: String,
}

impl InfoSegment {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            label: None,
            value: value.into(),
        }
    }

    pub fn labeled(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            value: value.into(),
        }
    }
}

/// A page of the info ticker
#[derive(Clone, Debug, PartialEq)]
pub struct TickerItem {
    pub title: String,
    /// Symbol name understood by the host's icon set
    pub symbol: String,
    pub color: Color,
    /// Segments rendered in one row, separated by dots
    pub segments: Vec<InfoSegment>,
}

impl TickerItem {
    pub fn new(title: impl Into<String>, symbol: impl Into<String>, color: Color) -> Self {
        Self {
            title: title.into(),
            symbol: symbol.into(),
            color,
            segments: Vec::new(),
        }
    }

    pub fn segment(mut self, segment: InfoSegment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Plain-text rendering of the row, handy for measuring and logging
    pub fn row_text(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match &segment.label {
                Some(label) => format!("{} {}", label, segment.value),
                None => segment.value.clone(),
            })
            .collect::<Vec<_>>()
            .join(" · ")
    }
}

/// The three pages the ticker ships with: location, health, weather
pub fn default_items() -> Vec<TickerItem> {
    vec![
        TickerItem::new("Location", "location.fill", Color::from_hex(0x007AFF))
            .segment(InfoSegment::new("Rafa Nadal Academy"))
            .segment(InfoSegment::labeled("Elevation", "80m"))
            .segment(InfoSegment::labeled("Location", "Very Nice")),
        TickerItem::new("Health", "heart.square.fill", Color::from_hex(0xFF2D55))
            .segment(InfoSegment::labeled("Energy", "214kcal"))
            .segment(InfoSegment::labeled("Heart", "123bpm")),
        TickerItem::new("Weather", "sun.max.fill", Color::from_hex(0xFF9500))
            .segment(InfoSegment::new("18º"))
            .segment(InfoSegment::labeled("Conditions", "Clear"))
            .segment(InfoSegment::labeled("Humidity", "66%")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_items() {
        let items = default_items();
        let titles: Vec<_> = items.iter().map(|item| item.title.as_str()).collect();
        assert_eq!(titles, ["Location", "Health", "Weather"]);
    }

    #[test]
    fn test_row_text() {
        let item = TickerItem::new("Health", "heart", Color::BLACK)
            .segment(InfoSegment::labeled("Energy", "214kcal"))
            .segment(InfoSegment::new("ok"));
        assert_eq!(item.row_text(), "Energy 214kcal · ok");
    }
}
