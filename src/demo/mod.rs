//! Sample analytics dashboard used by the bench and by hosts that want a
//! populated board to try drags against.

use serde::{Deserialize, Serialize};

use crate::board::CardContent;
use crate::model::{Item, Layout, Row};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Chart,
    Metric,
    Table,
    List,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardCard {
    pub title: String,
    pub kind: CardKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub color: String,
}

impl DashboardCard {
    pub fn new(title: impl Into<String>, kind: CardKind, color: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind,
            value: None,
            color: color.into(),
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl CardContent for DashboardCard {
    fn title(&self) -> &str {
        &self.title
    }

    fn body(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// Section headings for the three demo rows, in display order.
pub const SECTIONS: [&str; 3] = ["Key Metrics", "Analytics", "Recent Activity"];

/// Six cards over three rows: metrics, analytics, recent activity.
pub fn dashboard() -> (Vec<Item<DashboardCard>>, Layout) {
    let items = vec![
        Item::new(
            "card-1",
            DashboardCard::new("Total Users", CardKind::Metric, "blue").with_value("1,234"),
        ),
        Item::new(
            "card-2",
            DashboardCard::new("Revenue", CardKind::Metric, "green").with_value("$12,345"),
        ),
        Item::new(
            "card-3",
            DashboardCard::new("Conversion Rate", CardKind::Metric, "orange").with_value("3.2%"),
        ),
        Item::new(
            "card-4",
            DashboardCard::new("User Growth Chart", CardKind::Chart, "purple"),
        ),
        Item::new("card-5", DashboardCard::new("Top Pages", CardKind::Table, "cyan")),
        Item::new("card-6", DashboardCard::new("Recent Events", CardKind::List, "pink")),
    ];

    let layout = Layout::from_rows_unchecked(vec![
        Row::of(1, ["card-1", "card-2", "card-3"]),
        Row::of(2, ["card-4", "card-5"]),
        Row::of(3, ["card-6"]),
    ]);

    (items, layout)
}
