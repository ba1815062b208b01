//! Main pages and their sub-page tabs.
use std::fmt;

use crate::inventory::ItemsPage;

/// A row of tabs that can be stepped through left and right.
pub trait Tab: Copy + PartialEq + 'static {
    /// Tabs in left-to-right order; never empty.
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    /// Neighbouring tab; stays put at either end.
    #[must_use]
    fn step(self, right: bool) -> Self {
        let last = Self::ALL.len().saturating_sub(1);
        let index = Self::ALL.iter().position(|tab| *tab == self).unwrap_or(0);
        let next = if right {
            (index + 1).min(last)
        } else {
            index.saturating_sub(1)
        };
        Self::ALL.get(next).copied().unwrap_or(self)
    }

    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|tab| tab.label()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Stats,
    Items,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatsPage {
    #[default]
    Status,
    Special,
    Skills,
    Perks,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataPage {
    #[default]
    Map,
    Quests,
    Misc,
    Radio,
}

impl Tab for Page {
    const ALL: &'static [Self] = &[Self::Stats, Self::Items, Self::Data];

    fn label(self) -> &'static str {
        match self {
            Self::Stats => "STATS",
            Self::Items => "ITEMS",
            Self::Data => "DATA",
        }
    }
}

impl Tab for StatsPage {
    const ALL: &'static [Self] = &[
        Self::Status,
        Self::Special,
        Self::Skills,
        Self::Perks,
        Self::General,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Status => "Status",
            Self::Special => "SPECIAL",
            Self::Skills => "Skills",
            Self::Perks => "Perks",
            Self::General => "General",
        }
    }
}

impl Tab for ItemsPage {
    const ALL: &'static [Self] = &[
        Self::Weapons,
        Self::Apparel,
        Self::Aid,
        Self::Ammo,
        Self::Misc,
    ];

    fn label(self) -> &'static str {
        self.as_str()
    }
}

impl Tab for DataPage {
    const ALL: &'static [Self] = &[Self::Map, Self::Quests, Self::Misc, Self::Radio];

    fn label(self) -> &'static str {
        match self {
            Self::Map => "Map",
            Self::Quests => "Quests",
            Self::Misc => "Misc",
            Self::Radio => "Radio",
        }
    }
}

macro_rules! display_as_label {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )+
    };
}

display_as_label!(Page, StatsPage, DataPage);

/// Which page and sub-pages are showing. The ITEMS sub-page lives on the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigation {
    pub page: Page,
    pub stats_page: StatsPage,
    pub data_page: DataPage,
}

impl Navigation {
    pub fn change_page(&mut self, right: bool) {
        self.page = self.page.step(right);
    }

    /// Step the sub-page of the current main page.
    pub fn change_sub_page(&mut self, right: bool, items_page: &mut ItemsPage) {
        match self.page {
            Page::Stats => self.stats_page = self.stats_page.step(right),
            Page::Items => *items_page = items_page.step(right),
            Page::Data => self.data_page = self.data_page.step(right),
        }
    }

    /// Sub-page labels of the current main page, with the selected one.
    #[must_use]
    pub fn sub_pages(&self, items_page: ItemsPage) -> (Vec<&'static str>, &'static str) {
        match self.page {
            Page::Stats => (StatsPage::labels(), self.stats_page.label()),
            Page::Items => (ItemsPage::labels(), items_page.label()),
            Page::Data => (DataPage::labels(), self.data_page.label()),
        }
    }
}
