//! Common types used across the dashboard pipeline

use serde::{Deserialize, Serialize};

/// One of the six location-stage measurement slots (3 sites × 2 harvest passes)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LocationSlot {
    #[serde(rename = "M-I")]
    MezoberenyI,
    #[serde(rename = "M-II")]
    MezoberenyII,
    #[serde(rename = "Cs-I")]
    CsabacsudI,
    #[serde(rename = "Cs-II")]
    CsabacsudII,
    #[serde(rename = "L-I")]
    LakitelekI,
    #[serde(rename = "L-II")]
    LakitelekII,
}

impl LocationSlot {
    /// All slots in chart category order
    pub const ALL: [LocationSlot; 6] = [
        LocationSlot::MezoberenyI,
        LocationSlot::MezoberenyII,
        LocationSlot::CsabacsudI,
        LocationSlot::CsabacsudII,
        LocationSlot::LakitelekI,
        LocationSlot::LakitelekII,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            LocationSlot::MezoberenyI => "M-I",
            LocationSlot::MezoberenyII => "M-II",
            LocationSlot::CsabacsudI => "Cs-I",
            LocationSlot::CsabacsudII => "Cs-II",
            LocationSlot::LakitelekI => "L-I",
            LocationSlot::LakitelekII => "L-II",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.code() == code)
    }

    /// Human-readable name shown in the detail panel
    pub fn display_name(&self) -> &'static str {
        match self {
            LocationSlot::MezoberenyI => "Mezőberény-I",
            LocationSlot::MezoberenyII => "Mezőberény-II",
            LocationSlot::CsabacsudI => "Csabacsűd-I",
            LocationSlot::CsabacsudII => "Csabacsűd-II",
            LocationSlot::LakitelekI => "Lakitelek-I",
            LocationSlot::LakitelekII => "Lakitelek-II",
        }
    }

    pub fn site(&self) -> TrialSite {
        match self {
            LocationSlot::MezoberenyI | LocationSlot::MezoberenyII => TrialSite::Mezobereny,
            LocationSlot::CsabacsudI | LocationSlot::CsabacsudII => TrialSite::Csabacsud,
            LocationSlot::LakitelekI | LocationSlot::LakitelekII => TrialSite::Lakitelek,
        }
    }

    pub fn harvest(&self) -> HarvestPass {
        match self {
            LocationSlot::MezoberenyI | LocationSlot::CsabacsudI | LocationSlot::LakitelekI => {
                HarvestPass::First
            }
            _ => HarvestPass::Second,
        }
    }

    /// Position on the chart's category axis
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for LocationSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Harvest pass; the two passes of a variety were always 8 days apart
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HarvestPass {
    First,
    Second,
}

/// Trial site hosting two location slots
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TrialSite {
    #[serde(rename = "Mezőberény")]
    Mezobereny,
    #[serde(rename = "Csabacsűd")]
    Csabacsud,
    #[serde(rename = "Lakitelek")]
    Lakitelek,
}

impl TrialSite {
    pub const ALL: [TrialSite; 3] = [
        TrialSite::Mezobereny,
        TrialSite::Csabacsud,
        TrialSite::Lakitelek,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TrialSite::Mezobereny => "Mezőberény",
            TrialSite::Csabacsud => "Csabacsűd",
            TrialSite::Lakitelek => "Lakitelek",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            TrialSite::Mezobereny => "#8b5cf6",
            TrialSite::Csabacsud => "#06b6d4",
            TrialSite::Lakitelek => "#84cc16",
        }
    }

    /// (first harvest, second harvest) slots of this site
    pub fn slots(&self) -> (LocationSlot, LocationSlot) {
        match self {
            TrialSite::Mezobereny => (LocationSlot::MezoberenyI, LocationSlot::MezoberenyII),
            TrialSite::Csabacsud => (LocationSlot::CsabacsudI, LocationSlot::CsabacsudII),
            TrialSite::Lakitelek => (LocationSlot::LakitelekI, LocationSlot::LakitelekII),
        }
    }
}

/// Ripeness-stage quantity categories of the cumulative dataset
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RipenessStage {
    #[serde(rename = "érett")]
    Ripe,
    #[serde(rename = "sárga")]
    Yellow,
    #[serde(rename = "zöld")]
    Green,
    #[serde(rename = "romló")]
    Decaying,
}

impl RipenessStage {
    pub const ALL: [RipenessStage; 4] = [
        RipenessStage::Ripe,
        RipenessStage::Yellow,
        RipenessStage::Green,
        RipenessStage::Decaying,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RipenessStage::Ripe => "Érett",
            RipenessStage::Yellow => "Sárga",
            RipenessStage::Green => "Zöld",
            RipenessStage::Decaying => "Romló",
        }
    }

    /// Stacked bar colour
    pub fn color(&self) -> &'static str {
        match self {
            RipenessStage::Ripe => "#DC2626",
            RipenessStage::Yellow => "#F59E0B",
            RipenessStage::Green => "#10B981",
            RipenessStage::Decaying => "#6B7280",
        }
    }
}

/// Metric selected from the primary and subplot datasets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MetricSelector {
    /// Sound, ripe berry volume (t/ha)
    MatureBerry,
    /// Decaying berry volume (t/ha)
    DecayingBerry,
    /// Sugar content (Brix°)
    Brix,
}

impl MetricSelector {
    /// Category label of the primary dataset rows carrying this metric
    pub fn category_label(&self) -> Option<&'static str> {
        match self {
            MetricSelector::MatureBerry => Some(
                "Tövön tarthatóság - az ép, érett bogyó mennyisége, I. és II. szedés, t/ha",
            ),
            MetricSelector::DecayingBerry => Some(
                "Tövön tarthatóság - a romló bogyó mennyisége, I. és II. szedés, t/ha",
            ),
            MetricSelector::Brix => None,
        }
    }

    /// Row type tag used by the subplot dataset
    pub fn subplot_tag(&self) -> Option<&'static str> {
        match self {
            MetricSelector::MatureBerry => Some("érett"),
            MetricSelector::DecayingBerry => Some("romló"),
            MetricSelector::Brix => None,
        }
    }

    pub fn family(&self) -> MetricFamily {
        match self {
            MetricSelector::MatureBerry | MetricSelector::DecayingBerry => MetricFamily::VineRetention,
            MetricSelector::Brix => MetricFamily::SugarContent,
        }
    }

    /// Whether a smaller value is the better result
    pub fn lower_is_better(&self) -> bool {
        matches!(self, MetricSelector::DecayingBerry)
    }
}

/// Metric family, used by the grouper's normalization rules
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MetricFamily {
    VineRetention,
    SugarContent,
    CumulativeYield,
}
