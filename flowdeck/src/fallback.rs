//! Demo dataset for unconfigured or unreachable deployments
//!
//! The seed table doubles as the enrichment source for live data:
//! remote workflows are matched by exact name and inherit the
//! revenue/conversions/roi/description recorded here.

use shared::{MOCK_ID_PREFIX, System, SystemCategory, SystemStatus};

/// Static enrichment record for one known workflow.
#[derive(Debug, Clone, Copy)]
pub struct SeedEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub revenue: f64,
    pub conversions: u64,
    pub roi: f64,
}

/// Status assignment cycle for demo records.
const STATUS_CYCLE: [SystemStatus; 4] = [
    SystemStatus::Active,
    SystemStatus::Active,
    SystemStatus::Paused,
    SystemStatus::Error,
];

/// Fixed seed table. Entries are grouped in blocks of ten per category.
pub const SEED_TABLE: &[SeedEntry] = &[
    SeedEntry {
        name: "Lead Capture Pipeline",
        description: "Captures landing-page leads and routes them to the CRM.",
        revenue: 12450.0,
        conversions: 311,
        roi: 182.5,
    },
    SeedEntry {
        name: "Newsletter Drip Sequence",
        description: "Five-step onboarding drip for newsletter subscribers.",
        revenue: 8210.0,
        conversions: 194,
        roi: 96.0,
    },
    SeedEntry {
        name: "Ad Spend Optimizer",
        description: "Rebalances daily ad budgets across active campaigns.",
        revenue: 15980.0,
        conversions: 428,
        roi: 240.3,
    },
    SeedEntry {
        name: "Webinar Follow-Up",
        description: "Sends recap emails and books demos after each webinar.",
        revenue: 5320.0,
        conversions: 87,
        roi: 64.8,
    },
    SeedEntry {
        name: "Referral Reward Tracker",
        description: "Credits referral rewards and notifies both parties.",
        revenue: 3975.0,
        conversions: 142,
        roi: 71.2,
    },
    SeedEntry {
        name: "Landing Page A/B Router",
        description: "Splits inbound traffic across landing-page variants.",
        revenue: 9860.0,
        conversions: 263,
        roi: 118.9,
    },
    SeedEntry {
        name: "CRM Deduplication Sweep",
        description: "Nightly merge of duplicate CRM contacts.",
        revenue: 0.0,
        conversions: 0,
        roi: 12.0,
    },
    SeedEntry {
        name: "Event Invite Blast",
        description: "Segments contacts and sends event invitations.",
        revenue: 2840.0,
        conversions: 58,
        roi: 44.5,
    },
    SeedEntry {
        name: "Social Proof Collector",
        description: "Pulls fresh testimonials into the marketing site.",
        revenue: 1690.0,
        conversions: 35,
        roi: 28.1,
    },
    SeedEntry {
        name: "Churn Risk Alert",
        description: "Flags cooling accounts for the retention team.",
        revenue: 7420.0,
        conversions: 96,
        roi: 133.7,
    },
    SeedEntry {
        name: "Abandoned Cart Recovery",
        description: "Recovers abandoned carts with a timed email pair.",
        revenue: 22340.0,
        conversions: 517,
        roi: 310.6,
    },
    SeedEntry {
        name: "Inventory Low-Stock Sync",
        description: "Syncs low-stock alerts between store and warehouse.",
        revenue: 4110.0,
        conversions: 73,
        roi: 52.3,
    },
    SeedEntry {
        name: "Order Invoice Generator",
        description: "Generates and files invoices for every paid order.",
        revenue: 6875.0,
        conversions: 201,
        roi: 88.4,
    },
    SeedEntry {
        name: "Price Drop Notifier",
        description: "Emails wishlist customers when tracked prices drop.",
        revenue: 9135.0,
        conversions: 244,
        roi: 127.0,
    },
    SeedEntry {
        name: "Supplier Catalog Import",
        description: "Imports and normalizes supplier catalog feeds.",
        revenue: 1520.0,
        conversions: 19,
        roi: 21.6,
    },
    SeedEntry {
        name: "Review Request Cycle",
        description: "Requests product reviews two weeks after delivery.",
        revenue: 3260.0,
        conversions: 118,
        roi: 59.9,
    },
    SeedEntry {
        name: "Shipping Label Dispatcher",
        description: "Buys labels and pushes tracking numbers to orders.",
        revenue: 5740.0,
        conversions: 163,
        roi: 75.2,
    },
    SeedEntry {
        name: "Return Merchandise Intake",
        description: "Opens RMA tickets and schedules pickups for returns.",
        revenue: 980.0,
        conversions: 27,
        roi: 9.4,
    },
    SeedEntry {
        name: "Upsell Bundle Suggester",
        description: "Attaches bundle offers to qualifying checkouts.",
        revenue: 11215.0,
        conversions: 289,
        roi: 171.8,
    },
    SeedEntry {
        name: "VIP Customer Tagger",
        description: "Tags high-lifetime-value customers for concierge flows.",
        revenue: 8490.0,
        conversions: 134,
        roi: 141.2,
    },
];

/// Category for the seed entry at `index`: blocks of ten walk the
/// category list in order.
pub fn seed_category(index: usize) -> SystemCategory {
    SystemCategory::ALL[(index / 10) % SystemCategory::ALL.len()]
}

/// Position and entry of a seed record by exact name match.
///
/// Matching is by name only: a renamed remote workflow silently loses
/// its enrichment fields.
pub fn seed_position(name: &str) -> Option<(usize, &'static SeedEntry)> {
    SEED_TABLE
        .iter()
        .position(|seed| seed.name == name)
        .map(|index| (index, &SEED_TABLE[index]))
}

/// Build the demo dataset. Pure and deterministic: no I/O, no clock,
/// no randomness.
pub fn demo_systems() -> Vec<System> {
    SEED_TABLE
        .iter()
        .enumerate()
        .map(|(index, seed)| System {
            id: format!("{MOCK_ID_PREFIX}{}", index + 1),
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            category: seed_category(index),
            status: STATUS_CYCLE[index % STATUS_CYCLE.len()],
            revenue: seed.revenue,
            conversions: seed.conversions,
            roi: seed.roi,
        })
        .collect()
}
