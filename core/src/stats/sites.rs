//! Bombsite and hostage letter resolution, and the per-site tables.
//!
//! Resolution patches the timeline so the rounds table, the site tables and
//! any later reader all observe the same letter.

use demostats_types::{BombsiteStats, HostageStats, RescueZoneStats};
use hashbrown::{HashMap, HashSet};

use super::StatsAggregator;
use crate::context::TriggerLookup;
use crate::demo_event::{
    BombDefused, BombExploded, BombPlanted, HostagePickedUp, HostageRescued, SiteLetter,
};
use crate::timeline::{EventId, EventTimeline, TimelineRecord};

const ASSUMED_SITE_A: &str = "Assuming plant was at A site.";
const ASSUMED_SITE_B: &str = "Assuming plant was at B site.";
const UNDECIDABLE_SITE: &str = "Couldn't assume either bombsite was the plant location.";

/// Rationale recorded for every letter the aggregator filled in
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteNotes {
    bombsite: HashMap<i32, String>,
    hostage_pickups: HashMap<(i32, SiteLetter), String>,
}

impl SiteNotes {
    pub fn bombsite(&self, round: i32) -> Option<&str> {
        self.bombsite.get(&round).map(String::as_str)
    }

    pub fn hostage_pickup(&self, round: i32, hostage: SiteLetter) -> Option<&str> {
        self.hostage_pickups.get(&(round, hostage)).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.bombsite.is_empty() && self.hostage_pickups.is_empty()
    }
}

/// Fill in unresolved bombsite and hostage letters.
///
/// Must run before any table that reports a letter.
pub fn disambiguate_sites(timeline: &mut EventTimeline, triggers: &dyn TriggerLookup) -> SiteNotes {
    let mut notes = SiteNotes::default();
    resolve_bombsites(timeline, &mut notes);
    resolve_hostages(timeline, triggers, &mut notes);
    notes
}

/// Every record of a kind with its round, in arrival order
fn with_rounds<T, F>(timeline: &EventTimeline, round_of: F) -> Vec<(i32, EventId)>
where
    T: TimelineRecord,
    F: Fn(&T) -> i32,
{
    timeline
        .record_ids::<T>()
        .into_iter()
        .filter_map(|id| Some((timeline.record::<T>(id).map(&round_of)?, id)))
        .collect()
}

/// First record of each round
fn first_per_round<T, F>(timeline: &EventTimeline, round_of: F) -> HashMap<i32, EventId>
where
    T: TimelineRecord,
    F: Fn(&T) -> i32,
{
    let mut first = HashMap::new();
    for (round, id) in with_rounds(timeline, round_of) {
        first.entry(round).or_insert(id);
    }
    first
}

// ═══════════════════════════════════════════════════════════════════════════
// Bombsites
// ═══════════════════════════════════════════════════════════════════════════

fn resolve_bombsites(timeline: &mut EventTimeline, notes: &mut SiteNotes) {
    let plants = with_rounds::<BombPlanted, _>(timeline, |p| p.round);
    let explosions = first_per_round::<BombExploded, _>(timeline, |e| e.round);
    let defuses = first_per_round::<BombDefused, _>(timeline, |d| d.round);

    // The round's own explosion or defuse names the site when the plant didn't
    for (round, plant_id) in &plants {
        if plant_site(timeline, *plant_id).is_resolved() {
            continue;
        }
        let observed = defuses
            .get(round)
            .and_then(|id| timeline.record::<BombDefused>(*id))
            .map(|d| d.site)
            .filter(SiteLetter::is_resolved)
            .or_else(|| {
                explosions
                    .get(round)
                    .and_then(|id| timeline.record::<BombExploded>(*id))
                    .map(|e| e.site)
                    .filter(SiteLetter::is_resolved)
            });
        if let Some(site) = observed {
            timeline.update_record::<BombPlanted, _>(*plant_id, |p| p.site = site);
        }
    }

    // Exclusion only trusts letters the decoder reported, so a decision holds for the whole match
    let confirmed = |site: SiteLetter| plants.iter().any(|(_, id)| plant_site(timeline, *id) == site);
    let (site, note) = match (confirmed(SiteLetter::A), confirmed(SiteLetter::B)) {
        (true, false) => (SiteLetter::B, ASSUMED_SITE_B),
        (false, true) => (SiteLetter::A, ASSUMED_SITE_A),
        _ => (SiteLetter::Unresolved, UNDECIDABLE_SITE),
    };

    for (round, plant_id) in &plants {
        if plant_site(timeline, *plant_id).is_resolved() {
            continue;
        }
        tracing::debug!(round, site = %site, "Plant site assumed by exclusion");
        notes.bombsite.insert(*round, note.to_string());
        timeline.update_record::<BombPlanted, _>(*plant_id, |p| p.site = site);
    }

    // The round's first resolved plant names its explosion and defuse
    let mut named = HashSet::new();
    for (round, plant_id) in &plants {
        let site = plant_site(timeline, *plant_id);
        if !site.is_resolved() || !named.insert(*round) {
            continue;
        }
        if let Some(id) = explosions.get(round) {
            timeline.update_record::<BombExploded, _>(*id, |e| {
                if !e.site.is_resolved() {
                    e.site = site;
                }
            });
        }
        if let Some(id) = defuses.get(round) {
            timeline.update_record::<BombDefused, _>(*id, |d| {
                if !d.site.is_resolved() {
                    d.site = site;
                }
            });
        }
    }
}

fn plant_site(timeline: &EventTimeline, id: EventId) -> SiteLetter {
    timeline
        .record::<BombPlanted>(id)
        .map(|p| p.site)
        .unwrap_or_default()
}

// ═══════════════════════════════════════════════════════════════════════════
// Hostages
// ═══════════════════════════════════════════════════════════════════════════

fn resolve_hostages(timeline: &mut EventTimeline, triggers: &dyn TriggerLookup, notes: &mut SiteNotes) {
    let mut by_index: HashMap<i32, SiteLetter> = HashMap::new();
    for hostage in [SiteLetter::A, SiteLetter::B] {
        if let Some(index) = triggers.hostage_index(hostage) {
            by_index.insert(index, hostage);
        }
    }
    let seen = timeline
        .records::<HostagePickedUp>()
        .map(|p| (p.hostage_index, p.hostage))
        .chain(timeline.records::<HostageRescued>().map(|r| (r.hostage_index, r.hostage)));
    for (index, hostage) in seen {
        if hostage.is_resolved() {
            by_index.entry(index).or_insert(hostage);
        }
    }

    for id in timeline.record_ids::<HostagePickedUp>() {
        timeline.update_record::<HostagePickedUp, _>(id, |p| {
            if !p.hostage.is_resolved()
                && let Some(hostage) = by_index.get(&p.hostage_index)
            {
                p.hostage = *hostage;
            }
        });
    }
    for id in timeline.record_ids::<HostageRescued>() {
        timeline.update_record::<HostageRescued, _>(id, |r| {
            if !r.hostage.is_resolved()
                && let Some(hostage) = by_index.get(&r.hostage_index)
            {
                r.hostage = *hostage;
            }
        });
    }

    // A rescue implies a pickup the decoder never reported
    let mut assumed: Vec<HostagePickedUp> = Vec::new();
    for rescue in timeline.records::<HostageRescued>() {
        if !rescue.hostage.is_resolved() {
            continue;
        }
        let same = |p: &HostagePickedUp| p.round == rescue.round && p.hostage == rescue.hostage;
        if !timeline.records::<HostagePickedUp>().any(same) && !assumed.iter().any(same) {
            assumed.push(rescue.assumed_pickup());
        }
    }

    for pickup in assumed {
        tracing::debug!(round = pickup.round, hostage = %pickup.hostage, "Assuming hostage pickup");
        notes.hostage_pickups.insert(
            (pickup.round, pickup.hostage),
            format!(
                "Assuming Hostage {} was picked up; cannot assume TimeInRound.",
                pickup.hostage
            ),
        );
        timeline.push(pickup);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tables
// ═══════════════════════════════════════════════════════════════════════════

impl StatsAggregator<'_> {
    pub(super) fn bombsite_stats(&self, timeline: &EventTimeline) -> Vec<BombsiteStats> {
        [SiteLetter::A, SiteLetter::B]
            .into_iter()
            .map(|site| BombsiteStats {
                bombsite: site.as_char(),
                plants: timeline.records::<BombPlanted>().filter(|p| p.site == site).count() as i32,
                explosions: timeline.records::<BombExploded>().filter(|e| e.site == site).count() as i32,
                defuses: timeline.records::<BombDefused>().filter(|d| d.site == site).count() as i32,
                bounds: self.triggers.bombsite_bounds(site),
            })
            .collect()
    }

    pub(super) fn hostage_stats(&self, timeline: &EventTimeline) -> Vec<HostageStats> {
        [SiteLetter::A, SiteLetter::B]
            .into_iter()
            .map(|hostage| HostageStats {
                hostage: hostage.as_char(),
                hostage_index: timeline
                    .records::<HostageRescued>()
                    .find(|r| r.hostage == hostage)
                    .map(|r| r.hostage_index)
                    .or_else(|| self.triggers.hostage_index(hostage)),
                picked_ups: timeline
                    .records::<HostagePickedUp>()
                    .filter(|p| p.hostage == hostage)
                    .count() as i32,
                rescues: timeline
                    .records::<HostageRescued>()
                    .filter(|r| r.hostage == hostage)
                    .count() as i32,
            })
            .collect()
    }

    pub(super) fn rescue_zone_stats(&self) -> Vec<RescueZoneStats> {
        let zones = self.triggers.rescue_zones();
        let expected = self.config.rescue_zone_count() as usize;
        if zones.len() != expected {
            tracing::debug!(found = zones.len(), expected, "Rescue zone count differs from configuration");
        }
        zones.into_iter().map(|bounds| RescueZoneStats { bounds }).collect()
    }
}
