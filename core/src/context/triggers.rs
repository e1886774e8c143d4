use std::fmt;

use demostats_types::ZoneBounds;
use serde::{Deserialize, Serialize};

use crate::demo_event::SiteLetter;

/// Trigger-volume geometry extracted by the decoder.
///
/// Only reported in output tables; no decision in this crate depends on the bounds.
pub trait TriggerLookup: fmt::Debug {
    fn bombsite_bounds(&self, site: SiteLetter) -> Option<ZoneBounds>;

    /// Every trigger that isn't a bombsite
    fn rescue_zones(&self) -> Vec<ZoneBounds>;

    /// Entity index of hostage A or B, when the map has one
    fn hostage_index(&self, hostage: SiteLetter) -> Option<i32>;

    fn has_bombsite_triggers(&self) -> bool {
        self.bombsite_bounds(SiteLetter::A).is_some() || self.bombsite_bounds(SiteLetter::B).is_some()
    }

    fn has_hostages(&self) -> bool {
        self.hostage_index(SiteLetter::A).is_some() || self.hostage_index(SiteLetter::B).is_some()
    }
}

/// Lookup for a decoder that extracted no geometry
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTriggers;

impl TriggerLookup for NoTriggers {
    fn bombsite_bounds(&self, _site: SiteLetter) -> Option<ZoneBounds> {
        None
    }

    fn rescue_zones(&self) -> Vec<ZoneBounds> {
        Vec::new()
    }

    fn hostage_index(&self, _hostage: SiteLetter) -> Option<i32> {
        None
    }
}

/// Geometry known up front, e.g. loaded alongside the session config
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticTriggers {
    pub bombsite_a: Option<ZoneBounds>,
    pub bombsite_b: Option<ZoneBounds>,
    pub rescue_zones: Vec<ZoneBounds>,
    pub hostage_a_index: Option<i32>,
    pub hostage_b_index: Option<i32>,
}

impl TriggerLookup for StaticTriggers {
    fn bombsite_bounds(&self, site: SiteLetter) -> Option<ZoneBounds> {
        match site {
            SiteLetter::A => self.bombsite_a,
            SiteLetter::B => self.bombsite_b,
            SiteLetter::Unresolved => None,
        }
    }

    fn rescue_zones(&self) -> Vec<ZoneBounds> {
        self.rescue_zones.clone()
    }

    fn hostage_index(&self, hostage: SiteLetter) -> Option<i32> {
        match hostage {
            SiteLetter::A => self.hostage_a_index,
            SiteLetter::B => self.hostage_b_index,
            SiteLetter::Unresolved => None,
        }
    }
}
