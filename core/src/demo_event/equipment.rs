//! Weapon and equipment catalogue.
//!
//! Decoder weapon names (with or without the `weapon_` prefix) map to an
//! element, a class and a subclass name used by the kill and damage tables.

use phf::phf_map;
use std::fmt;

use EquipmentClass as C;
use EquipmentElement as E;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EquipmentElement {
    #[default]
    Unknown,
    // Pistols
    P2000,
    Glock,
    P250,
    Deagle,
    FiveSeven,
    DualBarettas,
    Tec9,
    CZ,
    USP,
    Revolver,
    // SMGs
    MP7,
    MP9,
    Bizon,
    Mac10,
    UMP,
    P90,
    MP5SD,
    // Heavy
    SawedOff,
    Nova,
    Swag7,
    XM1014,
    M249,
    Negev,
    // Rifles
    Gallil,
    Famas,
    AK47,
    M4A4,
    M4A1,
    Scout,
    SG556,
    AUG,
    AWP,
    Scar20,
    G3SG1,
    // Equipment
    Zeus,
    Kevlar,
    Helmet,
    Bomb,
    Knife,
    DefuseKit,
    World,
    // Grenades
    Decoy,
    Molotov,
    Incendiary,
    Flash,
    Smoke,
    HE,
}

impl EquipmentElement {
    pub fn is_grenade(&self) -> bool {
        matches!(
            self,
            EquipmentElement::Decoy
                | EquipmentElement::Molotov
                | EquipmentElement::Incendiary
                | EquipmentElement::Flash
                | EquipmentElement::Smoke
                | EquipmentElement::HE
        )
    }
}

impl fmt::Display for EquipmentElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EquipmentClass {
    #[default]
    Unknown,
    Pistol,
    SMG,
    Heavy,
    Rifle,
    Equipment,
    Grenade,
}

impl fmt::Display for EquipmentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Catalogue entry for a weapon name
#[derive(Debug, Clone, Copy)]
pub struct WeaponInfo {
    pub element: EquipmentElement,
    pub class: EquipmentClass,
    pub subclass: &'static str,
}

impl WeaponInfo {
    const fn new(element: EquipmentElement, class: EquipmentClass, subclass: &'static str) -> Self {
        Self {
            element,
            class,
            subclass,
        }
    }
}

/// A weapon or item as reported on a kill, hurt or shot event
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Equipment {
    pub weapon: EquipmentElement,
    pub class: EquipmentClass,
    pub subclass_name: String,
    /// Name as the decoder reported it
    pub original_string: String,
}

impl Equipment {
    /// Resolve a decoder weapon name against the catalogue.
    /// Unknown names keep their original string with `Unknown` element and class.
    pub fn from_name(name: &str) -> Self {
        match get_weapon_info(name) {
            Some(info) => Self {
                weapon: info.element,
                class: info.class,
                subclass_name: info.subclass.to_string(),
                original_string: name.to_string(),
            },
            None => Self {
                weapon: EquipmentElement::Unknown,
                class: EquipmentClass::Unknown,
                subclass_name: "Unknown".to_string(),
                original_string: name.to_string(),
            },
        }
    }

    /// Display name for output tables, falling back to the raw decoder name
    pub fn display_name(&self) -> String {
        if self.weapon == EquipmentElement::Unknown && !self.original_string.is_empty() {
            self.original_string.clone()
        } else {
            self.weapon.to_string()
        }
    }
}

/// Look up a weapon by decoder name
pub fn get_weapon_info(name: &str) -> Option<&'static WeaponInfo> {
    let key = name.strip_prefix("weapon_").unwrap_or(name);
    WEAPONS.get(key)
}

/// Check if a decoder weapon name is in the catalogue
pub fn is_known_weapon(name: &str) -> bool {
    get_weapon_info(name).is_some()
}

/// Weapon lookup table indexed by decoder name without the `weapon_` prefix
pub static WEAPONS: phf::Map<&'static str, WeaponInfo> = phf_map! {
    // ═══════════════════════════════════════════════════════════════════════════
    // Pistols
    // ═══════════════════════════════════════════════════════════════════════════
    "hkp2000" => WeaponInfo::new(E::P2000, C::Pistol, "Pistol"),
    "glock" => WeaponInfo::new(E::Glock, C::Pistol, "Pistol"),
    "p250" => WeaponInfo::new(E::P250, C::Pistol, "Pistol"),
    "deagle" => WeaponInfo::new(E::Deagle, C::Pistol, "Pistol"),
    "fiveseven" => WeaponInfo::new(E::FiveSeven, C::Pistol, "Pistol"),
    "elite" => WeaponInfo::new(E::DualBarettas, C::Pistol, "Pistol"),
    "tec9" => WeaponInfo::new(E::Tec9, C::Pistol, "Pistol"),
    "cz75a" => WeaponInfo::new(E::CZ, C::Pistol, "Pistol"),
    "usp_silencer" => WeaponInfo::new(E::USP, C::Pistol, "Pistol"),
    "revolver" => WeaponInfo::new(E::Revolver, C::Pistol, "Pistol"),

    // ═══════════════════════════════════════════════════════════════════════════
    // SMGs
    // ═══════════════════════════════════════════════════════════════════════════
    "mp7" => WeaponInfo::new(E::MP7, C::SMG, "SMG"),
    "mp9" => WeaponInfo::new(E::MP9, C::SMG, "SMG"),
    "bizon" => WeaponInfo::new(E::Bizon, C::SMG, "SMG"),
    "mac10" => WeaponInfo::new(E::Mac10, C::SMG, "SMG"),
    "ump45" => WeaponInfo::new(E::UMP, C::SMG, "SMG"),
    "p90" => WeaponInfo::new(E::P90, C::SMG, "SMG"),
    "mp5sd" => WeaponInfo::new(E::MP5SD, C::SMG, "SMG"),

    // ═══════════════════════════════════════════════════════════════════════════
    // Heavy
    // ═══════════════════════════════════════════════════════════════════════════
    "sawedoff" => WeaponInfo::new(E::SawedOff, C::Heavy, "Shotgun"),
    "nova" => WeaponInfo::new(E::Nova, C::Heavy, "Shotgun"),
    "mag7" => WeaponInfo::new(E::Swag7, C::Heavy, "Shotgun"),
    "xm1014" => WeaponInfo::new(E::XM1014, C::Heavy, "Shotgun"),
    "m249" => WeaponInfo::new(E::M249, C::Heavy, "MachineGun"),
    "negev" => WeaponInfo::new(E::Negev, C::Heavy, "MachineGun"),

    // ═══════════════════════════════════════════════════════════════════════════
    // Rifles
    // ═══════════════════════════════════════════════════════════════════════════
    "galilar" => WeaponInfo::new(E::Gallil, C::Rifle, "AssaultRifle"),
    "famas" => WeaponInfo::new(E::Famas, C::Rifle, "AssaultRifle"),
    "ak47" => WeaponInfo::new(E::AK47, C::Rifle, "AssaultRifle"),
    "m4a1" => WeaponInfo::new(E::M4A4, C::Rifle, "AssaultRifle"),
    "m4a1_silencer" => WeaponInfo::new(E::M4A1, C::Rifle, "AssaultRifle"),
    "sg556" => WeaponInfo::new(E::SG556, C::Rifle, "AssaultRifle"),
    "aug" => WeaponInfo::new(E::AUG, C::Rifle, "AssaultRifle"),
    "ssg08" => WeaponInfo::new(E::Scout, C::Rifle, "SniperRifle"),
    "awp" => WeaponInfo::new(E::AWP, C::Rifle, "SniperRifle"),
    "scar20" => WeaponInfo::new(E::Scar20, C::Rifle, "SniperRifle"),
    "g3sg1" => WeaponInfo::new(E::G3SG1, C::Rifle, "SniperRifle"),

    // ═══════════════════════════════════════════════════════════════════════════
    // Equipment
    // ═══════════════════════════════════════════════════════════════════════════
    "taser" => WeaponInfo::new(E::Zeus, C::Equipment, "Zeus"),
    "vest" => WeaponInfo::new(E::Kevlar, C::Equipment, "Armor"),
    "vesthelm" => WeaponInfo::new(E::Helmet, C::Equipment, "Armor"),
    "c4" => WeaponInfo::new(E::Bomb, C::Equipment, "Bomb"),
    "planted_c4" => WeaponInfo::new(E::Bomb, C::Equipment, "Bomb"),
    "knife" => WeaponInfo::new(E::Knife, C::Equipment, "Knife"),
    "knife_t" => WeaponInfo::new(E::Knife, C::Equipment, "Knife"),
    "bayonet" => WeaponInfo::new(E::Knife, C::Equipment, "Knife"),
    "defuser" => WeaponInfo::new(E::DefuseKit, C::Equipment, "DefuseKit"),
    "world" => WeaponInfo::new(E::World, C::Equipment, "World"),
    "worldspawn" => WeaponInfo::new(E::World, C::Equipment, "World"),

    // ═══════════════════════════════════════════════════════════════════════════
    // Grenades
    // ═══════════════════════════════════════════════════════════════════════════
    "decoy" => WeaponInfo::new(E::Decoy, C::Grenade, "Grenade"),
    "molotov" => WeaponInfo::new(E::Molotov, C::Grenade, "Grenade"),
    "inferno" => WeaponInfo::new(E::Molotov, C::Grenade, "Grenade"),
    "incgrenade" => WeaponInfo::new(E::Incendiary, C::Grenade, "Grenade"),
    "flashbang" => WeaponInfo::new(E::Flash, C::Grenade, "Grenade"),
    "smokegrenade" => WeaponInfo::new(E::Smoke, C::Grenade, "Grenade"),
    "hegrenade" => WeaponInfo::new(E::HE, C::Grenade, "Grenade"),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_with_and_without_prefix() {
        let ak = Equipment::from_name("weapon_ak47");
        assert_eq!(ak.weapon, EquipmentElement::AK47);
        assert_eq!(ak.class, EquipmentClass::Rifle);
        assert_eq!(ak.subclass_name, "AssaultRifle");
        assert_eq!(ak.display_name(), "AK47");

        assert!(is_known_weapon("awp"));
        assert!(is_known_weapon("weapon_hegrenade"));
    }

    #[test]
    fn test_unknown_weapon_keeps_original_name() {
        let eq = Equipment::from_name("weapon_snowball");
        assert_eq!(eq.weapon, EquipmentElement::Unknown);
        assert_eq!(eq.class, EquipmentClass::Unknown);
        assert_eq!(eq.display_name(), "weapon_snowball");
    }

    #[test]
    fn test_grenade_elements() {
        assert!(EquipmentElement::Flash.is_grenade());
        assert!(EquipmentElement::Incendiary.is_grenade());
        assert!(!EquipmentElement::Bomb.is_grenade());
    }
}
