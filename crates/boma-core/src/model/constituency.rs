//! Fixed register of constituency names.
//!
//! Project records reference constituencies by name only (a soft reference);
//! the register exists so the create guard can reject typos and so selectors
//! have something to cycle through.

/// Every constituency a project may be filed under.
pub const ALL: &[&str] = &[
    "Kampala Central Division",
    "Kawempe North",
    "Kawempe South",
    "Makindye East",
    "Makindye West",
    "Nakawa Division",
    "Rubaga North",
    "Rubaga South",
    "Busiro East",
    "Busiro North",
    "Busiro South",
    "Entebbe Municipality",
    "Kyadondo East",
    "Mukono Municipality",
    "Mukono North",
    "Mukono South",
    "Jinja Municipality East",
    "Jinja Municipality West",
    "Mbale Municipality",
    "Soroti Municipality",
    "Gulu Municipality",
    "Lira Municipality",
    "Arua Municipality",
    "Mbarara Municipality",
    "Kabale Municipality",
    "Fort Portal Municipality",
    "Hoima Municipality",
    "Masaka Municipality",
    "Tororo Municipality",
    "Moroto Municipality",
];

/// Default selection for new drafts.
#[must_use]
pub fn default_name() -> &'static str {
    ALL[0]
}

/// Whether `name` refers to a registered constituency (case-insensitive).
#[must_use]
pub fn is_known(name: &str) -> bool {
    let name = name.trim();
    ALL.iter().any(|known| known.eq_ignore_ascii_case(name))
}
