//! The timezone-abbreviation provider interface.
//!
//! This crate only consumes an interface returning a set of non-offset short
//! names; discovering them (reading `/usr/share/zoneinfo`, a platform API,
//! or similar) is deliberately left to the caller. Every short name a
//! provider returns that does not start with `+` or `-` becomes a universal
//! (empty-locale-set) `%Z` keyword (see `crate::tables`); filtering out
//! offset-like names is the provider's job, not this trait's.

/// A source of timezone identifiers and the abbreviations they have ever
/// been known by.
pub trait TimezoneNameProvider {
    /// All timezone identifiers known to this provider (e.g. `"America/Los_Angeles"`).
    fn timezones(&self) -> Vec<String>;

    /// Every short name (abbreviation) `zone` has ever used, such as `"PST"`
    /// and `"PDT"`. Names that are themselves numeric offsets (starting with
    /// `+` or `-`) are filtered out by the caller, not the provider.
    fn short_names(&self, zone: &str) -> Vec<String>;
}

/// The trivial provider: no timezones, no abbreviations. A reasonable
/// default when the embedding application has no timezone database to hand,
/// or just wants pure numeric-offset (`%z`) support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTimezoneNames;

impl TimezoneNameProvider for NoTimezoneNames {
    fn timezones(&self) -> Vec<String> {
        Vec::new()
    }

    fn short_names(&self, _zone: &str) -> Vec<String> {
        Vec::new()
    }
}

/// A provider backed by a fixed, caller-supplied table. Useful for tests and
/// for embedders who maintain their own timezone abbreviation list rather
/// than relying on the system provider below.
#[derive(Debug, Clone, Default)]
pub struct StaticTimezoneNames {
    entries: Vec<(String, Vec<String>)>,
}

impl StaticTimezoneNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone(mut self, zone: impl Into<String>, short_names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.entries
            .push((zone.into(), short_names.into_iter().map(Into::into).collect()));
        self
    }
}

impl TimezoneNameProvider for StaticTimezoneNames {
    fn timezones(&self) -> Vec<String> {
        self.entries.iter().map(|(zone, _)| zone.clone()).collect()
    }

    fn short_names(&self, zone: &str) -> Vec<String> {
        self.entries
            .iter()
            .find(|(name, _)| name == zone)
            .map(|(_, names)| names.clone())
            .unwrap_or_default()
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "timezone_name")] {
        /// A provider backed by the system timezone database via `time-tz`.
        ///
        /// This only reports the abbreviation a zone is *currently* using
        /// (e.g. whichever of `PST`/`PDT` applies right now), not every
        /// abbreviation it has ever used across DST transitions and history:
        /// `time-tz` is built around resolving offsets for a given instant,
        /// not enumerating a zone's full abbreviation history. That's a
        /// narrower contract than the interface above nominally allows, and
        /// is an explicit, recorded simplification (see `DESIGN.md`) rather
        /// than a broken promise: a `%Z` keyword learned from today's
        /// abbreviation is still a perfectly good keyword.
        #[derive(Debug, Clone, Copy, Default)]
        pub struct SystemTimezoneNames;

        impl TimezoneNameProvider for SystemTimezoneNames {
            fn timezones(&self) -> Vec<String> {
                time_tz::timezones::db()
                    .iter()
                    .map(|tz| tz.name().to_string())
                    .collect()
            }

            fn short_names(&self, zone: &str) -> Vec<String> {
                let Some(tz) = time_tz::timezones::get_by_name(zone) else {
                    return Vec::new();
                };
                let now = time::OffsetDateTime::now_utc();
                let offset = tz.get_offset_utc(&now);
                vec![offset.name().to_string()]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_timezone_names_is_empty() {
        let provider = NoTimezoneNames;
        assert!(provider.timezones().is_empty());
        assert!(provider.short_names("America/Los_Angeles").is_empty());
    }

    #[test]
    fn static_provider_round_trips() {
        let provider = StaticTimezoneNames::new().with_zone("America/Los_Angeles", ["PST", "PDT"]);
        assert_eq!(provider.timezones(), vec!["America/Los_Angeles".to_string()]);
        assert_eq!(provider.short_names("America/Los_Angeles"), vec!["PST", "PDT"]);
        assert!(provider.short_names("nowhere").is_empty());
    }
}
