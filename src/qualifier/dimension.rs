//! Recognized qualifier dimensions.
//!
//! The declaration order of [`QualifierDimension`] is the canonical
//! serialization order and also the order in which the parser tries each
//! pattern. It is not a match precedence: variant resolution ranks candidates
//! by how many dimensions they pin, not by which ones.

use once_cell::sync::Lazy;
use regex::Regex;

/// One attribute axis a resource can be qualified on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QualifierDimension {
    RegionCode,
    Locale,
    LayoutDirection,
    SmallestWidth,
    AvailableWidth,
    AvailableHeight,
    ScreenSize,
    Aspect,
    Round,
    Orientation,
    UiMode,
    NightMode,
    Density,
    TouchScreen,
    Keyboard,
    TextInput,
    NavigationKey,
    NonTouchNav,
    PlatformVersion,
}

struct DimensionEntry {
    dimension: QualifierDimension,
    tag: &'static str,
    pattern: &'static str,
}

/// Source of truth for order, tags and value patterns.
static TABLE: [DimensionEntry; 19] = [
    DimensionEntry {
        dimension: QualifierDimension::RegionCode,
        tag: "region-code",
        pattern: r"mcc\d+(?:-mnc\d+)?",
    },
    DimensionEntry {
        dimension: QualifierDimension::Locale,
        tag: "locale",
        pattern: r"[a-z]{2}(?:-r[A-Z]{2})?|b\+[a-z]{2,3}(?:\+[A-Za-z0-9]+)*",
    },
    DimensionEntry {
        dimension: QualifierDimension::LayoutDirection,
        tag: "layout-direction",
        pattern: r"ldrtl|ldltr",
    },
    DimensionEntry {
        dimension: QualifierDimension::SmallestWidth,
        tag: "smallest-width",
        pattern: r"sw\d+dp",
    },
    DimensionEntry {
        dimension: QualifierDimension::AvailableWidth,
        tag: "available-width",
        pattern: r"w\d+dp",
    },
    DimensionEntry {
        dimension: QualifierDimension::AvailableHeight,
        tag: "available-height",
        pattern: r"h\d+dp",
    },
    DimensionEntry {
        dimension: QualifierDimension::ScreenSize,
        tag: "screen-size",
        pattern: r"small|normal|large|xlarge",
    },
    DimensionEntry {
        dimension: QualifierDimension::Aspect,
        tag: "aspect",
        pattern: r"long|notlong",
    },
    DimensionEntry {
        dimension: QualifierDimension::Round,
        tag: "round",
        pattern: r"round|notround",
    },
    DimensionEntry {
        dimension: QualifierDimension::Orientation,
        tag: "orientation",
        pattern: r"port|land",
    },
    DimensionEntry {
        dimension: QualifierDimension::UiMode,
        tag: "ui-mode",
        pattern: r"car|desk|television|appliance|watch|vrheadset",
    },
    DimensionEntry {
        dimension: QualifierDimension::NightMode,
        tag: "night-mode",
        pattern: r"night|notnight",
    },
    DimensionEntry {
        dimension: QualifierDimension::Density,
        tag: "density",
        pattern: r"(?:[wh]\d+)?(?:ldpi|mdpi|tvdpi|hdpi|xhdpi|xxhdpi|xxxhdpi)",
    },
    DimensionEntry {
        dimension: QualifierDimension::TouchScreen,
        tag: "touch-screen",
        pattern: r"notouch|finger",
    },
    DimensionEntry {
        dimension: QualifierDimension::Keyboard,
        tag: "keyboard",
        pattern: r"keysexposed|keyshidden|keyssoft",
    },
    DimensionEntry {
        dimension: QualifierDimension::TextInput,
        tag: "text-input",
        pattern: r"nokeys|qwerty|12key",
    },
    DimensionEntry {
        dimension: QualifierDimension::NavigationKey,
        tag: "navigation-key",
        pattern: r"navexposed|navhidden",
    },
    DimensionEntry {
        dimension: QualifierDimension::NonTouchNav,
        tag: "non-touch-nav",
        pattern: r"nonav|dpad|trackball|wheel",
    },
    DimensionEntry {
        dimension: QualifierDimension::PlatformVersion,
        tag: "platform-version",
        pattern: r"v\d+",
    },
];

/// `^(value)(-rest)?$`: the value must be followed by a hyphen or the end.
static PREFIX_MATCHERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    TABLE
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            debug_assert_eq!(entry.dimension.index(), i);
            Regex::new(&format!("^({})(-.*)?$", entry.pattern))
                .expect("qualifier patterns are static and valid")
        })
        .collect()
});

impl QualifierDimension {
    /// All dimensions, in canonical order.
    pub const ALL: [QualifierDimension; 19] = [
        Self::RegionCode,
        Self::Locale,
        Self::LayoutDirection,
        Self::SmallestWidth,
        Self::AvailableWidth,
        Self::AvailableHeight,
        Self::ScreenSize,
        Self::Aspect,
        Self::Round,
        Self::Orientation,
        Self::UiMode,
        Self::NightMode,
        Self::Density,
        Self::TouchScreen,
        Self::Keyboard,
        Self::TextInput,
        Self::NavigationKey,
        Self::NonTouchNav,
        Self::PlatformVersion,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable kebab-case name.
    pub fn tag(self) -> &'static str {
        TABLE[self.index()].tag
    }

    /// Length of this dimension's value at the start of `input`, if `input`
    /// begins with a full value followed by `-` or the end of the string.
    pub fn match_prefix(self, input: &str) -> Option<usize> {
        PREFIX_MATCHERS[self.index()]
            .captures(input)
            .and_then(|caps| caps.get(1))
            .map(|m| m.end())
    }

    /// First dimension (in canonical order) whose value prefixes `input`.
    pub fn find_prefix(input: &str) -> Option<(Self, usize)> {
        Self::ALL
            .iter()
            .find_map(|dim| dim.match_prefix(input).map(|len| (*dim, len)))
    }
}

impl std::fmt::Display for QualifierDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_matches_enum() {
        for (i, dim) in QualifierDimension::ALL.iter().enumerate() {
            assert_eq!(TABLE[i].dimension, *dim);
            assert_eq!(dim.index(), i);
        }
    }

    #[test]
    fn tags_are_unique() {
        let tags: std::collections::BTreeSet<_> =
            QualifierDimension::ALL.iter().map(|d| d.tag()).collect();
        assert_eq!(tags.len(), QualifierDimension::ALL.len());
        assert_eq!(QualifierDimension::Density.to_string(), "density");
    }

    #[test]
    fn prefix_must_end_at_hyphen_or_end() {
        let orientation = QualifierDimension::Orientation;
        assert_eq!(orientation.match_prefix("land"), Some(4));
        assert_eq!(orientation.match_prefix("land-hdpi"), Some(4));
        assert_eq!(orientation.match_prefix("landscape"), None);
        // two letters followed by more letters is not a locale
        assert_eq!(QualifierDimension::Locale.match_prefix("land"), None);
    }

    #[test]
    fn multi_token_values() {
        assert_eq!(
            QualifierDimension::find_prefix("mcc310-mnc004-en"),
            Some((QualifierDimension::RegionCode, 13))
        );
        assert_eq!(
            QualifierDimension::find_prefix("en-rUS-land"),
            Some((QualifierDimension::Locale, 6))
        );
    }

    #[test]
    fn density_shapes() {
        let density = QualifierDimension::Density;
        assert_eq!(density.match_prefix("xxhdpi"), Some(6));
        assert_eq!(density.match_prefix("w32mdpi-land"), Some(7));
        assert_eq!(density.match_prefix("nodpi"), None);
        assert_eq!(
            QualifierDimension::find_prefix("w600dp"),
            Some((QualifierDimension::AvailableWidth, 6))
        );
        assert_eq!(
            QualifierDimension::find_prefix("h48hdpi"),
            Some((QualifierDimension::Density, 7))
        );
    }
}
