use eframe::egui::Color32;

use crate::catalog::{Catalog, Region};

pub const MIN_ENTITY_SIZE: f32 = 10.0;
pub const MAX_ENTITY_SIZE: f32 = 50.0;
pub const GROUP_NODE_SIZE: f32 = 60.0;

/// Used when the catalog gives no usable maximum.
pub const REFERENCE_MAX_STUDENTS: u32 = 55_000;

pub const MIN_REFERENCE_FACULTY: u32 = 400;
pub const MAX_REFERENCE_FACULTY: u32 = 3_000;

pub const HIERARCHY_EDGE_ALPHA: u8 = 0x66;
pub const SIMILARITY_EDGE_COLOR: Color32 = Color32::from_rgb(0xcc, 0xcc, 0xcc);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeScale {
    domain_max: f32,
}

impl SizeScale {
    pub fn new(domain_max: u32) -> Self {
        let domain_max = if domain_max == 0 {
            REFERENCE_MAX_STUDENTS
        } else {
            domain_max
        };

        Self {
            domain_max: domain_max as f32,
        }
    }

    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self::new(catalog.max_students())
    }

    pub fn size(self, students: u32) -> f32 {
        let t = (students as f32 / self.domain_max).clamp(0.0, 1.0);
        (MIN_ENTITY_SIZE + t * (MAX_ENTITY_SIZE - MIN_ENTITY_SIZE))
            .clamp(MIN_ENTITY_SIZE, MAX_ENTITY_SIZE)
    }
}

pub fn faculty_intensity(faculty: u32) -> f32 {
    let span = (MAX_REFERENCE_FACULTY - MIN_REFERENCE_FACULTY) as f32;
    ((faculty as f32 - MIN_REFERENCE_FACULTY as f32) / span).clamp(0.0, 1.0)
}

/// Pulls every channel toward white by `1 - intensity`; full intensity keeps
/// the base color, zero intensity yields white.
pub fn blend_toward_white(base: Color32, intensity: f32) -> Color32 {
    let fade = 1.0 - intensity.clamp(0.0, 1.0);
    let channel = |value: u8| {
        let value = f32::from(value);
        (value + (255.0 - value) * fade).round().clamp(0.0, 255.0) as u8
    };

    Color32::from_rgb(channel(base.r()), channel(base.g()), channel(base.b()))
}

pub fn entity_color(region: Region, faculty: u32) -> Color32 {
    blend_toward_white(region.base_color(), faculty_intensity(faculty))
}

pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    /// Distance of a color from white, summed over channels.
    fn saturation(color: Color32) -> u32 {
        [color.r(), color.g(), color.b()]
            .into_iter()
            .map(|channel| u32::from(255 - channel))
            .sum()
    }

    #[test]
    fn size_spans_display_range() {
        let scale = SizeScale::new(55_000);
        assert_eq!(scale.size(0), 10.0);
        assert_eq!(scale.size(55_000), 50.0);
        assert_eq!(scale.size(27_500), 30.0);
        assert_eq!(scale.size(90_000), 50.0);
    }

    #[test]
    fn zero_domain_uses_reference() {
        let scale = SizeScale::new(0);
        assert_eq!(scale.size(REFERENCE_MAX_STUDENTS), MAX_ENTITY_SIZE);
        assert_eq!(scale.size(REFERENCE_MAX_STUDENTS / 2), 30.0);
    }

    #[test]
    fn sample_scale_matches_largest_entity() {
        let scale = SizeScale::for_catalog(&Catalog::sample());
        assert_eq!(scale, SizeScale::new(55_000));
        assert_eq!(scale.size(55_000), MAX_ENTITY_SIZE);
    }

    #[test]
    fn faculty_at_reference_bounds() {
        assert_eq!(entity_color(Region::North, 3_000), Region::North.base_color());
        assert_eq!(entity_color(Region::South, 400), Color32::WHITE);
        assert_eq!(entity_color(Region::Central, 10), Color32::WHITE);
        assert_eq!(entity_color(Region::Central, 9_000), Region::Central.base_color());
    }

    #[test]
    fn blend_rounds_each_channel() {
        // 0xe7 = 231, 0x4c = 76, 0x3c = 60 at half intensity.
        let blended = blend_toward_white(Region::North.base_color(), 0.5);
        assert_eq!(blended, Color32::from_rgb(243, 166, 158));
    }

    #[test]
    fn alpha_keeps_channels() {
        let tinted = with_alpha(Region::Central.base_color(), HIERARCHY_EDGE_ALPHA);
        assert_eq!(tinted.a(), 0x66);
        assert_eq!(
            Color32::from_rgba_unmultiplied(0x34, 0x98, 0xdb, 0x66),
            tinted
        );
    }

    fn arb_region() -> impl Strategy<Value = Region> {
        prop_oneof![
            Just(Region::North),
            Just(Region::Central),
            Just(Region::South)
        ]
    }

    proptest! {
        #[test]
        fn size_stays_in_range(students in any::<u32>(), domain in any::<u32>()) {
            let size = SizeScale::new(domain).size(students);
            prop_assert!((MIN_ENTITY_SIZE..=MAX_ENTITY_SIZE).contains(&size));
        }

        #[test]
        fn size_is_monotonic(a in 0u32..200_000, b in 0u32..200_000, domain in 1u32..200_000) {
            let scale = SizeScale::new(domain);
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(scale.size(low) <= scale.size(high));
        }

        #[test]
        fn color_is_deterministic(region in arb_region(), faculty in any::<u32>()) {
            prop_assert_eq!(entity_color(region, faculty), entity_color(region, faculty));
        }

        #[test]
        fn color_saturation_is_monotonic(
            region in arb_region(),
            a in 0u32..5_000,
            b in 0u32..5_000,
        ) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let low_color = entity_color(region, low);
            let high_color = entity_color(region, high);
            prop_assert!(saturation(low_color) <= saturation(high_color));
            prop_assert!(saturation(high_color) <= saturation(region.base_color()));
        }
    }
}
