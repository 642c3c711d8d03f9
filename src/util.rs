use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

/// Cuts `text` to at most `max_chars` characters without splitting a code point.
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_owned(),
        None => text.to_owned(),
    }
}

pub fn stable_pair<K: Hash + ?Sized>(key: &K) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(680_000), "680,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_label("Hue University", 30), "Hue University");
        assert_eq!(
            truncate_label("Hanoi University of Science and Technology", 30),
            "Hanoi University of Science an"
        );
        assert_eq!(truncate_label("Đà Nẵng", 2), "Đà");
    }

    #[test]
    fn stable_pair_is_deterministic_and_bounded() {
        let first = stable_pair(&42u32);
        let second = stable_pair(&42u32);
        assert_eq!(first, second);
        assert!((-1.0..=1.0).contains(&first.0));
        assert!((-1.0..=1.0).contains(&first.1));
    }
}
