use super::{Entity, Region};

const SAMPLE: [(u32, &str, Region, u32, u32, i32); 26] = [
    (1, "Vietnam National University, Hanoi", Region::North, 45_000, 2_500, 1956),
    (2, "Hanoi University of Science and Technology", Region::North, 38_000, 2_200, 1956),
    (3, "Hanoi University", Region::North, 25_000, 1_200, 1959),
    (4, "Vietnam National University of Agriculture", Region::North, 22_000, 1_000, 1956),
    (5, "Hanoi Medical University", Region::North, 18_000, 950, 1902),
    (6, "Foreign Trade University", Region::North, 20_000, 800, 1960),
    (7, "National Economics University", Region::North, 28_000, 1_100, 1956),
    (8, "Hanoi University of Mining and Geology", Region::North, 15_000, 700, 1966),
    (9, "Thai Nguyen University", Region::North, 32_000, 1_500, 1994),
    (11, "University of Da Nang", Region::Central, 42_000, 2_100, 1975),
    (12, "Hue University", Region::Central, 35_000, 1_800, 1957),
    (13, "Vinh University", Region::Central, 28_000, 1_300, 1959),
    (14, "Quy Nhon University", Region::Central, 18_000, 850, 1977),
    (15, "Da Nang University of Technology", Region::Central, 16_000, 800, 1975),
    (16, "Hue University of Medicine and Pharmacy", Region::Central, 12_000, 650, 1957),
    (17, "Nha Trang University", Region::Central, 14_000, 700, 2000),
    (18, "Phu Yen University", Region::Central, 8_000, 400, 2009),
    (21, "Vietnam National University, HCMC", Region::South, 55_000, 3_000, 1995),
    (22, "HCMC University of Technology", Region::South, 42_000, 2_300, 1957),
    (23, "University of Medicine and Pharmacy, HCMC", Region::South, 24_000, 1_400, 1947),
    (24, "HCMC University of Economics", Region::South, 38_000, 1_900, 1976),
    (25, "Can Tho University", Region::South, 35_000, 1_700, 1966),
    (26, "HCMC University of Education", Region::South, 30_000, 1_500, 1957),
    (27, "An Giang University", Region::South, 18_000, 900, 2000),
    (28, "Dong Thap University", Region::South, 12_000, 600, 2008),
    (29, "Tra Vinh University", Region::South, 10_000, 500, 2006),
];

pub(super) fn sample_entities() -> Vec<Entity> {
    SAMPLE
        .iter()
        .map(|&(id, name, region, students, faculty, founded)| Entity {
            id,
            name: name.to_owned(),
            region,
            students,
            faculty,
            founded,
            kind: "Public".to_owned(),
        })
        .collect()
}
